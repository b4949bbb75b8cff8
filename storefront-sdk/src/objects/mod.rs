pub mod cost_summary;
pub mod orders;

pub use cost_summary::{OrderCostSummary, OrderDetailsResponse};
pub use orders::{OrderDetailResponse, OrderResponse, OrdersIndexResponse, ProductResponse};
