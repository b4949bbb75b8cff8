//! Wire objects and identity signing shared by the Storefront orders
//! service and the gateways that call it.

pub mod objects;
pub mod signature;
