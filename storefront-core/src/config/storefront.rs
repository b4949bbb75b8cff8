//! Storefront display and telemetry settings.

use crate::pricing::CurrencyFormat;
use crate::telemetry::DEFAULT_TELEMETRY_BUFFER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// How money is rendered in cost summaries.
    pub currency: CurrencyFormat,
    /// Capacity of the telemetry channel. Only read at startup.
    pub telemetry_buffer: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyFormat::default(),
            telemetry_buffer: DEFAULT_TELEMETRY_BUFFER,
        }
    }
}
