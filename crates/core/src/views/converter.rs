use serde::Serialize;

use crate::models::conversion::Conversion;
use super::format::format_amount;

/// Result panel of the converter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionView {
    /// Result with 2 to 8 fraction digits, e.g. `0.0000152`
    pub result: String,
    /// e.g. `1 USD = 0.00001520 BTC`
    pub summary: String,
}

impl ConversionView {
    pub fn from_conversion(c: &Conversion) -> Self {
        Self {
            result: format_amount(c.result, 2, 8),
            summary: format!("{} {} = {:.8} {}", c.amount, c.from, c.result, c.to),
        }
    }
}
