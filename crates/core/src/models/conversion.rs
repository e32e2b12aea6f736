use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// Outcome of a single currency conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,

    /// Units of `to` per one unit of `from`
    pub rate: f64,

    pub result: f64,

    /// Name of the rate provider that answered (empty for identity conversions)
    pub source: String,
}
