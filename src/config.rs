use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Knobs for rendering event descriptions.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeConfig {
    /// Suffix appended to conference prices.
    pub currency: String,
    /// What to print for a meetup whose price is empty.
    pub free_label: String,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        DescribeConfig {
            currency: "EUR".to_string(),
            free_label: "free".to_string(),
        }
    }
}

impl DescribeConfig {
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<DescribeConfig> {
        Ok(serde_json::from_str(json)?)
    }
}
