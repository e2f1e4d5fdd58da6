use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
}

impl fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCondition::Above => write!(f, "above"),
            AlertCondition::Below => write!(f, "below"),
        }
    }
}

impl FromStr for AlertCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" => Ok(AlertCondition::Above),
            "below" => Ok(AlertCondition::Below),
            other => Err(format!("unknown condition: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    // Creation timestamp in milliseconds, bumped on collision.
    pub id: i64,

    // References Asset.id in the latest snapshot. A rule pointing at an
    // id not present in the snapshot is inert until the id shows up.
    pub crypto_id: String,

    pub condition: AlertCondition,
    pub target_price: f64,

    // Collected and stored; no delivery is wired up.
    pub email: String,

    pub created_at: i64,
}
