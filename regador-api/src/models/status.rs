use serde::{Deserialize, Serialize};

/// Irrigation state reported by `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Whether a watering slot is running right now.
    pub regar: bool,
    /// Duration of the running slot in seconds, zero when idle.
    #[serde(default)]
    pub duracao: u32,
    /// Server time of the snapshot, as sent. Clients parse it when displaying.
    #[serde(default)]
    pub timestamp: Option<String>,
}
