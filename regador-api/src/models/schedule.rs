use serde::{Deserialize, Serialize};

use super::Id;

/// A watering slot as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Schedule identifier.
    pub id: Id,
    /// Time of day, `HH:MM`.
    pub hora: String,
    /// Watering duration in seconds.
    pub duracao: u32,
    /// Comma separated weekday tokens (`Seg,Qua,Sex`).
    pub dias_semana: String,
    /// Whether the slot takes part in scheduling. The public listing only returns
    /// active slots and omits the flag.
    #[serde(default = "default_active")]
    pub ativo: bool,
}

impl ScheduleEntry {
    pub fn weekdays(&self) -> impl Iterator<Item = &str> {
        self.dias_semana
            .split(',')
            .map(str::trim)
            .filter(|day| !day.is_empty())
    }
}

fn default_active() -> bool {
    true
}
