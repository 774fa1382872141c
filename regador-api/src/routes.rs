//! Paths of the backend endpoints consumed by the page.

use crate::Id;

pub const ADD_SCHEDULE: &str = "/adicionar_horario";
pub const STATUS: &str = "/status";
pub const ACTIVE_SCHEDULES: &str = "/api/horarios";

pub fn delete_schedule(id: Id) -> String {
    format!("/deletar_horario/{id}")
}

pub fn set_schedule_active(id: Id) -> String {
    format!("/ativar_horario/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_paths() {
        assert_eq!(delete_schedule(7), "/deletar_horario/7");
        assert_eq!(set_schedule_active(12), "/ativar_horario/12");
    }
}
