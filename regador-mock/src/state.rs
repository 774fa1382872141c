use std::collections::HashSet;
use std::sync::Arc;

use regador_api::{CreateScheduleRequest, Id, ScheduleEntry};
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Weekday tokens, Monday first.
pub const WEEKDAYS: [&str; 7] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sab", "Dom"];

/// Result of looking up an entry before mutating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    NotFound,
    /// The entry belongs to another account.
    Forbidden,
}

#[derive(Debug, Default)]
struct Store {
    entries: Vec<ScheduleEntry>,
    foreign: HashSet<Id>,
    last_id: Id,
}

impl Store {
    fn insert(&mut self, request: CreateScheduleRequest) -> ScheduleEntry {
        self.last_id += 1;

        let entry = ScheduleEntry {
            id: self.last_id,
            hora: request.hora,
            duracao: request.duracao,
            dias_semana: request.dias_semana,
            ativo: true,
        };
        self.entries.push(entry.clone());

        entry
    }

    fn access(&self, id: Id) -> Access {
        if !self.entries.iter().any(|entry| entry.id == id) {
            Access::NotFound
        } else if self.foreign.contains(&id) {
            Access::Forbidden
        } else {
            Access::Granted
        }
    }
}

/// In-memory schedule table shared by the handlers.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    store: Arc<RwLock<Store>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, request: CreateScheduleRequest) -> ScheduleEntry {
        self.store.write().await.insert(request)
    }

    /// Insert an entry owned by another account. Deleting or toggling it is refused.
    pub async fn insert_foreign(&self, request: CreateScheduleRequest) -> ScheduleEntry {
        let mut store = self.store.write().await;
        let entry = store.insert(request);
        store.foreign.insert(entry.id);

        entry
    }

    pub async fn access(&self, id: Id) -> Access {
        self.store.read().await.access(id)
    }

    pub async fn remove(&self, id: Id) -> Access {
        let mut store = self.store.write().await;
        let access = store.access(id);

        if access == Access::Granted {
            store.entries.retain(|entry| entry.id != id);
        }

        access
    }

    pub async fn set_active(&self, id: Id, ativo: bool) -> Access {
        let mut store = self.store.write().await;
        let access = store.access(id);

        if access == Access::Granted {
            if let Some(entry) = store.entries.iter_mut().find(|entry| entry.id == id) {
                entry.ativo = ativo;
            }
        }

        access
    }

    pub async fn entries(&self) -> Vec<ScheduleEntry> {
        self.store.read().await.entries.clone()
    }

    pub async fn active(&self) -> Vec<ScheduleEntry> {
        self.store
            .read()
            .await
            .entries
            .iter()
            .filter(|entry| entry.ativo)
            .cloned()
            .collect()
    }

    /// Duration of the active slot due at `now`, if any.
    pub async fn due(&self, now: OffsetDateTime) -> Option<u32> {
        due_duration(&self.store.read().await.entries, now)
    }
}

/// An active entry is due during the whole minute named by its `hora`, on its weekdays.
pub fn due_duration(entries: &[ScheduleEntry], now: OffsetDateTime) -> Option<u32> {
    let hora = format!("{:02}:{:02}", now.hour(), now.minute());
    let weekday = WEEKDAYS[usize::from(now.weekday().number_days_from_monday())];

    entries
        .iter()
        .filter(|entry| entry.ativo && entry.hora == hora)
        .find(|entry| entry.weekdays().any(|day| day == weekday))
        .map(|entry| entry.duracao)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn request(hora: &str, dias_semana: &str) -> CreateScheduleRequest {
        CreateScheduleRequest {
            hora: hora.into(),
            duracao: 600,
            dias_semana: dias_semana.into(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let state = MockState::new();
        let first = state.insert(request("06:00", "Seg")).await;
        assert_eq!(state.remove(first.id).await, Access::Granted);

        let second = state.insert(request("07:00", "Ter")).await;
        assert_ne!(first.id, second.id);
        assert_eq!(state.remove(first.id).await, Access::NotFound);
    }

    #[tokio::test]
    async fn test_foreign_entries_are_protected() {
        let state = MockState::new();
        let entry = state.insert_foreign(request("06:00", "Seg")).await;

        assert_eq!(state.set_active(entry.id, false).await, Access::Forbidden);
        assert_eq!(state.remove(entry.id).await, Access::Forbidden);
        assert_eq!(state.active().await.len(), 1);
    }

    #[tokio::test]
    async fn test_paused_entries_leave_listing() {
        let state = MockState::new();
        let kept = state.insert(request("06:00", "Seg")).await;
        let paused = state.insert(request("18:00", "Sex")).await;
        state.set_active(paused.id, false).await;

        assert_eq!(state.active().await, vec![kept]);
        assert_eq!(state.entries().await.len(), 2);
    }

    #[test]
    fn test_due_duration() {
        let entries = vec![
            ScheduleEntry {
                id: 1,
                hora: "06:30".into(),
                duracao: 900,
                dias_semana: "Sab,Dom".into(),
                ativo: true,
            },
            ScheduleEntry {
                id: 2,
                hora: "07:00".into(),
                duracao: 300,
                dias_semana: "Seg,Sab".into(),
                ativo: false,
            },
        ];

        // 2024-03-09 is a Saturday.
        assert_eq!(due_duration(&entries, datetime!(2024-03-09 06:30:59 -3)), Some(900));
        assert_eq!(due_duration(&entries, datetime!(2024-03-09 06:31:00 -3)), None);
        assert_eq!(due_duration(&entries, datetime!(2024-03-08 06:30:00 -3)), None);
        assert_eq!(due_duration(&entries, datetime!(2024-03-09 07:00:00 -3)), None);
    }
}
