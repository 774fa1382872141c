use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    /// Time of day, `HH:MM`.
    pub hora: String,
    /// Watering duration in seconds.
    pub duracao: u32,
    /// Weekday tokens joined by `,` in the order they were picked.
    pub dias_semana: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateScheduleActiveRequest {
    pub ativo: bool,
}

/// Envelope returned by every schedule mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResponse {
    pub sucesso: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erro: Option<String>,
}

impl OperationResponse {
    pub fn ok() -> Self {
        Self {
            sucesso: true,
            erro: None,
        }
    }

    pub fn failed<S: Into<String>>(reason: S) -> Self {
        Self {
            sucesso: false,
            erro: Some(reason.into()),
        }
    }
}
