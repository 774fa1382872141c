//! User-facing text. The page is served in Brazilian Portuguese.

pub const CONNECTION_ERROR: &str = "Erro de conexão";
pub const UNKNOWN_REASON: &str = "Desconhecido";

pub const SCHEDULE_ADDED: &str = "Horário adicionado com sucesso!";
pub const SCHEDULE_DELETED: &str = "Horário deletado com sucesso!";
pub const CONFIRM_DELETE: &str = "Tem certeza que deseja deletar este horário?";
pub const CONFIRM_LOGOUT: &str = "Tem certeza que deseja sair?";

pub const IRRIGATING: &str = "Regando agora!";
pub const WAITING: &str = "Aguardando próximo horário";
pub const LAST_UPDATE: &str = "Última atualização: ";

pub fn add_rejected(reason: Option<&str>) -> String {
    format!(
        "Erro ao adicionar horário: {}",
        reason.unwrap_or(UNKNOWN_REASON)
    )
}

pub fn delete_rejected(reason: Option<&str>) -> String {
    with_reason("Erro ao deletar horário", reason)
}

pub fn update_rejected(reason: Option<&str>) -> String {
    with_reason("Erro ao atualizar horário", reason)
}

/// Infinitive used in the confirmation question.
pub fn activation_verb(ativo: bool) -> &'static str {
    if ativo { "ativar" } else { "pausar" }
}

pub fn confirm_activation(ativo: bool) -> String {
    format!(
        "Tem certeza que deseja {} este horário?",
        activation_verb(ativo)
    )
}

pub fn activation_done(ativo: bool) -> String {
    let participle = if ativo { "ativado" } else { "pausado" };
    format!("Horário {participle} com sucesso!")
}

fn with_reason(message: &str, reason: Option<&str>) -> String {
    match reason {
        Some(reason) if !reason.is_empty() => format!("{message}: {reason}"),
        _ => message.to_string(),
    }
}
