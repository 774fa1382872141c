use std::rc::Rc;

use regador_api::{CreateScheduleRequest, Id};

use crate::api::{ApiClient, Outcome};
use crate::dom::{Browser, Document};
use crate::error::{Error, Result};
use crate::messages;
use crate::validation::{Field, ValidationError};

/// Raw values of the "new schedule" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleForm {
    pub hora: String,
    /// Duration as typed, in minutes.
    pub duracao: String,
    /// Selected weekday tokens in selection order.
    pub dias: Vec<String>,
}

impl ScheduleForm {
    pub fn read(document: &dyn Document) -> Result<Self> {
        let element = |field: Field| {
            document
                .element_by_id(field.element_id())
                .ok_or_else(|| Error::missing_element(field.element_id()))
        };

        Ok(Self {
            hora: element(Field::Time)?.value(),
            duracao: element(Field::Duration)?.value(),
            dias: element(Field::Weekdays)?.selected_values(),
        })
    }

    pub fn to_request(&self) -> std::result::Result<CreateScheduleRequest, ValidationError> {
        if self.hora.is_empty() {
            return Err(ValidationError::Missing(Field::Time));
        }

        let duracao = duration_seconds(&self.duracao).ok_or(ValidationError::Missing(Field::Duration))?;

        if self.dias.is_empty() {
            return Err(ValidationError::Missing(Field::Weekdays));
        }

        Ok(CreateScheduleRequest {
            hora: self.hora.clone(),
            duracao,
            dias_semana: self.dias.join(","),
        })
    }
}

/// Minutes as typed into seconds. Empty, zero, negative and non-numeric input give `None`.
fn duration_seconds(minutes: &str) -> Option<u32> {
    let minutes: f64 = minutes.trim().parse().ok()?;
    let seconds = (minutes * 60.0).round();

    if seconds.is_finite() && seconds >= 1.0 && seconds <= f64::from(u32::MAX) {
        Some(seconds as u32)
    } else {
        None
    }
}

/// How a schedule action ended, after the user has been told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The user declined the confirmation.
    Cancelled,
    /// Nothing was sent because the form was incomplete.
    Invalid(ValidationError),
    /// The backend accepted the change and the page is reloading.
    Applied,
    /// The backend refused.
    Rejected(Option<String>),
    /// The request failed in transit.
    Failed,
}

/// Turns schedule actions into backend calls and reports back through dialogs.
pub struct ScheduleClient {
    api: ApiClient,
    browser: Rc<dyn Browser>,
}

impl ScheduleClient {
    pub fn new(api: ApiClient, browser: Rc<dyn Browser>) -> Self {
        Self { api, browser }
    }

    pub async fn add(&self, form: &ScheduleForm) -> ActionResult {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.browser.alert(&e.to_string());
                return ActionResult::Invalid(e);
            }
        };

        match self.api.create_schedule(&request).await {
            Outcome::Success(()) => self.applied(messages::SCHEDULE_ADDED),
            Outcome::Rejected(reason) => {
                self.browser.alert(&messages::add_rejected(reason.as_deref()));
                ActionResult::Rejected(reason)
            }
            Outcome::Failed(e) => self.failed("add schedule", e),
        }
    }

    pub async fn delete(&self, id: Id) -> ActionResult {
        if !self.browser.confirm(messages::CONFIRM_DELETE) {
            return ActionResult::Cancelled;
        }

        match self.api.delete_schedule(id).await {
            Outcome::Success(()) => self.applied(messages::SCHEDULE_DELETED),
            Outcome::Rejected(reason) => {
                self.browser.alert(&messages::delete_rejected(reason.as_deref()));
                ActionResult::Rejected(reason)
            }
            Outcome::Failed(e) => self.failed("delete schedule", e),
        }
    }

    pub async fn set_active(&self, id: Id, ativo: bool) -> ActionResult {
        if !self.browser.confirm(&messages::confirm_activation(ativo)) {
            return ActionResult::Cancelled;
        }

        match self.api.set_schedule_active(id, ativo).await {
            Outcome::Success(()) => self.applied(&messages::activation_done(ativo)),
            Outcome::Rejected(reason) => {
                self.browser.alert(&messages::update_rejected(reason.as_deref()));
                ActionResult::Rejected(reason)
            }
            Outcome::Failed(e) => self.failed("update schedule", e),
        }
    }

    fn applied(&self, message: &str) -> ActionResult {
        self.browser.alert(message);
        self.browser.reload();
        ActionResult::Applied
    }

    fn failed(&self, action: &str, error: Error) -> ActionResult {
        tracing::error!("Failed to {}: {}", action, error);
        self.browser.alert(messages::CONNECTION_ERROR);
        ActionResult::Failed
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::http::Method;
    use crate::mock::{MockBrowser, MockDocument, MockElement, MockHttp, MockReply};

    use super::*;

    fn form(hora: &str, duracao: &str, dias: &[&str]) -> ScheduleForm {
        ScheduleForm {
            hora: hora.into(),
            duracao: duracao.into(),
            dias: dias.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn client() -> (ScheduleClient, Rc<MockHttp>, Rc<MockBrowser>) {
        let http = Rc::new(MockHttp::new());
        let browser = Rc::new(MockBrowser::new());
        let client = ScheduleClient::new(ApiClient::new(http.clone()), browser.clone());

        (client, http, browser)
    }

    #[test]
    fn test_request_converts_minutes() {
        for minutes in [1u32, 5, 10, 45, 120, 1440] {
            let request = form("06:00", &minutes.to_string(), &["Sex", "Seg", "Qua"])
                .to_request()
                .unwrap();

            assert_eq!(request.duracao, minutes * 60);
            assert_eq!(request.dias_semana, "Sex,Seg,Qua");
            assert_eq!(request.hora, "06:00");
        }

        assert_eq!(form("06:00", "1.5", &["Dom"]).to_request().unwrap().duracao, 90);
    }

    #[test]
    fn test_request_requires_every_field() {
        assert_eq!(
            form("", "10", &["Seg"]).to_request(),
            Err(ValidationError::Missing(Field::Time))
        );
        for duracao in ["", "0", "abc", "-5", "NaN"] {
            assert_eq!(
                form("06:00", duracao, &["Seg"]).to_request(),
                Err(ValidationError::Missing(Field::Duration))
            );
        }
        assert_eq!(
            form("06:00", "10", &[]).to_request(),
            Err(ValidationError::Missing(Field::Weekdays))
        );
    }

    #[test]
    fn test_read_form() {
        let document = MockDocument::new();
        document.insert("hora", MockElement::with_value("17:45"));
        document.insert("duracao", MockElement::with_value("15"));
        document.insert("dias", MockElement::new()).select(&["Ter", "Qui"]);

        assert_eq!(
            ScheduleForm::read(&document).unwrap(),
            form("17:45", "15", &["Ter", "Qui"])
        );
    }

    #[tokio::test]
    async fn test_add_success_reloads() {
        let (client, http, browser) = client();
        http.reply(Method::Post, "/adicionar_horario", MockReply::Json(json!({"sucesso": true})));

        let result = client.add(&form("06:00", "10", &["Seg", "Sex"])).await;

        assert_eq!(result, ActionResult::Applied);
        assert_eq!(browser.alerts(), vec!["Horário adicionado com sucesso!"]);
        assert_eq!(browser.reloads(), 1);

        let requests = http.requests();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"hora": "06:00", "duracao": 600, "dias_semana": "Seg,Sex"}));
    }

    #[tokio::test]
    async fn test_add_rejected_shows_reason() {
        let (client, http, browser) = client();
        http.reply(
            Method::Post,
            "/adicionar_horario",
            MockReply::Json(json!({"sucesso": false, "erro": "X"})),
        );

        let result = client.add(&form("06:00", "10", &["Seg"])).await;

        assert_eq!(result, ActionResult::Rejected(Some("X".into())));
        assert_eq!(browser.alerts().len(), 1);
        assert!(browser.alerts()[0].contains('X'));
        assert_eq!(browser.reloads(), 0);
    }

    #[tokio::test]
    async fn test_add_rejected_without_reason() {
        let (client, http, browser) = client();
        http.reply(Method::Post, "/adicionar_horario", MockReply::Json(json!({"sucesso": false})));

        client.add(&form("06:00", "10", &["Seg"])).await;

        assert_eq!(browser.alerts(), vec!["Erro ao adicionar horário: Desconhecido"]);
    }

    #[tokio::test]
    async fn test_add_invalid_sends_nothing() {
        let (client, http, browser) = client();

        for invalid in [
            form("", "10", &["Seg"]),
            form("06:00", "0", &["Seg"]),
            form("06:00", "", &["Seg"]),
            form("06:00", "10", &[]),
        ] {
            assert!(matches!(client.add(&invalid).await, ActionResult::Invalid(_)));
        }

        assert!(http.requests().is_empty());
        assert_eq!(browser.alerts().len(), 4);
        assert_eq!(browser.alerts()[3], "Por favor, preencha o campo dias da semana");
    }

    #[tokio::test]
    async fn test_add_connection_error() {
        let (client, http, browser) = client();
        http.reply(Method::Post, "/adicionar_horario", MockReply::Fail("offline".into()));

        assert_eq!(client.add(&form("06:00", "10", &["Seg"])).await, ActionResult::Failed);
        assert_eq!(browser.alerts(), vec!["Erro de conexão"]);
        assert_eq!(browser.reloads(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (client, http, browser) = client();
        browser.answer_confirm(false);

        assert_eq!(client.delete(4).await, ActionResult::Cancelled);
        assert!(http.requests().is_empty());
        assert_eq!(browser.confirms(), vec!["Tem certeza que deseja deletar este horário?"]);
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let (client, http, browser) = client();
        http.reply(Method::Delete, "/deletar_horario/4", MockReply::Json(json!({"sucesso": true})));
        http.reply(Method::Delete, "/deletar_horario/5", MockReply::Json(json!({"sucesso": false})));
        http.reply(Method::Delete, "/deletar_horario/6", MockReply::Status(404, "Not Found".into()));

        assert_eq!(client.delete(4).await, ActionResult::Applied);
        assert_eq!(client.delete(5).await, ActionResult::Rejected(None));
        assert_eq!(client.delete(6).await, ActionResult::Failed);

        assert_eq!(
            browser.alerts(),
            vec![
                "Horário deletado com sucesso!",
                "Erro ao deletar horário",
                "Erro de conexão"
            ]
        );
        assert_eq!(browser.reloads(), 1);
    }

    #[tokio::test]
    async fn test_pause_wording() {
        let (client, http, browser) = client();
        http.reply(Method::Put, "/ativar_horario/2", MockReply::Json(json!({"sucesso": true})));

        assert_eq!(client.set_active(2, false).await, ActionResult::Applied);
        assert_eq!(browser.confirms(), vec!["Tem certeza que deseja pausar este horário?"]);
        assert_eq!(browser.alerts(), vec!["Horário pausado com sucesso!"]);
        assert_eq!(http.requests()[0].body.as_deref(), Some(r#"{"ativo":false}"#));
    }

    #[tokio::test]
    async fn test_activate_rejected() {
        let (client, http, browser) = client();
        http.reply(
            Method::Put,
            "/ativar_horario/2",
            MockReply::Status(403, json!({"sucesso": false, "erro": "Não autorizado"}).to_string()),
        );

        assert_eq!(
            client.set_active(2, true).await,
            ActionResult::Rejected(Some("Não autorizado".into()))
        );
        assert_eq!(browser.confirms(), vec!["Tem certeza que deseja ativar este horário?"]);
        assert_eq!(browser.alerts(), vec!["Erro ao atualizar horário: Não autorizado"]);
        assert_eq!(browser.reloads(), 0);
    }
}
