use std::rc::Rc;

use regador_api::routes;
use regador_api::{
    CreateScheduleRequest, Id, OperationResponse, ScheduleEntry, StatusSnapshot,
    UpdateScheduleActiveRequest,
};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpRequest};

/// Completion of a schedule mutation.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The backend applied the change.
    Success(T),
    /// The backend answered and refused, with its reason when it gave one.
    Rejected(Option<String>),
    /// The request did not complete or the answer could not be read.
    Failed(Error),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl From<Result<OperationResponse>> for Outcome<()> {
    fn from(result: Result<OperationResponse>) -> Self {
        match result {
            Ok(OperationResponse { sucesso: true, .. }) => Outcome::Success(()),
            Ok(OperationResponse { erro, .. }) => Outcome::Rejected(erro),
            Err(e) => Outcome::Failed(e),
        }
    }
}

/// Typed calls to the irrigation backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Rc<dyn HttpClient>,
}

impl ApiClient {
    pub fn new(http: Rc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create_schedule(&self, request: &CreateScheduleRequest) -> Outcome<()> {
        match HttpRequest::post(routes::ADD_SCHEDULE).json(request) {
            Ok(request) => self.call(request).await.into(),
            Err(e) => Outcome::Failed(e),
        }
    }

    pub async fn delete_schedule(&self, id: Id) -> Outcome<()> {
        self.call(HttpRequest::delete(routes::delete_schedule(id)))
            .await
            .into()
    }

    pub async fn set_schedule_active(&self, id: Id, ativo: bool) -> Outcome<()> {
        let body = UpdateScheduleActiveRequest { ativo };

        match HttpRequest::put(routes::set_schedule_active(id)).json(&body) {
            Ok(request) => self.call(request).await.into(),
            Err(e) => Outcome::Failed(e),
        }
    }

    pub async fn status(&self) -> Result<StatusSnapshot> {
        self.call(HttpRequest::get(routes::STATUS)).await
    }

    pub async fn schedules(&self) -> Result<Vec<ScheduleEntry>> {
        self.call(HttpRequest::get(routes::ACTIVE_SCHEDULES)).await
    }

    // The status code is not consulted: the backend answers refusals such as 403 with a
    // JSON envelope, and anything that is not JSON counts as a transport failure.
    async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.http.send(request).await?;

        Ok(serde_json::from_str(&response.body)?)
    }
}
