use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use regador_api::{
    CreateScheduleRequest, Id, OperationResponse, ScheduleEntry, StatusSnapshot,
    UpdateScheduleActiveRequest,
};
use time::format_description::well_known::Rfc3339;
use time::macros::offset;
use time::{OffsetDateTime, UtcOffset};

use crate::state::{Access, MockState};

/// Wall clock of the deployment the page was written for.
pub const LOCAL_OFFSET: UtcOffset = offset!(-3);

const NOT_FOUND_PAGE: &str = "<!doctype html>\n<title>404 Not Found</title>\n<h1>Not Found</h1>\n";
const FORBIDDEN: &str = "Não autorizado";

pub async fn add_schedule(
    State(state): State<MockState>,
    body: Result<Json<CreateScheduleRequest>, JsonRejection>,
) -> Json<OperationResponse> {
    match body {
        Ok(Json(request)) => {
            let entry = state.insert(request).await;
            tracing::info!("schedule {} added at {}", entry.id, entry.hora);

            Json(OperationResponse::ok())
        }
        Err(rejection) => Json(OperationResponse::failed(rejection.body_text())),
    }
}

pub async fn delete_schedule(State(state): State<MockState>, Path(id): Path<Id>) -> Response {
    match state.remove(id).await {
        Access::Granted => {
            tracing::info!("schedule {} deleted", id);
            Json(OperationResponse::ok()).into_response()
        }
        access => refusal(access),
    }
}

pub async fn set_schedule_active(
    State(state): State<MockState>,
    Path(id): Path<Id>,
    body: Result<Json<UpdateScheduleActiveRequest>, JsonRejection>,
) -> Response {
    match state.access(id).await {
        Access::Granted => {}
        access => return refusal(access),
    }

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return Json(OperationResponse::failed(rejection.body_text())).into_response();
        }
    };

    match state.set_active(id, request.ativo).await {
        Access::Granted => {
            tracing::info!("schedule {} active: {}", id, request.ativo);
            Json(OperationResponse::ok()).into_response()
        }
        access => refusal(access),
    }
}

pub async fn get_status(State(state): State<MockState>) -> Json<StatusSnapshot> {
    let now = OffsetDateTime::now_utc().to_offset(LOCAL_OFFSET);
    let due = state.due(now).await;

    Json(StatusSnapshot {
        regar: due.is_some(),
        duracao: due.unwrap_or_default(),
        timestamp: now.format(&Rfc3339).ok(),
    })
}

pub async fn get_active_schedules(State(state): State<MockState>) -> Json<Vec<ScheduleEntry>> {
    Json(state.active().await)
}

fn refusal(access: Access) -> Response {
    match access {
        Access::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(OperationResponse::failed(FORBIDDEN)),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
    }
}
