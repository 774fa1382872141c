use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use regador_api::routes;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handles::*;
use crate::settings::Settings;

pub use crate::state::{Access, MockState};

pub mod handles;
pub mod settings;
pub mod state;

pub fn create_app(state: MockState) -> Router {
    Router::new()
        .route(routes::ADD_SCHEDULE, post(add_schedule))
        .route("/deletar_horario/:id", delete(delete_schedule))
        .route("/ativar_horario/:id", put(set_schedule_active))
        .route(routes::STATUS, get(get_status))
        .route(routes::ACTIVE_SCHEDULES, get(get_active_schedules))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: MockState) -> io::Result<()> {
    axum::serve(listener, create_app(state)).await
}

pub async fn run(settings: &Arc<Settings>) -> io::Result<()> {
    let ip_addr = settings
        .mock
        .host
        .parse::<IpAddr>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let address = SocketAddr::from((ip_addr, settings.mock.port));

    let listener = TcpListener::bind(&address).await?;

    tracing::info!("listening on {:?}", address);

    serve(listener, MockState::new()).await
}
