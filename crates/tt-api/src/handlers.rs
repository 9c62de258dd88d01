//! # tt-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core.

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse, ResponseError};
use askama::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tt_core::catalog::{find_category, vocabularies, CATEGORIES};
use tt_core::discovery::DiscoveryFilter;
use tt_core::loader::{load_discovery, DiscoveryCell, DiscoveryState};
use tt_core::repository::TripRepository;
use tt_core::session::{NavItem, SessionGate, SessionState};
use tt_core::{AppError, Trip};
use tt_ui::{DiscoverTemplate, NoticeTemplate};

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: TripRepository,
    /// Sample trips merged under every load
    pub seed: Vec<Trip>,
    pub discovery: DiscoveryCell,
    pub session: SessionGate,
    /// Cancelled when the server shuts down; in-flight loads are dropped
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        repo: TripRepository,
        seed: Vec<Trip>,
        session: SessionGate,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            repo,
            seed,
            discovery: DiscoveryCell::new(),
            session,
            shutdown,
        }
    }

    /// Runs one load and swaps the result in, unless shutdown or a newer
    /// load wins the race.
    pub async fn load(&self) {
        let ticket = self.discovery.begin();
        let outcome = load_discovery(&self.repo, &self.seed, &self.shutdown.child_token()).await;
        self.discovery.finish(ticket, outcome);
    }

    pub fn discovery(&self) -> DiscoveryState {
        self.discovery.current()
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    /// The trip list is still loading or the last load failed
    #[error("{0}")]
    NotReady(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::App(AppError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Self::App(AppError::Unavailable(_)) | Self::NotReady(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::App(AppError::Internal(_)) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

/// Rejects categories outside the vocabulary.
fn checked(filter: DiscoveryFilter) -> Result<DiscoveryFilter, ApiError> {
    let filter = DiscoveryFilter::new(filter.query, filter.category);
    if let Some(id) = &filter.category {
        if find_category(id).is_none() {
            return Err(AppError::ValidationError(format!("unknown category '{id}'")).into());
        }
    }
    Ok(filter)
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub async fn index() -> HttpResponse {
    see_other("/discover")
}

/// Renders the discover surface (e.g., /discover?q=paris&category=Cultural)
pub async fn discover(
    data: web::Data<AppState>,
    query: web::Query<DiscoveryFilter>,
) -> ApiResult {
    let filter = checked(query.into_inner())?;
    let session = data.session.refresh()?;

    match data.discovery() {
        DiscoveryState::Loading => Ok(html(
            StatusCode::OK,
            NoticeTemplate::loading(session).render()?,
        )),
        DiscoveryState::Failed(message) => Ok(html(
            StatusCode::SERVICE_UNAVAILABLE,
            NoticeTemplate::error(session, message).render()?,
        )),
        DiscoveryState::Ready(snapshot) => {
            let visible = filter.apply(&snapshot.trips);
            let page = DiscoverTemplate::new(session, &filter, visible).render()?;
            Ok(html(StatusCode::OK, page))
        }
    }
}

/// JSON list of the trips the discover surface would show.
pub async fn list_trips(
    data: web::Data<AppState>,
    query: web::Query<DiscoveryFilter>,
) -> ApiResult {
    let filter = checked(query.into_inner())?;
    match data.discovery() {
        DiscoveryState::Loading => Err(ApiError::NotReady("Trips are still loading".into())),
        DiscoveryState::Failed(message) => Err(ApiError::NotReady(message)),
        DiscoveryState::Ready(snapshot) => {
            Ok(HttpResponse::Ok().json(filter.apply(&snapshot.trips)))
        }
    }
}

pub async fn list_categories() -> HttpResponse {
    HttpResponse::Ok().json(&CATEGORIES)
}

pub async fn list_options() -> HttpResponse {
    HttpResponse::Ok().json(vocabularies())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView {
    state: &'static str,
    trips: usize,
    rejected: usize,
    loaded_at: Option<DateTime<Utc>>,
    error: Option<String>,
}

/// Where the trip load stands, for health checks and the reload button.
pub async fn discovery_status(data: web::Data<AppState>) -> HttpResponse {
    let view = match data.discovery() {
        DiscoveryState::Loading => StatusView {
            state: "loading",
            trips: 0,
            rejected: 0,
            loaded_at: None,
            error: None,
        },
        DiscoveryState::Ready(snapshot) => StatusView {
            state: "ready",
            trips: snapshot.trips.len(),
            rejected: snapshot.rejected,
            loaded_at: Some(snapshot.loaded_at),
            error: None,
        },
        DiscoveryState::Failed(message) => StatusView {
            state: "failed",
            trips: 0,
            rejected: 0,
            loaded_at: None,
            error: Some(message),
        },
    };
    HttpResponse::Ok().json(view)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView {
    state: SessionState,
    can_access_main_features: bool,
    show_profile_banner: bool,
    nav: &'static [NavItem],
}

pub async fn session_status(data: web::Data<AppState>) -> ApiResult {
    let state = data.session.refresh()?;
    Ok(HttpResponse::Ok().json(SessionView {
        state,
        can_access_main_features: data.session.flags().can_access_main_features(),
        show_profile_banner: state.shows_profile_banner(),
        nav: state.nav_items(),
    }))
}

pub async fn sign_out(data: web::Data<AppState>) -> ApiResult {
    data.session.sign_out()?;
    Ok(see_other("/"))
}

/// Re-runs the trip load and swaps in the result.
pub async fn reload(data: web::Data<AppState>) -> HttpResponse {
    data.load().await;
    see_other("/discover")
}
