//! # TripTogether Binary
//!
//! The entry point that assembles the application based on compile-time features.

use actix_web::{web, App, HttpServer};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tt_api::handlers::AppState;
use tt_api::middleware::{cors_policy, security_headers, standard_middleware};
use tt_config::Settings;
use tt_core::repository::TripRepository;
use tt_core::seed::seed_trips;
use tt_core::session::SessionGate;
use tt_core::traits::SessionStore;

#[cfg(not(feature = "store-http"))]
compile_error!("a document store plugin is required; enable the `store-http` feature");

#[cfg(feature = "store-http")]
use tt_store_http::HttpDocumentStore;

#[cfg(feature = "session-file")]
use tt_session_file::FileSessionStore;

#[cfg(not(feature = "session-file"))]
use tt_core::session::InMemorySessionStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut settings = Settings::load()?;

    // 1. Document store
    let store = HttpDocumentStore::new(
        &settings.store.base_url,
        settings.store.api_key.take(),
        Duration::from_secs(settings.store.timeout_secs),
    )?;
    let repo = TripRepository::new(Arc::new(store)).with_collection(settings.store.collection.clone());

    // 2. Session store
    #[cfg(feature = "session-file")]
    let session_store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&settings.session.path)?);
    #[cfg(not(feature = "session-file"))]
    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let gate = SessionGate::new(session_store);

    // 3. Sample trips
    let seed = if settings.seed.enabled {
        seed_trips(Utc::now())
    } else {
        Vec::new()
    };

    let shutdown = CancellationToken::new();
    let state = web::Data::new(AppState::new(repo, seed, gate.clone(), shutdown.clone()));

    // The first load runs while the server already answers with "Loading trips..."
    let loader = state.clone();
    actix_web::rt::spawn(async move { loader.load().await });

    let mut changes = gate.subscribe();
    actix_web::rt::spawn(async move {
        while let Some(session) = gate.next_change(&mut changes).await {
            log::info!("Session is now {:?}", session);
        }
    });

    let (host, port) = settings.bind_addr();
    log::info!("TripTogether starting on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(security_headers())
            .wrap(cors_policy())
            .wrap(standard_middleware())
            .configure(tt_api::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    shutdown.cancel();
    Ok(())
}
