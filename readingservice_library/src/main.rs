use std::sync::Arc;

use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer};
use anyhow::{anyhow, Context};
use opentelemetry::global;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::runtime::TokioCurrentThread;
use paperclip::actix::{web, OpenApiExt};
use tracing_actix_web::TracingLogger;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use readingservice_library::app_config::config_app;
use readingservice_library::library_repository::{
    InMemoryLibraryRepository, LibraryRepository, PostgresLibraryRepository,
};
use readingservice_library::settings::ServiceSettings;

// Based on https://github.com/LukeMathWalker/tracing-actix-web/blob/main/examples/opentelemetry/src/main.rs#L15
fn init_telemetry() -> anyhow::Result<()> {
    let app_name = "readingservice_library";

    // Spans are exported in batch to the Jaeger agent
    global::set_text_map_propagator(TraceContextPropagator::new());
    #[allow(deprecated)]
    let tracer = opentelemetry_jaeger::new_agent_pipeline()
        .with_service_name(app_name)
        .install_batch(TokioCurrentThread)
        .context("Failed to install OpenTelemetry tracer")?;

    // Tunable via `RUST_LOG` env variable
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info"));
    let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);
    let formatting_layer = BunyanFormattingLayer::new(app_name.into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(telemetry)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install `tracing` subscriber")
}

fn session_key(settings: &ServiceSettings) -> anyhow::Result<Key> {
    match &settings.session_key {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|err| anyhow!("SESSION_KEY must be at least 64 bytes: {:?}", err)),
        None => {
            tracing::warn!("SESSION_KEY not set, sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry()?;
    let settings = ServiceSettings::load()?;
    let key = session_key(&settings)?;
    let cookie_secure = settings.cookie_secure;

    let library_repository: Arc<dyn LibraryRepository> = if settings.use_in_memory_db {
        Arc::new(InMemoryLibraryRepository::default())
    } else {
        Arc::new(
            PostgresLibraryRepository::init(settings.postgres_config())
                .await
                .context("Failed to init postgres")?,
        )
    };

    tracing::info!(
        "starting HTTP server at http://{}:{}",
        settings.bind_address,
        settings.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap_api()
            .app_data(web::Data::new(library_repository.clone()))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_name("session".to_string())
                    .cookie_secure(cookie_secure)
                    .cookie_http_only(true)
                    .cookie_content_security(CookieContentSecurity::Private)
                    .build(),
            )
            .wrap(TracingLogger::default())
            .configure(config_app)
            .with_json_spec_at("/apispec/v2")
            .build()
    })
    .bind((settings.bind_address.as_str(), settings.port))?
    .run()
    .await?;
    Ok(())
}
