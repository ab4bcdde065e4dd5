//! HTTP API.
//!
//! Routes:
//! - `GET  /health`
//! - `POST /calculate`       JSON `{"values": [...], "percentile": 95}`
//! - `POST /calculate/file`  multipart `file` plus optional `percentile`
//!
//! Every failure answers 400 with an [`ErrorResponse`] body, except bodies over
//! the configured ceiling (413) and unknown routes (404).

mod handlers;

use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::middleware::Logger;
use actix_web::web::{self, Data, JsonConfig, ServiceConfig};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use outlier_common::ErrorResponse;

use crate::config::Config;

pub use handlers::UploadError;

/// Seconds in-flight requests get to finish after SIGINT/SIGTERM.
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Immutable per-server settings shared by all workers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerSettings {
    /// Percentile applied when a request omits one.
    pub default_percentile: f64,
    /// Ceiling for JSON bodies and multipart uploads.
    pub max_body_bytes: usize,
}

impl From<&Config> for ServerSettings {
    fn from(config: &Config) -> Self {
        ServerSettings {
            default_percentile: config.calculation.default_percentile,
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}

/// Register routes and extractor config. Shared by [`run`] and the API tests.
pub fn app_config(settings: ServerSettings) -> impl Fn(&mut ServiceConfig) + Clone + Send + 'static {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(Data::new(settings))
            .app_data(
                JsonConfig::default()
                    .limit(settings.max_body_bytes)
                    .error_handler(json_error_handler),
            )
            // @NOTE: health-check
            .route("/health", web::get().to(handlers::health))
            // @NOTE: calculation
            .route("/calculate", web::post().to(handlers::calculate))
            .route("/calculate/file", web::post().to(handlers::calculate_file))
            .default_service(web::to(handlers::not_found));
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            HttpResponse::PayloadTooLarge()
                .json(ErrorResponse::message(format!("Invalid request: {err}")))
        }
        _ => HttpResponse::BadRequest().json(ErrorResponse::message(format!("Invalid request: {err}"))),
    };
    InternalError::from_response(err, response).into()
}

/// Bind and serve until SIGINT/SIGTERM.
pub async fn run(config: &Config) -> std::io::Result<()> {
    let settings = ServerSettings::from(config);
    let addr = (config.server.bind_ip.as_str(), config.server.port);

    tracing::info!(
        bind_ip = %config.server.bind_ip,
        port = config.server.port,
        default_percentile = settings.default_percentile,
        max_body_bytes = settings.max_body_bytes,
        "starting HTTP server"
    );

    let configure = app_config(settings);
    let server = HttpServer::new(move || {
        App::new()
            // @NOTE: monitoring
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(configure.clone())
    })
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind(addr)
    .inspect_err(|e| {
        tracing::error!(
            error = %e,
            bind_ip = %config.server.bind_ip,
            port = config.server.port,
            "failed to bind"
        )
    })?;

    for local in server.addrs() {
        tracing::info!(address = %local, "listening");
    }

    server.run().await?;
    tracing::info!("server stopped");
    Ok(())
}
