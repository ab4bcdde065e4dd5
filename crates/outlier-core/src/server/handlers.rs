use actix_multipart::{Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::web::{Data, Json};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use futures_util::StreamExt;
use outlier_common::{CalculateRequest, Error, ErrorResponse, HealthResponse, PercentileSummary};
use thiserror::Error as ThisError;

use super::ServerSettings;
use crate::ingest;
use crate::version::VERSION;

/// Multipart form field carrying the data file.
const FILE_FIELD: &str = "file";

/// Multipart form field carrying the optional percentile.
const PERCENTILE_FIELD: &str = "percentile";

/// Request-shape failures of `POST /calculate/file`, outside the core taxonomy.
#[derive(Debug, ThisError)]
pub enum UploadError {
    #[error("Failed to read file: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to read file: no 'file' field in form")]
    MissingFile,

    #[error("Failed to read file: upload exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Invalid percentile value: {0}")]
    InvalidPercentile(String),
}

/// Anything a handler can fail with.
#[derive(Debug, ThisError)]
pub(crate) enum ApiError {
    #[error(transparent)]
    Calculation(#[from] Error),

    #[error("Failed to parse file: {0}")]
    Ingestion(Error),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let kind = match self {
            ApiError::Calculation(err) | ApiError::Ingestion(err) => Some(err.kind()),
            ApiError::Upload(_) => None,
        };
        tracing::debug!(error = %self, ?kind, "request rejected");
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            kind,
        })
    }
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(VERSION))
}

pub(crate) async fn calculate(
    settings: Data<ServerSettings>,
    body: Json<CalculateRequest>,
) -> Result<Json<PercentileSummary>, ApiError> {
    let request = body.into_inner();
    let percentile = request.percentile.unwrap_or(settings.default_percentile);
    let summary = outlier_math::summarize(&request.values, percentile).map_err(Error::from)?;
    tracing::debug!(count = summary.count, percentile, result = summary.result, "calculated");
    Ok(Json(summary))
}

pub(crate) async fn calculate_file(
    settings: Data<ServerSettings>,
    payload: Multipart,
) -> Result<Json<PercentileSummary>, ApiError> {
    let upload = read_upload(payload, settings.max_body_bytes).await?;
    let (filename, data) = upload.file.ok_or(UploadError::MissingFile)?;

    let values = ingest::ingest_named(&data, &filename).map_err(ApiError::Ingestion)?;

    let percentile = match upload.percentile.as_deref().map(str::trim) {
        None | Some("") => settings.default_percentile,
        Some(text) => text
            .parse::<f64>()
            .map_err(|e| UploadError::InvalidPercentile(format!("{text}: {e}")))?,
    };

    let summary = outlier_math::summarize(&values, percentile).map_err(Error::from)?;
    tracing::debug!(
        filename = %filename,
        count = summary.count,
        percentile,
        result = summary.result,
        "calculated from upload"
    );
    Ok(Json(summary))
}

pub(crate) async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::message(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}

/// Fields of interest from a multipart form.
#[derive(Debug, Default)]
struct Upload {
    /// Client filename (empty when absent) and contents of the `file` field.
    file: Option<(String, Vec<u8>)>,
    percentile: Option<String>,
}

/// Drain the form, keeping the first `file` and `percentile` fields.
///
/// Unknown fields are read and discarded. The byte ceiling applies to the
/// sum of all field bodies.
async fn read_upload(mut payload: Multipart, limit: usize) -> Result<Upload, UploadError> {
    let mut upload = Upload::default();
    let mut total = 0usize;

    while let Some(field) = payload.next().await {
        let mut field = field?;
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_owned),
                cd.get_filename().map(str::to_owned),
            ),
            None => (None, None),
        };

        let mut body = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            total += chunk.len();
            if total > limit {
                return Err(UploadError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        match name.as_deref() {
            Some(FILE_FIELD) if upload.file.is_none() => {
                upload.file = Some((filename.unwrap_or_default(), body));
            }
            Some(PERCENTILE_FIELD) if upload.percentile.is_none() => {
                let text = String::from_utf8(body)
                    .map_err(|_| UploadError::InvalidPercentile("not valid UTF-8".to_string()))?;
                upload.percentile = Some(text);
            }
            _ => {}
        }
    }

    Ok(upload)
}
