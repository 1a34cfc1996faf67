//! Symbol package download endpoint

use axum::{
    body::Body,
    extract::{OriginalUri, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};
use url::Url;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::package::{normalize_version, validate_package_id, validate_package_version};
use crate::domain::{DownloadResponse, FileBody};
use crate::infrastructure::observability::record_symbol_download;

/// GET /api/v2/symbolpackage/{id}/{version}
pub async fn download_symbol_package(
    State(state): State<AppState>,
    Path((id, version)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    validate_package_id(&id).map_err(|e| ApiError::bad_request(e.to_string()).with_param("id"))?;
    validate_package_version(&version)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("version"))?;

    let version = normalize_version(&version)
        .map_err(|e| ApiError::from(e).with_param("version"))?;
    let request_url = request_url(&headers, &uri)?;
    let backend = state.storage().backend_name();

    match state
        .symbol_packages
        .download_result(&request_url, &id, &version)
        .await
    {
        Ok(response) => {
            record_symbol_download(backend, response.kind());
            info!(
                package_id = %id,
                version = %version,
                backend,
                result = response.kind(),
                "Symbol package download"
            );
            Ok(response.into_response())
        }
        Err(e) => {
            record_symbol_download(backend, "error");
            warn!(
                package_id = %id,
                version = %version,
                backend,
                error = %e,
                "Symbol package download failed"
            );
            Err(e.into())
        }
    }
}

/// Absolute URL of the incoming request, honouring `X-Forwarded-Proto`
fn request_url(headers: &HeaderMap, uri: &Uri) -> Result<Url, ApiError> {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim())
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");

    Url::parse(&format!("{}://{}{}", scheme, host, path))
        .map_err(|e| ApiError::bad_request(format!("Invalid request URL: {}", e)))
}

impl IntoResponse for DownloadResponse {
    fn into_response(self) -> Response {
        match self {
            DownloadResponse::Redirect { location } => {
                match HeaderValue::from_str(location.as_str()) {
                    Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
                    Err(_) => ApiError::internal("Storage produced an invalid redirect location")
                        .into_response(),
                }
            }
            DownloadResponse::Stream(stream) => {
                let disposition = format!("attachment; filename=\"{}\"", stream.file_name);
                let body = match stream.body {
                    FileBody::Buffered(bytes) => Body::from(bytes),
                    FileBody::Streamed(chunks) => Body::from_stream(chunks),
                };
                let mut response = Response::new(body);
                let headers = response.headers_mut();

                if let Ok(value) = HeaderValue::from_str(&stream.content_type) {
                    headers.insert(header::CONTENT_TYPE, value);
                }
                headers.insert(header::CONTENT_LENGTH, HeaderValue::from(stream.content_length));
                if let Ok(value) = HeaderValue::from_str(&disposition) {
                    headers.insert(header::CONTENT_DISPOSITION, value);
                }

                response
            }
            DownloadResponse::NotFound(location) => {
                ApiError::not_found(format!("Symbol package file '{}' not found", location))
                    .into_response()
            }
        }
    }
}
