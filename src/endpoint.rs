/// HTTP endpoint for scraping station gauges
///
/// Endpoints:
/// - GET /metrics - Prometheus text exposition of all station gauges
/// - GET /health - Service health check

use crate::metrics::StationMetrics;
use crate::model::VivaError;
use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Bind the endpoint server. Use port 0 to let the OS choose.
pub fn bind(listen: &str) -> Result<Server, VivaError> {
    Server::http(listen).map_err(|e| VivaError::Io(format!("failed to bind {}: {}", listen, e)))
}

/// Serve requests until the server is shut down.
pub fn serve(server: &Server, metrics: &StationMetrics) {
    for request in server.incoming_requests() {
        handle(request, metrics);
    }
}

fn handle(request: Request, metrics: &StationMetrics) {
    let response = route(request.method(), request.url(), metrics);
    tracing::debug!(
        method = %request.method(),
        url = request.url(),
        status = response.status_code().0,
        "request"
    );

    if let Err(e) = request.respond(response) {
        tracing::warn!(error = %e, "failed to send response");
    }
}

/// Maps a request line to its response.
pub fn route(method: &Method, url: &str, metrics: &StationMetrics) -> HttpResponse {
    let path = url.split('?').next().unwrap_or(url);

    if *method != Method::Get {
        return json_response(
            405,
            serde_json::json!({ "error": "Method not allowed", "method": method.as_str() }),
        );
    }

    match path {
        "/metrics" => handle_metrics(metrics),
        "/health" => handle_health(metrics),
        _ => json_response(
            404,
            serde_json::json!({
                "error": "Not found",
                "available_endpoints": ["/metrics", "/health"]
            }),
        ),
    }
}

/// Handle /metrics endpoint
fn handle_metrics(metrics: &StationMetrics) -> HttpResponse {
    match metrics.render() {
        Ok(body) => {
            with_content_type(Response::from_data(body.into_bytes()), &metrics.content_type())
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to render metrics");
            json_response(500, serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// Handle /health endpoint
fn handle_health(metrics: &StationMetrics) -> HttpResponse {
    json_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "stations_exported": metrics.station_count()
        }),
    )
}

/// Create HTTP response with JSON body
fn json_response(status_code: u16, json: serde_json::Value) -> HttpResponse {
    let body = serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());
    let response =
        Response::from_data(body.into_bytes()).with_status_code(StatusCode::from(status_code));
    with_content_type(response, "application/json")
}

fn with_content_type(response: HttpResponse, content_type: &str) -> HttpResponse {
    match Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
