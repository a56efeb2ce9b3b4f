//! HTTP transport for a [`DiffService`]
//!
//! | Route | Outcome |
//! |---|---|
//! | `POST /data-upload` | `200` `{"id", "message"}`, `404` if nothing changed, `400` for a bad body |
//! | `GET /diff/{id}` | `200` HTML viewer page, `404` for an unknown or malformed id |
//! | anything else | `404` |
//!
//! Store failures are reported as `500`.

mod page;

use crate::{DiffId, DiffService, Error, ErrorKind};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

const NOT_CHANGED: &str = "Data not changed";
const NOT_FOUND: &str = "Data or Route not found";
const ROUTE_NOT_FOUND: &str = "Route not found";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Serialize)]
struct UploadResponse {
    id: DiffId,
    message: String,
}

/// Build the router serving `service`
pub fn router(service: Arc<DiffService>) -> Router {
    Router::new()
        .route("/data-upload", post(upload).fallback(route_not_found))
        .route("/diff/:id", get(show).fallback(route_not_found))
        .fallback(route_not_found)
        .with_state(service)
}

/// Serve `service` on `addr` until Ctrl-C is received
pub async fn serve(service: DiffService, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "unable to listen for Ctrl-C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// POST /data-upload
async fn upload(State(service): State<Arc<DiffService>>, body: Bytes) -> Response {
    let result = tokio::task::spawn_blocking(move || service.submit_json(&body)).await;

    match result {
        Ok(Ok(submission)) => Json(UploadResponse {
            id: submission.id,
            message: submission.summary,
        })
        .into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            error!(error = %e, "upload task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
        }
    }
}

/// GET /diff/{id}
async fn show(State(service): State<Arc<DiffService>>, Path(id): Path<String>) -> Response {
    let result = tokio::task::spawn_blocking(move || service.retrieve(&id)).await;

    let retrieval = match result {
        Ok(Ok(retrieval)) => retrieval,
        Ok(Err(e)) => return error_response(&e),
        Err(e) => {
            error!(error = %e, "retrieval task failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response();
        }
    };

    match page::render(&retrieval.document()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(id = %retrieval.id, error = %e, "failed to build diff page");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
        }
    }
}

async fn route_not_found() -> Response {
    (StatusCode::NOT_FOUND, ROUTE_NOT_FOUND).into_response()
}

fn error_response(e: &Error) -> Response {
    match e.kind() {
        ErrorKind::MalformedInput => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        ErrorKind::NoChangeDetected => (StatusCode::NOT_FOUND, NOT_CHANGED).into_response(),
        ErrorKind::RecordNotFound => (StatusCode::NOT_FOUND, NOT_FOUND).into_response(),
        ErrorKind::StoreUnavailable => {
            error!(error = %e, code = e.kind().code(), "store call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
        }
    }
}
