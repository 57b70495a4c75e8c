// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use atelier::{Clock, DEFAULT_MAX_ATTEMPTS, DocumentService, SystemClock};
use atelier_api::{
    ApiError, CreateDocumentRequest, CreateOwnerRequest, DocumentResponse, ListDocumentsResponse,
    ListOwnersResponse, OwnerResponse, UpdateDocumentRequest, create_document, create_owner,
    delete_document, get_document, list_documents, list_owners, resolve_kind, update_document,
};
use atelier_domain::{DocumentKind, parse_timezone};
use atelier_persistence::Persistence;
use axum::{
    Json, Router,
    extract::{Path, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono_tz::Tz;
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

#[cfg(test)]
mod tests;

/// Atelier Server - document numbering and storage for the workshop
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "ATELIER_DATABASE")]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long, env = "ATELIER_MYSQL_URL")]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "ATELIER_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "ATELIER_PORT", default_value_t = 3000)]
    port: u16,

    /// IANA time zone used to decide which month a document belongs to
    #[arg(long, env = "ATELIER_TIMEZONE", default_value = "UTC")]
    timezone: String,

    /// How many times a creation may collide on its ID before giving up
    #[arg(long, env = "ATELIER_MAX_ALLOCATION_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_allocation_attempts: u32,
}

/// Application state shared across handlers.
///
/// Every request takes the persistence lock for its whole unit of work.
/// The allocation retry loop still guards against other processes
/// writing to the same database.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for owners and documents.
    persistence: Arc<Mutex<Persistence>>,
    /// Allocation policy (time zone and retry budget).
    service: Arc<DocumentService>,
    /// Source of the creation instant.
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Generic, user-facing message.
    error: String,
    /// Extra context, when there is any worth sharing.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// HTTP error wrapper.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                details: self.details,
            }),
        )
            .into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: String::from("Invalid input"),
                details: Some(err.to_string()),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: String::from("Domain rule violation"),
                details: Some(err.to_string()),
            },
            ApiError::ResourceNotFound { resource_type, .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: format!("{resource_type} not found"),
                details: None,
            },
            ApiError::UnknownDocumentType { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: String::from("Unknown document type"),
                details: None,
            },
            ApiError::Conflict {
                resource_type,
                message,
            } => Self {
                status: StatusCode::CONFLICT,
                message: format!("{resource_type} already exists"),
                details: Some(message),
            },
            ApiError::Internal { message } => {
                error!(error = %message, "Request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                    details: Some(message),
                }
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: String::from("Invalid request body"),
            details: Some(rejection.body_text()),
        }
    }
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Handler for POST `/owners`.
async fn handle_create_owner(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<CreateOwnerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OwnerResponse>), HttpError> {
    let Json(req) = payload?;
    info!(external_id = %req.external_id, "Handling create_owner request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OwnerResponse = create_owner(&mut persistence, req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/owners`.
async fn handle_list_owners(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListOwnersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListOwnersResponse = list_owners(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/{kind}`.
///
/// Allocates the next ID for the kind's current period and stores the
/// document under it.
async fn handle_create_document(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DocumentResponse>), HttpError> {
    let kind: DocumentKind = resolve_kind(&slug)?;
    let Json(req) = payload?;
    info!(%kind, owner = %req.owner, "Handling create_document request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DocumentResponse = create_document(
        &mut persistence,
        &app_state.service,
        app_state.clock.as_ref(),
        kind,
        req,
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/{kind}`.
async fn handle_list_documents(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ListDocumentsResponse>, HttpError> {
    let kind: DocumentKind = resolve_kind(&slug)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListDocumentsResponse = list_documents(&mut persistence, kind)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/{kind}/{id}`.
async fn handle_get_document(
    AxumState(app_state): AxumState<AppState>,
    Path((slug, document_id)): Path<(String, String)>,
) -> Result<Json<DocumentResponse>, HttpError> {
    let kind: DocumentKind = resolve_kind(&slug)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DocumentResponse = get_document(&mut persistence, kind, &document_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/{kind}/{id}`.
async fn handle_update_document(
    AxumState(app_state): AxumState<AppState>,
    Path((slug, document_id)): Path<(String, String)>,
    payload: Result<Json<UpdateDocumentRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>, HttpError> {
    let kind: DocumentKind = resolve_kind(&slug)?;
    let Json(req) = payload?;
    info!(%kind, %document_id, "Handling update_document request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DocumentResponse =
        update_document(&mut persistence, kind, &document_id, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/{kind}/{id}`.
async fn handle_delete_document(
    AxumState(app_state): AxumState<AppState>,
    Path((slug, document_id)): Path<(String, String)>,
) -> Result<StatusCode, HttpError> {
    let kind: DocumentKind = resolve_kind(&slug)?;
    info!(%kind, %document_id, "Handling delete_document request");

    let mut persistence = app_state.persistence.lock().await;
    delete_document(&mut persistence, kind, &document_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Builds the application router with all endpoints.
///
/// The static routes win over the `{kind}` capture, so `/owners` and
/// `/health` never reach the document handlers.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/owners", get(handle_list_owners).post(handle_create_owner))
        .route(
            "/{kind}",
            get(handle_list_documents).post(handle_create_document),
        )
        .route(
            "/{kind}/{id}",
            get(handle_get_document)
                .patch(handle_update_document)
                .delete(handle_delete_document),
        )
        .with_state(app_state)
}

fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        return Ok(Persistence::new_with_mysql(url)?);
    }

    if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Ok(Persistence::new_with_file(db_path)?)
    } else {
        info!("Using in-memory database");
        Ok(Persistence::new_in_memory()?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Atelier Server");

    let timezone: Tz = parse_timezone(&args.timezone)?;
    let service = DocumentService::new(timezone, args.max_allocation_attempts);
    info!(
        timezone = %service.timezone(),
        max_attempts = service.max_attempts(),
        "Document allocation configured"
    );

    let persistence: Persistence = open_persistence(&args)?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        service: Arc::new(service),
        clock: Arc::new(SystemClock),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
