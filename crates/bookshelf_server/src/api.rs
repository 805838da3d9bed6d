//! Book REST endpoints and router assembly.
//!
//! # Responsibility
//! - Map the HTTP contract onto `BookService` calls.
//! - Keep handlers thin; transaction scope lives in the service.
//!
//! # Invariants
//! - Successful creates answer `201 Created`; other successes answer `200`.
//! - Deletes answer with the plain-text receipt produced by the service.

use crate::errors::ApiResult;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bookshelf_core::{core_version, Book, BookId, BookService};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Builds the application router over shared service state.
pub fn build_router(service: Arc<BookService>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/book", get(list_books_handler).post(create_book_handler))
        .route(
            "/book/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .with_state(service)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: core_version().to_string(),
    })
}

async fn create_book_handler(
    State(service): State<Arc<BookService>>,
    Json(draft): Json<Book>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let created = service.create_book(&draft)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_books_handler(
    State(service): State<Arc<BookService>>,
) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(service.list_books()?))
}

async fn get_book_handler(
    State(service): State<Arc<BookService>>,
    Path(id): Path<BookId>,
) -> ApiResult<Json<Book>> {
    Ok(Json(service.get_book(id)?))
}

async fn update_book_handler(
    State(service): State<Arc<BookService>>,
    Path(id): Path<BookId>,
    Json(patch): Json<Book>,
) -> ApiResult<Json<Book>> {
    Ok(Json(service.update_book(id, &patch)?))
}

async fn delete_book_handler(
    State(service): State<Arc<BookService>>,
    Path(id): Path<BookId>,
) -> ApiResult<&'static str> {
    Ok(service.delete_book(id)?)
}
