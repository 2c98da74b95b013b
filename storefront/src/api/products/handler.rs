//! Products API Handlers

use axum::Json;
use shared::models::{Product, catalog};

/// The static catalog
pub async fn list() -> Json<Vec<Product>> {
    Json(catalog())
}
