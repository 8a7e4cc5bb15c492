use axum::Router;

use crate::{error::AppError, state::AppState};

pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod wishlists;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest(
            "/wishlists",
            wishlists::router()
                .merge(products::router())
                .method_not_allowed_fallback(method_not_allowed),
        )
        .nest(
            "/products",
            products::legacy_router().method_not_allowed_fallback(method_not_allowed),
        )
}

/// Known path, unsupported method: answer 405 in the usual error envelope.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
