use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{ErrorResponse, ProductAvailabilityResponse};
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::ProductAvailabilityService;
use crate::error::AvailabilityError;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub availability_service: Arc<ProductAvailabilityService>,
}

impl AppState {
    pub fn new(availability_service: ProductAvailabilityService) -> Self {
        Self {
            availability_service: Arc::new(availability_service),
        }
    }
}

/// Query parameters for the product availability endpoint
#[derive(Deserialize, Debug)]
pub struct ProductAvailabilityQuery {
    pub category: Option<String>,
}

/// Axum handler function for GET /api/health
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Axum handler function for GET /api/users/:user_id/products
pub async fn products_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ProductAvailabilityQuery>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/products - query: {:?}", user_id, query);

    let service = &state.availability_service;
    let result = match &query.category {
        Some(category) => service.products_for_user_in_category(&user_id, category),
        None => service.products_for_user(&user_id),
    };

    match result {
        Ok(products) => {
            let response = ProductAvailabilityResponse {
                user_id,
                category: query.category,
                products,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e @ AvailabilityError::UserNotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse { error: e.to_string() }),
        )
            .into_response(),
        Err(e) => {
            error!("Error listing products for user {}: {:?}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Error listing products".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::create_router;
    use crate::storage::test_utils::{sample_products, sample_users};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn setup_test_state() -> AppState {
        AppState::new(ProductAvailabilityService::from_snapshot(
            sample_products(),
            sample_users(),
        ))
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = create_router(setup_test_state());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _) = get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_products_for_user() {
        let (status, json) = get("/api/users/U1001/products").await;

        assert_eq!(status, StatusCode::OK);
        let response: ProductAvailabilityResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.user_id, "U1001");
        assert_eq!(response.category, None);
        let ids: Vec<&str> = response.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1001", "P1003", "P1005"]);
    }

    #[tokio::test]
    async fn test_products_for_user_in_category() {
        let (status, json) = get("/api/users/U1001/products?category=kitchen").await;

        assert_eq!(status, StatusCode::OK);
        let response: ProductAvailabilityResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.category.as_deref(), Some("kitchen"));
        let ids: Vec<&str> = response.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1001", "P1005"]);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (status, json) = get("/api/users/U0000/products").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].as_str().unwrap().contains("U0000"));
    }
}
