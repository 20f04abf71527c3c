use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::price_controller::PriceController;
use crate::dto::ApiResponse;
use crate::models::price::{CreatePriceRequest, PriceFilters, PriceResponse, UpdatePriceRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_price_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_prices).post(create_price))
        .route(
            "/:id",
            get(get_price).put(update_price).delete(delete_price),
        )
}

async fn list_prices(
    State(state): State<AppState>,
    Query(filters): Query<PriceFilters>,
) -> Result<Json<Vec<PriceResponse>>, AppError> {
    let controller = PriceController::new(state.pool.clone(), state.config.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PriceResponse>, AppError> {
    let controller = PriceController::new(state.pool.clone(), state.config.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

// Mutating endpoints are expected to sit behind the platform's
// company-management authorization; this service does not authenticate.
async fn create_price(
    State(state): State<AppState>,
    Json(request): Json<CreatePriceRequest>,
) -> Result<Json<ApiResponse<PriceResponse>>, AppError> {
    let controller = PriceController::new(state.pool.clone(), state.config.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePriceRequest>,
) -> Result<Json<ApiResponse<PriceResponse>>, AppError> {
    let controller = PriceController::new(state.pool.clone(), state.config.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PriceResponse>>, AppError> {
    let controller = PriceController::new(state.pool.clone(), state.config.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
