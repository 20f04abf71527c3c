use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::fare_controller::FareController;
use crate::models::fare::{FareQuery, FareResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fare_router() -> Router<AppState> {
    Router::new().route("/calculate", get(calculate_fare))
}

/// Public quoting endpoint, callable without authentication.
async fn calculate_fare(
    State(state): State<AppState>,
    Query(query): Query<FareQuery>,
) -> Result<Json<FareResponse>, AppError> {
    let controller = FareController::new(state.pool.clone());
    let response = controller.calculate(query).await?;
    Ok(Json(response))
}
