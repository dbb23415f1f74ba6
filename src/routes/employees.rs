use crate::{errors::AppError, state::AppState, structs::employees::Employee};
use axum::{extract::State, routing::get, Json, Router};

pub fn new() -> Router<AppState> {
    Router::new()
        .route("/", get(get_employees))
        .route("/active", get(get_active_employees))
}

/// 取全部員工清單
async fn get_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.get_directory().list_employees().await?;

    Ok(Json(employees))
}

/// 取在職員工，排班時選人用
async fn get_active_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.get_directory().list_active().await?;

    Ok(Json(employees))
}
