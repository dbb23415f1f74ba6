use crate::{
    errors::{AppError, RequestError},
    services::{calendar, planning},
    state::AppState,
    structs::planning::{
        Assignment, CursorResponse, DateQuery, DateResponse, ReconcileReport, SaveShiftRequest,
        WeekCursor, WeekOverview, WeekQuery, WeekView,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Local;
use uuid::Uuid;

pub fn new() -> Router<AppState> {
    Router::new()
        .route("/weeks/current", get(current_week))
        .route("/weeks/next", get(next_week))
        .route("/weeks/previous", get(previous_week))
        .route("/date", get(get_date))
        .route("/week", get(get_week))
        .route("/week/overview", get(get_week_overview))
        .route("/shifts", post(create_shift))
        .route("/shifts/{id}", delete(delete_shift))
        .route("/fixed_days", post(load_fixed_days))
}

fn cursor(state: &AppState, year: i32, week: i32) -> Result<WeekCursor, AppError> {
    Ok(WeekCursor::new(year, week, state.get_rollover())?)
}

/// 今天所在的週
async fn current_week(State(state): State<AppState>) -> Json<CursorResponse> {
    let today = Local::now().date_naive();
    Json(WeekCursor::containing(today, state.get_rollover()).into())
}

/// 下一週
async fn next_week(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<WeekQuery>, AppError>,
) -> Result<Json<CursorResponse>, AppError> {
    let current = cursor(&state, query.year, query.week)?;
    Ok(Json(current.advance(state.get_rollover()).into()))
}

/// 上一週
async fn previous_week(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<WeekQuery>, AppError>,
) -> Result<Json<CursorResponse>, AppError> {
    let current = cursor(&state, query.year, query.week)?;
    Ok(Json(current.retreat(state.get_rollover()).into()))
}

/// (年, 週, 星期) 對應的日期，week 不限範圍
async fn get_date(
    WithRejection(Query(query), _): WithRejection<Query<DateQuery>, AppError>,
) -> Result<Json<DateResponse>, AppError> {
    if !calendar::is_valid_day(query.day_of_week) {
        return Err(RequestError::InvalidDayOfWeek(query.day_of_week).into());
    }

    let date = calendar::to_date_string(query.year, query.week, query.day_of_week)?;
    Ok(Json(DateResponse { date }))
}

async fn get_week(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<WeekQuery>, AppError>,
) -> Result<Json<WeekView>, AppError> {
    let current = cursor(&state, query.year, query.week)?;
    let view = planning::load_week(state.get_store(), state.get_directory(), current).await?;

    Ok(Json(view))
}

async fn get_week_overview(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<WeekQuery>, AppError>,
) -> Result<Json<WeekOverview>, AppError> {
    let current = cursor(&state, query.year, query.week)?;
    let overview =
        planning::week_overview(state.get_store(), state.get_directory(), current).await?;

    Ok(Json(overview))
}

async fn create_shift(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<SaveShiftRequest>, AppError>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let current = cursor(&state, payload.year, payload.week)?;
    let saved = planning::save_shift(
        state.get_store(),
        state.get_directory(),
        current,
        payload.shift,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(saved)))
}

async fn delete_shift(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<StatusCode, AppError> {
    planning::delete_shift(state.get_store(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 依固定班日補齊該週排班
async fn load_fixed_days(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<WeekQuery>, AppError>,
) -> Result<Json<ReconcileReport>, AppError> {
    let current = cursor(&state, query.year, query.week)?;
    let report =
        planning::load_fixed_days(state.get_store(), state.get_directory(), current).await?;

    Ok(Json(report))
}
