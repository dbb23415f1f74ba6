use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    PlanningError(#[from] PlanningError),
    #[error(transparent)]
    StoreError(#[from] StoreError),
    #[error(transparent)]
    RequestError(#[from] RequestError),
}

/// 排班核心邏輯的錯誤
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanningError {
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
    /// 對帳時改放在 `Reconciliation::rejected` 回報，不中斷整批；
    /// 保留給需要把單一員工的錯誤往上拋的呼叫端
    #[error(transparent)]
    InvalidFixedDay(#[from] InvalidFixedDayError),
    #[error("date out of range: year {year}, week {week}, day {day_of_week}")]
    DateOutOfRange {
        year: i32,
        week: i32,
        day_of_week: i32,
    },
}

/// 從儲存層讀到的 day_of_week 不在 1..=7，代表上游資料已損壞
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("shift {shift_id} has invalid day_of_week {day_of_week}")]
pub struct DataIntegrityError {
    pub shift_id: Uuid,
    pub day_of_week: i32,
}

/// 員工的固定班日含有 1..=7 以外的值，只略過該員工
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("employee {employee_id} has invalid fixed day {day}")]
pub struct InvalidFixedDayError {
    pub employee_id: Uuid,
    pub day: i32,
}

/// 儲存層失敗，原樣往上拋，不自動重試
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("year {0} is outside the supported calendar")]
    InvalidYear(i32),
    #[error("week {week} is not valid for year {year}")]
    InvalidWeek { year: i32, week: i32 },
    #[error("day_of_week {0} must be between 1 and 7")]
    InvalidDayOfWeek(i32),
    #[error("employee {0} not found or not active")]
    UnknownEmployee(Uuid),
    #[error("employee {employee_id} already has a shift on day {day_of_week}")]
    DuplicateShift { employee_id: Uuid, day_of_week: i32 },
    /// 無法解析的 query、path 或 body，沿用 axum 判定的狀態碼
    #[error("{message}")]
    Malformed { status: StatusCode, message: String },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::PlanningError(PlanningError::DataIntegrity(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::PlanningError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::StoreError(_) => StatusCode::BAD_GATEWAY,
            AppError::RequestError(RequestError::UnknownEmployee(_)) => StatusCode::NOT_FOUND,
            AppError::RequestError(RequestError::DuplicateShift { .. }) => StatusCode::CONFLICT,
            AppError::RequestError(RequestError::Malformed { status, .. }) => *status,
            AppError::RequestError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<DataIntegrityError> for AppError {
    fn from(err: DataIntegrityError) -> Self {
        AppError::PlanningError(err.into())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        RequestError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
        .into()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        RequestError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
        .into()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        RequestError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
        .into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status_code, body).into_response()
    }
}
