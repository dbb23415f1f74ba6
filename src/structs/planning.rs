use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// 目前檢視的 (年, ISO 週)，由呼叫端持有並傳入每個操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekCursor {
    pub year: i32,
    pub week: i32,
}

impl Display for WeekCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Week {} ({})", self.week, self.year)
    }
}

/// 週數進位規則
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeekRollover {
    /// 每年固定 52 週
    #[default]
    Fixed52,
    /// 依 ISO 曆法，每年 52 或 53 週
    Iso,
}

/// 已存在的排班紀錄 (shifts 表)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub year: i32,
    #[sqlx(rename = "week_number")]
    pub week: i32,
    pub day_of_week: i32,
    #[sqlx(rename = "shift_date")]
    pub date: NaiveDate,
    pub employee_id: Uuid,
    pub half_day: bool,
}

/// 尚未寫入的排班
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub year: i32,
    pub week: i32,
    pub day_of_week: i32,
    pub date: NaiveDate,
    pub employee_id: Uuid,
    pub half_day: bool,
}

impl AssignmentDraft {
    #[cfg(test)]
    pub fn into_assignment(self, id: Uuid) -> Assignment {
        Assignment {
            id,
            year: self.year,
            week: self.week,
            day_of_week: self.day_of_week,
            date: self.date,
            employee_id: self.employee_id,
            half_day: self.half_day,
        }
    }
}

/// 每天的人力合計，半天算 0.5
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotals {
    pub days: BTreeMap<i32, f64>,
    pub week_total: f64,
}

#[derive(Deserialize)]
pub struct WeekQuery {
    pub year: i32,
    pub week: i32,
}

#[derive(Deserialize)]
pub struct DateQuery {
    pub year: i32,
    pub week: i32,
    pub day_of_week: i32,
}

#[derive(Serialize)]
pub struct DateResponse {
    pub date: String,
}

#[derive(Serialize)]
pub struct CursorResponse {
    pub year: i32,
    pub week: i32,
    pub label: String,
}

impl From<WeekCursor> for CursorResponse {
    fn from(cursor: WeekCursor) -> Self {
        Self {
            year: cursor.year,
            week: cursor.week,
            label: cursor.to_string(),
        }
    }
}

/// 管理者手動新增的單筆排班
#[derive(Debug, Clone, Deserialize)]
pub struct NewShift {
    pub day_of_week: i32,
    pub employee_id: Uuid,
    #[serde(default)]
    pub half_day: bool,
}

#[derive(Debug, Deserialize)]
pub struct SaveShiftRequest {
    pub year: i32,
    pub week: i32,
    #[serde(flatten)]
    pub shift: NewShift,
}

#[derive(Debug, Serialize)]
pub struct ShiftEntry {
    pub id: Uuid,
    pub day_of_week: i32,
    pub date: NaiveDate,
    pub employee_id: Uuid,
    pub employee_name: Option<String>,
    pub half_day: bool,
}

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub year: i32,
    pub week: i32,
    pub label: String,
    pub shifts: Vec<ShiftEntry>,
    pub totals: DayTotals,
}

#[derive(Debug, Serialize)]
pub struct DayOverview {
    pub day_of_week: i32,
    pub label: &'static str,
    pub date: NaiveDate,
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct WeekOverview {
    pub year: i32,
    pub week: i32,
    pub days: Vec<DayOverview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEmployee {
    pub employee_id: Uuid,
    pub day: i32,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ReconcileReport {
    pub inserted: Vec<Assignment>,
    pub skipped: Vec<SkippedEmployee>,
}
