use crate::errors::PlanningError;
use chrono::{Datelike, Duration, NaiveDate};

pub const DAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn is_valid_day(day_of_week: i32) -> bool {
    (1..=7).contains(&day_of_week)
}

pub fn day_label(day_of_week: i32) -> Option<&'static str> {
    if is_valid_day(day_of_week) {
        Some(DAY_LABELS[(day_of_week - 1) as usize])
    } else {
        None
    }
}

/// (年, ISO 週, 星期) 轉成日期
///
/// 第一週的週一 = 1 月 4 日所在那週的週一 (第一週一定包含該年第一個週四)，
/// 再往後推 `(week - 1) * 7 + (day_of_week - 1)` 天。
/// week 不設上下限，53 週或 0 週都單純靠日期運算外推。
pub fn to_date(year: i32, week: i32, day_of_week: i32) -> Result<NaiveDate, PlanningError> {
    let out_of_range = || PlanningError::DateOutOfRange {
        year,
        week,
        day_of_week,
    };

    let jan_4 = NaiveDate::from_ymd_opt(year, 1, 4).ok_or_else(out_of_range)?;
    let first_monday = jan_4
        .checked_sub_signed(Duration::days(
            jan_4.weekday().num_days_from_monday() as i64,
        ))
        .ok_or_else(out_of_range)?;

    let offset = (week as i64 - 1) * 7 + (day_of_week as i64 - 1);

    first_monday
        .checked_add_signed(Duration::days(offset))
        .ok_or_else(out_of_range)
}

/// 同 `to_date`，輸出 `YYYY-MM-DD`
pub fn to_date_string(year: i32, week: i32, day_of_week: i32) -> Result<String, PlanningError> {
    Ok(to_date(year, week, day_of_week)?
        .format("%Y-%m-%d")
        .to_string())
}
