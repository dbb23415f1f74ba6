use crate::{
    errors::DataIntegrityError,
    services::calendar::is_valid_day,
    structs::planning::{Assignment, DayTotals},
};
use std::collections::BTreeMap;

/// 計算每天與整週的人力，半天算 0.5
///
/// day_of_week 不在 1..=7 的資料直接回傳錯誤，不會跳過或影響其他天
pub fn aggregate(assignments: &[Assignment]) -> Result<DayTotals, DataIntegrityError> {
    let mut days: BTreeMap<i32, f64> = (1..=7).map(|day| (day, 0.0)).collect();

    for assignment in assignments {
        if !is_valid_day(assignment.day_of_week) {
            return Err(DataIntegrityError {
                shift_id: assignment.id,
                day_of_week: assignment.day_of_week,
            });
        }

        let weight = if assignment.half_day { 0.5 } else { 1.0 };
        *days.entry(assignment.day_of_week).or_default() += weight;
    }

    let week_total = days.values().sum();

    Ok(DayTotals { days, week_total })
}
