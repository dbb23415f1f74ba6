use crate::{
    errors::{InvalidFixedDayError, PlanningError},
    services::calendar::{is_valid_day, to_date},
    structs::{
        employees::Employee,
        planning::{Assignment, AssignmentDraft, WeekCursor},
    },
};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub drafts: Vec<AssignmentDraft>,
    pub rejected: Vec<InvalidFixedDayError>,
}

/// 依員工的固定班日補上本週缺少的排班
///
/// 已存在的 (employee_id, day_of_week) 不會重複產生；固定班日有誤的員工整個略過，
/// 錯誤放進 `rejected`，其他員工照常處理。
/// `existing` 必須是呼叫前剛從儲存層取回的本週資料。
pub fn reconcile_fixed_days(
    cursor: WeekCursor,
    employees: &[Employee],
    existing: &[Assignment],
) -> Result<Reconciliation, PlanningError> {
    let mut occupied: HashSet<(Uuid, i32)> = existing
        .iter()
        .filter(|assignment| cursor.matches(assignment.year, assignment.week))
        .map(|assignment| (assignment.employee_id, assignment.day_of_week))
        .collect();

    let mut result = Reconciliation::default();

    for employee in employees {
        let Some(fixed_days) = &employee.fixed_days else {
            continue;
        };

        if let Some(day) = fixed_days.iter().copied().find(|day| !is_valid_day(*day)) {
            result.rejected.push(InvalidFixedDayError {
                employee_id: employee.id,
                day,
            });
            continue;
        }

        for &day in fixed_days {
            // insert 回傳 false 代表該天已有班 (或固定班日重複)
            if !occupied.insert((employee.id, day)) {
                continue;
            }

            result.drafts.push(AssignmentDraft {
                year: cursor.year,
                week: cursor.week,
                day_of_week: day,
                date: to_date(cursor.year, cursor.week, day)?,
                employee_id: employee.id,
                half_day: false,
            });
        }
    }

    Ok(result)
}
