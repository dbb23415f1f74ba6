use crate::{
    errors::{AppError, DataIntegrityError, RequestError, StoreError},
    repositories::{AssignmentStore, EmployeeDirectory},
    services::{
        aggregate::aggregate,
        calendar::{day_label, is_valid_day, to_date},
        reconcile::reconcile_fixed_days,
    },
    structs::{
        employees::Employee,
        planning::{
            Assignment, AssignmentDraft, DayOverview, NewShift, ReconcileReport, ShiftEntry,
            SkippedEmployee, WeekCursor, WeekOverview, WeekView,
        },
    },
};
use std::collections::HashMap;
use uuid::Uuid;

fn names_by_id(employees: Vec<Employee>) -> HashMap<Uuid, String> {
    employees
        .into_iter()
        .map(|employee| (employee.id, employee.name))
        .collect()
}

/// 儲存的 shift_date 與 (year, week, day_of_week) 算出的日期不一致時只記 log，以後者為準
fn warn_on_stale_date(shift: &Assignment) {
    match to_date(shift.year, shift.week, shift.day_of_week) {
        Ok(expected) if expected != shift.date => tracing::warn!(
            "shift {} stores date {} but week {} ({}) day {} is {}",
            shift.id,
            shift.date,
            shift.week,
            shift.year,
            shift.day_of_week,
            expected
        ),
        Ok(_) => {}
        Err(err) => tracing::warn!("shift {}: {}", shift.id, err),
    }
}

/// 取一週的排班、每日合計與員工姓名
pub async fn load_week(
    store: &dyn AssignmentStore,
    directory: &dyn EmployeeDirectory,
    cursor: WeekCursor,
) -> Result<WeekView, AppError> {
    let shifts = store.fetch_week(cursor.year, cursor.week).await?;
    let totals = aggregate(&shifts)?;
    let names = names_by_id(directory.list_employees().await?);

    let shifts = shifts
        .into_iter()
        .map(|shift| {
            warn_on_stale_date(&shift);
            ShiftEntry {
                id: shift.id,
                day_of_week: shift.day_of_week,
                date: shift.date,
                employee_id: shift.employee_id,
                employee_name: names.get(&shift.employee_id).cloned(),
                half_day: shift.half_day,
            }
        })
        .collect();

    Ok(WeekView {
        year: cursor.year,
        week: cursor.week,
        label: cursor.to_string(),
        shifts,
        totals,
    })
}

/// 一週總覽：每天有哪些人上班
pub async fn week_overview(
    store: &dyn AssignmentStore,
    directory: &dyn EmployeeDirectory,
    cursor: WeekCursor,
) -> Result<WeekOverview, AppError> {
    let shifts = store.fetch_week(cursor.year, cursor.week).await?;
    let names = names_by_id(directory.list_employees().await?);

    let mut per_day: HashMap<i32, Vec<String>> = HashMap::new();
    for shift in &shifts {
        if !is_valid_day(shift.day_of_week) {
            return Err(DataIntegrityError {
                shift_id: shift.id,
                day_of_week: shift.day_of_week,
            }
            .into());
        }

        if let Some(name) = names.get(&shift.employee_id) {
            per_day
                .entry(shift.day_of_week)
                .or_default()
                .push(name.clone());
        }
    }

    let mut days = Vec::with_capacity(7);
    for day_of_week in 1..=7 {
        days.push(DayOverview {
            day_of_week,
            label: day_label(day_of_week).unwrap_or_default(),
            date: to_date(cursor.year, cursor.week, day_of_week)?,
            names: per_day.remove(&day_of_week).unwrap_or_default(),
        });
    }

    Ok(WeekOverview {
        year: cursor.year,
        week: cursor.week,
        days,
    })
}

/// 新增單筆排班
pub async fn save_shift(
    store: &dyn AssignmentStore,
    directory: &dyn EmployeeDirectory,
    cursor: WeekCursor,
    shift: NewShift,
) -> Result<Assignment, AppError> {
    if !is_valid_day(shift.day_of_week) {
        return Err(RequestError::InvalidDayOfWeek(shift.day_of_week).into());
    }

    let active = directory.list_active().await?;
    if !active.iter().any(|employee| employee.id == shift.employee_id) {
        return Err(RequestError::UnknownEmployee(shift.employee_id).into());
    }

    let existing = store.fetch_week(cursor.year, cursor.week).await?;
    if existing.iter().any(|assignment| {
        assignment.employee_id == shift.employee_id && assignment.day_of_week == shift.day_of_week
    }) {
        return Err(RequestError::DuplicateShift {
            employee_id: shift.employee_id,
            day_of_week: shift.day_of_week,
        }
        .into());
    }

    let draft = AssignmentDraft {
        year: cursor.year,
        week: cursor.week,
        day_of_week: shift.day_of_week,
        date: to_date(cursor.year, cursor.week, shift.day_of_week)?,
        employee_id: shift.employee_id,
        half_day: shift.half_day,
    };

    let inserted = store.insert_many(vec![draft]).await?;

    let saved = inserted
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Unavailable("insert returned no rows".to_string()))?;

    tracing::info!("{}: shift {} saved", cursor, saved.id);

    Ok(saved)
}

pub async fn delete_shift(store: &dyn AssignmentStore, id: Uuid) -> Result<(), AppError> {
    store.delete_by_id(id).await?;
    tracing::info!("shift {} deleted", id);
    Ok(())
}

/// 依固定班日補齊本週排班
///
/// 先取員工、再取本週現有排班，比對後一次寫入。讀寫之間沒有鎖，
/// 同時有另一位管理者寫入同一週時仍可能產生重複排班。
pub async fn load_fixed_days(
    store: &dyn AssignmentStore,
    directory: &dyn EmployeeDirectory,
    cursor: WeekCursor,
) -> Result<ReconcileReport, AppError> {
    let employees = directory.list_active_with_fixed_days().await?;
    let existing = store.fetch_week(cursor.year, cursor.week).await?;

    let reconciliation = reconcile_fixed_days(cursor, &employees, &existing)?;

    let skipped: Vec<SkippedEmployee> = reconciliation
        .rejected
        .into_iter()
        .map(|err| {
            tracing::warn!("skip fixed days for {}: {}", err.employee_id, err);
            SkippedEmployee {
                employee_id: err.employee_id,
                day: err.day,
                reason: err.to_string(),
            }
        })
        .collect();

    let inserted = if reconciliation.drafts.is_empty() {
        Vec::new()
    } else {
        store.insert_many(reconciliation.drafts).await?
    };

    tracing::info!(
        "{}: {} fixed-day shifts inserted, {} employees skipped",
        cursor,
        inserted.len(),
        skipped.len()
    );

    Ok(ReconcileReport { inserted, skipped })
}
