use crate::{
    errors::RequestError,
    structs::planning::{WeekCursor, WeekRollover},
};
use chrono::{Datelike, NaiveDate};
use std::ops::RangeInclusive;

/// 該年最後一週的週數
///
/// Fixed52 固定回傳 52；Iso 以 12 月 28 日所在的 ISO 週為準
pub fn weeks_in_year(year: i32, rollover: WeekRollover) -> i32 {
    match rollover {
        WeekRollover::Fixed52 => 52,
        WeekRollover::Iso => NaiveDate::from_ymd_opt(year, 12, 28)
            .map(|date| date.iso_week().week() as i32)
            .unwrap_or(52),
    }
}

/// chrono 能表示的年份範圍，超出範圍的年份無法換算日期
pub fn supported_years() -> RangeInclusive<i32> {
    NaiveDate::MIN.year()..=NaiveDate::MAX.year()
}

impl WeekCursor {
    /// 驗證後建立，year 必須在 chrono 可表示的範圍內，week 必須落在 1..=該年週數
    pub fn new(year: i32, week: i32, rollover: WeekRollover) -> Result<Self, RequestError> {
        if !supported_years().contains(&year) {
            return Err(RequestError::InvalidYear(year));
        }
        if week < 1 || week > weeks_in_year(year, rollover) {
            return Err(RequestError::InvalidWeek { year, week });
        }

        Ok(Self { year, week })
    }

    /// 指定日期所在的 ISO 週
    pub fn containing(date: NaiveDate, rollover: WeekRollover) -> Self {
        let iso = date.iso_week();
        let year = iso.year();
        let week = (iso.week() as i32).min(weeks_in_year(year, rollover));

        Self { year, week }
    }

    /// 下一週；已在可表示範圍的最後一週時停在原地
    pub fn advance(self, rollover: WeekRollover) -> Self {
        if self.week < weeks_in_year(self.year, rollover) {
            return Self {
                year: self.year,
                week: self.week + 1,
            };
        }

        match neighbour_year(self.year, 1) {
            Some(year) => Self { year, week: 1 },
            None => self,
        }
    }

    /// 上一週；已在可表示範圍的第一週時停在原地
    pub fn retreat(self, rollover: WeekRollover) -> Self {
        if self.week > 1 {
            return Self {
                year: self.year,
                week: self.week - 1,
            };
        }

        match neighbour_year(self.year, -1) {
            Some(year) => Self {
                year,
                week: weeks_in_year(year, rollover),
            },
            None => self,
        }
    }

    pub fn matches(&self, year: i32, week: i32) -> bool {
        self.year == year && self.week == week
    }
}

fn neighbour_year(year: i32, delta: i32) -> Option<i32> {
    year.checked_add(delta).filter(|year| supported_years().contains(year))
}
