//! Persian (Jalali) and Gregorian date handling
//!
//! Dates are entered and displayed in the locale's calendar but always
//! submitted to the backend as Gregorian `YYYY-MM-DD`. The Jalali conversion is
//! the arithmetic 33-year-cycle scheme the backend also uses for display, so
//! both sides agree on every date.

use crate::error::{FormError, FormResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format shared by the picker, the native input and the backend
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days between the proleptic day number used below and chrono's CE day count
const CE_OFFSET: i64 = 365;

/// Last accepted Jalali year; keeps every conversion within chrono's range
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    #[default]
    Gregorian,
    Persian,
}

/// A date in the Solar Hijri calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
}

impl JalaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> FormResult<Self> {
        if !(1..=MAX_YEAR).contains(&year)
            || !(1..=12).contains(&month) || day < 1 || day > month_length(year, month) {
            return Err(FormError::invalid_date(format!(
                "{year:04}-{month:02}-{day:02}"
            )));
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_year(year: i32) -> bool {
        let year = i64::from(year);
        day_number(year + 1, 1, 1) - day_number(year, 1, 1) == 366
    }

    pub fn from_gregorian(date: NaiveDate) -> Self {
        const MONTH_STARTS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

        let (mut gy, gm, gd) = (date.year() as i64, date.month() as i64, date.day() as i64);
        let mut jy = if gy > 1600 {
            gy -= 1600;
            979
        } else {
            gy -= 621;
            0
        };

        let gy2 = if gm > 2 { gy + 1 } else { gy };
        let mut days = 365 * gy + (gy2 + 3).div_euclid(4) - (gy2 + 99).div_euclid(100)
            + (gy2 + 399).div_euclid(400)
            - 80
            + gd
            + MONTH_STARTS[(gm - 1) as usize];

        jy += 33 * days.div_euclid(12053);
        days = days.rem_euclid(12053);
        jy += 4 * days.div_euclid(1461);
        days = days.rem_euclid(1461);
        if days > 365 {
            jy += (days - 1) / 365;
            days = (days - 1) % 365;
        }

        let (month, day) = if days < 186 {
            (1 + days / 31, 1 + days % 31)
        } else {
            (7 + (days - 186) / 30, 1 + (days - 186) % 30)
        };

        Self {
            year: jy as i32,
            month: month as u32,
            day: day as u32,
        }
    }

    pub fn to_gregorian(&self) -> FormResult<NaiveDate> {
        let days = day_number(i64::from(self.year), self.month, self.day) - CE_OFFSET;
        i32::try_from(days)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| FormError::invalid_date(self.to_string()))
    }
}

/// Proleptic day number of a Jalali date; day 366 is 0001-01-01 Gregorian
fn day_number(year: i64, month: u32, day: u32) -> i64 {
    let jy = year + 1595;
    let month_offset = if month < 7 {
        (month as i64 - 1) * 31
    } else {
        (month as i64 - 7) * 30 + 186
    };
    -355668 + 365 * jy + jy.div_euclid(33) * 8 + (jy.rem_euclid(33) + 3) / 4 + day as i64 + month_offset
}

fn month_length(year: i32, month: u32) -> u32 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 if JalaliDate::is_leap_year(year) => 30,
        _ => 29,
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for JalaliDate {
    type Err = FormError;

    fn from_str(s: &str) -> FormResult<Self> {
        let normalized = normalize_digits(s.trim());
        let mut parts = normalized.split(['-', '/']);
        let mut next = || parts.next().and_then(|p| p.parse::<i64>().ok());
        match (next(), next(), next()) {
            (Some(y), Some(m), Some(d)) => JalaliDate::new(
                i32::try_from(y).map_err(|_| FormError::invalid_date(s))?,
                u32::try_from(m).map_err(|_| FormError::invalid_date(s))?,
                u32::try_from(d).map_err(|_| FormError::invalid_date(s))?,
            ),
            _ => Err(FormError::invalid_date(s)),
        }
    }
}

/// Map Persian and Arabic-Indic digits to ASCII
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '۰'..='۹' => char::from(b'0' + (c as u32 - '۰' as u32) as u8),
            '٠'..='٩' => char::from(b'0' + (c as u32 - '٠' as u32) as u8),
            _ => c,
        })
        .collect()
}

/// Render a Gregorian date in the given display calendar
pub fn format_in(date: NaiveDate, calendar: CalendarKind) -> String {
    match calendar {
        CalendarKind::Gregorian => date.format(DATE_FORMAT).to_string(),
        CalendarKind::Persian => JalaliDate::from_gregorian(date).to_string(),
    }
}

/// Parse display text in the given calendar into a Gregorian date
pub fn parse_in(text: &str, calendar: CalendarKind) -> FormResult<NaiveDate> {
    match calendar {
        CalendarKind::Gregorian => NaiveDate::parse_from_str(&normalize_digits(text.trim()), DATE_FORMAT)
            .map_err(|_| FormError::invalid_date(text)),
        CalendarKind::Persian => text.parse::<JalaliDate>()?.to_gregorian(),
    }
}

/// A date input paired with the Gregorian value submitted for it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlineField {
    display: String,
    gregorian: Option<NaiveDate>,
}

impl DeadlineField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text shown in the input, in the display calendar
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn gregorian(&self) -> Option<NaiveDate> {
        self.gregorian
    }

    /// Value for the backend; empty when no valid date is set
    pub fn submission_value(&self) -> String {
        self.gregorian
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Accept text typed or picked in the display calendar.
    ///
    /// Unparseable text is kept for display but clears the Gregorian value.
    pub fn set_display(&mut self, text: &str, calendar: CalendarKind) -> FormResult<()> {
        self.display = text.to_string();
        if text.trim().is_empty() {
            self.gregorian = None;
            return Ok(());
        }
        match parse_in(text, calendar) {
            Ok(date) => {
                self.gregorian = Some(date);
                Ok(())
            }
            Err(e) => {
                self.gregorian = None;
                Err(e)
            }
        }
    }

    /// Accept a Gregorian `YYYY-MM-DD` value, e.g. from a native date input
    pub fn set_gregorian(&mut self, value: &str, calendar: CalendarKind) -> FormResult<()> {
        if value.trim().is_empty() {
            self.clear();
            return Ok(());
        }
        let date = parse_in(value, CalendarKind::Gregorian)?;
        self.gregorian = Some(date);
        self.display = format_in(date, calendar);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.display.clear();
        self.gregorian = None;
    }
}
