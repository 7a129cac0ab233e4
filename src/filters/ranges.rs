use chrono::{DateTime, Days, NaiveDate};
use std::str::FromStr;
use tracing::debug;

use crate::models::SalesError;
use crate::types::Age;

/// Age bucket labels offered to the dashboard.
pub const AGE_BUCKETS: [&str; 5] = ["18-25", "26-35", "36-45", "46-55", "56+"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive age range. A bucket written as `"N+"` has no upper bound.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AgeBucket {
    pub min: Age,
    pub max: Option<Age>
}

impl AgeBucket {
    pub fn contains(&self, age: Age) -> bool {
        age >= self.min && self.max.is_none_or(|max| age <= max)
    }
}

impl FromStr for AgeBucket {
    type Err = SalesError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let trimmed = label.trim();
        let parse_bound = |bound: &str| bound.trim().parse::<Age>().map_err(|error| {
            SalesError::input_malformed("ageRange", label, format!("bound [{}] is not a whole number: {error}", bound.trim()))
        });

        if let Some(min) = trimmed.strip_suffix('+') {
            return Ok(AgeBucket { min: parse_bound(min)?, max: None });
        }

        let Some((min, max)) = trimmed.split_once('-') else {
            return Err(SalesError::input_malformed("ageRange", label, "expected \"min-max\" or \"min+\""));
        };

        Ok(AgeBucket { min: parse_bound(min)?, max: Some(parse_bound(max)?) })
    }
}

/// Relative date windows offered to the dashboard, each ending today.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DateRangePreset {
    Last7Days,
    Last30Days,
    Last90Days,
    LastYear
}

impl DateRangePreset {
    pub const ALL: [DateRangePreset; 4] = [
        DateRangePreset::Last7Days,
        DateRangePreset::Last30Days,
        DateRangePreset::Last90Days,
        DateRangePreset::LastYear
    ];

    pub fn label(self) -> &'static str {
        match self {
            DateRangePreset::Last7Days => "Last 7 days",
            DateRangePreset::Last30Days => "Last 30 days",
            DateRangePreset::Last90Days => "Last 90 days",
            DateRangePreset::LastYear => "Last year"
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.label().eq_ignore_ascii_case(label.trim()))
    }

    fn days(self) -> u64 {
        match self {
            DateRangePreset::Last7Days => 7,
            DateRangePreset::Last30Days => 30,
            DateRangePreset::Last90Days => 90,
            DateRangePreset::LastYear => 365
        }
    }

    /// `[today - N days, today]`, inclusive on both ends.
    pub fn resolve(self, today: NaiveDate) -> DateBounds {
        DateBounds {
            start: today.checked_sub_days(Days::new(self.days())).unwrap_or(NaiveDate::MIN),
            end: today
        }
    }
}

/// An inclusive calendar-date range.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DateBounds {
    pub start: NaiveDate,
    pub end: NaiveDate
}

impl DateBounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Parses a `dateRange` parameter.
    ///
    /// Accepts `"start,end"` or a preset label. A value with a missing half imposes no
    /// restriction and yields `None`; a half that is present but not a date is an error.
    pub fn parse(value: &str, today: NaiveDate) -> Result<Option<DateBounds>, SalesError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Ok(None);
        }

        if let Some(preset) = DateRangePreset::from_label(trimmed) {
            return Ok(Some(preset.resolve(today)));
        }

        let (start, end) = match trimmed.split_once(',') {
            Some((start, end)) if !start.trim().is_empty() && !end.trim().is_empty() => (start.trim(), end.trim()),
            _ => {
                debug!("Ignoring date range [{trimmed}] with a missing bound");
                return Ok(None);
            }
        };

        Ok(Some(DateBounds {
            start: parse_date(start, value)?,
            end: parse_date(end, value)?
        }))
    }
}

fn parse_date(bound: &str, original: &str) -> Result<NaiveDate, SalesError> {
    NaiveDate::parse_from_str(bound, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(bound).map(|timestamp| timestamp.date_naive()))
        .map_err(|error| SalesError::input_malformed("dateRange", original, format!("[{bound}] is not a date: {error}")))
}
