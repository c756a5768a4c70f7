//! Filter parsing and listing-strategy selection for `GET /notes`.
//!
//! Raw query strings are parsed into [`FilterCriteria`], which picks exactly
//! one [`ListStrategy`] by precedence:
//!
//! 1. `start_date` + `end_date` + `username`
//! 2. `start_date` + `end_date`
//! 3. `date` + `username`
//! 4. `date`
//! 5. `username`
//! 6. nothing
//!
//! A lone `start_date` or `end_date` is validated and then ignored. Every
//! strategy collapses into one [`NoteListQuery`] for the store.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use pagination::PageRequest;

use super::UserId;

/// Calendar date format accepted for date filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw listing parameters as received from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilterParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub date: Option<String>,
    pub username: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Errors raised while parsing filter parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("{field} must be a date in YYYY-MM-DD format")]
    InvalidDateFormat { field: &'static str, value: String },
}

impl FilterError {
    /// Query parameter the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDateFormat { field, .. } => field,
        }
    }
}

/// Half-open UTC time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    /// Every instant of `day` in UTC.
    pub fn day(day: NaiveDate) -> Self {
        Self::range(day, day)
    }

    /// From the start of `first` through the end of `last`, inclusive of both
    /// calendar days. Yields an empty window when `last` precedes `first`.
    pub fn range(first: NaiveDate, last: NaiveDate) -> Self {
        let end = last
            .succ_opt()
            .map_or(DateTime::<Utc>::MAX_UTC, start_of_day);
        Self {
            start: start_of_day(first),
            end,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// One of the six listing strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStrategy {
    UserRange {
        username: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    Range {
        start: NaiveDate,
        end: NaiveDate,
    },
    UserDay {
        username: String,
        day: NaiveDate,
    },
    Day {
        day: NaiveDate,
    },
    User {
        username: String,
    },
    All,
}

impl ListStrategy {
    /// Username that must be resolved before querying, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::UserRange { username, .. }
            | Self::UserDay { username, .. }
            | Self::User { username } => Some(username.as_str()),
            Self::Range { .. } | Self::Day { .. } | Self::All => None,
        }
    }

    /// Creation-time window the strategy restricts to, if any.
    pub fn window(&self) -> Option<DateWindow> {
        match self {
            Self::UserRange { start, end, .. } | Self::Range { start, end } => {
                Some(DateWindow::range(*start, *end))
            }
            Self::UserDay { day, .. } | Self::Day { day } => Some(DateWindow::day(*day)),
            Self::User { .. } | Self::All => None,
        }
    }
}

impl fmt::Display for ListStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserRange { .. } => "user_range",
            Self::Range { .. } => "range",
            Self::UserDay { .. } => "user_day",
            Self::Day { .. } => "day",
            Self::User { .. } => "user",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

/// Parsed listing parameters.
///
/// # Examples
/// ```
/// use backend::domain::{FilterCriteria, ListStrategy, NoteFilterParams};
///
/// let params = NoteFilterParams {
///     date: Some("2024-03-01".into()),
///     start_date: Some("2024-02-01".into()),
///     end_date: Some("2024-02-29".into()),
///     ..NoteFilterParams::default()
/// };
/// let criteria = FilterCriteria::parse(&params).unwrap();
/// assert!(matches!(criteria.strategy(), ListStrategy::Range { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    date: Option<NaiveDate>,
    username: Option<String>,
    page: PageRequest,
}

impl FilterCriteria {
    /// Parse raw parameters. Blank values count as absent; pagination falls
    /// back to its defaults instead of failing.
    pub fn parse(params: &NoteFilterParams) -> Result<Self, FilterError> {
        Ok(Self {
            start_date: parse_date("start_date", params.start_date.as_deref())?,
            end_date: parse_date("end_date", params.end_date.as_deref())?,
            date: parse_date("date", params.date.as_deref())?,
            username: non_blank(params.username.as_deref()).map(str::to_owned),
            page: PageRequest::from_query(params.page.as_deref(), params.limit.as_deref()),
        })
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Pick the strategy by precedence; first match wins.
    pub fn strategy(&self) -> ListStrategy {
        let username = self.username.clone();
        match (self.start_date, self.end_date, self.date, username) {
            (Some(start), Some(end), _, Some(username)) => ListStrategy::UserRange {
                username,
                start,
                end,
            },
            (Some(start), Some(end), _, None) => ListStrategy::Range { start, end },
            (_, _, Some(day), Some(username)) => ListStrategy::UserDay { username, day },
            (_, _, Some(day), None) => ListStrategy::Day { day },
            (_, _, None, Some(username)) => ListStrategy::User { username },
            (_, _, None, None) => ListStrategy::All,
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, FilterError> {
    non_blank(raw)
        .map(|value| {
            NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
                FilterError::InvalidDateFormat {
                    field,
                    value: value.to_owned(),
                }
            })
        })
        .transpose()
}

/// Single parameterized listing query handed to the note store.
///
/// Results are ordered by `created_at` descending, then id descending, and
/// paged with `LIMIT limit OFFSET (page - 1) * limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteListQuery {
    /// Restrict to notes owned by this user.
    pub owner: Option<UserId>,
    /// Restrict to notes created inside this window.
    pub window: Option<DateWindow>,
    pub page: PageRequest,
}
