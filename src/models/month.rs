//! Calendar months and the budget month entity
//!
//! A [`MonthDate`] is always normalised to the first day of its month, so two
//! dates in the same calendar month compare equal. A [`Month`] is the per-budget
//! row keyed by that date; it carries the manually-set carryover.

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::amount::Amount;
use super::ids::{BudgetId, CategoryId, MonthId};
use super::month_category::MonthCategoryView;

/// A calendar month, stored as its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDate(NaiveDate);

impl MonthDate {
    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn from_ymd(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The last day of the month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        let next = self.next().0;
        if next == self.0 {
            return self.0;
        }
        next.pred_opt().unwrap_or(self.0)
    }

    /// The preceding calendar month, saturating at the calendar's lower limit
    pub fn previous(&self) -> Self {
        Self(self.0.checked_sub_months(Months::new(1)).unwrap_or(self.0))
    }

    /// The following calendar month, saturating at the calendar's upper limit
    pub fn next(&self) -> Self {
        Self(self.0.checked_add_months(Months::new(1)).unwrap_or(self.0))
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl From<NaiveDate> for MonthDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for MonthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0.year(), self.0.month())
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month: {0} (expected YYYY-MM or YYYY-MM-DD)")]
pub struct MonthDateParseError(pub String);

impl FromStr for MonthDate {
    type Err = MonthDateParseError;

    /// Parse `"2022-05"` or any full date such as `"2022-05-17"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthDateParseError(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MonthDateParseError(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthDateParseError(s.to_string()))?;

        Self::from_ymd(year, month).ok_or_else(|| MonthDateParseError(s.to_string()))
    }
}

impl TryFrom<String> for MonthDate {
    type Error = MonthDateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthDate> for String {
    fn from(value: MonthDate) -> Self {
        value.0.format("%Y-%m-%d").to_string()
    }
}

/// One calendar month of one budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Month {
    pub id: MonthId,

    pub budget_id: BudgetId,

    /// Normalised first-of-month date; unique per budget
    pub date: MonthDate,

    /// Funds deliberately held back from this month into the next
    #[serde(default)]
    pub carryover: Amount,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Month {
    /// Create a new month with a zero carryover
    pub fn new(budget_id: BudgetId, date: MonthDate) -> Self {
        let now = Utc::now();
        Self {
            id: MonthId::new(),
            budget_id,
            date,
            carryover: Amount::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the carryover
    pub fn set_carryover(&mut self, carryover: Amount) {
        self.carryover = carryover;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)
    }
}

/// The fully reconciled view of a month
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub month: Month,

    /// The previous month's carryover, credited to this month
    pub carried_over: Amount,

    /// Transactions in income categories dated within the month
    pub income: Amount,

    /// Sum of every category assignment for the month
    pub assigned: Amount,

    /// Funds still free to assign this month
    pub budgetable: Amount,

    pub categories: Vec<MonthCategoryView>,
}

impl MonthView {
    /// Find the row for a category
    pub fn category(&self, category_id: CategoryId) -> Option<&MonthCategoryView> {
        self.categories
            .iter()
            .find(|c| c.category_id == category_id)
    }
}
