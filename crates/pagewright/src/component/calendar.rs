//! Date-picker inputs.
//!
//! Dates are exchanged as `mm/dd/yyyy` strings, the format the pickers render.

use super::{Clickable, Component, ElementHandle, TextInput, ValueHolder, Waitable};
use crate::driver::Session;
use crate::locator::Locator;
use crate::result::{PageError, PageResult};
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};

/// Picker input format
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Sentinel accepted by [`Calendar::set_date`]
pub const TODAY: &str = "today";

/// The calendar day after `date`, formatted `mm/dd/yyyy`
#[must_use]
pub fn tomorrows_date_from(date: NaiveDate) -> String {
    (date + Duration::days(1)).format(DATE_FORMAT).to_string()
}

/// Tomorrow in local time, formatted `mm/dd/yyyy`
#[must_use]
pub fn tomorrows_date() -> String {
    tomorrows_date_from(Local::now().date_naive())
}

/// `mm/dd/yyyy` to `mm/yyyy`
pub fn month_and_year(date: &str) -> PageResult<String> {
    let invalid = || PageError::InvalidDate {
        value: date.to_string(),
    };
    let mut parts = date.split('/');
    let (Some(month), Some(_day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(month) || !all_digits(year) {
        return Err(invalid());
    }
    Ok(format!("{month}/{year}"))
}

/// `mm/yyyy` of tomorrow
#[must_use]
pub fn month_and_year_of_tomorrow() -> String {
    (Local::now().date_naive() + Duration::days(1))
        .format("%m/%Y")
        .to_string()
}

/// A date-picker input
#[derive(Debug, Clone)]
pub struct Calendar {
    input: TextInput,
}

impl Calendar {
    #[must_use]
    pub fn new(session: &Session, locator: Locator) -> Self {
        Self {
            input: TextInput::new(session, locator),
        }
    }

    #[must_use]
    pub fn css(session: &Session, selector: impl Into<String>) -> Self {
        Self::new(session, Locator::css(selector))
    }

    /// The underlying text input
    #[must_use]
    pub const fn input(&self) -> &TextInput {
        &self.input
    }

    /// Clear, open the picker, accept its default (today)
    pub async fn set_today(&self) -> PageResult<()> {
        self.input.clear_value().await?;
        self.input.element().click().await?;
        self.input.press_enter_key().await
    }

    /// Type and submit `date`; [`TODAY`] delegates to [`set_today`](Self::set_today)
    pub async fn set_date(&self, date: &str) -> PageResult<()> {
        if date == TODAY {
            self.set_today().await
        } else {
            self.input.set_value(date, true).await
        }
    }
}

impl Component for Calendar {
    fn element(&self) -> &ElementHandle {
        self.input.element()
    }
}

impl Waitable for Calendar {}
impl Clickable for Calendar {}

#[async_trait]
impl ValueHolder for Calendar {
    async fn value(&self) -> PageResult<String> {
        self.input.value().await
    }

    async fn set_value(&self, value: &str, submit: bool) -> PageResult<()> {
        self.input.set_value(value, submit).await
    }

    async fn verify_value(&self, expected: &str) -> PageResult<()> {
        self.input.verify_value(expected).await
    }
}
