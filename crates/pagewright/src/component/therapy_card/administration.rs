//! Administration status section of a therapy card.

use crate::component::{Calendar, Checkbox, Dropdown, ElementHandle, TextInput, ValueHolder};
use crate::result::PageResult;

/// Start date sentinel that ticks the unknown-start-date box instead
pub const UNKNOWN_START_DATE: &str = "unknown";

/// Reason that unlocks the free-text reason input
pub const OTHER_REASON: &str = "Other";

#[derive(Debug, Clone)]
pub struct AdministrationStatus {
    pub edit_button: ElementHandle,
    pub save_button: ElementHandle,
    pub unknown_start_date: Checkbox,
    pub status: Dropdown,
    pub reason: Dropdown,
    pub date: Calendar,
    pub note: TextInput,
    pub other_reason: TextInput,
}

impl AdministrationStatus {
    /// Section scoped under a therapy card
    #[must_use]
    pub fn new(card: &ElementHandle) -> Self {
        let session = card.session();
        let scoped = |suffix: &str| card.locator().child(suffix);
        Self {
            edit_button: card.child("button[name=\"edit_administration_button\"]"),
            save_button: card.child("button[name=\"edit_administration_submit_button\"]"),
            unknown_start_date: Checkbox::new(session, scoped("input[name=\"start_date_unknown\"]")),
            status: Dropdown::new(
                session,
                scoped("#administration_status-select input[type=\"text\"]"),
            ),
            reason: Dropdown::new(
                session,
                scoped("#administration_status_reason-select input[type=\"text\"]"),
            ),
            date: Calendar::new(session, scoped("input[placeholder=\"mm/dd/yyyy\"]")),
            note: TextInput::new(session, scoped("textarea[placeholder=\"Add a Note\"]")),
            other_reason: TextInput::new(
                session,
                scoped("input[name=\"administration_status_additional_reason\"]"),
            ),
        }
    }

    pub async fn edit(&self) -> PageResult<()> {
        self.edit_button.click().await
    }

    pub async fn save(&self) -> PageResult<()> {
        self.save_button.click().await
    }

    pub async fn select_pre_therapy(&self) -> PageResult<()> {
        self.status.select_option("Pre-Therapy").await
    }

    /// `start_date` may be a date, `"today"`, or [`UNKNOWN_START_DATE`]
    pub async fn select_on_therapy(&self, start_date: &str, note: Option<&str>) -> PageResult<()> {
        self.status.select_option("On Therapy").await?;
        if start_date == UNKNOWN_START_DATE {
            self.unknown_start_date.check().await?;
        } else {
            self.date.set_date(start_date).await?;
        }
        if let Some(note) = note {
            self.note.set_value(note, false).await?;
        }
        Ok(())
    }

    async fn select_with_reason(
        &self,
        status: &str,
        reason: &str,
        date: &str,
        other_reason: Option<&str>,
    ) -> PageResult<()> {
        self.status.select_option(status).await?;
        self.reason.select_option(reason).await?;
        if let (OTHER_REASON, Some(other)) = (reason, other_reason) {
            self.other_reason.set_value(other, false).await?;
        }
        self.date.set_date(date).await
    }

    pub async fn select_no_go(
        &self,
        reason: &str,
        no_go_date: &str,
        other_reason: Option<&str>,
    ) -> PageResult<()> {
        self.select_with_reason("No-Go", reason, no_go_date, other_reason)
            .await
    }

    pub async fn select_discontinued(
        &self,
        reason: &str,
        discontinued_date: &str,
        other_reason: Option<&str>,
    ) -> PageResult<()> {
        self.select_with_reason("Discontinued", reason, discontinued_date, other_reason)
            .await
    }

    pub async fn select_on_hold(
        &self,
        reason: &str,
        recheck_date: &str,
        other_reason: Option<&str>,
    ) -> PageResult<()> {
        self.select_with_reason("On Hold", reason, recheck_date, other_reason)
            .await
    }
}
