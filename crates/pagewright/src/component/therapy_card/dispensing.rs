//! Dispensing enrollment section of a therapy card.

use super::administration::OTHER_REASON;
use crate::component::{Calendar, Checkbox, Dropdown, ElementHandle, TextInput, ValueHolder};
use crate::result::PageResult;

/// Undecided reason that asks for a follow-up date
pub const DEFERRED_DECISION: &str = "Patient deferred decision";

/// Fields of an opt-in; only `dispensing_pharmacy` is required
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispensingOptIn {
    pub dispensing_pharmacy: String,
    pub outside_pharmacy_reason: Option<String>,
    pub other_reason: Option<String>,
    pub needs_by_date: Option<String>,
    pub days_supply: Option<String>,
    pub per_protocol: bool,
    pub transfer_from_pharmacy: Option<String>,
}

impl DispensingOptIn {
    #[must_use]
    pub fn new(dispensing_pharmacy: impl Into<String>) -> Self {
        Self {
            dispensing_pharmacy: dispensing_pharmacy.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_outside_pharmacy_reason(mut self, reason: impl Into<String>) -> Self {
        self.outside_pharmacy_reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_other_reason(mut self, reason: impl Into<String>) -> Self {
        self.other_reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_needs_by_date(mut self, date: impl Into<String>) -> Self {
        self.needs_by_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_days_supply(mut self, days: impl Into<String>) -> Self {
        self.days_supply = Some(days.into());
        self
    }

    #[must_use]
    pub const fn with_per_protocol(mut self, per_protocol: bool) -> Self {
        self.per_protocol = per_protocol;
        self
    }

    #[must_use]
    pub fn with_transfer_from_pharmacy(mut self, pharmacy: impl Into<String>) -> Self {
        self.transfer_from_pharmacy = Some(pharmacy.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Dispensing {
    pub undecided: ElementHandle,
    pub opt_in: ElementHandle,
    pub opt_out: ElementHandle,
    pub days_supply: TextInput,
    pub outside_pharmacy_other_reason: TextInput,
    pub per_protocol: Checkbox,
    pub undecided_reason: Dropdown,
    pub transfer_from_pharmacy: Dropdown,
    pub dispensing_pharmacy: Dropdown,
    pub outside_pharmacy_reason: Dropdown,
    pub follow_up_date: Calendar,
    pub needs_by_date: Calendar,
}

impl Dispensing {
    #[must_use]
    pub fn new(card: &ElementHandle) -> Self {
        let session = card.session();
        let scoped = |suffix: &str| card.locator().child(suffix);
        let status = |value: &str| {
            card.child(&format!(
                "input[name=\"dispensing_status\"][value=\"{value}\"]"
            ))
        };
        Self {
            undecided: status("Undecided"),
            opt_in: status("Opt in"),
            opt_out: status("Opt out"),
            days_supply: TextInput::new(session, scoped("input[name=\"days_supply\"]")),
            outside_pharmacy_other_reason: TextInput::new(
                session,
                scoped("input[name=\"external_dispensing_additional_reason\"]"),
            ),
            per_protocol: Checkbox::new(session, scoped("input[name=\"is_needsby_per_protocol\"]")),
            undecided_reason: Dropdown::new(
                session,
                scoped("#dispensing_undecided_reason-select input[type=\"text\"]"),
            ),
            transfer_from_pharmacy: Dropdown::new(
                session,
                scoped("input[name=\"transfer_pharmacy\"]"),
            ),
            dispensing_pharmacy: Dropdown::new(session, scoped("input[name=\"dispensing_pharmacy\"]")),
            outside_pharmacy_reason: Dropdown::new(
                session,
                scoped("#external_dispensing_reason-select input[type=\"text\"]"),
            ),
            follow_up_date: Calendar::new(session, scoped("input[placeholder=\"mm/dd/yyyy\"]")),
            needs_by_date: Calendar::new(session, scoped("input[placeholder=\"mm/dd/yyyy\"]")),
        }
    }

    /// Undecided with a reason; a follow-up date is set for deferred decisions
    pub async fn select_undecided(&self, reason: &str, follow_up: Option<&str>) -> PageResult<()> {
        self.undecided.click().await?;
        self.undecided_reason.select_option(reason).await?;
        if let (DEFERRED_DECISION, Some(date)) = (reason, follow_up) {
            self.follow_up_date.set_date(date).await?;
        }
        Ok(())
    }

    pub async fn select_opt_in(&self, opt_in: &DispensingOptIn) -> PageResult<()> {
        self.opt_in.click().await?;
        self.dispensing_pharmacy
            .select_option(&opt_in.dispensing_pharmacy)
            .await?;
        self.per_protocol
            .set_check_status(opt_in.per_protocol)
            .await?;
        if let Some(reason) = &opt_in.outside_pharmacy_reason {
            self.outside_pharmacy_reason.select_option(reason).await?;
            if let (OTHER_REASON, Some(other)) = (reason.as_str(), &opt_in.other_reason) {
                self.outside_pharmacy_other_reason
                    .set_value(other, false)
                    .await?;
            }
        }
        if let Some(date) = &opt_in.needs_by_date {
            self.needs_by_date.set_date(date).await?;
        }
        if let Some(days) = &opt_in.days_supply {
            self.days_supply.set_value(days, false).await?;
        }
        if let Some(pharmacy) = &opt_in.transfer_from_pharmacy {
            self.transfer_from_pharmacy.select_option(pharmacy).await?;
        }
        Ok(())
    }

    pub async fn select_opt_out(
        &self,
        dispensing_pharmacy: &str,
        outside_pharmacy_reason: &str,
        other_reason: Option<&str>,
    ) -> PageResult<()> {
        self.opt_out.click().await?;
        self.dispensing_pharmacy
            .select_option(dispensing_pharmacy)
            .await?;
        self.outside_pharmacy_reason
            .select_option(outside_pharmacy_reason)
            .await?;
        if let (OTHER_REASON, Some(other)) = (outside_pharmacy_reason, other_reason) {
            self.outside_pharmacy_other_reason
                .set_value(other, false)
                .await?;
        }
        Ok(())
    }
}
