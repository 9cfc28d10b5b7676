//! Clinical support enrollment section of a therapy card.

use super::administration::OTHER_REASON;
use super::dispensing::DEFERRED_DECISION;
use crate::component::{Calendar, Dropdown, ElementHandle, TextInput, ValueHolder};
use crate::locator::Locator;
use crate::result::PageResult;

/// Class token on the checked option's wrapper
pub const CHECKED_MARKER: &str = "Mui-checked";

#[derive(Debug, Clone)]
pub struct ClinicalSupport {
    pub undecided: ElementHandle,
    pub opt_in: ElementHandle,
    pub opt_out: ElementHandle,
    pub other_reason: TextInput,
    pub undecided_reason: Dropdown,
    pub opt_out_reason: Dropdown,
    pub follow_up_date: Calendar,
}

impl ClinicalSupport {
    #[must_use]
    pub fn new(card: &ElementHandle) -> Self {
        let session = card.session();
        let scoped = |suffix: &str| card.locator().child(suffix);
        let status = |option: &str| {
            card.child(&format!(
                "input[data-qa-id=\"clinical_support_status_{option}\"]"
            ))
        };
        Self {
            undecided: status("Undecided"),
            opt_in: status("Opt in"),
            opt_out: status("Opt out"),
            other_reason: TextInput::new(
                session,
                scoped("[data-qa-id=\"clinical_support_other_reason\"] input"),
            ),
            undecided_reason: Dropdown::new(
                session,
                scoped("[data-qa-id=\"clinical_support_undecided_reason_select\"] input"),
            ),
            opt_out_reason: Dropdown::new(
                session,
                scoped("[data-qa-id=\"clinical_support_opt_out_reason_select\"] input"),
            ),
            follow_up_date: Calendar::new(session, scoped("input[placeholder=\"mm/dd/yyyy\"]")),
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

    pub async fn select_opt_in(&self) -> PageResult<()> {
        self.opt_in.click().await
    }

    pub async fn select_opt_out(&self, reason: &str, other_reason: Option<&str>) -> PageResult<()> {
        self.opt_out.click().await?;
        self.opt_out_reason.select_option(reason).await?;
        if let (OTHER_REASON, Some(other)) = (reason, other_reason) {
            self.other_reason.set_value(other, false).await?;
        }
        Ok(())
    }

    /// Enabled wrapper of the status radio for `option`
    #[must_use]
    pub fn option_wrapper(&self, option: &str) -> ElementHandle {
        self.undecided.sibling(Locator::xpath(format!(
            "//input[@data-qa-id=\"clinical_support_status_{option}\"]/ancestor::span[@aria-disabled=\"false\"]"
        )))
    }

    /// Assert the wrapper of `option` carries [`CHECKED_MARKER`]
    pub async fn verify_option_is_selected(&self, option: &str) -> PageResult<()> {
        self.option_wrapper(option)
            .verify_has_class(CHECKED_MARKER)
            .await
    }
}
