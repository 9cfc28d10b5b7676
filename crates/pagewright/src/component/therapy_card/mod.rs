//! Therapy cards, keyed by the therapy's NDC.
//!
//! A card holds two editable sections, [`AdministrationStatus`] and
//! [`ServiceEnrollment`], whose selectors are scoped under the card.

pub mod administration;
pub mod clinical_support;
pub mod dispensing;
pub mod service_enrollment;

pub use administration::AdministrationStatus;
pub use clinical_support::ClinicalSupport;
pub use dispensing::{Dispensing, DispensingOptIn};
pub use service_enrollment::ServiceEnrollment;

use super::{Component, Dropdown, ElementHandle, ExpansionState, Waitable};
use crate::driver::Session;
use crate::locator::Locator;
use crate::result::PageResult;

/// Class token an expanded card carries
pub const EXPANDED_MARKER: &str = "Mui-expanded";

#[derive(Debug, Clone)]
pub struct TherapyCard {
    element: ElementHandle,
    pub expand_button: ElementHandle,
    pub edit_button: ElementHandle,
    pub new_task_button: ElementHandle,
    pub service_enrollment: ServiceEnrollment,
    pub administration_status: AdministrationStatus,
}

impl TherapyCard {
    #[must_use]
    pub fn new(session: &Session, ndc: &str) -> Self {
        let element = ElementHandle::new(session, Locator::qa_id(&format!("therapy-card-{ndc}")));
        Self {
            expand_button: element.child("[id^=\"therapy-expand\"]"),
            edit_button: element.child("button[name=\"edit_button\"]"),
            new_task_button: element.child("button[name=\"add_task_button\"]"),
            service_enrollment: ServiceEnrollment::new(&element),
            administration_status: AdministrationStatus::new(&element),
            element,
        }
    }

    pub async fn state(&self) -> PageResult<ExpansionState> {
        self.element.expansion_state(EXPANDED_MARKER).await
    }

    /// Expand unless expanded, then wait for the new-task button
    pub async fn expand_card(&self) -> PageResult<()> {
        if self.state().await? == ExpansionState::Closed {
            self.expand_button.click().await?;
            let _ = self.new_task_button.wait_visible().await?;
        }
        Ok(())
    }

    /// Collapse unless collapsed, then wait for the new-task button to go
    pub async fn collapse_card(&self) -> PageResult<()> {
        if self.state().await? == ExpansionState::Open {
            self.expand_button.click().await?;
            let _ = self.new_task_button.wait_absent().await?;
        }
        Ok(())
    }

    pub async fn open_task(&self, task: &str) -> PageResult<()> {
        self.element
            .child(&format!("button[title=\"{task}\"]"))
            .click()
            .await
    }

    /// Status dropdown of the task row named `task`
    #[must_use]
    pub fn task_status(&self, task: &str) -> Dropdown {
        Dropdown::new(
            self.element.session(),
            self.element.locator().child(&format!(
                "[data-qa-id=\"therapy-task-{}-status\"] input",
                task.to_uppercase()
            )),
        )
    }

    pub async fn verify_task_status_options<S: AsRef<str> + Sync>(
        &self,
        task: &str,
        options: &[S],
    ) -> PageResult<()> {
        self.task_status(task).verify_all_options(options).await
    }

    pub async fn open_notes(&self) -> PageResult<()> {
        self.element.child("img[alt=\"note\"]").click().await
    }
}

impl Component for TherapyCard {
    fn element(&self) -> &ElementHandle {
        &self.element
    }
}

impl Waitable for TherapyCard {}
