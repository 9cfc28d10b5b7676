//! Task cards on the patient workflow board.

use super::{Clickable, Component, Dropdown, ElementHandle, ExpansionState, Waitable};
use crate::driver::Session;
use crate::locator::Locator;
use crate::result::PageResult;

/// Class token a card carries while open
pub const CARD_OPEN_MARKER: &str = "cardChecked";

/// How long each status path is probed before falling through (ms)
pub const STATUS_PROBE_TIMEOUT_MS: u64 = 3_000;

/// Which control a status change went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// The already-selected status chip
    Selected,
    /// The status offered as the next default
    Default,
    /// The overflow menu behind the "more" button
    Overflow,
}

/// A task card, named by its upper-cased task name
#[derive(Debug, Clone)]
pub struct TaskCard {
    element: ElementHandle,
    card_content: ElementHandle,
    current_status: ElementHandle,
    more_button: Dropdown,
}

impl TaskCard {
    #[must_use]
    pub fn new(session: &Session, name: &str) -> Self {
        Self {
            element: ElementHandle::new(
                session,
                Locator::qa_id(&format!("task-card-{}", name.to_uppercase())),
            ),
            card_content: ElementHandle::new(session, Locator::qa_id("card-content")),
            current_status: ElementHandle::new(session, Locator::qa_id("current-status-chip")),
            more_button: Dropdown::new(session, Locator::qa_id("status-more-button")),
        }
    }

    #[must_use]
    pub const fn card_content(&self) -> &ElementHandle {
        &self.card_content
    }

    #[must_use]
    pub const fn current_status(&self) -> &ElementHandle {
        &self.current_status
    }

    pub async fn state(&self) -> PageResult<ExpansionState> {
        self.element.expansion_state(CARD_OPEN_MARKER).await
    }

    /// Open the card unless already open, then wait for its content
    pub async fn open_card(&self) -> PageResult<()> {
        if self.state().await? == ExpansionState::Closed {
            self.element.click().await?;
            let _ = self.card_content.wait_present().await?;
        }
        Ok(())
    }

    /// Close the card unless already closed, then wait for its content to go
    pub async fn close_card(&self) -> PageResult<()> {
        if self.state().await? == ExpansionState::Open {
            self.element.click().await?;
            let _ = self.card_content.wait_hidden().await?;
        }
        Ok(())
    }

    pub async fn verify_card_content_next_default_status(&self, status: &str) -> PageResult<()> {
        self.card_content
            .child("[name=\"status_id\"]")
            .verify_text(status)
            .await
    }

    /// Move the task to `next`, trying the selected chip, then the default
    /// option, then the overflow menu.
    pub async fn move_to_status(&self, next: &str) -> PageResult<StatusTransition> {
        let probe = self
            .element
            .wait_options()
            .with_timeout_ms(STATUS_PROBE_TIMEOUT_MS)
            .tolerant();
        let selected = self
            .card_content
            .child(&format!("[data-qa-id=\"status_id_{next}_selected\"]"));
        let default = self
            .card_content
            .child(&format!("[data-qa-id=\"status_id_{next}\"]"));

        let transition = if selected.wait_present_with(probe).await? {
            selected.click().await?;
            StatusTransition::Selected
        } else if default.wait_present_with(probe).await? {
            default.click().await?;
            StatusTransition::Default
        } else {
            self.more_button.element().click().await?;
            let list = self
                .element
                .sibling(Locator::css("div[role=\"presentation\"] div[style*=\"transform: none\"]"));
            let _ = list.wait_present().await?;
            self.more_button.click_option(next).await?;
            StatusTransition::Overflow
        };
        tracing::debug!(status = next, ?transition, "moved task status");
        Ok(transition)
    }

    pub async fn verify_task_status(&self, status: &str) -> PageResult<()> {
        let chip = self
            .element
            .child(&format!("[data-qa-id=\"task-card-status-{status}\"]"));
        let _ = chip.wait_visible().await?;
        chip.verify_text(status).await
    }
}

impl Component for TaskCard {
    fn element(&self) -> &ElementHandle {
        &self.element
    }
}

impl Waitable for TaskCard {}
impl Clickable for TaskCard {}
