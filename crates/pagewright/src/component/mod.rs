//! Page components.
//!
//! A component wraps exactly one [`ElementHandle`] plus zero or more child
//! components whose locators are scoped under the parent's. Widgets declare
//! the capabilities they support by implementing the narrow traits below
//! instead of extending a base class:
//!
//! | Widget | `Waitable` | `Clickable` | `ValueHolder` |
//! |---|---|---|---|
//! | `TextInput` | yes | yes | yes |
//! | `Calendar` | yes | yes | yes |
//! | `Dropdown` | yes | yes | yes |
//! | `Checkbox`, `MultiSelectDropdown` | yes | yes | |
//! | `PatientSearcher`, `FloatingActionMenu`, `TaskCard` | yes | yes | |
//! | `RadioButton`, `Table`, `TherapyCard` | yes | | |

pub mod calendar;
pub mod checkbox;
pub mod dropdown;
pub mod element;
pub mod floating_action;
pub mod multi_select;
pub mod patient_searcher;
pub mod radio;
pub mod table;
pub mod task_card;
pub mod text_input;
pub mod therapy_card;

pub use calendar::Calendar;
pub use checkbox::Checkbox;
pub use dropdown::{diff_options, Dropdown, OptionFilter};
pub use element::ElementHandle;
pub use floating_action::{FloatingAction, FloatingActionButtons, FloatingActionMenu};
pub use multi_select::MultiSelectDropdown;
pub use patient_searcher::PatientSearcher;
pub use radio::{RadioButton, ValueAttribute};
pub use table::Table;
pub use task_card::{StatusTransition, TaskCard};
pub use text_input::TextInput;
pub use therapy_card::TherapyCard;

use crate::locator::Locator;
use crate::result::PageResult;
use crate::wait::WaitOptions;
use async_trait::async_trait;

/// Open/closed state of a collapsible widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionState {
    /// The marker class token is present
    Open,
    /// The marker class token is absent
    Closed,
}

impl ExpansionState {
    /// Derive the state from raw class tokens.
    ///
    /// A token matches when it contains `marker` as a substring, so generated
    /// class names such as `makeStyles-cardChecked-42` count for `cardChecked`.
    #[must_use]
    pub fn from_classes<S: AsRef<str>>(classes: &[S], marker: &str) -> Self {
        if classes.iter().any(|c| c.as_ref().contains(marker)) {
            Self::Open
        } else {
            Self::Closed
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Anything backed by a located element
pub trait Component: Send + Sync {
    /// The element this component wraps
    fn element(&self) -> &ElementHandle;

    /// Locator of the wrapped element
    fn locator(&self) -> &Locator {
        self.element().locator()
    }
}

impl Component for ElementHandle {
    fn element(&self) -> &ElementHandle {
        self
    }
}

/// Presence and visibility waits
#[async_trait]
pub trait Waitable: Component {
    async fn wait_present(&self) -> PageResult<bool> {
        self.element().wait_present().await
    }

    async fn wait_absent(&self) -> PageResult<bool> {
        self.element().wait_absent().await
    }

    async fn wait_visible(&self) -> PageResult<bool> {
        self.element().wait_visible().await
    }

    async fn wait_hidden(&self) -> PageResult<bool> {
        self.element().wait_hidden().await
    }

    async fn wait_present_with(&self, options: WaitOptions) -> PageResult<bool> {
        self.element().wait_present_with(options).await
    }

    async fn wait_absent_with(&self, options: WaitOptions) -> PageResult<bool> {
        self.element().wait_absent_with(options).await
    }

    async fn wait_visible_with(&self, options: WaitOptions) -> PageResult<bool> {
        self.element().wait_visible_with(options).await
    }

    async fn wait_hidden_with(&self, options: WaitOptions) -> PageResult<bool> {
        self.element().wait_hidden_with(options).await
    }
}

/// Pointer interaction
#[async_trait]
pub trait Clickable: Component {
    async fn click(&self) -> PageResult<()> {
        self.element().click().await
    }

    async fn force_click(&self) -> PageResult<()> {
        self.element().force_click().await
    }

    async fn scroll_into_view(&self) -> PageResult<()> {
        self.element().scroll_into_view().await
    }
}

/// Form value access
#[async_trait]
pub trait ValueHolder: Component {
    /// Current form value
    async fn value(&self) -> PageResult<String>;

    /// Replace the value, optionally submitting with Enter
    async fn set_value(&self, value: &str, submit: bool) -> PageResult<()>;

    /// Assert the value equals `expected`
    async fn verify_value(&self, expected: &str) -> PageResult<()>;
}
