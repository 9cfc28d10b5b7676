//! Radio groups.

use super::{Component, ElementHandle, Waitable};
use crate::driver::Session;
use crate::locator::{LocateStrategy, Locator};
use crate::result::PageResult;

/// Attribute an option is matched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueAttribute {
    #[default]
    AriaLabel,
    Value,
}

impl ValueAttribute {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AriaLabel => "aria-label",
            Self::Value => "value",
        }
    }
}

/// A group of radio options
#[derive(Debug, Clone)]
pub struct RadioButton {
    element: ElementHandle,
}

impl RadioButton {
    #[must_use]
    pub fn new(session: &Session, locator: Locator) -> Self {
        Self {
            element: ElementHandle::new(session, locator),
        }
    }

    /// The option whose `attribute` equals `value`, scoped under the group
    #[must_use]
    pub fn option(&self, value: &str, attribute: ValueAttribute) -> ElementHandle {
        let attr = attribute.name();
        let suffix = match self.element.locator().strategy() {
            LocateStrategy::XPath => format!("//*[@{attr}=\"{value}\"]"),
            _ => format!("[{attr}=\"{value}\"]"),
        };
        self.element.child(&suffix)
    }

    pub async fn select_option(&self, value: &str, attribute: ValueAttribute) -> PageResult<()> {
        let option = self.option(value, attribute);
        let _ = option.wait_present().await?;
        option.click().await
    }
}

impl Component for RadioButton {
    fn element(&self) -> &ElementHandle {
        &self.element
    }
}

impl Waitable for RadioButton {}
