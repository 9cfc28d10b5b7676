//! Checkboxes.

use super::{Clickable, Component, ElementHandle, Waitable};
use crate::driver::Session;
use crate::locator::Locator;
use crate::result::PageResult;

/// A checkbox whose state is read from its `checked` attribute
#[derive(Debug, Clone)]
pub struct Checkbox {
    element: ElementHandle,
}

impl Checkbox {
    #[must_use]
    pub fn new(session: &Session, locator: Locator) -> Self {
        Self {
            element: ElementHandle::new(session, locator),
        }
    }

    #[must_use]
    pub fn css(session: &Session, selector: impl Into<String>) -> Self {
        Self::new(session, Locator::css(selector))
    }

    /// Whether the `checked` attribute is set to anything but `"false"`
    pub async fn is_checked(&self) -> PageResult<bool> {
        Ok(self
            .element
            .attribute("checked")
            .await?
            .is_some_and(|v| !v.is_empty() && v != "false"))
    }

    /// Click only when unchecked
    pub async fn check(&self) -> PageResult<()> {
        self.set_check_status(true).await
    }

    /// Click only when checked
    pub async fn uncheck(&self) -> PageResult<()> {
        self.set_check_status(false).await
    }

    pub async fn set_check_status(&self, checked: bool) -> PageResult<()> {
        if self.is_checked().await? != checked {
            self.element.click().await?;
        }
        Ok(())
    }
}

impl Component for Checkbox {
    fn element(&self) -> &ElementHandle {
        &self.element
    }
}

impl Waitable for Checkbox {}
impl Clickable for Checkbox {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement};
    use std::sync::Arc;

    fn setup(checked: bool) -> (Arc<MockDriver>, Checkbox) {
        let locator = Locator::css("input[name=\"start_date_unknown\"]");
        let driver = Arc::new(
            MockDriver::new().with_element(locator.clone(), MockElement::new().checkable(checked)),
        );
        (driver.clone(), Checkbox::new(&Session::with_defaults(driver), locator))
    }

    #[tokio::test]
    async fn test_check_when_checked_is_noop() {
        let (driver, checkbox) = setup(true);
        checkbox.check().await.unwrap();
        checkbox.check().await.unwrap();
        assert_eq!(driver.clicks_on(checkbox.locator()), 0);
        assert!(checkbox.is_checked().await.unwrap());
    }

    #[tokio::test]
    async fn test_uncheck_when_unchecked_is_noop() {
        let (driver, checkbox) = setup(false);
        checkbox.uncheck().await.unwrap();
        assert_eq!(driver.clicks_on(checkbox.locator()), 0);
    }

    #[tokio::test]
    async fn test_check_toggles_once() {
        let (driver, checkbox) = setup(false);
        checkbox.check().await.unwrap();
        checkbox.check().await.unwrap();
        assert_eq!(driver.clicks_on(checkbox.locator()), 1);
        assert!(checkbox.is_checked().await.unwrap());
    }

    #[tokio::test]
    async fn test_set_check_status() {
        let (_, checkbox) = setup(true);
        checkbox.set_check_status(false).await.unwrap();
        assert!(!checkbox.is_checked().await.unwrap());
        checkbox.set_check_status(true).await.unwrap();
        assert!(checkbox.is_checked().await.unwrap());
    }

    #[tokio::test]
    async fn test_false_attribute_reads_unchecked() {
        let locator = Locator::css("#c");
        let driver = Arc::new(MockDriver::new().with_element(
            locator.clone(),
            MockElement::new().with_attribute("checked", "false"),
        ));
        let checkbox = Checkbox::new(&Session::with_defaults(driver), locator);
        assert!(!checkbox.is_checked().await.unwrap());
    }
}
