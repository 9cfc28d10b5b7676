//! Multi-select dropdowns whose options are checkboxes.

use super::{Checkbox, Clickable, Component, ElementHandle, Waitable};
use crate::driver::Session;
use crate::locator::Locator;
use crate::result::PageResult;

/// Dropdown with a filter input and one checkbox per option
#[derive(Debug, Clone)]
pub struct MultiSelectDropdown {
    element: ElementHandle,
}

impl MultiSelectDropdown {
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

    /// Checkbox of the option titled `value`.
    ///
    /// Option titles carry a trailing space; the checkbox is the second span
    /// of the option's list item.
    #[must_use]
    pub fn option_checkbox(&self, value: &str) -> Checkbox {
        Checkbox::new(
            self.element.session(),
            Locator::xpath(format!(
                "(//span[@title=\"{value} \"]//parent::li//span)[2]"
            )),
        )
    }

    /// For each value: type it into the filter, then check its option.
    /// Escape closes the list at the end.
    pub async fn multi_select<S: AsRef<str> + Sync>(&self, values: &[S]) -> PageResult<()> {
        let driver = self.element.session().driver();
        for value in values {
            let value = value.as_ref();
            driver.send_keys(self.element.locator(), value).await?;
            self.option_checkbox(value).check().await?;
        }
        self.element.press_escape().await
    }
}

impl Component for MultiSelectDropdown {
    fn element(&self) -> &ElementHandle {
        &self.element
    }
}

impl Waitable for MultiSelectDropdown {}
impl Clickable for MultiSelectDropdown {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Key;
    use crate::mock::{DriverCall, MockDriver, MockElement};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_multi_select_checks_each_once() {
        let filter = Locator::css("#pharmacies input");
        let driver = Arc::new(MockDriver::new().with_element(filter.clone(), MockElement::new()));
        let session = Session::with_defaults(driver.clone());
        let dropdown = MultiSelectDropdown::new(&session, filter);

        let walgreens = dropdown.option_checkbox("Walgreens");
        let cvs = dropdown.option_checkbox("CVS");
        driver.add_element(walgreens.locator().clone(), MockElement::new().checkable(false));
        driver.add_element(cvs.locator().clone(), MockElement::new().checkable(true));

        dropdown.multi_select(&["Walgreens", "CVS"]).await.unwrap();

        assert_eq!(
            walgreens.locator().selector(),
            "(//span[@title=\"Walgreens \"]//parent::li//span)[2]"
        );
        assert_eq!(driver.clicks_on(walgreens.locator()), 1);
        assert_eq!(driver.clicks_on(cvs.locator()), 0);
        assert_eq!(
            driver.actions().last(),
            Some(&DriverCall::Keys(vec![Key::Escape]))
        );
    }
}
