//! Header patient search.

use super::{Clickable, Component, ElementHandle, TextInput, ValueHolder, Waitable};
use crate::result::PageResult;

/// Search button that reveals a query input
#[derive(Debug, Clone)]
pub struct PatientSearcher {
    button: ElementHandle,
    input: TextInput,
}

impl PatientSearcher {
    #[must_use]
    pub const fn new(button: ElementHandle, input: TextInput) -> Self {
        Self { button, input }
    }

    #[must_use]
    pub const fn input(&self) -> &TextInput {
        &self.input
    }

    pub async fn search_patient(&self, query: &str) -> PageResult<()> {
        self.button.click().await?;
        self.input.set_value(query, false).await
    }
}

impl Component for PatientSearcher {
    fn element(&self) -> &ElementHandle {
        &self.button
    }
}

impl Waitable for PatientSearcher {}
impl Clickable for PatientSearcher {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Session;
    use crate::locator::Locator;
    use crate::mock::{MockDriver, MockElement};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_search_patient() {
        let button = Locator::css("button#headerSearchButton");
        let field = Locator::css("input#headerSearch");
        let driver = Arc::new(
            MockDriver::new()
                .with_element(button.clone(), MockElement::new().reveals(field.clone()))
                .with_element(field.clone(), MockElement::absent()),
        );
        let session = Session::with_defaults(driver.clone());
        let searcher = PatientSearcher::new(
            ElementHandle::new(&session, button.clone()),
            TextInput::new(&session, field.clone()),
        );

        searcher.search_patient("Daraprim").await.unwrap();

        assert_eq!(driver.clicks_on(&button), 1);
        assert_eq!(searcher.input().value().await.unwrap(), "Daraprim");
    }
}
