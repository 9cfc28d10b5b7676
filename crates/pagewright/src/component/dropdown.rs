//! Filterable dropdowns.
//!
//! Options render as `.qa-option` nodes carrying `aria-disabled`, and each
//! option is addressable as `[data-qa-id="option-<value>"]`.

use super::{Clickable, Component, ElementHandle, TextInput, ValueHolder, Waitable};
use crate::driver::{Key, Session};
use crate::locator::Locator;
use crate::result::{PageError, PageResult};
use async_trait::async_trait;

/// Which rendered options a verification collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFilter {
    All,
    Available,
    Disabled,
}

impl OptionFilter {
    /// Locator matching the rendered options this filter selects
    #[must_use]
    pub fn locator(&self) -> Locator {
        Locator::css(match self {
            Self::All => ".qa-option",
            Self::Available => ".qa-option[aria-disabled=\"false\"]",
            Self::Disabled => ".qa-option[aria-disabled=\"true\"]",
        })
    }
}

/// Order-insensitive multiset comparison of option lists.
///
/// Each expected option consumes its first match in `actual`. The first
/// expected option with no match fails the comparison; otherwise any
/// unconsumed actual options fail it as extras.
pub fn diff_options<S: AsRef<str>>(expected: &[S], actual: &[String]) -> PageResult<()> {
    let mut remaining: Vec<&str> = actual.iter().map(String::as_str).collect();
    for option in expected {
        let option = option.as_ref();
        match remaining.iter().position(|a| *a == option) {
            Some(index) => {
                let _ = remaining.remove(index);
            }
            None => {
                return Err(PageError::assertion(format!(
                    "the dropdown does not contain the option: {option}"
                )))
            }
        }
    }
    if remaining.is_empty() {
        Ok(())
    } else {
        Err(PageError::assertion(format!(
            "the dropdown contains extra options: {}",
            remaining.join(",")
        )))
    }
}

/// A dropdown with a typeable filter input
#[derive(Debug, Clone)]
pub struct Dropdown {
    input: TextInput,
}

impl Dropdown {
    #[must_use]
    pub fn new(session: &Session, locator: Locator) -> Self {
        Self {
            input: TextInput::new(session, locator),
        }
    }

    #[must_use]
    pub fn css(session: &Session, selector: impl Into<String>) -> Self {
        Self::new(session, Locator::css(selector))
    }

    #[must_use]
    pub const fn input(&self) -> &TextInput {
        &self.input
    }

    /// The rendered option for `value`
    #[must_use]
    pub fn option(&self, value: &str) -> ElementHandle {
        self.element()
            .sibling(Locator::qa_id(&format!("option-{value}")))
    }

    /// Open the list, filter by `value`, click the matching option
    pub async fn select_option(&self, value: &str) -> PageResult<()> {
        tracing::debug!(locator = %self.locator(), value, "select option");
        self.element().force_click().await?;
        self.input.set_value(value, false).await?;
        self.click_option(value).await
    }

    /// Click an option of an already open list
    pub async fn click_option(&self, value: &str) -> PageResult<()> {
        self.option(value).click().await
    }

    /// Two Space keystrokes; custom list widgets pick an option on the second
    pub async fn select_random_option(&self) -> PageResult<()> {
        let driver = self.element().session().driver();
        let space = Key::Space.as_char().to_string();
        driver.send_keys(self.locator(), &space).await?;
        driver.send_keys(self.locator(), &space).await
    }

    /// Open the list and compare the options `filter` selects against `expected`
    pub async fn verify_options<S: AsRef<str> + Sync>(
        &self,
        filter: OptionFilter,
        expected: &[S],
    ) -> PageResult<()> {
        self.element().click().await?;
        let rendered = self.element().texts_of(&filter.locator()).await?;
        diff_options(expected, &rendered)?;
        self.element().press_escape().await
    }

    pub async fn verify_all_options<S: AsRef<str> + Sync>(&self, expected: &[S]) -> PageResult<()> {
        self.verify_options(OptionFilter::All, expected).await
    }

    pub async fn verify_available_options<S: AsRef<str> + Sync>(
        &self,
        expected: &[S],
    ) -> PageResult<()> {
        self.verify_options(OptionFilter::Available, expected).await
    }

    pub async fn verify_disabled_options<S: AsRef<str> + Sync>(
        &self,
        expected: &[S],
    ) -> PageResult<()> {
        self.verify_options(OptionFilter::Disabled, expected).await
    }
}

impl Component for Dropdown {
    fn element(&self) -> &ElementHandle {
        self.input.element()
    }
}

impl Waitable for Dropdown {}
impl Clickable for Dropdown {}

#[async_trait]
impl ValueHolder for Dropdown {
    async fn value(&self) -> PageResult<String> {
        self.input.value().await
    }

    async fn set_value(&self, value: &str, submit: bool) -> PageResult<()> {
        self.input.set_value(value, submit).await
    }

    async fn verify_value(&self, expected: &str) -> PageResult<()> {
        self.input.verify_value(expected).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{DriverCall, MockDriver, MockElement};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    mod diff_tests {
        use super::*;

        #[test]
        fn test_permutation_passes() {
            diff_options(&["b", "a", "c"], &strings(&["a", "b", "c"])).unwrap();
        }

        #[test]
        fn test_missing_option_named() {
            let err = diff_options(&["a", "z"], &strings(&["a", "b"])).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Assertion failed: the dropdown does not contain the option: z"
            );
        }

        #[test]
        fn test_extra_options_named() {
            let err = diff_options(&["a"], &strings(&["a", "b", "c"])).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Assertion failed: the dropdown contains extra options: b,c"
            );
        }

        #[test]
        fn test_duplicates_are_counted() {
            diff_options(&["a", "a"], &strings(&["a", "a"])).unwrap();
            assert!(diff_options(&["a", "a"], &strings(&["a"])).is_err());
            assert!(diff_options(&["a"], &strings(&["a", "a"])).is_err());
        }

        proptest! {
            #[test]
            fn prop_any_permutation_passes(
                options in prop::collection::vec("[a-z]{1,6}", 0..8),
                seed in any::<u64>(),
            ) {
                let mut shuffled = options.clone();
                let len = shuffled.len();
                if len > 1 {
                    for i in 0..len {
                        let j = (seed as usize).wrapping_add(i * 31) % len;
                        shuffled.swap(i, j);
                    }
                }
                prop_assert!(diff_options(&shuffled, &options).is_ok());
            }

            #[test]
            fn prop_missing_item_is_reported(
                options in prop::collection::vec("[a-z]{1,6}", 0..8),
            ) {
                let mut expected = options.clone();
                expected.push("MISSING".to_string());
                let err = diff_options(&expected, &options).unwrap_err();
                prop_assert!(err.to_string().ends_with("option: MISSING"));
            }
        }
    }

    mod widget_tests {
        use super::*;

        const INPUT: &str = "#administration_status-select input[type=\"text\"]";

        fn setup() -> (Arc<MockDriver>, Dropdown) {
            let driver = Arc::new(
                MockDriver::new()
                    .with_element(Locator::css(INPUT), MockElement::new())
                    .with_element(Locator::qa_id("option-On Hold"), MockElement::new())
                    .with_texts(OptionFilter::All.locator(), ["Pre-Therapy", "On Hold", "No-Go"])
                    .with_texts(OptionFilter::Disabled.locator(), ["No-Go"]),
            );
            let session = Session::with_defaults(driver.clone());
            (driver, Dropdown::css(&session, INPUT))
        }

        #[tokio::test]
        async fn test_select_option_sequence() {
            let (driver, dropdown) = setup();
            dropdown.select_option("On Hold").await.unwrap();
            assert_eq!(driver.clicks_on(&Locator::qa_id("option-On Hold")), 1);
            assert_eq!(driver.clicks_on(dropdown.locator()), 0);
            assert_eq!(dropdown.value().await.unwrap(), "On Hold");
        }

        #[tokio::test]
        async fn test_verify_all_options_order_insensitive() {
            let (driver, dropdown) = setup();
            dropdown
                .verify_all_options(&["No-Go", "Pre-Therapy", "On Hold"])
                .await
                .unwrap();
            assert_eq!(
                driver.actions().last(),
                Some(&DriverCall::Keys(vec![Key::Escape]))
            );
        }

        #[tokio::test]
        async fn test_verify_disabled_options_extra() {
            let (driver, dropdown) = setup();
            let err = dropdown
                .verify_disabled_options::<&str>(&[])
                .await
                .unwrap_err();
            assert!(err.to_string().contains("extra options: No-Go"));
            assert!(!driver.was_called(|c| matches!(c, DriverCall::Keys(_))));
        }

        #[tokio::test]
        async fn test_select_random_option_sends_two_spaces() {
            let (driver, dropdown) = setup();
            dropdown.select_random_option().await.unwrap();
            let spaces: Vec<_> = driver
                .actions()
                .into_iter()
                .filter(|c| matches!(c, DriverCall::SendKeys { text, .. } if text == "\u{E00D}"))
                .collect();
            assert_eq!(spaces.len(), 2);
        }
    }
}
