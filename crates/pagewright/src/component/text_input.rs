//! Text inputs and text areas.

use super::{Clickable, Component, ElementHandle, ValueHolder, Waitable};
use crate::driver::{Key, Session};
use crate::locator::Locator;
use crate::result::PageResult;
use crate::wait::{expect_eventually, AssertionCheckResult};
use async_trait::async_trait;
use rand::Rng;

/// Default length for [`TextInput::insert_random_string`]
pub const DEFAULT_RANDOM_LENGTH: usize = 10;

/// Uniformly sampled lowercase a-z string
pub fn random_lowercase<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.gen_range(b'a'..=b'z'))).collect()
}

/// A text input or text area
#[derive(Debug, Clone)]
pub struct TextInput {
    element: ElementHandle,
}

impl TextInput {
    #[must_use]
    pub fn new(session: &Session, locator: Locator) -> Self {
        Self::from_element(ElementHandle::new(session, locator))
    }

    #[must_use]
    pub fn css(session: &Session, selector: impl Into<String>) -> Self {
        Self::new(session, Locator::css(selector))
    }

    #[must_use]
    pub const fn from_element(element: ElementHandle) -> Self {
        Self { element }
    }

    /// Type `value` after whatever the field already holds
    pub async fn set_multiple_values(&self, value: &str, submit: bool) -> PageResult<()> {
        let text = if submit {
            format!("{value}\n")
        } else {
            value.to_string()
        };
        self.element
            .session()
            .driver()
            .send_keys(self.locator(), &text)
            .await
    }

    /// Clear through the keyboard: focus, select all, delete, release.
    ///
    /// Controlled inputs keep their framework-side state across a native
    /// clear, so the field is emptied the way a user would.
    pub async fn clear_value(&self) -> PageResult<()> {
        let driver = self.element.session().driver();
        driver.send_keys(self.locator(), "").await?;
        driver.keys(&[Key::Control]).await?;
        driver.keys(&[Key::Char('a')]).await?;
        driver.keys(&[Key::Delete]).await?;
        driver.keys(&[Key::Null]).await
    }

    /// Type a random lowercase string and return it
    pub async fn insert_random_string(&self, len: usize) -> PageResult<String> {
        let text = random_lowercase(&mut rand::thread_rng(), len);
        self.type_fresh(text).await
    }

    /// [`insert_random_string`](Self::insert_random_string) with a caller-supplied RNG
    pub async fn insert_random_string_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        len: usize,
    ) -> PageResult<String> {
        let text = random_lowercase(rng, len);
        self.type_fresh(text).await
    }

    async fn type_fresh(&self, text: String) -> PageResult<String> {
        let driver = self.element.session().driver();
        driver.clear(self.locator()).await?;
        driver.send_keys(self.locator(), &text).await?;
        tracing::debug!(locator = %self.locator(), len = text.len(), "inserted random string");
        Ok(text)
    }

    pub async fn press_enter_key(&self) -> PageResult<()> {
        self.element.session().driver().keys(&[Key::Enter]).await
    }
}

impl Component for TextInput {
    fn element(&self) -> &ElementHandle {
        &self.element
    }
}

impl Waitable for TextInput {}
impl Clickable for TextInput {}

#[async_trait]
impl ValueHolder for TextInput {
    async fn value(&self) -> PageResult<String> {
        self.element.session().driver().value(self.locator()).await
    }

    async fn set_value(&self, value: &str, submit: bool) -> PageResult<()> {
        self.clear_value().await?;
        tracing::debug!(locator = %self.locator(), submit, "set value");
        self.set_multiple_values(value, submit).await
    }

    async fn verify_value(&self, expected: &str) -> PageResult<()> {
        let driver = self.element.session().driver();
        let locator = self.locator();
        expect_eventually(
            move || async move {
                if driver.element_count(locator).await? == 0 {
                    return Ok(AssertionCheckResult::Fail(format!(
                        "expected {locator} to have value {expected:?}, but it is not present"
                    )));
                }
                let actual = driver.value(locator).await?;
                Ok(AssertionCheckResult::check(actual == expected, || {
                    format!("expected {locator} to have value {expected:?}, got {actual:?}")
                }))
            },
            &self.element.wait_options(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Globals;
    use crate::mock::{DriverCall, MockDriver, MockElement};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn setup(value: &str) -> (Arc<MockDriver>, TextInput) {
        let locator = Locator::css("input#name");
        let driver = Arc::new(
            MockDriver::new().with_element(locator.clone(), MockElement::new().with_value(value)),
        );
        let session = Session::new(driver.clone(), Globals::new().with_timeout(500));
        (driver, TextInput::new(&session, locator))
    }

    #[tokio::test]
    async fn test_set_value_replaces_existing() {
        let (driver, input) = setup("stale");
        input.set_value("Jane", false).await.unwrap();
        assert_eq!(input.value().await.unwrap(), "Jane");
        assert_eq!(driver.element(input.locator()).unwrap().submissions, 0);
    }

    #[tokio::test]
    async fn test_set_value_submit_appends_newline() {
        let (driver, input) = setup("");
        input.set_value("Jane", true).await.unwrap();
        assert!(driver.was_called(|c| matches!(
            c,
            DriverCall::SendKeys { text, .. } if text == "Jane\n"
        )));
        assert_eq!(driver.element(input.locator()).unwrap().submissions, 1);
    }

    #[tokio::test]
    async fn test_clear_value_key_sequence() {
        let (driver, input) = setup("abc");
        input.clear_value().await.unwrap();
        assert_eq!(
            driver.actions(),
            vec![
                DriverCall::SendKeys {
                    locator: input.locator().clone(),
                    text: String::new()
                },
                DriverCall::Keys(vec![Key::Control]),
                DriverCall::Keys(vec![Key::Char('a')]),
                DriverCall::Keys(vec![Key::Delete]),
                DriverCall::Keys(vec![Key::Null]),
            ]
        );
        assert_eq!(input.value().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_set_multiple_values_keeps_existing() {
        let (_, input) = setup("Ada");
        input.set_multiple_values(" Lovelace", false).await.unwrap();
        assert_eq!(input.value().await.unwrap(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_insert_random_string_matches_field() {
        let (_, input) = setup("old");
        let mut rng = StdRng::seed_from_u64(7);
        let text = input.insert_random_string_with(&mut rng, 12).await.unwrap();
        assert_eq!(text.len(), 12);
        assert_eq!(input.value().await.unwrap(), text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_value() {
        let (_, input) = setup("42");
        input.verify_value("42").await.unwrap();
        let err = input.verify_value("43").await.unwrap_err();
        assert!(err.is_assertion());
        assert!(err.to_string().contains("\"42\""));
    }

    #[tokio::test]
    async fn test_press_enter_key() {
        let (driver, input) = setup("");
        input.press_enter_key().await.unwrap();
        assert_eq!(driver.actions(), vec![DriverCall::Keys(vec![Key::Enter])]);
    }

    proptest! {
        #[test]
        fn prop_random_lowercase(seed in any::<u64>(), len in 0usize..64) {
            let text = random_lowercase(&mut StdRng::seed_from_u64(seed), len);
            prop_assert_eq!(text.chars().count(), len);
            prop_assert!(text.chars().all(|c| c.is_ascii_lowercase()));
        }
    }
}
