//! ElementHandle: the locator-backed base of every component.
//!
//! Nothing is cached between calls. Each operation re-evaluates the locator
//! against the live DOM through the session's driver.

use super::ExpansionState;
use crate::driver::{Driver, Key, Session, Size};
use crate::locator::Locator;
use crate::result::PageResult;
use crate::script::ElementScript;
use crate::wait::{
    expect_eventually, poll_until, AssertionCheckResult, WaitCondition, WaitOptions, WaitOutcome,
};
use serde_json::Value;

/// A locator bound to a driver session
#[derive(Debug, Clone)]
pub struct ElementHandle {
    session: Session,
    locator: Locator,
}

impl ElementHandle {
    /// Bind a locator to a session
    #[must_use]
    pub fn new(session: &Session, locator: Locator) -> Self {
        Self {
            session: session.clone(),
            locator,
        }
    }

    /// CSS selector shorthand
    #[must_use]
    pub fn css(session: &Session, selector: impl Into<String>) -> Self {
        Self::new(session, Locator::css(selector))
    }

    /// XPath shorthand
    #[must_use]
    pub fn xpath(session: &Session, selector: impl Into<String>) -> Self {
        Self::new(session, Locator::xpath(selector))
    }

    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn driver(&self) -> &dyn Driver {
        self.session.driver()
    }

    /// A handle scoped under this one (see [`Locator::child`])
    #[must_use]
    pub fn child(&self, suffix: &str) -> Self {
        Self::new(&self.session, self.locator.child(suffix))
    }

    /// A handle for an unrelated locator on the same session
    #[must_use]
    pub fn sibling(&self, locator: Locator) -> Self {
        Self::new(&self.session, locator)
    }

    /// Wait defaults sourced from the session globals
    #[must_use]
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::from_globals(self.session.globals())
    }

    // =========================================================================
    // Waits
    // =========================================================================

    /// Poll `condition` with explicit options.
    ///
    /// `Ok(true)` when satisfied, `Ok(false)` when the wait timed out with
    /// `abort_on_failure == false`, `Err(AssertionFailed)` otherwise.
    pub async fn wait_for(&self, condition: WaitCondition, options: WaitOptions) -> PageResult<bool> {
        let driver = self.driver();
        let locator = &self.locator;
        let outcome = poll_until(|| condition.probe(driver, locator), &options).await?;
        let timeout_ms = options.timeout.as_millis() as u64;
        match outcome {
            WaitOutcome::Satisfied => {}
            WaitOutcome::TimedOutFailed => {
                tracing::warn!(%locator, %condition, timeout_ms, "wait failed");
            }
            WaitOutcome::TimedOutTolerated => {
                tracing::debug!(%locator, %condition, timeout_ms, "wait timed out, tolerated");
            }
        }
        outcome.into_result(&format!("{locator} to be {condition}"), options.timeout)
    }

    pub async fn wait_present(&self) -> PageResult<bool> {
        self.wait_present_with(self.wait_options()).await
    }

    pub async fn wait_present_with(&self, options: WaitOptions) -> PageResult<bool> {
        self.wait_for(WaitCondition::Present, options).await
    }

    pub async fn wait_absent(&self) -> PageResult<bool> {
        self.wait_absent_with(self.wait_options()).await
    }

    pub async fn wait_absent_with(&self, options: WaitOptions) -> PageResult<bool> {
        self.wait_for(WaitCondition::Absent, options).await
    }

    pub async fn wait_visible(&self) -> PageResult<bool> {
        self.wait_visible_with(self.wait_options()).await
    }

    pub async fn wait_visible_with(&self, options: WaitOptions) -> PageResult<bool> {
        self.wait_for(WaitCondition::Visible, options).await
    }

    pub async fn wait_hidden(&self) -> PageResult<bool> {
        self.wait_hidden_with(self.wait_options()).await
    }

    pub async fn wait_hidden_with(&self, options: WaitOptions) -> PageResult<bool> {
        self.wait_for(WaitCondition::Hidden, options).await
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    async fn run_script(&self, script: ElementScript) -> PageResult<bool> {
        let result = self
            .driver()
            .execute(&script.source(), self.locator.script_args())
            .await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Wait for presence, center the element in the viewport, then click natively
    pub async fn click(&self) -> PageResult<()> {
        self.scroll_into_view().await?;
        tracing::debug!(locator = %self.locator, "click");
        self.driver().click(&self.locator).await
    }

    /// Wait for presence, then invoke the DOM `click()` method
    pub async fn force_click(&self) -> PageResult<()> {
        let _ = self.wait_present().await?;
        tracing::debug!(locator = %self.locator, "force click");
        let _ = self.run_script(ElementScript::ForceClick).await?;
        Ok(())
    }

    /// Wait for presence, then scroll to the vertical center of the viewport
    pub async fn scroll_into_view(&self) -> PageResult<()> {
        let _ = self.wait_present().await?;
        let _ = self.run_script(ElementScript::ScrollIntoView).await?;
        Ok(())
    }

    /// Move the pointer to an offset from the top-left corner, or to the
    /// center when `offset` is `None`
    pub async fn move_to_element(&self, offset: Option<(f64, f64)>) -> PageResult<()> {
        let _ = self.wait_present().await?;
        let (x, y) = match offset {
            Some(offset) => offset,
            None => self.size().await?.center(),
        };
        self.driver().move_to(&self.locator, x, y).await
    }

    /// Send Escape to the active element
    pub async fn press_escape(&self) -> PageResult<()> {
        self.driver().keys(&[Key::Escape]).await
    }

    /// Set `display: none` on the element
    pub async fn hide(&self) -> PageResult<()> {
        let _ = self.wait_present().await?;
        let _ = self.run_script(ElementScript::Hide).await?;
        Ok(())
    }

    /// Remove the inline `display` rule
    pub async fn show(&self) -> PageResult<()> {
        let _ = self.wait_present().await?;
        let _ = self.run_script(ElementScript::Show).await?;
        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub async fn attribute(&self, name: &str) -> PageResult<Option<String>> {
        self.driver().attribute(&self.locator, name).await
    }

    pub async fn css_property(&self, name: &str) -> PageResult<Option<String>> {
        self.driver().css_property(&self.locator, name).await
    }

    pub async fn property(&self, name: &str) -> PageResult<Option<Value>> {
        self.driver().property(&self.locator, name).await
    }

    pub async fn text(&self) -> PageResult<String> {
        self.driver().text(&self.locator).await
    }

    pub async fn size(&self) -> PageResult<Size> {
        self.driver().size(&self.locator).await
    }

    /// Texts of every node matching `locator`, in document order
    pub async fn texts_of(&self, locator: &Locator) -> PageResult<Vec<String>> {
        self.driver().texts(locator).await
    }

    /// Class tokens from the `classList` property, falling back to `class`
    pub async fn class_list(&self) -> PageResult<Vec<String>> {
        match self.property("classList").await? {
            Some(value) => Ok(class_tokens(&value)),
            None => Ok(self
                .attribute("class")
                .await?
                .map(|c| c.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default()),
        }
    }

    /// Whether any class token contains `name`
    pub async fn has_class(&self, name: &str) -> PageResult<bool> {
        Ok(self.class_list().await?.iter().any(|c| c.contains(name)))
    }

    /// Open when a class token contains `marker`
    pub async fn expansion_state(&self, marker: &str) -> PageResult<ExpansionState> {
        Ok(ExpansionState::from_classes(&self.class_list().await?, marker))
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    async fn verify_text_with(
        &self,
        predicate: impl Fn(&str) -> bool + Send + Sync,
        expectation: String,
    ) -> PageResult<()> {
        let driver = self.driver();
        let locator = &self.locator;
        let predicate = &predicate;
        let expectation = &expectation;
        expect_eventually(
            move || async move {
                if driver.element_count(locator).await? == 0 {
                    return Ok(AssertionCheckResult::Fail(format!(
                        "expected {locator} {expectation}, but it is not present"
                    )));
                }
                let text = driver.text(locator).await?;
                Ok(AssertionCheckResult::check(predicate(&text), || {
                    format!("expected {locator} {expectation}, got {text:?}")
                }))
            },
            &self.wait_options(),
        )
        .await
    }

    /// Assert the inner text equals `expected`
    pub async fn verify_text(&self, expected: &str) -> PageResult<()> {
        self.verify_text_with(|t| t == expected, format!("to have text {expected:?}"))
            .await
    }

    /// Assert the inner text contains `expected`
    pub async fn verify_text_contains(&self, expected: &str) -> PageResult<()> {
        self.verify_text_with(
            |t| t.contains(expected),
            format!("to contain text {expected:?}"),
        )
        .await
    }

    async fn verify_enabled_state(&self, enabled: bool) -> PageResult<()> {
        let driver = self.driver();
        let locator = &self.locator;
        let wanted = if enabled { "enabled" } else { "disabled" };
        expect_eventually(
            move || async move {
                if driver.element_count(locator).await? == 0 {
                    return Ok(AssertionCheckResult::Fail(format!(
                        "expected {locator} to be {wanted}, but it is not present"
                    )));
                }
                let actual = driver.is_enabled(locator).await?;
                Ok(AssertionCheckResult::check(actual == enabled, || {
                    format!("expected {locator} to be {wanted}")
                }))
            },
            &self.wait_options(),
        )
        .await
    }

    pub async fn verify_enabled(&self) -> PageResult<()> {
        self.verify_enabled_state(true).await
    }

    pub async fn verify_disabled(&self) -> PageResult<()> {
        self.verify_enabled_state(false).await
    }

    /// Assert attribute `name` exists and contains `expected`
    pub async fn verify_attribute_contains(&self, name: &str, expected: &str) -> PageResult<()> {
        let driver = self.driver();
        let locator = &self.locator;
        expect_eventually(
            move || async move {
                if driver.element_count(locator).await? == 0 {
                    return Ok(AssertionCheckResult::Fail(format!(
                        "expected {locator} to have attribute {name:?}, but it is not present"
                    )));
                }
                let value = driver.attribute(locator, name).await?;
                Ok(match value {
                    Some(v) if v.contains(expected) => AssertionCheckResult::Pass,
                    Some(v) => AssertionCheckResult::Fail(format!(
                        "expected attribute {name:?} of {locator} to contain {expected:?}, got {v:?}"
                    )),
                    None => AssertionCheckResult::Fail(format!(
                        "expected {locator} to have attribute {name:?}"
                    )),
                })
            },
            &self.wait_options(),
        )
        .await
    }

    /// Assert some class token contains `name`
    pub async fn verify_has_class(&self, name: &str) -> PageResult<()> {
        expect_eventually(
            move || async move {
                if self.driver().element_count(&self.locator).await? == 0 {
                    return Ok(AssertionCheckResult::Fail(format!(
                        "expected {} to have class {name:?}, but it is not present",
                        self.locator
                    )));
                }
                let classes = self.class_list().await?;
                Ok(AssertionCheckResult::check(
                    classes.iter().any(|c| c.contains(name)),
                    || format!("expected {} to have class {name:?}, got {classes:?}", self.locator),
                ))
            },
            &self.wait_options(),
        )
        .await
    }
}

/// Class tokens from a `classList` property value.
///
/// Drivers serialize `DOMTokenList` as an array, an index-keyed object, or
/// occasionally a plain space-separated string.
fn class_tokens(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
        Value::Object(map) => {
            let mut indexed: Vec<(usize, String)> = map
                .iter()
                .filter_map(|(k, v)| Some((k.parse().ok()?, v.as_str()?.to_string())))
                .collect();
            indexed.sort_by_key(|(i, _)| *i);
            indexed.into_iter().map(|(_, c)| c).collect()
        }
        _ => Vec::new(),
    }
}
