//! In-memory [`Driver`] for tests.
//!
//! `MockDriver` models just enough of a page for components to be driven end
//! to end: a map of located elements, text lists for multi-node locators,
//! keyboard state (held modifiers, select-all), window handles and cookies.
//! Every call is recorded in order so tests can assert on exact driver call
//! sequences.

use crate::driver::{Cookie, Driver, Key, Size};
use crate::locator::Locator;
use crate::result::{PageError, PageResult};
use crate::script::ElementScript;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Size reported after `maximize_window`
pub const MAXIMIZED_WINDOW: Size = Size::new(1920.0, 1080.0);

/// A recorded driver call
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    ElementCount(Locator),
    IsDisplayed(Locator),
    IsEnabled(Locator),
    Click(Locator),
    MoveTo { locator: Locator, x: f64, y: f64 },
    SendKeys { locator: Locator, text: String },
    Clear(Locator),
    Keys(Vec<Key>),
    Attribute { locator: Locator, name: String },
    CssProperty { locator: Locator, name: String },
    Property { locator: Locator, name: String },
    Text(Locator),
    Value(Locator),
    Size(Locator),
    Texts(Locator),
    Execute {
        script: Option<ElementScript>,
        args: Vec<Value>,
    },
    Navigate(String),
    Refresh,
    CurrentUrl,
    MaximizeWindow,
    WindowSize,
    ResizeWindow { width: u32, height: u32 },
    DeleteCookies,
    SetCookie(Cookie),
    Cookies,
    OpenNewWindow,
    WindowHandles,
    SwitchWindow(String),
}

impl DriverCall {
    /// Whether the call changes page state (as opposed to reading it)
    #[must_use]
    pub const fn is_action(&self) -> bool {
        matches!(
            self,
            Self::Click(_)
                | Self::MoveTo { .. }
                | Self::SendKeys { .. }
                | Self::Clear(_)
                | Self::Keys(_)
                | Self::Execute { .. }
                | Self::Navigate(_)
                | Self::Refresh
                | Self::MaximizeWindow
                | Self::ResizeWindow { .. }
                | Self::DeleteCookies
                | Self::SetCookie(_)
                | Self::OpenNewWindow
                | Self::SwitchWindow(_)
        )
    }
}

/// A simulated DOM node
#[derive(Debug, Clone, PartialEq)]
pub struct MockElement {
    pub present: bool,
    pub displayed: bool,
    pub enabled: bool,
    pub text: String,
    pub value: String,
    pub attributes: HashMap<String, String>,
    pub css: HashMap<String, String>,
    pub properties: HashMap<String, Value>,
    pub size: Size,
    /// Clicking toggles the `checked` attribute
    pub checkable: bool,
    /// Made present and displayed when this element is clicked
    pub reveals: Vec<Locator>,
    /// Made absent when this element is clicked
    pub conceals: Vec<Locator>,
    /// Class tokens toggled on other elements when this element is clicked
    pub toggles: Vec<(Locator, String)>,
    /// Enter keystrokes received
    pub submissions: usize,
}

impl Default for MockElement {
    fn default() -> Self {
        Self {
            present: true,
            displayed: true,
            enabled: true,
            text: String::new(),
            value: String::new(),
            attributes: HashMap::new(),
            css: HashMap::new(),
            properties: HashMap::new(),
            size: Size::new(100.0, 20.0),
            checkable: false,
            reveals: Vec::new(),
            conceals: Vec::new(),
            toggles: Vec::new(),
            submissions: 0,
        }
    }
}

impl MockElement {
    /// A present, displayed, enabled element
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered but not in the DOM yet
    #[must_use]
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_css(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.css.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        let _ = self.properties.insert(name.into(), value);
        self
    }

    /// Set both the `classList` property and the `class` attribute
    #[must_use]
    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.set_classes(classes.iter().map(|c| (*c).to_string()).collect());
        self
    }

    #[must_use]
    pub const fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// A checkbox; `checked` sets the initial state
    #[must_use]
    pub fn checkable(mut self, checked: bool) -> Self {
        self.checkable = true;
        if checked {
            let _ = self.attributes.insert("checked".to_string(), "true".to_string());
        }
        self
    }

    #[must_use]
    pub fn reveals(mut self, target: Locator) -> Self {
        self.reveals.push(target);
        self
    }

    #[must_use]
    pub fn conceals(mut self, target: Locator) -> Self {
        self.conceals.push(target);
        self
    }

    #[must_use]
    pub fn toggles_class(mut self, target: Locator, token: impl Into<String>) -> Self {
        self.toggles.push((target, token.into()));
        self
    }

    /// Whether the `checked` attribute is set
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.attributes.contains_key("checked")
    }

    /// Current class tokens
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        match self.properties.get("classList") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn set_classes(&mut self, classes: Vec<String>) {
        let _ = self
            .attributes
            .insert("class".to_string(), classes.join(" "));
        let _ = self.properties.insert(
            "classList".to_string(),
            Value::Array(classes.into_iter().map(Value::String).collect()),
        );
    }

    fn toggle_class(&mut self, token: &str) {
        let mut classes = self.classes();
        if let Some(index) = classes.iter().position(|c| c == token) {
            let _ = classes.remove(index);
        } else {
            classes.push(token.to_string());
        }
        self.set_classes(classes);
    }
}

#[derive(Debug)]
struct MockState {
    elements: HashMap<Locator, MockElement>,
    lists: HashMap<Locator, Vec<String>>,
    history: Vec<DriverCall>,
    active: Option<Locator>,
    ctrl_held: bool,
    select_all: bool,
    url: String,
    window_size: Size,
    handles: Vec<String>,
    current_handle: String,
    cookies: Vec<Cookie>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
            lists: HashMap::new(),
            history: Vec::new(),
            active: None,
            ctrl_held: false,
            select_all: false,
            url: "about:blank".to_string(),
            window_size: Size::new(1024.0, 768.0),
            handles: vec!["window-0".to_string()],
            current_handle: "window-0".to_string(),
            cookies: Vec::new(),
        }
    }
}

impl MockState {
    fn present_mut(&mut self, locator: &Locator) -> PageResult<&mut MockElement> {
        match self.elements.get_mut(locator) {
            Some(element) if element.present => Ok(element),
            _ => Err(PageError::NoSuchElement {
                locator: locator.to_string(),
            }),
        }
    }

    fn present(&self, locator: &Locator) -> PageResult<&MockElement> {
        match self.elements.get(locator) {
            Some(element) if element.present => Ok(element),
            _ => Err(PageError::NoSuchElement {
                locator: locator.to_string(),
            }),
        }
    }

    fn count(&self, locator: &Locator) -> usize {
        if let Some(list) = self.lists.get(locator) {
            return list.len();
        }
        usize::from(self.elements.get(locator).is_some_and(|e| e.present))
    }

    fn click(&mut self, locator: &Locator) -> PageResult<()> {
        let element = self.present_mut(locator)?;
        if !element.enabled {
            return Ok(());
        }
        if element.checkable {
            if element.is_checked() {
                let _ = element.attributes.remove("checked");
            } else {
                let _ = element
                    .attributes
                    .insert("checked".to_string(), "true".to_string());
            }
        }
        let reveals = element.reveals.clone();
        let conceals = element.conceals.clone();
        let toggles = element.toggles.clone();
        self.active = Some(locator.clone());

        for target in reveals {
            let revealed = self.elements.entry(target).or_default();
            revealed.present = true;
            revealed.displayed = true;
        }
        for target in conceals {
            if let Some(concealed) = self.elements.get_mut(&target) {
                concealed.present = false;
            }
        }
        for (target, token) in toggles {
            self.elements.entry(target).or_default().toggle_class(&token);
        }
        Ok(())
    }

    fn press(&mut self, key: Key) {
        match key {
            Key::Null => self.ctrl_held = false,
            Key::Control => self.ctrl_held = true,
            Key::Char('a' | 'A') if self.ctrl_held => self.select_all = true,
            Key::Delete => {
                if self.select_all {
                    self.select_all = false;
                    if let Some(active) = self.active_mut() {
                        active.value.clear();
                    }
                }
            }
            Key::Enter | Key::Char('\n') => {
                if let Some(active) = self.active_mut() {
                    active.submissions += 1;
                }
            }
            Key::Space => self.type_char(' '),
            Key::Char(c) => self.type_char(c),
            Key::Tab | Key::Escape => {}
        }
    }

    fn type_char(&mut self, c: char) {
        let replace = std::mem::take(&mut self.select_all);
        if let Some(active) = self.active_mut() {
            if replace {
                active.value.clear();
            }
            active.value.push(c);
        }
    }

    fn active_mut(&mut self) -> Option<&mut MockElement> {
        let active = self.active.clone()?;
        self.elements.get_mut(&active)
    }
}

/// Mock driver for unit and integration testing
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create an empty page at `about:blank`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builder form of [`add_element`](Self::add_element)
    #[must_use]
    pub fn with_element(self, locator: Locator, element: MockElement) -> Self {
        self.add_element(locator, element);
        self
    }

    /// Builder form of [`set_texts`](Self::set_texts)
    #[must_use]
    pub fn with_texts<S: Into<String>>(
        self,
        locator: Locator,
        texts: impl IntoIterator<Item = S>,
    ) -> Self {
        self.set_texts(locator, texts);
        self
    }

    /// Register or replace an element
    pub fn add_element(&self, locator: Locator, element: MockElement) {
        let _ = self.state().elements.insert(locator, element);
    }

    /// Register the texts of every node matching a multi-node locator
    pub fn set_texts<S: Into<String>>(&self, locator: Locator, texts: impl IntoIterator<Item = S>) {
        let texts = texts.into_iter().map(Into::into).collect();
        let _ = self.state().lists.insert(locator, texts);
    }

    /// Snapshot of an element
    #[must_use]
    pub fn element(&self, locator: &Locator) -> Option<MockElement> {
        self.state().elements.get(locator).cloned()
    }

    /// Mutate a registered element in place
    pub fn update(&self, locator: &Locator, f: impl FnOnce(&mut MockElement)) {
        if let Some(element) = self.state().elements.get_mut(locator) {
            f(element);
        }
    }

    /// Insert into or remove from the DOM
    pub fn set_present(&self, locator: &Locator, present: bool) {
        self.state()
            .elements
            .entry(locator.clone())
            .or_default()
            .present = present;
    }

    /// Point the current window at a URL without recording a navigation
    pub fn set_url(&self, url: impl Into<String>) {
        self.state().url = url.into();
    }

    /// Every call so far, in order
    #[must_use]
    pub fn history(&self) -> Vec<DriverCall> {
        self.state().history.clone()
    }

    /// State-changing calls only
    #[must_use]
    pub fn actions(&self) -> Vec<DriverCall> {
        self.state()
            .history
            .iter()
            .filter(|c| c.is_action())
            .cloned()
            .collect()
    }

    /// Number of native clicks issued on a locator
    #[must_use]
    pub fn clicks_on(&self, locator: &Locator) -> usize {
        self.state()
            .history
            .iter()
            .filter(|c| matches!(c, DriverCall::Click(l) if l == locator))
            .count()
    }

    /// Whether any call matches the predicate
    #[must_use]
    pub fn was_called(&self, predicate: impl Fn(&DriverCall) -> bool) -> bool {
        self.state().history.iter().any(predicate)
    }

    pub fn clear_history(&self) {
        self.state().history.clear();
    }

    /// Handle of the current window
    #[must_use]
    pub fn active_window(&self) -> String {
        self.state().current_handle.clone()
    }

    /// Cookies currently set
    #[must_use]
    pub fn cookie_jar(&self) -> Vec<Cookie> {
        self.state().cookies.clone()
    }

    /// Number of page reloads
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.state()
            .history
            .iter()
            .filter(|c| matches!(c, DriverCall::Refresh))
            .count()
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn element_count(&self, locator: &Locator) -> PageResult<usize> {
        let mut state = self.state();
        state.history.push(DriverCall::ElementCount(locator.clone()));
        Ok(state.count(locator))
    }

    async fn is_displayed(&self, locator: &Locator) -> PageResult<bool> {
        let mut state = self.state();
        state.history.push(DriverCall::IsDisplayed(locator.clone()));
        if let Some(list) = state.lists.get(locator) {
            return Ok(!list.is_empty());
        }
        Ok(state
            .elements
            .get(locator)
            .is_some_and(|e| e.present && e.displayed))
    }

    async fn is_enabled(&self, locator: &Locator) -> PageResult<bool> {
        let mut state = self.state();
        state.history.push(DriverCall::IsEnabled(locator.clone()));
        Ok(state.present(locator)?.enabled)
    }

    async fn click(&self, locator: &Locator) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::Click(locator.clone()));
        state.click(locator)
    }

    async fn move_to(&self, locator: &Locator, x_offset: f64, y_offset: f64) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::MoveTo {
            locator: locator.clone(),
            x: x_offset,
            y: y_offset,
        });
        let _ = state.present(locator)?;
        Ok(())
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::SendKeys {
            locator: locator.clone(),
            text: text.to_string(),
        });
        let _ = state.present(locator)?;
        state.active = Some(locator.clone());
        for c in text.chars() {
            state.press(Key::from_char(c));
        }
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::Clear(locator.clone()));
        state.present_mut(locator)?.value.clear();
        state.active = Some(locator.clone());
        Ok(())
    }

    async fn keys(&self, keys: &[Key]) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::Keys(keys.to_vec()));
        for key in keys {
            state.press(*key);
        }
        Ok(())
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> PageResult<Option<String>> {
        let mut state = self.state();
        state.history.push(DriverCall::Attribute {
            locator: locator.clone(),
            name: name.to_string(),
        });
        Ok(state.present(locator)?.attributes.get(name).cloned())
    }

    async fn css_property(&self, locator: &Locator, name: &str) -> PageResult<Option<String>> {
        let mut state = self.state();
        state.history.push(DriverCall::CssProperty {
            locator: locator.clone(),
            name: name.to_string(),
        });
        Ok(state.present(locator)?.css.get(name).cloned())
    }

    async fn property(&self, locator: &Locator, name: &str) -> PageResult<Option<Value>> {
        let mut state = self.state();
        state.history.push(DriverCall::Property {
            locator: locator.clone(),
            name: name.to_string(),
        });
        Ok(state.present(locator)?.properties.get(name).cloned())
    }

    async fn text(&self, locator: &Locator) -> PageResult<String> {
        let mut state = self.state();
        state.history.push(DriverCall::Text(locator.clone()));
        Ok(state.present(locator)?.text.clone())
    }

    async fn value(&self, locator: &Locator) -> PageResult<String> {
        let mut state = self.state();
        state.history.push(DriverCall::Value(locator.clone()));
        Ok(state.present(locator)?.value.clone())
    }

    async fn size(&self, locator: &Locator) -> PageResult<Size> {
        let mut state = self.state();
        state.history.push(DriverCall::Size(locator.clone()));
        Ok(state.present(locator)?.size)
    }

    async fn texts(&self, locator: &Locator) -> PageResult<Vec<String>> {
        let mut state = self.state();
        state.history.push(DriverCall::Texts(locator.clone()));
        if let Some(list) = state.lists.get(locator) {
            return Ok(list.clone());
        }
        Ok(state
            .present(locator)
            .map(|e| vec![e.text.clone()])
            .unwrap_or_default())
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> PageResult<Value> {
        let identified = ElementScript::identify(script);
        let mut state = self.state();
        state.history.push(DriverCall::Execute {
            script: identified,
            args: args.clone(),
        });

        let (Some(script), Some(locator)) = (identified, Locator::from_script_args(&args)) else {
            return Ok(Value::Null);
        };
        if state.count(&locator) == 0 {
            return Ok(Value::Bool(false));
        }
        match script {
            ElementScript::ScrollIntoView => {}
            ElementScript::ForceClick => state.click(&locator)?,
            ElementScript::Hide => state.present_mut(&locator)?.displayed = false,
            ElementScript::Show => state.present_mut(&locator)?.displayed = true,
        }
        Ok(Value::Bool(true))
    }

    async fn navigate(&self, url: &str) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::Navigate(url.to_string()));
        state.url = url.to_string();
        Ok(())
    }

    async fn refresh(&self) -> PageResult<()> {
        self.state().history.push(DriverCall::Refresh);
        Ok(())
    }

    async fn current_url(&self) -> PageResult<String> {
        let mut state = self.state();
        state.history.push(DriverCall::CurrentUrl);
        Ok(state.url.clone())
    }

    async fn maximize_window(&self) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::MaximizeWindow);
        state.window_size = MAXIMIZED_WINDOW;
        Ok(())
    }

    async fn window_size(&self) -> PageResult<Size> {
        let mut state = self.state();
        state.history.push(DriverCall::WindowSize);
        Ok(state.window_size)
    }

    async fn resize_window(&self, width: u32, height: u32) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::ResizeWindow { width, height });
        state.window_size = Size::new(f64::from(width), f64::from(height));
        Ok(())
    }

    async fn delete_cookies(&self) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::DeleteCookies);
        state.cookies.clear();
        Ok(())
    }

    async fn set_cookie(&self, cookie: Cookie) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::SetCookie(cookie.clone()));
        state.cookies.retain(|c| c.name != cookie.name);
        state.cookies.push(cookie);
        Ok(())
    }

    async fn cookies(&self) -> PageResult<Vec<Cookie>> {
        let mut state = self.state();
        state.history.push(DriverCall::Cookies);
        Ok(state.cookies.clone())
    }

    async fn open_new_window(&self) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::OpenNewWindow);
        let handle = format!("window-{}", state.handles.len());
        state.handles.push(handle);
        Ok(())
    }

    async fn window_handles(&self) -> PageResult<Vec<String>> {
        let mut state = self.state();
        state.history.push(DriverCall::WindowHandles);
        Ok(state.handles.clone())
    }

    async fn switch_window(&self, handle: &str) -> PageResult<()> {
        let mut state = self.state();
        state.history.push(DriverCall::SwitchWindow(handle.to_string()));
        if !state.handles.iter().any(|h| h == handle) {
            return Err(PageError::driver(format!("no such window: {handle}")));
        }
        state.current_handle = handle.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> Locator {
        Locator::css("input#name")
    }

    mod element_tests {
        use super::*;

        #[tokio::test]
        async fn test_absent_element_reports_zero() {
            let driver = MockDriver::new().with_element(input(), MockElement::absent());
            assert_eq!(driver.element_count(&input()).await.unwrap(), 0);
            assert!(!driver.is_displayed(&input()).await.unwrap());
            assert!(matches!(
                driver.text(&input()).await,
                Err(PageError::NoSuchElement { .. })
            ));
        }

        #[tokio::test]
        async fn test_checkable_toggles() {
            let driver = MockDriver::new().with_element(input(), MockElement::new().checkable(false));
            driver.click(&input()).await.unwrap();
            assert!(driver.element(&input()).unwrap().is_checked());
            driver.click(&input()).await.unwrap();
            assert!(!driver.element(&input()).unwrap().is_checked());
        }

        #[tokio::test]
        async fn test_click_reveals_and_conceals() {
            let menu = Locator::css("#menu");
            let spinner = Locator::css("#spinner");
            let driver = MockDriver::new()
                .with_element(
                    input(),
                    MockElement::new().reveals(menu.clone()).conceals(spinner.clone()),
                )
                .with_element(spinner.clone(), MockElement::new());
            driver.click(&input()).await.unwrap();
            assert_eq!(driver.element_count(&menu).await.unwrap(), 1);
            assert_eq!(driver.element_count(&spinner).await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_click_toggles_class() {
            let card = Locator::css("#card");
            let driver = MockDriver::new()
                .with_element(input(), MockElement::new().toggles_class(card.clone(), "open"))
                .with_element(card.clone(), MockElement::new().with_classes(&["card"]));
            driver.click(&input()).await.unwrap();
            assert_eq!(driver.element(&card).unwrap().classes(), vec!["card", "open"]);
            driver.click(&input()).await.unwrap();
            assert_eq!(driver.element(&card).unwrap().classes(), vec!["card"]);
        }
    }

    mod keyboard_tests {
        use super::*;

        #[tokio::test]
        async fn test_select_all_delete_clears() {
            let driver = MockDriver::new().with_element(input(), MockElement::new().with_value("old"));
            driver.send_keys(&input(), "").await.unwrap();
            driver.keys(&[Key::Control]).await.unwrap();
            driver.keys(&[Key::Char('a')]).await.unwrap();
            driver.keys(&[Key::Delete]).await.unwrap();
            driver.keys(&[Key::Null]).await.unwrap();
            driver.send_keys(&input(), "new").await.unwrap();
            assert_eq!(driver.element(&input()).unwrap().value, "new");
        }

        #[tokio::test]
        async fn test_enter_counts_submission() {
            let driver = MockDriver::new().with_element(input(), MockElement::new());
            driver.send_keys(&input(), "abc\n").await.unwrap();
            driver.keys(&[Key::Enter]).await.unwrap();
            let element = driver.element(&input()).unwrap();
            assert_eq!(element.value, "abc");
            assert_eq!(element.submissions, 2);
        }

        #[tokio::test]
        async fn test_send_keys_requires_element() {
            let driver = MockDriver::new();
            assert!(driver.send_keys(&input(), "x").await.is_err());
        }
    }

    mod script_tests {
        use super::*;

        #[tokio::test]
        async fn test_hide_and_show() {
            let driver = MockDriver::new().with_element(input(), MockElement::new());
            let args = input().script_args();
            let applied = driver
                .execute(&ElementScript::Hide.source(), args.clone())
                .await
                .unwrap();
            assert_eq!(applied, Value::Bool(true));
            assert!(!driver.is_displayed(&input()).await.unwrap());
            let _ = driver.execute(&ElementScript::Show.source(), args).await.unwrap();
            assert!(driver.is_displayed(&input()).await.unwrap());
        }

        #[tokio::test]
        async fn test_script_on_missing_element_returns_false() {
            let driver = MockDriver::new();
            let result = driver
                .execute(&ElementScript::ForceClick.source(), input().script_args())
                .await
                .unwrap();
            assert_eq!(result, Value::Bool(false));
        }
    }

    mod window_tests {
        use super::*;

        #[tokio::test]
        async fn test_window_handles() {
            let driver = MockDriver::new();
            driver.open_new_window().await.unwrap();
            let handles = driver.window_handles().await.unwrap();
            assert_eq!(handles, vec!["window-0", "window-1"]);
            driver.switch_window("window-1").await.unwrap();
            assert_eq!(driver.active_window(), "window-1");
            assert!(driver.switch_window("window-9").await.is_err());
        }

        #[tokio::test]
        async fn test_cookies_replace_by_name() {
            let driver = MockDriver::new();
            driver.set_cookie(Cookie::new("token", "a")).await.unwrap();
            driver.set_cookie(Cookie::new("token", "b")).await.unwrap();
            assert_eq!(driver.cookie_jar(), vec![Cookie::new("token", "b")]);
            driver.delete_cookies().await.unwrap();
            assert!(driver.cookies().await.unwrap().is_empty());
        }
    }

    #[test]
    fn test_is_action() {
        assert!(DriverCall::Click(input()).is_action());
        assert!(!DriverCall::Text(input()).is_action());
    }
}
