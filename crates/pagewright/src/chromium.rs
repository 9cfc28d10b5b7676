//! Chromium backend over the Chrome `DevTools` Protocol.
//!
//! [`ChromiumDriver`] implements [`Driver`] with chromiumoxide. Element
//! lookups run as page scripts so every strategy the locator layer knows
//! resolves the same way it does for [`ElementScript`](crate::ElementScript);
//! pointer and keyboard input go through the CDP `Input` domain.

use crate::driver::{Cookie, Driver, Key, Size};
use crate::locator::Locator;
use crate::result::{PageError, PageResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    Bounds, GetWindowForTargetParams, SetWindowBoundsParams, WindowState,
};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, InsertTextParams, MouseButton,
};
use chromiumoxide::cdp::browser_protocol::network::{ClearBrowserCookiesParams, CookieParam};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde_json::Value;
use std::fmt::Display;
use tokio::sync::Mutex;

/// Returns every node matching `(strategy, selector)` as an array
const QUERY_ALL: &str = r"function (strategy, selector) {
  if (strategy === 'xpath') {
    var found = document.evaluate(selector, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
    var nodes = [];
    for (var i = 0; i < found.snapshotLength; i++) { nodes.push(found.snapshotItem(i)); }
    return nodes;
  }
  if (strategy === 'tag name') { return Array.from(document.getElementsByTagName(selector)); }
  if (strategy === 'link text') {
    return Array.from(document.querySelectorAll('a')).filter(function (a) { return a.textContent.trim() === selector; });
  }
  if (strategy === 'partial link text') {
    return Array.from(document.querySelectorAll('a')).filter(function (a) { return a.textContent.indexOf(selector) !== -1; });
  }
  return Array.from(document.querySelectorAll(selector));
}";

/// CDP modifier bit for Control
const CONTROL_MODIFIER: i64 = 2;

/// Chromium launch options
#[derive(Debug, Clone)]
pub struct ChromiumConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for ChromiumConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl ChromiumConfig {
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[derive(Debug)]
struct Tabs {
    pages: Vec<CdpPage>,
    current: usize,
}

/// [`Driver`] backed by a launched Chromium
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Mutex<CdpBrowser>,
    tabs: Mutex<Tabs>,
    ctrl_held: Mutex<bool>,
    handler: tokio::task::JoinHandle<()>,
}

fn driver_error(e: impl Display) -> PageError {
    PageError::driver(e.to_string())
}

fn js_string(value: &str) -> String {
    Value::from(value).to_string()
}

/// Wrap `body` so it runs with `nodes` and `element` bound for `locator`.
///
/// The expression evaluates to `{ found, value }`; `body` only runs when a
/// node matched.
fn element_expression(locator: &Locator, body: &str) -> String {
    format!(
        "(function () {{ var nodes = ({QUERY_ALL})({}, {}); var element = nodes[0] || null; \
         if (element === null) {{ return {{ found: false }}; }} \
         return {{ found: true, value: (function () {{ {body} }})() }}; }})()",
        js_string(locator.strategy().as_str()),
        js_string(locator.selector()),
    )
}

fn nodes_expression(locator: &Locator, body: &str) -> String {
    format!(
        "(function () {{ var nodes = ({QUERY_ALL})({}, {}); {body} }})()",
        js_string(locator.strategy().as_str()),
        js_string(locator.selector()),
    )
}

/// WebDriver `execute` body applied to its argument list
fn execute_expression(script: &str, args: &[Value]) -> String {
    format!(
        "(function () {{ {script} }}).apply(null, {})",
        Value::Array(args.to_vec())
    )
}

/// CDP `(key, code, text, virtual key code)` of a keystroke
pub(crate) fn key_event_fields(key: Key) -> Option<(String, String, Option<String>, i64)> {
    let fields = match key {
        Key::Null | Key::Control => return None,
        Key::Tab => ("Tab".into(), "Tab".into(), None, 9),
        Key::Enter => ("Enter".into(), "Enter".into(), Some("\r".into()), 13),
        Key::Escape => ("Escape".into(), "Escape".into(), None, 27),
        Key::Space => (" ".into(), "Space".into(), Some(" ".into()), 32),
        Key::Delete => ("Delete".into(), "Delete".into(), None, 46),
        Key::Char('\n') => ("Enter".into(), "Enter".into(), Some("\r".into()), 13),
        Key::Char(c) => {
            let upper = c.to_ascii_uppercase();
            let code = if c.is_ascii_alphabetic() {
                format!("Key{upper}")
            } else if c.is_ascii_digit() {
                format!("Digit{c}")
            } else {
                String::new()
            };
            (c.to_string(), code, Some(c.to_string()), i64::from(u32::from(upper)))
        }
    };
    Some(fields)
}

impl ChromiumDriver {
    /// Launch a browser and open one blank tab
    pub async fn launch(config: ChromiumConfig) -> PageResult<Self> {
        let mut builder = CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(driver_error)?;
        let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(driver_error)?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(driver_error)?;
        tracing::debug!(headless = config.headless, "chromium launched");

        Ok(Self {
            browser: Mutex::new(browser),
            tabs: Mutex::new(Tabs {
                pages: vec![page],
                current: 0,
            }),
            ctrl_held: Mutex::new(false),
            handler,
        })
    }

    /// Close the browser and stop the event handler
    pub async fn close(self) -> PageResult<()> {
        let mut browser = self.browser.lock().await;
        let _ = browser.close().await.map_err(driver_error)?;
        self.handler.abort();
        Ok(())
    }

    async fn page(&self) -> PageResult<CdpPage> {
        let tabs = self.tabs.lock().await;
        tabs.pages
            .get(tabs.current)
            .cloned()
            .ok_or_else(|| PageError::driver("no open tab"))
    }

    async fn evaluate(&self, expression: String) -> PageResult<Value> {
        let page = self.page().await?;
        let result = page.evaluate(expression).await.map_err(driver_error)?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    /// Evaluate `body` against the first node; `NoSuchElement` when none match
    async fn on_element(&self, locator: &Locator, body: &str) -> PageResult<Value> {
        let mut result = self.evaluate(element_expression(locator, body)).await?;
        if result.get("found").and_then(Value::as_bool) != Some(true) {
            return Err(PageError::NoSuchElement {
                locator: locator.to_string(),
            });
        }
        Ok(result
            .get_mut("value")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// Viewport position of the node's top-left corner
    async fn origin(&self, locator: &Locator) -> PageResult<(f64, f64)> {
        let rect = self
            .on_element(
                locator,
                "var r = element.getBoundingClientRect(); return [r.left, r.top];",
            )
            .await?;
        let coordinate = |i: usize| rect.get(i).and_then(Value::as_f64).unwrap_or(0.0);
        Ok((coordinate(0), coordinate(1)))
    }

    async fn mouse(&self, kind: DispatchMouseEventType, x: f64, y: f64) -> PageResult<()> {
        let params = DispatchMouseEventParams::builder()
            .r#type(kind)
            .x(x)
            .y(y)
            .button(MouseButton::Left)
            .click_count(1)
            .build()
            .map_err(driver_error)?;
        let _ = self.page().await?.execute(params).await.map_err(driver_error)?;
        Ok(())
    }

    async fn press(&self, key: Key) -> PageResult<()> {
        let mut ctrl_held = self.ctrl_held.lock().await;
        match key {
            Key::Null => *ctrl_held = false,
            Key::Control => *ctrl_held = true,
            Key::Char(c) if !*ctrl_held && c != '\n' => {
                let page = self.page().await?;
                let _ = page
                    .execute(InsertTextParams::new(c.to_string()))
                    .await
                    .map_err(driver_error)?;
            }
            _ => {
                let Some((name, code, text, virtual_key)) = key_event_fields(key) else {
                    return Ok(());
                };
                let modifiers = if *ctrl_held { CONTROL_MODIFIER } else { 0 };
                let page = self.page().await?;
                for kind in [DispatchKeyEventType::KeyDown, DispatchKeyEventType::KeyUp] {
                    let mut builder = DispatchKeyEventParams::builder()
                        .r#type(kind.clone())
                        .modifiers(modifiers)
                        .key(name.clone())
                        .code(code.clone())
                        .windows_virtual_key_code(virtual_key);
                    if kind == DispatchKeyEventType::KeyDown {
                        if *ctrl_held && name.eq_ignore_ascii_case("a") {
                            builder = builder.commands(vec!["selectAll".to_string()]);
                        } else if let (false, Some(text)) = (*ctrl_held, &text) {
                            builder = builder.text(text.clone());
                        }
                    }
                    let params = builder.build().map_err(driver_error)?;
                    let _ = page.execute(params).await.map_err(driver_error)?;
                }
            }
        }
        Ok(())
    }

    async fn window_bounds(&self, bounds: Bounds) -> PageResult<()> {
        let page = self.page().await?;
        let window = page
            .execute(GetWindowForTargetParams::default())
            .await
            .map_err(driver_error)?;
        let _ = page
            .execute(SetWindowBoundsParams::new(window.window_id.clone(), bounds))
            .await
            .map_err(driver_error)?;
        Ok(())
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    async fn element_count(&self, locator: &Locator) -> PageResult<usize> {
        let count = self
            .evaluate(nodes_expression(locator, "return nodes.length;"))
            .await?;
        Ok(count.as_u64().unwrap_or(0) as usize)
    }

    async fn is_displayed(&self, locator: &Locator) -> PageResult<bool> {
        let displayed = self
            .evaluate(nodes_expression(
                locator,
                "var element = nodes[0]; if (!element) { return false; } \
                 var style = getComputedStyle(element); var r = element.getBoundingClientRect(); \
                 return style.display !== 'none' && style.visibility !== 'hidden' && r.width > 0 && r.height > 0;",
            ))
            .await?;
        Ok(displayed.as_bool().unwrap_or(false))
    }

    async fn is_enabled(&self, locator: &Locator) -> PageResult<bool> {
        let enabled = self.on_element(locator, "return !element.disabled;").await?;
        Ok(enabled.as_bool().unwrap_or(true))
    }

    async fn click(&self, locator: &Locator) -> PageResult<()> {
        let size = self.size(locator).await?;
        let (left, top) = self.origin(locator).await?;
        let (dx, dy) = size.center();
        tracing::debug!(locator = %locator, "native click");
        self.mouse(DispatchMouseEventType::MousePressed, left + dx, top + dy)
            .await?;
        self.mouse(DispatchMouseEventType::MouseReleased, left + dx, top + dy)
            .await
    }

    async fn move_to(&self, locator: &Locator, x_offset: f64, y_offset: f64) -> PageResult<()> {
        let (left, top) = self.origin(locator).await?;
        self.mouse(DispatchMouseEventType::MouseMoved, left + x_offset, top + y_offset)
            .await
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> PageResult<()> {
        let _ = self.on_element(locator, "element.focus(); return true;").await?;
        for c in text.chars() {
            self.press(Key::from_char(c)).await?;
        }
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> PageResult<()> {
        let _ = self
            .on_element(
                locator,
                "element.focus(); element.value = ''; \
                 element.dispatchEvent(new Event('input', { bubbles: true })); return true;",
            )
            .await?;
        Ok(())
    }

    async fn keys(&self, keys: &[Key]) -> PageResult<()> {
        for key in keys {
            self.press(*key).await?;
        }
        Ok(())
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> PageResult<Option<String>> {
        let value = self
            .on_element(
                locator,
                &format!("return element.getAttribute({});", js_string(name)),
            )
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn css_property(&self, locator: &Locator, name: &str) -> PageResult<Option<String>> {
        let value = self
            .on_element(
                locator,
                &format!(
                    "return getComputedStyle(element).getPropertyValue({});",
                    js_string(name)
                ),
            )
            .await?;
        Ok(value.as_str().filter(|v| !v.is_empty()).map(str::to_string))
    }

    async fn property(&self, locator: &Locator, name: &str) -> PageResult<Option<Value>> {
        let value = self
            .on_element(
                locator,
                &format!(
                    "var v = element[{}]; if (v === undefined) {{ return null; }} \
                     if (v instanceof DOMTokenList) {{ return Array.from(v); }} return v;",
                    js_string(name)
                ),
            )
            .await?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn text(&self, locator: &Locator) -> PageResult<String> {
        let text = self.on_element(locator, "return element.innerText;").await?;
        Ok(text.as_str().unwrap_or_default().to_string())
    }

    async fn value(&self, locator: &Locator) -> PageResult<String> {
        let value = self
            .on_element(
                locator,
                "return element.value == null ? '' : String(element.value);",
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn size(&self, locator: &Locator) -> PageResult<Size> {
        let size = self
            .on_element(
                locator,
                "var r = element.getBoundingClientRect(); return { width: r.width, height: r.height };",
            )
            .await?;
        Ok(serde_json::from_value(size)?)
    }

    async fn texts(&self, locator: &Locator) -> PageResult<Vec<String>> {
        let texts = self
            .evaluate(nodes_expression(
                locator,
                "return nodes.map(function (n) { return n.innerText; });",
            ))
            .await?;
        Ok(serde_json::from_value(texts)?)
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> PageResult<Value> {
        self.evaluate(execute_expression(script, &args)).await
    }

    async fn navigate(&self, url: &str) -> PageResult<()> {
        let _ = self.page().await?.goto(url).await.map_err(driver_error)?;
        Ok(())
    }

    async fn refresh(&self) -> PageResult<()> {
        let _ = self.page().await?.reload().await.map_err(driver_error)?;
        Ok(())
    }

    async fn current_url(&self) -> PageResult<String> {
        let url = self.page().await?.url().await.map_err(driver_error)?;
        Ok(url.unwrap_or_default())
    }

    async fn maximize_window(&self) -> PageResult<()> {
        self.window_bounds(Bounds::builder().window_state(WindowState::Maximized).build())
            .await
    }

    async fn window_size(&self) -> PageResult<Size> {
        let size = self
            .evaluate(
                "({ width: window.outerWidth, height: window.outerHeight })".to_string(),
            )
            .await?;
        Ok(serde_json::from_value(size)?)
    }

    async fn resize_window(&self, width: u32, height: u32) -> PageResult<()> {
        self.window_bounds(Bounds::builder().window_state(WindowState::Normal).build())
            .await?;
        self.window_bounds(
            Bounds::builder()
                .width(i64::from(width))
                .height(i64::from(height))
                .build(),
        )
        .await
    }

    async fn delete_cookies(&self) -> PageResult<()> {
        let _ = self
            .page()
            .await?
            .execute(ClearBrowserCookiesParams::default())
            .await
            .map_err(driver_error)?;
        Ok(())
    }

    async fn set_cookie(&self, cookie: Cookie) -> PageResult<()> {
        let _ = self
            .page()
            .await?
            .set_cookie(CookieParam::new(cookie.name, cookie.value))
            .await
            .map_err(driver_error)?;
        Ok(())
    }

    async fn cookies(&self) -> PageResult<Vec<Cookie>> {
        let cookies = self.page().await?.get_cookies().await.map_err(driver_error)?;
        Ok(cookies
            .into_iter()
            .map(|c| Cookie::new(c.name, c.value))
            .collect())
    }

    async fn open_new_window(&self) -> PageResult<()> {
        let page = self
            .browser
            .lock()
            .await
            .new_page("about:blank")
            .await
            .map_err(driver_error)?;
        self.tabs.lock().await.pages.push(page);
        Ok(())
    }

    async fn window_handles(&self) -> PageResult<Vec<String>> {
        let tabs = self.tabs.lock().await;
        Ok(tabs
            .pages
            .iter()
            .map(|p| AsRef::<str>::as_ref(p.target_id()).to_string())
            .collect())
    }

    async fn switch_window(&self, handle: &str) -> PageResult<()> {
        let mut tabs = self.tabs.lock().await;
        let index = tabs
            .pages
            .iter()
            .position(|p| AsRef::<str>::as_ref(p.target_id()) == handle)
            .ok_or_else(|| PageError::driver(format!("no window with handle {handle}")))?;
        let _ = tabs.pages[index].bring_to_front().await.map_err(driver_error)?;
        tabs.current = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_expression_quotes_selector() {
        let expression = element_expression(&Locator::css("a[title=\"x\"]"), "return 1;");
        assert!(expression.contains(r#""a[title=\"x\"]""#));
        assert!(expression.contains("\"css selector\""));
        assert!(expression.contains("found: false"));
    }

    #[test]
    fn test_execute_expression_applies_args() {
        let args = Locator::xpath("//li").script_args();
        let expression = execute_expression("return arguments[1];", &args);
        assert!(expression.ends_with(r#".apply(null, ["xpath","//li"])"#));
    }

    #[test]
    fn test_key_event_fields() {
        assert_eq!(key_event_fields(Key::Control), None);
        let (key, code, text, vk) = key_event_fields(Key::Enter).unwrap();
        assert_eq!((key.as_str(), code.as_str(), vk), ("Enter", "Enter", 13));
        assert_eq!(text.as_deref(), Some("\r"));
        let (_, code, _, vk) = key_event_fields(Key::Char('a')).unwrap();
        assert_eq!((code.as_str(), vk), ("KeyA", 65));
    }

    #[test]
    fn test_config_builders() {
        let config = ChromiumConfig::default()
            .with_viewport(800, 600)
            .with_headless(false)
            .with_no_sandbox();
        assert_eq!((config.viewport_width, config.viewport_height), (800, 600));
        assert!(!config.headless);
        assert!(!config.sandbox);
    }
}
