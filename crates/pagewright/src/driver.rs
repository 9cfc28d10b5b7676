//! Driver - Abstract Browser Automation Trait
//!
//! Every component operation ends up as one or more calls on [`Driver`]. The
//! trait is the only seam between the page-object layer and the browser, so
//! implementations can be swapped:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Components (TextInput, Dropdown, TherapyCard, ...)      │
//! ├──────────────────────────────────────────────────────────┤
//! │  Session  (Arc<dyn Driver> + Arc<Globals>)               │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────────────┐        ┌───────────────────────┐  │
//! │  │  ChromiumDriver   │        │  MockDriver           │  │
//! │  │  (feature browser)│        │  (in-memory DOM)      │  │
//! │  └───────────────────┘        └───────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Components never open or close the browser. They hold a [`Session`] by
//! association and the caller owns the lifecycle.

use crate::config::Globals;
use crate::locator::Locator;
use crate::result::PageResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Keyboard keys with W3C WebDriver code points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Releases every held modifier
    Null,
    /// Tab
    Tab,
    /// Enter / Return
    Enter,
    /// Control modifier
    Control,
    /// Escape
    Escape,
    /// Space bar
    Space,
    /// Delete
    Delete,
    /// A printable character
    Char(char),
}

impl Key {
    /// Code point sent over the wire
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Self::Null => '\u{E000}',
            Self::Tab => '\u{E004}',
            Self::Enter => '\u{E007}',
            Self::Control => '\u{E009}',
            Self::Escape => '\u{E00C}',
            Self::Space => '\u{E00D}',
            Self::Delete => '\u{E017}',
            Self::Char(c) => *c,
        }
    }

    /// Decode a code point; printable characters map to `Char`
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        match c {
            '\u{E000}' => Self::Null,
            '\u{E004}' => Self::Tab,
            '\u{E007}' => Self::Enter,
            '\u{E009}' => Self::Control,
            '\u{E00C}' => Self::Escape,
            '\u{E00D}' => Self::Space,
            '\u{E017}' => Self::Delete,
            other => Self::Char(other),
        }
    }

    /// Whether this key is a non-printable special key
    #[must_use]
    pub const fn is_special(&self) -> bool {
        !matches!(self, Self::Char(_))
    }
}

/// Element or window dimensions in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Height
    pub height: f64,
    /// Width
    pub width: f64,
}

impl Size {
    /// Create a size
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { height, width }
    }

    /// Center point relative to the top-left corner
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Browser cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
}

impl Cookie {
    /// Create a cookie
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Abstract driver trait for browser automation
///
/// Element methods take a [`Locator`] and re-locate on every call. Methods
/// that read a single element fail with `NoSuchElement` when nothing matches,
/// except the presence/visibility probes used by waits, which report `0` /
/// `false` instead.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Number of nodes currently matching the locator
    async fn element_count(&self, locator: &Locator) -> PageResult<usize>;

    /// Whether the first match is displayed (false when absent)
    async fn is_displayed(&self, locator: &Locator) -> PageResult<bool>;

    /// Whether the first match is enabled
    async fn is_enabled(&self, locator: &Locator) -> PageResult<bool>;

    /// Native click at the element's location
    async fn click(&self, locator: &Locator) -> PageResult<()>;

    /// Move the pointer to an offset from the element's top-left corner
    async fn move_to(&self, locator: &Locator, x_offset: f64, y_offset: f64) -> PageResult<()>;

    /// Type text into the element (special keys encoded with [`Key::as_char`])
    async fn send_keys(&self, locator: &Locator, text: &str) -> PageResult<()>;

    /// Native clear of an input's value
    async fn clear(&self, locator: &Locator) -> PageResult<()>;

    /// Send keystrokes to the active element; modifiers stay held until `Key::Null`
    async fn keys(&self, keys: &[Key]) -> PageResult<()>;

    /// HTML attribute value
    async fn attribute(&self, locator: &Locator, name: &str) -> PageResult<Option<String>>;

    /// Computed CSS property value
    async fn css_property(&self, locator: &Locator, name: &str) -> PageResult<Option<String>>;

    /// DOM property value
    async fn property(&self, locator: &Locator, name: &str)
        -> PageResult<Option<serde_json::Value>>;

    /// Rendered inner text
    async fn text(&self, locator: &Locator) -> PageResult<String>;

    /// Current form value
    async fn value(&self, locator: &Locator) -> PageResult<String>;

    /// Rendered size
    async fn size(&self, locator: &Locator) -> PageResult<Size>;

    /// Inner text of every node matching the locator, in document order
    async fn texts(&self, locator: &Locator) -> PageResult<Vec<String>>;

    /// Execute a script body in page context; `arguments[i]` are the args
    async fn execute(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> PageResult<serde_json::Value>;

    /// Navigate the current window
    async fn navigate(&self, url: &str) -> PageResult<()>;

    /// Reload the current page
    async fn refresh(&self) -> PageResult<()>;

    /// Current URL
    async fn current_url(&self) -> PageResult<String>;

    /// Maximize the current window
    async fn maximize_window(&self) -> PageResult<()>;

    /// Current window size
    async fn window_size(&self) -> PageResult<Size>;

    /// Resize the current window
    async fn resize_window(&self, width: u32, height: u32) -> PageResult<()>;

    /// Delete every cookie visible to the current page
    async fn delete_cookies(&self) -> PageResult<()>;

    /// Set a cookie on the current page
    async fn set_cookie(&self, cookie: Cookie) -> PageResult<()>;

    /// Cookies visible to the current page
    async fn cookies(&self) -> PageResult<Vec<Cookie>>;

    /// Open a new window or tab without switching to it
    async fn open_new_window(&self) -> PageResult<()>;

    /// Handles of every open window, in creation order
    async fn window_handles(&self) -> PageResult<Vec<String>>;

    /// Make a window current
    async fn switch_window(&self, handle: &str) -> PageResult<()>;
}

/// Shared driver session handle
///
/// Cloning is cheap. Every component built from a session shares the same
/// driver and globals.
#[derive(Clone)]
pub struct Session {
    driver: Arc<dyn Driver>,
    globals: Arc<Globals>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("globals", &self.globals)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session over a driver with the given globals
    pub fn new(driver: Arc<dyn Driver>, globals: Globals) -> Self {
        Self {
            driver,
            globals: Arc::new(globals),
        }
    }

    /// Create a session with default globals
    pub fn with_defaults(driver: Arc<dyn Driver>) -> Self {
        Self::new(driver, Globals::default())
    }

    /// The driver capability
    #[must_use]
    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    /// Global defaults
    #[must_use]
    pub fn globals(&self) -> &Globals {
        &self.globals
    }
}
