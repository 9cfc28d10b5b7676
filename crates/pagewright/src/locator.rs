//! Locator abstraction for element selection.
//!
//! A [`Locator`] pairs a W3C locator strategy with a selector string. It is
//! immutable once built and identifies zero, one or many live DOM nodes at the
//! moment it is evaluated. Nothing is ever bound to a specific node: every
//! driver call re-evaluates the locator.
//!
//! Child locators are derived by scoping a suffix under a parent selector,
//! which is how components mirror DOM nesting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// W3C locator strategy
///
/// See <https://www.w3.org/TR/webdriver/#locator-strategies>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocateStrategy {
    /// CSS selector (e.g., `div#main > button.primary`)
    #[serde(rename = "css selector")]
    CssSelector,
    /// XPath expression
    #[serde(rename = "xpath")]
    XPath,
    /// Exact anchor text
    #[serde(rename = "link text")]
    LinkText,
    /// Anchor text substring
    #[serde(rename = "partial link text")]
    PartialLinkText,
    /// Element tag name
    #[serde(rename = "tag name")]
    TagName,
}

impl LocateStrategy {
    /// Wire name of the strategy
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CssSelector => "css selector",
            Self::XPath => "xpath",
            Self::LinkText => "link text",
            Self::PartialLinkText => "partial link text",
            Self::TagName => "tag name",
        }
    }

    /// Parse a wire name back into a strategy
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "css selector" => Some(Self::CssSelector),
            "xpath" => Some(Self::XPath),
            "link text" => Some(Self::LinkText),
            "partial link text" => Some(Self::PartialLinkText),
            "tag name" => Some(Self::TagName),
            _ => None,
        }
    }
}

impl fmt::Display for LocateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy + selector pair identifying DOM nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: LocateStrategy,
    selector: String,
}

impl Locator {
    /// Create a locator from a strategy and selector
    #[must_use]
    pub fn new(strategy: LocateStrategy, selector: impl Into<String>) -> Self {
        Self {
            strategy,
            selector: selector.into(),
        }
    }

    /// Create a CSS selector locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(LocateStrategy::CssSelector, selector)
    }

    /// Create an XPath locator
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::new(LocateStrategy::XPath, selector)
    }

    /// Create a link text locator
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::new(LocateStrategy::LinkText, text)
    }

    /// Create a tag name locator
    #[must_use]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::new(LocateStrategy::TagName, tag)
    }

    /// Locator for an element carrying a `data-qa-id` attribute
    #[must_use]
    pub fn qa_id(id: &str) -> Self {
        Self::css(format!("[data-qa-id=\"{id}\"]"))
    }

    /// Get the strategy
    #[must_use]
    pub const fn strategy(&self) -> LocateStrategy {
        self.strategy
    }

    /// Get the selector string
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Derive a locator scoped under this one.
    ///
    /// CSS parents join with a descendant combinator and XPath parents are
    /// concatenated, so an XPath suffix should start with `/` or `//`. A tag
    /// name parent is scoped as CSS. Link text parents have no CSS form and
    /// are rewritten as an XPath anchor match, so their suffix must be XPath.
    #[must_use]
    pub fn child(&self, suffix: &str) -> Self {
        match self.strategy {
            LocateStrategy::CssSelector | LocateStrategy::TagName => {
                Self::css(format!("{} {suffix}", self.selector))
            }
            LocateStrategy::XPath => Self::xpath(format!("{}{suffix}", self.selector)),
            LocateStrategy::LinkText => Self::xpath(format!(
                "//a[normalize-space(.)={}]{suffix}",
                xpath_literal(&self.selector)
            )),
            LocateStrategy::PartialLinkText => Self::xpath(format!(
                "//a[contains(normalize-space(.), {})]{suffix}",
                xpath_literal(&self.selector)
            )),
        }
    }

    /// Script arguments `[strategy, selector]` for client-side locate helpers
    #[must_use]
    pub fn script_args(&self) -> Vec<serde_json::Value> {
        vec![
            serde_json::Value::from(self.strategy.as_str()),
            serde_json::Value::from(self.selector.as_str()),
        ]
    }

    /// Rebuild a locator from `[strategy, selector]` script arguments
    #[must_use]
    pub fn from_script_args(args: &[serde_json::Value]) -> Option<Self> {
        let strategy = LocateStrategy::from_wire(args.first()?.as_str()?)?;
        let selector = args.get(1)?.as_str()?;
        Some(Self::new(strategy, selector))
    }
}

/// Quote `text` as an XPath string literal
fn xpath_literal(text: &str) -> String {
    if !text.contains('"') {
        format!("\"{text}\"")
    } else if !text.contains('\'') {
        format!("'{text}'")
    } else {
        let parts: Vec<String> = text.split('"').map(|p| format!("\"{p}\"")).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.strategy, self.selector)
    }
}
