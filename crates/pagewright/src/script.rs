//! Client-side scripts executed against a located node.
//!
//! Each script is a function body in WebDriver `execute` form: it receives
//! `arguments[0]` = strategy wire name and `arguments[1]` = selector (see
//! [`Locator::script_args`](crate::Locator::script_args)), resolves the first
//! matching node in the page, and returns `true` once applied.

/// Resolves `(strategy, selector)` to the first matching node or `null`
const LOCATE_PRELUDE: &str = r"
var strategy = arguments[0];
var selector = arguments[1];
var element = null;
if (strategy === 'xpath') {
  element = document.evaluate(selector, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
} else if (strategy === 'tag name') {
  element = document.getElementsByTagName(selector)[0] || null;
} else if (strategy === 'link text') {
  element = Array.from(document.querySelectorAll('a')).find(function (a) { return a.textContent.trim() === selector; }) || null;
} else if (strategy === 'partial link text') {
  element = Array.from(document.querySelectorAll('a')).find(function (a) { return a.textContent.indexOf(selector) !== -1; }) || null;
} else {
  element = document.querySelector(selector);
}
if (element === null) { return false; }
";

/// Scripts the components inject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementScript {
    /// Scroll the node to the vertical center of the viewport
    ScrollIntoView,
    /// Invoke the DOM `click()` method
    ForceClick,
    /// Set `style.display = 'none'`
    Hide,
    /// Remove the inline `display` rule
    Show,
}

impl ElementScript {
    /// All scripts
    pub const ALL: [Self; 4] = [Self::ScrollIntoView, Self::ForceClick, Self::Hide, Self::Show];

    const fn action(&self) -> &'static str {
        match self {
            Self::ScrollIntoView => "element.scrollIntoView({ block: 'center' });",
            Self::ForceClick => "element.click();",
            Self::Hide => "element.style.display = 'none';",
            Self::Show => "element.style.removeProperty('display');",
        }
    }

    /// Full script body
    #[must_use]
    pub fn source(&self) -> String {
        format!("{LOCATE_PRELUDE}{}\nreturn true;", self.action())
    }

    /// Identify which script a body was rendered from
    #[must_use]
    pub fn identify(source: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.source() == source)
    }
}
