//! Page objects.
//!
//! [`BasePage`] carries the browser-level actions every page shares
//! (navigation, window and cookie control, tab switching). Concrete pages
//! compose it and implement [`PageObject`] so a step can ask whether the
//! browser is currently on them.
//!
//! ```ignore
//! struct HomePage {
//!     base: BasePage,
//! }
//!
//! impl PageObject for HomePage {
//!     fn base(&self) -> &BasePage {
//!         &self.base
//!     }
//!
//!     fn url_pattern(&self) -> &str {
//!         "/patients/:id"
//!     }
//! }
//! ```

use crate::component::{ElementHandle, TextInput};
use crate::driver::{Cookie, Key, Session, Size};
use crate::locator::Locator;
use crate::result::{PageError, PageResult};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Length of [`BasePage::generate_random_number`] output
pub const DEFAULT_RANDOM_NUMBER_LENGTH: usize = 10;

/// Selectors shared by every page
#[derive(Debug, Clone)]
pub struct BaseSelectors {
    /// Header search field
    pub search: TextInput,
}

impl BaseSelectors {
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            search: TextInput::css(session, "input#headerSearch"),
        }
    }
}

/// Browser-level actions shared by all pages
#[derive(Debug, Clone)]
pub struct BasePage {
    session: Session,
    path: String,
    pub selectors: BaseSelectors,
}

impl BasePage {
    /// A page served at `path` below the configured launch url
    #[must_use]
    pub fn new(session: &Session, path: impl Into<String>) -> Self {
        Self {
            session: session.clone(),
            path: path.into(),
            selectors: BaseSelectors::new(session),
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute url of this page
    pub fn url(&self) -> PageResult<String> {
        let launch_url = self
            .session
            .globals()
            .launch_url
            .as_deref()
            .ok_or_else(|| PageError::Config {
                message: "launchUrl is not configured".to_string(),
            })?;
        Ok(join_url(launch_url, &self.path))
    }

    /// Go to this page's url
    pub async fn navigate(&self) -> PageResult<()> {
        let url = self.url()?;
        self.navigate_to(&url).await
    }

    pub async fn navigate_to(&self, url: &str) -> PageResult<()> {
        tracing::debug!(url, "navigate");
        self.session.driver().navigate(url).await
    }

    pub async fn refresh(&self) -> PageResult<()> {
        self.session.driver().refresh().await
    }

    pub async fn current_url(&self) -> PageResult<String> {
        self.session.driver().current_url().await
    }

    pub async fn maximize_window(&self) -> PageResult<()> {
        self.session.driver().maximize_window().await
    }

    pub async fn window_size(&self) -> PageResult<Size> {
        self.session.driver().window_size().await
    }

    pub async fn resize_window(&self, width: u32, height: u32) -> PageResult<()> {
        self.session.driver().resize_window(width, height).await
    }

    pub async fn delete_cookies(&self) -> PageResult<()> {
        self.session.driver().delete_cookies().await
    }

    pub async fn set_cookie(&self, name: &str, value: &str) -> PageResult<()> {
        self.session
            .driver()
            .set_cookie(Cookie::new(name, value))
            .await
    }

    pub async fn press_escape(&self) -> PageResult<()> {
        self.session.driver().keys(&[Key::Escape]).await
    }

    /// Open a tab and, when `switch` is set, move to it
    pub async fn open_new_tab(&self, switch: bool) -> PageResult<()> {
        self.session.driver().open_new_window().await?;
        if switch {
            self.switch_to_tab(1).await?;
        }
        Ok(())
    }

    /// Switch to the `index`-th tab in creation order, starting at 0
    pub async fn switch_to_tab(&self, index: usize) -> PageResult<()> {
        let driver = self.session.driver();
        let handles = driver.window_handles().await?;
        let handle = handles.get(index).ok_or_else(|| PageError::Driver {
            message: format!("no tab {index}, {} open", handles.len()),
        })?;
        driver.switch_window(handle).await
    }

    /// Number of nodes matching an XPath expression
    pub async fn count_matching(&self, xpath: &str) -> PageResult<usize> {
        self.session
            .driver()
            .element_count(&Locator::xpath(xpath))
            .await
    }

    /// Click every node matching an XPath expression, in document order
    pub async fn click_each_matching(&self, xpath: &str) -> PageResult<usize> {
        let count = self.count_matching(xpath).await?;
        for index in 1..=count {
            ElementHandle::xpath(&self.session, format!("({xpath})[{index}]"))
                .click()
                .await?;
        }
        Ok(count)
    }

    pub async fn pause(&self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    /// Random decimal digits of length `len`
    #[must_use]
    pub fn generate_random_number(&self, len: usize) -> String {
        random_digits(&mut rand::thread_rng(), len)
    }
}

/// Random decimal digits drawn from `rng`
pub fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.gen_range(b'0'..=b'9'))).collect()
}

fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Path component of an absolute or relative url, without query or fragment
#[must_use]
pub fn url_path(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = if url.contains("://") {
        without_scheme
            .find('/')
            .map_or("", |start| &without_scheme[start..])
    } else {
        without_scheme
    };
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Trait for page objects representing a page in the UI
#[async_trait]
pub trait PageObject: Send + Sync {
    /// Shared browser actions
    fn base(&self) -> &BasePage;

    /// URL pattern that matches this page (e.g., "/login", "/patients/:id")
    fn url_pattern(&self) -> &str;

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether the browser's current url matches [`Self::url_pattern`]
    async fn is_current(&self) -> PageResult<bool> {
        let url = self.base().current_url().await?;
        let matched = UrlMatcher::new(self.url_pattern()).matches(url_path(&url));
        tracing::debug!(page = self.page_name(), url = %url, matched, "page check");
        Ok(matched)
    }
}

/// Segment-wise url pattern where `*` and `:name` each stand for one segment
#[derive(Debug, Clone, Copy)]
pub struct UrlMatcher<'a> {
    pattern: &'a str,
}

impl<'a> UrlMatcher<'a> {
    #[must_use]
    pub const fn new(pattern: &'a str) -> Self {
        Self { pattern }
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut expected = self.pattern.split('/').filter(|s| !s.is_empty());
        let mut actual = path.split('/').filter(|s| !s.is_empty());
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(want), Some(got)) if want == "*" || want.starts_with(':') || want == got => {}
                _ => return false,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::component::ValueHolder;
    use crate::config::Globals;
    use crate::mock::{DriverCall, MockDriver, MockElement, MAXIMIZED_WINDOW};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn setup(launch_url: Option<&str>) -> (Arc<MockDriver>, BasePage) {
        let driver = Arc::new(MockDriver::new());
        let mut globals = Globals::default();
        globals.launch_url = launch_url.map(str::to_string);
        let session = Session::new(driver.clone(), globals);
        (driver, BasePage::new(&session, "/patients"))
    }

    mod url_matcher_tests {
        use super::*;

        #[test]
        fn test_literal_match() {
            let matcher = UrlMatcher::new("/login");
            assert!(matcher.matches("/login"));
            assert!(!matcher.matches("/logout"));
            assert!(!matcher.matches("/login/extra"));
        }

        #[test]
        fn test_wildcard_match() {
            let matcher = UrlMatcher::new("/patients/*");
            assert!(matcher.matches("/patients/123"));
            assert!(!matcher.matches("/patients"));
            assert!(!matcher.matches("/patients/123/therapies"));
        }

        #[test]
        fn test_parameter_segments() {
            let matcher = UrlMatcher::new("/patients/:patient/therapies/:ndc");
            assert!(matcher.matches("/patients/42/therapies/69413033010"));
            assert!(matcher.matches("patients/42/therapies/69413033010/"));
            assert!(!matcher.matches("/patients/42/tasks/69413033010"));
        }

        #[test]
        fn test_url_path() {
            assert_eq!(url_path("https://app.test/patients/1?tab=2#top"), "/patients/1");
            assert_eq!(url_path("https://app.test"), "");
            assert_eq!(url_path("/login?next=/"), "/login");
        }
    }

    mod navigation_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigate_joins_launch_url() {
            let (driver, page) = setup(Some("https://app.test/"));
            page.navigate().await.unwrap();
            assert_eq!(page.current_url().await.unwrap(), "https://app.test/patients");
            page.refresh().await.unwrap();
            assert_eq!(driver.refresh_count(), 1);
        }

        #[tokio::test]
        async fn test_navigate_without_launch_url() {
            let (driver, page) = setup(None);
            let err = page.navigate().await.unwrap_err();
            assert!(matches!(err, PageError::Config { .. }));
            assert!(driver.history().is_empty());
        }

        #[tokio::test]
        async fn test_is_current() {
            struct PatientPage {
                base: BasePage,
            }

            impl PageObject for PatientPage {
                fn base(&self) -> &BasePage {
                    &self.base
                }

                fn url_pattern(&self) -> &str {
                    "/patients/:id"
                }
            }

            let (driver, base) = setup(Some("https://app.test"));
            let page = PatientPage { base };
            driver.set_url("https://app.test/patients/42?tab=therapies");
            assert!(page.is_current().await.unwrap());
            driver.set_url("https://app.test/tasks");
            assert!(!page.is_current().await.unwrap());
        }
    }

    mod window_tests {
        use super::*;

        #[tokio::test]
        async fn test_window_size_and_resize() {
            let (_driver, page) = setup(None);
            page.maximize_window().await.unwrap();
            assert_eq!(page.window_size().await.unwrap(), MAXIMIZED_WINDOW);
            page.resize_window(800, 600).await.unwrap();
            assert_eq!(page.window_size().await.unwrap(), Size::new(800.0, 600.0));
        }

        #[tokio::test]
        async fn test_cookies() {
            let (driver, page) = setup(None);
            page.set_cookie("session", "a").await.unwrap();
            page.set_cookie("session", "b").await.unwrap();
            assert_eq!(driver.cookie_jar(), vec![Cookie::new("session", "b")]);
            page.delete_cookies().await.unwrap();
            assert!(driver.cookie_jar().is_empty());
        }

        #[tokio::test]
        async fn test_open_new_tab_switches() {
            let (driver, page) = setup(None);
            page.open_new_tab(true).await.unwrap();
            assert_eq!(driver.active_window(), "window-1");
            page.switch_to_tab(0).await.unwrap();
            assert_eq!(driver.active_window(), "window-0");
        }

        #[tokio::test]
        async fn test_open_new_tab_without_switch() {
            let (driver, page) = setup(None);
            page.open_new_tab(false).await.unwrap();
            assert_eq!(driver.active_window(), "window-0");
            assert!(matches!(
                page.switch_to_tab(5).await.unwrap_err(),
                PageError::Driver { .. }
            ));
        }

        #[tokio::test]
        async fn test_press_escape() {
            let (driver, page) = setup(None);
            page.press_escape().await.unwrap();
            assert!(driver.was_called(|c| matches!(c, DriverCall::Keys(k) if k == &[Key::Escape])));
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_sleeps() {
            let (_driver, page) = setup(None);
            let start = tokio::time::Instant::now();
            page.pause(2_000).await;
            assert!(start.elapsed() >= Duration::from_millis(2_000));
        }
    }

    mod element_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_each_matching() {
            let (driver, page) = setup(None);
            let rows = "//tr[@data-selected]";
            driver.set_texts(Locator::xpath(rows), ["a", "b"]);
            for index in 1..=2 {
                driver.add_element(Locator::xpath(format!("({rows})[{index}]")), MockElement::new());
            }
            assert_eq!(page.count_matching(rows).await.unwrap(), 2);
            assert_eq!(page.click_each_matching(rows).await.unwrap(), 2);
            assert_eq!(driver.clicks_on(&Locator::xpath(format!("({rows})[1]"))), 1);
            assert_eq!(driver.clicks_on(&Locator::xpath(format!("({rows})[2]"))), 1);
        }

        #[tokio::test]
        async fn test_header_search() {
            let (driver, page) = setup(None);
            driver.add_element(Locator::css("input#headerSearch"), MockElement::new());
            page.selectors.search.set_value("grills", true).await.unwrap();
            let search = driver.element(&Locator::css("input#headerSearch")).unwrap();
            assert_eq!(search.value, "grills");
            assert_eq!(search.submissions, 1);
        }

        #[test]
        fn test_random_digits() {
            let mut rng = StdRng::seed_from_u64(7);
            let digits = random_digits(&mut rng, DEFAULT_RANDOM_NUMBER_LENGTH);
            assert_eq!(digits.len(), DEFAULT_RANDOM_NUMBER_LENGTH);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));

            let (_driver, page) = setup(None);
            assert_eq!(page.generate_random_number(4).len(), 4);
        }
    }
}
