//! Pagewright: page-object components for behavior-driven browser tests
//!
//! Scenario steps talk to composable widgets (inputs, dropdowns, tables,
//! calendars, domain cards) instead of raw selectors. Every widget operation
//! waits, asserts or interacts through one [`Driver`] held by a [`Session`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Step       │    │ Page /     │    │ Driver     │            │
//! │   │ definition │───►│ Component  │───►│ (chromium, │            │
//! │   │            │    │ tree       │    │  mock)     │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```ignore
//! use pagewright::prelude::*;
//!
//! let session = Session::new(driver, Globals::load("globals.yaml")?);
//! let card = TherapyCard::new(&session, "69413033010");
//! card.expand_card().await?;
//! card.administration_status.select_on_therapy("today", None).await?;
//! ```

// Allow large stack arrays/frames in tests (e.g., test data generation)
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod component;
pub mod config;
pub mod driver;
pub mod locator;
pub mod logging;
pub mod mock;
pub mod page;
pub mod result;
pub mod script;
pub mod wait;

/// Chromium backend (requires the `browser` feature)
#[cfg(feature = "browser")]
#[allow(clippy::missing_errors_doc, clippy::significant_drop_tightening)]
pub mod chromium;

pub use component::{
    Calendar, Checkbox, Clickable, Component, Dropdown, ElementHandle, ExpansionState,
    FloatingAction, FloatingActionButtons, FloatingActionMenu, MultiSelectDropdown, OptionFilter,
    PatientSearcher, RadioButton, StatusTransition, Table, TaskCard, TextInput, TherapyCard,
    ValueAttribute, ValueHolder, Waitable,
};
pub use config::Globals;
pub use driver::{Cookie, Driver, Key, Session, Size};
pub use locator::{LocateStrategy, Locator};
pub use page::{BasePage, BaseSelectors, PageObject, UrlMatcher};
pub use result::{PageError, PageResult};
pub use script::ElementScript;
pub use wait::{expect_eventually, poll_until, WaitCondition, WaitOptions, WaitOutcome};

#[cfg(feature = "browser")]
pub use chromium::{ChromiumConfig, ChromiumDriver};

/// Everything a step definition file usually needs
pub mod prelude {
    pub use super::component::therapy_card::{
        AdministrationStatus, ClinicalSupport, Dispensing, DispensingOptIn, ServiceEnrollment,
    };
    pub use super::component::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::locator::*;
    pub use super::page::*;
    pub use super::result::*;
    pub use super::wait::*;

    #[cfg(feature = "browser")]
    pub use super::chromium::*;
}
