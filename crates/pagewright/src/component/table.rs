//! Data tables with `data-qa-id` row and cell conventions.
//!
//! With prefix `p`, row `r` is `tr[data-qa-id="p-row-r"]`, cell `c` of a row
//! is `td[data-qa-id="p-c"]` and a row's edit button is
//! `button[data-qa-id="p-edit"]`.

use super::{Component, ElementHandle, Waitable};
use crate::driver::Session;
use crate::locator::Locator;
use crate::result::{PageError, PageResult};

/// Suffix stripped from a table's `data-qa-id` to obtain the row prefix
pub const TABLE_ID_SUFFIX: &str = "-table";

#[derive(Debug, Clone)]
enum RowPrefix {
    Explicit(String),
    FromQaId,
}

/// A data table
#[derive(Debug, Clone)]
pub struct Table {
    element: ElementHandle,
    prefix: RowPrefix,
}

impl Table {
    /// Table whose row prefix is read from its `data-qa-id` minus `-table`
    #[must_use]
    pub fn new(session: &Session, locator: Locator) -> Self {
        Self {
            element: ElementHandle::new(session, locator),
            prefix: RowPrefix::FromQaId,
        }
    }

    /// Table with an explicit row prefix
    #[must_use]
    pub fn with_prefix(session: &Session, locator: Locator, prefix: impl Into<String>) -> Self {
        Self {
            element: ElementHandle::new(session, locator),
            prefix: RowPrefix::Explicit(prefix.into()),
        }
    }

    /// The row prefix in effect
    pub async fn prefix(&self) -> PageResult<String> {
        match &self.prefix {
            RowPrefix::Explicit(prefix) => Ok(prefix.clone()),
            RowPrefix::FromQaId => {
                let qa_id = self.element.attribute("data-qa-id").await?.ok_or_else(|| {
                    PageError::assertion(format!(
                        "{} has no data-qa-id to derive a row prefix from",
                        self.element.locator()
                    ))
                })?;
                Ok(qa_id
                    .strip_suffix(TABLE_ID_SUFFIX)
                    .unwrap_or(&qa_id)
                    .to_string())
            }
        }
    }

    async fn row(&self, row_id: &str) -> PageResult<(String, ElementHandle)> {
        let prefix = self.prefix().await?;
        let row = self
            .element
            .child(&format!("tr[data-qa-id=\"{prefix}-row-{row_id}\"]"));
        Ok((prefix, row))
    }

    /// Wait for the row, bring it into view, then check each cell contains
    /// its expected text. Cells are `(column, expected)` pairs.
    pub async fn verify_row_is_present<K, V>(&self, row_id: &str, cells: &[(K, V)]) -> PageResult<()>
    where
        K: AsRef<str> + Sync,
        V: AsRef<str> + Sync,
    {
        let (prefix, row) = self.row(row_id).await?;
        let _ = row.wait_present().await?;
        row.scroll_into_view().await?;
        let _ = row.wait_visible().await?;
        for (column, expected) in cells {
            let cell = row.child(&format!("td[data-qa-id=\"{prefix}-{}\"]", column.as_ref()));
            cell.verify_text_contains(expected.as_ref()).await?;
        }
        Ok(())
    }

    pub async fn verify_row_is_not_present(&self, row_id: &str) -> PageResult<()> {
        let (_, row) = self.row(row_id).await?;
        let _ = row.wait_absent().await?;
        Ok(())
    }

    /// Wait for a row whose `data-<key>` attributes match every pair
    pub async fn verify_record<K, V>(&self, attributes: &[(K, V)]) -> PageResult<()>
    where
        K: AsRef<str> + Sync,
        V: AsRef<str> + Sync,
    {
        let filter: String = attributes
            .iter()
            .map(|(k, v)| format!("[data-{}=\"{}\"]", k.as_ref(), v.as_ref()))
            .collect();
        let row = self.element.child(&format!("tr{filter}"));
        let _ = row.wait_present().await?;
        let _ = row.wait_visible().await?;
        Ok(())
    }

    pub async fn edit_row(&self, row_id: &str) -> PageResult<()> {
        let (prefix, row) = self.row(row_id).await?;
        row.child(&format!("button[data-qa-id=\"{prefix}-edit\"]"))
            .click()
            .await
    }

    pub async fn expand_row(&self, row_id: &str) -> PageResult<()> {
        let (_, row) = self.row(row_id).await?;
        row.child("button[aria-label=\"expand row\"]").click().await
    }

    pub async fn verify_expand_row_is_not_present(&self, row_id: &str) -> PageResult<()> {
        let (_, row) = self.row(row_id).await?;
        let _ = row
            .child("button[aria-label=\"expand row\"]")
            .wait_absent()
            .await?;
        Ok(())
    }
}

impl Component for Table {
    fn element(&self) -> &ElementHandle {
        &self.element
    }
}

impl Waitable for Table {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Globals;
    use crate::mock::{MockDriver, MockElement};
    use std::sync::Arc;

    const TABLE: &str = "table[data-qa-id=\"therapy-table\"]";

    fn table_driver() -> Arc<MockDriver> {
        Arc::new(MockDriver::new().with_element(
            Locator::css(TABLE),
            MockElement::new().with_attribute("data-qa-id", "therapy-table"),
        ))
    }

    fn session(driver: Arc<MockDriver>) -> Session {
        Session::new(driver, Globals::new().with_timeout(1_000).with_poll_interval(100))
    }

    #[tokio::test]
    async fn test_prefix_derived_from_qa_id() {
        let table = Table::new(&session(table_driver()), Locator::css(TABLE));
        assert_eq!(table.prefix().await.unwrap(), "therapy");
    }

    #[tokio::test]
    async fn test_explicit_prefix_skips_lookup() {
        let driver = table_driver();
        let table = Table::with_prefix(&session(driver.clone()), Locator::css(TABLE), "rx");
        assert_eq!(table.prefix().await.unwrap(), "rx");
        assert!(driver.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_record() {
        let driver = table_driver();
        driver.add_element(
            Locator::css(format!("{TABLE} tr[data-ndc=\"123\"][data-status=\"Active\"]")),
            MockElement::new(),
        );
        let table = Table::new(&session(driver), Locator::css(TABLE));
        table
            .verify_record(&[("ndc", "123"), ("status", "Active")])
            .await
            .unwrap();
        assert!(table.verify_record(&[("ndc", "999")]).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_and_expand_row() {
        let driver = table_driver();
        let row = format!("{TABLE} tr[data-qa-id=\"therapy-row-7\"]");
        let edit = Locator::css(format!("{row} button[data-qa-id=\"therapy-edit\"]"));
        let expand = Locator::css(format!("{row} button[aria-label=\"expand row\"]"));
        driver.add_element(edit.clone(), MockElement::new());
        driver.add_element(expand.clone(), MockElement::new().conceals(expand.clone()));
        let table = Table::new(&session(driver.clone()), Locator::css(TABLE));

        table.edit_row("7").await.unwrap();
        table.expand_row("7").await.unwrap();
        table.verify_expand_row_is_not_present("7").await.unwrap();
        assert_eq!(driver.clicks_on(&edit), 1);
        assert_eq!(driver.clicks_on(&expand), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_row_is_not_present() {
        let table = Table::new(&session(table_driver()), Locator::css(TABLE));
        table.verify_row_is_not_present("1").await.unwrap();
    }
}
