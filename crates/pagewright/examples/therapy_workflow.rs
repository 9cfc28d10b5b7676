//! Example: Therapy Workflow
//!
//! Demonstrates: driving the therapy card widgets against the in-memory
//! driver, then reading back the recorded driver calls
//!
//! Run with: `cargo run --example therapy_workflow`
//! Set `RUST_LOG=pagewright=debug` to see each wait and click.

use pagewright::logging::init_default_tracing;
use pagewright::mock::{MockDriver, MockElement};
use pagewright::prelude::*;
use std::sync::Arc;

const NDC: &str = "69413033010";

fn seed_page(driver: &MockDriver, card: &TherapyCard) {
    let table = Locator::qa_id("therapies-table");
    let row = table.child(&format!("tr[data-qa-id=\"therapies-row-{NDC}\"]"));
    driver.add_element(
        table,
        MockElement::new().with_attribute("data-qa-id", "therapies-table"),
    );
    driver.add_element(row.clone(), MockElement::new());
    driver.add_element(
        row.child("td[data-qa-id=\"therapies-name\"]"),
        MockElement::new().with_text("Daraprim PO 25 MG"),
    );
    driver.add_element(
        row.child("td[data-qa-id=\"therapies-status\"]"),
        MockElement::new().with_text("Active"),
    );

    driver.add_element(card.locator().clone(), MockElement::new());
    driver.add_element(
        card.expand_button.locator().clone(),
        MockElement::new()
            .toggles_class(card.locator().clone(), "Mui-expanded")
            .reveals(card.new_task_button.locator().clone()),
    );

    let enrollment = &card.service_enrollment;
    driver.add_element(enrollment.edit_button.locator().clone(), MockElement::new());
    driver.add_element(enrollment.save_button.locator().clone(), MockElement::new());
    driver.add_element(enrollment.dispensing.opt_in.locator().clone(), MockElement::new());
    driver.add_element(
        enrollment.dispensing.dispensing_pharmacy.locator().clone(),
        MockElement::new(),
    );
    driver.add_element(Locator::qa_id("option-Acme Specialty"), MockElement::new());
    driver.add_element(
        enrollment.dispensing.per_protocol.locator().clone(),
        MockElement::new().checkable(false),
    );
    driver.add_element(
        enrollment.dispensing.days_supply.locator().clone(),
        MockElement::new(),
    );
}

#[tokio::main]
async fn main() -> PageResult<()> {
    init_default_tracing()?;
    println!("=== Therapy Workflow Example ===\n");

    let driver = Arc::new(MockDriver::new());
    let globals = Globals::default()
        .with_timeout(2_000)
        .with_launch_url("https://portal.test");
    let session = Session::new(driver.clone(), globals);
    let card = TherapyCard::new(&session, NDC);
    seed_page(&driver, &card);

    // 1. Find the therapy in the patient's table
    println!("1. Verifying therapy row...");
    let table = Table::new(&session, Locator::qa_id("therapies-table"));
    table
        .verify_row_is_present(NDC, &[("name", "Daraprim PO 25 MG"), ("status", "Active")])
        .await?;
    println!("   Row {NDC} is present");

    // 2. Expand the card
    println!("\n2. Expanding therapy card...");
    card.expand_card().await?;
    println!("   Card state: {:?}", card.state().await?);

    // 3. Opt in to dispensing
    println!("\n3. Opting in to dispensing...");
    let enrollment = &card.service_enrollment;
    enrollment.edit().await?;
    let opt_in = DispensingOptIn::new("Acme Specialty")
        .with_per_protocol(true)
        .with_days_supply("30");
    enrollment.dispensing.select_opt_in(&opt_in).await?;
    enrollment.save().await?;
    println!(
        "   Days supply: {}",
        enrollment.dispensing.days_supply.value().await?
    );

    // 4. Summarize what the driver saw
    println!("\n4. Driver summary...");
    println!("   {} calls, {} actions", driver.history().len(), driver.actions().len());

    println!("\n=== Example Complete ===");
    Ok(())
}
