//! Multi-widget scenarios as a step definition file would drive them.

use pagewright::mock::{DriverCall, MockDriver, MockElement};
use pagewright::prelude::*;
use std::io::Write;
use std::sync::Arc;

struct PatientPage {
    base: BasePage,
}

impl PatientPage {
    fn new(session: &Session) -> Self {
        Self {
            base: BasePage::new(session, "/patients"),
        }
    }
}

impl PageObject for PatientPage {
    fn base(&self) -> &BasePage {
        &self.base
    }

    fn url_pattern(&self) -> &str {
        "/patients"
    }
}

fn session_from_yaml(driver: &Arc<MockDriver>, yaml: &str) -> Session {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    let globals = Globals::load(file.path()).unwrap();
    Session::new(driver.clone(), globals)
}

#[tokio::test]
async fn search_from_header_after_navigation() {
    let driver = Arc::new(MockDriver::new());
    let session = session_from_yaml(
        &driver,
        "launchUrl: https://portal.test\nwaitForConditionTimeout: 2000\n",
    );
    let page = PatientPage::new(&session);
    let search = Locator::css("input#headerSearch");
    driver.add_element(search.clone(), MockElement::new());

    page.base.maximize_window().await.unwrap();
    page.base.navigate().await.unwrap();
    assert!(page.is_current().await.unwrap());

    page.base
        .selectors
        .search
        .set_value("Daraprim", true)
        .await
        .unwrap();
    let field = driver.element(&search).unwrap();
    assert_eq!(field.value, "Daraprim");
    assert_eq!(field.submissions, 1);
}

#[tokio::test]
async fn new_patient_from_floating_menu_then_search() {
    let driver = Arc::new(MockDriver::new());
    let session = Session::with_defaults(driver.clone());
    let qa = |id: &str| ElementHandle::new(&session, Locator::qa_id(id));

    let trigger = qa("floating-action-button");
    let buttons = FloatingActionButtons {
        new_patient: qa("fab-new-patient"),
        new_therapy: qa("fab-new-therapy"),
        new_note: qa("fab-new-note"),
        pbm_insurance: qa("fab-pbm-insurance"),
        financial_assistance: qa("fab-financial-assistance"),
        income: qa("fab-income"),
        medical_insurance: qa("fab-medical-insurance"),
    };
    driver.add_element(
        trigger.locator().clone(),
        MockElement::new().reveals(buttons.new_patient.locator().clone()),
    );
    let menu = FloatingActionMenu::new(trigger.clone(), buttons);

    let searcher_button = qa("patient-search-button");
    let searcher_input = TextInput::new(&session, Locator::qa_id("patient-search-input"));
    driver.add_element(
        searcher_button.locator().clone(),
        MockElement::new().reveals(searcher_input.locator().clone()),
    );
    let searcher = PatientSearcher::new(searcher_button, searcher_input.clone());

    menu.open_new_patient_form().await.unwrap();
    searcher.search_patient("Jane Roe").await.unwrap();

    assert_eq!(driver.clicks_on(trigger.locator()), 1);
    assert_eq!(searcher_input.value().await.unwrap(), "Jane Roe");
}

#[tokio::test]
async fn therapy_card_goes_on_therapy_today() {
    let driver = Arc::new(MockDriver::new());
    let session = Session::with_defaults(driver.clone());
    let card = TherapyCard::new(&session, "69413033010");
    let admin = &card.administration_status;

    driver.add_element(card.locator().clone(), MockElement::new());
    driver.add_element(
        card.expand_button.locator().clone(),
        MockElement::new()
            .toggles_class(card.locator().clone(), "Mui-expanded")
            .reveals(card.new_task_button.locator().clone()),
    );
    driver.add_element(admin.edit_button.locator().clone(), MockElement::new());
    driver.add_element(admin.save_button.locator().clone(), MockElement::new());
    driver.add_element(admin.status.locator().clone(), MockElement::new());
    driver.add_element(Locator::qa_id("option-On Therapy"), MockElement::new());
    driver.add_element(admin.date.locator().clone(), MockElement::new());

    card.expand_card().await.unwrap();
    admin.edit().await.unwrap();
    admin.select_on_therapy("today", None).await.unwrap();
    admin.save().await.unwrap();

    assert!(card.state().await.unwrap().is_open());
    let date = driver.element(admin.date.locator()).unwrap();
    // the picker accepts its default on Enter
    assert_eq!(date.submissions, 1);
    assert_eq!(driver.clicks_on(admin.save_button.locator()), 1);
}

#[tokio::test]
async fn task_card_overflow_status_change() {
    let driver = Arc::new(MockDriver::new());
    let session = Session::with_defaults(Arc::clone(&driver) as Arc<dyn Driver>);
    let task = TaskCard::new(&session, "triage");
    let list = Locator::css("div[role=\"presentation\"] div[style*=\"transform: none\"]");

    driver.add_element(
        Locator::qa_id("status-more-button"),
        MockElement::new().reveals(list),
    );
    driver.add_element(Locator::qa_id("option-Completed"), MockElement::new());

    tokio::time::pause();
    let transition = task.move_to_status("Completed").await.unwrap();

    assert_eq!(transition, StatusTransition::Overflow);
    assert_eq!(driver.clicks_on(&Locator::qa_id("option-Completed")), 1);
}

#[tokio::test]
async fn intake_form_multi_select_and_radio() {
    let driver = Arc::new(MockDriver::new());
    let session = Session::with_defaults(driver.clone());
    let diagnoses = MultiSelectDropdown::css(&session, "#diagnosis-select input");
    let gender = RadioButton::new(&session, Locator::css("[role=\"radiogroup\"]"));

    driver.add_element(diagnoses.locator().clone(), MockElement::new());
    for value in ["Toxoplasmosis", "Malaria"] {
        driver.add_element(
            diagnoses.option_checkbox(value).locator().clone(),
            MockElement::new().checkable(false),
        );
    }
    let female = gender.option("Female", ValueAttribute::AriaLabel);
    driver.add_element(female.locator().clone(), MockElement::new());

    diagnoses
        .multi_select(&["Toxoplasmosis", "Malaria"])
        .await
        .unwrap();
    gender
        .select_option("Female", ValueAttribute::AriaLabel)
        .await
        .unwrap();

    for value in ["Toxoplasmosis", "Malaria"] {
        assert!(driver
            .element(diagnoses.option_checkbox(value).locator())
            .unwrap()
            .is_checked());
    }
    assert_eq!(driver.clicks_on(female.locator()), 1);
    assert!(matches!(
        driver.history().last(),
        Some(DriverCall::Click(locator)) if locator == female.locator()
    ));
}
