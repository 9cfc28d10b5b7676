//! Floating action button with its speed-dial entries.

use super::{Clickable, Component, ElementHandle, Waitable};
use crate::result::PageResult;

/// Entries of the speed dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatingAction {
    NewPatient,
    NewTherapy,
    NewNote,
    PbmInsurance,
    FinancialAssistance,
    Income,
    MedicalInsurance,
}

impl FloatingAction {
    pub const ALL: [Self; 7] = [
        Self::NewPatient,
        Self::NewTherapy,
        Self::NewNote,
        Self::PbmInsurance,
        Self::FinancialAssistance,
        Self::Income,
        Self::MedicalInsurance,
    ];
}

/// Handles the menu opens
#[derive(Debug, Clone)]
pub struct FloatingActionButtons {
    pub new_patient: ElementHandle,
    pub new_therapy: ElementHandle,
    pub new_note: ElementHandle,
    pub pbm_insurance: ElementHandle,
    pub financial_assistance: ElementHandle,
    pub income: ElementHandle,
    pub medical_insurance: ElementHandle,
}

/// Floating trigger plus one button per [`FloatingAction`]
#[derive(Debug, Clone)]
pub struct FloatingActionMenu {
    trigger: ElementHandle,
    buttons: FloatingActionButtons,
}

impl FloatingActionMenu {
    #[must_use]
    pub const fn new(trigger: ElementHandle, buttons: FloatingActionButtons) -> Self {
        Self { trigger, buttons }
    }

    #[must_use]
    pub const fn button(&self, action: FloatingAction) -> &ElementHandle {
        match action {
            FloatingAction::NewPatient => &self.buttons.new_patient,
            FloatingAction::NewTherapy => &self.buttons.new_therapy,
            FloatingAction::NewNote => &self.buttons.new_note,
            FloatingAction::PbmInsurance => &self.buttons.pbm_insurance,
            FloatingAction::FinancialAssistance => &self.buttons.financial_assistance,
            FloatingAction::Income => &self.buttons.income,
            FloatingAction::MedicalInsurance => &self.buttons.medical_insurance,
        }
    }

    /// Open the speed dial and click `action`
    pub async fn open(&self, action: FloatingAction) -> PageResult<()> {
        tracing::debug!(?action, "floating action");
        self.trigger.click().await?;
        self.button(action).click().await
    }

    pub async fn open_new_patient_form(&self) -> PageResult<()> {
        self.open(FloatingAction::NewPatient).await
    }

    pub async fn open_new_therapy_form(&self) -> PageResult<()> {
        self.open(FloatingAction::NewTherapy).await
    }

    pub async fn open_new_note_side_panel(&self) -> PageResult<()> {
        self.open(FloatingAction::NewNote).await
    }

    pub async fn open_add_pbm_insurance(&self) -> PageResult<()> {
        self.open(FloatingAction::PbmInsurance).await
    }

    pub async fn open_add_financial_assistance(&self) -> PageResult<()> {
        self.open(FloatingAction::FinancialAssistance).await
    }

    pub async fn open_add_income(&self) -> PageResult<()> {
        self.open(FloatingAction::Income).await
    }

    pub async fn open_add_medical_insurance(&self) -> PageResult<()> {
        self.open(FloatingAction::MedicalInsurance).await
    }
}

impl Component for FloatingActionMenu {
    fn element(&self) -> &ElementHandle {
        &self.trigger
    }
}

impl Waitable for FloatingActionMenu {}
impl Clickable for FloatingActionMenu {}
