//! Service enrollment section: dispensing plus clinical support.

use super::{ClinicalSupport, Dispensing};
use crate::component::ElementHandle;
use crate::result::PageResult;

#[derive(Debug, Clone)]
pub struct ServiceEnrollment {
    pub edit_button: ElementHandle,
    pub save_button: ElementHandle,
    pub dispensing: Dispensing,
    pub clinical_support: ClinicalSupport,
}

impl ServiceEnrollment {
    #[must_use]
    pub fn new(card: &ElementHandle) -> Self {
        Self {
            edit_button: card.child("button[name=\"edit_service_button\"]"),
            save_button: card.child("button[name=\"edit_enrollment_submit_button\"]"),
            dispensing: Dispensing::new(card),
            clinical_support: ClinicalSupport::new(card),
        }
    }

    pub async fn edit(&self) -> PageResult<()> {
        self.edit_button.click().await
    }

    pub async fn save(&self) -> PageResult<()> {
        self.save_button.click().await
    }
}
