//! Target plant and second parent inputs

use std::sync::Arc;

use shared::{validate_submission, ActiveTab, SubmissionError};

use super::search::SearchCoordinator;
use crate::config::SearchConfig;
use crate::external::PlantSearchApi;

/// Identifiers ready to send to a prediction endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub plant_a: String,
    pub plant_b: Option<String>,
}

/// The two autocomplete fields of the calculation form
pub struct PlantInputForm {
    plant_a: SearchCoordinator,
    plant_b: SearchCoordinator,
}

impl PlantInputForm {
    pub fn new(api: Arc<dyn PlantSearchApi>, config: SearchConfig) -> Self {
        Self {
            plant_a: SearchCoordinator::new(Arc::clone(&api), config.clone()),
            plant_b: SearchCoordinator::new(api, config),
        }
    }

    pub fn plant_a(&self) -> &SearchCoordinator {
        &self.plant_a
    }

    pub fn plant_b(&self) -> &SearchCoordinator {
        &self.plant_b
    }

    /// Switching to single mode discards the second parent
    pub fn on_tab_changed(&self, tab: ActiveTab) {
        if tab == ActiveTab::Single {
            self.plant_b.clear();
        }
    }

    /// Validate the visible text and resolve each field to the value sent
    /// for prediction (committed id, else raw text).
    pub fn submission(&self, tab: ActiveTab) -> Result<Submission, SubmissionError> {
        let a = self.plant_a.snapshot();
        let b = self.plant_b.snapshot();
        validate_submission(tab, &a.text, &b.text)?;

        Ok(Submission {
            plant_a: self.plant_a.submission_value(),
            plant_b: match tab {
                ActiveTab::Single => None,
                ActiveTab::Cross => Some(self.plant_b.submission_value()),
            },
        })
    }
}
