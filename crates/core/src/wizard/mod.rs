pub mod controller;
pub mod rules;
pub mod steps;

pub use controller::{QuoteWizard, SubmissionStatus, SubmitOutcome, WizardError};
pub use steps::{Field, WizardStep};
