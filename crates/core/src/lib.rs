pub mod config;
pub mod domain;
pub mod errors;
pub mod gateway;
pub mod wizard;

pub use domain::product::{Category, CategoryId, Dimensions, Product, ProductId};
pub use domain::quote::{
    Address, Budget, ContactMethod, Country, CustomerInfo, ProjectDetails, ProjectType, QuoteDraft,
    QuoteItem, Timeline,
};
pub use errors::ApplicationError;
pub use gateway::{QuoteReceipt, SubmissionError, SubmissionGateway};
pub use wizard::{Field, QuoteWizard, SubmissionStatus, SubmitOutcome, WizardError, WizardStep};
