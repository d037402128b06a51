use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::quote::{
    Budget, ContactMethod, Country, ProjectType, QuoteDraft, QuoteItem, Timeline,
};
use crate::gateway::{QuoteReceipt, SubmissionError, SubmissionGateway};
use crate::wizard::rules;
use crate::wizard::steps::{Field, WizardStep};

/// Submission lifecycle of one wizard session. `Submitted` is terminal and
/// is the only state carrying a quote identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionStatus {
    Editing,
    Submitting,
    Submitted { quote_id: String },
    Failed { message: String },
}

impl SubmissionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}

/// Result of one `submit` call. Misuse (wrong step, terminal state) is a
/// `WizardError` instead; this enum only describes legitimate attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { receipt: QuoteReceipt },
    ValidationFailed { redirected_to: WizardStep },
    Failed { error: SubmissionError },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("quote request was already submitted (id {quote_id})")]
    AlreadySubmitted { quote_id: String },
    #[error("submission is only available from the review step (currently at {step:?})")]
    NotAtReviewStep { step: WizardStep },
}

/// Owns the draft and all wizard state. The controller is the sole mutator
/// of the current step and the error map; navigation forward is gated on
/// the active step's validation, navigation backward never validates.
#[derive(Clone, Debug)]
pub struct QuoteWizard {
    draft: QuoteDraft,
    step: WizardStep,
    errors: BTreeMap<Field, String>,
    submission: SubmissionStatus,
}

impl QuoteWizard {
    /// Opens a fresh wizard session, seeded with zero or more items from
    /// the product-selection context.
    pub fn new(items: Vec<QuoteItem>) -> Self {
        Self {
            draft: QuoteDraft::seeded(items),
            step: WizardStep::FIRST,
            errors: BTreeMap::new(),
            submission: SubmissionStatus::Editing,
        }
    }

    pub fn draft(&self) -> &QuoteDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    pub fn quote_id(&self) -> Option<&str> {
        match &self.submission {
            SubmissionStatus::Submitted { quote_id } => Some(quote_id),
            _ => None,
        }
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        match &self.submission {
            SubmissionStatus::Submitted { quote_id } => {
                Err(WizardError::AlreadySubmitted { quote_id: quote_id.clone() })
            }
            _ => Ok(()),
        }
    }

    /// Writes a text field and optimistically clears its stale error. No
    /// re-validation happens until the next gating transition.
    pub fn update_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let value = value.into();
        let customer = &mut self.draft.customer_info;
        match field {
            Field::Name => customer.name = value,
            Field::Email => customer.email = value,
            Field::Phone => customer.phone = value,
            Field::Company => customer.company = optional(value),
            Field::Street => customer.address.street = value,
            Field::City => customer.address.city = value,
            Field::State => customer.address.state = value,
            Field::ZipCode => customer.address.zip_code = value,
            Field::Description => self.draft.project_details.description = value,
            Field::SpecialRequirements => {
                self.draft.project_details.special_requirements = optional(value);
            }
            Field::PreferredContactTime => self.draft.preferred_contact_time = optional(value),
        }
        self.errors.remove(&field);
        Ok(())
    }

    pub fn set_country(&mut self, country: Country) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.customer_info.address.country = country;
        Ok(())
    }

    pub fn set_project_type(&mut self, project_type: ProjectType) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.project_details.project_type = project_type;
        Ok(())
    }

    pub fn set_timeline(&mut self, timeline: Timeline) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.project_details.timeline = timeline;
        Ok(())
    }

    pub fn set_budget(&mut self, budget: Budget) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.project_details.budget = budget;
        Ok(())
    }

    pub fn set_contact_method(&mut self, method: ContactMethod) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.preferred_contact_method = method;
        Ok(())
    }

    /// Re-validates the active step. On success moves forward (a no-op at
    /// the review step) and returns true; on failure fills the error map
    /// with one message per failing field and stays put.
    pub fn advance(&mut self) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        let failures = rules::validate_step(&self.draft, self.step);
        for field in self.step.required_fields() {
            self.errors.remove(field);
        }
        if failures.is_empty() {
            if let Some(next) = self.step.next() {
                self.step = next;
            }
            Ok(true)
        } else {
            self.errors.extend(failures);
            Ok(false)
        }
    }

    /// Moves back one step, floored at the first. Never validates and never
    /// touches the error map; a no-op once submitted.
    pub fn retreat(&mut self) {
        if self.submission.is_terminal() {
            return;
        }
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    /// Final gate: re-validates steps 1-3 in full. On any failure, jumps to
    /// the earliest failing step without touching the network; otherwise
    /// delegates the draft to the gateway for a single bounded attempt.
    /// A failed attempt leaves the draft unchanged and may be retried.
    pub async fn submit(
        &mut self,
        gateway: &dyn SubmissionGateway,
    ) -> Result<SubmitOutcome, WizardError> {
        self.ensure_editable()?;
        if self.step != WizardStep::FINAL {
            return Err(WizardError::NotAtReviewStep { step: self.step });
        }

        let mut combined = BTreeMap::new();
        let mut redirect = None;
        for step in [WizardStep::Contact, WizardStep::Address, WizardStep::Project] {
            let failures = rules::validate_step(&self.draft, step);
            if !failures.is_empty() && redirect.is_none() {
                redirect = Some(step);
            }
            combined.extend(failures);
        }
        if let Some(step) = redirect {
            self.errors = combined;
            self.step = step;
            return Ok(SubmitOutcome::ValidationFailed { redirected_to: step });
        }

        self.errors.clear();
        self.submission = SubmissionStatus::Submitting;
        match gateway.submit_quote(&self.draft).await {
            Ok(receipt) => {
                self.submission =
                    SubmissionStatus::Submitted { quote_id: receipt.quote_id.clone() };
                Ok(SubmitOutcome::Submitted { receipt })
            }
            Err(error) => {
                self.submission =
                    SubmissionStatus::Failed { message: error.user_message().to_string() };
                Ok(SubmitOutcome::Failed { error })
            }
        }
    }
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::{QuoteWizard, SubmissionStatus, SubmitOutcome, WizardError};
    use crate::domain::product::ProductId;
    use crate::domain::quote::QuoteItem;
    use crate::gateway::{QuoteReceipt, SubmissionError, SubmissionGateway};
    use crate::wizard::steps::{Field, WizardStep};

    struct FixedGateway {
        response: Result<QuoteReceipt, SubmissionError>,
    }

    #[async_trait]
    impl SubmissionGateway for FixedGateway {
        async fn submit_quote(
            &self,
            _draft: &crate::domain::quote::QuoteDraft,
        ) -> Result<QuoteReceipt, SubmissionError> {
            self.response.clone()
        }
    }

    fn accepting_gateway() -> FixedGateway {
        FixedGateway {
            response: Ok(QuoteReceipt {
                quote_id: "Q-123".to_string(),
                estimated_response: "24-48 hours".to_string(),
            }),
        }
    }

    fn seed_item() -> QuoteItem {
        QuoteItem {
            product_id: ProductId("prod-1".to_string()),
            product_name: "Cane Armchair".to_string(),
            quantity: 1,
            selected_color: None,
            customizations: None,
        }
    }

    fn fill_contact(wizard: &mut QuoteWizard) {
        wizard.update_field(Field::Name, "Asha Rao").expect("editable");
        wizard.update_field(Field::Email, "asha@example.com").expect("editable");
        wizard.update_field(Field::Phone, "+91 9876543210").expect("editable");
    }

    fn fill_address(wizard: &mut QuoteWizard) {
        wizard.update_field(Field::Street, "14 MG Road").expect("editable");
        wizard.update_field(Field::City, "Bengaluru").expect("editable");
        wizard.update_field(Field::State, "Karnataka").expect("editable");
        wizard.update_field(Field::ZipCode, "560001").expect("editable");
    }

    fn wizard_at_review() -> QuoteWizard {
        let mut wizard = QuoteWizard::new(vec![seed_item()]);
        fill_contact(&mut wizard);
        assert!(wizard.advance().expect("advance contact"));
        fill_address(&mut wizard);
        assert!(wizard.advance().expect("advance address"));
        wizard.update_field(Field::Description, "Three-seater sofa in teak").expect("editable");
        assert!(wizard.advance().expect("advance project"));
        assert!(wizard.advance().expect("advance preferences"));
        assert_eq!(wizard.step(), WizardStep::Review);
        wizard
    }

    #[test]
    fn advance_reports_one_error_per_failing_field() {
        let mut wizard = QuoteWizard::new(Vec::new());
        let advanced = wizard.advance().expect("not terminal");

        assert!(!advanced);
        assert_eq!(wizard.step(), WizardStep::Contact);
        assert_eq!(wizard.errors().len(), 3);
    }

    #[test]
    fn advance_moves_on_when_the_step_validates() {
        let mut wizard = QuoteWizard::new(Vec::new());
        fill_contact(&mut wizard);

        assert!(wizard.advance().expect("not terminal"));
        assert_eq!(wizard.step(), WizardStep::Address);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn update_field_is_idempotent() {
        let mut first = QuoteWizard::new(Vec::new());
        first.update_field(Field::Name, "Asha Rao").expect("editable");

        let mut second = QuoteWizard::new(Vec::new());
        second.update_field(Field::Name, "Asha Rao").expect("editable");
        second.update_field(Field::Name, "Asha Rao").expect("editable");

        assert_eq!(first.draft(), second.draft());
    }

    #[test]
    fn editing_a_field_clears_only_its_own_error() {
        let mut wizard = QuoteWizard::new(Vec::new());
        assert!(!wizard.advance().expect("not terminal"));
        assert!(wizard.errors().contains_key(&Field::Name));

        wizard.update_field(Field::Name, "Asha Rao").expect("editable");

        assert!(!wizard.errors().contains_key(&Field::Name));
        assert!(wizard.errors().contains_key(&Field::Email));
    }

    #[test]
    fn retreat_never_validates() {
        let mut wizard = QuoteWizard::new(Vec::new());
        fill_contact(&mut wizard);
        assert!(wizard.advance().expect("advance contact"));
        fill_address(&mut wizard);
        assert!(wizard.advance().expect("advance address"));
        assert_eq!(wizard.step(), WizardStep::Project);

        // Description is still empty, yet stepping back is always allowed.
        wizard.retreat();
        assert_eq!(wizard.step(), WizardStep::Address);
        assert!(wizard.errors().is_empty());

        wizard.retreat();
        wizard.retreat();
        wizard.retreat();
        assert_eq!(wizard.step(), WizardStep::Contact);
    }

    #[tokio::test]
    async fn submit_requires_the_review_step() {
        let mut wizard = QuoteWizard::new(Vec::new());
        let error = wizard.submit(&accepting_gateway()).await.expect_err("not at review");
        assert_eq!(error, WizardError::NotAtReviewStep { step: WizardStep::Contact });
    }

    #[tokio::test]
    async fn submit_redirects_to_the_earliest_failing_step() {
        let mut wizard = wizard_at_review();
        wizard.update_field(Field::Email, "broken@address").expect("editable");
        wizard.update_field(Field::Description, "  ").expect("editable");

        let outcome = wizard.submit(&accepting_gateway()).await.expect("legitimate attempt");

        assert_eq!(
            outcome,
            SubmitOutcome::ValidationFailed { redirected_to: WizardStep::Contact }
        );
        assert_eq!(wizard.step(), WizardStep::Contact);
        assert!(wizard.errors().contains_key(&Field::Email));
        assert!(wizard.errors().contains_key(&Field::Description));
        assert_eq!(wizard.submission(), &SubmissionStatus::Editing);
    }

    #[tokio::test]
    async fn successful_submission_is_terminal() {
        let mut wizard = wizard_at_review();

        let outcome = wizard.submit(&accepting_gateway()).await.expect("legitimate attempt");

        match outcome {
            SubmitOutcome::Submitted { receipt } => assert_eq!(receipt.quote_id, "Q-123"),
            other => panic!("expected submission, got {other:?}"),
        }
        assert_eq!(wizard.quote_id(), Some("Q-123"));

        // Terminal state rejects edits, navigation, and repeat submissions.
        let error = wizard.update_field(Field::Name, "X").expect_err("terminal");
        assert!(matches!(error, WizardError::AlreadySubmitted { ref quote_id } if quote_id == "Q-123"));
        assert!(wizard.advance().is_err());
        assert!(wizard.submit(&accepting_gateway()).await.is_err());
        wizard.retreat();
        assert_eq!(wizard.step(), WizardStep::Review);
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_draft_and_allows_retry() {
        let mut wizard = wizard_at_review();
        let draft_before = wizard.draft().clone();
        let failing = FixedGateway { response: Err(SubmissionError::Timeout { limit_secs: 15 }) };

        let outcome = wizard.submit(&failing).await.expect("legitimate attempt");

        assert!(matches!(outcome, SubmitOutcome::Failed { error: SubmissionError::Timeout { .. } }));
        match wizard.submission() {
            SubmissionStatus::Failed { message } => {
                assert!(message.contains("did not respond in time"));
            }
            other => panic!("expected failed status, got {other:?}"),
        }
        assert_eq!(wizard.step(), WizardStep::Review);
        assert_eq!(wizard.draft(), &draft_before);

        // No retry cap: the very next attempt can succeed.
        let outcome = wizard.submit(&accepting_gateway()).await.expect("retry allowed");
        assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
        assert_eq!(wizard.quote_id(), Some("Q-123"));
    }

    #[tokio::test]
    async fn seeded_items_travel_untouched_to_the_gateway() {
        let wizard = QuoteWizard::new(vec![seed_item(), seed_item()]);
        assert_eq!(wizard.draft().items.len(), 2);
        assert_eq!(wizard.draft().items[0].product_name, "Cane Armchair");
    }
}
