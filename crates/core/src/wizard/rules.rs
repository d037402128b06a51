//! Pure validation predicates and the per-step rule table.
//!
//! The error map is always recomputed from scratch at each gating
//! transition; the controller's per-edit clearing is a UI affordance only.

use std::collections::BTreeMap;

use crate::domain::quote::QuoteDraft;
use crate::wizard::steps::{Field, WizardStep};

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Accepts `local@domain.tld`: no whitespace or extra `@` in either part,
/// and a dot in the domain with at least one character on each side.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let clean =
        |part: &str| !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '@');
    if !clean(local) || !clean(domain) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Accepts digits, spaces, parentheses, hyphens, periods, slashes, and an
/// optional leading `+`, with at least 10 digits overall.
pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    let body = value.strip_prefix('+').unwrap_or(value);
    let allowed =
        |c: char| c.is_ascii_digit() || matches!(c, ' ' | '(' | ')' | '-' | '.' | '/');
    if body.chars().any(|c| !allowed(c)) {
        return false;
    }
    body.chars().filter(char::is_ascii_digit).count() >= 10
}

/// Current value of an editable text field, with `None` reading as empty.
pub fn field_value(draft: &QuoteDraft, field: Field) -> &str {
    let customer = &draft.customer_info;
    match field {
        Field::Name => &customer.name,
        Field::Email => &customer.email,
        Field::Phone => &customer.phone,
        Field::Company => customer.company.as_deref().unwrap_or(""),
        Field::Street => &customer.address.street,
        Field::City => &customer.address.city,
        Field::State => &customer.address.state,
        Field::ZipCode => &customer.address.zip_code,
        Field::Description => &draft.project_details.description,
        Field::SpecialRequirements => {
            draft.project_details.special_requirements.as_deref().unwrap_or("")
        }
        Field::PreferredContactTime => draft.preferred_contact_time.as_deref().unwrap_or(""),
    }
}

fn check_field(draft: &QuoteDraft, field: Field) -> Option<String> {
    let value = field_value(draft, field);
    if !is_present(value) {
        return Some(format!("{} is required", field.label()));
    }
    match field {
        Field::Email if !is_valid_email(value) => {
            Some("Enter a valid email address".to_string())
        }
        Field::Phone if !is_valid_phone(value) => {
            Some("Enter a valid phone number".to_string())
        }
        _ => None,
    }
}

/// Runs every rule for the step's required fields and returns one message
/// per failing field. An empty map means the step gate is open.
pub fn validate_step(draft: &QuoteDraft, step: WizardStep) -> BTreeMap<Field, String> {
    step.required_fields()
        .iter()
        .filter_map(|&field| check_field(draft, field).map(|message| (field, message)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{is_present, is_valid_email, is_valid_phone, validate_step};
    use crate::domain::quote::QuoteDraft;
    use crate::wizard::steps::{Field, WizardStep};

    #[test]
    fn presence_ignores_surrounding_whitespace() {
        assert!(!is_present(""));
        assert!(!is_present("   \t"));
        assert!(is_present(" x "));
    }

    #[test]
    fn email_needs_a_dotted_domain() {
        assert!(!is_valid_email("a@b"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b@c.d"));
        assert!(is_valid_email("asha.rao@example.co.in"));
    }

    #[test]
    fn phone_needs_ten_digits_and_a_dial_friendly_alphabet() {
        assert!(!is_valid_phone("123-456"));
        assert!(is_valid_phone("+91 9876543210"));
        assert!(is_valid_phone("(080) 2345-6789 / 10"));
        assert!(!is_valid_phone("98765x43210"));
        assert!(!is_valid_phone("9876+543210"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn blank_draft_fails_every_contact_field() {
        let draft = QuoteDraft::default();
        let errors = validate_step(&draft, WizardStep::Contact);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors[&Field::Name], "Name is required");
        assert_eq!(errors[&Field::Email], "Email is required");
        // The seeded "+91 " prefix trims to a present-but-invalid phone.
        assert_eq!(errors[&Field::Phone], "Enter a valid phone number");
    }

    #[test]
    fn format_check_runs_only_after_presence() {
        let mut draft = QuoteDraft::default();
        draft.customer_info.name = "Asha Rao".to_string();
        draft.customer_info.email = "asha@example".to_string();
        draft.customer_info.phone = "+91 9876543210".to_string();

        let errors = validate_step(&draft, WizardStep::Contact);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&Field::Email], "Enter a valid email address");
    }

    #[test]
    fn preference_steps_never_gate() {
        let draft = QuoteDraft::default();
        assert!(validate_step(&draft, WizardStep::Preferences).is_empty());
        assert!(validate_step(&draft, WizardStep::Review).is_empty());
    }
}
