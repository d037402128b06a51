//! Drives the five-step quote wizard from command-line flags: seed items
//! from catalog slugs, fill the draft, gate through each step, submit once.

use atelier_client::{CatalogClient, QuoteGateway};
use atelier_core::domain::quote::{
    Budget, ContactMethod, Country, ProjectType, QuoteItem, Timeline,
};
use atelier_core::errors::ApplicationError;
use atelier_core::wizard::{Field, QuoteWizard, SubmitOutcome, WizardStep};
use clap::Args;
use serde_json::{json, Map, Value};
use tracing::info;

use super::CommandResult;

#[derive(Debug, Default, Args)]
pub struct QuoteArgs {
    #[arg(long = "product", required = true, help = "Product slug; repeat for multiple items")]
    pub products: Vec<String>,
    #[arg(long, default_value_t = 1, help = "Quantity applied to every item")]
    pub quantity: u32,

    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip_code: Option<String>,
    #[arg(long, help = "india|united states|united kingdom|canada|australia|other")]
    pub country: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, help = "residential|commercial|hospitality")]
    pub project_type: Option<String>,
    #[arg(long, help = "immediate|1-3 months|3-6 months|6+ months")]
    pub timeline: Option<String>,
    #[arg(long, help = "under-10k|10k-25k|25k-50k|50k-100k|100k+")]
    pub budget: Option<String>,
    #[arg(long)]
    pub special_requirements: Option<String>,

    #[arg(long, help = "email|phone|both")]
    pub contact_method: Option<String>,
    #[arg(long)]
    pub contact_time: Option<String>,
}

/// Copies every provided flag into the draft. Enum flags fail fast with the
/// offending label; text fields are applied verbatim.
pub fn apply_args(wizard: &mut QuoteWizard, args: &QuoteArgs) -> Result<(), String> {
    let text_fields = [
        (Field::Name, &args.name),
        (Field::Email, &args.email),
        (Field::Phone, &args.phone),
        (Field::Company, &args.company),
        (Field::Street, &args.street),
        (Field::City, &args.city),
        (Field::State, &args.state),
        (Field::ZipCode, &args.zip_code),
        (Field::Description, &args.description),
        (Field::SpecialRequirements, &args.special_requirements),
        (Field::PreferredContactTime, &args.contact_time),
    ];
    for (field, value) in text_fields {
        if let Some(value) = value {
            wizard.update_field(field, value.clone()).map_err(|error| error.to_string())?;
        }
    }

    if let Some(raw) = &args.country {
        let country: Country = raw.parse().map_err(|error| format!("--country: {error}"))?;
        wizard.set_country(country).map_err(|error| error.to_string())?;
    }
    if let Some(raw) = &args.project_type {
        let project_type: ProjectType =
            raw.parse().map_err(|error| format!("--project-type: {error}"))?;
        wizard.set_project_type(project_type).map_err(|error| error.to_string())?;
    }
    if let Some(raw) = &args.timeline {
        let timeline: Timeline = raw.parse().map_err(|error| format!("--timeline: {error}"))?;
        wizard.set_timeline(timeline).map_err(|error| error.to_string())?;
    }
    if let Some(raw) = &args.budget {
        let budget: Budget = raw.parse().map_err(|error| format!("--budget: {error}"))?;
        wizard.set_budget(budget).map_err(|error| error.to_string())?;
    }
    if let Some(raw) = &args.contact_method {
        let method: ContactMethod =
            raw.parse().map_err(|error| format!("--contact-method: {error}"))?;
        wizard.set_contact_method(method).map_err(|error| error.to_string())?;
    }

    Ok(())
}

fn error_payload(wizard: &QuoteWizard) -> Value {
    let mut fields = Map::new();
    for (field, message) in wizard.errors() {
        fields.insert(field.key().to_string(), Value::String(message.clone()));
    }
    json!({
        "step": wizard.step().number(),
        "step_title": wizard.step().title(),
        "errors": Value::Object(fields),
    })
}

/// Walks the wizard forward to the review step, reporting the first step
/// whose gate stays closed.
pub fn drive_to_review(wizard: &mut QuoteWizard) -> Result<(), String> {
    while wizard.step() != WizardStep::Review {
        let advanced = wizard.advance().map_err(|error| error.to_string())?;
        if !advanced {
            return Err(format!(
                "step {} ({}) has validation errors",
                wizard.step().number(),
                wizard.step().title()
            ));
        }
    }
    Ok(())
}

pub async fn run(
    catalog: &CatalogClient,
    gateway: &QuoteGateway,
    args: QuoteArgs,
) -> CommandResult {
    let mut items = Vec::with_capacity(args.products.len());
    for slug in &args.products {
        match catalog.product_by_slug(slug).await {
            Ok(Some(product)) => items.push(QuoteItem::from_product(&product, args.quantity)),
            Ok(None) => {
                return CommandResult::failure(
                    "quote",
                    "not_found",
                    format!("no product with slug `{slug}`"),
                    1,
                )
            }
            Err(error) => {
                return CommandResult::failure("quote", "catalog", error.to_string(), 4)
            }
        }
    }

    let mut wizard = QuoteWizard::new(items);
    if let Err(message) = apply_args(&mut wizard, &args) {
        return CommandResult::failure("quote", "invalid_argument", message, 2);
    }

    if let Err(message) = drive_to_review(&mut wizard) {
        return CommandResult::failure_with_data(
            "quote",
            "validation",
            message,
            3,
            Some(error_payload(&wizard)),
        );
    }

    match wizard.submit(gateway).await {
        Ok(SubmitOutcome::Submitted { receipt }) => {
            info!(quote_id = %receipt.quote_id, "quote request submitted");
            CommandResult::success_with_data(
                "quote",
                format!("quote request accepted (id {})", receipt.quote_id),
                Some(json!({
                    "quote_id": receipt.quote_id,
                    "estimated_response": receipt.estimated_response,
                })),
            )
        }
        Ok(SubmitOutcome::ValidationFailed { redirected_to }) => CommandResult::failure_with_data(
            "quote",
            "validation",
            format!(
                "step {} ({}) has validation errors",
                redirected_to.number(),
                redirected_to.title()
            ),
            3,
            Some(error_payload(&wizard)),
        ),
        Ok(SubmitOutcome::Failed { error }) => {
            let user_message = error.user_message();
            let app_error = ApplicationError::from(error);
            CommandResult::failure(
                "quote",
                app_error.error_class(),
                format!("{user_message} ({app_error})"),
                app_error.exit_code(),
            )
        }
        Err(error) => {
            let app_error = ApplicationError::from(error);
            CommandResult::failure(
                "quote",
                app_error.error_class(),
                app_error.to_string(),
                app_error.exit_code(),
            )
        }
    }
}
