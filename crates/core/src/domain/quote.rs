use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::{Product, ProductId};

/// Raised when a CLI flag or stored value does not match a known enum label.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unsupported value `{value}` (expected {expected})")]
pub struct EnumParseError {
    pub value: String,
    pub expected: &'static str,
}

fn parse_error(value: &str, expected: &'static str) -> EnumParseError {
    EnumParseError { value: value.to_string(), expected }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[default]
    #[serde(rename = "India")]
    India,
    #[serde(rename = "United States")]
    UnitedStates,
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    #[serde(rename = "Canada")]
    Canada,
    #[serde(rename = "Australia")]
    Australia,
    #[serde(rename = "Other")]
    Other,
}

impl Country {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::India => "India",
            Self::UnitedStates => "United States",
            Self::UnitedKingdom => "United Kingdom",
            Self::Canada => "Canada",
            Self::Australia => "Australia",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Country {
    type Err = EnumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "india" => Ok(Self::India),
            "united states" | "us" | "usa" => Ok(Self::UnitedStates),
            "united kingdom" | "uk" => Ok(Self::UnitedKingdom),
            "canada" => Ok(Self::Canada),
            "australia" => Ok(Self::Australia),
            "other" => Ok(Self::Other),
            other => Err(parse_error(
                other,
                "india|united states|united kingdom|canada|australia|other",
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Residential,
    Commercial,
    Hospitality,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Hospitality => "hospitality",
        }
    }
}

impl std::str::FromStr for ProjectType {
    type Err = EnumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "residential" => Ok(Self::Residential),
            "commercial" => Ok(Self::Commercial),
            "hospitality" => Ok(Self::Hospitality),
            other => Err(parse_error(other, "residential|commercial|hospitality")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "immediate")]
    Immediate,
    #[default]
    #[serde(rename = "1-3 months")]
    OneToThreeMonths,
    #[serde(rename = "3-6 months")]
    ThreeToSixMonths,
    #[serde(rename = "6+ months")]
    SixPlusMonths,
}

impl Timeline {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::OneToThreeMonths => "1-3 months",
            Self::ThreeToSixMonths => "3-6 months",
            Self::SixPlusMonths => "6+ months",
        }
    }
}

impl std::str::FromStr for Timeline {
    type Err = EnumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "immediate" | "asap" => Ok(Self::Immediate),
            "1-3 months" | "1-3" => Ok(Self::OneToThreeMonths),
            "3-6 months" | "3-6" => Ok(Self::ThreeToSixMonths),
            "6+ months" | "6+" => Ok(Self::SixPlusMonths),
            other => Err(parse_error(other, "immediate|1-3 months|3-6 months|6+ months")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "under-10k")]
    Under10k,
    #[serde(rename = "10k-25k")]
    From10kTo25k,
    #[default]
    #[serde(rename = "25k-50k")]
    From25kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "100k+")]
    Above100k,
}

impl Budget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Under10k => "under-10k",
            Self::From10kTo25k => "10k-25k",
            Self::From25kTo50k => "25k-50k",
            Self::From50kTo100k => "50k-100k",
            Self::Above100k => "100k+",
        }
    }
}

impl std::str::FromStr for Budget {
    type Err = EnumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "under-10k" => Ok(Self::Under10k),
            "10k-25k" => Ok(Self::From10kTo25k),
            "25k-50k" => Ok(Self::From25kTo50k),
            "50k-100k" => Ok(Self::From50kTo100k),
            "100k+" => Ok(Self::Above100k),
            other => Err(parse_error(other, "under-10k|10k-25k|25k-50k|50k-100k|100k+")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
    Both,
}

impl ContactMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Both => "both",
        }
    }
}

impl std::str::FromStr for ContactMethod {
    type Err = EnumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "both" => Ok(Self::Both),
            other => Err(parse_error(other, "email|phone|both")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: Country,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub address: Address,
}

/// One product line in a quote request. Seeded from the catalog at wizard
/// start and never mutated by the wizard itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customizations: Option<String>,
}

impl QuoteItem {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: quantity.max(1),
            selected_color: None,
            customizations: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub project_type: ProjectType,
    pub timeline: Timeline,
    pub budget: Budget,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

/// The accumulated, not-yet-submitted quote request. Every field is
/// initialized with an empty string or a default enum value at creation, so
/// no read site has to deal with optional-until-initialized state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub customer_info: CustomerInfo,
    pub items: Vec<QuoteItem>,
    pub project_details: ProjectDetails,
    pub preferred_contact_method: ContactMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_time: Option<String>,
}

/// Country-code prefix pre-filled into the phone field.
pub const PHONE_PREFIX: &str = "+91 ";

impl QuoteDraft {
    pub fn seeded(items: Vec<QuoteItem>) -> Self {
        Self {
            customer_info: CustomerInfo {
                name: String::new(),
                email: String::new(),
                phone: PHONE_PREFIX.to_string(),
                company: None,
                address: Address {
                    street: String::new(),
                    city: String::new(),
                    state: String::new(),
                    zip_code: String::new(),
                    country: Country::default(),
                },
            },
            items,
            project_details: ProjectDetails {
                project_type: ProjectType::default(),
                timeline: Timeline::default(),
                budget: Budget::default(),
                description: String::new(),
                special_requirements: None,
            },
            preferred_contact_method: ContactMethod::default(),
            preferred_contact_time: None,
        }
    }
}

impl Default for QuoteDraft {
    fn default() -> Self {
        Self::seeded(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::{Budget, ContactMethod, Country, ProjectType, QuoteDraft, QuoteItem, Timeline};
    use crate::domain::product::ProductId;

    #[test]
    fn draft_serializes_to_the_remote_wire_shape() {
        let mut draft = QuoteDraft::seeded(vec![QuoteItem {
            product_id: ProductId("68a4394d100acaf3e3e653eb".to_string()),
            product_name: "Teak Side Table".to_string(),
            quantity: 2,
            selected_color: Some("walnut".to_string()),
            customizations: None,
        }]);
        draft.customer_info.name = "Asha Rao".to_string();
        draft.customer_info.address.zip_code = "560001".to_string();

        let value = serde_json::to_value(&draft).expect("draft serializes");

        assert_eq!(value["customerInfo"]["name"], "Asha Rao");
        assert_eq!(value["customerInfo"]["phone"], "+91 ");
        assert_eq!(value["customerInfo"]["address"]["zipCode"], "560001");
        assert_eq!(value["customerInfo"]["address"]["country"], "India");
        assert_eq!(value["items"][0]["productId"], "68a4394d100acaf3e3e653eb");
        assert_eq!(value["items"][0]["selectedColor"], "walnut");
        assert_eq!(value["projectDetails"]["projectType"], "residential");
        assert_eq!(value["projectDetails"]["timeline"], "1-3 months");
        assert_eq!(value["projectDetails"]["budget"], "25k-50k");
        assert_eq!(value["preferredContactMethod"], "email");

        // None-valued optionals stay off the wire entirely.
        assert!(value["customerInfo"].get("company").is_none());
        assert!(value["items"][0].get("customizations").is_none());
        assert!(value.get("preferredContactTime").is_none());
    }

    #[test]
    fn enum_labels_round_trip_through_from_str() {
        assert_eq!("hospitality".parse::<ProjectType>(), Ok(ProjectType::Hospitality));
        assert_eq!("6+ months".parse::<Timeline>(), Ok(Timeline::SixPlusMonths));
        assert_eq!("100k+".parse::<Budget>(), Ok(Budget::Above100k));
        assert_eq!("both".parse::<ContactMethod>(), Ok(ContactMethod::Both));
        assert_eq!("united kingdom".parse::<Country>(), Ok(Country::UnitedKingdom));
        assert!("weekly".parse::<Timeline>().is_err());
    }
}
