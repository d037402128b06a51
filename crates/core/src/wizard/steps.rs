use serde::{Deserialize, Serialize};

/// The five wizard steps, in order. Steps 1-3 carry required fields; the
/// preferences and review steps are always passable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Contact,
    Address,
    Project,
    Preferences,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] =
        [Self::Contact, Self::Address, Self::Project, Self::Preferences, Self::Review];
    pub const FIRST: WizardStep = Self::Contact;
    pub const FINAL: WizardStep = Self::Review;

    /// 1-based position, matching the step indicator shown to users.
    pub fn number(self) -> u8 {
        match self {
            Self::Contact => 1,
            Self::Address => 2,
            Self::Project => 3,
            Self::Preferences => 4,
            Self::Review => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Contact => "Contact Info",
            Self::Address => "Address",
            Self::Project => "Project Details",
            Self::Preferences => "Preferences",
            Self::Review => "Review",
        }
    }

    /// Fields that must validate before leaving this step.
    pub fn required_fields(self) -> &'static [Field] {
        match self {
            Self::Contact => &[Field::Name, Field::Email, Field::Phone],
            Self::Address => &[Field::Street, Field::City, Field::State, Field::ZipCode],
            Self::Project => &[Field::Description],
            Self::Preferences | Self::Review => &[],
        }
    }
}

/// Editable text fields of the draft. Enum-typed answers (country, project
/// type, timeline, budget, contact method) always hold a valid default and
/// go through dedicated setters instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    Street,
    City,
    State,
    ZipCode,
    Description,
    SpecialRequirements,
    PreferredContactTime,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip_code",
            Self::Description => "description",
            Self::SpecialRequirements => "special_requirements",
            Self::PreferredContactTime => "preferred_contact_time",
        }
    }

    /// Human-readable label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
            Self::Company => "Company",
            Self::Street => "Street address",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "ZIP code",
            Self::Description => "Project description",
            Self::SpecialRequirements => "Special requirements",
            Self::PreferredContactTime => "Preferred contact time",
        }
    }
}
