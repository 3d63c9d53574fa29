//! Career goal values and their display labels.
//!
//! The workspace database and the chat announcements each keep their own
//! label table. They share the enum but not the wording, and must stay
//! independent: the tracker labels feed a select property whose options
//! already exist upstream.

use std::fmt;

/// Label used by both tables when the stored value is not recognized.
pub const UNDECIDED_LABEL: &str = "Undecided";

/// A member's primary career goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareerGoal {
    AiConsultant,
    AiStartup,
    AiEngineer,
    DataScientist,
    ProductManager,
    Other,
}

impl CareerGoal {
    /// Every known goal, in form order.
    pub const ALL: [CareerGoal; 6] = [
        CareerGoal::AiConsultant,
        CareerGoal::AiStartup,
        CareerGoal::AiEngineer,
        CareerGoal::DataScientist,
        CareerGoal::ProductManager,
        CareerGoal::Other,
    ];

    /// Parse the stored form value (e.g. `ai-engineer`).
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "ai-consultant" => Some(Self::AiConsultant),
            "ai-startup" => Some(Self::AiStartup),
            "ai-engineer" => Some(Self::AiEngineer),
            "data-scientist" => Some(Self::DataScientist),
            "product-manager" => Some(Self::ProductManager),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// The value stored in the content store.
    pub fn as_value(self) -> &'static str {
        match self {
            Self::AiConsultant => "ai-consultant",
            Self::AiStartup => "ai-startup",
            Self::AiEngineer => "ai-engineer",
            Self::DataScientist => "data-scientist",
            Self::ProductManager => "product-manager",
            Self::Other => "other",
        }
    }

    /// Select option name in the workspace database.
    pub fn tracker_label(self) -> &'static str {
        match self {
            Self::AiConsultant => "AI Consultant",
            Self::AiStartup => "AI Startup Founder",
            Self::AiEngineer => "AI Software Engineer",
            Self::DataScientist => "Data Scientist",
            Self::ProductManager => "Product Manager",
            Self::Other => "Other",
        }
    }

    /// Label shown in chat announcements.
    pub fn announcement_label(self) -> &'static str {
        match self {
            Self::AiConsultant => "🧠 AI Consultant",
            Self::AiStartup => "🚀 AI Startup Founder",
            Self::AiEngineer => "💻 AI Software Engineer",
            Self::DataScientist => "📊 Data Scientist",
            Self::ProductManager => "🎯 Product Manager",
            Self::Other => "❓ Other/Undecided",
        }
    }
}

impl fmt::Display for CareerGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

/// Workspace-database label for a raw stored value.
pub fn tracker_label(value: Option<&str>) -> &'static str {
    value
        .and_then(CareerGoal::from_value)
        .map(CareerGoal::tracker_label)
        .unwrap_or(UNDECIDED_LABEL)
}

/// Announcement label for a raw stored value.
pub fn announcement_label(value: Option<&str>) -> &'static str {
    value
        .and_then(CareerGoal::from_value)
        .map(CareerGoal::announcement_label)
        .unwrap_or(UNDECIDED_LABEL)
}
