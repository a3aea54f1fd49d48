use serde::{Deserialize, Serialize};

use super::error::AuditError;

/// Languages the questionnaire content is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    En,
    Es,
}

impl Locale {
    pub const fn ordered() -> [Self; 2] {
        [Self::En, Self::Es]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
        }
    }

    /// Parses a language code such as `en`, `ES` or `en-US`.
    pub fn from_code(raw: &str) -> Result<Self, AuditError> {
        let normalized = raw.trim().to_ascii_lowercase();
        let language = normalized.split(['-', '_']).next().unwrap_or_default();
        match language {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            _ => Err(AuditError::UnsupportedLanguage(raw.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    Leadership,
    EmployeeEmpowerment,
    Communication,
    Recognition,
    Development,
}

impl CategoryKey {
    /// Declaration order; every report and result list follows it.
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Leadership,
            Self::EmployeeEmpowerment,
            Self::Communication,
            Self::Recognition,
            Self::Development,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Leadership => "leadership",
            Self::EmployeeEmpowerment => "employee_empowerment",
            Self::Communication => "communication",
            Self::Recognition => "recognition",
            Self::Development => "development",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Percentage,
    Count,
    Frequency,
}

impl ResponseKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Percentage, Self::Count, Self::Frequency]
    }
}

/// Score attached to each option position, lowest description first.
pub const OPTION_SCORES: [u8; 5] = [0, 25, 50, 75, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::High, Locale::En) => "High",
            (Self::Medium, Locale::En) => "Medium",
            (Self::Low, Locale::En) => "Low",
            (Self::High, Locale::Es) => "Alta",
            (Self::Medium, Locale::Es) => "Media",
            (Self::Low, Locale::Es) => "Baja",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTier {
    Excellent,
    Good,
    NeedsImprovement,
    Critical,
}

impl GradeTier {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Excellent,
            Self::Good,
            Self::NeedsImprovement,
            Self::Critical,
        ]
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Excellent, Locale::En) => "Excellent",
            (Self::Good, Locale::En) => "Good",
            (Self::NeedsImprovement, Locale::En) => "Needs Improvement",
            (Self::Critical, Locale::En) => "Critical",
            (Self::Excellent, Locale::Es) => "Excelente",
            (Self::Good, Locale::Es) => "Bueno",
            (Self::NeedsImprovement, Locale::Es) => "Necesita mejorar",
            (Self::Critical, Locale::Es) => "Crítico",
        }
    }

    /// Stable class name the UI keys its styling on.
    pub const fn severity_class(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsImprovement => "needs-improvement",
            Self::Critical => "critical",
        }
    }
}

/// Color band applied to category rows in the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Red,
    Amber,
    Green,
}

impl Band {
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Red => 0xF8_69_6B,
            Self::Amber => 0xFF_D9_66,
            Self::Green => 0x63_BE_7B,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parsing_tolerates_case_and_region() {
        assert_eq!(Locale::from_code("EN").expect("en parses"), Locale::En);
        assert_eq!(Locale::from_code(" es-MX ").expect("es parses"), Locale::Es);
        assert_eq!(Locale::from_code("en_GB").expect("en parses"), Locale::En);
    }

    #[test]
    fn unknown_locale_is_rejected() {
        match Locale::from_code("fr") {
            Err(AuditError::UnsupportedLanguage(code)) => assert_eq!(code, "fr"),
            other => panic!("expected unsupported language, got {other:?}"),
        }
        assert!(Locale::from_code("").is_err());
    }

    #[test]
    fn category_keys_round_trip_through_serde() {
        for category in CategoryKey::ordered() {
            let encoded = serde_json::to_string(&category).expect("serializes");
            assert_eq!(encoded, format!("\"{}\"", category.key()));
        }
    }
}
