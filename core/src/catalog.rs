//! Static catalogs: office profiles and automation levels.
//!
//! Both catalogs are compiled in and never mutated at runtime.
//! Lookups are by profile id string and by multiplier value.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Multipliers closer than this are treated as the same automation level.
const MULTIPLIER_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProfileId {
    Massificado,
    FullService,
    Boutique,
    Convencional,
}

impl ProfileId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileId::Massificado  => "massificado",
            ProfileId::FullService  => "fullservice",
            ProfileId::Boutique     => "boutique",
            ProfileId::Convencional => "convencional",
        }
    }
}

impl FromStr for ProfileId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "massificado"  => Ok(ProfileId::Massificado),
            "fullservice"  => Ok(ProfileId::FullService),
            "boutique"     => Ok(ProfileId::Boutique),
            "convencional" => Ok(ProfileId::Convencional),
            other          => Err(format!("unknown office profile: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OfficeProfile {
    pub id:           ProfileId,
    pub display_name: &'static str,
    /// Cases one professional can sustainably handle per month.
    pub capacity:     u32,
    /// Monthly salary floor for one professional.
    pub salary_floor: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AutomationLevel {
    /// Fraction of lost hours automation fails to remove. 1.0 = no automation.
    pub multiplier:   f64,
    pub display_name: &'static str,
}

static PROFILES: [OfficeProfile; 4] = [
    OfficeProfile {
        id:           ProfileId::Massificado,
        display_name: "Massificado",
        capacity:     600,
        salary_floor: 3500.0,
    },
    OfficeProfile {
        id:           ProfileId::FullService,
        display_name: "Full Service",
        capacity:     250,
        salary_floor: 6000.0,
    },
    OfficeProfile {
        id:           ProfileId::Boutique,
        display_name: "Boutique",
        capacity:     120,
        salary_floor: 10000.0,
    },
    OfficeProfile {
        id:           ProfileId::Convencional,
        display_name: "Convencional",
        capacity:     200,
        salary_floor: 5000.0,
    },
];

static AUTOMATION_LEVELS: [AutomationLevel; 4] = [
    AutomationLevel { multiplier: 1.0,  display_name: "None" },
    AutomationLevel { multiplier: 0.85, display_name: "Spreadsheet" },
    AutomationLevel { multiplier: 0.6,  display_name: "In-house system" },
    AutomationLevel { multiplier: 0.5,  display_name: "Legal ERP" },
];

static BUILTIN: Catalog = Catalog {
    profiles:          &PROFILES,
    automation_levels: &AUTOMATION_LEVELS,
};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Catalog {
    pub profiles:          &'static [OfficeProfile],
    pub automation_levels: &'static [AutomationLevel],
}

impl Catalog {
    /// The compiled-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Look up a profile by its id string. Unknown ids yield None.
    pub fn profile(&self, key: &str) -> Option<&OfficeProfile> {
        let id = key.parse::<ProfileId>().ok()?;
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn automation_level(&self, multiplier: f64) -> Option<&AutomationLevel> {
        self.automation_levels
            .iter()
            .find(|a| (a.multiplier - multiplier).abs() < MULTIPLIER_EPSILON)
    }
}
