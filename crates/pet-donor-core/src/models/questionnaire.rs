//! Eligibility questionnaire answers.
//!
//! A response is a common block of answers shared by every species plus a
//! species-tagged payload. Boolean answers are phrased so that `true` is the
//! donor-friendly answer.

use serde::{Deserialize, Serialize};

use super::species::Species;

/// A complete questionnaire submission. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionnaireResponse {
    pub base: BaseAnswers,
    pub species: SpeciesAnswers,
}

impl QuestionnaireResponse {
    /// Ideal answers for the given species.
    pub fn all_clear(species: Species) -> Self {
        Self {
            base: BaseAnswers::all_clear(),
            species: SpeciesAnswers::all_clear(species),
        }
    }
}

/// Answers asked of every animal regardless of species.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseAnswers {
    /// Owner reports the animal in good physical health
    pub in_good_health: bool,
    /// No chronic conditions (kidney, cardiac, endocrine, ...)
    pub no_chronic_conditions: bool,
    /// No illness within the last 30 days
    pub no_recent_illness: bool,
    pub friendly_temperament: bool,
    pub comfortable_with_restraint: bool,
    pub current_on_vaccinations: bool,
    /// Only routine preventatives (flea/tick, heartworm); nothing else
    pub only_routine_medications: bool,
    /// Has never received a blood transfusion
    pub no_prior_transfusions: bool,
    /// Free-text travel history, informational only
    #[serde(default)]
    pub recent_travel: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BaseAnswers {
    pub fn all_clear() -> Self {
        Self {
            in_good_health: true,
            no_chronic_conditions: true,
            no_recent_illness: true,
            friendly_temperament: true,
            comfortable_with_restraint: true,
            current_on_vaccinations: true,
            only_routine_medications: true,
            no_prior_transfusions: true,
            recent_travel: None,
            notes: None,
        }
    }
}

/// Species-specific section of the questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeciesAnswers {
    Dog(DogAnswers),
    Cat(CatAnswers),
    Horse(HorseAnswers),
    /// Species without a dedicated section (rabbits, ferrets, livestock, camelids)
    General,
}

impl SpeciesAnswers {
    pub fn all_clear(species: Species) -> Self {
        match species {
            Species::Dog => SpeciesAnswers::Dog(DogAnswers::all_clear()),
            Species::Cat => SpeciesAnswers::Cat(CatAnswers::all_clear()),
            Species::Horse => SpeciesAnswers::Horse(HorseAnswers::all_clear()),
            _ => SpeciesAnswers::General,
        }
    }

    /// Whether this section is the one collected for `species`.
    pub fn matches(&self, species: Species) -> bool {
        match self {
            SpeciesAnswers::Dog(_) => species == Species::Dog,
            SpeciesAnswers::Cat(_) => species == Species::Cat,
            SpeciesAnswers::Horse(_) => species == Species::Horse,
            SpeciesAnswers::General => {
                !matches!(species, Species::Dog | Species::Cat | Species::Horse)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeciesAnswers::Dog(_) => "dog",
            SpeciesAnswers::Cat(_) => "cat",
            SpeciesAnswers::Horse(_) => "horse",
            SpeciesAnswers::General => "general",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DogAnswers {
    pub spayed_or_neutered: bool,
    pub heartworm_test_negative: bool,
    pub tick_borne_test_negative: bool,
    pub diet: DogDiet,
    pub activity_level: ActivityLevel,
}

impl DogAnswers {
    pub fn all_clear() -> Self {
        Self {
            spayed_or_neutered: true,
            heartworm_test_negative: true,
            tick_borne_test_negative: true,
            diet: DogDiet::Commercial,
            activity_level: ActivityLevel::Moderate,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DogDiet {
    Commercial,
    Homemade,
    /// Raw feeding; pathogen exposure needs a vet to sign off
    Raw,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatAnswers {
    pub spayed_or_neutered: bool,
    pub indoor_only: bool,
    pub felv_fiv_test_negative: bool,
    pub handling_sensitivity: HandlingSensitivity,
}

impl CatAnswers {
    pub fn all_clear() -> Self {
        Self {
            spayed_or_neutered: true,
            indoor_only: true,
            felv_fiv_test_negative: true,
            handling_sensitivity: HandlingSensitivity::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandlingSensitivity {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HorseAnswers {
    pub reproductive_status: ReproductiveStatus,
    /// Negative Coggins (equine infectious anemia) test
    pub coggins_test_negative: bool,
    /// Owner can trailer the horse to the collection site
    pub transport_available: bool,
    pub no_performance_medications: bool,
}

impl HorseAnswers {
    pub fn all_clear() -> Self {
        Self {
            reproductive_status: ReproductiveStatus::Gelding,
            coggins_test_negative: true,
            transport_available: true,
            no_performance_medications: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReproductiveStatus {
    Gelding,
    Stallion,
    MaidenMare,
    PregnantMare,
    /// Mare that has carried a foal to term
    FoaledMare,
}
