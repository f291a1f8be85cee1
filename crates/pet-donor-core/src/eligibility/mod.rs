//! Donor eligibility evaluation.
//!
//! Pipeline: Common checks → Species checks → Status → Review date
//!
//! Evaluation is a pure function of the pet profile, the questionnaire and
//! the submission instant. Only record creation (the id) is not repeatable.

mod checks;
mod policy;
mod status;

pub use policy::*;
pub use status::{determine_status, next_review_date};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    DisqualifyingFactor, EligibilityRecord, EligibilityStatus, PetProfile,
    QuestionnaireResponse, Species, SpeciesAnswers, UnknownSpecies,
};
use checks::RuleContext;

/// Evaluation errors. Both are configuration or programming defects, not
/// data problems worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EligibilityError {
    #[error("Unsupported species: {0}")]
    UnsupportedSpecies(String),

    #[error("Questionnaire has {answers} answers but the pet is a {species}")]
    QuestionnaireMismatch {
        species: Species,
        answers: &'static str,
    },
}

impl From<UnknownSpecies> for EligibilityError {
    fn from(e: UnknownSpecies) -> Self {
        EligibilityError::UnsupportedSpecies(e.0)
    }
}

pub type EligibilityResult<T> = Result<T, EligibilityError>;

/// Factors, status and review date, without record identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub factors: Vec<DisqualifyingFactor>,
    pub overall_status: EligibilityStatus,
    pub next_review_date: Option<DateTime<Utc>>,
}

/// Stateless evaluator that applies an [`EligibilityPolicy`].
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    policy: EligibilityPolicy,
}

impl EligibilityEvaluator {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Evaluate a submission as of now.
    pub fn evaluate(
        &self,
        pet_id: &str,
        profile: &PetProfile,
        response: &QuestionnaireResponse,
    ) -> EligibilityResult<EligibilityRecord> {
        self.evaluate_at(pet_id, profile, response, Utc::now())
    }

    /// Evaluate a submission made at `now`, producing a fresh record.
    pub fn evaluate_at(
        &self,
        pet_id: &str,
        profile: &PetProfile,
        response: &QuestionnaireResponse,
        now: DateTime<Utc>,
    ) -> EligibilityResult<EligibilityRecord> {
        let assessment = self.assess(profile, response, now)?;

        Ok(EligibilityRecord {
            record_id: uuid::Uuid::new_v4().to_string(),
            pet_id: pet_id.to_string(),
            submitted_at: now,
            questionnaire: response.clone(),
            factors: assessment.factors,
            overall_status: assessment.overall_status,
            next_review_date: assessment.next_review_date,
        })
    }

    /// Run every rule and fold the result. Deterministic in its inputs.
    pub fn assess(
        &self,
        profile: &PetProfile,
        response: &QuestionnaireResponse,
        now: DateTime<Utc>,
    ) -> EligibilityResult<Assessment> {
        let Some(requirements) = self.policy.requirements(profile.species) else {
            warn!(species = %profile.species, "no eligibility rules configured for species");
            return Err(EligibilityError::UnsupportedSpecies(
                profile.species.to_string(),
            ));
        };

        if !response.species.matches(profile.species) {
            return Err(EligibilityError::QuestionnaireMismatch {
                species: profile.species,
                answers: response.species.label(),
            });
        }

        let ctx = RuleContext {
            profile,
            windows: &self.policy.review_windows,
            now,
        };

        let mut factors = checks::common_checks(&response.base, &ctx);
        factors.extend(checks::body_checks(requirements, &ctx));
        factors.extend(match &response.species {
            SpeciesAnswers::Dog(answers) => checks::dog_checks(answers, &ctx),
            SpeciesAnswers::Cat(answers) => checks::cat_checks(answers, &ctx),
            SpeciesAnswers::Horse(answers) => checks::horse_checks(answers, &ctx),
            SpeciesAnswers::General => Vec::new(),
        });

        for factor in &factors {
            debug!(
                species = %profile.species,
                factor_type = ?factor.factor_type,
                severity = ?factor.severity,
                "{}",
                factor.description
            );
        }

        let overall_status = determine_status(&factors);
        let next_review_date =
            next_review_date(overall_status, &factors, now, &self.policy.review_windows);

        Ok(Assessment {
            factors,
            overall_status,
            next_review_date,
        })
    }
}
