//! Golden tests for the eligibility evaluator.
//!
//! Each case is a screening scenario with its expected outcome.

use chrono::{DateTime, Months, TimeZone, Utc};
use pet_donor_core::models::{
    CatAnswers, DogAnswers, DogDiet, EligibilityStatus, FactorType, HandlingSensitivity,
    HorseAnswers, PetProfile, QuestionnaireResponse, ReproductiveStatus, Severity, Species,
    SpeciesAnswers,
};
use pet_donor_core::EligibilityEvaluator;

/// Expected factor: (type, severity, review months out, manual review).
type ExpectedFactor = (FactorType, Severity, Option<u32>, bool);

struct GoldenCase {
    id: &'static str,
    species: Species,
    age_years: u32,
    weight_lbs: f64,
    edit: fn(&mut QuestionnaireResponse),
    expected_status: EligibilityStatus,
    expected_review_months: Option<u32>,
    expected_factors: &'static [ExpectedFactor],
}

fn submitted() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 15, 14, 30, 0).unwrap()
}

fn months_out(months: u32) -> DateTime<Utc> {
    submitted().checked_add_months(Months::new(months)).unwrap()
}

fn no_edit(_: &mut QuestionnaireResponse) {}

fn dog(edit: impl FnOnce(&mut DogAnswers)) -> impl FnOnce(&mut QuestionnaireResponse) {
    move |response: &mut QuestionnaireResponse| {
        if let SpeciesAnswers::Dog(answers) = &mut response.species {
            edit(answers);
        }
    }
}

fn cat(edit: impl FnOnce(&mut CatAnswers)) -> impl FnOnce(&mut QuestionnaireResponse) {
    move |response: &mut QuestionnaireResponse| {
        if let SpeciesAnswers::Cat(answers) = &mut response.species {
            edit(answers);
        }
    }
}

fn horse(edit: impl FnOnce(&mut HorseAnswers)) -> impl FnOnce(&mut QuestionnaireResponse) {
    move |response: &mut QuestionnaireResponse| {
        if let SpeciesAnswers::Horse(answers) = &mut response.species {
            edit(answers);
        }
    }
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "dog-healthy",
            species: Species::Dog,
            age_years: 3,
            weight_lbs: 60.0,
            edit: no_edit,
            expected_status: EligibilityStatus::Eligible,
            expected_review_months: Some(12),
            expected_factors: &[],
        },
        GoldenCase {
            id: "dog-underweight",
            species: Species::Dog,
            age_years: 3,
            weight_lbs: 40.0,
            edit: no_edit,
            expected_status: EligibilityStatus::TemporarilyIneligible,
            expected_review_months: Some(3),
            expected_factors: &[(FactorType::Weight, Severity::Temporary, Some(3), false)],
        },
        GoldenCase {
            id: "dog-heartworm-positive",
            species: Species::Dog,
            age_years: 4,
            weight_lbs: 70.0,
            edit: |r| dog(|a| a.heartworm_test_negative = false)(r),
            expected_status: EligibilityStatus::Ineligible,
            expected_review_months: None,
            expected_factors: &[(FactorType::Disease, Severity::Permanent, None, false)],
        },
        GoldenCase {
            id: "dog-raw-diet",
            species: Species::Dog,
            age_years: 5,
            weight_lbs: 80.0,
            edit: |r| dog(|a| a.diet = DogDiet::Raw)(r),
            expected_status: EligibilityStatus::PendingReview,
            expected_review_months: Some(3),
            expected_factors: &[(FactorType::Lifestyle, Severity::Temporary, Some(3), true)],
        },
        GoldenCase {
            id: "dog-intact",
            species: Species::Dog,
            age_years: 2,
            weight_lbs: 65.0,
            edit: |r| dog(|a| a.spayed_or_neutered = false)(r),
            expected_status: EligibilityStatus::PendingReview,
            expected_review_months: Some(3),
            expected_factors: &[(FactorType::Pregnancy, Severity::Temporary, Some(3), true)],
        },
        GoldenCase {
            id: "dog-too-old",
            species: Species::Dog,
            age_years: 9,
            weight_lbs: 70.0,
            edit: no_edit,
            expected_status: EligibilityStatus::Ineligible,
            expected_review_months: None,
            expected_factors: &[(FactorType::Age, Severity::Permanent, None, false)],
        },
        GoldenCase {
            id: "cat-felv-positive",
            species: Species::Cat,
            age_years: 4,
            weight_lbs: 12.0,
            edit: |r| cat(|a| a.felv_fiv_test_negative = false)(r),
            expected_status: EligibilityStatus::Ineligible,
            expected_review_months: None,
            expected_factors: &[(FactorType::Disease, Severity::Permanent, None, false)],
        },
        GoldenCase {
            id: "cat-outdoor",
            species: Species::Cat,
            age_years: 4,
            weight_lbs: 12.0,
            edit: |r| cat(|a| a.indoor_only = false)(r),
            expected_status: EligibilityStatus::PendingReview,
            expected_review_months: Some(3),
            expected_factors: &[(FactorType::Lifestyle, Severity::Temporary, Some(3), true)],
        },
        GoldenCase {
            id: "cat-high-sensitivity",
            species: Species::Cat,
            age_years: 6,
            weight_lbs: 11.0,
            edit: |r| cat(|a| a.handling_sensitivity = HandlingSensitivity::High)(r),
            expected_status: EligibilityStatus::Ineligible,
            expected_review_months: None,
            expected_factors: &[(FactorType::Temperament, Severity::Permanent, None, false)],
        },
        GoldenCase {
            id: "horse-no-transport-on-meds",
            species: Species::Horse,
            age_years: 10,
            weight_lbs: 1100.0,
            edit: |r| {
                horse(|a| {
                    a.transport_available = false;
                    a.no_performance_medications = false;
                })(r)
            },
            expected_status: EligibilityStatus::PendingReview,
            expected_review_months: Some(1),
            expected_factors: &[
                (FactorType::Lifestyle, Severity::Temporary, Some(1), true),
                (FactorType::Medication, Severity::Temporary, Some(1), false),
            ],
        },
        GoldenCase {
            id: "horse-pregnant-mare",
            species: Species::Horse,
            age_years: 8,
            weight_lbs: 1050.0,
            edit: |r| horse(|a| a.reproductive_status = ReproductiveStatus::PregnantMare)(r),
            expected_status: EligibilityStatus::Ineligible,
            expected_review_months: None,
            expected_factors: &[(FactorType::Pregnancy, Severity::Permanent, None, false)],
        },
        GoldenCase {
            id: "goat-transfused-and-unvaccinated",
            species: Species::Goat,
            age_years: 3,
            weight_lbs: 90.0,
            edit: |r| {
                r.base.no_prior_transfusions = false;
                r.base.current_on_vaccinations = false;
            },
            expected_status: EligibilityStatus::Ineligible,
            expected_review_months: None,
            expected_factors: &[
                (FactorType::Vaccination, Severity::Temporary, Some(1), false),
                (FactorType::TransfusionHistory, Severity::Permanent, None, false),
            ],
        },
    ]
}

#[test]
fn test_golden_cases() {
    let evaluator = EligibilityEvaluator::default();

    for case in golden_cases() {
        let profile = PetProfile::new(case.species, case.age_years, case.weight_lbs);
        let mut response = QuestionnaireResponse::all_clear(case.species);
        (case.edit)(&mut response);

        let record = evaluator
            .evaluate_at("golden-pet", &profile, &response, submitted())
            .unwrap_or_else(|e| panic!("{}: evaluation failed: {e}", case.id));

        assert_eq!(record.overall_status, case.expected_status, "{}: status", case.id);
        assert_eq!(
            record.next_review_date,
            case.expected_review_months.map(months_out),
            "{}: next review",
            case.id
        );

        let mut actual: Vec<ExpectedFactor> = record
            .factors
            .iter()
            .map(|f| {
                let months = f.review_date.map(|d| {
                    (1..=120)
                        .find(|m| months_out(*m) == d)
                        .unwrap_or_else(|| panic!("{}: review date {d} off the month grid", case.id))
                });
                (f.factor_type, f.severity, months, f.requires_manual_review)
            })
            .collect();
        let mut expected = case.expected_factors.to_vec();
        actual.sort_by_key(|f| f.0.as_str());
        expected.sort_by_key(|f| f.0.as_str());
        assert_eq!(actual, expected, "{}: factors", case.id);
    }
}

#[test]
fn test_records_carry_questionnaire_and_pet() {
    let evaluator = EligibilityEvaluator::default();
    let profile = PetProfile::new(Species::Dog, 3, 60.0);
    let response = QuestionnaireResponse::all_clear(Species::Dog);

    let first = evaluator
        .evaluate_at("pet-42", &profile, &response, submitted())
        .unwrap();
    let second = evaluator
        .evaluate_at("pet-42", &profile, &response, submitted())
        .unwrap();

    assert_eq!(first.pet_id, "pet-42");
    assert_eq!(first.submitted_at, submitted());
    assert_eq!(first.questionnaire, response);
    assert_ne!(first.record_id, second.record_id);
}
