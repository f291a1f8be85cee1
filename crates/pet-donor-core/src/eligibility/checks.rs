//! Individual screening rules.
//!
//! Each check appends zero or more factors. Checks never decide the overall
//! status; that happens in [`super::status`].

use chrono::{DateTime, Months, NaiveTime, Utc};

use crate::models::{
    BaseAnswers, CatAnswers, DisqualifyingFactor, DogAnswers, DogDiet, FactorType,
    HandlingSensitivity, HorseAnswers, PetProfile, ReproductiveStatus,
};

use super::policy::{ReviewWindows, SpeciesRequirements};

/// Shared inputs for every rule.
pub(crate) struct RuleContext<'a> {
    pub profile: &'a PetProfile,
    pub windows: &'a ReviewWindows,
    pub now: DateTime<Utc>,
}

impl RuleContext<'_> {
    fn short_review(&self) -> DateTime<Utc> {
        months_after(self.now, self.windows.short_months)
    }

    fn standard_review(&self) -> DateTime<Utc> {
        months_after(self.now, self.windows.standard_months)
    }
}

/// `now` plus a number of calendar months, clamped at the end of the range.
pub(crate) fn months_after(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_add_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Checks that apply to every species.
pub(crate) fn common_checks(base: &BaseAnswers, ctx: &RuleContext<'_>) -> Vec<DisqualifyingFactor> {
    let mut factors = Vec::new();

    if !base.in_good_health {
        factors.push(DisqualifyingFactor::temporary(
            FactorType::Health,
            "Not currently in good physical health",
            ctx.standard_review(),
        ));
    }

    if !base.no_chronic_conditions {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::Health,
            "Has a chronic health condition",
        ));
    }

    if !base.no_recent_illness {
        factors.push(DisqualifyingFactor::temporary(
            FactorType::Health,
            "Ill within the last 30 days",
            ctx.short_review(),
        ));
    }

    if !base.friendly_temperament || !base.comfortable_with_restraint {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::Temperament,
            "Temperament is not suited to restraint during collection",
        ));
    }

    if !base.current_on_vaccinations {
        factors.push(DisqualifyingFactor::temporary(
            FactorType::Vaccination,
            "Vaccinations are not current",
            ctx.short_review(),
        ));
    }

    if !base.only_routine_medications {
        factors.push(DisqualifyingFactor::temporary(
            FactorType::Medication,
            "Taking non-routine medication",
            ctx.standard_review(),
        ));
    }

    if !base.no_prior_transfusions {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::TransfusionHistory,
            "Previously received a blood transfusion",
        ));
    }

    factors
}

/// Age and weight against the species table.
pub(crate) fn body_checks(
    requirements: &SpeciesRequirements,
    ctx: &RuleContext<'_>,
) -> Vec<DisqualifyingFactor> {
    let mut factors = Vec::new();
    let profile = ctx.profile;

    if profile.age_years < requirements.min_age_years {
        // Re-check on the birthday the minimum is reached.
        let review = match profile.birthday(requirements.min_age_years) {
            Some(birthday) => birthday.and_time(NaiveTime::MIN).and_utc(),
            None => {
                let years_short = requirements.min_age_years - profile.age_years;
                months_after(ctx.now, years_short.saturating_mul(12))
            }
        };
        factors.push(DisqualifyingFactor::temporary(
            FactorType::Age,
            format!(
                "Age {} is below the minimum of {} years for {}",
                profile.age_years, requirements.min_age_years, profile.species
            ),
            review,
        ));
    } else if profile.age_years > requirements.max_age_years {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::Age,
            format!(
                "Age {} is above the maximum of {} years for {}",
                profile.age_years, requirements.max_age_years, profile.species
            ),
        ));
    }

    if profile.weight_lbs < requirements.min_weight_lbs {
        factors.push(DisqualifyingFactor::temporary(
            FactorType::Weight,
            format!(
                "Weight {} lbs is below the minimum of {} lbs for {}",
                profile.weight_lbs, requirements.min_weight_lbs, profile.species
            ),
            ctx.standard_review(),
        ));
    }

    factors
}

pub(crate) fn dog_checks(answers: &DogAnswers, ctx: &RuleContext<'_>) -> Vec<DisqualifyingFactor> {
    let mut factors = Vec::new();

    if !answers.heartworm_test_negative {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::Disease,
            "Positive or missing heartworm test",
        ));
    }

    if !answers.tick_borne_test_negative {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::Disease,
            "Positive or missing tick-borne disease panel",
        ));
    }

    if answers.diet == DogDiet::Raw {
        factors.push(
            DisqualifyingFactor::temporary(
                FactorType::Lifestyle,
                "Raw diet requires veterinary review",
                ctx.standard_review(),
            )
            .with_manual_review(),
        );
    }

    if !answers.spayed_or_neutered {
        factors.push(intact_factor(ctx));
    }

    factors
}

pub(crate) fn cat_checks(answers: &CatAnswers, ctx: &RuleContext<'_>) -> Vec<DisqualifyingFactor> {
    let mut factors = Vec::new();

    if !answers.felv_fiv_test_negative {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::Disease,
            "Positive or missing FeLV/FIV test",
        ));
    }

    if !answers.indoor_only {
        factors.push(
            DisqualifyingFactor::temporary(
                FactorType::Lifestyle,
                "Outdoor access increases infectious disease exposure",
                ctx.standard_review(),
            )
            .with_manual_review(),
        );
    }

    if answers.handling_sensitivity == HandlingSensitivity::High {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::Temperament,
            "High sensitivity to handling",
        ));
    }

    if !answers.spayed_or_neutered {
        factors.push(intact_factor(ctx));
    }

    factors
}

pub(crate) fn horse_checks(
    answers: &HorseAnswers,
    ctx: &RuleContext<'_>,
) -> Vec<DisqualifyingFactor> {
    let mut factors = Vec::new();

    if !answers.coggins_test_negative {
        factors.push(DisqualifyingFactor::permanent(
            FactorType::Disease,
            "Positive or missing Coggins (EIA) test",
        ));
    }

    if !answers.transport_available {
        factors.push(
            DisqualifyingFactor::temporary(
                FactorType::Lifestyle,
                "No transport to the collection site",
                ctx.short_review(),
            )
            .with_manual_review(),
        );
    }

    if !answers.no_performance_medications {
        factors.push(DisqualifyingFactor::temporary(
            FactorType::Medication,
            "Receiving performance medications",
            ctx.short_review(),
        ));
    }

    match answers.reproductive_status {
        ReproductiveStatus::PregnantMare => factors.push(DisqualifyingFactor::permanent(
            FactorType::Pregnancy,
            "Pregnant mares develop alloantibodies",
        )),
        ReproductiveStatus::FoaledMare => factors.push(DisqualifyingFactor::permanent(
            FactorType::Pregnancy,
            "Mares that have foaled carry alloantibodies",
        )),
        ReproductiveStatus::Gelding
        | ReproductiveStatus::Stallion
        | ReproductiveStatus::MaidenMare => {}
    }

    factors
}

fn intact_factor(ctx: &RuleContext<'_>) -> DisqualifyingFactor {
    DisqualifyingFactor::temporary(
        FactorType::Pregnancy,
        "Intact animal requires veterinary review of pregnancy history",
        ctx.standard_review(),
    )
    .with_manual_review()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, Species};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).unwrap()
    }

    fn profile(species: Species, age_years: u32, weight_lbs: f64) -> PetProfile {
        PetProfile::new(species, age_years, weight_lbs)
    }

    #[test]
    fn test_months_after_clamps_month_end() {
        let jan31 = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        let feb = months_after(jan31, 1);
        assert_eq!(feb, Utc.with_ymd_and_hms(2026, 2, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_common_checks_all_clear() {
        let p = profile(Species::Dog, 3, 60.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };
        assert!(common_checks(&BaseAnswers::all_clear(), &ctx).is_empty());
    }

    #[test]
    fn test_temperament_yields_single_factor() {
        let p = profile(Species::Dog, 3, 60.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };

        let mut base = BaseAnswers::all_clear();
        base.friendly_temperament = false;
        base.comfortable_with_restraint = false;

        let factors = common_checks(&base, &ctx);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor_type, FactorType::Temperament);
        assert_eq!(factors[0].severity, Severity::Permanent);
    }

    #[test]
    fn test_recent_illness_reviews_in_one_month() {
        let p = profile(Species::Cat, 3, 12.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };

        let mut base = BaseAnswers::all_clear();
        base.no_recent_illness = false;

        let factors = common_checks(&base, &ctx);
        assert_eq!(factors.len(), 1);
        assert_eq!(
            factors[0].review_date,
            Some(Utc.with_ymd_and_hms(2026, 4, 15, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_young_animal_without_birth_date_uses_whole_years() {
        let p = profile(Species::Horse, 0, 950.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };
        let req = SpeciesRequirements::new(2, 20, 900.0);

        let factors = body_checks(&req, &ctx);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor_type, FactorType::Age);
        assert_eq!(factors[0].severity, Severity::Temporary);
        assert_eq!(
            factors[0].review_date,
            Some(Utc.with_ymd_and_hms(2028, 3, 15, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_young_animal_reviewed_on_birthday() {
        let mut p = profile(Species::Dog, 0, 60.0);
        p.birth_date = chrono::NaiveDate::from_ymd_opt(2025, 9, 20);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };
        let req = SpeciesRequirements::new(1, 8, 55.0);

        let factors = body_checks(&req, &ctx);
        assert_eq!(factors.len(), 1);
        assert_eq!(
            factors[0].review_date,
            Some(Utc.with_ymd_and_hms(2026, 9, 20, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_old_and_light_animal() {
        let p = profile(Species::Goat, 9, 40.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };
        let req = SpeciesRequirements::new(1, 8, 60.0);

        let factors = body_checks(&req, &ctx);
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[0].severity, Severity::Permanent);
        assert_eq!(factors[1].factor_type, FactorType::Weight);
        assert_eq!(factors[1].severity, Severity::Temporary);
    }

    #[test]
    fn test_raw_diet_needs_manual_review() {
        let p = profile(Species::Dog, 3, 60.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };

        let mut dog = DogAnswers::all_clear();
        dog.diet = DogDiet::Raw;

        let factors = dog_checks(&dog, &ctx);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor_type, FactorType::Lifestyle);
        assert!(factors[0].requires_manual_review);
    }

    #[test]
    fn test_outdoor_cat_needs_manual_review() {
        let p = profile(Species::Cat, 3, 12.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };

        let mut cat = CatAnswers::all_clear();
        cat.indoor_only = false;

        let factors = cat_checks(&cat, &ctx);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor_type, FactorType::Lifestyle);
        assert_eq!(factors[0].severity, Severity::Temporary);
        assert!(factors[0].requires_manual_review);
    }

    #[test]
    fn test_every_lifestyle_factor_needs_manual_review() {
        let p = profile(Species::Horse, 8, 1100.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };

        let mut dog = DogAnswers::all_clear();
        dog.diet = DogDiet::Raw;
        let mut cat = CatAnswers::all_clear();
        cat.indoor_only = false;
        let mut horse = HorseAnswers::all_clear();
        horse.transport_available = false;
        horse.no_performance_medications = false;

        let factors: Vec<DisqualifyingFactor> = dog_checks(&dog, &ctx)
            .into_iter()
            .chain(cat_checks(&cat, &ctx))
            .chain(horse_checks(&horse, &ctx))
            .collect();

        for factor in &factors {
            assert_eq!(
                factor.requires_manual_review,
                factor.factor_type == FactorType::Lifestyle,
                "{}",
                factor.description
            );
        }
        assert_eq!(
            factors
                .iter()
                .filter(|f| f.factor_type == FactorType::Lifestyle)
                .count(),
            3
        );
    }

    #[test]
    fn test_horse_reproductive_status() {
        let p = profile(Species::Horse, 8, 1100.0);
        let windows = ReviewWindows::default();
        let ctx = RuleContext { profile: &p, windows: &windows, now: now() };

        let mut horse = HorseAnswers::all_clear();
        horse.reproductive_status = ReproductiveStatus::MaidenMare;
        assert!(horse_checks(&horse, &ctx).is_empty());

        horse.reproductive_status = ReproductiveStatus::FoaledMare;
        let factors = horse_checks(&horse, &ctx);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor_type, FactorType::Pregnancy);
        assert_eq!(factors[0].severity, Severity::Permanent);
    }
}
