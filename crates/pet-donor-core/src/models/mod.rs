//! Domain models for the pet donor system.

mod eligibility;
mod pet;
mod questionnaire;
mod species;

pub use eligibility::*;
pub use pet::*;
pub use questionnaire::*;
pub use species::*;
