//! Species accepted by the donor program.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Donor species. The set is closed; every variant has a row in the default
/// eligibility policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Dog,
    Cat,
    Horse,
    Rabbit,
    Ferret,
    Goat,
    Sheep,
    Pig,
    Cow,
    Llama,
    Alpaca,
}

impl Species {
    pub const ALL: [Species; 11] = [
        Species::Dog,
        Species::Cat,
        Species::Horse,
        Species::Rabbit,
        Species::Ferret,
        Species::Goat,
        Species::Sheep,
        Species::Pig,
        Species::Cow,
        Species::Llama,
        Species::Alpaca,
    ];

    /// Canonical upper-case name, as stored and serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            Species::Dog => "DOG",
            Species::Cat => "CAT",
            Species::Horse => "HORSE",
            Species::Rabbit => "RABBIT",
            Species::Ferret => "FERRET",
            Species::Goat => "GOAT",
            Species::Sheep => "SHEEP",
            Species::Pig => "PIG",
            Species::Cow => "COW",
            Species::Llama => "LLAMA",
            Species::Alpaca => "ALPACA",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a species name is not one the program supports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported species: {0}")]
pub struct UnknownSpecies(pub String);

impl FromStr for Species {
    type Err = UnknownSpecies;

    /// Accepts the canonical names in any case plus the clinical aliases
    /// used by practice-management systems ("canine", "feline", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dog" | "canine" => Ok(Species::Dog),
            "cat" | "feline" => Ok(Species::Cat),
            "horse" | "equine" => Ok(Species::Horse),
            "rabbit" | "lagomorph" => Ok(Species::Rabbit),
            "ferret" => Ok(Species::Ferret),
            "goat" | "caprine" => Ok(Species::Goat),
            "sheep" | "ovine" => Ok(Species::Sheep),
            "pig" | "porcine" => Ok(Species::Pig),
            "cow" | "bovine" => Ok(Species::Cow),
            "llama" => Ok(Species::Llama),
            "alpaca" => Ok(Species::Alpaca),
            _ => Err(UnknownSpecies(s.to_string())),
        }
    }
}
