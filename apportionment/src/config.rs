// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A party (or any entity that can win seats) taking part in one apportionment.
///
/// The `seats`, `remainder` and `extra_seats` fields are outputs: they are
/// ignored on input and filled in by the engine.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Party {
    /// Opaque key. It must be unique within one call.
    pub name: String,
    pub votes: u64,
    pub seats: u32,
    /// The votes left over after the whole-quota allocation.
    pub remainder: u64,
    /// The seats awarded during the remainder distribution.
    pub extra_seats: u32,
}

impl Party {
    pub fn new(name: &str, votes: u64) -> Party {
        Party {
            name: name.to_string(),
            votes,
            seats: 0,
            remainder: 0,
            extra_seats: 0,
        }
    }

    /// Builds a party from a signed vote count, as found in upstream data files.
    pub fn try_new(name: &str, votes: i64) -> Result<Party, AllocationError> {
        let v = u64::try_from(votes).map_err(|_| {
            AllocationError::InvalidInput(format!("party {:?} has negative votes: {}", name, votes))
        })?;
        Ok(Party::new(name, v))
    }

    /// True if this party received a seat from the remainder distribution.
    pub fn extra_seat(&self) -> bool {
        self.extra_seats > 0
    }
}

/// Errors that prevent an allocation or a layout from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AllocationError {
    /// Malformed, negative or zero arguments where a positive value is required.
    InvalidInput(String),
    /// Zero seats were requested.
    DivisionByZero,
}

impl Error for AllocationError {}

impl Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            AllocationError::DivisionByZero => {
                write!(f, "cannot apportion zero seats (division by zero)")
            }
        }
    }
}

// ********* Configuration **********

/// The quota and remainder scheme.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ApportionmentMethod {
    /// Hare quota, leftover seats to the largest remainders in a single ranking.
    LargestRemainder,
    /// Hagenbach-Bischoff quota (votes / (seats + 1)), leftover seats one at a
    /// time to the largest `remainder / (extra seats + 1)`.
    HagenbachBischoff,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// The party listed first wins the tie.
    UseInputOrder,
    // The random mode uses a cryptographic hash on the party names, so that
    // the order is hard to guess but reproducible from the seed.
    Random(u32),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ApportionmentRules {
    pub method: ApportionmentMethod,
    pub tiebreak_mode: TieBreakMode,
}

impl ApportionmentRules {
    pub const DEFAULT_RULES: ApportionmentRules = ApportionmentRules {
        method: ApportionmentMethod::LargestRemainder,
        tiebreak_mode: TieBreakMode::UseInputOrder,
    };
}

impl Default for ApportionmentRules {
    fn default() -> Self {
        ApportionmentRules::DEFAULT_RULES
    }
}
