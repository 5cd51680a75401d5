//! Single dart throws and board segments.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outer bull value
pub const SINGLE_BULL: u32 = 25;
/// Inner bull value, only reachable at multiplier 1
pub const DOUBLE_BULL: u32 = 50;

/// One dart: the segment value hit and its multiplier.
///
/// A base of 0 is a miss. Construct with [`Dart::new`] to get a legal throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dart {
    pub base: u32,
    pub multiplier: u32,
}

impl Dart {
    /// Validate a throw.
    ///
    /// Legal bases are 0 (miss), 1-20, 25 and 50. Multipliers are 1-3, except
    /// that 25 can only be singled or doubled and 50 only singled.
    pub fn new(base: u32, multiplier: u32) -> Result<Self, GameError> {
        let invalid = GameError::InvalidThrow { base, multiplier };
        if !(1..=3).contains(&multiplier) {
            return Err(invalid);
        }
        match base {
            0 => Ok(Self::miss()),
            1..=20 => Ok(Self { base, multiplier }),
            SINGLE_BULL if multiplier <= 2 => Ok(Self { base, multiplier }),
            DOUBLE_BULL if multiplier == 1 => Ok(Self { base, multiplier }),
            _ => Err(invalid),
        }
    }

    pub fn miss() -> Self {
        Self {
            base: 0,
            multiplier: 1,
        }
    }

    pub fn single(base: u32) -> Result<Self, GameError> {
        Self::new(base, 1)
    }

    pub fn double(base: u32) -> Result<Self, GameError> {
        Self::new(base, 2)
    }

    pub fn triple(base: u32) -> Result<Self, GameError> {
        Self::new(base, 3)
    }

    /// Points scored by this dart
    pub fn score(&self) -> u32 {
        self.base * self.multiplier
    }

    pub fn is_miss(&self) -> bool {
        self.base == 0
    }

    /// Double-out finishes need a multiplier of exactly 2
    pub fn is_double(&self) -> bool {
        self.multiplier == 2
    }
}

impl fmt::Display for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.base, self.multiplier) {
            (0, _) => write!(f, "miss"),
            (DOUBLE_BULL, _) => write!(f, "bull"),
            (b, 1) => write!(f, "{}", b),
            (b, 2) => write!(f, "D{}", b),
            (b, _) => write!(f, "T{}", b),
        }
    }
}

/// A Cricket target
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Target {
    #[serde(rename = "15")]
    Fifteen,
    #[serde(rename = "16")]
    Sixteen,
    #[serde(rename = "17")]
    Seventeen,
    #[serde(rename = "18")]
    Eighteen,
    #[serde(rename = "19")]
    Nineteen,
    #[serde(rename = "20")]
    Twenty,
    #[serde(rename = "bull")]
    Bull,
}

impl Target {
    pub const ALL: [Target; 7] = [
        Target::Fifteen,
        Target::Sixteen,
        Target::Seventeen,
        Target::Eighteen,
        Target::Nineteen,
        Target::Twenty,
        Target::Bull,
    ];

    /// Target hit by a dart, if any
    pub fn for_dart(dart: &Dart) -> Option<Target> {
        match dart.base {
            15 => Some(Target::Fifteen),
            16 => Some(Target::Sixteen),
            17 => Some(Target::Seventeen),
            18 => Some(Target::Eighteen),
            19 => Some(Target::Nineteen),
            20 => Some(Target::Twenty),
            SINGLE_BULL | DOUBLE_BULL => Some(Target::Bull),
            _ => None,
        }
    }

    /// Marks a dart puts on its target: the multiplier, with the inner bull worth two
    pub fn marks_for(dart: &Dart) -> u32 {
        match Self::for_dart(dart) {
            None => 0,
            Some(Target::Bull) if dart.base == DOUBLE_BULL => 2,
            Some(_) => dart.multiplier,
        }
    }

    /// Points awarded per overflow mark
    pub fn points(&self) -> u32 {
        match self {
            Target::Fifteen => 15,
            Target::Sixteen => 16,
            Target::Seventeen => 17,
            Target::Eighteen => 18,
            Target::Nineteen => 19,
            Target::Twenty => 20,
            Target::Bull => SINGLE_BULL,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Target::Fifteen => "15",
            Target::Sixteen => "16",
            Target::Seventeen => "17",
            Target::Eighteen => "18",
            Target::Nineteen => "19",
            Target::Twenty => "20",
            Target::Bull => "bull",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
