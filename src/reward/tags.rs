//! Five-dimension priority tagging for organized activities.
//!
//! A priority-tag string is exactly five characters, one per dimension in
//! fixed order, where an uppercase letter marks that dimension as high.
//! `"IiCUp"` reads as impact high, interest low, clarity high, urgency
//! high, pace low.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One prioritization dimension of the five-character tag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityDimension {
    /// How much completing the activity moves anything that matters.
    Impact,
    /// How much the activity pulls on its own.
    Interest,
    /// How well-defined the next action is.
    Clarity,
    /// How soon it stops being worth doing.
    Urgency,
    /// Whether it unblocks other queued work.
    Pace,
}

impl PriorityDimension {
    /// Dimensions in tag-string position order.
    pub const ALL: [Self; 5] = [
        Self::Impact,
        Self::Interest,
        Self::Clarity,
        Self::Urgency,
        Self::Pace,
    ];

    /// Letter used at this dimension's position when marked high.
    #[must_use]
    pub const fn high_letter(self) -> char {
        match self {
            Self::Impact | Self::Interest => 'I',
            Self::Clarity => 'C',
            Self::Urgency => 'U',
            Self::Pace => 'P',
        }
    }

    /// Letter used at this dimension's position when not marked.
    #[must_use]
    pub const fn low_letter(self) -> char {
        self.high_letter().to_ascii_lowercase()
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Impact => "impact",
            Self::Interest => "interest",
            Self::Clarity => "clarity",
            Self::Urgency => "urgency",
            Self::Pace => "pace",
        }
    }
}

impl fmt::Display for PriorityDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned while parsing a dimension name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority dimension: '{0}'")]
pub struct ParsePriorityDimensionError(pub String);

impl TryFrom<&str> for PriorityDimension {
    type Error = ParsePriorityDimensionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "impact" => Ok(Self::Impact),
            "interest" => Ok(Self::Interest),
            "clarity" => Ok(Self::Clarity),
            "urgency" => Ok(Self::Urgency),
            "pace" => Ok(Self::Pace),
            _ => Err(ParsePriorityDimensionError(value.to_owned())),
        }
    }
}

/// Error returned while decoding a malformed priority-tag string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid priority tag string '{0}', expected five characters")]
pub struct ParsePriorityTagsError(pub String);

/// Toggle set over the five priority dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTags {
    /// Impact marked high.
    pub impact: bool,
    /// Interest marked high.
    pub interest: bool,
    /// Clarity marked high.
    pub clarity: bool,
    /// Urgency marked high.
    pub urgency: bool,
    /// Pace marked high.
    pub pace: bool,
}

impl PriorityTags {
    /// Creates an empty set with no dimension marked.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            impact: false,
            interest: false,
            clarity: false,
            urgency: false,
            pace: false,
        }
    }

    /// Flips one dimension.
    pub const fn toggle(&mut self, dimension: PriorityDimension) {
        let slot = match dimension {
            PriorityDimension::Impact => &mut self.impact,
            PriorityDimension::Interest => &mut self.interest,
            PriorityDimension::Clarity => &mut self.clarity,
            PriorityDimension::Urgency => &mut self.urgency,
            PriorityDimension::Pace => &mut self.pace,
        };
        *slot = !*slot;
    }

    /// Returns whether the given dimension is marked high.
    #[must_use]
    pub const fn is_high(&self, dimension: PriorityDimension) -> bool {
        match dimension {
            PriorityDimension::Impact => self.impact,
            PriorityDimension::Interest => self.interest,
            PriorityDimension::Clarity => self.clarity,
            PriorityDimension::Urgency => self.urgency,
            PriorityDimension::Pace => self.pace,
        }
    }

    /// Number of dimensions marked high.
    #[must_use]
    pub fn high_count(&self) -> u32 {
        PriorityDimension::ALL
            .into_iter()
            .filter(|dimension| self.is_high(*dimension))
            .count() as u32
    }

    /// Encodes the set as the canonical five-character tag string.
    #[must_use]
    pub fn encode(&self) -> String {
        PriorityDimension::ALL
            .into_iter()
            .map(|dimension| {
                if self.is_high(dimension) {
                    dimension.high_letter()
                } else {
                    dimension.low_letter()
                }
            })
            .collect()
    }

    /// Decodes a stored tag string back into the toggle set.
    ///
    /// Position alone determines the dimension; case alone determines the
    /// marking, matching [`super::priority_tag_score`].
    ///
    /// # Errors
    ///
    /// Returns [`ParsePriorityTagsError`] when the string is not exactly
    /// five characters long.
    pub fn decode(encoded: &str) -> Result<Self, ParsePriorityTagsError> {
        if encoded.chars().count() != 5 {
            return Err(ParsePriorityTagsError(encoded.to_owned()));
        }
        let mut tags = Self::none();
        for (dimension, ch) in PriorityDimension::ALL.into_iter().zip(encoded.chars()) {
            if ch.is_alphabetic() && ch.is_uppercase() {
                tags.toggle(dimension);
            }
        }
        Ok(tags)
    }
}

impl fmt::Display for PriorityTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
