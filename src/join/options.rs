//! Join types and options

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use super::errors::{JoinError, JoinResult};

/// Kind of join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Semi,
    Anti,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "inner",
            JoinType::Left => "left",
            JoinType::Right => "right",
            JoinType::Full => "full",
            JoinType::Semi => "semi",
            JoinType::Anti => "anti",
        }
    }

    /// Adds columns from `y`
    pub fn is_mutating(&self) -> bool {
        !self.is_filtering()
    }

    /// Keeps or drops rows of `x` without adding columns
    pub fn is_filtering(&self) -> bool {
        matches!(self, JoinType::Semi | JoinType::Anti)
    }

    /// Unmatched `x` rows appear in the output
    pub fn keeps_unmatched_left(&self) -> bool {
        matches!(self, JoinType::Left | JoinType::Full | JoinType::Anti)
    }

    /// Unmatched `y` rows appear in the output
    pub fn keeps_unmatched_right(&self) -> bool {
        matches!(self, JoinType::Right | JoinType::Full)
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JoinType {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inner" => Ok(JoinType::Inner),
            "left" => Ok(JoinType::Left),
            "right" => Ok(JoinType::Right),
            "full" => Ok(JoinType::Full),
            "semi" => Ok(JoinType::Semi),
            "anti" => Ok(JoinType::Anti),
            other => Err(JoinError::invalid_option(format!(
                "unknown join type '{}'",
                other
            ))),
        }
    }
}

/// Whether missing key values match each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NullMatching {
    /// Missing keys never match, not even other missing keys
    #[default]
    Never,
    /// `NA` matches `NA` and `NaN` matches `NaN`
    Na,
}

impl FromStr for NullMatching {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(NullMatching::Never),
            "na" => Ok(NullMatching::Na),
            other => Err(JoinError::invalid_option(format!(
                "unknown na_matches value '{}' (expected 'never' or 'na')",
                other
            ))),
        }
    }
}

/// Expected cardinality between the rows of `x` and `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Relationship {
    /// No expectation; many-to-many matches are logged as a warning
    #[default]
    None,
    OneToOne,
    /// Each `y` row matches at most one `x` row
    OneToMany,
    /// Each `x` row matches at most one `y` row
    ManyToOne,
    /// No expectation and no warning
    ManyToMany,
}

impl Relationship {
    /// Each `x` row may match at most one `y` row
    pub fn requires_single_match_for_left(&self) -> bool {
        matches!(self, Relationship::OneToOne | Relationship::ManyToOne)
    }

    /// Each `y` row may match at most one `x` row
    pub fn requires_single_match_for_right(&self) -> bool {
        matches!(self, Relationship::OneToOne | Relationship::OneToMany)
    }
}

impl FromStr for Relationship {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Relationship::None),
            "one-to-one" => Ok(Relationship::OneToOne),
            "one-to-many" => Ok(Relationship::OneToMany),
            "many-to-one" => Ok(Relationship::ManyToOne),
            "many-to-many" => Ok(Relationship::ManyToMany),
            other => Err(JoinError::invalid_option(format!(
                "unknown relationship '{}'",
                other
            ))),
        }
    }
}

/// What to do with rows a join would drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Unmatched {
    #[default]
    Drop,
    Error,
}

impl FromStr for Unmatched {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(Unmatched::Drop),
            "error" => Ok(Unmatched::Error),
            other => Err(JoinError::invalid_option(format!(
                "unknown unmatched value '{}' (expected 'drop' or 'error')",
                other
            ))),
        }
    }
}

pub const DEFAULT_SUFFIX_LEFT: &str = ".x";
pub const DEFAULT_SUFFIX_RIGHT: &str = ".y";

/// Options shared by all joins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    /// Suffixes for colliding column names of `x` and `y`
    pub suffix: (String, String),
    pub na_matches: NullMatching,
    /// Emit `y`'s key columns too
    pub keep: bool,
    pub relationship: Relationship,
    pub unmatched: Unmatched,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            suffix: (DEFAULT_SUFFIX_LEFT.to_string(), DEFAULT_SUFFIX_RIGHT.to_string()),
            na_matches: NullMatching::default(),
            keep: false,
            relationship: Relationship::default(),
            unmatched: Unmatched::default(),
        }
    }
}

impl JoinOptions {
    pub fn with_suffix(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.suffix = (left.into(), right.into());
        self
    }

    pub fn with_na_matches(mut self, na_matches: NullMatching) -> Self {
        self.na_matches = na_matches;
        self
    }

    pub fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = relationship;
        self
    }

    pub fn with_unmatched(mut self, unmatched: Unmatched) -> Self {
        self.unmatched = unmatched;
        self
    }

    /// Checks that the suffixes are usable
    pub fn validate(&self) -> JoinResult<()> {
        let (left, right) = &self.suffix;
        if left.is_empty() || right.is_empty() {
            return Err(JoinError::invalid_option("suffixes must not be empty"));
        }
        if left == right {
            return Err(JoinError::invalid_option(format!(
                "suffixes must differ, both are '{}'",
                left
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_type_round_trip_names() {
        for how in [
            JoinType::Inner,
            JoinType::Left,
            JoinType::Right,
            JoinType::Full,
            JoinType::Semi,
            JoinType::Anti,
        ] {
            assert_eq!(how.as_str().parse::<JoinType>().unwrap(), how);
        }
        assert!("outer".parse::<JoinType>().is_err());
    }

    #[test]
    fn test_filtering_joins() {
        assert!(JoinType::Semi.is_filtering());
        assert!(JoinType::Anti.is_filtering());
        assert!(JoinType::Full.is_mutating());
    }

    #[test]
    fn test_relationship_constraints() {
        assert!(Relationship::ManyToOne.requires_single_match_for_left());
        assert!(!Relationship::ManyToOne.requires_single_match_for_right());
        assert!(Relationship::OneToMany.requires_single_match_for_right());
        assert!(Relationship::OneToOne.requires_single_match_for_left());
        assert!(!Relationship::None.requires_single_match_for_left());
        assert_eq!(
            "many-to-one".parse::<Relationship>().unwrap(),
            Relationship::ManyToOne
        );
    }

    #[test]
    fn test_default_options() {
        let opts = JoinOptions::default();
        assert_eq!(opts.suffix, (".x".to_string(), ".y".to_string()));
        assert_eq!(opts.na_matches, NullMatching::Never);
        assert!(!opts.keep);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validate_suffixes() {
        assert!(JoinOptions::default().with_suffix("", "_y").validate().is_err());
        assert!(JoinOptions::default().with_suffix("_a", "_a").validate().is_err());
        assert!(JoinOptions::default().with_suffix("_x", "_y").validate().is_ok());
    }
}
