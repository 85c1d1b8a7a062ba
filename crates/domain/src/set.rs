use std::iter;

use derive_more::{Display, Into};
use log::debug;

pub const WEIGHT_UNIT: &str = "kg";

pub const MAX_SET_COUNT: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEntry {
    pub reps: Reps,
    pub weight: Weight,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("Weight must be a non-negative number of kg")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid sets \"{token}\": {kind}")]
pub struct SetParseError {
    pub token: String,
    pub kind: SetParseErrorKind,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetParseErrorKind {
    #[error("expected <sets>x<reps> <weight>kg but found {0} field(s)")]
    FieldCount(usize),
    #[error("Set count must be an integer in the range 0 to 99")]
    InvalidCount,
    #[error(transparent)]
    InvalidReps(RepsError),
    #[error(transparent)]
    InvalidWeight(WeightError),
}

/// Parses shorthand set notation like `"2x8 60kg1x5 40.5kg"` into one entry per
/// performed set.
pub fn parse(sets_text: &str) -> Result<Vec<SetEntry>, SetParseError> {
    let mut sets = Vec::new();

    for token in split_tokens(sets_text) {
        let (count, set) = parse_token(token)?;
        sets.extend(iter::repeat_n(set, count));
    }

    debug!("parsed \"{}\" into {} set(s)", sets_text.trim(), sets.len());

    Ok(sets)
}

/// Splits after every weight unit. Whitespace following a unit is dropped.
#[must_use]
pub fn split_tokens(sets_text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = sets_text.trim();

    while !rest.is_empty() {
        match rest.to_ascii_lowercase().find(WEIGHT_UNIT) {
            Some(idx) => {
                let end = idx + WEIGHT_UNIT.len();
                tokens.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                tokens.push(rest);
                rest = "";
            }
        }
    }

    tokens
}

fn parse_token(token: &str) -> Result<(usize, SetEntry), SetParseError> {
    let error = |kind| SetParseError {
        token: token.to_string(),
        kind,
    };

    let fields = split_fields(strip_unit(token));
    let [count, reps, weight] = fields[..] else {
        return Err(error(SetParseErrorKind::FieldCount(fields.len())));
    };

    let count = match count.parse::<usize>() {
        Ok(count) if count <= MAX_SET_COUNT => count,
        _ => return Err(error(SetParseErrorKind::InvalidCount)),
    };
    let reps = Reps::try_from(reps).map_err(|err| error(SetParseErrorKind::InvalidReps(err)))?;
    let weight =
        Weight::try_from(weight).map_err(|err| error(SetParseErrorKind::InvalidWeight(err)))?;

    Ok((count, SetEntry { reps, weight }))
}

fn strip_unit(token: &str) -> &str {
    let token = token.trim();
    if token.to_ascii_lowercase().ends_with(WEIGHT_UNIT) {
        &token[..token.len() - WEIGHT_UNIT.len()]
    } else {
        token
    }
}

fn split_fields(token: &str) -> Vec<&str> {
    token
        .split(|c: char| c == 'x' || c == 'X' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect()
}
