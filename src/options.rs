//! Per-guild tunables and the rules for turning admin input into them.

use std::fmt;

/// How a guild option is parsed from user text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionType {
    Boolean,
    Percentage,
    NonZeroPositiveInt,
    /// Never exposed to users
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Percentage(f64),
}

/// A named option along with its default.
#[derive(Clone, Debug)]
pub struct GuildOption {
    pub name: String,
    pub default: OptionValue,
    pub kind: OptionType,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OptionError {
    #[error("`{0}` has to be true/false, t/f, or 1/0")]
    NotBoolean(String),
    #[error("`{0}` is not a valid number")]
    NotNumber(String),
    #[error("`{0}` is not a valid integer")]
    NotInteger(String),
    #[error("percentage must be in the range [0.0,100.0]")]
    OutOfRange,
    #[error("must be an integer above 0")]
    NotPositive,
    #[error("`{0}` can't be changed")]
    Hidden(String),
    #[error("`{0}` is not an option, see `dad list`")]
    Unknown(String),
    #[error("`{0}` is not a true/false option")]
    NotToggleable(String),
}

impl GuildOption {
    pub fn new(name: impl Into<String>, default: OptionValue, kind: OptionType) -> Self {
        Self {
            name: name.into(),
            default,
            kind,
        }
    }

    pub fn percentage(name: impl Into<String>, default: f64) -> Self {
        Self::new(name, OptionValue::Percentage(default), OptionType::Percentage)
    }

    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, OptionValue::Boolean(default), OptionType::Boolean)
    }

    pub fn positive_int(name: impl Into<String>, default: i64) -> Self {
        Self::new(
            name,
            OptionValue::Integer(default),
            OptionType::NonZeroPositiveInt,
        )
    }

    /// Convert and validate admin input for this option.
    pub fn parse(&self, input: &str) -> Result<OptionValue, OptionError> {
        match self.kind {
            OptionType::Boolean => parse_boolean(input).map(OptionValue::Boolean),
            OptionType::Percentage => parse_percentage(input).map(OptionValue::Percentage),
            OptionType::NonZeroPositiveInt => {
                parse_positive_int(input).map(OptionValue::Integer)
            }
            OptionType::Hidden => Err(OptionError::Hidden(self.name.clone())),
        }
    }
}

pub fn parse_boolean(input: &str) -> Result<bool, OptionError> {
    match input.to_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(OptionError::NotBoolean(input.to_owned())),
    }
}

pub fn parse_percentage(input: &str) -> Result<f64, OptionError> {
    let value: f64 = input
        .trim_end_matches('%')
        .parse()
        .map_err(|_| OptionError::NotNumber(input.to_owned()))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(OptionError::OutOfRange)
    }
}

pub fn parse_positive_int(input: &str) -> Result<i64, OptionError> {
    let value: i64 = input
        .parse()
        .map_err(|_| OptionError::NotInteger(input.to_owned()))?;
    if value > 0 {
        Ok(value)
    } else {
        Err(OptionError::NotPositive)
    }
}

impl OptionValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            OptionValue::Boolean(b) => f64::from(u8::from(b)),
            OptionValue::Integer(i) => i as f64,
            OptionValue::Percentage(p) => p,
        }
    }

    pub fn as_bool(&self) -> bool {
        match *self {
            OptionValue::Boolean(b) => b,
            OptionValue::Integer(i) => i != 0,
            OptionValue::Percentage(p) => p != 0.0,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match *self {
            OptionValue::Boolean(b) => i64::from(b),
            OptionValue::Integer(i) => i,
            OptionValue::Percentage(p) => p as i64,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionValue::Boolean(b) => write!(f, "{}", b),
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Percentage(p) => write!(f, "{}%", p),
        }
    }
}
