//! CSS-like lengths: the persisted width value and inline style values.
//!
//! Parsing is built on `winnow` 0.7. Accepted forms: `150`, `150px`,
//! `37.5%`, with optional surrounding whitespace. A bare number is pixels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use winnow::combinator::alt;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "%", alias = "percent")]
    Percent,
}

impl LengthUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Percent,
        }
    }

    /// Resolve to pixels. Percentages are relative to `reference_width`.
    pub fn resolve(self, reference_width: f64) -> f64 {
        match self.unit {
            LengthUnit::Px => self.value,
            LengthUnit::Percent => reference_width * self.value / 100.0,
        }
    }
}

/// Round to two decimals, the precision kept for persisted percentages.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = round2(self.value);
        // `{}` on f64 prints the shortest representation, so 37.50 → "37.5"
        // and 150.0 → "150".
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        write!(f, "{rounded}{}", self.unit.suffix())
    }
}

impl FromStr for Length {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_length(s)
    }
}

/// Parse a length string.
#[must_use = "parsing result should be used"]
pub fn parse_length(input: &str) -> Result<Length, String> {
    let mut rest = input.trim();
    let value = parse_number
        .parse_next(&mut rest)
        .map_err(|e| format!("Length parse error in `{input}`: {e}"))?;
    let unit = if rest.is_empty() {
        LengthUnit::Px
    } else {
        parse_unit
            .parse_next(&mut rest)
            .map_err(|e| format!("Unknown length unit in `{input}`: {e}"))?
    };
    if !rest.is_empty() {
        return Err(format!("Trailing input in length `{input}`: `{rest}`"));
    }
    Ok(Length { value, unit })
}

fn parse_number(input: &mut &str) -> ModalResult<f64> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f64>()
        .map_err(|_| winnow::error::ErrMode::Backtrack(ContextError::new()))
}

fn parse_unit(input: &mut &str) -> ModalResult<LengthUnit> {
    alt(("px".value(LengthUnit::Px), "%".value(LengthUnit::Percent))).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_forms() {
        assert_eq!(parse_length("150px"), Ok(Length::px(150.0)));
        assert_eq!(parse_length("150"), Ok(Length::px(150.0)));
        assert_eq!(parse_length(" 37.5% "), Ok(Length::percent(37.5)));
        assert_eq!(parse_length("-4px"), Ok(Length::px(-4.0)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_length("").is_err());
        assert!(parse_length("px").is_err());
        assert!(parse_length("12em").is_err());
        assert!(parse_length("12px wide").is_err());
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Length::px(150.0).to_string(), "150px");
        assert_eq!(Length::percent(37.5).to_string(), "37.5%");
        assert_eq!(Length::percent(33.333_333).to_string(), "33.33%");
        assert_eq!(Length::px(-0.001).to_string(), "0px");
    }

    #[test]
    fn display_then_parse_is_stable() {
        let original = Length::percent(62.25);
        let reparsed: Length = original.to_string().parse().unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn resolve_against_reference() {
        assert_eq!(Length::px(40.0).resolve(800.0), 40.0);
        assert_eq!(Length::percent(25.0).resolve(800.0), 200.0);
    }

    #[test]
    fn unit_serde_names() {
        let unit: LengthUnit = serde_json::from_str("\"%\"").unwrap();
        assert_eq!(unit, LengthUnit::Percent);
        let unit: LengthUnit = serde_json::from_str("\"percent\"").unwrap();
        assert_eq!(unit, LengthUnit::Percent);
        assert_eq!(serde_json::to_string(&LengthUnit::Px).unwrap(), "\"px\"");
    }
}
