//! `NAME=MIN..MAX` filter arguments.

use std::str::FromStr;

use lotoforge::{ConstraintType, FilterState, NumberRange};

use crate::error::CliError;

/// One `--filter` value, e.g. `sum=180..220` or `evens=7..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterArg(pub FilterState);

impl FromStr for FilterArg {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || CliError::FilterSyntax(s.to_string());
        let invalid = |source| CliError::Filter {
            arg: s.to_string(),
            source,
        };
        let (name, bounds) = s.split_once('=').ok_or_else(syntax)?;
        let (min, max) = bounds.split_once("..").ok_or_else(syntax)?;
        let constraint: ConstraintType = name.trim().parse().map_err(invalid)?;
        let min = min.trim().parse().map_err(|_| syntax())?;
        let max = max.trim().parse().map_err(|_| syntax())?;
        Ok(Self(FilterState::enabled(
            constraint,
            NumberRange::new(min, max).map_err(invalid)?,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let FilterArg(state) = "sum=180..220".parse().unwrap();
        assert_eq!(state.constraint, ConstraintType::Sum);
        assert!(state.enabled);
        assert_eq!(state.range, NumberRange::new(180, 220).unwrap());

        let FilterArg(state) = "multiples_of_three = 4..6".parse().unwrap();
        assert_eq!(state.constraint, ConstraintType::MultiplesOfThree);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            "sum".parse::<FilterArg>(),
            Err(CliError::FilterSyntax(_))
        ));
        assert!(matches!(
            "sum=180-220".parse::<FilterArg>(),
            Err(CliError::FilterSyntax(_))
        ));
        assert!(matches!(
            "sum=a..b".parse::<FilterArg>(),
            Err(CliError::FilterSyntax(_))
        ));
        assert!(matches!(
            "odds=1..2".parse::<FilterArg>(),
            Err(CliError::Filter { .. })
        ));
        assert!(matches!(
            "sum=220..180".parse::<FilterArg>(),
            Err(CliError::Filter { .. })
        ));
        assert!(matches!(
            "bogus=1..2".parse::<FilterArg>(),
            Err(CliError::Filter { .. })
        ));

        let message = "sum=220..180".parse::<FilterArg>().unwrap_err().to_string();
        assert!(message.starts_with("invalid filter `sum=220..180`"), "{message}");
    }
}
