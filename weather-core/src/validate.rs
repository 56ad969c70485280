use thiserror::Error;

use crate::model::WeatherQuery;

/// Typing this (any casing) ends the session.
pub const EXIT_KEYWORD: &str = "exit";

const MIN_CITY_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    City(WeatherQuery),
    ExitRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("City name cannot be empty.")]
    EmptyInput,

    #[error("City name must contain letters.")]
    NoLetters,

    #[error("City name is too short.")]
    TooShort,
}

/// Check one raw line of user input. Rules run in order and the first
/// failing rule decides the error.
pub fn validate(raw: &str) -> Result<ValidationOutcome, ValidationError> {
    let input = raw.trim();

    if input.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if input.eq_ignore_ascii_case(EXIT_KEYWORD) {
        return Ok(ValidationOutcome::ExitRequested);
    }

    if !input.chars().any(char::is_alphabetic) {
        return Err(ValidationError::NoLetters);
    }

    if input.chars().count() < MIN_CITY_LEN {
        return Err(ValidationError::TooShort);
    }

    Ok(ValidationOutcome::City(WeatherQuery::new(title_case(input))))
}

/// Upper-case every letter that starts a word and lower-case the rest. A
/// word starts after any non-letter, so "st. louis" becomes "St. Louis".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(raw: &str) -> String {
        match validate(raw) {
            Ok(ValidationOutcome::City(query)) => query.city,
            other => panic!("expected a city for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(validate(""), Err(ValidationError::EmptyInput));
        assert_eq!(validate("   "), Err(ValidationError::EmptyInput));
        assert_eq!(validate("\t\n"), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn exit_keyword_in_any_casing() {
        for raw in ["exit", "EXIT", "  Exit  ", "eXiT\n"] {
            assert_eq!(validate(raw), Ok(ValidationOutcome::ExitRequested), "{raw:?}");
        }
    }

    #[test]
    fn input_without_letters_is_rejected() {
        assert_eq!(validate("12345"), Err(ValidationError::NoLetters));
        assert_eq!(validate("!"), Err(ValidationError::NoLetters));
        assert_eq!(validate(" - "), Err(ValidationError::NoLetters));
    }

    #[test]
    fn letter_check_runs_before_length_check() {
        // A single digit has no letters, so that rule reports first.
        assert_eq!(validate("7"), Err(ValidationError::NoLetters));
        assert_eq!(validate("a"), Err(ValidationError::TooShort));
        assert_eq!(validate(" b "), Err(ValidationError::TooShort));
    }

    #[test]
    fn valid_input_is_title_cased() {
        assert_eq!(city("new york"), "New York");
        assert_eq!(city("  lONDON "), "London");
        assert_eq!(city("rio de janeiro"), "Rio De Janeiro");
        assert_eq!(city("st. louis"), "St. Louis");
        assert_eq!(city("NY"), "Ny");
    }

    #[test]
    fn non_ascii_letters_count() {
        assert_eq!(city("zürich"), "Zürich");
        assert_eq!(city("東京"), "東京");
    }

    #[test]
    fn exit_inside_a_longer_name_is_a_city() {
        assert_eq!(city("exit city"), "Exit City");
    }
}
