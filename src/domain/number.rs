use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::validation::ValidationError;
use crate::domain::value::PhoneNumber;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]").expect("separator pattern is valid"));

// E.164 caps a full number at 15 digits.
static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2,15}$").expect("canonical pattern is valid"));

const MAX_TOTAL_DIGITS: usize = 15;

/// National numbering rules used to canonicalize local input.
///
/// Invariants: the country code is 1 to 3 ASCII digits, the trunk prefix is an
/// ASCII digit, and country code plus subscriber digits fit in 15 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberPlan {
    country_code: String,
    trunk_prefix: char,
    subscriber_digits: usize,
}

impl NumberPlan {
    pub fn new(
        country_code: impl Into<String>,
        trunk_prefix: char,
        subscriber_digits: usize,
    ) -> Result<Self, ValidationError> {
        let country_code = country_code.into();
        if !(1..=3).contains(&country_code.len())
            || !country_code.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ValidationError::InvalidNumberPlan {
                reason: "country code must be 1 to 3 digits",
            });
        }
        if !trunk_prefix.is_ascii_digit() {
            return Err(ValidationError::InvalidNumberPlan {
                reason: "trunk prefix must be a digit",
            });
        }
        if subscriber_digits == 0 || country_code.len() + subscriber_digits > MAX_TOTAL_DIGITS {
            return Err(ValidationError::InvalidNumberPlan {
                reason: "subscriber digits must leave a number of at most 15 digits",
            });
        }
        Ok(Self {
            country_code,
            trunk_prefix,
            subscriber_digits,
        })
    }

    /// Uganda: `256`, trunk prefix `0`, nine subscriber digits.
    pub fn uganda() -> Self {
        Self {
            country_code: "256".to_owned(),
            trunk_prefix: '0',
            subscriber_digits: 9,
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn trunk_prefix(&self) -> char {
        self.trunk_prefix
    }

    /// Length of a canonical number.
    pub fn total_digits(&self) -> usize {
        self.country_code.len() + self.subscriber_digits
    }
}

impl Default for NumberPlan {
    fn default() -> Self {
        Self::uganda()
    }
}

/// Why an input was dropped by [`NumberValidator::validate`].
///
/// The `Display` output is the diagnostic line reported to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberIssue {
    EmptyList,
    Blank { raw: String },
    Invalid { raw: String },
}

impl fmt::Display for NumberIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyList => f.write_str("Number list cannot be null or empty"),
            Self::Blank { raw } => write!(f, "Number ({raw}) cannot be null or empty!"),
            Self::Invalid { raw } => write!(f, "Number ({raw}) is not valid!"),
        }
    }
}

/// Output of [`NumberValidator::validate`]: accepted numbers in first-seen order
/// plus one issue per rejected input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedNumbers {
    pub numbers: Vec<PhoneNumber>,
    pub issues: Vec<NumberIssue>,
}

impl ValidatedNumbers {
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Canonicalizes and filters candidate phone numbers. Performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    plan: NumberPlan,
}

impl NumberValidator {
    pub fn new(plan: NumberPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &NumberPlan {
        &self.plan
    }

    /// Normalize, validate and deduplicate `numbers`.
    ///
    /// Blank and malformed entries are dropped with an issue. Duplicates (after
    /// normalization) are dropped silently. An empty input yields a single
    /// [`NumberIssue::EmptyList`].
    pub fn validate<S: AsRef<str>>(&self, numbers: &[S]) -> ValidatedNumbers {
        let mut validated = ValidatedNumbers::default();
        if numbers.is_empty() {
            validated.issues.push(NumberIssue::EmptyList);
            return validated;
        }

        let mut seen = HashSet::<String>::new();
        for raw in numbers {
            let raw = raw.as_ref();
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                validated.issues.push(NumberIssue::Blank {
                    raw: raw.to_owned(),
                });
                continue;
            }

            let compact = SEPARATORS.replace_all(trimmed, "");
            let normalized = self.normalize(&compact);
            if !self.is_canonical(&normalized) {
                validated.issues.push(NumberIssue::Invalid {
                    raw: raw.to_owned(),
                });
                continue;
            }

            if seen.insert(normalized.clone()) {
                validated
                    .numbers
                    .push(PhoneNumber::from_canonical(normalized));
            }
        }
        validated
    }

    fn normalize(&self, number: &str) -> String {
        if let Some(rest) = number.strip_prefix('+') {
            rest.to_owned()
        } else if let Some(rest) = number.strip_prefix(self.plan.trunk_prefix) {
            format!("{}{rest}", self.plan.country_code)
        } else {
            number.to_owned()
        }
    }

    fn is_canonical(&self, number: &str) -> bool {
        number.len() == self.plan.total_digits() && CANONICAL.is_match(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(validated: &ValidatedNumbers) -> Vec<&str> {
        validated.numbers.iter().map(PhoneNumber::as_str).collect()
    }

    #[test]
    fn strips_plus_and_expands_trunk_prefix() {
        let validated =
            NumberValidator::default().validate(&["+256771234567", "0701234567", "256789012345"]);
        assert_eq!(
            digits(&validated),
            ["256771234567", "256701234567", "256789012345"]
        );
        assert!(validated.issues.is_empty());
    }

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        let validated = NumberValidator::default().validate(&[
            "0771234567",
            "+256701234567",
            "+256771234567",
            "256771234567",
            "0701234567",
        ]);
        assert_eq!(digits(&validated), ["256771234567", "256701234567"]);
        assert!(validated.issues.is_empty());
    }

    #[test]
    fn invalid_entries_are_reported_with_raw_input() {
        let validated =
            NumberValidator::default().validate(&["invalid_number", "0771234567", "123"]);
        assert_eq!(digits(&validated), ["256771234567"]);
        assert_eq!(
            validated.issues,
            [
                NumberIssue::Invalid {
                    raw: "invalid_number".to_owned()
                },
                NumberIssue::Invalid {
                    raw: "123".to_owned()
                },
            ]
        );
        assert_eq!(
            validated.issues[0].to_string(),
            "Number (invalid_number) is not valid!"
        );
    }

    #[test]
    fn empty_list_yields_single_issue() {
        let validated = NumberValidator::default().validate::<&str>(&[]);
        assert!(validated.is_empty());
        assert_eq!(validated.issues, [NumberIssue::EmptyList]);
        assert_eq!(
            validated.issues[0].to_string(),
            "Number list cannot be null or empty"
        );
    }

    #[test]
    fn blank_entries_are_reported_and_skipped() {
        let validated = NumberValidator::default().validate(&["", "   ", "0771234567"]);
        assert_eq!(digits(&validated), ["256771234567"]);
        assert_eq!(validated.issues[0].to_string(), "Number () cannot be null or empty!");
        assert_eq!(
            validated.issues[1].to_string(),
            "Number (   ) cannot be null or empty!"
        );
    }

    #[test]
    fn separators_are_removed_before_normalization() {
        let validated = NumberValidator::default().validate(&[" 0701 234-567 ", "+256 77 1234567"]);
        assert_eq!(digits(&validated), ["256701234567", "256771234567"]);
    }

    #[test]
    fn length_is_checked_after_normalization() {
        let validated = NumberValidator::default().validate(&[
            "+0701234567",
            "07012345678",
            "25677123456",
            "+2567712345678",
            "25677123456a",
        ]);
        assert!(validated.is_empty());
        assert_eq!(validated.issues.len(), 5);
    }

    #[test]
    fn custom_plan_uses_its_country_code_and_length() {
        let plan = NumberPlan::new("254", '0', 9).unwrap();
        let validated = NumberValidator::new(plan).validate(&["0712345678", "+254712345678"]);
        assert_eq!(digits(&validated), ["254712345678"]);
    }

    #[test]
    fn number_plan_rejects_malformed_parts() {
        assert!(NumberPlan::new("", '0', 9).is_err());
        assert!(NumberPlan::new("2567", '0', 9).is_err());
        assert!(NumberPlan::new("25a", '0', 9).is_err());
        assert!(NumberPlan::new("256", 'x', 9).is_err());
        assert!(NumberPlan::new("256", '0', 0).is_err());
        assert!(NumberPlan::new("256", '0', 13).is_err());
        assert_eq!(NumberPlan::new("256", '0', 9).unwrap(), NumberPlan::uganda());
    }
}
