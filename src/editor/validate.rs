//! Field validation for the customer form
//!
//! [`validate`] is a total, pure function: every rule runs on every call and
//! the result lists at most one message per field.

use super::form::{Field, FormState};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

pub const NAME_REQUIRED: &str = "Name is required";
pub const USERNAME_REQUIRED: &str = "Username is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email address is invalid";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const PHONE_INVALID: &str = "Phone number is invalid (must be 10 digits)";
pub const BALANCE_REQUIRED: &str = "Balance is required";
pub const BALANCE_INVALID: &str = "Balance must be a positive number";

/// Per-field error messages from the latest validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    errors: FxHashMap<Field, &'static str>,
}

impl ErrorState {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Errors in on-screen field order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|msg| (field, msg)))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }
}

/// Validate every field of the form
pub fn validate(form: &FormState) -> ErrorState {
    let mut errors = ErrorState::default();

    if is_blank(&form.name) {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    if is_blank(&form.username) {
        errors.insert(Field::Username, USERNAME_REQUIRED);
    }

    if is_blank(&form.email) {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !EMAIL_PATTERN.is_match(&form.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if is_blank(&form.phone) {
        errors.insert(Field::Phone, PHONE_REQUIRED);
    } else if !PHONE_PATTERN.is_match(&form.phone) {
        errors.insert(Field::Phone, PHONE_INVALID);
    }

    if is_blank(&form.balance) {
        errors.insert(Field::Balance, BALANCE_REQUIRED);
    } else if !is_positive_number(&form.balance) {
        errors.insert(Field::Balance, BALANCE_INVALID);
    }

    errors
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Some whitespace-free run shaped like `local@domain.tld`
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("EMAIL_PATTERN failed"));

/// Exactly ten ASCII digits, nothing around them
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("PHONE_PATTERN failed"));

fn is_positive_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite() && n > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_form() -> FormState {
        FormState {
            name: "A".to_string(),
            username: "b".to_string(),
            email: "a@b.com".to_string(),
            phone: "1234567890".to_string(),
            balance: "10".to_string(),
        }
    }

    #[test]
    fn test_empty_form_has_one_error_per_field() {
        let errors = validate(&FormState::default());

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(Field::Username), Some(USERNAME_REQUIRED));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(Field::Phone), Some(PHONE_REQUIRED));
        assert_eq!(errors.get(Field::Balance), Some(BALANCE_REQUIRED));
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_blank_name_is_required() {
        let mut form = valid_form();
        form.name = "   ".to_string();
        assert_eq!(validate(&form).get(Field::Name), Some(NAME_REQUIRED));
    }

    #[rstest]
    #[case("foo", Some(EMAIL_INVALID))]
    #[case("foo@bar", Some(EMAIL_INVALID))]
    #[case("@bar.com", Some(EMAIL_INVALID))]
    #[case("foo@.com", Some(EMAIL_INVALID))]
    #[case("foo@bar.", Some(EMAIL_INVALID))]
    #[case("a @b.com", Some(EMAIL_INVALID))]
    #[case("a@b.c", None)]
    #[case("first.last@mail.example.org", None)]
    #[case("contact: a@b.co (work)", None)]
    #[case("x a@b.c y", None)]
    #[case("a@.b.c", None)]
    fn test_email_pattern(#[case] email: &str, #[case] expected: Option<&str>) {
        let mut form = valid_form();
        form.email = email.to_string();
        assert_eq!(validate(&form).get(Field::Email), expected);
    }

    #[rstest]
    #[case("123", Some(PHONE_INVALID))]
    #[case("12345678901", Some(PHONE_INVALID))]
    #[case("123-456-789", Some(PHONE_INVALID))]
    #[case(" 1234567890", Some(PHONE_INVALID))]
    #[case("1234567890\n", Some(PHONE_INVALID))]
    #[case("١٢٣٤٥٦٧٨٩٠", Some(PHONE_INVALID))]
    #[case("0123456789", None)]
    fn test_phone_must_be_ten_digits(#[case] phone: &str, #[case] expected: Option<&str>) {
        let mut form = valid_form();
        form.phone = phone.to_string();
        assert_eq!(validate(&form).get(Field::Phone), expected);
    }

    #[rstest]
    #[case("-5", Some(BALANCE_INVALID))]
    #[case("abc", Some(BALANCE_INVALID))]
    #[case("0", Some(BALANCE_INVALID))]
    #[case("inf", Some(BALANCE_INVALID))]
    #[case("NaN", Some(BALANCE_INVALID))]
    #[case("", Some(BALANCE_REQUIRED))]
    #[case("0.01", None)]
    #[case(" 250 ", None)]
    #[case("1e3", None)]
    fn test_balance_must_be_positive(#[case] balance: &str, #[case] expected: Option<&str>) {
        let mut form = valid_form();
        form.balance = balance.to_string();
        assert_eq!(validate(&form).get(Field::Balance), expected);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mut form = valid_form();
        form.email = "nope".to_string();
        form.phone = String::new();
        assert_eq!(validate(&form), validate(&form));
        assert_eq!(
            validate(&form).iter().collect::<Vec<_>>(),
            vec![(Field::Email, EMAIL_INVALID), (Field::Phone, PHONE_REQUIRED)]
        );
    }
}
