use super::Validator;
use crate::{bail, error::Error, LazyLock};
use regex::Regex;

/// A validator for the decimal notation of floating-point numbers.
///
/// The whole input should match [`FloatValidator::PATTERN`],
/// so exponents, a leading `+` and a trailing `.` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatValidator;

impl FloatValidator {
    /// The pattern for the float values.
    pub const PATTERN: &'static str = r"-?\d*\.?\d+";
}

impl Validator<str> for FloatValidator {
    type Error = Error;

    #[inline]
    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        if !FLOAT_PATTERN.is_match(data) {
            bail!("the value `{}` does not match the float pattern", data);
        }
        Ok(())
    }
}

/// Anchored regex for the float pattern.
static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!("^(?:{})$", FloatValidator::PATTERN);
    Regex::new(&pattern).expect("fail to create a regex for the float pattern")
});

#[cfg(test)]
mod tests {
    use super::{FloatValidator, Validator};

    #[test]
    fn it_validates_float_values() {
        for value in ["3", "-3", "3.14", ".5", "-.5", "0010.25"] {
            assert!(FloatValidator.validate(value).is_ok(), "{value}");
        }
        for value in ["", "3.", "+3", "1e5", "3,14", "1.2.3", " 3", "abc"] {
            assert!(FloatValidator.validate(value).is_err(), "{value}");
        }
    }
}
