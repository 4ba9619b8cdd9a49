use backoffice_core::{
    datetime::{Date, Time},
    validation::{FloatValidator, Validator},
};
use serde::Serialize;
use strum::{AsRefStr, Display, IntoStaticStr};

/// A snapshot of the validity state of an input control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValidity {
    /// The text is present but can not be parsed.
    bad_input: bool,
    /// The control is required but the text is empty.
    value_missing: bool,
    /// The control does not report a numeric value.
    /// A numeric value of zero is reported as missing too.
    missing_native: bool,
    /// The text does not match the pattern of the control.
    pattern_mismatch: bool,
}

impl InputValidity {
    /// Creates a new instance.
    #[inline]
    pub fn new(bad_input: bool, value_missing: bool, missing_native: bool) -> Self {
        Self {
            bad_input,
            value_missing,
            missing_native,
            pattern_mismatch: false,
        }
    }

    /// Sets the `pattern_mismatch` flag.
    #[inline]
    pub fn set_pattern_mismatch(&mut self, pattern_mismatch: bool) {
        self.pattern_mismatch = pattern_mismatch;
    }

    /// Returns `true` if the text can not be parsed.
    #[inline]
    pub fn bad_input(&self) -> bool {
        self.bad_input
    }

    /// Returns `true` if the control is required and empty.
    #[inline]
    pub fn value_missing(&self) -> bool {
        self.value_missing
    }

    /// Returns `true` if the control does not report a usable numeric value.
    #[inline]
    pub fn missing_native(&self) -> bool {
        self.missing_native
    }

    /// Returns `true` if the text does not match the pattern.
    #[inline]
    pub fn pattern_mismatch(&self) -> bool {
        self.pattern_mismatch
    }

    /// Returns `true` if none of the constraints is violated.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !(self.bad_input || self.value_missing || self.pattern_mismatch)
    }
}

/// Kind of an input control.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputKind {
    /// A date control with the `%Y-%m-%d` value format.
    Date,
    /// A time control with the `%H:%M[:%S]` value format.
    Time,
    /// A text control holding a float number.
    Float,
}

/// An input control of a field edit view.
#[derive(Debug, Clone, PartialEq)]
pub struct InputControl {
    /// Kind of the control.
    kind: InputKind,
    /// Current text.
    value: String,
    /// A flag which indicates whether the control has the `required` attribute.
    required: bool,
    /// Validity of the current text.
    validity: InputValidity,
}

impl InputControl {
    /// Creates a new instance and derives the validity from the text.
    pub fn new(kind: InputKind, value: impl Into<String>, required: bool) -> Self {
        let mut control = Self {
            kind,
            value: value.into(),
            required,
            validity: InputValidity::default(),
        };
        control.validity = control.derive_validity();
        control
    }

    /// Overrides the derived validity with a snapshot reported elsewhere.
    #[inline]
    #[must_use]
    pub fn with_validity(mut self, validity: InputValidity) -> Self {
        self.validity = validity;
        self
    }

    /// Overrides the validity until the text is updated.
    #[inline]
    pub fn set_validity(&mut self, validity: InputValidity) {
        self.validity = validity;
    }

    /// Updates the text and derives the validity again.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.validity = self.derive_validity();
    }

    /// Sets the `required` attribute and derives the validity again.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        self.validity = self.derive_validity();
    }

    /// Returns the kind of the control.
    #[inline]
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Returns the current text.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if the control is required.
    #[inline]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the validity snapshot.
    #[inline]
    pub fn validity(&self) -> InputValidity {
        self.validity
    }

    /// Returns the numeric value of the text.
    ///
    /// Dates are reported in milliseconds since the epoch
    /// and times in milliseconds since midnight.
    pub fn value_as_number(&self) -> Option<f64> {
        let value = self.value.as_str();
        match self.kind {
            InputKind::Date => value
                .parse::<Date>()
                .ok()
                .map(|date| (date.num_secs_from_epoch() * 1000) as f64),
            InputKind::Time => value
                .parse::<Time>()
                .ok()
                .map(|time| f64::from(time.num_millis_from_midnight())),
            InputKind::Float => {
                if FloatValidator.validate(value).is_ok() {
                    value.parse::<f64>().ok()
                } else {
                    None
                }
            }
        }
    }

    /// Derives the validity in the same way as the native form controls.
    fn derive_validity(&self) -> InputValidity {
        if self.value.is_empty() {
            return InputValidity::new(false, self.required, true);
        }

        let number = self.value_as_number();
        let missing_native = number.is_none_or(|n| n == 0.0);
        match self.kind {
            InputKind::Date | InputKind::Time => {
                InputValidity::new(number.is_none(), false, missing_native)
            }
            InputKind::Float => {
                let mut validity = InputValidity::new(false, false, missing_native);
                validity.set_pattern_mismatch(FloatValidator.validate(&self.value).is_err());
                validity
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InputControl, InputKind, InputValidity};

    #[test]
    fn it_derives_date_and_time_validity() {
        let date = InputControl::new(InputKind::Date, "2024-03-01", true);
        assert_eq!(date.validity(), InputValidity::new(false, false, false));
        assert_eq!(date.value_as_number(), Some(1_709_251_200_000.0));

        let mut date = InputControl::new(InputKind::Date, "", true);
        assert_eq!(date.validity(), InputValidity::new(false, true, true));
        date.set_required(false);
        assert_eq!(date.validity(), InputValidity::new(false, false, true));

        date.set_value("abcd");
        assert!(date.validity().bad_input());
        assert!(date.validity().missing_native());
        assert!(!date.validity().value_missing());

        date.set_value("1970-01-01");
        assert!(!date.validity().bad_input());
        assert!(date.validity().missing_native());

        let time = InputControl::new(InputKind::Time, "13:45", false);
        assert_eq!(time.value_as_number(), Some(49_500_000.0));
        assert!(time.validity().is_valid());

        let midnight = InputControl::new(InputKind::Time, "00:00", true);
        assert!(midnight.validity().missing_native());
        assert!(!midnight.validity().value_missing());

        let time = InputControl::new(InputKind::Time, "25:61", false);
        assert!(time.validity().bad_input());
        assert_eq!(InputKind::Time.as_ref(), "time");
    }

    #[test]
    fn it_derives_float_validity() {
        let float = InputControl::new(InputKind::Float, "-2.5", true);
        assert!(float.validity().is_valid());
        assert_eq!(float.value_as_number(), Some(-2.5));

        let float = InputControl::new(InputKind::Float, "2,5", false);
        assert!(float.validity().pattern_mismatch());
        assert!(!float.validity().bad_input());
        assert_eq!(float.value_as_number(), None);

        let float = InputControl::new(InputKind::Float, "", false);
        assert!(!float.validity().pattern_mismatch());
        assert!(float.validity().is_valid());

        let overridden = InputControl::new(InputKind::Float, "3", false)
            .with_validity(InputValidity::new(true, false, true));
        assert!(overridden.validity().bad_input());
    }
}
