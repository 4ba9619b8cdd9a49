use super::{Field, FieldDefinition, FieldEditView, InputControl, InputKind, InputValidity};
use crate::localize;
use backoffice_core::{
    bail,
    datetime::{Date, DateTime},
    error::Error,
    extension::JsonObjectExt,
    JsonValue, Map, SharedString,
};
use chrono::{FixedOffset, Local, Offset, TimeZone};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};
use unic_langid::LanguageIdentifier;

/// Classification of the date and time input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    AsRefStr,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum DateTimeError {
    /// No error.
    #[default]
    #[serde(rename = "NONE")]
    #[strum(serialize = "NONE")]
    NoError,
    /// Both the date and the time can not be parsed.
    DateTimeInvalid,
    /// The date can not be parsed and the required time is missing.
    DateInvalidTimeRequired,
    /// The date can not be parsed.
    DateInvalid,
    /// The time can not be parsed and the required date is missing.
    TimeInvalidDateRequired,
    /// The time can not be parsed.
    TimeInvalid,
    /// Both the date and the time are required.
    DateTimeRequired,
    /// The time is required.
    TimeRequired,
    /// The date is required.
    DateRequired,
    /// The date can not be parsed and the optional time is missing.
    DateInvalidTimeMissing,
    /// The time can not be parsed and the optional date is missing.
    TimeInvalidDateMissing,
}

impl DateTimeError {
    /// Returns the numeric code.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns `true` if it is an error.
    #[inline]
    pub fn is_error(self) -> bool {
        self != Self::NoError
    }

    /// Returns the key of the localization message.
    pub fn message_key(self) -> Option<&'static str> {
        let key = match self {
            Self::NoError => return None,
            Self::DateTimeInvalid => "date-and-time-not-valid",
            Self::DateInvalidTimeRequired => "date-not-valid-time-required",
            Self::DateInvalid => "date-not-valid",
            Self::TimeInvalidDateRequired => "time-not-valid-date-required",
            Self::TimeInvalid => "time-not-valid",
            Self::DateTimeRequired => "date-time-required",
            Self::TimeRequired => "time-required",
            Self::DateRequired => "date-required",
            Self::DateInvalidTimeMissing => "date-not-valid-time-missing",
            Self::TimeInvalidDateMissing => "time-not-valid-date-missing",
        };
        Some(key)
    }
}

impl From<DateTimeError> for JsonValue {
    #[inline]
    fn from(value: DateTimeError) -> Self {
        value.as_ref().into()
    }
}

/// Classifies the validity of the date and time controls.
///
/// A missing side is not reported when the other side is missing too,
/// unless the other side can not be parsed.
pub fn classify(date: &InputValidity, time: &InputValidity, required: bool) -> DateTimeError {
    let bad_input_date = date.bad_input();
    let bad_input_time = time.bad_input();
    let missing_date = date.missing_native() && (!time.missing_native() || bad_input_time);
    let missing_time = time.missing_native() && (!date.missing_native() || bad_input_date);

    if bad_input_date && bad_input_time {
        DateTimeError::DateTimeInvalid
    } else if bad_input_date {
        match (missing_time, required) {
            (true, true) => DateTimeError::DateInvalidTimeRequired,
            (true, false) => DateTimeError::DateInvalidTimeMissing,
            (false, _) => DateTimeError::DateInvalid,
        }
    } else if bad_input_time {
        match (missing_date, required) {
            (true, true) => DateTimeError::TimeInvalidDateRequired,
            (true, false) => DateTimeError::TimeInvalidDateMissing,
            (false, _) => DateTimeError::TimeInvalid,
        }
    } else if required {
        match (date.value_missing(), time.value_missing()) {
            (true, true) => DateTimeError::DateTimeRequired,
            (false, true) => DateTimeError::TimeRequired,
            (true, false) => DateTimeError::DateRequired,
            (false, false) => DateTimeError::NoError,
        }
    } else if missing_date {
        // An optional side left empty while the other one is filled.
        DateTimeError::DateInvalid
    } else if missing_time {
        DateTimeError::TimeInvalid
    } else {
        DateTimeError::NoError
    }
}

/// Parses the time in the `hours:minutes[:seconds]` format and returns the number of seconds.
///
/// Returns `None` if a part is not an integer or the total overflows.
pub fn parse_time(time: &str) -> Option<i64> {
    let parts = time.split(':').collect::<Vec<_>>();
    if parts.len() < 2 {
        return None;
    }

    let hours = parts[0].trim().parse::<i64>().ok()?;
    let minutes = parts[1].trim().parse::<i64>().ok()?;
    let seconds = match parts.get(2) {
        Some(s) => s.trim().parse::<i64>().ok()?,
        None => 0,
    };
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Returns the number of local seconds since the epoch.
fn local_timestamp(date: &str, time: &str) -> Option<i64> {
    let date = date.trim().parse::<Date>().ok()?;
    let time = parse_time(time)?;
    date.num_secs_from_epoch().checked_add(time)
}

/// Composes the date and time texts into an instant with the fixed UTC offset.
pub fn compose_date_time_with_offset(
    date: &str,
    time: &str,
    offset: FixedOffset,
) -> Option<DateTime> {
    let secs = local_timestamp(date, time)?;
    DateTime::from_timestamp(secs.checked_sub(offset.local_minus_utc().into())?)
}

/// Composes the date and time texts into an instant in the local time zone.
///
/// The UTC offset is evaluated at the local timestamp taken as a UTC one.
pub fn compose_date_time(date: &str, time: &str) -> Option<DateTime> {
    let secs = local_timestamp(date, time)?;
    let naive = chrono::DateTime::from_timestamp(secs, 0)?.naive_utc();
    let offset = Local.offset_from_utc_datetime(&naive).fix();
    DateTime::from_timestamp(secs.checked_sub(offset.local_minus_utc().into())?)
}

/// Edit view for the `ezdatetime` field type.
#[derive(Debug, Clone)]
pub struct DateAndTimeEditView {
    /// Field definition.
    field_definition: FieldDefinition,
    /// Field being edited.
    field: Option<Field>,
    /// Locale of the messages.
    locale: LanguageIdentifier,
    /// Date control.
    date_input: InputControl,
    /// Time control.
    time_input: InputControl,
    /// Classification of the last validation.
    validate_error: Option<DateTimeError>,
    /// Message of the last validation.
    error_status: Option<SharedString>,
}

impl DateAndTimeEditView {
    /// Field type identifier.
    pub const FIELD_TYPE_IDENTIFIER: &'static str = "ezdatetime";

    /// Creates a new instance.
    ///
    /// The controls are filled with the local date and time of the field value.
    pub fn new(
        field_definition: FieldDefinition,
        field: Option<Field>,
        locale: LanguageIdentifier,
    ) -> Self {
        let required = field_definition.is_required();
        let (date, time) = field
            .as_ref()
            .and_then(|field| field.field_value().as_object())
            .and_then(|value| value.get_i64("timestamp"))
            .and_then(DateTime::from_timestamp)
            .map(|dt| (dt.format_date(), dt.format_time()))
            .unwrap_or_default();
        Self {
            field_definition,
            field,
            locale,
            date_input: InputControl::new(InputKind::Date, date, required),
            time_input: InputControl::new(InputKind::Time, time, required),
            validate_error: None,
            error_status: None,
        }
    }

    /// Returns a reference to the field being edited.
    #[inline]
    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    /// Returns a reference to the date control.
    #[inline]
    pub fn date_input(&self) -> &InputControl {
        &self.date_input
    }

    /// Returns a reference to the time control.
    #[inline]
    pub fn time_input(&self) -> &InputControl {
        &self.time_input
    }

    /// Overrides the validity of the date control.
    #[inline]
    pub fn set_date_validity(&mut self, validity: InputValidity) {
        self.date_input.set_validity(validity);
    }

    /// Overrides the validity of the time control.
    #[inline]
    pub fn set_time_validity(&mut self, validity: InputValidity) {
        self.time_input.set_validity(validity);
    }

    /// Returns the classification of the last validation.
    #[inline]
    pub fn validate_error(&self) -> Option<DateTimeError> {
        self.validate_error
    }

    /// Validates the controls and returns the classification.
    pub fn validate_input(&mut self) -> DateTimeError {
        let error = classify(
            &self.date_input.validity(),
            &self.time_input.validity(),
            self.field_definition.is_required(),
        );
        self.error_status = error
            .message_key()
            .map(|key| localize(&self.locale, key, None));
        self.validate_error = Some(error);
        tracing::debug!(
            field = self.field_definition.identifier(),
            error = error.as_ref(),
            "date and time validated"
        );
        error
    }

    /// Returns the composed instant of the controls.
    #[inline]
    pub fn current_value(&self) -> Option<DateTime> {
        compose_date_time(self.date_input.value(), self.time_input.value())
    }
}

impl FieldEditView for DateAndTimeEditView {
    #[inline]
    fn field_type_identifier(&self) -> &'static str {
        Self::FIELD_TYPE_IDENTIFIER
    }

    #[inline]
    fn field_definition(&self) -> &FieldDefinition {
        &self.field_definition
    }

    fn set_input_value(&mut self, control: &str, value: &str) -> Result<(), Error> {
        match control {
            "date" => self.date_input.set_value(value),
            "time" => self.time_input.set_value(value),
            _ => bail!("unknown input control `{}` for the date and time field", control),
        }
        Ok(())
    }

    #[inline]
    fn validate(&mut self) {
        self.validate_input();
    }

    #[inline]
    fn error_status(&self) -> Option<&str> {
        self.error_status.as_deref()
    }

    fn variables(&self) -> Map {
        let use_seconds = self
            .field_definition
            .field_settings()
            .get_bool("useSeconds")
            .unwrap_or_default();
        let mut map = Map::from_entry("isRequired", self.field_definition.is_required());
        map.upsert("html5InputDate", self.date_input.value());
        map.upsert("html5InputTime", self.time_input.value());
        map.upsert("useSeconds", use_seconds);
        map
    }

    fn field_value(&self) -> JsonValue {
        match self.current_value() {
            Some(dt) => Map::from_entry("timestamp", dt.timestamp()).into(),
            None => JsonValue::Null,
        }
    }
}
