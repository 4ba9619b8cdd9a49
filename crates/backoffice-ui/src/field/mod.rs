//! Field edit views for the content editing forms.
//!
//! A field edit view owns the input controls of one content field,
//! validates them on `blur` and `valuechange` events and exposes
//! the localized error message together with the template variables.

use backoffice_core::{error::Error, extension::JsonObjectExt, JsonValue, Map};
use serde::{Deserialize, Serialize};

mod date_and_time;
mod float;
mod input;
mod registry;

pub use date_and_time::{
    classify, compose_date_time, compose_date_time_with_offset, parse_time, DateAndTimeEditView,
    DateTimeError,
};
pub use float::FloatEditView;
pub use input::{InputControl, InputKind, InputValidity};
pub use registry::{validate_fields, FieldEditContext, FieldEditViewFactory, FieldEditViewRegistry};

/// Metadata describing a field of a content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct FieldDefinition {
    /// Field identifier in the content type.
    identifier: String,
    /// Identifier of the field type, such as `ezdatetime` or `ezfloat`.
    field_type_identifier: String,
    /// A flag which indicates whether the field is required.
    is_required: bool,
    /// Type specific settings.
    field_settings: Map,
    /// Configuration of the validators keyed by the validator name.
    validator_configuration: Map,
}

impl FieldDefinition {
    /// Creates a new instance.
    #[inline]
    pub fn new(identifier: impl Into<String>, field_type_identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            field_type_identifier: field_type_identifier.into(),
            ..Self::default()
        }
    }

    /// Sets the `is_required` flag.
    #[inline]
    pub fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }

    /// Sets a type specific setting.
    #[inline]
    pub fn set_field_setting(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.field_settings.upsert(key, value);
    }

    /// Sets the configuration for a validator.
    #[inline]
    pub fn set_validator_configuration(&mut self, validator: impl Into<String>, config: Map) {
        self.validator_configuration.upsert(validator, config);
    }

    /// Returns the field identifier.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the field type identifier.
    #[inline]
    pub fn field_type_identifier(&self) -> &str {
        &self.field_type_identifier
    }

    /// Returns `true` if the field is required.
    #[inline]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Returns a reference to the type specific settings.
    #[inline]
    pub fn field_settings(&self) -> &Map {
        &self.field_settings
    }

    /// Returns the configuration of the validator.
    #[inline]
    pub fn validator_config(&self, validator: &str) -> Option<&Map> {
        self.validator_configuration.get_object(validator)
    }
}

/// A field of a content item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Field {
    /// Identifier of the field definition.
    field_definition_identifier: String,
    /// Type specific value.
    field_value: JsonValue,
}

impl Field {
    /// Creates a new instance.
    #[inline]
    pub fn new(field_definition_identifier: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            field_definition_identifier: field_definition_identifier.into(),
            field_value: value.into(),
        }
    }

    /// Returns the identifier of the field definition.
    #[inline]
    pub fn field_definition_identifier(&self) -> &str {
        &self.field_definition_identifier
    }

    /// Returns a reference to the field value.
    #[inline]
    pub fn field_value(&self) -> &JsonValue {
        &self.field_value
    }
}

/// Events of an input control which trigger the validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// The control lost the focus.
    Blur,
    /// The value of the control has been changed.
    ValueChange,
}

/// Common interfaces of the field edit views.
pub trait FieldEditView: Send + Sync {
    /// Returns the field type identifier handled by the view.
    fn field_type_identifier(&self) -> &'static str;

    /// Returns a reference to the field definition.
    fn field_definition(&self) -> &FieldDefinition;

    /// Updates the text of the named input control.
    fn set_input_value(&mut self, control: &str, value: &str) -> Result<(), Error>;

    /// Validates the current input and updates the error status.
    fn validate(&mut self);

    /// Returns the localized error message of the last validation.
    fn error_status(&self) -> Option<&str>;

    /// Returns the variables for the field edit template.
    fn variables(&self) -> Map;

    /// Returns the currently filled value, or `null` if it can not be determined.
    fn field_value(&self) -> JsonValue;

    /// Returns `true` if the last validation did not report an error.
    #[inline]
    fn is_valid(&self) -> bool {
        self.error_status().is_none()
    }

    /// Handles an event of the input controls.
    #[inline]
    fn handle_event(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::Blur | FieldEvent::ValueChange => self.validate(),
        }
    }

    /// Updates the named input control and handles the `valuechange` event.
    fn change_input_value(&mut self, control: &str, value: &str) -> Result<(), Error> {
        self.set_input_value(control, value)?;
        self.handle_event(FieldEvent::ValueChange);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FieldDefinition};
    use backoffice_core::json;

    #[test]
    fn it_deserializes_field_definition() {
        let definition: FieldDefinition = serde_json::from_value(json!({
            "identifier": "price",
            "fieldTypeIdentifier": "ezfloat",
            "isRequired": true,
            "validatorConfiguration": {
                "FloatValueValidator": { "minFloatValue": 0.5, "maxFloatValue": false },
            },
        }))
        .unwrap();
        assert_eq!(definition.identifier(), "price");
        assert_eq!(definition.field_type_identifier(), "ezfloat");
        assert!(definition.is_required());
        assert!(definition.field_settings().is_empty());
        assert!(definition.validator_config("FloatValueValidator").is_some());
        assert!(definition.validator_config("StringLengthValidator").is_none());

        let field: Field = serde_json::from_value(json!({
            "fieldDefinitionIdentifier": "publish_date",
            "fieldValue": { "timestamp": 1_709_300_730 },
        }))
        .unwrap();
        assert_eq!(field.field_definition_identifier(), "publish_date");
        assert_eq!(field.field_value()["timestamp"], 1_709_300_730);
    }
}
