use super::{Field, FieldDefinition, FieldEditView, InputControl, InputKind};
use crate::localize;
use backoffice_core::{
    bail, error::Error, extension::JsonObjectExt, validation::FloatValidator, JsonValue, Map,
    SharedString,
};
use fluent::FluentArgs;
use unic_langid::LanguageIdentifier;

/// Edit view for the `ezfloat` field type.
#[derive(Debug, Clone)]
pub struct FloatEditView {
    field_definition: FieldDefinition,
    field: Option<Field>,
    locale: LanguageIdentifier,
    input: InputControl,
    error_status: Option<SharedString>,
}

impl FloatEditView {
    /// Field type identifier.
    pub const FIELD_TYPE_IDENTIFIER: &'static str = "ezfloat";

    /// Name of the validator holding the range configuration.
    pub const VALIDATOR_NAME: &'static str = "FloatValueValidator";

    /// Creates a new instance.
    pub fn new(
        field_definition: FieldDefinition,
        field: Option<Field>,
        locale: LanguageIdentifier,
    ) -> Self {
        let value = field
            .as_ref()
            .and_then(|field| field.field_value().as_f64())
            .map(|value| value.to_string())
            .unwrap_or_default();
        let input = InputControl::new(InputKind::Float, value, field_definition.is_required());
        Self {
            field_definition,
            field,
            locale,
            input,
            error_status: None,
        }
    }

    /// Returns a reference to the field being edited.
    #[inline]
    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    /// Returns a reference to the float control.
    #[inline]
    pub fn input(&self) -> &InputControl {
        &self.input
    }

    /// Returns the configured minimum value.
    #[inline]
    pub fn min_float_value(&self) -> Option<f64> {
        self.validator_config()
            .and_then(|config| config.get_f64("minFloatValue"))
    }

    /// Returns the configured maximum value.
    #[inline]
    pub fn max_float_value(&self) -> Option<f64> {
        self.validator_config()
            .and_then(|config| config.get_f64("maxFloatValue"))
    }

    /// Returns the range configuration.
    #[inline]
    fn validator_config(&self) -> Option<&Map> {
        self.field_definition.validator_config(Self::VALIDATOR_NAME)
    }

    /// Returns the arguments of the range messages.
    fn range_args(&self) -> FluentArgs<'static> {
        let mut args = FluentArgs::new();
        if let Some(min) = self.min_float_value() {
            args.set("minFloatValue", min);
        }
        if let Some(max) = self.max_float_value() {
            args.set("maxFloatValue", max);
        }
        args
    }
}

impl FieldEditView for FloatEditView {
    #[inline]
    fn field_type_identifier(&self) -> &'static str {
        Self::FIELD_TYPE_IDENTIFIER
    }

    #[inline]
    fn field_definition(&self) -> &FieldDefinition {
        &self.field_definition
    }

    fn set_input_value(&mut self, control: &str, value: &str) -> Result<(), Error> {
        if control != "float" {
            bail!("unknown input control `{}` for the float field", control);
        }
        self.input.set_value(value);
        Ok(())
    }

    fn validate(&mut self) {
        let value = self.input.value();
        if value.contains(',') {
            let corrected = value.replacen(',', ".", 1);
            self.input.set_value(corrected);
        }

        let validity = self.input.validity();
        let number = self.input.value_as_number();
        let message = if validity.value_missing() {
            Some(localize(&self.locale, "this-field-is-required", None))
        } else if validity.pattern_mismatch() {
            Some(localize(&self.locale, "invalid-float-value", None))
        } else if number.zip(self.max_float_value()).is_some_and(|(n, max)| n > max) {
            let args = self.range_args();
            Some(localize(&self.locale, "float-value-should-be-less-than", Some(args)))
        } else if number.zip(self.min_float_value()).is_some_and(|(n, min)| n < min) {
            let args = self.range_args();
            Some(localize(&self.locale, "float-value-should-be-more-than", Some(args)))
        } else {
            None
        };
        tracing::debug!(
            field = self.field_definition.identifier(),
            valid = message.is_none(),
            "float value validated"
        );
        self.error_status = message;
    }

    #[inline]
    fn error_status(&self) -> Option<&str> {
        self.error_status.as_deref()
    }

    fn variables(&self) -> Map {
        let mut map = Map::from_entry("isRequired", self.field_definition.is_required());
        map.upsert("floatPattern", FloatValidator::PATTERN);
        map.upsert(
            "minFloatValue",
            self.min_float_value().map_or(JsonValue::Bool(false), JsonValue::from),
        );
        map.upsert(
            "maxFloatValue",
            self.max_float_value().map_or(JsonValue::Bool(false), JsonValue::from),
        );
        map
    }

    #[inline]
    fn field_value(&self) -> JsonValue {
        self.input
            .value_as_number()
            .map_or(JsonValue::Null, JsonValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::FloatEditView;
    use crate::field::{Field, FieldDefinition, FieldEditView};
    use backoffice_core::{extension::JsonObjectExt, json, JsonValue, Map};
    use unic_langid::langid;

    fn price_definition(required: bool, range: JsonValue) -> FieldDefinition {
        let mut definition = FieldDefinition::new("price", "ezfloat");
        definition.set_required(required);
        if let JsonValue::Object(config) = range {
            definition.set_validator_configuration(FloatEditView::VALIDATOR_NAME, config);
        }
        definition
    }

    #[test]
    fn it_validates_float_values() {
        let range = json!({ "minFloatValue": 0.5, "maxFloatValue": 10.5 });
        let definition = price_definition(true, range);
        let mut view = FloatEditView::new(definition, None, langid!("en-US"));
        view.validate();
        assert_eq!(view.error_status(), Some("This field is required"));

        view.change_input_value("float", "3,25").unwrap();
        assert!(view.is_valid());
        assert_eq!(view.input().value(), "3.25");
        assert_eq!(view.field_value(), json!(3.25));

        view.change_input_value("float", "3.2.5").unwrap();
        assert_eq!(
            view.error_status(),
            Some("The value should be a valid float number")
        );
        assert_eq!(view.field_value(), JsonValue::Null);

        view.change_input_value("float", "12").unwrap();
        assert_eq!(
            view.error_status(),
            Some("The value should be less than or equal to 10.5")
        );

        view.change_input_value("float", "0,25").unwrap();
        assert_eq!(
            view.error_status(),
            Some("The value should be more than or equal to 0.5")
        );
        assert!(view.set_input_value("date", "2024-03-01").is_err());
    }

    #[test]
    fn it_honors_zero_bounds() {
        let definition = price_definition(false, json!({ "minFloatValue": 0.0 }));
        let mut view = FloatEditView::new(definition, None, langid!("en-US"));
        view.validate();
        assert!(view.is_valid());

        view.change_input_value("float", "-1").unwrap();
        assert_eq!(
            view.error_status(),
            Some("The value should be more than or equal to 0")
        );

        let variables = view.variables();
        assert_eq!(variables["isRequired"], false);
        assert_eq!(variables.get_f64("minFloatValue"), Some(0.0));
        assert_eq!(variables.get_bool("maxFloatValue"), Some(false));
        assert_eq!(variables.get_str("floatPattern"), Some(r"-?\d*\.?\d+"));
    }

    #[test]
    fn it_fills_control_from_field_value() {
        let definition = price_definition(false, JsonValue::Object(Map::new()));
        let field = Field::new("price", 2.5);
        let view = FloatEditView::new(definition, Some(field), langid!("zh-CN"));
        assert_eq!(view.input().value(), "2.5");
        assert_eq!(view.field_value(), json!(2.5));
        assert_eq!(view.variables()["minFloatValue"], false);
    }
}
