use super::{DateAndTimeEditView, Field, FieldDefinition, FieldEditView, FloatEditView};
use ahash::HashMap;
use backoffice_core::{error::Error, validation::Validation, warn};
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Inputs for creating a field edit view.
#[derive(Debug, Clone)]
pub struct FieldEditContext {
    /// Field definition.
    pub field_definition: FieldDefinition,
    /// Field being edited.
    pub field: Option<Field>,
    /// Locale of the messages.
    pub locale: LanguageIdentifier,
}

impl FieldEditContext {
    /// Creates a new instance.
    #[inline]
    pub fn new(
        field_definition: FieldDefinition,
        field: Option<Field>,
        locale: LanguageIdentifier,
    ) -> Self {
        Self {
            field_definition,
            field,
            locale,
        }
    }
}

/// A constructor of field edit views.
pub type FieldEditViewFactory = fn(FieldEditContext) -> Box<dyn FieldEditView>;

/// Registry of the field edit views keyed by the field type identifier.
pub struct FieldEditViewRegistry {
    factories: HashMap<String, FieldEditViewFactory>,
}

impl Default for FieldEditViewRegistry {
    /// Creates a registry with the `ezdatetime` and `ezfloat` views.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(DateAndTimeEditView::FIELD_TYPE_IDENTIFIER, |ctx| {
            Box::new(DateAndTimeEditView::new(
                ctx.field_definition,
                ctx.field,
                ctx.locale,
            ))
        });
        registry.register(FloatEditView::FIELD_TYPE_IDENTIFIER, |ctx| {
            Box::new(FloatEditView::new(ctx.field_definition, ctx.field, ctx.locale))
        });
        registry
    }
}

impl FieldEditViewRegistry {
    /// Creates a new instance with the built-in views.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry without any view.
    #[inline]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::default(),
        }
    }

    /// Registers a factory for the field type.
    /// An existing factory for the same field type is replaced.
    pub fn register(&mut self, field_type_identifier: &str, factory: FieldEditViewFactory) {
        let replaced = self
            .factories
            .insert(field_type_identifier.to_owned(), factory)
            .is_some();
        if replaced {
            tracing::warn!(
                field_type = field_type_identifier,
                "field edit view has been replaced"
            );
        } else {
            tracing::debug!(field_type = field_type_identifier, "field edit view registered");
        }
    }

    /// Returns `true` if there is a factory for the field type.
    #[inline]
    pub fn contains(&self, field_type_identifier: &str) -> bool {
        self.factories.contains_key(field_type_identifier)
    }

    /// Returns the registered field types in lexicographic order.
    pub fn field_types(&self) -> Vec<&str> {
        let mut field_types = self.factories.keys().map(|s| s.as_str()).collect::<Vec<_>>();
        field_types.sort_unstable();
        field_types
    }

    /// Creates a field edit view for the field definition.
    pub fn create(&self, ctx: FieldEditContext) -> Result<Box<dyn FieldEditView>, Error> {
        let field_type = ctx.field_definition.field_type_identifier();
        let factory = self.factories.get(field_type).ok_or_else(|| {
            warn!(
                "no field edit view for the field type `{}` of `{}`",
                field_type,
                ctx.field_definition.identifier()
            )
        })?;
        Ok(factory(ctx))
    }
}

impl fmt::Debug for FieldEditViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEditViewRegistry")
            .field("field_types", &self.field_types())
            .finish()
    }
}

/// Validates the views and records the failures keyed by the field identifier.
pub fn validate_fields(views: &mut [Box<dyn FieldEditView>]) -> Validation {
    let mut validation = Validation::new();
    for view in views.iter_mut() {
        view.validate();
        if let Some(message) = view.error_status() {
            let key = view.field_definition().identifier().to_owned();
            validation.record(key, message.to_owned());
        }
    }
    validation
}

#[cfg(test)]
mod tests {
    use super::{validate_fields, FieldEditContext, FieldEditViewRegistry};
    use crate::field::{FieldDefinition, FloatEditView};
    use unic_langid::langid;

    #[test]
    fn it_creates_views_by_field_type() {
        let mut registry = FieldEditViewRegistry::new();
        assert_eq!(registry.field_types(), vec!["ezdatetime", "ezfloat"]);

        let mut publish_date = FieldDefinition::new("publish_date", "ezdatetime");
        publish_date.set_required(true);
        let ctx = FieldEditContext::new(publish_date, None, langid!("en-US"));
        let view = registry.create(ctx).unwrap();
        assert_eq!(view.field_type_identifier(), "ezdatetime");

        let summary = FieldDefinition::new("summary", "ezrichtext");
        let ctx = FieldEditContext::new(summary.clone(), None, langid!("en-US"));
        assert!(registry.create(ctx).is_err());

        registry.register("ezrichtext", |ctx| {
            Box::new(FloatEditView::new(ctx.field_definition, ctx.field, ctx.locale))
        });
        assert!(registry.contains("ezrichtext"));
        let ctx = FieldEditContext::new(summary, None, langid!("en-US"));
        assert_eq!(registry.create(ctx).unwrap().field_type_identifier(), "ezfloat");
        assert!(!FieldEditViewRegistry::empty().contains("ezfloat"));
    }

    #[test]
    fn it_validates_fields() {
        let registry = FieldEditViewRegistry::default();
        let mut publish_date = FieldDefinition::new("publish_date", "ezdatetime");
        publish_date.set_required(true);
        let price = FieldDefinition::new("price", "ezfloat");
        let mut views = vec![
            registry
                .create(FieldEditContext::new(publish_date, None, langid!("en-US")))
                .unwrap(),
            registry
                .create(FieldEditContext::new(price, None, langid!("en-US")))
                .unwrap(),
        ];
        let validation = validate_fields(&mut views);
        assert!(!validation.is_success());
        assert_eq!(validation.invalid_params(), vec!["publish_date"]);

        views[1].change_input_value("float", "1e5").unwrap();
        let map = validate_fields(&mut views).into_map();
        assert_eq!(map["price"], "The value should be a valid float number");
        assert_eq!(map["publish_date"], "Date and time are required");
    }
}
