//! Restriction derivation: an ordered, extensible chain of derivers, each
//! consuming the validation rules of one field and emitting schema-level
//! constraints.

mod custom;
mod enumeration;
mod exclusion;
mod length;
mod numericality;
mod pattern;

pub use custom::CustomRestriction;
pub use enumeration::EnumerationRestriction;
pub use exclusion::ExclusionRestriction;
pub use length::LengthRestriction;
pub use numericality::NumericalityRestriction;
pub use pattern::PatternRestriction;

use xsdgen_core::{FieldDescriptor, Model, ValidationRule};

use crate::xml::XmlWriter;

/// One schema-level constraint on a field's value space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restriction {
    MinLength(u32),
    MaxLength(u32),
    Enumeration(String),
    Pattern(String),
}

impl Restriction {
    pub fn write(&self, xml: &mut XmlWriter) {
        match self {
            Self::MinLength(value) => {
                xml.empty("xs:minLength", &[("value", &value.to_string())]);
            }
            Self::MaxLength(value) => {
                xml.empty("xs:maxLength", &[("value", &value.to_string())]);
            }
            Self::Enumeration(value) => {
                xml.empty("xs:enumeration", &[("value", value)]);
            }
            Self::Pattern(value) => {
                xml.empty("xs:pattern", &[("value", value)]);
            }
        }
    }
}

/// Everything a deriver may consult for one field.
pub struct FieldContext<'a> {
    pub model: &'a dyn Model,
    pub field: &'a FieldDescriptor,
    pub rules: &'a [ValidationRule],
}

/// One link in the restriction chain.
///
/// A deriver consults at most one rule (the first guard-admissible match
/// for its rule kind) and appends zero or more restrictions.
pub trait RestrictionDeriver: Send + Sync {
    fn derive(&self, ctx: &FieldContext<'_>, out: &mut Vec<Restriction>);
}

/// Explicit, ordered chain of restriction derivers.
///
/// Constructed once and handed to the generator; new restriction kinds are
/// added with [`RestrictionPipeline::with_deriver`] without touching the
/// existing ones.
pub struct RestrictionPipeline {
    derivers: Vec<Box<dyn RestrictionDeriver>>,
}

impl RestrictionPipeline {
    /// The standard chain, in fixed order.
    pub fn standard() -> Self {
        Self {
            derivers: vec![
                Box::new(LengthRestriction),
                Box::new(EnumerationRestriction),
                Box::new(ExclusionRestriction),
                Box::new(PatternRestriction),
                Box::new(NumericalityRestriction),
                Box::new(CustomRestriction),
            ],
        }
    }

    /// Append a caller-supplied deriver to the chain.
    pub fn with_deriver(mut self, deriver: Box<dyn RestrictionDeriver>) -> Self {
        self.derivers.push(deriver);
        self
    }

    /// Concatenated restrictions across all applicable derivers.
    pub fn derive(&self, ctx: &FieldContext<'_>) -> Vec<Restriction> {
        let mut out = Vec::new();
        for deriver in &self.derivers {
            deriver.derive(ctx, &mut out);
        }
        out
    }
}

impl Default for RestrictionPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// The first guard-admissible rule satisfying `matches`, if any.
pub(crate) fn first_admissible<'a>(
    rules: &'a [ValidationRule],
    matches: impl Fn(&ValidationRule) -> bool,
) -> Option<&'a ValidationRule> {
    rules.iter().find(|rule| matches(rule) && rule.admissible())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;

    use xsdgen_core::{
        Association, FieldDescriptor, FieldKind, Model, ValidationRule, VirtualSpec,
    };

    /// Bare-bones model for exercising derivers against one field.
    pub struct RuleModel {
        pub field: FieldDescriptor,
        pub rules: Vec<ValidationRule>,
        pub enumerations: BTreeMap<String, Vec<String>>,
    }

    impl RuleModel {
        pub fn new(kind: FieldKind, rules: Vec<ValidationRule>) -> Self {
            Self {
                field: FieldDescriptor::new("subject", kind),
                rules,
                enumerations: BTreeMap::new(),
            }
        }
    }

    impl Model for RuleModel {
        fn name(&self) -> &str {
            "RuleModel"
        }

        fn fields(&self) -> Vec<FieldDescriptor> {
            vec![self.field.clone()]
        }

        fn validations(&self, field: &str) -> Vec<ValidationRule> {
            if field == self.field.name {
                self.rules.clone()
            } else {
                Vec::new()
            }
        }

        fn associations(&self) -> Vec<Association> {
            Vec::new()
        }

        fn accepts_nested_attributes_for(&self, _association: &str) -> bool {
            false
        }

        fn virtual_elements(&self) -> BTreeMap<String, VirtualSpec> {
            BTreeMap::new()
        }

        fn enumeration_values(&self, field: &str) -> Option<Vec<String>> {
            self.enumerations.get(field).cloned()
        }
    }

    pub fn derive_with(
        deriver: &dyn super::RestrictionDeriver,
        model: &RuleModel,
    ) -> Vec<super::Restriction> {
        let ctx = super::FieldContext {
            model,
            field: &model.field,
            rules: &model.rules,
        };
        let mut out = Vec::new();
        deriver.derive(&ctx, &mut out);
        out
    }
}
