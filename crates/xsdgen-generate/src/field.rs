use std::collections::{BTreeMap, BTreeSet};

use xsdgen_core::{FieldDescriptor, IgnoreRule, Model, ModelEntry, ValidationRule, VirtualSpec};

use crate::names::kebab;
use crate::restrictions::{FieldContext, RestrictionPipeline};
use crate::types::wrapper_type;
use crate::xml::XmlWriter;

/// Option overrides in effect while emitting one entity's type.
///
/// Folds the entity's own sandbox and model hooks together with the
/// exclusions and method overrides accumulated while descending into nested
/// associations.
pub struct EffectiveOverrides {
    ignored: BTreeSet<String>,
    added: BTreeMap<String, VirtualSpec>,
    required: BTreeSet<String>,
    not_required: BTreeSet<String>,
}

impl EffectiveOverrides {
    pub fn build(
        entry: &ModelEntry,
        exclude: Option<&IgnoreRule>,
        methods: &BTreeMap<String, VirtualSpec>,
    ) -> Self {
        let sandbox = &entry.sandbox;
        let model = entry.model.as_ref();

        let mut ignored: BTreeSet<String> = sandbox
            .ignored()
            .iter()
            .filter(|(name, _)| sandbox.ignores(name))
            .map(|(name, _)| name.clone())
            .collect();
        ignored.extend(model.ignored_elements());
        match exclude {
            Some(IgnoreRule::Fields(excluded)) => ignored.extend(excluded.iter().cloned()),
            Some(IgnoreRule::Scoped(rules)) => ignored.extend(
                rules
                    .iter()
                    .filter(|(_, rule)| matches!(rule, IgnoreRule::All))
                    .map(|(name, _)| name.clone()),
            ),
            Some(IgnoreRule::All) | None => {}
        }

        let mut added = model.virtual_elements();
        added.extend(sandbox.added().clone());
        added.extend(methods.clone());

        let required = model
            .fields()
            .iter()
            .map(|field| field.name.clone())
            .chain(added.keys().cloned())
            .filter(|name| sandbox.is_required(name))
            .collect();
        let not_required = model
            .fields()
            .iter()
            .map(|field| field.name.clone())
            .chain(added.keys().cloned())
            .filter(|name| sandbox.is_not_required(name))
            .collect();

        Self {
            ignored,
            added,
            required,
            not_required,
        }
    }

    pub fn added(&self) -> &BTreeMap<String, VirtualSpec> {
        &self.added
    }

    /// Whether the named element is fully suppressed in this context.
    pub fn ignores(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    fn skips(&self, field: &str) -> bool {
        self.ignored.contains(field) || self.added.contains_key(field)
    }
}

/// Emit the element for one real field, or skip it.
///
/// Skipped when the field is ignored in this context or shadowed by a
/// declared virtual element. Returns whether an element was emitted.
pub fn generate(
    xml: &mut XmlWriter,
    pipeline: &RestrictionPipeline,
    model: &dyn Model,
    field: &FieldDescriptor,
    overrides: &EffectiveOverrides,
) -> bool {
    if overrides.skips(&field.name) {
        return false;
    }
    emit_scalar(xml, pipeline, model, field, overrides);
    true
}

/// Emit the element for a virtual scalar field. No skip check: virtuals are
/// emitted precisely because they appear in the added map.
pub fn generate_virtual_scalar(
    xml: &mut XmlWriter,
    pipeline: &RestrictionPipeline,
    model: &dyn Model,
    name: &str,
    overrides: &EffectiveOverrides,
) {
    let field = FieldDescriptor::new(name, xsdgen_core::FieldKind::String);
    emit_scalar(xml, pipeline, model, &field, overrides);
}

fn emit_scalar(
    xml: &mut XmlWriter,
    pipeline: &RestrictionPipeline,
    model: &dyn Model,
    field: &FieldDescriptor,
    overrides: &EffectiveOverrides,
) {
    let rules = model.validations(&field.name);
    let element_name = kebab(&field.name);
    let min_occurs = minimum_occurrences(&field.name, &rules, overrides);
    let wrapper = wrapper_type(field.kind);

    let restrictions = pipeline.derive(&FieldContext {
        model,
        field,
        rules: &rules,
    });

    xml.element(
        "xs:element",
        &[
            ("name", &element_name),
            ("minOccurs", min_occurs),
            ("maxOccurs", "1"),
        ],
        |xml| {
            xml.element("xs:complexType", &[], |xml| {
                xml.element("xs:simpleContent", &[], |xml| {
                    xml.element("xs:restriction", &[("base", wrapper.name)], |xml| {
                        for restriction in &restrictions {
                            restriction.write(xml);
                        }
                    });
                });
            });
        },
    );
}

/// Minimum-occurs for a scalar element.
///
/// Explicit required/not-required overrides win; otherwise an unguarded
/// presence rule without blank-allowance makes the element required.
fn minimum_occurrences(
    field: &str,
    rules: &[ValidationRule],
    overrides: &EffectiveOverrides,
) -> &'static str {
    if overrides.required.contains(field) {
        return "1";
    }
    if overrides.not_required.contains(field) {
        return "0";
    }
    for rule in rules {
        if let ValidationRule::Presence { allow_blank, .. } = rule {
            if rule.admissible() && !allow_blank {
                return "1";
            }
        }
    }
    "0"
}
