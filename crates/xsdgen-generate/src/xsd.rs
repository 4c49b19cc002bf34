use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};
use xsdgen_core::{
    Association, Cardinality, IgnoreRule, Model, ModelEntry, ModelRegistry, Sandbox, VirtualSpec,
};

use crate::errors::GenerationError;
use crate::field::{self, EffectiveOverrides};
use crate::names::{kebab, nested_attribute_name, Names};
use crate::namespaces;
use crate::restrictions::RestrictionPipeline;
use crate::types;
use crate::uniqueness;
use crate::xml::XmlWriter;

/// Caller-facing options for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Extra virtual elements applied to every entity in the run, passed
    /// through nested expansion unchanged.
    pub methods: BTreeMap<String, VirtualSpec>,
}

/// Per-run mutable state.
///
/// Owned exclusively by one `generate` call and discarded when it returns;
/// the emitted set is what bounds recursion to the number of distinct
/// reachable entities and keeps each type in the document exactly once.
struct GenerationContext {
    emitted: BTreeSet<String>,
    methods: BTreeMap<String, VirtualSpec>,
    /// Entities reached through at least one to-many edge anywhere in the
    /// run, computed up front so an entity first reached through a to-one
    /// edge still gets the collection type a later to-many reference needs.
    collections: BTreeSet<String>,
}

/// Top-level schema assembler.
///
/// Resolves association targets through the registry and performs a
/// depth-first, cycle-safe descent over the nested association graph. The
/// generator itself is immutable across runs, so one instance can serve
/// concurrent callers.
pub struct XsdGenerator<'a> {
    registry: &'a ModelRegistry,
    pipeline: RestrictionPipeline,
}

impl<'a> XsdGenerator<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self::with_pipeline(registry, RestrictionPipeline::standard())
    }

    /// Use a caller-extended restriction chain.
    pub fn with_pipeline(registry: &'a ModelRegistry, pipeline: RestrictionPipeline) -> Self {
        Self { registry, pipeline }
    }

    /// Generate the schema document for `entity`.
    pub fn generate(&self, entity: &str) -> Result<String, GenerationError> {
        self.generate_with(entity, GenerateOptions::default())
    }

    pub fn generate_with(
        &self,
        entity: &str,
        options: GenerateOptions,
    ) -> Result<String, GenerationError> {
        let mut xml = XmlWriter::new();
        xml.prologue();
        self.write_schema(&mut xml, entity, options)?;
        Ok(xml.into_string())
    }

    /// Write the `xs:schema` element for `entity` into an existing document.
    pub fn write_schema(
        &self,
        xml: &mut XmlWriter,
        entity: &str,
        options: GenerateOptions,
    ) -> Result<(), GenerationError> {
        let entry = self.entry(entity)?;
        info!(model = entity, "schema generation started");

        let mut ctx = GenerationContext {
            emitted: BTreeSet::from([entity.to_string()]),
            methods: options.methods,
            collections: self.collection_targets(entity)?,
        };
        let names = entry_names(entry);

        let mut outcome = Ok(());
        xml.element("xs:schema", &[("xmlns:xs", namespaces::XML_SCHEMA)], |xml| {
            types::emit_shared_types(xml);
            xml.element(
                "xs:element",
                &[
                    ("name", &names.element_collection),
                    ("type", &names.collection_type),
                ],
                |xml| {
                    uniqueness::generate(xml, entry.model.as_ref(), &names);
                },
            );
            outcome = self.write_entity(xml, &mut ctx, entry, true, None);
        });
        outcome?;

        info!(
            model = entity,
            entities = ctx.emitted.len(),
            "schema generation finished"
        );
        Ok(())
    }

    /// Emit one entity: first its not-yet-emitted nested associations, then
    /// its collection type (when some edge in the run reaches it to-many),
    /// then its own complex type.
    fn write_entity(
        &self,
        xml: &mut XmlWriter,
        ctx: &mut GenerationContext,
        entry: &ModelEntry,
        include_collection: bool,
        exclude: Option<&IgnoreRule>,
    ) -> Result<(), GenerationError> {
        let model = entry.model.as_ref();
        let propagated = match exclude {
            Some(IgnoreRule::Scoped(rules)) => Some(rules),
            _ => None,
        };
        let nested = nested_associations(model, &entry.sandbox, propagated);

        for association in &nested {
            // Expanding the entity itself or its superclass would reproduce
            // the type currently being generated.
            if association.target == model.name() {
                continue;
            }
            if model.superclass_name() == Some(association.target.as_str()) {
                continue;
            }
            // Marking before recursing is what terminates cyclic graphs.
            if !ctx.emitted.insert(association.target.clone()) {
                continue;
            }
            let child = self.entry(&association.target)?;
            let exclude_within = child_exclusion(&entry.sandbox, propagated, &association.name);
            let include_collection = ctx.collections.contains(&association.target);
            self.write_entity(xml, ctx, child, include_collection, exclude_within.as_ref())?;
        }

        let names = entry_names(entry);
        if include_collection {
            write_collection_type(xml, &names);
        }
        self.write_entity_type(xml, ctx, entry, &names, &nested, exclude)
    }

    fn write_entity_type(
        &self,
        xml: &mut XmlWriter,
        ctx: &GenerationContext,
        entry: &ModelEntry,
        names: &Names,
        nested: &[Association],
        exclude: Option<&IgnoreRule>,
    ) -> Result<(), GenerationError> {
        let model = entry.model.as_ref();
        let overrides = EffectiveOverrides::build(entry, exclude, &ctx.methods);

        // Resolve nested element names up front; the writer closures below
        // cannot propagate errors.
        let mut nested_elements: Vec<(String, String)> = Vec::with_capacity(nested.len());
        for association in nested {
            let child = if association.target == model.name() {
                entry
            } else {
                self.entry(&association.target)?
            };
            let child_names = entry_names(child);
            let (element_name, type_name) = match association.cardinality {
                Cardinality::Many => (
                    nested_attribute_name(&association.name, true),
                    child_names.collection_type,
                ),
                Cardinality::One => (
                    nested_attribute_name(&association.name, false),
                    child_names.type_name,
                ),
            };
            nested_elements.push((element_name, type_name));
        }

        debug!(model = model.name(), "emitting entity type");
        xml.element("xs:complexType", &[("name", &names.type_name)], |xml| {
            xml.element("xs:all", &[], |xml| {
                for descriptor in model.fields() {
                    field::generate(xml, &self.pipeline, model, &descriptor, &overrides);
                }
                for (name, spec) in overrides.added().clone() {
                    if spec.is_scalar() && !overrides.ignores(&name) {
                        field::generate_virtual_scalar(
                            xml,
                            &self.pipeline,
                            model,
                            &name,
                            &overrides,
                        );
                    }
                }
                for (element_name, type_name) in &nested_elements {
                    xml.empty(
                        "xs:element",
                        &[
                            ("name", element_name),
                            ("type", type_name),
                            ("minOccurs", "0"),
                            ("maxOccurs", "1"),
                        ],
                    );
                }
                for (name, spec) in overrides.added().clone() {
                    if !spec.is_scalar() && !overrides.ignores(&name) {
                        write_virtual_composite(
                            xml,
                            &self.pipeline,
                            model,
                            &overrides,
                            &name,
                            &spec,
                        );
                    }
                }
            });
        });
        Ok(())
    }

    /// Entities some to-many nested edge reaches from `root`.
    ///
    /// A breadth-first pass over the same filtered association graph the
    /// emission walk uses. Edge order does not matter here, only whether any
    /// reaching edge is to-many, so an entity first emitted through a to-one
    /// edge still gets the collection type later references resolve to.
    fn collection_targets(&self, root: &str) -> Result<BTreeSet<String>, GenerationError> {
        let mut targets = BTreeSet::new();
        let mut visited = BTreeSet::from([root.to_string()]);
        let mut queue = vec![root.to_string()];
        while let Some(name) = queue.pop() {
            let entry = self.entry(&name)?;
            let model = entry.model.as_ref();
            for association in nested_associations(model, &entry.sandbox, None) {
                if association.target == model.name() {
                    continue;
                }
                if model.superclass_name() == Some(association.target.as_str()) {
                    continue;
                }
                if association.cardinality == Cardinality::Many {
                    targets.insert(association.target.clone());
                }
                if visited.insert(association.target.clone()) {
                    queue.push(association.target);
                }
            }
        }
        Ok(targets)
    }

    fn entry(&self, name: &str) -> Result<&'a ModelEntry, GenerationError> {
        self.registry
            .get(name)
            .ok_or_else(|| GenerationError::UnregisteredModel(name.to_string()))
    }
}

/// Associations eligible for inline expansion: non-polymorphic, with a
/// bulk-assignment affordance, and suppressed neither by the sandbox nor by
/// an ignore map propagated from the parent.
fn nested_associations(
    model: &dyn Model,
    sandbox: &Sandbox,
    propagated: Option<&BTreeMap<String, IgnoreRule>>,
) -> Vec<Association> {
    model
        .associations()
        .into_iter()
        .filter(|association| {
            !association.polymorphic
                && model.accepts_nested_attributes_for(&association.name)
                && !sandbox.ignores(&association.name)
                && !matches!(
                    propagated.and_then(|rules| rules.get(&association.name)),
                    Some(IgnoreRule::All)
                )
        })
        .collect()
}

/// Exclusion to apply inside one association's child: the parent sandbox's
/// scoped entry merged with whatever the parent's own context propagated.
fn child_exclusion(
    sandbox: &Sandbox,
    propagated: Option<&BTreeMap<String, IgnoreRule>>,
    association: &str,
) -> Option<IgnoreRule> {
    let own = sandbox.excluded_within(association);
    let inherited = propagated
        .and_then(|rules| rules.get(association))
        .filter(|rule| !matches!(rule, IgnoreRule::All));
    match (own, inherited) {
        (Some(own), Some(inherited)) => Some(own.merge(inherited)),
        (Some(own), None) => Some(own.clone()),
        (None, Some(inherited)) => Some(inherited.clone()),
        (None, None) => None,
    }
}

fn entry_names(entry: &ModelEntry) -> Names {
    Names::new(entry.model.name(), entry.sandbox.root_override())
}

fn write_collection_type(xml: &mut XmlWriter, names: &Names) {
    xml.element(
        "xs:complexType",
        &[("name", &names.collection_type)],
        |xml| {
            xml.element("xs:sequence", &[], |xml| {
                xml.empty(
                    "xs:element",
                    &[
                        ("name", &names.element),
                        ("type", &names.type_name),
                        ("minOccurs", "0"),
                        ("maxOccurs", "unbounded"),
                    ],
                );
            });
            xml.empty(
                "xs:attribute",
                &[("name", "type"), ("type", "xs:string"), ("fixed", "array")],
            );
        },
    );
}

/// Emit a virtual composite element: a repeating group for a list spec, a
/// nested unordered group for a map spec, recursively.
fn write_virtual_composite(
    xml: &mut XmlWriter,
    pipeline: &RestrictionPipeline,
    model: &dyn Model,
    overrides: &EffectiveOverrides,
    name: &str,
    spec: &VirtualSpec,
) {
    let element_name = kebab(name);
    match spec {
        VirtualSpec::Scalar => {
            field::generate_virtual_scalar(xml, pipeline, model, name, overrides);
        }
        VirtualSpec::List(members) => {
            xml.element(
                "xs:element",
                &[
                    ("name", &element_name),
                    ("minOccurs", "0"),
                    ("maxOccurs", "1"),
                ],
                |xml| {
                    xml.element("xs:complexType", &[], |xml| {
                        xml.element("xs:sequence", &[], |xml| {
                            if members.is_empty() {
                                xml.empty(
                                    "xs:any",
                                    &[
                                        ("processContents", "skip"),
                                        ("minOccurs", "0"),
                                        ("maxOccurs", "unbounded"),
                                    ],
                                );
                            } else {
                                for member in members {
                                    xml.element(
                                        "xs:element",
                                        &[
                                            ("name", &kebab(member)),
                                            ("minOccurs", "0"),
                                            ("maxOccurs", "unbounded"),
                                        ],
                                        |xml| {
                                            write_member_enumeration(xml, model, member);
                                        },
                                    );
                                }
                            }
                        });
                        write_array_hint(xml);
                    });
                },
            );
        }
        VirtualSpec::Map(entries) => {
            xml.element(
                "xs:element",
                &[
                    ("name", &element_name),
                    ("minOccurs", "0"),
                    ("maxOccurs", "1"),
                ],
                |xml| {
                    xml.element("xs:complexType", &[], |xml| {
                        xml.element("xs:all", &[], |xml| {
                            for (child_name, child_spec) in entries {
                                write_virtual_composite(
                                    xml, pipeline, model, overrides, child_name, child_spec,
                                );
                            }
                        });
                        write_array_hint(xml);
                    });
                },
            );
        }
    }
}

fn write_member_enumeration(xml: &mut XmlWriter, model: &dyn Model, member: &str) {
    xml.element("xs:complexType", &[], |xml| {
        xml.element("xs:simpleContent", &[], |xml| {
            xml.element("xs:restriction", &[("base", "String")], |xml| {
                if let Some(values) = model.enumeration_values(member) {
                    for value in &values {
                        xml.empty("xs:enumeration", &[("value", value)]);
                    }
                }
            });
        });
    });
}

fn write_array_hint(xml: &mut XmlWriter) {
    xml.empty(
        "xs:attribute",
        &[
            ("name", "type"),
            ("type", "xs:string"),
            ("fixed", "array"),
            ("use", "optional"),
        ],
    );
}
