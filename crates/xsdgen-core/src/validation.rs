use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::manifest::ModelSet;
use crate::rules::ValidationRule;
use crate::sandbox::IgnoreRule;

/// Validate internal consistency of a model set.
///
/// This checks:
/// - duplicate model names
/// - duplicate field names within a model
/// - associations and nested-attribute declarations targeting unknown models
/// - validation rules and uniqueness scopes naming unknown fields
/// - sandbox directives (required, not-required, ignored) naming unknown
///   fields or associations
pub fn validate_model_set(set: &ModelSet) -> Result<()> {
    let mut names = BTreeSet::new();
    for model in &set.models {
        if !names.insert(model.name.as_str()) {
            return Err(Error::InvalidModelSet(format!(
                "duplicate model name: {}",
                model.name
            )));
        }
    }

    for model in &set.models {
        let mut fields = BTreeSet::new();
        for field in &model.fields {
            if !fields.insert(field.name.as_str()) {
                return Err(Error::InvalidModelSet(format!(
                    "duplicate field name: {}.{}",
                    model.name, field.name
                )));
            }
        }

        if let Some(superclass) = &model.superclass {
            if !names.contains(superclass.as_str()) {
                return Err(Error::InvalidModelSet(format!(
                    "model {} names unknown superclass {superclass}",
                    model.name
                )));
            }
        }

        let association_names: BTreeSet<&str> = model
            .associations
            .iter()
            .map(|association| association.name.as_str())
            .collect();

        for association in &model.associations {
            if !association.polymorphic && !names.contains(association.target.as_str()) {
                return Err(Error::InvalidModelSet(format!(
                    "association {}.{} targets unknown model {}",
                    model.name, association.name, association.target
                )));
            }
        }

        for nested in &model.nested_attributes {
            if !association_names.contains(nested.as_str()) {
                return Err(Error::InvalidModelSet(format!(
                    "model {} declares nested attributes for unknown association {nested}",
                    model.name
                )));
            }
        }

        for (field, rules) in &model.validations {
            if !fields.contains(field.as_str()) {
                return Err(Error::InvalidModelSet(format!(
                    "validation on unknown field {}.{field}",
                    model.name
                )));
            }
            for rule in rules {
                if let ValidationRule::Uniqueness { scope, .. } = rule {
                    for scoped in scope {
                        if !fields.contains(scoped.as_str()) {
                            return Err(Error::InvalidModelSet(format!(
                                "uniqueness scope on {}.{field} names unknown field {scoped}",
                                model.name
                            )));
                        }
                    }
                }
            }
        }

        // Names a sandbox directive may legitimately refer to: real fields,
        // declared virtual elements, and virtuals added by the sandbox.
        let mut known: BTreeSet<&str> = fields.clone();
        known.extend(model.virtual_elements.keys().map(String::as_str));
        known.extend(model.config.added().keys().map(String::as_str));

        for name in model.config.required_names() {
            if !known.contains(name.as_str()) {
                return Err(Error::InvalidModelSet(format!(
                    "sandbox on {} requires unknown field {name}",
                    model.name
                )));
            }
        }
        for name in model.config.not_required_names() {
            if !known.contains(name.as_str()) {
                return Err(Error::InvalidModelSet(format!(
                    "sandbox on {} marks unknown field {name} not-required",
                    model.name
                )));
            }
        }
        for (name, rule) in model.config.ignored() {
            match rule {
                IgnoreRule::All => {
                    if !known.contains(name.as_str()) && !association_names.contains(name.as_str())
                    {
                        return Err(Error::InvalidModelSet(format!(
                            "sandbox on {} ignores unknown name {name}",
                            model.name
                        )));
                    }
                }
                IgnoreRule::Fields(_) | IgnoreRule::Scoped(_) => {
                    if !association_names.contains(name.as_str()) {
                        return Err(Error::InvalidModelSet(format!(
                            "sandbox on {} scopes an ignore to unknown association {name}",
                            model.name
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}
