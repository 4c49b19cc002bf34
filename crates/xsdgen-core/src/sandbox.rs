use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::virtual_spec::VirtualSpec;

/// How an ignored entry applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreRule {
    /// Suppress the field or association entirely.
    All,
    /// Scoped to a nested association: expand it, but exclude these fields
    /// inside the child.
    Fields(Vec<String>),
    /// Scoped to a nested association, with per-name rules applied inside
    /// the child. Entries may themselves scope further, so exclusions can
    /// reach arbitrarily deep into the association graph.
    Scoped(BTreeMap<String, IgnoreRule>),
}

impl IgnoreRule {
    /// Combine two rules for the same name. `All` dominates; two exclusion
    /// lists union; mixed forms normalize to the scoped map, where a plain
    /// excluded field becomes an `All` entry.
    pub fn merge(&self, other: &IgnoreRule) -> IgnoreRule {
        match (self, other) {
            (Self::All, _) | (_, Self::All) => Self::All,
            (Self::Fields(own), Self::Fields(more)) => {
                let mut fields = own.clone();
                for field in more {
                    if !fields.contains(field) {
                        fields.push(field.clone());
                    }
                }
                Self::Fields(fields)
            }
            (Self::Scoped(own), Self::Scoped(more)) => {
                let mut merged = own.clone();
                for (name, rule) in more {
                    let combined = match merged.get(name) {
                        Some(existing) => existing.merge(rule),
                        None => rule.clone(),
                    };
                    merged.insert(name.clone(), combined);
                }
                Self::Scoped(merged)
            }
            (Self::Fields(fields), Self::Scoped(scoped))
            | (Self::Scoped(scoped), Self::Fields(fields)) => {
                let mut merged = scoped.clone();
                for field in fields {
                    merged.insert(field.clone(), Self::All);
                }
                Self::Scoped(merged)
            }
        }
    }
}

/// Per-entity configuration accumulator.
///
/// Built once when the entity is attached to the registry, read-only during
/// generation. Mirrors the `ignore` / `add` / `required` / `not_required` /
/// `root` directive surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Sandbox {
    ignored: BTreeMap<String, IgnoreRule>,
    added: BTreeMap<String, VirtualSpec>,
    required: BTreeSet<String>,
    not_required: BTreeSet<String>,
    root: Option<String>,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress one or more fields or associations.
    pub fn ignore<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            self.ignored.insert(field.into(), IgnoreRule::All);
        }
        self
    }

    /// Expand `association` but exclude the listed fields inside the child.
    pub fn ignore_within<I, S>(&mut self, association: impl Into<String>, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.ignored
            .insert(association.into(), IgnoreRule::Fields(fields));
        self
    }

    /// Expand `association` with a nested per-name ignore map applied inside
    /// the child, for exclusions deeper than one level.
    pub fn ignore_scoped(
        &mut self,
        association: impl Into<String>,
        rules: BTreeMap<String, IgnoreRule>,
    ) -> &mut Self {
        self.ignored
            .insert(association.into(), IgnoreRule::Scoped(rules));
        self
    }

    /// Add a virtual scalar element.
    pub fn add(&mut self, name: impl Into<String>) -> &mut Self {
        self.added.insert(name.into(), VirtualSpec::Scalar);
        self
    }

    /// Add a virtual element with an explicit nested shape.
    pub fn add_spec(&mut self, name: impl Into<String>, spec: VirtualSpec) -> &mut Self {
        self.added.insert(name.into(), spec);
        self
    }

    /// Force the listed fields to minimum-occurs 1.
    pub fn required<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            self.required.insert(field.into());
        }
        self
    }

    /// Force the listed fields to minimum-occurs 0, overriding any presence
    /// rule.
    pub fn not_required<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            self.not_required.insert(field.into());
        }
        self
    }

    /// Override the root name the naming policy derives everything from.
    pub fn root(&mut self, name: impl Into<String>) -> &mut Self {
        self.root = Some(name.into());
        self
    }

    pub fn ignored(&self) -> &BTreeMap<String, IgnoreRule> {
        &self.ignored
    }

    /// Whether the named field or association is fully suppressed.
    pub fn ignores(&self, name: &str) -> bool {
        matches!(self.ignored.get(name), Some(IgnoreRule::All))
    }

    /// Child-side exclusion recorded for an association, if any. `All`
    /// entries are not exclusions; they suppress the association outright.
    pub fn excluded_within(&self, association: &str) -> Option<&IgnoreRule> {
        match self.ignored.get(association) {
            Some(rule @ (IgnoreRule::Fields(_) | IgnoreRule::Scoped(_))) => Some(rule),
            _ => None,
        }
    }

    pub fn added(&self) -> &BTreeMap<String, VirtualSpec> {
        &self.added
    }

    pub fn required_names(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn not_required_names(&self) -> &BTreeSet<String> {
        &self.not_required
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.contains(field)
    }

    pub fn is_not_required(&self, field: &str) -> bool {
        self.not_required.contains(field)
    }

    pub fn root_override(&self) -> Option<&str> {
        self.root.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_accumulate() {
        let mut sandbox = Sandbox::new();
        sandbox
            .ignore(["updated_at", "created_at"])
            .ignore_within("posts", ["blog_id"])
            .add("tag_list")
            .required(["title"])
            .not_required(["body"])
            .root("article");

        assert!(sandbox.ignores("updated_at"));
        assert!(!sandbox.ignores("posts"));
        assert_eq!(
            sandbox.excluded_within("posts"),
            Some(&IgnoreRule::Fields(vec!["blog_id".to_string()]))
        );
        assert!(sandbox.added().get("tag_list").unwrap().is_scalar());
        assert!(sandbox.is_required("title"));
        assert!(sandbox.is_not_required("body"));
        assert_eq!(sandbox.root_override(), Some("article"));
    }

    #[test]
    fn deserializes_from_manifest_json() {
        let sandbox: Sandbox = serde_json::from_str(
            r#"{
                "ignored": {"secret": "all", "posts": {"fields": ["blog_id"]}},
                "added": {"tag_list": null},
                "required": ["title"],
                "root": "article"
            }"#,
        )
        .expect("parse sandbox");

        assert!(sandbox.ignores("secret"));
        assert_eq!(
            sandbox.excluded_within("posts"),
            Some(&IgnoreRule::Fields(vec!["blog_id".to_string()]))
        );
        assert!(sandbox.is_required("title"));
        assert_eq!(sandbox.root_override(), Some("article"));
    }

    #[test]
    fn scoped_ignores_deserialize_and_nest() {
        let sandbox: Sandbox = serde_json::from_str(
            r#"{
                "ignored": {
                    "posts": {"scoped": {"comments": {"fields": ["post_id"]}, "draft": "all"}}
                }
            }"#,
        )
        .expect("parse sandbox");

        let Some(IgnoreRule::Scoped(rules)) = sandbox.excluded_within("posts") else {
            panic!("expected a scoped rule for posts");
        };
        assert_eq!(
            rules.get("comments"),
            Some(&IgnoreRule::Fields(vec!["post_id".to_string()]))
        );
        assert_eq!(rules.get("draft"), Some(&IgnoreRule::All));
    }

    #[test]
    fn merge_unions_and_normalizes() {
        let fields = IgnoreRule::Fields(vec!["a".to_string(), "b".to_string()]);
        let more = IgnoreRule::Fields(vec!["b".to_string(), "c".to_string()]);
        assert_eq!(
            fields.merge(&more),
            IgnoreRule::Fields(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );

        assert_eq!(fields.merge(&IgnoreRule::All), IgnoreRule::All);

        let scoped = IgnoreRule::Scoped(BTreeMap::from([(
            "comments".to_string(),
            IgnoreRule::Fields(vec!["post_id".to_string()]),
        )]));
        let merged = fields.merge(&scoped);
        let IgnoreRule::Scoped(rules) = merged else {
            panic!("expected scoped merge result");
        };
        assert_eq!(rules.get("a"), Some(&IgnoreRule::All));
        assert_eq!(
            rules.get("comments"),
            Some(&IgnoreRule::Fields(vec!["post_id".to_string()]))
        );
    }
}
