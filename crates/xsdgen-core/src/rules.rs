use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Conditional-applicability marker carried by every validation rule.
///
/// Schema generation is static: a rule guarded by a runtime predicate cannot
/// be evaluated without an instance, so any guarded rule is excluded from
/// structural generation unless `force_include` is set. `if`-style and
/// `unless`-style guards are collapsed into the single `conditional` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleGuard {
    /// The rule only applies when a runtime predicate holds.
    #[serde(default)]
    pub conditional: bool,
    /// Let the rule contribute structure even though it is guarded.
    #[serde(default)]
    pub force_include: bool,
}

impl RuleGuard {
    /// Whether the rule must be ignored by static generation.
    pub fn blocks_generation(&self) -> bool {
        self.conditional && !self.force_include
    }
}

/// Allowed-value source for an inclusion rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InclusionValues {
    /// A fixed list of allowed values.
    Static(Vec<String>),
    /// Values produced by a runtime function; unknowable statically. The
    /// model's enumeration hook may supply a static fallback list.
    Runtime,
}

/// One declarative validation rule attached to a field.
///
/// A tagged variant per rule kind, each carrying its kind-specific options
/// plus a [`RuleGuard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    Presence {
        #[serde(default)]
        allow_blank: bool,
        #[serde(default)]
        guard: RuleGuard,
    },
    Length {
        #[serde(default)]
        minimum: Option<u32>,
        #[serde(default)]
        maximum: Option<u32>,
        #[serde(default)]
        guard: RuleGuard,
    },
    Inclusion {
        values: InclusionValues,
        #[serde(default)]
        guard: RuleGuard,
    },
    Exclusion {
        values: Vec<String>,
        #[serde(default)]
        guard: RuleGuard,
    },
    Format {
        /// Regular-expression source, possibly anchored.
        pattern: String,
        #[serde(default)]
        guard: RuleGuard,
    },
    Numericality {
        #[serde(default)]
        guard: RuleGuard,
    },
    Uniqueness {
        /// Additional fields the uniqueness is scoped to.
        #[serde(default)]
        scope: Vec<String>,
        #[serde(default)]
        guard: RuleGuard,
    },
    Custom {
        /// Pattern restrictions supplied by the rule itself. This is the
        /// extension point for restriction kinds the pipeline does not know.
        #[serde(default)]
        patterns: Vec<String>,
        #[serde(default)]
        guard: RuleGuard,
    },
}

impl ValidationRule {
    pub fn guard(&self) -> RuleGuard {
        match self {
            Self::Presence { guard, .. }
            | Self::Length { guard, .. }
            | Self::Inclusion { guard, .. }
            | Self::Exclusion { guard, .. }
            | Self::Format { guard, .. }
            | Self::Numericality { guard }
            | Self::Uniqueness { guard, .. }
            | Self::Custom { guard, .. } => *guard,
        }
    }

    /// Whether static generation may consult this rule at all.
    pub fn admissible(&self) -> bool {
        !self.guard().blocks_generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_blocks_unless_force_included() {
        let guarded = RuleGuard {
            conditional: true,
            force_include: false,
        };
        assert!(guarded.blocks_generation());

        let forced = RuleGuard {
            conditional: true,
            force_include: true,
        };
        assert!(!forced.blocks_generation());

        assert!(!RuleGuard::default().blocks_generation());
    }

    #[test]
    fn rules_deserialize_with_defaulted_guard() {
        let rule: ValidationRule =
            serde_json::from_str(r#"{"rule": "presence"}"#).expect("parse presence rule");
        assert!(rule.admissible());
        assert!(matches!(
            rule,
            ValidationRule::Presence {
                allow_blank: false,
                ..
            }
        ));

        let rule: ValidationRule = serde_json::from_str(
            r#"{"rule": "length", "maximum": 20, "guard": {"conditional": true}}"#,
        )
        .expect("parse length rule");
        assert!(!rule.admissible());
    }
}
