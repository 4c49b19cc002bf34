use xsdgen_core::ValidationRule;

use super::{first_admissible, FieldContext, Restriction, RestrictionDeriver};

/// Passes through the pattern restrictions a custom rule carries itself.
///
/// This is the extension point for restriction kinds the standard chain does
/// not know: the rule, not the pipeline, declares the constraints.
pub struct CustomRestriction;

impl RestrictionDeriver for CustomRestriction {
    fn derive(&self, ctx: &FieldContext<'_>, out: &mut Vec<Restriction>) {
        let rule = first_admissible(ctx.rules, |rule| {
            matches!(rule, ValidationRule::Custom { .. })
        });
        if let Some(ValidationRule::Custom { patterns, .. }) = rule {
            out.extend(patterns.iter().cloned().map(Restriction::Pattern));
        }
    }
}

#[cfg(test)]
mod tests {
    use xsdgen_core::{FieldKind, RuleGuard};

    use super::super::test_support::{derive_with, RuleModel};
    use super::*;

    #[test]
    fn rule_supplied_patterns_pass_through() {
        let model = RuleModel::new(
            FieldKind::String,
            vec![ValidationRule::Custom {
                patterns: vec!["[0-9a-f]{8}".into(), "cafe.*".into()],
                guard: RuleGuard::default(),
            }],
        );
        assert_eq!(
            derive_with(&CustomRestriction, &model),
            vec![
                Restriction::Pattern("[0-9a-f]{8}".to_string()),
                Restriction::Pattern("cafe.*".to_string()),
            ]
        );
    }
}
