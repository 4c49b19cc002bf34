use xsdgen_core::ValidationRule;

use super::{first_admissible, FieldContext, Restriction, RestrictionDeriver};

/// Emits a fixed digits-only pattern when a numericality rule is present.
pub struct NumericalityRestriction;

impl RestrictionDeriver for NumericalityRestriction {
    fn derive(&self, ctx: &FieldContext<'_>, out: &mut Vec<Restriction>) {
        let rule = first_admissible(ctx.rules, |rule| {
            matches!(rule, ValidationRule::Numericality { .. })
        });
        if rule.is_some() {
            out.push(Restriction::Pattern(r"\d+".to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use xsdgen_core::{FieldKind, RuleGuard};

    use super::super::test_support::{derive_with, RuleModel};
    use super::*;

    #[test]
    fn numeric_rule_yields_digits_pattern() {
        let model = RuleModel::new(
            FieldKind::String,
            vec![ValidationRule::Numericality {
                guard: RuleGuard::default(),
            }],
        );
        assert_eq!(
            derive_with(&NumericalityRestriction, &model),
            vec![Restriction::Pattern(r"\d+".to_string())]
        );
    }
}
