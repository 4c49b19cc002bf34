use xsdgen_core::ValidationRule;

use super::{first_admissible, FieldContext, Restriction, RestrictionDeriver};

/// Emits `maxLength`/`minLength` bounds from a length rule.
pub struct LengthRestriction;

impl RestrictionDeriver for LengthRestriction {
    fn derive(&self, ctx: &FieldContext<'_>, out: &mut Vec<Restriction>) {
        let rule = first_admissible(ctx.rules, |rule| {
            matches!(rule, ValidationRule::Length { .. })
        });
        if let Some(ValidationRule::Length {
            minimum, maximum, ..
        }) = rule
        {
            if let Some(maximum) = maximum {
                out.push(Restriction::MaxLength(*maximum));
            }
            if let Some(minimum) = minimum {
                out.push(Restriction::MinLength(*minimum));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use xsdgen_core::{FieldKind, RuleGuard, ValidationRule};

    use super::super::test_support::{derive_with, RuleModel};
    use super::*;

    fn length_rule(minimum: Option<u32>, maximum: Option<u32>, guard: RuleGuard) -> ValidationRule {
        ValidationRule::Length {
            minimum,
            maximum,
            guard,
        }
    }

    #[test]
    fn emits_both_bounds_max_first() {
        let model = RuleModel::new(
            FieldKind::String,
            vec![length_rule(Some(10), Some(20), RuleGuard::default())],
        );
        assert_eq!(
            derive_with(&LengthRestriction, &model),
            vec![Restriction::MaxLength(20), Restriction::MinLength(10)]
        );
    }

    #[test]
    fn guarded_rule_contributes_nothing() {
        let guard = RuleGuard {
            conditional: true,
            force_include: false,
        };
        let model = RuleModel::new(
            FieldKind::String,
            vec![length_rule(Some(10), Some(20), guard)],
        );
        assert!(derive_with(&LengthRestriction, &model).is_empty());
    }

    #[test]
    fn first_unguarded_match_wins() {
        let guarded = length_rule(
            None,
            Some(5),
            RuleGuard {
                conditional: true,
                force_include: false,
            },
        );
        let model = RuleModel::new(
            FieldKind::String,
            vec![guarded, length_rule(None, Some(30), RuleGuard::default())],
        );
        assert_eq!(
            derive_with(&LengthRestriction, &model),
            vec![Restriction::MaxLength(30)]
        );
    }
}
