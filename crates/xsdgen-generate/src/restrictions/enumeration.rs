use xsdgen_core::{FieldKind, InclusionValues, ValidationRule};

use super::{first_admissible, FieldContext, Restriction, RestrictionDeriver};

/// Emits one `enumeration` node per allowed value of an inclusion rule.
///
/// Boolean fields have no enumerable restriction and are skipped outright.
/// A runtime-computed value set contributes nothing unless the rule is
/// force-included and the model's enumeration hook can supply a static list.
/// Hook-supplied values for the field are appended independently of any rule.
pub struct EnumerationRestriction;

impl RestrictionDeriver for EnumerationRestriction {
    fn derive(&self, ctx: &FieldContext<'_>, out: &mut Vec<Restriction>) {
        if ctx.field.kind == FieldKind::Boolean {
            return;
        }

        let mut hook_consumed = false;
        let rule = first_admissible(ctx.rules, |rule| {
            matches!(rule, ValidationRule::Inclusion { .. })
        });
        if let Some(ValidationRule::Inclusion { values, guard }) = rule {
            match values {
                InclusionValues::Static(allowed) => {
                    out.extend(allowed.iter().cloned().map(Restriction::Enumeration));
                }
                InclusionValues::Runtime => {
                    if guard.force_include {
                        if let Some(fallback) = ctx.model.enumeration_values(&ctx.field.name) {
                            out.extend(fallback.into_iter().map(Restriction::Enumeration));
                            hook_consumed = true;
                        }
                    }
                }
            }
        }

        if !hook_consumed {
            if let Some(values) = ctx.model.enumeration_values(&ctx.field.name) {
                out.extend(values.into_iter().map(Restriction::Enumeration));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use xsdgen_core::RuleGuard;

    use super::super::test_support::{derive_with, RuleModel};
    use super::*;

    fn inclusion(values: InclusionValues, guard: RuleGuard) -> ValidationRule {
        ValidationRule::Inclusion { values, guard }
    }

    fn enums(values: &[&str]) -> Vec<Restriction> {
        values
            .iter()
            .map(|value| Restriction::Enumeration(value.to_string()))
            .collect()
    }

    #[test]
    fn static_values_become_enumerations() {
        let model = RuleModel::new(
            FieldKind::String,
            vec![inclusion(
                InclusionValues::Static(vec!["north".into(), "south".into()]),
                RuleGuard::default(),
            )],
        );
        assert_eq!(
            derive_with(&EnumerationRestriction, &model),
            enums(&["north", "south"])
        );
    }

    #[test]
    fn boolean_fields_are_skipped() {
        let model = RuleModel::new(
            FieldKind::Boolean,
            vec![inclusion(
                InclusionValues::Static(vec!["true".into()]),
                RuleGuard::default(),
            )],
        );
        assert!(derive_with(&EnumerationRestriction, &model).is_empty());
    }

    #[test]
    fn runtime_values_need_force_include_and_a_hook() {
        let mut model = RuleModel::new(
            FieldKind::String,
            vec![inclusion(InclusionValues::Runtime, RuleGuard::default())],
        );
        assert!(derive_with(&EnumerationRestriction, &model).is_empty());

        model.rules = vec![inclusion(
            InclusionValues::Runtime,
            RuleGuard {
                conditional: false,
                force_include: true,
            },
        )];
        assert!(derive_with(&EnumerationRestriction, &model).is_empty());

        model
            .enumerations
            .insert("subject".to_string(), vec!["a".into(), "b".into()]);
        assert_eq!(
            derive_with(&EnumerationRestriction, &model),
            enums(&["a", "b"])
        );
    }

    #[test]
    fn hook_values_append_without_any_rule() {
        let mut model = RuleModel::new(FieldKind::String, Vec::new());
        model
            .enumerations
            .insert("subject".to_string(), vec!["hooked".into()]);
        assert_eq!(
            derive_with(&EnumerationRestriction, &model),
            enums(&["hooked"])
        );
    }
}
