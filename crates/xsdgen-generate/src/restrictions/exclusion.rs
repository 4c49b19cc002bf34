use xsdgen_core::ValidationRule;

use super::{first_admissible, FieldContext, Restriction, RestrictionDeriver};

/// Emits one negated pattern per excluded value of an exclusion rule.
pub struct ExclusionRestriction;

impl RestrictionDeriver for ExclusionRestriction {
    fn derive(&self, ctx: &FieldContext<'_>, out: &mut Vec<Restriction>) {
        let rule = first_admissible(ctx.rules, |rule| {
            matches!(rule, ValidationRule::Exclusion { .. })
        });
        if let Some(ValidationRule::Exclusion { values, .. }) = rule {
            for value in values {
                out.push(Restriction::Pattern(format!("[^({value})].*")));
            }
        }
    }
}
