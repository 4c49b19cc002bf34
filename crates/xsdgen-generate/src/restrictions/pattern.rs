use xsdgen_core::ValidationRule;

use super::{first_admissible, FieldContext, Restriction, RestrictionDeriver};

/// Emits a pattern node from a format rule's regular expression.
///
/// XSD patterns are implicitly anchored, so start/end anchors are stripped
/// from both ends; escaped dollars are unescaped and non-capturing groups
/// normalized to capturing form so the expression composes inside a
/// restriction.
pub struct PatternRestriction;

impl RestrictionDeriver for PatternRestriction {
    fn derive(&self, ctx: &FieldContext<'_>, out: &mut Vec<Restriction>) {
        let rule = first_admissible(ctx.rules, |rule| {
            matches!(rule, ValidationRule::Format { .. })
        });
        if let Some(ValidationRule::Format { pattern, .. }) = rule {
            out.push(Restriction::Pattern(strip_anchors(pattern)));
        }
    }
}

fn strip_anchors(source: &str) -> String {
    let mut value = source;
    for prefix in ["^", r"\A", r"\a"] {
        if let Some(rest) = value.strip_prefix(prefix) {
            value = rest;
            break;
        }
    }
    let stripped_suffix = [r"\Z", r"\z"]
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix));
    value = match stripped_suffix {
        Some(rest) => rest,
        None if value.ends_with('$') && !value.ends_with(r"\$") => &value[..value.len() - 1],
        None => value,
    };
    value.replace(r"\$", "$").replace("(?:", "(")
}
