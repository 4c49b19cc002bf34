use xsdgen_core::{Model, ValidationRule};

use crate::names::{kebab, Names};
use crate::restrictions::first_admissible;
use crate::xml::XmlWriter;

/// Emit uniqueness constraints for every field carrying an unguarded
/// uniqueness rule, scoped under the entity's collection element.
///
/// Each independently-unique field gets its own constraint: a selector over
/// the collection's singular element, the primary field reference, and one
/// reference per scope field.
pub fn generate(xml: &mut XmlWriter, model: &dyn Model, names: &Names) {
    for field in model.fields() {
        let rules = model.validations(&field.name);
        let rule = first_admissible(&rules, |rule| {
            matches!(rule, ValidationRule::Uniqueness { .. })
        });
        if let Some(ValidationRule::Uniqueness { scope, .. }) = rule {
            let unique_name = kebab(&field.name);
            let selector = format!("./{}", names.element);
            xml.element(
                "xs:unique",
                &[("name", &format!("{unique_name}-must-be-unique"))],
                |xml| {
                    xml.empty("xs:selector", &[("xpath", &selector)]);
                    xml.empty("xs:field", &[("xpath", &unique_name)]);
                    for scoped in scope {
                        xml.empty("xs:field", &[("xpath", &kebab(scoped))]);
                    }
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use xsdgen_core::{FieldKind, RuleGuard};

    use super::super::restrictions::test_support::RuleModel;
    use super::*;

    #[test]
    fn scoped_rule_emits_selector_and_field_refs() {
        let model = RuleModel::new(
            FieldKind::String,
            vec![ValidationRule::Uniqueness {
                scope: vec!["region_code".to_string()],
                guard: RuleGuard::default(),
            }],
        );
        let names = Names::new("Widget", None);
        let mut xml = XmlWriter::new();
        generate(&mut xml, &model, &names);
        let output = xml.into_string();

        assert!(output.contains("<xs:unique name=\"subject-must-be-unique\">"));
        assert!(output.contains("<xs:selector xpath=\"./widget\"/>"));
        assert!(output.contains("<xs:field xpath=\"subject\"/>"));
        assert!(output.contains("<xs:field xpath=\"region-code\"/>"));
    }

    #[test]
    fn guarded_rule_emits_nothing() {
        let model = RuleModel::new(
            FieldKind::String,
            vec![ValidationRule::Uniqueness {
                scope: Vec::new(),
                guard: RuleGuard {
                    conditional: true,
                    force_include: false,
                },
            }],
        );
        let names = Names::new("Widget", None);
        let mut xml = XmlWriter::new();
        generate(&mut xml, &model, &names);
        assert!(xml.into_string().is_empty());
    }
}
