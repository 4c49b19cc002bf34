use convert_case::{Boundary, Case, Casing, Converter};

/// Element and type names derived from one entity.
///
/// All four names come from the entity's name (namespace markers stripped),
/// or from the sandbox's root override when one is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// Singular complex-type name, Pascal-cased.
    pub type_name: String,
    /// Singular element name, kebab-cased.
    pub element: String,
    /// Plural element name for the root collection.
    pub element_collection: String,
    /// Plural complex-type name for the collection wrapper.
    pub collection_type: String,
}

impl Names {
    pub fn new(entity_name: &str, root_override: Option<&str>) -> Self {
        let base = root_override.unwrap_or_else(|| demodulize(entity_name));
        let type_name = base.to_case(Case::Pascal);
        let element = kebab(base);
        let element_collection = pluralize(&element);
        let collection_type = pluralize(&type_name);
        Self {
            type_name,
            element,
            element_collection,
            collection_type,
        }
    }
}

/// Element name for a nested association, `<name>-attributes`.
///
/// Pluralized by default; pass `pluralized = false` for to-one associations.
pub fn nested_attribute_name(association: &str, pluralized: bool) -> String {
    let mut name = kebab(association);
    if pluralized {
        name = pluralize(&name);
    }
    format!("{name}-attributes")
}

/// Kebab-case a field, association, or entity name without splitting
/// letters from digits, so `line1` stays `line1` rather than becoming
/// `line-1`. Word boundaries are case changes and explicit separators only.
pub fn kebab(name: &str) -> String {
    Converter::new()
        .to_case(Case::Kebab)
        .remove_boundaries(&[
            Boundary::LowerDigit,
            Boundary::DigitLower,
            Boundary::UpperDigit,
            Boundary::DigitUpper,
        ])
        .convert(name)
}

/// Strip `::`-separated namespace markers, keeping the final segment.
fn demodulize(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

/// Pluralize the final word of a kebab- or Pascal-cased name.
///
/// Standard English suffix rules plus a small irregulars table; a word
/// already ending in a bare `s` passes through unchanged. Anything more
/// exotic is the caller's naming problem, not this policy's.
pub fn pluralize(name: &str) -> String {
    let start = name
        .rfind(['-', '_'])
        .map(|index| index + 1)
        .unwrap_or_else(|| {
            name.char_indices()
                .rev()
                .find(|(_, ch)| ch.is_ascii_uppercase())
                .map(|(index, _)| index)
                .unwrap_or(0)
        });
    let (head, word) = name.split_at(start);
    format!("{head}{}", pluralize_word(word))
}

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("ox", "oxen"),
];

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return word.to_string();
    }

    let lower = word.to_lowercase();
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_case(word, plural);
    }

    if lower.ends_with("ss")
        || lower.ends_with("sh")
        || lower.ends_with("ch")
        || lower.ends_with('x')
        || lower.ends_with('z')
    {
        return format!("{word}es");
    }
    if lower.ends_with('s') {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if matches!(penultimate, Some(ch) if !"aeiouAEIOU".contains(ch)) {
            return format!("{stem}ies");
        }
    }
    if lower.ends_with("fe") {
        return format!("{}ves", &word[..word.len() - 2]);
    }
    if lower.ends_with('f') && !lower.ends_with("ff") {
        return format!("{}ves", &word[..word.len() - 1]);
    }
    format!("{word}s")
}

fn match_case(word: &str, plural: &str) -> String {
    if word.chars().next().is_some_and(|ch| ch.is_ascii_uppercase()) {
        let mut chars = plural.chars();
        match chars.next() {
            Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => String::new(),
        }
    } else {
        plural.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_all_four_names() {
        let names = Names::new("SomeModel", None);
        assert_eq!(names.type_name, "SomeModel");
        assert_eq!(names.element, "some-model");
        assert_eq!(names.element_collection, "some-models");
        assert_eq!(names.collection_type, "SomeModels");
    }

    #[test]
    fn strips_namespace_markers() {
        let names = Names::new("billing::Invoice", None);
        assert_eq!(names.type_name, "Invoice");
        assert_eq!(names.element, "invoice");
    }

    #[test]
    fn root_override_replaces_the_base_name() {
        let names = Names::new("HumanResource", Some("person"));
        assert_eq!(names.type_name, "Person");
        assert_eq!(names.element, "person");
        assert_eq!(names.element_collection, "people");
        assert_eq!(names.collection_type, "People");
    }

    #[test]
    fn pluralization_rules() {
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("posts"), "posts");
        assert_eq!(pluralize("some-child"), "some-children");
        assert_eq!(pluralize("SomeChild"), "SomeChildren");
    }

    #[test]
    fn digits_stay_attached_to_their_word() {
        assert_eq!(kebab("line1"), "line1");
        assert_eq!(kebab("address_line2"), "address-line2");
        assert_eq!(kebab("AddressLine2"), "address-line2");

        let names = Names::new("Address2", None);
        assert_eq!(names.element, "address2");
        assert_eq!(names.element_collection, "address2s");
    }

    #[test]
    fn nested_attribute_names() {
        assert_eq!(nested_attribute_name("posts", true), "posts-attributes");
        assert_eq!(nested_attribute_name("blog", true), "blogs-attributes");
        assert_eq!(nested_attribute_name("blog", false), "blog-attributes");
        assert_eq!(
            nested_attribute_name("favorite_color", false),
            "favorite-color-attributes"
        );
    }
}
