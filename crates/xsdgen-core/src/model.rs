use std::collections::BTreeMap;

use crate::association::Association;
use crate::field::FieldDescriptor;
use crate::rules::ValidationRule;
use crate::virtual_spec::VirtualSpec;

/// Input contract the host model layer must satisfy for an entity.
///
/// The generation engine only ever reads through this trait; implementations
/// must be safe to share across concurrent generation runs.
pub trait Model: Send + Sync {
    /// Entity name, possibly namespaced with `::` separators.
    fn name(&self) -> &str;

    /// Ordered list of real fields.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Validation rules declared for one field, in declaration order.
    fn validations(&self, field: &str) -> Vec<ValidationRule>;

    /// Declared associations, in declaration order.
    fn associations(&self) -> Vec<Association>;

    /// Whether the model exposes a bulk-assignment affordance for the
    /// association; only such associations are nested-expandable.
    fn accepts_nested_attributes_for(&self, association: &str) -> bool;

    /// Virtual elements the model itself wants serialized.
    fn virtual_elements(&self) -> BTreeMap<String, VirtualSpec> {
        BTreeMap::new()
    }

    /// Element names the model itself wants suppressed.
    fn ignored_elements(&self) -> Vec<String> {
        Vec::new()
    }

    /// Static fallback values for a field whose inclusion rule is computed
    /// at runtime.
    fn enumeration_values(&self, field: &str) -> Option<Vec<String>> {
        let _ = field;
        None
    }

    /// Direct superclass entity name, when the host type system has one.
    fn superclass_name(&self) -> Option<&str> {
        None
    }

    /// Capability probe checked at attach time: can instances of this model
    /// be serialized to XML at all?
    fn supports_xml_serialization(&self) -> bool {
        true
    }

    /// Capability probe checked at attach time: does the model expose an
    /// attribute bag to serialize from?
    fn exposes_attribute_bag(&self) -> bool {
        true
    }
}
