use crate::errors::GenerationError;
use crate::names::Names;
use crate::namespaces;
use crate::xml::XmlWriter;
use crate::xsd::{GenerateOptions, XsdGenerator};

const DEFAULT_LOCATION: &str = "http://example.org/your.wsdl";

/// Stub WSDL generator: wraps a generated schema in a protocol-description
/// envelope. Deliberately minimal; this is not a WSDL toolchain.
#[derive(Debug, Clone)]
pub struct Wsdl {
    pub location: String,
}

impl Default for Wsdl {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl Wsdl {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Produce the envelope with `entity`'s schema embedded in its types
    /// section.
    pub fn wrap(
        &self,
        generator: &XsdGenerator<'_>,
        entity: &str,
    ) -> Result<String, GenerationError> {
        let interface = Names::new(entity, None).type_name;

        let mut xml = XmlWriter::new();
        xml.prologue();
        let mut outcome = Ok(());
        xml.element(
            "wsdl:description",
            &[
                ("xmlns:wsdl", namespaces::WSDL),
                ("xmlns:xs", namespaces::XML_SCHEMA),
                ("xmlns:xsi", namespaces::XML_SCHEMA_INSTANCE),
                ("targetNamespace", &self.location),
            ],
            |xml| {
                xml.element("wsdl:types", &[], |xml| {
                    outcome = generator.write_schema(xml, entity, GenerateOptions::default());
                });
                xml.empty("wsdl:interface", &[("name", &interface)]);
            },
        );
        outcome?;
        Ok(xml.into_string())
    }
}
