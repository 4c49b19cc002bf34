use std::collections::BTreeSet;

use xsdgen_core::FieldKind;

use crate::xml::XmlWriter;

/// Shared wrapper complex type for one primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapperType {
    /// Name of the wrapper complex type.
    pub name: &'static str,
    /// Native schema base type the wrapper extends.
    pub base: &'static str,
}

/// Static mapping from primitive field kinds to schema wrapper types.
///
/// Exhaustive over [`FieldKind`], so an unmapped kind cannot exist.
pub fn wrapper_type(kind: FieldKind) -> WrapperType {
    match kind {
        FieldKind::Integer => WrapperType {
            name: "Integer",
            base: "xs:integer",
        },
        FieldKind::Float => WrapperType {
            name: "Float",
            base: "xs:float",
        },
        FieldKind::Decimal => WrapperType {
            name: "Decimal",
            base: "xs:decimal",
        },
        FieldKind::String | FieldKind::Uuid => WrapperType {
            name: "String",
            base: "xs:string",
        },
        FieldKind::Text => WrapperType {
            name: "Text",
            base: "xs:string",
        },
        FieldKind::Datetime => WrapperType {
            name: "DateTime",
            base: "xs:dateTime",
        },
        FieldKind::Date => WrapperType {
            name: "Date",
            base: "xs:date",
        },
        FieldKind::Boolean => WrapperType {
            name: "Boolean",
            base: "xs:boolean",
        },
    }
}

const ALL_KINDS: [FieldKind; 9] = [
    FieldKind::Integer,
    FieldKind::Float,
    FieldKind::Decimal,
    FieldKind::String,
    FieldKind::Text,
    FieldKind::Datetime,
    FieldKind::Date,
    FieldKind::Boolean,
    FieldKind::Uuid,
];

/// Emit one wrapper complex type per distinct registered kind, once per
/// document. Every wrapper carries the universal optional `type` hint and
/// `nil` absence-marker attributes used by serialized instances.
pub fn emit_shared_types(xml: &mut XmlWriter) {
    let mut emitted: BTreeSet<&'static str> = BTreeSet::new();
    for kind in ALL_KINDS {
        let wrapper = wrapper_type(kind);
        if !emitted.insert(wrapper.name) {
            continue;
        }
        xml.element("xs:complexType", &[("name", wrapper.name)], |xml| {
            xml.element("xs:simpleContent", &[], |xml| {
                xml.element("xs:extension", &[("base", wrapper.base)], |xml| {
                    xml.empty(
                        "xs:attribute",
                        &[("name", "type"), ("type", "xs:string"), ("use", "optional")],
                    );
                    xml.empty(
                        "xs:attribute",
                        &[("name", "nil"), ("type", "xs:boolean"), ("use", "optional")],
                    );
                });
            });
        });
    }
}
