//! The manifest under `demos/` doubles as a runnable sample:
//! `xsdgen generate --models demos/blog.json --entity Blog`.
//! This test keeps it parseable and generating.

use xsdgen_core::{validate_model_set, ModelSet};
use xsdgen_generate::XsdGenerator;

const DEMO_MANIFEST: &str = include_str!("../../../demos/blog.json");

#[test]
fn demo_manifest_parses_and_generates() {
    let set: ModelSet = serde_json::from_str(DEMO_MANIFEST).expect("parse demo manifest");
    validate_model_set(&set).expect("demo manifest is consistent");
    let registry = set.into_registry().expect("attach demo models");
    let generator = XsdGenerator::new(&registry);

    let output = generator.generate("Blog").expect("generate Blog");
    assert!(output.contains("<xs:element name=\"blogs\" type=\"Blogs\"/>"));
    assert!(output.contains("<xs:complexType name=\"Post\">"));
    // The scoped ignore on posts drops blog-id inside the nested Post only.
    assert!(!output.contains("name=\"blog-id\""));
    assert!(output.contains("<xs:enumeration value=\"draft\"/>"));

    let output = generator.generate("Post").expect("generate Post");
    assert!(output.contains("<xs:element name=\"blog-id\""));
    assert!(output.contains("<xs:unique name=\"slug-must-be-unique\">"));
}
