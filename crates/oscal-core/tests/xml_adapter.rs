// crates/oscal-core/tests/xml_adapter.rs
// ============================================================================
// Module: XML Format Adapter Tests
// Description: Shape tests for the OSCAL XML to JSON logical tree conversion.
// Purpose: Ensure XML documents reach the parser in the JSON shape.
// Dependencies: oscal-core, serde_json
// ============================================================================

//! ## Overview
//! Covers plural mapping, leaf handling, prose serialization, and the XML
//! catalog round trip through the parser.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use oscal_core::Document;
use oscal_core::ParseError;
use oscal_core::count_controls;
use oscal_core::parse_xml_text;
use oscal_core::xml_to_json;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const CATALOG_XML: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<catalog xmlns="http://csrc.nist.gov/ns/oscal/1.0" uuid="c1">
  <metadata>
    <title>XML Catalog</title>
    <last-modified>2024-01-01T00:00:00Z</last-modified>
    <version>1.0</version>
    <oscal-version>1.1.2</oscal-version>
  </metadata>
  <param id="p-global"><label>Global</label></param>
  <control id="ac-1">
    <title>Policy</title>
    <param id="ac-1_prm_1">
      <label>frequency</label>
      <select how-many="one"><choice>daily</choice><choice>weekly</choice></select>
    </param>
    <prop name="label" value="AC-1"/>
    <link href="#res-1" rel="reference">NIST</link>
    <part id="ac-1_smt" name="statement">
      <p>Review <insert type="param" id-ref="ac-1_prm_1"/> as needed.</p>
    </part>
  </control>
  <control id="ac-2"><title>Accounts</title></control>
  <back-matter>
    <resource uuid="res-1">
      <title>Ref</title>
      <rlink href="ref.json" media-type="application/oscal.catalog+json"/>
    </resource>
  </back-matter>
</catalog>
"##;

// ============================================================================
// SECTION: Structure
// ============================================================================

#[test]
fn root_becomes_single_key_envelope() {
    let value = xml_to_json(CATALOG_XML).expect("convert");
    let object = value.as_object().expect("object");
    assert_eq!(object.len(), 1);
    assert_eq!(value["catalog"]["uuid"], "c1");
    assert_eq!(value["catalog"]["metadata"]["title"], "XML Catalog");
    assert_eq!(value["catalog"]["metadata"]["oscal-version"], "1.1.2");
}

#[test]
fn namespace_declarations_are_not_fields() {
    let value = xml_to_json(CATALOG_XML).expect("convert");
    let catalog = value["catalog"].as_object().expect("catalog object");
    assert!(catalog.keys().all(|key| !key.starts_with("xmlns")));
}

#[test]
fn mapped_names_are_always_arrays() {
    let value = xml_to_json(CATALOG_XML).expect("convert");
    let catalog = &value["catalog"];
    assert_eq!(catalog["params"].as_array().map(Vec::len), Some(1));
    assert_eq!(catalog["controls"].as_array().map(Vec::len), Some(2));
    let control = &catalog["controls"][0];
    assert_eq!(control["props"], json!([{ "name": "label", "value": "AC-1" }]));
    assert_eq!(control["params"][0]["select"]["choice"], json!(["daily", "weekly"]));
    assert_eq!(control["params"][0]["select"]["how-many"], "one");
    assert_eq!(catalog["back-matter"]["resources"][0]["rlinks"][0]["href"], "ref.json");
}

#[test]
fn attributed_leaf_keeps_text_under_text_field() {
    let value = xml_to_json(CATALOG_XML).expect("convert");
    let link = &value["catalog"]["controls"][0]["links"][0];
    assert_eq!(link, &json!({ "href": "#res-1", "rel": "reference", "_text": "NIST" }));
}

#[test]
fn empty_leaf_is_empty_object() {
    let xml = r#"<profile uuid="p"><import href="cat.json"><include-all/></import></profile>"#;
    let value = xml_to_json(xml).expect("convert");
    assert_eq!(value["profile"]["imports"][0]["include-all"], json!({}));
}

#[test]
fn unmapped_names_use_sibling_count() {
    let xml = "<catalog><extra><bar>1</bar><bar>2</bar><baz>3</baz></extra></catalog>";
    let value = xml_to_json(xml).expect("convert");
    assert_eq!(value["catalog"]["extra"]["bar"], json!(["1", "2"]));
    assert_eq!(value["catalog"]["extra"]["baz"], "3");
}

#[test]
fn parent_restricted_rule_only_applies_under_parent() {
    let xml = r#"<component-definition>
        <component uuid="c">
          <control-implementation uuid="ci" source="cat.json"/>
        </component>
        <control-implementation><remarks>top</remarks></control-implementation>
      </component-definition>"#;
    let value = xml_to_json(xml).expect("convert");
    let root = &value["component-definition"];
    assert!(root["components"][0]["control-implementations"].is_array());
    assert!(root["control-implementation"].is_object());
}

// ============================================================================
// SECTION: Prose
// ============================================================================

#[test]
fn block_children_become_prose_with_inserts() {
    let value = xml_to_json(CATALOG_XML).expect("convert");
    let part = &value["catalog"]["controls"][0]["parts"][0];
    assert_eq!(part["id"], "ac-1_smt");
    assert_eq!(part["prose"], "<p>Review {{ insert: param, ac-1_prm_1 }} as needed.</p>");
}

#[test]
fn mixed_content_keeps_prose_and_structure() {
    let xml = r#"<catalog><part name="statement"><p>Intro</p><part name="item"><p>Sub</p></part></part></catalog>"#;
    let value = xml_to_json(xml).expect("convert");
    let part = &value["catalog"]["parts"][0];
    assert_eq!(part["prose"], "<p>Intro</p>");
    assert_eq!(part["parts"][0]["prose"], "<p>Sub</p>");
}

#[test]
fn prose_fields_serialize_whole_subtree() {
    let xml = r#"<catalog><description><p>Has <em>markup</em> and <insert type="param" id-ref="x"/></p></description></catalog>"#;
    let value = xml_to_json(xml).expect("convert");
    assert_eq!(
        value["catalog"]["description"],
        "<p>Has <em>markup</em> and {{ insert: param, x }}</p>"
    );
}

#[test]
fn attributed_prose_field_without_markup_keeps_attributes() {
    let xml = r#"<catalog><remarks class="note"> plain text </remarks></catalog>"#;
    let value = xml_to_json(xml).expect("convert");
    assert_eq!(value["catalog"]["remarks"], json!({ "class": "note", "_text": "plain text" }));
}

#[test]
fn serialized_markup_escapes_text_and_attributes() {
    let xml = r#"<catalog><description><p class="a&quot;b">x &lt; y &amp;&amp; z &gt; w</p></description></catalog>"#;
    let value = xml_to_json(xml).expect("convert");
    assert_eq!(
        value["catalog"]["description"],
        r#"<p class="a&quot;b">x &lt; y &amp;&amp; z &gt; w</p>"#
    );
}

#[test]
fn mixed_prose_escapes_loose_text() {
    let xml = r#"<catalog><part name="statement">a &lt; b<p>c</p><part name="item"/></part></catalog>"#;
    let value = xml_to_json(xml).expect("convert");
    assert_eq!(value["catalog"]["parts"][0]["prose"], "a &lt; b\n<p>c</p>");
}

#[test]
fn prose_field_without_markup_stays_plain_text() {
    let xml = r#"<catalog><remarks>a &lt; b</remarks></catalog>"#;
    let value = xml_to_json(xml).expect("convert");
    assert_eq!(value["catalog"]["remarks"], "a < b");
}

// ============================================================================
// SECTION: Errors and Round Trip
// ============================================================================

#[test]
fn malformed_xml_surfaces_parser_diagnostic() {
    let err = xml_to_json("<catalog><metadata></catalog>").unwrap_err();
    match err {
        ParseError::MalformedInput(message) => assert!(!message.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn xml_catalog_round_trip_counts_top_level_controls() {
    let parsed = parse_xml_text(CATALOG_XML).expect("parse");
    assert_eq!(parsed.oscal_version, "1.1.2");
    let Document::Catalog(catalog) = parsed.document else {
        panic!("expected catalog");
    };
    assert_eq!(count_controls(&catalog), 2);
    assert_eq!(catalog.controls[0].links[0].text.as_deref(), Some("NIST"));
    assert_eq!(catalog.metadata.version.as_deref(), Some("1.0"));
    let resource = catalog.back_matter.as_ref().and_then(|matter| matter.resource("res-1"));
    assert_eq!(resource.and_then(|resource| resource.title.as_deref()), Some("Ref"));
}

// ============================================================================
// SECTION: Profiles
// ============================================================================

const PROFILE_XML: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<profile xmlns="http://csrc.nist.gov/ns/oscal/1.0" uuid="p1">
  <metadata>
    <title>Low Baseline</title>
    <oscal-version>1.1.2</oscal-version>
  </metadata>
  <import href="catalog.xml">
    <include-controls>
      <with-id>ac-1</with-id>
      <with-id>ac-2</with-id>
    </include-controls>
  </import>
  <merge>
    <as-is>true</as-is>
  </merge>
  <modify>
    <set-parameter param-id="ac-1_prm_1">
      <value>annually</value>
    </set-parameter>
  </modify>
</profile>
"##;

#[test]
fn xml_profile_with_as_is_merge_parses() {
    let parsed = parse_xml_text(PROFILE_XML).expect("parse");
    let Document::Profile(profile) = parsed.document else {
        panic!("expected profile");
    };
    assert_eq!(profile.imports[0].href, "catalog.xml");
    let selector = &profile.imports[0].include_controls[0];
    assert_eq!(
        selector.with_ids.as_deref(),
        Some(&["ac-1".to_string(), "ac-2".to_string()][..])
    );
    assert_eq!(profile.merge.as_ref().and_then(|merge| merge.as_is), Some(true));
    let overrides = &profile.modify.as_ref().expect("modify").set_parameters;
    assert_eq!(overrides[0].values.as_deref(), Some(&["annually".to_string()][..]));
}

#[test]
fn as_is_accepts_lexical_booleans() {
    for (text, expected) in [("false", false), ("0", false), ("1", true), (" true ", true)] {
        let xml = PROFILE_XML.replace("<as-is>true</as-is>", &format!("<as-is>{text}</as-is>"));
        let parsed = parse_xml_text(&xml).expect("parse");
        let Document::Profile(profile) = parsed.document else {
            panic!("expected profile");
        };
        assert_eq!(profile.merge.and_then(|merge| merge.as_is), Some(expected), "{text}");
    }
}

#[test]
fn as_is_rejects_non_boolean_text() {
    let xml = PROFILE_XML.replace("<as-is>true</as-is>", "<as-is>maybe</as-is>");
    let err = parse_xml_text(&xml).unwrap_err();
    assert!(err.to_string().contains("invalid boolean value: maybe"), "{err}");
}
