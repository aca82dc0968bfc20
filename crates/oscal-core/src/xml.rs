// crates/oscal-core/src/xml.rs
// ============================================================================
// Module: OSCAL XML Format Adapter
// Description: Converts OSCAL XML into the logical tree OSCAL JSON produces.
// Purpose: Make every downstream consumer format-agnostic.
// Dependencies: roxmltree, serde_json
// ============================================================================

//! ## Overview
//! [`xml_to_json`] walks the XML DOM depth-first and emits a
//! [`serde_json::Value`] shaped like OSCAL JSON, wrapped under a single key
//! named after the root element.
//! Invariants:
//! - Element names listed in the plural table always become arrays.
//! - `prose`, `description`, and `remarks` subtrees serialize to markup strings.
//! - `<insert type="X" id-ref="Y"/>` serializes to `{{ insert: X, Y }}`.
//! - Namespace declarations never become object fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use roxmltree::Node;
use serde_json::Map;
use serde_json::Value;

use crate::parser::ParseError;

// ============================================================================
// SECTION: Name Tables
// ============================================================================

/// XHTML block elements collected as prose rather than structure.
const XHTML_BLOCK_TAGS: &[&str] =
    &["p", "ul", "ol", "pre", "table", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "img", "hr"];

/// Elements whose whole subtree serializes to a markup string.
const PROSE_FIELDS: &[&str] = &["prose", "description", "remarks"];

/// Field name holding text content next to attributes.
const TEXT_FIELD: &str = "_text";

/// Singular XML element to plural JSON property mapping.
///
/// # Invariants
/// - Parent-restricted rules are listed before unrestricted rules for the same element.
struct PluralRule {
    /// XML element local name.
    element: &'static str,
    /// Parent element the rule is restricted to, if any.
    parent: Option<&'static str>,
    /// JSON property name.
    plural: &'static str,
}

/// Builds a plural rule that applies under any parent.
const fn rule(element: &'static str, plural: &'static str) -> PluralRule {
    PluralRule {
        element,
        parent: None,
        plural,
    }
}

/// Builds a plural rule restricted to one parent element.
const fn rule_under(
    element: &'static str,
    parent: &'static str,
    plural: &'static str,
) -> PluralRule {
    PluralRule {
        element,
        parent: Some(parent),
        plural,
    }
}

/// Fixed singular-to-plural table.
const PLURAL_RULES: &[PluralRule] = &[
    rule("control", "controls"),
    rule("group", "groups"),
    rule("part", "parts"),
    rule("param", "params"),
    rule("prop", "props"),
    rule("link", "links"),
    rule("role", "roles"),
    rule("party", "parties"),
    rule("responsible-party", "responsible-parties"),
    rule("email-address", "email-addresses"),
    rule("role-id", "role-ids"),
    rule("party-uuid", "party-uuids"),
    rule("value", "values"),
    rule("choice", "choice"),
    rule("constraint", "constraints"),
    rule("guideline", "guidelines"),
    rule("test", "tests"),
    rule("import", "imports"),
    rule("include-controls", "include-controls"),
    rule("exclude-controls", "exclude-controls"),
    rule("with-id", "with-ids"),
    rule("set-parameter", "set-parameters"),
    rule("alter", "alters"),
    rule("remove", "removes"),
    rule("add", "adds"),
    rule("resource", "resources"),
    rule("rlink", "rlinks"),
    rule("component", "components"),
    rule("capability", "capabilities"),
    rule_under("control-implementation", "component", "control-implementations"),
    rule("implemented-requirement", "implemented-requirements"),
    rule("statement", "statements"),
    rule("by-component", "by-components"),
    rule("user", "users"),
    rule("inventory-item", "inventory-items"),
    rule("result", "results"),
    rule("finding", "findings"),
    rule("observation", "observations"),
    rule("method", "methods"),
    rule("risk", "risks"),
    rule("poam-item", "poam-items"),
];

/// Returns the plural JSON name for a child element, if the table maps it.
fn plural_name(element: &str, parent: &str) -> Option<&'static str> {
    PLURAL_RULES
        .iter()
        .find(|rule| rule.element == element && rule.parent.is_none_or(|only| only == parent))
        .map(|rule| rule.plural)
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Converts OSCAL XML text into its OSCAL JSON logical tree.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInput`] with the XML parser's diagnostic
/// when the text is not well-formed XML.
pub fn xml_to_json(text: &str) -> Result<Value, ParseError> {
    let document = roxmltree::Document::parse(text)
        .map_err(|err| ParseError::MalformedInput(err.to_string()))?;
    let root = document.root_element();
    let mut envelope = Map::new();
    envelope.insert(root.tag_name().name().to_string(), convert_element(root));
    Ok(Value::Object(envelope))
}

/// Converts one element into its JSON value.
fn convert_element(node: Node<'_, '_>) -> Value {
    let name = node.tag_name().name();
    let attributes = collect_attributes(node);
    if PROSE_FIELDS.contains(&name) {
        return convert_prose_field(node, attributes);
    }
    if !node.children().any(|child| child.is_element()) {
        return convert_leaf(node, attributes);
    }

    let mut object = attributes;
    let mut prose_nodes: Vec<Node<'_, '_>> = Vec::new();
    let mut groups: Vec<(&str, Vec<Node<'_, '_>>)> = Vec::new();
    for child in node.children() {
        if child.is_element() {
            let child_name = child.tag_name().name();
            if XHTML_BLOCK_TAGS.contains(&child_name) {
                prose_nodes.push(child);
            } else if let Some((_, members)) =
                groups.iter_mut().find(|(group_name, _)| *group_name == child_name)
            {
                members.push(child);
            } else {
                groups.push((child_name, vec![child]));
            }
        } else if child.is_text() && child.text().is_some_and(|text| !text.trim().is_empty()) {
            prose_nodes.push(child);
        }
    }

    if !prose_nodes.is_empty() {
        let has_markup = prose_nodes.iter().any(Node::is_element);
        let prose = prose_nodes
            .iter()
            .map(|prose_node| {
                if prose_node.is_text() {
                    let text = prose_node.text().unwrap_or_default().trim();
                    if has_markup { escape_markup(text) } else { text.to_string() }
                } else {
                    serialize_node(*prose_node)
                }
            })
            .collect::<Vec<String>>()
            .join("\n");
        object.insert("prose".to_string(), Value::String(prose.trim().to_string()));
    }

    for (child_name, members) in groups {
        let count = members.len();
        let mut values: Vec<Value> = members.into_iter().map(convert_element).collect();
        if let Some(plural) = plural_name(child_name, name) {
            object.insert(plural.to_string(), Value::Array(values));
        } else if count > 1 {
            object.insert(child_name.to_string(), Value::Array(values));
        } else if let Some(single) = values.pop() {
            object.insert(child_name.to_string(), single);
        }
    }
    Value::Object(object)
}

/// Converts an element without child elements.
fn convert_leaf(node: Node<'_, '_>, attributes: Map<String, Value>) -> Value {
    let text = text_content(node);
    let text = text.trim();
    if attributes.is_empty() {
        if text.is_empty() {
            return Value::Object(Map::new());
        }
        return Value::String(text.to_string());
    }
    let mut object = attributes;
    if !text.is_empty() {
        object.insert(TEXT_FIELD.to_string(), Value::String(text.to_string()));
    }
    Value::Object(object)
}

/// Converts a `prose`/`description`/`remarks` element.
fn convert_prose_field(node: Node<'_, '_>, attributes: Map<String, Value>) -> Value {
    let has_markup = node.children().any(|child| child.is_element());
    if !has_markup {
        let text = text_content(node).trim().to_string();
        if attributes.is_empty() {
            return Value::String(text);
        }
        let mut object = attributes;
        object.insert(TEXT_FIELD.to_string(), Value::String(text));
        return Value::Object(object);
    }
    let mut out = String::new();
    for child in node.children() {
        out.push_str(&serialize_node(child));
    }
    Value::String(out.trim().to_string())
}

/// Collects non-namespace attributes under their local names.
fn collect_attributes(node: Node<'_, '_>) -> Map<String, Value> {
    let mut map = Map::new();
    for attribute in node.attributes() {
        let name = attribute.name();
        if is_namespace_declaration(name) {
            continue;
        }
        map.insert(name.to_string(), Value::String(attribute.value().to_string()));
    }
    map
}

/// Returns true for `xmlns` and `xmlns:*` attribute names.
fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

/// Concatenates all descendant text.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants().filter(Node::is_text).filter_map(|text| text.text()).collect()
}

// ============================================================================
// SECTION: Prose Serialization
// ============================================================================

/// Serializes a node to its markup form for embedding in prose strings.
fn serialize_node(node: Node<'_, '_>) -> String {
    if node.is_text() {
        return escape_markup(node.text().unwrap_or_default());
    }
    if !node.is_element() {
        return String::new();
    }
    let name = node.tag_name().name();
    if name == "insert" {
        let kind = node.attribute("type").unwrap_or_default();
        let id_ref = node.attribute("id-ref").unwrap_or_default();
        return format!("{{{{ insert: {kind}, {id_ref} }}}}");
    }
    let mut out = format!("<{name}");
    for attribute in node.attributes() {
        if is_namespace_declaration(attribute.name()) {
            continue;
        }
        out.push_str(&format!(" {}=\"{}\"", attribute.name(), escape_markup(attribute.value())));
    }
    out.push('>');
    for child in node.children() {
        out.push_str(&serialize_node(child));
    }
    out.push_str(&format!("</{name}>"));
    out
}

/// Escapes markup-significant characters in text and attribute values.
fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
