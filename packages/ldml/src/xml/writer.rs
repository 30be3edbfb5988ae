//! Serializer adapter: renders an output tree as UTF-8 XML.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::node::{Element, Namespace, Node};
use crate::config::{output_file_name, validate_document_number};
use crate::error::{LdmlError, Result};

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| LdmlError::Serialization(e.to_string()))
}

/// Characters XML 1.0 allows in text and attribute values.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Reject values that no XML 1.0 parser would accept.
fn check_value<'a>(element: &Element, value: &'a str) -> Result<&'a str> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(LdmlError::Serialization(format!(
            "character U+{:04X} is not allowed in XML (in <{}>)",
            u32::from(c),
            element.qualified_name()
        ))),
        None => Ok(value),
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element, is_root: bool) -> Result<()> {
    let name = element.qualified_name();
    let mut start = BytesStart::new(name.as_str());

    if is_root {
        for namespace in [Namespace::Akn, Namespace::Ris] {
            let key = format!("xmlns:{}", namespace.prefix());
            start.push_attribute((key.as_str(), namespace.uri()));
        }
    }
    for attribute in &element.attributes {
        start.push_attribute((
            attribute.name.as_str(),
            check_value(element, &attribute.value)?,
        ));
    }

    if element.children.is_empty() {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e, false)?,
            Node::Text(t) => {
                write_event(writer, Event::Text(BytesText::new(check_value(element, t)?)))?
            }
        }
    }
    write_event(writer, Event::End(BytesEnd::new(name.as_str())))
}

/// Render a tree as an XML document with declaration.
///
/// The root element declares both output namespaces. With `pretty`, element
/// content is indented by two spaces; whitespace inside mixed content is then
/// not preserved, so compact output is the default for publishing.
///
/// # Errors
/// Returns [`LdmlError::Serialization`] if a text or attribute value holds a
/// character XML 1.0 does not allow (C0 controls other than tab, newline and
/// carriage return, `U+FFFE`, `U+FFFF`).
///
/// # Examples
/// ```
/// use caselaw_ldml::xml::{to_xml_string, Element};
///
/// let root = Element::akn("akomaNtoso").with_elements([Element::akn("judgment")]);
/// let xml = to_xml_string(&root, false).unwrap();
/// assert!(xml.contains("<akn:judgment/>"));
/// ```
pub fn to_xml_string(root: &Element, pretty: bool) -> Result<String> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    write_element(&mut writer, root, true)?;

    String::from_utf8(writer.into_inner()).map_err(|e| LdmlError::Serialization(e.to_string()))
}

/// Save a serialized document as `{document_number}.xml` in `output_dir`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
///
/// # Returns
/// Path to the saved file
pub fn save_document(content: &str, document_number: &str, output_dir: &Path) -> Result<PathBuf> {
    validate_document_number(document_number)?;
    fs::create_dir_all(output_dir)?;

    let file_name = output_file_name(document_number);
    let output_file = output_dir.join(&file_name);
    let temp_file = output_dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;

    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AKN_NAMESPACE, RIS_NAMESPACE};
    use crate::xml::utils::{find_by_path, get_text};
    use tempfile::tempdir;

    fn sample_tree() -> Element {
        Element::akn("akomaNtoso").with_elements([Element::akn("judgment")
            .with_attribute("name", "a & b")
            .with_elements([
                Element::akn("header").with_elements([Element::akn("p").with_text("1 < 2")]),
                Element::ris("meta").with_elements([Element::ris("courtType").with_text("LG")]),
            ])])
    }

    #[test]
    fn test_to_xml_string_declares_namespaces() {
        let xml = to_xml_string(&sample_tree(), false).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains(&format!("xmlns:akn=\"{AKN_NAMESPACE}\"")));
        assert!(xml.contains(&format!("xmlns:ris=\"{RIS_NAMESPACE}\"")));
    }

    #[test]
    fn test_to_xml_string_escapes_and_reparses() {
        let xml = to_xml_string(&sample_tree(), false).unwrap();
        assert!(xml.contains("a &amp; b"));
        assert!(xml.contains("1 &lt; 2"));

        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        let p = find_by_path(root, AKN_NAMESPACE, "judgment/header/p").unwrap();
        assert_eq!(get_text(p), "1 < 2");

        let judgment = find_by_path(root, AKN_NAMESPACE, "judgment").unwrap();
        let court = find_by_path(judgment, RIS_NAMESPACE, "meta/courtType").unwrap();
        assert_eq!(get_text(court), "LG");
    }

    #[test]
    fn test_control_character_in_text_is_rejected() {
        let root = Element::akn("akomaNtoso").with_elements([
            Element::ris("fileNumber").with_text("3 O\u{1} 1/20")
        ]);
        let err = to_xml_string(&root, false).unwrap_err();
        assert!(matches!(err, LdmlError::Serialization(ref msg) if msg.contains("U+0001")));
    }

    #[test]
    fn test_control_character_in_attribute_is_rejected() {
        let root = Element::akn("akomaNtoso")
            .with_elements([Element::akn("keyword").with_attribute("value", "a\u{1b}b")]);
        assert!(matches!(
            to_xml_string(&root, false),
            Err(LdmlError::Serialization(_))
        ));
    }

    #[test]
    fn test_allowed_whitespace_and_non_ascii_pass() {
        let root = Element::akn("akomaNtoso")
            .with_elements([Element::akn("p").with_text("a\tb\r\nc\u{a0}ä\u{1F600}")]);
        let xml = to_xml_string(&root, false).unwrap();
        assert!(roxmltree::Document::parse(&xml).is_ok());
    }

    #[test]
    fn test_to_xml_string_pretty_indents() {
        let xml = to_xml_string(&sample_tree(), true).unwrap();
        assert!(xml.contains("\n  <akn:judgment"));
    }

    #[test]
    fn test_save_document() {
        let temp_dir = tempdir().unwrap();
        let path = save_document("<x/>", "XXRE000000001", temp_dir.path()).unwrap();

        assert_eq!(path, temp_dir.path().join("XXRE000000001.xml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<x/>");
        assert!(!temp_dir.path().join(".XXRE000000001.xml.tmp").exists());
    }

    #[test]
    fn test_save_document_rejects_path_like_number() {
        let temp_dir = tempdir().unwrap();
        let result = save_document("<x/>", "../XXRE000000001", temp_dir.path());
        assert!(matches!(result, Err(LdmlError::InvalidDocumentNumber(_))));
    }
}
