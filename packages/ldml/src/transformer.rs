//! Transformation service that ties all components together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::MAX_INPUT_SIZE;
use crate::error::{LdmlError, Result};
use crate::profile::Profile;
use crate::types::DocumentationUnit;
use crate::xml::{save_document, to_xml_string, Element};

/// Transform a documentation unit into an LDML tree.
///
/// # Arguments
/// * `unit` - The documentation unit to transform
/// * `profile` - Output profile deciding which metadata is carried
///
/// # Returns
/// The `akn:akomaNtoso` root element
///
/// # Errors
/// Validation failures (missing mandatory field, empty body) and mapping
/// failures (HTML that cannot be repaired) are returned as distinct
/// [`LdmlError`] variants; see [`LdmlError::kind`].
pub fn transform(unit: &DocumentationUnit, profile: Profile) -> Result<Element> {
    tracing::debug!(
        document_number = unit.document_number().unwrap_or_default(),
        profile = profile.as_str(),
        "transforming documentation unit"
    );

    let document = profile.transform(unit)?;
    Ok(document.to_element())
}

/// Transform a documentation unit and serialize the result.
pub fn transform_to_string(
    unit: &DocumentationUnit,
    profile: Profile,
    pretty: bool,
) -> Result<String> {
    to_xml_string(&transform(unit, profile)?, pretty)
}

/// Load a documentation unit from a `.json`, `.yaml` or `.yml` file.
///
/// # Errors
/// Returns [`LdmlError::InputTooLarge`] for files above
/// [`MAX_INPUT_SIZE`], [`LdmlError::UnsupportedInput`] for other extensions
/// and a decode error if the content does not match the expected shape.
pub fn load_documentation_unit(path: &Path) -> Result<DocumentationUnit> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let size = fs::metadata(path)?.len();
    if size > MAX_INPUT_SIZE {
        return Err(LdmlError::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_INPUT_SIZE,
        });
    }

    match extension.as_deref() {
        Some("json") => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        Some("yaml" | "yml") => Ok(serde_yaml_ng::from_str(&fs::read_to_string(path)?)?),
        _ => Err(LdmlError::UnsupportedInput(path.to_path_buf())),
    }
}

/// Load, transform and save one input file.
///
/// The output is written as `{documentNumber}.xml` into `output_dir`.
///
/// # Returns
/// Path to the saved file
pub fn transform_file(
    input: &Path,
    profile: Profile,
    output_dir: &Path,
    pretty: bool,
) -> Result<PathBuf> {
    let unit = load_documentation_unit(input)?;
    let document = profile.transform(&unit)?;
    let content = to_xml_string(&document.to_element(), pretty)?;
    let path = save_document(&content, document.document_number(), output_dir)?;

    tracing::debug!(input = %input.display(), output = %path.display(), "saved LDML document");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MINIMAL_JSON: &str = r#"{
        "uuid": "8d3d6a4e-0a4b-4e0c-9a59-3b8f1c2d0e11",
        "documentNumber": "XXRE000000001",
        "coreData": {
            "court": { "type": "LG", "location": "Berlin" },
            "documentType": { "label": "Urteil" },
            "legalEffect": "Ja",
            "fileNumbers": ["3 O 1/20"],
            "decisionDate": "2020-01-01"
        },
        "longTexts": { "tenor": "<p>Die Klage wird abgewiesen.</p>" }
    }"#;

    #[test]
    fn test_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unit.json");
        fs::write(&path, MINIMAL_JSON).unwrap();

        let unit = load_documentation_unit(&path).unwrap();
        assert_eq!(unit.document_number(), Some("XXRE000000001"));
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unit.yml");
        fs::write(
            &path,
            "documentNumber: XXRE000000002\ncoreData:\n  fileNumbers:\n    - 1 BvR 1/20\n",
        )
        .unwrap();

        let unit = load_documentation_unit(&path).unwrap();
        assert_eq!(unit.document_number(), Some("XXRE000000002"));
        assert_eq!(unit.core_data.first_file_number(), Some("1 BvR 1/20"));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unit.txt");
        fs::write(&path, MINIMAL_JSON).unwrap();

        assert!(matches!(
            load_documentation_unit(&path),
            Err(LdmlError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unit.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_documentation_unit(&path),
            Err(LdmlError::Json(_))
        ));
    }

    #[test]
    fn test_transform_file_writes_document() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("unit.json");
        fs::write(&input, MINIMAL_JSON).unwrap();
        let output_dir = dir.path().join("out");

        let path = transform_file(&input, Profile::Full, &output_dir, false).unwrap();
        assert_eq!(path, output_dir.join("XXRE000000001.xml"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<akn:block name=\"Tenor\">"));
        assert!(content.contains("LG Berlin, 01.01.2020, 3 O 1/20"));
    }

    #[test]
    fn test_transform_root() {
        let unit: DocumentationUnit = serde_json::from_str(MINIMAL_JSON).unwrap();
        let root = transform(&unit, Profile::Reduced).unwrap();
        assert_eq!(root.qualified_name(), "akn:akomaNtoso");
        assert!(root.find("judgment/meta/identification/FRBRWork").is_some());
        assert_eq!(
            root.find("judgment/header/p").map(Element::text_content),
            Some("XXRE000000001".to_string())
        );
    }
}
