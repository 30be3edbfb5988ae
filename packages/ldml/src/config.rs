//! Configuration constants and validation functions for the transformation.
//!
//! Element names, namespace URIs and the FRBR naming convention are a fixed
//! contract with downstream publishing systems and live here so that every
//! assembler uses the same values.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{LdmlError, Result};

/// Akoma Ntoso namespace for structural elements.
pub const AKN_NAMESPACE: &str = "http://docs.oasis-open.org/legaldocml/ns/akn/3.0";

/// Prefix used for [`AKN_NAMESPACE`] in serialized output.
pub const AKN_PREFIX: &str = "akn";

/// Project-specific namespace for the proprietary metadata block.
pub const RIS_NAMESPACE: &str = "http://ldml.neuris.de/metadata/";

/// Prefix used for [`RIS_NAMESPACE`] in serialized output.
pub const RIS_PREFIX: &str = "ris";

/// Placeholder for `name`/`source` attributes whose semantics are not yet fixed.
pub const UNDEFINED_SEMANTICS: &str = "attributsemantik-noch-undefiniert";

/// Author reference shared by all FRBR levels.
pub const FRBR_AUTHOR: &str = "#gericht";

/// Country marker on the FRBR work level.
pub const FRBR_COUNTRY: &str = "de";

/// Language marker on the FRBR expression level when the unit has none.
pub const DEFAULT_LANGUAGE: &str = "deu";

/// `name` attribute of every `FRBRdate`.
pub const FRBR_DATE_NAME: &str = "entscheidungsdatum";

/// FRBR alias carrying the system UUID.
pub const ALIAS_UUID: &str = "uebergreifende-id";

/// FRBR alias carrying the ECLI.
pub const ALIAS_ECLI: &str = "ecli";

/// FRBR alias carrying the CELEX number.
pub const ALIAS_CELEX: &str = "celex";

/// URI suffix of the FRBR work level.
pub const WORK_SUFFIX: &str = "";

/// URI suffix of the FRBR expression level.
pub const EXPRESSION_SUFFIX: &str = "/dokument";

/// URI suffix of the FRBR manifestation level.
pub const MANIFESTATION_SUFFIX: &str = "/dokument.xml";

/// Date format used inside XML attributes and metadata elements.
pub const XML_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used in human-readable titles.
pub const TITLE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Maximum size of an input file in bytes (10 MB).
///
/// Documentation units with embedded long texts are typically well below
/// 1 MB; anything larger points at a broken export.
pub const MAX_INPUT_SIZE: u64 = 10 * 1024 * 1024;

/// Document number pattern: two to four uppercase letters followed by
/// alphanumerics, e.g. `XXRE000000001` or `KORE312345678`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOCUMENT_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}[A-Z0-9]{6,16}$").expect("valid regex"));

/// Validate the format of a document number.
///
/// The document number names the serialized output file, so it must not
/// contain path separators or whitespace.
///
/// # Examples
/// ```
/// use caselaw_ldml::config::validate_document_number;
///
/// assert!(validate_document_number("XXRE000000001").is_ok());
/// assert!(validate_document_number("xx 1").is_err());
/// ```
pub fn validate_document_number(document_number: &str) -> Result<()> {
    if DOCUMENT_NUMBER_PATTERN.is_match(document_number) {
        Ok(())
    } else {
        Err(LdmlError::InvalidDocumentNumber(document_number.to_string()))
    }
}

/// Build the FRBR `this`/`uri` value for a level suffix.
///
/// # Examples
/// ```
/// use caselaw_ldml::config::{frbr_uri, EXPRESSION_SUFFIX};
///
/// assert_eq!(frbr_uri("XXRE000000001", EXPRESSION_SUFFIX), "XXRE000000001/dokument");
/// ```
#[must_use]
pub fn frbr_uri(document_number: &str, suffix: &str) -> String {
    format!("{document_number}{suffix}")
}

/// Name of the serialized file for a document number.
#[must_use]
pub fn output_file_name(document_number: &str) -> String {
    format!("{document_number}.xml")
}
