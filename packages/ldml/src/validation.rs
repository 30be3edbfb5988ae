//! Mandatory-field checks run before any output is built.
//!
//! The same checks apply to every profile. A unit that passes is guaranteed
//! to produce identification, header fallback and court metadata.

use crate::error::{LdmlError, Result};
use crate::types::{non_blank, DocumentationUnit};

/// Names of all mandatory fields that are absent or blank, in check order.
///
/// # Examples
/// ```
/// use caselaw_ldml::types::DocumentationUnit;
/// use caselaw_ldml::validation::missing_fields;
///
/// let missing = missing_fields(&DocumentationUnit::default());
/// assert_eq!(missing.first(), Some(&"documentNumber"));
/// assert!(missing.contains(&"decisionDate"));
/// ```
#[must_use]
pub fn missing_fields(unit: &DocumentationUnit) -> Vec<&'static str> {
    let core = &unit.core_data;
    let court = core.court.as_ref();

    let checks = [
        ("documentNumber", unit.document_number().is_some()),
        ("uuid", unit.uuid.is_some()),
        ("court", court.is_some()),
        ("courtType", court.and_then(|c| c.court_type()).is_some()),
        ("courtLocation", court.and_then(|c| c.location()).is_some()),
        (
            "documentType",
            core.document_type.as_ref().and_then(|t| t.label()).is_some(),
        ),
        (
            "legalEffect",
            non_blank(core.legal_effect.as_deref()).is_some(),
        ),
        ("fileNumbers", core.first_file_number().is_some()),
        ("decisionDate", core.decision_date.is_some()),
    ];

    checks
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| field)
        .collect()
}

/// Fail on the first missing mandatory field.
///
/// # Errors
/// Returns [`LdmlError::MissingField`] naming the first field that is absent
/// or blank.
pub fn validate(unit: &DocumentationUnit) -> Result<()> {
    match missing_fields(unit).first() {
        Some(&field) => Err(LdmlError::MissingField { field }),
        None => Ok(()),
    }
}
