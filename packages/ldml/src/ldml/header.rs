//! Title block.

use crate::config::TITLE_DATE_FORMAT;
use crate::error::Result;
use crate::fragment::normalize_field;
use crate::profile::TitleFallback;
use crate::types::DocumentationUnit;
use crate::xml::{Element, Node};

/// Title shown in the document header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: Vec<Node>,
}

impl Header {
    /// Build the `akn:header` element.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::akn("header")
            .with_elements([Element::akn("p").with_children(self.title.iter().cloned())])
    }
}

/// Title derived from core data when no headline was authored.
///
/// # Examples
/// ```
/// use caselaw_ldml::ldml::header::fallback_title;
/// use caselaw_ldml::profile::TitleFallback;
/// use caselaw_ldml::types::DocumentationUnit;
///
/// let unit: DocumentationUnit = serde_json::from_str(r#"{
///     "documentNumber": "XXRE000000001",
///     "coreData": {
///         "court": { "type": "LG", "location": "Berlin" },
///         "decisionDate": "2020-01-01",
///         "fileNumbers": ["3 O 1/20", "3 O 2/20"]
///     }
/// }"#).unwrap();
///
/// assert_eq!(
///     fallback_title(&unit, TitleFallback::CourtDateFileNumber),
///     "LG Berlin, 01.01.2020, 3 O 1/20"
/// );
/// assert_eq!(fallback_title(&unit, TitleFallback::DocumentNumber), "XXRE000000001");
/// ```
#[must_use]
pub fn fallback_title(unit: &DocumentationUnit, fallback: TitleFallback) -> String {
    match fallback {
        TitleFallback::DocumentNumber => unit
            .document_number()
            .map(|n| n.trim().to_string())
            .unwrap_or_default(),
        TitleFallback::CourtDateFileNumber => {
            let core = &unit.core_data;
            let parts = [
                core.court.as_ref().and_then(|c| c.label()),
                core.decision_date
                    .map(|d| d.format(TITLE_DATE_FORMAT).to_string()),
                core.first_file_number().map(|f| f.trim().to_string()),
            ];
            parts.into_iter().flatten().collect::<Vec<_>>().join(", ")
        }
    }
}

/// Build the header: the authored headline, else the fallback title.
///
/// # Errors
/// Returns a mapping error if the headline is not well-formed HTML.
pub fn build_header(unit: &DocumentationUnit, fallback: TitleFallback) -> Result<Header> {
    let title = normalize_field("headline", unit.short_texts.headline.as_deref())?;
    if !title.is_empty() {
        return Ok(Header { title });
    }

    let text = fallback_title(unit, fallback);
    let title = if text.is_empty() {
        Vec::new()
    } else {
        vec![Node::text(text)]
    };
    Ok(Header { title })
}
