//! Input data types: the documentation unit of a court decision.
//!
//! These types mirror the export format of the persistence layer (camelCase
//! JSON or YAML). The transformation only reads them; every field that the
//! editorial process may leave empty is an `Option` or an empty `Vec`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Return the value if it contains anything besides whitespace.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Complete documentation unit of a court decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentationUnit {
    /// System identifier.
    pub uuid: Option<Uuid>,

    /// Unique document identifier (e.g., "XXRE000000001").
    pub document_number: Option<String>,

    /// Court, dates, file numbers and other formal data.
    pub core_data: CoreData,

    /// Short texts (headline, guiding principle, headnotes).
    pub short_texts: ShortTexts,

    /// Long texts (tenor, reasons, case facts).
    pub long_texts: LongTexts,

    /// Keywords, norms, fields of law and citations.
    pub content_related_indexing: ContentRelatedIndexing,

    /// Decisions of lower instances.
    pub previous_decisions: Vec<RelatedDecision>,

    /// Decisions of higher instances.
    pub ensuing_decisions: Vec<EnsuingDecision>,

    /// Publication status history.
    pub status: Vec<StatusRecord>,
}

impl DocumentationUnit {
    /// Document number, if present and not blank.
    #[must_use]
    pub fn document_number(&self) -> Option<&str> {
        non_blank(self.document_number.as_deref())
    }
}

/// A court as recorded on the documentation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Court {
    /// Court type (e.g., "LG", "BGH").
    #[serde(rename = "type")]
    pub court_type: Option<String>,

    /// Court location (e.g., "Berlin").
    pub location: Option<String>,

    /// Display label; derived from type and location when absent.
    pub label: Option<String>,
}

impl Court {
    /// Court type, if present and not blank.
    #[must_use]
    pub fn court_type(&self) -> Option<&str> {
        non_blank(self.court_type.as_deref())
    }

    /// Court location, if present and not blank.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    /// Human-readable court label.
    ///
    /// # Examples
    /// ```
    /// use caselaw_ldml::types::Court;
    ///
    /// let court = Court {
    ///     court_type: Some("LG".to_string()),
    ///     location: Some("Berlin".to_string()),
    ///     label: None,
    /// };
    /// assert_eq!(court.label(), Some("LG Berlin".to_string()));
    /// ```
    #[must_use]
    pub fn label(&self) -> Option<String> {
        if let Some(label) = non_blank(self.label.as_deref()) {
            return Some(label.trim().to_string());
        }

        let parts: Vec<&str> = [self.court_type(), self.location()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Document type (e.g., "Urteil", "Beschluss").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentType {
    /// Display label.
    pub label: Option<String>,
}

impl DocumentType {
    /// Label, if present and not blank.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        non_blank(self.label.as_deref())
    }
}

/// Source of the decision (e.g., a journal it was published in).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Source {
    /// Normalized source value (e.g., "Z" for journal).
    pub value: Option<String>,

    /// Value as entered, used when no normalized value exists.
    pub source_raw_value: Option<String>,
}

impl Source {
    /// Display value: normalized value, else raw value.
    #[must_use]
    pub fn display_value(&self) -> Option<&str> {
        non_blank(self.value.as_deref()).or_else(|| non_blank(self.source_raw_value.as_deref()))
    }
}

/// Formal data of a documentation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreData {
    pub court: Option<Court>,
    pub document_type: Option<DocumentType>,
    pub file_numbers: Vec<String>,
    pub decision_date: Option<NaiveDate>,
    pub ecli: Option<String>,
    pub celex: Option<String>,
    pub language: Option<String>,
    pub procedures: Vec<String>,
    pub legal_effect: Option<String>,
    pub judicial_body: Option<String>,
    /// Abbreviation of the documentation office (e.g., "BGH", "DS").
    pub documentation_office: Option<String>,
    pub sources: Vec<Source>,
    pub deviating_courts: Vec<String>,
    pub deviating_decision_dates: Vec<NaiveDate>,
    pub deviating_eclis: Vec<String>,
    pub deviating_file_numbers: Vec<String>,
    pub deviating_document_numbers: Vec<String>,
}

impl CoreData {
    /// First file number that is not blank.
    #[must_use]
    pub fn first_file_number(&self) -> Option<&str> {
        self.file_numbers
            .iter()
            .map(String::as_str)
            .find(|f| !f.trim().is_empty())
    }

    /// ECLI, if present and not blank.
    #[must_use]
    pub fn ecli(&self) -> Option<&str> {
        non_blank(self.ecli.as_deref())
    }

    /// CELEX number, if present and not blank.
    #[must_use]
    pub fn celex(&self) -> Option<&str> {
        non_blank(self.celex.as_deref())
    }
}

/// Short texts. All values are HTML fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShortTexts {
    /// Titelzeile.
    pub headline: Option<String>,
    /// Leitsatz.
    pub guiding_principle: Option<String>,
    /// Orientierungssatz.
    pub headnote: Option<String>,
    /// Sonstiger Orientierungssatz.
    pub other_headnote: Option<String>,
    /// Entscheidungsname.
    pub decision_name: Option<String>,
}

/// Long texts. All values are HTML fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LongTexts {
    pub tenor: Option<String>,
    pub reasons: Option<String>,
    pub case_facts: Option<String>,
    pub decision_reasons: Option<String>,
    pub dissenting_opinion: Option<String>,
    pub other_long_text: Option<String>,
    pub outline: Option<String>,
    pub grounds: Option<String>,
}

/// Indexing of the decision's content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentRelatedIndexing {
    pub keywords: Vec<String>,
    /// One row per single norm, as stored.
    pub norms: Vec<NormRow>,
    pub fields_of_law: Vec<FieldOfLaw>,
    pub active_citations: Vec<ActiveCitation>,
}

/// Structured norm abbreviation from the norm catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormAbbreviation {
    /// Catalogue identifier.
    pub id: Option<String>,
    /// Abbreviation (e.g., "BGB").
    pub abbreviation: Option<String>,
}

/// Legal force annotation of a single norm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalForce {
    /// Type of legal force (e.g., "Nichtig").
    #[serde(rename = "type")]
    pub force_type: Option<String>,
    /// Region the legal force applies to (e.g., "Brandenburg").
    pub region: Option<String>,
}

impl LegalForce {
    /// Flat label: `"{type}"` or `"{type} ({region})"`.
    ///
    /// Returns `None` without a type.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        let force_type = non_blank(self.force_type.as_deref())?.trim();
        Some(match non_blank(self.region.as_deref()) {
            Some(region) => format!("{force_type} ({})", region.trim()),
            None => force_type.to_string(),
        })
    }
}

/// A stored norm citation row (one row per single norm).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormRow {
    pub norm_abbreviation: Option<NormAbbreviation>,
    /// Abbreviation as entered, when it is not in the catalogue.
    pub norm_abbreviation_raw_value: Option<String>,
    /// Single norm (e.g., "§ 823 Abs. 1").
    pub single_norm: Option<String>,
    pub date_of_version: Option<NaiveDate>,
    /// Year of relevance (e.g., "2020").
    pub date_of_relevance: Option<String>,
    pub legal_force: Option<LegalForce>,
}

/// Field of law from the classification tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOfLaw {
    /// Identifier (e.g., "PR-05-01").
    pub identifier: Option<String>,
    pub text: Option<String>,
}

/// A decision cited by this one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActiveCitation {
    /// Citation type (e.g., "Vergleiche").
    pub citation_type: Option<String>,
    pub court: Option<Court>,
    pub decision_date: Option<NaiveDate>,
    pub file_number: Option<String>,
    pub document_number: Option<String>,
}

/// A previous or ensuing decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelatedDecision {
    pub decision_date: Option<NaiveDate>,
    pub document_number: Option<String>,
    pub file_number: Option<String>,
    pub court: Option<Court>,
}

/// An ensuing decision, possibly still pending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnsuingDecision {
    #[serde(flatten)]
    pub decision: RelatedDecision,
    pub pending: bool,
    pub note: Option<String>,
}

/// Publication state of a documentation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    Unpublished,
    Publishing,
    Published,
    Withdrawn,
    Duplicated,
    Locked,
    ExternalHandover,
}

impl PublicationStatus {
    /// Get the string value for XML output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpublished => "UNPUBLISHED",
            Self::Publishing => "PUBLISHING",
            Self::Published => "PUBLISHED",
            Self::Withdrawn => "WITHDRAWN",
            Self::Duplicated => "DUPLICATED",
            Self::Locked => "LOCKED",
            Self::ExternalHandover => "EXTERNAL_HANDOVER",
        }
    }
}

/// One entry of the status history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusRecord {
    pub publication_status: Option<PublicationStatus>,
    pub with_error: bool,
    pub created_at: Option<DateTime<Utc>>,
}
