//! Proprietary metadata block (`ris:meta`).
//!
//! Collects the formal data of a documentation unit into a typed
//! [`Proprietary`] value. The profile decides which optional parts are
//! carried; empty lists and blank values are always left out.

use chrono::NaiveDate;

use crate::config::{UNDEFINED_SEMANTICS, XML_DATE_FORMAT};
use crate::error::Result;
use crate::fragment::normalize_field;
use crate::grouping::{group_norms, legal_force_labels, ranked, NormReference, SingleNorm};
use crate::profile::ProfileRules;
use crate::types::{
    non_blank, ActiveCitation, Court, DocumentationUnit, EnsuingDecision, PublicationStatus,
    RelatedDecision, StatusRecord,
};
use crate::xml::{wrap_non_empty, Element, Node};

/// A decision referenced from this one, with its position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionReference {
    /// 1-based position in the input list.
    pub rank: usize,
    pub date: Option<NaiveDate>,
    pub document_number: Option<String>,
    pub file_number: Option<String>,
    pub court_type: Option<String>,
    pub court_location: Option<String>,
}

impl DecisionReference {
    fn new(
        rank: usize,
        date: Option<NaiveDate>,
        document_number: Option<&str>,
        file_number: Option<&str>,
        court: Option<&Court>,
    ) -> Self {
        Self {
            rank,
            date,
            document_number: scalar(document_number),
            file_number: scalar(file_number),
            court_type: scalar(court.and_then(Court::court_type)),
            court_location: scalar(court.and_then(Court::location)),
        }
    }

    fn from_related(rank: usize, decision: &RelatedDecision) -> Self {
        Self::new(
            rank,
            decision.decision_date,
            decision.document_number.as_deref(),
            decision.file_number.as_deref(),
            decision.court.as_ref(),
        )
    }

    fn child_elements(&self) -> Vec<Element> {
        let mut children = Vec::new();
        children.extend(self.date.map(|d| date_leaf("date", d)));
        children.extend(leaf_opt("documentNumber", &self.document_number));
        children.extend(leaf_opt("fileNumber", &self.file_number));
        children.extend(leaf_opt("courtType", &self.court_type));
        children.extend(leaf_opt("courtLocation", &self.court_location));
        children
    }

    fn to_element(&self, name: &str) -> Element {
        Element::ris(name)
            .with_attribute("rank", self.rank.to_string())
            .with_elements(self.child_elements())
    }
}

/// An ensuing decision; pending decisions carry a note instead of a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuingReference {
    pub reference: DecisionReference,
    pub pending: bool,
    pub note: Option<String>,
}

impl EnsuingReference {
    fn to_element(&self) -> Element {
        let mut element = Element::ris("ensuingDecision")
            .with_attribute("rank", self.reference.rank.to_string());
        if self.pending {
            element = element.with_attribute("pending", "true");
        }

        let mut children = self.reference.child_elements();
        children.extend(leaf_opt("note", &self.note));
        element.with_elements(children)
    }
}

/// A decision cited by this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationReference {
    pub reference: DecisionReference,
    pub citation_type: Option<String>,
}

impl CitationReference {
    fn to_element(&self) -> Element {
        let mut children = Vec::new();
        children.extend(leaf_opt("citationType", &self.citation_type));
        children.extend(self.reference.child_elements());
        Element::ris("activeCitation")
            .with_attribute("rank", self.reference.rank.to_string())
            .with_elements(children)
    }
}

/// Field of law from the classification tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOfLawEntry {
    pub identifier: String,
    pub text: Option<String>,
}

/// Values that deviate from the authoritative core data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviatingValues {
    pub courts: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub eclis: Vec<String>,
    pub file_numbers: Vec<String>,
    pub document_numbers: Vec<String>,
}

/// Publication state taken from the most recent status record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub publication_status: Option<PublicationStatus>,
    pub with_error: bool,
}

/// Content of the `ris:meta` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proprietary {
    pub document_type: Option<String>,
    pub file_numbers: Vec<String>,
    pub court_type: Option<String>,
    pub court_location: Option<String>,
    pub legal_effect: Option<String>,
    pub judicial_body: Option<String>,
    pub documentation_office: Option<String>,
    pub procedures: Vec<String>,
    pub decision_name: Vec<Node>,
    pub fields_of_law: Vec<FieldOfLawEntry>,
    pub norms: Vec<NormReference>,
    pub legal_forces: Vec<String>,
    pub previous_decisions: Vec<DecisionReference>,
    pub ensuing_decisions: Vec<EnsuingReference>,
    pub active_citations: Vec<CitationReference>,
    pub deviating: DeviatingValues,
    pub sources: Vec<String>,
    pub status: Option<StatusSnapshot>,
}

impl Proprietary {
    /// Build the `ris:meta` element.
    #[must_use]
    pub fn meta_element(&self) -> Element {
        let mut children: Vec<Element> = Vec::new();

        children.extend(leaf_opt("documentType", &self.document_type));
        children.extend(leaf_list("fileNumbers", "fileNumber", &self.file_numbers));
        children.extend(leaf_opt("courtType", &self.court_type));
        children.extend(leaf_opt("courtLocation", &self.court_location));
        children.extend(leaf_opt("legalEffect", &self.legal_effect));
        children.extend(leaf_opt("judicialBody", &self.judicial_body));
        children.extend(leaf_opt("documentationOffice", &self.documentation_office));
        children.extend(leaf_list("procedures", "procedure", &self.procedures));

        if !self.decision_name.is_empty() {
            children.push(Element::ris("decisionNames").with_elements([
                Element::ris("decisionName").with_children(self.decision_name.iter().cloned()),
            ]));
        }

        children.extend(wrap_non_empty(
            Element::ris("fieldsOfLaw"),
            self.fields_of_law.iter().map(field_of_law_element).collect(),
        ));
        children.extend(wrap_non_empty(
            Element::ris("norms"),
            self.norms.iter().map(norm_element).collect(),
        ));
        children.extend(leaf_list("legalForces", "legalForce", &self.legal_forces));
        children.extend(wrap_non_empty(
            Element::ris("previousDecisions"),
            self.previous_decisions
                .iter()
                .map(|d| d.to_element("previousDecision"))
                .collect(),
        ));
        children.extend(wrap_non_empty(
            Element::ris("ensuingDecisions"),
            self.ensuing_decisions
                .iter()
                .map(EnsuingReference::to_element)
                .collect(),
        ));
        children.extend(wrap_non_empty(
            Element::ris("activeCitations"),
            self.active_citations
                .iter()
                .map(CitationReference::to_element)
                .collect(),
        ));

        let deviating = &self.deviating;
        children.extend(leaf_list(
            "deviatingCourts",
            "deviatingCourt",
            &deviating.courts,
        ));
        children.extend(wrap_non_empty(
            Element::ris("deviatingDates"),
            deviating
                .dates
                .iter()
                .map(|d| date_leaf("deviatingDate", *d))
                .collect(),
        ));
        children.extend(leaf_list("deviatingEclis", "deviatingEcli", &deviating.eclis));
        children.extend(leaf_list(
            "deviatingFileNumbers",
            "deviatingFileNumber",
            &deviating.file_numbers,
        ));
        children.extend(leaf_list(
            "deviatingDocumentNumbers",
            "deviatingDocumentNumber",
            &deviating.document_numbers,
        ));

        children.extend(leaf_list("sources", "source", &self.sources));

        if let Some(status) = &self.status {
            if let Some(publication_status) = status.publication_status {
                children.push(leaf("publicationStatus", publication_status.as_str()));
            }
            children.push(leaf("error", if status.with_error { "true" } else { "false" }));
        }

        Element::ris("meta").with_elements(children)
    }

    /// Build the `akn:proprietary` element wrapping `ris:meta`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::akn("proprietary")
            .with_attribute("source", UNDEFINED_SEMANTICS)
            .with_elements([self.meta_element()])
    }
}

fn leaf(name: &str, value: &str) -> Element {
    Element::ris(name).with_text(value)
}

fn leaf_opt(name: &str, value: &Option<String>) -> Option<Element> {
    value.as_deref().map(|v| leaf(name, v))
}

fn date_leaf(name: &str, date: NaiveDate) -> Element {
    leaf(name, &date.format(XML_DATE_FORMAT).to_string())
}

fn leaf_list(container: &str, item: &str, values: &[String]) -> Option<Element> {
    wrap_non_empty(
        Element::ris(container),
        values.iter().map(|v| leaf(item, v)).collect(),
    )
}

fn field_of_law_element(field: &FieldOfLawEntry) -> Element {
    let mut children = vec![leaf("identifier", &field.identifier)];
    children.extend(leaf_opt("text", &field.text));
    Element::ris("fieldOfLaw").with_elements(children)
}

fn single_norm_element(norm: &SingleNorm) -> Element {
    let mut children = Vec::new();
    children.extend(leaf_opt("text", &norm.text));
    children.extend(norm.version_date.map(|d| date_leaf("versionDate", d)));
    children.extend(leaf_opt("relevanceDate", &norm.relevance_date));
    children.extend(leaf_opt("legalForce", &norm.legal_force));
    Element::ris("singleNorm").with_elements(children)
}

fn norm_element(reference: &NormReference) -> Element {
    let mut children = Vec::new();
    children.extend(leaf_opt("abbreviation", &reference.abbreviation));
    children.extend(reference.single_norms.iter().map(single_norm_element));
    Element::ris("norm").with_elements(children)
}

/// Trimmed copy of a value that is not blank.
fn scalar(value: Option<&str>) -> Option<String> {
    non_blank(value).map(|v| v.trim().to_string())
}

/// Trimmed copies of all values that are not blank, in input order.
fn scalars<'a>(values: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| scalar(Some(v.as_str())))
        .collect()
}

/// Status record with the latest creation time.
///
/// Records without a creation time are ignored. When several records share
/// the latest time, the one that comes last in the input wins.
#[must_use]
pub fn latest_status(records: &[StatusRecord]) -> Option<&StatusRecord> {
    records
        .iter()
        .filter(|r| r.created_at.is_some())
        .max_by_key(|r| r.created_at)
}

fn previous_decisions(decisions: &[RelatedDecision]) -> Vec<DecisionReference> {
    ranked(decisions)
        .map(|(rank, d)| DecisionReference::from_related(rank, d))
        .collect()
}

fn ensuing_decisions(decisions: &[EnsuingDecision]) -> Vec<EnsuingReference> {
    ranked(decisions)
        .map(|(rank, d)| EnsuingReference {
            reference: DecisionReference::from_related(rank, &d.decision),
            pending: d.pending,
            note: scalar(d.note.as_deref()),
        })
        .collect()
}

fn active_citations(citations: &[ActiveCitation]) -> Vec<CitationReference> {
    ranked(citations)
        .map(|(rank, c)| CitationReference {
            reference: DecisionReference::new(
                rank,
                c.decision_date,
                c.document_number.as_deref(),
                c.file_number.as_deref(),
                c.court.as_ref(),
            ),
            citation_type: scalar(c.citation_type.as_deref()),
        })
        .collect()
}

/// Assemble the proprietary block for a unit under the given profile rules.
///
/// # Errors
/// Returns a mapping error if the decision name is not well-formed HTML.
pub fn build_proprietary(unit: &DocumentationUnit, rules: &ProfileRules) -> Result<Proprietary> {
    let core = &unit.core_data;
    let court = core.court.as_ref();
    let indexing = &unit.content_related_indexing;

    let fields_of_law = if rules.classification {
        indexing
            .fields_of_law
            .iter()
            .filter_map(|f| {
                Some(FieldOfLawEntry {
                    identifier: scalar(f.identifier.as_deref())?,
                    text: scalar(f.text.as_deref()),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    let norms = group_norms(&indexing.norms);
    let legal_forces = legal_force_labels(&norms);

    Ok(Proprietary {
        document_type: scalar(core.document_type.as_ref().and_then(|t| t.label())),
        file_numbers: scalars(&core.file_numbers),
        court_type: scalar(court.and_then(Court::court_type)),
        court_location: scalar(court.and_then(Court::location)),
        legal_effect: if rules.legal_effect {
            scalar(core.legal_effect.as_deref())
        } else {
            None
        },
        judicial_body: scalar(core.judicial_body.as_deref()),
        documentation_office: if rules.documentation_office {
            scalar(core.documentation_office.as_deref())
        } else {
            None
        },
        procedures: scalars(&core.procedures),
        decision_name: normalize_field(
            "decisionName",
            unit.short_texts.decision_name.as_deref(),
        )?,
        fields_of_law,
        norms,
        legal_forces,
        previous_decisions: previous_decisions(&unit.previous_decisions),
        ensuing_decisions: ensuing_decisions(&unit.ensuing_decisions),
        active_citations: active_citations(&indexing.active_citations),
        deviating: DeviatingValues {
            courts: scalars(&core.deviating_courts),
            dates: core.deviating_decision_dates.clone(),
            eclis: scalars(&core.deviating_eclis),
            file_numbers: scalars(&core.deviating_file_numbers),
            document_numbers: scalars(&core.deviating_document_numbers),
        },
        sources: if rules.sources {
            core.sources
                .iter()
                .filter_map(|s| scalar(s.display_value()))
                .collect()
        } else {
            Vec::new()
        },
        status: if rules.status {
            latest_status(&unit.status).map(|record| StatusSnapshot {
                publication_status: record.publication_status,
                with_error: record.with_error,
            })
        } else {
            None
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::types::{LegalForce, NormRow, Source};
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn full() -> ProfileRules {
        Profile::Full.rules()
    }

    fn child_names(element: &Element) -> Vec<&str> {
        element.elements().map(|e| e.name.as_str()).collect()
    }

    fn timestamp(value: &str) -> Option<DateTime<Utc>> {
        Some(value.parse().unwrap())
    }

    fn status(publication_status: PublicationStatus, created_at: Option<&str>) -> StatusRecord {
        StatusRecord {
            publication_status: Some(publication_status),
            with_error: false,
            created_at: created_at.and_then(timestamp),
        }
    }

    fn court(court_type: &str, location: &str) -> Court {
        Court {
            court_type: Some(court_type.to_string()),
            location: Some(location.to_string()),
            label: None,
        }
    }

    #[test]
    fn test_empty_unit_has_empty_meta() {
        let proprietary = build_proprietary(&DocumentationUnit::default(), &full()).unwrap();
        assert!(proprietary.meta_element().children.is_empty());
    }

    #[test]
    fn test_deviating_lists_omitted_when_empty() {
        let mut unit = DocumentationUnit::default();
        unit.core_data.deviating_courts = vec!["AG Aachen".to_string()];
        unit.core_data.deviating_eclis = vec![" ".to_string()];

        let meta = build_proprietary(&unit, &full()).unwrap().meta_element();
        assert_eq!(child_names(&meta), vec!["deviatingCourts"]);
        assert_eq!(
            meta.find("deviatingCourts/deviatingCourt")
                .map(Element::text_content),
            Some("AG Aachen".to_string())
        );
    }

    #[test]
    fn test_element_order() {
        let mut unit = DocumentationUnit::default();
        unit.core_data.court = Some(court("LG", "Berlin"));
        unit.core_data.file_numbers = vec!["3 O 1/20".to_string()];
        unit.core_data.legal_effect = Some("Ja".to_string());
        unit.core_data.deviating_decision_dates = vec![NaiveDate::from_ymd_opt(2019, 5, 1).unwrap()];
        unit.core_data.sources = vec![Source {
            value: Some("Z".to_string()),
            source_raw_value: None,
        }];
        unit.status = vec![status(PublicationStatus::Published, Some("2024-01-01T00:00:00Z"))];

        let meta = build_proprietary(&unit, &full()).unwrap().meta_element();
        assert_eq!(
            child_names(&meta),
            vec![
                "fileNumbers",
                "courtType",
                "courtLocation",
                "legalEffect",
                "deviatingDates",
                "sources",
                "publicationStatus",
                "error"
            ]
        );
        assert_eq!(
            meta.find("deviatingDates/deviatingDate")
                .map(Element::text_content),
            Some("2019-05-01".to_string())
        );
    }

    #[test]
    fn test_latest_status_wins() {
        let records = vec![
            status(PublicationStatus::Unpublished, Some("2024-01-01T00:00:00Z")),
            status(PublicationStatus::Published, Some("2024-03-01T00:00:00Z")),
            status(PublicationStatus::Withdrawn, None),
            status(PublicationStatus::Locked, Some("2024-02-01T00:00:00Z")),
        ];
        assert_eq!(
            latest_status(&records).and_then(|r| r.publication_status),
            Some(PublicationStatus::Published)
        );
    }

    #[test]
    fn test_latest_status_tie_prefers_later_record() {
        let records = vec![
            status(PublicationStatus::Unpublished, Some("2024-01-01T00:00:00Z")),
            status(PublicationStatus::Published, Some("2024-01-01T00:00:00Z")),
        ];
        assert_eq!(
            latest_status(&records).and_then(|r| r.publication_status),
            Some(PublicationStatus::Published)
        );
    }

    #[test]
    fn test_status_without_timestamps_is_omitted() {
        let mut unit = DocumentationUnit::default();
        unit.status = vec![status(PublicationStatus::Published, None)];

        let proprietary = build_proprietary(&unit, &full()).unwrap();
        assert!(proprietary.status.is_none());
        let meta = proprietary.meta_element();
        assert!(meta.child("publicationStatus").is_none());
        assert!(meta.child("error").is_none());
    }

    #[test]
    fn test_related_decisions_ranked_in_input_order() {
        let mut unit = DocumentationUnit::default();
        unit.previous_decisions = vec![
            RelatedDecision {
                file_number: Some("1 C 1/19".to_string()),
                court: Some(court("AG", "Mitte")),
                ..RelatedDecision::default()
            },
            RelatedDecision {
                file_number: Some("2 C 2/19".to_string()),
                ..RelatedDecision::default()
            },
        ];

        let meta = build_proprietary(&unit, &full()).unwrap().meta_element();
        let decisions: Vec<&Element> = meta
            .child("previousDecisions")
            .unwrap()
            .children_named("previousDecision")
            .collect();
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0].attribute("rank"), Some("1"));
        assert_eq!(decisions[1].attribute("rank"), Some("2"));
        assert_eq!(
            child_names(decisions[0]),
            vec!["fileNumber", "courtType", "courtLocation"]
        );
    }

    #[test]
    fn test_pending_ensuing_decision() {
        let mut unit = DocumentationUnit::default();
        unit.ensuing_decisions = vec![EnsuingDecision {
            decision: RelatedDecision {
                file_number: Some("1 U 2/21".to_string()),
                ..RelatedDecision::default()
            },
            pending: true,
            note: Some("anhängig beim KG".to_string()),
        }];

        let meta = build_proprietary(&unit, &full()).unwrap().meta_element();
        let ensuing = meta.find("ensuingDecisions/ensuingDecision").unwrap();
        assert_eq!(ensuing.attribute("pending"), Some("true"));
        assert_eq!(ensuing.attribute("rank"), Some("1"));
        assert_eq!(
            ensuing.child("note").map(Element::text_content),
            Some("anhängig beim KG".to_string())
        );
    }

    #[test]
    fn test_norms_and_legal_forces() {
        let mut unit = DocumentationUnit::default();
        unit.content_related_indexing.norms = vec![
            NormRow {
                norm_abbreviation_raw_value: Some("BGB".to_string()),
                single_norm: Some("§ 823".to_string()),
                ..NormRow::default()
            },
            NormRow {
                norm_abbreviation_raw_value: Some("BGB".to_string()),
                single_norm: Some("§ 826".to_string()),
                legal_force: Some(LegalForce {
                    force_type: Some("Nichtig".to_string()),
                    region: None,
                }),
                ..NormRow::default()
            },
        ];

        let meta = build_proprietary(&unit, &full()).unwrap().meta_element();
        let norm = meta.find("norms/norm").unwrap();
        assert_eq!(
            norm.child("abbreviation").map(Element::text_content),
            Some("BGB".to_string())
        );
        assert_eq!(norm.children_named("singleNorm").count(), 2);
        assert_eq!(
            meta.find("legalForces/legalForce")
                .map(Element::text_content),
            Some("Nichtig".to_string())
        );
    }

    #[test]
    fn test_active_citation() {
        let mut unit = DocumentationUnit::default();
        unit.content_related_indexing.active_citations = vec![ActiveCitation {
            citation_type: Some("Vergleiche".to_string()),
            court: Some(court("BGH", "Karlsruhe")),
            decision_date: NaiveDate::from_ymd_opt(2018, 3, 4),
            file_number: Some("VI ZR 1/17".to_string()),
            document_number: None,
        }];

        let meta = build_proprietary(&unit, &full()).unwrap().meta_element();
        let citation = meta.find("activeCitations/activeCitation").unwrap();
        assert_eq!(citation.attribute("rank"), Some("1"));
        assert_eq!(
            child_names(citation),
            vec![
                "citationType",
                "date",
                "fileNumber",
                "courtType",
                "courtLocation"
            ]
        );
    }

    #[test]
    fn test_decision_name_keeps_markup() {
        let mut unit = DocumentationUnit::default();
        unit.short_texts.decision_name = Some("<p>Kinderbetreuung</p>".to_string());

        let meta = build_proprietary(&unit, &full()).unwrap().meta_element();
        let name = meta.find("decisionNames/decisionName").unwrap();
        assert_eq!(name.child("p").map(Element::text_content), Some("Kinderbetreuung".to_string()));
    }

    #[test]
    fn test_invalid_decision_name_is_mapping_error() {
        let mut unit = DocumentationUnit::default();
        unit.short_texts.decision_name = Some("<p>offen".to_string());

        let err = build_proprietary(&unit, &full()).err().unwrap();
        assert!(err.to_string().contains("decisionName"));
    }

    #[test]
    fn test_profile_rules_gate_fields() {
        let mut unit = DocumentationUnit::default();
        unit.core_data.documentation_office = Some("BGH".to_string());
        unit.core_data.legal_effect = Some("Ja".to_string());
        unit.status = vec![status(PublicationStatus::Published, Some("2024-01-01T00:00:00Z"))];

        let reduced = build_proprietary(&unit, &Profile::Reduced.rules()).unwrap();
        assert!(reduced.documentation_office.is_none());
        assert!(reduced.status.is_none());
        assert_eq!(reduced.legal_effect.as_deref(), Some("Ja"));

        let portal = build_proprietary(&unit, &Profile::Portal.rules()).unwrap();
        assert!(portal.legal_effect.is_none());
    }
}
