//! FRBR identification block.
//!
//! Work, expression and manifestation share date and author; they differ
//! in URI suffix and in the level-specific markers (aliases and country on
//! the work, language on the expression).

use chrono::NaiveDate;

use crate::config::{
    frbr_uri, ALIAS_CELEX, ALIAS_ECLI, ALIAS_UUID, DEFAULT_LANGUAGE, EXPRESSION_SUFFIX, FRBR_AUTHOR,
    FRBR_COUNTRY, FRBR_DATE_NAME, MANIFESTATION_SUFFIX, UNDEFINED_SEMANTICS, WORK_SUFFIX,
    XML_DATE_FORMAT,
};
use crate::error::{LdmlError, Result};
use crate::types::{non_blank, DocumentationUnit};
use crate::xml::Element;

/// The three FRBR levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrbrLevel {
    Work,
    Expression,
    Manifestation,
}

impl FrbrLevel {
    /// Local name of the level element.
    #[must_use]
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Work => "FRBRWork",
            Self::Expression => "FRBRExpression",
            Self::Manifestation => "FRBRManifestation",
        }
    }

    /// Suffix appended to the document number in `FRBRthis`/`FRBRuri`.
    #[must_use]
    pub fn uri_suffix(&self) -> &'static str {
        match self {
            Self::Work => WORK_SUFFIX,
            Self::Expression => EXPRESSION_SUFFIX,
            Self::Manifestation => MANIFESTATION_SUFFIX,
        }
    }
}

/// Named alternative identifier on the work level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrbrAlias {
    pub name: &'static str,
    pub value: String,
}

/// One FRBR level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrbrElement {
    pub level: FrbrLevel,
    /// Value of both `FRBRthis` and `FRBRuri`.
    pub uri: String,
    pub aliases: Vec<FrbrAlias>,
    pub date: NaiveDate,
    pub author: &'static str,
    pub country: Option<&'static str>,
    pub language: Option<String>,
}

impl FrbrElement {
    fn new(level: FrbrLevel, document_number: &str, date: NaiveDate) -> Self {
        Self {
            level,
            uri: frbr_uri(document_number, level.uri_suffix()),
            aliases: Vec::new(),
            date,
            author: FRBR_AUTHOR,
            country: None,
            language: None,
        }
    }

    /// Build the `akn:FRBR*` element.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut children = vec![
            Element::akn("FRBRthis").with_attribute("value", &self.uri),
            Element::akn("FRBRuri").with_attribute("value", &self.uri),
        ];
        children.extend(self.aliases.iter().map(|alias| {
            Element::akn("FRBRalias")
                .with_attribute("name", alias.name)
                .with_attribute("value", &alias.value)
        }));
        children.push(
            Element::akn("FRBRdate")
                .with_attribute("date", self.date.format(XML_DATE_FORMAT).to_string())
                .with_attribute("name", FRBR_DATE_NAME),
        );
        children.push(Element::akn("FRBRauthor").with_attribute("href", self.author));
        if let Some(country) = self.country {
            children.push(Element::akn("FRBRcountry").with_attribute("value", country));
        }
        if let Some(language) = &self.language {
            children.push(Element::akn("FRBRlanguage").with_attribute("language", language));
        }

        Element::akn(self.level.element_name()).with_elements(children)
    }
}

/// The identification triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    /// Document number all three levels are derived from.
    pub document_number: String,
    pub work: FrbrElement,
    pub expression: FrbrElement,
    pub manifestation: FrbrElement,
}

impl Identification {
    /// Build the `akn:identification` element.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::akn("identification")
            .with_attribute("source", UNDEFINED_SEMANTICS)
            .with_elements([
                self.work.to_element(),
                self.expression.to_element(),
                self.manifestation.to_element(),
            ])
    }
}

/// Build the identification triple of a documentation unit.
///
/// # Errors
/// Returns [`LdmlError::MissingField`] if document number, UUID or decision
/// date is missing.
///
/// # Examples
/// ```
/// use caselaw_ldml::ldml::identification::build_identification;
/// use caselaw_ldml::types::DocumentationUnit;
///
/// let unit: DocumentationUnit = serde_json::from_str(r#"{
///     "uuid": "00000000-0000-0000-0000-000000000001",
///     "documentNumber": "XXRE000000001",
///     "coreData": { "decisionDate": "2020-01-01" }
/// }"#).unwrap();
///
/// let identification = build_identification(&unit).unwrap();
/// assert_eq!(identification.manifestation.uri, "XXRE000000001/dokument.xml");
/// ```
pub fn build_identification(unit: &DocumentationUnit) -> Result<Identification> {
    let document_number = unit
        .document_number()
        .ok_or(LdmlError::MissingField {
            field: "documentNumber",
        })?
        .trim();
    let uuid = unit.uuid.ok_or(LdmlError::MissingField { field: "uuid" })?;
    let date = unit.core_data.decision_date.ok_or(LdmlError::MissingField {
        field: "decisionDate",
    })?;

    let mut work = FrbrElement::new(FrbrLevel::Work, document_number, date);
    work.aliases.push(FrbrAlias {
        name: ALIAS_UUID,
        value: uuid.to_string(),
    });
    if let Some(ecli) = unit.core_data.ecli() {
        work.aliases.push(FrbrAlias {
            name: ALIAS_ECLI,
            value: ecli.trim().to_string(),
        });
    }
    if let Some(celex) = unit.core_data.celex() {
        work.aliases.push(FrbrAlias {
            name: ALIAS_CELEX,
            value: celex.trim().to_string(),
        });
    }
    work.country = Some(FRBR_COUNTRY);

    let mut expression = FrbrElement::new(FrbrLevel::Expression, document_number, date);
    expression.language = Some(
        non_blank(unit.core_data.language.as_deref())
            .map_or(DEFAULT_LANGUAGE, str::trim)
            .to_string(),
    );

    let manifestation = FrbrElement::new(FrbrLevel::Manifestation, document_number, date);

    Ok(Identification {
        document_number: document_number.to_string(),
        work,
        expression,
        manifestation,
    })
}
