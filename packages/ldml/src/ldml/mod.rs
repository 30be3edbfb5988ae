//! Typed LDML judgment document and its assemblers.
//!
//! Each submodule builds one part of the document from a
//! [`DocumentationUnit`](crate::types::DocumentationUnit):
//!
//! - [`identification`]: FRBR work/expression/manifestation
//! - [`classification`]: keyword block
//! - [`proprietary`]: `ris:meta` block
//! - [`header`]: title
//! - [`body`]: judgment body regions
//!
//! The parts are composed into an [`LdmlDocument`] and converted to an
//! [`Element`] tree in one step.

pub mod body;
pub mod classification;
pub mod header;
pub mod identification;
pub mod proprietary;

pub use body::{build_judgment_body, Block, JudgmentBody};
pub use classification::{build_classification, Classification};
pub use header::{build_header, fallback_title, Header};
pub use identification::{build_identification, FrbrElement, FrbrLevel, Identification};
pub use proprietary::{build_proprietary, latest_status, Proprietary};

use crate::config::UNDEFINED_SEMANTICS;
use crate::xml::Element;

/// Metadata region of a judgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub identification: Identification,
    pub classification: Option<Classification>,
    pub proprietary: Proprietary,
}

impl Meta {
    /// Build the `akn:meta` element.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut children = vec![self.identification.to_element()];
        children.extend(self.classification.as_ref().map(Classification::to_element));
        children.push(self.proprietary.to_element());
        Element::akn("meta").with_elements(children)
    }
}

/// A complete LDML judgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdmlDocument {
    pub meta: Meta,
    pub header: Header,
    pub judgment_body: JudgmentBody,
}

impl LdmlDocument {
    /// Document number the document is identified by.
    #[must_use]
    pub fn document_number(&self) -> &str {
        &self.meta.identification.document_number
    }

    /// Build the `akn:akomaNtoso` root element.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let judgment = Element::akn("judgment")
            .with_attribute("name", UNDEFINED_SEMANTICS)
            .with_elements([
                self.meta.to_element(),
                self.header.to_element(),
                self.judgment_body.to_element(),
            ]);
        Element::akn("akomaNtoso").with_elements([judgment])
    }
}
