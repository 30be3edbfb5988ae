//! Keyword classification block.

use crate::config::UNDEFINED_SEMANTICS;
use crate::types::DocumentationUnit;
use crate::xml::Element;

/// Keywords of a documentation unit, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub keywords: Vec<String>,
}

impl Classification {
    /// Build the `akn:classification` element.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::akn("classification")
            .with_attribute("source", UNDEFINED_SEMANTICS)
            .with_elements(self.keywords.iter().map(|keyword| {
                Element::akn("keyword")
                    .with_attribute("value", keyword)
                    .with_attribute("showAs", keyword)
                    .with_attribute("dictionary", UNDEFINED_SEMANTICS)
            }))
    }
}

/// Collect the keywords, or `None` if there are none.
///
/// Blank keywords are skipped.
#[must_use]
pub fn build_classification(unit: &DocumentationUnit) -> Option<Classification> {
    let keywords: Vec<String> = unit
        .content_related_indexing
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        None
    } else {
        Some(Classification { keywords })
    }
}
