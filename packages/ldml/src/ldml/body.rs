//! Judgment body: the authored texts grouped into four regions.

use crate::error::{LdmlError, Result};
use crate::fragment::normalize_field;
use crate::types::DocumentationUnit;
use crate::xml::{Element, Node};

/// A named text block inside a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Display name (e.g., "Tenor").
    pub name: &'static str,
    pub content: Vec<Node>,
}

impl Block {
    fn to_element(&self) -> Element {
        Element::akn("block")
            .with_attribute("name", self.name)
            .with_children(self.content.iter().cloned())
    }
}

/// The four regions of a judgment body, each possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JudgmentBody {
    pub introduction: Vec<Block>,
    pub background: Vec<Block>,
    pub motivation: Vec<Block>,
    pub decision: Vec<Block>,
}

impl JudgmentBody {
    /// True if no region has content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions().iter().all(|(_, blocks)| blocks.is_empty())
    }

    fn regions(&self) -> [(&'static str, &[Block]); 4] {
        [
            ("introduction", self.introduction.as_slice()),
            ("background", self.background.as_slice()),
            ("motivation", self.motivation.as_slice()),
            ("decision", self.decision.as_slice()),
        ]
    }

    /// Build the `akn:judgmentBody` element; empty regions are left out.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::akn("judgmentBody").with_elements(
            self.regions()
                .into_iter()
                .filter(|(_, blocks)| !blocks.is_empty())
                .map(|(name, blocks)| {
                    Element::akn(name).with_elements(blocks.iter().map(Block::to_element))
                }),
        )
    }
}

/// Normalize each source field and keep the ones with content, in order.
fn region(fields: &[(&'static str, &'static str, Option<&str>)]) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    for &(field, name, html) in fields {
        let content = normalize_field(field, html)?;
        if !content.is_empty() {
            blocks.push(Block { name, content });
        }
    }
    Ok(blocks)
}

/// Build the judgment body from short and long texts.
///
/// # Errors
/// Returns [`LdmlError::EmptyBody`] if no region has content, or a mapping
/// error naming the first field whose HTML cannot be repaired.
pub fn build_judgment_body(unit: &DocumentationUnit) -> Result<JudgmentBody> {
    let short = &unit.short_texts;
    let long = &unit.long_texts;

    let body = JudgmentBody {
        introduction: region(&[
            ("guidingPrinciple", "Leitsatz", short.guiding_principle.as_deref()),
            ("outline", "Gliederung", long.outline.as_deref()),
        ])?,
        background: region(&[("caseFacts", "Tatbestand", long.case_facts.as_deref())])?,
        motivation: region(&[
            ("headnote", "Orientierungssatz", short.headnote.as_deref()),
            (
                "otherHeadnote",
                "Sonstiger Orientierungssatz",
                short.other_headnote.as_deref(),
            ),
            ("grounds", "Gründe", long.grounds.as_deref()),
        ])?,
        decision: region(&[
            ("tenor", "Tenor", long.tenor.as_deref()),
            (
                "decisionReasons",
                "Entscheidungsgründe",
                long.decision_reasons.as_deref(),
            ),
            ("reasons", "Begründung", long.reasons.as_deref()),
            (
                "otherLongText",
                "Sonstiger Langtext",
                long.other_long_text.as_deref(),
            ),
            (
                "dissentingOpinion",
                "Abweichende Meinung",
                long.dissenting_opinion.as_deref(),
            ),
        ])?,
    };

    if body.is_empty() {
        return Err(LdmlError::EmptyBody);
    }
    Ok(body)
}
