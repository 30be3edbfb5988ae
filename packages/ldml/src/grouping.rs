//! Grouping of stored norm rows into norm references.
//!
//! Storage keeps one row per single norm. The output groups all rows that
//! cite the same statute under one [`NormReference`]:
//!
//! 1. rows are keyed by the catalogue abbreviation id, else by the raw
//!    abbreviation string; rows with neither form a singleton group;
//! 2. keyed groups appear in first-seen order, their single norms in row order;
//! 3. singleton groups follow all keyed groups in their relative input order.

use chrono::NaiveDate;

use crate::types::{non_blank, NormRow};

/// One specific provision within a norm reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleNorm {
    pub text: Option<String>,
    pub version_date: Option<NaiveDate>,
    pub relevance_date: Option<String>,
    pub legal_force: Option<String>,
}

/// All single norms citing one statute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormReference {
    /// Display abbreviation (catalogue value or raw value).
    pub abbreviation: Option<String>,
    pub single_norms: Vec<SingleNorm>,
}

#[derive(Debug, PartialEq, Eq)]
enum GroupKey<'a> {
    Catalogue(&'a str),
    Raw(&'a str),
}

fn group_key(row: &NormRow) -> Option<GroupKey<'_>> {
    let catalogue_id = row
        .norm_abbreviation
        .as_ref()
        .and_then(|a| non_blank(a.id.as_deref()));

    catalogue_id.map(GroupKey::Catalogue).or_else(|| {
        non_blank(row.norm_abbreviation_raw_value.as_deref())
            .map(|raw| GroupKey::Raw(raw.trim()))
    })
}

fn display_abbreviation(row: &NormRow) -> Option<String> {
    row.norm_abbreviation
        .as_ref()
        .and_then(|a| non_blank(a.abbreviation.as_deref()))
        .or_else(|| non_blank(row.norm_abbreviation_raw_value.as_deref()))
        .map(|a| a.trim().to_string())
}

/// Single norm carried by a row, or `None` if the row only names the statute.
fn single_norm(row: &NormRow) -> Option<SingleNorm> {
    let text = non_blank(row.single_norm.as_deref()).map(|t| t.trim().to_string());
    let relevance_date = non_blank(row.date_of_relevance.as_deref()).map(|d| d.trim().to_string());
    let legal_force = row.legal_force.as_ref().and_then(|f| f.label());

    if text.is_none()
        && row.date_of_version.is_none()
        && relevance_date.is_none()
        && legal_force.is_none()
    {
        return None;
    }

    Some(SingleNorm {
        text,
        version_date: row.date_of_version,
        relevance_date,
        legal_force,
    })
}

/// Collapse norm rows into norm references.
///
/// Grouping is a stable partition: every row carrying single-norm data
/// contributes exactly one [`SingleNorm`], and the result depends only on
/// the input order.
///
/// # Examples
/// ```
/// use caselaw_ldml::grouping::group_norms;
/// use caselaw_ldml::types::NormRow;
///
/// let row = |raw: &str, norm: &str| NormRow {
///     norm_abbreviation_raw_value: Some(raw.to_string()),
///     single_norm: Some(norm.to_string()),
///     ..NormRow::default()
/// };
/// let groups = group_norms(&[row("BGB", "§ 1"), row("ZPO", "§ 2"), row("BGB", "§ 3")]);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].single_norms.len(), 2);
/// ```
#[must_use]
pub fn group_norms(rows: &[NormRow]) -> Vec<NormReference> {
    let mut keyed: Vec<(GroupKey<'_>, Option<String>, Vec<SingleNorm>)> = Vec::new();
    let mut singletons: Vec<NormReference> = Vec::new();

    for row in rows {
        let norm = single_norm(row);

        let Some(key) = group_key(row) else {
            // A row without abbreviation and without single-norm data carries nothing
            if let Some(norm) = norm {
                singletons.push(NormReference {
                    abbreviation: None,
                    single_norms: vec![norm],
                });
            }
            continue;
        };

        match keyed.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, abbreviation, norms)) => {
                if abbreviation.is_none() {
                    *abbreviation = display_abbreviation(row);
                }
                norms.extend(norm);
            }
            None => keyed.push((key, display_abbreviation(row), norm.into_iter().collect())),
        }
    }

    keyed
        .into_iter()
        .map(|(_, abbreviation, single_norms)| NormReference {
            abbreviation,
            single_norms,
        })
        .chain(singletons)
        .collect()
}

/// Flatten the legal-force labels of all single norms, in group order.
#[must_use]
pub fn legal_force_labels(references: &[NormReference]) -> Vec<String> {
    references
        .iter()
        .flat_map(|r| &r.single_norms)
        .filter_map(|n| n.legal_force.clone())
        .collect()
}

/// Pair each item with its 1-based rank.
///
/// # Examples
/// ```
/// use caselaw_ldml::grouping::ranked;
///
/// let ranks: Vec<usize> = ranked(["a", "b"]).map(|(rank, _)| rank).collect();
/// assert_eq!(ranks, vec![1, 2]);
/// ```
pub fn ranked<I: IntoIterator>(items: I) -> impl Iterator<Item = (usize, I::Item)> {
    items.into_iter().enumerate().map(|(i, item)| (i + 1, item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LegalForce, NormAbbreviation};
    use pretty_assertions::assert_eq;

    fn catalogue_row(id: &str, abbreviation: &str, norm: &str) -> NormRow {
        NormRow {
            norm_abbreviation: Some(NormAbbreviation {
                id: Some(id.to_string()),
                abbreviation: Some(abbreviation.to_string()),
            }),
            single_norm: Some(norm.to_string()),
            ..NormRow::default()
        }
    }

    fn raw_row(raw: &str, norm: &str) -> NormRow {
        NormRow {
            norm_abbreviation_raw_value: Some(raw.to_string()),
            single_norm: Some(norm.to_string()),
            ..NormRow::default()
        }
    }

    fn bare_row(norm: &str) -> NormRow {
        NormRow {
            single_norm: Some(norm.to_string()),
            ..NormRow::default()
        }
    }

    fn texts(reference: &NormReference) -> Vec<&str> {
        reference
            .single_norms
            .iter()
            .filter_map(|n| n.text.as_deref())
            .collect()
    }

    fn total(references: &[NormReference]) -> usize {
        references.iter().map(|r| r.single_norms.len()).sum()
    }

    #[test]
    fn test_groups_by_catalogue_id_in_first_seen_order() {
        let rows = vec![
            catalogue_row("id-bgb", "BGB", "§ 823"),
            catalogue_row("id-zpo", "ZPO", "§ 91"),
            catalogue_row("id-bgb", "BGB", "§ 826"),
        ];
        let groups = group_norms(&rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].abbreviation.as_deref(), Some("BGB"));
        assert_eq!(texts(&groups[0]), vec!["§ 823", "§ 826"]);
        assert_eq!(groups[1].abbreviation.as_deref(), Some("ZPO"));
        assert_eq!(texts(&groups[1]), vec!["§ 91"]);
    }

    #[test]
    fn test_raw_value_fallback() {
        let rows = vec![raw_row("SGB XII", "§ 1"), raw_row("SGB XII", "§ 2")];
        let groups = group_norms(&rows);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].abbreviation.as_deref(), Some("SGB XII"));
        assert_eq!(texts(&groups[0]), vec!["§ 1", "§ 2"]);
    }

    #[test]
    fn test_catalogue_and_raw_keys_are_distinct() {
        let rows = vec![catalogue_row("id-bgb", "BGB", "§ 1"), raw_row("BGB", "§ 2")];
        assert_eq!(group_norms(&rows).len(), 2);
    }

    #[test]
    fn test_singletons_follow_keyed_groups() {
        let rows = vec![
            bare_row("frei 1"),
            raw_row("BGB", "§ 1"),
            bare_row("frei 2"),
            raw_row("BGB", "§ 2"),
        ];
        let groups = group_norms(&rows);

        assert_eq!(groups.len(), 3);
        assert_eq!(texts(&groups[0]), vec!["§ 1", "§ 2"]);
        assert_eq!(groups[1].abbreviation, None);
        assert_eq!(texts(&groups[1]), vec!["frei 1"]);
        assert_eq!(texts(&groups[2]), vec!["frei 2"]);
    }

    #[test]
    fn test_single_norm_count_is_conserved() {
        let rows = vec![
            raw_row("BGB", "§ 1"),
            bare_row("frei"),
            catalogue_row("id", "ZPO", "§ 2"),
            raw_row("BGB", "§ 3"),
            catalogue_row("id", "ZPO", "§ 4"),
        ];
        assert_eq!(total(&group_norms(&rows)), rows.len());
    }

    #[test]
    fn test_permutation_keeps_group_membership() {
        let a = vec![
            raw_row("BGB", "§ 1"),
            raw_row("ZPO", "§ 2"),
            raw_row("BGB", "§ 3"),
            raw_row("StGB", "§ 4"),
        ];
        // Groups interleaved differently, order within each group unchanged
        let b = vec![
            raw_row("StGB", "§ 4"),
            raw_row("BGB", "§ 1"),
            raw_row("BGB", "§ 3"),
            raw_row("ZPO", "§ 2"),
        ];

        let mut groups_a: Vec<_> = group_norms(&a)
            .into_iter()
            .map(|g| (g.abbreviation.clone(), g.single_norms))
            .collect();
        let mut groups_b: Vec<_> = group_norms(&b)
            .into_iter()
            .map(|g| (g.abbreviation.clone(), g.single_norms))
            .collect();
        groups_a.sort_by(|x, y| x.0.cmp(&y.0));
        groups_b.sort_by(|x, y| x.0.cmp(&y.0));

        assert_eq!(groups_a, groups_b);
        assert_eq!(group_norms(&a), group_norms(&a));
    }

    #[test]
    fn test_abbreviation_only_row_contributes_no_single_norm() {
        let rows = vec![NormRow {
            norm_abbreviation_raw_value: Some("GG".to_string()),
            ..NormRow::default()
        }];
        let groups = group_norms(&rows);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].abbreviation.as_deref(), Some("GG"));
        assert!(groups[0].single_norms.is_empty());
    }

    #[test]
    fn test_single_norm_fields() {
        let rows = vec![NormRow {
            norm_abbreviation_raw_value: Some("BGB".to_string()),
            single_norm: Some(" § 823 Abs. 1 ".to_string()),
            date_of_version: NaiveDate::from_ymd_opt(2002, 1, 2),
            date_of_relevance: Some("2002".to_string()),
            legal_force: Some(LegalForce {
                force_type: Some("Nichtig".to_string()),
                region: Some("Berlin".to_string()),
            }),
            ..NormRow::default()
        }];
        let groups = group_norms(&rows);

        assert_eq!(
            groups[0].single_norms,
            vec![SingleNorm {
                text: Some("§ 823 Abs. 1".to_string()),
                version_date: NaiveDate::from_ymd_opt(2002, 1, 2),
                relevance_date: Some("2002".to_string()),
                legal_force: Some("Nichtig (Berlin)".to_string()),
            }]
        );
        assert_eq!(legal_force_labels(&groups), vec!["Nichtig (Berlin)"]);
    }

    #[test]
    fn test_empty_row_is_dropped() {
        let rows = vec![NormRow::default(), raw_row("BGB", "§ 1")];
        let groups = group_norms(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].abbreviation.as_deref(), Some("BGB"));
    }

    #[test]
    fn test_empty_input() {
        assert!(group_norms(&[]).is_empty());
        assert!(legal_force_labels(&[]).is_empty());
    }

    #[test]
    fn test_ranked_is_one_based() {
        let ranks: Vec<(usize, char)> = ranked(['a', 'b', 'c']).collect();
        assert_eq!(ranks, vec![(1, 'a'), (2, 'b'), (3, 'c')]);
    }
}
