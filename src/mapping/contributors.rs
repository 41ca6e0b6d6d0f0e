//! Contributor ranking
//!
//! Stakeholder lines are mapped to ONIX roles, named through the backend's
//! name registers, deduplicated, ordered and numbered.

use std::collections::HashSet;

use async_trait::async_trait;

use super::tables::{CONTRIBUTOR_ROLES, ROLE_PRIORITIES};
use crate::{
    error::AppResult,
    models::{
        facts::{ContributorKind, RawContributor},
        onix::{ContributorEntry, NameIdentifier},
    },
};

/// Looks up the display name (`Last, First`) of a contributor key
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve_name(&self, kind: ContributorKind, key: &str) -> AppResult<Option<String>>;
}

/// A contributor with a mapped role and a resolved name, not yet numbered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub role: String,
    pub kind: ContributorKind,
    pub key: String,
    pub name: String,
    pub priority: i32,
}

/// ONIX role for an internal stakeholder role, if it has one
pub fn onix_role(role: Option<&str>) -> Option<&'static str> {
    role.and_then(|r| CONTRIBUTOR_ROLES.get(r.trim()).copied())
}

/// Map, name, rank and number the contributors of one product
pub async fn build_contributors(
    raw: &[RawContributor],
    names: &dyn NameResolver,
) -> AppResult<Vec<ContributorEntry>> {
    let mut candidates = Vec::with_capacity(raw.len());
    for contributor in raw {
        let Some(role) = onix_role(contributor.role.as_deref()) else {
            continue;
        };
        let Some(name) = names
            .resolve_name(contributor.kind, &contributor.key)
            .await?
            .filter(|n| !n.trim().is_empty())
        else {
            continue;
        };
        candidates.push(Candidate {
            role: role.to_string(),
            kind: contributor.kind,
            key: contributor.key.clone(),
            name: name.trim().to_string(),
            priority: contributor.priority,
        });
    }
    Ok(rank(candidates))
}

/// Deduplicate, sort descending by (role priority, source priority, initial
/// weight) and assign sequence numbers from 1.
pub fn rank(candidates: Vec<Candidate>) -> Vec<ContributorEntry> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| seen.insert((c.role.clone(), c.kind, c.key.clone())))
        .collect();

    // Stable: full ties keep backend order
    candidates.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));

    candidates
        .into_iter()
        .zip(1u32..)
        .map(|(candidate, sequence_number)| {
            let (last_name, first_name) = split_name(&candidate.name);
            ContributorEntry {
                sequence_number,
                role: candidate.role,
                name_identifier: NameIdentifier {
                    id_type: "01".to_string(),
                    id_type_name: id_type_name(candidate.kind).to_string(),
                    id_value: candidate.key,
                },
                inverted_name: candidate.name,
                first_name,
                last_name,
            }
        })
        .collect()
}

/// Split `Last, First` on the first `", "`; a bare name is all last name
pub fn split_name(name: &str) -> (String, Option<String>) {
    match name.split_once(", ") {
        Some((last, first)) => (last.to_string(), Some(first.to_string())),
        None => (name.to_string(), None),
    }
}

fn sort_key(candidate: &Candidate) -> (i32, i32, i64) {
    let role_priority = ROLE_PRIORITIES.get(candidate.role.as_str()).copied().unwrap_or(0);
    let (last_name, _) = split_name(&candidate.name);
    (role_priority, candidate.priority, initial_weight(&last_name))
}

/// `100 - code point of the first letter`: earlier letters weigh more, so a
/// descending sort puts them first. Non-ASCII initials go negative.
fn initial_weight(last_name: &str) -> i64 {
    let code = last_name.chars().next().map_or(0, |c| i64::from(u32::from(c)));
    100 - code
}

fn id_type_name(kind: ContributorKind) -> &'static str {
    match kind {
        ContributorKind::Resource => "Resource ID",
        ContributorKind::Creditor => "Creditor ID",
    }
}
