// SPDX-License-Identifier: PMPL-1.0-or-later

//! Key consistency checks across locales.
//!
//! With a supplied schema every concrete locale must only use keys the
//! schema declares. Without one, every locale is checked against every other
//! locale, so all of them must share one key set. Only key presence is
//! checked here; leaf/group agreement is checked during emission.

use crate::error::{GenError, Result};
use crate::types::{display_locale, Catalog, Group, Node};

/// Fails on the first key of `candidate` that `baseline` lacks.
pub fn check_contains(
    candidate: &Group,
    baseline: &Group,
    candidate_locale: &str,
    baseline_locale: &str,
) -> Result<()> {
    let mut path = Vec::new();
    contains_at(
        candidate,
        baseline,
        &mut path,
        candidate_locale,
        baseline_locale,
    )
}

fn contains_at(
    candidate: &Group,
    baseline: &Group,
    path: &mut Vec<String>,
    candidate_locale: &str,
    baseline_locale: &str,
) -> Result<()> {
    for entry in candidate.iter() {
        path.push(entry.key.name.clone());
        let Some(other) = baseline.get(&entry.key.name) else {
            return Err(GenError::MissingKey {
                path: path.join("."),
                present_in: display_locale(candidate_locale).to_string(),
                missing_from: display_locale(baseline_locale).to_string(),
            });
        };
        if let (Node::Group(inner), Node::Group(other_inner)) = (&entry.node, &other.node) {
            contains_at(inner, other_inner, path, candidate_locale, baseline_locale)?;
        }
        path.pop();
    }
    Ok(())
}

/// Runs the consistency gate over a freshly built catalog.
pub fn validate(catalog: &Catalog) -> Result<()> {
    if catalog.has_supplied_abstract() {
        for (locale, tree) in catalog.locales() {
            check_contains(tree, catalog.abstract_tree(), locale, "")?;
        }
        return Ok(());
    }

    for (locale, tree) in catalog.locales() {
        for (other, other_tree) in catalog.locales() {
            if locale != other {
                check_contains(tree, other_tree, locale, other)?;
            }
        }
    }
    Ok(())
}
