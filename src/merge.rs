// src/merge.rs

use anyhow::{bail, Context, Result};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::parse::{fraction_to_ratio, percent_to_ratio, split_frequency};
use crate::table::MutationRow;

/// Outer-joined view of two cohort exports, keyed by DNA Change.
#[derive(Debug)]
pub struct MergedTable {
    /// Display label of the first cohort, e.g. "Colon".
    pub label_1: String,
    /// Display label of the second cohort, e.g. "Rectum".
    pub label_2: String,
    pub records: Vec<MergedRecord>,
}

/// One identifier's view across both cohorts. A record exists iff the
/// identifier appears in at least one source table; fields from the absent
/// side are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub dna_change: String,
    /// Share of first-cohort cases carrying the mutation, from the
    /// percentage half of the compound frequency string.
    pub cases_1: Option<f64>,
    /// Same for the second cohort.
    pub cases_2: Option<f64>,
    /// Raw "count/total" prevalence across the whole GDC, coalesced from
    /// whichever side supplied it.
    pub total_raw: Option<String>,
    /// `total_raw` as a ratio.
    pub total_cases: Option<f64>,
}

impl MergedTable {
    /// Look up a record by identifier.
    pub fn get(&self, dna_change: &str) -> Option<&MergedRecord> {
        self.records.iter().find(|r| r.dna_change == dna_change)
    }
}

/// Full outer join of two cohort exports on the DNA Change identifier,
/// preserving first-seen row order. Each identifier appears exactly once;
/// duplicates within one export are logged and dropped.
#[tracing::instrument(
    level = "info",
    skip(rows_1, rows_2),
    fields(rows_1 = rows_1.len(), rows_2 = rows_2.len())
)]
pub fn merge_tables(
    label_1: &str,
    rows_1: &[MutationRow],
    label_2: &str,
    rows_2: &[MutationRow],
) -> Result<MergedTable> {
    if label_1 == label_2 {
        bail!("cohort labels must differ, both are '{label_1}'");
    }

    let mut index_2: HashMap<&str, &MutationRow> = HashMap::new();
    for row in rows_2 {
        match index_2.entry(row.dna_change.as_str()) {
            Entry::Occupied(_) => {
                warn!(dna_change = %row.dna_change, label = label_2, "duplicate identifier, keeping first");
            }
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
        }
    }

    let mut records = Vec::with_capacity(rows_1.len() + rows_2.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for row in rows_1 {
        if !seen.insert(row.dna_change.as_str()) {
            warn!(dna_change = %row.dna_change, label = label_1, "duplicate identifier, keeping first");
            continue;
        }
        let matched = index_2.get(row.dna_change.as_str()).copied();
        records.push(merge_pair(label_1, Some(row), label_2, matched)?);
    }

    for row in rows_2 {
        // left-matched identifiers and right-side duplicates are already seen
        if !seen.insert(row.dna_change.as_str()) {
            continue;
        }
        records.push(merge_pair(label_1, None, label_2, Some(row))?);
    }

    info!(records = records.len(), "merged cohort tables");
    Ok(MergedTable {
        label_1: label_1.to_string(),
        label_2: label_2.to_string(),
        records,
    })
}

/// Build one merged record from whichever sides are present. The per-cohort
/// fraction half of the compound string and the impact columns are dropped
/// here, matching the reshape the merged view exposes.
fn merge_pair(
    label_1: &str,
    row_1: Option<&MutationRow>,
    label_2: &str,
    row_2: Option<&MutationRow>,
) -> Result<MergedRecord> {
    let dna_change = row_1
        .or(row_2)
        .map(|r| r.dna_change.clone())
        .expect("at least one side must be present");

    let cases_1 = cohort_ratio(label_1, row_1)?;
    let cases_2 = cohort_ratio(label_2, row_2)?;

    let total_raw = row_1
        .map(|r| r.affected_across_gdc.clone())
        .or_else(|| row_2.map(|r| r.affected_across_gdc.clone()));
    let total_cases = total_raw
        .as_deref()
        .map(fraction_to_ratio)
        .transpose()
        .with_context(|| format!("GDC-wide total for {dna_change}"))?;

    Ok(MergedRecord {
        dna_change,
        cases_1,
        cases_2,
        total_raw,
        total_cases,
    })
}

fn cohort_ratio(label: &str, row: Option<&MutationRow>) -> Result<Option<f64>> {
    let Some(row) = row else {
        return Ok(None);
    };
    let (_fraction, percent) = split_frequency(&row.affected_in_cohort)
        .with_context(|| format!("{label} frequency for {}", row.dna_change))?;
    let ratio = percent_to_ratio(&percent)
        .with_context(|| format!("{label} frequency for {}", row.dna_change))?;
    Ok(Some(ratio))
}
