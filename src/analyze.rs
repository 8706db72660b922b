// src/analyze.rs

use anyhow::{bail, Result};
use std::collections::HashMap;

use crate::merge::{MergedRecord, MergedTable};
use crate::table::MutationRow;

/// A mutation found in both cohort exports, with the raw frequency strings
/// carried under cohort-specific names.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonRecord {
    pub dna_change: String,
    pub frequency_1: String,
    pub frequency_2: String,
    pub impact: String,
}

/// One row of a cohort-to-total comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRecord {
    pub dna_change: String,
    /// Cohort case ratio minus the GDC-wide case ratio.
    pub delta: f64,
}

/// Partition merged records into identifiers seen only in the first cohort
/// and identifiers seen only in the second, by presence of the normalized
/// per-cohort case ratios.
pub fn find_differences(merged: &MergedTable) -> (Vec<String>, Vec<String>) {
    let mut only_1 = Vec::new();
    let mut only_2 = Vec::new();
    for record in &merged.records {
        match (record.cases_1, record.cases_2) {
            (Some(_), None) => only_1.push(record.dna_change.clone()),
            (None, Some(_)) => only_2.push(record.dna_change.clone()),
            _ => {}
        }
    }
    (only_1, only_2)
}

/// The per-cohort exclusive-mutation counts as a two-line summary.
pub fn find_num_differences(merged: &MergedTable) -> String {
    let (only_1, only_2) = find_differences(merged);
    format!(
        "{}: {}\n{}: {}",
        merged.label_1,
        only_1.len(),
        merged.label_2,
        only_2.len()
    )
}

/// Inner join of the two source exports on the identifier.
pub fn find_commonalities(rows_1: &[MutationRow], rows_2: &[MutationRow]) -> Vec<CommonRecord> {
    let index_2: HashMap<&str, &MutationRow> = rows_2
        .iter()
        .map(|row| (row.dna_change.as_str(), row))
        .collect();

    rows_1
        .iter()
        .filter_map(|row_1| {
            index_2.get(row_1.dna_change.as_str()).map(|row_2| CommonRecord {
                dna_change: row_1.dna_change.clone(),
                frequency_1: row_1.affected_in_cohort.clone(),
                frequency_2: row_2.affected_in_cohort.clone(),
                impact: row_2.impact.clone(),
            })
        })
        .collect()
}

/// Number of mutations shared by both cohorts.
pub fn find_num_commonalities(rows_1: &[MutationRow], rows_2: &[MutationRow]) -> usize {
    find_commonalities(rows_1, rows_2).len()
}

/// Look up one identifier in the merged table. `Some` when the identifier is
/// present in at least one cohort (either side's ratio may still be `None`),
/// `None` when it is absent entirely.
pub fn in_both_sets(
    merged: &MergedTable,
    dna_change: &str,
) -> Option<(Option<f64>, Option<f64>)> {
    merged
        .get(dna_change)
        .map(|record| (record.cases_1, record.cases_2))
}

/// Per-identifier difference between a cohort's case ratio and the GDC-wide
/// ratio, sorted descending. Records missing either side are dropped.
pub fn compare_to_total(merged: &MergedTable, label: &str) -> Result<Vec<DeltaRecord>> {
    let select: fn(&MergedRecord) -> Option<f64> = if label == merged.label_1 {
        |record| record.cases_1
    } else if label == merged.label_2 {
        |record| record.cases_2
    } else {
        bail!(
            "unknown cohort '{label}', expected '{}' or '{}'",
            merged.label_1,
            merged.label_2
        );
    };

    let mut deltas: Vec<DeltaRecord> = merged
        .records
        .iter()
        .filter_map(|record| match (select(record), record.total_cases) {
            (Some(cases), Some(total)) => Some(DeltaRecord {
                dna_change: record.dna_change.clone(),
                delta: cases - total,
            }),
            _ => None,
        })
        .collect();
    deltas.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    Ok(deltas)
}
