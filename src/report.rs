// src/report.rs

use itertools::Itertools;
use prettytable::{format, Cell, Row, Table};

use crate::analyze::{CommonRecord, DeltaRecord};
use crate::merge::MergedTable;

/// Render a ratio for display, "-" when the side is absent.
pub fn fmt_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(value) => format!("{value:.4}"),
        None => "-".to_string(),
    }
}

/// An identifier list as one comma-separated line, "(none)" when empty.
pub fn fmt_id_list(ids: &[String]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.iter().join(", ")
    }
}

/// The full merged table as a box-drawn table.
pub fn merged_table_view(merged: &MergedTable) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    table.add_row(Row::new(vec![
        Cell::new("DNA Change").style_spec("bFg"),
        Cell::new(&format!("{} Cases", merged.label_1)).style_spec("bFg"),
        Cell::new(&format!("{} Cases", merged.label_2)).style_spec("bFg"),
        Cell::new("Total").style_spec("bFg"),
        Cell::new("Total Cases").style_spec("bFg"),
    ]));

    for record in &merged.records {
        table.add_row(Row::new(vec![
            Cell::new(&record.dna_change),
            Cell::new(&fmt_ratio(record.cases_1)).style_spec("r"),
            Cell::new(&fmt_ratio(record.cases_2)).style_spec("r"),
            Cell::new(record.total_raw.as_deref().unwrap_or("-")),
            Cell::new(&fmt_ratio(record.total_cases)).style_spec("r"),
        ]));
    }
    table
}

/// The shared mutations with their raw per-cohort frequency strings.
pub fn commonalities_view(common: &[CommonRecord], label_1: &str, label_2: &str) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    table.add_row(Row::new(vec![
        Cell::new("DNA Change").style_spec("bFg"),
        Cell::new(&format!("{label_1} Frequency")).style_spec("bFg"),
        Cell::new(&format!("{label_2} Frequency")).style_spec("bFg"),
        Cell::new("Impact").style_spec("bFg"),
    ]));

    for record in common {
        table.add_row(Row::new(vec![
            Cell::new(&record.dna_change),
            Cell::new(&record.frequency_1),
            Cell::new(&record.frequency_2),
            Cell::new(&record.impact),
        ]));
    }
    table
}

/// Cohort-minus-total deltas, one row per identifier.
pub fn deltas_view(deltas: &[DeltaRecord], label: &str) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    table.add_row(Row::new(vec![
        Cell::new("DNA Change").style_spec("bFg"),
        Cell::new(&format!("{label} to Total")).style_spec("bFg"),
    ]));

    for record in deltas {
        table.add_row(Row::new(vec![
            Cell::new(&record.dna_change),
            Cell::new(&format!("{:.4}", record.delta)).style_spec("r"),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_format_to_four_decimals() {
        assert_eq!(fmt_ratio(Some(0.1235)), "0.1235");
        assert_eq!(fmt_ratio(Some(0.5)), "0.5000");
        assert_eq!(fmt_ratio(None), "-");
    }

    #[test]
    fn id_lists_join_with_commas() {
        assert_eq!(fmt_id_list(&[]), "(none)");
        let ids = vec!["chr1:g.100A>T".to_string(), "chr2:g.200C>G".to_string()];
        assert_eq!(fmt_id_list(&ids), "chr1:g.100A>T, chr2:g.200C>G");
    }

    #[test]
    fn deltas_view_renders_every_row() {
        let deltas = vec![
            DeltaRecord {
                dna_change: "chr7:g.140753336A>T".to_string(),
                delta: 0.0725,
            },
            DeltaRecord {
                dna_change: "chr1:g.100A>T".to_string(),
                delta: 0.004,
            },
        ];
        let rendered = deltas_view(&deltas, "Colon").to_string();
        assert!(rendered.contains("Colon to Total"));
        assert!(rendered.contains("chr7:g.140753336A>T"));
        assert!(rendered.contains("0.0725"));
    }
}
