// src/table.rs

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Columns a GDC mutation-frequency export must carry.
pub const REQUIRED_HEADERS: [&str; 4] = [
    "DNA Change",
    "# Affected Cases in Cohort",
    "# Affected Cases Across the GDC",
    "Impact",
];

/// One row of a GDC mutation-frequency export, as exported from the portal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MutationRow {
    /// The mutation identifier, e.g. "chr7:g.140753336A>T". Join key.
    #[serde(rename = "DNA Change")]
    pub dna_change: String,
    /// Compound string: "<count>/<total>,<NN.NN%>".
    #[serde(rename = "# Affected Cases in Cohort")]
    pub affected_in_cohort: String,
    /// Fraction string: "count/total", thousands separators allowed.
    #[serde(rename = "# Affected Cases Across the GDC")]
    pub affected_across_gdc: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

/// Read a tab-delimited cohort export with a header row into memory.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_cohort_table<P: AsRef<Path>>(path: P) -> Result<Vec<MutationRow>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening cohort table {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers()?.clone();
    check_headers(path, &headers)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let row: MutationRow = result
            .with_context(|| format!("parsing {} at record {}", path.display(), idx + 1))?;
        rows.push(row);
    }
    info!(rows = rows.len(), "loaded cohort table");
    Ok(rows)
}

fn check_headers(path: &Path, headers: &csv::StringRecord) -> Result<()> {
    let present: Vec<&str> = headers.iter().collect();
    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !present.contains(required))
        .collect();
    if !missing.is_empty() {
        bail!(
            "{} is missing required column(s): {}",
            path.display(),
            missing.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "DNA Change\t# Affected Cases in Cohort\t# Affected Cases Across the GDC\tImpact";

    fn write_tsv(lines: &[&str]) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        for line in lines {
            writeln!(tmp, "{line}")?;
        }
        Ok(tmp)
    }

    #[test]
    fn reads_rows_from_tsv() -> Result<()> {
        let tmp = write_tsv(&[
            HEADER,
            "chr7:g.140753336A>T\t100/810,12.35%\t520/10,202\tHIGH",
            "chr1:g.100A>T\t8/810,0.99%\t60/10,202\tMODERATE",
        ])?;

        let rows = read_cohort_table(tmp.path())?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dna_change, "chr7:g.140753336A>T");
        assert_eq!(rows[0].affected_in_cohort, "100/810,12.35%");
        assert_eq!(rows[0].affected_across_gdc, "520/10,202");
        assert_eq!(rows[1].impact, "MODERATE");
        Ok(())
    }

    #[test]
    fn trims_whitespace_around_fields() -> Result<()> {
        let tmp = write_tsv(&[HEADER, "chr1:g.100A>T \t 8/810,0.99%\t60/10,202\t LOW "])?;

        let rows = read_cohort_table(tmp.path())?;
        assert_eq!(rows[0].dna_change, "chr1:g.100A>T");
        assert_eq!(rows[0].impact, "LOW");
        Ok(())
    }

    #[test]
    fn missing_required_column_is_an_error() -> Result<()> {
        let tmp = write_tsv(&[
            "DNA Change\t# Affected Cases in Cohort\tImpact",
            "chr1:g.100A>T\t8/810,0.99%\tLOW",
        ])?;

        let err = read_cohort_table(tmp.path()).unwrap_err();
        assert!(err
            .to_string()
            .contains("# Affected Cases Across the GDC"));
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_cohort_table("cancer_data/does_not_exist.tsv").is_err());
    }
}
