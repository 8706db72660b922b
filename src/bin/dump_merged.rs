use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use cohortdiff::{analyze, merge, report, table};

const COLON_PATH: &str = "cancer_data/colon.tsv";
const RECTUM_PATH: &str = "cancer_data/rectum.tsv";
const COLON: &str = "Colon";
const RECTUM: &str = "Rectum";

/// Companion dump tool: loads and merges both cohort exports, then prints
/// the full merged table plus the shared-mutation and cohort-to-total
/// breakdowns.
fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let colon = table::read_cohort_table(COLON_PATH)?;
    let rectum = table::read_cohort_table(RECTUM_PATH)?;
    let merged = merge::merge_tables(COLON, &colon, RECTUM, &rectum)?;

    println!("Merged cohorts ({} records)", merged.records.len());
    report::merged_table_view(&merged).printstd();

    let (only_colon, only_rectum) = analyze::find_differences(&merged);
    println!("{COLON}-only mutations: {}", report::fmt_id_list(&only_colon));
    println!(
        "{RECTUM}-only mutations: {}",
        report::fmt_id_list(&only_rectum)
    );

    let common = analyze::find_commonalities(&colon, &rectum);
    println!("\nShared mutations ({})", common.len());
    report::commonalities_view(&common, COLON, RECTUM).printstd();

    for label in [COLON, RECTUM] {
        let deltas = analyze::compare_to_total(&merged, label)?;
        println!("\n{label} vs GDC-wide total ({} records)", deltas.len());
        report::deltas_view(&deltas, label).printstd();
    }

    Ok(())
}
