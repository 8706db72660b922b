use anyhow::Result;
use cohortdiff::{analyze, merge, report, table};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const COLON_PATH: &str = "cancer_data/colon.tsv";
const RECTUM_PATH: &str = "cancer_data/rectum.tsv";
const COLON: &str = "Colon";
const RECTUM: &str = "Rectum";

/// BRAF V600E, the classic colorectal hotspot.
const LOOKUP_DNA_CHANGE: &str = "chr7:g.140753336A>T";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) load both cohort exports ─────────────────────────────────
    let colon = table::read_cohort_table(COLON_PATH)?;
    let rectum = table::read_cohort_table(RECTUM_PATH)?;

    // ─── 3) merge on DNA Change ──────────────────────────────────────
    let merged = merge::merge_tables(COLON, &colon, RECTUM, &rectum)?;

    // ─── 4) print the comparison summary ─────────────────────────────
    println!("{}", analyze::find_num_differences(&merged));
    println!(
        "Shared: {}",
        analyze::find_num_commonalities(&colon, &rectum)
    );

    match analyze::in_both_sets(&merged, LOOKUP_DNA_CHANGE) {
        Some((colon_cases, rectum_cases)) => println!(
            "{}: ({}, {})",
            LOOKUP_DNA_CHANGE,
            report::fmt_ratio(colon_cases),
            report::fmt_ratio(rectum_cases)
        ),
        None => println!("{LOOKUP_DNA_CHANGE}: not found in either cohort"),
    }

    Ok(())
}
