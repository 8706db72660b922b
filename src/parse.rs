// src/parse.rs

use anyhow::{bail, Context, Result};
use regex::Regex;

/// Convert a "count/total" fraction string into a ratio, rounded to 4
/// decimals. Thousands separators are stripped first, so
/// "1,000/2,000" → 0.5.
pub fn fraction_to_ratio(fraction: &str) -> Result<f64> {
    let cleaned = fraction.trim().replace(',', "");
    let Some((count, total)) = cleaned.split_once('/') else {
        bail!("expected a count/total fraction, got '{fraction}'");
    };
    let count: f64 = count
        .trim()
        .parse()
        .with_context(|| format!("parsing count of '{fraction}'"))?;
    let total: f64 = total
        .trim()
        .parse()
        .with_context(|| format!("parsing total of '{fraction}'"))?;
    if total == 0.0 {
        bail!("fraction '{fraction}' has a zero total");
    }
    Ok(round4(count / total))
}

/// Convert a percentage string like "12.35%" into a ratio in [0, 1].
pub fn percent_to_ratio(percent: &str) -> Result<f64> {
    let trimmed = percent.trim();
    let Some(digits) = trimmed.strip_suffix('%') else {
        bail!("expected a trailing '%' in '{percent}'");
    };
    let value: f64 = digits
        .trim()
        .parse()
        .with_context(|| format!("parsing percentage '{percent}'"))?;
    Ok(value / 100.0)
}

/// Split the compound affected-cases string from a GDC cohort export into
/// its fraction and percentage halves: "100/810,12.35%" → ("100/810",
/// "12.35%").
pub fn split_frequency(frequency: &str) -> Result<(String, String)> {
    let pattern = Regex::new(r"^\s*([0-9,]+\s*/\s*[0-9,]+)\s*,\s*([0-9.]+\s*%)\s*$")
        .expect("frequency pattern should parse");
    let Some(captures) = pattern.captures(frequency) else {
        bail!("expected a 'count/total,NN.NN%' frequency, got '{frequency}'");
    };
    Ok((captures[1].to_string(), captures[2].to_string()))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_plain() -> Result<()> {
        assert_eq!(fraction_to_ratio("3/4")?, 0.75);
        Ok(())
    }

    #[test]
    fn fraction_with_thousands_separators() -> Result<()> {
        assert_eq!(fraction_to_ratio("1,000/2,000")?, 0.5);
        Ok(())
    }

    #[test]
    fn fraction_rounds_to_four_decimals() -> Result<()> {
        assert_eq!(fraction_to_ratio("1/3")?, 0.3333);
        assert_eq!(fraction_to_ratio("2/3")?, 0.6667);
        Ok(())
    }

    #[test]
    fn fraction_rejects_garbage() {
        assert!(fraction_to_ratio("not a fraction").is_err());
        assert!(fraction_to_ratio("12/abc").is_err());
        assert!(fraction_to_ratio("5/0").is_err());
    }

    #[test]
    fn percent_strips_suffix() -> Result<()> {
        assert!((percent_to_ratio("12.35%")? - 0.1235).abs() < 1e-9);
        assert!((percent_to_ratio("100%")? - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn percent_requires_suffix() {
        assert!(percent_to_ratio("12.35").is_err());
        assert!(percent_to_ratio("%").is_err());
    }

    #[test]
    fn frequency_splits_into_halves() -> Result<()> {
        let (fraction, percent) = split_frequency("100/810,12.35%")?;
        assert_eq!(fraction, "100/810");
        assert_eq!(percent, "12.35%");
        Ok(())
    }

    #[test]
    fn frequency_tolerates_whitespace() -> Result<()> {
        let (fraction, percent) = split_frequency(" 8 / 810 , 0.99% ")?;
        assert_eq!(fraction, "8 / 810");
        assert_eq!(percent, "0.99%");
        Ok(())
    }

    #[test]
    fn frequency_rejects_missing_half() {
        assert!(split_frequency("100/810").is_err());
        assert!(split_frequency("12.35%").is_err());
        assert!(split_frequency("").is_err());
    }
}
