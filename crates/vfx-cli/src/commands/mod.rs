//! CLI command implementations

pub mod apply;
pub mod cdl;
pub mod matrix;
pub mod formats;

use anyhow::{Context, Result, bail};

/// Parse comma-separated numbers.
pub fn parse_list(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid number '{}' in '{}'", p.trim(), s))
        })
        .collect()
}

/// Parse exactly `N` comma-separated numbers.
pub fn parse_array<const N: usize>(s: &str) -> Result<[f64; N]> {
    let values = parse_list(s)?;
    match <[f64; N]>::try_from(values.as_slice()) {
        Ok(arr) => Ok(arr),
        Err(_) => bail!("Expected {} values, got {} in '{}'", N, values.len(), s),
    }
}

/// Parse either one number (used for all four channels) or R,G,B,A.
pub fn parse_rgba(s: &str) -> Result<[f64; 4]> {
    let values = parse_list(s)?;
    match values.as_slice() {
        &[v] => Ok([v; 4]),
        &[r, g, b, a] => Ok([r, g, b, a]),
        _ => bail!("Expected 1 or 4 values, got {} in '{}'", values.len(), s),
    }
}

/// Format a pixel as space-separated values.
pub fn format_pixel(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
