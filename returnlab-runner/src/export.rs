//! Reporting and export: JSON, CSV, Markdown and plain-text renderings.
//!
//! - **JSON**: the whole [`StudyReport`] with a `schema_version`; newer
//!   versions are rejected on load
//! - **CSV**: one market's adjusted table
//! - **Markdown / text**: human-readable per-market reports

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use returnlab_core::domain::{Column, YearlyRecord};
use returnlab_core::stats::{OverlayHistogram, SummaryStatistics};

use crate::report::{MarketFailure, MarketOutcome, MarketReport, StudyReport, SCHEMA_VERSION};

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize a study report to pretty JSON.
pub fn export_json(report: &StudyReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize StudyReport to JSON")
}

/// Deserialize a study report, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<StudyReport> {
    let report: StudyReport =
        serde_json::from_str(json).context("failed to deserialize StudyReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Export a market's adjusted table. Null cells are left empty.
pub fn export_table_csv(records: &[YearlyRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["Year"];
    header.extend(Column::ALL.iter().map(|c| c.header()));
    wtr.write_record(&header)?;

    for r in records {
        let mut row = vec![r.year.to_string()];
        row.extend(
            Column::ALL
                .iter()
                .map(|&c| r.get(c).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&row)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown ───────────────────────────────────────────────────────

/// Markdown report for one market outcome.
pub fn market_markdown(outcome: &MarketOutcome, decimals: usize) -> String {
    match outcome {
        MarketOutcome::Completed(report) => report_markdown(report, decimals),
        MarketOutcome::Failed(failure) => failure_markdown(failure),
    }
}

fn failure_markdown(failure: &MarketFailure) -> String {
    format!(
        "## {} Stats\n\n**Error** ({}, {} stage): {}\n",
        failure.name, failure.error.category, failure.error.stage, failure.error.message
    )
}

fn report_markdown(report: &MarketReport, decimals: usize) -> String {
    let mut md = format!("## {} Stats\n\n", report.name);
    if let Some(note) = &report.note {
        let _ = writeln!(md, "> Important: {note}\n");
    }
    if let Some((first, last)) = report.year_span() {
        let _ = writeln!(md, "Years {first}-{last} ({} rows)\n", report.records.len());
    }

    md.push_str("### Statistics\n\n");
    md.push_str("| Statistic | Pure Returns | Dividends and Inflation Adjusted |\n");
    md.push_str("|-----------|-------------:|---------------------------------:|\n");
    for ((label, raw), (_, both)) in report
        .raw_summary
        .rows()
        .iter()
        .zip(report.combined_summary.rows().iter())
    {
        let _ = writeln!(
            md,
            "| {label} | {} | {} |",
            stat_cell(label, *raw, decimals),
            stat_cell(label, *both, decimals)
        );
    }

    if !report.flags.is_empty() {
        md.push_str("\n### Missing Inputs\n\n");
        for flag in &report.flags {
            let _ = writeln!(md, "- {flag}");
        }
    }

    for hist in [&report.inflation_histogram, &report.combined_histogram] {
        md.push('\n');
        md.push_str(&histogram_markdown(hist));
    }

    md.push_str("\n### Data\n\n");
    md.push_str("| Year |");
    for c in Column::ALL {
        let _ = write!(md, " {} |", c.header());
    }
    md.push_str("\n|-----:|");
    for _ in Column::ALL {
        md.push_str("---:|");
    }
    md.push('\n');
    for r in &report.records {
        let _ = write!(md, "| {} |", r.year);
        for c in Column::ALL {
            let _ = write!(md, " {} |", value_cell(r.get(c), decimals));
        }
        md.push('\n');
    }

    md
}

fn histogram_markdown(hist: &OverlayHistogram) -> String {
    let mut md = format!("### {}\n\n", hist.spec.title);
    if hist.is_empty() {
        md.push_str("_no values_\n");
        return md;
    }

    let _ = write!(md, "| {} |", hist.spec.x_label);
    for s in &hist.series {
        let _ = write!(md, " {} |", s.label);
    }
    md.push_str("\n|---|");
    for _ in &hist.series {
        md.push_str("---:|");
    }
    md.push('\n');

    for (i, edge) in hist.edges.windows(2).enumerate() {
        let counts: Vec<usize> = hist
            .series
            .iter()
            .map(|s| s.counts.get(i).copied().unwrap_or(0))
            .collect();
        if counts.iter().all(|&c| c == 0) {
            continue;
        }
        let _ = write!(md, "| {:.2} to {:.2} |", edge[0], edge[1]);
        for c in counts {
            let _ = write!(md, " {c} |");
        }
        md.push('\n');
    }
    md
}

/// Markdown report for the whole study.
pub fn study_markdown(report: &StudyReport, decimals: usize) -> String {
    let mut md = format!(
        "# {}\n\nGenerated {} from `{}`\n",
        report.title,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.data_dir
    );
    for outcome in &report.markets {
        md.push('\n');
        md.push_str(&market_markdown(outcome, decimals));
    }
    md
}

// ─── Plain text ─────────────────────────────────────────────────────

/// Terminal report: note, both statistic blocks and flags per market.
pub fn study_text(report: &StudyReport, decimals: usize) -> String {
    let mut out = format!("{}\n", report.title);
    for outcome in &report.markets {
        out.push('\n');
        match outcome {
            MarketOutcome::Completed(r) => out.push_str(&market_text(r, decimals)),
            MarketOutcome::Failed(f) => {
                let _ = writeln!(out, "{} Stats:", f.name);
                let _ = writeln!(out, "  ERROR {}", f.error);
            }
        }
    }
    out
}

fn market_text(report: &MarketReport, decimals: usize) -> String {
    let mut out = format!("{} Stats:\n", report.name);
    if let Some(note) = &report.note {
        let _ = writeln!(out, "Important: {note}");
    }
    if let Some((first, last)) = report.year_span() {
        let _ = writeln!(out, "Years {first}-{last} ({} rows)", report.records.len());
    }
    out.push_str(&summary_text("Statistics for pure Returns:", &report.raw_summary, decimals));
    out.push_str(&summary_text(
        "Statistics for Returns with Dividends and Inflation Adjustment:",
        &report.combined_summary,
        decimals,
    ));
    if !report.flags.is_empty() {
        let _ = writeln!(out, "Missing inputs ({}):", report.flags.len());
        for flag in &report.flags {
            let _ = writeln!(out, "  {flag}");
        }
    }
    out
}

fn summary_text(heading: &str, stats: &SummaryStatistics, decimals: usize) -> String {
    let mut out = format!("{heading}\n");
    for (label, value) in stats.rows() {
        let _ = writeln!(out, "  {label:<6} {:>10}", stat_cell(label, value, decimals));
    }
    out
}

fn stat_cell(label: &str, value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if label == "count" => format!("{v:.0}"),
        other => value_cell(other, decimals),
    }
}

fn value_cell(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "NaN".to_string(),
    }
}

// ─── Files ──────────────────────────────────────────────────────────

/// Write `<market>.csv` and `<market>.md` per completed market, `<market>.md`
/// per failed market, and `study.json`. Returns the written paths.
pub fn write_study(report: &StudyReport, out_dir: &Path, decimals: usize) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create export dir: {}", out_dir.display()))?;

    let mut written = Vec::new();
    for outcome in &report.markets {
        if let Some(r) = outcome.report() {
            let path = out_dir.join(format!("{}.csv", r.id));
            std::fs::write(&path, export_table_csv(&r.records)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            written.push(path);
        }
        let path = out_dir.join(format!("{}.md", outcome.id()));
        std::fs::write(&path, market_markdown(outcome, decimals))
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    let path = out_dir.join("study.json");
    std::fs::write(&path, export_json(report)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    written.push(path);

    Ok(written)
}
