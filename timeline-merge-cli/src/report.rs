//! Report generation
//!
//! Renders merge results as plain text (the classic `Input:` / `Output:`
//! layout) or as a single JSON document.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use timeline_merge::{Analysis, Case, MergeSummary, SequenceId};

/// Everything reported about one merged case
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub input: Vec<Vec<String>>,
    #[serde(flatten)]
    pub analysis: Analysis,
    pub summary: MergeSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub traces: Vec<SequenceTrace>,
}

/// The states one sequence went through while merging
#[derive(Debug, Clone, Serialize)]
pub struct SequenceTrace {
    pub id: SequenceId,
    /// Oldest first, ending with the final sequence
    pub states: Vec<Vec<String>>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    version: &'a str,
    cases: &'a [CaseReport],
}

impl CaseReport {
    /// Collect the report for a case that has already been merged
    pub fn from_case(
        name: impl Into<String>,
        case: &Case,
        summary: MergeSummary,
        trace: bool,
    ) -> Self {
        let traces = if trace {
            case.sequences()
                .iter()
                .map(|es| {
                    let mut states = es.transitions().to_vec();
                    states.push(es.events().to_vec());
                    SequenceTrace { id: es.id(), states }
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            name: name.into(),
            input: case.input().to_vec(),
            analysis: case.analyze(),
            summary,
            traces,
        }
    }
}

/// Render reports in the plain text layout
pub fn render_text(reports: &[CaseReport]) -> Result<String> {
    let mut out = String::new();

    for (idx, report) in reports.iter().enumerate() {
        if reports.len() > 1 {
            if idx > 0 {
                out.push('\n');
            }
            writeln!(out, "=== {} ===", report.name)?;
        }

        let input = serde_json::to_string(&report.input).context("Failed to serialize input")?;
        let merged = serde_json::to_string(&report.analysis.merged)
            .context("Failed to serialize merged sequences")?;

        writeln!(out, "Input:")?;
        writeln!(out, "{}", input)?;
        writeln!(out, "Output:")?;
        writeln!(out, "{}", report.analysis.status)?;
        writeln!(out, "{}", merged)?;

        if !report.traces.is_empty() {
            writeln!(out, "Trace:")?;
            for seq in &report.traces {
                let states = seq
                    .states
                    .iter()
                    .map(serde_json::to_string)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .context("Failed to serialize trace")?;
                writeln!(out, "  {}: {}", seq.id, states.join(" -> "))?;
            }
        }
    }

    Ok(out)
}

/// Render all reports as one JSON document
pub fn render_json(reports: &[CaseReport]) -> Result<String> {
    let doc = JsonReport {
        generated_at: Utc::now(),
        version: timeline_merge::VERSION,
        cases: reports,
    };
    serde_json::to_string_pretty(&doc).context("Failed to serialize JSON report")
}
