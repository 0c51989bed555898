//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use prism_pipeline::{EvidenceGraph, TraversalOutcome};
use std::fmt::Write as _;

/// Output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Summary,
    /// Pretty-printed JSON
    Json,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a full evidence graph.
    pub fn format_graph(&self, graph: &EvidenceGraph) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(graph)?),
            OutputFormat::Summary => Ok(self.graph_summary(graph)),
        }
    }

    /// Format a question-derivation outcome.
    pub fn format_outcome(&self, outcome: &TraversalOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Summary => Ok(self.outcome_summary(outcome)),
        }
    }

    fn graph_summary(&self, graph: &EvidenceGraph) -> String {
        let mut out = String::new();
        let header = format!(
            "Run {}: {} responses, {} statements, {} paragraphs, {} clusters ({}ms)",
            graph.run.run_id,
            graph.run.response_count,
            graph.run.statement_count,
            graph.run.paragraph_count,
            graph.run.cluster_count,
            graph.run.duration_ms,
        );
        let _ = writeln!(out, "{}", self.colorize(&header, "cyan"));

        for cluster in &graph.clustering.clusters {
            let line = format!(
                "  cluster_{}: {} members, cohesion {:.2}",
                cluster.id,
                cluster.members.len(),
                cluster.cohesion,
            );
            let _ = writeln!(out, "{}", line);
            if !cluster.uncertainty_reasons.is_empty() {
                let reasons: Vec<String> = cluster
                    .uncertainty_reasons
                    .iter()
                    .map(|r| format!("{:?}", r))
                    .collect();
                let flagged = format!("    uncertain: {}", reasons.join(", "));
                let _ = writeln!(out, "{}", self.colorize(&flagged, "yellow"));
            }
        }
        if graph.clustering.summary.singleton_fallback {
            let _ = writeln!(
                out,
                "{}",
                self.colorize("  (singleton fallback: too few items to cluster)", "yellow")
            );
        }
        out
    }

    fn outcome_summary(&self, outcome: &TraversalOutcome) -> String {
        let mut out = String::new();

        if let Some(reason) = &outcome.gates.short_circuit {
            let line = format!("Gate derivation skipped: {:?}", reason);
            let _ = writeln!(out, "{}", self.colorize(&line, "yellow"));
        }
        if !outcome.gates.gates.is_empty() {
            let _ = writeln!(out, "{}", self.colorize("Gates:", "cyan"));
            for gate in &outcome.gates.gates {
                let line = format!(
                    "  {} [{}] score {:.2}: {}",
                    gate.id, gate.claim_id, gate.score, gate.question
                );
                let _ = writeln!(out, "{}", line);
            }
        }

        if !outcome.conflicts.is_empty() {
            let _ = writeln!(out, "{}", self.colorize("Conflicts:", "cyan"));
            for conflict in &outcome.conflicts {
                let marker = if conflict.is_blocked() {
                    " (behind gate)"
                } else {
                    ""
                };
                let line = format!(
                    "  {} vs {} significance {:.2}{}{}",
                    conflict.claim_a,
                    conflict.claim_b,
                    conflict.significance,
                    if conflict.passes_filter {
                        ""
                    } else {
                        " (filtered)"
                    },
                    marker,
                );
                let _ = writeln!(out, "{}", line);
            }
        }

        let _ = writeln!(out, "{}", self.colorize("Questions:", "cyan"));
        if outcome.questions.questions.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for question in &outcome.questions.questions {
            let line = format!(
                "  {} [{:?}] priority {:.2}: {}",
                question.id, question.status, question.priority, question.text
            );
            let _ = writeln!(out, "{}", line);
        }
        for question in &outcome.questions.auto_resolved {
            let line = format!("  {} auto-resolved: {}", question.id, question.text);
            let _ = writeln!(out, "{}", self.colorize(&line, "green"));
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
