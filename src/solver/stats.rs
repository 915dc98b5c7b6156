use std::sync::atomic::{AtomicU64, Ordering};

use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::solver::engine::SolveReport;

/// Counters collected during one solve invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Boards whose target row was expanded.
    pub nodes_expanded: u64,
    /// Candidate boards produced by the permutation generator.
    pub candidates_generated: u64,
    /// Candidates discarded by the column validity checker.
    pub candidates_pruned: u64,
    pub solutions_found: u64,
}

/// Lock-free recorder shared across workers; snapshotted into
/// [`SearchStats`] when the invocation ends.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    nodes: AtomicU64,
    candidates: AtomicU64,
    pruned: AtomicU64,
    solutions: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn node_expanded(&self) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn candidate_generated(&self) {
        self.candidates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn candidate_pruned(&self) {
        self.pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn solution_recorded(&self) {
        self.solutions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> SearchStats {
        SearchStats {
            nodes_expanded: self.nodes.load(Ordering::Relaxed),
            candidates_generated: self.candidates.load(Ordering::Relaxed),
            candidates_pruned: self.pruned.load(Ordering::Relaxed),
            solutions_found: self.solutions.load(Ordering::Relaxed),
        }
    }
}

/// Renders a table of labelled solve reports, one row per run.
pub fn render_report_table(reports: &[(String, &SolveReport)]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Run"),
        Cell::new("Solutions"),
        Cell::new("Nodes"),
        Cell::new("Candidates"),
        Cell::new("Pruned"),
        Cell::new("Outcome"),
        Cell::new("Time (ms)"),
    ]));

    for (label, report) in reports {
        table.add_row(Row::new(vec![
            Cell::new(label),
            Cell::new(&report.solutions.len().to_string()),
            Cell::new(&report.stats.nodes_expanded.to_string()),
            Cell::new(&report.stats.candidates_generated.to_string()),
            Cell::new(&report.stats.candidates_pruned.to_string()),
            Cell::new(&format!("{:?}", report.completion)),
            Cell::new(&format!("{:.2}", report.elapsed.as_secs_f64() * 1000.0)),
        ]));
    }

    table.to_string()
}
