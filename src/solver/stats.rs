use prettytable::{Cell, Row, Table};

use crate::solver::engine::SearchStats;

/// Renders one solve's counters as a two-column table for terminal output.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

    let rows: [(&str, String); 6] = [
        ("Nodes expanded", stats.nodes_expanded.to_string()),
        ("Moves generated", stats.moves_generated.to_string()),
        ("Duplicates skipped", stats.duplicates_skipped.to_string()),
        ("Dead states", stats.dead_states.to_string()),
        ("Peak stack depth", stats.peak_stack_depth.to_string()),
        (
            "Elapsed (ms)",
            format!("{:.2}", stats.elapsed_micros as f64 / 1000.0),
        ),
    ];
    for (name, value) in rows {
        table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
    }

    table.to_string()
}
