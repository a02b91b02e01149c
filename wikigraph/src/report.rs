use colored::Colorize;
use wikigraph_core::{CrawlReport, Graph, Termination};

/// Builds the human-readable summary printed after a crawl or load.
pub fn summarize(graph: &Graph, report: Option<&CrawlReport>) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "━".repeat(52)));
    out.push_str(&format!("{}\n", "Graph summary".bold()));
    out.push_str(&format!("  Root: {}\n", graph.root().label().bright_white()));
    out.push_str(&format!("  Articles: {}\n", graph.node_count()));
    out.push_str(&format!("  References: {}\n", graph.edge_count()));
    match graph.density() {
        Some(density) => out.push_str(&format!("  Density: {density:.4}\n")),
        None => out.push_str("  Density: undefined (fewer than two articles)\n"),
    }
    if let Some(node) = graph.node_with_max_out_degree() {
        out.push_str(&format!(
            "  Most references: {} ({})\n",
            node.label(),
            node.out_degree()
        ));
    }
    if let Some(node) = graph.node_with_max_in_degree() {
        out.push_str(&format!(
            "  Most referenced: {} ({})\n",
            node.label(),
            node.in_degree()
        ));
    }

    if let Some(report) = report {
        let termination = match report.termination {
            Termination::DepthExhausted => "depth bound reached",
            Termination::BoundReached => "size bound reached",
            Termination::FrontierExhausted => "no articles left to expand",
        };
        out.push_str(&format!("\n{}\n", "Crawl".bold()));
        out.push_str(&format!("  Finished: {termination}\n"));
        out.push_str(&format!("  Layers expanded: {}\n", report.layers_expanded));
        out.push_str(&format!("  Articles expanded: {}\n", report.nodes_expanded));
        if report.failed_expansions > 0 {
            out.push_str(&format!(
                "  {}\n",
                format!("Failed expansions: {}", report.failed_expansions).yellow()
            ));
        }
        if let Some(mean) = report.mean_expansion_time() {
            out.push_str(&format!("  Mean expansion: {}ms\n", mean.as_millis()));
        }
        if let Some(fanout) = report.mean_fanout() {
            out.push_str(&format!("  Mean fan-out: {fanout:.1}\n"));
        }
        out.push_str(&format!("  Elapsed: {:.1}s\n", report.elapsed.as_secs_f64()));
    }

    out.push_str(&format!("{}\n", "━".repeat(52)));
    out
}
