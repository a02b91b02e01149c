use crate::{report, viz};
use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use futures::StreamExt;
use futures::stream;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use url::Url;
use wikigraph_core::{CrawlOutcome, Graph, GraphBuilder, ProgressCallback};
use wikigraph_crawler::{CanonicalUrl, FetchContext, MediawikiExtractor};

/// Where the graph comes from: a fresh crawl or a saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    Build(Url),
    Load(PathBuf),
}

/// Resolves the mutually exclusive `--url` / `--infile` pair.
pub fn resolve_source(
    url: Option<&Url>,
    infile: Option<&PathBuf>,
) -> Result<GraphSource, String> {
    match (url, infile) {
        (Some(_), Some(_)) => Err("--url conflicts with --infile".to_string()),
        (Some(url), None) => Ok(GraphSource::Build(url.clone())),
        (None, Some(path)) => Ok(GraphSource::Load(expand_path(path))),
        (None, None) => Err("either --url or --infile must be provided".to_string()),
    }
}

/// Expands a leading tilde the same way a shell would.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let url = matches.get_one::<Url>("url");
    let infile = matches.get_one::<PathBuf>("infile");
    let depth = *matches.get_one::<usize>("depth").unwrap_or(&10);
    let size = *matches.get_one::<usize>("size").unwrap_or(&500);
    let threads = *matches.get_one::<usize>("threads").unwrap_or(&8);
    let timeout = *matches.get_one::<u64>("timeout").unwrap_or(&10);
    let quiet = matches.get_flag("quiet");

    if depth == 0 || size == 0 {
        bail!("--depth and --size must be positive");
    }

    let source = match resolve_source(url, infile) {
        Ok(source) => source,
        Err(message) => bail!(message),
    };

    let ctx = FetchContext::with_timeout(timeout);

    let (graph, crawl_report) = match source {
        GraphSource::Build(seed) => {
            let outcome = build_graph(&seed, depth, size, threads, &ctx, quiet).await?;
            (outcome.graph, Some(outcome.report))
        }
        GraphSource::Load(path) => {
            let graph = Graph::load(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            (graph, None)
        }
    };

    if !quiet {
        println!("{}", report::summarize(&graph, crawl_report.as_ref()));
    }

    if let Some(path) = matches.get_one::<PathBuf>("save") {
        let path = expand_path(path);
        graph
            .save(&path)
            .with_context(|| format!("failed to save snapshot to {}", path.display()))?;
        println!("{} Snapshot written to {}", "✓".green().bold(), path.display());
    }

    if let Some(path) = matches.get_one::<PathBuf>("write_adj_list") {
        let path = expand_path(path);
        graph
            .write_adjacency_list(&path)
            .with_context(|| format!("failed to write adjacency list to {}", path.display()))?;
        println!(
            "{} Adjacency list written to {}",
            "✓".green().bold(),
            path.display()
        );
    }

    if let Some(path) = matches.get_one::<PathBuf>("write_gml") {
        let path = expand_path(path);
        let markup = if matches.get_flag("write_with_html") {
            fetch_all_markup(&graph, &ctx, threads).await
        } else {
            BTreeMap::new()
        };
        graph
            .write_gml(&path, &markup)
            .with_context(|| format!("failed to write GML to {}", path.display()))?;
        println!("{} GML written to {}", "✓".green().bold(), path.display());
    }

    if matches.get_flag("draw") {
        let search = matches.get_one::<String>("search").map(String::as_str);
        let markup = if matches.get_flag("html") && search.is_some() {
            fetch_all_markup(&graph, &ctx, threads).await
        } else {
            BTreeMap::new()
        };
        let path = viz::write_visualization(&graph, search, &markup, Path::new("."))
            .context("failed to write visualization")?;
        println!(
            "{} Visualization written to {}",
            "✓".green().bold(),
            path.display()
        );
    }

    Ok(())
}

async fn build_graph(
    seed: &Url,
    depth: usize,
    size: usize,
    threads: usize,
    ctx: &FetchContext,
    quiet: bool,
) -> Result<CrawlOutcome> {
    if !quiet {
        println!(
            "Creating graph around {} with depth {} and maximum size {}\n",
            seed.as_str().bright_white(),
            depth,
            size
        );
    }

    let extractor = Arc::new(MediawikiExtractor::for_base(seed.clone()));
    let mut builder = GraphBuilder::new(extractor)
        .with_fetch_context(ctx.clone())
        .with_max_depth(depth)
        .with_max_nodes(size)
        .with_concurrency(threads);

    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting crawl...");
        Some(pb)
    };

    if let Some(ref pb) = spinner {
        let pb = pb.clone();
        let callback: ProgressCallback = Arc::new(move |count: usize, url: String| {
            pb.set_message(format!("Crawling... {count} articles, last: {url}"));
            pb.tick();
        });
        builder = builder.with_progress_callback(callback);
    }

    let outcome = builder.build(seed.as_str()).await?;

    if let Some(pb) = spinner {
        pb.finish_with_message(format!(
            "Crawl complete! {} articles visited",
            outcome.graph.node_count()
        ));
    }
    Ok(outcome)
}

/// Re-fetches the markup of every article in the graph, for exports that
/// embed page content. Failed fetches are skipped; the affected nodes just
/// carry no markup.
async fn fetch_all_markup(
    graph: &Graph,
    ctx: &FetchContext,
    workers: usize,
) -> BTreeMap<CanonicalUrl, String> {
    let urls: Vec<CanonicalUrl> = graph.nodes().map(|node| node.url().clone()).collect();
    let mut fetches = stream::iter(urls.into_iter().map(|url| {
        let ctx = ctx.clone();
        async move {
            let markup = ctx.get(&url).await;
            (url, markup)
        }
    }))
    .buffered(workers.max(1));

    let mut result = BTreeMap::new();
    while let Some((url, markup)) = fetches.next().await {
        match markup {
            Ok(html) => {
                result.insert(url, html);
            }
            Err(err) => warn!("could not fetch {url}: {err}"),
        }
    }
    result
}
