use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("wikigraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wikigraph")
        .styles(CLAP_STYLING)
        .about("Creates a graph of referenced encyclopedia articles around a seed page")
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("The URL of the starting article")
                .value_parser(clap::value_parser!(Url))
                .conflicts_with("infile"),
        )
        .arg(
            arg!(-i --"infile" <PATH>)
                .required(false)
                .help("Load a previously saved graph snapshot instead of crawling")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .conflicts_with("url"),
        )
        .arg(
            arg!(--"depth" <N>)
                .required(false)
                .help("The maximum number of reference hops followed from the starting article")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            arg!(--"size" <N>)
                .required(false)
                .help("The maximum number of articles the graph may contain")
                .value_parser(clap::value_parser!(usize))
                .default_value("500"),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("The number of async workers fetching within one layer")
                .value_parser(clap::value_parser!(usize))
                .default_value("8"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(--"save" <PATH>)
                .required(false)
                .help("Write the graph snapshot to this path")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"write_adj_list" <PATH>)
                .required(false)
                .help("Write an adjacency-list export to this path")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"write_gml" <PATH>)
                .required(false)
                .help("Write a GML export to this path")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"write_with_html")
                .required(false)
                .help("Embed each article's markup in the GML export")
                .action(clap::ArgAction::SetTrue)
                .requires("write_gml"),
        )
        .arg(
            arg!(--"draw")
                .required(false)
                .help("Write an interactive HTML visualization of the graph")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"search" <TERM>)
                .required(false)
                .help("Highlight articles containing this term in their title")
                .requires("draw"),
        )
        .arg(
            arg!(--"html")
                .required(false)
                .help("Also search fetched article markup for the search term")
                .action(clap::ArgAction::SetTrue)
                .requires("search"),
        )
        .arg(
            arg!(-q --"quiet")
                .required(false)
                .help("Suppress banner and non-essential output")
                .action(clap::ArgAction::SetTrue),
        )
}
