use colored::Colorize;
use wikigraph::commands::command_argument_builder;
use wikigraph::handlers;

fn print_banner() {
    println!("{}", "wikigraph".bright_cyan().bold());
    println!(
        "{}\n",
        format!("v{} - article reference graphs", env!("CARGO_PKG_VERSION")).dimmed()
    );
}

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    tracing_subscriber::fmt::init();

    if !matches.get_flag("quiet") {
        print_banner();
    }

    if let Err(err) = handlers::run(&matches).await {
        eprintln!("{} {err:#}", "✗".red().bold());
        std::process::exit(1);
    }
}
