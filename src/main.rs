mod app;
mod util;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use convo_visualizer::conversation::{
    CategoryFilter, Document, ViewMode, ViewState, read_document, sample_document,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Conversation JSON to open. Defaults to the bundled sample.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Initial view: compact, flow or table.
    #[arg(long, default_value = "flow")]
    view: ViewMode,

    /// Initial category filter: all, assignments, comments, workflows or system.
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Print stats and graph counts, then exit without opening a window.
    #[arg(long)]
    summary: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CONVO_LOG")
        .unwrap_or_else(|_| EnvFilter::new("convo_visualizer=info,warn"));

    let format = env::var("CONVO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_owned());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load(file: Option<&PathBuf>) -> anyhow::Result<(Document, String)> {
    match file {
        Some(path) => {
            let document = read_document(path)
                .with_context(|| format!("Failed to load conversation from {}", path.display()))?;
            Ok((document, path.display().to_string()))
        }
        None => {
            let document = sample_document().context("Bundled sample conversation is invalid")?;
            Ok((document, "bundled sample".to_owned()))
        }
    }
}

fn print_summary(view: &ViewState) -> anyhow::Result<()> {
    let document = view.document();
    let stats = view.stats();
    let graph = view.graph();

    println!("conversation: {}", document.id);
    println!("state: {}", document.state_label());
    println!("view: {} ({} nodes, {} edges)", view.view_mode(), graph.node_count(), graph.edge_count());
    println!("filter: {}", view.category_filter());
    println!(
        "stats: {}",
        serde_json::to_string(&stats).context("Failed to encode conversation stats")?
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let (document, source) = load(args.file.as_ref())?;
    info!(source = %source, parts = document.parts.len(), "conversation loaded");
    let view = ViewState::new(document, args.view, args.category);

    if args.summary {
        return print_summary(&view);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conversation Visualizer",
        options,
        Box::new(move |cc| Ok(Box::new(app::ConvoApp::new(cc, view, source)))),
    )
    .map_err(|error| anyhow!("Viewer exited with an error: {error}"))
}
