//! sipflow - Command line flow viewer
//!
//! Loads a dataset in the dashboard's JSON shape, applies panel options and
//! filters, and prints the resulting message flow. Click and export
//! notifications are printed as JSON envelopes, one per line.

use anyhow::Context;
use clap::Parser;
use sipflow_rs::{
    config::{default_options_path, PanelOptions, SortOption},
    display::detail_entries,
    ExportFormat, FilterSpec, FlowBridge, FlowPanel, RawDataset,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sipflow", version, about = "Render a SIP message flow from a dataset file")]
struct Cli {
    /// Dataset JSON file (`{"series":[{"fields":[...]}]}`)
    dataset: PathBuf,

    /// Panel options file (.json or .toml)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Case-insensitive search over method, source, destination and Call-ID
    #[arg(long, default_value = "")]
    search: String,

    /// Only show these methods (repeatable)
    #[arg(long = "method")]
    methods: Vec<String>,

    /// Only show messages from this endpoint
    #[arg(long, default_value = "")]
    source: String,

    /// Only show messages to this endpoint
    #[arg(long, default_value = "")]
    destination: String,

    /// Only show messages whose Call-ID contains this text
    #[arg(long, default_value = "")]
    callid: String,

    /// Only show error responses (4xx, 5xx, 6xx)
    #[arg(long)]
    errors: bool,

    /// Override the display order (none, time_old, time_new)
    #[arg(long)]
    sort: Option<SortOption>,

    /// Compact rows without time and Call-ID
    #[arg(long)]
    simplify: bool,

    /// Print visible messages as JSON instead of rows
    #[arg(long)]
    json: bool,

    /// Print the endpoint and method filter choices
    #[arg(long)]
    facets: bool,

    /// Inspect the message with this hash
    #[arg(long)]
    select: Option<String>,

    /// Request an export of the visible messages (png, txt, pcap)
    #[arg(long)]
    export: Option<ExportFormat>,
}

fn load_options(cli: &Cli) -> anyhow::Result<PanelOptions> {
    let mut options = match &cli.options {
        Some(path) => PanelOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => match default_options_path().filter(|p| p.exists()) {
            Some(path) => {
                tracing::info!("Using options from {:?}", path);
                PanelOptions::load_or_default(path)
            }
            None => PanelOptions::default(),
        },
    };

    if let Some(sort) = cli.sort {
        options.sortoption = sort;
    }
    if cli.simplify {
        options.is_simplify = true;
    }
    Ok(options)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sipflow_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = load_options(&cli)?;

    let dataset = RawDataset::load(&cli.dataset)
        .with_context(|| format!("loading dataset from {}", cli.dataset.display()))?;

    let (bridge, events) = FlowBridge::new();
    let mut panel = FlowPanel::new(options, bridge);
    panel.set_data(&dataset);
    panel.set_filters(
        FilterSpec::new()
            .with_search_term(&cli.search)
            .with_methods(&cli.methods)
            .with_source(&cli.source)
            .with_destination(&cli.destination)
            .with_callid(&cli.callid)
            .with_only_errors(cli.errors),
    );

    tracing::info!("Flow Diagram {}", panel.stats());

    if cli.facets {
        println!("endpoints: {}", panel.facets().endpoints.join(", "));
        println!("methods:   {}", panel.facets().methods.join(", "));
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(panel.visible())?);
    } else if let Some(empty) = panel.empty_state() {
        println!("No flow data available: {}", empty);
    } else {
        println!("{}", panel.hosts().join(" | "));
        for row in panel.rows() {
            println!("{}", row);
        }
    }

    if let Some(hash) = &cli.select {
        match panel.find_visible(hash) {
            Some(msg) => {
                for entry in detail_entries(msg) {
                    println!("{:>15}: {}", entry.label, entry.value);
                }
                panel.select(hash);
            }
            None => tracing::warn!("No visible message with hash {}", hash),
        }
    }

    if let Some(format) = cli.export {
        panel.request_export(format);
    }

    drop(panel);
    for event in events.try_iter() {
        println!("{}", serde_json::to_string(&event.to_json()?)?);
    }

    Ok(())
}
