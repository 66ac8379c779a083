use std::fs::File;
use std::io::BufReader;

use almanac_app::cli::{input_path, write_occurrences};
use almanac_core::config::load_config;
use almanac_rfc::rfc::ical::Calendar;
use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let path = input_path(std::env::args().skip(1), &config)?;
    let (begin, end) = config.window.bounds()?;

    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let calendar = Calendar::load(BufReader::new(file))
        .with_context(|| format!("loading {}", path.display()))?;

    let written = write_occurrences(&calendar, begin, end, &mut std::io::stdout().lock())?;
    tracing::info!(path = %path.display(), occurrences = written, "Done");

    Ok(())
}
