//! Logging setup for programs that embed rstree.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    util::TryInitError,
};

/// Maps a `-d` count to a level filter: 0 warn, 1 info, 2 debug, 3+ trace.
pub fn verbosity_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a stderr fmt subscriber as the global default.
///
/// `quiet_modules` are target prefixes whose events are dropped entirely.
/// Fails if a global subscriber is already set.
pub fn setup_logging(verbosity: u8, quiet_modules: &[&str]) -> Result<(), TryInitError> {
    let filter = verbosity_filter(verbosity);

    let quiet: Vec<String> = quiet_modules.iter().map(|m| m.to_string()).collect();
    let module_filter = filter_fn(move |metadata| {
        !quiet
            .iter()
            .any(|name| metadata.target().starts_with(name.as_str()))
    });

    // Span enter/close events show which tree operation emitted a message
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).try_init()?;

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
    Ok(())
}
