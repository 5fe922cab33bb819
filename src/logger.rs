//! File-backed trace logging of arbiter internals.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use time::{format_description, OffsetDateTime, UtcOffset};
use tracing::subscriber::set_global_default;
use tracing::Level;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::FmtSubscriber;

/// Installs a global subscriber writing trace output to a timestamped
/// file, inside `run_dir` when match logs go to a directory and next to
/// the arbiter otherwise. Fails if a subscriber is already installed.
pub(crate) fn init_trace_log(run_dir: Option<&Path>) -> anyhow::Result<()> {
    let name_format = format_description::parse(
        "arbiter_[year][month][day]T[hour][minute][second]_trace.txt",
    )
    .context("trace file name format")?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let file_name = now.format(&name_format).context("trace file name")?;
    let path = run_dir.unwrap_or_else(|| Path::new(".")).join(file_name);
    let file = File::create(&path)
        .with_context(|| format!("cannot create trace log {}", path.display()))?;

    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(
        offset,
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
            .context("trace timestamp format")?,
    );
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(BoxMakeWriter::new(file))
        .finish();
    set_global_default(subscriber)
        .context("set global tracing subscriber (disable the trace log if you install your own)")
}
