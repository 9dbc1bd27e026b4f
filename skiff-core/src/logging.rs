//! src/logging.rs
//!
//! Tracing initialization: a daily-rolling file layer plus an optional
//! stderr layer for live debugging, both behind `EnvFilter`.

use std::{
    path::Path,
    sync::OnceLock,
    sync::atomic::{AtomicUsize, Ordering},
};

use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, daily};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    prelude::*,
};

static SEQ: OnceLock<AtomicUsize> = OnceLock::new();

pub struct Logger;

impl Logger {
    /// Call **once** near the start of the process.
    pub fn init_tracing(log_dir: impl AsRef<Path>) -> anyhow::Result<()> {
        let log_dir = log_dir.as_ref();
        std::fs::create_dir_all(log_dir)?;

        SEQ.get_or_init(|| AtomicUsize::new(1));

        // daily rolling file appender -> <log_dir>/skiff-YYYY-MM-DD.log
        let file: RollingFileAppender = daily(log_dir, "skiff");

        let file_layer = fmt::layer()
            .event_format(SeqEventFormat)
            .with_writer(file)
            .with_ansi(false)
            .with_filter(EnvFilter::from_default_env().add_directive("info".parse()?));

        let stderr_layer = fmt::layer()
            .event_format(SeqEventFormat)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_filter(EnvFilter::from_default_env().add_directive("warn".parse()?));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .init();

        Ok(())
    }
}

/// Custom formatter: `SEQ LEVEL [module] message`
struct SeqEventFormat;

impl<S, N> FormatEvent<S, N> for SeqEventFormat
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let seq: usize = SEQ
            .get()
            .map_or(0, |seq| seq.fetch_add(1, Ordering::Relaxed));

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {:5} [{}] ",
            meta.level(),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}
