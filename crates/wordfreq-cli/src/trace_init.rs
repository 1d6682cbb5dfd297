use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Console filter; defaults to `warn`.
pub const LOG_ENV: &str = "WORDFREQ_LOG";

pub const TRACE_FILE: &str = "wordfreq-trace.jsonl";

/// Install the global subscriber. Human-readable events go to stderr; with
/// `log_dir`, a JSON trace with span timings is also written to
/// `<log_dir>/wordfreq-trace.jsonl`. Keep the returned guard alive until
/// exit so the file writer flushes.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let mut guard = None;
    INIT.call_once(|| {
        let console = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(
                EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
            );

        let file = log_dir.map(|dir| {
            let (non_blocking, g) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, TRACE_FILE));
            guard = Some(g);
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(EnvFilter::new("wordfreq_core=debug,wordfreq_cli=debug"))
        });

        let _ = tracing_subscriber::registry()
            .with(console)
            .with(file)
            .try_init();
    });
    guard
}
