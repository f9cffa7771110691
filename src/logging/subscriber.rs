//! Tracing subscriber setup: console formatter and initialisation.
use std::io::IsTerminal as _;

/// Target used for stage headers.
pub const STAGE_TARGET: &str = "docgen::stage";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
pub(super) struct MessageExtractor {
    pub(super) message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Render one console line (without the trailing newline).
pub(super) fn render_line(level: tracing::Level, target: &str, msg: &str, ansi: bool) -> String {
    match level {
        tracing::Level::ERROR => {
            let (o, c) = paint("\x1b[31m", ansi);
            format!("{o}ERROR{c} {msg}")
        }
        tracing::Level::WARN => {
            let (o, c) = paint("\x1b[33m", ansi);
            format!("{o}WARN{c}  {msg}")
        }
        tracing::Level::INFO if target == STAGE_TARGET => {
            let (o, c) = paint("\x1b[1;34m", ansi);
            let (b, _) = paint("\x1b[1m", ansi);
            format!("{o}==>{c} {b}{msg}{c}")
        }
        tracing::Level::INFO => format!("  {msg}"),
        _ => {
            let (o, c) = paint("\x1b[2m", ansi);
            format!("  {o}{msg}{c}")
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits docgen-style
/// console output.
struct DocgenFormatter {
    ansi: bool,
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for DocgenFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        writeln!(
            writer,
            "{}",
            render_line(
                *metadata.level(),
                metadata.target(),
                &extractor.message,
                self.ansi
            )
        )
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// All diagnostics go to stderr; stdout is reserved for generated data.
/// `RUST_LOG` overrides the level chosen by `verbose`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(DocgenFormatter {
            ansi: std::io::stderr().is_terminal(),
        })
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

const fn paint(code: &'static str, ansi: bool) -> (&'static str, &'static str) {
    if ansi { (code, "\x1b[0m") } else { ("", "") }
}
