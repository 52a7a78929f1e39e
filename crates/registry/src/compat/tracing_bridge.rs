//! Bridge from `tracing` to a registered logger

use crate::{LogId, LogRegistry};
use rotalog_logger::{CategoryMask, Level, Origin, internal};
use std::fmt::{self, Write};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that forwards events to one logger.
///
/// Events are submitted under a fixed category mask. The event's span scope
/// is prefixed to the message, and its module path stands in for the
/// function name. Events from rotalog's own internals bypass the logger and
/// go straight to the registry's fallback sinks.
#[derive(Debug, Clone, Copy)]
pub struct RegistryLayer {
    registry: &'static LogRegistry,
    id: LogId,
    mask: CategoryMask,
}

impl RegistryLayer {
    /// Forward into logger `id` of the process-wide registry.
    #[must_use]
    pub fn new(id: LogId, mask: CategoryMask) -> Self {
        Self::with_registry(LogRegistry::global(), id, mask)
    }

    /// Forward into logger `id` of `registry`.
    #[must_use]
    pub const fn with_registry(
        registry: &'static LogRegistry,
        id: LogId,
        mask: CategoryMask,
    ) -> Self {
        Self { registry, id, mask }
    }
}

impl<S> Layer<S> for RegistryLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = map_level(*metadata.level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let mut spans = Vec::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                spans.push(span.name());
            }
        }

        let origin = Origin::new(
            metadata.module_path().unwrap_or_default(),
            metadata.file().unwrap_or_default(),
            metadata.line().unwrap_or_default(),
        );

        let message = if spans.is_empty() {
            visitor.message
        } else {
            format!("{}: {}", spans.join("::"), visitor.message)
        };

        self.forward(metadata.target(), level, &origin, format_args!("{message}"));
    }
}

impl RegistryLayer {
    fn forward(&self, target: &str, level: Level, origin: &Origin<'_>, args: fmt::Arguments<'_>) {
        if internal::is_internal_target(target) {
            self.registry.write_fallback(level, origin, args);
        } else {
            self.registry.write_fmt(self.id, self.mask, level, origin, args);
        }
    }
}

/// Map tracing levels to ours; `TRACE` folds into `Debug`.
const fn map_level(level: tracing::Level) -> Level {
    match level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        tracing::Level::DEBUG | tracing::Level::TRACE => Level::Debug,
    }
}

/// Collects the `message` field and appends the others as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl MessageVisitor {
    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if field.name() == "message" {
            if self.message.is_empty() {
                let _ = self.message.write_fmt(value);
            } else {
                self.message.insert_str(0, &format!("{value} "));
            }
            return;
        }

        if !self.message.is_empty() {
            self.message.push(' ');
        }
        let _ = write!(self.message, "{}={value}", field.name());
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push_field(field, format_args!("{value}"));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push_field(field, format_args!("{value:?}"));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push_field(field, format_args!("{value}"));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push_field(field, format_args!("{value}"));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push_field(field, format_args!("{value}"));
    }
}

/// Install a global `tracing` subscriber that forwards every event to
/// logger `id` of the process-wide registry.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Example
/// ```no_run
/// use rotalog_registry::{CategoryMask, compat::init_tracing_bridge};
///
/// init_tracing_bridge(1, CategoryMask::ALL).expect("tracing bridge");
/// tracing::info!(port = 8080, "listening");
/// ```
pub fn init_tracing_bridge(
    id: LogId,
    mask: CategoryMask,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::registry().with(RegistryLayer::new(id, mask));
    tracing::subscriber::set_global_default(subscriber)
}
