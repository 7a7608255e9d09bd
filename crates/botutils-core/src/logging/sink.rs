//! Sink registry and the tracing layer that feeds it.
//!
//! The layer is installed once at subscriber initialization and observes
//! every tracing producer in the process, not just this plugin's own
//! loggers. That is intentional: forwarding is meant to surface whatever
//! the process logs. The layer is inert until a sink is registered.

use std::fmt;
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

use super::event::{level_code, LogEvent};

/// Holds the (at most one) registered sink.
///
/// Created in `main` and shared by `Arc`: the subscriber side dispatches
/// into it, the plugin side registers at startup and deregisters at unload.
/// Registering replaces any previous sink.
#[derive(Default)]
pub struct SinkRegistry {
    sink: RwLock<Option<UnboundedSender<LogEvent>>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, sink: UnboundedSender<LogEvent>) {
        if let Ok(mut guard) = self.sink.write() {
            *guard = Some(sink);
        }
    }

    pub fn deregister(&self) {
        if let Ok(mut guard) = self.sink.write() {
            *guard = None;
        }
    }

    pub fn is_registered(&self) -> bool {
        self.sink
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    pub(crate) fn dispatch(&self, event: LogEvent) {
        let Ok(guard) = self.sink.read() else {
            return;
        };
        if let Some(sink) = guard.as_ref() {
            // A closed receiver means the listener is gone; the event is
            // dropped, same as an unregistered sink.
            let _ = sink.send(event);
        }
    }
}

/// `tracing_subscriber` layer that turns every event into a [`LogEvent`].
///
/// Console/file output happens in sibling layers and is never affected;
/// this layer emits exactly one dispatch per event.
pub struct ForwardLayer {
    registry: Arc<SinkRegistry>,
}

impl ForwardLayer {
    pub fn new(registry: Arc<SinkRegistry>) -> Self {
        Self { registry }
    }
}

impl<S> Layer<S> for ForwardLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !self.registry.is_registered() {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.registry.dispatch(LogEvent {
            target: event.metadata().target().to_string(),
            level: level_code(event.metadata().level()),
            message: visitor.message,
            fields: visitor.fields,
            error: visitor.error,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    error: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "error" => self.error = Some(value.to_string()),
            name => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    fn record_error(&mut self, _field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.error = Some(value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "error" => self.error = Some(format!("{value:?}")),
            name => self.fields.push((name.to_string(), format!("{value:?}"))),
        }
    }
}
