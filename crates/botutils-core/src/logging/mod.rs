//! Log-event forwarding pipeline.
//!
//! tracing events flow: [`sink::ForwardLayer`] (installed once at subscriber
//! init, observes every producer in the process) → [`sink::SinkRegistry`] →
//! the registered mpsc sink → the plugin's listener task, which filters and
//! renders accepted events into the destination chat. The fmt layer is a
//! sibling of the forward layer, so normal console logging is unaffected by
//! forwarding in both directions.

pub mod event;
pub mod filter;
pub mod level;
pub mod render;
pub mod sink;

use std::sync::Arc;

use sink::{ForwardLayer, SinkRegistry};

use crate::{Error, Result};

/// Initialize the tracing subscriber: env-filtered console output plus the
/// forward layer.
///
/// The `RUST_LOG`-style filter applies to the fmt layer only. The forward
/// layer must observe every event so a configured forward level below the
/// console threshold still works.
pub fn init(service_name: &str, sinks: Arc<SinkRegistry>) -> Result<()> {
    use tracing_subscriber::{
        fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{service_name}=info")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(filter))
        .with(ForwardLayer::new(sinks))
        .try_init()
        .map_err(|e| Error::Config(format!("tracing init failed: {e}")))?;

    Ok(())
}
