//! Plugin lifecycle and owner-command operations.
//!
//! The startup sequence runs as one detached task; unloading cancels it.
//! Partially-applied startup state is fine because the forwarding decision
//! re-checks every precondition on every event.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    domain::{ChannelRef, ChatId, UserId},
    logging::{
        event::LogEvent,
        filter::ForwardPolicy,
        level::ForwardLevel,
        render::{render_event, RenderedPayload},
        sink::SinkRegistry,
    },
    messaging::port::MessagingPort,
    settings::{Settings, SettingsStore},
    typing::TypingMode,
    Result,
};

/// Lifecycle phase. There is no way back from `Unloaded`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Starting,
    Ready,
    Unloaded,
}

struct PluginState {
    phase: Phase,
    logging_enabled: bool,
    cached_level: ForwardLevel,
    log_channel: Option<ChannelRef>,
    startup: Option<JoinHandle<()>>,
    listener: Option<JoinHandle<()>>,
}

pub struct UtilsPlugin {
    store: SettingsStore,
    messenger: Arc<dyn MessagingPort>,
    sinks: Arc<SinkRegistry>,
    // The typing strategy flag doubles as its own cache; the indicator call
    // site reads it on every use.
    typing_suppress: AtomicBool,
    state: Mutex<PluginState>,
    cancel: CancellationToken,
}

impl UtilsPlugin {
    pub fn new(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        sinks: Arc<SinkRegistry>,
    ) -> Arc<Self> {
        let store = SettingsStore::new(cfg.settings_file.clone());
        Arc::new(Self {
            store,
            messenger,
            sinks,
            typing_suppress: AtomicBool::new(false),
            state: Mutex::new(PluginState {
                phase: Phase::Uninitialized,
                logging_enabled: false,
                cached_level: ForwardLevel::None,
                log_channel: None,
                startup: None,
                listener: None,
            }),
            cancel: CancellationToken::new(),
        })
    }

    pub fn messenger(&self) -> Arc<dyn MessagingPort> {
        Arc::clone(&self.messenger)
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase
    }

    /// Spawn the detached startup task. `ready` flips to true once the host
    /// runtime has finished connecting.
    pub async fn start(self: &Arc<Self>, ready: watch::Receiver<bool>) {
        let mut st = self.state.lock().await;
        st.phase = Phase::Starting;

        let plugin = Arc::clone(self);
        let cancel = self.cancel.clone();
        st.startup = Some(tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = plugin.run_startup(ready) => {}
            }
        }));
    }

    async fn run_startup(self: Arc<Self>, mut ready: watch::Receiver<bool>) {
        while !*ready.borrow() {
            if ready.changed().await.is_err() {
                return;
            }
        }

        let settings = self.store.load().await;

        if settings.typing {
            tracing::debug!("enabling typing suppression");
        }
        self.typing_suppress.store(settings.typing, Ordering::SeqCst);

        if settings.logging_enabled {
            self.install_sink().await;
        }

        // Resolution failures are swallowed: forwarding degrades to "no
        // destination" until reconfigured.
        let mut channel = None;
        if settings.log_channel_id != 0 {
            channel = self
                .messenger
                .resolve_chat(ChatId(settings.log_channel_id))
                .await
                .ok();
        }

        let mut st = self.state.lock().await;
        st.logging_enabled = settings.logging_enabled;
        st.cached_level = ForwardLevel::from_code(settings.logging_level);
        st.log_channel = channel;
        st.phase = Phase::Ready;
        tracing::debug!("plugin startup complete");
    }

    /// Cancel startup, revert the typing strategy if it was applied, and
    /// deregister the sink if it was registered.
    pub async fn unload(&self) {
        self.cancel.cancel();

        let mut st = self.state.lock().await;
        if let Some(handle) = st.startup.take() {
            handle.abort();
        }

        if self.typing_suppress.swap(false, Ordering::SeqCst) {
            tracing::debug!("reverting typing suppression");
        }

        if st.logging_enabled {
            self.sinks.deregister();
        }
        if let Some(handle) = st.listener.take() {
            handle.abort();
        }

        st.phase = Phase::Unloaded;
    }

    /// Toggle log forwarding. The sink itself is registered at startup
    /// only; the flag gates the per-event decision.
    pub async fn toggle_logging(&self) -> Result<bool> {
        let enabled = {
            let mut st = self.state.lock().await;
            st.logging_enabled = !st.logging_enabled;
            st.logging_enabled
        };
        self.store.set_logging_enabled(enabled).await?;
        Ok(enabled)
    }

    pub async fn set_logging_level(&self, level: ForwardLevel) -> Result<()> {
        self.store.set_logging_level(level.code()).await?;
        self.state.lock().await.cached_level = level;
        Ok(())
    }

    /// Toggle the typing strategy; the new mode applies immediately.
    pub async fn toggle_typing_patch(&self) -> Result<bool> {
        let enabled = !self.typing_suppress.load(Ordering::SeqCst);
        self.store.set_typing(enabled).await?;
        self.typing_suppress.store(enabled, Ordering::SeqCst);
        Ok(enabled)
    }

    pub fn typing_mode(&self) -> TypingMode {
        TypingMode::from_flag(self.typing_suppress.load(Ordering::SeqCst))
    }

    /// Point forwarding at a chat (0 clears it). Returns whether the chat
    /// resolved; an unresolvable chat is persisted anyway and retried at
    /// next startup.
    pub async fn set_log_channel(&self, chat_id: i64) -> Result<bool> {
        self.store.set_log_channel_id(chat_id).await?;

        let channel = if chat_id == 0 {
            None
        } else {
            self.messenger.resolve_chat(ChatId(chat_id)).await.ok()
        };

        let resolved = channel.is_some();
        self.state.lock().await.log_channel = channel;
        Ok(resolved)
    }

    /// The base command reads the store, not the cache, so it shows what
    /// the next startup will load.
    pub async fn settings_snapshot(&self) -> Settings {
        self.store.load().await
    }

    /// No user data is stored by design.
    pub async fn delete_user_data(&self, _requester: &str, _user_id: UserId) {}

    pub async fn export_user_data(&self, _user_id: UserId) -> serde_json::Value {
        serde_json::json!({})
    }

    async fn install_sink(self: &Arc<Self>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.sinks.register(tx);

        let plugin = Arc::clone(self);
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                plugin.on_log_event(event).await;
            }
        });
        self.state.lock().await.listener = Some(handle);
    }

    async fn on_log_event(&self, event: LogEvent) {
        let (policy, channel) = {
            let st = self.state.lock().await;
            (
                ForwardPolicy {
                    enabled: st.logging_enabled,
                    level: st.cached_level,
                    destination: st.log_channel,
                },
                st.log_channel,
            )
        };

        if !policy.accepts(&event) {
            return;
        }
        let Some(channel) = channel else {
            return;
        };

        let caps = self.messenger.capabilities();
        let outcome = match render_event(&event, &caps) {
            RenderedPayload::Html(html) => self.messenger.send_html(channel.chat_id, &html).await,
            RenderedPayload::Plain(text) => self.messenger.send_text(channel.chat_id, &text).await,
        };

        if let Err(error) = outcome {
            // `forwarding` sits outside the recognized root namespace, so
            // this report can never re-enter the sink.
            tracing::warn!(target: "forwarding", error = %error, "failed to deliver forwarded log event");
        }
    }
}
