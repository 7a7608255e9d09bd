//! In-memory messenger for exercising the pipeline without a platform.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ChannelRef, ChatId, MessageId, MessageRef},
    messaging::{
        port::MessagingPort,
        types::{ChatAction, MessagingCapabilities},
    },
    Error, Result,
};

#[derive(Default)]
pub struct RecordingMessenger {
    plain_only: bool,
    fail_sends: bool,
    fail_chat_actions: bool,
    fail_resolve: bool,
    sent: Mutex<Vec<(ChatId, String)>>,
    actions: AtomicUsize,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain_only(mut self) -> Self {
        self.plain_only = true;
        self
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn failing_chat_actions(mut self) -> Self {
        self.fail_chat_actions = true;
        self
    }

    pub fn failing_resolve(mut self) -> Self {
        self.fail_resolve = true;
        self
    }

    pub async fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().await.clone()
    }

    pub async fn chat_actions(&self) -> usize {
        self.actions.load(Ordering::SeqCst)
    }

    async fn record(&self, chat_id: ChatId, payload: &str) -> Result<MessageRef> {
        if self.fail_sends {
            return Err(Error::External("send refused".to_string()));
        }
        let mut sent = self.sent.lock().await;
        sent.push((chat_id, payload.to_string()));
        Ok(MessageRef {
            chat_id,
            message_id: MessageId(sent.len() as i32),
        })
    }
}

#[async_trait]
impl MessagingPort for RecordingMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            supports_html: !self.plain_only,
            supports_chat_actions: true,
            max_message_len: 4096,
        }
    }

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        self.record(chat_id, html).await
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        self.record(chat_id, text).await
    }

    async fn send_chat_action(&self, _chat_id: ChatId, _action: ChatAction) -> Result<()> {
        if self.fail_chat_actions {
            return Err(Error::External("chat action refused".to_string()));
        }
        self.actions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn resolve_chat(&self, chat_id: ChatId) -> Result<ChannelRef> {
        if self.fail_resolve {
            return Err(Error::External("unknown chat".to_string()));
        }
        Ok(ChannelRef { chat_id })
    }
}
