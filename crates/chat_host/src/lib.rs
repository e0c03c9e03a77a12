//! Chat Host - the message-exchange workflow behind the support chat
//!
//! This crate provides:
//! - Variant profiles (healthcare / customer support) and their prompt templates
//! - An append-only conversation model
//! - Quick-action dispatch and phone escalation
//! - API key resolution against secure storage
//!
//! A [`ChatSession`] ties these together: every send appends the user message,
//! asks the completion provider, and appends exactly one assistant reply.

pub mod conversation;
pub mod credentials;
pub mod escalation;
pub mod prompts;
pub mod quick_actions;
pub mod variants;

pub use conversation::Conversation;
pub use credentials::{resolve_api_key, CredentialStore, KeyringStore, MemoryStore};
pub use escalation::{Dialer, SystemDialer};
pub use quick_actions::{QuickAction, QuickActionKind};
pub use variants::VariantProfile;

use parking_lot::Mutex;
use providers::CompletionProvider;
use shared::agent_api::{Message, RequestState};
use shared::ChatError;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// One user-facing conversation for a single variant.
pub struct ChatSession {
    profile: VariantProfile,
    api_key: Option<String>,
    provider: Arc<dyn CompletionProvider>,
    dialer: Arc<dyn Dialer>,
    conversation: Mutex<Conversation>,
    state: watch::Sender<RequestState>,
    /// Serializes completion + reply so replies land in send order.
    send_gate: tokio::sync::Mutex<()>,
}

impl ChatSession {
    pub fn new(
        profile: VariantProfile,
        api_key: Option<String>,
        provider: Arc<dyn CompletionProvider>,
        dialer: Arc<dyn Dialer>,
    ) -> Self {
        let mut conversation = Conversation::new();
        if let Ok(welcome) = Message::reply(profile.welcome, profile.assistant_label, None) {
            conversation.append([welcome]);
        }
        let (state, _) = watch::channel(RequestState::Idle);

        tracing::info!(
            variant = profile.variant.as_str(),
            provider = provider.id(),
            has_key = api_key.is_some(),
            "chat session started"
        );

        Self {
            profile,
            api_key,
            provider,
            dialer,
            conversation: Mutex::new(conversation),
            state,
            send_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn profile(&self) -> &VariantProfile {
        &self.profile
    }

    pub fn quick_actions(&self) -> &[QuickAction] {
        &self.profile.quick_actions
    }

    pub fn messages(&self) -> Vec<Message> {
        self.conversation.lock().snapshot()
    }

    pub fn request_state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Typing text while a request is in flight.
    pub fn typing_indicator(&self) -> Option<&'static str> {
        self.state
            .borrow()
            .is_pending()
            .then_some(self.profile.typing_text)
    }

    /// Failure reason of the last request, for variants that show a banner.
    pub fn error_banner(&self) -> Option<String> {
        if !self.profile.show_error_banner {
            return None;
        }
        self.state.borrow().failure().map(str::to_string)
    }

    pub fn footer(&self) -> &str {
        &self.profile.footer
    }

    /// Send free-form user text and wait for the assistant reply.
    pub async fn send(&self, text: &str) -> Result<Message, ChatError> {
        let user_msg = Message::user(text)?;
        self.exchange(user_msg).await
    }

    /// Run a quick action through the same pipeline as typed input.
    ///
    /// The emergency shortcut echoes its text and dials instead of asking the model.
    pub async fn dispatch(&self, action_id: &str) -> Result<(), ChatError> {
        let action = self
            .profile
            .quick_action(action_id)
            .cloned()
            .ok_or_else(|| ChatError::UnknownAction(action_id.to_string()))?;
        let escalate = action.is_escalation();
        let user_msg = Message::user(action.canned_text)?;

        if escalate {
            self.append(user_msg);
            self.escalate();
            return Ok(());
        }

        self.exchange(user_msg).await.map(|_| ())
    }

    /// Dial the variant's emergency number, posting manual-dial instructions on failure.
    pub fn escalate(&self) {
        let Some(phone) = self.profile.escalation_phone.as_deref() else {
            tracing::debug!(variant = self.profile.variant.as_str(), "no escalation number");
            return;
        };
        if let Err(e) = self.dialer.dial(phone) {
            tracing::warn!("escalation call failed: {:#}", e);
            if let Ok(msg) = Message::reply(
                self.profile.escalation_failed,
                self.profile.assistant_label,
                None,
            ) {
                self.append(msg);
            }
        }
    }

    /// Ask the provider for `prompt`, always producing displayable text.
    pub async fn complete(&self, prompt: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("completion skipped: {}", ChatError::MissingApiKey);
            self.state
                .send_replace(RequestState::Failed(ChatError::MissingApiKey.to_string()));
            return self.profile.error_fallback.clone();
        };

        self.state.send_replace(RequestState::Pending);
        match self.provider.generate(prompt, api_key).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                self.state.send_replace(RequestState::Succeeded(text.clone()));
                text
            }
            Ok(_) => {
                tracing::warn!(provider = self.provider.id(), "response carried no text");
                let text = self.profile.empty_reply_fallback.clone();
                self.state.send_replace(RequestState::Succeeded(text.clone()));
                text
            }
            Err(e) => {
                tracing::warn!(provider = self.provider.id(), "completion failed: {:#}", e);
                self.state.send_replace(RequestState::Failed(e.to_string()));
                self.profile.error_fallback.clone()
            }
        }
    }

    async fn exchange(&self, user_msg: Message) -> Result<Message, ChatError> {
        let origin = user_msg.id();
        let prompt = prompts::build(user_msg.text(), self.profile.variant);
        self.append(user_msg);

        let _turn = self.send_gate.lock().await;
        let text = self.complete(&prompt).await;
        let reply = self.reply_to(text, origin)?;
        self.append(reply.clone());
        Ok(reply)
    }

    fn reply_to(&self, text: String, origin: Uuid) -> Result<Message, ChatError> {
        Message::reply(text, self.profile.assistant_label, Some(origin))
    }

    fn append(&self, message: Message) {
        self.conversation.lock().append([message]);
    }
}
