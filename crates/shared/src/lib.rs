pub mod error;

pub use error::ChatError;

pub mod settings {
    use anyhow::{Context, Result};
    use serde::{Deserialize, Serialize};
    use std::path::Path;
    use std::str::FromStr;

    pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

    fn default_endpoint() -> String {
        DEFAULT_ENDPOINT.to_string()
    }

    fn default_model() -> String {
        DEFAULT_MODEL.to_string()
    }

    /// Product skin. Both variants share one workflow and differ only in
    /// prompt template, quick actions, and escalation behavior.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
    #[serde(rename_all = "snake_case")]
    pub enum Variant {
        #[default]
        Healthcare,
        #[serde(alias = "support")]
        CustomerSupport,
    }

    impl Variant {
        pub fn as_str(&self) -> &'static str {
            match self {
                Variant::Healthcare => "healthcare",
                Variant::CustomerSupport => "customer_support",
            }
        }

        /// Secure-storage key (and environment variable) holding the API key.
        pub fn key_name(&self) -> &'static str {
            match self {
                Variant::Healthcare => "MED_API_KEY",
                Variant::CustomerSupport => "AI_API_KEY",
            }
        }
    }

    impl FromStr for Variant {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            match s.trim().to_lowercase().as_str() {
                "healthcare" | "medical" => Ok(Variant::Healthcare),
                "customer_support" | "customer-support" | "support" => {
                    Ok(Variant::CustomerSupport)
                }
                other => Err(anyhow::anyhow!("Unknown variant: {}", other)),
            }
        }
    }

    /// Contact details that show up in fallbacks, footers and escalation.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ContactInfo {
        pub emergency_phone: String,
        pub support_phone: String,
        pub support_email: String,
    }

    impl Default for ContactInfo {
        fn default() -> Self {
            Self {
                emergency_phone: "1800-300-1234".into(),
                support_phone: "1800-300-1234".into(),
                support_email: "support@healthcare.com".into(),
            }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ChatSettings {
        #[serde(default)]
        pub variant: Variant,
        #[serde(default = "default_endpoint")]
        pub endpoint: String, // e.g., "https://generativelanguage.googleapis.com"
        #[serde(default = "default_model")]
        pub model: String, // e.g., "gemini-2.0-flash"
        #[serde(default)]
        pub contact: ContactInfo,
        /// Seed key written to secure storage on first run. Never compiled in.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub default_api_key: Option<String>,
    }

    impl Default for ChatSettings {
        fn default() -> Self {
            Self {
                variant: Variant::default(),
                endpoint: default_endpoint(),
                model: default_model(),
                contact: ContactInfo::default(),
                default_api_key: None,
            }
        }
    }

    impl ChatSettings {
        /// Read settings from a JSON file.
        pub fn load(path: &Path) -> Result<Self> {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid settings file {}", path.display()))
        }

        /// Load settings, falling back to defaults when the file is missing or invalid.
        pub fn load_or_default(path: &Path) -> Self {
            match Self::load(path) {
                Ok(settings) => settings,
                Err(e) => {
                    if path.exists() {
                        tracing::warn!("Using default settings: {:#}", e);
                    }
                    Self::default()
                }
            }
        }

        pub fn save(&self, path: &Path) -> Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write settings to {}", path.display()))
        }

        /// Default key for the active variant: environment first, then the settings file.
        pub fn default_key_from_env(&self) -> Option<String> {
            std::env::var(self.variant.key_name())
                .ok()
                .filter(|k| !k.trim().is_empty())
                .or_else(|| self.default_api_key.clone())
        }
    }

}

pub mod agent_api {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::ChatError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum AuthorRole {
        User,
        Assistant,
    }

    /// A single conversation entry. Immutable once created.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Message {
        id: Uuid,
        text: String,
        created_at: DateTime<Utc>,
        author_role: AuthorRole,
        author_label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        in_reply_to: Option<Uuid>,
    }

    impl Message {
        pub fn new(
            text: impl Into<String>,
            author_role: AuthorRole,
            author_label: impl Into<String>,
        ) -> Result<Self, ChatError> {
            let text = text.into();
            if text.trim().is_empty() {
                return Err(ChatError::EmptyMessage);
            }
            Ok(Self {
                id: Uuid::new_v4(),
                text,
                created_at: Utc::now(),
                author_role,
                author_label: author_label.into(),
                in_reply_to: None,
            })
        }

        pub fn user(text: impl Into<String>) -> Result<Self, ChatError> {
            Self::new(text, AuthorRole::User, "User")
        }

        /// Assistant message answering the user message `in_reply_to`.
        pub fn reply(
            text: impl Into<String>,
            author_label: impl Into<String>,
            in_reply_to: Option<Uuid>,
        ) -> Result<Self, ChatError> {
            let mut msg = Self::new(text, AuthorRole::Assistant, author_label)?;
            msg.in_reply_to = in_reply_to;
            Ok(msg)
        }

        pub fn id(&self) -> Uuid {
            self.id
        }

        pub fn text(&self) -> &str {
            &self.text
        }

        pub fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        pub fn author_role(&self) -> AuthorRole {
            self.author_role
        }

        pub fn author_label(&self) -> &str {
            &self.author_label
        }

        pub fn in_reply_to(&self) -> Option<Uuid> {
            self.in_reply_to
        }

        pub fn is_user(&self) -> bool {
            self.author_role == AuthorRole::User
        }
    }

    /// Lifecycle of the outstanding completion request, surfaced to the UI.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub enum RequestState {
        #[default]
        Idle,
        /// A completion call is in flight ("is typing").
        Pending,
        Succeeded(String),
        Failed(String),
    }

    impl RequestState {
        pub fn is_pending(&self) -> bool {
            matches!(self, RequestState::Pending)
        }

        pub fn failure(&self) -> Option<&str> {
            match self {
                RequestState::Failed(reason) => Some(reason),
                _ => None,
            }
        }
    }

}
