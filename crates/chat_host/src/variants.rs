//! Everything that differs between the product skins, gathered in one value.

use shared::settings::{ContactInfo, Variant};

use crate::quick_actions::{quick_actions_for, QuickAction};

/// Per-variant configuration consumed by [`crate::ChatSession`].
#[derive(Debug, Clone)]
pub struct VariantProfile {
    pub variant: Variant,
    pub title: &'static str,
    pub assistant_label: &'static str,
    pub welcome: &'static str,
    pub quick_actions: Vec<QuickAction>,
    /// Number dialed by the escalation shortcut, if the variant has one.
    pub escalation_phone: Option<String>,
    /// Reply used when the model answered without any text.
    pub empty_reply_fallback: String,
    /// Reply used when the request failed.
    pub error_fallback: String,
    pub escalation_failed: &'static str,
    pub typing_text: &'static str,
    pub footer: String,
    /// Show the failure reason as a separate banner.
    pub show_error_banner: bool,
}

impl VariantProfile {
    pub fn new(variant: Variant, contact: &ContactInfo) -> Self {
        let quick_actions = quick_actions_for(variant, contact);
        match variant {
            Variant::Healthcare => Self {
                variant,
                title: "Medical Support Assistant",
                assistant_label: "Medical Assistant",
                welcome: "Welcome to Healthcare Support. I'm your virtual medical assistant. Please remember I cannot provide diagnoses. How can I help?",
                quick_actions,
                escalation_phone: Some(contact.emergency_phone.clone()),
                empty_reply_fallback:
                    "Please contact your healthcare provider directly for assistance.".into(),
                error_fallback: format!(
                    "For immediate assistance, please call {}",
                    contact.emergency_phone
                ),
                escalation_failed: "Failed to initiate emergency call. Please dial manually.",
                typing_text: "Medical Assistant is responding...",
                footer: format!(
                    "For emergencies, call {} immediately.\nStandard response time: 24-48hrs.\nThis is not a substitute for professional medical advice.",
                    contact.emergency_phone
                ),
                show_error_banner: false,
            },
            Variant::CustomerSupport => Self {
                variant,
                title: "Customer Support",
                assistant_label: "AI Assistant",
                welcome: "Welcome to Customer Support. I'm your virtual assistant. How can I help you today?",
                quick_actions,
                escalation_phone: None,
                empty_reply_fallback: format!(
                    "I couldn't find an answer to that. Please contact support at {}.",
                    contact.support_phone
                ),
                error_fallback: format!(
                    "Please email us at {} and our team will get back to you.",
                    contact.support_email
                ),
                escalation_failed: "Failed to start the call. Please dial manually.",
                typing_text: "AI Assistant is typing...",
                footer: format!(
                    "Need a human? Call {} or email {}.\nStandard response time: 24-48hrs.",
                    contact.support_phone, contact.support_email
                ),
                show_error_banner: true,
            },
        }
    }

    pub fn quick_action(&self, id: &str) -> Option<&QuickAction> {
        self.quick_actions.iter().find(|a| a.id == id)
    }
}
