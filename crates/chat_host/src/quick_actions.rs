//! Quick-action shortcuts: fixed canned text fed through the normal send pipeline.

use serde::Serialize;
use shared::settings::{ContactInfo, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickActionKind {
    /// Ask the assistant using the canned text.
    Ask,
    /// Escalate to a phone call instead of asking the assistant.
    Escalate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub id: &'static str,
    pub title: &'static str,
    pub canned_text: String,
    pub kind: QuickActionKind,
}

impl QuickAction {
    fn ask(id: &'static str, title: &'static str, canned_text: impl Into<String>) -> Self {
        Self {
            id,
            title,
            canned_text: canned_text.into(),
            kind: QuickActionKind::Ask,
        }
    }

    pub fn is_escalation(&self) -> bool {
        self.kind == QuickActionKind::Escalate
    }
}

/// The quick-action table for a variant. Built once per session.
pub fn quick_actions_for(variant: Variant, contact: &ContactInfo) -> Vec<QuickAction> {
    match variant {
        Variant::Healthcare => vec![
            QuickAction::ask(
                "symptoms",
                "Symptom Check",
                "For symptom analysis, please describe:\n1. Main symptoms\n2. Duration\n3. Severity\n4. Any existing conditions",
            ),
            QuickAction::ask(
                "appointment",
                "Appointment",
                "To book an appointment:\n1. Visit our Patient Portal\n2. Choose 'Schedule Visit'\n3. Select provider & time",
            ),
            QuickAction::ask(
                "prescription",
                "Prescription",
                "For prescription refills:\n1. Contact your pharmacy\n2. Allow 48hr processing\n3. Emergency? Call pharmacy directly",
            ),
            QuickAction {
                id: "emergency",
                title: "Emergency",
                canned_text: format!(
                    "EMERGENCY ASSISTANCE:\n1. Call {} immediately\n2. Stay on the line\n3. Follow operator instructions\n4. Inform emergency contacts",
                    contact.emergency_phone
                ),
                kind: QuickActionKind::Escalate,
            },
        ],
        Variant::CustomerSupport => vec![
            QuickAction::ask(
                "reset_pwd",
                "Reset Password",
                "I need to reset my password.",
            ),
            QuickAction::ask(
                "billing",
                "Billing",
                "I have a question about my bill or a recent charge.",
            ),
            QuickAction::ask(
                "account",
                "Account",
                "I need help with my account settings.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(actions: &[QuickAction]) -> Vec<&str> {
        actions.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_healthcare_table() {
        let actions = quick_actions_for(Variant::Healthcare, &ContactInfo::default());
        assert_eq!(
            ids(&actions),
            vec!["symptoms", "appointment", "prescription", "emergency"]
        );

        let escalations: Vec<_> = actions.iter().filter(|a| a.is_escalation()).collect();
        assert_eq!(escalations.len(), 1);
        assert!(escalations[0].canned_text.contains("1800-300-1234"));
    }

    #[test]
    fn test_support_table_has_no_escalation() {
        let actions = quick_actions_for(Variant::CustomerSupport, &ContactInfo::default());
        assert_eq!(ids(&actions), vec!["reset_pwd", "billing", "account"]);
        assert!(actions.iter().all(|a| !a.is_escalation()));
    }

    #[test]
    fn test_canned_text_never_empty() {
        for variant in [Variant::Healthcare, Variant::CustomerSupport] {
            for action in quick_actions_for(variant, &ContactInfo::default()) {
                assert!(!action.canned_text.trim().is_empty(), "{}", action.id);
            }
        }
    }
}
