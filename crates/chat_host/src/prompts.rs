//! Variant-specific prompt templates.
//!
//! Each variant owns one constant template with two placeholders: `{warning}`,
//! filled from a keyword trigger, and `{text}`, the user's raw input. Building a
//! prompt is plain string substitution with no side effects.

use shared::settings::Variant;

/// Keyword-triggered line substituted into a template.
#[derive(Clone, Debug)]
pub struct Trigger {
    pub needle: &'static str,
    pub when_present: &'static str,
    pub otherwise: &'static str,
}

impl Trigger {
    fn pick(&self, raw_text: &str) -> &'static str {
        if raw_text.contains(self.needle) {
            self.when_present
        } else {
            self.otherwise
        }
    }
}

/// Prompt data for one variant
#[derive(Clone, Debug)]
pub struct VariantPrompt {
    pub template: &'static str,
    pub trigger: Trigger,
}

/// Get the prompt data for a variant
pub fn get_variant_prompt(variant: Variant) -> &'static VariantPrompt {
    match variant {
        Variant::Healthcare => &HEALTHCARE_PROMPT,
        Variant::CustomerSupport => &SUPPORT_PROMPT,
    }
}

/// Compose the request text for `raw_text`.
///
/// The raw text is substituted last so input that happens to contain a
/// placeholder is never expanded.
pub fn build(raw_text: &str, variant: Variant) -> String {
    let prompt = get_variant_prompt(variant);
    prompt
        .template
        .replace("{warning}", prompt.trigger.pick(raw_text))
        .replace("{text}", raw_text)
}

// ============================================================================
// Variant Prompt Definitions
// ============================================================================

static HEALTHCARE_PROMPT: VariantPrompt = VariantPrompt {
    template: r#"You are a medical information assistant. Respond to: "{text}".

# SAFETY RULES:
1. NEVER diagnose/prescribe
2. If unsure: "Consult a doctor"
3. Use simple language (8th grade level)

# RESPONSE FORMAT:
Possible Considerations:
• 3 general possibilities

Recommended Actions:
• 2-3 general steps

Warning: {warning}

# EXAMPLE:
User: "Headache and fever"
Response: "Possible Considerations: • Viral infection • Tension headache • Dehydration
Recommended Actions: • Rest/hydration • Monitor temperature • Consult if persists >48hrs
This is not medical advice - always consult a healthcare provider""#,
    trigger: Trigger {
        needle: "child",
        when_present: "Pediatric cases need urgent professional evaluation",
        otherwise: "Monitor symptom progression",
    },
};

static SUPPORT_PROMPT: VariantPrompt = VariantPrompt {
    template: r#"You are a friendly customer support assistant. Respond to: "{text}".

# RULES:
1. NEVER ask for passwords, card numbers or other secrets
2. If unsure: "Please contact our support team"
3. Keep answers short and step-by-step

# RESPONSE FORMAT:
Summary:
• One sentence restating the issue

Next Steps:
• 2-3 concrete steps

Note: {warning}"#,
    trigger: Trigger {
        needle: "urgent",
        when_present: "Offer to escalate to a human agent right away",
        otherwise: "Ask whether anything else needs attention",
    },
};
