//! Phone-call escalation through the platform's `tel:` handler.

use anyhow::{Context, Result};

pub trait Dialer: Send + Sync {
    fn dial(&self, number: &str) -> Result<()>;
}

/// Opens `tel:<number>` with the system URL handler.
pub struct SystemDialer;

impl Dialer for SystemDialer {
    fn dial(&self, number: &str) -> Result<()> {
        let uri = tel_uri(number);
        tracing::info!("opening {}", uri);
        open::that(&uri).with_context(|| format!("Failed to open {}", uri))
    }
}

pub fn tel_uri(number: &str) -> String {
    format!("tel:{}", number.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tel_uri() {
        assert_eq!(tel_uri("1800-300-1234"), "tel:1800-300-1234");
        assert_eq!(tel_uri(" 911 "), "tel:911");
    }
}
