//! Settings and input helpers for the terminal front-end.

use clap::Parser;
use shared::settings::{ChatSettings, Variant};
use std::path::PathBuf;

/// Get the config file path
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com.local", "Support Chat", "SupportChat")
        .map(|proj| proj.config_dir().join("settings.json"))
}

/// Load settings from disk or return defaults
pub fn load_settings_or_default() -> ChatSettings {
    match config_path() {
        Some(path) => ChatSettings::load_or_default(&path),
        None => ChatSettings::default(),
    }
}

/// Command-line options
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "support-chat", about = "Healthcare and customer support assistant")]
pub struct CliArgs {
    /// Product variant (healthcare | support); overrides settings.json
    #[arg(long)]
    pub variant: Option<Variant>,
}

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Quit,
    ListActions,
    QuickAction(&'a str),
    Message(&'a str),
    Blank,
}

pub fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Blank;
    }
    match line.strip_prefix('/') {
        Some("quit") | Some("exit") => Input::Quit,
        Some("actions") | Some("help") => Input::ListActions,
        Some(id) if !id.is_empty() => Input::QuickAction(id),
        _ => Input::Message(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(items: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(items.iter().copied())
    }

    #[test]
    fn test_cli_variant() {
        assert_eq!(parse(&["support-chat"]).unwrap(), CliArgs::default());
        assert_eq!(
            parse(&["support-chat", "--variant", "support"]).unwrap().variant,
            Some(Variant::CustomerSupport)
        );
        assert_eq!(
            parse(&["support-chat", "--variant=healthcare"]).unwrap().variant,
            Some(Variant::Healthcare)
        );
        assert!(parse(&["support-chat", "--variant"]).is_err());
        assert!(parse(&["support-chat", "--variant", "banking"]).is_err());
        assert!(parse(&["support-chat", "--verbose"]).is_err());
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  "), Input::Blank);
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input("/actions"), Input::ListActions);
        assert_eq!(parse_input("/billing"), Input::QuickAction("billing"));
        assert_eq!(parse_input("/"), Input::Message("/"));
        assert_eq!(
            parse_input(" I have a headache "),
            Input::Message("I have a headache")
        );
    }
}
