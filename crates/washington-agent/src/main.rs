//! # washington
//!
//! Guest preview binary. Wires settings, logging, the session identity, the
//! event sink, and the VIA stub together and replays the preview flow.

#![deny(unsafe_code)]

mod preview;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use washington_events::{BroadcastBus, EventBus, EventSink};
use washington_settings::WashingtonSettings;
use washington_via::ViaClient;

use crate::preview::Preview;

/// Washington guest preview.
#[derive(Parser, Debug)]
#[command(name = "washington", about = "Washington guest preview event pipeline")]
struct Cli {
    /// Settings file (defaults to `~/.washington/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Replay a guest session: boot, onboarding, VIA toggle.
    Preview {
        /// Route reported by the initial page view.
        #[arg(long, default_value = "/")]
        route: String,

        /// Skip the onboarding modal after its first step.
        #[arg(long)]
        skip_onboarding: bool,

        /// Publish to an in-process broadcast bus and print what it carries
        /// to stdout. Without it, records go to the diagnostic log on stderr.
        #[arg(long)]
        bus: bool,
    },
    /// VIA stub commands.
    Via {
        #[command(subcommand)]
        command: ViaCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ViaCommand {
    /// Print the ribbon messages.
    Ribbon,
    /// Print the insight for a content id.
    Investigate {
        /// Content id; the default insight is used when omitted.
        content_id: Option<String>,
    },
}

fn load_settings(path: Option<&Path>) -> Result<WashingtonSettings> {
    match path {
        Some(path) => washington_settings::load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings: {}", path.display())),
        None => Ok(washington_settings::load_settings().unwrap_or_default()),
    }
}

fn load_via(settings: &WashingtonSettings) -> Result<ViaClient> {
    match settings.via.catalog_path.as_deref() {
        Some(path) => ViaClient::from_path(Path::new(path))
            .with_context(|| format!("Failed to load insight catalog: {path}")),
        None => ViaClient::from_embedded().context("Bundled insight catalog is invalid"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.settings.as_deref())?;
    washington_core::logging::init_subscriber(&settings.logging.level, settings.logging.format);
    let via = load_via(&settings)?;

    match cli.command {
        Command::Preview {
            route,
            skip_onboarding,
            bus,
        } => run_preview(&settings, via, &route, skip_onboarding, bus).await,
        Command::Via {
            command: ViaCommand::Ribbon,
        } => {
            let ribbon = serde_json::json!({
                "current": via.current_ribbon_message(),
                "messages": via.ribbon_messages(),
            });
            println!("{}", serde_json::to_string_pretty(&ribbon)?);
            Ok(())
        }
        Command::Via {
            command: ViaCommand::Investigate { content_id },
        } => {
            let sink = Arc::new(EventSink::new(None, settings.events.channel.clone()));
            let preview = start_preview(&settings, sink, via)?;
            let (_, insight) = preview.investigate(content_id.as_deref());
            println!("{}", serde_json::to_string_pretty(&insight)?);
            Ok(())
        }
    }
}

fn start_preview(settings: &WashingtonSettings, sink: Arc<EventSink>, via: ViaClient) -> Result<Preview> {
    let _ = washington_core::init_session_with_prefix(&settings.session.id_prefix);
    let session = washington_core::current_session().context("Session identity was not initialized")?;
    tracing::info!(session_id = %session.id(), channel = sink.channel(), bus = sink.has_bus(), "guest session started");
    Ok(Preview::new(session.id().clone(), sink, via))
}

async fn run_preview(
    settings: &WashingtonSettings,
    via: ViaClient,
    route: &str,
    skip_onboarding: bool,
    with_bus: bool,
) -> Result<()> {
    let channel = settings.events.channel.clone();

    if !with_bus {
        let sink = Arc::new(EventSink::new(None, channel));
        let mut preview = start_preview(settings, sink, via)?;
        let records = preview.run(route, skip_onboarding);
        tracing::info!(
            events = records.len(),
            investigate_open = preview.is_investigate_open(),
            ribbon_expanded = preview.is_ribbon_expanded(),
            "preview finished"
        );
        return Ok(());
    }

    let bus = BroadcastBus::new(settings.events.bus_capacity);
    let mut rx = bus.subscribe();
    let printer = tokio::spawn(async move {
        let mut printed = 0_usize;
        loop {
            match rx.recv().await {
                Ok(message) => {
                    println!("{} {}", message.channel, message.record.to_json_string());
                    printed += 1;
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "bus subscriber lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
        printed
    });

    let emitted = {
        let bus: Arc<dyn EventBus> = Arc::new(bus);
        let sink = Arc::new(EventSink::new(Some(bus), channel));
        let mut preview = start_preview(settings, sink, via)?;
        preview.run(route, skip_onboarding).len()
        // the last sender drops here, closing the subscriber
    };

    let printed = printer.await.context("Bus subscriber task failed")?;
    tracing::info!(emitted, printed, "preview finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_preview_defaults() {
        let cli = Cli::parse_from(["washington", "preview"]);
        assert_eq!(cli.settings, None);
        assert_eq!(
            cli.command,
            Command::Preview {
                route: "/".into(),
                skip_onboarding: false,
                bus: false,
            }
        );
    }

    #[test]
    fn cli_preview_flags() {
        let cli = Cli::parse_from([
            "washington",
            "preview",
            "--route",
            "/watch/long-night",
            "--skip-onboarding",
            "--bus",
        ]);
        assert_eq!(
            cli.command,
            Command::Preview {
                route: "/watch/long-night".into(),
                skip_onboarding: true,
                bus: true,
            }
        );
    }

    #[test]
    fn cli_settings_is_global() {
        let cli = Cli::parse_from(["washington", "via", "ribbon", "--settings", "/tmp/s.json"]);
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(
            cli.command,
            Command::Via {
                command: ViaCommand::Ribbon
            }
        );
    }

    #[test]
    fn cli_investigate_content_id_is_optional() {
        let cli = Cli::parse_from(["washington", "via", "investigate"]);
        assert_eq!(
            cli.command,
            Command::Via {
                command: ViaCommand::Investigate { content_id: None }
            }
        );
        let cli = Cli::parse_from(["washington", "via", "investigate", "mathmagical"]);
        assert_eq!(
            cli.command,
            Command::Via {
                command: ViaCommand::Investigate {
                    content_id: Some("mathmagical".into())
                }
            }
        );
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["washington"]).is_err());
    }

    #[test]
    fn explicit_settings_path_must_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    fn explicit_settings_rejects_oversized_bus_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"events": {"busCapacity": 18446744073709551615}}"#).unwrap();
        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    fn explicit_settings_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"session": {"idPrefix": "guest"}}"#).unwrap();
        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.session.id_prefix, "guest");
    }

    #[test]
    fn via_catalog_override_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("via.json");
        std::fs::write(&path, r#"{"ribbonMessages": ["custom"]}"#).unwrap();

        let mut settings = WashingtonSettings::default();
        settings.via.catalog_path = Some(path.to_string_lossy().into_owned());
        let via = load_via(&settings).unwrap();
        assert_eq!(via.current_ribbon_message(), "custom");

        settings.via.catalog_path = Some("/nonexistent/via.json".into());
        assert!(load_via(&settings).is_err());
    }

    #[test]
    fn bundled_catalog_is_the_default() {
        let via = load_via(&WashingtonSettings::default()).unwrap();
        assert!(!via.ribbon_messages().is_empty());
    }

    #[tokio::test]
    async fn preview_over_bus_runs_to_completion() {
        let settings = WashingtonSettings::default();
        let via = ViaClient::from_embedded().unwrap();
        run_preview(&settings, via, "/", true, true).await.unwrap();
    }
}
