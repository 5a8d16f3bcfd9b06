//! Subcommand execution against a [`SlotPanel`].

use std::io::Write;
use std::time::Duration;

use memslot_bridge::SlotPanel;
use memslot_common::{MemslotError, ProcessStatus, SettingsListItem, SettingsState};

use crate::cli::Command;

const WATCH_POLL: Duration = Duration::from_millis(100);

pub async fn run(
    command: &Command,
    panel: &mut SlotPanel,
    out: &mut impl Write,
) -> Result<(), MemslotError> {
    match command {
        Command::List => {
            panel.refresh().await?;
            print_items(panel, out)?;
        }
        Command::Rename { index, name } => {
            panel.refresh().await?;
            panel.rename(*index, name).await?;
            writeln!(out, "slot {index} renamed to {name}")?;
        }
        Command::Save { index } => {
            panel.save(*index).await?;
            writeln!(out, "saved game settings to slot {index}")?;
        }
        Command::Load { index } => {
            panel.refresh().await?;
            if !panel.can_load(*index) {
                return Err(MemslotError::Other(format!("slot {index} has nothing to load")));
            }
            panel.load(*index).await?;
            writeln!(out, "loaded game settings from slot {index}")?;
        }
        Command::Open { url } => {
            panel.service().open_link(url).await?;
            writeln!(out, "opened {url}")?;
        }
        Command::Init => {
            panel.init().await?;
            writeln!(out, "url: {}", panel.url().unwrap_or_default())?;
            print_items(panel, out)?;
        }
        Command::Watch { seconds } => watch(panel, Duration::from_secs(*seconds), out).await?,
    }
    Ok(())
}

fn print_items(panel: &SlotPanel, out: &mut impl Write) -> std::io::Result<()> {
    for (index, item) in panel.items().unwrap_or_default().iter().enumerate() {
        writeln!(out, "{index:>3}  {:<24} {}", item.name, state_label(item))?;
    }
    Ok(())
}

fn state_label(item: &SettingsListItem) -> &'static str {
    match item.state() {
        SettingsState::Absent => "-",
        SettingsState::Empty => "saved",
        SettingsState::Populated => "saved*",
    }
}

async fn watch(
    panel: &SlotPanel,
    duration: Duration,
    out: &mut impl Write,
) -> std::io::Result<()> {
    panel.watch_status();
    let deadline = tokio::time::Instant::now() + duration;
    let mut last: Option<ProcessStatus> = None;

    while tokio::time::Instant::now() < deadline {
        let latest = panel.latest_status();
        if latest != last {
            if let Some(status) = latest {
                writeln!(
                    out,
                    "offsets loaded: {}  process attached: {}",
                    status.offsets_loaded, status.process_attached
                )?;
                out.flush()?;
            }
            last = latest;
        }
        tokio::time::sleep(WATCH_POLL).await;
    }

    panel.unwatch_status();
    Ok(())
}
