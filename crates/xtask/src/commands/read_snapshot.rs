//! Read and inspect visibility snapshot files
//!
//! Deserializes visibility_{turn}.bin files, re-checks the count invariant
//! and displays their contents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::{FileSnapshotRepository, RuntimeConfig, SnapshotRepository};
use vision_core::{CoreError, VisibilityMap, VisibilitySnapshot};

use crate::dirs;

/// Read and inspect saved visibility snapshots
#[derive(Parser)]
pub struct ReadSnapshot {
    /// Turn to read (defaults to the latest saved turn)
    #[arg(value_name = "TURN")]
    turn: Option<u64>,

    /// Session ID to read from (defaults to the most recent session)
    #[arg(short, long, value_name = "SESSION")]
    session: Option<String>,

    /// Custom data directory (defaults to SAVE_DATA_DIR, then the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Counts, contributors and digest
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadSnapshot {
    pub fn execute(self) -> Result<()> {
        let mut config = RuntimeConfig::from_env();
        if let Some(dir) = self.data_dir {
            config.save_data_dir = Some(dir);
        }
        if let Some(session) = self.session {
            config.session_id = Some(session);
        } else if config.session_id.is_none() {
            config.session_id = dirs::latest_session(&dirs::snapshot_root(&config))?;
        }

        let dir = config.snapshot_dir();
        if !dir.exists() {
            anyhow::bail!("Snapshot directory not found: {}", dir.display());
        }
        let repo = FileSnapshotRepository::new(&dir)?;

        let turn = match self.turn {
            Some(turn) => turn,
            None => repo
                .latest_turn()?
                .with_context(|| format!("No snapshots saved in {}", dir.display()))?,
        };
        let snapshot = repo.load(turn)?.with_context(|| {
            format!(
                "Snapshot for turn {turn} not found\n\nHint: saved turns are {:?}",
                repo.list_turns().unwrap_or_default()
            )
        })?;

        let path = repo.snapshot_path(turn);
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or_default();
        println!("{} {}", style("Snapshot File:").bold().cyan(), path.display());
        println!("{} {}", style("File Size:").bold().cyan(), format_bytes(size));
        println!("{} {}", style("Turn:").bold().cyan(), turn);
        println!(
            "{} {}",
            style("Digest:").bold().cyan(),
            hex::encode(snapshot.digest())
        );
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&snapshot, &config),
            OutputFormat::Json => print_json(&snapshot)?,
            OutputFormat::Debug => println!("{snapshot:#?}"),
        }

        Ok(())
    }
}

fn print_summary(snapshot: &VisibilitySnapshot, config: &RuntimeConfig) {
    println!("{}", style("=== Visibility Snapshot Summary ===").bold().green());
    println!();

    match VisibilityMap::from_snapshot(config.vision, snapshot.clone()) {
        Ok(_) => println!("  Integrity: {}", style("ok").green()),
        Err(err) => {
            let severity = err.severity();
            let message = if severity.is_fatal() {
                style(err.to_string()).red()
            } else {
                style(err.to_string()).yellow()
            };
            println!(
                "  Integrity: {} [{} {}]",
                message,
                severity.as_str(),
                err.error_code()
            );
        }
    }
    println!("  Visible Cells: {}", snapshot.visible_cells());
    println!();

    println!("{}", style("Observers:").bold().yellow());
    for (id, tiles) in &snapshot.observers {
        println!("  Observer {id} - {} tiles", tiles.len());
    }
    println!();

    println!("{}", style("Eyeballs:").bold().yellow());
    for (position, tiles) in &snapshot.eyeballs {
        println!("  Eyeball at {position} - {} tiles", tiles.len());
    }
    println!();

    let shared = snapshot.counts.iter().filter(|(_, count)| *count > 1).count();
    println!("{}", style("Counts:").bold().yellow());
    println!("  Seen by several sources: {shared}");
    if let Some((position, count)) = snapshot.counts.iter().max_by_key(|(_, count)| *count) {
        println!("  Most watched: {position} ({count})");
    }
}

fn print_json(snapshot: &VisibilitySnapshot) -> Result<()> {
    let json =
        serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot to JSON")?;
    println!("{json}");
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}
