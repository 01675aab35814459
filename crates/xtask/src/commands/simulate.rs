//! Run a RON scenario turn by turn
//!
//! Prints an ASCII frame after setup and after every scripted step, and can
//! persist one snapshot per turn for later inspection with `read-snapshot`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::{FileSnapshotRepository, RuntimeConfig, Scenario, VisionSession};
use vision_core::VisionConfig;

use crate::dirs;

/// Run a scenario and print each turn's visibility
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Scenario RON file
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Save a snapshot for every turn
    #[arg(long)]
    save: bool,

    /// Session ID for saved snapshots (defaults to GAME_SESSION_ID, then a timestamp)
    #[arg(short, long, value_name = "SESSION")]
    session: Option<String>,

    /// Override the radius shared by all eyeballs
    #[arg(long, value_name = "RADIUS")]
    eyeball_radius: Option<u32>,

    /// Print only the final frame
    #[arg(short, long)]
    quiet: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let mut config = RuntimeConfig::from_env();
        if let Some(radius) = self.eyeball_radius {
            config.vision = VisionConfig::with_eyeball_radius(radius);
        }
        if let Some(session) = self.session {
            config.session_id = Some(session);
        } else if self.save && config.session_id.is_none() {
            config.session_id = Some(dirs::fresh_session_id());
        }

        let scenario = Scenario::load_from_file(&self.scenario)
            .with_context(|| format!("Failed to load scenario: {}", self.scenario.display()))?;
        tracing::info!(
            scenario = %self.scenario.display(),
            steps = scenario.steps.len(),
            session = ?config.session_id,
            "loaded scenario"
        );

        let repo = if self.save {
            let dir = config.snapshot_dir();
            Some(
                FileSnapshotRepository::new(&dir)
                    .with_context(|| format!("Failed to open {}", dir.display()))?,
            )
        } else {
            None
        };

        let quiet = self.quiet;
        let session = scenario.run(&config, |session| {
            let updates = session.take_render_updates().len();
            if let Some(repo) = &repo {
                session.save(repo)?;
            }
            if !quiet {
                print_frame(session, updates);
            }
            Ok(())
        })?;

        if quiet {
            print_frame(&session, 0);
        }
        print_summary(&session);

        if let Some(repo) = &repo {
            println!(
                "{} {}",
                style("Snapshots:").bold().cyan(),
                repo.base_dir().display()
            );
        }

        Ok(())
    }
}

fn print_frame(session: &VisionSession, updates: usize) {
    println!(
        "{} {}",
        style(format!("Turn {}", session.turn())).bold().yellow(),
        style(format!("({updates} render updates)")).dim()
    );
    for line in session.render_ascii().lines() {
        println!("  {line}");
    }
    println!();
}

fn print_summary(session: &VisionSession) {
    let snapshot = session.snapshot();
    println!("{}", style("=== Visibility Summary ===").bold().green());
    println!("  Turns: {}", session.turn());
    println!("  Visible Cells: {}", snapshot.visible_cells());
    println!("  Tracked Observers: {}", snapshot.observers.len());
    println!("  Eyeballs: {}", snapshot.eyeballs.len());
    println!("  Digest: {}", hex::encode(snapshot.digest()));
}
