//! Clean snapshots and logs command
//!
//! - Logs (cache directory)
//! - Snapshots (data directory, all sessions or one)
//!
//! Always prompts for confirmation before deletion unless `--yes` is given.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::RuntimeConfig;

use crate::dirs;

/// Clean snapshots and logs
#[derive(Parser, Debug)]
pub struct Clean {
    /// Clean only logs
    #[arg(long)]
    pub logs: bool,

    /// Clean only snapshots
    #[arg(long)]
    pub data: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Specific snapshot session to clean (only works with --data)
    #[arg(long)]
    pub session: Option<String>,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let clean_logs = self.logs || !self.data;
        let clean_data = self.data || !self.logs;

        if self.session.is_some() && !self.data {
            anyhow::bail!("--session can only be used with --data");
        }

        let mut targets = Vec::new();

        if clean_logs {
            let log_dir = dirs::log_dir();
            if log_dir.exists() {
                targets.push(("All logs".to_string(), log_dir));
            }
        }

        if clean_data {
            let root = dirs::snapshot_root(&RuntimeConfig::from_env());
            match &self.session {
                Some(session) => {
                    let session_dir = root.join(session);
                    if !session_dir.exists() {
                        anyhow::bail!("Session directory does not exist: {}", session_dir.display());
                    }
                    targets.push((format!("Snapshots ({session})"), session_dir));
                }
                None if root.exists() => targets.push(("All snapshots".to_string(), root)),
                None => {}
            }
        }

        if targets.is_empty() {
            println!(
                "{}",
                style("Nothing to clean - directories don't exist yet").dim()
            );
            return Ok(());
        }

        println!("{}", style("Clean visibility data").yellow().bold());
        println!();
        println!("The following will be deleted:");
        for (label, path) in &targets {
            println!("  {} {}", style("->").cyan(), style(label).bold());
            println!("    {}", style(path.display()).dim());
        }
        println!();

        if !self.yes && !confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        for (label, path) in targets {
            print!("Deleting {label}... ");
            io::stdout().flush()?;

            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to delete: {}", path.display()))?;

            println!("{}", style("done").green());
        }

        Ok(())
    }
}

fn confirm() -> Result<bool> {
    print!("{} ", style("Proceed? [y/N]").yellow().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
