//! Pool Tools CLI
//!
//! Preset generation, rule scaling and leaderboards over JSON files

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "qn")]
#[command(about = "Configure and score prediction pools from JSON files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List built-in scoring presets
    Presets,

    /// Generate a pool configuration from a preset
    Generate {
        /// Preset key (case-insensitive)
        #[arg(long)]
        preset: String,

        /// Tournament phases JSON file ([{id, name, type}])
        #[arg(long)]
        phases: PathBuf,

        /// Output JSON file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Rescale a phase rule set to a target maximum
    Scale {
        /// Rule set JSON file
        #[arg(long)]
        config: PathBuf,

        /// Points the enabled rules should add up to
        #[arg(long)]
        target: u32,

        /// Output JSON file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Rank the players of a pool snapshot
    Leaderboard {
        /// Pool snapshot JSON file
        #[arg(long)]
        pool: PathBuf,

        /// Output JSON file (table on stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a stored configuration against the tournament's phases
    CheckPhases {
        /// Pool configuration JSON file
        #[arg(long)]
        config: PathBuf,

        /// Tournament phases JSON file
        #[arg(long)]
        phases: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Presets => {
            for preset in qn_core::get_all_presets() {
                println!("{:<12} {:<12} {}", preset.key, preset.name, preset.description);
            }
        }

        Commands::Generate { preset, phases, out } => {
            let config = qn_cli::generate_config(&preset, &phases)?;
            eprintln!("Generated {} phase configs from preset {}", config.len(), preset);
            print_output(qn_cli::write_json(&config, out.as_deref())?);
        }

        Commands::Scale { config, target, out } => {
            let scaled = qn_cli::scale_config(&config, target)?;
            print_output(qn_cli::write_json(&scaled, out.as_deref())?);
        }

        Commands::Leaderboard { pool, out } => {
            let rows = qn_cli::leaderboard(&pool)?;
            if out.is_some() {
                qn_cli::write_json(&rows, out.as_deref())?;
            } else {
                println!(
                    "{:>4}  {:<20} {:>6} {:>6} {:>6} {:>7}",
                    "#", "player", "match", "struct", "total", "eff%"
                );
                for row in rows {
                    println!(
                        "{:>4}  {:<20} {:>6} {:>6} {:>6} {:>6.1}%",
                        row.rank,
                        row.user_id,
                        row.match_points,
                        row.structural_points,
                        row.total_points,
                        row.effectiveness_pct
                    );
                }
            }
        }

        Commands::CheckPhases { config, phases } => {
            let drift = qn_cli::check_phases(&config, &phases)?;
            if drift.is_clean() {
                println!("Configuration matches the tournament phases");
            } else {
                for id in &drift.stale_phase_ids {
                    println!("stale phase id in config: {}", id);
                }
                for id in &drift.unconfigured_phase_ids {
                    println!("tournament phase without config: {}", id);
                }
                anyhow::bail!("Configuration drifted from the tournament phases");
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_output(json: Option<String>) {
    if let Some(json) = json {
        println!("{}", json);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("qn CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
