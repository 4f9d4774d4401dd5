//! CLI argument definitions and subcommand dispatch

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::analysis::{
    compare_profiles, format_duration, format_frequency, rank_wakeup_sources, threading_model_description,
};
use crate::commands::settings::{update_settings, UpdateSettingsParams};
use crate::commands::skus::{
    archive_sku, delete_archived_sku, list_archived_skus, list_skus, remove_game, remove_sku, rename_sku,
    unarchive_sku,
};
use crate::commands::traces::{detect_trace_format, import_trace_files, parse_trace_file};
use crate::models::{GameProfile, Settings};

#[derive(Parser)]
#[command(
    name = "socwatch-analyzer",
    version,
    about = "Parse Intel SoC Watch CSV exports into game power/performance profiles",
    after_help = "\
EXAMPLES:
    socwatch-analyzer summary Cyberpunk_PTATMonitor.csv      Print the insight summary
    socwatch-analyzer import --sku LNL traces/*.csv          Add traces to the LNL SKU
    socwatch-analyzer compare base.csv tuned.csv             Show metric deltas"
)]
pub struct Args {
    /// Log at debug level (overrides the configured level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect the export format of a trace
    Detect { file: PathBuf },

    /// Parse a trace and print the profile as JSON
    Parse {
        file: PathBuf,
        /// Also print which sections were found
        #[arg(long)]
        diagnostics: bool,
    },

    /// Print a human-readable insight summary
    Summary { file: PathBuf },

    /// Parse traces and append them to a SKU
    Import {
        /// Target SKU (defaults to the configured default SKU)
        #[arg(long)]
        sku: Option<String>,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Manage stored SKUs
    #[command(subcommand)]
    Sku(SkuCommand),

    /// Compare two traces metric by metric
    Compare { base: PathBuf, other: PathBuf },

    /// Show or change settings
    Settings {
        #[arg(long, value_name = "LEVEL")]
        log_level: Option<String>,
        #[arg(long, value_name = "BOOL")]
        log_to_file: Option<bool>,
        #[arg(long, value_name = "BOOL")]
        pretty_json: Option<bool>,
        #[arg(long, value_name = "NAME")]
        default_sku: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SkuCommand {
    /// List SKUs and their games
    List {
        #[arg(long)]
        archived: bool,
    },
    /// Remove a SKU (with --archived, permanently delete an archived one)
    Remove {
        name: String,
        #[arg(long)]
        archived: bool,
    },
    Archive { name: String },
    Unarchive { name: String },
    Rename { old_name: String, new_name: String },
    /// Remove one game by its zero-based index
    RemoveGame { sku: String, index: usize },
}

fn path_arg(path: &PathBuf) -> String {
    path.to_string_lossy().to_string()
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| format!("Failed to serialize output: {}", e))?;
    println!("{}", text);
    Ok(())
}

/// Insight summary of one profile as printed by `summary`
pub fn render_summary(profile: &GameProfile) -> String {
    let insights = &profile.insights;
    let mut out = String::new();

    let _ = writeln!(out, "{} ({} format)", profile.name, profile.format_version);
    if let Some(cpu) = &profile.metadata.cpu_model {
        let _ = writeln!(out, "  CPU:               {}", cpu);
    }
    if let Some(duration) = profile.metadata.duration {
        let _ = writeln!(out, "  Duration:          {}", format_duration(duration));
    }
    if let Some(base_freq) = profile.metadata.base_freq {
        let _ = writeln!(out, "  Base frequency:    {}", format_frequency(base_freq));
    }
    let _ = writeln!(out, "  Cores:             {}", profile.c_state_data.len());
    let _ = writeln!(out, "  P-Core activity:   {}% @ {} MHz", insights.p_core_activity, insights.p_core_avg_freq);
    let _ = writeln!(out, "  E-Core activity:   {}% @ {} MHz", insights.e_core_activity, insights.e_core_avg_freq);
    let _ = writeln!(out, "  Avg CC6 / CC7:     {}% / {}%", insights.avg_cc6, insights.avg_cc7);
    let _ = writeln!(out, "  Threading ratio:   {}", insights.threading_ratio);
    let _ = writeln!(
        out,
        "  Threading model:   {} - {}",
        insights.threading_model,
        threading_model_description(&insights.threading_model)
    );

    if let Some(pc6) = &insights.package_c6_residency {
        let _ = writeln!(out, "  Package C6:        {}%", pc6);
    }
    if let Some(pc10) = &insights.package_c10_residency {
        let _ = writeln!(out, "  Package C10:       {}%", pc10);
    }
    if let Some(s0ix) = &insights.s0ix_residency {
        let _ = writeln!(out, "  S0ix residency:    {}%", s0ix);
    }
    if let Some(power) = &insights.avg_power {
        let _ = writeln!(out, "  Package power:     {} W", power);
    }
    if let Some(temp) = &insights.avg_temperature {
        let _ = writeln!(out, "  Package temp:      {} °C", temp);
    }
    if let Some(wakeups) = &profile.extended.wakeup_data {
        for entry in rank_wakeup_sources(&wakeups.package_wakeups).iter().take(5) {
            let share = entry.percentage.unwrap_or(0.0);
            let _ = writeln!(out, "  Wakeups {:<10} {} ({:.1}%)", entry.source, entry.count, share);
        }
    }
    out
}

/// Execute one subcommand
pub fn run(args: Args, settings: &Settings) -> Result<(), String> {
    let pretty = settings.pretty_json;

    match args.command {
        Command::Detect { file } => print_json(&detect_trace_format(path_arg(&file))?, pretty),
        Command::Parse { file, diagnostics } => {
            let parsed = parse_trace_file(path_arg(&file))?;
            if diagnostics {
                print_json(&parsed, pretty)
            } else {
                print_json(&parsed.profile, pretty)
            }
        }
        Command::Summary { file } => {
            let parsed = parse_trace_file(path_arg(&file))?;
            print!("{}", render_summary(&parsed.profile));
            if parsed.diagnostics.is_degraded() {
                println!("  (some sections could not be read; run `parse --diagnostics` for details)");
            }
            Ok(())
        }
        Command::Import { sku, files } => {
            let sku_name = sku.unwrap_or_else(|| settings.default_sku.clone());
            let paths = files.iter().map(path_arg).collect();
            let sku = import_trace_files(sku_name, paths)?;
            println!("SKU \"{}\" now holds {} game(s)", sku.name, sku.games.len());
            Ok(())
        }
        Command::Sku(command) => run_sku(command, pretty),
        Command::Compare { base, other } => {
            let base = parse_trace_file(path_arg(&base))?.profile;
            let other = parse_trace_file(path_arg(&other))?.profile;
            print_json(&compare_profiles(&base, &other), pretty)
        }
        Command::Settings {
            log_level,
            log_to_file,
            pretty_json,
            default_sku,
        } => {
            let params = UpdateSettingsParams {
                log_level,
                log_to_file,
                pretty_json,
                default_sku,
            };
            print_json(&update_settings(params)?, pretty)
        }
    }
}

fn run_sku(command: SkuCommand, pretty: bool) -> Result<(), String> {
    match command {
        SkuCommand::List { archived } => {
            let skus = if archived { list_archived_skus()? } else { list_skus()? };
            if skus.is_empty() {
                println!("No SKUs stored");
            }
            for sku in &skus {
                println!("{} ({} game(s))", sku.name, sku.games.len());
                for (index, game) in sku.games.iter().enumerate() {
                    println!("  [{}] {} - {}", index, game.name, game.insights.threading_model);
                }
            }
            Ok(())
        }
        SkuCommand::Remove { name, archived } => {
            if archived {
                delete_archived_sku(name)
            } else {
                remove_sku(name)
            }
        }
        SkuCommand::Archive { name } => archive_sku(name),
        SkuCommand::Unarchive { name } => unarchive_sku(name),
        SkuCommand::Rename { old_name, new_name } => print_json(&rename_sku(old_name, new_name)?, pretty),
        SkuCommand::RemoveGame { sku, index } => match remove_game(sku.clone(), index)? {
            Some(remaining) => {
                println!("SKU \"{}\" now holds {} game(s)", remaining.name, remaining.games.len());
                Ok(())
            }
            None => {
                println!("SKU \"{}\" was emptied and removed", sku);
                Ok(())
            }
        },
    }
}
