//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default data directory name under home.
const DEFAULT_DATA_DIR: &str = ".maitre";

/// Maitre - simulated restaurant-service session orchestrator
#[derive(Parser, Debug)]
#[command(name = "maitre")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the data directory holding the JSON stores
    #[arg(short, long, env = "MAITRE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the sample catalog and floor plan into the data directory
    Seed {
        /// Overwrite existing stores
        #[arg(short, long)]
        force: bool,
    },

    /// Show the menu
    Menu,

    /// Show the floor plan and availability
    Tables {
        /// Environment tags to rank by, e.g. window,quiet
        #[arg(short, long, value_delimiter = ',')]
        preferences: Vec<String>,
    },

    /// Run a scripted guest visit end to end
    Demo {
        /// Guest name
        #[arg(long, default_value = "Ada Moretti")]
        guest: String,

        /// Guest allergies, comma separated
        #[arg(long, value_delimiter = ',', default_value = "basil")]
        allergies: Vec<String>,

        /// Seating preferences, comma separated
        #[arg(long, value_delimiter = ',', default_value = "window")]
        preferences: Vec<String>,

        /// Kitchen load for admission control, 0-100
        #[arg(long, default_value_t = 10)]
        load: u8,
    },
}

impl Cli {
    /// Log level derived from the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Resolves the data directory: flag or `MAITRE_DATA_DIR`, then
    /// `~/.maitre`, then `./.maitre` as a last resort.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_DATA_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
        })
    }
}
