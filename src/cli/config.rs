use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::testing::wait::WaitOptions;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "screen-keys",
    version,
    about = "Structural accessibility identifiers and element lookup for UI tests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: screen-keys.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

/// Where the live element tree comes from.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct SourceArgs {
    /// JSON file holding a recorded element tree
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Bridge executable speaking the NDJSON protocol
    #[arg(long)]
    pub bridge: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every identifier reachable from a root descriptor
    Keys {
        /// YAML descriptor catalog
        #[arg(long)]
        descriptors: String,

        /// Root type (default: the catalog's root)
        #[arg(long)]
        root: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the live element tree
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Run test specs from YAML files
    Run {
        /// YAML descriptor catalog
        #[arg(long)]
        descriptors: String,

        /// Path to test spec YAML file or directory of YAML files
        #[arg(long)]
        spec: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format: console, junit
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Default wait timeout in seconds
        #[arg(long)]
        timeout: Option<f64>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

pub const DEFAULT_CONFIG_PATH: &str = "screen-keys.yaml";

/// Optional YAML config file: `screen-keys.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub wait: WaitConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub identifiers: IdentifiersConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            fail_fast: false,
        }
    }
}

impl WaitConfig {
    pub fn options(&self) -> WaitOptions {
        WaitOptions {
            timeout: Duration::try_from_secs_f64(self.timeout_secs.max(0.0)).unwrap_or(Duration::MAX),
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            output: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BridgeConfig {
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for IdentifiersConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    /// JSONL file receiving assertion, wait and gesture events
    pub path: Option<String>,
}

// Serde default helpers
fn default_timeout_secs() -> f64 { 4.0 }
fn default_poll_interval_ms() -> u64 { 100 }
fn default_true() -> bool { true }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing, and
/// defaults plus a warning if it is malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = config_path, error = %e, "malformed config, using defaults");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}
