pub mod node_config;

pub use node_config::NodeConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "random-node")]
#[command(about = "Fetch true random integers from random.org for a batch of records")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON file holding an array of input records (defaults to one empty record)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Override the minimum value
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Override the maximum value
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Record per-item failures as error items instead of aborting
    #[arg(long)]
    pub continue_on_fail: bool,

    /// Override the integer generator endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the node description as JSON and exit
    #[arg(long)]
    pub describe: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the configuration file (if any) and applies command line overrides.
    pub fn resolve(&self) -> crate::utils::error::Result<NodeConfig> {
        let mut config = match &self.config {
            Some(path) => NodeConfig::from_file(path)?,
            None => NodeConfig::default(),
        };

        if let Some(min) = self.min {
            config.parameters.min = Some(toml::Value::Integer(min));
        }
        if let Some(max) = self.max {
            config.parameters.max = Some(toml::Value::Integer(max));
        }
        if self.continue_on_fail {
            config.execution.continue_on_fail = true;
        }
        if let Some(endpoint) = &self.endpoint {
            config.http.endpoint = endpoint.clone();
        }

        Ok(config)
    }
}
