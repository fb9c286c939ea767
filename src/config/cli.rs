use crate::app::verify::VerifyMode;
use crate::config::{AppConfig, LogFormat};
use crate::core::generators::GeneratorProfile;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "agent-analytics")]
#[command(version, about = "Multi-agent e-commerce analytics demo")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the four-agent workflow and write the HTML report
    Analyze {
        /// Output directory
        #[arg(short, long)]
        output: Option<String>,

        /// Days of daily sales to generate
        #[arg(long)]
        days_back: Option<usize>,

        /// Generator profile
        #[arg(long, value_enum)]
        profile: Option<GeneratorProfile>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the workflow results as JSON
        #[arg(long)]
        save_json: bool,

        /// Log CPU and memory usage per agent
        #[arg(long)]
        monitor: bool,
    },

    /// Serve live generated data over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Rerun the generators to show that values vary between runs
    Verify {
        #[arg(short, long, value_enum, default_value = "full")]
        mode: VerifyMode,

        /// Number of runs for the full and quick demos
        #[arg(long)]
        runs: Option<usize>,

        /// Number of samples to export
        #[arg(long)]
        samples: Option<usize>,

        /// Also export the comparison table as CSV
        #[arg(long)]
        csv: bool,

        /// Skip the pauses between runs
        #[arg(long)]
        no_delay: bool,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check that the agents can be constructed and their tools run
    Check,
}

impl Cli {
    /// 命令列參數覆蓋檔案中的設定
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if self.verbose {
            config.logging.verbose = true;
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }

        match &self.command {
            Commands::Analyze {
                output,
                days_back,
                profile,
                seed,
                save_json,
                monitor,
            } => {
                if let Some(output) = output {
                    config.report.output_path = output.clone();
                }
                if let Some(days_back) = days_back {
                    config.workflow.days_back = *days_back;
                }
                if let Some(profile) = profile {
                    config.workflow.profile = *profile;
                }
                if seed.is_some() {
                    config.workflow.seed = *seed;
                }
                if *save_json && config.report.results_file.is_none() {
                    config.report.results_file = Some("workflow_results.json".to_string());
                }
                if *monitor {
                    config.workflow.monitor = true;
                }
            }
            Commands::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
            }
            Commands::Verify {
                runs,
                samples,
                no_delay,
                seed,
                ..
            } => {
                if let Some(runs) = runs {
                    config.verify.runs = *runs;
                }
                if let Some(samples) = samples {
                    config.verify.samples = *samples;
                }
                if *no_delay {
                    config.verify.run_delay_ms = 0;
                    config.verify.quick_delay_ms = 0;
                    config.verify.sample_delay_ms = 0;
                }
                if seed.is_some() {
                    config.workflow.seed = *seed;
                }
            }
            Commands::Check => {}
        }
    }
}
