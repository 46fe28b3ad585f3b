use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use farecard::{CliOverrides, OutputFormat};

#[derive(Parser)]
#[command(name = "farecard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Describe the contents of transit card dumps", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Language for descriptions (en, fr, de)
    #[arg(short, long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Describe one or more card dumps
    Inspect {
        #[arg(required = true)]
        dumps: Vec<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Include hex dumps of file contents
        #[arg(long)]
        data: bool,
    },

    /// List every string key and its text in the selected locale
    Keys,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Log filter implied by `-v` / `-d`, if either was given
    pub fn log_filter(&self) -> Option<&'static str> {
        if self.debug {
            Some("farecard=trace,info")
        } else if self.verbose {
            Some("farecard=debug,info")
        } else {
            None
        }
    }

    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            locale: self.locale.clone(),
            log_filter: self.log_filter().map(str::to_string),
            ..CliOverrides::default()
        };
        if let Commands::Inspect { format, data, .. } = &self.command {
            overrides.format = format.map(OutputFormat::from);
            overrides.show_data = *data;
        }
        overrides
    }
}
