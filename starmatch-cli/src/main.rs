use clap::Parser;
use serde::Deserialize;
use starmatch::io::FsImageSource;
use starmatch::{Backend, ErrorKind, MatchConfig, SearchSettings, Session};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Find constellation patterns in a sky image")]
struct Cli {
    /// Path to a JSON configuration file; defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the dataset root directory.
    #[arg(long, value_name = "DIR")]
    dataset: Option<PathBuf>,
    /// Override the target image path.
    #[arg(long, value_name = "FILE")]
    target: Option<PathBuf>,
    /// Override the output directory.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BackendConfig {
    #[default]
    Scalar,
    Parallel,
    Fft,
}

impl From<BackendConfig> for Backend {
    fn from(value: BackendConfig) -> Self {
        match value {
            BackendConfig::Scalar => Backend::Scalar,
            BackendConfig::Parallel => Backend::Parallel,
            BackendConfig::Fft => Backend::Fft,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    dataset_root: PathBuf,
    target_image: PathBuf,
    output_dir: PathBuf,
    skip_markers: Vec<String>,
    top_k: usize,
    backend: BackendConfig,
}

impl Default for Config {
    fn default() -> Self {
        let settings = SearchSettings::default();
        Self {
            dataset_root: settings.dataset_root,
            target_image: settings.target_image,
            output_dir: settings.output_dir,
            skip_markers: settings.skip_markers,
            top_k: settings.top_k,
            backend: BackendConfig::Scalar,
        }
    }
}

impl Config {
    fn into_settings(self) -> SearchSettings {
        SearchSettings {
            dataset_root: self.dataset_root,
            target_image: self.target_image,
            output_dir: self.output_dir,
            skip_markers: self.skip_markers,
            top_k: self.top_k,
            match_cfg: MatchConfig {
                backend: self.backend.into(),
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("starmatch=info".parse()?))
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let mut config: Config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    if let Some(dataset) = cli.dataset {
        config.dataset_root = dataset;
    }
    if let Some(target) = cli.target {
        config.target_image = target;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if config.top_k == 0 {
        return Err("top_k must be at least 1".into());
    }

    let session = Session::new(config.into_settings(), FsImageSource);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    // Domain failures are reported and the process still ends normally.
    if let Err(err) = session.run(&mut input, &mut out) {
        let message = match err.kind() {
            ErrorKind::DatasetNotFound => "Dataset Not Found",
            ErrorKind::TargetImageNotFound => "Target Image Not Found",
            ErrorKind::TargetImageInvalid => "Target Image Invalid",
            ErrorKind::MatchComputation => "Match Failed",
            ErrorKind::Output => "Output Failed",
            ErrorKind::Input => "No Input",
        };
        writeln!(out, "!!! <{message}: {err}> !!!")?;
    }

    Ok(())
}
