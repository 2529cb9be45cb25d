//! sbom-interchange: SPDX interchange for portal SBOM records
//!
//! Exports stored releases and projects as SPDX documents and imports SPDX
//! documents back into records.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_interchange::{
    bridge::DocumentFormat,
    cli::{self, ImportTarget, OutputFormat, ReportOptions},
    config::{AppConfig, Validatable, CONFIG_FILE_NAMES},
    import::ImportOptions,
    pipeline::exit_codes,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nDocument Formats:",
        "\n  SPDX JSON (built in)",
        "\n  tag-value, RDF/XML, YAML, XML (through a text codec)",
        "\n\nSPDX versions: 2.2, 2.3"
    )
}

#[derive(Parser)]
#[command(name = "sbom-interchange")]
#[command(version, long_version = build_long_version())]
#[command(about = "Exchange SBOM records as SPDX documents", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Request succeeded
    1  Request failed (see the summary message) or verification warnings
    3  Error occurred

EXAMPLES:
    # Export a release as SPDX JSON
    sbom-interchange --store records.json export release-0001 -o zlib.spdx.json

    # Check what an import would create
    sbom-interchange prepare zlib.spdx.json

    # Import a document as a new release version
    sbom-interchange --store records.json import zlib.spdx.json --new-version 1.3.1")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record store snapshot (JSON)
    #[arg(
        long,
        global = true,
        env = "SBOM_INTERCHANGE_STORE",
        default_value = "sbom-store.json"
    )]
    store: PathBuf,

    /// Summary format
    #[arg(long = "report", global = true, default_value = "text")]
    report_format: OutputFormat,

    /// Write the summary to a file instead of stdout
    #[arg(long, global = true)]
    report_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by the export commands
#[derive(Parser)]
struct ExportArgs {
    /// Id of the release or project to export
    id: String,

    /// Output document path
    #[arg(short, long)]
    output: PathBuf,

    /// Document format (from the output file name or config when omitted)
    #[arg(short, long)]
    format: Option<DocumentFormat>,

    /// Directory for intermediate files
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Keep the tag-value and RDF intermediates next to the output
    #[arg(long)]
    keep_intermediate: bool,

    /// Skip verification of the exported document
    #[arg(long)]
    no_verify: bool,
}

impl ExportArgs {
    fn overrides(&self) -> AppConfig {
        let mut builder = AppConfig::builder()
            .keep_intermediate(self.keep_intermediate)
            .verify(!self.no_verify);
        if let Some(dir) = &self.temp_dir {
            builder = builder.temp_dir(dir);
        }
        builder.build()
    }
}

/// Arguments for the `import` subcommand
#[derive(Parser)]
struct ImportArgs {
    /// Input document
    input: PathBuf,

    /// Import the described package as a release or a project
    #[arg(long = "as", default_value = "release")]
    target: ImportTarget,

    /// Input format (detected from the content when omitted)
    #[arg(short, long)]
    format: Option<DocumentFormat>,

    /// Version of the created release instead of the package version
    #[arg(long)]
    new_version: Option<String>,

    /// Import into this existing release
    #[arg(long, conflicts_with = "new_version")]
    release: Option<String>,

    /// Only create releases; do not store the SPDX sub-documents
    #[arg(long)]
    no_persist: bool,

    /// How deep CONTAINS relationships are followed
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a release as an SPDX document
    Export(ExportArgs),

    /// Export a project and its releases as one SPDX document
    ExportProject(ExportArgs),

    /// Import an SPDX document into the store
    Import(ImportArgs),

    /// Show what importing a document would create
    Prepare {
        /// Input document
        input: PathBuf,

        /// Input format (detected from the content when omitted)
        #[arg(short, long)]
        format: Option<DocumentFormat>,
    },

    /// Read a document and report verification warnings
    Verify {
        /// Input document
        input: PathBuf,

        /// Input format (detected from the content when omitted)
        #[arg(short, long)]
        format: Option<DocumentFormat>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Show where configuration files are searched
    Path,
    /// Write a commented configuration file to the current directory
    Init,
    /// Print the JSON Schema of the configuration file
    Schema {
        /// Write the schema to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(code) if code == exit_codes::SUCCESS => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn load_config(cli: &Cli, overrides: &AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    let report = ReportOptions {
        format: cli.report_format,
        file: cli.report_file.clone(),
        quiet: cli.quiet,
    };

    match &cli.command {
        Commands::Export(args) => {
            let config = load_config(&cli, &args.overrides())?;
            cli::run_export(&cli.store, config, &args.id, args.output.clone(), args.format, &report)
        }

        Commands::ExportProject(args) => {
            let config = load_config(&cli, &args.overrides())?;
            cli::run_export_project(
                &cli.store,
                config,
                &args.id,
                args.output.clone(),
                args.format,
                &report,
            )
        }

        Commands::Import(args) => {
            let mut builder = AppConfig::builder().persist_documents(!args.no_persist);
            if let Some(depth) = args.max_depth {
                builder = builder.max_depth(depth);
            }
            let config = load_config(&cli, &builder.build())?;
            let options = ImportOptions {
                format: args.format,
                new_version: args.new_version.clone(),
                existing_release_id: args.release.clone(),
            };
            cli::run_import(&cli.store, config, &args.input, args.target, &options, &report)
        }

        Commands::Prepare { input, format } => {
            let config = load_config(&cli, &AppConfig::default())?;
            cli::run_prepare(config, input, *format, &report)
        }

        Commands::Verify { input, format } => {
            let config = load_config(&cli, &AppConfig::default())?;
            cli::run_verify(&config, input, *format, &report)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "sbom-interchange", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config(&cli, action),
    }
}

fn run_config(cli: &Cli, action: &ConfigAction) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = sbom_interchange::config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 2] = [
                std::env::current_dir().ok().map(|p| p.display().to_string()),
                ::dirs::config_dir().map(|p| p.join("sbom-interchange").display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match sbom_interchange::config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".sbom-interchange.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = sbom_interchange::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
        ConfigAction::Schema { output } => {
            let schema = sbom_interchange::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
        }
    }
    Ok(exit_codes::SUCCESS)
}
