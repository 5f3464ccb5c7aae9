// SPDX-License-Identifier: PMPL-1.0-or-later

//! l10n-gen: generate typed Rust translation accessors from locale files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use l10n_gen::Options;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "l10n-gen")]
#[command(version)]
#[command(about = "Generate strongly-typed Rust translation accessors from nested locale files")]
#[command(long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the translation source file
    Generate {
        #[command(flatten)]
        options: OptionArgs,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load and validate translations without writing anything
    Check {
        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Options file (YAML or JSON); flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the translation files
    #[arg(short, long, value_name = "DIR")]
    import_path: Option<PathBuf>,

    /// Generated source file
    #[arg(short, long, value_name = "FILE")]
    export_path: Option<PathBuf>,

    /// Encoding label of the input files
    #[arg(long)]
    encoding: Option<String>,

    /// Encoding label of the generated file
    #[arg(long)]
    export_encoding: Option<String>,

    /// Prefix of generated trait and struct names
    #[arg(long)]
    base_name: Option<String>,

    /// Keep key names as written instead of converting their case
    #[arg(long)]
    no_convert: bool,

    /// Name of the generated back-reference trait
    #[arg(long)]
    base_class_name: Option<String>,

    /// Name of the generated locale enum
    #[arg(long)]
    enum_class_name: Option<String>,

    /// Extra `use` path for the generated header (repeatable)
    #[arg(long = "import", value_name = "PATH")]
    imports: Vec<String>,
}

impl OptionArgs {
    fn resolve(self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)
                .with_context(|| format!("failed to load options from {}", path.display()))?,
            None => Options::default(),
        };
        if let Some(path) = self.import_path {
            options.import_path = path;
        }
        if let Some(path) = self.export_path {
            options.export_path = path;
        }
        if let Some(label) = self.encoding {
            options.encoding = label;
        }
        if let Some(label) = self.export_encoding {
            options.export_encoding = label;
        }
        if let Some(name) = self.base_name {
            options.base_name = name;
        }
        if self.no_convert {
            options.convert = false;
        }
        if let Some(name) = self.base_class_name {
            options.base_class_name = name;
        }
        if let Some(name) = self.enum_class_name {
            options.enum_class_name = name;
        }
        if !self.imports.is_empty() {
            options.imports = self.imports;
        }
        Ok(options)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate { options, json } => {
            let options = options.resolve()?;
            if !json {
                println!(
                    "Generating translations from: {}",
                    options.import_path.display()
                );
            }
            let summary = l10n_gen::run(&options).context("generation failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("\n{}", "Generation Summary:".bold());
                println!("  Output:  {}", summary.export_path.display());
                println!("  Locales: {}", summary.locales.join(", "));
                println!("  Files:   {}", summary.files);
                println!("  Bytes:   {}", summary.bytes);
                println!("{}", "done".green());
            }
        }

        Commands::Check { options } => {
            let options = options.resolve()?;
            println!("Checking translations in: {}", options.import_path.display());
            let (catalog, files) =
                l10n_gen::load_catalog(&options).context("translations are inconsistent")?;
            // Emission catches shape and identifier problems the validator does not.
            l10n_gen::emit::emit(&catalog, &options).context("translations cannot be emitted")?;

            println!("\n{}", "Check Summary:".bold());
            println!("  Files:   {}", files);
            println!("  Locales: {}", catalog.locale_keys().join(", "));
            println!(
                "  Schema:  {}",
                if catalog.has_supplied_abstract() {
                    "supplied"
                } else {
                    "synthesized"
                }
            );
            println!("{}", "ok".green());
        }
    }

    Ok(())
}
