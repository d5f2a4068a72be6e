use clap::{Parser, Subcommand};
use cmds::analyze::ModelOutputFormat;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cmds;

#[derive(Parser)]
#[command(name = "proxy-gen")]
#[command(about = "Companion proxy generator for UnsafeAccessor-based member forwarding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate proxy sources from declaration manifests */
    Generate {
        /* Input YAML declaration manifests */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported manifests */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Output directory for generated code (overrides the config file) */
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /* Optional proxy-gen.yaml configuration file */
        #[arg(long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /* Emit an implicit conversion from the subject to its proxy */
        #[arg(long = "implicit-conversion")]
        implicit_conversion: bool,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /* Print the extracted member models */
    Analyze {
        /* Input YAML declaration manifests */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported manifests */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Format to use when printing member models */
        #[arg(long = "format", value_enum, default_value = "json")]
        format: ModelOutputFormat,

        /* Print the generated proxy source for a specific subject */
        #[arg(long = "print-proxy", value_name = "NAME")]
        print_proxy: Option<String>,

        /* Optional proxy-gen.yaml configuration file used by --print-proxy */
        #[arg(long = "config", value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    /* RUST_LOG wins; -v only raises the fallback level */
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            files,
            include_dirs,
            output_dir,
            config,
            implicit_conversion,
            verbose,
        } => {
            init_tracing(verbose);
            let args = cmds::generate::GenerateArgs {
                files,
                include_dirs,
                output_dir,
                config,
                implicit_conversion,
                verbose,
            };
            let succeeded = cmds::generate::run(args)?;
            if !succeeded {
                std::process::exit(1);
            }
        }

        Commands::Analyze {
            files,
            include_dirs,
            format,
            print_proxy,
            config,
        } => {
            init_tracing(false);
            cmds::analyze::run(files, include_dirs, format, print_proxy, config)?;
        }
    }

    Ok(())
}
