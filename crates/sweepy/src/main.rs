use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use sweepy::catalogue::{builtin, describe};
use sweepy::{RunOptions, SweepFile, TextRenderer, format_outcome, init_logging};
use sweepy_core::Delivery;

#[derive(Parser, Debug)]
#[command(name = "sweepy")]
#[command(about = "Sweep a numeric model across a grid of parameter values")]
struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the sweep described in a YAML file
    Run {
        file: PathBuf,

        /// Override the number of repetitions
        #[arg(long)]
        reps: Option<usize>,

        /// Persist results to this directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Create the output directory if it does not exist
        #[arg(long)]
        ensure_dir: bool,

        /// Extension for saved plots
        #[arg(long)]
        file_type: Option<String>,

        /// Skip drawing plots
        #[arg(long)]
        no_graphs: bool,

        /// Evaluate grid points on all cores
        #[arg(long)]
        parallel: bool,
    },
    /// List the built-in models
    Models,
    /// Print a persisted sweep
    Show { dir: PathBuf },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    match args.command {
        Command::Run {
            file,
            reps,
            output_dir,
            ensure_dir,
            file_type,
            no_graphs,
            parallel,
        } => {
            let mut sweep_file = SweepFile::load(&file)
                .wrap_err_with(|| format!("failed to read sweep file {}", file.display()))?;
            let options = RunOptions {
                reps,
                output_dir,
                ensure_dir,
                file_type,
                graphs: !no_graphs,
                parallel,
            };
            options.apply(&mut sweep_file);

            let mut renderer = TextRenderer::default();
            let delivery = sweepy::run_file(&sweep_file, &builtin(), &options, Some(&mut renderer))
                .wrap_err_with(|| format!("sweep of model '{}' failed", sweep_file.model))?;

            match delivery {
                Delivery::Returned(outcome) => print!("{}", format_outcome(&outcome)),
                Delivery::Persisted(location) => {
                    println!("results written to {}", location.display())
                }
            }
        }
        Command::Models => {
            let registry = builtin();
            for name in registry.names() {
                println!("{name:<12} {}", describe(name));
            }
        }
        Command::Show { dir } => {
            let summary = sweepy::show(&dir)
                .wrap_err_with(|| format!("failed to load sweep results from {}", dir.display()))?;
            print!("{summary}");
        }
    }

    Ok(())
}
