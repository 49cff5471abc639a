//! Arvak chemistry command-line interface.
//!
//! Turns molecular integrals into qubit Hamiltonians and interprets
//! eigensolver output against them.
//!
//! ```text
//! arvak-chem transform -i h2.json --mapping jordan_wigner --z2 auto -o h2_problem.json
//! arvak-chem interpret -p h2_problem.json -r vqe_result.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{interpret, transform, version};

/// Arvak Chem - fermionic-to-qubit transformation of molecular Hamiltonians
#[derive(Parser)]
#[command(name = "arvak-chem")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform molecular data into a qubit problem
    Transform {
        /// Molecular data (JSON)
        #[arg(short, long)]
        input: String,

        /// Transformation config (YAML or JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Output file for the transformed problem (JSON or YAML)
        #[arg(short, long)]
        output: Option<String>,

        /// Qubit mapping (jordan_wigner, parity, bravyi_kitaev)
        #[arg(short, long)]
        mapping: Option<String>,

        /// Fermionic picture (full, particle_hole)
        #[arg(short, long)]
        transformation: Option<String>,

        /// Disable the parity two-qubit reduction
        #[arg(long)]
        no_two_qubit_reduction: bool,

        /// Freeze core orbitals
        #[arg(long)]
        freeze_core: bool,

        /// Orbitals to freeze or remove, e.g. "-1,-2"
        #[arg(long, allow_hyphen_values = true, value_delimiter = ',')]
        orbital_reduction: Vec<i64>,

        /// Z2 tapering: "auto" or comma-separated tapering values
        #[arg(long, allow_hyphen_values = true)]
        z2: Option<String>,
    },

    /// Interpret an eigensolver result against a transformed problem
    Interpret {
        /// Transformed problem written by `transform`
        #[arg(short, long)]
        problem: String,

        /// Algorithm result (JSON)
        #[arg(short, long)]
        result: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Transform {
            input,
            config,
            output,
            mapping,
            transformation,
            no_two_qubit_reduction,
            freeze_core,
            orbital_reduction,
            z2,
        } => {
            let overrides = transform::Overrides {
                mapping,
                transformation,
                no_two_qubit_reduction,
                freeze_core,
                orbital_reduction,
                z2,
            };
            transform::execute(&input, config.as_deref(), output.as_deref(), &overrides)
        }

        Commands::Interpret {
            problem,
            result,
            format,
        } => interpret::execute(&problem, &result, &format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transform() {
        let cli = Cli::try_parse_from([
            "arvak-chem",
            "-vv",
            "transform",
            "-i",
            "h2.json",
            "--mapping",
            "jordan_wigner",
            "--orbital-reduction",
            "-1,2",
            "--z2",
            "1,-1",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Transform {
                input,
                orbital_reduction,
                z2,
                freeze_core,
                ..
            } => {
                assert_eq!(input, "h2.json");
                assert_eq!(orbital_reduction, vec![-1, 2]);
                assert_eq!(z2.as_deref(), Some("1,-1"));
                assert!(!freeze_core);
            }
            _ => panic!("expected transform"),
        }
    }

    #[test]
    fn test_parse_interpret_requires_result() {
        assert!(Cli::try_parse_from(["arvak-chem", "interpret", "-p", "p.json"]).is_err());
    }
}
