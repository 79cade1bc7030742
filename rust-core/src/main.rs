use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use nalgebra::Vector3;
use serde::Serialize;

use ebsd_orientation::prelude::*;
use ebsd_orientation::symmetries::find_symmetry_operator;

#[derive(Parser)]
#[command(name = "ebsd-orient")]
#[command(about = "Cubic orientation toolkit for EBSD data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 24 cubic symmetry operators
    Symmetry,
    /// Convert an Euler triple (degrees) to its rotation matrix
    Euler {
        /// phi1, Phi, phi2 in degrees
        #[arg(value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
        angles: Vec<f64>,

        /// Euler convention (zxz/bunge or xyz)
        #[arg(short, long, default_value = "zxz")]
        convention: String,
    },
    /// Misorientation between two Euler triples (degrees)
    Misorientation {
        /// First triple: phi1,Phi,phi2
        #[arg(long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
        first: Vec<f64>,

        /// Second triple: phi1,Phi,phi2
        #[arg(long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
        second: Vec<f64>,

        /// Ignore cubic symmetry
        #[arg(long)]
        no_symmetry: bool,

        #[arg(short, long, default_value = "zxz")]
        convention: String,
    },
    /// Variants of an orientation relationship
    Variants {
        /// Named relationship
        #[arg(short, long, value_enum, default_value = "ks")]
        relationship: NamedRelationship,

        /// Parent plane, parent direction, child plane, child direction (12 values);
        /// overrides --relationship
        #[arg(long, value_delimiter = ',', num_args = 12, allow_negative_numbers = true)]
        custom: Option<Vec<f64>>,

        /// Keep the first member of each equivalence class
        #[arg(long)]
        first_of_class: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NamedRelationship {
    /// Kurdjumov-Sachs
    Ks,
    /// Nishiyama-Wassermann
    Nw,
}

#[derive(Serialize)]
struct MatrixReport {
    index: usize,
    rows: [[f64; 3]; 3],
}

fn rows(m: &RotationMatrix) -> [[f64; 3]; 3] {
    [0, 1, 2].map(|i| [m[(i, 0)], m[(i, 1)], m[(i, 2)]])
}

fn print_matrices(title: &str, matrices: &[RotationMatrix], json: bool) -> Result<()> {
    if json {
        let report: Vec<MatrixReport> = matrices
            .iter()
            .enumerate()
            .map(|(index, m)| MatrixReport {
                index,
                rows: rows(m),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("{} ({})", title, matrices.len());
    for (index, m) in matrices.iter().enumerate() {
        println!("[{}]", index);
        for row in rows(m) {
            println!("  {:>9.6} {:>9.6} {:>9.6}", row[0], row[1], row[2]);
        }
    }
    Ok(())
}

fn triple(values: &[f64]) -> Result<EulerAngles> {
    match values {
        [phi1, phi, phi2] => Ok(EulerAngles::from_degrees(*phi1, *phi, *phi2)),
        _ => bail!("expected three Euler angles, got {}", values.len()),
    }
}

fn custom_specification(values: &[f64]) -> Result<OrSpecification> {
    if values.len() != 12 {
        bail!("expected 12 values for a custom relationship, got {}", values.len());
    }
    let v = |k: usize| Vector3::new(values[3 * k], values[3 * k + 1], values[3 * k + 2]);
    Ok(OrSpecification::new(v(0), v(1), v(2), v(3)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!("Thread count specified but parallel feature not enabled. Ignoring {}.", threads);
        }
    }

    info!("Starting ebsd-orient v{}", ebsd_orientation::VERSION);

    match cli.command {
        Commands::Symmetry => print_matrices(
            "Cubic symmetry operators",
            cubic_symmetry_operators(),
            cli.json,
        ),
        Commands::Euler { angles, convention } => {
            let convention: EulerConvention = convention.parse()?;
            let r = euler_to_matrix(&triple(&angles)?, convention);
            print_matrices("Rotation matrix (crystal -> sample)", &[r], cli.json)
        }
        Commands::Misorientation {
            first,
            second,
            no_symmetry,
            convention,
        } => {
            let convention: EulerConvention = convention.parse()?;
            // Symmetry acts on sample -> crystal matrices
            let a = euler_to_matrix(&triple(&first)?, convention).transpose();
            let b = euler_to_matrix(&triple(&second)?, convention).transpose();
            let angle = misorientation_angle(&a, &b, !no_symmetry, AngleUnit::Degrees);
            if cli.json {
                println!("{}", serde_json::json!({ "misorientation_deg": angle }));
            } else {
                println!("Misorientation: {:.6} deg", angle);
            }
            Ok(())
        }
        Commands::Variants {
            relationship,
            custom,
            first_of_class,
        } => {
            let specification = match custom {
                Some(values) => custom_specification(&values)?,
                None => match relationship {
                    NamedRelationship::Ks => OrSpecification::kurdjumov_sachs(),
                    NamedRelationship::Nw => OrSpecification::nishiyama_wassermann(),
                },
            };
            let mut config = OrConfig::default();
            if first_of_class {
                config.reduction.selection = VariantSelection::FirstOfClass;
            }
            let variants = orientation_relationship(&specification, &config)?;
            if variants.iter().any(|v| find_symmetry_operator(v, 1e-9).is_some()) {
                warn!("Relationship contains a pure symmetry operator (trivial relationship)");
            }
            print_matrices("Variants", &variants, cli.json)
        }
    }
}
