//! Transform command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use arvak_chem::{
    AuxiliaryKind, Driver, FermionicTransformation, JsonDriver, TransformationConfig,
    TransformedProblem, Z2SymmetryReduction,
};

use super::common::{parse_mapping, parse_transformation, save};

/// Command-line settings applied on top of the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub mapping: Option<String>,
    pub transformation: Option<String>,
    pub no_two_qubit_reduction: bool,
    pub freeze_core: bool,
    pub orbital_reduction: Vec<i64>,
    pub z2: Option<String>,
}

impl Overrides {
    /// Apply these settings to a base config.
    pub fn apply(&self, mut config: TransformationConfig) -> Result<TransformationConfig> {
        if let Some(mapping) = &self.mapping {
            config = config.with_qubit_mapping(parse_mapping(mapping)?);
        }
        if let Some(transformation) = &self.transformation {
            config = config.with_transformation(parse_transformation(transformation)?);
        }
        if self.no_two_qubit_reduction {
            config = config.with_two_qubit_reduction(false);
        }
        if self.freeze_core {
            config = config.with_freeze_core(true);
        }
        if !self.orbital_reduction.is_empty() {
            config = config.with_orbital_reduction(self.orbital_reduction.clone());
        }
        if let Some(z2) = &self.z2 {
            let reduction: Z2SymmetryReduction = z2
                .parse()
                .with_context(|| format!("Invalid Z2 reduction: {z2}"))?;
            config = config.with_z2symmetry_reduction(reduction);
        }
        Ok(config)
    }
}

/// Execute the transform command.
pub fn execute(
    input: &str,
    config_path: Option<&str>,
    output: Option<&str>,
    overrides: &Overrides,
) -> Result<()> {
    let base = match config_path {
        Some(path) => TransformationConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {path}"))?,
        None => TransformationConfig::default(),
    };
    let transformation = FermionicTransformation::new(overrides.apply(base)?);
    let config = transformation.config();

    println!(
        "{} Loading molecule from {}",
        style("→").cyan().bold(),
        style(input).green()
    );
    let driver = JsonDriver::new(input);
    let molecule = driver
        .run()
        .with_context(|| format!("Failed to load molecule: {input}"))?;
    println!(
        "  {} spatial orbitals, {} alpha / {} beta electrons{}",
        molecule.num_orbitals,
        molecule.num_alpha,
        molecule.num_beta,
        if molecule.has_dipole_integrals() { ", dipole integrals" } else { "" }
    );

    println!(
        "{} Transforming ({}, {})",
        style("→").cyan().bold(),
        style(config.qubit_mapping).yellow(),
        config.transformation
    );
    info!(?config, "Transformation config");

    let problem = transformation.transform(&molecule)?;
    print_summary(&problem);

    if let Some(path) = output {
        save(&problem, path)?;
        println!(
            "{} Problem written to {}",
            style("✓").green().bold(),
            style(path).green()
        );
    }

    Ok(())
}

fn print_summary(problem: &TransformedProblem) {
    let info = &problem.molecule_info;
    println!();
    println!("{}", style("Qubit Problem:").bold());
    println!("  Qubits:          {}", problem.num_qubits());
    println!("  Pauli terms:     {}", problem.qubit_op.n_terms());
    println!(
        "  Particles:       {} alpha / {} beta",
        info.num_particles[0], info.num_particles[1]
    );
    println!("  Spin-orbitals:   {}", info.num_orbitals);
    println!("  2-qubit reduced: {}", info.two_qubit_reduction);
    println!("  Symmetry:        {}", problem.symmetry_state);
    if !info.z2_symmetries.is_empty() {
        let generators: Vec<String> = info
            .z2_symmetries
            .symmetries()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("  Z2 generators:   {}", generators.join(", "));
        if let Some(values) = info.z2_symmetries.tapering_values() {
            println!("  Tapering values: {values:?}");
        }
    }
    println!(
        "  Energy shift:    {:.10}",
        problem.interpreter.ledger().energy.total()
    );

    println!();
    println!("{}", style("Auxiliary Operators:").bold());
    for kind in AuxiliaryKind::ALL {
        if let Some(aux) = problem.aux_ops.get(kind.slot()) {
            match aux.as_op() {
                Some(op) => println!("  {:<20} {} terms", kind.name(), op.n_terms()),
                None => println!("  {:<20} {}", kind.name(), style("discarded").dim()),
            }
        }
    }
}
