//! Interpret command implementation.

use anyhow::{Context, Result};
use console::style;

use arvak_chem::{AlgorithmResult, GroundStateResult, TransformedProblem};

use super::common::load;

/// Execute the interpret command.
pub fn execute(problem_path: &str, result_path: &str, format: &str) -> Result<()> {
    let problem: TransformedProblem = load(problem_path)
        .with_context(|| format!("Failed to load transformed problem: {problem_path}"))?;
    let algorithm_result: AlgorithmResult = load(result_path)
        .with_context(|| format!("Failed to load algorithm result: {result_path}"))?;

    let result = interpret(&problem, algorithm_result)?;

    match format.to_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "text" => {
            println!(
                "{} Interpreted result for {} qubits",
                style("✓").green().bold(),
                problem.num_qubits()
            );
            println!();
            println!("{result}");
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: text, json"),
    }

    Ok(())
}

/// Map an eigensolver result back onto the molecule.
pub fn interpret(
    problem: &TransformedProblem,
    algorithm_result: AlgorithmResult,
) -> Result<GroundStateResult> {
    Ok(problem
        .interpreter
        .process_algorithm_result(algorithm_result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arvak_chem::{FermionicTransformation, MinimumEigensolverResult, MolecularData};
    use ndarray::{Array2, Array4};
    use num_complex::Complex64;

    fn problem() -> TransformedProblem {
        let h = Array2::from_shape_vec((2, 2), vec![-1.25, 0.0, 0.0, -0.47]).unwrap();
        let eri = Array4::from_elem((2, 2, 2, 2), 0.1);
        let molecule = MolecularData::from_spatial_integrals(&h, &eri, 1, 1)
            .unwrap()
            .with_nuclear_repulsion_energy(0.7);
        FermionicTransformation::default().transform(&molecule).unwrap()
    }

    #[test]
    fn test_interpret_adds_nuclear_repulsion() {
        let result = interpret(
            &problem(),
            AlgorithmResult::MinimumEigensolver(MinimumEigensolverResult {
                eigenvalue: Complex64::new(-1.5, 0.0),
                aux_operator_eigenvalues: None,
            }),
        )
        .unwrap();
        assert!((result.total_energy() + 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_problem_survives_json() {
        let problem = problem();
        let json = serde_json::to_string(&problem).unwrap();
        let back: TransformedProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.num_qubits(), problem.num_qubits());
        assert_eq!(back.molecule_info, problem.molecule_info);
        assert_eq!(back.symmetry_state, problem.symmetry_state);
        assert_eq!(back.aux_ops.len(), problem.aux_ops.len());
    }
}
