//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use arvak_chem::TransformationType;
use arvak_fermion::QubitMappingType;

/// Parse a qubit mapping name.
pub fn parse_mapping(name: &str) -> Result<QubitMappingType> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "jordan_wigner" | "jw" => Ok(QubitMappingType::JordanWigner),
        "parity" => Ok(QubitMappingType::Parity),
        "bravyi_kitaev" | "bk" => Ok(QubitMappingType::BravyiKitaev),
        other => anyhow::bail!(
            "Unknown mapping: '{other}'. Available: jordan_wigner, parity, bravyi_kitaev"
        ),
    }
}

/// Parse a fermionic picture name.
pub fn parse_transformation(name: &str) -> Result<TransformationType> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "full" => Ok(TransformationType::Full),
        "particle_hole" | "ph" => Ok(TransformationType::ParticleHole),
        other => anyhow::bail!("Unknown transformation: '{other}'. Available: full, particle_hole"),
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_lowercase().as_str(), "yaml" | "yml"))
}

/// Load a value from a JSON or YAML file, chosen by extension.
pub fn load<T: DeserializeOwned>(path: &str) -> Result<T> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    if is_yaml(path_obj) {
        serde_yaml_ng::from_str(&source).with_context(|| format!("Invalid YAML in {path}"))
    } else {
        serde_json::from_str(&source).with_context(|| format!("Invalid JSON in {path}"))
    }
}

/// Write a value as JSON or YAML, chosen by extension.
pub fn save<T: Serialize>(value: &T, path: &str) -> Result<()> {
    let contents = if is_yaml(Path::new(path)) {
        serde_yaml_ng::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    fs::write(path, contents).with_context(|| format!("Failed to write file: {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping() {
        assert_eq!(parse_mapping("jw").unwrap(), QubitMappingType::JordanWigner);
        assert_eq!(parse_mapping("Parity").unwrap(), QubitMappingType::Parity);
        assert_eq!(
            parse_mapping("bravyi-kitaev").unwrap(),
            QubitMappingType::BravyiKitaev
        );
        assert!(parse_mapping("bogus").is_err());
    }

    #[test]
    fn test_parse_transformation() {
        assert_eq!(parse_transformation("full").unwrap(), TransformationType::Full);
        assert_eq!(
            parse_transformation("particle_hole").unwrap(),
            TransformationType::ParticleHole
        );
        assert!(parse_transformation("half").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load::<serde_json::Value>("/nonexistent/molecule.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_yaml_by_extension() {
        assert!(is_yaml(Path::new("problem.yaml")));
        assert!(is_yaml(Path::new("problem.YML")));
        assert!(!is_yaml(Path::new("problem.json")));
    }
}
