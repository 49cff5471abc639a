//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - molecular Hamiltonians as qubit problems",
        style("Arvak Chem").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  arvak-pauli     Pauli strings, sums and Z2 tapering");
    println!("  arvak-fermion   Fermionic operators and qubit encodings");
    println!("  arvak-chem      Fermionic-to-qubit transformation pipeline");
    println!("  arvak-chem-cli  Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
