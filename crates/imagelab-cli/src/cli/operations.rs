//! The `imagelab operations` command.

use imagelab_core::OperationId;

/// One line per supported operation: identifier, then label.
pub fn catalog_lines() -> Vec<String> {
    OperationId::ALL
        .iter()
        .map(|id| format!("{:<10} {}", id.as_str(), id.label()))
        .collect()
}

/// Execute the operations command.
pub fn execute() -> anyhow::Result<()> {
    for line in catalog_lines() {
        println!("{line}");
    }
    Ok(())
}
