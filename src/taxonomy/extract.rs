//! Operation extraction: group manifest to canonical identifiers.

use std::collections::BTreeSet;

use crate::error::{ConfigError, Result};
use crate::operation::{OperationId, is_valid_part};

use super::ErrorGroup;

/// Expands a group into every identifier it declares.
///
/// Nothing is filtered here; ignore-list handling happens in the verifier.
/// Repeated operation names collapse to a single identifier. A group whose
/// name or any operation name cannot form a canonical identifier is a fatal
/// configuration error rather than a skipped group.
pub fn extract_operations(group: &ErrorGroup) -> Result<BTreeSet<OperationId>> {
    let name = group.name();
    if !is_valid_part(name) {
        return Err(ConfigError::malformed_group(
            name,
            "group name must be non-empty and must not contain `#`",
        ));
    }

    group
        .operations()
        .iter()
        .map(|operation| {
            if is_valid_part(operation) {
                Ok(OperationId::from_valid_parts(name, operation))
            } else {
                Err(ConfigError::malformed_group(
                    name,
                    format!("operation name `{operation}` must be non-empty and must not contain `#`"),
                ))
            }
        })
        .collect()
}
