use crate::config::SuspicionPolicy;
use crate::error::{QwError, QwResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads a JSON policy file. Keys left out fall back to the canonical values.
pub fn load_policy<P: AsRef<Path>>(path: P) -> QwResult<SuspicionPolicy> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let policy: SuspicionPolicy = serde_json::from_str(&content)?;
    validate_policy(&policy)?;

    info!(
        "Loaded suspicion policy from {:?} (fingerprint {})",
        path,
        &policy.fingerprint()[..12]
    );
    Ok(policy)
}

pub fn validate_policy(policy: &SuspicionPolicy) -> QwResult<()> {
    policy
        .validate()
        .map_err(|e| QwError::Validation(format!("Invalid suspicion policy: {}", e)))
}
