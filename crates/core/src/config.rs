//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the registry. The registry itself never reads environment variables, which keeps
//! behaviour stable across test harnesses.

use crate::{ClinicError, ClinicResult};

/// What ingestion does with an `M` line whose ID field is not an integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvalidDoctorIdPolicy {
    /// Stop the whole ingestion call with [`ClinicError::InvalidDoctorId`].
    #[default]
    Abort,
    /// Treat the line like any other malformed line and keep going.
    Skip,
}

impl std::str::FromStr for InvalidDoctorIdPolicy {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(ClinicError::InvalidInput(format!(
                "unknown invalid doctor id policy '{other}' (expected 'abort' or 'skip')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClinicConfig {
    invalid_doctor_id: InvalidDoctorIdPolicy,
}

impl ClinicConfig {
    pub fn new(invalid_doctor_id: InvalidDoctorIdPolicy) -> Self {
        Self { invalid_doctor_id }
    }

    pub fn invalid_doctor_id(&self) -> InvalidDoctorIdPolicy {
        self.invalid_doctor_id
    }
}

/// Parse the invalid doctor ID policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default policy.
pub fn invalid_doctor_id_policy_from_env_value(
    value: Option<String>,
) -> ClinicResult<InvalidDoctorIdPolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value
        .map(|v| v.parse::<InvalidDoctorIdPolicy>())
        .transpose()?;

    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_aborts() {
        assert_eq!(
            ClinicConfig::default().invalid_doctor_id(),
            InvalidDoctorIdPolicy::Abort
        );
    }

    #[test]
    fn env_value_missing_or_blank_uses_default() {
        assert_eq!(
            invalid_doctor_id_policy_from_env_value(None).unwrap(),
            InvalidDoctorIdPolicy::Abort
        );
        assert_eq!(
            invalid_doctor_id_policy_from_env_value(Some("   ".into())).unwrap(),
            InvalidDoctorIdPolicy::Abort
        );
    }

    #[test]
    fn env_value_is_case_insensitive_and_trimmed() {
        assert_eq!(
            invalid_doctor_id_policy_from_env_value(Some(" Skip ".into())).unwrap(),
            InvalidDoctorIdPolicy::Skip
        );
        assert_eq!(
            invalid_doctor_id_policy_from_env_value(Some("ABORT".into())).unwrap(),
            InvalidDoctorIdPolicy::Abort
        );
    }

    #[test]
    fn env_value_rejects_unknown_policy() {
        let err = invalid_doctor_id_policy_from_env_value(Some("ignore".into()))
            .expect_err("should reject unknown policy");
        assert!(matches!(err, ClinicError::InvalidInput(msg) if msg.contains("ignore")));
    }
}
