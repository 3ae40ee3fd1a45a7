//! Constants used throughout the clinic core crate.
//!
//! This module contains the ingestion line grammar and configuration keys so that the
//! loader, the configuration layer and the runner agree on them.

/// Separator between fields of an ingestion line.
pub const FIELD_SEPARATOR: char = ';';

/// Leading character of a patient line (`P;first;last;ssn`).
pub const PATIENT_TAG: char = 'P';

/// Leading character of a doctor line (`M;id;first;last;ssn;specialization`).
pub const DOCTOR_TAG: char = 'M';

/// Number of fields in a patient line, tag included.
pub const PATIENT_FIELD_COUNT: usize = 4;

/// Number of fields in a doctor line, tag included.
pub const DOCTOR_FIELD_COUNT: usize = 6;

/// Environment variable selecting how malformed doctor IDs are handled during ingestion.
pub const INVALID_ID_POLICY_ENV: &str = "CLINIC_INVALID_ID_POLICY";
