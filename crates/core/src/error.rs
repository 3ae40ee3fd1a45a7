use clinic_types::{DoctorId, Ssn};

/// Failure to locate a doctor.
///
/// Lookups by ID, lookups by assigned patient, and internal relation lookups each carry
/// different context, so they are separate variants.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NoSuchDoctor {
    #[error("no doctor found with id: {0}")]
    Id(DoctorId),
    #[error("no doctor assigned for patient: {0}")]
    Unassigned(Ssn),
    #[error("no doctor found")]
    Unspecified,
}

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("no patient found with ssn: {0}")]
    NoSuchPatient(Ssn),
    #[error(transparent)]
    NoSuchDoctor(#[from] NoSuchDoctor),

    #[error("invalid doctor id on line {line}: {value:?}")]
    InvalidDoctorId {
        line: usize,
        value: String,
        #[source]
        source: clinic_types::TypesError,
    },
    #[error("failed to read clinic data: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
