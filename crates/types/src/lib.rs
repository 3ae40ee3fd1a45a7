//! Identifier types shared across the clinic crates.
//!
//! Patients are keyed by their social security number and doctors by a numeric badge ID. Both
//! are wrapped in newtypes so the registry cannot confuse one key space with the other.
//!
//! Neither type validates its content beyond what the key needs: an SSN is an opaque string,
//! and a doctor ID is any 32-bit signed integer.

/// Errors that can occur when creating identifier types.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// The input could not be parsed as a doctor ID
    #[error("invalid doctor id '{value}': {source}")]
    InvalidDoctorId {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// A social security number used as a patient (and person) identifier.
///
/// The value is kept exactly as supplied. Callers that read SSNs from text are expected to
/// trim them first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ssn(String);

impl Ssn {
    /// Creates a new `Ssn` from the given input.
    pub fn new(input: impl Into<String>) -> Self {
        Self(input.into())
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ssn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ssn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Ssn {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ssn {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Ssn {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl serde::Serialize for Ssn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Ssn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Ssn)
    }
}

/// Externally assigned badge number of a doctor.
///
/// IDs are never generated by the registry; they arrive through registration calls or the
/// `M` lines of an ingestion stream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct DoctorId(i32);

impl DoctorId {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for DoctorId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for DoctorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DoctorId {
    type Err = TypesError;

    /// Parses a decimal doctor ID. An optional leading `+` or `-` is accepted; surrounding
    /// whitespace is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(DoctorId)
            .map_err(|source| TypesError::InvalidDoctorId {
                value: s.to_owned(),
                source,
            })
    }
}
