//! Patient and doctor entities.
//!
//! Both entities embed a [`Person`] by value. Nothing is overridden between them, so there is
//! no trait hierarchy: shared identity lives in `Person`, and each entity adds its own fields.

use clinic_types::{DoctorId, Ssn};
use serde::{Deserialize, Serialize};

/// Identity fields shared by patients and doctors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub ssn: Ssn,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, ssn: Ssn) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ssn,
        }
    }
}

/// Renders `LAST FIRST (SSN)`.
impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.last_name, self.first_name, self.ssn)
    }
}

/// A registered clinic patient, identified by SSN.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(flatten)]
    pub person: Person,
}

impl Patient {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, ssn: Ssn) -> Self {
        Self {
            person: Person::new(first_name, last_name, ssn),
        }
    }

    pub fn ssn(&self) -> &Ssn {
        &self.person.ssn
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.person, f)
    }
}

/// A doctor working at the clinic, identified by badge ID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(flatten)]
    pub person: Person,
    pub id: DoctorId,
    /// Free-form specialization name (for example "Cardiology"). Not required to be non-empty.
    pub specialization: String,
}

impl Doctor {
    pub fn new(person: Person, id: DoctorId, specialization: impl Into<String>) -> Self {
        Self {
            person,
            id,
            specialization: specialization.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.person.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.person.last_name
    }
}

/// Renders `LAST FIRST (SSN) [ID]: SPECIALIZATION`.
impl std::fmt::Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.person, self.id, self.specialization)
    }
}
