//! The clinic registry.
//!
//! [`Clinic`] owns every patient, every doctor and the assignment relation between them.
//! Entities are only created through registration and are never removed.
//!
//! ## Assignment relation
//!
//! Assignments are kept as an adjacency map from doctor ID to the ordered list of assigned
//! patient SSNs:
//!
//! ```text
//! 14 -> [THEPAT01, THEPAT02, THEPAT01]
//! 27 -> []
//! ```
//!
//! - every registered doctor has an entry, possibly empty
//! - lists preserve assignment order and may contain the same SSN more than once
//! - a patient may appear under several doctors
//! - (re-)registering a doctor resets its entry to empty
//!
//! All maps are ordered, so whenever a query has to pick "the first" doctor it picks the one
//! with the lowest ID.

use crate::config::ClinicConfig;
use crate::error::{ClinicError, ClinicResult, NoSuchDoctor};
use crate::person::{Doctor, Patient, Person};
use clinic_types::{DoctorId, Ssn};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct Clinic {
    cfg: ClinicConfig,
    patients: BTreeMap<Ssn, Patient>,
    doctors: BTreeMap<DoctorId, Doctor>,
    assignments: BTreeMap<DoctorId, Vec<Ssn>>,
}

impl Clinic {
    /// Creates an empty registry using the given configuration.
    pub fn new(cfg: ClinicConfig) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.cfg
    }

    /// Registers a patient, replacing any patient already registered under `ssn`.
    ///
    /// Existing assignments refer to the SSN and therefore carry over to the new record.
    pub fn add_patient(&mut self, first: &str, last: &str, ssn: &str) {
        let patient = Patient::new(first, last, Ssn::from(ssn));
        if self.patients.insert(patient.ssn().clone(), patient).is_some() {
            tracing::debug!("replaced patient {}", ssn);
        } else {
            tracing::debug!("registered patient {}", ssn);
        }
    }

    /// Retrieves a patient formatted as `LAST FIRST (SSN)`.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NoSuchPatient`] if no patient has this SSN.
    pub fn get_patient(&self, ssn: &str) -> ClinicResult<String> {
        self.require_patient(ssn).map(Patient::to_string)
    }

    pub fn patient(&self, ssn: &str) -> Option<&Patient> {
        self.patients.get(ssn)
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Registers a doctor, replacing any doctor already registered under `id`.
    ///
    /// The doctor's assignment list is always reset to empty, including on re-registration.
    pub fn add_doctor(
        &mut self,
        first: &str,
        last: &str,
        ssn: &str,
        id: impl Into<DoctorId>,
        specialization: &str,
    ) {
        let id = id.into();
        let doctor = Doctor::new(Person::new(first, last, Ssn::from(ssn)), id, specialization);
        if self.doctors.insert(id, doctor).is_some() {
            tracing::debug!("replaced doctor {}, assignments reset", id);
        } else {
            tracing::debug!("registered doctor {}", id);
        }
        self.assignments.insert(id, Vec::new());
    }

    /// Retrieves a doctor formatted as `LAST FIRST (SSN) [ID]: SPECIALIZATION`.
    ///
    /// # Errors
    ///
    /// Returns [`NoSuchDoctor::Id`] if no doctor has this ID.
    pub fn get_doctor(&self, id: impl Into<DoctorId>) -> ClinicResult<String> {
        self.require_doctor(id.into()).map(Doctor::to_string)
    }

    pub fn doctor(&self, id: impl Into<DoctorId>) -> Option<&Doctor> {
        self.doctors.get(&id.into())
    }

    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }

    /// Appends a patient to a doctor's assignment list.
    ///
    /// The patient is checked before the doctor. Repeated assignments are recorded again.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::NoSuchPatient`] if the SSN is unknown
    /// - [`NoSuchDoctor::Id`] if the doctor ID is unknown
    pub fn assign_patient_to_doctor(
        &mut self,
        ssn: &str,
        id: impl Into<DoctorId>,
    ) -> ClinicResult<()> {
        let id = id.into();
        let ssn = self.require_patient(ssn)?.ssn().clone();
        self.require_doctor(id)?;

        tracing::debug!("assigning patient {} to doctor {}", ssn, id);
        self.assignments.entry(id).or_default().push(ssn);
        Ok(())
    }

    /// Returns the ID of the doctor the patient is assigned to.
    ///
    /// If the patient is assigned to more than one doctor, the lowest ID wins.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::NoSuchPatient`] if the SSN is unknown
    /// - [`NoSuchDoctor::Unassigned`] if no doctor has this patient
    pub fn get_assigned_doctor(&self, ssn: &str) -> ClinicResult<DoctorId> {
        let ssn = self.require_patient(ssn)?.ssn();

        self.assignments
            .iter()
            .find(|(_, assigned)| assigned.contains(ssn))
            .map(|(id, _)| *id)
            .ok_or_else(|| NoSuchDoctor::Unassigned(ssn.clone()).into())
    }

    /// Returns the SSNs assigned to a doctor in assignment order, duplicates included.
    ///
    /// # Errors
    ///
    /// Returns [`NoSuchDoctor::Id`] if no doctor has this ID.
    pub fn get_assigned_patients(&self, id: impl Into<DoctorId>) -> ClinicResult<Vec<Ssn>> {
        let id = id.into();
        self.require_doctor(id)?;
        Ok(self.assigned(id)?.to_vec())
    }

    /// Iterates over every doctor together with the length of its assignment list, in
    /// ascending ID order.
    pub(crate) fn doctors_with_counts(&self) -> impl Iterator<Item = (&Doctor, usize)> + '_ {
        self.doctors.values().map(|doctor| {
            let count = self.assignments.get(&doctor.id).map_or(0, Vec::len);
            (doctor, count)
        })
    }

    fn assigned(&self, id: DoctorId) -> Result<&[Ssn], NoSuchDoctor> {
        self.assignments
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(NoSuchDoctor::Unspecified)
    }

    fn require_patient(&self, ssn: &str) -> ClinicResult<&Patient> {
        self.patients
            .get(ssn)
            .ok_or_else(|| ClinicError::NoSuchPatient(Ssn::from(ssn)))
    }

    fn require_doctor(&self, id: DoctorId) -> ClinicResult<&Doctor> {
        self.doctors
            .get(&id)
            .ok_or_else(|| NoSuchDoctor::Id(id).into())
    }
}
