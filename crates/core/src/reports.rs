//! Reporting queries over the clinic registry.
//!
//! Every report imposes a total order so results never depend on map iteration:
//!
//! | Report | Order |
//! |--------|-------|
//! | [`Clinic::idle_doctors`] | last name, then ID |
//! | [`Clinic::busy_doctors`] | ID |
//! | [`Clinic::doctor_loads`] | patient count descending, then ID |
//! | [`Clinic::specialization_loads`] | patient count descending, then specialization name |

use crate::clinic::Clinic;
use clinic_types::DoctorId;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// A doctor together with the number of assignments recorded for them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DoctorLoad {
    pub id: DoctorId,
    pub last_name: String,
    pub first_name: String,
    pub patients: usize,
}

/// Renders `### : ID LAST FIRST`, with the count zero-padded to three digits.
impl std::fmt::Display for DoctorLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:03} : {} {} {}",
            self.patients, self.id, self.last_name, self.first_name
        )
    }
}

/// Total assignments across all doctors sharing a specialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpecializationLoad {
    pub specialization: String,
    pub patients: usize,
}

/// Renders `### - SPECIALIZATION`.
impl std::fmt::Display for SpecializationLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03} - {}", self.patients, self.specialization)
    }
}

impl Clinic {
    /// IDs of doctors with no assigned patients, sorted by last name.
    pub fn idle_doctors(&self) -> Vec<DoctorId> {
        let mut idle: Vec<_> = self
            .doctors_with_counts()
            .filter(|(_, count)| *count == 0)
            .map(|(doctor, _)| doctor)
            .collect();
        idle.sort_by(|a, b| a.last_name().cmp(b.last_name()).then(a.id.cmp(&b.id)));
        idle.into_iter().map(|doctor| doctor.id).collect()
    }

    /// IDs of doctors whose assignment count is strictly above the average.
    ///
    /// The average only considers doctors with at least one patient. When no doctor has a
    /// patient the result is empty.
    pub fn busy_doctors(&self) -> Vec<DoctorId> {
        let (busy_doctors, total) = self
            .doctors_with_counts()
            .filter(|(_, count)| *count > 0)
            .fold((0usize, 0usize), |(doctors, total), (_, count)| {
                (doctors + 1, total + count)
            });

        if busy_doctors == 0 {
            return Vec::new();
        }
        let average = total as f64 / busy_doctors as f64;

        self.doctors_with_counts()
            .filter(|(_, count)| *count as f64 > average)
            .map(|(doctor, _)| doctor.id)
            .collect()
    }

    /// Every doctor with their patient count, busiest first.
    pub fn doctor_loads(&self) -> Vec<DoctorLoad> {
        let mut loads: Vec<DoctorLoad> = self
            .doctors_with_counts()
            .map(|(doctor, patients)| DoctorLoad {
                id: doctor.id,
                last_name: doctor.last_name().to_string(),
                first_name: doctor.first_name().to_string(),
                patients,
            })
            .collect();
        loads.sort_by_key(|load| (Reverse(load.patients), load.id));
        loads
    }

    /// Formatted [`doctor_loads`](Clinic::doctor_loads), e.g. `003 : 7 Smith Jane`.
    pub fn doctors_by_num_patients(&self) -> Vec<String> {
        self.doctor_loads().iter().map(ToString::to_string).collect()
    }

    /// Patient totals per specialization, omitting specializations without patients.
    pub fn specialization_loads(&self) -> Vec<SpecializationLoad> {
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for (doctor, count) in self.doctors_with_counts() {
            *totals.entry(doctor.specialization.as_str()).or_default() += count;
        }

        let mut loads: Vec<SpecializationLoad> = totals
            .into_iter()
            .filter(|(_, patients)| *patients > 0)
            .map(|(specialization, patients)| SpecializationLoad {
                specialization: specialization.to_string(),
                patients,
            })
            .collect();
        // Stable sort keeps the BTreeMap's alphabetical order among equal counts.
        loads.sort_by_key(|load| Reverse(load.patients));
        loads
    }

    /// Formatted [`specialization_loads`](Clinic::specialization_loads), e.g.
    /// `012 - Cardiology`.
    pub fn count_patients_per_specialization(&self) -> Vec<String> {
        self.specialization_loads()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Registers one patient per SSN and assigns `count` of them to the doctor.
    fn assign_n(clinic: &mut Clinic, id: i32, count: usize) {
        for n in 0..count {
            let ssn = format!("PAT-{id}-{n}");
            clinic.add_patient("First", "Last", &ssn);
            clinic.assign_patient_to_doctor(&ssn, id).unwrap();
        }
    }

    #[test]
    fn idle_doctors_sorted_by_last_name_then_id() {
        let mut clinic = Clinic::default();
        clinic.add_doctor("A", "Zeta", "S1", 1, "Surgery");
        clinic.add_doctor("B", "Alpha", "S2", 9, "Surgery");
        clinic.add_doctor("C", "Alpha", "S3", 4, "Surgery");
        clinic.add_doctor("D", "Busy", "S4", 2, "Surgery");
        assign_n(&mut clinic, 2, 1);

        assert_eq!(
            clinic.idle_doctors(),
            vec![DoctorId::new(4), DoctorId::new(9), DoctorId::new(1)]
        );
    }

    #[test]
    fn idle_doctors_never_include_assigned_doctors() {
        let mut clinic = Clinic::default();
        for id in 0..5 {
            clinic.add_doctor("F", &format!("L{id}"), "S", id, "Surgery");
        }
        assign_n(&mut clinic, 1, 2);
        assign_n(&mut clinic, 3, 1);

        let idle = clinic.idle_doctors();
        assert!(!idle.contains(&DoctorId::new(1)));
        assert!(!idle.contains(&DoctorId::new(3)));
        assert_eq!(idle.len(), 3);
    }

    #[test]
    fn busy_doctors_strictly_above_average() {
        let mut clinic = Clinic::default();
        clinic.add_doctor("Ida", "Idle", "D0", 10, "Surgery");
        clinic.add_doctor("Tom", "Two", "D2", 20, "Surgery");
        clinic.add_doctor("Sid", "Six", "D6", 30, "Surgery");
        assign_n(&mut clinic, 20, 2);
        assign_n(&mut clinic, 30, 6);

        assert_eq!(clinic.busy_doctors(), vec![DoctorId::new(30)]);
    }

    #[test]
    fn busy_doctors_empty_without_assignments() {
        let mut clinic = Clinic::default();
        assert!(clinic.busy_doctors().is_empty());

        clinic.add_doctor("A", "B", "C", 1, "Surgery");
        assert!(clinic.busy_doctors().is_empty());
    }

    #[test]
    fn busy_doctors_empty_when_loads_are_equal() {
        let mut clinic = Clinic::default();
        clinic.add_doctor("A", "B", "C", 1, "Surgery");
        clinic.add_doctor("D", "E", "F", 2, "Surgery");
        assign_n(&mut clinic, 1, 3);
        assign_n(&mut clinic, 2, 3);

        assert!(clinic.busy_doctors().is_empty());
    }

    #[test]
    fn busy_doctors_counts_repeated_assignments() {
        let mut clinic = Clinic::default();
        clinic.add_patient("P", "Q", "SAME");
        clinic.add_doctor("A", "B", "C", 1, "Surgery");
        clinic.add_doctor("D", "E", "F", 2, "Surgery");
        for _ in 0..3 {
            clinic.assign_patient_to_doctor("SAME", 1).unwrap();
        }
        clinic.assign_patient_to_doctor("SAME", 2).unwrap();

        assert_eq!(clinic.busy_doctors(), vec![DoctorId::new(1)]);
    }

    #[test]
    fn doctors_by_num_patients_descending_with_id_tiebreak() {
        let mut clinic = Clinic::default();
        clinic.add_doctor("Jane", "Smith", "S1", 7, "Surgery");
        clinic.add_doctor("Ann", "Low", "S2", 3, "Surgery");
        clinic.add_doctor("Bob", "Brown", "S3", 5, "Surgery");
        assign_n(&mut clinic, 7, 5);
        assign_n(&mut clinic, 5, 5);
        assign_n(&mut clinic, 3, 2);

        assert_eq!(
            clinic.doctors_by_num_patients(),
            vec![
                "005 : 5 Brown Bob".to_string(),
                "005 : 7 Smith Jane".to_string(),
                "002 : 3 Low Ann".to_string(),
            ]
        );
    }

    #[test]
    fn doctors_by_num_patients_includes_idle_doctors() {
        let mut clinic = Clinic::default();
        clinic.add_doctor("Jane", "Smith", "S1", 7, "Surgery");
        clinic.add_doctor("Ann", "Low", "S2", 3, "Surgery");
        assign_n(&mut clinic, 7, 3);

        let lines = clinic.doctors_by_num_patients();
        assert_eq!(lines, vec!["003 : 7 Smith Jane", "000 : 3 Low Ann"]);

        let counts: Vec<usize> = clinic.doctor_loads().iter().map(|l| l.patients).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn specialization_counts_sum_and_omit_zero() {
        let mut clinic = Clinic::default();
        clinic.add_doctor("A", "One", "S1", 1, "Cardiology");
        clinic.add_doctor("B", "Two", "S2", 2, "Cardiology");
        clinic.add_doctor("C", "Three", "S3", 3, "Neurology");
        assign_n(&mut clinic, 1, 3);
        assign_n(&mut clinic, 2, 4);

        assert_eq!(
            clinic.count_patients_per_specialization(),
            vec!["007 - Cardiology"]
        );
    }

    #[test]
    fn specialization_counts_tie_break_alphabetically() {
        let mut clinic = Clinic::default();
        clinic.add_doctor("A", "One", "S1", 1, "Pediatrics");
        clinic.add_doctor("B", "Two", "S2", 2, "Dermatology");
        clinic.add_doctor("C", "Three", "S3", 3, "Oncology");
        assign_n(&mut clinic, 1, 2);
        assign_n(&mut clinic, 2, 2);
        assign_n(&mut clinic, 3, 12);

        assert_eq!(
            clinic.count_patients_per_specialization(),
            vec!["012 - Oncology", "002 - Dermatology", "002 - Pediatrics"]
        );
    }

    #[test]
    fn counts_above_three_digits_are_not_truncated() {
        let load = SpecializationLoad {
            specialization: "Triage".into(),
            patients: 1234,
        };
        assert_eq!(load.to_string(), "1234 - Triage");
    }

    #[test]
    fn reports_on_empty_clinic_are_empty() {
        let clinic = Clinic::default();
        assert!(clinic.idle_doctors().is_empty());
        assert!(clinic.doctors_by_num_patients().is_empty());
        assert!(clinic.count_patients_per_specialization().is_empty());
    }
}
