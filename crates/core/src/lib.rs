//! # Clinic Core
//!
//! Core business logic for the clinic registry.
//!
//! This crate contains pure in-memory data operations:
//! - Patient and doctor registration and lookup
//! - Doctor-patient assignment
//! - Bulk ingestion from `;`-separated text ([`loader`])
//! - Reporting queries over doctor workloads ([`reports`])
//!
//! **No I/O sources or presentation**: opening files and printing reports belong to the caller.
//! Ingestion only consumes an already opened [`std::io::BufRead`].
//!
//! ```
//! use clinic_core::Clinic;
//!
//! let mut clinic = Clinic::default();
//! let input = "P;Jane;Smith;111\nM;5;John;Doe;222;Cardiology\n";
//! assert_eq!(clinic.load_data(input.as_bytes())?, 2);
//!
//! clinic.assign_patient_to_doctor("111", 5)?;
//! assert_eq!(clinic.doctors_by_num_patients(), vec!["001 : 5 Doe John"]);
//! # Ok::<(), clinic_core::ClinicError>(())
//! ```

pub mod clinic;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod person;
pub mod reports;

pub use clinic::Clinic;
pub use clinic_types::{DoctorId, Ssn};
pub use config::{invalid_doctor_id_policy_from_env_value, ClinicConfig, InvalidDoctorIdPolicy};
pub use error::{ClinicError, ClinicResult, NoSuchDoctor};
pub use loader::ErrorListener;
pub use person::{Doctor, Patient, Person};
pub use reports::{DoctorLoad, SpecializationLoad};
