use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use clinic_core::constants::INVALID_ID_POLICY_ENV;
use clinic_core::{
    invalid_doctor_id_policy_from_env_value, Clinic, ClinicConfig, DoctorId, DoctorLoad,
    InvalidDoctorIdPolicy, SpecializationLoad,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic patient and doctor registry CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a data file and print workload reports
    Load {
        #[command(flatten)]
        source: Source,
        /// Assign a patient to a doctor after loading (repeatable)
        #[arg(long = "assign", value_name = "SSN=ID", value_parser = parse_assignment)]
        assignments: Vec<Assignment>,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a data file and show one patient
    ShowPatient {
        #[command(flatten)]
        source: Source,
        /// Patient SSN
        ssn: String,
    },
    /// Load a data file and show one doctor
    ShowDoctor {
        #[command(flatten)]
        source: Source,
        /// Doctor badge ID
        id: i32,
    },
}

/// Where clinic data comes from and how rejected lines are handled.
#[derive(Args)]
struct Source {
    /// Data file with `P;...` and `M;...` lines
    file: PathBuf,
    /// Print rejected lines to stderr instead of logging them
    #[arg(long)]
    notify: bool,
    /// Skip doctor lines with a non-numeric ID instead of aborting
    #[arg(long)]
    skip_invalid_ids: bool,
}

#[derive(Clone, Debug)]
struct Assignment {
    ssn: String,
    doctor: DoctorId,
}

fn parse_assignment(value: &str) -> Result<Assignment, String> {
    let (ssn, id) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SSN=ID, got '{value}'"))?;
    let doctor = id.trim().parse::<DoctorId>().map_err(|e| e.to_string())?;
    Ok(Assignment {
        ssn: ssn.trim().to_string(),
        doctor,
    })
}

#[derive(Serialize)]
struct Reports {
    idle_doctors: Vec<DoctorId>,
    busy_doctors: Vec<DoctorId>,
    doctors_by_num_patients: Vec<DoctorLoad>,
    patients_per_specialization: Vec<SpecializationLoad>,
}

impl Reports {
    fn collect(clinic: &Clinic) -> Self {
        Self {
            idle_doctors: clinic.idle_doctors(),
            busy_doctors: clinic.busy_doctors(),
            doctors_by_num_patients: clinic.doctor_loads(),
            patients_per_specialization: clinic.specialization_loads(),
        }
    }

    fn print_text(&self) {
        let ids = |ids: &[DoctorId]| {
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!("Idle doctors: {}", ids(&self.idle_doctors));
        println!("Busy doctors: {}", ids(&self.busy_doctors));
        println!();
        println!("Doctors by number of patients:");
        for load in &self.doctors_by_num_patients {
            println!("  {}", load);
        }
        println!();
        println!("Patients per specialization:");
        for load in &self.patients_per_specialization {
            println!("  {}", load);
        }
    }
}

/// Resolve configuration once at startup. The command-line flag wins over the environment.
fn resolve_config(source: &Source) -> anyhow::Result<ClinicConfig> {
    let policy = if source.skip_invalid_ids {
        InvalidDoctorIdPolicy::Skip
    } else {
        invalid_doctor_id_policy_from_env_value(std::env::var(INVALID_ID_POLICY_ENV).ok())
            .with_context(|| format!("invalid {}", INVALID_ID_POLICY_ENV))?
    };
    Ok(ClinicConfig::new(policy))
}

fn load_clinic(source: &Source) -> anyhow::Result<Clinic> {
    let cfg = resolve_config(source)?;
    let file = File::open(&source.file)
        .with_context(|| format!("failed to open {}", source.file.display()))?;
    let reader = BufReader::new(file);

    let mut clinic = Clinic::new(cfg);
    let processed = if source.notify {
        let mut listener = |line_number: usize, line: &str| {
            eprintln!("line {}: {}", line_number, line);
        };
        clinic.load_data_with_listener(reader, &mut listener)
    } else {
        clinic.load_data(reader)
    }
    .with_context(|| format!("failed to load {}", source.file.display()))?;

    tracing::info!(
        "++ Loaded {} records ({} patients, {} doctors) from {}",
        processed,
        clinic.patient_count(),
        clinic.doctor_count(),
        source.file.display()
    );
    Ok(clinic)
}

/// Entry point for the clinic CLI.
///
/// # Environment Variables
/// - `CLINIC_INVALID_ID_POLICY`: `abort` (default) or `skip` for non-numeric doctor IDs
/// - `RUST_LOG`: log filter, defaults to `clinic=info`
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("clinic=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Load {
            source,
            assignments,
            json,
        }) => {
            let mut clinic = load_clinic(&source)?;
            for Assignment { ssn, doctor } in &assignments {
                match clinic.assign_patient_to_doctor(ssn, *doctor) {
                    Ok(()) => tracing::info!("assigned patient {} to doctor {}", ssn, doctor),
                    Err(e) => eprintln!("Error assigning {}: {}", ssn, e),
                }
            }

            let reports = Reports::collect(&clinic);
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                reports.print_text();
            }
        }
        Some(Commands::ShowPatient { source, ssn }) => {
            let clinic = load_clinic(&source)?;
            match clinic.get_patient(&ssn) {
                Ok(info) => println!("{}", info),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        Some(Commands::ShowDoctor { source, id }) => {
            let clinic = load_clinic(&source)?;
            match clinic.get_doctor(id) {
                Ok(info) => println!("{}", info),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        None => {
            println!("Use 'clinic --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_assignment_accepts_ssn_and_id() {
        let assignment = parse_assignment(" THEPATSSN = 14 ").expect("valid assignment");
        assert_eq!(assignment.ssn, "THEPATSSN");
        assert_eq!(assignment.doctor, DoctorId::new(14));
    }

    #[test]
    fn parse_assignment_rejects_malformed_values() {
        assert!(parse_assignment("THEPATSSN").is_err());
        assert!(parse_assignment("THEPATSSN=abc").is_err());
    }

    #[test]
    fn cli_parses_repeated_assignments() {
        let cli = Cli::try_parse_from([
            "clinic", "load", "data.txt", "--assign", "A=1", "--assign", "B=2", "--json",
        ])
        .expect("valid command line");

        match cli.command {
            Some(Commands::Load {
                source,
                assignments,
                json,
            }) => {
                assert_eq!(source.file, PathBuf::from("data.txt"));
                assert!(!source.notify);
                assert_eq!(assignments.len(), 2);
                assert!(json);
            }
            _ => panic!("expected load command"),
        }
    }

    #[test]
    fn skip_flag_overrides_environment() {
        let source = Source {
            file: PathBuf::from("data.txt"),
            notify: false,
            skip_invalid_ids: true,
        };
        assert_eq!(
            resolve_config(&source).unwrap().invalid_doctor_id(),
            InvalidDoctorIdPolicy::Skip
        );
    }

    #[test]
    fn reports_serialise_to_json() {
        let mut clinic = Clinic::default();
        clinic.add_patient("Jane", "Smith", "111");
        clinic.add_doctor("John", "Doe", "222", 5, "Cardiology");
        clinic.add_doctor("Ann", "Lee", "333", 6, "Neurology");
        clinic.assign_patient_to_doctor("111", 5).unwrap();

        let json = serde_json::to_value(Reports::collect(&clinic)).expect("serialise reports");
        assert_eq!(json["idle_doctors"], serde_json::json!([6]));
        assert_eq!(json["busy_doctors"], serde_json::json!([]));
        assert_eq!(json["doctors_by_num_patients"][0]["patients"], 1);
        assert_eq!(
            json["patients_per_specialization"][0]["specialization"],
            "Cardiology"
        );
    }
}
