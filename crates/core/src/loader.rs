//! Bulk ingestion of patients and doctors from line-oriented text.
//!
//! Each line holds one record, fields separated by `;`:
//!
//! ```text
//! P;first;last;ssn
//! M;id;first;last;ssn;specialization
//! ```
//!
//! Whitespace around the whole line and around every field is ignored. A line is classified by
//! its first character, and is valid only with the exact field count for its kind. Trailing
//! empty fields are not counted, so `P;Jane;Smith;` has three fields.
//!
//! Invalid lines never stop ingestion. What happens to them depends on the entry point:
//! - [`Clinic::load_data`] logs them at `warn` level
//! - [`Clinic::load_data_with_listener`] hands them to an [`ErrorListener`]
//!
//! An `M` line whose ID is not an integer is governed by
//! [`InvalidDoctorIdPolicy`](crate::config::InvalidDoctorIdPolicy): by default it aborts the
//! whole call, otherwise it is skipped like any other invalid line.

use crate::clinic::Clinic;
use crate::config::InvalidDoctorIdPolicy;
use crate::constants::{
    DOCTOR_FIELD_COUNT, DOCTOR_TAG, FIELD_SEPARATOR, PATIENT_FIELD_COUNT, PATIENT_TAG,
};
use crate::error::{ClinicError, ClinicResult};
use clinic_types::{DoctorId, TypesError};
use std::io::BufRead;

/// Receives the lines rejected during [`Clinic::load_data_with_listener`].
pub trait ErrorListener {
    /// Called once per rejected line with its 1-based number and trimmed content.
    fn offending(&mut self, line_number: usize, line: &str);
}

impl<F> ErrorListener for F
where
    F: FnMut(usize, &str),
{
    fn offending(&mut self, line_number: usize, line: &str) {
        self(line_number, line)
    }
}

/// A successfully parsed line, borrowing its fields from the input.
#[derive(Debug, PartialEq, Eq)]
enum Record<'a> {
    Patient {
        first: &'a str,
        last: &'a str,
        ssn: &'a str,
    },
    Doctor {
        id: DoctorId,
        first: &'a str,
        last: &'a str,
        ssn: &'a str,
        specialization: &'a str,
    },
}

/// Why a line was rejected.
#[derive(Debug, thiserror::Error)]
enum LineError<'a> {
    #[error("empty line")]
    Empty,
    #[error("unknown record tag")]
    UnknownTag,
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid doctor id {value:?}")]
    InvalidDoctorId {
        value: &'a str,
        #[source]
        source: TypesError,
    },
}

/// Splits a trimmed line into trimmed fields, dropping trailing empty segments.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    while fields.len() > 1 && fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields.into_iter().map(str::trim).collect()
}

fn parse_line(line: &str) -> Result<Record<'_>, LineError<'_>> {
    if line.is_empty() {
        return Err(LineError::Empty);
    }

    let fields = split_fields(line);
    let expected = if line.starts_with(PATIENT_TAG) {
        PATIENT_FIELD_COUNT
    } else if line.starts_with(DOCTOR_TAG) {
        DOCTOR_FIELD_COUNT
    } else {
        return Err(LineError::UnknownTag);
    };
    if fields.len() != expected {
        return Err(LineError::FieldCount {
            expected,
            found: fields.len(),
        });
    }

    match fields[..] {
        [_, first, last, ssn] => Ok(Record::Patient { first, last, ssn }),
        [_, id, first, last, ssn, specialization] => {
            let id = id
                .parse::<DoctorId>()
                .map_err(|source| LineError::InvalidDoctorId { value: id, source })?;
            Ok(Record::Doctor {
                id,
                first,
                last,
                ssn,
                specialization,
            })
        }
        _ => unreachable!("field count checked above"),
    }
}

impl Clinic {
    /// Loads patients and doctors from `reader`, logging and skipping invalid lines.
    ///
    /// # Returns
    ///
    /// The number of lines that registered a patient or a doctor.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::Io`] if reading fails (including non UTF-8 input)
    /// - [`ClinicError::InvalidDoctorId`] if a doctor ID is not an integer and the configured
    ///   policy is [`InvalidDoctorIdPolicy::Abort`]
    ///
    /// Records registered before an error remain in the registry.
    pub fn load_data<R: BufRead>(&mut self, reader: R) -> ClinicResult<usize> {
        self.load(reader, |line_number, line, reason| {
            tracing::warn!("skipping invalid line {}: {} ({})", line_number, line, reason);
        })
    }

    /// Loads patients and doctors from `reader`, reporting each invalid line to `listener`.
    ///
    /// Line numbers start at 1 and count every line read, blank ones included.
    ///
    /// # Errors
    ///
    /// Same as [`Clinic::load_data`].
    pub fn load_data_with_listener<R, L>(
        &mut self,
        reader: R,
        listener: &mut L,
    ) -> ClinicResult<usize>
    where
        R: BufRead,
        L: ErrorListener + ?Sized,
    {
        self.load(reader, |line_number, line, reason| {
            tracing::debug!("rejected line {} ({})", line_number, reason);
            listener.offending(line_number, line);
        })
    }

    fn load<R, F>(&mut self, reader: R, mut on_invalid: F) -> ClinicResult<usize>
    where
        R: BufRead,
        F: FnMut(usize, &str, &LineError<'_>),
    {
        let policy = self.config().invalid_doctor_id();
        let mut processed = 0usize;
        let mut skipped = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let raw = line?;
            let line_number = index + 1;
            let line = raw.trim();

            match parse_line(line) {
                Ok(Record::Patient { first, last, ssn }) => {
                    self.add_patient(first, last, ssn);
                    processed += 1;
                }
                Ok(Record::Doctor {
                    id,
                    first,
                    last,
                    ssn,
                    specialization,
                }) => {
                    self.add_doctor(first, last, ssn, id, specialization);
                    processed += 1;
                }
                Err(LineError::InvalidDoctorId { value, source })
                    if policy == InvalidDoctorIdPolicy::Abort =>
                {
                    return Err(ClinicError::InvalidDoctorId {
                        line: line_number,
                        value: value.to_string(),
                        source,
                    });
                }
                Err(reason) => {
                    on_invalid(line_number, line, &reason);
                    skipped += 1;
                }
            }
        }

        tracing::info!("loaded {} records, skipped {} lines", processed, skipped);
        Ok(processed)
    }
}
