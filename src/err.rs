use std::process::{ExitCode, Termination};

/// Failure while encoding one report into HL7 messages.
///
/// Any of these aborts the whole record; no partial message is produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// A field could not be parsed (dates, allele strings, ...).
    #[error("malformed input for sample {sample_id} ({patient_name}): {detail}")]
    MalformedInput {
        sample_id: String,
        patient_name: String,
        detail: String,
    },
    /// A result code is missing from the code dictionary.
    #[error("result code {0} not found in code dictionary")]
    UnmappedCode(String),
    /// A consequence term is missing from the controlled vocabulary.
    #[error("SequenceOntology term {term:?} of variant {variant} not found")]
    UnmappedConsequence { term: String, variant: String },
    /// The report names a panel we have no order code for.
    #[error("unknown panel {0:?}")]
    UnknownPanel(String),
    /// Neither an allele fraction nor read counts are available.
    #[error("variant {variant} has neither allele fraction nor read counts")]
    MissingAlleleFraction { variant: String },
}

impl Termination for EncodeError {
    fn report(self) -> ExitCode {
        match self {
            EncodeError::MalformedInput { .. } => ExitCode::from(2),
            EncodeError::UnmappedCode(_)
            | EncodeError::UnmappedConsequence { .. }
            | EncodeError::UnknownPanel(_) => ExitCode::from(3),
            EncodeError::MissingAlleleFraction { .. } => ExitCode::from(4),
        }
    }
}

/// Who the record belongs to, attached to `MalformedInput` errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    pub sample_id: String,
    pub patient_name: String,
}

impl Subject {
    /// Build a `MalformedInput` error for this subject.
    pub fn malformed(&self, detail: impl Into<String>) -> EncodeError {
        EncodeError::MalformedInput {
            sample_id: self.sample_id.clone(),
            patient_name: self.patient_name.clone(),
            detail: detail.into(),
        }
    }
}
