use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConjunctionError {
    #[error("Data directory not found: {0}")]
    DataDirNotFound(String),

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("Invalid search step (days): {0}")]
    InvalidStepSize(f64),

    #[error("Body with NAIF id {0} cannot be resolved against the loaded ephemeris")]
    BodyNotFound(i32),

    #[error(
        "Epoch {et_seconds} s past J2000 is outside the segment (target {target}, center {center})"
    )]
    OutOfCoverage {
        target: i32,
        center: i32,
        et_seconds: f64,
    },

    #[error("Ephemeris coverage is empty after trimming: start JD {0} is not before end JD {1}")]
    InvalidCoverage(f64, f64),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed CSV table: {0}")]
    MalformedTable(String),

    #[error("Invalid SPK file: {0}")]
    InvalidSpkFile(String),

    #[error("Invalid SPK data type: {0}")]
    InvalidSpkDataType(i32),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("JPL File not found at: {0}")]
    JPLFileNotFound(String),

    #[cfg(feature = "jpl-download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Time scale error: {0}")]
    TimeError(String),
}

impl From<hifitime::HifitimeError> for ConjunctionError {
    fn from(err: hifitime::HifitimeError) -> Self {
        ConjunctionError::TimeError(err.to_string())
    }
}

impl PartialEq for ConjunctionError {
    fn eq(&self, other: &Self) -> bool {
        use ConjunctionError::*;
        match (self, other) {
            (DataDirNotFound(a), DataDirNotFound(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidStepSize(a), InvalidStepSize(b)) => a == b,
            (BodyNotFound(a), BodyNotFound(b)) => a == b,
            (
                OutOfCoverage {
                    target: t1,
                    center: c1,
                    et_seconds: e1,
                },
                OutOfCoverage {
                    target: t2,
                    center: c2,
                    et_seconds: e2,
                },
            ) => t1 == t2 && c1 == c2 && e1 == e2,
            (InvalidCoverage(a1, b1), InvalidCoverage(a2, b2)) => a1 == a2 && b1 == b2,

            // Not comparable: equal when the variant matches
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            #[cfg(feature = "jpl-download")]
            (ReqwestError(_), ReqwestError(_)) => true,

            (MalformedTable(a), MalformedTable(b)) => a == b,
            (InvalidSpkFile(a), InvalidSpkFile(b)) => a == b,
            (InvalidSpkDataType(a), InvalidSpkDataType(b)) => a == b,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (JPLFileNotFound(a), JPLFileNotFound(b)) => a == b,
            (TimeError(a), TimeError(b)) => a == b,

            _ => false,
        }
    }
}
