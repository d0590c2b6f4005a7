use crate::field::Field;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParseScheduleError {
    #[error("Invalid number of fields, expected 5 (minute hour day-of-month month day-of-week)")]
    ArgumentCount,

    #[error("Invalid {field} value {value:?}")]
    InvalidValue { field: Field, value: String },

    #[error("{field} value {value} is out of range, allowed {min}-{max}")]
    OutOfRange {
        field: Field,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("{0} requires at least one value")]
    EmptyField(Field),

    #[error("Expected a {expected} field, got {found}")]
    FieldMismatch { expected: Field, found: Field },
}

#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}
