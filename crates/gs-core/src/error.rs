use thiserror::Error;

/// Crate-independent error that every gridswitch error converts into.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GsError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
