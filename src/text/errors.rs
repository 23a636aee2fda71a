use thiserror::Error;

/// An error encountered while emitting a `Module` to its text (WAT) representation.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("A shared memory must declare an explicit maximum page count.")]
    InvalidLimits,
    #[error("A value type, heap type, or block type is malformed.")]
    InvalidType,
    #[error("An export or import name is not valid UTF-8.")]
    InvalidName,
    #[error("The instruction variant is not encodable in the text format.")]
    UnsupportedOpcode,
}
