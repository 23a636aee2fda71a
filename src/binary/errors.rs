use thiserror::Error;

/// An error encountered while emitting a `Module` to its binary representation.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] crate::leb128::LEB128Error),
    #[error("An index of {0} is out of range for the {1} index space, which has {2} entries.")]
    IndexOutOfRange(u32, &'static str, usize),
    #[error("A shared memory must declare an explicit maximum page count.")]
    InvalidLimits,
    #[error("The declared data count of {declared} does not match the {actual} data segments present in the module.")]
    SectionCountMismatch { declared: u32, actual: usize },
    #[error("A value type, heap type, or block type is malformed.")]
    InvalidType,
    #[error("An export or import name is not valid UTF-8.")]
    InvalidName,
    #[error("The instruction variant is not encodable in the binary format.")]
    UnsupportedOpcode,
}
