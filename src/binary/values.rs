//! Encoders for the primitive values of the binary format: integers, floats, names, and
//! vectors.

use crate::binary::errors::EmitError;
use crate::leb128;
use crate::model::Name;
use std::io::Write;

/// Encodes an unsigned 32-bit integer as an unsigned LEB128.
pub fn write_u32<O: Write + ?Sized>(value: u32, output: &mut O) -> Result<usize, EmitError> {
    Ok(leb128::encode_unsigned(value, output)?)
}

/// Encodes an unsigned 64-bit integer as an unsigned LEB128.
pub fn write_u64<O: Write + ?Sized>(value: u64, output: &mut O) -> Result<usize, EmitError> {
    Ok(leb128::encode_unsigned(value, output)?)
}

/// Encodes a signed 32-bit integer as a signed LEB128.
pub fn write_i32<O: Write + ?Sized>(value: i32, output: &mut O) -> Result<usize, EmitError> {
    Ok(leb128::encode_signed(value, output)?)
}

/// Encodes a signed 64-bit integer as a signed LEB128.
pub fn write_i64<O: Write + ?Sized>(value: i64, output: &mut O) -> Result<usize, EmitError> {
    Ok(leb128::encode_signed(value, output)?)
}

/// Encodes a single byte verbatim, i.e. an opcode or type tag.
pub fn write_byte<O: Write + ?Sized>(value: u8, output: &mut O) -> Result<usize, EmitError> {
    output.write_all(&[value])?;
    Ok(1)
}

/// Encodes an IEEE 754 single-precision float in little-endian byte order.
pub fn write_f32<O: Write + ?Sized>(value: f32, output: &mut O) -> Result<usize, EmitError> {
    output.write_all(&value.to_le_bytes())?;
    Ok(4)
}

/// Encodes an IEEE 754 double-precision float in little-endian byte order.
pub fn write_f64<O: Write + ?Sized>(value: f64, output: &mut O) -> Result<usize, EmitError> {
    output.write_all(&value.to_le_bytes())?;
    Ok(8)
}

/// Encodes a vector as its length, as an unsigned LEB128, followed by each element encoded
/// by the given closure.
pub fn write_vector<T, O, F>(items: &[T], output: &mut O, mut write_item: F) -> Result<usize, EmitError>
where
    O: Write + ?Sized,
    F: FnMut(&T, &mut O) -> Result<usize, EmitError>,
{
    let mut written = write_u32(items.len() as u32, output)?;

    for item in items {
        written += write_item(item, output)?;
    }

    Ok(written)
}

/// Encodes a name as its UTF-8 byte length, as an unsigned LEB128, followed by the UTF-8
/// bytes themselves.
pub fn write_name<O: Write + ?Sized>(name: &Name, output: &mut O) -> Result<usize, EmitError> {
    let bytes = name.as_bytes();
    let mut written = write_u32(bytes.len() as u32, output)?;

    output.write_all(bytes)?;
    written += bytes.len();

    Ok(written)
}

/// Encodes a raw byte slice verbatim, with no length prefix.
pub fn write_bytes<O: Write + ?Sized>(bytes: &[u8], output: &mut O) -> Result<usize, EmitError> {
    output.write_all(bytes)?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_i32_negative_terminates_and_round_trips() {
        for &value in &[-1i32, -64, -65, -123456, i32::MIN] {
            let mut output = Vec::new();
            write_i32(value, &mut output).unwrap();

            let (remaining, decoded): (&[u8], i32) = crate::leb128::parse_signed(&output).unwrap();

            assert_eq!(decoded, value);
            assert!(remaining.is_empty());
        }
    }

    #[test]
    fn write_i64_negative_terminates_and_round_trips() {
        for &value in &[-1i64, -64, -65, -123456, i64::MIN] {
            let mut output = Vec::new();
            write_i64(value, &mut output).unwrap();

            let (remaining, decoded): (&[u8], i64) = crate::leb128::parse_signed(&output).unwrap();

            assert_eq!(decoded, value);
            assert!(remaining.is_empty());
        }
    }
}
