//! Encoders for the WebAssembly type grammar, including the GC proposal's composite,
//! sub, and recursive types.

use crate::binary::errors::EmitError;
use crate::binary::values::{write_byte, write_u32, write_vector};
use crate::model::*;
use std::io::Write;

const VALUE_TYPE_I32: u8 = 0x7F;
const VALUE_TYPE_I64: u8 = 0x7E;
const VALUE_TYPE_F32: u8 = 0x7D;
const VALUE_TYPE_F64: u8 = 0x7C;
const VALUE_TYPE_V128: u8 = 0x7B;
const VALUE_TYPE_FUNC_REF: u8 = 0x70;
const VALUE_TYPE_EXTERN_REF: u8 = 0x6F;

const REF_TYPE_NULLABLE: u8 = 0x63;
const REF_TYPE_NON_NULL: u8 = 0x64;

const HEAP_TYPE_NO_FUNC: u8 = 0x73;
const HEAP_TYPE_NO_EXTERN: u8 = 0x72;
const HEAP_TYPE_NONE: u8 = 0x71;
const HEAP_TYPE_FUNC: u8 = 0x70;
const HEAP_TYPE_EXTERN: u8 = 0x6F;
const HEAP_TYPE_ANY: u8 = 0x6E;
const HEAP_TYPE_EQ: u8 = 0x6D;
const HEAP_TYPE_I31: u8 = 0x6C;
const HEAP_TYPE_STRUCT: u8 = 0x6B;
const HEAP_TYPE_ARRAY: u8 = 0x6A;

const PACKED_TYPE_I8: u8 = 0x78;
const PACKED_TYPE_I16: u8 = 0x77;

const COMPOSITE_TYPE_FUNCTION: u8 = 0x60;
const COMPOSITE_TYPE_STRUCT: u8 = 0x5F;
const COMPOSITE_TYPE_ARRAY: u8 = 0x5E;

const SUB_TYPE_FINAL: u8 = 0x50;
const SUB_TYPE_NON_FINAL: u8 = 0x4F;
const RECURSIVE_TYPE: u8 = 0x4E;

const MUTABILITY_CONST: u8 = 0x00;
const MUTABILITY_VAR: u8 = 0x01;

/// Writes a heap type. Abstract heap types are single-byte opcodes; a concrete heap type
/// is an index into the module's type section, encoded as a signed LEB128 (since it shares
/// the opcode space with the negative abstract type tags).
pub fn write_heap_type<O: Write + ?Sized>(kind: HeapType, output: &mut O) -> Result<usize, EmitError> {
    match kind {
        HeapType::Func => write_byte(HEAP_TYPE_FUNC, output),
        HeapType::Extern => write_byte(HEAP_TYPE_EXTERN, output),
        HeapType::Any => write_byte(HEAP_TYPE_ANY, output),
        HeapType::Eq => write_byte(HEAP_TYPE_EQ, output),
        HeapType::I31 => write_byte(HEAP_TYPE_I31, output),
        HeapType::Struct => write_byte(HEAP_TYPE_STRUCT, output),
        HeapType::Array => write_byte(HEAP_TYPE_ARRAY, output),
        HeapType::None => write_byte(HEAP_TYPE_NONE, output),
        HeapType::NoExtern => write_byte(HEAP_TYPE_NO_EXTERN, output),
        HeapType::NoFunc => write_byte(HEAP_TYPE_NO_FUNC, output),
        HeapType::Index(index) => Ok(crate::leb128::encode_signed(i64::from(index), output)?),
    }
}

/// Writes a reference type, preferring the single-byte `funcref`/`externref` shorthand
/// when the type is one of the nullable built-in heap types.
pub fn write_ref_type<O: Write + ?Sized>(kind: RefType, output: &mut O) -> Result<usize, EmitError> {
    match (kind.nullable(), kind.heap_type()) {
        (true, HeapType::Func) => write_byte(VALUE_TYPE_FUNC_REF, output),
        (true, HeapType::Extern) => write_byte(VALUE_TYPE_EXTERN_REF, output),
        (true, heap_type) => {
            let mut written = write_byte(REF_TYPE_NULLABLE, output)?;
            written += write_heap_type(heap_type, output)?;
            Ok(written)
        }
        (false, heap_type) => {
            let mut written = write_byte(REF_TYPE_NON_NULL, output)?;
            written += write_heap_type(heap_type, output)?;
            Ok(written)
        }
    }
}

/// Writes a reference type shorthand (`funcref`/`externref`), used where the binary format
/// calls for an "elemkind" or the base spec's two-variant reference type rather than the
/// full GC-proposal `RefType`.
pub fn write_reference_type<O: Write + ?Sized>(kind: ReferenceType, output: &mut O) -> Result<usize, EmitError> {
    match kind {
        ReferenceType::Function => write_byte(VALUE_TYPE_FUNC_REF, output),
        ReferenceType::External => write_byte(VALUE_TYPE_EXTERN_REF, output),
    }
}

/// Writes a value type.
pub fn write_value_type<O: Write + ?Sized>(kind: ValueType, output: &mut O) -> Result<usize, EmitError> {
    match kind {
        ValueType::I32 => write_byte(VALUE_TYPE_I32, output),
        ValueType::I64 => write_byte(VALUE_TYPE_I64, output),
        ValueType::F32 => write_byte(VALUE_TYPE_F32, output),
        ValueType::F64 => write_byte(VALUE_TYPE_F64, output),
        ValueType::V128 => write_byte(VALUE_TYPE_V128, output),
        ValueType::FunctionReference => write_byte(VALUE_TYPE_FUNC_REF, output),
        ValueType::ExternalReference => write_byte(VALUE_TYPE_EXTERN_REF, output),
        ValueType::Reference(ref_type) => write_ref_type(ref_type, output),
    }
}

/// Writes a storage type, either a full value type or a packed type used only within
/// struct and array fields.
pub fn write_storage_type<O: Write + ?Sized>(kind: StorageType, output: &mut O) -> Result<usize, EmitError> {
    match kind {
        StorageType::Value(value_type) => write_value_type(value_type, output),
        StorageType::Packed(PackedType::I8) => write_byte(PACKED_TYPE_I8, output),
        StorageType::Packed(PackedType::I16) => write_byte(PACKED_TYPE_I16, output),
    }
}

/// Writes a field type as its storage type followed by a mutability byte.
pub fn write_field_type<O: Write + ?Sized>(kind: FieldType, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_storage_type(kind.storage_type(), output)?;

    written += write_byte(
        match kind.mutability() {
            Mutability::Mutable => MUTABILITY_VAR,
            Mutability::Immutable => MUTABILITY_CONST,
        },
        output,
    )?;

    Ok(written)
}

/// Writes a function type as its parameter and result vectors.
pub fn write_function_type<O: Write + ?Sized>(kind: &FunctionType, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_byte(COMPOSITE_TYPE_FUNCTION, output)?;

    written += write_vector(kind.parameters().kinds(), output, |value_type, output| {
        write_value_type(*value_type, output)
    })?;
    written += write_vector(kind.results().kinds(), output, |value_type, output| {
        write_value_type(*value_type, output)
    })?;

    Ok(written)
}

/// Writes a struct type as a vector of field types.
pub fn write_struct_type<O: Write + ?Sized>(kind: &StructType, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_byte(COMPOSITE_TYPE_STRUCT, output)?;

    written += write_vector(kind.fields(), output, |field, output| {
        write_field_type(*field, output)
    })?;

    Ok(written)
}

/// Writes an array type as its single element field type.
pub fn write_array_type<O: Write + ?Sized>(kind: ArrayType, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_byte(COMPOSITE_TYPE_ARRAY, output)?;

    written += write_field_type(kind.element_type(), output)?;

    Ok(written)
}

/// Writes a composite type, dispatching on whether it is a function, struct, or array.
pub fn write_composite_type<O: Write + ?Sized>(kind: &CompositeType, output: &mut O) -> Result<usize, EmitError> {
    match kind {
        CompositeType::Function(function_type) => write_function_type(function_type, output),
        CompositeType::Struct(struct_type) => write_struct_type(struct_type, output),
        CompositeType::Array(array_type) => write_array_type(*array_type, output),
    }
}

/// Writes a sub type with its finality tag and explicit supertype vector.
pub fn write_sub_type<O: Write + ?Sized>(kind: &SubType, output: &mut O) -> Result<usize, EmitError> {
    let tag = if kind.is_final() {
        SUB_TYPE_FINAL
    } else {
        SUB_TYPE_NON_FINAL
    };
    let mut written = write_byte(tag, output)?;

    written += write_vector(kind.supertypes(), output, |index, output| {
        write_u32(*index, output)
    })?;
    written += write_composite_type(kind.composite_type(), output)?;

    Ok(written)
}

/// Writes a recursion group. A singleton group whose one sub type is final and has no
/// supertypes is written as the bare composite type, matching the pre-GC encoding used by
/// modules that only declare plain function types.
pub fn write_recursive_type<O: Write + ?Sized>(kind: &RecursiveType, output: &mut O) -> Result<usize, EmitError> {
    match kind.sub_types() {
        [sub_type] if sub_type.is_final() && sub_type.supertypes().is_empty() => {
            write_composite_type(sub_type.composite_type(), output)
        }
        sub_types => {
            let mut written = write_byte(RECURSIVE_TYPE, output)?;

            written += write_vector(sub_types, output, |sub_type, output| {
                write_sub_type(sub_type, output)
            })?;

            Ok(written)
        }
    }
}

/// Writes limits: a flag byte (plain/bounded/shared), the minimum, and the maximum if
/// present. A shared memory without an explicit maximum is rejected.
pub fn write_limits<O: Write + ?Sized>(kind: &Limit, output: &mut O) -> Result<usize, EmitError> {
    match (kind.is_shared(), kind.max()) {
        (true, None) => Err(EmitError::InvalidLimits),
        (true, Some(max)) => {
            let mut written = write_byte(0x03, output)?;
            written += write_u32(kind.min(), output)?;
            written += write_u32(max, output)?;
            Ok(written)
        }
        (false, None) => {
            let mut written = write_byte(0x00, output)?;
            written += write_u32(kind.min(), output)?;
            Ok(written)
        }
        (false, Some(max)) => {
            let mut written = write_byte(0x01, output)?;
            written += write_u32(kind.min(), output)?;
            written += write_u32(max, output)?;
            Ok(written)
        }
    }
}

/// Writes a table type as its element reference type followed by its limits.
pub fn write_table_type<O: Write + ?Sized>(kind: &TableType, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_ref_type(kind.kind(), output)?;
    written += write_limits(kind.limits(), output)?;
    Ok(written)
}

/// Writes a memory type as its limits.
pub fn write_memory_type<O: Write + ?Sized>(kind: &MemoryType, output: &mut O) -> Result<usize, EmitError> {
    write_limits(kind.limits(), output)
}

/// Writes a global type as its value type followed by a mutability byte.
pub fn write_global_type<O: Write + ?Sized>(kind: &GlobalType, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_value_type(kind.kind(), output)?;
    written += write_byte(
        match kind.mutability() {
            Mutability::Mutable => MUTABILITY_VAR,
            Mutability::Immutable => MUTABILITY_CONST,
        },
        output,
    )?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_type_final_without_supertypes_uses_final_tag() {
        let sub_type = SubType::plain(FunctionType::runnable().into());
        let mut output = Vec::new();

        write_sub_type(&sub_type, &mut output).unwrap();

        assert_eq!(output[0], SUB_TYPE_FINAL);
        assert_eq!(SUB_TYPE_FINAL, 0x50);
    }

    #[test]
    fn sub_type_non_final_uses_open_tag() {
        let sub_type = SubType::new(false, vec![], FunctionType::runnable().into());
        let mut output = Vec::new();

        write_sub_type(&sub_type, &mut output).unwrap();

        assert_eq!(output[0], SUB_TYPE_NON_FINAL);
        assert_eq!(SUB_TYPE_NON_FINAL, 0x4F);
    }

    #[test]
    fn sub_type_with_explicit_supertype_is_written_through_the_recursive_type_encoding() {
        let sub_type = SubType::new(false, vec![0], FunctionType::runnable().into());
        let recursive_type = RecursiveType::new(vec![sub_type]);
        let mut output = Vec::new();

        write_recursive_type(&recursive_type, &mut output).unwrap();

        assert_eq!(output[0], RECURSIVE_TYPE);
        assert_eq!(output[2], SUB_TYPE_NON_FINAL);
    }
}
