//! Encoders for the components of a module that are not types or instructions: functions,
//! imports, tables, memories, globals, exports, the start function, and the element and
//! data segments.

use crate::binary::errors::EmitError;
use crate::binary::instruction::write_expression;
use crate::binary::types::{
    write_global_type, write_memory_type, write_reference_type, write_table_type, write_value_type,
};
use crate::binary::values::{write_byte, write_bytes, write_name, write_u32, write_vector};
use crate::binary::CountingWrite;
use crate::model::*;
use std::io::Write;

/// Writes a function's code entry: its size, in bytes, followed by its locals and body.
pub fn write_function<O: Write + ?Sized>(function: &Function, output: &mut O) -> Result<usize, EmitError> {
    let mut counter = CountingWrite::new();
    write_function_code(function, &mut counter)?;

    let mut written = write_u32(counter.bytes() as u32, output)?;
    written += write_function_code(function, output)?;
    Ok(written)
}

fn write_function_code<O: Write + ?Sized>(function: &Function, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_vector(function.locals().kinds(), output, |kind, output| {
        let mut written = write_u32(1, output)?;
        written += write_value_type(*kind, output)?;
        Ok(written)
    })?;

    written += write_expression(function.body(), output)?;
    Ok(written)
}

/// Writes an import as its module name, its own name, and its description.
pub fn write_import<O: Write + ?Sized>(import: &Import, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_name(import.module(), output)?;
    written += write_name(import.name(), output)?;
    written += write_import_description(import.description(), output)?;
    Ok(written)
}

fn write_import_description<O: Write + ?Sized>(
    description: &ImportDescription,
    output: &mut O,
) -> Result<usize, EmitError> {
    match description {
        ImportDescription::Function(kind) => {
            let mut written = write_byte(0x00, output)?;
            written += write_u32(*kind, output)?;
            Ok(written)
        }
        ImportDescription::Table(kind) => {
            let mut written = write_byte(0x01, output)?;
            written += write_table_type(kind, output)?;
            Ok(written)
        }
        ImportDescription::Memory(kind) => {
            let mut written = write_byte(0x02, output)?;
            written += write_memory_type(kind, output)?;
            Ok(written)
        }
        ImportDescription::Global(kind) => {
            let mut written = write_byte(0x03, output)?;
            written += write_global_type(kind, output)?;
            Ok(written)
        }
    }
}

/// Writes a table as its table type.
pub fn write_table<O: Write + ?Sized>(table: &Table, output: &mut O) -> Result<usize, EmitError> {
    write_table_type(table.kind(), output)
}

/// Writes a memory as its memory type.
pub fn write_memory<O: Write + ?Sized>(memory: &Memory, output: &mut O) -> Result<usize, EmitError> {
    write_memory_type(memory.kind(), output)
}

/// Writes a global as its global type followed by its constant initializer.
pub fn write_global<O: Write + ?Sized>(global: &Global, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_global_type(global.kind(), output)?;
    written += write_expression(global.initializer(), output)?;
    Ok(written)
}

/// Writes an export as its name followed by its description.
pub fn write_export<O: Write + ?Sized>(export: &Export, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_name(export.name(), output)?;
    written += write_export_description(export.description(), output)?;
    Ok(written)
}

fn write_export_description<O: Write + ?Sized>(
    description: &ExportDescription,
    output: &mut O,
) -> Result<usize, EmitError> {
    let (tag, index) = match description {
        ExportDescription::Function(index) => (0x00, *index),
        ExportDescription::Table(index) => (0x01, *index),
        ExportDescription::Memory(index) => (0x02, *index),
        ExportDescription::Global(index) => (0x03, *index),
    };
    let mut written = write_byte(tag, output)?;
    written += write_u32(index, output)?;
    Ok(written)
}

/// Writes the start section's content: the index of the start function.
pub fn write_start<O: Write + ?Sized>(start: &Start, output: &mut O) -> Result<usize, EmitError> {
    write_u32(start.function(), output)
}

/// An element segment whose every initializer is a bare `ref.func` of a single function index
/// can be written with the compact function-index-vector encoding instead of the general
/// expression-vector encoding.
fn function_indices(element: &Element) -> Option<Vec<FunctionIndex>> {
    if !matches!(element.kind(), ReferenceType::Function) {
        return None;
    }

    element
        .initializers()
        .iter()
        .map(|expression| match expression.instructions() {
            [Instruction::Reference(ReferenceInstruction::Function(index))] => Some(*index),
            _ => None,
        })
        .collect()
}

/// Writes an element segment, preferring the compact function-index encoding when every
/// initializer is a bare function reference.
pub fn write_element<O: Write + ?Sized>(element: &Element, output: &mut O) -> Result<usize, EmitError> {
    match (function_indices(element), element.mode()) {
        (Some(indices), ElementMode::Active(0, offset)) => {
            let mut written = write_byte(0x00, output)?;
            written += write_expression(offset, output)?;
            written += write_vector(&indices, output, |index, output| write_u32(*index, output))?;
            Ok(written)
        }
        (Some(indices), ElementMode::Passive) => {
            let mut written = write_byte(0x01, output)?;
            written += write_byte(0x00, output)?;
            written += write_vector(&indices, output, |index, output| write_u32(*index, output))?;
            Ok(written)
        }
        (Some(indices), ElementMode::Active(table, offset)) => {
            let mut written = write_byte(0x02, output)?;
            written += write_u32(*table, output)?;
            written += write_expression(offset, output)?;
            written += write_reference_type(element.kind(), output)?;
            written += write_vector(&indices, output, |index, output| write_u32(*index, output))?;
            Ok(written)
        }
        (Some(indices), ElementMode::Declarative) => {
            let mut written = write_byte(0x03, output)?;
            written += write_reference_type(element.kind(), output)?;
            written += write_vector(&indices, output, |index, output| write_u32(*index, output))?;
            Ok(written)
        }
        (None, ElementMode::Active(0, offset)) if matches!(element.kind(), ReferenceType::Function) => {
            let mut written = write_byte(0x04, output)?;
            written += write_expression(offset, output)?;
            written += write_vector(element.initializers(), output, |expression, output| {
                write_expression(expression, output)
            })?;
            Ok(written)
        }
        (None, ElementMode::Passive) => {
            let mut written = write_byte(0x05, output)?;
            written += write_reference_type(element.kind(), output)?;
            written += write_vector(element.initializers(), output, |expression, output| {
                write_expression(expression, output)
            })?;
            Ok(written)
        }
        (None, ElementMode::Active(table, offset)) => {
            let mut written = write_byte(0x06, output)?;
            written += write_u32(*table, output)?;
            written += write_expression(offset, output)?;
            written += write_reference_type(element.kind(), output)?;
            written += write_vector(element.initializers(), output, |expression, output| {
                write_expression(expression, output)
            })?;
            Ok(written)
        }
        (None, ElementMode::Declarative) => {
            let mut written = write_byte(0x07, output)?;
            written += write_reference_type(element.kind(), output)?;
            written += write_vector(element.initializers(), output, |expression, output| {
                write_expression(expression, output)
            })?;
            Ok(written)
        }
    }
}

/// Writes a data segment as its mode followed by its raw byte initializer.
pub fn write_data<O: Write + ?Sized>(data: &Data, output: &mut O) -> Result<usize, EmitError> {
    let mut written = match data.mode() {
        DataMode::Active(0, offset) => {
            let mut written = write_byte(0x00, output)?;
            written += write_expression(offset, output)?;
            written
        }
        DataMode::Passive => write_byte(0x01, output)?,
        DataMode::Active(memory, offset) => {
            let mut written = write_byte(0x02, output)?;
            written += write_u32(*memory, output)?;
            written += write_expression(offset, output)?;
            written
        }
    };

    written += write_vector_bytes(data.initializer(), output)?;
    Ok(written)
}

fn write_vector_bytes<O: Write + ?Sized>(bytes: &[u8], output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_u32(bytes.len() as u32, output)?;
    written += write_bytes(bytes, output)?;
    Ok(written)
}

/// Writes a custom section's content: its name followed by its raw bytes.
pub fn write_custom<O: Write + ?Sized>(custom: &Custom, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_name(custom.name(), output)?;
    written += write_bytes(custom.bytes(), output)?;
    Ok(written)
}
