//! Encoders for instructions, including the GC (`0xFB`), bulk-memory/reference (`0xFC`),
//! and atomic (`0xFE`) prefixed opcode spaces.

use crate::binary::errors::EmitError;
use crate::binary::types::{write_heap_type, write_value_type};
use crate::binary::values::{write_byte, write_f32, write_f64, write_i32, write_i64, write_u32, write_vector};
use crate::model::*;
use std::io::Write;

const END: u8 = 0x0B;
const ELSE: u8 = 0x05;

/// Writes a full expression: its instructions followed by the `end` opcode.
pub fn write_expression<O: Write + ?Sized>(expression: &Expression, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_instructions(expression.instructions(), output)?;
    written += write_byte(END, output)?;
    Ok(written)
}

fn write_instructions<O: Write + ?Sized>(instructions: &[Instruction], output: &mut O) -> Result<usize, EmitError> {
    let mut written = 0;

    for instruction in instructions {
        written += write_instruction(instruction, output)?;
    }

    Ok(written)
}

fn write_block_type<O: Write + ?Sized>(kind: BlockType, output: &mut O) -> Result<usize, EmitError> {
    match kind {
        BlockType::None => write_byte(0x40, output),
        BlockType::ValueType(value_type) => write_value_type(value_type, output),
        BlockType::Index(index) => Ok(crate::leb128::encode_signed(i64::from(index), output)?),
    }
}

/// Writes a single instruction, dispatching across all six base opcode tables and the
/// three proposal-added prefixed spaces.
pub fn write_instruction<O: Write + ?Sized>(instruction: &Instruction, output: &mut O) -> Result<usize, EmitError> {
    match instruction {
        Instruction::Numeric(instruction) => write_numeric(instruction, output),
        Instruction::Reference(instruction) => write_reference(instruction, output),
        Instruction::Parametric(instruction) => write_parametric(instruction, output),
        Instruction::Variable(instruction) => write_variable(instruction, output),
        Instruction::Table(instruction) => write_table(instruction, output),
        Instruction::Memory(instruction) => write_memory(instruction, output),
        Instruction::Control(instruction) => write_control(instruction, output),
        Instruction::GarbageCollection(instruction) => write_gc(instruction, output),
        Instruction::Atomic(instruction) => write_atomic(instruction, output),
    }
}

fn write_control<O: Write + ?Sized>(instruction: &ControlInstruction, output: &mut O) -> Result<usize, EmitError> {
    match instruction {
        ControlInstruction::Unreachable => write_byte(0x00, output),
        ControlInstruction::Nop => write_byte(0x01, output),
        ControlInstruction::Block(block_type, body) => {
            let mut written = write_byte(0x02, output)?;
            written += write_block_type(*block_type, output)?;
            written += write_expression(body, output)?;
            Ok(written)
        }
        ControlInstruction::Loop(block_type, body) => {
            let mut written = write_byte(0x03, output)?;
            written += write_block_type(*block_type, output)?;
            written += write_expression(body, output)?;
            Ok(written)
        }
        ControlInstruction::If(block_type, then_branch, else_branch) => {
            let mut written = write_byte(0x04, output)?;
            written += write_block_type(*block_type, output)?;
            written += write_instructions(then_branch.instructions(), output)?;

            if let Some(else_branch) = else_branch {
                written += write_byte(ELSE, output)?;
                written += write_instructions(else_branch.instructions(), output)?;
            }

            written += write_byte(END, output)?;
            Ok(written)
        }
        ControlInstruction::Branch(label) => {
            let mut written = write_byte(0x0C, output)?;
            written += write_u32(*label, output)?;
            Ok(written)
        }
        ControlInstruction::BranchIf(label) => {
            let mut written = write_byte(0x0D, output)?;
            written += write_u32(*label, output)?;
            Ok(written)
        }
        ControlInstruction::BranchTable(labels, default) => {
            let mut written = write_byte(0x0E, output)?;
            written += write_vector(labels, output, |label, output| write_u32(*label, output))?;
            written += write_u32(*default, output)?;
            Ok(written)
        }
        ControlInstruction::Return => write_byte(0x0F, output),
        ControlInstruction::Call(function) => {
            let mut written = write_byte(0x10, output)?;
            written += write_u32(*function, output)?;
            Ok(written)
        }
        ControlInstruction::CallIndirect(kind, table) => {
            let mut written = write_byte(0x11, output)?;
            written += write_u32(*kind, output)?;
            written += write_u32(*table, output)?;
            Ok(written)
        }
        ControlInstruction::ReturnCall(function) => {
            let mut written = write_byte(0x12, output)?;
            written += write_u32(*function, output)?;
            Ok(written)
        }
        ControlInstruction::ReturnCallIndirect(kind, table) => {
            let mut written = write_byte(0x13, output)?;
            written += write_u32(*kind, output)?;
            written += write_u32(*table, output)?;
            Ok(written)
        }
    }
}

fn write_parametric<O: Write + ?Sized>(instruction: &ParametricInstruction, output: &mut O) -> Result<usize, EmitError> {
    match instruction {
        ParametricInstruction::Drop => write_byte(0x1A, output),
        ParametricInstruction::Select(None) => write_byte(0x1B, output),
        ParametricInstruction::Select(Some(kinds)) => {
            let mut written = write_byte(0x1C, output)?;
            written += write_vector(kinds, output, |kind, output| write_value_type(*kind, output))?;
            Ok(written)
        }
    }
}

fn write_variable<O: Write + ?Sized>(instruction: &VariableInstruction, output: &mut O) -> Result<usize, EmitError> {
    let (opcode, index) = match instruction {
        VariableInstruction::LocalGet(index) => (0x20, *index),
        VariableInstruction::LocalSet(index) => (0x21, *index),
        VariableInstruction::LocalTee(index) => (0x22, *index),
        VariableInstruction::GlobalGet(index) => (0x23, *index),
        VariableInstruction::GlobalSet(index) => (0x24, *index),
    };
    let mut written = write_byte(opcode, output)?;
    written += write_u32(index, output)?;
    Ok(written)
}

fn write_reference<O: Write + ?Sized>(instruction: &ReferenceInstruction, output: &mut O) -> Result<usize, EmitError> {
    match instruction {
        ReferenceInstruction::Null(heap_type) => {
            let mut written = write_byte(0xD0, output)?;
            written += write_heap_type(*heap_type, output)?;
            Ok(written)
        }
        ReferenceInstruction::IsNull => write_byte(0xD1, output),
        ReferenceInstruction::Function(index) => {
            let mut written = write_byte(0xD2, output)?;
            written += write_u32(*index, output)?;
            Ok(written)
        }
        ReferenceInstruction::AsNonNull => write_byte(0xD3, output),
        ReferenceInstruction::BranchOnNull(label) => {
            let mut written = write_byte(0xD4, output)?;
            written += write_u32(*label, output)?;
            Ok(written)
        }
        ReferenceInstruction::BranchOnNonNull(label) => {
            let mut written = write_byte(0xD6, output)?;
            written += write_u32(*label, output)?;
            Ok(written)
        }
        ReferenceInstruction::Test(operand) => write_ref_test_or_cast(0xFB, 20, operand, output),
        ReferenceInstruction::Cast(operand) => write_ref_test_or_cast(0xFB, 22, operand, output),
    }
}

fn write_ref_test_or_cast<O: Write + ?Sized>(
    prefix: u8,
    base_sub_opcode: u32,
    operand: &RefTypeOperand,
    output: &mut O,
) -> Result<usize, EmitError> {
    let sub_opcode = if operand.nullable {
        base_sub_opcode + 1
    } else {
        base_sub_opcode
    };
    let mut written = write_byte(prefix, output)?;
    written += write_u32(sub_opcode, output)?;
    written += write_heap_type(operand.heap_type, output)?;
    Ok(written)
}

fn memory_argument_flag_and_bytes<O: Write + ?Sized>(argument: MemoryArgument, output: &mut O) -> Result<usize, EmitError> {
    if argument.memory_index() == 0 {
        let mut written = write_u32(argument.align(), output)?;
        written += write_u32(argument.offset(), output)?;
        Ok(written)
    } else {
        let mut written = write_u32(argument.align() | 0x40, output)?;
        written += write_u32(argument.memory_index(), output)?;
        written += write_u32(argument.offset(), output)?;
        Ok(written)
    }
}

fn write_memory<O: Write + ?Sized>(instruction: &MemoryInstruction, output: &mut O) -> Result<usize, EmitError> {
    match instruction {
        MemoryInstruction::Load(NumberType::I32, argument) => write_memory_access(0x28, *argument, output),
        MemoryInstruction::Load(NumberType::I64, argument) => write_memory_access(0x29, *argument, output),
        MemoryInstruction::Load(NumberType::F32, argument) => write_memory_access(0x2A, *argument, output),
        MemoryInstruction::Load(NumberType::F64, argument) => write_memory_access(0x2B, *argument, output),
        MemoryInstruction::Load8(IntegerType::I32, SignExtension::Signed, argument) => {
            write_memory_access(0x2C, *argument, output)
        }
        MemoryInstruction::Load8(IntegerType::I32, SignExtension::Unsigned, argument) => {
            write_memory_access(0x2D, *argument, output)
        }
        MemoryInstruction::Load16(IntegerType::I32, SignExtension::Signed, argument) => {
            write_memory_access(0x2E, *argument, output)
        }
        MemoryInstruction::Load16(IntegerType::I32, SignExtension::Unsigned, argument) => {
            write_memory_access(0x2F, *argument, output)
        }
        MemoryInstruction::Load8(IntegerType::I64, SignExtension::Signed, argument) => {
            write_memory_access(0x30, *argument, output)
        }
        MemoryInstruction::Load8(IntegerType::I64, SignExtension::Unsigned, argument) => {
            write_memory_access(0x31, *argument, output)
        }
        MemoryInstruction::Load16(IntegerType::I64, SignExtension::Signed, argument) => {
            write_memory_access(0x32, *argument, output)
        }
        MemoryInstruction::Load16(IntegerType::I64, SignExtension::Unsigned, argument) => {
            write_memory_access(0x33, *argument, output)
        }
        MemoryInstruction::Load32(SignExtension::Signed, argument) => write_memory_access(0x34, *argument, output),
        MemoryInstruction::Load32(SignExtension::Unsigned, argument) => write_memory_access(0x35, *argument, output),
        MemoryInstruction::Store(NumberType::I32, argument) => write_memory_access(0x36, *argument, output),
        MemoryInstruction::Store(NumberType::I64, argument) => write_memory_access(0x37, *argument, output),
        MemoryInstruction::Store(NumberType::F32, argument) => write_memory_access(0x38, *argument, output),
        MemoryInstruction::Store(NumberType::F64, argument) => write_memory_access(0x39, *argument, output),
        MemoryInstruction::Store8(IntegerType::I32, argument) => write_memory_access(0x3A, *argument, output),
        MemoryInstruction::Store16(IntegerType::I32, argument) => write_memory_access(0x3B, *argument, output),
        MemoryInstruction::Store8(IntegerType::I64, argument) => write_memory_access(0x3C, *argument, output),
        MemoryInstruction::Store16(IntegerType::I64, argument) => write_memory_access(0x3D, *argument, output),
        MemoryInstruction::Store32(argument) => write_memory_access(0x3E, *argument, output),
        MemoryInstruction::Size(memory) => {
            let mut written = write_byte(0x3F, output)?;
            written += write_u32(*memory, output)?;
            Ok(written)
        }
        MemoryInstruction::Grow(memory) => {
            let mut written = write_byte(0x40, output)?;
            written += write_u32(*memory, output)?;
            Ok(written)
        }
        MemoryInstruction::Init(data, memory) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(8, output)?;
            written += write_u32(*data, output)?;
            written += write_u32(*memory, output)?;
            Ok(written)
        }
        MemoryInstruction::DataDrop(data) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(9, output)?;
            written += write_u32(*data, output)?;
            Ok(written)
        }
        MemoryInstruction::Copy(destination, source) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(10, output)?;
            written += write_u32(*destination, output)?;
            written += write_u32(*source, output)?;
            Ok(written)
        }
        MemoryInstruction::Fill(memory) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(11, output)?;
            written += write_u32(*memory, output)?;
            Ok(written)
        }
    }
}

fn write_memory_access<O: Write + ?Sized>(opcode: u8, argument: MemoryArgument, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_byte(opcode, output)?;
    written += memory_argument_flag_and_bytes(argument, output)?;
    Ok(written)
}

fn write_table<O: Write + ?Sized>(instruction: &TableInstruction, output: &mut O) -> Result<usize, EmitError> {
    match instruction {
        TableInstruction::Get(table) => {
            let mut written = write_byte(0x25, output)?;
            written += write_u32(*table, output)?;
            Ok(written)
        }
        TableInstruction::Set(table) => {
            let mut written = write_byte(0x26, output)?;
            written += write_u32(*table, output)?;
            Ok(written)
        }
        TableInstruction::Init(element, table) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(12, output)?;
            written += write_u32(*element, output)?;
            written += write_u32(*table, output)?;
            Ok(written)
        }
        TableInstruction::ElementDrop(element) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(13, output)?;
            written += write_u32(*element, output)?;
            Ok(written)
        }
        TableInstruction::Copy(destination, source) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(14, output)?;
            written += write_u32(*destination, output)?;
            written += write_u32(*source, output)?;
            Ok(written)
        }
        TableInstruction::Grow(table) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(15, output)?;
            written += write_u32(*table, output)?;
            Ok(written)
        }
        TableInstruction::Size(table) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(16, output)?;
            written += write_u32(*table, output)?;
            Ok(written)
        }
        TableInstruction::Fill(table) => {
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(17, output)?;
            written += write_u32(*table, output)?;
            Ok(written)
        }
    }
}

fn write_numeric<O: Write + ?Sized>(instruction: &NumericInstruction, output: &mut O) -> Result<usize, EmitError> {
    use IntegerType::{I32, I64};
    use FloatType::{F32, F64};
    use NumberType::{I32 as NI32, I64 as NI64, F32 as NF32, F64 as NF64};
    use SignExtension::{Signed, Unsigned};

    match *instruction {
        NumericInstruction::I32Constant(value) => {
            let mut written = write_byte(0x41, output)?;
            written += write_i32(value, output)?;
            Ok(written)
        }
        NumericInstruction::I64Constant(value) => {
            let mut written = write_byte(0x42, output)?;
            written += write_i64(value, output)?;
            Ok(written)
        }
        NumericInstruction::F32Constant(value) => {
            let mut written = write_byte(0x43, output)?;
            written += write_f32(value, output)?;
            Ok(written)
        }
        NumericInstruction::F64Constant(value) => {
            let mut written = write_byte(0x44, output)?;
            written += write_f64(value, output)?;
            Ok(written)
        }

        NumericInstruction::EqualToZero(I32) => write_byte(0x45, output),
        NumericInstruction::Equal(NI32) => write_byte(0x46, output),
        NumericInstruction::NotEqual(NI32) => write_byte(0x47, output),
        NumericInstruction::LessThanInteger(I32, Signed) => write_byte(0x48, output),
        NumericInstruction::LessThanInteger(I32, Unsigned) => write_byte(0x49, output),
        NumericInstruction::GreaterThanInteger(I32, Signed) => write_byte(0x4A, output),
        NumericInstruction::GreaterThanInteger(I32, Unsigned) => write_byte(0x4B, output),
        NumericInstruction::LessThanOrEqualToInteger(I32, Signed) => write_byte(0x4C, output),
        NumericInstruction::LessThanOrEqualToInteger(I32, Unsigned) => write_byte(0x4D, output),
        NumericInstruction::GreaterThanOrEqualToInteger(I32, Signed) => write_byte(0x4E, output),
        NumericInstruction::GreaterThanOrEqualToInteger(I32, Unsigned) => write_byte(0x4F, output),

        NumericInstruction::EqualToZero(I64) => write_byte(0x50, output),
        NumericInstruction::Equal(NI64) => write_byte(0x51, output),
        NumericInstruction::NotEqual(NI64) => write_byte(0x52, output),
        NumericInstruction::LessThanInteger(I64, Signed) => write_byte(0x53, output),
        NumericInstruction::LessThanInteger(I64, Unsigned) => write_byte(0x54, output),
        NumericInstruction::GreaterThanInteger(I64, Signed) => write_byte(0x55, output),
        NumericInstruction::GreaterThanInteger(I64, Unsigned) => write_byte(0x56, output),
        NumericInstruction::LessThanOrEqualToInteger(I64, Signed) => write_byte(0x57, output),
        NumericInstruction::LessThanOrEqualToInteger(I64, Unsigned) => write_byte(0x58, output),
        NumericInstruction::GreaterThanOrEqualToInteger(I64, Signed) => write_byte(0x59, output),
        NumericInstruction::GreaterThanOrEqualToInteger(I64, Unsigned) => write_byte(0x5A, output),

        NumericInstruction::Equal(NF32) => write_byte(0x5B, output),
        NumericInstruction::NotEqual(NF32) => write_byte(0x5C, output),
        NumericInstruction::LessThanFloat(F32) => write_byte(0x5D, output),
        NumericInstruction::GreaterThanFloat(F32) => write_byte(0x5E, output),
        NumericInstruction::LessThanOrEqualToFloat(F32) => write_byte(0x5F, output),
        NumericInstruction::GreaterThanOrEqualToFloat(F32) => write_byte(0x60, output),

        NumericInstruction::Equal(NF64) => write_byte(0x61, output),
        NumericInstruction::NotEqual(NF64) => write_byte(0x62, output),
        NumericInstruction::LessThanFloat(F64) => write_byte(0x63, output),
        NumericInstruction::GreaterThanFloat(F64) => write_byte(0x64, output),
        NumericInstruction::LessThanOrEqualToFloat(F64) => write_byte(0x65, output),
        NumericInstruction::GreaterThanOrEqualToFloat(F64) => write_byte(0x66, output),

        NumericInstruction::CountLeadingZeros(I32) => write_byte(0x67, output),
        NumericInstruction::CountTrailingZeros(I32) => write_byte(0x68, output),
        NumericInstruction::CountOnes(I32) => write_byte(0x69, output),
        NumericInstruction::Add(NI32) => write_byte(0x6A, output),
        NumericInstruction::Subtract(NI32) => write_byte(0x6B, output),
        NumericInstruction::Multiply(NI32) => write_byte(0x6C, output),
        NumericInstruction::DivideInteger(I32, Signed) => write_byte(0x6D, output),
        NumericInstruction::DivideInteger(I32, Unsigned) => write_byte(0x6E, output),
        NumericInstruction::Remainder(I32, Signed) => write_byte(0x6F, output),
        NumericInstruction::Remainder(I32, Unsigned) => write_byte(0x70, output),
        NumericInstruction::And(I32) => write_byte(0x71, output),
        NumericInstruction::Or(I32) => write_byte(0x72, output),
        NumericInstruction::Xor(I32) => write_byte(0x73, output),
        NumericInstruction::ShiftLeft(I32) => write_byte(0x74, output),
        NumericInstruction::ShiftRight(I32, Signed) => write_byte(0x75, output),
        NumericInstruction::ShiftRight(I32, Unsigned) => write_byte(0x76, output),
        NumericInstruction::RotateLeft(I32) => write_byte(0x77, output),
        NumericInstruction::RotateRight(I32) => write_byte(0x78, output),

        NumericInstruction::CountLeadingZeros(I64) => write_byte(0x79, output),
        NumericInstruction::CountTrailingZeros(I64) => write_byte(0x7A, output),
        NumericInstruction::CountOnes(I64) => write_byte(0x7B, output),
        NumericInstruction::Add(NI64) => write_byte(0x7C, output),
        NumericInstruction::Subtract(NI64) => write_byte(0x7D, output),
        NumericInstruction::Multiply(NI64) => write_byte(0x7E, output),
        NumericInstruction::DivideInteger(I64, Signed) => write_byte(0x7F, output),
        NumericInstruction::DivideInteger(I64, Unsigned) => write_byte(0x80, output),
        NumericInstruction::Remainder(I64, Signed) => write_byte(0x81, output),
        NumericInstruction::Remainder(I64, Unsigned) => write_byte(0x82, output),
        NumericInstruction::And(I64) => write_byte(0x83, output),
        NumericInstruction::Or(I64) => write_byte(0x84, output),
        NumericInstruction::Xor(I64) => write_byte(0x85, output),
        NumericInstruction::ShiftLeft(I64) => write_byte(0x86, output),
        NumericInstruction::ShiftRight(I64, Signed) => write_byte(0x87, output),
        NumericInstruction::ShiftRight(I64, Unsigned) => write_byte(0x88, output),
        NumericInstruction::RotateLeft(I64) => write_byte(0x89, output),
        NumericInstruction::RotateRight(I64) => write_byte(0x8A, output),

        NumericInstruction::AbsoluteValue(F32) => write_byte(0x8B, output),
        NumericInstruction::Negate(F32) => write_byte(0x8C, output),
        NumericInstruction::Ceiling(F32) => write_byte(0x8D, output),
        NumericInstruction::Floor(F32) => write_byte(0x8E, output),
        NumericInstruction::Truncate(F32) => write_byte(0x8F, output),
        NumericInstruction::Nearest(F32) => write_byte(0x90, output),
        NumericInstruction::SquareRoot(F32) => write_byte(0x91, output),
        NumericInstruction::Add(NF32) => write_byte(0x92, output),
        NumericInstruction::Subtract(NF32) => write_byte(0x93, output),
        NumericInstruction::Multiply(NF32) => write_byte(0x94, output),
        NumericInstruction::DivideFloat(F32) => write_byte(0x95, output),
        NumericInstruction::Minimum(F32) => write_byte(0x96, output),
        NumericInstruction::Maximum(F32) => write_byte(0x97, output),
        NumericInstruction::CopySign(F32) => write_byte(0x98, output),

        NumericInstruction::AbsoluteValue(F64) => write_byte(0x99, output),
        NumericInstruction::Negate(F64) => write_byte(0x9A, output),
        NumericInstruction::Ceiling(F64) => write_byte(0x9B, output),
        NumericInstruction::Floor(F64) => write_byte(0x9C, output),
        NumericInstruction::Truncate(F64) => write_byte(0x9D, output),
        NumericInstruction::Nearest(F64) => write_byte(0x9E, output),
        NumericInstruction::SquareRoot(F64) => write_byte(0x9F, output),
        NumericInstruction::Add(NF64) => write_byte(0xA0, output),
        NumericInstruction::Subtract(NF64) => write_byte(0xA1, output),
        NumericInstruction::Multiply(NF64) => write_byte(0xA2, output),
        NumericInstruction::DivideFloat(F64) => write_byte(0xA3, output),
        NumericInstruction::Minimum(F64) => write_byte(0xA4, output),
        NumericInstruction::Maximum(F64) => write_byte(0xA5, output),
        NumericInstruction::CopySign(F64) => write_byte(0xA6, output),

        NumericInstruction::Wrap => write_byte(0xA7, output),
        NumericInstruction::ConvertAndTruncate(I32, F32, Signed) => write_byte(0xA8, output),
        NumericInstruction::ConvertAndTruncate(I32, F32, Unsigned) => write_byte(0xA9, output),
        NumericInstruction::ConvertAndTruncate(I32, F64, Signed) => write_byte(0xAA, output),
        NumericInstruction::ConvertAndTruncate(I32, F64, Unsigned) => write_byte(0xAB, output),
        NumericInstruction::ExtendWithSignExtension(Signed) => write_byte(0xAC, output),
        NumericInstruction::ExtendWithSignExtension(Unsigned) => write_byte(0xAD, output),
        NumericInstruction::ConvertAndTruncate(I64, F32, Signed) => write_byte(0xAE, output),
        NumericInstruction::ConvertAndTruncate(I64, F32, Unsigned) => write_byte(0xAF, output),
        NumericInstruction::ConvertAndTruncate(I64, F64, Signed) => write_byte(0xB0, output),
        NumericInstruction::ConvertAndTruncate(I64, F64, Unsigned) => write_byte(0xB1, output),
        NumericInstruction::Convert(F32, I32, Signed) => write_byte(0xB2, output),
        NumericInstruction::Convert(F32, I32, Unsigned) => write_byte(0xB3, output),
        NumericInstruction::Convert(F32, I64, Signed) => write_byte(0xB4, output),
        NumericInstruction::Convert(F32, I64, Unsigned) => write_byte(0xB5, output),
        NumericInstruction::Demote => write_byte(0xB6, output),
        NumericInstruction::Convert(F64, I32, Signed) => write_byte(0xB7, output),
        NumericInstruction::Convert(F64, I32, Unsigned) => write_byte(0xB8, output),
        NumericInstruction::Convert(F64, I64, Signed) => write_byte(0xB9, output),
        NumericInstruction::Convert(F64, I64, Unsigned) => write_byte(0xBA, output),
        NumericInstruction::Promote => write_byte(0xBB, output),
        NumericInstruction::ReinterpretInteger(F32) => write_byte(0xBC, output),
        NumericInstruction::ReinterpretInteger(F64) => write_byte(0xBD, output),
        NumericInstruction::ReinterpretFloat(I32) => write_byte(0xBE, output),
        NumericInstruction::ReinterpretFloat(I64) => write_byte(0xBF, output),

        NumericInstruction::ExtendSigned8(I32) => write_byte(0xC0, output),
        NumericInstruction::ExtendSigned16(I32) => write_byte(0xC1, output),
        NumericInstruction::ExtendSigned8(I64) => write_byte(0xC2, output),
        NumericInstruction::ExtendSigned16(I64) => write_byte(0xC3, output),
        NumericInstruction::ExtendSigned32 => write_byte(0xC4, output),

        NumericInstruction::ConvertAndTruncateWithSaturation(kind, source, sign) => {
            let sub_opcode = truncate_saturation_sub_opcode(kind, source, sign);
            let mut written = write_byte(0xFC, output)?;
            written += write_u32(sub_opcode, output)?;
            Ok(written)
        }
    }
}

fn truncate_saturation_sub_opcode(kind: IntegerType, source: FloatType, sign: SignExtension) -> u32 {
    use FloatType::{F32, F64};
    use IntegerType::{I32, I64};
    use SignExtension::{Signed, Unsigned};

    match (kind, source, sign) {
        (I32, F32, Signed) => 0,
        (I32, F32, Unsigned) => 1,
        (I32, F64, Signed) => 2,
        (I32, F64, Unsigned) => 3,
        (I64, F32, Signed) => 4,
        (I64, F32, Unsigned) => 5,
        (I64, F64, Signed) => 6,
        (I64, F64, Unsigned) => 7,
    }
}

fn write_gc<O: Write + ?Sized>(instruction: &GcInstruction, output: &mut O) -> Result<usize, EmitError> {
    let prefix = 0xFB;

    match instruction {
        GcInstruction::StructNew(kind) => write_gc_typed(prefix, 0, *kind, output),
        GcInstruction::StructNewDefault(kind) => write_gc_typed(prefix, 1, *kind, output),
        GcInstruction::StructGet(kind, field) => write_gc_field(prefix, 2, *kind, *field, output),
        GcInstruction::StructGetSigned(kind, field) => write_gc_field(prefix, 3, *kind, *field, output),
        GcInstruction::StructGetUnsigned(kind, field) => write_gc_field(prefix, 4, *kind, *field, output),
        GcInstruction::StructSet(kind, field) => write_gc_field(prefix, 5, *kind, *field, output),

        GcInstruction::ArrayNew(kind) => write_gc_typed(prefix, 6, *kind, output),
        GcInstruction::ArrayNewDefault(kind) => write_gc_typed(prefix, 7, *kind, output),
        GcInstruction::ArrayNewFixed(kind, count) => {
            let mut written = write_byte(prefix, output)?;
            written += write_u32(8, output)?;
            written += write_u32(*kind, output)?;
            written += write_u32(*count, output)?;
            Ok(written)
        }
        GcInstruction::ArrayNewData(kind, data) => write_gc_type_and_index(prefix, 9, *kind, *data, output),
        GcInstruction::ArrayNewElement(kind, element) => write_gc_type_and_index(prefix, 10, *kind, *element, output),
        GcInstruction::ArrayGet(kind) => write_gc_typed(prefix, 11, *kind, output),
        GcInstruction::ArrayGetSigned(kind) => write_gc_typed(prefix, 12, *kind, output),
        GcInstruction::ArrayGetUnsigned(kind) => write_gc_typed(prefix, 13, *kind, output),
        GcInstruction::ArraySet(kind) => write_gc_typed(prefix, 14, *kind, output),
        GcInstruction::ArrayLength => {
            let mut written = write_byte(prefix, output)?;
            written += write_u32(15, output)?;
            Ok(written)
        }
        GcInstruction::ArrayFill(kind) => write_gc_typed(prefix, 16, *kind, output),
        GcInstruction::ArrayCopy(destination, source) => {
            write_gc_type_and_index(prefix, 17, *destination, *source, output)
        }
        GcInstruction::ArrayInitData(kind, data) => write_gc_type_and_index(prefix, 18, *kind, *data, output),
        GcInstruction::ArrayInitElement(kind, element) => {
            write_gc_type_and_index(prefix, 19, *kind, *element, output)
        }

        GcInstruction::RefTest(operand) => write_ref_test_or_cast(prefix, 20, operand, output),
        GcInstruction::RefCast(operand) => write_ref_test_or_cast(prefix, 22, operand, output),
        GcInstruction::BranchOnCast(label, source, target) => {
            write_branch_on_cast(prefix, 24, *label, *source, *target, output)
        }
        GcInstruction::BranchOnCastFail(label, source, target) => {
            write_branch_on_cast(prefix, 25, *label, *source, *target, output)
        }

        GcInstruction::AnyConvertExtern => {
            let mut written = write_byte(prefix, output)?;
            written += write_u32(26, output)?;
            Ok(written)
        }
        GcInstruction::ExternConvertAny => {
            let mut written = write_byte(prefix, output)?;
            written += write_u32(27, output)?;
            Ok(written)
        }
        GcInstruction::RefI31 => {
            let mut written = write_byte(prefix, output)?;
            written += write_u32(28, output)?;
            Ok(written)
        }
        GcInstruction::I31GetSigned => {
            let mut written = write_byte(prefix, output)?;
            written += write_u32(29, output)?;
            Ok(written)
        }
        GcInstruction::I31GetUnsigned => {
            let mut written = write_byte(prefix, output)?;
            written += write_u32(30, output)?;
            Ok(written)
        }
    }
}

fn write_gc_typed<O: Write + ?Sized>(prefix: u8, sub_opcode: u32, kind: TypeIndex, output: &mut O) -> Result<usize, EmitError> {
    let mut written = write_byte(prefix, output)?;
    written += write_u32(sub_opcode, output)?;
    written += write_u32(kind, output)?;
    Ok(written)
}

fn write_gc_field<O: Write + ?Sized>(
    prefix: u8,
    sub_opcode: u32,
    kind: TypeIndex,
    field: FieldIndex,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut written = write_byte(prefix, output)?;
    written += write_u32(sub_opcode, output)?;
    written += write_u32(kind, output)?;
    written += write_u32(field, output)?;
    Ok(written)
}

fn write_gc_type_and_index<O: Write + ?Sized>(
    prefix: u8,
    sub_opcode: u32,
    kind: TypeIndex,
    index: u32,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut written = write_byte(prefix, output)?;
    written += write_u32(sub_opcode, output)?;
    written += write_u32(kind, output)?;
    written += write_u32(index, output)?;
    Ok(written)
}

fn write_branch_on_cast<O: Write + ?Sized>(
    prefix: u8,
    sub_opcode: u32,
    label: LabelIndex,
    source: RefTypeOperand,
    target: RefTypeOperand,
    output: &mut O,
) -> Result<usize, EmitError> {
    let flags = (source.nullable as u8) | ((target.nullable as u8) << 1);
    let mut written = write_byte(prefix, output)?;
    written += write_u32(sub_opcode, output)?;
    written += write_byte(flags, output)?;
    written += write_u32(label, output)?;
    written += write_heap_type(source.heap_type, output)?;
    written += write_heap_type(target.heap_type, output)?;
    Ok(written)
}

fn write_atomic<O: Write + ?Sized>(instruction: &AtomicInstruction, output: &mut O) -> Result<usize, EmitError> {
    let prefix = 0xFE;

    match instruction {
        AtomicInstruction::Notify(argument) => write_atomic_memory(prefix, 0x00, *argument, output),
        AtomicInstruction::Wait32(argument) => write_atomic_memory(prefix, 0x01, *argument, output),
        AtomicInstruction::Wait64(argument) => write_atomic_memory(prefix, 0x02, *argument, output),
        AtomicInstruction::Fence => {
            let mut written = write_byte(prefix, output)?;
            written += write_u32(0x03, output)?;
            written += write_byte(0x00, output)?;
            Ok(written)
        }
        AtomicInstruction::Load(width, argument) => {
            write_atomic_memory(prefix, atomic_load_sub_opcode(*width), *argument, output)
        }
        AtomicInstruction::Store(width, argument) => {
            write_atomic_memory(prefix, atomic_store_sub_opcode(*width), *argument, output)
        }
        AtomicInstruction::Rmw(op, width, argument) => {
            write_atomic_memory(prefix, atomic_rmw_sub_opcode(*op, *width), *argument, output)
        }
        AtomicInstruction::RmwCompareExchange(width, argument) => {
            write_atomic_memory(prefix, atomic_compare_exchange_sub_opcode(*width), *argument, output)
        }
    }
}

fn write_atomic_memory<O: Write + ?Sized>(
    prefix: u8,
    sub_opcode: u32,
    argument: MemoryArgument,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut written = write_byte(prefix, output)?;
    written += write_u32(sub_opcode, output)?;
    written += memory_argument_flag_and_bytes(argument, output)?;
    Ok(written)
}

fn atomic_load_sub_opcode(width: AtomicWidth) -> u32 {
    match width {
        AtomicWidth::I32 => 0x10,
        AtomicWidth::I64 => 0x11,
        AtomicWidth::I32_8 => 0x12,
        AtomicWidth::I32_16 => 0x13,
        AtomicWidth::I64_8 => 0x14,
        AtomicWidth::I64_16 => 0x15,
        AtomicWidth::I64_32 => 0x16,
    }
}

fn atomic_store_sub_opcode(width: AtomicWidth) -> u32 {
    match width {
        AtomicWidth::I32 => 0x17,
        AtomicWidth::I64 => 0x18,
        AtomicWidth::I32_8 => 0x19,
        AtomicWidth::I32_16 => 0x1A,
        AtomicWidth::I64_8 => 0x1B,
        AtomicWidth::I64_16 => 0x1C,
        AtomicWidth::I64_32 => 0x1D,
    }
}

fn atomic_rmw_sub_opcode(op: AtomicRmwOp, width: AtomicWidth) -> u32 {
    let op_index = match op {
        AtomicRmwOp::Add => 0,
        AtomicRmwOp::Subtract => 1,
        AtomicRmwOp::And => 2,
        AtomicRmwOp::Or => 3,
        AtomicRmwOp::Xor => 4,
        AtomicRmwOp::Exchange => 5,
    };
    let width_index = match width {
        AtomicWidth::I32 => 0,
        AtomicWidth::I64 => 1,
        AtomicWidth::I32_8 => 2,
        AtomicWidth::I32_16 => 3,
        AtomicWidth::I64_8 => 4,
        AtomicWidth::I64_16 => 5,
        AtomicWidth::I64_32 => 6,
    };

    0x1E + op_index * 7 + width_index
}

fn atomic_compare_exchange_sub_opcode(width: AtomicWidth) -> u32 {
    let width_index = match width {
        AtomicWidth::I32 => 0,
        AtomicWidth::I64 => 1,
        AtomicWidth::I32_8 => 2,
        AtomicWidth::I32_16 => 3,
        AtomicWidth::I64_8 => 4,
        AtomicWidth::I64_16 => 5,
        AtomicWidth::I64_32 => 6,
    };

    0x1E + 6 * 7 + width_index
}
