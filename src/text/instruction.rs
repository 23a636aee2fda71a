//! Renders instructions as flat (non-folded) WAT lines, including the GC, bulk-memory/
//! reference, and atomic instruction families.

use crate::model::*;
use crate::text::types::{heap_type, ref_type, value_type};
use crate::text::Writer;

/// Writes an expression's instructions, one per line, with no trailing `end` — the caller's
/// enclosing s-expression (a function body, an offset expression, …) supplies the closing
/// context instead.
pub(crate) fn write_expression(writer: &mut Writer, expression: &Expression) {
    for instruction in expression.instructions() {
        write_instruction(writer, instruction);
    }
}

fn block_type_text(kind: BlockType) -> String {
    match kind {
        BlockType::None => String::new(),
        BlockType::ValueType(value_type_kind) => format!(" (result {})", value_type(value_type_kind)),
        BlockType::Index(index) => format!(" (type {index})"),
    }
}

fn ref_type_operand_text(operand: RefTypeOperand) -> String {
    ref_type(RefType::new(operand.nullable, operand.heap_type))
}

pub(crate) fn write_instruction(writer: &mut Writer, instruction: &Instruction) {
    match instruction {
        Instruction::Control(control) => write_control(writer, control),
        other => writer.line(&instruction_text(other)),
    }
}

fn write_control(writer: &mut Writer, instruction: &ControlInstruction) {
    match instruction {
        ControlInstruction::Block(block_type, body) => {
            writer.open(&format!("block{}", block_type_text(*block_type)));
            write_expression(writer, body);
            writer.close_with("end");
        }
        ControlInstruction::Loop(block_type, body) => {
            writer.open(&format!("loop{}", block_type_text(*block_type)));
            write_expression(writer, body);
            writer.close_with("end");
        }
        ControlInstruction::If(block_type, then_branch, else_branch) => {
            writer.open(&format!("if{}", block_type_text(*block_type)));
            write_expression(writer, then_branch);

            if let Some(else_branch) = else_branch {
                writer.line_outdented("else");
                write_expression(writer, else_branch);
            }

            writer.close_with("end");
        }
        other => writer.line(&control_text(other)),
    }
}

fn control_text(instruction: &ControlInstruction) -> String {
    match instruction {
        ControlInstruction::Unreachable => "unreachable".to_string(),
        ControlInstruction::Nop => "nop".to_string(),
        ControlInstruction::Block(..) | ControlInstruction::Loop(..) | ControlInstruction::If(..) => {
            unreachable!("block-shaped instructions are written by write_control")
        }
        ControlInstruction::Branch(label) => format!("br {label}"),
        ControlInstruction::BranchIf(label) => format!("br_if {label}"),
        ControlInstruction::BranchTable(labels, default) => {
            let labels: Vec<_> = labels.iter().map(u32::to_string).collect();
            format!("br_table {} {default}", labels.join(" "))
        }
        ControlInstruction::Return => "return".to_string(),
        ControlInstruction::Call(function) => format!("call {function}"),
        ControlInstruction::CallIndirect(kind, table) => format!("call_indirect {table} (type {kind})"),
        ControlInstruction::ReturnCall(function) => format!("return_call {function}"),
        ControlInstruction::ReturnCallIndirect(kind, table) => {
            format!("return_call_indirect {table} (type {kind})")
        }
    }
}

fn instruction_text(instruction: &Instruction) -> String {
    match instruction {
        Instruction::Numeric(instruction) => numeric_text(instruction),
        Instruction::Reference(instruction) => reference_text(instruction),
        Instruction::Parametric(instruction) => parametric_text(instruction),
        Instruction::Variable(instruction) => variable_text(instruction),
        Instruction::Table(instruction) => table_text(instruction),
        Instruction::Memory(instruction) => memory_text(instruction),
        Instruction::GarbageCollection(instruction) => gc_text(instruction),
        Instruction::Atomic(instruction) => atomic_text(instruction),
        Instruction::Control(instruction) => control_text(instruction),
    }
}

fn reference_text(instruction: &ReferenceInstruction) -> String {
    match instruction {
        ReferenceInstruction::Null(kind) => format!("ref.null {}", heap_type(*kind)),
        ReferenceInstruction::IsNull => "ref.is_null".to_string(),
        ReferenceInstruction::Function(index) => format!("ref.func {index}"),
        ReferenceInstruction::AsNonNull => "ref.as_non_null".to_string(),
        ReferenceInstruction::BranchOnNull(label) => format!("br_on_null {label}"),
        ReferenceInstruction::BranchOnNonNull(label) => format!("br_on_non_null {label}"),
        ReferenceInstruction::Test(operand) => format!("ref.test {}", ref_type_operand_text(*operand)),
        ReferenceInstruction::Cast(operand) => format!("ref.cast {}", ref_type_operand_text(*operand)),
    }
}

fn parametric_text(instruction: &ParametricInstruction) -> String {
    match instruction {
        ParametricInstruction::Drop => "drop".to_string(),
        ParametricInstruction::Select(None) => "select".to_string(),
        ParametricInstruction::Select(Some(kinds)) => {
            let kinds: Vec<_> = kinds.iter().copied().map(value_type).collect();
            format!("select (result {})", kinds.join(" "))
        }
    }
}

fn variable_text(instruction: &VariableInstruction) -> String {
    match instruction {
        VariableInstruction::LocalGet(index) => format!("local.get {index}"),
        VariableInstruction::LocalSet(index) => format!("local.set {index}"),
        VariableInstruction::LocalTee(index) => format!("local.tee {index}"),
        VariableInstruction::GlobalGet(index) => format!("global.get {index}"),
        VariableInstruction::GlobalSet(index) => format!("global.set {index}"),
    }
}

fn table_text(instruction: &TableInstruction) -> String {
    match instruction {
        TableInstruction::Get(table) => format!("table.get {table}"),
        TableInstruction::Set(table) => format!("table.set {table}"),
        TableInstruction::Size(table) => format!("table.size {table}"),
        TableInstruction::Grow(table) => format!("table.grow {table}"),
        TableInstruction::Fill(table) => format!("table.fill {table}"),
        TableInstruction::Copy(destination, source) => format!("table.copy {destination} {source}"),
        TableInstruction::Init(element, table) => format!("table.init {table} {element}"),
        TableInstruction::ElementDrop(element) => format!("elem.drop {element}"),
    }
}

/// Formats the trailing `<index>? offset=<n>? align=<n>?` suffix of a memory access
/// instruction, suppressing tokens that match the instruction's natural defaults.
fn memory_argument_text(natural_align: u32, argument: MemoryArgument) -> String {
    let mut tokens = Vec::new();

    if argument.memory_index() != 0 {
        tokens.push(argument.memory_index().to_string());
    }

    if argument.offset() != 0 {
        tokens.push(format!("offset={}", argument.offset()));
    }

    if argument.align() != natural_align {
        tokens.push(format!("align={}", 1u32 << argument.align()));
    }

    if tokens.is_empty() {
        String::new()
    } else {
        format!(" {}", tokens.join(" "))
    }
}

fn memory_text(instruction: &MemoryInstruction) -> String {
    use IntegerType::{I32, I64};
    use NumberType::{F32, F64, I32 as NI32, I64 as NI64};
    use SignExtension::{Signed, Unsigned};

    match *instruction {
        MemoryInstruction::Load(NI32, argument) => format!("i32.load{}", memory_argument_text(2, argument)),
        MemoryInstruction::Load(NI64, argument) => format!("i64.load{}", memory_argument_text(3, argument)),
        MemoryInstruction::Load(F32, argument) => format!("f32.load{}", memory_argument_text(2, argument)),
        MemoryInstruction::Load(F64, argument) => format!("f64.load{}", memory_argument_text(3, argument)),
        MemoryInstruction::Load8(I32, Signed, argument) => format!("i32.load8_s{}", memory_argument_text(0, argument)),
        MemoryInstruction::Load8(I32, Unsigned, argument) => {
            format!("i32.load8_u{}", memory_argument_text(0, argument))
        }
        MemoryInstruction::Load16(I32, Signed, argument) => {
            format!("i32.load16_s{}", memory_argument_text(1, argument))
        }
        MemoryInstruction::Load16(I32, Unsigned, argument) => {
            format!("i32.load16_u{}", memory_argument_text(1, argument))
        }
        MemoryInstruction::Load8(I64, Signed, argument) => format!("i64.load8_s{}", memory_argument_text(0, argument)),
        MemoryInstruction::Load8(I64, Unsigned, argument) => {
            format!("i64.load8_u{}", memory_argument_text(0, argument))
        }
        MemoryInstruction::Load16(I64, Signed, argument) => {
            format!("i64.load16_s{}", memory_argument_text(1, argument))
        }
        MemoryInstruction::Load16(I64, Unsigned, argument) => {
            format!("i64.load16_u{}", memory_argument_text(1, argument))
        }
        MemoryInstruction::Load32(Signed, argument) => format!("i64.load32_s{}", memory_argument_text(2, argument)),
        MemoryInstruction::Load32(Unsigned, argument) => format!("i64.load32_u{}", memory_argument_text(2, argument)),
        MemoryInstruction::Store(NI32, argument) => format!("i32.store{}", memory_argument_text(2, argument)),
        MemoryInstruction::Store(NI64, argument) => format!("i64.store{}", memory_argument_text(3, argument)),
        MemoryInstruction::Store(F32, argument) => format!("f32.store{}", memory_argument_text(2, argument)),
        MemoryInstruction::Store(F64, argument) => format!("f64.store{}", memory_argument_text(3, argument)),
        MemoryInstruction::Store8(I32, argument) => format!("i32.store8{}", memory_argument_text(0, argument)),
        MemoryInstruction::Store16(I32, argument) => format!("i32.store16{}", memory_argument_text(1, argument)),
        MemoryInstruction::Store8(I64, argument) => format!("i64.store8{}", memory_argument_text(0, argument)),
        MemoryInstruction::Store16(I64, argument) => format!("i64.store16{}", memory_argument_text(1, argument)),
        MemoryInstruction::Store32(argument) => format!("i64.store32{}", memory_argument_text(2, argument)),
        MemoryInstruction::Size(memory) if memory == 0 => "memory.size".to_string(),
        MemoryInstruction::Size(memory) => format!("memory.size {memory}"),
        MemoryInstruction::Grow(memory) if memory == 0 => "memory.grow".to_string(),
        MemoryInstruction::Grow(memory) => format!("memory.grow {memory}"),
        MemoryInstruction::Fill(memory) if memory == 0 => "memory.fill".to_string(),
        MemoryInstruction::Fill(memory) => format!("memory.fill {memory}"),
        MemoryInstruction::Copy(0, 0) => "memory.copy".to_string(),
        MemoryInstruction::Copy(destination, source) => format!("memory.copy {destination} {source}"),
        MemoryInstruction::Init(data, memory) => format!("memory.init {data} {memory}"),
        MemoryInstruction::DataDrop(data) => format!("data.drop {data}"),
    }
}

fn numeric_text(instruction: &NumericInstruction) -> String {
    use IntegerType::{I32, I64};
    use FloatType::{F32, F64};
    use NumberType::{I32 as NI32, I64 as NI64, F32 as NF32, F64 as NF64};
    use SignExtension::{Signed, Unsigned};

    match *instruction {
        NumericInstruction::I32Constant(value) => format!("i32.const {value}"),
        NumericInstruction::I64Constant(value) => format!("i64.const {value}"),
        NumericInstruction::F32Constant(value) => format!("f32.const {value}"),
        NumericInstruction::F64Constant(value) => format!("f64.const {value}"),

        NumericInstruction::EqualToZero(I32) => "i32.eqz".to_string(),
        NumericInstruction::Equal(NI32) => "i32.eq".to_string(),
        NumericInstruction::NotEqual(NI32) => "i32.ne".to_string(),
        NumericInstruction::LessThanInteger(I32, Signed) => "i32.lt_s".to_string(),
        NumericInstruction::LessThanInteger(I32, Unsigned) => "i32.lt_u".to_string(),
        NumericInstruction::GreaterThanInteger(I32, Signed) => "i32.gt_s".to_string(),
        NumericInstruction::GreaterThanInteger(I32, Unsigned) => "i32.gt_u".to_string(),
        NumericInstruction::LessThanOrEqualToInteger(I32, Signed) => "i32.le_s".to_string(),
        NumericInstruction::LessThanOrEqualToInteger(I32, Unsigned) => "i32.le_u".to_string(),
        NumericInstruction::GreaterThanOrEqualToInteger(I32, Signed) => "i32.ge_s".to_string(),
        NumericInstruction::GreaterThanOrEqualToInteger(I32, Unsigned) => "i32.ge_u".to_string(),

        NumericInstruction::EqualToZero(I64) => "i64.eqz".to_string(),
        NumericInstruction::Equal(NI64) => "i64.eq".to_string(),
        NumericInstruction::NotEqual(NI64) => "i64.ne".to_string(),
        NumericInstruction::LessThanInteger(I64, Signed) => "i64.lt_s".to_string(),
        NumericInstruction::LessThanInteger(I64, Unsigned) => "i64.lt_u".to_string(),
        NumericInstruction::GreaterThanInteger(I64, Signed) => "i64.gt_s".to_string(),
        NumericInstruction::GreaterThanInteger(I64, Unsigned) => "i64.gt_u".to_string(),
        NumericInstruction::LessThanOrEqualToInteger(I64, Signed) => "i64.le_s".to_string(),
        NumericInstruction::LessThanOrEqualToInteger(I64, Unsigned) => "i64.le_u".to_string(),
        NumericInstruction::GreaterThanOrEqualToInteger(I64, Signed) => "i64.ge_s".to_string(),
        NumericInstruction::GreaterThanOrEqualToInteger(I64, Unsigned) => "i64.ge_u".to_string(),

        NumericInstruction::Equal(NF32) => "f32.eq".to_string(),
        NumericInstruction::NotEqual(NF32) => "f32.ne".to_string(),
        NumericInstruction::LessThanFloat(F32) => "f32.lt".to_string(),
        NumericInstruction::GreaterThanFloat(F32) => "f32.gt".to_string(),
        NumericInstruction::LessThanOrEqualToFloat(F32) => "f32.le".to_string(),
        NumericInstruction::GreaterThanOrEqualToFloat(F32) => "f32.ge".to_string(),

        NumericInstruction::Equal(NF64) => "f64.eq".to_string(),
        NumericInstruction::NotEqual(NF64) => "f64.ne".to_string(),
        NumericInstruction::LessThanFloat(F64) => "f64.lt".to_string(),
        NumericInstruction::GreaterThanFloat(F64) => "f64.gt".to_string(),
        NumericInstruction::LessThanOrEqualToFloat(F64) => "f64.le".to_string(),
        NumericInstruction::GreaterThanOrEqualToFloat(F64) => "f64.ge".to_string(),

        NumericInstruction::CountLeadingZeros(I32) => "i32.clz".to_string(),
        NumericInstruction::CountTrailingZeros(I32) => "i32.ctz".to_string(),
        NumericInstruction::CountOnes(I32) => "i32.popcnt".to_string(),
        NumericInstruction::Add(NI32) => "i32.add".to_string(),
        NumericInstruction::Subtract(NI32) => "i32.sub".to_string(),
        NumericInstruction::Multiply(NI32) => "i32.mul".to_string(),
        NumericInstruction::DivideInteger(I32, Signed) => "i32.div_s".to_string(),
        NumericInstruction::DivideInteger(I32, Unsigned) => "i32.div_u".to_string(),
        NumericInstruction::Remainder(I32, Signed) => "i32.rem_s".to_string(),
        NumericInstruction::Remainder(I32, Unsigned) => "i32.rem_u".to_string(),
        NumericInstruction::And(I32) => "i32.and".to_string(),
        NumericInstruction::Or(I32) => "i32.or".to_string(),
        NumericInstruction::Xor(I32) => "i32.xor".to_string(),
        NumericInstruction::ShiftLeft(I32) => "i32.shl".to_string(),
        NumericInstruction::ShiftRight(I32, Signed) => "i32.shr_s".to_string(),
        NumericInstruction::ShiftRight(I32, Unsigned) => "i32.shr_u".to_string(),
        NumericInstruction::RotateLeft(I32) => "i32.rotl".to_string(),
        NumericInstruction::RotateRight(I32) => "i32.rotr".to_string(),

        NumericInstruction::CountLeadingZeros(I64) => "i64.clz".to_string(),
        NumericInstruction::CountTrailingZeros(I64) => "i64.ctz".to_string(),
        NumericInstruction::CountOnes(I64) => "i64.popcnt".to_string(),
        NumericInstruction::Add(NI64) => "i64.add".to_string(),
        NumericInstruction::Subtract(NI64) => "i64.sub".to_string(),
        NumericInstruction::Multiply(NI64) => "i64.mul".to_string(),
        NumericInstruction::DivideInteger(I64, Signed) => "i64.div_s".to_string(),
        NumericInstruction::DivideInteger(I64, Unsigned) => "i64.div_u".to_string(),
        NumericInstruction::Remainder(I64, Signed) => "i64.rem_s".to_string(),
        NumericInstruction::Remainder(I64, Unsigned) => "i64.rem_u".to_string(),
        NumericInstruction::And(I64) => "i64.and".to_string(),
        NumericInstruction::Or(I64) => "i64.or".to_string(),
        NumericInstruction::Xor(I64) => "i64.xor".to_string(),
        NumericInstruction::ShiftLeft(I64) => "i64.shl".to_string(),
        NumericInstruction::ShiftRight(I64, Signed) => "i64.shr_s".to_string(),
        NumericInstruction::ShiftRight(I64, Unsigned) => "i64.shr_u".to_string(),
        NumericInstruction::RotateLeft(I64) => "i64.rotl".to_string(),
        NumericInstruction::RotateRight(I64) => "i64.rotr".to_string(),

        NumericInstruction::AbsoluteValue(F32) => "f32.abs".to_string(),
        NumericInstruction::Negate(F32) => "f32.neg".to_string(),
        NumericInstruction::Ceiling(F32) => "f32.ceil".to_string(),
        NumericInstruction::Floor(F32) => "f32.floor".to_string(),
        NumericInstruction::Truncate(F32) => "f32.trunc".to_string(),
        NumericInstruction::Nearest(F32) => "f32.nearest".to_string(),
        NumericInstruction::SquareRoot(F32) => "f32.sqrt".to_string(),
        NumericInstruction::Add(NF32) => "f32.add".to_string(),
        NumericInstruction::Subtract(NF32) => "f32.sub".to_string(),
        NumericInstruction::Multiply(NF32) => "f32.mul".to_string(),
        NumericInstruction::DivideFloat(F32) => "f32.div".to_string(),
        NumericInstruction::Minimum(F32) => "f32.min".to_string(),
        NumericInstruction::Maximum(F32) => "f32.max".to_string(),
        NumericInstruction::CopySign(F32) => "f32.copysign".to_string(),

        NumericInstruction::AbsoluteValue(F64) => "f64.abs".to_string(),
        NumericInstruction::Negate(F64) => "f64.neg".to_string(),
        NumericInstruction::Ceiling(F64) => "f64.ceil".to_string(),
        NumericInstruction::Floor(F64) => "f64.floor".to_string(),
        NumericInstruction::Truncate(F64) => "f64.trunc".to_string(),
        NumericInstruction::Nearest(F64) => "f64.nearest".to_string(),
        NumericInstruction::SquareRoot(F64) => "f64.sqrt".to_string(),
        NumericInstruction::Add(NF64) => "f64.add".to_string(),
        NumericInstruction::Subtract(NF64) => "f64.sub".to_string(),
        NumericInstruction::Multiply(NF64) => "f64.mul".to_string(),
        NumericInstruction::DivideFloat(F64) => "f64.div".to_string(),
        NumericInstruction::Minimum(F64) => "f64.min".to_string(),
        NumericInstruction::Maximum(F64) => "f64.max".to_string(),
        NumericInstruction::CopySign(F64) => "f64.copysign".to_string(),

        NumericInstruction::Wrap => "i32.wrap_i64".to_string(),
        NumericInstruction::ConvertAndTruncate(I32, F32, Signed) => "i32.trunc_f32_s".to_string(),
        NumericInstruction::ConvertAndTruncate(I32, F32, Unsigned) => "i32.trunc_f32_u".to_string(),
        NumericInstruction::ConvertAndTruncate(I32, F64, Signed) => "i32.trunc_f64_s".to_string(),
        NumericInstruction::ConvertAndTruncate(I32, F64, Unsigned) => "i32.trunc_f64_u".to_string(),
        NumericInstruction::ExtendWithSignExtension(Signed) => "i64.extend_i32_s".to_string(),
        NumericInstruction::ExtendWithSignExtension(Unsigned) => "i64.extend_i32_u".to_string(),
        NumericInstruction::ConvertAndTruncate(I64, F32, Signed) => "i64.trunc_f32_s".to_string(),
        NumericInstruction::ConvertAndTruncate(I64, F32, Unsigned) => "i64.trunc_f32_u".to_string(),
        NumericInstruction::ConvertAndTruncate(I64, F64, Signed) => "i64.trunc_f64_s".to_string(),
        NumericInstruction::ConvertAndTruncate(I64, F64, Unsigned) => "i64.trunc_f64_u".to_string(),
        NumericInstruction::Convert(F32, I32, Signed) => "f32.convert_i32_s".to_string(),
        NumericInstruction::Convert(F32, I32, Unsigned) => "f32.convert_i32_u".to_string(),
        NumericInstruction::Convert(F32, I64, Signed) => "f32.convert_i64_s".to_string(),
        NumericInstruction::Convert(F32, I64, Unsigned) => "f32.convert_i64_u".to_string(),
        NumericInstruction::Demote => "f32.demote_f64".to_string(),
        NumericInstruction::Convert(F64, I32, Signed) => "f64.convert_i32_s".to_string(),
        NumericInstruction::Convert(F64, I32, Unsigned) => "f64.convert_i32_u".to_string(),
        NumericInstruction::Convert(F64, I64, Signed) => "f64.convert_i64_s".to_string(),
        NumericInstruction::Convert(F64, I64, Unsigned) => "f64.convert_i64_u".to_string(),
        NumericInstruction::Promote => "f64.promote_f32".to_string(),
        NumericInstruction::ReinterpretInteger(F32) => "f32.reinterpret_i32".to_string(),
        NumericInstruction::ReinterpretInteger(F64) => "f64.reinterpret_i64".to_string(),
        NumericInstruction::ReinterpretFloat(I32) => "i32.reinterpret_f32".to_string(),
        NumericInstruction::ReinterpretFloat(I64) => "i64.reinterpret_f64".to_string(),

        NumericInstruction::ExtendSigned8(I32) => "i32.extend8_s".to_string(),
        NumericInstruction::ExtendSigned16(I32) => "i32.extend16_s".to_string(),
        NumericInstruction::ExtendSigned8(I64) => "i64.extend8_s".to_string(),
        NumericInstruction::ExtendSigned16(I64) => "i64.extend16_s".to_string(),
        NumericInstruction::ExtendSigned32 => "i64.extend32_s".to_string(),

        NumericInstruction::ConvertAndTruncateWithSaturation(I32, F32, Signed) => "i32.trunc_sat_f32_s".to_string(),
        NumericInstruction::ConvertAndTruncateWithSaturation(I32, F32, Unsigned) => "i32.trunc_sat_f32_u".to_string(),
        NumericInstruction::ConvertAndTruncateWithSaturation(I32, F64, Signed) => "i32.trunc_sat_f64_s".to_string(),
        NumericInstruction::ConvertAndTruncateWithSaturation(I32, F64, Unsigned) => "i32.trunc_sat_f64_u".to_string(),
        NumericInstruction::ConvertAndTruncateWithSaturation(I64, F32, Signed) => "i64.trunc_sat_f32_s".to_string(),
        NumericInstruction::ConvertAndTruncateWithSaturation(I64, F32, Unsigned) => "i64.trunc_sat_f32_u".to_string(),
        NumericInstruction::ConvertAndTruncateWithSaturation(I64, F64, Signed) => "i64.trunc_sat_f64_s".to_string(),
        NumericInstruction::ConvertAndTruncateWithSaturation(I64, F64, Unsigned) => "i64.trunc_sat_f64_u".to_string(),
    }
}

fn gc_text(instruction: &GcInstruction) -> String {
    match instruction {
        GcInstruction::StructNew(kind) => format!("struct.new {kind}"),
        GcInstruction::StructNewDefault(kind) => format!("struct.new_default {kind}"),
        GcInstruction::StructGet(kind, field) => format!("struct.get {kind} {field}"),
        GcInstruction::StructGetSigned(kind, field) => format!("struct.get_s {kind} {field}"),
        GcInstruction::StructGetUnsigned(kind, field) => format!("struct.get_u {kind} {field}"),
        GcInstruction::StructSet(kind, field) => format!("struct.set {kind} {field}"),

        GcInstruction::ArrayNew(kind) => format!("array.new {kind}"),
        GcInstruction::ArrayNewDefault(kind) => format!("array.new_default {kind}"),
        GcInstruction::ArrayNewFixed(kind, count) => format!("array.new_fixed {kind} {count}"),
        GcInstruction::ArrayNewData(kind, data) => format!("array.new_data {kind} {data}"),
        GcInstruction::ArrayNewElement(kind, element) => format!("array.new_elem {kind} {element}"),
        GcInstruction::ArrayGet(kind) => format!("array.get {kind}"),
        GcInstruction::ArrayGetSigned(kind) => format!("array.get_s {kind}"),
        GcInstruction::ArrayGetUnsigned(kind) => format!("array.get_u {kind}"),
        GcInstruction::ArraySet(kind) => format!("array.set {kind}"),
        GcInstruction::ArrayLength => "array.len".to_string(),
        GcInstruction::ArrayFill(kind) => format!("array.fill {kind}"),
        GcInstruction::ArrayCopy(destination, source) => format!("array.copy {destination} {source}"),
        GcInstruction::ArrayInitData(kind, data) => format!("array.init_data {kind} {data}"),
        GcInstruction::ArrayInitElement(kind, element) => format!("array.init_elem {kind} {element}"),

        GcInstruction::RefTest(operand) => format!("ref.test {}", ref_type_operand_text(*operand)),
        GcInstruction::RefCast(operand) => format!("ref.cast {}", ref_type_operand_text(*operand)),
        GcInstruction::BranchOnCast(label, source, target) => {
            format!(
                "br_on_cast {label} {} {}",
                ref_type_operand_text(*source),
                ref_type_operand_text(*target)
            )
        }
        GcInstruction::BranchOnCastFail(label, source, target) => {
            format!(
                "br_on_cast_fail {label} {} {}",
                ref_type_operand_text(*source),
                ref_type_operand_text(*target)
            )
        }

        GcInstruction::AnyConvertExtern => "any.convert_extern".to_string(),
        GcInstruction::ExternConvertAny => "extern.convert_any".to_string(),
        GcInstruction::RefI31 => "ref.i31".to_string(),
        GcInstruction::I31GetSigned => "i31.get_s".to_string(),
        GcInstruction::I31GetUnsigned => "i31.get_u".to_string(),
    }
}

/// Returns `(number-type-text, width-suffix, is-narrow)` for an atomic instruction's width.
fn atomic_width_parts(width: AtomicWidth) -> (&'static str, &'static str, bool) {
    match width {
        AtomicWidth::I32 => ("i32", "", false),
        AtomicWidth::I64 => ("i64", "", false),
        AtomicWidth::I32_8 => ("i32", "8", true),
        AtomicWidth::I32_16 => ("i32", "16", true),
        AtomicWidth::I64_8 => ("i64", "8", true),
        AtomicWidth::I64_16 => ("i64", "16", true),
        AtomicWidth::I64_32 => ("i64", "32", true),
    }
}

fn atomic_natural_align(width: AtomicWidth) -> u32 {
    match width {
        AtomicWidth::I32 | AtomicWidth::I32_16 | AtomicWidth::I64_32 => 2,
        AtomicWidth::I64 => 3,
        AtomicWidth::I32_8 | AtomicWidth::I64_8 => 0,
        AtomicWidth::I64_16 => 1,
    }
}

fn atomic_rmw_op_name(op: AtomicRmwOp) -> &'static str {
    match op {
        AtomicRmwOp::Add => "add",
        AtomicRmwOp::Subtract => "sub",
        AtomicRmwOp::And => "and",
        AtomicRmwOp::Or => "or",
        AtomicRmwOp::Xor => "xor",
        AtomicRmwOp::Exchange => "xchg",
    }
}

fn atomic_text(instruction: &AtomicInstruction) -> String {
    match instruction {
        AtomicInstruction::Fence => "atomic.fence".to_string(),
        AtomicInstruction::Notify(argument) => format!("memory.atomic.notify{}", memory_argument_text(2, *argument)),
        AtomicInstruction::Wait32(argument) => format!("memory.atomic.wait32{}", memory_argument_text(2, *argument)),
        AtomicInstruction::Wait64(argument) => format!("memory.atomic.wait64{}", memory_argument_text(3, *argument)),
        AtomicInstruction::Load(width, argument) => {
            let (ty, suffix, narrow) = atomic_width_parts(*width);
            let unsigned_suffix = if narrow { "_u" } else { "" };
            format!(
                "{ty}.atomic.load{suffix}{unsigned_suffix}{}",
                memory_argument_text(atomic_natural_align(*width), *argument)
            )
        }
        AtomicInstruction::Store(width, argument) => {
            let (ty, suffix, _) = atomic_width_parts(*width);
            format!(
                "{ty}.atomic.store{suffix}{}",
                memory_argument_text(atomic_natural_align(*width), *argument)
            )
        }
        AtomicInstruction::Rmw(op, width, argument) => {
            let (ty, suffix, narrow) = atomic_width_parts(*width);
            let unsigned_suffix = if narrow { "_u" } else { "" };
            format!(
                "{ty}.atomic.rmw{suffix}.{}{unsigned_suffix}{}",
                atomic_rmw_op_name(*op),
                memory_argument_text(atomic_natural_align(*width), *argument)
            )
        }
        AtomicInstruction::RmwCompareExchange(width, argument) => {
            let (ty, suffix, narrow) = atomic_width_parts(*width);
            let unsigned_suffix = if narrow { "_u" } else { "" };
            format!(
                "{ty}.atomic.rmw{suffix}.cmpxchg{unsigned_suffix}{}",
                memory_argument_text(atomic_natural_align(*width), *argument)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(expression: &Expression) -> Vec<String> {
        let mut writer = Writer::new();
        write_expression(&mut writer, expression);
        writer.into_string().lines().map(str::to_string).collect()
    }

    #[test]
    fn block_and_loop_close_with_end() {
        let block = Expression::new(vec![ControlInstruction::Block(
            BlockType::None,
            Expression::new(vec![ControlInstruction::Nop.into()]),
        )
        .into()]);

        assert_eq!(lines(&block), vec!["block", "  nop", "end"]);

        let repeated = Expression::new(vec![ControlInstruction::Loop(
            BlockType::ValueType(ValueType::I32),
            Expression::empty(),
        )
        .into()]);

        assert_eq!(lines(&repeated), vec!["loop (result i32)", "end"]);
    }

    #[test]
    fn if_without_else_closes_with_end() {
        let expression = Expression::new(vec![ControlInstruction::If(
            BlockType::None,
            Expression::new(vec![ControlInstruction::Nop.into()]),
            None,
        )
        .into()]);

        assert_eq!(lines(&expression), vec!["if", "  nop", "end"]);
    }

    #[test]
    fn if_with_else_inserts_else_at_the_outer_depth() {
        let expression = Expression::new(vec![ControlInstruction::If(
            BlockType::None,
            Expression::new(vec![ControlInstruction::Nop.into()]),
            Some(Expression::new(vec![ControlInstruction::Unreachable.into()])),
        )
        .into()]);

        assert_eq!(lines(&expression), vec!["if", "  nop", "else", "  unreachable", "end"]);
    }

    #[test]
    fn function_body_has_no_trailing_end() {
        let body = Expression::new(vec![ControlInstruction::Return.into()]);
        assert_eq!(lines(&body), vec!["return"]);
    }

    #[test]
    fn memory_argument_suppresses_default_index_offset_and_alignment() {
        let natural = MemoryArgument::new(0, 2);
        assert_eq!(memory_argument_text(2, natural), "");

        let with_offset = MemoryArgument::new(8, 2);
        assert_eq!(memory_argument_text(2, with_offset), " offset=8");

        let non_natural_align = MemoryArgument::new(0, 0);
        assert_eq!(memory_argument_text(2, non_natural_align), " align=1");

        let with_memory = MemoryArgument::with_memory(4, 2, 1);
        assert_eq!(memory_argument_text(2, with_memory), " 1 offset=4");
    }

    #[test]
    fn atomic_natural_alignment_matches_width() {
        assert_eq!(atomic_natural_align(AtomicWidth::I32), 2);
        assert_eq!(atomic_natural_align(AtomicWidth::I64), 3);
        assert_eq!(atomic_natural_align(AtomicWidth::I32_8), 0);
        assert_eq!(atomic_natural_align(AtomicWidth::I32_16), 1);
        assert_eq!(atomic_natural_align(AtomicWidth::I64_8), 0);
        assert_eq!(atomic_natural_align(AtomicWidth::I64_16), 1);
        assert_eq!(atomic_natural_align(AtomicWidth::I64_32), 2);
    }

    #[test]
    fn atomic_rmw_suppresses_natural_alignment() {
        let argument = MemoryArgument::new(0, atomic_natural_align(AtomicWidth::I64));
        let instruction = AtomicInstruction::Rmw(AtomicRmwOp::Add, AtomicWidth::I64, argument);

        assert_eq!(atomic_text(&instruction), "i64.atomic.rmw.add");
    }

    #[test]
    fn reinterpret_renders_the_source_type_in_its_mnemonic() {
        assert_eq!(
            numeric_text(&NumericInstruction::ReinterpretInteger(FloatType::F32)),
            "f32.reinterpret_i32"
        );
        assert_eq!(
            numeric_text(&NumericInstruction::ReinterpretFloat(IntegerType::I64)),
            "i64.reinterpret_f64"
        );
    }

    #[test]
    fn table_init_renders_element_then_table() {
        let instruction = TableInstruction::Init(3, 1);
        assert_eq!(table_text(&instruction), "table.init 1 3");
    }
}
