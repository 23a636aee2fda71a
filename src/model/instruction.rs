//! Model for instructions in the WebAssembly syntax, including the GC, threads, and
//! tail-call proposals.

use crate::model::indices::{
    DataIndex, ElementIndex, FieldIndex, FunctionIndex, GlobalIndex, LabelIndex, LocalIndex,
    MemoryIndex, TableIndex, TypeIndex,
};
use crate::model::types::{FloatType, HeapType, IntegerType, NumberType, ValueType};

/// An instruction is a single step of a program's execution, which are organized into
/// sequences called expressions.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html>
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Numeric(NumericInstruction),
    Reference(ReferenceInstruction),
    Parametric(ParametricInstruction),
    Variable(VariableInstruction),
    Table(TableInstruction),
    Memory(MemoryInstruction),
    Control(ControlInstruction),
    /// An instruction of the GC proposal's `0xFB` prefixed opcode space.
    GarbageCollection(GcInstruction),
    /// An instruction of the threads proposal's `0xFE` prefixed opcode space.
    Atomic(AtomicInstruction),
}

macro_rules! from_variant {
    ($variant:ident, $kind:ty) => {
        impl From<$kind> for Instruction {
            fn from(instruction: $kind) -> Self {
                Instruction::$variant(instruction)
            }
        }
    };
}

from_variant!(Numeric, NumericInstruction);
from_variant!(Reference, ReferenceInstruction);
from_variant!(Parametric, ParametricInstruction);
from_variant!(Variable, VariableInstruction);
from_variant!(Table, TableInstruction);
from_variant!(Memory, MemoryInstruction);
from_variant!(Control, ControlInstruction);
from_variant!(GarbageCollection, GcInstruction);
from_variant!(Atomic, AtomicInstruction);

/// Numeric instructions provide basic operations over numeric values of specific type.
/// These operations closely match corresponding operations available in hardware.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#numeric-instructions>
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NumericInstruction {
    I32Constant(i32),
    I64Constant(i64),
    F32Constant(f32),
    F64Constant(f64),

    CountLeadingZeros(IntegerType),
    CountTrailingZeros(IntegerType),
    CountOnes(IntegerType),
    AbsoluteValue(FloatType),
    Negate(FloatType),
    SquareRoot(FloatType),
    Ceiling(FloatType),
    Floor(FloatType),
    Truncate(FloatType),
    Nearest(FloatType),

    Add(NumberType),
    Subtract(NumberType),
    Multiply(NumberType),
    DivideInteger(IntegerType, SignExtension),
    DivideFloat(FloatType),
    Remainder(IntegerType, SignExtension),
    And(IntegerType),
    Or(IntegerType),
    Xor(IntegerType),
    ShiftLeft(IntegerType),
    ShiftRight(IntegerType, SignExtension),
    RotateLeft(IntegerType),
    RotateRight(IntegerType),
    Minimum(FloatType),
    Maximum(FloatType),
    CopySign(FloatType),

    EqualToZero(IntegerType),
    Equal(NumberType),
    NotEqual(NumberType),
    LessThanInteger(IntegerType, SignExtension),
    LessThanFloat(FloatType),
    GreaterThanInteger(IntegerType, SignExtension),
    GreaterThanFloat(FloatType),
    LessThanOrEqualToInteger(IntegerType, SignExtension),
    LessThanOrEqualToFloat(FloatType),
    GreaterThanOrEqualToInteger(IntegerType, SignExtension),
    GreaterThanOrEqualToFloat(FloatType),

    ExtendSigned8(IntegerType),
    ExtendSigned16(IntegerType),
    ExtendSigned32,
    Wrap,
    ExtendWithSignExtension(SignExtension),
    ConvertAndTruncate(IntegerType, FloatType, SignExtension),
    ConvertAndTruncateWithSaturation(IntegerType, FloatType, SignExtension),
    Demote,
    Promote,
    Convert(FloatType, IntegerType, SignExtension),
    ReinterpretFloat(IntegerType),
    ReinterpretInteger(FloatType),
}

/// Whether an integer operand is to be interpreted as signed or unsigned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SignExtension {
    Signed,
    Unsigned,
}

/// Reference instructions produce, consume, and manipulate references to function,
/// external, or GC-typed objects.
///
/// See <https://webassembly.github.io/gc/core/syntax/instructions.html#reference-instructions>
#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceInstruction {
    /// Produces the null reference value for the given heap type.
    Null(HeapType),
    IsNull,
    /// Produces a reference to the given function.
    Function(FunctionIndex),
    /// Fails the program with a trap if the top-of-stack reference is null, `(ref.as_non_null)`.
    AsNonNull,
    /// Branches if the top-of-stack reference is null, else leaves it on the stack.
    BranchOnNull(LabelIndex),
    /// Branches if the top-of-stack reference is non-null, else leaves it on the stack.
    BranchOnNonNull(LabelIndex),
    /// Tests whether a reference is an instance of the given heap type, `(ref.test)`.
    Test(RefTypeOperand),
    /// Casts a reference to the given heap type, trapping on mismatch, `(ref.cast)`.
    Cast(RefTypeOperand),
}

/// The operand of `ref.test`/`ref.cast`/`br_on_cast`: a reference type, which may be
/// nullable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RefTypeOperand {
    pub nullable: bool,
    pub heap_type: HeapType,
}

/// Parametric instructions operate on an operand of any value type rather than a specific
/// type, as in the case with the other instructions.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#parametric-instructions>
#[derive(Clone, Debug, PartialEq)]
pub enum ParametricInstruction {
    Drop,
    /// An explicitly-typed `select` for a vector of alternatives rather than a single value.
    Select(Option<Vec<ValueType>>),
}

/// Variable instructions are concerned with access to local or global variables.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#variable-instructions>
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VariableInstruction {
    LocalGet(LocalIndex),
    LocalSet(LocalIndex),
    LocalTee(LocalIndex),
    GlobalGet(GlobalIndex),
    GlobalSet(GlobalIndex),
}

/// Table instructions manipulate table entries.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#table-instructions>
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TableInstruction {
    Get(TableIndex),
    Set(TableIndex),
    Size(TableIndex),
    Grow(TableIndex),
    Fill(TableIndex),
    Copy(TableIndex, TableIndex),
    Init(ElementIndex, TableIndex),
    ElementDrop(ElementIndex),
}

/// Memory instructions access a linear memory.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#memory-instructions>
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MemoryInstruction {
    Load(NumberType, MemoryArgument),
    Store(NumberType, MemoryArgument),
    Load8(IntegerType, SignExtension, MemoryArgument),
    Load16(IntegerType, SignExtension, MemoryArgument),
    Load32(SignExtension, MemoryArgument),
    Store8(IntegerType, MemoryArgument),
    Store16(IntegerType, MemoryArgument),
    Store32(MemoryArgument),
    Size(MemoryIndex),
    Grow(MemoryIndex),
    Fill(MemoryIndex),
    Copy(MemoryIndex, MemoryIndex),
    Init(DataIndex, MemoryIndex),
    DataDrop(DataIndex),
}

/// The static operand of a memory instruction, giving its expected alignment (as a power of
/// two), byte offset, and (multi-memory) target memory.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#memory-instructions>
///
/// # Examples
/// ```rust
/// use wasm_forge::MemoryArgument;
///
/// let argument = MemoryArgument::new(0, 4);
///
/// assert_eq!(argument.align(), 4);
/// assert_eq!(argument.offset(), 0);
/// assert_eq!(argument.memory_index(), 0);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MemoryArgument {
    align: u32,
    offset: u32,
    memory_index: MemoryIndex,
}

impl MemoryArgument {
    /// Creates a new `MemoryArgument` for memory 0 with the given offset and alignment.
    pub fn new(offset: u32, align: u32) -> Self {
        MemoryArgument {
            align,
            offset,
            memory_index: 0,
        }
    }

    /// Creates a new `MemoryArgument` for the given memory with an offset of zero.
    pub fn default_offset(align: u32, memory_index: MemoryIndex) -> Self {
        MemoryArgument {
            align,
            offset: 0,
            memory_index,
        }
    }

    /// Creates a new `MemoryArgument` for the given memory, offset, and alignment.
    pub fn with_memory(offset: u32, align: u32, memory_index: MemoryIndex) -> Self {
        MemoryArgument {
            align,
            offset,
            memory_index,
        }
    }

    /// The expected alignment of this memory access, as a power of two.
    pub fn align(&self) -> u32 {
        self.align
    }

    /// The byte offset added to the dynamic address operand.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The index of the memory this argument addresses.
    pub fn memory_index(&self) -> MemoryIndex {
        self.memory_index
    }
}

/// Control instructions direct the flow of control in an expression,
/// all of which are stack-polymorphic.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#control-instructions>
#[derive(Clone, Debug, PartialEq)]
pub enum ControlInstruction {
    Nop,
    Unreachable,
    Block(BlockType, Expression),
    Loop(BlockType, Expression),
    If(BlockType, Expression, Option<Expression>),
    Branch(LabelIndex),
    BranchIf(LabelIndex),
    BranchTable(Vec<LabelIndex>, LabelIndex),
    Return,
    Call(FunctionIndex),
    CallIndirect(TypeIndex, TableIndex),
    /// A tail call, `return_call`, added by the tail-call proposal.
    ReturnCall(FunctionIndex),
    /// A tail call through a table, `return_call_indirect`, added by the tail-call proposal.
    ReturnCallIndirect(TypeIndex, TableIndex),
}

/// The type of a structured control instruction's nested expression, which is either empty,
/// a single value type, or an index into the type section for a full function type.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#control-instructions>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BlockType {
    None,
    Index(TypeIndex),
    ValueType(ValueType),
}

/// Instructions added by the garbage collection proposal: allocation, field access, and
/// casting for struct, array, and `i31` reference types.
///
/// See <https://webassembly.github.io/gc/core/syntax/instructions.html>
#[derive(Clone, Debug, PartialEq)]
pub enum GcInstruction {
    StructNew(TypeIndex),
    StructNewDefault(TypeIndex),
    StructGet(TypeIndex, FieldIndex),
    StructGetSigned(TypeIndex, FieldIndex),
    StructGetUnsigned(TypeIndex, FieldIndex),
    StructSet(TypeIndex, FieldIndex),

    ArrayNew(TypeIndex),
    ArrayNewDefault(TypeIndex),
    ArrayNewFixed(TypeIndex, u32),
    ArrayNewData(TypeIndex, DataIndex),
    ArrayNewElement(TypeIndex, ElementIndex),
    ArrayGet(TypeIndex),
    ArrayGetSigned(TypeIndex),
    ArrayGetUnsigned(TypeIndex),
    ArraySet(TypeIndex),
    ArrayLength,
    ArrayFill(TypeIndex),
    ArrayCopy(TypeIndex, TypeIndex),
    ArrayInitData(TypeIndex, DataIndex),
    ArrayInitElement(TypeIndex, ElementIndex),

    RefTest(RefTypeOperand),
    RefCast(RefTypeOperand),
    BranchOnCast(LabelIndex, RefTypeOperand, RefTypeOperand),
    BranchOnCastFail(LabelIndex, RefTypeOperand, RefTypeOperand),

    AnyConvertExtern,
    ExternConvertAny,

    RefI31,
    I31GetSigned,
    I31GetUnsigned,
}

/// Atomic instructions, added by the threads proposal, perform synchronized access to
/// shared linear memory.
///
/// See <https://webassembly.github.io/threads/core/syntax/instructions.html#atomic-memory-instructions>
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AtomicInstruction {
    Fence,
    Notify(MemoryArgument),
    Wait32(MemoryArgument),
    Wait64(MemoryArgument),

    Load(AtomicWidth, MemoryArgument),
    Store(AtomicWidth, MemoryArgument),
    Rmw(AtomicRmwOp, AtomicWidth, MemoryArgument),
    /// A compare-and-exchange read-modify-write operation.
    RmwCompareExchange(AtomicWidth, MemoryArgument),
}

/// The width of the memory access performed by an atomic instruction: the natural width of
/// the given integer type, or a narrower, zero-extended access.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AtomicWidth {
    I32,
    I64,
    I32_8,
    I32_16,
    I64_8,
    I64_16,
    I64_32,
}

/// The read-modify-write operation performed by an atomic RMW instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AtomicRmwOp {
    Add,
    Subtract,
    And,
    Or,
    Xor,
    Exchange,
}

/// Expressions are classified by result types
/// which describe the sequence of values they compute and which will be pushed onto the stack upon completion.
///
/// See <https://webassembly.github.io/spec/core/syntax/instructions.html#expressions>
///
/// # Examples
/// ```rust
/// use wasm_forge::{Expression, Instruction, ControlInstruction};
///
/// let expression = Expression::new(vec![ControlInstruction::Nop.into()]);
///
/// assert_eq!(expression.len(), 1);
/// assert!(!expression.is_empty());
/// assert_eq!(expression.instructions(), &[ControlInstruction::Nop.into()]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    instructions: Vec<Instruction>,
}

impl Expression {
    /// Creates a new expression from the given instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Expression { instructions }
    }

    /// Creates a new expression with no instructions.
    pub fn empty() -> Self {
        Expression {
            instructions: vec![],
        }
    }

    /// The instructions that make up this expression, in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The number of instructions in this expression.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if this expression has no instructions, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
