//! Model for types in the WebAssembly syntax, including the GC and threads proposals.

/// Number types classify numeric values.
/// Number types are transparent, meaning that their bit patterns can be observed.
/// Values of number type can be stored in memories.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#number-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{ValueType, NumberType};
///
/// assert_eq!(ValueType::I32, NumberType::I32.into());
/// assert_eq!(ValueType::I64, NumberType::I64.into());
/// assert_eq!(ValueType::F32, NumberType::F32.into());
/// assert_eq!(ValueType::F64, NumberType::F64.into());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NumberType {
    I32,
    I64,
    F32,
    F64,
}

impl From<IntegerType> for NumberType {
    fn from(kind: IntegerType) -> Self {
        match kind {
            IntegerType::I32 => NumberType::I32,
            IntegerType::I64 => NumberType::I64,
        }
    }
}

impl From<FloatType> for NumberType {
    fn from(kind: FloatType) -> Self {
        match kind {
            FloatType::F32 => NumberType::F32,
            FloatType::F64 => NumberType::F64,
        }
    }
}

/// The types 𝗂𝟥𝟤 and 𝗂𝟨𝟦 classify 32 and 64 bit integers, respectively.
/// Integers are not inherently signed or unsigned, their interpretation is determined by individual operations.
///
/// # Examples
/// ```rust
/// use wasm_forge::{ValueType, NumberType, IntegerType};
///
/// assert_eq!(ValueType::I32, IntegerType::I32.into());
/// assert_eq!(NumberType::I32, IntegerType::I32.into());
/// assert_eq!(ValueType::I64, IntegerType::I64.into());
/// assert_eq!(NumberType::I64, IntegerType::I64.into());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IntegerType {
    I32,
    I64,
}

/// The types 𝖿𝟥𝟤 and 𝖿𝟨𝟦 classify 32 and 64 bit floating-point data, respectively.
/// They correspond to the respective binary floating-point representations,
/// also known as single and double precision, as defined by the IEEE 754-2019 standard (Section 3.3).
///
/// # Examples
/// ```rust
/// use wasm_forge::{ValueType, NumberType, FloatType};
///
/// assert_eq!(ValueType::F32, FloatType::F32.into());
/// assert_eq!(NumberType::F32, FloatType::F32.into());
/// assert_eq!(ValueType::F64, FloatType::F64.into());
/// assert_eq!(NumberType::F64, FloatType::F64.into());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FloatType {
    F32,
    F64,
}

/// The heap types classify the referent of a reference value.
/// `Func` and `Extern` are the base-spec heap types; the remainder are added by the
/// GC proposal, either naming one of the built-in type hierarchies (`Any`, `Eq`, `I31`,
/// `Struct`, `Array`, and their respective bottom types `None`/`NoExtern`/`NoFunc`) or a
/// concrete type defined in the module's type section (`Index`).
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#heap-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HeapType {
    Func,
    Extern,
    Any,
    Eq,
    I31,
    Struct,
    Array,
    None,
    NoExtern,
    NoFunc,
    /// A reference to a concrete function, struct, or array type defined in the module.
    Index(crate::model::TypeIndex),
}

/// A reference type, written `(ref null? heaptype)`.
/// `funcref` and `externref` are the nullable shorthands for `(ref null func)` and
/// `(ref null extern)` respectively.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#reference-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{RefType, HeapType};
///
/// assert_eq!(RefType::FUNC_REF, RefType::new(true, HeapType::Func));
/// assert_eq!(RefType::EXTERN_REF, RefType::new(true, HeapType::Extern));
/// assert!(RefType::new(false, HeapType::Index(0)).nullable() == false);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RefType {
    nullable: bool,
    heap_type: HeapType,
}

impl RefType {
    /// The nullable `funcref` shorthand, i.e. `(ref null func)`.
    pub const FUNC_REF: RefType = RefType {
        nullable: true,
        heap_type: HeapType::Func,
    };

    /// The nullable `externref` shorthand, i.e. `(ref null extern)`.
    pub const EXTERN_REF: RefType = RefType {
        nullable: true,
        heap_type: HeapType::Extern,
    };

    /// Creates a new reference type over the given heap type.
    pub fn new(nullable: bool, heap_type: HeapType) -> Self {
        RefType {
            nullable,
            heap_type,
        }
    }

    /// Whether this reference type accepts the null value.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// The heap type this reference classifies.
    pub fn heap_type(&self) -> HeapType {
        self.heap_type
    }
}

/// Reference types classify first-class references to objects in the runtime store.
/// The type 𝖿𝗎𝗇𝖼𝗋𝖾𝖿 denotes the infinite union of all references to functions,
/// regardless of their function types.
/// The type 𝖾𝗑𝗍𝖾𝗋𝗇𝗋𝖾𝖿 denotes the infinite union of all references to objects owned by the
/// embedder and that can be passed into WebAssembly under this type.
/// Reference types are opaque, meaning that neither their size nor their bit pattern can be observed.
/// Values of reference type can be stored in tables.
///
/// This is the base-spec shorthand retained alongside the richer `RefType`/`HeapType` model
/// added by the GC proposal; every `ReferenceType` converts losslessly to a `RefType`.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#reference-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{ValueType, ReferenceType};
///
/// assert_eq!(ValueType::FunctionReference, ReferenceType::Function.into());
/// assert_eq!(ValueType::ExternalReference, ReferenceType::External.into());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ReferenceType {
    Function,
    External,
}

impl From<ReferenceType> for RefType {
    fn from(kind: ReferenceType) -> Self {
        match kind {
            ReferenceType::Function => RefType::FUNC_REF,
            ReferenceType::External => RefType::EXTERN_REF,
        }
    }
}

/// Value types classify the individual values that WebAssembly code can compute with and the values that a variable accepts.
/// They are either number types, the vector type, or reference types.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#value-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{ValueType, ReferenceType, IntegerType, FloatType, NumberType, RefType, HeapType};
///
/// assert_eq!(ValueType::I32, IntegerType::I32.into());
/// assert_eq!(ValueType::I32, NumberType::I32.into());
/// assert_eq!(ValueType::I64, IntegerType::I64.into());
/// assert_eq!(ValueType::I64, NumberType::I64.into());
/// assert_eq!(ValueType::F32, FloatType::F32.into());
/// assert_eq!(ValueType::F32, NumberType::F32.into());
/// assert_eq!(ValueType::F64, FloatType::F64.into());
/// assert_eq!(ValueType::F64, NumberType::F64.into());
/// assert_eq!(ValueType::FunctionReference, ReferenceType::Function.into());
/// assert_eq!(ValueType::ExternalReference, ReferenceType::External.into());
/// assert_eq!(
///     ValueType::Reference(RefType::new(false, HeapType::Index(2))),
///     RefType::new(false, HeapType::Index(2)).into()
/// );
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
    V128,
    FunctionReference,
    ExternalReference,
    /// A GC-proposal typed reference, `(ref null? heaptype)`.
    Reference(RefType),
}

impl<T> From<T> for ValueType
where
    T: Into<NumberType>,
{
    fn from(kind: T) -> Self {
        match kind.into() {
            NumberType::I32 => ValueType::I32,
            NumberType::I64 => ValueType::I64,
            NumberType::F32 => ValueType::F32,
            NumberType::F64 => ValueType::F64,
        }
    }
}

impl From<ReferenceType> for ValueType {
    fn from(kind: ReferenceType) -> Self {
        match kind {
            ReferenceType::Function => ValueType::FunctionReference,
            ReferenceType::External => ValueType::ExternalReference,
        }
    }
}

impl From<RefType> for ValueType {
    fn from(kind: RefType) -> Self {
        ValueType::Reference(kind)
    }
}

/// Packed storage types are only permitted inside struct and array field types; they are not
/// valid value types and cannot appear on the operand stack directly. Accessing a packed field
/// requires a signedness annotation (`_s`/`_u`) on the corresponding `struct.get`/`array.get`.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#packed-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PackedType {
    I8,
    I16,
}

/// The storage type of a struct or array field: either a full value type or a narrower
/// packed type.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#storage-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StorageType {
    Value(ValueType),
    Packed(PackedType),
}

impl From<ValueType> for StorageType {
    fn from(kind: ValueType) -> Self {
        StorageType::Value(kind)
    }
}

impl From<PackedType> for StorageType {
    fn from(kind: PackedType) -> Self {
        StorageType::Packed(kind)
    }
}

/// A field of a struct or array type: its storage type and whether it can be mutated after
/// the aggregate is created with `struct.new`/`array.new`.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#field-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{FieldType, Mutability, ValueType};
///
/// let field = FieldType::new(ValueType::I32.into(), Mutability::Mutable);
///
/// assert_eq!(field.mutability(), Mutability::Mutable);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FieldType {
    storage_type: StorageType,
    mutability: Mutability,
}

impl FieldType {
    /// Creates a new field type with the given storage type and mutability.
    pub fn new(storage_type: StorageType, mutability: Mutability) -> Self {
        FieldType {
            storage_type,
            mutability,
        }
    }

    /// The storage type of this field.
    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    /// The mutability of this field.
    pub fn mutability(&self) -> Mutability {
        self.mutability
    }
}

/// A struct type is an ordered sequence of fields, each with its own storage type and
/// mutability. Fields are accessed by zero-based index.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#struct-types>
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StructType {
    fields: Vec<FieldType>,
}

impl StructType {
    /// Creates a new struct type with the given fields, in declaration order.
    pub fn new(fields: Vec<FieldType>) -> Self {
        StructType { fields }
    }

    /// The fields of this struct type, in declaration order.
    pub fn fields(&self) -> &[FieldType] {
        &self.fields
    }
}

/// An array type describes a single, homogeneously-typed, dynamically-sized field.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#array-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ArrayType {
    element_type: FieldType,
}

impl ArrayType {
    /// Creates a new array type over the given element field type.
    pub fn new(element_type: FieldType) -> Self {
        ArrayType { element_type }
    }

    /// The field type of this array's elements.
    pub fn element_type(&self) -> FieldType {
        self.element_type
    }
}

/// Function types classify the signature of functions,
/// mapping a vector of parameters to a vector of results.
/// They are also used to classify the inputs and outputs of instructions
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#function-types>
///
/// # Examples
///
/// ## Input & Output
/// ```rust
/// use wasm_forge::{FunctionType, ResultType};
///
/// let function_type = FunctionType::new(ResultType::empty(), ResultType::empty());
///
/// assert!(function_type.parameters().is_empty());
/// assert!(function_type.results().is_empty());
/// ```
///
/// ## Input Only
/// ```rust
/// use wasm_forge::{FunctionType, ResultType, ValueType};
///
/// let function_type = FunctionType::side_effect(ResultType::from(vec![ValueType::I32]));
///
/// assert_eq!(function_type.parameters().kinds(), &[ValueType::I32]);
/// assert!(function_type.results().is_empty());
/// ```
///
/// ## Output Only
/// ```rust
/// use wasm_forge::{FunctionType, ResultType, ValueType};
///
/// let function_type = FunctionType::nullary(ResultType::from(vec![ValueType::I32]));
///
/// assert!(function_type.parameters().is_empty());
/// assert_eq!(function_type.results().kinds(), &[ValueType::I32]);
/// ```
///
/// ## No Input or Output
/// ```rust
/// use wasm_forge::{FunctionType, ResultType, ValueType};
///
/// let function_type = FunctionType::runnable();
///
/// assert!(function_type.parameters().is_empty());
/// assert!(function_type.results().is_empty());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FunctionType {
    parameters: ResultType,
    results: ResultType,
}

impl FunctionType {
    /// Creates a new function signature with the given parameter and result types.
    pub fn new(parameters: ResultType, results: ResultType) -> Self {
        FunctionType {
            parameters,
            results,
        }
    }

    /// Creates a new function signature with the given parameter types and no result types.
    pub fn side_effect(parameters: ResultType) -> Self {
        FunctionType {
            parameters,
            results: ResultType::empty(),
        }
    }

    /// Creates a new function signature with the given result types and no parameter types.
    pub fn nullary(results: ResultType) -> Self {
        FunctionType {
            parameters: ResultType::empty(),
            results,
        }
    }

    /// Creates a new function signature with the no parameter or result types.
    pub fn runnable() -> Self {
        FunctionType {
            parameters: ResultType::empty(),
            results: ResultType::empty(),
        }
    }

    /// The parameter types of this `FunctionType`.
    pub fn parameters(&self) -> &ResultType {
        &self.parameters
    }

    /// The result types of this `FunctionType`.
    pub fn results(&self) -> &ResultType {
        &self.results
    }
}

/// The composite type underlying a recursive/sub type: a function signature, or a GC
/// struct or array layout.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#composite-types>
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CompositeType {
    Function(FunctionType),
    Struct(StructType),
    Array(ArrayType),
}

impl From<FunctionType> for CompositeType {
    fn from(kind: FunctionType) -> Self {
        CompositeType::Function(kind)
    }
}

impl From<StructType> for CompositeType {
    fn from(kind: StructType) -> Self {
        CompositeType::Struct(kind)
    }
}

impl From<ArrayType> for CompositeType {
    fn from(kind: ArrayType) -> Self {
        CompositeType::Array(kind)
    }
}

/// A sub type declares a composite type together with its explicit supertypes (if any) and
/// whether it is final, i.e. whether further types are permitted to declare it as a
/// supertype.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#sub-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{SubType, FunctionType, ResultType};
///
/// let sub_type = SubType::plain(FunctionType::runnable().into());
///
/// assert!(sub_type.is_final());
/// assert!(sub_type.supertypes().is_empty());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubType {
    is_final: bool,
    supertypes: Vec<crate::model::TypeIndex>,
    composite_type: CompositeType,
}

impl SubType {
    /// Creates a new sub type with explicit finality and supertypes.
    pub fn new(
        is_final: bool,
        supertypes: Vec<crate::model::TypeIndex>,
        composite_type: CompositeType,
    ) -> Self {
        SubType {
            is_final,
            supertypes,
            composite_type,
        }
    }

    /// Creates a final sub type with no supertypes, the common case for a type that does
    /// not participate in the GC subtyping hierarchy.
    pub fn plain(composite_type: CompositeType) -> Self {
        SubType {
            is_final: true,
            supertypes: Vec::new(),
            composite_type,
        }
    }

    /// Whether this type may be used as a supertype by another type in the module.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// The explicit supertypes of this type, at most one under the current proposal.
    pub fn supertypes(&self) -> &[crate::model::TypeIndex] {
        &self.supertypes
    }

    /// The underlying composite type.
    pub fn composite_type(&self) -> &CompositeType {
        &self.composite_type
    }
}

/// A recursion group bundles one or more sub types that may refer to each other's indices,
/// as if they were all defined simultaneously. A singleton recursion group of one
/// supertype-free, final sub type is the ordinary (pre-GC) case of a single type
/// definition.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#recursive-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{RecursiveType, SubType, FunctionType};
///
/// let recursive_type = RecursiveType::plain(FunctionType::runnable().into());
///
/// assert_eq!(recursive_type.sub_types().len(), 1);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RecursiveType {
    sub_types: Vec<SubType>,
}

impl RecursiveType {
    /// Creates a new recursion group from the given sub types.
    pub fn new(sub_types: Vec<SubType>) -> Self {
        RecursiveType { sub_types }
    }

    /// Creates a singleton recursion group wrapping a single, final, supertype-free
    /// composite type.
    pub fn plain(composite_type: CompositeType) -> Self {
        RecursiveType {
            sub_types: vec![SubType::plain(composite_type)],
        }
    }

    /// The sub types defined by this recursion group.
    pub fn sub_types(&self) -> &[SubType] {
        &self.sub_types
    }
}

impl From<FunctionType> for RecursiveType {
    fn from(kind: FunctionType) -> Self {
        RecursiveType::plain(kind.into())
    }
}

/// Result types classify the result of executing instructions or functions,
/// which is a sequence of values, written with brackets.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#result-types>
///
/// # Examples
///
/// ## Empty
/// ```rust
/// use wasm_forge::ResultType;
///
/// let result_type = ResultType::empty();
///
/// assert_eq!(result_type.len(), 0);
/// assert!(result_type.is_empty());
/// assert_eq!(result_type.kinds(), &[]);
/// ```
///
/// ## Non-Empty
/// ```rust
/// use wasm_forge::{ResultType, IntegerType, FloatType, ReferenceType, ValueType};
///
/// let result_type = ResultType::new(vec![
///     IntegerType::I32.into(),
///     IntegerType::I64.into(),
///     FloatType::F32.into(),
///     FloatType::F64.into(),
///     ReferenceType::Function.into(),
///     ReferenceType::External.into(),
/// ]);
///
/// assert_eq!(result_type.len(), 6);
/// assert!(!result_type.is_empty());
/// assert_eq!(
///     result_type.kinds(),
///     &[
///         ValueType::I32,
///         ValueType::I64,
///         ValueType::F32,
///         ValueType::F64,
///         ValueType::FunctionReference,
///         ValueType::ExternalReference,
///     ]
/// );
/// assert_eq!(
///     result_type,
///     vec![
///         ValueType::I32,
///         ValueType::I64,
///         ValueType::F32,
///         ValueType::F64,
///         ValueType::FunctionReference,
///         ValueType::ExternalReference,
///     ].into()
/// );
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ResultType {
    kinds: Vec<ValueType>,
}

impl ResultType {
    /// Creates a new `ResultType` with the given value types.
    pub fn new(kinds: Vec<ValueType>) -> Self {
        ResultType { kinds }
    }

    /// Creates a new empty `ResultType`.
    pub fn empty() -> Self {
        ResultType { kinds: vec![] }
    }

    /// A reference to a slice of the `ValueType`s.
    pub fn kinds(&self) -> &[ValueType] {
        &self.kinds
    }

    /// The length of the `ValueType` vector.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if this `ResultType` has a length of zero, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl From<Vec<ValueType>> for ResultType {
    fn from(kinds: Vec<ValueType>) -> Self {
        ResultType { kinds }
    }
}

/// Limits classify the size range of resizeable storage associated with memory types and table types.
/// The threads proposal adds an optional `shared` flag: a shared memory must be accessed
/// atomically from concurrent agents and must declare an explicit maximum.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#limits>
/// See <https://webassembly.github.io/threads/core/syntax/types.html#limits>
///
/// # Examples
///
/// ## New
/// ```rust
/// use wasm_forge::Limit;
///
/// let max = Some(2);
/// let min = 0;
/// let limit = Limit::new(min, max);
///
/// assert_eq!(limit.min(), min);
/// assert_eq!(limit.max(), max);
/// assert!(!limit.is_shared());
/// ```
///
/// ## Unbounded
/// ```rust
/// use wasm_forge::Limit;
///
/// assert_eq!(Limit::unbounded(2), Limit::new(2, None));
/// ```
///
/// ## Bounded
/// ```rust
/// use wasm_forge::Limit;
///
/// assert_eq!(Limit::bounded(2, 5), Limit::new(2, Some(5)));
/// ```
///
/// ## Shared
/// ```rust
/// use wasm_forge::Limit;
///
/// let limit = Limit::shared(1, 4);
///
/// assert!(limit.is_shared());
/// assert_eq!(limit.max(), Some(4));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Limit {
    min: u32,
    max: Option<u32>,
    shared: bool,
}

impl Limit {
    /// Creates a new limit with a required minimum and optional maximum.
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Limit {
            min,
            max,
            shared: false,
        }
    }

    /// Creates a new limit with a required minimum and no maximum.
    pub fn unbounded(min: u32) -> Self {
        Limit::new(min, None)
    }

    /// Creates a new limit with a required minimum and maximum.
    pub fn bounded(min: u32, max: u32) -> Self {
        Limit::new(min, Some(max))
    }

    /// Creates a new shared limit (threads proposal) with the required minimum and maximum.
    /// Shared memories must declare an explicit maximum.
    pub fn shared(min: u32, max: u32) -> Self {
        Limit {
            min,
            max: Some(max),
            shared: true,
        }
    }

    /// The minimum value of the limit.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// The optional maximum value of the limit.
    pub fn max(&self) -> Option<u32> {
        self.max
    }

    /// Whether this limit is shared across agents (threads proposal). Only meaningful for
    /// memory types.
    pub fn is_shared(&self) -> bool {
        self.shared
    }
}

/// Memory types classify linear memories and their size range.
/// The limits constrain the minimum and optionally the maximum size of a memory.
/// The limits are given in units of page size.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#memory-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{Limit, MemoryType};
///
/// let limit = Limit::unbounded(0);
/// let memory_type = MemoryType::new(limit.clone());
///
/// assert_eq!(memory_type.limits(), &limit);
/// assert_eq!(memory_type, limit.into());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MemoryType {
    limits: Limit,
}

impl MemoryType {
    /// Creates a new memory type from the given limits.
    pub fn new(limit: Limit) -> Self {
        MemoryType { limits: limit }
    }

    /// The limits of the number of pages for this `MemoryType`.
    pub fn limits(&self) -> &Limit {
        &self.limits
    }
}

impl From<Limit> for MemoryType {
    fn from(limit: Limit) -> Self {
        MemoryType { limits: limit }
    }
}

/// Table types classify tables over elements of reference type within a size range.
/// Like memories, tables are constrained by limits for their minimum and optionally maximum size.
/// The limits are given in numbers of entries.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#table-types>
///
/// # Examples
/// ```rust
/// use wasm_forge::{Limit, TableType, ReferenceType};
///
/// let limit = Limit::unbounded(0);
/// let table_type = TableType::new( ReferenceType::External,limit.clone());
///
/// assert_eq!(table_type.limits(), &limit);
/// assert_eq!(table_type.kind(), ReferenceType::External.into());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TableType {
    limits: Limit,
    kind: RefType,
}

impl TableType {
    /// Creates a new `TableType` for the given limits and element reference type.
    pub fn new<T: Into<RefType>>(kind: T, limits: Limit) -> Self {
        TableType {
            limits,
            kind: kind.into(),
        }
    }

    /// The limits of the number of elements for this `TableType`.
    pub fn limits(&self) -> &Limit {
        &self.limits
    }

    /// The reference type of the elements of this `TableType`.
    pub fn kind(&self) -> RefType {
        self.kind
    }
}

/// Global types classify global variables, which hold a value and can either be mutable or immutable.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#global-types>
///
/// # Examples
/// ## Mutable
/// ```rust
/// use wasm_forge::{ValueType, GlobalType, Mutability};
///
/// let mutable = GlobalType::mutable(ValueType::I64);
///
/// assert_eq!(mutable.mutability(), Mutability::Mutable);
/// assert_eq!(mutable.kind(), ValueType::I64);
/// assert_eq!(mutable, GlobalType::new( ValueType::I64,Mutability::Mutable));
/// ```
///
/// ## Immutable
/// ```rust
/// use wasm_forge::{ValueType, GlobalType, Mutability};
///
/// let immutable = GlobalType::immutable(ValueType::F64);
///
/// assert_eq!(immutable.mutability(), Mutability::Immutable);
/// assert_eq!(immutable.kind(), ValueType::F64);
/// assert_eq!(immutable, GlobalType::new( ValueType::F64,Mutability::Immutable));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GlobalType {
    mutability: Mutability,
    kind: ValueType,
}

impl GlobalType {
    /// Creates a new `GlobalType` for a global variable with the given mutability and value type.
    pub fn new(kind: ValueType, mutability: Mutability) -> Self {
        GlobalType { mutability, kind }
    }

    /// Creates a new `GlobalType` for a mutable global variable.
    pub fn mutable(kind: ValueType) -> Self {
        GlobalType {
            mutability: Mutability::Mutable,
            kind,
        }
    }

    /// Creates a new `GlobalType` for an immutable (i.e. constant) global variable.
    pub fn immutable(kind: ValueType) -> Self {
        GlobalType {
            mutability: Mutability::Immutable,
            kind,
        }
    }

    /// The `ValueType` of the global variable defined by this `GlobalType`.
    pub fn kind(&self) -> ValueType {
        self.kind
    }

    /// The mutability (i.e. variable versus constant) of the global variable type.
    pub fn mutability(&self) -> Mutability {
        self.mutability
    }
}

/// The mutability of a global variable or a struct/array field.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Mutability {
    Mutable,
    Immutable,
}
