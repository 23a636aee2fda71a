//! Renders the WebAssembly type grammar as WAT s-expression fragments.

use crate::model::*;

/// Renders a heap type: an abstract keyword, or `<index>` for a concrete type.
pub fn heap_type(kind: HeapType) -> String {
    match kind {
        HeapType::Func => "func".to_string(),
        HeapType::Extern => "extern".to_string(),
        HeapType::Any => "any".to_string(),
        HeapType::Eq => "eq".to_string(),
        HeapType::I31 => "i31".to_string(),
        HeapType::Struct => "struct".to_string(),
        HeapType::Array => "array".to_string(),
        HeapType::None => "none".to_string(),
        HeapType::NoExtern => "noextern".to_string(),
        HeapType::NoFunc => "nofunc".to_string(),
        HeapType::Index(index) => index.to_string(),
    }
}

/// Renders a reference type, preferring the `funcref`/`externref` shorthand.
pub fn ref_type(kind: RefType) -> String {
    match (kind.nullable(), kind.heap_type()) {
        (true, HeapType::Func) => "funcref".to_string(),
        (true, HeapType::Extern) => "externref".to_string(),
        (true, inner) => format!("(ref null {})", heap_type(inner)),
        (false, inner) => format!("(ref {})", heap_type(inner)),
    }
}

/// Renders the base-spec reference type shorthand.
pub fn reference_type(kind: ReferenceType) -> &'static str {
    match kind {
        ReferenceType::Function => "funcref",
        ReferenceType::External => "externref",
    }
}

/// Renders a value type.
pub fn value_type(kind: ValueType) -> String {
    match kind {
        ValueType::I32 => "i32".to_string(),
        ValueType::I64 => "i64".to_string(),
        ValueType::F32 => "f32".to_string(),
        ValueType::F64 => "f64".to_string(),
        ValueType::V128 => "v128".to_string(),
        ValueType::FunctionReference => "funcref".to_string(),
        ValueType::ExternalReference => "externref".to_string(),
        ValueType::Reference(ref_type_kind) => ref_type(ref_type_kind),
    }
}

/// Renders a struct/array field's storage type.
pub fn storage_type(kind: StorageType) -> String {
    match kind {
        StorageType::Value(value_type_kind) => value_type(value_type_kind),
        StorageType::Packed(PackedType::I8) => "i8".to_string(),
        StorageType::Packed(PackedType::I16) => "i16".to_string(),
    }
}

/// Renders a field type, wrapping mutable fields in `(mut …)`.
pub fn field_type(kind: FieldType) -> String {
    match kind.mutability() {
        Mutability::Mutable => format!("(mut {})", storage_type(kind.storage_type())),
        Mutability::Immutable => storage_type(kind.storage_type()),
    }
}

/// Renders a function type as `(func (param …) (result …))`, omitting either clause when empty.
pub fn function_type(kind: &FunctionType) -> String {
    let mut text = String::from("(func");

    if !kind.parameters().is_empty() {
        let params: Vec<_> = kind.parameters().kinds().iter().copied().map(value_type).collect();
        text.push_str(&format!(" (param {})", params.join(" ")));
    }

    if !kind.results().is_empty() {
        let results: Vec<_> = kind.results().kinds().iter().copied().map(value_type).collect();
        text.push_str(&format!(" (result {})", results.join(" ")));
    }

    text.push(')');
    text
}

/// Renders a struct type as `(struct (field …) …)`.
pub fn struct_type(kind: &StructType) -> String {
    let fields: Vec<_> = kind
        .fields()
        .iter()
        .copied()
        .map(|field| format!("(field {})", field_type(field)))
        .collect();

    format!("(struct {})", fields.join(" "))
}

/// Renders an array type as `(array <field>)`.
pub fn array_type(kind: ArrayType) -> String {
    format!("(array {})", field_type(kind.element_type()))
}

/// Renders a composite type, dispatching on function, struct, or array.
pub fn composite_type(kind: &CompositeType) -> String {
    match kind {
        CompositeType::Function(function_type_kind) => function_type(function_type_kind),
        CompositeType::Struct(struct_type_kind) => struct_type(struct_type_kind),
        CompositeType::Array(array_type_kind) => array_type(*array_type_kind),
    }
}

/// Renders a sub type, wrapping in `(sub final? <supertypes…> <composite>)` only when it
/// declares a non-default finality or an explicit supertype.
pub fn sub_type(kind: &SubType) -> String {
    if kind.is_final() && kind.supertypes().is_empty() {
        return composite_type(kind.composite_type());
    }

    let mut text = String::from("(sub");

    if kind.is_final() {
        text.push_str(" final");
    }

    for supertype in kind.supertypes() {
        text.push_str(&format!(" {supertype}"));
    }

    text.push_str(&format!(" {})", composite_type(kind.composite_type())));
    text
}

/// Renders a recursion group's sub types as a sequence of `(type …)` lines, wrapped in
/// `(rec …)` when there is more than one.
pub fn recursive_type_lines(kind: &RecursiveType) -> Vec<String> {
    match kind.sub_types() {
        [single] => vec![format!("(type {})", sub_type(single))],
        sub_types => {
            let mut lines = vec!["(rec".to_string()];
            lines.extend(sub_types.iter().map(|sub| format!("  (type {})", sub_type(sub))));
            lines.push(")".to_string());
            lines
        }
    }
}

/// Renders limits as `min`, `min max`, or `min max shared`. A shared memory with no declared
/// maximum is invalid and should be rejected by the caller before reaching this function.
pub fn limits(kind: &Limit) -> String {
    match (kind.max(), kind.is_shared()) {
        (Some(max), true) => format!("{} {} shared", kind.min(), max),
        (Some(max), false) => format!("{} {}", kind.min(), max),
        (None, _) => kind.min().to_string(),
    }
}

/// Renders a table type as `<limits> <reftype>`.
pub fn table_type(kind: &TableType) -> String {
    format!("{} {}", limits(kind.limits()), ref_type(kind.kind()))
}

/// Renders a memory type as its limits.
pub fn memory_type(kind: &MemoryType) -> String {
    limits(kind.limits())
}

/// Renders a global type, wrapping mutable globals in `(mut …)`.
pub fn global_type(kind: &GlobalType) -> String {
    match kind.mutability() {
        Mutability::Mutable => format!("(mut {})", value_type(kind.kind())),
        Mutability::Immutable => value_type(kind.kind()),
    }
}

/// Escapes a name for use as a double-quoted WAT string literal.
pub fn escape_name(name: &Name) -> String {
    escape_bytes(name.as_bytes())
}

/// Escapes an arbitrary byte sequence (a name, or a data segment's contents) as a
/// double-quoted WAT string literal.
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut escaped = String::from("\"");

    for &byte in bytes {
        match byte {
            b'"' => escaped.push_str("\\\""),
            b'\\' => escaped.push_str("\\\\"),
            0x20..=0x7E => escaped.push(byte as char),
            _ => escaped.push_str(&format!("\\{byte:02x}")),
        }
    }

    escaped.push('"');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_type_prefers_shorthand() {
        assert_eq!(ref_type(RefType::new(true, HeapType::Func)), "funcref");
        assert_eq!(ref_type(RefType::new(true, HeapType::Extern)), "externref");
        assert_eq!(ref_type(RefType::new(true, HeapType::Any)), "(ref null any)");
        assert_eq!(ref_type(RefType::new(false, HeapType::Eq)), "(ref eq)");
    }

    #[test]
    fn field_type_wraps_mutable_storage() {
        let mutable = FieldType::new(StorageType::Packed(PackedType::I8), Mutability::Mutable);
        assert_eq!(field_type(mutable), "(mut i8)");

        let immutable = FieldType::new(StorageType::Value(ValueType::I32), Mutability::Immutable);
        assert_eq!(field_type(immutable), "i32");
    }

    #[test]
    fn function_type_omits_empty_clauses() {
        let kind = FunctionType::new(ResultType::new(vec![]), ResultType::new(vec![]));
        assert_eq!(function_type(&kind), "(func)");

        let kind = FunctionType::new(ResultType::new(vec![ValueType::I32]), ResultType::new(vec![ValueType::I64]));
        assert_eq!(function_type(&kind), "(func (param i32) (result i64))");
    }

    #[test]
    fn limits_render_min_max_shared() {
        assert_eq!(limits(&Limit::unbounded(0)), "0");
        assert_eq!(limits(&Limit::bounded(0, 1)), "0 1");
        assert_eq!(limits(&Limit::shared(1, 4)), "1 4 shared");
    }

    #[test]
    fn escape_bytes_hex_escapes_non_printable_and_quote_characters() {
        assert_eq!(escape_bytes(b"ok"), "\"ok\"");
        assert_eq!(escape_bytes(b"a\"b"), "\"a\\\"b\"");
        assert_eq!(escape_bytes(&[0x00, 0x1f]), "\"\\00\\1f\"");
    }

    #[test]
    fn recursive_type_wraps_multiple_sub_types_in_rec() {
        let single = RecursiveType::new(vec![SubType::plain(
            FunctionType::new(ResultType::new(vec![]), ResultType::new(vec![])).into(),
        )]);
        assert_eq!(recursive_type_lines(&single).len(), 1);

        let group = RecursiveType::new(vec![
            SubType::plain(FunctionType::new(ResultType::new(vec![]), ResultType::new(vec![])).into()),
            SubType::plain(FunctionType::new(ResultType::new(vec![]), ResultType::new(vec![])).into()),
        ]);
        let lines = recursive_type_lines(&group);

        assert_eq!(lines.first().unwrap(), "(rec");
        assert_eq!(lines.last().unwrap(), ")");
        assert_eq!(lines.len(), 4);
    }

    #[quickcheck_macros::quickcheck]
    fn value_type_never_renders_an_empty_token(kind: u8) -> bool {
        let value = match kind % 4 {
            0 => ValueType::I32,
            1 => ValueType::I64,
            2 => ValueType::F32,
            _ => ValueType::F64,
        };

        !value_type(value).is_empty()
    }

    #[quickcheck_macros::quickcheck]
    fn bounded_limit_always_renders_both_endpoints(min: u32, max: u32) -> bool {
        let text = limits(&Limit::bounded(min, max));
        text.contains(&min.to_string()) && text.contains(&max.to_string())
    }
}
