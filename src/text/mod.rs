//! Emit the WebAssembly text format (WAT).
//!
//! See <https://webassembly.github.io/spec/core/text/index.html>

mod errors;
mod instruction;
mod module;
mod types;

pub use errors::EmitError;

use crate::model::Module;

const INDENT: &str = "  ";

/// A depth-tracking string buffer: each `line` is indented to the current nesting depth,
/// and `open`/`close` manage that depth around a parenthesized s-expression.
pub(crate) struct Writer {
    buffer: String,
    depth: usize,
}

impl Writer {
    fn new() -> Self {
        Writer {
            buffer: String::new(),
            depth: 0,
        }
    }

    /// Appends a single indented line.
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }

        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Writes a header line, i.e. `(module`, then indents one level deeper for the body that
    /// follows.
    pub(crate) fn open(&mut self, header: &str) {
        self.line(header);
        self.depth += 1;
    }

    /// Closes a level opened by `open`, writing a lone `)` at the outer depth.
    pub(crate) fn close(&mut self) {
        self.depth -= 1;
        self.line(")");
    }

    /// Closes a level opened by `open`, writing the given closing keyword (e.g. `end`) at the
    /// outer depth, with no trailing parenthesis.
    pub(crate) fn close_with(&mut self, keyword: &str) {
        self.depth -= 1;
        self.line(keyword);
    }

    /// Writes a line one level shallower than the current body depth, for an `else` that sits
    /// between an `if`'s two branches at the same depth as the `if`/`end` keywords, without
    /// otherwise disturbing the body's indentation.
    pub(crate) fn line_outdented(&mut self, text: &str) {
        self.depth -= 1;
        self.line(text);
        self.depth += 1;
    }

    fn into_string(self) -> String {
        self.buffer
    }
}

/// Emits a WAT (WebAssembly text format) representation of a `Module`.
///
/// See <https://webassembly.github.io/spec/core/text/index.html>
///
/// # Examples
/// ## Empty
/// ```rust
/// use wasm_forge::{emit_text, Module};
///
/// let text = emit_text(&Module::empty()).unwrap();
///
/// assert_eq!(text, "(module\n)\n");
/// ```
pub fn emit_text(module: &Module) -> Result<String, EmitError> {
    let mut writer = Writer::new();
    module::write_module(module, &mut writer)?;
    Ok(writer.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Data, Element, ElementInitializer, Export, Expression, Function, FunctionType, Global,
        GlobalType, Import, Limit, Memory, MemoryType, NumericInstruction, ReferenceType,
        ResultType, Start, Table, TableType, ValueType,
    };

    #[test]
    fn empty_module() {
        assert_eq!(emit_text(&Module::empty()).unwrap(), "(module\n)\n");
    }

    /// Confirms a real parser accepts the emitted text as well-formed WAT.
    fn validate(module: &Module) {
        let text = emit_text(module).expect("emission should not fail");
        wat::parse_str(&text).unwrap_or_else(|error| panic!("{error}\n---\n{text}"));
    }

    #[test]
    fn singular_module_parses_as_wat() {
        let mut builder = Module::builder();

        builder
            .add_function_type(FunctionType::new(
                ResultType::new(vec![ValueType::I64]),
                ResultType::new(vec![ValueType::F64]),
            ))
            .unwrap();

        builder
            .add_function(Function::new(
                0,
                ResultType::new(vec![ValueType::I32]),
                Expression::new(vec![NumericInstruction::F64Constant(0.0).into()]),
            ))
            .unwrap();

        let start_function_type = builder
            .add_function_type(FunctionType::new(ResultType::new(vec![]), ResultType::new(vec![])))
            .unwrap();

        builder
            .add_import(Import::function("test".into(), "foobar".into(), start_function_type))
            .unwrap();

        builder
            .add_element(Element::passive(ReferenceType::Function, vec![0u32].to_initializers()))
            .unwrap();
        builder.add_data(Data::passive(vec![42])).unwrap();

        builder
            .add_table(Table::new(TableType::new(ReferenceType::Function, Limit::new(1, None))))
            .unwrap();
        builder.add_memory(Memory::new(MemoryType::new(Limit::new(1, None)))).unwrap();

        builder.add_export(Export::function("foobar".into(), 0));
        builder.set_start(Some(Start::new(0)));
        builder.add_global(Global::new(
            GlobalType::immutable(ValueType::I64),
            Expression::new(vec![NumericInstruction::I64Constant(0).into()]),
        ));

        validate(&builder.build());
    }

    #[test]
    fn exported_import_uses_a_free_standing_export() {
        let mut builder = Module::builder();
        let type_index = builder
            .add_function_type(FunctionType::new(ResultType::new(vec![]), ResultType::new(vec![])))
            .unwrap();

        builder
            .add_import(Import::function("env".into(), "log".into(), type_index))
            .unwrap();
        builder.add_export(Export::function("log".into(), 0));

        let text = emit_text(&builder.build()).unwrap();

        assert!(text.contains("(export \"log\" (func 0))"));
        assert!(!text.contains("(import \"env\" \"log\" (func (type 0)) (export"));
        validate(&builder.build());
    }

    #[test]
    fn defined_function_inlines_its_export() {
        let mut builder = Module::builder();
        builder
            .add_function_type(FunctionType::new(ResultType::new(vec![]), ResultType::new(vec![])))
            .unwrap();
        builder
            .add_function(Function::new(0, ResultType::new(vec![]), Expression::empty()))
            .unwrap();
        builder.add_export(Export::function("run".into(), 0));

        let text = emit_text(&builder.build()).unwrap();

        assert!(text.contains("(func (export \"run\") (type 0)"));
        validate(&builder.build());
    }
}
