//! Emit the WebAssembly binary format.
//!
//! See <https://webassembly.github.io/spec/core/binary/index.html>

mod errors;
mod instruction;
mod module;
mod types;
mod values;

pub use errors::EmitError;
pub use instruction::{write_expression, write_instruction};
pub use module::*;
pub use types::*;
pub use values::*;

use crate::model::{Module, ModuleSection};
use std::io::Write;

const PREAMBLE: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// Canonical binary emission order. The data count section is encoded between the element
/// and code sections, ahead of its numeric id in the module's own `ModuleSection` ordering.
const SECTION_ORDER: [ModuleSection; 12] = [
    ModuleSection::Type,
    ModuleSection::Import,
    ModuleSection::Function,
    ModuleSection::Table,
    ModuleSection::Memory,
    ModuleSection::Global,
    ModuleSection::Export,
    ModuleSection::Start,
    ModuleSection::Element,
    ModuleSection::DataCount,
    ModuleSection::Code,
    ModuleSection::Data,
];

/// Counts the number of bytes written, but does nothing else with them. Used to measure a
/// section's body before it is known how large the length prefix needs to be.
#[derive(Copy, Clone, Debug, Default, Ord, PartialOrd, Eq, PartialEq)]
pub(crate) struct CountingWrite {
    bytes: usize,
}

impl CountingWrite {
    pub fn new() -> Self {
        CountingWrite { bytes: 0 }
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Write for CountingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.bytes += buf.len();
        Ok(())
    }
}

/// Emits a binary representation of a `Module` to a `Write` output.
///
/// See <https://webassembly.github.io/spec/core/binary/index.html>
///
/// # Examples
/// ## Empty
/// ```rust
/// use wasm_forge::{emit_binary, Module};
///
/// let mut buffer = Vec::new();
/// emit_binary(&Module::empty(), &mut buffer).unwrap();
///
/// assert_eq!(buffer, vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
/// ```
pub fn emit_binary<O: Write>(module: &Module, output: &mut O) -> Result<usize, EmitError> {
    validate_data_count(module)?;

    let mut written = values::write_bytes(&PREAMBLE, output)?;
    written += values::write_bytes(&VERSION, output)?;
    written += write_custom_sections_at(module, ModuleSection::Custom, output)?;

    for section in SECTION_ORDER {
        written += write_section(module, section, output)?;
        written += write_custom_sections_at(module, section, output)?;
    }

    written += write_custom_sections_at(module, ModuleSection::Tag, output)?;

    Ok(written)
}

fn validate_data_count(module: &Module) -> Result<(), EmitError> {
    if let Some(declared) = module.data_count() {
        let actual = module.data().map_or(0, <[_]>::len);

        if declared as usize != actual {
            return Err(EmitError::SectionCountMismatch { declared, actual });
        }
    }

    Ok(())
}

fn write_section<O: Write>(module: &Module, section: ModuleSection, output: &mut O) -> Result<usize, EmitError> {
    match section {
        ModuleSection::Type => match module.types() {
            Some(types) if !types.is_empty() => write_framed_section(section, output, |o| {
                values::write_vector(types, o, |kind, o| types::write_recursive_type(kind, o))
            }),
            _ => Ok(0),
        },
        ModuleSection::Import => match module.imports() {
            Some(imports) if !imports.is_empty() => {
                write_framed_section(section, output, |o| values::write_vector(imports, o, module::write_import))
            }
            _ => Ok(0),
        },
        ModuleSection::Function => match module.functions() {
            Some(functions) if !functions.is_empty() => write_framed_section(section, output, |o| {
                values::write_vector(functions, o, |function, o| values::write_u32(function.kind(), o))
            }),
            _ => Ok(0),
        },
        ModuleSection::Table => match module.tables() {
            Some(tables) if !tables.is_empty() => {
                write_framed_section(section, output, |o| values::write_vector(tables, o, module::write_table))
            }
            _ => Ok(0),
        },
        ModuleSection::Memory => match module.memories() {
            Some(memories) if !memories.is_empty() => {
                write_framed_section(section, output, |o| values::write_vector(memories, o, module::write_memory))
            }
            _ => Ok(0),
        },
        ModuleSection::Global => match module.globals() {
            Some(globals) if !globals.is_empty() => {
                write_framed_section(section, output, |o| values::write_vector(globals, o, module::write_global))
            }
            _ => Ok(0),
        },
        ModuleSection::Export => match module.exports() {
            Some(exports) if !exports.is_empty() => {
                write_framed_section(section, output, |o| values::write_vector(exports, o, module::write_export))
            }
            _ => Ok(0),
        },
        ModuleSection::Start => match module.start() {
            Some(start) => write_framed_section(section, output, |o| module::write_start(start, o)),
            None => Ok(0),
        },
        ModuleSection::Element => match module.elements() {
            Some(elements) if !elements.is_empty() => {
                write_framed_section(section, output, |o| values::write_vector(elements, o, module::write_element))
            }
            _ => Ok(0),
        },
        ModuleSection::DataCount => match module.data_count() {
            Some(count) => write_framed_section(section, output, |o| values::write_u32(count, o)),
            None => Ok(0),
        },
        ModuleSection::Code => match module.functions() {
            Some(functions) if !functions.is_empty() => {
                write_framed_section(section, output, |o| values::write_vector(functions, o, module::write_function))
            }
            _ => Ok(0),
        },
        ModuleSection::Data => match module.data() {
            Some(data) if !data.is_empty() => {
                write_framed_section(section, output, |o| values::write_vector(data, o, module::write_data))
            }
            _ => Ok(0),
        },
        ModuleSection::Custom | ModuleSection::Tag => Ok(0),
    }
}

/// Writes a section as its id, its byte length (measured with a `CountingWrite` pass), and
/// its content.
fn write_framed_section<O, F>(section: ModuleSection, output: &mut O, write_content: F) -> Result<usize, EmitError>
where
    O: Write,
    F: Fn(&mut dyn Write) -> Result<usize, EmitError>,
{
    let mut counter = CountingWrite::new();
    write_content(&mut counter)?;

    let mut written = values::write_byte(section as u8, output)?;
    written += values::write_u32(counter.bytes() as u32, output)?;
    written += write_content(output)?;

    Ok(written)
}

fn write_custom_sections_at<O: Write>(
    module: &Module,
    insertion_point: ModuleSection,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut written = 0;

    if let Some(sections) = module.custom_sections_at(insertion_point) {
        for custom in sections {
            written += write_framed_section(ModuleSection::Custom, output, |o| module::write_custom(custom, o))?;
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Data, Element, ElementInitializer, Export, Expression, Function, FunctionType, Global,
        GlobalType, Import, Limit, Memory, MemoryType, NumericInstruction, ReferenceType,
        ResultType, Start, Table, TableType, ValueType,
    };
    use wasmtime::{Engine, Extern, Func, Instance, Store};

    /// Emits `target` and confirms a real runtime accepts the resulting bytes.
    fn validate(target: &Module) {
        let mut bytes = Vec::new();
        emit_binary(target, &mut bytes).expect("emission should not fail");

        let engine = Engine::default();
        let module = wasmtime::Module::new(&engine, &bytes).expect("wasmtime should accept the module");
        let mut store = Store::new(&engine, ());
        let mut imports: Vec<Extern> = Vec::new();

        if target.imports().is_some() {
            let start = Func::wrap(&mut store, || {});
            imports.push(start.into());
        }

        Instance::new(&mut store, &module, &imports).expect("instantiation should not fail");
    }

    #[test]
    fn empty_module_round_trips() {
        let mut buffer = Vec::new();
        let written = emit_binary(&Module::empty(), &mut buffer).unwrap();

        assert_eq!(written, 8);
        assert_eq!(buffer, vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
        validate(&Module::empty());
    }

    #[test]
    fn singular_module_is_accepted_by_a_real_runtime() {
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
    fn shared_memory_with_maximum_is_accepted() {
        let mut builder = Module::builder();
        builder
            .add_memory(Memory::new(MemoryType::new(Limit::shared(1, 4))))
            .unwrap();

        validate(&builder.build());
    }

    #[test]
    fn mismatched_data_count_is_rejected() {
        let mut builder = Module::builder();
        builder.set_data_count(Some(1));

        let mut buffer = Vec::new();
        let result = emit_binary(&builder.build(), &mut buffer);

        assert!(matches!(result, Err(EmitError::SectionCountMismatch { declared: 1, actual: 0 })));
    }
}
