//! Assembles a module's sections into a single `(module ...)` s-expression.

use crate::model::*;
use crate::text::errors::EmitError;
use crate::text::instruction::write_expression;
use crate::text::types;
use crate::text::Writer;

/// The number of imports of each kind, used to tell an export referencing an imported entity
/// (which must be rendered as a free-standing `(export …)` form) from one referencing a
/// module-defined entity (which is inlined on its defining form).
struct ImportCounts {
    functions: u32,
    tables: u32,
    memories: u32,
    globals: u32,
}

impl ImportCounts {
    fn of(module: &Module) -> Self {
        let imports = module.imports().unwrap_or(&[]);
        let count = |matches: fn(&ImportDescription) -> bool| {
            imports.iter().filter(|import| matches(import.description())).count() as u32
        };

        ImportCounts {
            functions: count(|d| matches!(d, ImportDescription::Function(_))),
            tables: count(|d| matches!(d, ImportDescription::Table(_))),
            memories: count(|d| matches!(d, ImportDescription::Memory(_))),
            globals: count(|d| matches!(d, ImportDescription::Global(_))),
        }
    }
}

fn validate_memory_type(kind: &MemoryType) -> Result<(), EmitError> {
    if kind.limits().is_shared() && kind.limits().max().is_none() {
        return Err(EmitError::InvalidLimits);
    }

    Ok(())
}

/// The names of every export referencing the given description, in declaration order.
fn matching_exports<'a>(module: &'a Module, description: ExportDescription) -> Vec<&'a Name> {
    module.exports().map_or(Vec::new(), |exports| {
        exports
            .iter()
            .filter(|export| *export.description() == description)
            .map(Export::name)
            .collect()
    })
}

fn inline_exports_clause(module: &Module, description: ExportDescription) -> String {
    matching_exports(module, description)
        .into_iter()
        .map(|name| format!(" (export {})", types::escape_name(name)))
        .collect()
}

pub(crate) fn write_module(module: &Module, writer: &mut Writer) -> Result<(), EmitError> {
    writer.open("(module");

    write_types(writer, module);
    write_imports(writer, module)?;
    write_functions(writer, module)?;
    write_tables(writer, module);
    write_memories(writer, module)?;
    write_globals(writer, module);
    write_free_standing_exports(writer, module);

    if let Some(start) = module.start() {
        writer.line(&format!("(start {})", start.function()));
    }

    write_elements(writer, module);
    write_data(writer, module);

    writer.close();
    Ok(())
}

fn write_types(writer: &mut Writer, module: &Module) {
    if let Some(types) = module.types() {
        for recursive_type in types {
            for line in types::recursive_type_lines(recursive_type) {
                writer.line(&line);
            }
        }
    }
}

fn write_imports(writer: &mut Writer, module: &Module) -> Result<(), EmitError> {
    let Some(imports) = module.imports() else {
        return Ok(());
    };

    for import in imports {
        let description = match import.description() {
            ImportDescription::Function(type_index) => format!("(func (type {type_index}))"),
            ImportDescription::Table(table_type) => format!("(table {})", types::table_type(table_type)),
            ImportDescription::Memory(memory_type) => {
                validate_memory_type(memory_type)?;
                format!("(memory {})", types::memory_type(memory_type))
            }
            ImportDescription::Global(global_type) => format!("(global {})", types::global_type(global_type)),
        };

        writer.line(&format!(
            "(import {} {} {description})",
            types::escape_name(import.module()),
            types::escape_name(import.name()),
        ));
    }

    Ok(())
}

fn write_functions(writer: &mut Writer, module: &Module) -> Result<(), EmitError> {
    let Some(functions) = module.functions() else {
        return Ok(());
    };

    let base_index = ImportCounts::of(module).functions;

    for (offset, function) in functions.iter().enumerate() {
        let index = base_index + offset as u32;
        let mut header = String::from("(func");

        header.push_str(&inline_exports_clause(module, ExportDescription::Function(index)));
        header.push_str(&format!(" (type {})", function.kind()));

        for local in function.locals().kinds() {
            header.push_str(&format!(" (local {})", types::value_type(*local)));
        }

        writer.open(&header);
        write_expression(writer, function.body());
        writer.close();
    }

    Ok(())
}

fn write_tables(writer: &mut Writer, module: &Module) {
    let Some(tables) = module.tables() else {
        return;
    };

    let base_index = ImportCounts::of(module).tables;

    for (offset, table) in tables.iter().enumerate() {
        let index = base_index + offset as u32;
        let exports = inline_exports_clause(module, ExportDescription::Table(index));

        writer.line(&format!("(table{exports} {})", types::table_type(table.kind())));
    }
}

fn write_memories(writer: &mut Writer, module: &Module) -> Result<(), EmitError> {
    let Some(memories) = module.memories() else {
        return Ok(());
    };

    let base_index = ImportCounts::of(module).memories;

    for (offset, memory) in memories.iter().enumerate() {
        validate_memory_type(memory.kind())?;

        let index = base_index + offset as u32;
        let exports = inline_exports_clause(module, ExportDescription::Memory(index));

        writer.line(&format!("(memory{exports} {})", types::memory_type(memory.kind())));
    }

    Ok(())
}

fn write_globals(writer: &mut Writer, module: &Module) {
    let Some(globals) = module.globals() else {
        return;
    };

    let base_index = ImportCounts::of(module).globals;

    for (offset, global) in globals.iter().enumerate() {
        let index = base_index + offset as u32;
        let exports = inline_exports_clause(module, ExportDescription::Global(index));

        writer.open(&format!("(global{exports} {}", types::global_type(global.kind())));
        write_expression(writer, global.initializer());
        writer.close();
    }
}

/// Exports of an imported entity cannot be inlined onto the `(import …)` form, so they are
/// written here as free-standing `(export "name" (kind index))` forms instead.
fn write_free_standing_exports(writer: &mut Writer, module: &Module) {
    let Some(exports) = module.exports() else {
        return;
    };

    let counts = ImportCounts::of(module);

    for export in exports {
        let (keyword, index, imported) = match *export.description() {
            ExportDescription::Function(index) => ("func", index, index < counts.functions),
            ExportDescription::Table(index) => ("table", index, index < counts.tables),
            ExportDescription::Memory(index) => ("memory", index, index < counts.memories),
            ExportDescription::Global(index) => ("global", index, index < counts.globals),
        };

        if imported {
            writer.line(&format!("(export {} ({keyword} {index}))", types::escape_name(export.name())));
        }
    }
}

fn write_elements(writer: &mut Writer, module: &Module) {
    let Some(elements) = module.elements() else {
        return;
    };

    for element in elements {
        let header = match element.mode() {
            ElementMode::Passive => format!("(elem {}", types::reference_type(element.kind())),
            ElementMode::Declarative => format!("(elem declare {}", types::reference_type(element.kind())),
            ElementMode::Active(table, _) => {
                format!("(elem (table {table}) {}", types::reference_type(element.kind()))
            }
        };

        writer.open(&header);

        if let ElementMode::Active(_, offset) = element.mode() {
            writer.open("(offset");
            write_expression(writer, offset);
            writer.close();
        }

        for initializer in element.initializers() {
            writer.open("(item");
            write_expression(writer, initializer);
            writer.close();
        }

        writer.close();
    }
}

fn write_data(writer: &mut Writer, module: &Module) {
    let Some(data) = module.data() else {
        return;
    };

    for datum in data {
        let header = match datum.mode() {
            DataMode::Passive => "(data".to_string(),
            DataMode::Active(memory, _) if *memory == 0 => "(data".to_string(),
            DataMode::Active(memory, _) => format!("(data (memory {memory})"),
        };

        writer.open(&header);

        if let DataMode::Active(_, offset) = datum.mode() {
            writer.open("(offset");
            write_expression(writer, offset);
            writer.close();
        }

        writer.line(&types::escape_bytes(datum.initializer()));
        writer.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::emit_text;

    #[test]
    fn validate_memory_type_accepts_shared_with_maximum() {
        let kind = MemoryType::new(Limit::shared(1, 4));
        assert!(validate_memory_type(&kind).is_ok());
    }

    #[test]
    fn multiple_exports_on_the_same_function_all_inline() {
        let mut builder = Module::builder();
        builder
            .add_function_type(FunctionType::new(ResultType::new(vec![]), ResultType::new(vec![])))
            .unwrap();
        builder
            .add_function(Function::new(0, ResultType::new(vec![]), Expression::empty()))
            .unwrap();
        builder.add_export(Export::function("a".into(), 0));
        builder.add_export(Export::function("b".into(), 0));

        let text = emit_text(&builder.build()).unwrap();

        assert!(text.contains("(func (export \"a\") (export \"b\") (type 0)"));
    }

    #[test]
    fn data_segment_active_on_memory_zero_omits_memory_clause() {
        let mut builder = Module::builder();
        builder.add_memory(Memory::new(MemoryType::new(Limit::unbounded(1)))).unwrap();
        builder
            .add_data(Data::active(0, Expression::new(vec![NumericInstruction::I32Constant(0).into()]), vec![1]))
            .unwrap();

        let text = emit_text(&builder.build()).unwrap();

        assert!(text.contains("(data\n  (offset\n    i32.const 0\n  )\n"));
        assert!(!text.contains("(data (memory"));
    }

    #[test]
    fn data_segment_active_on_nonzero_memory_includes_memory_clause() {
        let mut builder = Module::builder();
        builder.add_memory(Memory::new(MemoryType::new(Limit::unbounded(1)))).unwrap();
        builder.add_memory(Memory::new(MemoryType::new(Limit::unbounded(1)))).unwrap();
        builder
            .add_data(Data::active(1, Expression::new(vec![NumericInstruction::I32Constant(0).into()]), vec![1]))
            .unwrap();

        let text = emit_text(&builder.build()).unwrap();

        assert!(text.contains("(data (memory 1)"));
    }
}
