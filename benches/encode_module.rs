use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wasm_forge::{
    emit_binary, emit_text, Data, Element, ElementInitializer, Export, Expression, Function,
    FunctionType, Global, GlobalType, Import, Limit, Memory, MemoryType, Module, NumericInstruction,
    ReferenceType, ResultType, Start, Table, TableType, ValueType,
};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("binary/empty", |b| {
        let empty_module = Module::empty();

        b.iter(|| {
            let mut output = Vec::new();
            emit_binary(&empty_module, &mut output).expect("An error occurred emitting the module.");
            black_box(output.len())
        })
    });

    c.bench_function("binary/singular", |b| {
        let singular_module = new_singular_module();

        b.iter(|| {
            let mut output = Vec::new();
            emit_binary(&singular_module, &mut output).expect("An error occurred emitting the module.");
            black_box(output.len())
        })
    });

    c.bench_function("text/empty", |b| {
        let empty_module = Module::empty();

        b.iter(|| black_box(emit_text(&empty_module).expect("An error occurred emitting the module.")))
    });

    c.bench_function("text/singular", |b| {
        let singular_module = new_singular_module();

        b.iter(|| black_box(emit_text(&singular_module).expect("An error occurred emitting the module.")))
    });
}

/// Creates a new module with one of each field.
fn new_singular_module() -> Module {
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

    builder.build()
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
