//! # Charmeleon benchmarks
//!
//! Criterion benchmarks for the compiler phases.
//!
//! ## Groups
//! - `pipeline`: full source-to-Python compilation
//! - `middle`: dead code elimination and structuring on a prepared IR
//!
//! ## Usage
//! ```bash
//! cargo bench
//! cargo bench middle
//! ```

use criterion::{criterion_group, criterion_main, Criterion};

use charmeleon::middle::{eliminate, generate, generate_ir, Program};
use charmeleon::{compile, frontend};

/// A program with `n` functions, each holding nested loops and branches
fn synthetic_source(n: usize) -> String {
    let mut source = String::new();
    for i in 0..n {
        source.push_str(&format!(
            r#"
func f{i}(limit: int) {{
    var total: int = 0;
    for (var i: int = 0; i < limit; i++) {{
        var j: int = i;
        while (j > 0 && total < 1000) {{
            if (j % 2 == 0) {{
                total = total + j * 2;
            }} else if (j % 3 == 0) {{
                total = total - 1;
            }} else {{
                print(j);
            }}
            j = j - 1;
        }}
    }}
    var unused: int = total * 3;
    print(total);
}}
"#
        ));
    }
    source
}

fn quiet_logs() {
    let _ = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(tracing::Level::ERROR)
        .try_init();
}

fn prepared_ir(source: &str) -> Program {
    let tokens = frontend::core::tokenize(source).expect("benchmark source lexes");
    let ast = frontend::core::parse(&tokens).expect("benchmark source parses");
    generate_ir(&ast).expect("benchmark IR is valid")
}

fn bench_compile(c: &mut Criterion) {
    quiet_logs();
    let source = synthetic_source(50);
    c.bench_function("compile_50_functions", |b| {
        b.iter(|| compile(&source).expect("benchmark source compiles"))
    });
}

fn bench_eliminate(c: &mut Criterion) {
    quiet_logs();
    let program = prepared_ir(&synthetic_source(50));
    c.bench_function("dce_50_functions", |b| b.iter(|| eliminate(&program)));
}

fn bench_generate(c: &mut Criterion) {
    quiet_logs();
    let program = eliminate(&prepared_ir(&synthetic_source(50)));
    c.bench_function("structure_50_functions", |b| b.iter(|| generate(&program)));
}

fn bench_parse_ir(c: &mut Criterion) {
    let text = prepared_ir(&synthetic_source(50)).to_text();
    c.bench_function("parse_ir_text", |b| {
        b.iter(|| Program::parse(&text).expect("listing is valid"))
    });
}

criterion_group!(
    name = pipeline;
    config = Criterion::default().sample_size(20);
    targets = bench_compile
);

criterion_group!(
    name = middle;
    config = Criterion::default().sample_size(50);
    targets = bench_eliminate, bench_generate, bench_parse_ir
);

criterion_main!(pipeline, middle);
