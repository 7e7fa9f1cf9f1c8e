//! Function declaration tests

use super::*;

fn only_function(source: &str) -> FunctionDecl {
    let program = parse_src(source).expect("program should parse");
    let func = program.functions().next().cloned();
    func.expect("a function")
}

#[test]
fn test_function_without_params() {
    let func = only_function("func main() { print(\"Hello\"); }");
    assert_eq!(func.name, "main");
    assert!(func.params.is_empty());
    assert_eq!(func.return_type, None);
    assert_eq!(func.body.stmts.len(), 1);
}

#[test]
fn test_function_with_params_and_return_type() {
    let func = only_function("func somar(a: int, b: float) -> float { return a + b; }");
    let params: Vec<_> = func.params.iter().map(|p| (p.name.as_str(), p.ty)).collect();
    assert_eq!(params, vec![("a", TypeName::Int), ("b", TypeName::Float)]);
    assert_eq!(func.return_type, Some(TypeName::Float));
    assert!(matches!(func.body.stmts[0].kind, StmtKind::Return(_)));
}

#[test]
fn test_function_span_covers_body() {
    let func = only_function("func f() {\n  print(1);\n}");
    assert_eq!(func.span.start.line, 1);
    assert_eq!(func.span.end.line, 3);
}
