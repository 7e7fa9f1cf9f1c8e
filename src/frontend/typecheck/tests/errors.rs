use super::check_err;
use crate::frontend::core::parser::ast::{BinOp, TypeName};
use crate::frontend::typecheck::SemanticError;

#[test]
fn test_redeclaration_in_same_scope() {
    let err = check_err("var x: int = 1; var x: int = 2;");
    assert!(matches!(err, SemanticError::Redeclared { ref name, .. } if name == "x"));
    assert_eq!(err.span().start.line, 1);
}

#[test]
fn test_parameter_redeclared_in_body() {
    let err = check_err("func f(a: int) { var a: int = 2; }");
    assert!(matches!(err, SemanticError::Redeclared { ref name, .. } if name == "a"));
}

#[test]
fn test_undeclared_variable() {
    let err = check_err("print(missing);");
    assert_eq!(
        err.to_string(),
        "Undeclared variable 'missing'"
    );
}

#[test]
fn test_block_local_not_visible_after_block() {
    let err = check_err("while (true) { var t: int = 1; } print(t);");
    assert!(matches!(err, SemanticError::Undeclared { ref name, .. } if name == "t"));
}

#[test]
fn test_assignment_type_mismatch() {
    let err = check_err("var x: int = 1; x = \"text\";");
    assert_eq!(
        err,
        SemanticError::TypeMismatch {
            name: "x".into(),
            expected: TypeName::Int,
            found: TypeName::String,
            span: err.span(),
        }
    );
}

#[test]
fn test_declaration_without_widening() {
    let err = check_err("var f: float = 1;");
    assert!(matches!(
        err,
        SemanticError::TypeMismatch {
            expected: TypeName::Float,
            found: TypeName::Int,
            ..
        }
    ));
}

#[test]
fn test_non_bool_condition() {
    let err = check_err("var n: int = 1; while (n) { n = n - 1; }");
    assert!(matches!(
        err,
        SemanticError::NonBoolCondition {
            construct: "while",
            found: TypeName::Int,
            ..
        }
    ));
}

#[test]
fn test_invalid_operands() {
    let err = check_err("var s = \"a\" - \"b\";");
    assert!(matches!(
        err,
        SemanticError::InvalidOperands {
            op: BinOp::Sub,
            left: TypeName::String,
            right: TypeName::String,
            ..
        }
    ));
}

#[test]
fn test_mixed_comparison_rejected() {
    let err = check_err("var b = 1 < \"2\";");
    assert!(matches!(err, SemanticError::InvalidOperands { op: BinOp::Lt, .. }));
}

#[test]
fn test_function_used_as_value() {
    let err = check_err("func f() { print(1); } var x: int = f;");
    assert!(matches!(err, SemanticError::NotAValue { ref name, .. } if name == "f"));
}

#[test]
fn test_return_type_mismatch() {
    let err = check_err("func f() -> int { return true; }");
    assert!(matches!(
        err,
        SemanticError::ReturnTypeMismatch {
            expected: TypeName::Int,
            found: TypeName::Bool,
            ..
        }
    ));
}

#[test]
fn test_temporary_shaped_names_rejected() {
    let err = check_err("func main() { var t1: int = 5; print(t1 + 1); print(t1); }");
    assert!(matches!(err, SemanticError::ReservedName { ref name, .. } if name == "t1"));
    assert_eq!(err.span().start.line, 1);
    assert_eq!(err.to_string(), "'t1' is reserved for compiler temporaries");

    let err = check_err("func f(t22: int) { print(t22); }");
    assert!(matches!(err, SemanticError::ReservedName { ref name, .. } if name == "t22"));
}
