//! End-to-end compilation through the public API

use charmeleon::frontend::sast::VulnerabilityKind;
use charmeleon::frontend::typecheck::SemanticError;
use charmeleon::util::config::{parse_config, CompilerConfig};
use charmeleon::{compile, CompileError, Pipeline};

#[test]
fn test_counting_loop() {
    let source = r#"
        func main() {
            var x: int = 3;
            while (x > 0) {
                print(x);
                x = x - 1;
            }
        }
    "#;
    let python = compile(source).unwrap();
    assert!(python.starts_with(
        "def main():\n    x = 3\n    while x > 0:\n        print(x)\n        x = x - 1\n"
    ));
    assert!(python.ends_with("if __name__ == '__main__':\n    main()\n"));
}

#[test]
fn test_for_loop_becomes_while() {
    let source = r#"
        func count() {
            for (var i: int = 0; i < 3; i++) {
                print(i);
            }
        }
    "#;
    let python = compile(source).unwrap();
    assert_eq!(
        python,
        "def count():\n    i = 0\n    while i < 3:\n        print(i)\n        i = i + 1\n"
    );
}

#[test]
fn test_else_if_chain() {
    let source = r#"
        func grade(score: int) {
            if (score >= 90) {
                print("A");
            } else if (score >= 80) {
                print("B");
            } else {
                print("C");
            }
        }
    "#;
    let python = compile(source).unwrap();
    assert_eq!(
        python,
        "def grade(score):\n\
         \x20   if score >= 90:\n\
         \x20       print(\"A\")\n\
         \x20   else:\n\
         \x20       if score >= 80:\n\
         \x20           print(\"B\")\n\
         \x20       else:\n\
         \x20           print(\"C\")\n"
    );
}

#[test]
fn test_loop_inside_branch() {
    let source = r#"
        func main() {
            var n: int = 2;
            if (n > 0 && n < 10) {
                while (n > 0) {
                    n = n - 1;
                }
            }
            print(n);
        }
    "#;
    let python = compile(source).unwrap();
    assert!(python.contains(
        "    if (n > 0) and (n < 10):\n        while n > 0:\n            n = n - 1\n    print(n)\n"
    ));
}

#[test]
fn test_return_value() {
    let python = compile("func add(a: int, b: int) -> int { return a + b; }").unwrap();
    assert_eq!(python, "def add(a, b):\n    return a + b\n");
}

#[test]
fn test_global_statements_wrapped() {
    let python = compile("var greeting = \"hi\"; print(greeting);").unwrap();
    assert_eq!(
        python,
        "def __global_main__():\n    greeting = \"hi\"\n    print(greeting)\n\nif __name__ == '__main__':\n    __global_main__()\n"
    );
}

#[test]
fn test_sast_findings() {
    let source = r#"
        func main() {
            var username = "admin";
            print(username);
            var query = "SELECT * FROM users WHERE name = '" + username + "'";
            print(query);
        }
    "#;
    let output = Pipeline::default().run(source).unwrap();
    let kinds: Vec<_> = output.vulnerabilities.iter().map(|v| v.kind).collect();
    assert!(kinds.contains(&VulnerabilityKind::SensitiveDataExposure));
    assert!(kinds.contains(&VulnerabilityKind::PotentialInjection));
    assert!(output.python.contains("print(query)"));
}

#[test]
fn test_semantic_errors() {
    assert!(matches!(
        compile("print(nope);"),
        Err(CompileError::Semantic(SemanticError::Undeclared { .. }))
    ));
    assert!(matches!(
        compile("var a: int = 1; var a: int = 2;"),
        Err(CompileError::Semantic(SemanticError::Redeclared { .. }))
    ));
    assert!(matches!(
        compile("var s: string = 5;"),
        Err(CompileError::Semantic(SemanticError::TypeMismatch { .. }))
    ));
}

#[test]
fn test_parse_error_has_span() {
    let err = compile("func main() {\n  print(1)\n}").unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
    assert_eq!(err.span().map(|s| s.start.line), Some(3));
}

#[test]
fn test_config_file_applies() {
    let config: CompilerConfig = parse_config(
        "[codegen]\nindent_width = 2\nentry_function = \"entry\"\n\n[optimizer]\nenabled = false\n",
    )
    .unwrap();
    let output = Pipeline::new(config).run("var unused = 1; print(2);").unwrap();
    assert_eq!(
        output.python,
        "def entry():\n  unused = 1\n  print(2)\n\nif __name__ == '__main__':\n  entry()\n"
    );
}

#[test]
fn test_temporary_names_rejected() {
    let err = compile("func main() { var t1: int = 5; print(t1 + 1); print(t1); }").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Semantic(SemanticError::ReservedName { ref name, .. }) if name == "t1"
    ));
    assert_eq!(err.span().map(|s| s.start.line), Some(1));
}

#[test]
fn test_integer_division() {
    let python = compile("func main() { var x: int = 7 / 2; print(x); print(x * 1.5 / 2); }").unwrap();
    assert!(python.contains("    x = 7 // 2\n"));
    assert!(python.contains("    print((x * 1.5) / 2)\n"));
}
