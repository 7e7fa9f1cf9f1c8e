use super::check_src;

#[test]
fn test_scenario_program() {
    let source = r#"
        func main() {
            var x: int = 3;
            while (x > 0) {
                print(x);
                x = x - 1;
            }
        }
    "#;
    assert!(check_src(source).is_ok());
}

#[test]
fn test_inferred_declaration() {
    assert!(check_src("var s = \"a\" + \"b\"; print(s);").is_ok());
}

#[test]
fn test_numeric_promotion_in_arithmetic() {
    assert!(check_src("var f: float = 1 + 2.5; var g: float = f * 2;").is_ok());
}

#[test]
fn test_parameters_visible_in_body() {
    let source = r#"
        func add(a: int, b: int) -> int {
            return a + b;
        }
    "#;
    assert!(check_src(source).is_ok());
}

#[test]
fn test_for_loop_with_increment() {
    let source = r#"
        func main() {
            for (var i: int = 0; i < 3; i++) {
                print(i);
            }
        }
    "#;
    assert!(check_src(source).is_ok());
}

#[test]
fn test_branch_scopes_are_independent() {
    let source = r#"
        var flag: bool = true;
        if (flag) {
            var y: int = 1;
        } else {
            var y: string = "one";
        }
        var y: float = 1.5;
    "#;
    assert!(check_src(source).is_ok());
}

#[test]
fn test_logical_conditions() {
    let source = r#"
        var a: int = 1;
        var b: int = 2;
        if (a < b && b != 0 || false) {
            print("ok");
        }
    "#;
    assert!(check_src(source).is_ok());
}

#[test]
fn test_globals_visible_in_functions() {
    let source = r#"
        var limit: int = 10;
        func main() {
            var n: int = limit;
            print(n);
        }
    "#;
    assert!(check_src(source).is_ok());
}

#[test]
fn test_names_close_to_temporaries_accepted() {
    assert!(check_src("var t: int = 1; var total: int = t; var t1x: int = total; print(t1x);").is_ok());
}
