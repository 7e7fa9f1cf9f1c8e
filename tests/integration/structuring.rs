//! The optimizer and the Python generator driven by IR listings

use charmeleon::middle::{eliminate, generate, CodegenWarning, Generator, Program};
use charmeleon::util::config::CodegenConfig;

const COUNTDOWN: &str = "\
FUNC main:
ASSIGN x, 3
L1:
BIN_OP t1, x, >, 0
IF_FALSE t1 GOTO L2
PRINT x
BIN_OP t2, x, -, 1
ASSIGN x, t2
GOTO L1
L2:
END_FUNC main
";

#[test]
fn test_countdown_round_trip() {
    let program = Program::parse(COUNTDOWN).unwrap();
    assert_eq!(program.to_text(), COUNTDOWN);
    assert_eq!(
        generate(&eliminate(&program)),
        "def main():\n    x = 3\n    while x > 0:\n        print(x)\n        x = x - 1\n"
    );
}

#[test]
fn test_dce_scenario() {
    let program = Program::parse("ASSIGN x, 10\nASSIGN y, 20\nPRINT x\n").unwrap();
    assert_eq!(eliminate(&program).to_text(), "ASSIGN x, 10\nPRINT x\n");
}

#[test]
fn test_eliminate_is_idempotent() {
    let program = Program::parse(COUNTDOWN).unwrap();
    let once = eliminate(&program);
    assert_eq!(eliminate(&once), once);
}

#[test]
fn test_blank_lines_and_whitespace_ignored() {
    let text = "\n  FUNC main:\n\n    PRINT \"hi\"  \n  END_FUNC main\n\n";
    let program = Program::parse(text).unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(generate(&program), "def main():\n    print(\"hi\")\n");
}

#[test]
fn test_two_functions_are_independent() {
    let text = "\
FUNC first:
IF_FALSE a GOTO L1
PRINT 1
L1:
END_FUNC first
FUNC second:
IF_FALSE b GOTO L2
PRINT 2
L2:
END_FUNC second
";
    assert_eq!(
        generate(&Program::parse(text).unwrap()),
        "def first():\n    if a:\n        print(1)\n\ndef second():\n    if b:\n        print(2)\n"
    );
}

#[test]
fn test_warnings_are_reported() {
    let program = Program::parse("FUNC main:\nGOTO L7\nPRINT 1\nL7:\nEND_FUNC main").unwrap();
    let (python, warnings) = Generator::new(&program, &CodegenConfig::default()).generate();
    assert!(python.contains("# goto L7"));
    assert_eq!(warnings.len(), 1);
    assert!(matches!(&warnings[0], CodegenWarning::UnstructuredJump { label, .. } if label == "L7"));
    assert_eq!(
        warnings[0].to_string(),
        "unstructured jump to 'L7' in 'main' (instruction 1) emitted as a comment"
    );
}

#[test]
fn test_duplicate_label_rejected() {
    assert!(Program::parse("L1:\nPRINT 1\nL1:").is_err());
}
