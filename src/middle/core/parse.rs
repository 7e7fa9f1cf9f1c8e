//! Line recognizer for textual IR
//!
//! More specific shapes are tried first. Anything that matches no shape is
//! kept as [`Instruction::Other`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::ir::Instruction;

static FUNC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^FUNC\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:\(([^)]*)\))?\s*:$").expect("valid regex")
});
static END_FUNC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^END_FUNC\s+(\S+)$").expect("valid regex"));
static IF_FALSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^IF_FALSE\s+(\S+)\s+GOTO\s+(\S+)$").expect("valid regex"));
static GOTO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^GOTO\s+(\S+)$").expect("valid regex"));
static PRINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^PRINT\s+(.+)$").expect("valid regex"));
static RETURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^RETURN\s+(.+)$").expect("valid regex"));
static ASSIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ASSIGN\s+([^,\s]+)\s*,\s*(.+)$").expect("valid regex"));
static BIN_OP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^BIN_OP\s+(.+)$").expect("valid regex"));
static LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*):$").expect("valid regex"));

/// String literals, numbers and identifiers inside an operand
static OPERAND_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|[0-9][A-Za-z0-9_.]*|[A-Za-z_][A-Za-z0-9_]*"#)
        .expect("valid regex")
});

pub(crate) fn recognize(line: &str) -> Instruction {
    let line = line.trim();

    if let Some(caps) = FUNC.captures(line) {
        let params = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        return Instruction::Func {
            name: caps[1].to_string(),
            params,
        };
    }
    if let Some(caps) = END_FUNC.captures(line) {
        return Instruction::EndFunc {
            name: caps[1].to_string(),
        };
    }
    if let Some(caps) = IF_FALSE.captures(line) {
        return Instruction::IfFalseGoto {
            cond: caps[1].to_string(),
            label: caps[2].to_string(),
        };
    }
    if let Some(caps) = GOTO.captures(line) {
        return Instruction::Goto {
            label: caps[1].to_string(),
        };
    }
    if let Some(caps) = PRINT.captures(line) {
        return Instruction::Print {
            expr: caps[1].trim().to_string(),
        };
    }
    if let Some(caps) = RETURN.captures(line) {
        return Instruction::Return {
            expr: caps[1].trim().to_string(),
        };
    }
    if let Some(caps) = ASSIGN.captures(line) {
        return Instruction::Assign {
            target: caps[1].to_string(),
            value: caps[2].trim().to_string(),
        };
    }
    if let Some(caps) = BIN_OP.captures(line) {
        if let [target, left, op, right] = split_operands(&caps[1]).as_slice() {
            if !target.is_empty() && !left.is_empty() && !op.is_empty() && !right.is_empty() {
                return Instruction::BinOp {
                    target: target.to_string(),
                    left: left.to_string(),
                    op: op.to_string(),
                    right: right.to_string(),
                };
            }
        }
    }
    if let Some(caps) = LABEL.captures(line) {
        return Instruction::Label {
            name: caps[1].to_string(),
        };
    }

    Instruction::Other {
        raw: line.to_string(),
    }
}

/// Split on commas that are not inside a quoted string
pub(crate) fn split_operands(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            ',' => {
                parts.push(text[start..idx].trim());
                start = idx + 1;
            },
            _ => {},
        }
    }
    parts.push(text[start..].trim());
    parts
}

/// Identifier tokens in an operand, skipping string and number literals
pub(crate) fn operand_names(text: &str) -> impl Iterator<Item = &str> {
    OPERAND_TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|tok| tok.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_every_shape() {
        assert_eq!(
            recognize("FUNC main:"),
            Instruction::Func {
                name: "main".into(),
                params: vec![],
            }
        );
        assert_eq!(
            recognize("FUNC add(a, b):"),
            Instruction::Func {
                name: "add".into(),
                params: vec!["a".into(), "b".into()],
            }
        );
        assert_eq!(recognize("END_FUNC main"), Instruction::EndFunc { name: "main".into() });
        assert_eq!(recognize("L3:"), Instruction::Label { name: "L3".into() });
        assert_eq!(
            recognize("ASSIGN x, 3"),
            Instruction::Assign {
                target: "x".into(),
                value: "3".into(),
            }
        );
        assert_eq!(
            recognize("IF_FALSE t1 GOTO L2"),
            Instruction::IfFalseGoto {
                cond: "t1".into(),
                label: "L2".into(),
            }
        );
        assert_eq!(recognize("GOTO L1"), Instruction::Goto { label: "L1".into() });
        assert_eq!(recognize("PRINT x"), Instruction::Print { expr: "x".into() });
        assert_eq!(recognize("RETURN t4"), Instruction::Return { expr: "t4".into() });
    }

    #[test]
    fn test_bin_op_with_quoted_comma() {
        assert_eq!(
            recognize(r#"BIN_OP t1, "a, b", +, name"#),
            Instruction::BinOp {
                target: "t1".into(),
                left: "\"a, b\"".into(),
                op: "+".into(),
                right: "name".into(),
            }
        );
    }

    #[test]
    fn test_unknown_lines_pass_through() {
        assert_eq!(recognize("NOP"), Instruction::Other { raw: "NOP".into() });
        assert_eq!(
            recognize("BIN_OP t1, x, +"),
            Instruction::Other {
                raw: "BIN_OP t1, x, +".into(),
            }
        );
        assert_eq!(
            recognize("  CALL f, 2  "),
            Instruction::Other {
                raw: "CALL f, 2".into(),
            }
        );
    }

    #[test]
    fn test_assign_keeps_commas_in_value() {
        assert_eq!(
            recognize(r#"ASSIGN s, "x, y""#),
            Instruction::Assign {
                target: "s".into(),
                value: "\"x, y\"".into(),
            }
        );
    }

    #[test]
    fn test_operand_names() {
        let names: Vec<_> = operand_names(r#""it's x" y 3.5 _z"#).collect();
        assert_eq!(names, vec!["y", "_z"]);
    }
}
