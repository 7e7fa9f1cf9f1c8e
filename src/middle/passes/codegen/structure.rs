//! Branch and loop shape recognition
//!
//! Classifies the region that starts at an `IF_FALSE` instruction. The
//! analysis only reads the program; it never looks at what has already been
//! emitted.

use std::ops::Range;

use crate::middle::core::ir::{Instruction, Program};

/// Shape of the construct opened by an `IF_FALSE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `while`: the true block ends in a back-edge to `header`
    Loop {
        header: usize,
        body: Range<usize>,
        resume: usize,
    },
    /// `if`, optionally with an `else` block
    If {
        then_body: Range<usize>,
        else_body: Option<Range<usize>>,
        resume: usize,
    },
    /// Target label missing or outside the enclosing block
    Unresolved,
}

impl Shape {
    /// First index after the construct
    pub fn resume(&self) -> Option<usize> {
        match self {
            Shape::Loop { resume, .. } | Shape::If { resume, .. } => Some(*resume),
            Shape::Unresolved => None,
        }
    }
}

/// Classify the `IF_FALSE` at `at`.
///
/// `func_start` is the index of the enclosing `FUNC`; `limit` is the
/// exclusive end of the block being emitted.
pub fn analyze(
    program: &Program,
    at: usize,
    func_start: usize,
    limit: usize,
) -> Shape {
    let Some(Instruction::IfFalseGoto { label, .. }) = program.get(at) else {
        return Shape::Unresolved;
    };
    let else_idx = match program.label_index(label) {
        Some(idx) if idx > at && idx < limit => idx,
        _ => return Shape::Unresolved,
    };

    // Find the end of the true block, stepping over nested constructs whole
    let mut boundary = None;
    let mut j = at + 1;
    while j < else_idx {
        match program.get(j) {
            Some(Instruction::Goto { .. }) => {
                boundary = Some(j);
                break;
            },
            Some(Instruction::IfFalseGoto { .. }) => {
                j = match analyze(program, j, func_start, else_idx).resume() {
                    Some(resume) => resume.max(j + 1),
                    None => j + 1,
                };
            },
            _ => j += 1,
        }
    }

    let Some(goto_idx) = boundary else {
        return Shape::If {
            then_body: at + 1..else_idx,
            else_body: None,
            resume: else_idx + 1,
        };
    };

    let target = program.get(goto_idx).and_then(Instruction::jump_target);
    match target.and_then(|label| program.label_index(label)) {
        Some(header) if header >= func_start && header < at => Shape::Loop {
            header,
            body: at + 1..goto_idx,
            resume: else_idx + 1,
        },
        Some(end) if end > else_idx && end < limit => Shape::If {
            then_body: at + 1..goto_idx,
            else_body: Some(else_idx + 1..end),
            resume: end + 1,
        },
        Some(end) if end == else_idx => Shape::If {
            then_body: at + 1..goto_idx,
            else_body: None,
            resume: else_idx + 1,
        },
        // Irregular jump: keep it inside the true block so it surfaces
        _ => Shape::If {
            then_body: at + 1..else_idx,
            else_body: None,
            resume: else_idx + 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(text: &str) -> Program {
        Program::parse(text).unwrap()
    }

    #[test]
    fn test_loop_shape() {
        let p = program(
            "FUNC main:\nL1:\nBIN_OP t1, x, >, 0\nIF_FALSE t1 GOTO L2\nPRINT x\nGOTO L1\nL2:\nEND_FUNC main",
        );
        assert_eq!(
            analyze(&p, 3, 0, 7),
            Shape::Loop {
                header: 1,
                body: 4..5,
                resume: 7,
            }
        );
    }

    #[test]
    fn test_if_else_shape() {
        let p = program(
            "FUNC main:\nIF_FALSE c GOTO L1\nPRINT 1\nGOTO L2\nL1:\nPRINT 2\nL2:\nEND_FUNC main",
        );
        assert_eq!(
            analyze(&p, 1, 0, 7),
            Shape::If {
                then_body: 2..3,
                else_body: Some(5..6),
                resume: 7,
            }
        );
    }

    #[test]
    fn test_if_without_goto() {
        let p = program("FUNC main:\nIF_FALSE c GOTO L1\nPRINT 1\nL1:\nEND_FUNC main");
        assert_eq!(
            analyze(&p, 1, 0, 4),
            Shape::If {
                then_body: 2..3,
                else_body: None,
                resume: 4,
            }
        );
    }

    #[test]
    fn test_nested_goto_does_not_end_outer_block() {
        let p = program(
            "FUNC main:\n\
             IF_FALSE a GOTO L1\n\
             IF_FALSE b GOTO L3\n\
             PRINT 1\n\
             GOTO L4\n\
             L3:\n\
             L4:\n\
             PRINT 2\n\
             GOTO L2\n\
             L1:\n\
             L2:\n\
             END_FUNC main",
        );
        assert_eq!(
            analyze(&p, 1, 0, 11),
            Shape::If {
                then_body: 2..8,
                else_body: Some(10..10),
                resume: 11,
            }
        );
    }

    #[test]
    fn test_unresolved_label() {
        let p = program("FUNC main:\nIF_FALSE c GOTO L9\nEND_FUNC main");
        assert_eq!(analyze(&p, 1, 0, 2), Shape::Unresolved);
    }

    #[test]
    fn test_label_outside_block_is_unresolved() {
        let p = program("FUNC main:\nIF_FALSE c GOTO L1\nPRINT 1\nL1:\nEND_FUNC main");
        assert_eq!(analyze(&p, 1, 0, 3), Shape::Unresolved);
    }
}
