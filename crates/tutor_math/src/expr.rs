//! Pre-built arithmetic expression trees.
//!
//! JSON shape:
//! ```json
//! {"op": "sub", "args": [
//!     {"op": "mul", "args": [{"type": "integer", "value": 28},
//!                            {"op": "pow", "args": [{"type": "fraction", "numerator": 2, "denominator": 7},
//!                                                   {"type": "integer", "value": 2}]}]},
//!     {"op": "mul", "args": [{"type": "integer", "value": 8},
//!                            {"type": "fraction", "numerator": 2, "denominator": 7}]}]}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
}

impl OpKind {
    fn precedence(self) -> u8 {
        match self {
            OpKind::Add | OpKind::Sub => 1,
            OpKind::Mul | OpKind::Div => 2,
            OpKind::Neg => 3,
            OpKind::Pow => 4,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            OpKind::Add => " + ",
            OpKind::Sub => " - ",
            OpKind::Mul => "*",
            OpKind::Div => " : ",
            OpKind::Pow => "^",
            OpKind::Neg => "-",
        }
    }
}

/// Typed leaf value. Decimal and mantissa values are kept as text so they
/// are read exactly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Leaf {
    Integer {
        value: i64,
    },
    Fraction {
        numerator: i64,
        denominator: i64,
    },
    Decimal {
        value: String,
    },
    Mixed {
        whole: i64,
        numerator: i64,
        denominator: i64,
    },
    PowerOfTen {
        mantissa: String,
        exponent: i32,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OpNode {
    pub op: OpKind,
    pub args: Vec<ExprNode>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExprNode {
    Op(OpNode),
    Leaf(Leaf),
}

impl ExprNode {
    pub fn int(value: i64) -> Self {
        ExprNode::Leaf(Leaf::Integer { value })
    }

    pub fn frac(numerator: i64, denominator: i64) -> Self {
        ExprNode::Leaf(Leaf::Fraction {
            numerator,
            denominator,
        })
    }

    pub fn decimal(value: &str) -> Self {
        ExprNode::Leaf(Leaf::Decimal {
            value: value.to_string(),
        })
    }

    pub fn mixed(whole: i64, numerator: i64, denominator: i64) -> Self {
        ExprNode::Leaf(Leaf::Mixed {
            whole,
            numerator,
            denominator,
        })
    }

    pub fn power_of_ten(mantissa: &str, exponent: i32) -> Self {
        ExprNode::Leaf(Leaf::PowerOfTen {
            mantissa: mantissa.to_string(),
            exponent,
        })
    }

    pub fn op(op: OpKind, args: Vec<ExprNode>) -> Self {
        ExprNode::Op(OpNode { op, args })
    }

    pub fn add(l: ExprNode, r: ExprNode) -> Self {
        Self::op(OpKind::Add, vec![l, r])
    }

    pub fn sub(l: ExprNode, r: ExprNode) -> Self {
        Self::op(OpKind::Sub, vec![l, r])
    }

    pub fn mul(l: ExprNode, r: ExprNode) -> Self {
        Self::op(OpKind::Mul, vec![l, r])
    }

    pub fn div(l: ExprNode, r: ExprNode) -> Self {
        Self::op(OpKind::Div, vec![l, r])
    }

    pub fn pow(base: ExprNode, exp: ExprNode) -> Self {
        Self::op(OpKind::Pow, vec![base, exp])
    }

    pub fn neg(inner: ExprNode) -> Self {
        Self::op(OpKind::Neg, vec![inner])
    }

    /// Number of operation nodes in the tree.
    pub fn op_count(&self) -> usize {
        match self {
            ExprNode::Leaf(_) => 0,
            ExprNode::Op(node) => 1 + node.args.iter().map(ExprNode::op_count).sum::<usize>(),
        }
    }

    /// Machine text of the whole tree, e.g. `28*(2/7)^2 - 8*(2/7)`.
    pub fn render(&self) -> String {
        render_node(self, None, false)
    }
}

fn leaf_text(leaf: &Leaf) -> String {
    match leaf {
        Leaf::Integer { value } => value.to_string(),
        Leaf::Fraction {
            numerator,
            denominator,
        } => format!("{}/{}", numerator, denominator),
        Leaf::Decimal { value } => value.trim().to_string(),
        Leaf::Mixed {
            whole,
            numerator,
            denominator,
        } => format!("{} {}/{}", whole, numerator, denominator),
        Leaf::PowerOfTen { mantissa, exponent } => format!("{}*10^{}", mantissa.trim(), exponent),
    }
}

fn leaf_is_compound(leaf: &Leaf) -> bool {
    match leaf {
        Leaf::Integer { value } => *value < 0,
        Leaf::Decimal { value } => value.trim().starts_with('-'),
        Leaf::Fraction { .. } | Leaf::Mixed { .. } | Leaf::PowerOfTen { .. } => true,
    }
}

/// `parent` is the enclosing operation; `right` marks the right operand.
fn render_node(node: &ExprNode, parent: Option<OpKind>, right: bool) -> String {
    match node {
        ExprNode::Leaf(leaf) => {
            let text = leaf_text(leaf);
            let wrap = match parent {
                None => false,
                Some(OpKind::Add) | Some(OpKind::Sub) => right && text.starts_with('-'),
                Some(_) => leaf_is_compound(leaf),
            };
            if wrap {
                format!("({})", text)
            } else {
                text
            }
        }
        ExprNode::Op(op_node) => {
            let op = op_node.op;
            let text = match op {
                OpKind::Neg => {
                    let inner = op_node
                        .args
                        .first()
                        .map(|a| render_node(a, Some(op), false))
                        .unwrap_or_default();
                    format!("-{}", inner)
                }
                _ => op_node
                    .args
                    .iter()
                    .enumerate()
                    .map(|(i, a)| render_node(a, Some(op), i > 0))
                    .collect::<Vec<_>>()
                    .join(op.symbol()),
            };
            let wrap = match parent {
                None => false,
                Some(p) => {
                    let (mine, theirs) = (op.precedence(), p.precedence());
                    mine < theirs
                        || (mine == theirs && right && matches!(p, OpKind::Sub | OpKind::Div))
                        || (p == OpKind::Pow && mine <= theirs)
                        || (p == OpKind::Neg && mine <= theirs)
                }
            };
            if wrap {
                format!("({})", text)
            } else {
                text
            }
        }
    }
}
