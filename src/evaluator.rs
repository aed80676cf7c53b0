use crate::ast::Node;
use crate::object::{Object, ObjectKind};

/// Evaluates a tree to a single object.
///
/// Errors are values: once a subtree produces `Object::Error`, it is passed
/// up unchanged and the sibling subtree is not evaluated.
pub fn evaluate(node: &Node) -> Object {
    match node {
        Node::Integer { value, .. } => Object::Integer(*value),
        Node::Prefix {
            operator, operand, ..
        } => {
            let operand = evaluate(operand);
            if operand.is_error() {
                return operand;
            }
            evaluate_prefix(operator, operand)
        }
        Node::Infix {
            operator,
            left,
            right,
            ..
        } => {
            let left = evaluate(left);
            if left.is_error() {
                return left;
            }
            let right = evaluate(right);
            if right.is_error() {
                return right;
            }
            evaluate_infix(operator, left, right)
        }
    }
}

/// Like [`evaluate`], but an absent node has no result at all.
pub fn evaluate_optional(node: Option<&Node>) -> Option<Object> {
    node.map(evaluate)
}

fn evaluate_prefix(operator: &str, operand: Object) -> Object {
    if operator != "-" {
        return Object::error(format!("Unknown operator: {}", operator));
    }
    match operand {
        Object::Integer(value) => Object::Integer(value.wrapping_neg()),
        other => Object::error(format!("Unknown operand: {}", other.kind())),
    }
}

fn evaluate_infix(operator: &str, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => evaluate_integer_infix(operator, l, r),
        (l, r) if l.kind() != r.kind() => Object::error(format!(
            "Type mismatch: {} {} {}",
            l.kind(),
            operator,
            r.kind()
        )),
        (l, r) => Object::error(format!(
            "Unknown operator: {} {} {}",
            l.kind(),
            operator,
            r.kind()
        )),
    }
}

fn evaluate_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" if right == 0 => Object::error(format!(
            "Division by zero: {} / {}",
            ObjectKind::Integer,
            ObjectKind::Integer
        )),
        "/" => Object::Integer(left.wrapping_div(right)),
        _ => Object::error(format!(
            "Unknown operator: {} {} {}",
            ObjectKind::Integer,
            operator,
            ObjectKind::Integer
        )),
    }
}
