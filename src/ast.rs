use crate::lexer::Token;
use std::fmt;

/// Expression tree produced by the parser.
///
/// Each node keeps the token that introduced it. `Display` gives the
/// canonical, fully parenthesized rendering used to compare trees.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Integer {
        token: Token,
        value: i64,
    },
    Prefix {
        token: Token,
        operator: String,
        operand: Box<Node>,
    },
    Infix {
        token: Token,
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn token(&self) -> &Token {
        match self {
            Node::Integer { token, .. } => token,
            Node::Prefix { token, .. } => token,
            Node::Infix { token, .. } => token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Integer { token, .. } => write!(f, "{}", token.literal),
            Node::Prefix {
                operator, operand, ..
            } => write!(f, "({}{})", operator, operand),
            Node::Infix {
                operator,
                left,
                right,
                ..
            } => write!(f, "({}{}{})", left, operator, right),
        }
    }
}
