use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Integer,
    Error,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectKind::Integer => write!(f, "INTEGER"),
            ObjectKind::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of evaluating a node. Evaluation failures are ordinary values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Integer(i64),
    Error(String),
}

impl Object {
    pub fn error(message: impl Into<String>) -> Self {
        Object::Error(message.into())
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Error(_) => ObjectKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Error(message) => write!(f, "{}", message),
        }
    }
}
