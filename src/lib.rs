// yac: a small integer arithmetic interpreter.
//
// A line goes through the lexer, a Pratt parser and a tree-walking evaluator.
// Every line is handled with fresh state.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod runner;

// Re-export commonly used items
pub use ast::Node;
pub use error::{ErrorKind, Span, YacError};
pub use evaluator::{evaluate, evaluate_optional};
pub use lexer::{Lexer, Token, TokenType};
pub use object::{Object, ObjectKind};
pub use parser::Parser;
pub use runner::{interpret, ErrorStyle};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;
