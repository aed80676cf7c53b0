use crate::ast::Node;
use crate::error::YacError;
use crate::lexer::{Lexer, Token, TokenType};

/// Binding power of an operator, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Sum,
    Product,
    Prefix,
}

impl Precedence {
    fn of(token_type: TokenType) -> Self {
        match token_type {
            TokenType::Plus | TokenType::Minus => Precedence::Sum,
            TokenType::Asterisk | TokenType::Slash => Precedence::Product,
            _ => Precedence::Lowest,
        }
    }
}

/// Deepest tree the parser will build. Nesting (`-`, `(`) and chained
/// binary operators both count, since each adds a level that evaluation
/// and drop recurse through.
pub const MAX_DEPTH: usize = 256;

type PrefixParseFn = fn(&mut Parser) -> Option<Node>;
type InfixParseFn = fn(&mut Parser, Option<Node>) -> Option<Node>;

fn prefix_rule(token_type: TokenType) -> Option<PrefixParseFn> {
    match token_type {
        TokenType::Number => Some(Parser::parse_integer as PrefixParseFn),
        TokenType::Minus => Some(Parser::parse_prefix_expression as PrefixParseFn),
        TokenType::LeftParen => Some(Parser::parse_grouped_expression as PrefixParseFn),
        _ => None,
    }
}

fn infix_rule(token_type: TokenType) -> Option<InfixParseFn> {
    match token_type {
        TokenType::Plus | TokenType::Minus | TokenType::Asterisk | TokenType::Slash => {
            Some(Parser::parse_infix_expression as InfixParseFn)
        }
        _ => None,
    }
}

/// Pratt parser over a [`Lexer`] with one token of lookahead.
///
/// Syntax errors do not stop parsing. They accumulate in [`Parser::errors`],
/// and when that list is non-empty the nodes returned by [`Parser::parse`]
/// must not be used.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<YacError>,
    depth: usize,
    abandoned: bool,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
            depth: 0,
            abandoned: false,
        }
    }

    pub fn errors(&self) -> &[YacError] {
        &self.errors
    }

    /// Parses top-level expressions until the end of input.
    pub fn parse(&mut self) -> Vec<Node> {
        let mut nodes = Vec::new();

        while !self.current_is(TokenType::Eof) {
            if let Some(node) = self.parse_expression(Precedence::Lowest) {
                nodes.push(node);
            }
            self.next_token();
        }

        nodes
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Node> {
        if self.abandoned {
            return None;
        }

        let entry_depth = self.depth;
        let expression = self.parse_nested_expression(precedence);
        self.depth = entry_depth;
        expression
    }

    fn parse_nested_expression(&mut self, precedence: Precedence) -> Option<Node> {
        if !self.descend() {
            return None;
        }

        let prefix = match prefix_rule(self.current.token_type) {
            Some(prefix) => prefix,
            None => {
                self.no_prefix_parse_error();
                return None;
            }
        };

        let mut left = prefix(self);

        while !self.peek_is(TokenType::Eof) && precedence < self.peek_precedence() {
            let infix = match infix_rule(self.peek.token_type) {
                Some(infix) => infix,
                None => return left,
            };
            if !self.descend() {
                return None;
            }
            self.next_token();
            left = infix(self, left);
        }

        left
    }

    fn parse_integer(&mut self) -> Option<Node> {
        match parse_int_literal(&self.current.literal) {
            Some(value) => Some(Node::Integer {
                token: self.current.clone(),
                value,
            }),
            None => {
                self.errors.push(YacError::syntax_error_with_help(
                    self.current.span.clone(),
                    format!("could not parse {:?} as integer", self.current.literal),
                    "integers must fit in 64 bits and use valid digits for their base".to_string(),
                ));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Node> {
        let token = self.current.clone();
        self.next_token();

        let operand = self.parse_expression(Precedence::Prefix)?;

        Some(Node::Prefix {
            operator: token.literal.clone(),
            token,
            operand: Box::new(operand),
        })
    }

    // The right operand is consumed even when the left one failed to parse,
    // so a bad literal is reported once instead of cascading.
    fn parse_infix_expression(&mut self, left: Option<Node>) -> Option<Node> {
        let token = self.current.clone();
        let precedence = self.current_precedence();
        self.next_token();

        let right = self.parse_expression(precedence);

        Some(Node::Infix {
            operator: token.literal.clone(),
            token,
            left: Box::new(left?),
            right: Box::new(right?),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Node> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenType::RightParen) {
            return None;
        }

        expression
    }

    // Once the line is too deep, the rest of it is skipped and no further
    // errors are recorded for it.
    fn descend(&mut self) -> bool {
        self.depth += 1;
        if self.depth <= MAX_DEPTH {
            return true;
        }

        self.errors.push(YacError::syntax_error_with_help(
            self.current.span.clone(),
            "expression nested too deeply".to_string(),
            format!("expressions may be at most {} levels deep", MAX_DEPTH),
        ));
        self.abandoned = true;
        while !self.current_is(TokenType::Eof) {
            self.next_token();
        }
        false
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, token_type: TokenType) -> bool {
        self.current.token_type == token_type
    }

    fn peek_is(&self, token_type: TokenType) -> bool {
        self.peek.token_type == token_type
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.token_type)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.token_type)
    }

    fn expect_peek(&mut self, token_type: TokenType) -> bool {
        if self.peek_is(token_type) {
            self.next_token();
            true
        } else {
            self.peek_error(token_type);
            false
        }
    }

    fn peek_error(&mut self, token_type: TokenType) {
        if self.abandoned {
            return;
        }
        self.errors.push(YacError::syntax_error_with_help(
            self.peek.span.clone(),
            format!(
                "expected next token to be {}, got {} instead",
                token_type, self.peek.token_type
            ),
            "every '(' must be closed by a matching ')'".to_string(),
        ));
    }

    fn no_prefix_parse_error(&mut self) {
        let error = match self.current.token_type {
            TokenType::Illegal => YacError::syntax_error_with_help(
                self.current.span.clone(),
                format!("Illegal token: {}", self.current.literal),
                "only integers and the operators + - * / ( ) are recognized".to_string(),
            ),
            other => YacError::syntax_error(
                self.current.span.clone(),
                format!("no prefix parse function for {} found", other),
            ),
        };
        self.errors.push(error);
    }
}

/// `0x`, `0o` and `0b` select a radix, a bare leading `0` means octal, and
/// `_` may separate digits. Anything outside `i64` is rejected.
fn parse_int_literal(literal: &str) -> Option<i64> {
    if literal.split('_').any(str::is_empty) {
        return None;
    }

    let (digits, radix) = match literal.get(..2) {
        Some("0x" | "0X") => (&literal[2..], 16),
        Some("0o" | "0O") => (&literal[2..], 8),
        Some("0b" | "0B") => (&literal[2..], 2),
        _ if literal.len() > 1 && literal.starts_with('0') => (&literal[1..], 8),
        _ => (literal, 10),
    };

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    i64::from_str_radix(&digits, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Vec<Node>, Vec<String>) {
        let mut parser = Parser::new(Lexer::new(source.to_string()));
        let nodes = parser.parse();
        let errors = parser.errors().iter().map(|e| e.message.clone()).collect();
        (nodes, errors)
    }

    fn canonical(source: &str) -> String {
        let (nodes, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, errors);
        assert_eq!(nodes.len(), 1, "expected one node for {:?}", source);
        nodes[0].to_string()
    }

    #[test]
    fn test_precedence() {
        let cases = [
            ("10", "10"),
            ("50-10", "(50-10)"),
            ("1 - 2 - 3", "((1-2)-3)"),
            ("8 / 4 / 2", "((8/4)/2)"),
            ("1 + 2 * 3", "(1+(2*3))"),
            ("-12*5", "((-12)*5)"),
            ("--3", "(-(-3))"),
            ("1 - -2", "(1-(-2))"),
            ("(1 + 2) * 3", "((1+2)*3)"),
            ("132 - 54/32   + -12 * 5", "((132-(54/32))+((-12)*5))"),
            ("-(4 + 5)", "(-(4+5))"),
        ];

        for (source, expected) in cases {
            assert_eq!(canonical(source), expected, "source: {}", source);
        }
    }

    #[test]
    fn test_integer_literal_value() {
        let (nodes, _) = parse("0x1F");
        match &nodes[0] {
            Node::Integer { value, token } => {
                assert_eq!(*value, 31);
                assert_eq!(token.literal, "0x1F");
            }
            other => panic!("expected integer, got {:?}", other),
        }
    }

    #[test]
    fn test_token_literal() {
        let (nodes, _) = parse("3 * 4");
        assert_eq!(nodes[0].token_literal(), "*");
        let (nodes, _) = parse("-4");
        assert_eq!(nodes[0].token_literal(), "-");
    }

    #[test]
    fn test_int_literals() {
        assert_eq!(parse_int_literal("42"), Some(42));
        assert_eq!(parse_int_literal("0"), Some(0));
        assert_eq!(parse_int_literal("010"), Some(8));
        assert_eq!(parse_int_literal("0o17"), Some(15));
        assert_eq!(parse_int_literal("0b1010"), Some(10));
        assert_eq!(parse_int_literal("0xff"), Some(255));
        assert_eq!(parse_int_literal("1_000_000"), Some(1_000_000));
        assert_eq!(parse_int_literal("0x_ff"), Some(255));
        assert_eq!(parse_int_literal("9223372036854775807"), Some(i64::MAX));

        assert_eq!(parse_int_literal("9223372036854775808"), None);
        assert_eq!(parse_int_literal("09"), None);
        assert_eq!(parse_int_literal("0x"), None);
        assert_eq!(parse_int_literal("0xfg"), None);
        assert_eq!(parse_int_literal("1__0"), None);
        assert_eq!(parse_int_literal("1_"), None);
    }

    #[test]
    fn test_missing_right_paren() {
        let (_, errors) = parse("(3 + 4");
        assert_eq!(errors, vec!["expected next token to be ), got EOF instead"]);
    }

    #[test]
    fn test_empty_parens() {
        let (nodes, errors) = parse("()");
        assert!(nodes.is_empty());
        assert_eq!(
            errors,
            vec![
                "no prefix parse function for ) found",
                "expected next token to be ), got EOF instead",
            ]
        );
    }

    #[test]
    fn test_illegal_token() {
        let (_, errors) = parse("4 % 2");
        assert_eq!(errors, vec!["Illegal token: %"]);
    }

    #[test]
    fn test_overflowing_literal_reports_once() {
        let (_, errors) = parse("99999999999999999999 + 1");
        assert_eq!(errors, vec!["could not parse \"99999999999999999999\" as integer"]);
    }

    #[test]
    fn test_errors_accumulate() {
        let (nodes, errors) = parse("1 + ) * $");
        assert!(nodes.is_empty());
        assert_eq!(
            errors,
            vec!["no prefix parse function for ) found", "Illegal token: $"]
        );
    }

    #[test]
    fn test_deep_negation_is_rejected() {
        let source = "-".repeat(100_000) + "1";
        let (nodes, errors) = parse(&source);
        assert!(nodes.is_empty());
        assert_eq!(errors, vec!["expression nested too deeply"]);
    }

    #[test]
    fn test_deep_parens_are_rejected() {
        let source = "(".repeat(100_000) + "1" + &")".repeat(100_000);
        let (nodes, errors) = parse(&source);
        assert!(nodes.is_empty());
        assert_eq!(errors, vec!["expression nested too deeply"]);
    }

    #[test]
    fn test_long_operator_chain_is_rejected() {
        let source = vec!["1"; 100_000].join(" + ");
        let (_, errors) = parse(&source);
        assert_eq!(errors, vec!["expression nested too deeply"]);
    }

    #[test]
    fn test_nesting_below_limit() {
        let source = "-".repeat(MAX_DEPTH - 1) + "1";
        let (nodes, errors) = parse(&source);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(nodes.len(), 1);

        let source = vec!["1"; 200].join(" + ");
        let (nodes, errors) = parse(&source);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_multiple_expressions() {
        let (nodes, errors) = parse("1 2 (3)");
        assert!(errors.is_empty());
        let rendered: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered, vec!["1", "2", "3"]);
    }
}
