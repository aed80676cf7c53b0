use crate::error::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Illegal,
    Eof,

    // Literals
    Number,

    // Operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    LeftParen,
    RightParen,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::Eof => "EOF",
            TokenType::Number => "NUMBER",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Asterisk => "*",
            TokenType::Slash => "/",
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, literal: String, span: Span) -> Self {
        Self {
            token_type,
            literal,
            span,
        }
    }
}

/// Pull-based scanner over a single input line.
///
/// Every call to [`Lexer::next_token`] yields one token; once the input is
/// exhausted it keeps returning `Eof`. Unknown characters never fail the
/// scan, they come back as `Illegal` tokens for the parser to report.
pub struct Lexer {
    source: String,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: String) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.current;

        let c = match self.advance() {
            Some(c) => c,
            None => return Token::new(TokenType::Eof, String::new(), Span::single(self.current)),
        };

        match c {
            '+' => self.make_token(TokenType::Plus),
            '-' => self.make_token(TokenType::Minus),
            '*' => self.make_token(TokenType::Asterisk),
            '/' => self.make_token(TokenType::Slash),
            '(' => self.make_token(TokenType::LeftParen),
            ')' => self.make_token(TokenType::RightParen),
            c if c.is_ascii_digit() => self.number(c),
            _ => self.make_token(TokenType::Illegal),
        }
    }

    /// Drains the lexer. The returned vector always ends with a single `Eof`.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.token_type == TokenType::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn number(&mut self, first: char) -> Token {
        // 0x.., 0o.., 0b..: radix digits are checked when the parser converts the literal
        if first == '0' && matches!(self.peek(), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')) {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                self.advance();
            }
        } else {
            while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
                self.advance();
            }
        }

        self.make_token(TokenType::Number)
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        let text = &self.source[self.start..self.current];
        Token::new(
            token_type,
            text.to_string(),
            Span::new(self.start, self.current),
        )
    }
}
