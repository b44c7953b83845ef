//! Lexer (tokenizer) for filter expressions.

use std::iter::Peekable;
use std::str::Chars;

/// Error encountered during lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    /// A character that cannot start any token.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The position (0-indexed byte offset) of the character.
        position: usize,
    },

    /// A quoted string ran to the end of input.
    UnterminatedString {
        /// The position of the opening quote.
        position: usize,
    },
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexerError::UnexpectedCharacter {
                character,
                position,
            } => write!(
                f,
                "unexpected character '{}' at position {}",
                character, position
            ),
            LexerError::UnterminatedString { position } => {
                write!(f, "unterminated string starting at position {}", position)
            }
        }
    }
}

impl std::error::Error for LexerError {}

/// Result of tokenizing a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens successfully parsed, with their positions.
    pub tokens: Vec<PositionedToken>,
    /// Any errors encountered.
    pub errors: Vec<LexerError>,
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: FilterToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// A token in a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    // ==================== Words ====================
    /// A bare word: a field name, a named operator or part of a value.
    Word(String),

    /// A single- or double-quoted string, with escapes resolved.
    Quoted(String),

    /// A symbolic comparison operator such as `>=` or `!~`.
    Symbol(String),

    // ==================== Connectives ====================
    /// `AND` or `&&`.
    And,

    /// `OR` or `||`.
    Or,

    /// `NOT` or `!`.
    Not,

    // ==================== Lists ====================
    /// Opening bracket `[`.
    OpenBracket,

    /// Closing bracket `]`.
    CloseBracket,

    /// List separator `,`.
    Comma,
}

impl std::fmt::Display for FilterToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterToken::Word(word) | FilterToken::Symbol(word) => f.write_str(word),
            FilterToken::Quoted(text) => write!(f, "\"{}\"", text),
            FilterToken::And => f.write_str("AND"),
            FilterToken::Or => f.write_str("OR"),
            FilterToken::Not => f.write_str("NOT"),
            FilterToken::OpenBracket => f.write_str("["),
            FilterToken::CloseBracket => f.write_str("]"),
            FilterToken::Comma => f.write_str(","),
        }
    }
}

/// Characters that end a bare word.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || "\"'[],()=<>!~&|".contains(c)
}

/// Lexer for tokenizing filter expressions.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
    /// Errors encountered during tokenization.
    errors: Vec<LexerError>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            errors: Vec::new(),
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    /// Consumes the next character if it equals `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(&expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads a bare word.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            word.push(c);
            self.next_char();
        }
        word
    }

    /// Reads a quoted string (single or double quotes).
    ///
    /// Returns `None` if the closing quote is missing.
    fn read_quoted_string(&mut self, quote_char: char) -> Option<String> {
        // Consume the opening quote
        self.next_char();

        let mut result = String::new();
        while let Some(c) = self.next_char() {
            if c == quote_char {
                return Some(result);
            }
            if c == '\\' {
                if let Some(escaped) = self.next_char() {
                    result.push(escaped);
                }
            } else {
                result.push(c);
            }
        }
        None
    }

    /// Returns the next token with its position, or None if at end of input.
    pub fn next_token(&mut self) -> Option<PositionedToken> {
        self.skip_whitespace();

        let c = *self.peek()?;
        let position = self.position;
        let positioned = |token| Some(PositionedToken { token, position });

        match c {
            '"' | '\'' => match self.read_quoted_string(c) {
                Some(text) => positioned(FilterToken::Quoted(text)),
                None => {
                    self.errors
                        .push(LexerError::UnterminatedString { position });
                    None
                }
            },

            '[' => {
                self.next_char();
                positioned(FilterToken::OpenBracket)
            }
            ']' => {
                self.next_char();
                positioned(FilterToken::CloseBracket)
            }
            ',' => {
                self.next_char();
                positioned(FilterToken::Comma)
            }

            '&' => {
                self.next_char();
                self.eat('&');
                positioned(FilterToken::And)
            }
            '|' => {
                self.next_char();
                self.eat('|');
                positioned(FilterToken::Or)
            }
            '!' => {
                self.next_char();
                if self.eat('=') {
                    positioned(FilterToken::Symbol("!=".to_string()))
                } else if self.eat('~') {
                    positioned(FilterToken::Symbol("!~".to_string()))
                } else {
                    positioned(FilterToken::Not)
                }
            }

            '=' => {
                self.next_char();
                self.eat('=');
                positioned(FilterToken::Symbol("=".to_string()))
            }
            '<' => {
                self.next_char();
                if self.eat('=') {
                    positioned(FilterToken::Symbol("<=".to_string()))
                } else if self.eat('>') {
                    positioned(FilterToken::Symbol("<>".to_string()))
                } else {
                    positioned(FilterToken::Symbol("<".to_string()))
                }
            }
            '>' => {
                self.next_char();
                if self.eat('=') {
                    positioned(FilterToken::Symbol(">=".to_string()))
                } else {
                    positioned(FilterToken::Symbol(">".to_string()))
                }
            }
            '~' => {
                self.next_char();
                positioned(FilterToken::Symbol("~".to_string()))
            }

            // Unknown character - record error and continue
            '(' | ')' => {
                self.next_char();
                self.errors.push(LexerError::UnexpectedCharacter {
                    character: c,
                    position,
                });
                self.next_token()
            }

            _ => {
                let word = self.read_word();
                let token = match word.to_lowercase().as_str() {
                    "and" => FilterToken::And,
                    "or" => FilterToken::Or,
                    "not" => FilterToken::Not,
                    _ => FilterToken::Word(word),
                };
                positioned(token)
            }
        }
    }

    /// Collects all tokens into a vector (without positions).
    #[cfg(test)]
    pub fn tokenize(self) -> Vec<FilterToken> {
        self.tokenize_with_errors()
            .tokens
            .into_iter()
            .map(|pt| pt.token)
            .collect()
    }

    /// Collects all tokens and any errors encountered.
    pub fn tokenize_with_errors(mut self) -> LexerResult {
        let mut tokens = Vec::new();
        while let Some(positioned_token) = self.next_token() {
            tokens.push(positioned_token);
        }
        LexerResult {
            tokens,
            errors: self.errors,
        }
    }
}
