//! Recursive descent parser for flat filter expressions.

use strsim::levenshtein;

use super::error::{FilterError, FilterResult};
use super::lexer::{FilterToken, Lexer, LexerError};
use crate::ast::{LogicNode, Operator, SearchClause, SearchField};
use crate::value::SearchValue;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Parser for flat filter expressions.
///
/// # Grammar
///
/// ```text
/// expression ::= or_expr
/// or_expr    ::= and_expr ("OR" and_expr)*
/// and_expr   ::= unary_expr ("AND" unary_expr)*
/// unary_expr ::= "NOT" unary_expr | clause
/// clause     ::= FIELD OPERATOR [value]
/// value      ::= WORD+ | QUOTED | "[" item ("," item)* "]"
/// item       ::= WORD | QUOTED
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `NOT` / `!` - unary
/// 2. `AND` / `&&` - binary
/// 3. `OR` / `||` - binary
///
/// Parentheses are not part of the syntax; build a [`LogicNode`] directly
/// for arbitrary nesting.
///
/// # Example
///
/// ```
/// use reminders_query_rs::filter::FilterParser;
/// use reminders_query_rs::{LogicNode, Operator, SearchClause, SearchField};
///
/// let node = FilterParser::parse("priority = high AND tag includes urgent").unwrap();
/// assert_eq!(
///     node,
///     LogicNode::all(vec![
///         LogicNode::clause(SearchClause::new(SearchField::Priority, Operator::Equals, "high")),
///         LogicNode::clause(SearchClause::new(SearchField::Tag, Operator::Includes, "urgent")),
///     ])
/// );
/// ```
pub struct FilterParser {
    tokens: Vec<FilterToken>,
    position: usize,
}

impl FilterParser {
    /// Parses a filter expression string into a logic tree.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyExpression` if the input is blank,
    /// `FilterError::Lexer` or `FilterError::UnterminatedString` if it cannot
    /// be tokenized, and the other variants for grammar errors.
    pub fn parse(input: &str) -> FilterResult<LogicNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let lexed = Lexer::new(trimmed).tokenize_with_errors();
        if let Some(error) = lexed.errors.into_iter().next() {
            return Err(match error {
                LexerError::UnexpectedCharacter {
                    character,
                    position,
                } => FilterError::Lexer {
                    character,
                    position,
                },
                LexerError::UnterminatedString { position } => {
                    FilterError::UnterminatedString { position }
                }
            });
        }

        let tokens: Vec<FilterToken> = lexed.tokens.into_iter().map(|pt| pt.token).collect();
        if tokens.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let mut parser = Self {
            tokens,
            position: 0,
        };
        let node = parser.parse_expression()?;

        // Check that we consumed all tokens
        if let Some(remaining) = parser.peek() {
            return Err(FilterError::unexpected_token(remaining.to_string()));
        }

        Ok(node)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&FilterToken> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<FilterToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Checks if the current token matches the expected token type.
    fn check(&self, expected: &FilterToken) -> bool {
        self.peek() == Some(expected)
    }

    /// Parses the top-level expression (OR expression).
    fn parse_expression(&mut self) -> FilterResult<LogicNode> {
        self.parse_or_expr()
    }

    /// Parses OR expressions: `and_expr ("OR" and_expr)*`
    fn parse_or_expr(&mut self) -> FilterResult<LogicNode> {
        let mut operands = vec![self.parse_and_expr()?];

        while self.check(&FilterToken::Or) {
            self.advance();
            operands.push(self.parse_and_expr()?);
        }

        Ok(collapse(operands, LogicNode::any))
    }

    /// Parses AND expressions: `unary_expr ("AND" unary_expr)*`
    fn parse_and_expr(&mut self) -> FilterResult<LogicNode> {
        let mut operands = vec![self.parse_unary_expr()?];

        while self.check(&FilterToken::And) {
            self.advance();
            operands.push(self.parse_unary_expr()?);
        }

        Ok(collapse(operands, LogicNode::all))
    }

    /// Parses unary expressions: `"NOT" unary_expr | clause`
    fn parse_unary_expr(&mut self) -> FilterResult<LogicNode> {
        if self.check(&FilterToken::Not) {
            self.advance();
            let inner = self.parse_unary_expr()?;
            return Ok(LogicNode::negate(inner));
        }

        self.parse_clause().map(LogicNode::clause)
    }

    /// Parses a clause: `FIELD OPERATOR [value]`
    fn parse_clause(&mut self) -> FilterResult<SearchClause> {
        let field = match self.advance() {
            Some(FilterToken::Word(name)) => lookup_field(&name)?,
            Some(token) => return Err(FilterError::unexpected_token(token.to_string())),
            None => return Err(FilterError::UnexpectedEndOfInput),
        };

        let op = match self.advance() {
            Some(FilterToken::Word(name)) | Some(FilterToken::Symbol(name)) => {
                lookup_operator(&name)?
            }
            Some(token) => return Err(FilterError::unexpected_token(token.to_string())),
            None => return Err(FilterError::UnexpectedEndOfInput),
        };

        if op.is_unary() {
            return Ok(SearchClause::unary(field, op));
        }

        let value = self.parse_value(op)?;
        Ok(SearchClause::new(field, op, value))
    }

    /// Parses a clause operand.
    fn parse_value(&mut self, op: Operator) -> FilterResult<SearchValue> {
        match self.peek() {
            Some(FilterToken::Quoted(_)) => match self.advance() {
                Some(FilterToken::Quoted(text)) => Ok(SearchValue::String(text)),
                _ => Err(FilterError::UnexpectedEndOfInput),
            },
            Some(FilterToken::Word(_)) => {
                let mut words = Vec::new();
                while let Some(FilterToken::Word(word)) = self.peek() {
                    words.push(word.clone());
                    self.advance();
                }
                if words.len() == 1 {
                    Ok(typed_word(&words[0]))
                } else {
                    Ok(SearchValue::String(words.join(" ")))
                }
            }
            Some(FilterToken::OpenBracket) => {
                self.advance();
                self.parse_list()
            }
            _ => Err(FilterError::missing_value(op.as_str())),
        }
    }

    /// Parses list items after the opening bracket.
    fn parse_list(&mut self) -> FilterResult<SearchValue> {
        let mut items = Vec::new();
        if self.check(&FilterToken::CloseBracket) {
            self.advance();
            return Ok(SearchValue::Array(items));
        }

        loop {
            match self.advance() {
                Some(FilterToken::Word(word)) => items.push(typed_word(&word)),
                Some(FilterToken::Quoted(text)) => items.push(SearchValue::String(text)),
                Some(token) => return Err(FilterError::unexpected_token(token.to_string())),
                None => return Err(FilterError::UnexpectedEndOfInput),
            }

            match self.advance() {
                Some(FilterToken::Comma) => continue,
                Some(FilterToken::CloseBracket) => return Ok(SearchValue::Array(items)),
                Some(token) => return Err(FilterError::unexpected_token(token.to_string())),
                None => return Err(FilterError::UnexpectedEndOfInput),
            }
        }
    }
}

/// Parses a filter expression into a logic tree.
///
/// Shorthand for [`FilterParser::parse`].
pub fn parse_filter(input: &str) -> FilterResult<LogicNode> {
    FilterParser::parse(input)
}

/// A single operand stays as it is; several are wrapped by `wrap`.
fn collapse(mut operands: Vec<LogicNode>, wrap: fn(Vec<LogicNode>) -> LogicNode) -> LogicNode {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        wrap(operands)
    }
}

/// Interprets a bare word as a bool, null, number or string.
///
/// A word only becomes a number when it reads back unchanged, so `007` and
/// `1.50` stay strings.
fn typed_word(word: &str) -> SearchValue {
    match word.to_lowercase().as_str() {
        "true" => return SearchValue::Bool(true),
        "false" => return SearchValue::Bool(false),
        "null" => return SearchValue::Null,
        _ => {}
    }

    match word.parse::<f64>() {
        Ok(n) if n.is_finite() => {
            let number = SearchValue::Number(n);
            if number.as_string() == word {
                number
            } else {
                SearchValue::String(word.to_string())
            }
        }
        _ => SearchValue::String(word.to_string()),
    }
}

fn lookup_field(name: &str) -> FilterResult<SearchField> {
    SearchField::from_name(name).ok_or_else(|| {
        let suggestion = find_similar_name(name, SearchField::ALL.iter().map(|f| f.as_str()));
        FilterError::unknown_field(name, suggestion)
    })
}

fn lookup_operator(name: &str) -> FilterResult<Operator> {
    Operator::from_name(name).ok_or_else(|| {
        let suggestion = find_similar_name(name, Operator::ALL.iter().map(|op| op.as_str()));
        FilterError::unknown_operator(name, suggestion)
    })
}

/// Finds the closest candidate within the suggestion distance.
fn find_similar_name<'a>(query: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, distance)| *distance)?;

    (best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE).then(|| best_match.to_string())
}
