use std::iter::Peekable;
use std::str::Chars;

use tracing::trace;

use crate::span::{BytePos, Span, WithSpan};
use crate::token::Token;

/// Turns program source into tokens, one at a time.
///
/// The lexer never fails: characters it does not recognize come out as
/// [`Token::Illegal`] and it keeps returning [`Token::Eof`] once the input is exhausted.
pub struct Lexer<'a> {
    input_iter: Peekable<Chars<'a>>,
    current_position: BytePos,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            input_iter: input.chars().peekable(),
            current_position: BytePos::new(0),
        }
    }

    /// Consume the next character from the list.
    fn read_char(&mut self) -> Option<char> {
        let next = self.input_iter.next();
        if let Some(c) = next {
            self.current_position = self.current_position.shift(c);
        }
        next
    }

    /// Get the next character from the list without consuming it.
    fn peek_char(&mut self) -> Option<&char> {
        self.input_iter.peek()
    }

    /// Consume whitespace until a non-whitespace character is found.
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek_char() {
            if c.is_whitespace() {
                self.read_char();
            } else {
                break;
            }
        }
    }

    /// Read everything up to the closing quote (or the end of input) as a string.
    ///
    /// There are no escape sequences, so the content can never contain a `"`.
    fn read_string(&mut self) -> Token {
        let mut s = String::new();

        while let Some(ch) = self.read_char() {
            if ch == '"' {
                break;
            }
            s.push(ch);
        }

        Token::String(s)
    }

    /// Read the current and following digits as an integer token.
    fn read_integer(&mut self, first: char) -> Token {
        let mut digits = String::new();
        digits.push(first);

        while let Some(&ch) = self.peek_char() {
            if is_digit(ch) {
                digits.push(ch);
                self.read_char();
            } else {
                break;
            }
        }

        Token::Integer(digits)
    }

    /// Read the current and following tokens as an identifier or a keyword (if it exists).
    fn read_identifier_or_keyword(&mut self, first: char) -> Token {
        let mut identifier = String::new();
        identifier.push(first);

        while let Some(&ch) = self.peek_char() {
            if is_identifier_char(ch) {
                identifier.push(ch);
                self.read_char();
            } else {
                break;
            }
        }

        Token::lookup_keyword(&identifier).unwrap_or(Token::Identifier(identifier))
    }

    /// Consume the next character if it is `expected`, picking between a two-character
    /// operator and its one-character prefix.
    fn either(&mut self, expected: char, double: Token, single: Token) -> Token {
        match self.peek_char() {
            Some(&c) if c == expected => {
                self.read_char();
                double
            }
            _ => single,
        }
    }

    /// Read a new token from the characters list.
    pub fn next_token(&mut self) -> WithSpan<Token> {
        self.skip_whitespace();

        let initial_position = self.current_position;

        let token = match self.read_char() {
            Some('=') => self.either('=', Token::EqualEqual, Token::Assign),
            Some('!') => self.either('=', Token::BangEqual, Token::Bang),
            Some('"') => self.read_string(),
            Some(c) if is_digit(c) => self.read_integer(c),
            Some(c) if is_identifier_char(c) => self.read_identifier_or_keyword(c),
            Some(c) => Token::lookup_symbol(c).unwrap_or_else(|| {
                trace!(character = %c, "illegal character");
                Token::Illegal(c)
            }),
            None => Token::Eof,
        };

        let span = Span::new(initial_position, self.current_position);

        WithSpan::new(token, span)
    }
}

/// Whether or not the given character is a digit
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Whether or not the given character is valid in an identifier
fn is_identifier_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}
