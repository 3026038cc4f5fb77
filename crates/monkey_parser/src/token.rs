use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // Operators
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Bang,

    EqualEqual,
    BangEqual,
    LessThan,
    GreaterThan,

    // Delimiters
    Comma,
    Semicolon,
    Colon,

    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // Identifiers & Literals
    Identifier(String),
    /// Digits exactly as written; the parser decides whether they fit.
    Integer(String),
    String(String),

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,

    // Special
    Illegal(char),
    Eof,
}

/// The data-less counterpart of [`Token`], used when reporting what kind of
/// token was expected or found.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Bang,
    EqualEqual,
    BangEqual,
    LessThan,
    GreaterThan,
    Comma,
    Semicolon,
    Colon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Identifier,
    Integer,
    String,
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
    Illegal,
    Eof,
}

impl Token {
    /// Get the Token for the given keyword, if valid.
    pub fn lookup_keyword(s: &str) -> Option<Token> {
        use Token::*;

        match s {
            "fn" => Some(Function),
            "let" => Some(Let),
            "true" => Some(True),
            "false" => Some(False),
            "if" => Some(If),
            "else" => Some(Else),
            "return" => Some(Return),
            _ => None,
        }
    }

    /// Get the Token for a character that is always a complete token on its own.
    ///
    /// `=` and `!` are not in this table since they may start a two-character operator.
    pub fn lookup_symbol(c: char) -> Option<Token> {
        use Token::*;

        match c {
            '+' => Some(Plus),
            '-' => Some(Minus),
            '*' => Some(Asterisk),
            '/' => Some(Slash),
            '<' => Some(LessThan),
            '>' => Some(GreaterThan),
            ',' => Some(Comma),
            ';' => Some(Semicolon),
            ':' => Some(Colon),
            '(' => Some(LeftParen),
            ')' => Some(RightParen),
            '{' => Some(LeftBrace),
            '}' => Some(RightBrace),
            '[' => Some(LeftBracket),
            ']' => Some(RightBracket),
            _ => None,
        }
    }

    pub fn kind(&self) -> TokenKind {
        use Token::*;

        match self {
            Assign => TokenKind::Assign,
            Plus => TokenKind::Plus,
            Minus => TokenKind::Minus,
            Asterisk => TokenKind::Asterisk,
            Slash => TokenKind::Slash,
            Bang => TokenKind::Bang,
            EqualEqual => TokenKind::EqualEqual,
            BangEqual => TokenKind::BangEqual,
            LessThan => TokenKind::LessThan,
            GreaterThan => TokenKind::GreaterThan,
            Comma => TokenKind::Comma,
            Semicolon => TokenKind::Semicolon,
            Colon => TokenKind::Colon,
            LeftParen => TokenKind::LeftParen,
            RightParen => TokenKind::RightParen,
            LeftBrace => TokenKind::LeftBrace,
            RightBrace => TokenKind::RightBrace,
            LeftBracket => TokenKind::LeftBracket,
            RightBracket => TokenKind::RightBracket,
            Identifier(_) => TokenKind::Identifier,
            Integer(_) => TokenKind::Integer,
            String(_) => TokenKind::String,
            Function => TokenKind::Function,
            Let => TokenKind::Let,
            True => TokenKind::True,
            False => TokenKind::False,
            If => TokenKind::If,
            Else => TokenKind::Else,
            Return => TokenKind::Return,
            Illegal(_) => TokenKind::Illegal,
            Eof => TokenKind::Eof,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// The source text this token was read from (empty for EOF).
    pub fn literal(&self) -> String {
        match self {
            Token::Identifier(name) => name.clone(),
            Token::Integer(digits) => digits.clone(),
            Token::String(value) => value.clone(),
            Token::Illegal(c) => c.to_string(),
            Token::Eof => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Token::*;

        match self {
            Assign => write!(f, "="),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Asterisk => write!(f, "*"),
            Slash => write!(f, "/"),
            Bang => write!(f, "!"),

            EqualEqual => write!(f, "=="),
            BangEqual => write!(f, "!="),
            LessThan => write!(f, "<"),
            GreaterThan => write!(f, ">"),

            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
            Colon => write!(f, ":"),

            LeftParen => write!(f, "("),
            RightParen => write!(f, ")"),
            LeftBrace => write!(f, "{{"),
            RightBrace => write!(f, "}}"),
            LeftBracket => write!(f, "["),
            RightBracket => write!(f, "]"),

            Identifier(name) => write!(f, "{}", name),
            Integer(digits) => write!(f, "{}", digits),
            String(value) => write!(f, "\"{}\"", value),

            Function => write!(f, "fn"),
            Let => write!(f, "let"),
            True => write!(f, "true"),
            False => write!(f, "false"),
            If => write!(f, "if"),
            Else => write!(f, "else"),
            Return => write!(f, "return"),

            Illegal(c) => write!(f, "{}", c),
            Eof => write!(f, "EOF"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;

        let s = match self {
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Slash => "/",
            Bang => "!",
            EqualEqual => "==",
            BangEqual => "!=",
            LessThan => "<",
            GreaterThan => ">",
            Comma => ",",
            Semicolon => ";",
            Colon => ":",
            LeftParen => "(",
            RightParen => ")",
            LeftBrace => "{",
            RightBrace => "}",
            LeftBracket => "[",
            RightBracket => "]",
            Identifier => "IDENT",
            Integer => "INT",
            String => "STRING",
            Function => "fn",
            Let => "let",
            True => "true",
            False => "false",
            If => "if",
            Else => "else",
            Return => "return",
            Illegal => "ILLEGAL",
            Eof => "EOF",
        };

        write!(f, "{}", s)
    }
}
