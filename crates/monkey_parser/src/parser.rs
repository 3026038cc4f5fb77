use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::ast::{
    ArrayLiteral, BlockStatement, CallExpression, Expression, FunctionLiteral, HashLiteral,
    IdentifierLiteral, IfExpression, IndexExpression, InfixExpression, PrefixExpression, Program,
    Statement,
};
use crate::lexer::Lexer;
use crate::span::WithSpan;
use crate::token::{Token, TokenKind};

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The token after the current one was not the one the grammar requires
    #[error(
        "expected next token to be {expected}, got {} instead {}",
        .got.value.kind(),
        .got.span.at_str()
    )]
    Expected {
        expected: TokenKind,
        got: WithSpan<Token>,
    },
    /// The token cannot start an expression
    #[error(
        "no prefix parse function for {} found {}",
        .0.value.kind(),
        .0.span.at_str()
    )]
    NoPrefixParseFn(WithSpan<Token>),
    /// The integer literal does not fit in 64 bits
    #[error(
        "could not parse {} as integer {}",
        .0.value.literal(),
        .0.span.at_str()
    )]
    InvalidInteger(WithSpan<Token>),
}

type ParseResult<T> = Result<T, ParseError>;

type PrefixParseFn<'a> = fn(&mut Parser<'a>) -> ParseResult<Expression>;
type InfixParseFn<'a> = fn(&mut Parser<'a>, Expression) -> ParseResult<Expression>;

/// Binding power of operators, from loosest to tightest.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `a[i]`
    Index,
}

impl Precedence {
    fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::EqualEqual | TokenKind::BangEqual => Precedence::Equals,
            TokenKind::LessThan | TokenKind::GreaterThan => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LeftParen => Precedence::Call,
            TokenKind::LeftBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

/// Pratt parser over a [`Lexer`], holding the current token and one token of lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    errors: Vec<ParseError>,

    current_token: WithSpan<Token>,
    peek_token: WithSpan<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Parser<'a> {
        let cur = lexer.next_token();
        let next = lexer.next_token();
        Parser {
            lexer,
            errors: Vec::new(),
            current_token: cur,
            peek_token: next,
        }
    }

    /// Parse the whole input.
    ///
    /// Statements that fail to parse are left out and parsing carries on with the next
    /// token, so a single pass reports as many diagnostics as it can. Any diagnostic
    /// means the program is not returned.
    pub fn parse_program(&mut self) -> Result<Program, Vec<ParseError>> {
        let mut program = Program::new();

        while !self.current_token_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_recorded_statement() {
                program.statements.push(statement);
            }
            self.next_token();
        }

        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }

    /// Parse a statement, recording its error (if any) instead of returning it.
    fn parse_recorded_statement(&mut self) -> Option<Statement> {
        match self.parse_statement() {
            Ok(statement) => Some(statement),
            Err(error) => {
                debug!(%error, "statement omitted");
                self.errors.push(error);
                None
            }
        }
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current_token.value {
            Token::Let => self.parse_let_statement(),
            Token::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> ParseResult<Statement> {
        self.expect_peek(TokenKind::Identifier)?;
        let name = self.current_identifier()?.name;

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        // Consume the `return` token
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Return { value })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Expression { expression })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let prefix = Self::prefix_parse_fn(self.current_token.value.kind())
            .ok_or_else(|| ParseError::NoPrefixParseFn(self.current_token.clone()))?;

        let mut left = prefix(self)?;

        while !self.peek_token_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match Self::infix_parse_fn(self.peek_token.value.kind()) {
                Some(infix) => infix,
                None => return Ok(left),
            };

            self.next_token();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    /// Handler for tokens that can start an expression.
    fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixParseFn<'a>> {
        match kind {
            TokenKind::Identifier => Some(Self::parse_identifier),
            TokenKind::Integer => Some(Self::parse_integer_literal),
            TokenKind::String => Some(Self::parse_string_literal),
            TokenKind::True | TokenKind::False => Some(Self::parse_boolean),
            TokenKind::Bang | TokenKind::Minus => Some(Self::parse_prefix_expression),
            TokenKind::LeftParen => Some(Self::parse_grouped_expression),
            TokenKind::If => Some(Self::parse_if_expression),
            TokenKind::Function => Some(Self::parse_function_literal),
            TokenKind::LeftBracket => Some(Self::parse_array_literal),
            TokenKind::LeftBrace => Some(Self::parse_hash_literal),
            _ => None,
        }
    }

    /// Handler for tokens that continue an expression from its left-hand side.
    fn infix_parse_fn(kind: TokenKind) -> Option<InfixParseFn<'a>> {
        match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::EqualEqual
            | TokenKind::BangEqual
            | TokenKind::LessThan
            | TokenKind::GreaterThan => Some(Self::parse_infix_expression),
            TokenKind::LeftParen => Some(Self::parse_call_expression),
            TokenKind::LeftBracket => Some(Self::parse_index_expression),
            _ => None,
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<Expression> {
        Ok(Expression::Identifier(self.current_identifier()?))
    }

    fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        let parsed = match &self.current_token.value {
            Token::Integer(digits) => digits.parse::<i64>(),
            _ => return Err(self.unexpected_current(TokenKind::Integer)),
        };

        parsed
            .map(Expression::Integer)
            .map_err(|_| ParseError::InvalidInteger(self.current_token.clone()))
    }

    fn parse_string_literal(&mut self) -> ParseResult<Expression> {
        match &self.current_token.value {
            Token::String(value) => Ok(Expression::String(value.clone())),
            _ => Err(self.unexpected_current(TokenKind::String)),
        }
    }

    fn parse_boolean(&mut self) -> ParseResult<Expression> {
        Ok(Expression::Boolean(self.current_token_is(TokenKind::True)))
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let operator = self.current_token.value.clone();
        self.next_token();

        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(Box::new(PrefixExpression {
            operator,
            right,
        })))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let operator = self.current_token.value.clone();
        let precedence = self.current_precedence();
        self.next_token();

        // Same precedence (not +1) on the right makes operators left-associative
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(Box::new(InfixExpression {
            left,
            operator,
            right,
        })))
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;

        Ok(expression)
    }

    fn parse_if_expression(&mut self) -> ParseResult<Expression> {
        self.expect_peek(TokenKind::LeftParen)?;
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LeftBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If(Box::new(IfExpression {
            condition,
            consequence,
            alternative,
        })))
    }

    /// Parse statements up to the matching `}` (the current token must be the `{`).
    fn parse_block_statement(&mut self) -> ParseResult<BlockStatement> {
        let mut block = BlockStatement::default();
        self.next_token();

        while !self.current_token_is(TokenKind::RightBrace) {
            if self.current_token_is(TokenKind::Eof) {
                return Err(self.unexpected_current(TokenKind::RightBrace));
            }

            if let Some(statement) = self.parse_recorded_statement() {
                block.statements.push(statement);
            }
            self.next_token();
        }

        Ok(block)
    }

    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        self.expect_peek(TokenKind::LeftParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::Function(Box::new(FunctionLiteral {
            parameters,
            body: Rc::new(body),
        })))
    }

    fn parse_function_parameters(&mut self) -> ParseResult<Vec<IdentifierLiteral>> {
        self.parse_list(TokenKind::RightParen, Self::current_identifier)
    }

    fn parse_call_expression(&mut self, function: Expression) -> ParseResult<Expression> {
        let arguments = self.parse_expression_list(TokenKind::RightParen)?;

        Ok(Expression::Call(Box::new(CallExpression {
            function,
            arguments,
        })))
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let elements = self.parse_expression_list(TokenKind::RightBracket)?;

        Ok(Expression::Array(Box::new(ArrayLiteral { elements })))
    }

    fn parse_index_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        self.next_token();

        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightBracket)?;

        Ok(Expression::Index(Box::new(IndexExpression { left, index })))
    }

    fn parse_hash_literal(&mut self) -> ParseResult<Expression> {
        let pairs = self.parse_list(TokenKind::RightBrace, Self::parse_hash_pair)?;

        Ok(Expression::Hash(Box::new(HashLiteral { pairs })))
    }

    fn parse_hash_pair(&mut self) -> ParseResult<(Expression, Expression)> {
        let key = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::Colon)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        Ok((key, value))
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expression>> {
        self.parse_list(end, |parser| parser.parse_expression(Precedence::Lowest))
    }

    /// Parse a comma-separated list closed by `end`, starting on the opening token.
    ///
    /// `parse_item` is called with the current token on the first token of the item.
    fn parse_list<T, F>(&mut self, end: TokenKind, mut parse_item: F) -> ParseResult<Vec<T>>
    where
        F: FnMut(&mut Self) -> ParseResult<T>,
    {
        let mut items = Vec::new();

        if self.peek_token_is(end) {
            self.next_token();
            return Ok(items);
        }

        self.next_token();
        items.push(parse_item(self)?);

        while self.peek_token_is(TokenKind::Comma) {
            // Skip past the comma onto the next item
            self.next_token();
            self.next_token();
            items.push(parse_item(self)?);
        }

        self.expect_peek(end)?;

        Ok(items)
    }

    fn next_token(&mut self) {
        self.current_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current_token.value.is(kind)
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.value.is(kind)
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current_token.value.kind())
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek_token.value.kind())
    }

    /// Advance if the next token is of the given kind, otherwise report what was found.
    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek_token_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected: kind,
                got: self.peek_token.clone(),
            })
        }
    }

    fn current_identifier(&mut self) -> ParseResult<IdentifierLiteral> {
        match &self.current_token.value {
            Token::Identifier(name) => Ok(IdentifierLiteral::from(name.as_str())),
            _ => Err(self.unexpected_current(TokenKind::Identifier)),
        }
    }

    fn unexpected_current(&self, expected: TokenKind) -> ParseError {
        ParseError::Expected {
            expected,
            got: self.current_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expression, IdentifierLiteral, Program, Statement};
    use crate::lexer::Lexer;
    use crate::parser::{ParseError, Parser};
    use crate::token::{Token, TokenKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_let_statement() {
        let tests = vec![
            ("let x = 5;", "x", "5"),
            ("let y = true;", "y", "true"),
            ("let foobar = y;", "foobar", "y"),
        ];

        for (input, expected_name, expected_value) in tests {
            let prog = setup(input, 1);

            match &prog.statements[0] {
                Statement::Let { name, value } => {
                    assert_eq!(name, expected_name);
                    assert_eq!(value.to_string(), expected_value);
                }
                stmt => panic!("expected let statement but got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_return_statement() {
        let tests = vec![
            ("return 5;", "5"),
            ("return true;", "true"),
            ("return foobar;", "foobar"),
        ];

        for (input, expected_value) in tests {
            let prog = setup(input, 1);

            match &prog.statements[0] {
                Statement::Return { value } => assert_eq!(value.to_string(), expected_value),
                stmt => panic!("expected return statement but got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_literal_expressions() {
        let tests = vec![
            ("foobar;", Expression::Identifier(IdentifierLiteral::from("foobar"))),
            ("5;", Expression::Integer(5)),
            ("true;", Expression::Boolean(true)),
            ("false", Expression::Boolean(false)),
            (
                "\"hello world\";",
                Expression::String("hello world".to_owned()),
            ),
        ];

        for (input, expected) in tests {
            let prog = setup(input, 1);
            assert_eq!(
                prog.statements[0],
                Statement::Expression {
                    expression: expected
                }
            );
        }
    }

    #[test]
    fn test_prefix_expressions() {
        let tests = vec![
            ("!5;", Token::Bang, "5"),
            ("-15;", Token::Minus, "15"),
            ("!foobar;", Token::Bang, "foobar"),
            ("-foobar;", Token::Minus, "foobar"),
            ("!true;", Token::Bang, "true"),
            ("!false;", Token::Bang, "false"),
        ];

        for (input, expected_operator, expected_right) in tests {
            let prog = setup(input, 1);

            match &prog.statements[0] {
                Statement::Expression {
                    expression: Expression::Prefix(prefix),
                } => {
                    assert_eq!(prefix.operator, expected_operator);
                    assert_eq!(prefix.right.to_string(), expected_right);
                }
                stmt => panic!("expected prefix expression but got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_infix_expressions() {
        let tests = vec![
            ("5 + 5;", "5", Token::Plus, "5"),
            ("5 - 5;", "5", Token::Minus, "5"),
            ("5 * 5;", "5", Token::Asterisk, "5"),
            ("5 / 5;", "5", Token::Slash, "5"),
            ("5 > 5;", "5", Token::GreaterThan, "5"),
            ("5 < 5;", "5", Token::LessThan, "5"),
            ("5 == 5;", "5", Token::EqualEqual, "5"),
            ("5 != 5;", "5", Token::BangEqual, "5"),
            ("foobar + barfoo;", "foobar", Token::Plus, "barfoo"),
            ("true == true", "true", Token::EqualEqual, "true"),
            ("true != false", "true", Token::BangEqual, "false"),
        ];

        for (input, expected_left, expected_operator, expected_right) in tests {
            let prog = setup(input, 1);

            match &prog.statements[0] {
                Statement::Expression {
                    expression: Expression::Infix(infix),
                } => {
                    assert_eq!(infix.left.to_string(), expected_left);
                    assert_eq!(infix.operator, expected_operator);
                    assert_eq!(infix.right.to_string(), expected_right);
                }
                stmt => panic!("expected infix expression but got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_operator_precedence() {
        let tests = vec![
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4); ((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true", "true"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + 2 * 3", "(1 + (2 * 3))"),
            ("(1 + 2) * 3", "((1 + 2) * 3)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("(5 + 5) * 2 * (5 + 5)", "(((5 + 5) * 2) * (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g))",
            ),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];

        for (input, expected) in tests {
            let prog = setup(input, 0);
            assert_eq!(prog.to_string(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_if_expressions() {
        let tests = vec![
            ("if (x < y) { x }", "if ((x < y)) { x }"),
            ("if (x < y) { x } else { y }", "if ((x < y)) { x } else { y }"),
            (
                "if (x) { let a = 1; a; } else { return 2; }",
                "if (x) { let a = 1; a } else { return 2 }",
            ),
        ];

        for (input, expected) in tests {
            let prog = setup(input, 1);
            match &prog.statements[0] {
                Statement::Expression {
                    expression: Expression::If(_),
                } => assert_eq!(prog.to_string(), expected),
                stmt => panic!("expected if expression but got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_function_literals() {
        let tests = vec![
            ("fn() {};", Vec::<&str>::new(), ""),
            ("fn(x) {};", vec!["x"], ""),
            ("fn(x, y, z) { x + y; };", vec!["x", "y", "z"], "(x + y)"),
        ];

        for (input, expected_params, expected_body) in tests {
            let prog = setup(input, 1);
            match &prog.statements[0] {
                Statement::Expression {
                    expression: Expression::Function(func),
                } => {
                    let params: Vec<String> =
                        func.parameters.iter().map(|p| p.to_string()).collect();
                    assert_eq!(params, expected_params);
                    assert_eq!(func.body.to_string(), expected_body);
                }
                stmt => panic!("expected function literal but got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_call_expressions() {
        let tests = vec![
            ("add();", "add", Vec::<&str>::new()),
            ("ask(1);", "ask", vec!["1"]),
            ("add(1, 2 * 3, 4 + 5);", "add", vec!["1", "(2 * 3)", "(4 + 5)"]),
        ];

        for (input, expected_function, expected_args) in tests {
            let prog = setup(input, 1);
            match &prog.statements[0] {
                Statement::Expression {
                    expression: Expression::Call(call),
                } => {
                    assert_eq!(call.function.to_string(), expected_function);
                    let args: Vec<String> =
                        call.arguments.iter().map(|a| a.to_string()).collect();
                    assert_eq!(args, expected_args);
                }
                stmt => panic!("expected call expression but got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_array_and_index_expressions() {
        let tests = vec![
            ("[]", "[]"),
            ("[1, 2 * 2, 3 + 3]", "[1, (2 * 2), (3 + 3)]"),
            ("myArray[1 + 1]", "(myArray[(1 + 1)])"),
        ];

        for (input, expected) in tests {
            let prog = setup(input, 1);
            assert_eq!(prog.to_string(), expected);
        }
    }

    #[test]
    fn test_hash_literals() {
        let tests = vec![
            ("{}", "{}"),
            (
                "{\"one\": 1, \"two\": 2, \"three\": 3}",
                "{\"one\": 1, \"two\": 2, \"three\": 3}",
            ),
            ("{true: 1, false: 2}", "{true: 1, false: 2}"),
            ("{1: 1, 2: 2, 3: 3}", "{1: 1, 2: 2, 3: 3}"),
            (
                "{\"one\": 0 + 1, \"two\": 10 - 8, \"three\": 15 / 5}",
                "{\"one\": (0 + 1), \"two\": (10 - 8), \"three\": (15 / 5)}",
            ),
        ];

        for (input, expected) in tests {
            let prog = setup(input, 1);
            match &prog.statements[0] {
                Statement::Expression {
                    expression: Expression::Hash(_),
                } => assert_eq!(prog.to_string(), expected),
                stmt => panic!("expected hash literal but got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_rendering_round_trip() {
        let inputs = vec![
            "let x = 5; let y = x * -2; return x + y;",
            "if (a < b) { a } else { b }",
            "if (!ok) { return [1, 2][0]; }; puts(\"done\")",
            "fn(x, y) { let z = x + y; z * 2 }(1, 2)",
            "let add = fn(a) { fn(b) { a + b } }; add(1)(2)",
            "{\"a\": [1, {true: \"b\"}], 2: fn() { 3 }}[\"a\"][1][true]",
            "a; (b + c); -d; [e]",
            "if (x) { } else { }",
            "\"\"",
        ];

        for input in inputs {
            let first = setup(input, 0).to_string();
            let second = setup(&first, 0).to_string();
            assert_eq!(first, second, "input: {}", input);
        }
    }

    #[test]
    fn test_parse_errors() {
        let tests = vec![
            (
                "let = 5;",
                vec![
                    "expected next token to be IDENT, got = instead (at 4:5)",
                    "no prefix parse function for = found (at 4:5)",
                ],
            ),
            (
                "let x 5;",
                vec!["expected next token to be =, got INT instead (at 6:7)"],
            ),
            ("(1 + 2", vec!["expected next token to be ), got EOF instead (at 6:6)"]),
            ("[1, 2", vec!["expected next token to be ], got EOF instead (at 5:5)"]),
            (
                "{\"a\" 1}",
                vec![
                    "expected next token to be :, got INT instead (at 5:6)",
                    "no prefix parse function for } found (at 6:7)",
                ],
            ),
            (
                "fn(x) { x",
                vec!["expected next token to be }, got EOF instead (at 9:9)"],
            ),
            ("@", vec!["no prefix parse function for ILLEGAL found (at 0:1)"]),
            (
                "99999999999999999999",
                vec!["could not parse 99999999999999999999 as integer (at 0:20)"],
            ),
            (
                "fn(1) {}",
                vec![
                    "expected next token to be IDENT, got INT instead (at 3:4)",
                    "no prefix parse function for ) found (at 4:5)",
                ],
            ),
        ];

        for (input, expected_errors) in tests {
            let errors = setup_errors(input);
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            assert_eq!(messages, expected_errors, "input: {}", input);
        }
    }

    #[test]
    fn test_parse_error_kinds() {
        let errors = setup_errors("let x = ;");

        match &errors[0] {
            ParseError::NoPrefixParseFn(token) => assert_eq!(token.value, Token::Semicolon),
            error => panic!("expected missing prefix error but got {:?}", error),
        }

        let errors = setup_errors("if (x { 1 }");
        match &errors[0] {
            ParseError::Expected { expected, got } => {
                assert_eq!(*expected, TokenKind::RightParen);
                assert_eq!(got.value, Token::LeftBrace);
            }
            error => panic!("expected expected-token error but got {:?}", error),
        }
    }

    #[test]
    fn test_errors_in_separate_statements_are_all_reported() {
        let errors = setup_errors("let x 1; let y 2; let z = 3;");
        assert_eq!(errors.len(), 2);
    }

    fn setup(input: &str, stmt_count: usize) -> Program {
        let l = Lexer::new(input);
        let mut p = Parser::new(l);
        let prog = p.parse_program();

        match prog {
            Ok(prog) => {
                if stmt_count != 0 && prog.statements.len() != stmt_count {
                    panic!(
                        "expected {} statement(s) for '{}' but got {:?}",
                        stmt_count, input, prog.statements
                    )
                }

                prog
            }
            Err(errors) => {
                println!("parser had {} errors", errors.len());
                for error in errors {
                    println!("parser error: {}", error);
                }
                panic!("parser errors for '{}'", input)
            }
        }
    }

    fn setup_errors(input: &str) -> Vec<ParseError> {
        let mut p = Parser::new(Lexer::new(input));

        match p.parse_program() {
            Ok(prog) => panic!("expected parser errors for '{}' but got {}", input, prog),
            Err(errors) => errors,
        }
    }
}
