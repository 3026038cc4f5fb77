use std::{cell::RefCell, convert::TryFrom, io::Write, rc::Rc};

use tracing::{debug, trace};

use crate::{
    builtin::Builtin,
    environment::Environment,
    error::RuntimeError,
    object::{Array, Function, Hash, HashPair, Object, ObjectType},
};

use monkey_parser::{
    ast::{
        BlockStatement, Expression, HashLiteral, IdentifierLiteral, IfExpression, Program,
        Statement,
    },
    token::Token,
};

/// Tree-walking evaluator.
///
/// Errors are ordinary [`Object::Error`] values: evaluation stops at the first one and
/// hands it back as the result. A `return` travels the same way as an
/// [`Object::ReturnValue`] until the enclosing function or program unwraps it.
pub struct Evaluator {
    env: Rc<RefCell<Environment>>,
    /// Where `puts` writes
    output: Box<dyn Write>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::new_with_env(Rc::new(RefCell::new(Environment::new())))
    }

    pub fn new_with_env(env: Rc<RefCell<Environment>>) -> Self {
        Self::with_output(env, Box::new(std::io::stdout()))
    }

    pub fn with_output(env: Rc<RefCell<Environment>>, output: Box<dyn Write>) -> Self {
        Evaluator { env, output }
    }

    pub fn eval(&mut self, prog: &Program) -> Rc<Object> {
        let mut result = null();

        for stmt in &prog.statements {
            let val = self.eval_statement(stmt);

            match val.as_ref() {
                // If a return value is found, immediately return and stop evaluating statements
                // Unwrap the return value into a final value so the program can use it
                Object::ReturnValue(inner_value) => return Rc::clone(inner_value),
                Object::Error(_) => return val,
                _ => result = val,
            }
        }

        result
    }

    // Similar to eval (for programs) but doesn't unwrap return values
    fn eval_block_statement(&mut self, block: &BlockStatement) -> Rc<Object> {
        let mut result = null();

        for stmt in &block.statements {
            let val = self.eval_statement(stmt);

            match val.as_ref() {
                // Don't unwrap the return value, we might be in a nested block which also needs to return
                Object::ReturnValue(_) | Object::Error(_) => return val,
                _ => result = val,
            }
        }

        result
    }

    fn eval_statement(&mut self, stmt: &Statement) -> Rc<Object> {
        trace!(statement = %stmt, "evaluating");

        match stmt {
            Statement::Expression { expression } => self.eval_expression(expression),
            Statement::Return { value } => {
                let obj = self.eval_expression(value);

                // No need to encapsulate an Error with a ReturnValue since they both bubble up the same way.
                // A nested return already carries its own value.
                if obj.is_signal() {
                    return obj;
                }

                Rc::new(Object::ReturnValue(obj))
            }
            Statement::Let { name, value } => {
                let obj = self.eval_expression(value);
                // A return inside the value unwinds instead of being bound
                if obj.is_signal() {
                    return obj;
                }

                self.env.borrow_mut().set(name.to_owned(), obj);

                null()
            }
        }
    }

    fn eval_expression(&mut self, expr: &Expression) -> Rc<Object> {
        match expr {
            Expression::Integer(value) => Rc::new(Object::Integer(*value)),
            Expression::Boolean(value) => Rc::new(Object::Boolean(*value)),
            Expression::String(value) => Rc::new(Object::String(value.clone())),
            Expression::Identifier(identifier) => self.eval_identifier_expression(identifier),

            Expression::Prefix(prefix) => {
                let right = self.eval_expression(&prefix.right);
                // Early return the first error received
                if right.is_signal() {
                    return right;
                }
                eval_prefix_expression(&prefix.operator, right)
            }
            Expression::Infix(infix) => {
                let left = self.eval_expression(&infix.left);
                if left.is_signal() {
                    return left;
                }
                let right = self.eval_expression(&infix.right);
                if right.is_signal() {
                    return right;
                }
                eval_infix_expression(&infix.operator, left, right)
            }

            Expression::If(if_expr) => self.eval_if_expression(if_expr),

            Expression::Array(arr) => match self.eval_expressions(&arr.elements) {
                Ok(elements) => Rc::new(Object::Array(Array { elements })),
                Err(err) => err,
            },
            Expression::Hash(hash) => self.eval_hash_literal(hash),
            Expression::Index(expr) => {
                let left = self.eval_expression(&expr.left);
                if left.is_signal() {
                    return left;
                }
                let index = self.eval_expression(&expr.index);
                if index.is_signal() {
                    return index;
                }
                eval_index_expression(left, index)
            }

            Expression::Function(func) => Rc::new(Object::Function(Function {
                parameters: func.parameters.clone(),
                body: Rc::clone(&func.body),
                env: Rc::clone(&self.env),
            })),
            Expression::Call(call) => {
                let func = self.eval_expression(&call.function);
                if func.is_signal() {
                    return func;
                }

                match self.eval_expressions(&call.arguments) {
                    Ok(args) => self.apply_function(func, args),
                    Err(err) => err,
                }
            }
        }
    }

    /// Evaluate expressions left to right, stopping at the first error or return.
    fn eval_expressions(&mut self, exprs: &[Expression]) -> Result<Vec<Rc<Object>>, Rc<Object>> {
        let mut result = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let evaluated = self.eval_expression(expr);
            if evaluated.is_signal() {
                return Err(evaluated);
            }
            result.push(evaluated);
        }
        Ok(result)
    }

    fn eval_identifier_expression(&self, identifier: &IdentifierLiteral) -> Rc<Object> {
        let result = self.env.borrow().get(&identifier.name);

        match result {
            Some(obj) => obj,
            // If we don't find the identifier, look it up as a builtin
            // NOTE: Bindings shadow builtins of the same name
            None => match Builtin::lookup(&identifier.name) {
                Some(builtin) => Rc::new(Object::Builtin(builtin)),
                None => error(RuntimeError::IdentifierNotFound(identifier.name.clone())),
            },
        }
    }

    fn eval_if_expression(&mut self, if_expr: &IfExpression) -> Rc<Object> {
        let condition = self.eval_expression(&if_expr.condition);
        if condition.is_signal() {
            return condition;
        }

        if condition.is_truthy() {
            self.eval_block_statement(&if_expr.consequence)
        } else if let Some(alternative) = &if_expr.alternative {
            self.eval_block_statement(alternative)
        } else {
            null()
        }
    }

    fn eval_hash_literal(&mut self, hash: &HashLiteral) -> Rc<Object> {
        let mut result = Hash::default();

        for (key_expr, value_expr) in &hash.pairs {
            let key = self.eval_expression(key_expr);
            if key.is_signal() {
                return key;
            }

            let hash_key = match key.hash_key() {
                Some(hash_key) => hash_key,
                None => return error(RuntimeError::UnusableAsHashKey(key.object_type())),
            };

            let value = self.eval_expression(value_expr);
            if value.is_signal() {
                return value;
            }

            // Later duplicates replace earlier ones
            result.pairs.insert(hash_key, HashPair { key, value });
        }

        Rc::new(Object::Hash(result))
    }

    fn apply_function(&mut self, func: Rc<Object>, args: Vec<Rc<Object>>) -> Rc<Object> {
        match func.as_ref() {
            Object::Function(func) => {
                // Check that number of args & params matches
                if args.len() != func.parameters.len() {
                    return error(RuntimeError::BadArity {
                        expected: func.parameters.len(),
                        got: args.len(),
                    });
                }

                // Remember current environment (when exiting from call)
                let current_env = Rc::clone(&self.env);
                // Create a new scoped environment for function
                let mut scoped_env = Environment::new_enclosed(Rc::clone(&func.env));

                // Add arguments as variables in function's environment
                for (ident, obj) in func.parameters.iter().zip(args) {
                    scoped_env.set(ident.name.clone(), obj);
                }

                debug!(depth = scoped_env.depth(), "applying function");
                self.env = Rc::new(RefCell::new(scoped_env));

                let result = self.eval_block_statement(&func.body);

                self.env = current_env;

                // A return only unwinds up to the function that contains it
                match result.as_ref() {
                    Object::ReturnValue(inner_value) => Rc::clone(inner_value),
                    _ => result,
                }
            }
            // Builtins handle themselves
            Object::Builtin(builtin) => match builtin.apply(&args, &mut *self.output) {
                Ok(obj) => obj,
                Err(err) => error(err),
            },
            other => error(RuntimeError::NotAFunction(other.object_type())),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn null() -> Rc<Object> {
    Rc::new(Object::Null)
}

fn error(err: RuntimeError) -> Rc<Object> {
    Rc::new(Object::Error(err))
}

fn eval_prefix_expression(operator: &Token, right: Rc<Object>) -> Rc<Object> {
    match (operator, right.as_ref()) {
        (Token::Bang, obj) => Rc::new(Object::Boolean(!obj.is_truthy())),
        (Token::Minus, Object::Integer(value)) => Rc::new(Object::Integer(value.wrapping_neg())),
        (operator, obj) => error(RuntimeError::UnknownPrefixOperator {
            operator: operator.clone(),
            right: obj.object_type(),
        }),
    }
}

fn eval_infix_expression(operator: &Token, left: Rc<Object>, right: Rc<Object>) -> Rc<Object> {
    match (left.as_ref(), right.as_ref()) {
        (Object::Integer(left_value), Object::Integer(right_value)) => {
            eval_integer_infix_expression(operator, *left_value, *right_value)
        }
        (Object::String(left_value), Object::String(right_value)) => {
            eval_string_infix_expression(operator, left_value, right_value)
        }

        (l, r) => match operator {
            Token::EqualEqual => Rc::new(Object::Boolean(same_object(&left, &right))),
            Token::BangEqual => Rc::new(Object::Boolean(!same_object(&left, &right))),
            operator if l.object_type() != r.object_type() => {
                error(RuntimeError::TypeMismatch {
                    left: l.object_type(),
                    operator: operator.clone(),
                    right: r.object_type(),
                })
            }
            operator => error(RuntimeError::UnknownInfixOperator {
                left: l.object_type(),
                operator: operator.clone(),
                right: r.object_type(),
            }),
        },
    }
}

/// Equality for everything but integers and strings.
///
/// Booleans, nulls and builtins compare by value; anything else only equals itself.
fn same_object(left: &Rc<Object>, right: &Rc<Object>) -> bool {
    match (left.as_ref(), right.as_ref()) {
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Null, Object::Null) => true,
        (Object::Builtin(l), Object::Builtin(r)) => l == r,
        _ => Rc::ptr_eq(left, right),
    }
}

fn eval_integer_infix_expression(operator: &Token, left_value: i64, right_value: i64) -> Rc<Object> {
    match operator {
        Token::Plus => Rc::new(Object::Integer(left_value.wrapping_add(right_value))),
        Token::Minus => Rc::new(Object::Integer(left_value.wrapping_sub(right_value))),
        Token::Asterisk => Rc::new(Object::Integer(left_value.wrapping_mul(right_value))),
        Token::Slash => {
            if right_value == 0 {
                return error(RuntimeError::DivisionByZero);
            }
            Rc::new(Object::Integer(left_value.wrapping_div(right_value)))
        }

        Token::LessThan => Rc::new(Object::Boolean(left_value < right_value)),
        Token::GreaterThan => Rc::new(Object::Boolean(left_value > right_value)),
        Token::EqualEqual => Rc::new(Object::Boolean(left_value == right_value)),
        Token::BangEqual => Rc::new(Object::Boolean(left_value != right_value)),

        operator => error(RuntimeError::UnknownInfixOperator {
            left: ObjectType::Integer,
            operator: operator.clone(),
            right: ObjectType::Integer,
        }),
    }
}

fn eval_string_infix_expression(operator: &Token, left_value: &str, right_value: &str) -> Rc<Object> {
    match operator {
        Token::Plus => Rc::new(Object::String(left_value.to_owned() + right_value)),

        operator => error(RuntimeError::UnknownInfixOperator {
            left: ObjectType::String,
            operator: operator.clone(),
            right: ObjectType::String,
        }),
    }
}

fn eval_index_expression(left: Rc<Object>, index: Rc<Object>) -> Rc<Object> {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(arr), Object::Integer(i)) => usize::try_from(*i)
            .ok()
            .and_then(|i| arr.elements.get(i))
            // Out of range (including negative indices) gives null
            .map_or_else(null, Rc::clone),
        (Object::Hash(hash), key) => match key.hash_key() {
            Some(hash_key) => hash.get(&hash_key).unwrap_or_else(null),
            None => error(RuntimeError::UnusableAsHashKey(key.object_type())),
        },
        (obj, _) => error(RuntimeError::IndexNotSupported(obj.object_type())),
    }
}
