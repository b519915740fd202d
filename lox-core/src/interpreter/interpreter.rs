use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    environment::prelude::{Callable, Environment, Value},
    lexer::prelude::Token,
    parser::prelude::{
        Binary, Call, Expression, Logical, Program, Statement, Unary,
    },
};

use super::error::{RuntimeError, RuntimeErrorType};
use super::native;
use super::output::{OutputEmitterIO, StdoutEmitterIO};

/// Walks the statement list, threading the current environment through
/// a shared chain. One instance is meant to live for a whole session:
/// the REPL calls [`Interpreter::interpret`] once per line and globals
/// persist in between, even across failed lines.
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    output: Rc<dyn OutputEmitterIO>,
}

impl Interpreter {
    pub fn new(output: Rc<dyn OutputEmitterIO>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));

        for native in native::all() {
            globals.borrow_mut().define(
                native.name,
                Some(Value::Callable(Callable::Native(native))),
            );
        }

        Self {
            environment: globals.clone(),
            globals,
            output,
        }
    }

    pub fn with_stdout() -> Self {
        Self::new(Rc::new(StdoutEmitterIO))
    }

    /// The outermost environment, where the natives live. Useful for
    /// hosts that want to install their own bindings before running.
    pub fn globals(&self) -> Rc<RefCell<Environment>> {
        self.globals.clone()
    }

    /// Runs statements in order, stopping at the first runtime error.
    /// The error unwinds through every frame, restoring each scope on
    /// the way out, so the instance is left exactly as it was before the
    /// failing statement started.
    pub fn interpret(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for statement in &program.statements {
            self.execute(statement)?;
        }

        Ok(())
    }

    fn execute(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        match statement {
            Statement::Expression(statement) => {
                let _ = self.evaluate(&statement.expression)?;

                Ok(())
            },
            Statement::Print(statement) => {
                let value = self.evaluate(&statement.expression)?;
                self.output.emit_line(&value.to_string());

                Ok(())
            },
            Statement::Var(statement) => {
                // `var x;` leaves the slot uninitialized; `var x = nil;`
                // stores a real nil.
                let value = match &statement.initializer {
                    Some(initializer) => Some(self.evaluate(initializer)?),
                    None => None,
                };

                self.environment
                    .borrow_mut()
                    .define(statement.name.value.clone(), value);

                Ok(())
            },
            Statement::Block(block) => {
                let enclosed = Environment::enclosed(self.environment.clone());

                self.execute_block(&block.statements, enclosed)
            },
            Statement::If(statement) => {
                if self.evaluate(&statement.condition)?.is_truthy() {
                    self.execute(&statement.then_branch)
                } else if let Some(else_branch) = &statement.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },
            Statement::While(statement) => {
                while self.evaluate(&statement.condition)?.is_truthy() {
                    self.execute(&statement.body)?;
                }

                Ok(())
            },
            Statement::Function(declaration) => {
                let function = Callable::Function {
                    declaration: declaration.clone(),
                    closure: self.environment.clone(),
                };

                self.environment.borrow_mut().define(
                    declaration.name.value.clone(),
                    Some(Value::Callable(function)),
                );

                Ok(())
            }
        }
    }

    /// Runs `statements` inside `environment`, restoring the previous
    /// environment on every exit path, error included.
    fn execute_block(
        &mut self,
        statements: &[Statement],
        environment: Environment,
    ) -> Result<(), RuntimeError> {
        let previous = std::mem::replace(
            &mut self.environment,
            Rc::new(RefCell::new(environment)),
        );

        let result = statements
            .iter()
            .try_for_each(|statement| self.execute(statement));

        self.environment = previous;

        result
    }

    fn evaluate(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Literal(literal) => Ok(Value::from(&literal.value)),
            Expression::Grouping(grouping) => self.evaluate(&grouping.expression),
            Expression::Unary(unary) => self.evaluate_unary(unary),
            Expression::Binary(binary) => self.evaluate_binary(binary),
            Expression::Logical(logical) => self.evaluate_logical(logical),
            Expression::Variable(name) => self.environment.borrow().get(name),
            Expression::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;

                self.environment.borrow_mut().assign(&assign.name, value)
            },
            Expression::Call(call) => self.evaluate_call(call),
        }
    }

    fn evaluate_unary(&mut self, unary: &Unary) -> Result<Value, RuntimeError> {
        let right = self.evaluate(&unary.right)?;

        match &unary.operator {
            Token::Minus => match right {
                Value::Number(value) => Ok(Value::Number(-value)),
                value => Err(RuntimeError {
                    error: RuntimeErrorType::OperandMustBeNumber {
                        found: value.value_type(),
                    },
                    span: unary.operator_location,
                })
            },
            Token::Bang => Ok(Value::Boolean(!right.is_truthy())),
            operator => unreachable!("unary operator {operator:?}"),
        }
    }

    fn evaluate_binary(&mut self, binary: &Binary) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        match &binary.operator {
            // `+` adds numbers, concatenates strings, and stringifies
            // the number in the mixed cases.
            Token::Plus => match (left, right) {
                (Value::Number(left), Value::Number(right)) => {
                    Ok(Value::Number(left + right))
                },
                (Value::String(left), Value::String(right)) => {
                    Ok(Value::String(format!("{left}{right}")))
                },
                (Value::String(left), Value::Number(right)) => {
                    Ok(Value::String(format!("{left}{right}")))
                },
                (Value::Number(left), Value::String(right)) => {
                    Ok(Value::String(format!("{left}{right}")))
                },
                (left, right) => Err(RuntimeError {
                    error: RuntimeErrorType::InvalidAddOperands {
                        left: left.value_type(),
                        right: right.value_type(),
                    },
                    span: binary.operator_location,
                })
            },

            // Equality never type-errors, mixed types are just unequal.
            Token::EqualEqual => Ok(Value::Boolean(left == right)),
            Token::BangEqual => Ok(Value::Boolean(left != right)),

            operator => {
                let (left, right) = match (left, right) {
                    (Value::Number(left), Value::Number(right)) => (left, right),
                    (left, right) => return Err(RuntimeError {
                        error: RuntimeErrorType::OperandsMustBeNumbers {
                            left: left.value_type(),
                            right: right.value_type(),
                        },
                        span: binary.operator_location,
                    })
                };

                match operator {
                    Token::Minus => Ok(Value::Number(left - right)),
                    Token::Star => Ok(Value::Number(left * right)),
                    Token::Slash => {
                        if right == 0.0 {
                            Err(RuntimeError {
                                error: RuntimeErrorType::DivisionByZero,
                                span: binary.operator_location,
                            })
                        } else {
                            Ok(Value::Number(left / right))
                        }
                    },
                    Token::Greater => Ok(Value::Boolean(left > right)),
                    Token::GreaterEqual => Ok(Value::Boolean(left >= right)),
                    Token::Less => Ok(Value::Boolean(left < right)),
                    Token::LessEqual => Ok(Value::Boolean(left <= right)),
                    operator => unreachable!("binary operator {operator:?}"),
                }
            }
        }
    }

    /// Short-circuiting `and`/`or`. The deciding operand is returned as
    /// is, never coerced to a boolean.
    fn evaluate_logical(&mut self, logical: &Logical) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&logical.left)?;

        match &logical.operator {
            Token::Or if left.is_truthy() => Ok(left),
            Token::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn evaluate_call(&mut self, call: &Call) -> Result<Value, RuntimeError> {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable = match callee {
            Value::Callable(callable) => callable,
            value => return Err(RuntimeError {
                error: RuntimeErrorType::NotCallable {
                    found: value.value_type(),
                },
                span: call.paren_location,
            })
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                error: RuntimeErrorType::ArityMismatch {
                    expected: callable.arity(),
                    got: arguments.len(),
                },
                span: call.paren_location,
            });
        }

        match callable {
            Callable::Native(native) => {
                (native.func)(arguments).map_err(|error| RuntimeError {
                    error,
                    span: call.paren_location,
                })
            },
            Callable::Function { declaration, closure } => {
                // The frame encloses the captured environment, not the
                // caller's: lexical scope, not dynamic.
                let mut frame = Environment::enclosed(closure);

                for (param, argument) in declaration.params.iter().zip(arguments) {
                    frame.define(param.value.clone(), Some(argument));
                }

                self.execute_block(&declaration.body, frame)?;

                // There is no `return` statement; calls evaluate to nil.
                Ok(Value::Nil)
            }
        }
    }
}
