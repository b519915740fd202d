use crate::environment::prelude::ValueType;
use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    OperandMustBeNumber { found: ValueType },
    OperandsMustBeNumbers { left: ValueType, right: ValueType },
    InvalidAddOperands { left: ValueType, right: ValueType },
    DivisionByZero,
    UndefinedVariable { name: String },
    UninitializedVariable { name: String },
    NotCallable { found: ValueType },
    ArityMismatch { expected: usize, got: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub span: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            RuntimeErrorType::OperandMustBeNumber { found } => {
                ("Operand must be a number".into(), vec![
                    format!("This operand is a {found}.")
                ])
            },
            RuntimeErrorType::OperandsMustBeNumbers { left, right } => {
                ("Operands must be numbers".into(), vec![
                    format!("These operands are a {left} and a {right}.")
                ])
            },
            RuntimeErrorType::InvalidAddOperands { left, right } => {
                ("Operands of `+` must be numbers or strings".into(), vec![
                    format!("These operands are a {left} and a {right}.")
                ])
            },
            RuntimeErrorType::DivisionByZero => {
                ("Division by zero".into(), vec![])
            },
            RuntimeErrorType::UndefinedVariable { name } => {
                (format!("Undefined variable `{name}`"), vec![])
            },
            RuntimeErrorType::UninitializedVariable { name } => {
                (format!("Variable `{name}` used before being initialized"), vec![
                    "Give it a value first, even `nil` will do.".into()
                ])
            },
            RuntimeErrorType::NotCallable { found } => {
                ("Can only call functions".into(), vec![
                    format!("This is a {found}.")
                ])
            },
            RuntimeErrorType::ArityMismatch { expected, got } => {
                (format!("Expected {expected} arguments but got {got}"), vec![])
            }
        }
    }
}
