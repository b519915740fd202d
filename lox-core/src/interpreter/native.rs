use std::time::{SystemTime, UNIX_EPOCH};

use crate::environment::prelude::{NativeFunction, Value};

use super::error::RuntimeErrorType;

/// The built-ins installed into the global environment when an
/// interpreter is constructed.
pub fn all() -> [NativeFunction; 2] {
    [
        NativeFunction { name: "clock", arity: 0, func: clock },
        NativeFunction { name: "sqrt", arity: 1, func: sqrt },
    ]
}

/// Wall-clock time in whole seconds since the Unix epoch.
fn clock(_arguments: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    Ok(Value::Number(elapsed.as_secs() as f64))
}

fn sqrt(arguments: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    match &arguments[0] {
        Value::Number(value) => Ok(Value::Number(value.sqrt())),
        value => Err(RuntimeErrorType::OperandMustBeNumber {
            found: value.value_type(),
        })
    }
}
