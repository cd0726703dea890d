use failure::Error;

use crate::errors::RunError;
use crate::values::Value;

// argument-count and shape contracts shared by the special forms and the
// primitive library; violations all surface as RunError::Contract

pub fn expect(cond: bool, message: String) -> Result<(), Error> {
    if cond {
        Ok(())
    } else {
        Err(RunError::Contract(message).into())
    }
}

pub fn expect_count(count: usize, args: &[Value]) -> Result<(), Error> {
    expect(
        args.len() == count,
        format!("{} params found where {} expected.", args.len(), count),
    )
}

pub fn expect_min_count(count: usize, args: &[Value]) -> Result<(), Error> {
    expect(
        args.len() >= count,
        format!(
            "{} params found where at least {} expected.",
            args.len(),
            count
        ),
    )
}

pub fn expect_max_count(count: usize, args: &[Value]) -> Result<(), Error> {
    expect(
        args.len() <= count,
        format!(
            "{} params found where no more than {} expected.",
            args.len(),
            count
        ),
    )
}

pub fn expect_list(value: &Value) -> Result<&[Value], Error> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(RunError::Contract(format!(
            "{} found where a list was expected.",
            other.get_type()
        ))
        .into()),
    }
}

pub fn expect_symbol(value: &Value) -> Result<&str, Error> {
    match value {
        Value::Symbol(name) => Ok(name),
        other => Err(RunError::Contract(format!(
            "{} found where a symbol was expected.",
            other.get_type()
        ))
        .into()),
    }
}

pub fn expect_number(value: &Value) -> Result<i64, Error> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(RunError::Contract(format!(
            "{} found where a number was expected.",
            other.get_type()
        ))
        .into()),
    }
}

/// a value with a length: a list or a symbol
pub fn expect_sized(value: &Value) -> Result<usize, Error> {
    match value {
        Value::List(items) => Ok(items.len()),
        Value::Symbol(name) => Ok(name.chars().count()),
        other => Err(RunError::Contract(format!(
            "{} found where a list or symbol was expected.",
            other.get_type()
        ))
        .into()),
    }
}
