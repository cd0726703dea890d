#[macro_use]
extern crate failure_derive;

mod builtins;
pub mod env;
pub mod errors;
mod eval;
mod file;
mod forms;
mod guards;
mod log;
mod parser;
pub mod values;


use failure::Error;

use crate::env::{Env, EnvRef};
use crate::errors::ParseError;
use crate::values::Value;

/// an interpreter instance: a chain of environments rooted at a frame
/// pre-populated with the primitive library
#[derive(Clone)]
pub struct Interpreter {
    pub env: EnvRef,
}

impl Interpreter {
    /// create an Interpreter with a fresh root environment
    pub fn new() -> Interpreter {
        Interpreter { env: Env::root() }
    }

    /// create an Interpreter over a caller-supplied environment
    pub fn with_env(env: EnvRef) -> Interpreter {
        Interpreter { env }
    }

    /// parse and evaluate a source string as a single top-level form;
    /// syntax errors are normalized to their line/column form here
    pub fn run<S: AsRef<str>>(&self, code: S) -> Result<Value, Error> {
        match parser::parse(code.as_ref()) {
            Ok(ast) => eval::eval(ast, self.env.clone()),
            Err(err) => Err(ParseError {
                line: err.line,
                column: err.column,
            }
            .into()),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter::new()
    }
}

/// evaluate a source string against the given environment, or a fresh
/// root environment when none is supplied
pub fn evaluate(source: &str, env: Option<EnvRef>) -> Result<Value, Error> {
    let interpreter = match env {
        Some(env) => Interpreter::with_env(env),
        None => Interpreter::new(),
    };
    interpreter.run(source)
}
