use failure::Error;
use std::cell::RefCell;
use std::rc::Rc;

use crate::env::{Env, EnvRef};
use crate::eval;
use crate::guards;
use crate::values::{Closure, Value};

/// the reserved head-symbols and their evaluation rules. A rule receives
/// its operands unevaluated and decides for itself which of them get
/// evaluated and in which environment.
pub const SPECIAL_FORMS: &[(&str, fn(&[Value], EnvRef) -> Result<Value, Error>)] = &[
    ("begin",  begin),
    ("quote",  quote),
    ("if",     if_else),
    ("let",    local_bind),
    ("lambda", lambda),
    ("define", define),
    ("set!",   assign),
];

pub fn lookup(name: &str) -> Option<fn(&[Value], EnvRef) -> Result<Value, Error>> {
    SPECIAL_FORMS
        .iter()
        .find(|(form, _)| *form == name)
        .map(|(_, rule)| *rule)
}

/// evaluate each operand in order in the same environment; the value of
/// the last is the result
/// usage: (begin <expr> <expr> ...)
pub fn begin(args: &[Value], env: EnvRef) -> Result<Value, Error> {
    let mut result = Value::Nil;
    for expr in args {
        result = eval::eval(expr.clone(), env.clone())?;
    }
    Ok(result)
}

/// return the operand without evaluating it
/// usage: (quote <expr>)
///        '<expr>
fn quote(args: &[Value], _env: EnvRef) -> Result<Value, Error> {
    guards::expect_count(1, args)?;
    Ok(args[0].clone())
}

/// the consequent is taken only when the condition evaluates to exactly
/// #t; with no alternative present the result is nil
/// usage: (if <cond-expr> <conseq-expr> [<alt-expr>])
fn if_else(args: &[Value], env: EnvRef) -> Result<Value, Error> {
    guards::expect_min_count(2, args)?;
    guards::expect_max_count(3, args)?;

    if eval::eval(args[0].clone(), env.clone())? == Value::Bool(true) {
        eval::eval(args[1].clone(), env)
    } else if args.len() == 3 {
        eval::eval(args[2].clone(), env)
    } else {
        Ok(Value::Nil)
    }
}

/// evaluate body expressions in a fresh frame. The bindings operand is a
/// flat, even-length sequence of symbol/expression pairs, and each symbol
/// is bound to its paired expression *unevaluated*.
/// usage: (let (<symbol> <expr> ...) <body-expr> ...)
fn local_bind(args: &[Value], env: EnvRef) -> Result<Value, Error> {
    guards::expect_min_count(2, args)?;
    let bindings = guards::expect_list(&args[0])?;
    guards::expect(
        bindings.len() % 2 == 0,
        "let requires a list of even length for bindings.".to_owned(),
    )?;

    let mut frame = Env::new(Some(env));
    for pair in bindings.chunks(2) {
        let name = guards::expect_symbol(&pair[0])?;
        frame.bind(name, pair[1].clone());
    }

    let frame: EnvRef = Rc::new(RefCell::new(frame));
    begin(&args[1..], frame)
}

/// form a closure over the current environment; nothing is evaluated
/// usage: (lambda (<param> ...) <body-expr> ...)
fn lambda(args: &[Value], env: EnvRef) -> Result<Value, Error> {
    guards::expect_min_count(1, args)?;
    let params = guards::expect_list(&args[0])?
        .iter()
        .map(|param| guards::expect_symbol(param).map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Value::Closure(Rc::new(Closure {
        params,
        body: args[1..].to_vec(),
        env,
    })))
}

/// evaluate the expression, then bind it in the current frame; defining a
/// symbol twice in the same frame is an error
/// usage: (define <symbol> <expr>)
fn define(args: &[Value], env: EnvRef) -> Result<Value, Error> {
    guards::expect_count(2, args)?;
    let name = guards::expect_symbol(&args[0])?;
    let value = eval::eval(args[1].clone(), env.clone())?;
    env.borrow_mut().define(name, value.clone())?;
    Ok(value)
}

/// evaluate the expression, then mutate the nearest existing binding
/// usage: (set! <symbol> <expr>)
fn assign(args: &[Value], env: EnvRef) -> Result<Value, Error> {
    guards::expect_count(2, args)?;
    let name = guards::expect_symbol(&args[0])?;
    let value = eval::eval(args[1].clone(), env.clone())?;
    env.borrow_mut().update(name, value)?;
    Ok(Value::Nil)
}
