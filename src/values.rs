use failure::Error;
use itertools::join;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::env::{Env, EnvRef};
use crate::eval;

/// the universal runtime datum: the parser produces these and the
/// evaluator consumes and returns them, so syntax trees and values share
/// one representation
#[derive(Clone)]
pub enum Value {
    Number(i64),
    Bool(bool),
    Symbol(String),
    List(Vec<Value>),
    Primitive(Primitive),
    Closure(Rc<Closure>),
    Nil,
}

use self::Value::*;

impl Value {
    /// get the human-friendly type of a `Value`
    pub fn get_type(&self) -> String {
        match self {
            Number(_)    => "Number",
            Bool(_)      => "Bool",
            Symbol(_)    => "Symbol",
            List(_)      => "List",
            Primitive(_) => "Primitive",
            Closure(_)   => "Closure",
            Nil          => "Nil",
        }
        .to_owned()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number(n)    => write!(f, "{}", n),
            Bool(true)   => write!(f, "#t"),
            Bool(false)  => write!(f, "#f"),
            Symbol(s)    => write!(f, "{}", s),
            Nil          => write!(f, "nil"),
            List(items)  => write!(f, "({})", join(items.iter(), " ")),
            Primitive(p) => write!(f, "#<primitive {}>", p.name),
            Closure(c)   => write!(
                f,
                "(lambda ({}) {})",
                join(c.params.iter(), " "),
                join(c.body.iter(), " ")
            ),
        }
    }
}

// a closure's captured environment may hold the closure itself, so the
// debug rendering must not descend into environments
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Number(a), Number(b)) => a == b,
            (Bool(a), Bool(b))     => a == b,
            (Symbol(a), Symbol(b)) => a == b,
            (Nil, Nil)             => true,
            // lists and procedures have identity, not value, equality
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Number(a), Number(b)) => a.partial_cmp(b),
            (Symbol(a), Symbol(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// a host-native procedure: receives already-evaluated arguments and
/// returns a value or fails
#[derive(Clone)]
pub struct Primitive {
    pub name: &'static str,
    pub func: fn(Vec<Value>) -> Result<Value, Error>,
}

/// a lambda value: parameter symbols, body forms, and the defining
/// environment captured by reference (never copied)
pub struct Closure {
    pub params: Vec<String>,
    pub body: Vec<Value>,
    pub env: EnvRef,
}

impl Closure {
    /// invoke the closure: pair parameters with arguments positionally
    /// (truncating to the shorter sequence), bind them in a fresh frame
    /// chained to the captured environment, then evaluate the body forms
    /// in order
    pub fn call(&self, args: Vec<Value>) -> Result<Value, Error> {
        let mut frame = Env::new(Some(self.env.clone()));
        for (param, arg) in self.params.iter().zip(args) {
            frame.bind(param, arg);
        }

        let frame: EnvRef = Rc::new(RefCell::new(frame));
        let mut result = Value::Nil;
        for expr in &self.body {
            result = eval::eval(expr.clone(), frame.clone())?;
        }
        Ok(result)
    }
}
