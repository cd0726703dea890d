use failure::Error;

use crate::guards;
use crate::values::Value::{self, *};

/// the primitive library: ordinary bindings seeded into every fresh root
/// environment. Unlike special forms, primitives receive their arguments
/// already evaluated.
pub const PRIMITIVES: &[(&str, fn(Vec<Value>) -> Result<Value, Error>)] = &[
    ("+",      add),
    ("-",      sub),
    ("*",      mul),
    ("/",      div),
    ("=",      eq),
    ("<",      lt),
    ("<=",     leq),
    (">",      gt),
    (">=",     geq),
    ("cons",   cons),
    ("car",    car),
    ("cdr",    cdr),
    ("list",   list),
    ("length", length),
    ("empty?", is_empty),
    ("puts",   puts),
];

fn numbers(args: &[Value]) -> Result<Vec<i64>, Error> {
    args.iter().map(guards::expect_number).collect()
}

// {{{ math
/// left-fold sum
/// usage: (+ <num> <num> ...)
fn add(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_min_count(1, &args)?;
    let nums = numbers(&args)?;
    Ok(Number(nums.into_iter().sum()))
}

/// a single argument negates; otherwise left-fold difference
/// usage: (- <num>)
///        (- <num> <num> ...)
fn sub(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_min_count(1, &args)?;
    let nums = numbers(&args)?;

    if nums.len() == 1 {
        Ok(Number(-nums[0]))
    } else {
        Ok(Number(nums[1..].iter().fold(nums[0], |acc, n| acc - n)))
    }
}

/// left-fold product
/// usage: (* <num> <num> ...)
fn mul(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_min_count(2, &args)?;
    let nums = numbers(&args)?;
    Ok(Number(nums[1..].iter().fold(nums[0], |acc, n| acc * n)))
}

/// left-fold quotient; division by zero inherits the host fault
/// usage: (/ <num> <num> ...)
fn div(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_min_count(2, &args)?;
    let nums = numbers(&args)?;
    Ok(Number(nums[1..].iter().fold(nums[0], |acc, n| acc / n)))
}
// }}}

// {{{ comparison
/// value equality across types, not numeric-only
/// usage: (= <expr> <expr>)
fn eq(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(2, &args)?;
    Ok(Bool(args[0] == args[1]))
}

/// usage: (< <num> <num>), and likewise <=, >, >=
fn lt(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(2, &args)?;
    Ok(Bool(args[0] < args[1]))
}

fn leq(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(2, &args)?;
    Ok(Bool(args[0] <= args[1]))
}

fn gt(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(2, &args)?;
    Ok(Bool(args[0] > args[1]))
}

fn geq(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(2, &args)?;
    Ok(Bool(args[0] >= args[1]))
}
// }}}

// {{{ lists
/// prepend a value to a list
/// usage: (cons <value> <list>)
fn cons(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(2, &args)?;
    let mut items = guards::expect_list(&args[1])?.to_vec();
    items.insert(0, args[0].clone());
    Ok(List(items))
}

/// first element of a list; nil when the list is empty
/// usage: (car <list>)
fn car(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(1, &args)?;
    let items = guards::expect_list(&args[0])?;
    Ok(items.first().cloned().unwrap_or(Nil))
}

/// all elements of a list but the first
/// usage: (cdr <list>)
fn cdr(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(1, &args)?;
    let items = guards::expect_list(&args[0])?;
    Ok(List(items.get(1..).unwrap_or(&[]).to_vec()))
}

/// usage: (list <expr> ...)
fn list(args: Vec<Value>) -> Result<Value, Error> {
    Ok(List(args))
}

/// length of a list or a symbol
/// usage: (length <list>)
fn length(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(1, &args)?;
    Ok(Number(guards::expect_sized(&args[0])? as i64))
}

/// usage: (empty? <list>)
fn is_empty(args: Vec<Value>) -> Result<Value, Error> {
    guards::expect_count(1, &args)?;
    Ok(Bool(guards::expect_sized(&args[0])? == 0))
}
// }}}

/// print each argument to the console; side effect only
/// usage: (puts <expr> ...)
fn puts(args: Vec<Value>) -> Result<Value, Error> {
    for arg in &args {
        println!("{}", arg);
    }
    Ok(Nil)
}
