use failure::Error;

use crate::env::EnvRef;
use crate::errors::RunError;
use crate::forms;
use crate::values::Value::{self, *};

/// evaluate one form: literals yield themselves, symbols resolve through
/// the environment chain, and lists either dispatch to a special form (by
/// head-symbol identity, before any evaluation) or apply as a procedure
/// call
pub fn eval(expr: Value, env: EnvRef) -> Result<Value, Error> {
    match expr {
        Symbol(name) => env.borrow().lookup(&name),

        List(list) => {
            let mut items = list.into_iter();
            let head = match items.next() {
                Some(head) => head,
                None => return Err(RunError::EmptyApplication.into()),
            };

            if let Symbol(name) = &head {
                if let Some(rule) = forms::lookup(name) {
                    let operands: Vec<Value> = items.collect();
                    return rule(&operands, env);
                }
            }

            let proc = eval(head, env.clone())?;
            let args = eval_list(items.collect(), env)?;
            apply(proc, args)
        }

        // numbers, booleans, and procedure values are self-evaluating
        _ => Ok(expr),
    }
}

/// evaluate every form in a Vec, left to right
pub fn eval_list(args: Vec<Value>, env: EnvRef) -> Result<Vec<Value>, Error> {
    args.into_iter().map(|arg| eval(arg, env.clone())).collect()
}

/// invoke a procedure value on already-evaluated arguments
fn apply(proc: Value, args: Vec<Value>) -> Result<Value, Error> {
    match proc {
        Primitive(p) => (p.func)(args),
        Closure(c) => c.call(args),
        other => Err(RunError::Uncallable {
            name: other.to_string(),
            typename: other.get_type(),
        }
        .into()),
    }
}
