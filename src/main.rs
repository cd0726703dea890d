mod log;

use itertools::join;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::Editor;
use schemers::errors::ParseError;
use schemers::Interpreter;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Opt {
    #[structopt(short = "d", long = "debug")]
    debug: bool,

    #[structopt(name = "INITFILE", parse(from_os_str), help = "scheme file to run on startup")]
    initfile: Option<PathBuf>,
}

const HISTFILE: &str = ".schemers_hist";

fn main() {
    let opt = Opt::from_args();
    if opt.debug {
        log::debug(format!("set options: {:?}", opt))
    }

    let interpreter = Interpreter::new();
    if let Some(initfile) = &opt.initfile {
        if let Err(why) = interpreter.run_file(initfile) {
            log::warn(why);
        }
    }

    let mut rl = Editor::<()>::new();
    if let Err(err) = rl.load_history(HISTFILE) {
        log::warn(format!("error opening history file: {}", err));
    }

    let prompt = format!("{}schemers λ{} ", "\x1b[1;94m", log::RESET);

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                if let Some(cmd) = line.strip_prefix('>') {
                    command(&interpreter, cmd, &opt);
                    continue;
                }

                rl.add_history_entry(line);
                match interpreter.run(line) {
                    Ok(result) => println!("{}", result),
                    // a syntax error already names its position; anything
                    // else is a fault of the running program
                    Err(err) if err.downcast_ref::<ParseError>().is_some() => log::warn(err),
                    Err(err) => log::error(err),
                }
            }

            Err(ReadlineError::Interrupted) => println!("^C"),

            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }

            Err(err) => {
                log::error(err);
                break;
            }
        }
    }

    rl.save_history(HISTFILE).unwrap();
}

/// `>`-prefixed meta-commands: inspect the environment, snapshot it to a
/// file
fn command(interpreter: &Interpreter, cmd: &str, opt: &Opt) {
    let mut words = cmd.split_whitespace();
    match words.next() {
        Some("env") => {
            let env = interpreter.env.borrow();
            let mut names: Vec<&String> = env.vars.keys().collect();
            names.sort();
            println!("{}", join(names, ", "));
        }

        Some("save") => {
            let target = words
                .next()
                .map(PathBuf::from)
                .or_else(|| opt.initfile.clone());
            match target {
                Some(path) => {
                    if let Err(err) = interpreter.save_env(&path) {
                        log::warn(err);
                    }
                }
                None => println!("usage: >save <file> (or start with an INITFILE)"),
            }
        }

        _ => println!("commands: >env, >save <file>"),
    }
}
