use failure::Error;

use std::fmt::Debug;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::log;
use crate::values::Value;
use crate::Interpreter;

impl Interpreter {
    /// run a startup file, one form per line; failures are logged but do
    /// not abort the rest of the file
    pub fn run_file<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path> + Debug,
    {
        log::info(format!("running {:?}...", path));

        let file = File::open(path)?;
        let buf = BufReader::new(file);
        let mut lines = buf.lines();

        while let Some(Ok(line)) = lines.next() {
            if line.trim().is_empty() || line.trim().starts_with(";;") {
                continue;
            }
            if let Err(err) = self.run(line.as_str()) {
                log::warn("an error ocurred:");
                log::warn(line);
                log::warn(err);
            }
        }

        log::info("run_file: done");
        Ok(())
    }

    /// save the root frame's bindings to a runnable file; primitives are
    /// skipped since they cannot be read back
    pub fn save_env<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path> + Debug,
    {
        log::info(format!("saving current env to {:?}...", path));

        let file = File::create(path)?;
        let mut buf = BufWriter::new(file);
        writeln!(&mut buf, ";; vim: set ft=scheme:")?;

        let env = self.env.clone();
        for (key, value) in &env.borrow().vars {
            if let Value::Primitive(_) = value {
                continue;
            }
            writeln!(&mut buf, "(define {} {})", key, value)?;
        }

        log::info("save_env: done");
        Ok(())
    }
}
