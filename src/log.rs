use std::fmt::Display;

pub const RESET: &str = "\x1B[0m";

const RED: &str = "\x1B[1;31m";
const GRN: &str = "\x1B[1;32m";
const YEL: &str = "\x1B[1;33m";
const GRY: &str = "\x1B[1;30m";

// the library and the binary each compile this module and call a
// different subset of the helpers
fn report<S: Display>(color: &str, tag: &str, msg: S) {
    eprintln!("[schemers] {}{}:{} {}", color, tag, RESET, msg);
}

#[allow(dead_code)]
pub fn error<S: Display>(msg: S) {
    report(RED, "error", msg);
}

#[allow(dead_code)]
pub fn warn<S: Display>(msg: S) {
    report(YEL, "warning", msg);
}

#[allow(dead_code)]
pub fn info<S: Display>(msg: S) {
    report(GRN, "info", msg);
}

#[allow(dead_code)]
pub fn debug<S: Display>(msg: S) {
    report(GRY, "DEBUG", msg);
}
