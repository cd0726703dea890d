use failure::Fail;
use itertools::join;
use std::fmt;

/// raised by the parser when input does not reduce to a single well-formed
/// form: the rightmost position the grammar reached, the terminals that
/// would have allowed further progress there (deduplicated and sorted),
/// and the character actually found (`None` at end of input)
#[derive(Debug)]
pub struct SyntaxError {
    pub expected: Vec<&'static str>,
    pub found: Option<char>,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let expected = match self.expected.len() {
            0 => "end of input".to_owned(),
            1 => self.expected[0].to_owned(),
            n => format!(
                "{} or {}",
                join(self.expected[..n - 1].iter(), ", "),
                self.expected[n - 1]
            ),
        };

        let found = match self.found {
            Some(c) => format!("\"{}\"", c),
            None => "end of input".to_owned(),
        };

        write!(f, "Expected {} but {} found.", expected, found)
    }
}

impl Fail for SyntaxError {}

/// the normalized form a SyntaxError takes when it crosses the `run`
/// boundary
#[derive(Debug, Fail)]
#[fail(display = "Syntax error at line {}, column {}.", line, column)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Fail)]
pub enum RunError {
    #[fail(display = "Reference to uninitialized var {}.", _0)]
    UnboundVar(String),

    #[fail(display = "Attempt to update uninitialized var {}.", _0)]
    UpdateUnbound(String),

    #[fail(display = "Attempt to reinitialize already initialized var {}.", _0)]
    Redefinition(String),

    #[fail(display = "{}", _0)]
    Contract(String),

    #[fail(display = "value `{}` (of type {}) is uncallable", name, typename)]
    Uncallable { name: String, typename: String },

    #[fail(display = "attempt to apply an empty expression")]
    EmptyApplication,
}
