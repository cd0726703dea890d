use crate::errors::SyntaxError;
use crate::values::Value;

// terminal descriptions as they appear in syntax-error expectation sets
const OPEN: &str = "\"(\"";
const CLOSE: &str = "\")\"";
const TICK: &str = "\"'\"";
const MINUS: &str = "\"-\"";
const HASH: &str = "\"#\"";
const SEMIS: &str = "\";;\"";
const DIGIT: &str = "[0-9]";
const TF: &str = "[tf]";
const SYMBOL_CHAR: &str = "[0-9a-zA-Z_?!+><=@#$%^&*\\/.\\-]";
const NEWLINE: &str = "[\\r\\n]";
const SPACE: &str = "[\\t ]";
const ANY: &str = "any character";

/// a cursor into the source text; `seen_cr` makes a `\r\n` pair count as
/// one line break
#[derive(Debug, Clone, Copy)]
struct Pos {
    offset: usize,
    line: usize,
    column: usize,
    seen_cr: bool,
}

impl Pos {
    fn start() -> Pos {
        Pos {
            offset: 0,
            line: 1,
            column: 1,
            seen_cr: false,
        }
    }
}

/// parse source text into a single top-level form. Fails if no alternative
/// matches at the point of furthest progress, or if non-insignificant
/// input remains after the form.
pub fn parse(source: &str) -> Result<Value, SyntaxError> {
    let mut parser = Parser::new(source);
    match parser.start() {
        Some(form) if parser.pos.offset == parser.chars.len() => Ok(form),
        _ => Err(parser.syntax_error()),
    }
}

/// recursive-descent parser with ordered alternation and backtracking;
/// every terminal that fails to match records itself against the
/// rightmost-reached position so the eventual error can report what would
/// have been accepted there
struct Parser {
    chars: Vec<char>,
    pos: Pos,
    farthest: Pos,
    expected: Vec<&'static str>,
}

impl Parser {
    fn new(source: &str) -> Parser {
        Parser {
            chars: source.chars().collect(),
            pos: Pos::start(),
            farthest: Pos::start(),
            expected: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos.offset).copied()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos.offset += 1;
            match c {
                '\n' => {
                    if !self.pos.seen_cr {
                        self.pos.line += 1;
                    }
                    self.pos.column = 1;
                    self.pos.seen_cr = false;
                }
                '\r' => {
                    self.pos.line += 1;
                    self.pos.column = 1;
                    self.pos.seen_cr = true;
                }
                _ => {
                    self.pos.column += 1;
                    self.pos.seen_cr = false;
                }
            }
        }
    }

    /// record a terminal failure; failures behind the rightmost-reached
    /// position are irrelevant, failures beyond it reset the set
    fn fail(&mut self, expected: &'static str) {
        if self.pos.offset > self.farthest.offset {
            self.farthest = self.pos;
            self.expected.clear();
        }
        if self.pos.offset == self.farthest.offset {
            self.expected.push(expected);
        }
    }

    fn eat(&mut self, ch: char, expected: &'static str) -> bool {
        if self.peek() == Some(ch) {
            self.bump();
            true
        } else {
            self.fail(expected);
            false
        }
    }

    fn eat_class<F: Fn(char) -> bool>(&mut self, pred: F, expected: &'static str) -> Option<char> {
        match self.peek() {
            Some(c) if pred(c) => {
                self.bump();
                Some(c)
            }
            _ => {
                self.fail(expected);
                None
            }
        }
    }

    // start := _ form
    fn start(&mut self) -> Option<Value> {
        self.insignificant();
        self.form()
    }

    // form := atom / expression / quoted_expression
    fn form(&mut self) -> Option<Value> {
        self.atom()
            .or_else(|| self.expression())
            .or_else(|| self.quoted_expression())
    }

    // atom := number _ / boolean _ / symbol _
    fn atom(&mut self) -> Option<Value> {
        if let Some(n) = self.number() {
            self.insignificant();
            return Some(Value::Number(n));
        }
        if let Some(b) = self.boolean() {
            self.insignificant();
            return Some(Value::Bool(b));
        }
        if let Some(s) = self.symbol() {
            self.insignificant();
            return Some(Value::Symbol(s));
        }
        None
    }

    // number := "-"? [0-9]+ — ordered before symbol, so "-12" reads as a
    // number while a bare "-" falls through to symbol
    fn number(&mut self) -> Option<i64> {
        let save = self.pos;
        let negative = self.eat('-', MINUS);

        let mut digits = String::new();
        while let Some(d) = self.eat_class(|c| c.is_ascii_digit(), DIGIT) {
            digits.push(d);
        }
        if digits.is_empty() {
            self.pos = save;
            return None;
        }

        if negative {
            digits.insert(0, '-');
        }
        match digits.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                // out of host-integer range reads as not-a-number
                self.pos = save;
                None
            }
        }
    }

    // boolean := "#" [tf]
    fn boolean(&mut self) -> Option<bool> {
        let save = self.pos;
        if !self.eat('#', HASH) {
            return None;
        }
        match self.eat_class(|c| c == 't' || c == 'f', TF) {
            Some(tf) => Some(tf == 't'),
            None => {
                self.pos = save;
                None
            }
        }
    }

    fn is_symbol_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || "_?!+><=@#$%^&*/.-".contains(c)
    }

    // symbol := [0-9a-zA-Z_?!+><=@#$%^&*/.\-]+ — this class overlaps with
    // number and boolean syntax, so symbol is tried only after those fail
    fn symbol(&mut self) -> Option<String> {
        let mut name = String::new();
        while let Some(c) = self.eat_class(Self::is_symbol_char, SYMBOL_CHAR) {
            name.push(c);
        }
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    // expression := "(" _ form* ")" _ — the parentheses are not data
    fn expression(&mut self) -> Option<Value> {
        let save = self.pos;
        if !self.eat('(', OPEN) {
            return None;
        }
        self.insignificant();

        let mut forms = Vec::new();
        while let Some(form) = self.form() {
            forms.push(form);
        }

        if !self.eat(')', CLOSE) {
            self.pos = save;
            return None;
        }
        self.insignificant();
        Some(Value::List(forms))
    }

    // quoted_expression := "'" form — desugars to (quote form)
    fn quoted_expression(&mut self) -> Option<Value> {
        let save = self.pos;
        if !self.eat('\'', TICK) {
            return None;
        }
        match self.form() {
            Some(form) => Some(Value::List(vec![Value::Symbol("quote".to_owned()), form])),
            None => {
                self.pos = save;
                None
            }
        }
    }

    // _ := (newline / space / comment)*
    fn insignificant(&mut self) {
        loop {
            if self.eat_class(|c| c == '\r' || c == '\n', NEWLINE).is_some() {
                continue;
            }
            if self.eat_class(|c| c == '\t' || c == ' ', SPACE).is_some() {
                continue;
            }
            if self.comment() {
                continue;
            }
            break;
        }
    }

    // comment := ";;" (!newline .)* — skipped, not retained
    fn comment(&mut self) -> bool {
        if self.peek() == Some(';') && self.chars.get(self.pos.offset + 1) == Some(&';') {
            self.bump();
            self.bump();
            loop {
                match self.peek() {
                    Some('\r') | Some('\n') => break,
                    Some(_) => self.bump(),
                    None => {
                        self.fail(ANY);
                        break;
                    }
                }
            }
            true
        } else {
            self.fail(SEMIS);
            false
        }
    }

    /// build the error for the rightmost failure; when the parse succeeded
    /// but left trailing input, the trailing position wins
    fn syntax_error(&mut self) -> SyntaxError {
        let offset = self.pos.offset.max(self.farthest.offset);
        let found = self.chars.get(offset).copied();
        let position = if self.pos.offset > self.farthest.offset {
            self.pos
        } else {
            self.farthest
        };

        let mut expected = self.expected.clone();
        expected.sort();
        expected.dedup();

        SyntaxError {
            expected,
            found,
            offset,
            line: position.line,
            column: position.column,
        }
    }
}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(source: &str) -> String {
        format!("{}", parse(source).unwrap())
    }

    #[test]
    fn atoms() {
        assert_eq!(parse("42").unwrap(), Value::Number(42));
        assert_eq!(parse("-17").unwrap(), Value::Number(-17));
        assert_eq!(parse("#t").unwrap(), Value::Bool(true));
        assert_eq!(parse("#f").unwrap(), Value::Bool(false));
        assert_eq!(parse("abc").unwrap(), Value::Symbol("abc".to_owned()));
        assert_eq!(parse("empty?").unwrap(), Value::Symbol("empty?".to_owned()));
    }

    #[test]
    fn ordered_alternation_over_longest_match() {
        // a bare minus is a symbol, since number demands a digit
        assert_eq!(parse("-").unwrap(), Value::Symbol("-".to_owned()));
        // "#" with neither t nor f after it backtracks into symbol
        assert_eq!(parse("#x").unwrap(), Value::Symbol("#x".to_owned()));
        assert_eq!(parse("set!").unwrap(), Value::Symbol("set!".to_owned()));
    }

    #[test]
    fn over_range_number_literal_reads_as_a_symbol() {
        // beyond i64, the number rule backtracks and ordered alternation
        // lands on symbol
        let digits = "99999999999999999999";
        assert_eq!(parse(digits).unwrap(), Value::Symbol(digits.to_owned()));

        let negative = "-99999999999999999999";
        assert_eq!(parse(negative).unwrap(), Value::Symbol(negative.to_owned()));
    }

    #[test]
    fn expressions() {
        assert_eq!(parsed("()"), "()");
        assert_eq!(parsed("(+ 1 2)"), "(+ 1 2)");
        assert_eq!(parsed("(a (b (c)) d)"), "(a (b (c)) d)");
    }

    #[test]
    fn whitespace_and_comments_are_insignificant() {
        assert_eq!(parsed("  ( +   1\n\t2 ) "), "(+ 1 2)");
        assert_eq!(parsed(";; leading\n(+ 1 2)"), "(+ 1 2)");
        assert_eq!(parsed("(+ 1 ;; inline\n 2)"), "(+ 1 2)");
        assert_eq!(parsed("(+ 1 2) ;; trailing"), "(+ 1 2)");
    }

    #[test]
    fn quote_desugars() {
        assert_eq!(parsed("'x"), "(quote x)");
        assert_eq!(parsed("'(1 2 3)"), "(quote (1 2 3))");
        assert_eq!(parsed("''x"), "(quote (quote x))");
    }

    #[test]
    fn unclosed_expression_reports_its_position() {
        let err = parse("(+ 1").unwrap_err();
        assert_eq!((err.line, err.column), (1, 5));
        assert_eq!(err.found, None);
        assert!(err.expected.contains(&CLOSE));
    }

    #[test]
    fn expected_set_is_sorted_and_deduplicated() {
        let err = parse("(+ 1").unwrap_err();
        let mut sorted = err.expected.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(err.expected, sorted);
    }

    #[test]
    fn empty_input_reports_end_of_input() {
        let err = parse("").unwrap_err();
        assert!(err.to_string().ends_with("but end of input found."));
    }

    #[test]
    fn trailing_content_is_rejected() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(err.found, Some('2'));
        assert_eq!((err.line, err.column), (1, 3));

        assert!(parse("(a) (b)").is_err());
    }

    #[test]
    fn positions_span_lines() {
        let err = parse("(define x\n  (+ 1").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 7);
    }

    #[test]
    fn stray_close_paren_fails() {
        assert!(parse(")").is_err());
        assert!(parse("'").is_err());
    }
}
// }}}
