//! Recursive-descent decoder and encoder for the wire format

use std::fmt::Write;

use super::errors::{WireError, WireResult};
use super::value::WireValue;

/// Deepest array nesting `decode` accepts
pub const MAX_DEPTH: usize = 512;

/// Decodes a complete wire value.
///
/// The whole input must be consumed; surrounding whitespace is ignored.
pub fn decode(text: &str) -> WireResult<WireValue> {
    let mut parser = Parser::new(text);
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(WireError::TrailingInput(parser.pos));
    }
    Ok(value)
}

/// Encodes a value so that `decode(&encode(v)) == v`.
///
/// Numbers are written with Rust's float formatting, which is
/// locale-independent, uses `.` as decimal point and never groups digits.
/// Non-finite numbers have no wire form and are written as `nil`.
pub fn encode(value: &WireValue) -> String {
    let mut out = String::with_capacity(64);
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &WireValue) {
    match value {
        WireValue::Null => out.push_str("nil"),
        WireValue::Bool(true) => out.push_str("true"),
        WireValue::Bool(false) => out.push_str("false"),
        WireValue::Number(n) => write_number(out, *n),
        WireValue::String(s) => {
            out.push('"');
            for c in s.chars() {
                if c == '"' {
                    out.push('"');
                }
                out.push(c);
            }
            out.push('"');
        }
        WireValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
    }
}

fn write_number(out: &mut String, n: f64) {
    if !n.is_finite() {
        out.push_str("nil");
        return;
    }
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", n);
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn parse_value(&mut self) -> WireResult<WireValue> {
        match self.peek() {
            None => Err(WireError::UnexpectedEnd(self.pos)),
            Some('[') => self.parse_array(),
            Some(quote @ ('"' | '\'')) => self.parse_string(quote),
            Some(c) if is_delimiter(c) => Err(WireError::UnexpectedChar {
                found: c,
                offset: self.pos,
            }),
            Some(_) => self.parse_bare(),
        }
    }

    fn parse_array(&mut self) -> WireResult<WireValue> {
        if self.depth == MAX_DEPTH {
            return Err(WireError::TooDeep(self.pos));
        }
        self.depth += 1;
        let array = self.parse_elements();
        self.depth -= 1;
        array
    }

    fn parse_elements(&mut self) -> WireResult<WireValue> {
        // consume '['
        self.bump();
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(WireValue::Array(items));
        }

        loop {
            self.skip_whitespace();
            items.push(self.parse_value()?);
            self.skip_whitespace();

            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(WireValue::Array(items)),
                Some(c) => {
                    return Err(WireError::UnexpectedChar {
                        found: c,
                        offset: self.pos - c.len_utf8(),
                    })
                }
                None => return Err(WireError::UnexpectedEnd(self.pos)),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> WireResult<WireValue> {
        let start = self.pos;
        self.bump();
        let mut text = String::new();

        loop {
            match self.bump() {
                None => return Err(WireError::UnterminatedString(start)),
                Some(c) if c == quote => {
                    // A doubled quote is an escaped quote character.
                    if self.peek() == Some(quote) {
                        self.bump();
                        text.push(quote);
                    } else {
                        return Ok(WireValue::String(text));
                    }
                }
                Some(c) => text.push(c),
            }
        }
    }

    fn parse_bare(&mut self) -> WireResult<WireValue> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_delimiter(c) || c.is_whitespace() || c == '"' || c == '\'' {
                break;
            }
            self.pos += c.len_utf8();
        }
        let token = &self.src[start..self.pos];

        if token.eq_ignore_ascii_case("true") {
            return Ok(WireValue::Bool(true));
        }
        if token.eq_ignore_ascii_case("false") {
            return Ok(WireValue::Bool(false));
        }
        if token.eq_ignore_ascii_case("nil") || token.eq_ignore_ascii_case("null") {
            return Ok(WireValue::Null);
        }

        parse_number(token).ok_or_else(|| WireError::UnknownToken {
            token: token.to_string(),
            offset: start,
        })
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '[' | ']' | ',')
}

fn parse_number(token: &str) -> Option<WireValue> {
    // Only plain decimal forms; rejects "inf", "NaN" and locale separators.
    let valid = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        && token.chars().any(|c| c.is_ascii_digit());
    if !valid {
        return None;
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(WireValue::Number)
}
