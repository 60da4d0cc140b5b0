//! Parser for the type names Rust reports at runtime.
//!
//! `std::any::type_name` renders types with fully qualified paths
//! (`core::option::Option<alloc::string::String>`). This module turns such a
//! string, or a hand-written type in the same syntax, back into a `TypeRepr`.
//!
//! # Grammar
//!
//! ```text
//! type   := '!' | '_' | '&' 'mut'? type | '*' ('const' | 'mut') type
//!         | '(' (type (',' type)* ','?)? ')' | '[' type (';' const)? ']'
//!         | 'fn' '(' types ')' ('->' type)? | 'dyn' bound ('+' bound)* | path
//! path   := '::'? segment ('::' segment)* args?
//! args   := '<' arg (',' arg)* ','? '>' | '(' types ')' ('->' type)?
//! arg    := lifetime | ident '=' type | const | type
//! ```
//!
//! Lifetimes are accepted and dropped wherever they appear. Types nested
//! deeper than [`MAX_TYPE_NESTING`] are rejected.

use crate::error::ParseTypeError;
use crate::repr::{GenericArg, GenericArgs, PathType, TypeRepr};
use crate::stack::ensure_sufficient_stack;

/// Deepest type nesting `parse_type` accepts.
///
/// Descriptors are compared, hashed and dropped recursively, so their depth
/// stays bounded no matter what input reaches the parser.
pub const MAX_TYPE_NESTING: usize = 256;

/// Parse a type expression.
///
/// The whole input must be consumed; trailing tokens are an error.
pub fn parse_type(input: &str) -> Result<TypeRepr, ParseTypeError> {
    let tokens = lex(input)?;
    let mut parser = Parser {
        input,
        tokens,
        pos: 0,
        depth: 0,
    };
    let ty = parser.parse_type()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(ty)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tok<'a> {
    Ident(&'a str),
    /// Compiler-generated segment such as `{{closure}}`.
    Generated(&'a str),
    Lifetime,
    /// Numeric, string or braced const literal.
    Literal(&'a str),
    ColonColon,
    Lt,
    Gt,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semi,
    Amp,
    Star,
    Bang,
    Plus,
    Eq,
    Arrow,
    Question,
}

#[derive(Copy, Clone, Debug)]
struct Token<'a> {
    tok: Tok<'a>,
    offset: usize,
}

fn lex_error(input: &str, offset: usize, message: &'static str) -> ParseTypeError {
    ParseTypeError {
        input: input.to_owned(),
        offset,
        message,
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Split the input into tokens. Whitespace is insignificant.
fn lex(input: &str) -> Result<Vec<Token<'_>>, ParseTypeError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let b = bytes[i];
        let tok = match b {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b':' if bytes.get(i + 1) == Some(&b':') => {
                i += 2;
                Tok::ColonColon
            }
            b'-' if bytes.get(i + 1) == Some(&b'>') => {
                i += 2;
                Tok::Arrow
            }
            b'-' if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {
                i += 1;
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                Tok::Literal(&input[start..i])
            }
            b'\'' => {
                i += 1;
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                if i == start + 1 {
                    return Err(lex_error(input, start, "expected lifetime name"));
                }
                Tok::Lifetime
            }
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += if bytes[i] == b'\\' { 2 } else { 1 };
                }
                if i >= bytes.len() {
                    return Err(lex_error(input, start, "unterminated string literal"));
                }
                i += 1;
                Tok::Literal(&input[start..i])
            }
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                let Some(end) = input[i..].find("}}") else {
                    return Err(lex_error(input, start, "unterminated generated segment"));
                };
                i += end + 2;
                Tok::Generated(&input[start..i])
            }
            b'{' => {
                let mut depth = 0usize;
                while i < bytes.len() {
                    match bytes[i] {
                        b'{' => depth += 1,
                        b'}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                if i >= bytes.len() {
                    return Err(lex_error(input, start, "unbalanced `{` in const argument"));
                }
                i += 1;
                Tok::Literal(&input[start..i])
            }
            b if b.is_ascii_digit() => {
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                Tok::Literal(&input[start..i])
            }
            b if is_ident_byte(b) || !b.is_ascii() => {
                // Identifiers may contain non-ASCII characters.
                while i < bytes.len() && (is_ident_byte(bytes[i]) || !bytes[i].is_ascii()) {
                    i += 1;
                }
                Tok::Ident(&input[start..i])
            }
            _ => {
                i += 1;
                match b {
                    b'<' => Tok::Lt,
                    b'>' => Tok::Gt,
                    b'(' => Tok::LParen,
                    b')' => Tok::RParen,
                    b'[' => Tok::LBracket,
                    b']' => Tok::RBracket,
                    b',' => Tok::Comma,
                    b';' => Tok::Semi,
                    b'&' => Tok::Amp,
                    b'*' => Tok::Star,
                    b'!' => Tok::Bang,
                    b'+' => Tok::Plus,
                    b'=' => Tok::Eq,
                    b'?' => Tok::Question,
                    _ => return Err(lex_error(input, start, "unexpected character")),
                }
            }
        };
        tokens.push(Token { tok, offset: start });
    }

    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    /// Number of `parse_type` calls currently on the stack.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &'static str) -> ParseTypeError {
        let offset = self
            .tokens
            .get(self.pos)
            .map_or(self.input.len(), |token| token.offset);
        lex_error(self.input, offset, message)
    }

    #[inline]
    fn peek(&self) -> Option<Tok<'a>> {
        self.tokens.get(self.pos).map(|token| token.tok)
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<Tok<'a>> {
        self.tokens.get(self.pos + ahead).map(|token| token.tok)
    }

    #[inline]
    fn check(&self, tok: Tok<'_>) -> bool {
        self.peek() == Some(tok)
    }

    #[inline]
    fn check_keyword(&self, keyword: &str) -> bool {
        self.peek() == Some(Tok::Ident(keyword))
    }

    fn eat(&mut self, tok: Tok<'_>) -> bool {
        if self.check(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Tok<'_>, message: &'static str) -> Result<(), ParseTypeError> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn skip_lifetimes(&mut self) {
        while self.eat(Tok::Lifetime) {}
    }

    /// Every nested type passes through here, so this is where depth is
    /// counted.
    fn parse_type(&mut self) -> Result<TypeRepr, ParseTypeError> {
        if self.depth >= MAX_TYPE_NESTING {
            return Err(self.error("type is nested too deeply"));
        }
        self.depth += 1;
        let ty = ensure_sufficient_stack(|| self.parse_type_inner());
        self.depth -= 1;
        ty
    }

    fn parse_type_inner(&mut self) -> Result<TypeRepr, ParseTypeError> {
        match self.peek() {
            Some(Tok::Bang) => {
                self.pos += 1;
                Ok(TypeRepr::Never)
            }
            Some(Tok::Ident("_")) => {
                self.pos += 1;
                Ok(TypeRepr::Infer)
            }
            Some(Tok::Amp) => {
                self.pos += 1;
                self.skip_lifetimes();
                let mutable = self.check_keyword("mut");
                if mutable {
                    self.pos += 1;
                }
                Ok(TypeRepr::reference(self.parse_type()?, mutable))
            }
            Some(Tok::Star) => {
                self.pos += 1;
                let mutable = if self.check_keyword("mut") {
                    true
                } else if self.check_keyword("const") {
                    false
                } else {
                    return Err(self.error("expected `const` or `mut` after `*`"));
                };
                self.pos += 1;
                Ok(TypeRepr::pointer(self.parse_type()?, mutable))
            }
            Some(Tok::LParen) => self.parse_paren_type(),
            Some(Tok::LBracket) => self.parse_bracket_type(),
            Some(Tok::Ident("fn")) => {
                self.pos += 1;
                let (params, ret) = self.parse_fn_signature()?;
                Ok(TypeRepr::function(params, ret))
            }
            Some(Tok::Ident("unsafe" | "extern")) => {
                Err(self.error("unsafe and extern fn pointers are not supported"))
            }
            Some(Tok::Ident("dyn")) => {
                self.pos += 1;
                self.parse_bounds().map(TypeRepr::Dyn)
            }
            Some(Tok::Ident("impl")) => Err(self.error("`impl Trait` does not name a type")),
            Some(Tok::Lt) => Err(self.error("qualified paths are not supported")),
            Some(Tok::Ident(_) | Tok::Generated(_) | Tok::ColonColon) => {
                self.parse_path().map(TypeRepr::Path)
            }
            _ => Err(self.error("expected a type")),
        }
    }

    /// `()` unit, `(T,)` tuple, `(T, U)` tuple, or `(T)` grouping.
    fn parse_paren_type(&mut self) -> Result<TypeRepr, ParseTypeError> {
        self.expect(Tok::LParen, "expected `(`")?;
        let mut elems = Vec::new();
        let mut trailing_comma = false;
        while !self.check(Tok::RParen) {
            elems.push(self.parse_type()?);
            trailing_comma = self.eat(Tok::Comma);
            if !trailing_comma {
                break;
            }
        }
        self.expect(Tok::RParen, "expected `)` to close tuple")?;

        if elems.len() == 1 && !trailing_comma {
            return Ok(elems.remove(0));
        }
        Ok(TypeRepr::Tuple(elems))
    }

    /// `[T]` slice or `[T; N]` array.
    fn parse_bracket_type(&mut self) -> Result<TypeRepr, ParseTypeError> {
        self.expect(Tok::LBracket, "expected `[`")?;
        let elem = self.parse_type()?;
        if self.eat(Tok::Semi) {
            let len = match self.peek() {
                Some(Tok::Literal(text) | Tok::Ident(text)) => text,
                _ => return Err(self.error("expected array length")),
            };
            self.pos += 1;
            self.expect(Tok::RBracket, "expected `]` to close array")?;
            return Ok(TypeRepr::array(elem, len));
        }
        self.expect(Tok::RBracket, "expected `]` to close slice")?;
        Ok(TypeRepr::slice(elem))
    }

    /// `(A, B) -> R` after `fn` or a `Fn`-family trait name.
    fn parse_fn_signature(&mut self) -> Result<(Vec<TypeRepr>, TypeRepr), ParseTypeError> {
        self.expect(Tok::LParen, "expected `(` to open parameter list")?;
        let mut params = Vec::new();
        while !self.check(Tok::RParen) {
            params.push(self.parse_type()?);
            if !self.eat(Tok::Comma) {
                break;
            }
        }
        self.expect(Tok::RParen, "expected `)` to close parameter list")?;
        let ret = if self.eat(Tok::Arrow) {
            self.parse_type()?
        } else {
            TypeRepr::unit()
        };
        Ok((params, ret))
    }

    /// `A + B + 'a` after `dyn`. At least one trait bound is required.
    fn parse_bounds(&mut self) -> Result<Vec<PathType>, ParseTypeError> {
        let mut bounds = Vec::new();
        loop {
            if self.eat(Tok::Lifetime) {
                // Lifetime bounds carry no identity.
            } else if self.check(Tok::Question) {
                return Err(self.error("`?` bounds are not allowed on trait objects"));
            } else {
                bounds.push(self.parse_path()?);
            }
            if !self.eat(Tok::Plus) {
                break;
            }
        }
        if bounds.is_empty() {
            return Err(self.error("trait object without a trait bound"));
        }
        Ok(bounds)
    }

    /// A `::`-separated path. Arguments on inner segments are folded into the
    /// path text; arguments on the final segment are kept structured.
    fn parse_path(&mut self) -> Result<PathType, ParseTypeError> {
        let mut path = String::new();
        if self.eat(Tok::ColonColon) {
            path.push_str("::");
        }

        loop {
            match self.peek() {
                Some(Tok::Ident(name) | Tok::Generated(name)) => {
                    self.pos += 1;
                    path.push_str(name);
                }
                _ => return Err(self.error("expected path segment")),
            }

            let args = self.parse_segment_args()?;

            if self.check(Tok::ColonColon) {
                self.pos += 1;
                if let Some(args) = args {
                    // Inner-segment arguments only appear in compiler-generated
                    // names and never affect the final type's arguments.
                    let inner = PathType {
                        path: "".into(),
                        args,
                    };
                    path.push_str(&inner.to_string());
                }
                path.push_str("::");
                continue;
            }

            return Ok(PathType {
                path: path.into(),
                args: args.unwrap_or(GenericArgs::Angle(Vec::new())),
            });
        }
    }

    fn parse_segment_args(&mut self) -> Result<Option<GenericArgs>, ParseTypeError> {
        if self.eat(Tok::Lt) {
            let mut args = Vec::new();
            while !self.check(Tok::Gt) {
                if self.eat(Tok::Lifetime) {
                    // dropped
                } else {
                    args.push(self.parse_generic_arg()?);
                }
                if !self.eat(Tok::Comma) {
                    break;
                }
            }
            self.expect(Tok::Gt, "expected `>` to close generic arguments")?;
            return Ok(Some(GenericArgs::Angle(args)));
        }

        if self.check(Tok::LParen) {
            let (inputs, output) = self.parse_fn_signature()?;
            return Ok(Some(GenericArgs::Parenthesized {
                inputs,
                output: Box::new(output),
            }));
        }

        Ok(None)
    }

    fn parse_generic_arg(&mut self) -> Result<GenericArg, ParseTypeError> {
        match (self.peek(), self.peek_at(1)) {
            (Some(Tok::Ident(name)), Some(Tok::Eq)) => {
                self.pos += 2;
                Ok(GenericArg::Binding {
                    name: name.into(),
                    ty: self.parse_type()?,
                })
            }
            (Some(Tok::Literal(text)), _) | (Some(Tok::Ident(text @ ("true" | "false"))), _) => {
                self.pos += 1;
                Ok(GenericArg::Const(text.into()))
            }
            _ => self.parse_type().map(GenericArg::Type),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
