//! The recursive runner: interprets a grammar description against a
//! cursor.
//!
//! There is no compilation step and no lookahead tables; [`Runner::run`]
//! walks the [`Parser`] tree directly, so runner recursion depth is
//! bounded by grammar depth. Left-recursive grammars are unsupported (they
//! would recurse without consuming input).
//!
//! Backtracking is explicit mark/rewind on the cursor, never hidden
//! control transfer: a combinator that wants to retry from its entry point
//! snapshots the cursor, and restores it when a sub-parse fails.

use crate::errors::{
    DiagnosticInfo, ErrorKind, ErrorReporting, ParseError, SourceContext, SourceInfo,
};
use crate::grammar::Parser;
use crate::input::{Cursor, Mark};
use crate::output::{Out, OutValue};

/// Executes grammar trees against an input cursor, reporting failures
/// against one source context.
pub struct Runner<'s> {
    ctx: &'s SourceContext,
}

impl ErrorReporting for Runner<'_> {
    fn report(&self, kind: ErrorKind, at: Mark) -> ParseError {
        let len = self.ctx.content.len();
        let start = at.offset.min(len);
        let end = (at.offset + 1).min(len).max(start);
        let error_code = format!("weft::run::{}", kind.code_suffix());

        ParseError {
            kind,
            source_info: SourceInfo {
                source: self.ctx.to_named_source(),
                primary_span: (start..end).into(),
                position: at.into(),
            },
            diagnostic_info: DiagnosticInfo {
                help: None,
                error_code,
            },
        }
    }
}

impl<'s> Runner<'s> {
    pub fn new(ctx: &'s SourceContext) -> Self {
        Self { ctx }
    }

    /// Execute one grammar node at the cursor's current position.
    ///
    /// On success the cursor sits just past the consumed input. On failure
    /// the cursor position depends on the failing node: self-rewinding
    /// nodes (literal, uint, int) restore their entry mark, while
    /// composite stages (adjacent, sequence, sep-by) leave the cursor at
    /// the inner failure point and rely on an enclosing
    /// first-of/optional/take-many for backtracking.
    pub fn run(&self, input: &mut Cursor, parser: &Parser) -> Result<Out, ParseError> {
        match parser {
            Parser::Literal(expected) => self.run_literal(input, expected),
            Parser::AnyChar => self.run_any_char(input),
            Parser::Whitespace => self.run_whitespace(input),
            Parser::Uint => self.run_integer(input, false),
            Parser::Int => self.run_integer(input, true),
            Parser::EndOfInput => self.run_end_of_input(input),
            Parser::Adjacent { before, sub, after } => {
                self.run_adjacent(input, before.as_deref(), sub, after.as_deref())
            }
            Parser::Sequence(subs) => self.run_sequence(input, subs),
            Parser::FirstOf(alternatives) => self.run_first_of(input, alternatives),
            Parser::Optional(sub) => self.run_optional(input, sub),
            Parser::TakeMany { sub, min, max, end } => {
                self.run_take_many(input, sub, *min, *max, end.as_deref())
            }
            Parser::SepBy { sep, sub } => self.run_sep_by(input, sep, sub),
            // Non-owning delegation; the referenced tree stays alive with
            // its owner.
            Parser::Ref(referenced) => self.run(input, referenced),
        }
    }

    // === Leaf kinds ===

    fn run_literal(&self, input: &mut Cursor, expected: &str) -> Result<Out, ParseError> {
        let mark = input.mark();

        for want in expected.chars() {
            let Some(got) = input.advance() else {
                input.rewind(mark);
                return Err(self.unexpected_end(&format!("the string {:?}", expected), mark));
            };
            if got != want {
                input.rewind(mark);
                return Err(self.literal_mismatch(want, got, mark));
            }
        }

        Ok(Out::new(mark, OutValue::Str(expected.to_string())))
    }

    fn run_any_char(&self, input: &mut Cursor) -> Result<Out, ParseError> {
        let mark = input.mark();
        match input.advance() {
            Some(c) => Ok(Out::new(mark, OutValue::Char(c))),
            None => Err(self.unexpected_end("a character", mark)),
        }
    }

    fn run_whitespace(&self, input: &mut Cursor) -> Result<Out, ParseError> {
        let mark = input.mark();
        let mut count = 0;

        while let Some(c) = input.peek() {
            if !is_whitespace_unit(c) {
                break;
            }
            input.advance();
            count += 1;
        }

        if count == 0 {
            return Err(match input.peek() {
                Some(found) => self.report(ErrorKind::ExpectedWhitespace { found }, mark),
                None => self.unexpected_end("whitespace", mark),
            });
        }

        Ok(Out::new(mark, OutValue::Empty))
    }

    /// Scan-then-reconsume: count digits ahead, rewind, then take exactly
    /// that many units. A failed attempt never leaves partial consumption.
    fn run_integer(&self, input: &mut Cursor, signed: bool) -> Result<Out, ParseError> {
        let mark = input.mark();

        let mut sign_units = 0;
        if signed {
            if let Some(c) = input.peek() {
                if c == '-' || c == '+' {
                    input.advance();
                    sign_units = 1;
                }
            }
        }

        let mut digits = 0;
        while let Some(c) = input.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            input.advance();
            digits += 1;
        }

        if digits == 0 {
            let found = input.peek();
            input.rewind(mark);
            return Err(match found {
                Some(found) => self.report(ErrorKind::ExpectedDigit { found }, mark),
                None => self.unexpected_end("a digit", mark),
            });
        }

        input.rewind(mark);
        let raw = input
            .take(sign_units + digits)
            .ok_or_else(|| self.unexpected_end("an integer after rewinding", mark))?;

        Ok(Out::new(
            mark,
            OutValue::Int {
                raw: raw.to_string(),
                value: parse_magnitude(raw),
            },
        ))
    }

    fn run_end_of_input(&self, input: &mut Cursor) -> Result<Out, ParseError> {
        let mark = input.mark();
        match input.peek() {
            None => Ok(Out::new(mark, OutValue::Empty)),
            Some(found) => Err(self.report(ErrorKind::ExpectedEnd { found }, mark)),
        }
    }

    // === Composite kinds ===

    /// Runs before/sub/after; only sub's output survives. A failing stage
    /// propagates with the cursor left at that stage's failure point; the
    /// enclosing combinator owns any rewind.
    fn run_adjacent(
        &self,
        input: &mut Cursor,
        before: Option<&Parser>,
        sub: &Parser,
        after: Option<&Parser>,
    ) -> Result<Out, ParseError> {
        if let Some(before) = before {
            self.run(input, before)?;
        }
        let out = self.run(input, sub)?;
        if let Some(after) = after {
            self.run(input, after)?;
        }
        Ok(out)
    }

    fn run_sequence(&self, input: &mut Cursor, subs: &[Parser]) -> Result<Out, ParseError> {
        let mark = input.mark();
        let mut items = Vec::with_capacity(subs.len());

        for sub in subs {
            // Already-collected outputs drop with `items` on failure.
            items.push(self.run(input, sub)?);
        }

        Ok(Out::new(mark, OutValue::List(items)))
    }

    fn run_first_of(&self, input: &mut Cursor, alternatives: &[Parser]) -> Result<Out, ParseError> {
        let mark = input.mark();
        let mut attempts = Vec::with_capacity(alternatives.len());

        for alternative in alternatives {
            match self.run(input, alternative) {
                Ok(out) => return Ok(out),
                Err(err) => {
                    attempts.push(err);
                    input.rewind(mark);
                }
            }
        }

        Err(self.exhausted(attempts, mark))
    }

    fn run_optional(&self, input: &mut Cursor, sub: &Parser) -> Result<Out, ParseError> {
        let mark = input.mark();
        match self.run(input, sub) {
            Ok(out) => Ok(out),
            Err(_) => {
                input.rewind(mark);
                Ok(Out::new(mark, OutValue::Empty))
            }
        }
    }

    fn run_take_many(
        &self,
        input: &mut Cursor,
        sub: &Parser,
        min: usize,
        max: Option<usize>,
        end: Option<&Parser>,
    ) -> Result<Out, ParseError> {
        let mark = input.mark();
        let mut items = Vec::new();

        while max.map_or(true, |max| items.len() < max) {
            let iteration_start = input.mark();

            if let Some(end) = end {
                // The probe's result is dropped either way, and its
                // consumption is always rewound; a matching probe only
                // stops the loop.
                let should_end = self.run(input, end).is_ok();
                input.rewind(iteration_start);
                if should_end {
                    break;
                }
            }

            match self.run(input, sub) {
                Ok(out) => items.push(out),
                Err(_) => {
                    input.rewind(iteration_start);
                    break;
                }
            }
        }

        if items.len() < min {
            return Err(self.quantity_shortfall(min, items.len(), mark));
        }

        Ok(Out::new(mark, OutValue::List(items)))
    }

    fn run_sep_by(&self, input: &mut Cursor, sep: &Parser, sub: &Parser) -> Result<Out, ParseError> {
        let mark = input.mark();
        let mut items = vec![self.run(input, sub)?];

        loop {
            let before_sep = input.mark();

            if self.run(input, sep).is_err() {
                input.rewind(before_sep);
                break;
            }

            // A separator with nothing after it is a hard error, never
            // silently absorbed.
            items.push(self.run(input, sub)?);
        }

        Ok(Out::new(mark, OutValue::List(items)))
    }
}

fn is_whitespace_unit(c: char) -> bool {
    c == ' ' || c == '\n'
}

/// atoi-style accumulation over raw digit text: optional sign, then
/// wrapping base-10 folds.
fn parse_magnitude(raw: &str) -> i64 {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.wrapping_mul(10).wrapping_add(i64::from(b - b'0'))
    });

    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

// === Entry points ===

/// Execute a grammar against a cursor, reporting failures against `ctx`.
pub fn run(ctx: &SourceContext, input: &mut Cursor, grammar: &Parser) -> Result<Out, ParseError> {
    Runner::new(ctx).run(input, grammar)
}

/// Execute a grammar against the context's own content, from the start.
pub fn parse(ctx: &SourceContext, grammar: &Parser) -> Result<Out, ParseError> {
    let mut input = Cursor::new(&ctx.content);
    Runner::new(ctx).run(&mut input, grammar)
}
