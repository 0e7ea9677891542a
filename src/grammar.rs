//! Grammar description trees and the combinator constructors that build
//! them.
//!
//! A [`Parser`] is pure description: building one performs no matching.
//! Leaf kinds describe a single lexical shape; composite kinds own their
//! sub-parsers and describe how smaller grammars combine. The one
//! exception to ownership is [`Parser::Ref`], a non-owning handle to a
//! parser defined elsewhere, which is what makes recursive and reused
//! sub-grammars expressible without ownership cycles.
//!
//! Grammar authors compose a tree once, run it any number of times (the
//! tree is read-only during a run), and drop it when done.

use std::sync::Arc;

/// A tagged grammar-description node.
#[derive(Debug, Clone, PartialEq)]
pub enum Parser {
    // Leaf kinds
    /// Match this exact string, unit for unit.
    Literal(String),
    /// Match any single unit.
    AnyChar,
    /// Match one or more space/newline units.
    Whitespace,
    /// Match one or more decimal digits.
    Uint,
    /// Match an optional sign followed by one or more decimal digits.
    Int,
    /// Match only at end of input, consuming nothing.
    EndOfInput,

    // Composite kinds
    /// Run `before` (output dropped), then `sub` (the result), then
    /// `after` (output dropped).
    Adjacent {
        before: Option<Box<Parser>>,
        sub: Box<Parser>,
        after: Option<Box<Parser>>,
    },
    /// Run each sub-parser in order, collecting outputs into a list.
    Sequence(Vec<Parser>),
    /// Try alternatives in order from a shared starting mark; first
    /// success wins.
    FirstOf(Vec<Parser>),
    /// Run `sub`; recover its failure as an empty match.
    Optional(Box<Parser>),
    /// Repeat `sub` between `min` and `max` times, optionally probing
    /// `end` before each iteration to stop early.
    TakeMany {
        sub: Box<Parser>,
        min: usize,
        max: Option<usize>,
        end: Option<Box<Parser>>,
    },
    /// One `sub`, then any number of `sep`-then-`sub` repetitions.
    SepBy { sep: Box<Parser>, sub: Box<Parser> },
    /// Non-owning handle to a parser owned elsewhere.
    Ref(Arc<Parser>),
}

// === Leaf builders ===

pub fn literal(s: impl Into<String>) -> Parser {
    Parser::Literal(s.into())
}

/// Single-character literal.
pub fn ch(c: char) -> Parser {
    Parser::Literal(c.to_string())
}

pub fn any_char() -> Parser {
    Parser::AnyChar
}

pub fn whitespace() -> Parser {
    Parser::Whitespace
}

/// Alias for [`whitespace`], for grammar-site brevity.
pub fn ws() -> Parser {
    Parser::Whitespace
}

/// Optional whitespace run.
pub fn opt_ws() -> Parser {
    optional(whitespace())
}

pub fn uint() -> Parser {
    Parser::Uint
}

pub fn int() -> Parser {
    Parser::Int
}

pub fn end_of_input() -> Parser {
    Parser::EndOfInput
}

// === Composite builders ===

/// Run `before` and `after` (when present) purely for their consumption;
/// only `sub`'s output survives.
pub fn adjacent(before: Option<Parser>, sub: Parser, after: Option<Parser>) -> Parser {
    Parser::Adjacent {
        before: before.map(Box::new),
        sub: Box::new(sub),
        after: after.map(Box::new),
    }
}

pub fn sequence(subs: Vec<Parser>) -> Parser {
    Parser::Sequence(subs)
}

pub fn first_of(alternatives: Vec<Parser>) -> Parser {
    Parser::FirstOf(alternatives)
}

pub fn optional(sub: Parser) -> Parser {
    Parser::Optional(Box::new(sub))
}

/// The general repetition combinator; the `take_*`/`drop_until` builders
/// below are the usual entry points.
pub fn take_many(sub: Parser, min: usize, max: Option<usize>, end: Option<Parser>) -> Parser {
    Parser::TakeMany {
        sub: Box::new(sub),
        min,
        max,
        end: end.map(Box::new),
    }
}

/// One or more repetitions of `sub`.
pub fn take_many1(sub: Parser) -> Parser {
    take_many(sub, 1, None, None)
}

/// One or more repetitions of `sub`, stopping when `end` would match.
pub fn take_many_until1(sub: Parser, end: Parser) -> Parser {
    take_many(sub, 1, None, Some(end))
}

/// Exactly `n` repetitions of `sub`.
pub fn take_n(n: usize, sub: Parser) -> Parser {
    take_many(sub, n, Some(n), None)
}

/// Consume and discard arbitrary units until `end` would match.
pub fn drop_until(end: Parser) -> Parser {
    take_many(any_char(), 0, None, Some(end))
}

/// `sub`, then zero or more `sep`-then-`sub` repetitions. A separator
/// with no following `sub` is a hard error at run time.
pub fn sep_by(sep: Parser, sub: Parser) -> Parser {
    Parser::SepBy {
        sep: Box::new(sep),
        sub: Box::new(sub),
    }
}

/// Wrap a parser for shared use. Embed it in a grammar (possibly in
/// several places, including recursively) via [`reference`].
pub fn shared(sub: Parser) -> Arc<Parser> {
    Arc::new(sub)
}

/// A non-owning grammar node delegating to a [`shared`] parser.
pub fn reference(sub: &Arc<Parser>) -> Parser {
    Parser::Ref(Arc::clone(sub))
}
