//! Weft: a small backtracking parser-combinator engine.
//!
//! Grammars are built once as composable description trees
//! ([`grammar::Parser`]), then interpreted recursively against an input
//! [`input::Cursor`] by the [`runner`], producing a tagged output tree
//! ([`output::Out`]) or a position-carrying [`errors::ParseError`].
//!
//! ```
//! use weft::errors::SourceContext;
//! use weft::grammar::{adjacent, opt_ws, sep_by, ch, uint};
//! use weft::runner::parse;
//!
//! let ctx = SourceContext::from_input("input", "1, 2, 3");
//! let grammar = sep_by(ch(','), adjacent(Some(opt_ws()), uint(), None));
//!
//! let out = parse(&ctx, &grammar).unwrap();
//! let nums: Vec<u64> = out.iter().filter_map(|o| o.as_u64()).collect();
//! assert_eq!(nums, vec![1, 2, 3]);
//! ```

pub use crate::errors::{print_error, ErrorKind, ParseError, Position, SourceContext};
pub use crate::input::{Cursor, Mark};
pub use crate::output::{Out, OutValue};
pub use crate::runner::{parse, run, Runner};

pub mod errors;
pub mod grammar;
pub mod input;
pub mod output;
pub mod runner;
