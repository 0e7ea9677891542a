//! Tagged output-value trees produced by a run.
//!
//! Every successful run yields one [`Out`] tree. Leaf kinds carry the raw
//! payload of the unit(s) they matched; the list kind is the ordered
//! composite the sequence-like combinators build. Each node remembers the
//! [`Mark`] where its match began, which is what error reporting and
//! position-sensitive consumers key off.

use crate::input::Mark;

/// One node of the output tree: a tagged value plus the position where the
/// match began.
#[derive(Debug, Clone, PartialEq)]
pub struct Out {
    mark: Mark,
    value: OutValue,
}

/// The closed set of output kinds. Consumers match exhaustively; there is
/// no dynamic payload.
#[derive(Debug, Clone, PartialEq)]
pub enum OutValue {
    /// A single consumed character.
    Char(char),
    /// An integer: the raw matched text (sign included for signed parses)
    /// alongside the parsed magnitude.
    Int { raw: String, value: i64 },
    /// A matched literal.
    Str(String),
    /// Ordered results of a composite combinator.
    List(Vec<Out>),
    /// A match that carries no data (whitespace runs, end-of-input,
    /// optional misses).
    Empty,
}

impl Out {
    pub fn new(mark: Mark, value: OutValue) -> Self {
        Self { mark, value }
    }

    /// The position where this node's match began.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn value(&self) -> &OutValue {
        &self.value
    }

    /// The kind name, for diagnostics and mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self.value {
            OutValue::Char(_) => "Char",
            OutValue::Int { .. } => "Int",
            OutValue::Str(_) => "Str",
            OutValue::List(_) => "List",
            OutValue::Empty => "Empty",
        }
    }

    pub fn is_empty_value(&self) -> bool {
        matches!(self.value, OutValue::Empty)
    }

    pub fn as_char(&self) -> Option<char> {
        match self.value {
            OutValue::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            OutValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Raw matched digit text of an integer node, sign included.
    pub fn raw_digits(&self) -> Option<&str> {
        match &self.value {
            OutValue::Int { raw, .. } => Some(raw),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.value {
            OutValue::Int { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.value {
            OutValue::Int { value, .. } => u64::try_from(value).ok(),
            _ => None,
        }
    }

    /// Length of a list node. `None` for non-list kinds.
    pub fn len(&self) -> Option<usize> {
        match &self.value {
            OutValue::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Indexed access into a list node.
    pub fn get(&self, index: usize) -> Option<&Out> {
        match &self.value {
            OutValue::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Iterate over a list node's items; empty iterator for other kinds.
    pub fn iter(&self) -> std::slice::Iter<'_, Out> {
        match &self.value {
            OutValue::List(items) => items.iter(),
            _ => [].iter(),
        }
    }

    /// Consume this node into its list items, if it is a list.
    pub fn into_list(self) -> Option<Vec<Out>> {
        match self.value {
            OutValue::List(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_origin(value: OutValue) -> Out {
        Out::new(Mark::default(), value)
    }

    #[test]
    fn leaf_accessors_are_kind_checked() {
        let c = at_origin(OutValue::Char('x'));
        assert_eq!(c.as_char(), Some('x'));
        assert_eq!(c.as_str(), None);
        assert_eq!(c.len(), None);

        let n = at_origin(OutValue::Int {
            raw: "-42".into(),
            value: -42,
        });
        assert_eq!(n.raw_digits(), Some("-42"));
        assert_eq!(n.as_i64(), Some(-42));
        assert_eq!(n.as_u64(), None);
    }

    #[test]
    fn list_access() {
        let items = vec![
            at_origin(OutValue::Char('a')),
            at_origin(OutValue::Empty),
        ];
        let list = at_origin(OutValue::List(items));
        assert_eq!(list.len(), Some(2));
        assert_eq!(list.get(0).and_then(Out::as_char), Some('a'));
        assert!(list.get(1).unwrap().is_empty_value());
        assert!(list.get(2).is_none());
        assert_eq!(list.iter().count(), 2);
    }
}
