#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Token encoding for strands.
//!
//! Each variable has two tokens, one per polarity. A strand is the sequence of
//! the tokens it carries, one per variable. Tokens are packed as
//! `variable << 1 | negated`, so every `(variable, polarity)` pair has its own
//! value and equality is a single integer compare.

use crate::sat::literal::{Literal, Variable};
use std::fmt::{self, Debug, Display};

/// The canonical token for one `(variable, polarity)` pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Token(u32);

impl Token {
    /// Encodes a 1-based variable with the given negation.
    #[must_use]
    pub fn encode(var: Variable, negated: bool) -> Self {
        debug_assert!(var >= 1 && var <= Literal::MAX_VARIABLE);
        Self((var << 1) | u32::from(negated))
    }

    /// The token a literal requires at its variable's position.
    #[must_use]
    pub fn from_literal(lit: Literal) -> Self {
        Self::encode(lit.variable(), lit.is_negated())
    }

    /// The 1-based variable this token belongs to.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0 >> 1
    }

    /// `true` for the negative token.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        self.0 & 1 != 0
    }

    /// The boolean value this token asserts.
    #[must_use]
    pub const fn polarity(self) -> bool {
        !self.is_negated()
    }
}

/// Renders as `v3` or `!v3`.
impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            write!(f, "!v{}", self.variable())
        } else {
            write!(f, "v{}", self.variable())
        }
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({self})")
    }
}

/// The two tokens of one variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPair {
    /// Token asserting the variable true.
    pub positive: Token,
    /// Token asserting the variable false.
    pub negative: Token,
}

impl TokenPair {
    /// Picks the token for `polarity`.
    #[must_use]
    pub const fn select(self, polarity: bool) -> Token {
        if polarity { self.positive } else { self.negative }
    }
}

/// Per-variable token pairs for variables `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTable(Vec<TokenPair>);

impl TokenTable {
    /// Builds the table for `num_vars` variables.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(num_vars: usize) -> Self {
        debug_assert!(num_vars <= Literal::MAX_VARIABLE as usize);
        let pairs = (1..=num_vars as Variable)
            .map(|var| TokenPair {
                positive: Token::encode(var, false),
                negative: Token::encode(var, true),
            })
            .collect();
        Self(pairs)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for a table with no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The pair for a 1-based variable.
    ///
    /// # Panics
    ///
    /// If `var` is zero or beyond the table.
    #[must_use]
    pub fn pair(&self, var: Variable) -> TokenPair {
        self.0[var as usize - 1]
    }

    /// Iterates over the pairs in variable order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TokenPair> {
        self.0.iter()
    }
}
