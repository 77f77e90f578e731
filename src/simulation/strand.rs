//! Strands and the arena that owns them.
//!
//! A [`Strand`] is one candidate assignment: a token per variable. Strands are
//! created once by the population generator and never mutated. They live in a
//! [`StrandPool`]; a population is a list of [`StrandId`] handles into it, so
//! amplification copies handles rather than token sequences.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::literal::Variable;
use crate::simulation::token::Token;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// Token storage for one strand. Sixteen inline slots cover every exhaustive run.
pub type Tokens = SmallVec<[Token; 16]>;

/// A population: handles into a [`StrandPool`], duplicates allowed.
pub type Population = Vec<StrandId>;

/// Creation-time identity of a strand, equal to its slot in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrandId(u32);

impl StrandId {
    /// The slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for StrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One candidate assignment.
///
/// Equality and hashing look at the token sequence only; two strands with
/// different ids but the same tokens are the same assignment.
#[derive(Debug, Clone)]
pub struct Strand {
    id: StrandId,
    tokens: Tokens,
}

impl Strand {
    /// The creation-time identity.
    #[must_use]
    pub const fn id(&self) -> StrandId {
        self.id
    }

    /// The token sequence, one per variable.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// `true` for a strand over zero variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at a 1-based variable.
    ///
    /// # Panics
    ///
    /// If `var` is zero or beyond the strand.
    #[must_use]
    pub fn token(&self, var: Variable) -> Token {
        self.tokens[var as usize - 1]
    }

    /// `true` if at least one literal of `clause` finds its token on this strand.
    ///
    /// # Panics
    ///
    /// If a literal names a variable beyond the strand. A validated
    /// [`Cnf`](crate::sat::cnf::Cnf) rules this out.
    #[must_use]
    pub fn satisfies(&self, clause: &Clause) -> bool {
        clause
            .iter()
            .any(|&lit| self.tokens[lit.index()] == Token::from_literal(lit))
    }

    /// Reads the strand back as an assignment.
    #[must_use]
    pub fn to_assignment(&self) -> Assignment {
        Assignment::new(self.tokens.iter().map(|t| t.polarity()).collect())
    }
}

impl PartialEq for Strand {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for Strand {}

impl Hash for Strand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.hash(state);
    }
}

/// Renders as `v1|!v2|v3`.
impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().join("|"))
    }
}

/// Owns every strand created during one run.
#[derive(Debug, Clone, Default)]
pub struct StrandPool {
    num_vars: usize,
    strands: Vec<Strand>,
}

impl StrandPool {
    /// An empty pool for strands over `num_vars` variables.
    #[must_use]
    pub fn with_capacity(num_vars: usize, capacity: usize) -> Self {
        Self {
            num_vars,
            strands: Vec::with_capacity(capacity),
        }
    }

    /// Stores a new strand and returns its handle.
    ///
    /// # Panics
    ///
    /// If the token count differs from the pool's variable count, or the pool
    /// already holds `u32::MAX` strands.
    pub fn push(&mut self, tokens: Tokens) -> StrandId {
        assert_eq!(
            tokens.len(),
            self.num_vars,
            "strand length must equal the variable count"
        );
        let id = StrandId(u32::try_from(self.strands.len()).expect("strand pool overflowed"));
        self.strands.push(Strand { id, tokens });
        id
    }

    /// Variable count every strand in the pool shares.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of strands created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    /// `true` if no strand was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    /// The strand behind a handle, if it exists.
    #[must_use]
    pub fn get(&self, id: StrandId) -> Option<&Strand> {
        self.strands.get(id.index())
    }

    /// Handles of every strand in creation order: the initial population.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = StrandId> + ExactSizeIterator + '_ {
        self.strands.iter().map(Strand::id)
    }

    /// Iterates over the strands in creation order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Strand> {
        self.strands.iter()
    }
}

impl Index<StrandId> for StrandPool {
    type Output = Strand;

    fn index(&self, id: StrandId) -> &Self::Output {
        &self.strands[id.index()]
    }
}
