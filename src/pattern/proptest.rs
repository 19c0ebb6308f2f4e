//! Random pattern trees over a small alphabet, for property testing.

use std::fmt;

use itertools::Itertools;
use proptest::prelude::*;

use super::{
    AnyPattern, Conditional, Consumption, Literal, NaryAlternatives, NaryConcatenation, Negated,
    Nesting, PatternExt, Repetition,
};

/// The elements patterns and hosts are made of.
pub const ALPHABET: u8 = 3;

/// A description of a pattern over `u8`, that can be printed and shrunk.
///
/// A generated pattern matches the empty range either everywhere or nowhere,
/// and every negated or nesting delimiter pattern is one element wide, so that
/// reversing a pattern does not change the set of ranges it matches.
#[derive(Clone, PartialEq, Eq)]
pub enum PatternTree {
    /// A fixed sequence of elements.
    Literal(Vec<u8>),
    /// Any element up to the given one.
    AtMost(u8),
    /// Any element but the given one.
    Not(u8),
    /// Alternatives, in order of preference.
    Or(Vec<PatternTree>),
    /// Concatenation of the components.
    Seq(Vec<PatternTree>),
    /// A repetition of `min..=max` times.
    Repeat {
        /// The repeated pattern.
        pattern: Box<PatternTree>,
        /// The minimum number of repetitions.
        min: usize,
        /// The maximum number of repetitions, if bounded.
        max: Option<usize>,
        /// Greedy or lazy.
        consumption: Consumption,
    },
    /// Balanced pairs of distinct delimiters.
    Nest(u8, u8),
}

impl PatternTree {
    /// Build the described pattern.
    pub fn to_pattern(&self) -> AnyPattern<u8> {
        match self {
            PatternTree::Literal(elements) => Literal::new(elements.iter().copied()).boxed(),
            &PatternTree::AtMost(max) => {
                Conditional::named(format!("<={max}"), move |&e: &u8| e <= max).boxed()
            }
            &PatternTree::Not(element) => Negated::new(Literal::new([element])).boxed(),
            PatternTree::Or(alternatives) => {
                NaryAlternatives::new(alternatives.iter().map(PatternTree::to_pattern)).boxed()
            }
            PatternTree::Seq(components) => {
                NaryConcatenation::new(components.iter().map(PatternTree::to_pattern)).boxed()
            }
            PatternTree::Repeat {
                pattern,
                min,
                max,
                consumption,
            } => {
                let pattern = pattern.to_pattern();
                match max {
                    Some(max) => Repetition::new(pattern, *min..=*max, *consumption).boxed(),
                    None => Repetition::new(pattern, *min.., *consumption).boxed(),
                }
            }
            &PatternTree::Nest(opening, closing) => {
                Nesting::new(Literal::new([opening]), Literal::new([closing])).boxed()
            }
        }
    }
}

impl fmt::Debug for PatternTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTree::Literal(elements) => write!(f, "{elements:?}"),
            PatternTree::AtMost(max) => write!(f, "<={max}"),
            PatternTree::Not(element) => write!(f, "![{element}]"),
            PatternTree::Or(alternatives) => write!(f, "({:?})", alternatives.iter().format(" | ")),
            PatternTree::Seq(components) => write!(f, "({:?})", components.iter().format(" ")),
            PatternTree::Repeat {
                pattern,
                min,
                max,
                consumption,
            } => {
                write!(f, "{pattern:?}{{{min},")?;
                if let Some(max) = max {
                    write!(f, "{max}")?;
                }
                write!(f, "}}")?;
                if *consumption == Consumption::Lazy {
                    write!(f, "?")?;
                }
                Ok(())
            }
            PatternTree::Nest(opening, closing) => write!(f, "nest({opening}, {closing})"),
        }
    }
}

prop_compose! {
    fn arb_repeat(inner: BoxedStrategy<PatternTree>)(
        pattern in inner,
        min in 0..3usize,
        extra in prop::option::of(0..3usize),
        lazy in any::<bool>(),
    ) -> PatternTree {
        PatternTree::Repeat {
            pattern: Box::new(pattern),
            min,
            max: extra.map(|extra| min + extra),
            consumption: if lazy { Consumption::Lazy } else { Consumption::Greedy },
        }
    }
}

fn arb_leaf() -> impl Strategy<Value = PatternTree> {
    prop_oneof![
        prop::collection::vec(0..ALPHABET, 0..3).prop_map(PatternTree::Literal),
        (0..ALPHABET).prop_map(PatternTree::AtMost),
        (0..ALPHABET).prop_map(PatternTree::Not),
        (0..ALPHABET, 0..ALPHABET)
            .prop_filter("delimiters must differ", |(o, c)| o != c)
            .prop_map(|(o, c)| PatternTree::Nest(o, c)),
    ]
}

impl Arbitrary for PatternTree {
    type Parameters = ();
    type Strategy = BoxedStrategy<PatternTree>;

    fn arbitrary_with(_: ()) -> Self::Strategy {
        arb_leaf()
            .prop_recursive(3, 12, 2, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 1..3).prop_map(PatternTree::Or),
                    prop::collection::vec(inner.clone(), 1..3).prop_map(PatternTree::Seq),
                    arb_repeat(inner),
                ]
            })
            .boxed()
    }
}

/// A random host over the pattern alphabet.
pub fn arb_host(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0..ALPHABET, 0..=max_len)
}
