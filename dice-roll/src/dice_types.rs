/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

use std::fmt;

/// Largest number of dice a single group may roll.
pub const MAX_QUANTITY: u32 = 99;
/// Largest number of faces a die may have.
pub const MAX_SIDES: u32 = 100;
/// Largest keep count accepted before clamping to the group quantity.
pub const MAX_KEEP: u32 = 999;
/// Largest number of dice an expression may roll across all groups.
pub const MAX_TOTAL_DICE: u32 = 100;

/// Which end of the sorted rolls a keep modifier selects.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Selector {
    /// `v`: keep the lowest dice
    Lower,
    /// `^`: keep the highest dice
    Higher,
}

impl Selector {
    pub fn symbol(&self) -> char {
        match self {
            Selector::Lower => 'v',
            Selector::Higher => '^',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Selector::Lower => "Lowest",
            Selector::Higher => "Highest",
        }
    }
}

/// `NdS`, optionally keeping only the `K` lowest (`NdSvK`) or highest (`NdS^K`) dice.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct DieGroup {
    quantity: u32,
    sides: u32,
    keep: Option<(Selector, u32)>,
}

impl DieGroup {
    /// Creates a die group. The keep count is clamped to `quantity`.
    ///
    /// # Panics
    /// Panics unless `quantity` is in `1..=MAX_QUANTITY` and `sides` in `1..=MAX_SIDES`.
    pub fn new(quantity: u32, sides: u32, keep: Option<(Selector, u32)>) -> DieGroup {
        assert!(quantity > 0, "die group without dice");
        assert!(quantity <= MAX_QUANTITY, "too many dice in group: {}", quantity);
        assert!(sides > 0, "die group with zero-sided dice");
        assert!(sides <= MAX_SIDES, "too many sides: {}", sides);
        DieGroup {
            quantity,
            sides,
            keep: keep.map(|(selector, count)| (selector, count.min(quantity))),
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn keep(&self) -> Option<(Selector, u32)> {
        self.keep
    }

    /// Number of dice contributing to the total.
    pub fn keep_count(&self) -> u32 {
        match self.keep {
            Some((_, count)) => count,
            None => self.quantity,
        }
    }

    /// Index range of the kept dice once the rolls are sorted ascending.
    pub(crate) fn kept_range(&self) -> std::ops::Range<usize> {
        let quantity = self.quantity as usize;
        match self.keep {
            Some((Selector::Lower, count)) => 0..count as usize,
            Some((Selector::Higher, count)) => (quantity - count as usize)..quantity,
            None => 0..quantity,
        }
    }

    /// Re-applies the keep rule to a set of faces rolled for this group, returning the
    /// kept faces in their original order.
    pub fn kept(&self, faces: &[i64]) -> Vec<i64> {
        let mut order: Vec<usize> = (0..faces.len()).collect();
        order.sort_by_key(|&i| faces[i]);
        let range = match self.keep {
            Some((Selector::Lower, count)) => 0..(count as usize).min(faces.len()),
            Some((Selector::Higher, count)) => {
                faces.len().saturating_sub(count as usize)..faces.len()
            }
            None => 0..faces.len(),
        };
        let mut kept_indices = order[range].to_vec();
        kept_indices.sort_unstable();
        kept_indices.into_iter().map(|i| faces[i]).collect()
    }
}

impl fmt::Display for DieGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.quantity, self.sides)?;
        if let Some((selector, count)) = self.keep {
            write!(f, "{}{}", selector.symbol(), count)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    Add,
    Sub,
}

impl Operator {
    pub fn apply(&self, left: i64, right: i64) -> i64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
        }
    }

    pub fn apply_f64(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Term {
    Literal(i64),
    Dice(DieGroup),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Literal(value) => write!(f, "{}", value),
            Term::Dice(dice) => write!(f, "{}", dice),
        }
    }
}

/// Why an expression could not be extended.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BuildError {
    ExpectedTerm,
    ExpectedOperator,
    TooManyDice,
}

/// Alternating sequence of terms and `+`/`-` operators, starting and ending on a term.
///
/// Expressions are built once (usually by the parser) and are read-only afterwards.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Expression {
    terms: Vec<Term>,
    operators: Vec<Operator>,
    dice_count: u32,
}

impl Expression {
    /// Starting point for incremental building; not evaluable until a term is pushed.
    pub(crate) fn empty() -> Expression {
        Expression {
            terms: Vec::new(),
            operators: Vec::new(),
            dice_count: 0,
        }
    }

    /// Creates an expression consisting of a single term.
    pub fn new(first: Term) -> Result<Expression, BuildError> {
        let mut expression = Expression::empty();
        expression.push_term(first)?;
        Ok(expression)
    }

    /// Appends an operator and the term it applies to.
    pub fn with(mut self, operator: Operator, term: Term) -> Result<Expression, BuildError> {
        self.push_operator(operator)?;
        self.push_term(term)?;
        Ok(self)
    }

    pub(crate) fn expects_term(&self) -> bool {
        self.terms.len() == self.operators.len()
    }

    pub(crate) fn push_term(&mut self, term: Term) -> Result<(), BuildError> {
        if !self.expects_term() {
            return Err(BuildError::ExpectedOperator);
        }
        if let Term::Dice(dice) = term {
            let dice_count = self.dice_count + dice.quantity();
            if dice_count > MAX_TOTAL_DICE {
                return Err(BuildError::TooManyDice);
            }
            self.dice_count = dice_count;
        }
        self.terms.push(term);
        Ok(())
    }

    pub(crate) fn push_operator(&mut self, operator: Operator) -> Result<(), BuildError> {
        if self.expects_term() {
            return Err(BuildError::ExpectedTerm);
        }
        self.operators.push(operator);
        Ok(())
    }

    /// A finished expression holds at least one term and does not end on an operator.
    pub fn is_complete(&self) -> bool {
        !self.terms.is_empty() && self.terms.len() == self.operators.len() + 1
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Total number of dice rolled by one evaluation.
    pub fn dice_count(&self) -> u32 {
        self.dice_count
    }

    /// Each term paired with the operator preceding it; the first term gets an implicit `Add`.
    ///
    /// # Panics
    /// Panics if the expression is incomplete.
    pub fn steps(&self) -> impl Iterator<Item = (Operator, &Term)> + '_ {
        assert!(
            self.is_complete(),
            "evaluating an incomplete expression: {} terms, {} operators",
            self.terms.len(),
            self.operators.len()
        );
        std::iter::once(Operator::Add)
            .chain(self.operators.iter().copied())
            .zip(self.terms.iter())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operators = self.operators.iter();
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                if let Some(operator) = operators.next() {
                    write!(f, " {} ", operator.symbol())?;
                }
            }
            write!(f, "{}", term)?;
        }
        if let Some(operator) = operators.next() {
            write!(f, " {}", operator.symbol())?;
        }
        Ok(())
    }
}
