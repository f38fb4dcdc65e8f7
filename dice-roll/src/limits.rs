use crate::dice_types::*;

/// Smallest and largest contribution a term can make to a total.
pub trait DiceLimits {
    fn low(&self) -> i64;
    fn high(&self) -> i64;
}

impl DiceLimits for DieGroup {
    fn low(&self) -> i64 {
        i64::from(self.keep_count())
    }

    fn high(&self) -> i64 {
        i64::from(self.keep_count()) * i64::from(self.sides())
    }
}

impl DiceLimits for Term {
    fn low(&self) -> i64 {
        match self {
            Term::Literal(value) => *value,
            Term::Dice(dice) => dice.low(),
        }
    }

    fn high(&self) -> i64 {
        match self {
            Term::Literal(value) => *value,
            Term::Dice(dice) => dice.high(),
        }
    }
}

impl Expression {
    /// Smallest possible total. Subtracted terms contribute their upper bound.
    pub fn get_min(&self) -> i64 {
        self.steps().fold(0, |acc, (operator, term)| match operator {
            Operator::Add => acc + term.low(),
            Operator::Sub => acc - term.high(),
        })
    }

    /// Largest possible total. Subtracted terms contribute their lower bound.
    pub fn get_max(&self) -> i64 {
        self.steps().fold(0, |acc, (operator, term)| match operator {
            Operator::Add => acc + term.high(),
            Operator::Sub => acc - term.low(),
        })
    }
}
