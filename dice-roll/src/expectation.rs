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

use crate::{
    combinatorics::{expected_keep_highest, expected_keep_lowest},
    dice_types::*,
};

/// Analytic expected value, computed without simulation.
pub trait DiceExpectation {
    fn expected_value(&self) -> f64;
}

impl DiceExpectation for DieGroup {
    fn expected_value(&self) -> f64 {
        let (quantity, sides) = (self.quantity(), self.sides());
        match self.keep() {
            Some((selector, count)) if count < quantity => match selector {
                Selector::Higher => expected_keep_highest(quantity, sides, count),
                Selector::Lower => expected_keep_lowest(quantity, sides, count),
            },
            _ => f64::from(quantity) * f64::from(sides + 1) / 2.0,
        }
    }
}

impl DiceExpectation for Term {
    fn expected_value(&self) -> f64 {
        match self {
            Term::Literal(value) => *value as f64,
            Term::Dice(dice) => dice.expected_value(),
        }
    }
}

impl Expression {
    /// Expected total, folding each term's expected value with its operator.
    ///
    /// Terms are treated independently. This is exact for sums and differences of
    /// independent groups and an accepted approximation otherwise.
    pub fn get_ev(&self) -> f64 {
        self.steps().fold(0.0, |acc, (operator, term)| {
            operator.apply_f64(acc, term.expected_value())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_plain_group() {
        assert!(close(DieGroup::new(2, 6, None).expected_value(), 7.0));
        assert!(close(DieGroup::new(1, 20, None).expected_value(), 10.5));
        assert!(close(DieGroup::new(3, 1, None).expected_value(), 3.0));
    }

    #[test]
    fn test_keep_groups() {
        let advantage = DieGroup::new(2, 20, Some((Selector::Higher, 1)));
        assert!(close(advantage.expected_value(), 13.825));
        let disadvantage = DieGroup::new(2, 20, Some((Selector::Lower, 1)));
        assert!(close(disadvantage.expected_value(), 7.175));
        let clamped = DieGroup::new(3, 6, Some((Selector::Lower, 10)));
        assert!(close(clamped.expected_value(), 10.5));
    }

    #[test]
    fn test_largest_groups() {
        let highest = DieGroup::new(MAX_QUANTITY, MAX_SIDES, Some((Selector::Higher, 1)));
        let ev = highest.expected_value();
        assert!(ev.is_finite() && 99.0 < ev && ev < 100.0, "{}", ev);
        let lowest = DieGroup::new(MAX_QUANTITY, MAX_SIDES, Some((Selector::Lower, 1)));
        let ev = lowest.expected_value();
        assert!(ev.is_finite() && 1.0 < ev && ev < 2.0, "{}", ev);
    }

    #[cfg(feature = "parser")]
    #[test]
    fn test_expression_ev() {
        let ev = |input: &str| input.parse::<Expression>().unwrap().get_ev();
        assert!(close(ev("2d6"), 7.0));
        assert!(close(ev("4d6 + 2"), 16.0));
        assert!(close(ev("2d20^1 - 1d4"), 11.325));
        assert!(close(ev("10 - 3"), 7.0));
        assert!(close(ev("4d6v3 + 4d6^3"), 21.0));
    }

    #[cfg(feature = "parser")]
    #[test]
    fn test_ev_between_bounds() {
        for quantity in 2..=6 {
            for sides in 2..=12 {
                for keep in 1..quantity {
                    for symbol in ['v', '^'] {
                        let expression: Expression =
                            format!("{}d{}{}{}", quantity, sides, symbol, keep)
                                .parse()
                                .unwrap();
                        let ev = expression.get_ev();
                        assert!(ev > expression.get_min() as f64, "{}", expression);
                        assert!(ev < expression.get_max() as f64, "{}", expression);
                    }
                }
            }
        }
    }
}
