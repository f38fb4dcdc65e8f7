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

use crate::dice_types::*;
use rand::{distributions::Uniform, Rng};

#[cfg(feature = "logging")]
use log::debug;

pub trait DiceEvaluate {
    /// Rolls and returns the total of the kept dice.
    fn roll<R: Rng>(&self, rng: &mut R) -> i64;

    /// Rolls and returns the total of the kept dice together with every face in roll order.
    fn verbose_roll<R: Rng>(&self, rng: &mut R) -> (i64, Vec<i64>);
}

impl DieGroup {
    fn throw<R: Rng>(&self, rng: &mut R) -> Vec<i64> {
        let dist = Uniform::new_inclusive(1, i64::from(self.sides()));
        let mut rolls: Vec<i64> = Vec::with_capacity(self.quantity() as usize);
        for _ in 0..self.quantity() {
            rolls.push(rng.sample(dist));
        }

        #[cfg(feature = "logging")]
        {
            debug!("Dice roll result for {} is {:?}", &self, &rolls);
        }

        rolls
    }

    fn kept_sum(&self, mut rolls: Vec<i64>) -> i64 {
        rolls.sort_unstable();
        rolls[self.kept_range()].iter().sum()
    }
}

impl DiceEvaluate for DieGroup {
    fn roll<R: Rng>(&self, rng: &mut R) -> i64 {
        let rolls = self.throw(rng);
        self.kept_sum(rolls)
    }

    fn verbose_roll<R: Rng>(&self, rng: &mut R) -> (i64, Vec<i64>) {
        let rolls = self.throw(rng);
        (self.kept_sum(rolls.clone()), rolls)
    }
}

impl DiceEvaluate for Term {
    fn roll<R: Rng>(&self, rng: &mut R) -> i64 {
        match self {
            Term::Literal(value) => *value,
            Term::Dice(dice) => dice.roll(rng),
        }
    }

    fn verbose_roll<R: Rng>(&self, rng: &mut R) -> (i64, Vec<i64>) {
        match self {
            Term::Literal(value) => (*value, Vec::new()),
            Term::Dice(dice) => dice.verbose_roll(rng),
        }
    }
}

fn join(faces: &[i64], separator: &str) -> String {
    faces
        .iter()
        .map(|face| face.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

impl Expression {
    /// Rolls every term and folds the results left to right.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> i64 {
        let total = self
            .steps()
            .fold(0, |acc, (operator, term)| operator.apply(acc, term.roll(rng)));

        #[cfg(feature = "logging")]
        {
            debug!("got {} for expression {}", total, &self)
        }
        total
    }

    /// Like [`Expression::roll`], also describing each term on its own line.
    ///
    /// Dice render as `{quantity}d{sides}: [kept faces] -> {kept sum}`.
    pub fn verbose_roll<R: Rng>(&self, rng: &mut R) -> (i64, String) {
        let mut total = 0;
        let mut lines = Vec::with_capacity(self.terms().len());
        for (index, (operator, term)) in self.steps().enumerate() {
            let prefix = if index > 0 {
                format!("{} ", operator.symbol())
            } else {
                String::new()
            };
            let value = match term {
                Term::Literal(value) => {
                    lines.push(format!("{}{}", prefix, value));
                    *value
                }
                Term::Dice(dice) => {
                    let (value, faces) = dice.verbose_roll(rng);
                    lines.push(format!(
                        "{}{}d{}: [{}] -> {}",
                        prefix,
                        dice.quantity(),
                        dice.sides(),
                        join(&dice.kept(&faces), ", "),
                        value
                    ));
                    value
                }
            };
            total = operator.apply(total, value);
        }
        (total, lines.join("\n"))
    }

    /// Like [`Expression::verbose_roll`] but listing every rolled face, with an extra
    /// `Highest K (...)` / `Lowest K (...)` line for keep groups and a final `= {total}` line.
    pub fn full_verbose_roll<R: Rng>(&self, rng: &mut R) -> (i64, String) {
        let mut total = 0;
        let mut lines = Vec::with_capacity(self.terms().len() * 2 + 1);
        for (index, (operator, term)) in self.steps().enumerate() {
            let prefix = if index > 0 {
                format!("{} ", operator.symbol())
            } else {
                String::new()
            };
            let value = match term {
                Term::Literal(value) => {
                    lines.push(format!("{}{}", prefix, value));
                    *value
                }
                Term::Dice(dice) => {
                    let (value, faces) = dice.verbose_roll(rng);
                    let header = format!(
                        "{}{}d{}: [{}]",
                        prefix,
                        dice.quantity(),
                        dice.sides(),
                        join(&faces, ", ")
                    );
                    match dice.keep() {
                        Some((selector, count)) => {
                            lines.push(header);
                            lines.push(format!(
                                "  {} {} ({}) -> {}",
                                selector.name(),
                                count,
                                join(&dice.kept(&faces), ", "),
                                value
                            ));
                        }
                        None => lines.push(format!("{} -> {}", header, value)),
                    }
                    value
                }
            };
            total = operator.apply(total, value);
        }
        lines.push(format!("= {}", total));
        (total, lines.join("\n"))
    }
}
