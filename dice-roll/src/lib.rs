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

//! Dice expressions like `4d6v2 + 2d20^1 - 3`: parsing, rolling, bounds and analytic
//! expected values.
//!
//! `NdS` rolls `N` dice with `S` sides, `NdSvK` keeps the `K` lowest of them and `NdS^K`
//! the `K` highest.

pub mod combinatorics;
#[cfg(feature = "roll")]
pub mod dice_roll;
pub mod dice_types;
pub mod error;
pub mod expectation;
pub mod limits;
#[cfg(feature = "parser")]
pub mod parser;
#[cfg(feature = "serde")]
mod serde_support;

#[cfg(feature = "roll")]
pub use dice_roll::DiceEvaluate;
pub use dice_types::{DieGroup, Expression, Operator, Selector, Term};
pub use error::{DiceError, MalformedReason};
pub use expectation::DiceExpectation;
pub use limits::DiceLimits;

/// Parses a dice expression.
///
/// ```
/// use keep_dice::parse;
///
/// let expression = parse("2d20^1 + 5")?;
/// assert_eq!(expression.get_min(), 6);
/// assert_eq!(expression.get_max(), 25);
/// assert!((expression.get_ev() - 18.825).abs() < 1e-9);
/// # Ok::<(), keep_dice::DiceError>(())
/// ```
#[cfg(feature = "parser")]
pub fn parse(input: &str) -> Result<Expression, DiceError> {
    parser::parse_expression(input)
}
