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

use crate::dice_types::{BuildError, Expression};
use std::fmt;

/// Reason an input string was rejected.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MalformedReason {
    Empty,
    ExpectedTerm,
    ExpectedOperator,
    DanglingOperator,
    TooManyDice,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MalformedReason::Empty => "empty expression",
            MalformedReason::ExpectedTerm => "expected a dice group or a number",
            MalformedReason::ExpectedOperator => "expected '+' or '-'",
            MalformedReason::DanglingOperator => "operator without a following term",
            MalformedReason::TooManyDice => "more than 100 dice in total",
        })
    }
}

impl From<BuildError> for MalformedReason {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::ExpectedTerm => MalformedReason::ExpectedTerm,
            BuildError::ExpectedOperator => MalformedReason::ExpectedOperator,
            BuildError::TooManyDice => MalformedReason::TooManyDice,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum DiceError {
    /// The input is not a valid dice expression. `partial` holds everything parsed before
    /// the failure.
    #[error("malformed dice expression at position {position}: {reason} (parsed so far: \"{partial}\")")]
    Malformed {
        position: usize,
        reason: MalformedReason,
        partial: Expression,
    },
}

impl DiceError {
    pub fn malformed(position: usize, reason: impl Into<MalformedReason>, partial: Expression) -> Self {
        DiceError::Malformed {
            position,
            reason: reason.into(),
            partial,
        }
    }

    pub fn reason(&self) -> MalformedReason {
        match self {
            DiceError::Malformed { reason, .. } => *reason,
        }
    }
}
