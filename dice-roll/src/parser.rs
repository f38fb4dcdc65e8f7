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
    dice_types::{
        DieGroup, Expression, Operator, Selector, Term, MAX_KEEP, MAX_QUANTITY, MAX_SIDES,
    },
    error::{DiceError, MalformedReason},
};
use std::str::FromStr;

#[cfg(feature = "logging")]
use log::debug;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, one_of},
    combinator::{map, map_res, opt, verify},
    sequence::{pair, preceded, tuple},
    IResult,
};

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn parse_quantity(input: &str) -> IResult<&str, u32> {
    verify(
        map_res(take_while_m_n(1, 2, is_digit), |s: &str| s.parse::<u32>()),
        |quantity: &u32| (1..=MAX_QUANTITY).contains(quantity),
    )(input)
}

pub fn parse_sides(input: &str) -> IResult<&str, u32> {
    verify(
        alt((
            map(tag("100"), |_| 100),
            map_res(take_while_m_n(1, 2, is_digit), |s: &str| s.parse::<u32>()),
        )),
        |sides: &u32| (1..=MAX_SIDES).contains(sides),
    )(input)
}

pub fn parse_selector(input: &str) -> IResult<&str, Selector> {
    map(one_of("v^"), |c| match c {
        'v' => Selector::Lower,
        _ => Selector::Higher,
    })(input)
}

pub fn parse_keep(input: &str) -> IResult<&str, (Selector, u32)> {
    pair(
        parse_selector,
        verify(
            map_res(take_while_m_n(1, 3, is_digit), |s: &str| s.parse::<u32>()),
            |keep: &u32| *keep <= MAX_KEEP,
        ),
    )(input)
}

pub fn parse_die_group(input: &str) -> IResult<&str, DieGroup> {
    map(
        tuple((parse_quantity, preceded(char('d'), parse_sides), opt(parse_keep))),
        |(quantity, sides, keep)| DieGroup::new(quantity, sides, keep),
    )(input)
}

pub fn parse_literal(input: &str) -> IResult<&str, i64> {
    map_res(take_while_m_n(1, 3, is_digit), |s: &str| s.parse::<i64>())(input)
}

pub fn parse_term(input: &str) -> IResult<&str, Term> {
    alt((
        map(parse_die_group, Term::Dice),
        map(parse_literal, Term::Literal),
    ))(input)
}

pub fn parse_operator(input: &str) -> IResult<&str, Operator> {
    alt((
        map(char('+'), |_| Operator::Add),
        map(char('-'), |_| Operator::Sub),
    ))(input)
}

/// Parses a full expression, alternating between terms and operators from left to right.
pub fn parse_expression(input: &str) -> Result<Expression, DiceError> {
    let mut expression = Expression::empty();
    let mut rest = input.trim_start();
    while !rest.is_empty() {
        let position = input.len() - rest.len();
        if expression.expects_term() {
            let (remaining, term) = parse_term(rest).map_err(|_| {
                DiceError::malformed(position, MalformedReason::ExpectedTerm, expression.clone())
            })?;
            expression
                .push_term(term)
                .map_err(|err| DiceError::malformed(position, err, expression.clone()))?;
            rest = remaining;
        } else {
            let (remaining, operator) = parse_operator(rest).map_err(|_| {
                DiceError::malformed(position, MalformedReason::ExpectedOperator, expression.clone())
            })?;
            expression
                .push_operator(operator)
                .map_err(|err| DiceError::malformed(position, err, expression.clone()))?;
            rest = remaining;
        }
        rest = rest.trim_start();
    }

    if expression.terms().is_empty() {
        return Err(DiceError::malformed(
            input.len(),
            MalformedReason::Empty,
            expression,
        ));
    }
    if !expression.is_complete() {
        return Err(DiceError::malformed(
            input.len(),
            MalformedReason::DanglingOperator,
            expression,
        ));
    }

    #[cfg(feature = "logging")]
    {
        debug!("parsed {:?} as {}", input, &expression)
    }
    Ok(expression)
}

impl FromStr for Expression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

impl FromStr for DieGroup {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let offset = s.len() - s.trim_start().len();
        match parse_die_group(trimmed) {
            Ok(("", dice)) => Ok(dice),
            Ok((rest, _)) => Err(DiceError::malformed(
                offset + trimmed.len() - rest.len(),
                MalformedReason::ExpectedOperator,
                Expression::empty(),
            )),
            Err(_) => Err(DiceError::malformed(
                offset,
                if trimmed.is_empty() {
                    MalformedReason::Empty
                } else {
                    MalformedReason::ExpectedTerm
                },
                Expression::empty(),
            )),
        }
    }
}
