use crate::config::Mode;
use keep_dice::{DiceError, Expression};
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{multispace0, multispace1},
    combinator::{eof, map},
    sequence::{pair, terminated},
    IResult,
};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Roll(Mode, Expression),
    Stats(Expression),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Roll(Mode),
    Stats,
}

fn parse_help(input: &str) -> IResult<&str, &str> {
    terminated(
        alt((tag_no_case("help"), tag_no_case("h"))),
        pair(multispace0, eof),
    )(input)
}

fn parse_keyword(input: &str) -> IResult<&str, Keyword> {
    terminated(
        alt((
            map(alt((tag_no_case("roll"), tag_no_case("r"))), |_| {
                Keyword::Roll(Mode::Total)
            }),
            map(alt((tag_no_case("verbose"), tag_no_case("v"))), |_| {
                Keyword::Roll(Mode::Verbose)
            }),
            map(alt((tag_no_case("full"), tag_no_case("f"))), |_| {
                Keyword::Roll(Mode::Full)
            }),
            map(alt((tag_no_case("stats"), tag_no_case("s"))), |_| {
                Keyword::Stats
            }),
        )),
        multispace1,
    )(input)
}

fn expression(
    input: &str,
    aliases: &HashMap<String, Expression>,
) -> Result<Expression, DiceError> {
    match aliases.get(input.trim()) {
        Some(expr) => Ok(expr.clone()),
        None => input.parse(),
    }
}

/// Interprets one input line. Bare expressions and alias names are rolled in `default_mode`.
pub fn parse(
    line: &str,
    default_mode: Mode,
    aliases: &HashMap<String, Expression>,
) -> Result<Command, DiceError> {
    let line = line.trim();
    if parse_help(line).is_ok() {
        return Ok(Command::Help);
    }
    let command = match parse_keyword(line) {
        Ok((rest, Keyword::Roll(mode))) => Command::Roll(mode, expression(rest, aliases)?),
        Ok((rest, Keyword::Stats)) => Command::Stats(expression(rest, aliases)?),
        Err(_) => Command::Roll(default_mode, expression(line, aliases)?),
    };
    log::debug!("{:?}", &command);
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keep_dice::MalformedReason;

    fn aliases() -> HashMap<String, Expression> {
        let mut aliases = HashMap::new();
        aliases.insert("fireball".to_string(), "8d6".parse().unwrap());
        aliases
    }

    fn expr(s: &str) -> Expression {
        s.parse().unwrap()
    }

    #[test]
    fn test_help() {
        assert_eq!(parse("help", Mode::Total, &aliases()), Ok(Command::Help));
        assert_eq!(parse("  H ", Mode::Total, &aliases()), Ok(Command::Help));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            parse("roll 2d6 + 1", Mode::Full, &aliases()),
            Ok(Command::Roll(Mode::Total, expr("2d6+1")))
        );
        assert_eq!(
            parse("v 4d6v3", Mode::Total, &aliases()),
            Ok(Command::Roll(Mode::Verbose, expr("4d6v3")))
        );
        assert_eq!(
            parse("FULL 2d20^1", Mode::Total, &aliases()),
            Ok(Command::Roll(Mode::Full, expr("2d20^1")))
        );
        assert_eq!(
            parse("stats fireball", Mode::Total, &aliases()),
            Ok(Command::Stats(expr("8d6")))
        );
    }

    #[test]
    fn test_bare_expression_and_alias() {
        assert_eq!(
            parse("3d8 - 2", Mode::Verbose, &aliases()),
            Ok(Command::Roll(Mode::Verbose, expr("3d8-2")))
        );
        assert_eq!(
            parse(" fireball ", Mode::Total, &aliases()),
            Ok(Command::Roll(Mode::Total, expr("8d6")))
        );
    }

    #[test]
    fn test_invalid_expression() {
        let err = parse("roll 2d6 +", Mode::Total, &aliases()).unwrap_err();
        assert_eq!(err.reason(), MalformedReason::DanglingOperator);
        assert!(parse("meteor", Mode::Total, &aliases()).is_err());
        assert!(parse("", Mode::Total, &aliases()).is_err());
    }
}
