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

//! Expressions and die groups serialize as their canonical string and deserialize through the parser.

use crate::dice_types::{DieGroup, Expression};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, marker::PhantomData, str::FromStr};

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for DieGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct ParseVisitor<T>(PhantomData<T>);

impl<'de, T> de::Visitor<'de> for ParseVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a dice expression string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ParseVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for DieGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ParseVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::dice_types::{DieGroup, Expression, Selector};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Aliases {
        favourite: DieGroup,
        aliases: BTreeMap<String, Expression>,
    }

    #[test]
    fn test_toml_round_trip() {
        let source = r#"
favourite = "2d20^1"

[aliases]
fireball = "8d6"
stats = "4d6v3+ 0"
"#;
        let parsed: Aliases = toml::from_str(source).unwrap();
        assert_eq!(
            parsed.favourite,
            DieGroup::new(2, 20, Some((Selector::Higher, 1)))
        );
        assert_eq!(parsed.aliases["fireball"].to_string(), "8d6");
        assert_eq!(parsed.aliases["stats"].to_string(), "4d6v3 + 0");

        let written = toml::to_string(&parsed).unwrap();
        assert!(written.contains("stats = \"4d6v3 + 0\""));
        let reparsed: Aliases = toml::from_str(&written).unwrap();
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_invalid_expression_rejected() {
        let result: Result<Aliases, _> = toml::from_str(
            "favourite = \"1d6\"\n[aliases]\nbroken = \"5 +\"\n",
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("malformed dice expression"), "{}", err);
    }
}
