//! @acp:module "Template Tokens"
//! @acp:summary "Named-token substitution over a fixed whitelist"
//! @acp:domain diagnosis
//! @acp:layer logic

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `{TOKEN}` placeholders: uppercase ASCII, digits and underscores
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Z][A-Z0-9_]*)\}").unwrap());

/// Tokens the renderer knows how to fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Expert,
    Product,
    CodeWord,
    Bottleneck,
    Perceived,
    Complaint,
}

impl Token {
    pub const ALL: [Token; 6] = [
        Token::Expert,
        Token::Product,
        Token::CodeWord,
        Token::Bottleneck,
        Token::Perceived,
        Token::Complaint,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Token::Expert => "EXPERT",
            Token::Product => "PRODUCT",
            Token::CodeWord => "CODE_WORD",
            Token::Bottleneck => "BOTTLENECK",
            Token::Perceived => "PERCEIVED",
            Token::Complaint => "COMPLAINT",
        }
    }

    pub fn from_name(name: &str) -> Option<Token> {
        Token::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// Values for known tokens. Unset tokens render as empty.
#[derive(Debug, Clone, Default)]
pub struct TokenValues<'a> {
    values: Vec<(Token, &'a str)>,
}

impl<'a> TokenValues<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, token: Token, value: &'a str) -> Self {
        self.values.retain(|(t, _)| *t != token);
        self.values.push((token, value));
        self
    }

    pub fn get(&self, token: Token) -> &'a str {
        self.values
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, v)| *v)
            .unwrap_or("")
    }
}

/// Replace known tokens in one pass; unknown tokens stay verbatim.
///
/// Substituted values are not rescanned, so a value containing `{EXPERT}`
/// is emitted as-is.
pub fn substitute(template: &str, values: &TokenValues<'_>) -> String {
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures<'_>| match Token::from_name(&caps[1]) {
            Some(token) => values.get(token).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Token names in a template that the renderer does not recognise
pub fn unknown_tokens(template: &str) -> Vec<String> {
    TOKEN_PATTERN
        .captures_iter(template)
        .filter(|caps| Token::from_name(&caps[1]).is_none())
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tokens_replaced() {
        let values = TokenValues::new()
            .set(Token::Expert, "Anna")
            .set(Token::Bottleneck, "Sales");
        assert_eq!(
            substitute("{EXPERT} says: fix {BOTTLENECK}.", &values),
            "Anna says: fix Sales."
        );
    }

    #[test]
    fn test_empty_known_token_does_not_leak() {
        let values = TokenValues::new().set(Token::Bottleneck, "Sales");
        assert_eq!(substitute("You said{COMPLAINT}. {BOTTLENECK}", &values), "You said. Sales");
    }

    #[test]
    fn test_unknown_token_left_verbatim() {
        let values = TokenValues::new().set(Token::Expert, "Anna");
        assert_eq!(
            substitute("{EXPERT} {DEADLINE} {lower} {", &values),
            "Anna {DEADLINE} {lower} {"
        );
    }

    #[test]
    fn test_values_not_rescanned() {
        let values = TokenValues::new().set(Token::Product, "{EXPERT}");
        assert_eq!(substitute("{PRODUCT}", &values), "{EXPERT}");
    }

    #[test]
    fn test_set_overwrites() {
        let values = TokenValues::new()
            .set(Token::Expert, "Anna")
            .set(Token::Expert, "Boris");
        assert_eq!(values.get(Token::Expert), "Boris");
    }

    #[test]
    fn test_unknown_tokens_listed() {
        assert_eq!(
            unknown_tokens("{EXPERT} {DEADLINE} {CODE_WORD} {PROMO_1}"),
            vec!["DEADLINE".to_string(), "PROMO_1".to_string()]
        );
    }
}
