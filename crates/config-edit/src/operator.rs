//! Operator token parsing.

use crate::config::OperatorTokens;
use crate::types::EditOperation;

/// Ordered table of operator tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTable {
    tokens: Vec<(String, EditOperation)>,
}

impl OperatorTable {
    pub fn new(tokens: &OperatorTokens) -> Self {
        OperatorTable {
            tokens: vec![
                (tokens.insert.clone(), EditOperation::Insert),
                (tokens.remove.clone(), EditOperation::Remove),
                (tokens.default_value.clone(), EditOperation::DefaultValue),
            ],
        }
    }

    /// Split a raw value into its operation and the cleaned value.
    ///
    /// The first token that is a suffix of `raw` wins; it is stripped and
    /// trailing whitespace trimmed. Tokens elsewhere in the value are kept
    /// as written, so `a!+b !+` inserts `a!+b`. Without a token the
    /// operation is [`EditOperation::Overwrite`] and the value is returned
    /// untouched.
    ///
    /// ```
    /// use config_edit::{EditOperation, OperatorTable};
    ///
    /// let table = OperatorTable::default();
    /// assert_eq!(table.parse("alpha !+"), (EditOperation::Insert, "alpha"));
    /// assert_eq!(table.parse("!d"), (EditOperation::DefaultValue, ""));
    /// assert_eq!(table.parse(" 5 "), (EditOperation::Overwrite, " 5 "));
    /// assert_eq!(table.parse("a!+b !+"), (EditOperation::Insert, "a!+b"));
    /// ```
    pub fn parse<'v>(&self, raw: &'v str) -> (EditOperation, &'v str) {
        for (token, op) in &self.tokens {
            if let Some(value) = raw.strip_suffix(token.as_str()) {
                return (*op, value.trim_end());
            }
        }
        (EditOperation::Overwrite, raw)
    }

    /// The token selecting `op`, empty for [`EditOperation::Overwrite`].
    pub fn token(&self, op: EditOperation) -> &str {
        self.tokens
            .iter()
            .find(|(_, o)| *o == op)
            .map(|(t, _)| t.as_str())
            .unwrap_or("")
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        OperatorTable::new(&OperatorTokens::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_token() {
        let table = OperatorTable::default();
        assert_eq!(table.parse("x!+"), (EditOperation::Insert, "x"));
        assert_eq!(table.parse("x!-"), (EditOperation::Remove, "x"));
        assert_eq!(table.parse("!Tag!d"), (EditOperation::DefaultValue, "!Tag"));
        assert_eq!(table.parse("x"), (EditOperation::Overwrite, "x"));
        assert_eq!(table.parse(""), (EditOperation::Overwrite, ""));
    }

    #[test]
    fn test_only_trailing_token_is_stripped() {
        let table = OperatorTable::default();
        assert_eq!(table.parse("a!+b!+"), (EditOperation::Insert, "a!+b"));
        assert_eq!(table.parse("!+x"), (EditOperation::Overwrite, "!+x"));
    }

    #[test]
    fn test_custom_tokens() {
        let table = OperatorTable::new(&OperatorTokens {
            insert: "+=".into(),
            ..OperatorTokens::default()
        });
        assert_eq!(table.parse("v +="), (EditOperation::Insert, "v"));
        assert_eq!(table.token(EditOperation::Insert), "+=");
        assert_eq!(table.token(EditOperation::Overwrite), "");
    }
}
