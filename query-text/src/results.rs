use common::error::AppError;

/// One line of entity-detection output, borrowed from the raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine<'a> {
    pub id: &'a str,
    pub tokens: Vec<&'a str>,
    pub tags: Vec<&'a str>,
}

impl<'a> TaggedLine<'a> {
    /// Splits `id <delim> tokens <delim> tags`. Anything other than exactly
    /// three parts is a format error.
    pub fn parse(line: &'a str, delimiter: &str, line_number: usize) -> Result<Self, AppError> {
        let items: Vec<&str> = line.trim().split(delimiter).collect();
        let &[id, tokens, tags] = items.as_slice() else {
            return Err(AppError::Format {
                line_number,
                raw_line: line.to_string(),
            });
        };

        Ok(Self {
            id: id.trim(),
            tokens: tokens.split_whitespace().collect(),
            tags: tags.split_whitespace().collect(),
        })
    }

    /// Tokens tagged `entity_tag`, joined by single spaces in input order.
    /// Pairing stops at the shorter of the two sequences.
    pub fn query_text(&self, entity_tag: &str) -> String {
        self.tokens
            .iter()
            .zip(&self.tags)
            .filter(|(_, tag)| **tag == entity_tag)
            .map(|(token, _)| *token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
