//! Prompt extraction from command arguments.

use std::fmt;

use crate::errors::EmptyPromptError;

/// A non-empty prompt ready to be sent to the image generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join argument tokens with single spaces, preserving order.
///
/// Fails when there are no tokens or the joined text is blank.
pub fn extract<I, S>(tokens: I) -> Result<Prompt, EmptyPromptError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = tokens
        .into_iter()
        .map(|t| t.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.trim().is_empty() {
        return Err(EmptyPromptError);
    }
    Ok(Prompt(joined))
}

/// Split the raw text following a command into argument tokens
pub fn tokenize(args: &str) -> Vec<&str> {
    args.split_whitespace().collect()
}
