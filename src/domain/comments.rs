use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

const MAX_LEN: usize = 1000;

/// Free-form respondent comments, trimmed of surrounding whitespace before
/// the length check
#[derive(Debug, PartialEq, Clone)]
pub struct Comments(String);

impl FromStr for Comments {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.graphemes(true).count() > MAX_LEN {
            return Err("Comments too long".into());
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for Comments {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
