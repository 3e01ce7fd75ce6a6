use std::fmt;

const MIN: i64 = 13;
const MAX: i64 = 120;

/// Respondent age in whole years
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Age(u8);

impl TryFrom<i64> for Age {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(MIN..=MAX).contains(&value) {
            return Err(format!("Age must be between {} and {}", MIN, MAX));
        }
        Ok(Self(value as u8))
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
