const MIN: i64 = 1;
const MAX: i64 = 5;

/// A one-to-five satisfaction score
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Rating(u8);

impl Rating {
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(MIN..=MAX).contains(&value) {
            return Err(format!("Rating must be between {} and {}", MIN, MAX));
        }
        Ok(Self(value as u8))
    }
}
