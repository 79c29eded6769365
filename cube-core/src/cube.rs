/// Identifiers for the cube widgets laid out on a page
use std::fmt;

use crate::error::{CoreError, Result};

/// One of the three cube widgets, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeId(u8);

impl CubeId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    /// Every cube in layout order, left to right
    pub const ALL: [CubeId; 3] = [CubeId(1), CubeId(2), CubeId(3)];

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidCubeId(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in the widget row
    pub fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }
}

impl TryFrom<u8> for CubeId {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for CubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        for value in 1..=3 {
            let id = CubeId::new(value).unwrap();
            assert_eq!(id.get(), value);
            assert_eq!(id.index(), usize::from(value - 1));
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(CubeId::try_from(0), Err(CoreError::InvalidCubeId(0)));
        assert_eq!(CubeId::try_from(4), Err(CoreError::InvalidCubeId(4)));
    }

    #[test]
    fn test_all_is_ordered() {
        let values: Vec<u8> = CubeId::ALL.iter().map(|id| id.get()).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(CubeId::ALL[1].to_string(), "2");
    }
}
