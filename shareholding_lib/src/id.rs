//! Parsing of resource ids coming from user input or routing.

use std::fmt;

/// A resource id after validation.
///
/// Views accept ids as strings or integers and parse them once, here.
/// An `Invalid` id disables the view instead of producing an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceId {
    Valid(i64),
    Invalid,
}

impl ResourceId {
    /// Parses a decimal id. Surrounding whitespace is ignored; anything else
    /// that is not a positive integer is `Invalid`.
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(id) => Self::from_number(id),
            Err(_) => Self::Invalid,
        }
    }

    pub fn from_number(id: i64) -> Self {
        if id > 0 {
            Self::Valid(id)
        } else {
            Self::Invalid
        }
    }

    pub fn get(self) -> Option<i64> {
        match self {
            Self::Valid(id) => Some(id),
            Self::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(id) => write!(f, "{}", id),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&String> for ResourceId {
    fn from(s: &String) -> Self {
        Self::parse(s)
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::from_number(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self::from_number(id.into())
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self::from_number(id.into())
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        i64::try_from(id).map_or(Self::Invalid, Self::from_number)
    }
}

impl<X: Into<ResourceId>> From<Option<X>> for ResourceId {
    fn from(id: Option<X>) -> Self {
        id.map_or(Self::Invalid, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_integers() {
        assert_eq!(ResourceId::parse("42"), ResourceId::Valid(42));
        assert_eq!(ResourceId::parse(" 7 "), ResourceId::Valid(7));
        assert_eq!(ResourceId::from(42i64), ResourceId::Valid(42));
        assert_eq!(ResourceId::from(3u32).get(), Some(3));
    }

    #[test]
    fn rejects_everything_else() {
        for input in ["", "abc", "12abc", "-1", "0", "1.5", "NaN"] {
            assert_eq!(ResourceId::parse(input), ResourceId::Invalid, "{input}");
        }
        assert_eq!(ResourceId::from(0i64), ResourceId::Invalid);
        assert_eq!(ResourceId::from(u64::MAX), ResourceId::Invalid);
        assert!(!ResourceId::Invalid.is_valid());
        assert_eq!(ResourceId::Invalid.get(), None);
    }

    #[test]
    fn optional_inputs() {
        assert_eq!(ResourceId::from(None::<&str>), ResourceId::Invalid);
        assert_eq!(ResourceId::from(Some("5")), ResourceId::Valid(5));
        assert_eq!(ResourceId::from(Some(9i64)), ResourceId::Valid(9));
    }
}
