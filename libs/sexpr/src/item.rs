//! The tagged value held by one list cell.

use std::fmt::Display;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ListRef;

/// A single tagged value held by one list cell.
///
/// [`Token`](Item::Token) and [`Str`](Item::Str) differ only in rendering:
/// tokens print bare, strings print quoted and escaped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Item {
    /// Nothing; renders as empty.
    #[default]
    Nil,
    /// A bare symbolic name.
    Token(ArcStr),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Quoted text.
    Str(ArcStr),
    /// A nested list, possibly [`NIL`](crate::NIL).
    List(ListRef),
}

/// Identifies the active variant of an [`Item`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Nil,
    Token,
    Int,
    Float,
    Bool,
    Str,
    List,
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match *self {
            Self::Nil => "nil",
            Self::Token => "token",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Bool => "boolean",
            Self::Str => "string",
            Self::List => "list",
        };
        write!(f, "{name}")
    }
}

impl Item {
    /// Creates a bare-token item.
    #[inline]
    pub fn token(value: impl Into<ArcStr>) -> Self {
        Self::Token(value.into())
    }

    /// Returns the kind of the active variant.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Nil => ItemKind::Nil,
            Self::Token(_) => ItemKind::Token,
            Self::Int(_) => ItemKind::Int,
            Self::Float(_) => ItemKind::Float,
            Self::Bool(_) => ItemKind::Bool,
            Self::Str(_) => ItemKind::Str,
            Self::List(_) => ItemKind::List,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    fn wrong_variant(&self, expected: ItemKind) -> Error {
        Error::WrongVariant {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_token(&self) -> Result<&ArcStr> {
        match self {
            Self::Token(t) => Ok(t),
            other => Err(other.wrong_variant(ItemKind::Token)),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(other.wrong_variant(ItemKind::Int)),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            Self::Float(v) => Ok(*v),
            other => Err(other.wrong_variant(ItemKind::Float)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            other => Err(other.wrong_variant(ItemKind::Bool)),
        }
    }

    pub fn as_str(&self) -> Result<&ArcStr> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(other.wrong_variant(ItemKind::Str)),
        }
    }

    pub fn as_list(&self) -> Result<ListRef> {
        match self {
            Self::List(l) => Ok(*l),
            other => Err(other.wrong_variant(ItemKind::List)),
        }
    }
}

impl From<i64> for Item {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Item {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Item {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<ArcStr> for Item {
    fn from(value: ArcStr) -> Self {
        Self::Str(value)
    }
}

impl From<&ArcStr> for Item {
    fn from(value: &ArcStr) -> Self {
        Self::Str(value.clone())
    }
}

impl From<ListRef> for Item {
    fn from(value: ListRef) -> Self {
        Self::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NIL;

    #[test]
    fn kind_tracks_active_variant() {
        assert_eq!(Item::Nil.kind(), ItemKind::Nil);
        assert_eq!(Item::token("foo").kind(), ItemKind::Token);
        assert_eq!(Item::from(1i64).kind(), ItemKind::Int);
        assert_eq!(Item::from(1.5).kind(), ItemKind::Float);
        assert_eq!(Item::from(true).kind(), ItemKind::Bool);
        assert_eq!(Item::from("bar").kind(), ItemKind::Str);
        assert_eq!(Item::from(NIL).kind(), ItemKind::List);
    }

    #[test]
    fn typed_accessors() {
        assert_eq!(Item::from(42i64).as_int().unwrap(), 42);
        assert_eq!(Item::from(true).as_bool().unwrap(), true);
        assert_eq!(Item::token("foo").as_token().unwrap(), "foo");
        assert_eq!(Item::from("bar").as_str().unwrap(), "bar");
        assert!(Item::from(NIL).as_list().unwrap().is_nil());
    }

    #[test]
    fn wrong_variant_access_is_a_typed_error() {
        let err = Item::token("foo").as_int().unwrap_err();
        assert_eq!(
            err,
            Error::WrongVariant {
                expected: ItemKind::Int,
                found: ItemKind::Token,
            }
        );

        let err = Item::from(2.5).as_str().unwrap_err();
        assert_eq!(
            err,
            Error::WrongVariant {
                expected: ItemKind::Str,
                found: ItemKind::Float,
            }
        );
    }
}
