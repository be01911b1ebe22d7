use thiserror::Error;

use crate::item::ItemKind;

/// An enumeration of s-expression construction and rendering errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Queried an [`Item`](crate::Item) as a kind it does not hold.
    #[error("wrong item kind: expected {expected}, found {found}")]
    WrongVariant {
        expected: ItemKind,
        found: ItemKind,
    },

    /// Called `car` or `cdr` on the empty list.
    #[error("cannot take `{0}` of the empty list")]
    NilDereference(&'static str),

    /// A [`ListRef`](crate::ListRef) does not resolve to a live cell in this arena.
    #[error("list reference does not belong to this arena")]
    DanglingRef,

    /// A list spine was longer than the arena's live cell count.
    #[error("list is cyclic")]
    CyclicList,
}

/// The s-expression `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
