//! A typed, immutable-list construction kernel for building and printing
//! s-expressions.
//!
//! Lists are chains of [`ConsBox`] cells owned by an [`Arena`]; a [`ListRef`]
//! is a cheap `Copy` handle, so multiple logical lists can share a common
//! tail. The one intentional mutation point is [`Arena::append`], which
//! splices in place.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

pub mod error;
pub mod item;
mod render;

pub use error::{Error, Result};
pub use item::{Item, ItemKind};
pub use render::escape_string;

new_key_type! {
    /// A key identifying a [`ConsBox`] within an [`Arena`].
    pub struct CellKey;
}

/// A reference to a list: either the shared [`NIL`] sentinel or a cell in an
/// [`Arena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct ListRef(Option<CellKey>);

/// The empty list.
///
/// A single process-wide value shared by all lists and never mutated; it is
/// also the [`Default`] `ListRef`.
pub const NIL: ListRef = ListRef(None);

impl ListRef {
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    pub(crate) fn key(&self) -> Option<CellKey> {
        self.0
    }
}

/// An immutable singly-linked list node pairing one [`Item`] with the
/// remainder of the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsBox {
    item: Item,
    next: ListRef,
}

impl ConsBox {
    #[inline]
    pub fn item(&self) -> &Item {
        &self.item
    }

    #[inline]
    pub fn next(&self) -> ListRef {
        self.next
    }
}

/// Owns the cells of one or more lists.
///
/// All construction goes through the arena; cells become reclaimable when the
/// arena is dropped. `&mut` is required only at the two mutation points
/// ([`cons`](Self::cons) allocation and [`append`](Self::append) tail
/// splicing), so shared references are safe to read concurrently.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Arena {
    cells: SlotMap<CellKey, ConsBox>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of live cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn get(&self, key: CellKey) -> Result<&ConsBox> {
        self.cells.get(key).ok_or(Error::DanglingRef)
    }

    /// Allocates a new cell holding `item` and pointing at `rest`.
    ///
    /// Does not mutate `rest`.
    pub fn cons(&mut self, item: impl Into<Item>, rest: ListRef) -> ListRef {
        ListRef(Some(self.cells.insert(ConsBox {
            item: item.into(),
            next: rest,
        })))
    }

    /// Returns a copy of the item held by the first cell of `list`.
    ///
    /// Fails with [`Error::NilDereference`] on [`NIL`].
    pub fn car(&self, list: ListRef) -> Result<Item> {
        let key = list.key().ok_or(Error::NilDereference("car"))?;
        Ok(self.get(key)?.item.clone())
    }

    /// Returns the remainder of `list` past its first cell.
    ///
    /// Fails with [`Error::NilDereference`] on [`NIL`].
    pub fn cdr(&self, list: ListRef) -> Result<ListRef> {
        let key = list.key().ok_or(Error::NilDereference("cdr"))?;
        Ok(self.get(key)?.next)
    }

    /// Builds a nil-terminated chain of cells, one per item, equivalent to
    /// repeated [`cons`](Self::cons) calls right-to-left.
    ///
    /// An empty iterator yields [`NIL`].
    pub fn list<I, T>(&mut self, items: I) -> ListRef
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        let items: Vec<Item> = items.into_iter().map(Into::into).collect();
        let mut rest = NIL;
        for item in items.into_iter().rev() {
            rest = self.cons(item, rest);
        }
        rest
    }

    /// Splices `b` onto the end of `a` in place and returns `a`'s head.
    ///
    /// This is destructive: the last cell of `a` is mutated to point at `b`,
    /// and every list sharing `a`'s tail observes the new continuation.
    /// `append(NIL, b)` returns `b` unchanged.
    ///
    /// `b` must not be reachable from `a`; violating this creates a circular
    /// list. The violation is not repaired, but subsequent spine traversals
    /// (including this method) detect it and fail with
    /// [`Error::CyclicList`] rather than looping forever.
    pub fn append(&mut self, a: ListRef, b: ListRef) -> Result<ListRef> {
        let Some(head) = a.key() else {
            return Ok(b);
        };
        let mut key = head;
        let mut remaining = self.cells.len();
        loop {
            match self.get(key)?.next.key() {
                Some(next) => {
                    remaining = remaining.checked_sub(1).ok_or(Error::CyclicList)?;
                    key = next;
                }
                None => break,
            }
        }
        self.cells[key].next = b;
        Ok(a)
    }
}

/// Builds a list in `$arena` from the given items, converting each with
/// [`Item::from`]. With no items, yields [`NIL`].
#[macro_export]
macro_rules! list {
    ($arena:expr $(,)?) => {
        $crate::NIL
    };
    ($arena:expr, $($item:expr),+ $(,)?) => {
        $arena.list([$($crate::Item::from($item)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cons_car_cdr_round_trip() {
        let mut arena = Arena::new();
        let rest = arena.list([Item::Int(1)]);
        let cell = arena.cons(Item::token("x"), rest);
        assert_eq!(arena.car(cell).unwrap(), Item::token("x"));
        assert_eq!(arena.cdr(cell).unwrap(), rest);
    }

    #[test]
    fn car_cdr_of_nil_fail() {
        let arena = Arena::new();
        assert_eq!(arena.car(NIL).unwrap_err(), Error::NilDereference("car"));
        assert_eq!(arena.cdr(NIL).unwrap_err(), Error::NilDereference("cdr"));
    }

    #[test]
    fn list_walk_preserves_items_in_order() {
        let mut arena = Arena::new();
        let l = list![arena, Item::token("foo"), "bar", 1i64, 2.345];
        let mut kinds = Vec::new();
        let mut cur = l;
        while !cur.is_nil() {
            kinds.push(arena.car(cur).unwrap().kind());
            cur = arena.cdr(cur).unwrap();
        }
        assert_eq!(
            kinds,
            vec![ItemKind::Token, ItemKind::Str, ItemKind::Int, ItemKind::Float]
        );
    }

    #[test]
    fn empty_list_is_nil() {
        let mut arena = Arena::new();
        assert!(arena.list::<[Item; 0], Item>([]).is_nil());
        assert!(list![arena].is_nil());
    }

    #[test]
    fn append_concatenates() {
        let mut arena = Arena::new();
        let a = arena.list([Item::token("a")]);
        let bc = arena.list([Item::token("b"), Item::token("c")]);
        let joined = arena.append(a, bc).unwrap();
        assert_eq!(joined, a);

        let direct = list![arena, Item::token("a"), Item::token("b"), Item::token("c")];
        assert_eq!(
            arena.to_sexpr(joined).unwrap(),
            arena.to_sexpr(direct).unwrap()
        );
        assert_eq!(arena.to_sexpr(joined).unwrap(), "(a b c)");
    }

    #[test]
    fn append_to_nil_returns_b() {
        let mut arena = Arena::new();
        let b = arena.list([Item::Int(7)]);
        assert_eq!(arena.append(NIL, b).unwrap(), b);
    }

    #[test]
    fn append_mutates_shared_tail() {
        let mut arena = Arena::new();
        let t = arena.list([Item::token("x")]);
        let a = arena.cons(Item::token("y"), t);
        let b = arena.cons(Item::token("z"), t);

        let w = arena.list([Item::token("w")]);
        arena.append(a, w).unwrap();

        // Splicing is in place, so the list sharing `a`'s tail sees it too.
        assert_eq!(arena.to_sexpr(a).unwrap(), "(y x w)");
        assert_eq!(arena.to_sexpr(b).unwrap(), "(z x w)");
    }

    #[test]
    fn cyclic_list_is_detected() {
        let mut arena = Arena::new();
        let a = list![arena, 1i64, 2i64];
        // Violates the append precondition: `a` is reachable from itself.
        arena.append(a, a).unwrap();
        assert_eq!(arena.to_sexpr(a).unwrap_err(), Error::CyclicList);

        let b = arena.list([Item::Int(3)]);
        assert_eq!(arena.append(a, b).unwrap_err(), Error::CyclicList);
    }

    #[test]
    fn foreign_key_is_a_dangling_ref() {
        let mut arena = Arena::new();
        let l = arena.list([Item::Int(1)]);
        let other = Arena::new();
        assert_eq!(other.car(l).unwrap_err(), Error::DanglingRef);
    }
}
