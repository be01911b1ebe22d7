//! Textual rendering of lists as parenthesized s-expressions.

use crate::error::{Error, Result};
use crate::item::Item;
use crate::{Arena, ListRef};

impl Arena {
    /// Renders `list` as `"("` + the space-separated items + `")"`, recursing
    /// through nested lists.
    ///
    /// [`Item::Nil`] and references to the empty list emit nothing for their
    /// slot. Fails with [`Error::CyclicList`] on circular input instead of
    /// looping forever.
    pub fn to_sexpr(&self, list: ListRef) -> Result<String> {
        let mut out = String::new();
        self.render_list(list, &mut out)?;
        Ok(out)
    }

    fn render_list(&self, list: ListRef, out: &mut String) -> Result<()> {
        out.push('(');
        let mut cur = list;
        let mut remaining = self.len();
        let mut first = true;
        while let Some(key) = cur.key() {
            remaining = remaining.checked_sub(1).ok_or(Error::CyclicList)?;
            let cell = self.get(key)?;
            let mut rendered = String::new();
            self.render_item(cell.item(), &mut rendered)?;
            if !rendered.is_empty() {
                if !first {
                    out.push(' ');
                }
                out.push_str(&rendered);
                first = false;
            }
            cur = cell.next();
        }
        out.push(')');
        Ok(())
    }

    fn render_item(&self, item: &Item, out: &mut String) -> Result<()> {
        match item {
            Item::Nil => {}
            Item::Token(t) => out.push_str(t),
            Item::Int(v) => out.push_str(&v.to_string()),
            Item::Float(v) => out.push_str(&v.to_string()),
            Item::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            Item::Str(s) => escape_into(s, out),
            Item::List(l) => {
                if !l.is_nil() {
                    self.render_list(*l, out)?;
                }
            }
        }
        Ok(())
    }
}

/// Quotes and escapes `s`: backslash, double quote, backspace, form feed,
/// newline, carriage return and tab get two-character escapes; any other
/// control character below 0x20 is rendered as `\uXXXX`.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    escape_into(s, &mut out);
    out
}

fn escape_into(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
