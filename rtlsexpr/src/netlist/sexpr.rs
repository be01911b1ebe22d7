//! The s-expression netlist writer.

use std::collections::HashMap;

use arcstr::ArcStr;
use sexpr::{list, Arena, Item, ListRef, NIL};

use crate::error::{ErrorSource, Result};
use crate::log::{debug, info};
use crate::netlist::FORMAT_VERSION;
use crate::rtl::{Const, Design, Module, Selection, SigBit, SigSpec};

/// Walks a [`Design`] and builds its s-expression document.
///
/// Bit identifiers are assigned per module in first-seen order starting at 2;
/// 0 and 1 are reserved so an identifier can never be confused with the `0`
/// and `1` constant tokens.
pub struct SexprWriter<'a> {
    design: &'a Design,
    selection: Option<&'a Selection>,

    arena: Arena,
    sigids: HashMap<SigBit, Item>,
    sigidcounter: i64,
}

impl<'a> SexprWriter<'a> {
    pub fn new(design: &'a Design, selection: Option<&'a Selection>) -> Self {
        Self {
            design,
            selection,
            arena: Arena::new(),
            sigids: HashMap::new(),
            sigidcounter: 0,
        }
    }

    /// Builds the document for the whole design and renders it.
    pub fn render_design(&mut self) -> Result<String> {
        let doc = self.build_design()?;
        Ok(self.arena.to_sexpr(doc)?)
    }

    fn build_design(&mut self) -> Result<ListRef> {
        info!("writing s-expression netlist");

        let version = list![self.arena, Item::token("version"), FORMAT_VERSION];
        let generator = list![
            self.arena,
            Item::token("generator"),
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        ];
        let mut doc = list![self.arena, Item::token("design"), version, generator];

        for module in self.design.sorted_modules() {
            if let Some(selection) = self.selection {
                if !selection.contains_module(module.name()) {
                    continue;
                }
            }
            let m = self.build_module(module)?;
            let tail = self.arena.cons(m, NIL);
            doc = self.arena.append(doc, tail)?;
        }
        Ok(doc)
    }

    fn build_module(&mut self, module: &Module) -> Result<ListRef> {
        if module.has_processes() {
            return Err(ErrorSource::Unsupported {
                module: module.name().clone(),
                feature: arcstr::literal!("processes"),
            }
            .into());
        }

        debug!("writing module {}", module.name());
        self.sigids.clear();
        // 0 and 1 are reserved for the constant tokens.
        self.sigidcounter = 2;

        let mut items = vec![Item::token("module"), Item::from(module.name())];
        items.push(self.build_bindings("attributes", module.attributes()).into());
        if !module.parameter_defaults().is_empty() {
            items.push(
                self.build_bindings("parameter_default_values", module.parameter_defaults())
                    .into(),
            );
        }
        items.push(self.build_ports(module).into());
        items.push(self.build_cells(module).into());
        if !module.memories().is_empty() {
            items.push(self.build_memories(module).into());
        }
        items.push(self.build_netnames(module).into());
        Ok(self.arena.list(items))
    }

    /// Builds a `(label ("name" "value") ...)` section.
    fn build_bindings(&mut self, label: &'static str, bindings: &[(ArcStr, Const)]) -> ListRef {
        let mut items = vec![Item::token(label)];
        for (name, value) in bindings {
            let entry = list![self.arena, name, format_const(value)];
            items.push(entry.into());
        }
        self.arena.list(items)
    }

    fn build_ports(&mut self, module: &Module) -> ListRef {
        let mut items = vec![Item::token("ports")];
        for port in module.ports() {
            let wire = &module.wires()[port.wire()];
            if !self.is_selected(module, wire.name()) {
                continue;
            }
            let mut entry = vec![Item::token("port"), Item::from(wire.name())];
            let direction = list![
                self.arena,
                Item::token("direction"),
                Item::token(port.direction().token())
            ];
            entry.push(direction.into());
            if wire.start_offset() != 0 {
                entry.push(list![self.arena, Item::token("offset"), wire.start_offset()].into());
            }
            if wire.upto() {
                entry.push(list![self.arena, Item::token("upto"), true].into());
            }
            if wire.is_signed() {
                entry.push(list![self.arena, Item::token("signed"), true].into());
            }
            let bits = self.build_bits(&SigSpec::from_wire(port.wire(), wire.width()));
            entry.push(bits.into());
            let entry = self.arena.list(entry);
            items.push(entry.into());
        }
        self.arena.list(items)
    }

    fn build_cells(&mut self, module: &Module) -> ListRef {
        let mut items = vec![Item::token("cells")];
        for cell in module.cells() {
            if !self.is_selected(module, cell.name()) {
                continue;
            }
            // $scopeinfo breaks downstream netlist consumers; leave it out.
            if cell.ty() == "$scopeinfo" {
                continue;
            }
            let mut entry = vec![Item::token("cell"), Item::from(cell.name())];
            let hide = list![
                self.arena,
                Item::token("hide_name"),
                cell.name().starts_with('$')
            ];
            entry.push(hide.into());
            entry.push(list![self.arena, Item::token("type"), cell.ty()].into());
            entry.push(self.build_bindings("parameters", cell.parameters()).into());
            entry.push(self.build_bindings("attributes", cell.attributes()).into());
            if !cell.port_directions().is_empty() {
                let mut dirs = vec![Item::token("port_directions")];
                for (port, direction) in cell.port_directions() {
                    dirs.push(list![self.arena, port, Item::token(direction.token())].into());
                }
                let dirs = self.arena.list(dirs);
                entry.push(dirs.into());
            }
            let mut conns = vec![Item::token("connections")];
            for (port, sig) in cell.connections() {
                let bits = self.build_bits(sig);
                conns.push(list![self.arena, port, bits].into());
            }
            let conns = self.arena.list(conns);
            entry.push(conns.into());
            let entry = self.arena.list(entry);
            items.push(entry.into());
        }
        self.arena.list(items)
    }

    fn build_memories(&mut self, module: &Module) -> ListRef {
        let mut items = vec![Item::token("memories")];
        for memory in module.memories() {
            if !self.is_selected(module, memory.name()) {
                continue;
            }
            let mut entry = vec![Item::token("memory"), Item::from(memory.name())];
            let hide = list![
                self.arena,
                Item::token("hide_name"),
                memory.name().starts_with('$')
            ];
            entry.push(hide.into());
            entry.push(self.build_bindings("attributes", memory.attributes()).into());
            entry.push(list![self.arena, Item::token("width"), memory.width() as i64].into());
            entry.push(list![self.arena, Item::token("start_offset"), memory.start_offset()].into());
            entry.push(list![self.arena, Item::token("size"), memory.size() as i64].into());
            let entry = self.arena.list(entry);
            items.push(entry.into());
        }
        self.arena.list(items)
    }

    fn build_netnames(&mut self, module: &Module) -> ListRef {
        let mut items = vec![Item::token("netnames")];
        for (key, wire) in module.wires() {
            if !self.is_selected(module, wire.name()) {
                continue;
            }
            let mut entry = vec![Item::token("net"), Item::from(wire.name())];
            let hide = list![
                self.arena,
                Item::token("hide_name"),
                wire.name().starts_with('$')
            ];
            entry.push(hide.into());
            let bits = self.build_bits(&SigSpec::from_wire(key, wire.width()));
            entry.push(bits.into());
            if wire.start_offset() != 0 {
                entry.push(list![self.arena, Item::token("offset"), wire.start_offset()].into());
            }
            if wire.upto() {
                entry.push(list![self.arena, Item::token("upto"), true].into());
            }
            if wire.is_signed() {
                entry.push(list![self.arena, Item::token("signed"), true].into());
            }
            entry.push(self.build_bindings("attributes", wire.attributes()).into());
            let entry = self.arena.list(entry);
            items.push(entry.into());
        }
        self.arena.list(items)
    }

    /// Builds a `(bits ...)` list, resolving each bit to its constant token
    /// or integer identifier.
    fn build_bits(&mut self, sig: &SigSpec) -> ListRef {
        let mut items = vec![Item::token("bits")];
        for bit in sig.bits() {
            let item = match self.sigids.get(bit) {
                Some(item) => item.clone(),
                None => {
                    let item = match bit {
                        SigBit::Const(state) => Item::token(state.token()),
                        SigBit::Net { .. } => {
                            let id = self.sigidcounter;
                            self.sigidcounter += 1;
                            Item::Int(id)
                        }
                    };
                    self.sigids.insert(*bit, item.clone());
                    item
                }
            };
            items.push(item);
        }
        self.arena.list(items)
    }

    fn is_selected(&self, module: &Module, object: &str) -> bool {
        match self.selection {
            Some(selection) => selection.contains(module.name(), object),
            None => true,
        }
    }
}

/// Renders an attribute or parameter constant as text. A string consisting
/// only of `0`/`1`/`x`/`z` characters and trailing spaces gains one trailing
/// space so it cannot be read back as a bit-vector constant.
fn format_const(value: &Const) -> String {
    match value {
        Const::Str(s) => {
            let mut state = 0;
            for c in s.chars() {
                if state == 0 {
                    if matches!(c, '0' | '1' | 'x' | 'z') {
                    } else if c == ' ' {
                        state = 1;
                    } else {
                        state = 2;
                    }
                } else if state == 1 && c != ' ' {
                    state = 2;
                }
            }
            if state < 2 {
                format!("{s} ")
            } else {
                s.to_string()
            }
        }
        Const::Bits(_) => value.as_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtl::State;

    #[test]
    fn string_constants_that_look_like_bits_are_disambiguated() {
        assert_eq!(format_const(&Const::from("101xz")), "101xz ");
        assert_eq!(format_const(&Const::from("10 ")), "10  ");
        assert_eq!(format_const(&Const::from("")), " ");
        assert_eq!(format_const(&Const::from("10 1")), "10 1");
        assert_eq!(format_const(&Const::from("hello")), "hello");
    }

    #[test]
    fn bit_constants_render_msb_first() {
        let value = Const::Bits(vec![State::S1, State::S0, State::Sx]);
        assert_eq!(format_const(&value), "x01");
    }

    #[test]
    fn bit_identifiers_start_at_two_in_first_seen_order() {
        let design = Design::new();
        let mut writer = SexprWriter::new(&design, None);

        let mut wires = slotmap::SlotMap::with_key();
        let w: crate::rtl::WireKey = wires.insert(());
        let v: crate::rtl::WireKey = wires.insert(());

        let sig = SigSpec::new(vec![
            SigBit::Const(State::S0),
            SigBit::Net { wire: w, offset: 0 },
            SigBit::Net { wire: v, offset: 0 },
            SigBit::Net { wire: w, offset: 0 },
            SigBit::Const(State::Sz),
        ]);
        writer.sigidcounter = 2;
        let bits = writer.build_bits(&sig);
        assert_eq!(writer.arena.to_sexpr(bits).unwrap(), "(bits 0 2 3 2 z)");
    }
}
