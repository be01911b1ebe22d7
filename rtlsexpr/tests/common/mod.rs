#![allow(dead_code)]

use rtlsexpr::rtl::{Cell, Const, Design, Direction, Memory, Module, SigBit, SigSpec, State, Wire};

/// A single-module design with one input port and nothing else.
pub fn small_design() -> Design {
    let mut top = Module::new("top");
    top.add_port(Wire::new("clk", 1), Direction::Input);

    let mut design = Design::new();
    design.add_module(top);
    design
}

/// A two-module design exercising attributes, parameter defaults, optional
/// port fields, constant bits, cells and memories.
pub fn full_design() -> Design {
    let mut top = Module::new("top");
    top.add_attribute("src", "top.v:3");
    top.add_parameter_default("WIDTH", Const::Bits(vec![State::S0, State::S1]));

    let clk = top.add_port(Wire::new("clk", 1), Direction::Input);

    let mut q = Wire::new("q", 2);
    q.set_start_offset(4);
    q.set_upto(true);
    q.set_signed(true);
    top.add_port(q, Direction::Output);

    let aux = top.add_wire(Wire::new("$aux", 1));

    let mut and0 = Cell::new("and0", "$and");
    and0.add_parameter("WIDTH", "2");
    and0.add_attribute("init", "01x");
    and0.set_port_direction("A", Direction::Input);
    and0.set_port_direction("B", Direction::Input);
    and0.set_port_direction("Y", Direction::Output);
    and0.connect("A", SigSpec::from_wire(clk, 1));
    and0.connect("B", SigSpec::new(vec![SigBit::Const(State::S1)]));
    and0.connect("Y", SigSpec::from_wire(aux, 1));
    top.add_cell(and0);

    top.add_cell(Cell::new("$scopeinfo$1", "$scopeinfo"));

    top.add_memory(Memory::new("$mem$ram", 8, 16));

    let mut design = Design::new();
    design.add_module(top);
    design.add_module(Module::new("alpha"));
    design
}

/// Renders `design` to a string with the given options.
pub fn netlist_text(design: &Design, opts: &rtlsexpr::netlist::NetlistOpts) -> String {
    let mut out = Vec::new();
    rtlsexpr::netlist::write_netlist(design, &mut out, opts).expect("failed to write netlist");
    String::from_utf8(out).expect("netlist is not valid utf-8")
}
