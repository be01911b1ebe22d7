//! Modules and the objects they contain.

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use super::signal::{Const, SigSpec, WireKey};

/// An enumeration of port directions.
#[derive(
    Clone, Copy, Eq, PartialEq, Hash, Default, Debug, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum Direction {
    Input,
    Output,
    #[default]
    InOut,
}

impl Direction {
    /// The token used for this direction in netlist output.
    pub fn token(&self) -> &'static str {
        match *self {
            Self::Input => "input",
            Self::Output => "output",
            Self::InOut => "inout",
        }
    }
}

/// A named wire carrying `width` bits.
#[derive(Debug, Clone)]
pub struct Wire {
    name: ArcStr,
    width: usize,
    start_offset: i64,
    upto: bool,
    signed: bool,
    attributes: Vec<(ArcStr, Const)>,
}

impl Wire {
    pub fn new(name: impl Into<ArcStr>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
            start_offset: 0,
            upto: false,
            signed: false,
            attributes: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn start_offset(&self) -> i64 {
        self.start_offset
    }

    #[inline]
    pub fn set_start_offset(&mut self, offset: i64) {
        self.start_offset = offset;
    }

    #[inline]
    pub fn upto(&self) -> bool {
        self.upto
    }

    #[inline]
    pub fn set_upto(&mut self, upto: bool) {
        self.upto = upto;
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    #[inline]
    pub fn set_signed(&mut self, signed: bool) {
        self.signed = signed;
    }

    pub fn add_attribute(&mut self, name: impl Into<ArcStr>, value: impl Into<Const>) {
        self.attributes.push((name.into(), value.into()));
    }

    #[inline]
    pub fn attributes(&self) -> &[(ArcStr, Const)] {
        &self.attributes
    }
}

/// A signal exposed by a [`Module`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Port {
    pub(crate) wire: WireKey,
    pub(crate) direction: Direction,
}

impl Port {
    #[inline]
    pub(crate) fn new(wire: WireKey, direction: Direction) -> Self {
        Self { wire, direction }
    }

    #[inline]
    pub fn wire(&self) -> WireKey {
        self.wire
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// An instance of a cell type within a module.
#[derive(Debug, Clone)]
pub struct Cell {
    name: ArcStr,
    ty: ArcStr,
    parameters: Vec<(ArcStr, Const)>,
    attributes: Vec<(ArcStr, Const)>,
    port_directions: Vec<(ArcStr, Direction)>,
    connections: Vec<(ArcStr, SigSpec)>,
}

impl Cell {
    pub fn new(name: impl Into<ArcStr>, ty: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            parameters: Vec::new(),
            attributes: Vec::new(),
            port_directions: Vec::new(),
            connections: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> &ArcStr {
        &self.ty
    }

    pub fn add_parameter(&mut self, name: impl Into<ArcStr>, value: impl Into<Const>) {
        self.parameters.push((name.into(), value.into()));
    }

    pub fn add_attribute(&mut self, name: impl Into<ArcStr>, value: impl Into<Const>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Records the direction of one of this cell's ports. Directions are
    /// optional; cells with none recorded emit no direction section.
    pub fn set_port_direction(&mut self, port: impl Into<ArcStr>, direction: Direction) {
        self.port_directions.push((port.into(), direction));
    }

    /// Connects a port of the cell to the provided signal.
    #[inline]
    pub fn connect(&mut self, port: impl Into<ArcStr>, signal: impl Into<SigSpec>) {
        self.connections.push((port.into(), signal.into()));
    }

    #[inline]
    pub fn parameters(&self) -> &[(ArcStr, Const)] {
        &self.parameters
    }

    #[inline]
    pub fn attributes(&self) -> &[(ArcStr, Const)] {
        &self.attributes
    }

    #[inline]
    pub fn port_directions(&self) -> &[(ArcStr, Direction)] {
        &self.port_directions
    }

    #[inline]
    pub fn connections(&self) -> &[(ArcStr, SigSpec)] {
        &self.connections
    }
}

/// A memory block within a module.
#[derive(Debug, Clone)]
pub struct Memory {
    name: ArcStr,
    width: usize,
    size: usize,
    start_offset: i64,
    attributes: Vec<(ArcStr, Const)>,
}

impl Memory {
    pub fn new(name: impl Into<ArcStr>, width: usize, size: usize) -> Self {
        Self {
            name: name.into(),
            width,
            size,
            start_offset: 0,
            attributes: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn start_offset(&self) -> i64 {
        self.start_offset
    }

    #[inline]
    pub fn set_start_offset(&mut self, offset: i64) {
        self.start_offset = offset;
    }

    pub fn add_attribute(&mut self, name: impl Into<ArcStr>, value: impl Into<Const>) {
        self.attributes.push((name.into(), value.into()));
    }

    #[inline]
    pub fn attributes(&self) -> &[(ArcStr, Const)] {
        &self.attributes
    }
}

/// A named collection of ports, wires, cells and memories.
#[derive(Debug, Clone, Default)]
pub struct Module {
    name: ArcStr,
    attributes: Vec<(ArcStr, Const)>,
    parameter_defaults: Vec<(ArcStr, Const)>,
    ports: Vec<Port>,
    wires: SlotMap<WireKey, Wire>,
    cells: Vec<Cell>,
    memories: Vec<Memory>,
    processes: Vec<ArcStr>,
}

impl Module {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<ArcStr>) {
        self.name = name.into();
    }

    pub fn add_attribute(&mut self, name: impl Into<ArcStr>, value: impl Into<Const>) {
        self.attributes.push((name.into(), value.into()));
    }

    #[inline]
    pub fn attributes(&self) -> &[(ArcStr, Const)] {
        &self.attributes
    }

    pub fn add_parameter_default(&mut self, name: impl Into<ArcStr>, value: impl Into<Const>) {
        self.parameter_defaults.push((name.into(), value.into()));
    }

    #[inline]
    pub fn parameter_defaults(&self) -> &[(ArcStr, Const)] {
        &self.parameter_defaults
    }

    /// Adds a plain (non-port) wire to the module.
    #[inline]
    pub fn add_wire(&mut self, wire: Wire) -> WireKey {
        self.wires.insert(wire)
    }

    /// Adds a wire and exposes it as a port with the given [`Direction`].
    pub fn add_port(&mut self, wire: Wire, direction: Direction) -> WireKey {
        let key = self.wires.insert(wire);
        self.ports.push(Port::new(key, direction));
        key
    }

    #[inline]
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    #[inline]
    pub fn wires(&self) -> &SlotMap<WireKey, Wire> {
        &self.wires
    }

    #[inline]
    pub fn wire(&self, key: WireKey) -> Option<&Wire> {
        self.wires.get(key)
    }

    #[inline]
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn add_memory(&mut self, memory: Memory) {
        self.memories.push(memory);
    }

    #[inline]
    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    /// Records a behavioral process. Processes cannot be serialized; a module
    /// containing any aborts netlist generation.
    #[inline]
    pub fn add_process(&mut self, name: impl Into<ArcStr>) {
        self.processes.push(name.into());
    }

    #[inline]
    pub fn has_processes(&self) -> bool {
        !self.processes.is_empty()
    }
}
