//! An in-memory hardware-design model: modules, ports, cells, wires and
//! memories. This crate only reads the model; it is produced by the host
//! toolchain.

use std::collections::{HashMap, HashSet};

use arcstr::ArcStr;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub mod module;
pub mod signal;

pub use module::{Cell, Direction, Memory, Module, Port, Wire};
pub use signal::{Const, SigBit, SigSpec, State, WireKey};

/// A collection of modules forming a hardware design.
#[derive(Debug, Clone, Default)]
pub struct Design {
    modules: Vec<Module>,
}

impl Design {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_module(&mut self, module: Module) {
        self.modules.push(module);
    }

    #[inline]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Modules ordered by name, the order in which they are emitted.
    pub fn sorted_modules(&self) -> Vec<&Module> {
        self.modules
            .iter()
            .sorted_by_key(|module| module.name())
            .collect()
    }
}

/// Restricts emission to a chosen subset of a design.
///
/// A module can be selected wholly or partially: partial selection names
/// individual objects (ports, wires, cells, memories) within the module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selection {
    modules: HashSet<ArcStr>,
    objects: HashMap<ArcStr, HashSet<ArcStr>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a module and everything in it.
    pub fn select_module(&mut self, module: impl Into<ArcStr>) {
        self.modules.insert(module.into());
    }

    /// Selects a single named object within a module.
    pub fn select(&mut self, module: impl Into<ArcStr>, object: impl Into<ArcStr>) {
        self.objects
            .entry(module.into())
            .or_default()
            .insert(object.into());
    }

    /// Whether any part of `module` is selected.
    pub fn contains_module(&self, module: &str) -> bool {
        self.modules.contains(module) || self.objects.contains_key(module)
    }

    /// Whether `object` within `module` is selected.
    pub fn contains(&self, module: &str, object: &str) -> bool {
        self.modules.contains(module)
            || self
                .objects
                .get(module)
                .is_some_and(|objects| objects.contains(object))
    }
}
