//! Signal bits, bit vectors and constants.

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// A key identifying a [`Wire`](super::Wire) within a
    /// [`Module`](super::Module).
    pub struct WireKey;
}

/// A single logic state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum State {
    S0,
    S1,
    /// Unknown.
    Sx,
    /// High impedance.
    Sz,
}

impl State {
    /// The fixed token used for this state in netlist output.
    pub fn token(&self) -> &'static str {
        match *self {
            Self::S0 => "0",
            Self::S1 => "1",
            Self::Sx => "x",
            Self::Sz => "z",
        }
    }

    pub fn to_char(&self) -> char {
        match *self {
            Self::S0 => '0',
            Self::S1 => '1',
            Self::Sx => 'x',
            Self::Sz => 'z',
        }
    }
}

/// One bit of a signal: a constant state or one bit of a wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SigBit {
    Const(State),
    Net { wire: WireKey, offset: usize },
}

/// An ordered vector of signal bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigSpec {
    bits: Vec<SigBit>,
}

impl SigSpec {
    #[inline]
    pub fn new(bits: Vec<SigBit>) -> Self {
        Self { bits }
    }

    /// All `width` bits of `wire`, least significant first.
    pub fn from_wire(wire: WireKey, width: usize) -> Self {
        Self {
            bits: (0..width).map(|offset| SigBit::Net { wire, offset }).collect(),
        }
    }

    #[inline]
    pub fn push(&mut self, bit: SigBit) {
        self.bits.push(bit);
    }

    #[inline]
    pub fn bits(&self) -> &[SigBit] {
        &self.bits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl From<Vec<SigBit>> for SigSpec {
    fn from(bits: Vec<SigBit>) -> Self {
        Self { bits }
    }
}

impl FromIterator<SigBit> for SigSpec {
    fn from_iter<I: IntoIterator<Item = SigBit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// An attribute or parameter constant: text or a bit vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Const {
    Str(ArcStr),
    /// Bits are stored least significant first.
    Bits(Vec<State>),
}

impl Const {
    /// The textual form of this constant. Bit vectors print most significant
    /// bit first as `0`/`1`/`x`/`z` characters.
    pub fn as_string(&self) -> String {
        match self {
            Self::Str(s) => s.to_string(),
            Self::Bits(bits) => bits.iter().rev().map(State::to_char).collect(),
        }
    }
}

impl From<&str> for Const {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Const {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<ArcStr> for Const {
    fn from(value: ArcStr) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<State>> for Const {
    fn from(value: Vec<State>) -> Self {
        Self::Bits(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_vectors_print_msb_first() {
        let value = Const::Bits(vec![State::S0, State::S1, State::Sx, State::Sz]);
        assert_eq!(value.as_string(), "zx10");
    }

    #[test]
    fn from_wire_covers_every_bit() {
        let mut wires = slotmap::SlotMap::with_key();
        let w: WireKey = wires.insert(());
        let sig = SigSpec::from_wire(w, 3);
        assert_eq!(
            sig.bits(),
            &[
                SigBit::Net { wire: w, offset: 0 },
                SigBit::Net { wire: w, offset: 1 },
                SigBit::Net { wire: w, offset: 2 },
            ]
        );
    }
}
