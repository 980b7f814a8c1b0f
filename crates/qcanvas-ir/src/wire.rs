//! Circuit wires.

use serde::{Deserialize, Serialize};

use crate::qubit::Qubit;

/// A horizontal track in the circuit, holding the qubit it starts in.
///
/// Changing the initial value marks the wire dirty so that the owning circuit
/// drops its cached states the next time it is queried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    initial: Qubit,
    #[serde(skip)]
    dirty: bool,
}

impl Wire {
    /// A wire starting in |0⟩.
    pub fn new() -> Self {
        Self::default()
    }

    /// A wire starting in `initial`.
    pub fn with_initial(initial: Qubit) -> Self {
        Self {
            initial,
            dirty: false,
        }
    }

    /// The qubit this wire starts in.
    pub fn initial_value(&self) -> Qubit {
        self.initial
    }

    /// Replace the initial qubit.
    pub fn set_initial_value(&mut self, qubit: Qubit) {
        self.initial = qubit;
        self.dirty = true;
    }

    /// Flip the start between |0⟩ and |1⟩. Anything other than exactly |0⟩
    /// resets to |0⟩.
    pub fn toggle(&mut self) {
        self.initial = if self.initial == Qubit::ZERO {
            Qubit::ONE
        } else {
            Qubit::ZERO
        };
        self.dirty = true;
    }

    /// Whether the initial value changed since the circuit last looked.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
