//! Circuit model and column-wise state propagation.

use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument, trace, warn};

use crate::cache::StateCache;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::matrix::{self, Matrix};
use crate::qubit::Qubit;
use crate::statevector::Statevector;
use crate::wire::Wire;

/// A gate together with the operator built when it was placed.
#[derive(Debug, Clone)]
struct Placement {
    gate: Gate,
    matrix: Matrix,
}

/// A quantum circuit: ordered wires plus gates placed at columns.
///
/// No two gates share a column with overlapping wire ranges; placing a gate
/// evicts whatever it collides with. States are memoized per column and
/// invalidated when wires or gates change.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    wires: Vec<Wire>,
    placements: Vec<Placement>,
    cache: StateCache,
}

impl Circuit {
    /// Create an empty circuit with no wires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with `num_wires` wires, all starting in |0⟩.
    pub fn with_wires(num_wires: usize) -> Self {
        let mut circuit = Self::new();
        circuit.set_number_of_qubits(num_wires);
        circuit
    }

    /// Create a circuit whose wires start in the given qubits, in order.
    pub fn from_initial_values(values: impl IntoIterator<Item = Qubit>) -> Self {
        let mut circuit = Self::new();
        for qubit in values {
            circuit.add_wire_with(Wire::with_initial(qubit));
        }
        circuit
    }

    // =========================================================================
    // Wires
    // =========================================================================

    /// Number of wires.
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    /// The wires, top to bottom.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Mutable access to one wire, e.g. to toggle its start value.
    pub fn wire_mut(&mut self, index: usize) -> Option<&mut Wire> {
        self.wires.get_mut(index)
    }

    /// The initial qubit of every wire, in wire order.
    pub fn initial_values(&self) -> Vec<Qubit> {
        self.wires.iter().map(Wire::initial_value).collect()
    }

    /// Append a wire starting in |0⟩.
    pub fn add_wire(&mut self) {
        self.add_wire_with(Wire::new());
    }

    /// Append a wire.
    pub fn add_wire_with(&mut self, wire: Wire) {
        self.wires.push(wire);
        self.cache.clear();
        debug!(num_wires = self.wires.len(), "added wire");
    }

    /// Remove the last wire and every gate touching it.
    pub fn remove_last_wire(&mut self) {
        if self.wires.pop().is_none() {
            return;
        }
        let removed = self.wires.len();
        self.placements.retain(|p| p.gate.max_wire() < removed);
        self.cache.clear();
        debug!(num_wires = self.wires.len(), "removed wire");
    }

    /// Grow or shrink to exactly `count` wires, keeping the existing prefix.
    pub fn set_number_of_qubits(&mut self, count: usize) {
        while self.wires.len() < count {
            self.add_wire();
        }
        while self.wires.len() > count {
            self.remove_last_wire();
        }
    }

    /// Flip a wire's start between |0⟩ and |1⟩.
    pub fn toggle_wire(&mut self, index: usize) -> IrResult<()> {
        self.checked_wire_mut(index)?.toggle();
        Ok(())
    }

    /// Replace a wire's start value.
    pub fn set_initial_value(&mut self, index: usize, qubit: Qubit) -> IrResult<()> {
        self.checked_wire_mut(index)?.set_initial_value(qubit);
        Ok(())
    }

    fn checked_wire_mut(&mut self, index: usize) -> IrResult<&mut Wire> {
        let num_wires = self.wires.len();
        self.wires.get_mut(index).ok_or(IrError::WireOutOfRange {
            wire: index,
            num_wires,
        })
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Place a gate, evicting any gate it collides with.
    ///
    /// The operator is built before anything changes, so a rejected gate
    /// leaves the circuit untouched. Identity gates and gates more than one
    /// column past the current last column are dropped after eviction;
    /// `Ok(false)` reports that case.
    pub fn set_gate(&mut self, gate: Gate) -> IrResult<bool> {
        self.place(gate, true)
    }

    /// Place a gate at any column, keeping empty columns before it.
    ///
    /// Used when rebuilding a saved circuit, where gaps left by removed
    /// gates must survive. Validation, eviction and the identity erase behave
    /// as in [`Circuit::set_gate`].
    pub fn restore_gate(&mut self, gate: Gate) -> IrResult<bool> {
        self.place(gate, false)
    }

    fn place(&mut self, gate: Gate, bounded: bool) -> IrResult<bool> {
        if let Some(&wire) = gate.wires().iter().find(|&&w| w >= self.wires.len()) {
            return Err(IrError::WireOutOfRange {
                wire,
                num_wires: self.wires.len(),
            });
        }
        let matrix = gate.matrix()?;
        // Column composition steps over exactly `span` wires per operator.
        if matrix.nrows() != 1 << gate.span() {
            return Err(IrError::UnsupportedTopology {
                gate_type: gate.gate_type().to_string(),
                wires: gate.wires().to_vec(),
            });
        }

        self.cache.clear_from(gate.column());

        let before = self.placements.len();
        self.placements.retain(|p| !p.gate.collides_with(&gate));
        let evicted = before - self.placements.len();
        if evicted > 0 {
            debug!(evicted, column = gate.column(), "evicted colliding gates");
        }

        if gate.is_identity() {
            return Ok(false);
        }
        let limit = self.max_column().map_or(0, |c| c + 1);
        if bounded && gate.column() > limit {
            warn!(
                gate = gate.gate_type(),
                column = gate.column(),
                limit,
                "dropping gate placed past the end of the circuit"
            );
            return Ok(false);
        }

        trace!(gate = gate.gate_type(), column = gate.column(), wires = ?gate.wires(), "placed gate");
        self.placements.push(Placement { gate, matrix });
        Ok(true)
    }

    /// Remove the gate covering `wire` at `column`, if any.
    pub fn remove_gate(&mut self, wire: usize, column: usize) -> Option<Gate> {
        let index = self
            .placements
            .iter()
            .position(|p| p.gate.column() == column && p.gate.contains_wire(wire))?;
        self.cache.clear_from(column);
        Some(self.placements.remove(index).gate)
    }

    /// The gate at `column` that lists `wire` among its operands.
    pub fn gate(&self, wire: usize, column: usize) -> Option<&Gate> {
        self.gates()
            .find(|g| g.column() == column && g.contains_wire(wire))
    }

    /// All placed gates, in insertion order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.placements.iter().map(|p| &p.gate)
    }

    /// Number of placed gates.
    pub fn num_gates(&self) -> usize {
        self.placements.len()
    }

    /// Gates at one column, ordered by their lowest wire.
    pub fn gates_in_column(&self, column: usize) -> Vec<&Gate> {
        let mut gates: Vec<&Gate> = self.gates().filter(|g| g.column() == column).collect();
        gates.sort_by_key(|g| g.min_wire());
        gates
    }

    /// Highest occupied column, or `None` for a circuit without gates.
    pub fn max_column(&self) -> Option<usize> {
        self.gates().map(Gate::column).max()
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// The state after every gate in columns `< column` has acted.
    ///
    /// Column 0 is the tensor product of the wires' initial kets.
    #[instrument(skip(self), fields(num_wires = self.wires.len()))]
    pub fn state(&mut self, column: usize) -> Statevector {
        self.sync_dirty_wires();

        if let Some(state) = self.cache.get(column) {
            debug!("cache hit");
            return state.clone();
        }

        let (start, mut current) = match self
            .cache
            .nearest_at_or_below(column)
            .and_then(|c| self.cache.get(c).map(|s| (c, s.clone())))
        {
            Some(hit) => hit,
            None => {
                let base = Statevector::from_qubits(&self.initial_values());
                self.cache.insert(0, base.clone());
                (0, base)
            }
        };
        debug!(from = start, "propagating");

        for c in start + 1..=column {
            let operator = self.column_operator(c - 1);
            current = current.evolve(&operator);
            self.cache.insert(c, current.clone());
        }
        current
    }

    /// Probability of measuring |1⟩ on each wire after `column`, listed from
    /// the highest wire index down to wire 0.
    pub fn probabilities(&mut self, column: usize) -> Vec<f64> {
        self.state(column).qubit_probabilities()
    }

    /// Whether a valid memoized state exists for `column`.
    pub fn is_cached(&self, column: usize) -> bool {
        self.cache.contains(column) && !self.wires.iter().any(Wire::is_dirty)
    }

    fn sync_dirty_wires(&mut self) {
        if self.wires.iter().any(Wire::is_dirty) {
            debug!("initial values changed, clearing state cache");
            self.cache.clear();
            self.wires.iter_mut().for_each(Wire::clear_dirty);
        }
    }

    /// Full-width operator for the gates at `column`, identity elsewhere.
    fn column_operator(&self, column: usize) -> Matrix {
        // Placements never overlap within a column, so scanning upward always
        // meets a gate at its lowest wire.
        let by_first_wire: FxHashMap<usize, &Matrix> = self
            .placements
            .iter()
            .filter(|p| p.gate.column() == column)
            .map(|p| (p.gate.min_wire(), &p.matrix))
            .collect();

        let mut operator = Array2::from_elem((1, 1), Complex64::new(1.0, 0.0));
        let mut wire = 0;
        while wire < self.wires.len() {
            match by_first_wire.get(&wire) {
                Some(gate_matrix) => {
                    operator = matrix::tensor(&operator, gate_matrix);
                    wire += gate_matrix.nrows().trailing_zeros() as usize;
                }
                None => {
                    operator = matrix::tensor(&operator, &matrix::identity(2));
                    wire += 1;
                }
            }
        }
        operator
    }
}

/// Whether two gates occupy the same column with overlapping wire ranges.
pub fn gates_collide(a: &Gate, b: &Gate) -> bool {
    a.collides_with(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(column: usize, wire: usize) -> Gate {
        Gate::single("H", column, wire).unwrap()
    }

    #[test]
    fn test_wire_management() {
        let mut circuit = Circuit::with_wires(3);
        assert_eq!(circuit.num_wires(), 3);

        circuit.toggle_wire(1).unwrap();
        circuit.set_number_of_qubits(5);
        assert_eq!(circuit.num_wires(), 5);
        assert_eq!(circuit.wires()[1].initial_value(), Qubit::ONE);

        circuit.set_number_of_qubits(2);
        assert_eq!(circuit.initial_values(), vec![Qubit::ZERO, Qubit::ONE]);

        assert!(matches!(
            circuit.toggle_wire(7),
            Err(IrError::WireOutOfRange { wire: 7, num_wires: 2 })
        ));
    }

    #[test]
    fn test_remove_last_wire_drops_gates() {
        let mut circuit = Circuit::with_wires(3);
        circuit.set_gate(h(0, 0)).unwrap();
        circuit
            .set_gate(Gate::controlled("CNOT", 1, vec![0, 2]).unwrap())
            .unwrap();
        circuit.set_gate(h(1, 2)).unwrap(); // evicts the CNOT
        circuit
            .set_gate(Gate::controlled("CNOT", 2, vec![2, 1]).unwrap())
            .unwrap();
        assert_eq!(circuit.num_gates(), 3);

        circuit.remove_last_wire();
        assert_eq!(circuit.num_gates(), 1);
        assert!(circuit.gate(0, 0).is_some());

        let mut empty = Circuit::new();
        empty.remove_last_wire();
        assert_eq!(empty.num_wires(), 0);
    }

    #[test]
    fn test_identity_and_far_columns_dropped() {
        let mut circuit = Circuit::with_wires(2);
        assert!(!circuit.set_gate(Gate::single("I", 0, 0).unwrap()).unwrap());
        assert!(!circuit.set_gate(h(1, 0)).unwrap());
        assert_eq!(circuit.max_column(), None);

        assert!(circuit.set_gate(h(0, 0)).unwrap());
        assert!(circuit.set_gate(h(1, 1)).unwrap());
        assert!(!circuit.set_gate(h(3, 1)).unwrap());
        assert_eq!(circuit.max_column(), Some(1));
    }

    #[test]
    fn test_restore_gate_keeps_gaps() {
        let mut circuit = Circuit::with_wires(2);
        assert!(circuit.restore_gate(h(3, 1)).unwrap());
        assert_eq!(circuit.max_column(), Some(3));
        assert!(!circuit.restore_gate(Gate::single("I", 5, 0).unwrap()).unwrap());
        assert!(matches!(
            circuit.restore_gate(Gate::single("X", 0, 2).unwrap()),
            Err(IrError::WireOutOfRange { wire: 2, .. })
        ));

        // Empty columns 0..3 propagate as identity.
        assert_eq!(circuit.probabilities(3), vec![0.0, 0.0]);
        assert!((circuit.probabilities(4)[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_identity_erases() {
        let mut circuit = Circuit::with_wires(1);
        circuit.set_gate(h(0, 0)).unwrap();
        circuit.set_gate(Gate::single("I", 0, 0).unwrap()).unwrap();
        assert_eq!(circuit.num_gates(), 0);
    }

    #[test]
    fn test_rejected_gate_leaves_circuit_untouched() {
        let mut circuit = Circuit::with_wires(3);
        circuit.set_gate(h(0, 1)).unwrap();
        let _ = circuit.state(1);
        assert!(circuit.is_cached(1));

        let bad = Gate::controlled("CNOT", 0, vec![1, 1]).unwrap();
        assert!(circuit.set_gate(bad).is_err());
        let outside = Gate::controlled("CNOT", 0, vec![1, 3]).unwrap();
        assert!(matches!(
            circuit.set_gate(outside),
            Err(IrError::WireOutOfRange { wire: 3, .. })
        ));

        assert_eq!(circuit.num_gates(), 1);
        assert!(circuit.is_cached(1));
    }

    #[test]
    fn test_gates_in_column_sorted() {
        let mut circuit = Circuit::with_wires(4);
        circuit.set_gate(h(0, 3)).unwrap();
        circuit.set_gate(h(0, 0)).unwrap();
        circuit
            .set_gate(Gate::controlled("CNOT", 0, vec![2, 1]).unwrap())
            .unwrap();

        let wires: Vec<usize> = circuit
            .gates_in_column(0)
            .iter()
            .map(|g| g.min_wire())
            .collect();
        assert_eq!(wires, vec![0, 1, 3]);
    }

    #[test]
    fn test_remove_gate() {
        let mut circuit = Circuit::with_wires(2);
        circuit
            .set_gate(Gate::controlled("CNOT", 0, vec![0, 1]).unwrap())
            .unwrap();
        let removed = circuit.remove_gate(1, 0).unwrap();
        assert_eq!(removed.gate_type(), "CNOT");
        assert_eq!(circuit.num_gates(), 0);
        assert!(circuit.remove_gate(1, 0).is_none());
    }

    #[test]
    fn test_dirty_wire_invalidates_cache() {
        let mut circuit = Circuit::with_wires(1);
        circuit.set_gate(Gate::single("X", 0, 0).unwrap()).unwrap();
        assert_eq!(circuit.probabilities(1), vec![1.0]);

        circuit.wire_mut(0).unwrap().toggle();
        assert!(!circuit.is_cached(1));
        assert_eq!(circuit.probabilities(1), vec![0.0]);
        assert!(!circuit.wires()[0].is_dirty());
    }

    #[test]
    fn test_column_operator_dimension() {
        let mut circuit = Circuit::with_wires(4);
        circuit
            .set_gate(Gate::controlled("CCNOT", 0, vec![0, 1, 3]).unwrap())
            .unwrap();
        let op = circuit.column_operator(0);
        assert_eq!(op.dim(), (16, 16));
        assert!(matrix::is_unitary(&op, 1e-12));
    }
}
