//! Gate catalog and operator construction.
//!
//! Gates are identified by a type tag from one of four fixed catalogs. Each
//! catalog maps to one [`GateKind`] variant, and the variant decides both the
//! supported wire geometries and how the operator matrix is built.
//!
//! | Family | Tags | Wires |
//! |--------|------|-------|
//! | fixed single-wire | `I H X Y Z S T` | 1 |
//! | rotation | `Rx Ry Rz` | 1 |
//! | controlled | `CNOT C0NOT CCNOT CC00NOT CH C0H CCH CC00H CCCNOT CCC000NOT` | controls + target |
//! | controlled rotation | `CRx CRy CRz C0Rx C0Ry C0Rz` | control + target |
//!
//! For controlled families the last wire is the target and the rest are
//! controls. A `0` in the tag means the control fires on |0⟩.

use serde::Serialize;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::matrix::{self, Matrix};

/// Fixed single-wire operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SingleOp {
    /// Identity.
    I,
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Phase gate diag(1, i).
    S,
    /// diag(1, e^{iπ/4}).
    T,
}

impl SingleOp {
    fn matrix(self) -> Matrix {
        match self {
            SingleOp::I => matrix::identity(2),
            SingleOp::H => matrix::hadamard(),
            SingleOp::X => matrix::pauli_x(),
            SingleOp::Y => matrix::pauli_y(),
            SingleOp::Z => matrix::pauli_z(),
            SingleOp::S => matrix::phase_s(),
            SingleOp::T => matrix::phase_t(),
        }
    }
}

/// Rotation axes for parameterized gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    /// Rotation about X.
    X,
    /// Rotation about Y.
    Y,
    /// Rotation about Z.
    Z,
}

impl Axis {
    fn matrix(self, theta: f64) -> Matrix {
        match self {
            Axis::X => matrix::rx(theta),
            Axis::Y => matrix::ry(theta),
            Axis::Z => matrix::rz(theta),
        }
    }
}

/// Operators that a fixed controlled gate applies to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TargetOp {
    /// Pauli-X.
    Not,
    /// Hadamard.
    Hadamard,
}

impl TargetOp {
    fn matrix(self) -> Matrix {
        match self {
            TargetOp::Not => matrix::pauli_x(),
            TargetOp::Hadamard => matrix::hadamard(),
        }
    }
}

/// The four gate families.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GateKind {
    /// Fixed single-wire operator.
    Single(SingleOp),
    /// Single-wire rotation by an angle.
    Rotation {
        /// Rotation axis.
        axis: Axis,
        /// Angle in radians.
        theta: f64,
    },
    /// X or H on the target, gated by one to three controls.
    Controlled {
        /// Operator applied to the target.
        op: TargetOp,
        /// Number of control wires.
        controls: usize,
        /// Controls fire on |0⟩ instead of |1⟩.
        on_zero: bool,
    },
    /// Rotation on the target, gated by a single control.
    ControlledRotation {
        /// Rotation axis.
        axis: Axis,
        /// Angle in radians.
        theta: f64,
        /// Control fires on |0⟩ instead of |1⟩.
        on_zero: bool,
    },
}

/// Fixed single-wire catalog.
pub const SINGLE_GATES: &[(&str, SingleOp)] = &[
    ("I", SingleOp::I),
    ("H", SingleOp::H),
    ("X", SingleOp::X),
    ("Y", SingleOp::Y),
    ("Z", SingleOp::Z),
    ("S", SingleOp::S),
    ("T", SingleOp::T),
];

/// Rotation catalog.
pub const ROTATION_GATES: &[(&str, Axis)] = &[("Rx", Axis::X), ("Ry", Axis::Y), ("Rz", Axis::Z)];

/// Controlled catalog: tag, target operator, number of controls, fires on |0⟩.
pub const CONTROLLED_GATES: &[(&str, TargetOp, usize, bool)] = &[
    ("CNOT", TargetOp::Not, 1, false),
    ("C0NOT", TargetOp::Not, 1, true),
    ("CCNOT", TargetOp::Not, 2, false),
    ("CC00NOT", TargetOp::Not, 2, true),
    ("CH", TargetOp::Hadamard, 1, false),
    ("C0H", TargetOp::Hadamard, 1, true),
    ("CCH", TargetOp::Hadamard, 2, false),
    ("CC00H", TargetOp::Hadamard, 2, true),
    ("CCCNOT", TargetOp::Not, 3, false),
    ("CCC000NOT", TargetOp::Not, 3, true),
];

/// Controlled rotation catalog: tag, axis, fires on |0⟩.
pub const CONTROLLED_ROTATION_GATES: &[(&str, Axis, bool)] = &[
    ("CRx", Axis::X, false),
    ("CRy", Axis::Y, false),
    ("CRz", Axis::Z, false),
    ("C0Rx", Axis::X, true),
    ("C0Ry", Axis::Y, true),
    ("C0Rz", Axis::Z, true),
];

fn lookup_single(tag: &str) -> Option<(&'static str, GateKind)> {
    SINGLE_GATES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|&(name, op)| (name, GateKind::Single(op)))
}

fn lookup_rotation(tag: &str, theta: f64) -> Option<(&'static str, GateKind)> {
    ROTATION_GATES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|&(name, axis)| (name, GateKind::Rotation { axis, theta }))
}

fn lookup_controlled(tag: &str) -> Option<(&'static str, GateKind)> {
    CONTROLLED_GATES
        .iter()
        .find(|(name, ..)| *name == tag)
        .map(|&(name, op, controls, on_zero)| {
            (
                name,
                GateKind::Controlled {
                    op,
                    controls,
                    on_zero,
                },
            )
        })
}

fn lookup_controlled_rotation(tag: &str, theta: f64) -> Option<(&'static str, GateKind)> {
    CONTROLLED_ROTATION_GATES
        .iter()
        .find(|(name, ..)| *name == tag)
        .map(|&(name, axis, on_zero)| {
            (
                name,
                GateKind::ControlledRotation {
                    axis,
                    theta,
                    on_zero,
                },
            )
        })
}

/// Whether `tag` names a gate in any catalog.
pub fn is_known_type(tag: &str) -> bool {
    lookup_single(tag).is_some()
        || lookup_rotation(tag, 0.0).is_some()
        || lookup_controlled(tag).is_some()
        || lookup_controlled_rotation(tag, 0.0).is_some()
}

/// A gate placed at a column on one or more wires.
///
/// Construction only checks the type tag; the wire geometry is validated when
/// the operator is built by [`Gate::matrix`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gate {
    gate_type: &'static str,
    kind: GateKind,
    column: usize,
    wires: Vec<usize>,
}

impl Gate {
    /// Create a gate from any catalog. `parameter` is ignored by the
    /// non-parameterized families.
    pub fn new(gate_type: &str, column: usize, wires: Vec<usize>, parameter: f64) -> IrResult<Self> {
        let (tag, kind) = lookup_single(gate_type)
            .or_else(|| lookup_rotation(gate_type, parameter))
            .or_else(|| lookup_controlled(gate_type))
            .or_else(|| lookup_controlled_rotation(gate_type, parameter))
            .ok_or_else(|| IrError::InvalidConfiguration {
                gate_type: gate_type.to_string(),
            })?;
        Self::build(tag, kind, column, wires)
    }

    /// Create a fixed single-wire gate.
    pub fn single(gate_type: &str, column: usize, wire: usize) -> IrResult<Self> {
        let (tag, kind) = lookup_single(gate_type).ok_or_else(|| invalid(gate_type))?;
        Self::build(tag, kind, column, vec![wire])
    }

    /// Create a single-wire rotation.
    pub fn rotation(gate_type: &str, theta: f64, column: usize, wire: usize) -> IrResult<Self> {
        let (tag, kind) = lookup_rotation(gate_type, theta).ok_or_else(|| invalid(gate_type))?;
        Self::build(tag, kind, column, vec![wire])
    }

    /// Create a fixed controlled gate; the last wire is the target.
    pub fn controlled(gate_type: &str, column: usize, wires: Vec<usize>) -> IrResult<Self> {
        let (tag, kind) = lookup_controlled(gate_type).ok_or_else(|| invalid(gate_type))?;
        Self::build(tag, kind, column, wires)
    }

    /// Create a controlled rotation; `wires` is `[control, target]`.
    pub fn controlled_rotation(
        gate_type: &str,
        theta: f64,
        column: usize,
        wires: Vec<usize>,
    ) -> IrResult<Self> {
        let (tag, kind) =
            lookup_controlled_rotation(gate_type, theta).ok_or_else(|| invalid(gate_type))?;
        Self::build(tag, kind, column, wires)
    }

    fn build(tag: &'static str, kind: GateKind, column: usize, wires: Vec<usize>) -> IrResult<Self> {
        if wires.is_empty() {
            return Err(IrError::EmptyWireList {
                gate_type: tag.to_string(),
            });
        }
        Ok(Self {
            gate_type: tag,
            kind,
            column,
            wires,
        })
    }

    /// The catalog tag, e.g. `"CNOT"`.
    pub fn gate_type(&self) -> &'static str {
        self.gate_type
    }

    /// The gate family and its operands.
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Horizontal placement.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Wire indices, controls first and target last.
    pub fn wires(&self) -> &[usize] {
        &self.wires
    }

    /// The rotation angle, for parameterized families.
    pub fn parameter(&self) -> Option<f64> {
        match self.kind {
            GateKind::Rotation { theta, .. } | GateKind::ControlledRotation { theta, .. } => {
                Some(theta)
            }
            GateKind::Single(_) | GateKind::Controlled { .. } => None,
        }
    }

    /// Whether this is the identity, which circuits never store.
    pub fn is_identity(&self) -> bool {
        matches!(self.kind, GateKind::Single(SingleOp::I))
    }

    /// Lowest wire touched.
    pub fn min_wire(&self) -> usize {
        self.wires.iter().copied().min().unwrap_or(0)
    }

    /// Highest wire touched.
    pub fn max_wire(&self) -> usize {
        self.wires.iter().copied().max().unwrap_or(0)
    }

    /// Number of wires covered by the operator, `max - min + 1`.
    pub fn span(&self) -> usize {
        (self.max_wire() - self.min_wire()).saturating_add(1)
    }

    /// Whether the gate lists `wire` among its operands.
    pub fn contains_wire(&self, wire: usize) -> bool {
        self.wires.contains(&wire)
    }

    /// Two gates collide when they share a column and their
    /// `[min_wire, max_wire]` ranges overlap.
    pub fn collides_with(&self, other: &Gate) -> bool {
        self.column == other.column
            && self.max_wire() >= other.min_wire()
            && other.max_wire() >= self.min_wire()
    }

    /// Build the `2^span × 2^span` operator over the wires `min..=max`.
    pub fn matrix(&self) -> IrResult<Matrix> {
        match self.kind {
            GateKind::Single(op) => {
                self.expect_single_wire()?;
                Ok(op.matrix())
            }
            GateKind::Rotation { axis, theta } => {
                self.expect_single_wire()?;
                Ok(axis.matrix(theta))
            }
            GateKind::Controlled {
                op,
                controls,
                on_zero,
            } => {
                self.check_controlled_topology(controls)?;
                Ok(self.embed(&op.matrix(), on_zero))
            }
            GateKind::ControlledRotation {
                axis,
                theta,
                on_zero,
            } => {
                self.check_controlled_topology(1)?;
                Ok(self.embed(&axis.matrix(theta), on_zero))
            }
        }
    }

    fn unsupported(&self) -> IrError {
        IrError::UnsupportedTopology {
            gate_type: self.gate_type.to_string(),
            wires: self.wires.clone(),
        }
    }

    fn expect_single_wire(&self) -> IrResult<()> {
        if self.wires.len() == 1 {
            Ok(())
        } else {
            Err(self.unsupported())
        }
    }

    /// Accepted layouts:
    /// - one control above the target (lower index), any tag;
    /// - one control below the target, `CNOT` only;
    /// - two or three mutually adjacent controls, all above the target.
    fn check_controlled_topology(&self, controls: usize) -> IrResult<()> {
        if self.wires.len() != controls + 1 {
            return Err(self.unsupported());
        }
        let (control_wires, target) = self.wires.split_at(controls);
        let target = target[0];

        let ok = if let [control] = control_wires {
            let control = *control;
            control < target
                || (control > target
                    && matches!(
                        self.kind,
                        GateKind::Controlled {
                            op: TargetOp::Not,
                            on_zero: false,
                            ..
                        }
                    ))
        } else {
            let mut sorted = control_wires.to_vec();
            sorted.sort_unstable();
            let adjacent = sorted.windows(2).all(|w| w[1] == w[0] + 1);
            adjacent && sorted.last().is_some_and(|&top| target > top)
        };

        // A block of `span` wires needs `1 << span` rows.
        let addressable = self.max_wire() - self.min_wire() < usize::BITS as usize - 1;

        if ok && addressable { Ok(()) } else { Err(self.unsupported()) }
    }

    fn embed(&self, op: &Matrix, on_zero: bool) -> Matrix {
        let min = self.min_wire();
        let (control_wires, target) = self.wires.split_at(self.wires.len() - 1);
        let offsets: Vec<usize> = control_wires.iter().map(|w| w - min).collect();
        matrix::controlled(op, self.span(), &offsets, target[0] - min, !on_zero)
    }
}

fn invalid(gate_type: &str) -> IrError {
    IrError::InvalidConfiguration {
        gate_type: gate_type.to_string(),
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            Ok(())
        } else {
            f.write_str(self.gate_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    const ONE: Complex64 = Complex64::new(1.0, 0.0);
    const ZERO: Complex64 = Complex64::new(0.0, 0.0);

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            Gate::new("SWAP", 0, vec![0, 1], 0.0),
            Err(IrError::InvalidConfiguration { .. })
        ));
        // Family-specific constructors only accept their own catalog.
        assert!(Gate::single("CNOT", 0, 0).is_err());
        assert!(Gate::controlled("H", 0, vec![0, 1]).is_err());
        assert!(Gate::rotation("CRx", 1.0, 0, 0).is_err());
    }

    #[test]
    fn test_empty_wires_rejected() {
        assert!(matches!(
            Gate::new("H", 0, vec![], 0.0),
            Err(IrError::EmptyWireList { .. })
        ));
    }

    #[test]
    fn test_catalog_membership() {
        for tag in ["I", "H", "Rx", "CNOT", "CCC000NOT", "C0Rz"] {
            assert!(is_known_type(tag), "{tag}");
        }
        assert!(!is_known_type("cnot"));
        assert!(!is_known_type("CCCCNOT"));
    }

    #[test]
    fn test_single_gate_matrix() {
        let h = Gate::single("H", 0, 3).unwrap();
        let m = h.matrix().unwrap();
        assert_eq!(m.shape(), &[2, 2]);
        assert!((m[[1, 1]].re + FRAC_1_SQRT_2).abs() < 1e-12);
        assert_eq!(h.parameter(), None);
        assert_eq!(h.to_string(), "H");
        assert_eq!(Gate::single("I", 0, 0).unwrap().to_string(), "");
    }

    #[test]
    fn test_single_gate_with_two_wires_is_unsupported() {
        let g = Gate::new("X", 0, vec![0, 1], 0.0).unwrap();
        assert!(matches!(
            g.matrix(),
            Err(IrError::UnsupportedTopology { .. })
        ));
    }

    #[test]
    fn test_rotation_parameter() {
        let g = Gate::new("Ry", 2, vec![1], PI / 2.0).unwrap();
        assert_eq!(g.parameter(), Some(PI / 2.0));
        let m = g.matrix().unwrap();
        assert!((m[[1, 0]].re - FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_cnot_control_equals_target() {
        let g = Gate::controlled("CNOT", 0, vec![1, 1]).unwrap();
        assert!(matches!(
            g.matrix(),
            Err(IrError::UnsupportedTopology { .. })
        ));
    }

    #[test]
    fn test_span_too_wide_for_operator() {
        for wires in [vec![0, 64], vec![0, usize::MAX]] {
            let g = Gate::controlled("CNOT", 0, wires).unwrap();
            assert!(matches!(
                g.matrix(),
                Err(IrError::UnsupportedTopology { .. })
            ));
        }
        let g = Gate::controlled("CCNOT", 0, vec![1, 2, 70]).unwrap();
        assert!(g.matrix().is_err());
    }

    #[test]
    fn test_cnot_span_covers_gap() {
        // Control on wire 0, target on wire 2: 8×8 with wire 1 untouched.
        let m = Gate::controlled("CNOT", 0, vec![0, 2]).unwrap().matrix().unwrap();
        assert_eq!(m.shape(), &[8, 8]);
        for row in 0..4 {
            assert_eq!(m[[row, row]], ONE);
        }
        assert_eq!(m[[4, 5]], ONE);
        assert_eq!(m[[6, 7]], ONE);
        assert_eq!(m[[4, 4]], ZERO);
    }

    #[test]
    fn test_reversed_orientation_only_for_cnot() {
        assert!(Gate::controlled("CNOT", 0, vec![1, 0]).unwrap().matrix().is_ok());
        for tag in ["C0NOT", "CH", "C0H"] {
            let g = Gate::controlled(tag, 0, vec![1, 0]).unwrap();
            assert!(g.matrix().is_err(), "{tag}");
        }
        let crx = Gate::controlled_rotation("CRx", 1.0, 0, vec![1, 0]).unwrap();
        assert!(crx.matrix().is_err());
    }

    #[test]
    fn test_two_control_topologies() {
        assert!(Gate::controlled("CCNOT", 0, vec![0, 1, 2]).unwrap().matrix().is_ok());
        assert!(Gate::controlled("CCNOT", 0, vec![1, 0, 3]).unwrap().matrix().is_ok());
        // Controls not adjacent.
        assert!(Gate::controlled("CCNOT", 0, vec![0, 2, 3]).unwrap().matrix().is_err());
        // Target between controls / above them.
        assert!(Gate::controlled("CCNOT", 0, vec![1, 2, 0]).unwrap().matrix().is_err());
        // Wrong arity.
        assert!(Gate::controlled("CCNOT", 0, vec![0, 1]).unwrap().matrix().is_err());
    }

    #[test]
    fn test_three_control_topologies() {
        let m = Gate::controlled("CCCNOT", 0, vec![0, 1, 2, 3])
            .unwrap()
            .matrix()
            .unwrap();
        assert_eq!(m.shape(), &[16, 16]);
        assert_eq!(m[[14, 15]], ONE);
        assert_eq!(m[[13, 13]], ONE);

        let low = Gate::controlled("CCC000NOT", 0, vec![0, 1, 2, 3])
            .unwrap()
            .matrix()
            .unwrap();
        assert_eq!(low[[0, 1]], ONE);
        assert_eq!(low[[15, 15]], ONE);

        // Duplicate control.
        assert!(Gate::controlled("CCCNOT", 0, vec![0, 0, 2, 3]).unwrap().matrix().is_err());
    }

    #[test]
    fn test_controlled_gates_are_unitary() {
        let gates = [
            Gate::controlled("CH", 0, vec![0, 3]).unwrap(),
            Gate::controlled("CCH", 0, vec![0, 1, 3]).unwrap(),
            Gate::controlled("CC00H", 0, vec![0, 1, 2]).unwrap(),
            Gate::controlled_rotation("CRy", 0.7, 0, vec![0, 2]).unwrap(),
            Gate::controlled_rotation("C0Rz", -1.3, 0, vec![1, 2]).unwrap(),
        ];
        for g in &gates {
            assert!(matrix::is_unitary(&g.matrix().unwrap(), 1e-12), "{g}");
        }
    }

    #[test]
    fn test_controlled_rotation_block() {
        let m = Gate::controlled_rotation("CRz", PI, 0, vec![0, 1])
            .unwrap()
            .matrix()
            .unwrap();
        assert_eq!(m[[0, 0]], ONE);
        assert_eq!(m[[1, 1]], ONE);
        assert!((m[[2, 2]] - Complex64::new(0.0, -1.0)).norm() < 1e-12);
        assert!((m[[3, 3]] - Complex64::new(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_collision_rule() {
        let a = Gate::controlled("CNOT", 2, vec![0, 1]).unwrap();
        let b = Gate::controlled("CNOT", 2, vec![1, 2]).unwrap();
        let c = Gate::single("H", 2, 3).unwrap();
        let d = Gate::single("H", 3, 1).unwrap();

        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));
        assert!(!a.collides_with(&c));
        assert!(!a.collides_with(&d));

        // Ranges collide even when the wire lists do not intersect.
        let wide = Gate::controlled("CNOT", 0, vec![0, 3]).unwrap();
        let inner = Gate::single("X", 0, 2).unwrap();
        assert!(wide.collides_with(&inner));
    }
}
