//! Point-group detection for isolated molecules.
//!
//! Feed `analyze` an ordered list of atoms (species + cartesian position)
//! and get back the molecule's full set of symmetry operations together
//! with its Schoenflies classification.  Detection is purely geometric;
//! no bonding topology is consulted.

pub use molsym_structure::{consts, Atom, Element, ElementParseError, Molecule};

pub use molsym_symmetry::{
    analyze, analyze_with, AnalysisError, CartOp, PointGroup, Schoenflies, Tolerances,
};
