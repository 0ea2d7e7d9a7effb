use std::collections::VecDeque;
use std::fmt;

use failure::Backtrace;
use molsym_structure::{Atom, Element};
use nalgebra::Point3;

use crate::oper::CartOp;
use crate::symbol::Schoenflies;
use crate::{AnalysisError, Tolerances};

/// Upper bound on the operation count before closure is declared
/// divergent.  Point groups of finite molecules never get this large;
/// blowing past it means a bad generator or a misconfigured tolerance.
const MAX_OPERATIONS: usize = 200;

/// Expands a generator list into the full operation set.
///
/// Work-queue fixed point: a popped operation that is not yet a member
/// (within the matrix tolerance) is admitted, and its products with every
/// member, in both orders, are enqueued.  The set is seeded with the
/// identity, so the result is never empty and closure holds even for an
/// empty generator list.
pub(crate) fn close_group(generators: &[CartOp], tol: &Tolerances) -> Result<Vec<CartOp>, AnalysisError>
{Ok({
    let mut members = vec![CartOp::eye()];
    let mut queue: VecDeque<CartOp> = generators.iter().cloned().collect();

    while let Some(op) = queue.pop_front() {
        if in_set(&members, &op, tol.matrix) {
            continue;
        }
        members.push(op);
        if members.len() > MAX_OPERATIONS {
            throw!(AnalysisError::GroupClosureDivergence {
                size: members.len(),
                backtrace: Backtrace::new(),
            });
        }
        // Products with earlier members (and itself).  Pairs with members
        // admitted later are enqueued when those members arrive.
        let newest = members.len() - 1;
        for k in 0..members.len() {
            queue.push_back(members[newest].of(&members[k]));
            queue.push_back(members[k].of(&members[newest]));
        }
    }
    members
})}

fn in_set(set: &[CartOp], op: &CartOp, tol: f64) -> bool
{ set.iter().any(|member| CartOp::approx_eq(member, op, tol)) }

/// A molecular point group: the Schoenflies symbol plus the complete
/// operation set.
///
/// Invariant: the set is closed under composition within the matrix
/// tolerance it was built with.  Constructed once per analysis; immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct PointGroup {
    symbol: Schoenflies,
    operations: Vec<CartOp>,
}

impl PointGroup {
    pub(crate) fn new(symbol: Schoenflies, operations: Vec<CartOp>) -> PointGroup
    { PointGroup { symbol, operations } }

    pub fn symbol(&self) -> Schoenflies
    { self.symbol }

    /// The full set of symmetry operations, identity included.
    pub fn operations(&self) -> &[CartOp]
    { &self.operations }

    /// Whether some operation of the group maps `a` to within `tol` of `b`.
    ///
    /// Positions are interpreted in the frame the group was detected in,
    /// i.e. with the molecule's center of mass at the origin.
    pub fn is_equivalent(&self, a: &Point3<f64>, b: &Point3<f64>, tol: f64) -> bool
    {
        self.operations.iter()
            .any(|op| (op.transform_point(a) - b).norm() < tol)
    }

    /// One representative per symmetry-equivalent class of `atoms`, in
    /// input order.  `species` restricts which atoms are considered at
    /// all; `None` keeps every species.
    ///
    /// Callers use this to avoid editing more than one site per orbit.
    pub fn distinct_orbits(&self, atoms: &[Atom], species: Option<Element>, tol: f64) -> Vec<Atom>
    {
        let mut reps: Vec<Atom> = vec![];
        for at in atoms {
            if let Some(wanted) = species {
                if at.element() != wanted {
                    continue;
                }
            }
            let known = reps.iter()
                .any(|rep| self.is_equivalent(&at.position(), &rep.position(), tol));
            if !known {
                reps.push(at.clone());
            }
        }
        reps
    }
}

impl fmt::Display for PointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "Point group: {}", self.symbol)?;
        writeln!(f, "Total symmetry operations: {}", self.operations.len())?;
        for op in &self.operations {
            writeln!(f, "{}", op)?;
        }
        Ok(())
    }
}
