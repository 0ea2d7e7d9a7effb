//! The symmetry search engine.
//!
//! One `Search` value is scratch state for a single analysis call: the
//! centered molecule, its similarity bins and inertia frame, the rotation
//! axes found so far, and the validated operations that will seed the
//! group closure.  Nothing here outlives the call.

use itertools::Itertools;
use molsym_structure::{Element, Molecule};
use nalgebra::{Point3, Vector3};

use crate::bins::{InertiaFrame, InertialClass, SiteBins};
use crate::group::{close_group, PointGroup};
use crate::oper::CartOp;
use crate::symbol::Schoenflies;
use crate::{AnalysisError, Tolerances};

/// Detect the point group of a molecule with the default `Tolerances`.
pub fn analyze(mol: &Molecule) -> Result<PointGroup, AnalysisError>
{ analyze_with(mol, &Tolerances::default()) }

/// Detect the point group of a molecule.
///
/// The molecule is analyzed about its center of mass; the caller's atoms
/// are never touched.  A single atom (or no atoms at all) is spherically
/// symmetric and reports the `Kh` sentinel, with the identity as its one
/// operation.
pub fn analyze_with(mol: &Molecule, tol: &Tolerances) -> Result<PointGroup, AnalysisError>
{Ok({
    if mol.len() <= 1 {
        return Ok(PointGroup::new(Schoenflies::Kh, close_group(&[], tol)?));
    }

    let centered = mol.centered();
    let frame = InertiaFrame::of_molecule(&centered);
    let class = frame.classify(tol)?;

    let mut search = Search {
        mol: &centered,
        bins: SiteBins::build(&centered, tol),
        frame,
        tol,
        rot_axes: vec![],
        detected: vec![],
    };
    let symbol = match class {
        InertialClass::Linear => {
            info!("linear molecule detected");
            search.classify_linear()
        }
        InertialClass::AsymmetricTop => {
            info!("asymmetric top detected");
            search.classify_asymmetric()?
        }
        InertialClass::SymmetricTop { unique } => {
            info!("symmetric top detected");
            search.classify_symmetric(unique)?
        }
        InertialClass::SphericalTop => {
            info!("spherical top detected");
            search.classify_spherical()?
        }
    };

    let operations = close_group(&search.detected, tol)?;
    info!("point group {}: {} operations", symbol, operations.len());
    PointGroup::new(symbol, operations)
})}

struct Search<'a> {
    mol: &'a Molecule,
    bins: SiteBins,
    frame: InertiaFrame,
    tol: &'a Tolerances,
    /// Candidate axis direction -> detected rotational order.
    rot_axes: Vec<(Vector3<f64>, u32)>,
    /// Validated generators, in discovery order.
    detected: Vec<CartOp>,
}

/// How a detected mirror plane relates to the reference axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mirror {
    /// Perpendicular to the axis.
    Horizontal,
    /// Contains another detected rotation axis (or none besides the
    /// reference is known).
    Vertical,
    /// Contains the reference axis only.
    Diagonal,
}

impl<'a> Search<'a> {
    //------------------------------
    // candidate validation

    /// Whether `point` coincides with an atom of species `element`.
    ///
    /// The tolerance scales with the distance from the origin, absorbing
    /// numerical drift at large radii.
    fn is_valid_site(&self, point: &Point3<f64>, element: Element) -> bool
    {
        let tol = self.tol.dist.max(self.tol.dist * point.coords.norm());
        self.mol.iter()
            .filter(|at| at.element() == element)
            .any(|at| (at.position() - point).norm() < tol)
    }

    /// Applies `op` to every atom and checks that each image lands on an
    /// existing atom of the same species.  A validated operation is
    /// recorded as a generator; a rejected candidate changes nothing.
    fn try_op(&mut self, op: CartOp) -> bool
    {
        for at in self.mol {
            let image = op.transform_point(&at.position());
            if !self.is_valid_site(&image, at.element()) {
                return false;
            }
        }
        trace!("found operation {}", op.label());
        self.detected.push(op);
        true
    }

    //------------------------------
    // per-class classification

    /// Linear molecules carry the full C∞ axis either way; only inversion
    /// separates the two possible groups.
    fn classify_linear(&mut self) -> Schoenflies
    {
        match self.try_op(CartOp::inversion()) {
            true => Schoenflies::DInfH,
            false => Schoenflies::CInfV,
        }
    }

    /// Asymmetric tops cannot rotate by less than a half turn; test a
    /// 2-fold about each principal axis and dispatch on the count.
    fn classify_asymmetric(&mut self) -> Result<Schoenflies, AnalysisError>
    {Ok({
        for k in 0..3 {
            let axis = self.frame.axes[k];
            let op = CartOp::rotation(&Point3::origin(), &axis, 180.0)?;
            if self.try_op(op) {
                self.rot_axes.push((axis, 2));
            }
        }
        match self.rot_axes.len() {
            0 => self.no_rotational_symmetry()?,
            3 => self.dihedral()?,
            _ => self.cyclic()?,
        }
    })}

    /// Symmetric tops have their candidate main axis handed to them by the
    /// unique principal moment.
    fn classify_symmetric(&mut self, unique: usize) -> Result<Schoenflies, AnalysisError>
    {Ok({
        let main = self.frame.axes[unique];
        self.max_rotation_order(&main)?;
        if !self.rot_axes.is_empty() {
            self.perpendicular_twofold(&main)?;
        }
        match self.rot_axes.len() {
            0 => self.no_rotational_symmetry()?,
            1 => self.cyclic()?,
            _ => self.dihedral()?,
        }
    })}

    /// Spherical tops belong to T, O or I; their high-order axes are not
    /// principal axes, so they must be dug out of atom pairs and triples.
    fn classify_spherical(&mut self) -> Result<Schoenflies, AnalysisError>
    {Ok({
        self.spherical_axes()?;
        let order = self.highest_rotation_axis().map(|(_, o)| o).unwrap_or(0);
        if order < 3 {
            // The degeneracy was accidental; fall back to the symmetric
            // top treatment about an (arbitrary) principal axis.
            info!("accidental spherical top; retrying as symmetric top");
            return self.classify_symmetric(2);
        }
        let (main, order) = self.highest_rotation_axis()
            .expect("(BUG) spherical branch lost its main axis!?");
        match order {
            3 => match self.find_mirror(&main)? {
                Some(_) => match self.try_op(CartOp::inversion()) {
                    true => Schoenflies::Th,
                    false => Schoenflies::Td,
                },
                None => Schoenflies::T,
            },
            4 => match self.try_op(CartOp::inversion()) {
                true => Schoenflies::Oh,
                false => Schoenflies::O,
            },
            _ => match self.try_op(CartOp::inversion()) {
                true => Schoenflies::Ih,
                false => Schoenflies::I,
            },
        }
    })}

    //------------------------------
    // branch handlers

    /// C1, Cs or Ci.
    fn no_rotational_symmetry(&mut self) -> Result<Schoenflies, AnalysisError>
    {Ok({
        debug!("no rotational symmetry detected");
        if self.try_op(CartOp::inversion()) {
            return Ok(Schoenflies::Ci);
        }
        for k in 0..3 {
            let axis = self.frame.axes[k];
            if self.find_mirror(&axis)?.is_some() {
                return Ok(Schoenflies::Cs);
            }
        }
        Schoenflies::C1
    })}

    /// Cn, Cnh, Cnv or S2n.
    fn cyclic(&mut self) -> Result<Schoenflies, AnalysisError>
    {Ok({
        let (main, order) = self.highest_rotation_axis()
            .expect("(BUG) cyclic branch without a rotation axis!?");
        match self.find_mirror(&main)? {
            Some(Mirror::Horizontal) => Schoenflies::Cnh(order),
            Some(Mirror::Vertical) => Schoenflies::Cnv(order),
            Some(Mirror::Diagonal) => Schoenflies::Cn(order),
            None => {
                // No mirror at all; a 2n-fold roto-reflection axis still
                // upgrades Cn to S2n.
                let op = CartOp::roto_reflection(
                    &Point3::origin(), &main, 180.0 / f64::from(order))?;
                match self.try_op(op) {
                    true => Schoenflies::Sn(2 * order),
                    false => Schoenflies::Cn(order),
                }
            }
        }
    })}

    /// Dn, Dnh or Dnd.
    fn dihedral(&mut self) -> Result<Schoenflies, AnalysisError>
    {Ok({
        let (main, order) = self.highest_rotation_axis()
            .expect("(BUG) dihedral branch without a rotation axis!?");
        match self.find_mirror(&main)? {
            Some(Mirror::Horizontal) => Schoenflies::Dnh(order),
            Some(_) => Schoenflies::Dnd(order),
            None => Schoenflies::Dn(order),
        }
    })}

    //------------------------------
    // axis searches

    /// Determines the maximal rotational order about `axis` by testing
    /// divisors of the smallest off-axis bin size, largest first.  The
    /// trivial divisor 1 is never tested.
    fn max_rotation_order(&mut self, axis: &Vector3<f64>) -> Result<(), AnalysisError>
    {Ok({
        let candidates = self.bins.smallest_off_axis(self.mol, axis, self.tol);
        if candidates.is_empty() {
            return Ok(());
        }
        for &order in divisors(candidates.len()).iter().skip(1).rev() {
            let op = CartOp::rotation(&Point3::origin(), axis, 360.0 / order as f64)?;
            if self.try_op(op) {
                self.rot_axes.push((*axis, order as u32));
                break;
            }
        }
    })}

    /// Looks for one 2-fold axis perpendicular to `main` among pairwise
    /// differences of the minimal off-axis bin, crossed with `main`.
    fn perpendicular_twofold(&mut self, main: &Vector3<f64>) -> Result<(), AnalysisError>
    {Ok({
        let candidates = self.bins.smallest_off_axis(self.mol, main, self.tol);
        for (i, j) in candidates.iter().cloned().tuple_combinations() {
            let delta = self.mol.atom(i).position() - self.mol.atom(j).position();
            let axis = delta.cross(main);
            if axis.norm() > self.tol.dist {
                let op = CartOp::rotation(&Point3::origin(), &axis, 180.0)?;
                if self.try_op(op) {
                    self.rot_axes.push((axis.normalize(), 2));
                    return Ok(());
                }
            }
        }
    })}

    /// Searches atom pairs and triples of the smallest bin for 2-, 3-, 4-
    /// and 5-fold axes.  T needs a unique 3-fold plus a 2-fold, O adds a
    /// 4-fold, I a 5-fold; the search stops once a 3-fold and a higher
    /// axis are both in hand.  Pair sums give 2-fold candidates, triangle
    /// normals the rest.
    fn spherical_axes(&mut self) -> Result<(), AnalysisError>
    {Ok({
        let members = match self.bins.smallest() {
            Some(bin) => bin.members.clone(),
            None => return Ok(()),
        };
        let n = members.len();
        let (mut r2, mut r3, mut r4, mut r5) = (false, false, false, false);
        'pairs: for ii in 0..n.saturating_sub(2) {
            let p1 = self.mol.atom(members[ii]).position().coords;
            for jj in (ii + 1)..(n - 1) {
                let p2 = self.mol.atom(members[jj]).position().coords;
                if !r2 {
                    r2 = self.twofold_candidate(&(p2 + p1))?;
                }
                for kk in (jj + 1)..n {
                    let p3 = self.mol.atom(members[kk]).position().coords;
                    if !r2 {
                        r2 = self.twofold_candidate(&(p1 + p3))?;
                    }
                    let axis = (p2 - p1).cross(&(p3 - p1));
                    if axis.norm() > self.tol.dist {
                        if !r3 && self.rotation_candidate(&axis, 3)? {
                            r3 = true;
                            break;
                        }
                        if !r4 && self.rotation_candidate(&axis, 4)? {
                            r4 = true;
                            break;
                        }
                        if !r5 && self.rotation_candidate(&axis, 5)? {
                            r5 = true;
                            break;
                        }
                    }
                }
                if r3 && r2 && (r4 || r5) {
                    break 'pairs;
                }
            }
        }
    })}

    fn twofold_candidate(&mut self, axis: &Vector3<f64>) -> Result<bool, AnalysisError>
    {Ok({
        if axis.norm() <= self.tol.dist {
            return Ok(false);
        }
        let op = CartOp::rotation(&Point3::origin(), axis, 180.0)?;
        match self.try_op(op) {
            true => {
                self.rot_axes.push((axis.normalize(), 2));
                true
            }
            false => false,
        }
    })}

    fn rotation_candidate(&mut self, axis: &Vector3<f64>, order: u32) -> Result<bool, AnalysisError>
    {Ok({
        let op = CartOp::rotation(&Point3::origin(), axis, 360.0 / f64::from(order))?;
        match self.try_op(op) {
            true => {
                self.rot_axes.push((axis.normalize(), order));
                true
            }
            false => false,
        }
    })}

    //------------------------------
    // mirrors

    /// Looks for a mirror about `axis`: first the plane perpendicular to
    /// it, then planes normal to same-species pair displacements that are
    /// approximately perpendicular to the axis.
    ///
    /// A found (non-horizontal) plane is vertical when it contains one of
    /// the other detected rotation axes, or when no other axis is known;
    /// otherwise it is diagonal.
    fn find_mirror(&mut self, axis: &Vector3<f64>) -> Result<Option<Mirror>, AnalysisError>
    {Ok({
        if self.try_op(CartOp::reflection(&Point3::origin(), axis)?) {
            return Ok(Some(Mirror::Horizontal));
        }
        for (i, j) in (0..self.mol.len()).tuple_combinations() {
            if self.mol.atom(i).element() != self.mol.atom(j).element() {
                continue;
            }
            let normal = self.mol.atom(i).position() - self.mol.atom(j).position();
            if normal.norm() <= self.tol.dist || normal.dot(axis).abs() >= self.tol.dist {
                continue;
            }
            if self.try_op(CartOp::reflection(&Point3::origin(), &normal)?) {
                if self.rot_axes.len() > 1 {
                    let unit = axis.normalize();
                    for &(other, _) in &self.rot_axes {
                        let is_reference = (other - unit).norm() < self.tol.dist;
                        if !is_reference && other.dot(&normal).abs() < self.tol.dist {
                            return Ok(Some(Mirror::Vertical));
                        }
                    }
                    return Ok(Some(Mirror::Diagonal));
                }
                return Ok(Some(Mirror::Vertical));
            }
        }
        None
    })}

    fn highest_rotation_axis(&self) -> Option<(Vector3<f64>, u32)>
    {
        let mut best: Option<(Vector3<f64>, u32)> = None;
        for &(axis, order) in &self.rot_axes {
            if order > best.map_or(1, |(_, o)| o) {
                best = Some((axis, order));
            }
        }
        best
    }
}

// Unoptimized; the counts involved are small.
fn divisors(n: usize) -> Vec<usize>
{
    let mut out = vec![];
    let mut i = 1;
    while i * i <= n {
        if n % i == 0 {
            out.push(i);
            if n / i != i {
                out.push(n / i);
            }
        }
        i += 1;
    }
    out.sort();
    out
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use molsym_structure::{consts, Atom};

    fn molecule(atoms: &[(Element, [f64; 3])]) -> Molecule
    {
        atoms.iter()
            .map(|&(el, [x, y, z])| Atom::from_coords(el, x, y, z))
            .collect()
    }

    #[test]
    fn divisors_are_sorted_and_complete()
    {
        assert_eq!(divisors(1), vec![1]);
        assert_eq!(divisors(6), vec![1, 2, 3, 6]);
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(7), vec![1, 7]);
    }

    #[test]
    fn bent_molecule_is_c2v()
    {
        let mol = molecule(&[
            (consts::OXYGEN, [0.0, 0.0, 0.0]),
            (consts::HYDROGEN, [0.757, 0.0, 0.587]),
            (consts::HYDROGEN, [-0.757, 0.0, 0.587]),
        ]);
        let group = analyze(&mol).unwrap();
        assert_eq!(group.symbol(), Schoenflies::Cnv(2));
        assert_eq!(group.operations().len(), 4);
    }

    #[test]
    fn linear_molecules_split_on_inversion()
    {
        let co2 = molecule(&[
            (consts::CARBON, [0.0, 0.0, 0.0]),
            (consts::OXYGEN, [0.0, 0.0, 1.16]),
            (consts::OXYGEN, [0.0, 0.0, -1.16]),
        ]);
        assert_eq!(analyze(&co2).unwrap().symbol(), Schoenflies::DInfH);

        let hcn = molecule(&[
            (consts::HYDROGEN, [0.0, 0.0, -1.064]),
            (consts::CARBON, [0.0, 0.0, 0.0]),
            (consts::NITROGEN, [0.0, 0.0, 1.156]),
        ]);
        assert_eq!(analyze(&hcn).unwrap().symbol(), Schoenflies::CInfV);
    }

    #[test]
    fn lone_atom_is_kh()
    {
        let group = analyze(&molecule(&[(consts::NEON, [4.0, 5.0, 6.0])])).unwrap();
        assert_eq!(group.symbol(), Schoenflies::Kh);
        assert_eq!(group.operations().len(), 1);

        let group = analyze(&Molecule::new(vec![])).unwrap();
        assert_eq!(group.symbol(), Schoenflies::Kh);
    }

    #[test]
    fn tetrahedron_is_td()
    {
        let k = 0.629;
        let mol = molecule(&[
            (consts::CARBON, [0.0, 0.0, 0.0]),
            (consts::HYDROGEN, [k, k, k]),
            (consts::HYDROGEN, [k, -k, -k]),
            (consts::HYDROGEN, [-k, k, -k]),
            (consts::HYDROGEN, [-k, -k, k]),
        ]);
        let group = analyze(&mol).unwrap();
        assert_eq!(group.symbol(), Schoenflies::Td);
        assert_eq!(group.operations().len(), 24);
    }

    #[test]
    fn relabeling_cannot_gain_symmetry()
    {
        let k = 0.629;
        let mol = molecule(&[
            (consts::CARBON, [0.0, 0.0, 0.0]),
            (consts::FLUORINE, [k, k, k]),
            (consts::HYDROGEN, [k, -k, -k]),
            (consts::HYDROGEN, [-k, k, -k]),
            (consts::HYDROGEN, [-k, -k, k]),
        ]);
        let group = analyze(&mol).unwrap();
        assert_eq!(group.symbol(), Schoenflies::Cnv(3));
        assert!(group.operations().len() < 24);
    }
}
