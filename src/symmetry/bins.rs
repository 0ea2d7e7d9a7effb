use failure::Backtrace;
use molsym_structure::{Element, Molecule};
use nalgebra::{Matrix3, Vector3};
use ordered_float::NotNan;

use crate::{AnalysisError, Tolerances};

/// Atoms of one species in one distance shell about the origin.
#[derive(Debug)]
pub(crate) struct SiteBin {
    pub element: Element,
    pub radius: f64,
    pub members: Vec<usize>,
}

/// Similarity bins over a centered molecule: atom indices keyed by
/// distance from the origin (tolerance-merged) and then by species.
///
/// An atom within tolerance of the origin sits on every candidate
/// symmetry element and is held out of the bins.
#[derive(Debug)]
pub(crate) struct SiteBins {
    bins: Vec<SiteBin>,
    origin_atom: Option<usize>,
}

impl SiteBins {
    pub fn build(mol: &Molecule, tol: &Tolerances) -> SiteBins
    {
        // Sorting by distance lets shells be merged in one sweep.
        let mut order: Vec<(NotNan<f64>, usize)> =
            mol.iter().enumerate()
                .map(|(i, at)| {
                    let d = at.position().coords.norm();
                    (NotNan::new(d).expect("(BUG) NaN atom coordinate!?"), i)
                })
                .collect();
        order.sort();

        let mut shells: Vec<(f64, Vec<usize>)> = vec![];
        for &(d, i) in &order {
            let d = d.into_inner();
            let merge = match shells.last() {
                Some(&(start, _)) => d - start < tol.dist,
                None => false,
            };
            if merge {
                shells.last_mut().expect("(BUG) just checked!?").1.push(i);
            } else {
                shells.push((d, vec![i]));
            }
        }

        let mut origin_atom = None;
        let mut bins = vec![];
        for (radius, members) in shells {
            if radius < tol.dist {
                if members.len() > 1 {
                    warn!("{} atoms within tolerance of the centroid; keeping the lowest index", members.len());
                }
                origin_atom = members.into_iter().min();
                continue;
            }
            let mut by_species: Vec<(Element, Vec<usize>)> = vec![];
            for i in members {
                let element = mol.atom(i).element();
                match by_species.iter_mut().find(|(e, _)| *e == element) {
                    Some((_, v)) => v.push(i),
                    None => by_species.push((element, vec![i])),
                }
            }
            for (element, members) in by_species {
                bins.push(SiteBin { element, radius, members });
            }
        }
        SiteBins { bins, origin_atom }
    }

    pub fn origin_atom(&self) -> Option<usize>
    { self.origin_atom }

    /// The least-populated bin; ties keep the first.  `None` when every
    /// atom sits at the origin.
    pub fn smallest(&self) -> Option<&SiteBin>
    {
        let mut best: Option<&SiteBin> = None;
        for bin in &self.bins {
            if best.map_or(true, |b| bin.members.len() < b.members.len()) {
                best = Some(bin);
            }
        }
        best
    }

    /// The smallest bin after dropping atoms that lie on `axis` (within
    /// tolerance).  Atoms on a candidate axis say nothing about rotations
    /// about it, so excluding them tightens the order bound.
    pub fn smallest_off_axis(&self, mol: &Molecule, axis: &Vector3<f64>, tol: &Tolerances) -> Vec<usize>
    {
        let u = axis.normalize();
        let mut best: Vec<usize> = vec![];
        for bin in &self.bins {
            let keep: Vec<usize> =
                bin.members.iter().cloned()
                    .filter(|&i| mol.atom(i).position().coords.cross(&u).norm() > tol.dist)
                    .collect();
            if !keep.is_empty() && (best.is_empty() || keep.len() < best.len()) {
                best = keep;
            }
        }
        best
    }
}

/// Principal axes and normalized principal moments of a centered molecule.
#[derive(Debug)]
pub(crate) struct InertiaFrame {
    /// Unit eigenvectors of the inertia tensor, in eigensolver order.
    pub axes: [Vector3<f64>; 3],
    pub moments: [f64; 3],
}

/// Overall shape classification from the inertia spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InertialClass {
    Linear,
    SphericalTop,
    AsymmetricTop,
    /// Carries the index of the principal axis with the unique moment.
    SymmetricTop { unique: usize },
}

impl InertiaFrame {
    /// Mass-weighted second-moment tensor about the origin, normalized by
    /// the total moment so the spectrum does not scale with system size.
    pub fn of_molecule(mol: &Molecule) -> InertiaFrame
    {
        let mut tensor = Matrix3::zeros();
        let mut total = 0.0;
        for at in mol {
            let w = at.weight();
            let r = at.position().coords;
            tensor[(0, 0)] += w * (r.y * r.y + r.z * r.z);
            tensor[(1, 1)] += w * (r.x * r.x + r.z * r.z);
            tensor[(2, 2)] += w * (r.x * r.x + r.y * r.y);
            tensor[(0, 1)] -= w * r.x * r.y;
            tensor[(1, 2)] -= w * r.y * r.z;
            tensor[(0, 2)] -= w * r.x * r.z;
            total += w * r.norm_squared();
        }
        tensor[(1, 0)] = tensor[(0, 1)];
        tensor[(2, 1)] = tensor[(1, 2)];
        tensor[(2, 0)] = tensor[(0, 2)];
        if total > 0.0 {
            tensor /= total;
        }

        let eigen = tensor.symmetric_eigen();
        let axes = [
            eigen.eigenvectors.column(0).into_owned().normalize(),
            eigen.eigenvectors.column(1).into_owned().normalize(),
            eigen.eigenvectors.column(2).into_owned().normalize(),
        ];
        let moments = [
            eigen.eigenvalues[0],
            eigen.eigenvalues[1],
            eigen.eigenvalues[2],
        ];
        InertiaFrame { axes, moments }
    }

    /// Classify by the degeneracy pattern of the moments, in priority
    /// order: linear, spherical, asymmetric, symmetric.
    ///
    /// Two simultaneous near-degeneracies that disagree (a ≈ b, b ≈ c, but
    /// a ≉ c) cannot name a unique axis; that straddle is reported rather
    /// than silently defaulted.
    pub fn classify(&self, tol: &Tolerances) -> Result<InertialClass, AnalysisError>
    {Ok({
        let [a, b, c] = self.moments;
        if (a * b * c).abs() < tol.eig.powi(3) {
            return Ok(InertialClass::Linear);
        }
        let close = [
            (a - b).abs() < tol.eig,
            (a - c).abs() < tol.eig,
            (b - c).abs() < tol.eig,
        ];
        match close.iter().filter(|&&x| x).count() {
            3 => InertialClass::SphericalTop,
            0 => InertialClass::AsymmetricTop,
            1 => {
                let unique = match close {
                    [true, _, _] => 2,
                    [_, true, _] => 1,
                    _ => 0,
                };
                InertialClass::SymmetricTop { unique }
            }
            _ => throw!(AnalysisError::UnclassifiedTop {
                moments: self.moments,
                backtrace: Backtrace::new(),
            }),
        }
    })}
}
