use std::fmt;

use nalgebra::{Point3, Vector3};

use crate::Element;

/// An immutable atom: a chemical species at a cartesian position.
///
/// Equality is value equality over both fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    element: Element,
    position: Point3<f64>,
}

impl Atom {
    pub fn new(element: Element, position: Point3<f64>) -> Atom
    { Atom { element, position } }

    pub fn from_coords(element: Element, x: f64, y: f64, z: f64) -> Atom
    { Atom::new(element, Point3::new(x, y, z)) }

    pub fn element(&self) -> Element
    { self.element }

    pub fn position(&self) -> Point3<f64>
    { self.position }

    pub fn weight(&self) -> f64
    { self.element.weight() }

    fn translated(&self, by: &Vector3<f64>) -> Atom
    { Atom { element: self.element, position: self.position + by } }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} {:.4} {:.4} {:.4}",
            self.element, self.position.x, self.position.y, self.position.z)
    }
}

/// An ordered, finite collection of atoms.
///
/// The atom list is immutable once constructed; operations that "move"
/// atoms return a new `Molecule`.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Molecule
    { Molecule { atoms } }

    pub fn len(&self) -> usize
    { self.atoms.len() }

    pub fn is_empty(&self) -> bool
    { self.atoms.is_empty() }

    pub fn atoms(&self) -> &[Atom]
    { &self.atoms }

    pub fn atom(&self, index: usize) -> &Atom
    { &self.atoms[index] }

    /// Weighted mean position, `Σ(wᵢ·rᵢ) / Σwᵢ`.
    ///
    /// The origin for an empty molecule.
    pub fn center_of_mass(&self) -> Point3<f64>
    {
        let total: f64 = self.atoms.iter().map(Atom::weight).sum();
        if total == 0.0 {
            return Point3::origin();
        }
        let weighted: Vector3<f64> =
            self.atoms.iter()
                .map(|at| at.weight() * at.position().coords)
                .sum();
        Point3::from(weighted / total)
    }

    /// A copy of the molecule translated so its center of mass is the origin.
    pub fn centered(&self) -> Molecule
    { self.translated(&-self.center_of_mass().coords) }

    /// A copy of the molecule with every atom translated by `by`.
    pub fn translated(&self, by: &Vector3<f64>) -> Molecule
    { Molecule { atoms: self.atoms.iter().map(|at| at.translated(by)).collect() } }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom>
    { self.atoms.iter() }
}

impl std::iter::FromIterator<Atom> for Molecule {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Molecule
    { Molecule::new(iter.into_iter().collect()) }
}

impl<'a> IntoIterator for &'a Molecule {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter
    { self.atoms.iter() }
}
