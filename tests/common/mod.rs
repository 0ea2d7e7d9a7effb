#![allow(dead_code)] // not every fixture is used by every test binary

use molsym::{Atom, Element, Molecule};

pub fn molecule(atoms: &[(&str, [f64; 3])]) -> Molecule
{
    atoms.iter()
        .map(|&(symbol, [x, y, z])| {
            Atom::from_coords(Element::from_symbol(symbol).unwrap(), x, y, z)
        })
        .collect()
}

fn ring(symbol: &'static str, radius: f64, z: f64, angles_deg: &[f64]) -> Vec<(&'static str, [f64; 3])>
{
    angles_deg.iter()
        .map(|a| {
            let a = a.to_radians();
            (symbol, [radius * a.cos(), radius * a.sin(), z])
        })
        .collect()
}

pub fn water() -> Molecule
{
    molecule(&[
        ("O", [0.0, 0.0, 0.0]),
        ("H", [0.757, 0.0, 0.587]),
        ("H", [-0.757, 0.0, 0.587]),
    ])
}

pub fn boron_trifluoride() -> Molecule
{
    let mut atoms = vec![("B", [0.0, 0.0, 0.0])];
    atoms.extend(ring("F", 1.30, 0.0, &[0.0, 120.0, 240.0]));
    molecule(&atoms)
}

pub fn methane() -> Molecule
{
    let k = 0.629;
    molecule(&[
        ("C", [0.0, 0.0, 0.0]),
        ("H", [k, k, k]),
        ("H", [k, -k, -k]),
        ("H", [-k, k, -k]),
        ("H", [-k, -k, k]),
    ])
}

/// Methane with one hydrogen relabeled; breaks Td down to C3v.
pub fn fluoromethane() -> Molecule
{
    let k = 0.629;
    molecule(&[
        ("C", [0.0, 0.0, 0.0]),
        ("F", [k, k, k]),
        ("H", [k, -k, -k]),
        ("H", [-k, k, -k]),
        ("H", [-k, -k, k]),
    ])
}

pub fn carbon_dioxide() -> Molecule
{
    molecule(&[
        ("C", [0.0, 0.0, 0.0]),
        ("O", [0.0, 0.0, 1.16]),
        ("O", [0.0, 0.0, -1.16]),
    ])
}

pub fn hydrogen_cyanide() -> Molecule
{
    molecule(&[
        ("H", [0.0, 0.0, -1.064]),
        ("C", [0.0, 0.0, 0.0]),
        ("N", [0.0, 0.0, 1.156]),
    ])
}

pub fn ammonia() -> Molecule
{
    let mut atoms = vec![("N", [0.0, 0.0, 0.0])];
    atoms.extend(ring("H", 0.94, -0.38, &[0.0, 120.0, 240.0]));
    molecule(&atoms)
}

pub fn benzene() -> Molecule
{
    let angles: Vec<f64> = (0..6).map(|k| f64::from(k) * 60.0).collect();
    let mut atoms = ring("C", 1.397, 0.0, &angles);
    atoms.extend(ring("H", 2.481, 0.0, &angles));
    molecule(&atoms)
}

pub fn staggered_ethane() -> Molecule
{
    let mut atoms = vec![
        ("C", [0.0, 0.0, 0.768]),
        ("C", [0.0, 0.0, -0.768]),
    ];
    atoms.extend(ring("H", 1.02, 1.16, &[0.0, 120.0, 240.0]));
    atoms.extend(ring("H", 1.02, -1.16, &[60.0, 180.0, 300.0]));
    molecule(&atoms)
}

pub fn sulfur_hexafluoride() -> Molecule
{
    let r = 1.56;
    molecule(&[
        ("S", [0.0, 0.0, 0.0]),
        ("F", [r, 0.0, 0.0]),
        ("F", [-r, 0.0, 0.0]),
        ("F", [0.0, r, 0.0]),
        ("F", [0.0, -r, 0.0]),
        ("F", [0.0, 0.0, r]),
        ("F", [0.0, 0.0, -r]),
    ])
}

pub fn trans_dichloroethene() -> Molecule
{
    molecule(&[
        ("C", [0.66, 0.0, 0.0]),
        ("C", [-0.66, 0.0, 0.0]),
        ("Cl", [1.5, 1.3, 0.0]),
        ("Cl", [-1.5, -1.3, 0.0]),
        ("H", [1.3, -1.0, 0.0]),
        ("H", [-1.3, 1.0, 0.0]),
    ])
}

pub fn ethylene() -> Molecule
{
    molecule(&[
        ("C", [0.67, 0.0, 0.0]),
        ("C", [-0.67, 0.0, 0.0]),
        ("H", [1.23, 0.92, 0.0]),
        ("H", [1.23, -0.92, 0.0]),
        ("H", [-1.23, 0.92, 0.0]),
        ("H", [-1.23, -0.92, 0.0]),
    ])
}

/// An inversion pair of each of three species; no planes, no axes.
pub fn inversion_only() -> Molecule
{
    molecule(&[
        ("Fe", [1.0, 0.2, 0.3]),
        ("Fe", [-1.0, -0.2, -0.3]),
        ("Ni", [0.4, 1.1, -0.2]),
        ("Ni", [-0.4, -1.1, 0.2]),
        ("Cu", [0.3, -0.5, 1.2]),
        ("Cu", [-0.3, 0.5, -1.2]),
    ])
}

/// Four unlike atoms in a plane; the plane is the only symmetry element.
pub fn mirror_only() -> Molecule
{
    molecule(&[
        ("Fe", [1.2, 0.0, 0.0]),
        ("Ni", [-0.6, 0.9, 0.0]),
        ("Cu", [-0.8, -1.1, 0.0]),
        ("Zn", [0.3, 0.8, 0.0]),
    ])
}

/// Four unlike atoms in general position.
pub fn no_symmetry() -> Molecule
{
    molecule(&[
        ("Fe", [1.2, 0.0, 0.1]),
        ("Ni", [-0.6, 0.9, -0.4]),
        ("Cu", [-0.8, -1.1, 0.3]),
        ("Zn", [0.3, 0.8, 0.9]),
    ])
}

/// Two misaligned S4 orbits of unlike species.  Either orbit alone would
/// be D2d; together only the roto-reflection survives.
pub fn s4_cage() -> Molecule
{
    fn orbit(symbol: &'static str, a: f64, b: f64, c: f64) -> Vec<(&'static str, [f64; 3])>
    {
        vec![
            (symbol, [a, b, c]),
            (symbol, [-b, a, -c]),
            (symbol, [-a, -b, c]),
            (symbol, [b, -a, -c]),
        ]
    }
    let mut atoms = orbit("Fe", 2.0, 0.6, 1.2);
    atoms.extend(orbit("Ni", 1.0, -1.6, 0.8));
    molecule(&atoms)
}
