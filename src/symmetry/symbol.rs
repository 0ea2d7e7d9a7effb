use std::fmt;

/// Schoenflies classification of a molecular point group.
///
/// Symbol assembly is enum construction; the conventional text form comes
/// from `Display` ("C2v", "D3h", "S4", ...).  The linear groups print with
/// a `*` in place of ∞, and `Kh` is the sentinel for a lone atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schoenflies {
    C1,
    Cs,
    Ci,
    Cn(u32),
    Cnh(u32),
    Cnv(u32),
    /// 2n-fold roto-reflection group; the payload is 2n.
    Sn(u32),
    Dn(u32),
    Dnh(u32),
    Dnd(u32),
    T,
    Td,
    Th,
    O,
    Oh,
    I,
    Ih,
    CInfV,
    DInfH,
    Kh,
}

impl fmt::Display for Schoenflies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match *self {
            Schoenflies::C1 => write!(f, "C1"),
            Schoenflies::Cs => write!(f, "Cs"),
            Schoenflies::Ci => write!(f, "Ci"),
            Schoenflies::Cn(n) => write!(f, "C{}", n),
            Schoenflies::Cnh(n) => write!(f, "C{}h", n),
            Schoenflies::Cnv(n) => write!(f, "C{}v", n),
            Schoenflies::Sn(n) => write!(f, "S{}", n),
            Schoenflies::Dn(n) => write!(f, "D{}", n),
            Schoenflies::Dnh(n) => write!(f, "D{}h", n),
            Schoenflies::Dnd(n) => write!(f, "D{}d", n),
            Schoenflies::T => write!(f, "T"),
            Schoenflies::Td => write!(f, "Td"),
            Schoenflies::Th => write!(f, "Th"),
            Schoenflies::O => write!(f, "O"),
            Schoenflies::Oh => write!(f, "Oh"),
            Schoenflies::I => write!(f, "I"),
            Schoenflies::Ih => write!(f, "Ih"),
            Schoenflies::CInfV => write!(f, "C*v"),
            Schoenflies::DInfH => write!(f, "D*h"),
            Schoenflies::Kh => write!(f, "Kh"),
        }
    }
}
