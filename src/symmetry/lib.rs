#[macro_use] extern crate failure;
#[macro_use] extern crate log;

use failure::Backtrace;

macro_rules! throw {
    ($e:expr) => {
        return Err(::std::convert::Into::into($e))
    }
}

mod analysis;
mod bins;
mod group;
mod oper;
mod symbol;

//---------------------------
// public reexports; API

pub use crate::analysis::{analyze, analyze_with};
pub use crate::group::PointGroup;
pub use crate::oper::CartOp;
pub use crate::symbol::Schoenflies;

/// Comparison tolerances used throughout one analysis.
///
/// These are configuration, not data: nothing in the engine compares
/// floats against anything but these three knobs.
#[derive(Debug, Clone, Copy)]
pub struct Tolerances {
    /// Distance below which two positions refer to the same site.
    pub dist: f64,
    /// Degeneracy tolerance for the normalized principal moments.
    pub eig: f64,
    /// Entrywise tolerance when comparing operation matrices.
    pub matrix: f64,
}

impl Default for Tolerances {
    fn default() -> Self
    { Tolerances { dist: 0.3, eig: 0.01, matrix: 0.1 } }
}

/// Ways an analysis can fail.
///
/// A candidate operation that merely fails geometric validation is not an
/// error; rejection is expected, frequent, and silent.
#[derive(Debug, Fail)]
pub enum AnalysisError {
    /// A rotation or reflection was requested about a near-zero direction.
    #[fail(display = "rotation axis or mirror normal has near-zero length")]
    DegenerateAxis(Backtrace),

    /// Closure exceeded its safety bound.  Either a generator is not a
    /// true symmetry of the molecule or the matrix tolerance is too tight.
    #[fail(display = "symmetry group failed to close ({} operations)", size)]
    GroupClosureDivergence {
        size: usize,
        backtrace: Backtrace,
    },

    /// The principal moments carry two near-degeneracies that do not agree
    /// on a unique axis; no inertial class fits.
    #[fail(display = "principal moments straddle the degeneracy tolerance: {:?}", moments)]
    UnclassifiedTop {
        moments: [f64; 3],
        backtrace: Backtrace,
    },
}
