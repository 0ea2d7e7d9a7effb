use std::fmt;

use failure::Backtrace;
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Translation3, Unit, Vector3};

use crate::AnalysisError;

/// Directions shorter than this cannot define a rotation axis or a mirror
/// normal.
const MIN_DIRECTION_NORM: f64 = 1e-6;

/// A symmetry operation on cartesian space.
///
/// Invariants:
///  - the matrix is an orthogonal affine map in homogeneous form
///    (reflections off the origin are conjugated by a translation, so the
///    stipulated origin stays fixed)
///  - the label is informational only; it never participates in equality
#[derive(Debug, Clone)]
pub struct CartOp {
    label: String,
    matrix: Matrix4<f64>,
}

impl Default for CartOp {
    fn default() -> Self
    { Self::eye() }
}

impl CartOp {
    /// The identity operation.
    pub fn eye() -> CartOp
    { CartOp { label: "E".to_string(), matrix: Matrix4::identity() } }

    /// Inversion of all three spatial coordinates through the origin.
    pub fn inversion() -> CartOp
    {
        let mut matrix = Matrix4::identity();
        matrix[(0, 0)] = -1.0;
        matrix[(1, 1)] = -1.0;
        matrix[(2, 2)] = -1.0;
        CartOp { label: "i".to_string(), matrix }
    }

    /// Right-handed rotation by `angle_deg` degrees about the line through
    /// `origin` parallel to `axis`.
    ///
    /// The axis need not be normalized.  A near-zero axis is a caller
    /// contract violation and fails fast with `DegenerateAxis`.
    pub fn rotation(origin: &Point3<f64>, axis: &Vector3<f64>, angle_deg: f64) -> Result<CartOp, AnalysisError>
    {Ok({
        let axis = Unit::try_new(*axis, MIN_DIRECTION_NORM)
            .ok_or_else(|| AnalysisError::DegenerateAxis(Backtrace::new()))?;
        let rot = Rotation3::from_axis_angle(&axis, angle_deg.to_radians());
        CartOp {
            label: order_label("R", angle_deg),
            matrix: about(origin, rot.to_homogeneous()),
        }
    })}

    /// Mirror through the plane with normal `normal` passing through
    /// `origin`.  Same `DegenerateAxis` contract as `rotation`.
    pub fn reflection(origin: &Point3<f64>, normal: &Vector3<f64>) -> Result<CartOp, AnalysisError>
    {Ok({
        let normal = Unit::try_new(*normal, MIN_DIRECTION_NORM)
            .ok_or_else(|| AnalysisError::DegenerateAxis(Backtrace::new()))?;
        let n = normal.into_inner();
        let householder: Matrix3<f64> = Matrix3::identity() - 2.0 * (n * n.transpose());
        CartOp {
            label: "σ".to_string(),
            matrix: about(origin, householder.to_homogeneous()),
        }
    })}

    /// Rotation by `angle_deg` about `axis`, then reflection through the
    /// plane perpendicular to `axis` at `origin`.
    pub fn roto_reflection(origin: &Point3<f64>, axis: &Vector3<f64>, angle_deg: f64) -> Result<CartOp, AnalysisError>
    {Ok({
        let rot = Self::rotation(origin, axis, angle_deg)?;
        let mirror = Self::reflection(origin, axis)?;
        CartOp {
            label: order_label("S", angle_deg),
            matrix: rot.matrix * mirror.matrix,
        }
    })}

    /// Conventional group operator: `a.of(b)` applies `b` first, then `a`
    /// (the matrix product `A·B`).
    pub fn of(&self, other: &CartOp) -> CartOp
    {
        CartOp {
            label: format!("{}.{}", self.label, other.label),
            matrix: self.matrix * other.matrix,
        }
    }

    /// Flipped group operator.
    ///
    /// `a.then(b) == b.of(a)`.
    pub fn then(&self, other: &CartOp) -> CartOp
    { other.of(self) }

    /// The algebraic inverse operation.
    pub fn inverse(&self) -> CartOp
    {
        let matrix = self.matrix.try_inverse()
            .expect("(BUG) singular symmetry operation!?");
        CartOp { label: format!("{}^-1", self.label), matrix }
    }

    /// Transforms a point.  No side effects.
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64>
    { self.matrix.transform_point(point) }

    /// True iff every matrix entry of `a` and `b` differs by at most `tol`.
    pub fn approx_eq(a: &CartOp, b: &CartOp, tol: f64) -> bool
    {
        a.matrix.iter().zip(b.matrix.iter())
            .all(|(x, y)| (x - y).abs() <= tol)
    }

    pub fn label(&self) -> &str
    { &self.label }

    pub fn matrix(&self) -> &Matrix4<f64>
    { &self.matrix }
}

// Conjugate an origin-fixing operation so it fixes `origin` instead.
fn about(origin: &Point3<f64>, op: Matrix4<f64>) -> Matrix4<f64>
{
    if origin.coords.norm() <= MIN_DIRECTION_NORM {
        return op;
    }
    let to = Translation3::from(origin.coords).to_homogeneous();
    let from = Translation3::from(-origin.coords).to_homogeneous();
    to * op * from
}

fn order_label(prefix: &str, angle_deg: f64) -> String
{
    match angle_deg == 0.0 {
        true => prefix.to_string(),
        false => format!("{}{}", prefix, (360.0 / angle_deg).round()),
    }
}

impl fmt::Display for CartOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "{}", self.label)?;
        for i in 0..3 {
            writeln!(f, "{:.4} {:.4} {:.4} {:.4}",
                self.matrix[(i, 0)], self.matrix[(i, 1)],
                self.matrix[(i, 2)], self.matrix[(i, 3)])?;
        }
        Ok(())
    }
}
