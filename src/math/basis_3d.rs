use super::{Vector3, TOLERANCE};
use crate::error::{GeometryError, Result};

/// An orthonormal frame whose `normal` is a projection direction and whose
/// `u`, `v` span the perpendicular projection plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthonormalBasis {
    /// Unit vector along the input direction.
    pub normal: Vector3,
    /// First in-plane unit vector.
    pub u: Vector3,
    /// Second in-plane unit vector, `normal × u`.
    pub v: Vector3,
}

/// Builds an orthonormal basis around `direction`.
///
/// The first in-plane vector starts from the coordinate axis least aligned
/// with `direction` (lowest index on ties) and is orthogonalized against it.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `direction` has zero length.
pub fn orthonormal_basis(direction: &Vector3) -> Result<OrthonormalBasis> {
    let len = direction.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let normal = direction / len;

    let mut axis = 0;
    for i in 1..3 {
        if normal[i].abs() < normal[axis].abs() {
            axis = i;
        }
    }
    let seed = Vector3::ith(axis, 1.0);

    let u = (seed - normal * seed.dot(&normal)).normalize();
    let v = normal.cross(&u);
    Ok(OrthonormalBasis { normal, u, v })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn assert_orthonormal(basis: &OrthonormalBasis) {
        assert_abs_diff_eq!(basis.normal.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis.u.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis.v.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis.normal.dot(&basis.u), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis.normal.dot(&basis.v), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis.u.dot(&basis.v), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn basis_along_z() {
        let basis = orthonormal_basis(&Vector3::new(0.0, 0.0, 3.0)).unwrap();
        assert_orthonormal(&basis);
        assert_abs_diff_eq!(basis.normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(basis.u, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(basis.v, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn basis_along_diagonal() {
        let basis = orthonormal_basis(&Vector3::new(1.0, 1.0, 1.0)).unwrap();
        assert_orthonormal(&basis);
    }

    #[test]
    fn basis_along_arbitrary_direction() {
        let basis = orthonormal_basis(&Vector3::new(0.454, 0.351, -0.818)).unwrap();
        assert_orthonormal(&basis);
    }

    #[test]
    fn zero_direction_is_rejected() {
        let err = orthonormal_basis(&Vector3::zeros()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ProjectionError::Geometry(GeometryError::ZeroVector)
        ));
    }
}
