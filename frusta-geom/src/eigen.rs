//! Symmetric 3x3 eigen-decomposition used by the OBB fit.

use glam::{DMat3, DVec3, Mat3, Vec3};

const OFF_DIAGONAL_TOLERANCE: f64 = 1e-12;
const MAX_SWEEPS: usize = 32;

/// Mean and covariance matrix of a non-empty point set.
pub(crate) fn covariance(points: &[Vec3]) -> (Vec3, Mat3) {
    let n = points.len().max(1) as f64;
    let mean = points.iter().fold(DVec3::ZERO, |acc, p| acc + p.as_dvec3()) / n;

    let (mut xx, mut xy, mut xz, mut yy, mut yz, mut zz) = (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    for p in points {
        let d = p.as_dvec3() - mean;
        xx += d.x * d.x;
        xy += d.x * d.y;
        xz += d.x * d.z;
        yy += d.y * d.y;
        yz += d.y * d.z;
        zz += d.z * d.z;
    }

    let cov = DMat3::from_cols(
        DVec3::new(xx, xy, xz),
        DVec3::new(xy, yy, yz),
        DVec3::new(xz, yz, zz),
    ) * (1.0 / n);
    (mean.as_vec3(), cov.as_mat3())
}

/// Cyclic Jacobi rotations on a symmetric matrix.
///
/// Returns the eigenvalues and a matrix whose columns are the matching unit
/// eigenvectors. Only the upper triangle of `m` is read.
pub(crate) fn symmetric_eigen(m: Mat3) -> (Vec3, Mat3) {
    let m = m.as_dmat3();
    let mut a = [
        [m.x_axis.x, m.y_axis.x, m.z_axis.x],
        [m.y_axis.x, m.y_axis.y, m.z_axis.y],
        [m.z_axis.x, m.z_axis.y, m.z_axis.z],
    ];
    let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    for _ in 0..MAX_SWEEPS {
        // Largest off-diagonal element.
        let (mut p, mut q) = (0, 1);
        if a[0][1].abs() < a[0][2].abs() {
            q = 2;
        }
        if a[p][q].abs() < a[1][2].abs() {
            p = 1;
            q = 2;
        }
        if a[p][q].abs() < OFF_DIAGONAL_TOLERANCE {
            break;
        }

        let app = a[p][p];
        let aqq = a[q][q];
        let apq = a[p][q];
        let angle = 0.5 * (2.0 * apq).atan2(aqq - app);
        let (s, c) = angle.sin_cos();

        for k in 0..3 {
            if k == p || k == q {
                continue;
            }
            let akp = a[k][p];
            let akq = a[k][q];
            a[k][p] = c * akp - s * akq;
            a[p][k] = a[k][p];
            a[k][q] = c * akq + s * akp;
            a[q][k] = a[k][q];
        }
        a[p][p] = c * c * app - 2.0 * s * c * apq + s * s * aqq;
        a[q][q] = s * s * app + 2.0 * s * c * apq + c * c * aqq;
        a[p][q] = 0.0;
        a[q][p] = 0.0;

        for row in v.iter_mut() {
            let vp = row[p];
            let vq = row[q];
            row[p] = c * vp - s * vq;
            row[q] = s * vp + c * vq;
        }
    }

    let values = DVec3::new(a[0][0], a[1][1], a[2][2]);
    let vectors = DMat3::from_cols(
        DVec3::new(v[0][0], v[1][0], v[2][0]),
        DVec3::new(v[0][1], v[1][1], v[2][1]),
        DVec3::new(v[0][2], v[1][2], v[2][2]),
    );
    (values.as_vec3(), vectors.as_mat3())
}
