//! Image-to-pitch homography from four point correspondences.

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

use crate::calibration::error::HomographyError;
use crate::calibration::quad::KeypointQuad;
use crate::pitch::PitchLayout;

/// Relative determinant below which a solution is treated as singular.
const MIN_RELATIVE_DET: f64 = 1e-12;

/// Relative triangle area below which three points count as collinear.
const MIN_RELATIVE_AREA: f64 = 1e-9;

/// 3×3 projective transform from normalized image coordinates to pitch coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    matrix: Matrix3<f64>,
}

impl Homography {
    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    /// Calibrate a quad against the known landmark positions of `layout`.
    pub fn from_quad(quad: &KeypointQuad, layout: &PitchLayout) -> Result<Self, HomographyError> {
        let dst = quad.classes.map(|class| layout.real_coords(class));
        Self::from_correspondences(&quad.points, &dst)
    }

    /// Solve for the homography mapping each `src[i]` onto `dst[i]`.
    ///
    /// With `h33` fixed to 1 the four correspondences give an 8×8 linear
    /// system, solved directly with LU decomposition.
    pub fn from_correspondences(
        src: &[[f64; 2]; 4],
        dst: &[[f64; 2]; 4],
    ) -> Result<Self, HomographyError> {
        if has_collinear_triple(src) || has_collinear_triple(dst) {
            return Err(HomographyError::Degenerate);
        }

        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for i in 0..4 {
            let [x, y] = src[i];
            let [u, v] = dst[i];

            // Row 2i:   [ x  y  1 | 0  0  0 | -u*x -u*y ] = u
            a[(2 * i, 0)] = x;
            a[(2 * i, 1)] = y;
            a[(2 * i, 2)] = 1.0;
            a[(2 * i, 6)] = -u * x;
            a[(2 * i, 7)] = -u * y;
            b[2 * i] = u;

            // Row 2i+1: [ 0  0  0 | x  y  1 | -v*x -v*y ] = v
            a[(2 * i + 1, 3)] = x;
            a[(2 * i + 1, 4)] = y;
            a[(2 * i + 1, 5)] = 1.0;
            a[(2 * i + 1, 6)] = -v * x;
            a[(2 * i + 1, 7)] = -v * y;
            b[2 * i + 1] = v;
        }

        let h = a.lu().solve(&b).ok_or(HomographyError::Degenerate)?;
        if h.iter().any(|value| !value.is_finite()) {
            return Err(HomographyError::NonFinite);
        }

        let matrix = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
        let scale = matrix.norm();
        if matrix.determinant().abs() < MIN_RELATIVE_DET * scale * scale * scale {
            return Err(HomographyError::Degenerate);
        }

        Ok(Self { matrix })
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Project one normalized image point: H * [x, y, 1]^T, divided by the scale term.
    ///
    /// Points on the horizon line map to NaN.
    pub fn project(&self, point: [f64; 2]) -> [f64; 2] {
        let p = self.matrix * Vector3::new(point[0], point[1], 1.0);
        if p[2].abs() < 1e-15 {
            return [f64::NAN, f64::NAN];
        }
        [p[0] / p[2], p[1] / p[2]]
    }

    pub fn project_points(&self, points: &[[f64; 2]]) -> Vec<[f64; 2]> {
        points.iter().map(|&p| self.project(p)).collect()
    }
}

/// A unique homography needs no three of the four points on one line.
fn has_collinear_triple(points: &[[f64; 2]; 4]) -> bool {
    let mut extent: f64 = 0.0;
    for i in 0..4 {
        for j in (i + 1)..4 {
            let dx = points[j][0] - points[i][0];
            let dy = points[j][1] - points[i][1];
            extent = extent.max(dx * dx + dy * dy);
        }
    }
    if extent == 0.0 {
        return true;
    }

    [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)]
        .iter()
        .any(|&(i, j, k)| {
            let (a, b, c) = (points[i], points[j], points[k]);
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            cross.abs() <= MIN_RELATIVE_AREA * extent
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{LandmarkClass, LandmarkLine};

    fn sample_quad() -> KeypointQuad {
        KeypointQuad {
            line_keys: [LandmarkLine::FarEndZone, LandmarkLine::FarCorners],
            points: [
                [0.152733, 0.375162],
                [0.825292, 0.372376],
                [0.230659, 0.288993],
                [0.753578, 0.285994],
            ],
            classes: [
                LandmarkClass::FarLeftEndZone,
                LandmarkClass::FarRightEndZone,
                LandmarkClass::FarLeftCorner,
                LandmarkClass::FarRightCorner,
            ],
            source_frame: 1107,
        }
    }

    #[test]
    fn test_quad_points_map_onto_pitch() {
        let quad = sample_quad();
        let layout = PitchLayout::ultimate();
        let h = Homography::from_quad(&quad, &layout).unwrap();

        let expected = [[0.0, 18.0], [37.0, 18.0], [0.0, 0.0], [37.0, 0.0]];
        for (projected, expected) in h.project_points(&quad.points).iter().zip(expected) {
            assert!((projected[0] - expected[0]).abs() < 1e-6, "{projected:?}");
            assert!((projected[1] - expected[1]).abs() < 1e-6, "{projected:?}");
        }
        assert_eq!(h.matrix()[(2, 2)], 1.0);
    }

    #[test]
    fn test_identity_correspondence() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let h = Homography::from_correspondences(&pts, &pts).unwrap();
        assert!((h.matrix() - Matrix3::identity()).norm() < 1e-12);
        let p = h.project([0.25, 0.75]);
        assert!((p[0] - 0.25).abs() < 1e-12);
        assert!((p[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_square_interior_point() {
        let src = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let dst = [[0.0, 0.0], [37.0, 0.0], [0.0, 100.0], [37.0, 100.0]];
        let h = Homography::from_correspondences(&src, &dst).unwrap();
        let p = h.project([0.5, 0.5]);
        assert!((p[0] - 18.5).abs() < 1e-9);
        assert!((p[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let src = [[0.0, 0.0], [0.25, 0.25], [0.5, 0.5], [1.0, 1.0]];
        let dst = [[0.0, 0.0], [37.0, 0.0], [0.0, 100.0], [37.0, 100.0]];
        assert_eq!(
            Homography::from_correspondences(&src, &dst),
            Err(HomographyError::Degenerate)
        );
    }

    #[test]
    fn test_repeated_points_are_degenerate() {
        let src = [[0.2, 0.2], [0.2, 0.2], [0.8, 0.2], [0.8, 0.8]];
        let dst = [[0.0, 0.0], [37.0, 0.0], [0.0, 100.0], [37.0, 100.0]];
        assert_eq!(
            Homography::from_correspondences(&src, &dst),
            Err(HomographyError::Degenerate)
        );
    }
}
