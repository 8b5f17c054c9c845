use arrayvec::ArrayVec;
use corner_core::{
    nalgebra::{Matrix3, SMatrix, SVector},
    sample_consensus::Estimator,
    Homography, PointMatch,
};

/// Similarity transform moving the centroid of `points` to the origin and
/// scaling their mean distance from it to `sqrt(2)`.
///
/// Returns `None` when all the points coincide.
fn normalizing_transform(points: impl Iterator<Item = (f64, f64)> + Clone) -> Option<Matrix3<f64>> {
    let n = points.clone().count() as f64;
    let (sx, sy) = points
        .clone()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (cx, cy) = (sx / n, sy / n);
    let mean_distance = points
        .map(|(x, y)| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt())
        .sum::<f64>()
        / n;
    if !mean_distance.is_finite() || mean_distance < 1e-12 {
        return None;
    }
    let s = std::f64::consts::SQRT_2 / mean_distance;
    Some(Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0))
}

fn apply(t: &Matrix3<f64>, (x, y): (f64, f64)) -> (f64, f64) {
    (t[(0, 0)] * x + t[(0, 2)], t[(1, 1)] * y + t[(1, 2)])
}

/// Accumulates `AᵀA` for the direct linear transform, where each match
/// contributes the two rows of `A h = 0`.
fn encode_dlt_normal_equations(
    matches: impl Iterator<Item = PointMatch>,
    t_marker: &Matrix3<f64>,
    t_frame: &Matrix3<f64>,
) -> SMatrix<f64, 9, 9> {
    let mut ata = SMatrix::<f64, 9, 9>::zeros();
    for PointMatch(a, b) in matches {
        let (x, y) = apply(t_marker, (a.x, a.y));
        let (u, v) = apply(t_frame, (b.x, b.y));
        let rows = [
            SVector::<f64, 9>::from_column_slice(&[x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y, -u]),
            SVector::<f64, 9>::from_column_slice(&[0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y, -v]),
        ];
        for row in &rows {
            ata += row * row.transpose();
        }
    }
    ata
}

/// Estimates a [`Homography`] with the normalized
/// [direct linear transform](https://en.wikipedia.org/wiki/Direct_linear_transformation)
/// from Hartley and Zisserman.
///
/// Exactly four matches give the minimal solution used inside a consensus
/// loop. Any larger set gives the algebraic least-squares fit, which is how
/// the inliers found by consensus are refined.
#[derive(Copy, Clone, Debug)]
pub struct FourPoint {
    pub epsilon: f64,
    pub iterations: usize,
}

impl FourPoint {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_matches<I>(&self, data: I) -> Option<Homography>
    where
        I: Iterator<Item = PointMatch> + Clone,
    {
        if data.clone().count() < Self::MIN_SAMPLES {
            return None;
        }
        let t_marker = normalizing_transform(data.clone().map(|PointMatch(a, _)| (a.x, a.y)))?;
        let t_frame = normalizing_transform(data.clone().map(|PointMatch(_, b)| (b.x, b.y)))?;
        let ata = encode_dlt_normal_equations(data, &t_marker, &t_frame);
        let eigens = ata.try_symmetric_eigen(self.epsilon, self.iterations)?;
        let h = eigens
            .eigenvalues
            .iter()
            .enumerate()
            .min_by_key(|&(_, &n)| float_ord::FloatOrd(n.abs()))
            .map(|(ix, _)| eigens.eigenvectors.column(ix).into_owned())?;
        let normalized = Matrix3::from_row_slice(h.as_slice());
        let mut homography = t_frame.try_inverse()? * normalized * t_marker;
        let scale = homography[(2, 2)];
        if scale.abs() > 1e-12 {
            homography /= scale;
        }
        let homography = Homography(homography);
        (!homography.is_degenerate()).then(|| homography)
    }
}

impl Default for FourPoint {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            iterations: 1000,
        }
    }
}

impl Estimator<PointMatch> for FourPoint {
    type Model = Homography;
    type ModelIter = ArrayVec<Homography, 1>;
    const MIN_SAMPLES: usize = 4;

    fn estimate<I>(&self, data: I) -> Self::ModelIter
    where
        I: Iterator<Item = PointMatch> + Clone,
    {
        self.from_matches(data.take(Self::MIN_SAMPLES))
            .into_iter()
            .collect()
    }
}
