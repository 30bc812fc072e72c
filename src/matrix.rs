//! Integer distance matrices and the seam for external matrix providers.

use serde::{Deserialize, Serialize};

use crate::error::{ProblemError, SolveError};

/// A dense N×N matrix of non-negative integer travel costs, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Flatten a square matrix. Callers validate shape beforehand.
    pub(crate) fn from_rows(rows: &[Vec<i64>]) -> Self {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            data.extend_from_slice(row);
        }
        DistanceMatrix { data, size }
    }

    /// Cost of travelling from `from` to `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes, depot included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Copy the matrix back into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.data.chunks(self.size.max(1)).map(|row| row.to_vec()).collect()
    }
}

/// A geographic point as supplied to routing services.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Location {
            longitude,
            latitude,
        }
    }
}

/// Anything able to turn a list of locations into an integer cost matrix.
///
/// Live routing services are implemented outside this crate; the solver only
/// ever consumes the resulting matrix.
pub trait MatrixProvider {
    fn distance_matrix(&self, locations: &[Location]) -> Result<Vec<Vec<i64>>, SolveError>;
}

/// Offline provider using great-circle distances, rounded to whole metres.
#[derive(Debug, Clone, Copy)]
pub struct HaversineProvider {
    /// Multiplier applied to the metre distance, e.g. a detour factor for road networks.
    pub scale: f64,
}

const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

impl Default for HaversineProvider {
    fn default() -> Self {
        HaversineProvider { scale: 1.0 }
    }
}

impl HaversineProvider {
    /// Great-circle distance in metres between two locations.
    pub fn metres(from: &Location, to: &Location) -> f64 {
        let (lat1, lat2) = (from.latitude.to_radians(), to.latitude.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (to.longitude - from.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METRES * a.sqrt().asin()
    }
}

impl MatrixProvider for HaversineProvider {
    fn distance_matrix(&self, locations: &[Location]) -> Result<Vec<Vec<i64>>, SolveError> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(ProblemError::InvalidScale.into());
        }

        let n = locations.len();
        let mut matrix = vec![vec![0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let metres = Self::metres(&locations[i], &locations[j]) * self.scale;
                    matrix[i][j] = metres.round() as i64;
                }
            }
        }

        Ok(matrix)
    }
}

/// Convert a kilometre matrix from a routing service into integer metres.
///
/// Values are truncated toward zero after scaling. Negative or non-finite
/// entries are rejected.
pub fn kilometres_to_metres(matrix: &[Vec<f64>]) -> Result<Vec<Vec<i64>>, SolveError> {
    matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, &km)| {
                    if km.is_finite() && km >= 0.0 {
                        Ok((km * 1000.0) as i64)
                    } else {
                        Err(SolveError::from(ProblemError::InvalidDistance { from: i, to: j }))
                    }
                })
                .collect()
        })
        .collect()
}
