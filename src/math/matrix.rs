use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills every element with an independent draw from U[-1, 1].
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let dist = Uniform::new_inclusive(-1.0, 1.0);
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = dist.sample(rng);
            }
        }

        res
    }

    /// Builds a matrix from rows, rejecting ragged input.
    ///
    /// Returns `None` if any row differs in length from `cols`.
    pub fn from_rows(data: Vec<Vec<f64>>, cols: usize) -> Option<Matrix> {
        if data.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i][j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i][j] = value;
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }
}

/// Dot product over the common prefix of `a` and `b`; callers check lengths.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
