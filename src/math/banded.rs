//! Symmetric positive-definite solver for bandwidth-2 systems.
//!
//! The Hodrick-Prescott trend solves `(I + λ DᵀD) τ = y`, where `D` is the
//! second-difference operator. The system matrix is pentadiagonal, so a
//! banded Cholesky factorization solves it in O(n) instead of the O(n³) a
//! dense solve would cost. This matters for the one-sided filter, which
//! re-solves on every prefix.

/// Lower band of a symmetric pentadiagonal matrix.
///
/// `diag[i] = A[i][i]`, `sub1[i] = A[i+1][i]`, `sub2[i] = A[i+2][i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pentadiagonal {
    pub diag: Vec<f64>,
    pub sub1: Vec<f64>,
    pub sub2: Vec<f64>,
}

impl Pentadiagonal {
    /// `I + λ DᵀD` for a series of length `n`.
    pub fn hp_system(n: usize, lambda: f64) -> Self {
        let mut diag = vec![1.0; n];
        let mut sub1 = vec![0.0; n.saturating_sub(1)];
        let mut sub2 = vec![0.0; n.saturating_sub(2)];
        const ROW: [f64; 3] = [1.0, -2.0, 1.0];

        // Accumulate DᵀD one difference row at a time.
        for i in 0..n.saturating_sub(2) {
            for a in 0..3 {
                diag[i + a] += lambda * ROW[a] * ROW[a];
                for b in 0..a {
                    let v = lambda * ROW[a] * ROW[b];
                    match a - b {
                        1 => sub1[i + b] += v,
                        _ => sub2[i + b] += v,
                    }
                }
            }
        }

        Self { diag, sub1, sub2 }
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        match row - col {
            0 => self.diag[row],
            1 => self.sub1[col],
            2 => self.sub2[col],
            _ => 0.0,
        }
    }

    /// Solve `A x = b` by banded Cholesky. `None` if `A` is not positive definite.
    pub fn solve(&self, b: &[f64]) -> Option<Vec<f64>> {
        let n = self.len();
        if b.len() != n {
            return None;
        }

        // l[i][k] stores L[i][i - k] for k = 0, 1, 2.
        let mut l = vec![[0.0_f64; 3]; n];
        let at = |l: &Vec<[f64; 3]>, i: usize, j: usize| -> f64 {
            if j > i || i - j > 2 { 0.0 } else { l[i][i - j] }
        };

        for j in 0..n {
            let lo = j.saturating_sub(2);
            let mut d = self.get(j, j);
            for k in lo..j {
                let v = at(&l, j, k);
                d -= v * v;
            }
            if !(d > 0.0 && d.is_finite()) {
                return None;
            }
            let d = d.sqrt();
            l[j][0] = d;

            for i in (j + 1)..n.min(j + 3) {
                let mut v = self.get(i, j);
                for k in i.saturating_sub(2)..j {
                    v -= at(&l, i, k) * at(&l, j, k);
                }
                l[i][i - j] = v / d;
            }
        }

        // Forward: L z = b.
        let mut z = vec![0.0; n];
        for i in 0..n {
            let mut v = b[i];
            for k in i.saturating_sub(2)..i {
                v -= at(&l, i, k) * z[k];
            }
            z[i] = v / l[i][0];
        }

        // Backward: Lᵀ x = z.
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut v = z[i];
            for k in (i + 1)..n.min(i + 3) {
                v -= at(&l, k, i) * x[k];
            }
            x[i] = v / l[i][0];
        }

        Some(x)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{DMatrix, DVector};

    use super::*;

    fn dense(p: &Pentadiagonal) -> DMatrix<f64> {
        let n = p.len();
        DMatrix::from_fn(n, n, |i, j| {
            let (r, c) = if i >= j { (i, j) } else { (j, i) };
            if r - c <= 2 { p.get(r, c) } else { 0.0 }
        })
    }

    #[test]
    fn hp_system_has_known_interior_stencil() {
        let p = Pentadiagonal::hp_system(6, 1.0);
        assert_eq!(p.diag, vec![2.0, 6.0, 7.0, 7.0, 6.0, 2.0]);
        assert_eq!(p.sub1, vec![-2.0, -4.0, -4.0, -4.0, -2.0]);
        assert_eq!(p.sub2, vec![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn banded_solve_matches_dense_cholesky() {
        let y = [3.0, 1.5, 4.0, 1.0, 5.5, 9.0, 2.0, 6.5, 5.0, 3.5];
        let p = Pentadiagonal::hp_system(y.len(), 1600.0);
        let x = p.solve(&y).unwrap();

        let chol = dense(&p).cholesky().unwrap();
        let expected = chol.solve(&DVector::from_column_slice(&y));
        for (a, b) in x.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-8, "{a} vs {b}");
        }
    }

    #[test]
    fn short_systems_are_identity() {
        let p = Pentadiagonal::hp_system(2, 1600.0);
        assert_eq!(p.solve(&[1.0, 2.0]).unwrap(), vec![1.0, 2.0]);
        assert!(Pentadiagonal::hp_system(0, 1.0).solve(&[]).unwrap().is_empty());
    }
}
