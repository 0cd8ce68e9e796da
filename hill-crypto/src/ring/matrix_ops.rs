use crate::errors::HillCipherError;
use crate::ring::{Matrix, Ring, Vector};

/// A·x where A is an m×n matrix and x is a length–n vector.
/// Returns an m‐vector.
pub fn matrix_vector_mul(
    a: &Matrix,
    x: &Vector,
    ring: &Ring,
) -> Result<Vector, HillCipherError> {
    let m = a.len();
    if m == 0 {
        return Ok(Vec::new());
    }
    let n = a[0].len();
    if x.len() != n {
        return Err(HillCipherError::DimensionMismatch(format!(
            "Matrix columns ({}) must match vector length ({})",
            n,
            x.len()
        )));
    }

    let mut y = vec![0i64; m];
    for i in 0..m {
        if a[i].len() != n {
            return Err(HillCipherError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                a[i].len(),
                n
            )));
        }
        let mut sum = 0i64;
        for j in 0..n {
            let term = ring.mul(a[i][j], x[j]);
            sum = ring.add(sum, term);
        }
        y[i] = sum;
    }
    Ok(y)
}

/// Computes the matrix product `C = AB` modulo `m`, where `m` is the modulus of the ring.
///
/// # Errors
///
/// Returns `HillCipherError::DimensionMismatch` if the inner dimensions of the matrices do not
/// match or if rows within the matrices have inconsistent lengths.
pub fn matrix_mul(a: &Matrix, b: &Matrix, ring: &Ring) -> Result<Matrix, HillCipherError> {
    let n = a.len(); // rows in A
    if n == 0 {
        return Ok(Matrix::new());
    }
    let p = b[0].len(); // cols in B
    let m_common = a[0].len(); // cols in A

    if b.len() != m_common {
        return Err(HillCipherError::DimensionMismatch(format!(
            "Inner dimensions must match for matrix multiplication ({} vs {})",
            m_common,
            b.len()
        )));
    }

    let mut c = vec![vec![0; p]; n];

    for i in 0..n {
        if a[i].len() != m_common {
            return Err(HillCipherError::DimensionMismatch(format!(
                "Matrix A row {} has incorrect length (expected {})",
                i, m_common
            )));
        }
        for j in 0..p {
            let mut sum = 0i64;
            #[allow(clippy::needless_range_loop)]
            for k in 0..m_common {
                if b[k].len() != p {
                    return Err(HillCipherError::DimensionMismatch(format!(
                        "Matrix B row {} has incorrect length (expected {})",
                        k, p
                    )));
                }
                let term = ring.mul(a[i][k], b[k][j]);
                sum = ring.add(sum, term);
            }
            c[i][j] = sum;
        }
    }
    Ok(c)
}

/// Creates an identity matrix of size `n`.
pub fn identity_matrix(n: usize) -> Matrix {
    let mut identity = vec![vec![0; n]; n];
    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        identity[i][i] = 1;
    }
    identity
}

/// Validates that `matrix` is square with a positive dimension and no ragged
/// rows, returning that dimension.
pub fn square_dim(matrix: &Matrix) -> Result<usize, HillCipherError> {
    let n = matrix.len();
    if n == 0 {
        return Err(HillCipherError::DimensionMismatch(
            "Matrix dimension must be positive".into(),
        ));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(HillCipherError::DimensionMismatch(format!(
                "Matrix must be square: row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
    }
    Ok(n)
}

/// The (i, j) minor: `matrix` with row `i` and column `j` removed.
fn minor(matrix: &Matrix, i: usize, j: usize) -> Matrix {
    matrix
        .iter()
        .enumerate()
        .filter(|&(r, _)| r != i)
        .map(|(_, row)| {
            row.iter()
                .enumerate()
                .filter(|&(c, _)| c != j)
                .map(|(_, &v)| v)
                .collect()
        })
        .collect()
}

/// Computes `det(matrix) mod m` by cofactor (Laplace) expansion along the
/// first row. Exact for the small key dimensions the cipher uses; every
/// intermediate product and sum goes through the ring, so the result is
/// always in `[0, m-1]`.
pub fn determinant(matrix: &Matrix, ring: &Ring) -> Result<i64, HillCipherError> {
    square_dim(matrix)?;
    Ok(det_unchecked(matrix, ring))
}

fn det_unchecked(matrix: &Matrix, ring: &Ring) -> i64 {
    let n = matrix.len();
    if n == 1 {
        return ring.normalize(matrix[0][0]);
    }

    let mut det = 0i64;
    for j in 0..n {
        let entry = ring.normalize(matrix[0][j]);
        if entry == 0 {
            continue;
        }
        let sub_det = det_unchecked(&minor(matrix, 0, j), ring);
        let mut term = ring.mul(entry, sub_det);
        // cofactor sign (-1)^(0+j), resolved in the ring before accumulation
        if j % 2 == 1 {
            term = ring.neg(term);
        }
        det = ring.add(det, term);
    }
    det
}

/// Computes the adjugate: the transpose of the cofactor matrix, with each
/// cofactor `(-1)^(i+j) · det(minor(i, j))` reduced into `[0, m-1]`.
pub fn adjugate(matrix: &Matrix, ring: &Ring) -> Result<Matrix, HillCipherError> {
    let n = square_dim(matrix)?;

    let mut adj = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            let mut cofactor = det_unchecked(&minor(matrix, i, j), ring);
            if (i + j) % 2 == 1 {
                cofactor = ring.neg(cofactor);
            }
            // transposed placement
            adj[j][i] = cofactor;
        }
    }
    Ok(adj)
}

/// Attempts to find the inverse of a square matrix modulo `m`.
///
/// Builds the inverse as `det⁻¹ · adj(A)`: determinant by cofactor expansion,
/// scalar inverse of the determinant by the extended Euclidean algorithm,
/// then the adjugate scaled entrywise.
///
/// # Errors
///
/// Returns `HillCipherError::SingularKey` when `gcd(det mod m, m) != 1`
/// (including a zero determinant) and `HillCipherError::DimensionMismatch`
/// for non-square input.
pub fn matrix_inverse(matrix: &Matrix, ring: &Ring) -> Result<Matrix, HillCipherError> {
    square_dim(matrix)?;

    let det = determinant(matrix, ring)?;
    let det_inv = ring.inv(det).map_err(|_| {
        HillCipherError::SingularKey(format!(
            "Key matrix is not invertible mod {}: det = {}",
            ring.modulus(),
            det
        ))
    })?;

    let adj = adjugate(matrix, ring)?;
    let inv = adj
        .iter()
        .map(|row| row.iter().map(|&v| ring.mul(det_inv, v)).collect())
        .collect();

    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ring() -> Ring {
        Ring::try_with(41).unwrap()
    }

    #[test]
    fn test_matrix_vector_mul_ok() {
        let ring = test_ring();
        let a = vec![vec![1, 2], vec![3, 4]];
        let x = vec![20, 30];
        // R1: (1*20 + 2*30) % 41 = 80 % 41 = 39
        // R2: (3*20 + 4*30) % 41 = 180 % 41 = 16
        let expected = vec![39, 16];
        assert_eq!(matrix_vector_mul(&a, &x, &ring).unwrap(), expected);
    }

    #[test]
    fn test_matrix_vector_mul_dimension_mismatch() {
        let ring = test_ring();
        let a = vec![vec![1, 2], vec![3, 4]];
        let x = vec![5, 6, 7]; // Incorrect dimension
        assert!(matrix_vector_mul(&a, &x, &ring).is_err());
    }

    #[test]
    fn test_matrix_mul_ok() {
        let ring = Ring::try_with(13).unwrap();
        let a = vec![vec![1, 2], vec![3, 4]]; // 2x2
        let b = vec![vec![5, 6], vec![7, 8]]; // 2x2
        // C[0][0] = (1*5 + 2*7) % 13 = 6
        // C[0][1] = (1*6 + 2*8) % 13 = 9
        // C[1][0] = (3*5 + 4*7) % 13 = 4
        // C[1][1] = (3*6 + 4*8) % 13 = 11
        let expected = vec![vec![6, 9], vec![4, 11]];
        assert_eq!(matrix_mul(&a, &b, &ring).unwrap(), expected);
    }

    #[test]
    fn test_identity_matrix() {
        let expected3 = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
        assert_eq!(identity_matrix(3), expected3);
        let expected1 = vec![vec![1]];
        assert_eq!(identity_matrix(1), expected1);
        let expected0: Matrix = Vec::new();
        assert_eq!(identity_matrix(0), expected0);
    }

    #[test]
    fn test_square_dim() {
        assert_eq!(square_dim(&vec![vec![1, 2], vec![3, 4]]).unwrap(), 2);
        assert!(square_dim(&Vec::new()).is_err());
        assert!(square_dim(&vec![vec![1, 2, 3], vec![4, 5, 6]]).is_err());
        assert!(square_dim(&vec![vec![1, 2], vec![3]]).is_err());
    }

    #[test]
    fn test_determinant_small() {
        let ring = test_ring();
        assert_eq!(determinant(&vec![vec![7]], &ring).unwrap(), 7);
        // 1*4 - 2*3 = -2 = 39 mod 41
        let a = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(determinant(&a, &ring).unwrap(), 39);
        // singular: duplicated rows
        let b = vec![vec![1, 2], vec![1, 2]];
        assert_eq!(determinant(&b, &ring).unwrap(), 0);
    }

    #[test]
    fn test_determinant_reference_key() {
        let ring = test_ring();
        let key = vec![
            vec![5, 15, 18, 15, 10],
            vec![22, 10, 35, 10, 37],
            vec![28, 33, 31, 7, 30],
            vec![14, 35, 33, 38, 28],
            vec![30, 0, 37, 26, 6],
        ];
        assert_eq!(determinant(&key, &ring).unwrap(), 15);
    }

    #[test]
    fn test_adjugate_identity_relation() {
        let ring = test_ring();
        let a = vec![vec![3, 10, 20], vec![20, 9, 17], vec![9, 4, 17]];
        let det = determinant(&a, &ring).unwrap();
        let adj = adjugate(&a, &ring).unwrap();
        // A · adj(A) = det(A) · I
        let product = matrix_mul(&a, &adj, &ring).unwrap();
        let n = a.len();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { det } else { 0 };
                assert_eq!(product[i][j], expected, "at ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_matrix_inverse_ok() {
        let ring = Ring::try_with(26).unwrap(); // classic Hill textbook modulus
        let matrix = vec![vec![3, 3], vec![2, 5]];
        // det = 3*5 - 3*2 = 9, 9^-1 mod 26 = 3
        // adj = [[5, -3], [-2, 3]] mod 26 = [[5, 23], [24, 3]]
        // inv = 3 * adj mod 26 = [[15, 17], [20, 9]]
        let expected_inv = vec![vec![15, 17], vec![20, 9]];
        assert_eq!(matrix_inverse(&matrix, &ring).unwrap(), expected_inv);

        let product = matrix_mul(&matrix, &expected_inv, &ring).unwrap();
        assert_eq!(product, identity_matrix(2));
    }

    #[test]
    fn test_matrix_inverse_round_trip_mod_41() {
        let ring = test_ring();
        let key = vec![
            vec![5, 15, 18, 15, 10],
            vec![22, 10, 35, 10, 37],
            vec![28, 33, 31, 7, 30],
            vec![14, 35, 33, 38, 28],
            vec![30, 0, 37, 26, 6],
        ];
        let inv = matrix_inverse(&key, &ring).unwrap();
        let product = matrix_mul(&key, &inv, &ring).unwrap();
        assert_eq!(product, identity_matrix(5));
        let product_rev = matrix_mul(&inv, &key, &ring).unwrap();
        assert_eq!(product_rev, identity_matrix(5));
    }

    #[test]
    fn test_matrix_inverse_singular() {
        let ring = test_ring();
        // zero row
        let a = vec![vec![0, 0], vec![1, 2]];
        assert!(matches!(
            matrix_inverse(&a, &ring),
            Err(HillCipherError::SingularKey(_))
        ));
        // two identical rows
        let b = vec![vec![3, 7, 1], vec![3, 7, 1], vec![2, 5, 9]];
        assert!(matches!(
            matrix_inverse(&b, &ring),
            Err(HillCipherError::SingularKey(_))
        ));
    }

    #[test]
    fn test_matrix_inverse_non_square() {
        let ring = test_ring();
        let a = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert!(matches!(
            matrix_inverse(&a, &ring),
            Err(HillCipherError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_entries_reduced_mod_41() {
        let ring = test_ring();
        // entries above the modulus are taken mod 41 at use time
        let a = vec![vec![42, 2], vec![3, 45]];
        let b = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(
            determinant(&a, &ring).unwrap(),
            determinant(&b, &ring).unwrap()
        );
    }
}
