//! Linear algebra over GF(2).
//!
//! Matrices are row-major `Vec<Vec<bool>>` with every row the same length.

/// Reduced row echelon form over GF(2).
///
/// Returns the reduced matrix and the pivot column of each non-zero row.
pub fn row_reduce(matrix: &[Vec<bool>], num_cols: usize) -> (Vec<Vec<bool>>, Vec<usize>) {
    let mut rows: Vec<Vec<bool>> = matrix.to_vec();
    let mut pivots = Vec::new();
    let mut lead = 0;

    for col in 0..num_cols {
        let Some(found) = (lead..rows.len()).find(|&r| rows[r][col]) else {
            continue;
        };
        rows.swap(lead, found);
        let pivot_row = rows[lead].clone();
        for (r, row) in rows.iter_mut().enumerate() {
            if r != lead && row[col] {
                for (bit, &p) in row.iter_mut().zip(&pivot_row) {
                    *bit ^= p;
                }
            }
        }
        pivots.push(col);
        lead += 1;
        if lead == rows.len() {
            break;
        }
    }

    rows.truncate(pivots.len());
    (rows, pivots)
}

/// Basis of the null space `{v : M·v = 0}` over GF(2).
///
/// One basis vector per free column, in ascending column order.
pub fn kernel(matrix: &[Vec<bool>], num_cols: usize) -> Vec<Vec<bool>> {
    let (rref, pivots) = row_reduce(matrix, num_cols);
    (0..num_cols)
        .filter(|col| !pivots.contains(col))
        .map(|free| {
            let mut v = vec![false; num_cols];
            v[free] = true;
            for (row, &pivot) in rref.iter().zip(&pivots) {
                v[pivot] = row[free];
            }
            v
        })
        .collect()
}
