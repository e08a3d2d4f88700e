use crate::BinaryMatrix;

/// Reduced row-echelon form of a binary matrix
#[derive(Debug, Clone)]
pub struct EchelonForm {
    pub reduced: BinaryMatrix,
    /// Pivot column of each leading row, in row order
    pub pivot_cols: Vec<usize>,
    /// Maps column indices to the row holding their pivot, None if not a pivot
    pub cols_to_rows: Vec<Option<usize>>,
}

impl EchelonForm {
    /// Gauss-Jordan elimination over GF(2).
    ///
    /// For the working row `r` and column `c` the pivot is the first row
    /// below `r` with a one in `c`; row `r` itself is used only when no later
    /// row qualifies. Columns without a candidate are skipped.
    pub fn reduce(matrix: &BinaryMatrix) -> Self {
        let m = matrix.rows();
        let n = matrix.cols();
        let mut reduced = matrix.clone();
        let mut pivot_cols = Vec::new();
        let mut cols_to_rows = vec![None; n];

        let mut r = 0;
        for col in 0..n {
            if r == m {
                break;
            }

            let pivot_row = ((r + 1)..m)
                .find(|&row| reduced.get(row, col))
                .or_else(|| reduced.get(r, col).then_some(r));

            let Some(pivot_row) = pivot_row else {
                continue;
            };

            reduced.swap_rows(r, pivot_row);

            // Eliminate this column in every other row
            for row in 0..m {
                if row != r && reduced.get(row, col) {
                    reduced.add_row(row, r);
                }
            }

            cols_to_rows[col] = Some(r);
            pivot_cols.push(col);
            r += 1;
        }

        Self {
            reduced,
            pivot_cols,
            cols_to_rows,
        }
    }

    pub fn rank(&self) -> usize {
        self.pivot_cols.len()
    }

    /// Columns that carry no pivot, ascending
    pub fn free_cols(&self) -> impl Iterator<Item = usize> + '_ {
        self.cols_to_rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_none())
            .map(|(col, _)| col)
    }

    /// Basis of the null space, one row per free column.
    ///
    /// Row `f` has a one at the free column itself and, at every pivot
    /// column `p_i`, the entry of the reduced matrix at `(i, f)`. Every row
    /// of the reduced matrix is orthogonal to it, so is every row of the
    /// original matrix.
    pub fn null_space(&self) -> BinaryMatrix {
        let n = self.reduced.cols();
        let free: Vec<usize> = self.free_cols().collect();
        let mut basis = BinaryMatrix::zeros(free.len(), n);

        for (h_row, &free_col) in free.iter().enumerate() {
            basis.put(h_row, free_col, true);
            for (pivot_row, &pivot_col) in self.pivot_cols.iter().enumerate() {
                if self.reduced.get(pivot_row, free_col) {
                    basis.put(h_row, pivot_col, true);
                }
            }
        }

        basis
    }
}

/// Parity-check matrix H with G·Hᵀ = 0 whose null space is the row space of G
pub fn parity_check_from_generator(generator: &BinaryMatrix) -> (BinaryMatrix, usize) {
    let echelon = EchelonForm::reduce(generator);
    (echelon.null_space(), echelon.rank())
}
