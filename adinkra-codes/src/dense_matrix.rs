use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenseError {
    #[error("Invalid matrix dimensions")]
    InvalidDimensions,
    #[error("Index out of bounds")]
    IndexOutOfBounds,
    #[error("Row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

const WORD_BITS: usize = 32;

/// Dense matrix over GF(2)
///
/// Bits are packed into u32 words, each row stored in consecutive words.
/// Unused bits past `n_cols` in the last word of a row are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<u32>,
    /// Number of u32s needed per row
    words_per_row: usize,
}

impl BinaryMatrix {
    /// All-zero matrix. Either dimension may be zero.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        let words_per_row = n_cols.div_ceil(WORD_BITS);
        Self {
            n_rows,
            n_cols,
            data: vec![0u32; n_rows * words_per_row],
            words_per_row,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::zeros(n, n);
        for i in 0..n {
            matrix.put(i, i, true);
        }
        matrix
    }

    /// Build a matrix from integer rows, reducing every entry mod 2.
    ///
    /// Negative entries reduce the same way as their absolute value, so a
    /// signed adjacency matrix maps `-1` and `1` both to a set bit.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self, DenseError>
    where
        R: AsRef<[T]>,
        T: Copy + Into<i64>,
    {
        let n_cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut matrix = Self::zeros(rows.len(), n_cols);

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(DenseError::RaggedRow {
                    row: i,
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                let value: i64 = value.into();
                if value.rem_euclid(2) == 1 {
                    matrix.put(i, j, true);
                }
            }
        }

        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.n_rows
    }
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// Out-of-range positions read as zero.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.n_rows || col >= self.n_cols {
            return false;
        }

        let word_index = row * self.words_per_row + col / WORD_BITS;
        let bit_index = col % WORD_BITS;

        (self.data[word_index] & (1u32 << bit_index)) != 0
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<(), DenseError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(DenseError::IndexOutOfBounds);
        }
        self.put(row, col, value);
        Ok(())
    }

    pub fn flip(&mut self, row: usize, col: usize) -> Result<(), DenseError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(DenseError::IndexOutOfBounds);
        }

        let word_index = row * self.words_per_row + col / WORD_BITS;
        self.data[word_index] ^= 1u32 << (col % WORD_BITS);
        Ok(())
    }

    /// Unchecked set for callers that already hold valid indices
    pub(crate) fn put(&mut self, row: usize, col: usize, value: bool) {
        let word_index = row * self.words_per_row + col / WORD_BITS;
        let mask = 1u32 << (col % WORD_BITS);

        if value {
            self.data[word_index] |= mask;
        } else {
            self.data[word_index] &= !mask;
        }
    }

    fn row_words(&self, row: usize) -> &[u32] {
        let start = row * self.words_per_row;
        &self.data[start..start + self.words_per_row]
    }

    /// Swap two rows
    pub(crate) fn swap_rows(&mut self, row1: usize, row2: usize) {
        if row1 == row2 {
            return;
        }

        for word_offset in 0..self.words_per_row {
            let idx1 = row1 * self.words_per_row + word_offset;
            let idx2 = row2 * self.words_per_row + word_offset;
            self.data.swap(idx1, idx2);
        }
    }

    /// Add row2 to row1 (XOR in GF(2))
    pub(crate) fn add_row(&mut self, row1: usize, row2: usize) {
        for word_offset in 0..self.words_per_row {
            let idx1 = row1 * self.words_per_row + word_offset;
            let idx2 = row2 * self.words_per_row + word_offset;
            self.data[idx1] ^= self.data[idx2];
        }
    }

    /// Get a row as a 0/1 vector
    pub fn row(&self, row: usize) -> Vec<u8> {
        (0..self.n_cols).map(|col| u8::from(self.get(row, col))).collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.n_rows).map(|row| self.row(row)).collect()
    }

    /// Set a row from a vector, reducing each entry mod 2
    pub fn set_row(&mut self, row: usize, bits: &[u8]) -> Result<(), DenseError> {
        if row >= self.n_rows {
            return Err(DenseError::IndexOutOfBounds);
        }
        if bits.len() != self.n_cols {
            return Err(DenseError::InvalidDimensions);
        }

        for (col, &bit) in bits.iter().enumerate() {
            self.put(row, col, bit & 1 == 1);
        }

        Ok(())
    }

    /// Number of ones in a row
    pub fn row_weight(&self, row: usize) -> usize {
        self.row_words(row)
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Hamming distance between two rows of this matrix
    pub fn row_distance(&self, row1: usize, row2: usize) -> usize {
        self.row_words(row1)
            .iter()
            .zip(self.row_words(row2))
            .map(|(a, b)| (a ^ b).count_ones() as usize)
            .sum()
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&word| word == 0)
    }

    /// Row vector times matrix: `v · M`, one output bit per column
    pub fn vec_mul(&self, v: &[u8]) -> Result<Vec<u8>, DenseError> {
        if v.len() != self.n_rows {
            return Err(DenseError::InvalidDimensions);
        }

        Ok(self.row_combination(|row| v[row] & 1 == 1))
    }

    /// XOR of the rows for which `selected` holds, as a 0/1 vector
    pub(crate) fn row_combination(&self, selected: impl Fn(usize) -> bool) -> Vec<u8> {
        let mut acc = vec![0u32; self.words_per_row];
        for row in (0..self.n_rows).filter(|&row| selected(row)) {
            for (a, w) in acc.iter_mut().zip(self.row_words(row)) {
                *a ^= w;
            }
        }

        (0..self.n_cols)
            .map(|col| ((acc[col / WORD_BITS] >> (col % WORD_BITS)) & 1) as u8)
            .collect()
    }

    /// Matrix times column vector: `M · v`, one output bit per row
    pub fn mul_vec(&self, v: &[u8]) -> Result<Vec<u8>, DenseError> {
        if v.len() != self.n_cols {
            return Err(DenseError::InvalidDimensions);
        }

        let packed = pack_bits(v, self.words_per_row);
        Ok((0..self.n_rows)
            .map(|row| {
                let ones: u32 = self
                    .row_words(row)
                    .iter()
                    .zip(&packed)
                    .map(|(a, b)| (a & b).count_ones())
                    .sum();
                (ones & 1) as u8
            })
            .collect())
    }

    pub fn multiply(a: &BinaryMatrix, b: &BinaryMatrix) -> Result<BinaryMatrix, DenseError> {
        if a.n_cols != b.n_rows {
            return Err(DenseError::InvalidDimensions);
        }

        let mut result = BinaryMatrix::zeros(a.n_rows, b.n_cols);

        for i in 0..a.n_rows {
            for k in 0..a.n_cols {
                if a.get(i, k) {
                    // row_i(result) += row_k(b)
                    let dst = i * result.words_per_row;
                    let src = k * b.words_per_row;
                    for w in 0..b.words_per_row {
                        result.data[dst + w] ^= b.data[src + w];
                    }
                }
            }
        }

        Ok(result)
    }

    pub fn transpose(&self) -> BinaryMatrix {
        let mut result = BinaryMatrix::zeros(self.n_cols, self.n_rows);
        for row in 0..self.n_rows {
            for col in 0..self.n_cols {
                if self.get(row, col) {
                    result.put(col, row, true);
                }
            }
        }
        result
    }
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.n_rows {
            for col in 0..self.n_cols {
                if col > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(if self.get(row, col) { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn pack_bits(bits: &[u8], words: usize) -> Vec<u32> {
    let mut packed = vec![0u32; words];
    for (i, &bit) in bits.iter().enumerate() {
        if bit & 1 == 1 {
            packed[i / WORD_BITS] |= 1u32 << (i % WORD_BITS);
        }
    }
    packed
}
