//! Classic binary codes built from their defining matrices.

use crate::{BinaryMatrix, CodeError, EngineConfig, LinearCode, Result};

/// Reject message lengths the engine would refuse before allocating G
fn check_message_bits(k: usize) -> Result<()> {
    let limit = EngineConfig::default().message_limit();
    if k > limit {
        return Err(CodeError::TooManyMessageBits { k, limit });
    }
    Ok(())
}

/// Hamming code (2^r - 1, 2^r - r - 1, 3).
///
/// Column `j` of H is the r-bit binary form of `j + 1`, most significant bit
/// in row 0. The unit-vector columns become parity positions; the remaining
/// columns carry message bits in ascending order.
pub fn hamming(r: usize) -> Result<LinearCode> {
    if r < 2 {
        return Err(CodeError::InvalidDimension(format!(
            "Hamming parameter r must be at least 2, got {}",
            r
        )));
    }
    if r >= usize::BITS as usize - 1 {
        return Err(CodeError::InvalidDimension(format!(
            "Hamming parameter r = {} overflows the block length",
            r
        )));
    }

    let n = (1usize << r) - 1;
    let k = n - r;
    check_message_bits(k)?;

    let mut h = BinaryMatrix::zeros(r, n);
    for col in 0..n {
        let pattern = col + 1;
        for row in 0..r {
            if pattern & (1 << (r - 1 - row)) != 0 {
                h.set(row, col, true)?;
            }
        }
    }

    // parity_positions[i] holds the column equal to the unit vector e_i
    let parity_positions: Vec<usize> = (0..r).map(|row| (1usize << (r - 1 - row)) - 1).collect();
    let info_positions: Vec<usize> = (0..n)
        .filter(|col| !parity_positions.contains(col))
        .collect();

    let mut g = BinaryMatrix::zeros(k, n);
    for (i, &info_pos) in info_positions.iter().enumerate() {
        g.set(i, info_pos, true)?;
        for (j, &parity_pos) in parity_positions.iter().enumerate() {
            if h.get(j, info_pos) {
                g.set(i, parity_pos, true)?;
            }
        }
    }

    LinearCode::new(g)
}

/// Repetition code (n, 1, n)
pub fn repetition(n: usize) -> Result<LinearCode> {
    if n < 1 {
        return Err(CodeError::InvalidDimension(
            "repetition length must be at least 1".to_string(),
        ));
    }

    LinearCode::from_rows(&[vec![1u8; n]])
}

/// Single parity check code (k + 1, k, 2): identity block plus a parity column
pub fn single_parity_check(k: usize) -> Result<LinearCode> {
    if k < 1 {
        return Err(CodeError::InvalidDimension(
            "number of information bits must be at least 1".to_string(),
        ));
    }

    check_message_bits(k)?;

    let mut g = BinaryMatrix::zeros(k, k + 1);
    for i in 0..k {
        g.set(i, i, true)?;
        g.set(i, k, true)?;
    }

    LinearCode::new(g)
}
