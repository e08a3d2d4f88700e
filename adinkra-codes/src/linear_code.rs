use crate::{parity_check, BinaryMatrix, CodeError, EngineConfig, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Derived parameters of a linear code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeInfo {
    pub n: usize,
    pub k: usize,
    pub d: usize,
    pub rate: f64,
    pub error_correction_capability: usize,
    pub error_detection_capability: usize,
}

/// Binary linear block code (n, k, d) built from a generator matrix
///
/// The parity-check matrix and minimum distance are derived once in the
/// constructor. There is no way to change G afterwards.
#[derive(Debug, Clone)]
pub struct LinearCode {
    generator: BinaryMatrix,
    parity_check: BinaryMatrix,
    rank: usize,
    min_distance: usize,
}

impl LinearCode {
    pub fn new(generator: BinaryMatrix) -> Result<Self> {
        Self::with_config(generator, &EngineConfig::default())
    }

    /// Build from integer rows, each entry reduced mod 2
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: Copy + Into<i64>,
    {
        Self::new(BinaryMatrix::from_rows(rows)?)
    }

    pub fn with_config(generator: BinaryMatrix, config: &EngineConfig) -> Result<Self> {
        let k = generator.rows();
        let n = generator.cols();

        if k == 0 || n == 0 {
            return Err(CodeError::InvalidDimension(format!(
                "generator matrix must have at least one row and column, got {}x{}",
                k, n
            )));
        }

        let limit = config.message_limit();
        if k > limit {
            return Err(CodeError::TooManyMessageBits { k, limit });
        }

        let (parity_check, rank) = parity_check::parity_check_from_generator(&generator);
        if rank < k {
            warn!(k, rank, "generator rows are linearly dependent");
        }

        let mut code = Self {
            generator,
            parity_check,
            rank,
            min_distance: n + 1,
        };
        code.min_distance = code.compute_minimum_distance()?;

        debug!(n, k, d = code.min_distance, rank, "constructed linear code");
        Ok(code)
    }

    /// Get code parameters
    pub fn n(&self) -> usize {
        self.generator.cols()
    }
    pub fn k(&self) -> usize {
        self.generator.rows()
    }
    pub fn rank(&self) -> usize {
        self.rank
    }
    /// Minimum distance, `n + 1` when no two distinct codewords exist
    pub fn minimum_distance(&self) -> usize {
        self.min_distance
    }
    pub fn rate(&self) -> f64 {
        (self.k() as f64) / (self.n() as f64)
    }

    pub fn generator_matrix(&self) -> &BinaryMatrix {
        &self.generator
    }
    pub fn parity_check_matrix(&self) -> &BinaryMatrix {
        &self.parity_check
    }

    /// Encode a k-bit message as `message · G`
    pub fn encode(&self, message: &[u8]) -> Result<Vec<u8>> {
        if message.len() != self.k() {
            return Err(CodeError::LengthMismatch {
                expected: self.k(),
                actual: message.len(),
            });
        }

        Ok(self.generator.vec_mul(message)?)
    }

    /// Syndrome `received · Hᵀ`, all zero iff `received` is a codeword
    pub fn syndrome(&self, received: &[u8]) -> Result<Vec<u8>> {
        if received.len() != self.n() {
            return Err(CodeError::LengthMismatch {
                expected: self.n(),
                actual: received.len(),
            });
        }

        Ok(self.parity_check.mul_vec(received)?)
    }

    pub fn is_codeword(&self, word: &[u8]) -> Result<bool> {
        Ok(self.syndrome(word)?.iter().all(|&bit| bit == 0))
    }

    /// All 2^k codewords in message-index order
    pub fn codewords(&self) -> Codewords<'_> {
        Codewords {
            code: self,
            next: 0,
            end: 1usize << self.k(),
        }
    }

    /// Number of codewords of each Hamming weight 0..=n
    pub fn weight_distribution(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.n() + 1];
        for word in self.codewords() {
            let weight = word.iter().filter(|&&bit| bit == 1).count();
            counts[weight] += 1;
        }
        counts
    }

    pub fn info(&self) -> CodeInfo {
        let d = self.min_distance;
        CodeInfo {
            n: self.n(),
            k: self.k(),
            d,
            rate: self.rate(),
            error_correction_capability: (d - 1) / 2,
            error_detection_capability: d - 1,
        }
    }

    /// Pairwise search over every pair of distinct codewords
    fn compute_minimum_distance(&self) -> Result<usize> {
        let n = self.n();
        let total = 1usize << self.k();

        let mut table = BinaryMatrix::zeros(total, n);
        for (index, word) in self.codewords().enumerate() {
            table.set_row(index, &word)?;
        }

        let mut min_dist = n + 1;
        for i in 0..total {
            for j in (i + 1)..total {
                let dist = table.row_distance(i, j);
                if dist > 0 && dist < min_dist {
                    min_dist = dist;
                }
            }
        }

        Ok(min_dist)
    }
}

impl fmt::Display for LinearCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinearCode({}, {}, {})", self.n(), self.k(), self.min_distance)
    }
}

/// Iterator over the codewords of a [`LinearCode`]
///
/// Message `i` is the k-bit big-endian binary form of `i`, so the sequence
/// starts at the zero codeword and counts up to the all-ones message.
#[derive(Debug, Clone)]
pub struct Codewords<'a> {
    code: &'a LinearCode,
    next: usize,
    end: usize,
}

impl Iterator for Codewords<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        let k = self.code.k();
        self.next += 1;
        // Row j of G is selected by message bit j, most significant first
        Some(
            self.code
                .generator
                .row_combination(|row| (index >> (k - 1 - row)) & 1 == 1),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Codewords<'_> {}
