use crate::config::BYTES_IN_MB;
use crate::error::{BenchError, Result};

/// Iterator over `start, 2*start, 4*start, ...` up to and including `limit`.
#[derive(Debug, Clone)]
pub struct Doubling {
    next: Option<usize>,
    limit: usize,
}

impl Doubling {
    pub fn new(start: usize, limit: usize) -> Self {
        let next = if start == 0 || start > limit {
            None
        } else {
            Some(start)
        };
        Doubling { next, limit }
    }
}

impl Iterator for Doubling {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = current.checked_mul(2).filter(|n| *n <= self.limit);
        Some(current)
    }
}

/// File sizes in MB from `min_mb` doubling up to `max_mb`.
pub fn size_sequence(min_mb: usize, max_mb: usize) -> Vec<usize> {
    Doubling::new(min_mb, max_mb).collect()
}

/// Length of [`size_sequence`] without building it.
pub fn file_count(min_mb: usize, max_mb: usize) -> usize {
    if min_mb == 0 || min_mb > max_mb {
        return 0;
    }
    let mut count = 0;
    let mut mb = min_mb;
    loop {
        count += 1;
        match mb.checked_mul(2) {
            Some(next) if next <= max_mb => mb = next,
            _ => return count,
        }
    }
}

/// Chunk sizes in bytes: 1, 2, 4, ... up to the largest power of two <= `ceiling`.
pub fn chunk_sizes(ceiling: usize) -> Doubling {
    Doubling::new(1, ceiling)
}

/// Byte count of `mb` MB, or an error when it does not fit in a usize.
pub fn bytes_in_mb(mb: usize) -> Result<usize> {
    mb.checked_mul(BYTES_IN_MB).ok_or(BenchError::SizeTooLarge(mb))
}
