use crate::error::{BenchError, Result};

/// Allocates a zeroed byte buffer, reporting failure instead of aborting.
pub fn allocate(len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| BenchError::Allocation(len))?;
    buffer.resize(len, 0);
    Ok(buffer)
}
