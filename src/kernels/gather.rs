//! This module contains the gather/pack kernel: the last stage of the
//! compaction pipeline.
//!
//! Given a destination index map it writes one output element per surviving
//! row. Because destinations are monotonic, the survivors of block `b` land in
//! the contiguous output range `block_offsets[b] .. block_offsets[b] + block_counts[b]`.
//! The output is split into those disjoint ranges up front, so blocks are
//! written in parallel with plain `&mut` slices and no synchronisation.

use rayon::prelude::*;

use crate::error::SiftError;
use crate::kernels::scan::DestinationIndexMap;
use crate::utils::try_alloc_filled;

/// Builds a freshly allocated output of `map.survivor_count` elements where the
/// element for surviving row `i` is `element(i)`.
///
/// `fill` only initialises the buffer; every slot is overwritten.
pub fn gather_with<T, F>(
    map: &DestinationIndexMap,
    fill: T,
    parallel: bool,
    element: F,
) -> Result<Vec<T>, SiftError>
where
    T: Copy + Send + Sync,
    F: Fn(usize) -> T + Sync,
{
    let mut output = try_alloc_filled(map.survivor_count, fill)?;

    // Split the output into one disjoint slice per block.
    let mut block_outputs: Vec<&mut [T]> = Vec::with_capacity(map.num_blocks());
    let mut rest = output.as_mut_slice();
    for &count in &map.block_counts {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(count);
        block_outputs.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        return Err(SiftError::InternalError(format!(
            "block counts cover {} of {} output rows",
            map.survivor_count - rest.len(),
            map.survivor_count
        )));
    }

    let gather_block = |block: usize, out: &mut [T]| {
        let offset = map.block_offsets[block];
        for i in map.block_rows_range(block) {
            if let Some(dest) = map.destinations[i] {
                out[dest - offset] = element(i);
            }
        }
    };

    if parallel {
        block_outputs
            .into_par_iter()
            .enumerate()
            .for_each(|(block, out)| gather_block(block, out));
    } else {
        block_outputs
            .into_iter()
            .enumerate()
            .for_each(|(block, out)| gather_block(block, out));
    }

    Ok(output)
}

/// Gathers the surviving elements of `values`.
pub fn gather_values<T>(
    values: &[T],
    map: &DestinationIndexMap,
    parallel: bool,
) -> Result<Vec<T>, SiftError>
where
    T: Copy + Default + Send + Sync,
{
    if values.len() < map.num_rows() {
        return Err(SiftError::InternalError(format!(
            "gather source has {} rows, destination map has {}",
            values.len(),
            map.num_rows()
        )));
    }
    gather_with(map, T::default(), parallel, |i| values[i])
}
