//! This module contains the position-scan kernel: the second stage of the
//! compaction pipeline.
//!
//! It turns a survivor map into a destination index map, i.e. an exclusive
//! running count of survivors in ascending row order. The scan is block
//! parallel and is identical to a left-to-right sequential count:
//!
//! 1. count the survivors of every block (parallel);
//! 2. exclusive-scan the block totals (sequential, one entry per block);
//! 3. run a local scan inside every block, seeded with its offset (parallel).
//!
//! The total survivor count falls out of step 2, before any output buffer is
//! allocated.

use rayon::prelude::*;

use crate::config::CompactionConfig;
use crate::error::SiftError;
use crate::kernels::predicate::SurvivorMap;
use crate::utils::try_alloc_filled;

/// Output position of every input row, plus the block layout the gather stage
/// needs to split its output into disjoint per-block ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationIndexMap {
    /// `None` for dropped rows, `Some(k)` for the k-th surviving row.
    pub destinations: Vec<Option<usize>>,
    /// Rows per block used for this scan.
    pub block_rows: usize,
    /// Exclusive prefix of the per-block survivor counts.
    pub block_offsets: Vec<usize>,
    /// Survivors per block.
    pub block_counts: Vec<usize>,
    /// Total number of surviving rows, i.e. the output row count.
    pub survivor_count: usize,
}

impl DestinationIndexMap {
    pub fn num_rows(&self) -> usize {
        self.destinations.len()
    }

    pub fn num_blocks(&self) -> usize {
        self.block_counts.len()
    }

    /// Input row range covered by `block`.
    pub fn block_rows_range(&self, block: usize) -> std::ops::Range<usize> {
        let start = block * self.block_rows;
        start..(start + self.block_rows).min(self.num_rows())
    }
}

/// Computes the destination of every surviving row.
pub fn scan_survivors(
    survivors: &SurvivorMap,
    config: &CompactionConfig,
    parallel: bool,
) -> Result<DestinationIndexMap, SiftError> {
    let num_rows = survivors.len();
    let block_rows = config.block_rows;
    let num_blocks = num_rows.div_ceil(block_rows);
    let block_range = |block: usize| {
        let start = block * block_rows;
        start..(start + block_rows).min(num_rows)
    };

    // 1. Per-block survivor counts.
    let block_counts: Vec<usize> = if parallel {
        (0..num_blocks)
            .into_par_iter()
            .map(|block| survivors[block_range(block)].count_ones())
            .collect()
    } else {
        (0..num_blocks)
            .map(|block| survivors[block_range(block)].count_ones())
            .collect()
    };

    // 2. Exclusive scan of the block totals.
    let mut block_offsets = Vec::with_capacity(num_blocks);
    let mut survivor_count = 0usize;
    for &count in &block_counts {
        block_offsets.push(survivor_count);
        survivor_count += count;
    }

    log::trace!(
        "scan: {} rows in {} blocks of {}, {} survivors",
        num_rows,
        num_blocks,
        block_rows,
        survivor_count
    );

    // 3. Local scan inside each block, seeded with the block offset.
    let mut destinations = try_alloc_filled(num_rows, None)?;
    let scan_block = |block: usize, slots: &mut [Option<usize>]| {
        let mut next = block_offsets[block];
        for (slot, keep) in slots
            .iter_mut()
            .zip(survivors[block_range(block)].iter().by_vals())
        {
            if keep {
                *slot = Some(next);
                next += 1;
            }
        }
        debug_assert_eq!(next, block_offsets[block] + block_counts[block]);
    };

    if num_rows > 0 {
        if parallel {
            destinations
                .par_chunks_mut(block_rows)
                .enumerate()
                .for_each(|(block, slots)| scan_block(block, slots));
        } else {
            destinations
                .chunks_mut(block_rows)
                .enumerate()
                .for_each(|(block, slots)| scan_block(block, slots));
        }
    }

    Ok(DestinationIndexMap {
        destinations,
        block_rows,
        block_offsets,
        block_counts,
        survivor_count,
    })
}
