//! This module contains the predicate-evaluation kernel: the first stage of the
//! compaction pipeline.
//!
//! For every row it decides two things: whether the row survives, and (for the
//! rows that do) whether the row is valid in the output. The two are kept apart
//! because in boolean-mask mode they come from different columns: the mask's
//! validity only gates survival, the source's validity is what the output
//! inherits. A row with a null mask entry is dropped, never kept as null.

use arrow::buffer::BooleanBuffer;
use bitvec::prelude::*;
use rayon::prelude::*;

use crate::config::{CompactionConfig, SURVIVOR_WORD_BITS};
use crate::error::SiftError;
use crate::null_handling::bitmap;
use crate::utils::try_alloc_filled;

/// One survival flag per input row, packed 64 to a word.
pub type SurvivorMap = BitVec<u64, Lsb0>;

/// The selection rule of one compaction call.
#[derive(Debug, Clone, Copy)]
pub enum Predicate<'a> {
    /// Keep row `i` iff the mask is valid and true at `i`.
    BooleanMask {
        mask_values: &'a [u8],
        mask_validity: Option<&'a BooleanBuffer>,
        source_validity: Option<&'a BooleanBuffer>,
    },
    /// Keep row `i` iff the source is valid at `i`.
    DropNulls {
        source_validity: Option<&'a BooleanBuffer>,
    },
}

impl<'a> Predicate<'a> {
    pub fn boolean_mask(
        mask_values: &'a [u8],
        mask_validity: Option<&'a BooleanBuffer>,
        source_validity: Option<&'a BooleanBuffer>,
    ) -> Self {
        Predicate::BooleanMask {
            mask_values,
            mask_validity,
            source_validity,
        }
    }

    pub fn drop_nulls(source_validity: Option<&'a BooleanBuffer>) -> Self {
        Predicate::DropNulls { source_validity }
    }

    /// Whether row `i` is kept.
    #[inline]
    pub fn survives(&self, i: usize) -> bool {
        match self {
            Predicate::BooleanMask {
                mask_values,
                mask_validity,
                ..
            } => bitmap::is_valid(*mask_validity, i) && mask_values[i] != 0,
            Predicate::DropNulls { source_validity } => bitmap::is_valid(*source_validity, i),
        }
    }

    /// Validity of row `i` in the output, meaningful only for surviving rows.
    #[inline]
    pub fn output_valid(&self, i: usize) -> bool {
        match self {
            Predicate::BooleanMask {
                source_validity, ..
            } => bitmap::is_valid(*source_validity, i),
            Predicate::DropNulls { .. } => true,
        }
    }

    /// Whether any output row can be null. When `false` the pack stage skips
    /// the validity gather altogether.
    pub fn produces_nulls(&self) -> bool {
        match self {
            Predicate::BooleanMask {
                source_validity, ..
            } => source_validity.is_some(),
            Predicate::DropNulls { .. } => false,
        }
    }
}

/// Evaluates `predicate` over rows `0..num_rows` and packs the result into a
/// survivor map.
///
/// Blocks of `config.block_rows` rows own disjoint runs of words, so they are
/// filled independently (on the rayon pool when `parallel` is set).
pub fn evaluate_survivors(
    predicate: &Predicate<'_>,
    num_rows: usize,
    config: &CompactionConfig,
    parallel: bool,
) -> Result<SurvivorMap, SiftError> {
    let num_words = num_rows.div_ceil(SURVIVOR_WORD_BITS);
    let mut words = try_alloc_filled(num_words, 0u64)?;
    let words_per_block = config.block_rows / SURVIVOR_WORD_BITS;

    let fill_block = |block: usize, block_words: &mut [u64]| {
        let block_start = block * config.block_rows;
        for (w, word) in block_words.iter_mut().enumerate() {
            let base = block_start + w * SURVIVOR_WORD_BITS;
            let end = (base + SURVIVOR_WORD_BITS).min(num_rows);
            let mut bits = 0u64;
            for i in base..end {
                if predicate.survives(i) {
                    bits |= 1 << (i - base);
                }
            }
            *word = bits;
        }
    };

    if parallel {
        words
            .par_chunks_mut(words_per_block)
            .enumerate()
            .for_each(|(block, block_words)| fill_block(block, block_words));
    } else {
        words
            .chunks_mut(words_per_block)
            .enumerate()
            .for_each(|(block, block_words)| fill_block(block, block_words));
    }

    let mut survivors = SurvivorMap::from_vec(words);
    survivors.truncate(num_rows);
    Ok(survivors)
}
