//! Decoding of the chunk block ranges committed by a `commitBatch` call.

mod macros;

use crate::{error::DecodingError, from_be_bytes_slice_and_advance_buf};

use rollup_node_primitives::ChunkBlockRange;
use scroll_l1::abi::calls::CommitBatchCall;

/// The size in bytes of the block count prefixing each chunk.
pub const NUM_BLOCKS_BYTES_SIZE: usize = 2;

/// The size in bytes of the starting block number following the block count.
pub const START_BLOCK_NUMBER_BYTES_SIZE: usize = 8;

/// Decodes the calldata of a `commitBatch` call into the block ranges of its chunks.
///
/// The starting block number of the batch is read from the first chunk only, each chunk then
/// spans the next `num_blocks` blocks. The ranges are returned in calldata order.
pub fn decode_chunk_ranges(calldata: &[u8]) -> Result<Vec<ChunkBlockRange>, DecodingError> {
    let call = CommitBatchCall::try_decode(calldata)?;
    let chunks = call.chunks();

    let first = chunks.first().ok_or(DecodingError::MissingChunkData)?;
    if first.len() < NUM_BLOCKS_BYTES_SIZE + START_BLOCK_NUMBER_BYTES_SIZE {
        return Err(DecodingError::Eof)
    }
    let buf = &mut &first[NUM_BLOCKS_BYTES_SIZE..];
    let mut next_start = Some(from_be_bytes_slice_and_advance_buf!(u64, buf));

    let mut ranges = Vec::with_capacity(chunks.len());
    for (chunk_index, chunk) in chunks.into_iter().enumerate() {
        let buf = &mut &*chunk;
        if buf.len() < NUM_BLOCKS_BYTES_SIZE {
            return Err(DecodingError::Eof)
        }

        let num_blocks = from_be_bytes_slice_and_advance_buf!(u16, buf);
        let num_blocks = u8::try_from(num_blocks)
            .map_err(|_| DecodingError::InvalidBlockCount { chunk_index, num_blocks })?;
        if num_blocks == 0 {
            return Err(DecodingError::EmptyChunk(chunk_index))
        }

        let start = next_start.ok_or(DecodingError::BlockNumberOverflow(chunk_index))?;
        let end = start
            .checked_add(num_blocks as u64 - 1)
            .ok_or(DecodingError::BlockNumberOverflow(chunk_index))?;
        ranges.push(ChunkBlockRange::new(start, end));
        next_start = end.checked_add(1);
    }

    tracing::trace!(target: "scroll::codec", ?ranges, "decoded chunk ranges");

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy_primitives::Bytes;
    use alloy_sol_types::SolCall;
    use scroll_l1::abi::calls::commitBatchCall;

    fn chunk(num_blocks: u16, start: u64) -> Bytes {
        let mut chunk = num_blocks.to_be_bytes().to_vec();
        chunk.extend_from_slice(&start.to_be_bytes());
        chunk.extend_from_slice(&[0xaa; 52]);
        chunk.into()
    }

    fn calldata(chunks: Vec<Bytes>) -> Vec<u8> {
        commitBatchCall {
            version: 0,
            parent_batch_header: Bytes::from(vec![0u8; 89]),
            chunks,
            skipped_l1_message_bitmap: Bytes::new(),
        }
        .abi_encode()
    }

    #[test]
    fn test_should_decode_contiguous_ranges() -> eyre::Result<()> {
        // Given
        let calldata = calldata(vec![chunk(3, 100), chunk(1, 0), chunk(255, 0)]);

        // When
        let ranges = decode_chunk_ranges(&calldata)?;

        // Then
        assert_eq!(
            ranges,
            vec![
                ChunkBlockRange::new(100, 102),
                ChunkBlockRange::new(103, 103),
                ChunkBlockRange::new(104, 358)
            ]
        );

        Ok(())
    }

    #[test]
    fn test_should_read_start_from_first_chunk_only() -> eyre::Result<()> {
        let calldata = calldata(vec![chunk(2, 10), chunk(2, 9_999)]);
        let ranges = decode_chunk_ranges(&calldata)?;
        assert_eq!(ranges, vec![ChunkBlockRange::new(10, 11), ChunkBlockRange::new(12, 13)]);
        Ok(())
    }

    #[test]
    fn test_should_hold_range_properties() -> eyre::Result<()> {
        // Given
        let counts = [1u16, 7, 255, 42, 2, 128];
        let start = 1_000_000u64;
        let calldata = calldata(counts.iter().map(|n| chunk(*n, start)).collect());

        // When
        let ranges = decode_chunk_ranges(&calldata)?;

        // Then
        assert_eq!(ranges.len(), counts.len());
        assert_eq!(ranges[0].start_block_number, start);
        for (range, count) in ranges.iter().zip(counts) {
            assert!(range.is_valid());
            assert_eq!(range.end_block_number - range.start_block_number + 1, count as u64);
        }
        for pair in ranges.windows(2) {
            assert_eq!(pair[1].start_block_number, pair[0].end_block_number + 1);
        }
        let total: u64 = counts.iter().map(|n| *n as u64).sum();
        assert_eq!(ranges.last().map(|r| r.end_block_number), Some(start + total - 1));

        Ok(())
    }

    #[test]
    fn test_should_reject_block_count_above_one_byte() {
        let overflowing = calldata(vec![chunk(1, 0), chunk(256, 0)]);
        assert!(matches!(
            decode_chunk_ranges(&overflowing),
            Err(DecodingError::InvalidBlockCount { chunk_index: 1, num_blocks: 256 })
        ));

        let max = calldata(vec![chunk(u16::MAX, 0)]);
        assert!(matches!(
            decode_chunk_ranges(&max),
            Err(DecodingError::InvalidBlockCount { chunk_index: 0, num_blocks: u16::MAX })
        ));
    }

    #[test]
    fn test_should_reject_malformed_calldata() {
        assert!(matches!(
            decode_chunk_ranges(&[0xde, 0xad, 0xbe, 0xef]),
            Err(DecodingError::InvalidCommitBatchCall(_))
        ));
        assert!(matches!(
            decode_chunk_ranges(&calldata(vec![])),
            Err(DecodingError::MissingChunkData)
        ));
        assert!(matches!(
            decode_chunk_ranges(&calldata(vec![Bytes::from(vec![0, 1, 0])])),
            Err(DecodingError::Eof)
        ));
        assert!(matches!(
            decode_chunk_ranges(&calldata(vec![chunk(1, 0), Bytes::from(vec![1])])),
            Err(DecodingError::Eof)
        ));
    }

    #[test]
    fn test_should_reject_empty_chunk_and_overflow() {
        assert!(matches!(
            decode_chunk_ranges(&calldata(vec![chunk(0, 5)])),
            Err(DecodingError::EmptyChunk(0))
        ));
        assert!(matches!(
            decode_chunk_ranges(&calldata(vec![chunk(2, u64::MAX)])),
            Err(DecodingError::BlockNumberOverflow(0))
        ));
        assert!(matches!(
            decode_chunk_ranges(&calldata(vec![chunk(1, u64::MAX), chunk(1, 0)])),
            Err(DecodingError::BlockNumberOverflow(1))
        ));
    }
}
