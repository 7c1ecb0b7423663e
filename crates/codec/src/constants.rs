/// The version of the batch header recomputed by the codec.
pub const BATCH_HEADER_VERSION: u8 = 0;

/// The length in bytes of each item in the skipped L1 messages bitmap.
pub const SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE: usize = 32;

/// The count of L1 messages covered by a single item of the skipped L1 messages bitmap.
pub const SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS: u64 = 256;

/// The maximum count of blocks in a chunk.
pub const MAX_BLOCKS_PER_CHUNK: usize = u8::MAX as usize;
