/// This module contains the batch chunk range database model.
pub mod batch_chunk_range;

/// This module contains the finalized batch metadata database model.
pub mod finalized_batch_meta;

/// This module contains the metadata model.
pub mod metadata;
