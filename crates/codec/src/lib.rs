//! The codec of the Scroll rollup commitments verified by the rollup sync service.
//!
//! The crate decodes the chunk block ranges committed in a `commitBatch` call and rebuilds the
//! version 0 batch header from local blocks in order to recompute the batch hash.

pub use batch_header::BatchHeaderV0;
mod batch_header;

pub use block::BlockContext;
mod block;

pub use chunk::chunk_hash;
mod chunk;

/// Constants of the codec.
pub mod constants;

pub use decoding::decode_chunk_ranges;
pub mod decoding;

pub use error::{DecodingError, EncodingError};
mod error;
