use crate::DatabaseError;

use alloy_primitives::B256;
use rollup_node_primitives::FinalizedBatchMeta;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents the metadata of a finalized batch.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "finalized_batch_meta")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    batch_index: i64,
    batch_hash: Vec<u8>,
    total_l1_messages_popped: i64,
}

/// The relation for the finalized batch meta model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the finalized batch meta model.
impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Returns the active model for the metadata of batch `batch_index`.
    pub fn new(batch_index: u64, meta: FinalizedBatchMeta) -> Self {
        Self {
            batch_index: ActiveValue::Set(batch_index as i64),
            batch_hash: ActiveValue::Set(meta.batch_hash.to_vec()),
            total_l1_messages_popped: ActiveValue::Set(meta.total_l1_messages_popped as i64),
        }
    }
}

impl Model {
    /// Returns the index of the batch.
    pub const fn batch_index(&self) -> u64 {
        self.batch_index as u64
    }
}

impl TryFrom<Model> for FinalizedBatchMeta {
    type Error = DatabaseError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        let batch_hash = B256::try_from(value.batch_hash.as_slice()).map_err(|_| {
            DatabaseError::InvalidBatchHash(value.batch_hash.len(), value.batch_index as u64)
        })?;
        Ok(Self { batch_hash, total_l1_messages_popped: value.total_l1_messages_popped as u64 })
    }
}
