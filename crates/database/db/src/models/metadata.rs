use sea_orm::{entity::prelude::*, ActiveValue};

/// The metadata key of the last L1 block whose rollup events were applied.
pub const ROLLUP_EVENT_SYNCED_L1_BLOCK_NUMBER_KEY: &str = "rollup_event_synced_l1_block_number";

/// The metadata key of the last finalized L2 block.
pub const FINALIZED_L2_BLOCK_NUMBER_KEY: &str = "finalized_l2_block_number";

/// A database model that represents a metadata entry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "metadata")]
pub struct Model {
    /// The metadata key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// The metadata value.
    pub value: String,
}

/// The relation for the metadata model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the metadata model.
impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Returns the active model for a block number stored at `key`.
    pub fn block_number(key: &str, block_number: u64) -> Self {
        Self {
            key: ActiveValue::Set(key.to_owned()),
            value: ActiveValue::Set(block_number.to_string()),
        }
    }
}
