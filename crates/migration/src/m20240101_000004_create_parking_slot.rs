//! Create `parking_slot` table with FK to `block`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSlot::Table)
                    .if_not_exists()
                    .col(uuid(ParkingSlot::Id).primary_key())
                    .col(uuid(ParkingSlot::BlockId).not_null())
                    .col(string_len(ParkingSlot::Name, 128).not_null())
                    .col(text(ParkingSlot::Description).not_null())
                    .col(timestamp_with_time_zone(ParkingSlot::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ParkingSlot::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_slot_block")
                            .from(ParkingSlot::Table, ParkingSlot::BlockId)
                            .to(Block::Table, Block::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ParkingSlot::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ParkingSlot { Table, Id, BlockId, Name, Description, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Block { Table, Id }
