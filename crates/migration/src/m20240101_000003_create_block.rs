//! Create `block` table with FK to `parking_lot`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Block::Table)
                    .if_not_exists()
                    .col(uuid(Block::Id).primary_key())
                    .col(uuid(Block::ParkingLotId).not_null())
                    .col(string_len(Block::Code, 64).not_null())
                    .col(text(Block::Description).not_null())
                    .col(timestamp_with_time_zone(Block::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Block::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_block_parking_lot")
                            .from(Block::Table, Block::ParkingLotId)
                            .to(ParkingLot::Table, ParkingLot::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Block::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Block { Table, Id, ParkingLotId, Code, Description, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum ParkingLot { Table, Id }
