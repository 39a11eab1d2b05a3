use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ParkingLot: default list ordering is created_at desc
        manager
            .create_index(
                Index::create()
                    .name("idx_parking_lot_created_at")
                    .table(ParkingLot::Table)
                    .col(ParkingLot::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_lot_company")
                    .table(ParkingLot::Table)
                    .col(ParkingLot::CompanyId)
                    .to_owned(),
            )
            .await?;

        // Block: one code per parking lot
        manager
            .create_index(
                Index::create()
                    .name("uniq_block_parking_lot_code")
                    .table(Block::Table)
                    .col(Block::ParkingLotId)
                    .col(Block::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_slot_block")
                    .table(ParkingSlot::Table)
                    .col(ParkingSlot::BlockId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicle_user")
                    .table(Vehicle::Table)
                    .col(Vehicle::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_vehicle_user").table(Vehicle::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_parking_slot_block").table(ParkingSlot::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_block_parking_lot_code").table(Block::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_parking_lot_company").table(ParkingLot::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_parking_lot_created_at").table(ParkingLot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ParkingLot { Table, CreatedAt, CompanyId }

#[derive(DeriveIden)]
enum Block { Table, ParkingLotId, Code }

#[derive(DeriveIden)]
enum ParkingSlot { Table, BlockId }

#[derive(DeriveIden)]
enum Vehicle { Table, UserId }
