//! Create `parking_lot` table.
//!
//! Root of the facility hierarchy; blocks and slots hang off it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingLot::Table)
                    .if_not_exists()
                    .col(uuid(ParkingLot::Id).primary_key())
                    .col(string_len(ParkingLot::Name, 255).not_null())
                    .col(text(ParkingLot::Description).not_null())
                    .col(string_len(ParkingLot::Address, 512).not_null())
                    // day times are "HH:MM"
                    .col(string_len(ParkingLot::StartTime, 5).not_null())
                    .col(string_len(ParkingLot::EndTime, 5).not_null())
                    .col(string_len(ParkingLot::Lat, 32).not_null())
                    .col(string_len(ParkingLot::Long, 32).not_null())
                    .col(boolean(ParkingLot::IsActive).not_null())
                    .col(uuid(ParkingLot::CompanyId).not_null())
                    .col(timestamp_with_time_zone(ParkingLot::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ParkingLot::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ParkingLot::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ParkingLot {
    Table,
    Id,
    Name,
    Description,
    Address,
    StartTime,
    EndTime,
    Lat,
    Long,
    IsActive,
    CompanyId,
    CreatedAt,
    UpdatedAt,
}
