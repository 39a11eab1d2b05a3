//! Create `vehicle` table with optional FK to `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(uuid(Vehicle::Id).primary_key())
                    .col(ColumnDef::new(Vehicle::UserId).uuid().null())
                    .col(string_len(Vehicle::LicensePlate, 32).unique_key().not_null())
                    .col(string_len(Vehicle::VehicleBrand, 64).not_null())
                    .col(string_len(Vehicle::VehicleColor, 32).not_null())
                    .col(string_len(Vehicle::VehicleType, 32).not_null())
                    .col(timestamp_with_time_zone(Vehicle::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Vehicle::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_user")
                            .from(Vehicle::Table, Vehicle::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vehicle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vehicle {
    Table,
    Id,
    UserId,
    LicensePlate,
    VehicleBrand,
    VehicleColor,
    VehicleType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
