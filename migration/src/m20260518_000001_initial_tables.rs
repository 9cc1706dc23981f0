use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QrCode::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QrCode::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QrCode::Code).string().not_null())
                    .col(ColumnDef::new(QrCode::DestinationUrl).text().not_null())
                    .col(
                        ColumnDef::new(QrCode::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QrCode::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // 查找路径是按 code 精确匹配，唯一索引同时兜住生成碰撞
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_qr_codes_code")
                    .table(QrCode::Table)
                    .col(QrCode::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Registration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registration::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Registration::QrCodeId).string().null())
                    .col(ColumnDef::new(Registration::Name).text().not_null())
                    .col(ColumnDef::new(Registration::Phone).text().not_null())
                    .col(
                        ColumnDef::new(Registration::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Registration::IpAddress).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registrations_qr_code_id")
                            .from(Registration::Table, Registration::QrCodeId)
                            .to(QrCode::Table, QrCode::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 注册列表按时间倒序读取
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_registrations_registered_at")
                    .table(Registration::Table)
                    .col(Registration::RegisteredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_registrations_qr_code_id")
                    .table(Registration::Table)
                    .col(Registration::QrCodeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_registrations_qr_code_id").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_registrations_registered_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Registration::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_qr_codes_code").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(QrCode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum QrCode {
    #[sea_orm(iden = "qr_codes")]
    Table,
    Id,
    Code,
    DestinationUrl,
    CreatedAt,
    IsActive,
}

#[derive(DeriveIden)]
enum Registration {
    #[sea_orm(iden = "registrations")]
    Table,
    Id,
    QrCodeId,
    Name,
    Phone,
    RegisteredAt,
    IpAddress,
}
