use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MarketingCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MarketingCodes::CodeType)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MarketingCodes::Code).string().not_null())
                    .col(ColumnDef::new(MarketingCodes::CommitHash).string())
                    .col(
                        ColumnDef::new(MarketingCodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MarketingCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MarketingCodes {
    Table,
    CodeType,
    Code,
    CommitHash,
    UpdatedAt,
}
