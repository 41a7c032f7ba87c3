use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessEvents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccessEvents::VisitorId).string().not_null())
                    .col(ColumnDef::new(AccessEvents::Code).string().not_null())
                    .col(ColumnDef::new(AccessEvents::Success).boolean().not_null())
                    .col(ColumnDef::new(AccessEvents::UserAgent).text())
                    .col(
                        ColumnDef::new(AccessEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AccessEvents::Table, AccessEvents::VisitorId)
                            .to(Visitors::Table, Visitors::VisitorId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AccessEvents::Table)
                    .col(AccessEvents::VisitorId)
                    .col(AccessEvents::CreatedAt)
                    .name("idx_access_events_visitor_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessEvents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AccessEvents {
    Table,
    Id,
    VisitorId,
    Code,
    Success,
    UserAgent,
    CreatedAt,
}

#[derive(Iden)]
enum Visitors {
    Table,
    VisitorId,
}
