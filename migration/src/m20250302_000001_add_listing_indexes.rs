use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    SubmittedAt,
    IsRead,
}

#[derive(DeriveIden)]
enum Newsletters {
    Table,
    SubscribedAt,
    IsActive,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listings are always sorted newest-first on these columns.
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clients_created_at")
                    .table(Clients::Table)
                    .col(Clients::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contacts_submitted_at")
                    .table(Contacts::Table)
                    .col(Contacts::SubmittedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contacts_is_read")
                    .table(Contacts::Table)
                    .col(Contacts::IsRead)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_newsletters_subscribed_at")
                    .table(Newsletters::Table)
                    .col(Newsletters::SubscribedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_newsletters_is_active")
                    .table(Newsletters::Table)
                    .col(Newsletters::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_newsletters_is_active",
            "idx_newsletters_subscribed_at",
            "idx_contacts_is_read",
            "idx_contacts_submitted_at",
            "idx_clients_created_at",
            "idx_projects_created_at",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
