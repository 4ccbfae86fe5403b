use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Games)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Genres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Platforms)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Publishers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Developers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GameGenres)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GamePlatforms)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GamePublishers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GameDevelopers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(UserGames)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CustomLists)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CustomListEntries)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomListEntries).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomLists).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserGames).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameDevelopers).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GamePublishers).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GamePlatforms).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameGenres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Developers).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Publishers).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Platforms).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games).to_owned())
            .await?;

        Ok(())
    }
}
