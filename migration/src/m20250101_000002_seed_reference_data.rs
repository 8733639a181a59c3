use sea_orm_migration::prelude::*;

const GENRES: &[&str] =
    &["Action", "Adventure", "Comedy", "Drama", "Horror", "Romance", "Sci-Fi", "Thriller"];

const LANGUAGES: &[&str] = &["English", "French", "Japanese", "Korean", "Portuguese", "Spanish"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert().into_table(Genres::Table).columns([Genres::Name]).to_owned();
        for name in GENRES {
            insert.values_panic([(*name).into()]);
        }
        manager.exec_stmt(insert).await?;

        let mut insert =
            Query::insert().into_table(Languages::Table).columns([Languages::Name]).to_owned();
        for name in LANGUAGES {
            insert.values_panic([(*name).into()]);
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.exec_stmt(Query::delete().from_table(Languages::Table).to_owned()).await?;
        manager.exec_stmt(Query::delete().from_table(Genres::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum Languages {
    Table,
    Name,
}
