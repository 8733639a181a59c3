use serde::{Deserialize, Serialize};

use crate::entities::{genre, language, movie};

#[derive(Debug, Deserialize)]
pub struct RegisterMovie {
    pub title: String,
    pub genre_id: i32,
    pub language_id: i32,
    pub oscar_count: Option<i32>,
    pub release_date: Option<String>,
}

/// Partial update body: only fields present in the JSON are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub genre_id: Option<i32>,
    pub language_id: Option<i32>,
    pub oscar_count: Option<i32>,
    pub release_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReferenceRecord {
    pub id: i32,
    pub name: String,
}

/// A movie with its reference rows expanded. The `genres`/`languages` key
/// names match what API consumers already see.
#[derive(Debug, Serialize)]
pub struct MovieRecord {
    pub id: i32,
    pub title: String,
    pub genre_id: i32,
    pub language_id: i32,
    pub oscar_count: Option<i32>,
    pub release_date: Option<String>,
    pub genres: Option<ReferenceRecord>,
    pub languages: Option<ReferenceRecord>,
}

impl MovieRecord {
    pub fn from_parts(
        movie: movie::Model,
        genre: Option<genre::Model>,
        language: Option<language::Model>,
    ) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            genre_id: movie.genre_id,
            language_id: movie.language_id,
            oscar_count: movie.oscar_count,
            release_date: movie.release_date,
            genres: genre.map(|g| ReferenceRecord { id: g.id, name: g.name }),
            languages: language.map(|l| ReferenceRecord { id: l.id, name: l.name }),
        }
    }
}
