pub mod genre;
pub mod language;
pub mod movie;
