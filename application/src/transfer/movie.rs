use kernel::prelude::entity::{DestructMovie, Movie};
use uuid::Uuid;

use crate::transfer::GenreDto;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MovieDto {
    pub id: Uuid,
    pub title: String,
    pub genre: GenreDto,
    pub number_in_stock: i32,
    pub daily_rental_rate: i32,
}

impl From<Movie> for MovieDto {
    fn from(value: Movie) -> Self {
        let DestructMovie {
            id,
            title,
            genre,
            number_in_stock,
            daily_rental_rate,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            genre: genre.into(),
            number_in_stock: number_in_stock.into(),
            daily_rental_rate: daily_rental_rate.into(),
        }
    }
}

pub struct GetMovieDto {
    pub id: Uuid,
}

/// `genre_id` arrives unparsed so that a bad id is reported like any other invalid field.
#[derive(Debug)]
pub struct CreateMovieDto {
    pub title: String,
    pub genre_id: Option<String>,
    pub number_in_stock: i32,
    pub daily_rental_rate: i32,
}

pub struct UpdateMovieDto {
    pub id: Uuid,
    pub title: String,
    pub genre_id: Option<String>,
    pub number_in_stock: i32,
    pub daily_rental_rate: i32,
}

pub struct DeleteMovieDto {
    pub id: Uuid,
}
