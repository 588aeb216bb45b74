mod cinemaworld;
mod filmworld;

pub use cinemaworld::CinemaWorldSource;
pub use filmworld::FilmWorldSource;
