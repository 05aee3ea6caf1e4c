pub mod items;
pub mod outfits;
pub mod recommendations;
pub mod try_on;
