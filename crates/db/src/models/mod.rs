pub mod item;
pub mod saved_outfit;
pub mod try_on_result;
