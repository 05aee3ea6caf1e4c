//! One repository per table group. Each is a unit struct whose methods take
//! the pool explicitly.

pub mod item_repo;
pub mod saved_outfit_repo;
pub mod try_on_result_repo;

pub use item_repo::ItemRepo;
pub use saved_outfit_repo::SavedOutfitRepo;
pub use try_on_result_repo::TryOnResultRepo;
