//! SQLite storage implementation for gifts.

mod model;
mod repository;

pub use model::{GiftDB, NewGiftDB};
pub use repository::GiftRepository;
