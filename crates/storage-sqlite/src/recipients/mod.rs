//! SQLite storage implementation for recipients.

mod model;
mod repository;

pub use model::{NewRecipientDB, RecipientDB};
pub use repository::RecipientRepository;
