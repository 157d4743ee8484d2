//! Recipients module - domain models, the list organizer, and traits.

mod recipients_export;
mod recipients_model;
mod recipients_service;
mod recipients_traits;

pub use recipients_export::{render_recipient, render_recipients};
pub use recipients_model::{
    compute_finished, is_web_url, toggle, Gift, NewGift, Recipient, RecipientRecord,
};
pub use recipients_service::ListOrganizer;
pub use recipients_traits::{GiftRepositoryTrait, ListOrganizerTrait, RecipientRepositoryTrait};
