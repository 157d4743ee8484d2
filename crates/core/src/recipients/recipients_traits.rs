use crate::errors::Result;
use crate::recipients::recipients_model::{Gift, NewGift, Recipient, RecipientRecord};
use async_trait::async_trait;

/// Trait for recipient repository operations
#[async_trait]
pub trait RecipientRepositoryTrait: Send + Sync {
    fn find_recipient_by_name(&self, name: &str) -> Result<Option<RecipientRecord>>;
    /// All recipients in insertion order.
    fn load_recipients(&self) -> Result<Vec<RecipientRecord>>;
    async fn insert_recipient(&self, name: String) -> Result<RecipientRecord>;
    async fn delete_recipient(&self, recipient_id: i32) -> Result<usize>;
}

/// Trait for gift repository operations
#[async_trait]
pub trait GiftRepositoryTrait: Send + Sync {
    fn load_gifts_for_recipient(&self, recipient_id: i32) -> Result<Vec<Gift>>;
    async fn insert_gift(&self, recipient_id: i32, new_gift: NewGift) -> Result<Gift>;
    /// Flips the purchased flag and returns the new value, or `None` when no
    /// gift has that id.
    async fn toggle_purchased(&self, gift_id: i32) -> Result<Option<bool>>;
    async fn delete_gift(&self, gift_id: i32) -> Result<usize>;
}

/// Trait for the list organizer, the only entry point the web layer uses.
#[async_trait]
pub trait ListOrganizerTrait: Send + Sync {
    fn get_recipient(&self, name: &str) -> Result<Recipient>;
    fn get_all_recipients(&self) -> Result<Vec<Recipient>>;
    async fn create_recipient(&self, name: &str) -> Result<()>;
    async fn add_gift(
        &self,
        recipient_name: &str,
        gift_name: &str,
        price: i64,
        url: &str,
    ) -> Result<()>;
    async fn set_purchased(&self, gift_id: i32) -> Result<()>;
    async fn drop_gift(&self, gift_id: i32) -> Result<()>;
    async fn drop_recipient(&self, recipient_id: i32, name: &str) -> Result<()>;
    fn export_txt(&self, target: Option<&str>) -> Result<String>;
    fn tax_rate(&self) -> rust_decimal::Decimal;
}
