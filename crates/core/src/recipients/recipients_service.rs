use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::constants::DEFAULT_SALES_TAX_RATE;
use crate::errors::{Error, Result, ValidationError};

use super::recipients_export::render_recipients;
use super::recipients_model::{NewGift, Recipient, RecipientRecord};
use super::recipients_traits::{GiftRepositoryTrait, ListOrganizerTrait, RecipientRepositoryTrait};

/// Owns every read and write of recipients and gifts.
pub struct ListOrganizer {
    recipient_repository: Arc<dyn RecipientRepositoryTrait>,
    gift_repository: Arc<dyn GiftRepositoryTrait>,
    tax_rate: Decimal,
}

impl ListOrganizer {
    pub fn new(
        recipient_repository: Arc<dyn RecipientRepositoryTrait>,
        gift_repository: Arc<dyn GiftRepositoryTrait>,
    ) -> Self {
        ListOrganizer {
            recipient_repository,
            gift_repository,
            tax_rate: DEFAULT_SALES_TAX_RATE,
        }
    }

    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    fn attach_gifts(&self, record: RecipientRecord) -> Result<Recipient> {
        let gifts = self.gift_repository.load_gifts_for_recipient(record.id)?;
        Ok(Recipient::from_record(record, gifts))
    }

    /// Looks up a recipient by name, creating it when absent.
    async fn resolve_or_create(&self, name: &str) -> Result<RecipientRecord> {
        if let Some(record) = self.recipient_repository.find_recipient_by_name(name)? {
            return Ok(record);
        }

        self.create_recipient(name).await?;
        self.recipient_repository
            .find_recipient_by_name(name)?
            .ok_or_else(|| {
                Error::Consistency(format!(
                    "recipient '{}' still missing after it was created",
                    name
                ))
            })
    }
}

#[async_trait]
impl ListOrganizerTrait for ListOrganizer {
    fn get_recipient(&self, name: &str) -> Result<Recipient> {
        let record = self
            .recipient_repository
            .find_recipient_by_name(name)?
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        self.attach_gifts(record)
    }

    fn get_all_recipients(&self) -> Result<Vec<Recipient>> {
        self.recipient_repository
            .load_recipients()?
            .into_iter()
            .map(|record| self.attach_gifts(record))
            .collect()
    }

    async fn create_recipient(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidInput(
                "recipient name must not be empty".to_string(),
            )
            .into());
        }

        match self
            .recipient_repository
            .insert_recipient(name.to_string())
            .await
        {
            Ok(record) => {
                info!("Created recipient '{}' with id {}", record.name, record.id);
                Ok(())
            }
            // Someone else created it first; the caller re-reads by name.
            Err(e) if e.is_unique_violation() => {
                warn!("Recipient '{}' was not created: {}", name, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn add_gift(
        &self,
        recipient_name: &str,
        gift_name: &str,
        price: i64,
        url: &str,
    ) -> Result<()> {
        if gift_name.is_empty() {
            let recipient = self.resolve_or_create(recipient_name).await?;
            debug!(
                "No gift name given, recipient '{}' only",
                recipient.name
            );
            return Ok(());
        }

        // Checked before the recipient is created, so bad input leaves no trace.
        let new_gift = NewGift::new(gift_name, price, url);
        new_gift.validate()?;

        let recipient = self.resolve_or_create(recipient_name).await?;
        let gift = self
            .gift_repository
            .insert_gift(recipient.id, new_gift)
            .await?;
        info!(
            "Added gift '{}' ({}) for '{}'",
            gift.name,
            gift.display_price(),
            recipient.name
        );
        Ok(())
    }

    async fn set_purchased(&self, gift_id: i32) -> Result<()> {
        match self.gift_repository.toggle_purchased(gift_id).await? {
            Some(purchased) => info!("Gift {} purchased = {}", gift_id, purchased),
            None => warn!("Cannot toggle purchased state: no gift with id {}", gift_id),
        }
        Ok(())
    }

    async fn drop_gift(&self, gift_id: i32) -> Result<()> {
        let removed = self.gift_repository.delete_gift(gift_id).await?;
        info!("Deleted gift {} ({} row(s) affected)", gift_id, removed);
        Ok(())
    }

    async fn drop_recipient(&self, recipient_id: i32, name: &str) -> Result<()> {
        match self.get_recipient(name) {
            Ok(recipient) => {
                for gift in &recipient.gifts {
                    self.drop_gift(gift.id).await?;
                }
            }
            Err(e) => warn!("Could not list gifts of '{}' before removal: {}", name, e),
        }

        let removed = self
            .recipient_repository
            .delete_recipient(recipient_id)
            .await?;
        info!(
            "Removed '{}' (id {}) from the database, {} row(s) affected",
            name, recipient_id, removed
        );
        Ok(())
    }

    fn export_txt(&self, target: Option<&str>) -> Result<String> {
        let recipients = match target {
            Some(name) => vec![self.get_recipient(name)?],
            None => self.get_all_recipients()?,
        };
        Ok(render_recipients(&recipients, self.tax_rate))
    }

    fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }
}
