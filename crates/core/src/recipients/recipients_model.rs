//! Recipient and gift domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{Result, ValidationError};
use crate::utils::money_utils::{
    format_cents, format_money, sum_cents, total_with_tax, validate_price_cents,
};

/// A wishlist item belonging to exactly one recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: i32,
    pub recipient_id: i32,
    pub name: String,
    /// Price in cents.
    pub price: i64,
    pub url: Option<String>,
    pub purchased: bool,
}

impl Gift {
    /// Price rendered as `$X.YY`, without tax.
    pub fn display_price(&self) -> String {
        format_cents(self.price)
    }
}

/// Input model for adding a gift to a recipient's wishlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewGift {
    pub name: String,
    pub price: i64,
    pub url: Option<String>,
}

impl NewGift {
    pub fn new(name: impl Into<String>, price: i64, url: &str) -> Self {
        let url = url.trim();
        NewGift {
            name: name.into(),
            price,
            url: (!url.is_empty()).then(|| url.to_string()),
        }
    }

    /// Rejects prices outside the accepted range and links that are not
    /// plain web addresses.
    pub fn validate(&self) -> Result<()> {
        validate_price_cents(self.price)?;
        if let Some(url) = &self.url {
            if !is_web_url(url) {
                return Err(ValidationError::InvalidUrl(url.clone()).into());
            }
        }
        Ok(())
    }
}

/// True for absolute `http` and `https` URLs, the only links rendered as
/// clickable.
pub fn is_web_url(url: &str) -> bool {
    Url::parse(url.trim())
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// A recipient row as stored, before gifts are attached and the finished
/// status is derived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRecord {
    pub id: i32,
    pub name: String,
    /// Stored override; `true` forces the recipient to count as finished.
    pub finished: bool,
}

/// Domain model representing a recipient and their wishlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub id: i32,
    pub name: String,
    pub gifts: Vec<Gift>,
    /// Derived with [`compute_finished`].
    pub finished: bool,
}

impl Recipient {
    /// Attaches gifts to a stored record and derives the finished status.
    pub fn from_record(record: RecipientRecord, gifts: Vec<Gift>) -> Self {
        let finished = compute_finished(record.finished, &gifts);
        Recipient {
            id: record.id,
            name: record.name,
            gifts,
            finished,
        }
    }

    /// Sum of all gift prices in dollars, before tax.
    pub fn subtotal(&self) -> Decimal {
        sum_cents(self.gifts.iter().map(|g| g.price))
    }

    /// Estimated amount to spend, tax included, rounded to cents.
    pub fn total_cost(&self, tax_rate: Decimal) -> Decimal {
        total_with_tax(self.subtotal(), tax_rate)
    }

    /// [`Recipient::total_cost`] rendered as `$X.YY`.
    pub fn display_total_cost(&self, tax_rate: Decimal) -> String {
        format_money(self.total_cost(tax_rate))
    }
}

/// A recipient is finished when the stored flag says so, or when every gift
/// on the list has been purchased. An empty list counts as finished.
pub fn compute_finished(stored_flag: bool, gifts: &[Gift]) -> bool {
    stored_flag || gifts.iter().all(|g| g.purchased)
}

/// Flips a purchased flag.
pub fn toggle(flag: bool) -> bool {
    !flag
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn gift(id: i32, price: i64, purchased: bool) -> Gift {
        Gift {
            id,
            recipient_id: 1,
            name: format!("gift-{id}"),
            price,
            url: None,
            purchased,
        }
    }

    #[test]
    fn finished_when_all_gifts_purchased() {
        assert!(compute_finished(false, &[gift(1, 100, true), gift(2, 200, true)]));
        assert!(!compute_finished(false, &[gift(1, 100, true), gift(2, 200, false)]));
    }

    #[test]
    fn finished_with_no_gifts() {
        assert!(compute_finished(false, &[]));
    }

    #[test]
    fn stored_flag_forces_finished() {
        assert!(compute_finished(true, &[gift(1, 100, false)]));
    }

    #[test]
    fn toggle_flips() {
        assert!(toggle(false));
        assert!(!toggle(true));
        assert!(!toggle(toggle(false)));
    }

    #[test]
    fn new_gift_drops_blank_url() {
        assert_eq!(NewGift::new("Bike", 19999, "  ").url, None);
        assert_eq!(
            NewGift::new("Bike", 19999, "http://x").url.as_deref(),
            Some("http://x")
        );
    }

    #[test]
    fn only_web_links_are_accepted() {
        assert!(is_web_url("http://x"));
        assert!(is_web_url("https://shop.example/bike?id=1"));
        assert!(!is_web_url("javascript:alert(document.cookie)"));
        assert!(!is_web_url(" JavaScript:alert(1)"));
        assert!(!is_web_url("data:text/html,<script>alert(1)</script>"));
        assert!(!is_web_url("shop.example/bike"));

        assert!(NewGift::new("Bike", 100, "https://shop.example").validate().is_ok());
        assert!(NewGift::new("Bike", 100, "").validate().is_ok());
        assert!(matches!(
            NewGift::new("Bike", 100, "javascript:alert(1)").validate(),
            Err(crate::Error::Validation(ValidationError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn huge_prices_sum_without_overflow() {
        let record = RecipientRecord {
            id: 1,
            name: "Alice".to_string(),
            finished: false,
        };
        let price = 5_000_000_000_000_000_000;
        let recipient = Recipient::from_record(record, vec![gift(1, price, false), gift(2, price, false)]);

        assert_eq!(
            recipient.subtotal(),
            Decimal::from(100_000_000_000_000_000i64)
        );
        assert_eq!(
            recipient.display_total_cost(dec!(0.06)),
            "$106000000000000000.00"
        );
    }

    #[test]
    fn recipient_total_cost_includes_tax() {
        let record = RecipientRecord {
            id: 1,
            name: "Alice".to_string(),
            finished: false,
        };
        let recipient = Recipient::from_record(record, vec![gift(1, 1000, false), gift(2, 2000, true)]);

        assert_eq!(recipient.subtotal(), dec!(30.00));
        assert_eq!(recipient.total_cost(dec!(0.06)), dec!(31.80));
        assert_eq!(recipient.display_total_cost(dec!(0.06)), "$31.80");
        assert!(!recipient.finished);
        assert_eq!(recipient.gifts[0].display_price(), "$10.00");
    }
}
