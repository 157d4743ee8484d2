use giftlist_core::recipients::{is_web_url, Gift as CoreGift, Recipient as CoreRecipient};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: i32,
    pub recipient_id: i32,
    pub name: String,
    /// Price in cents.
    pub price: i64,
    pub display_price: String,
    /// Only `http`/`https` links are passed on; anything else is dropped.
    pub url: Option<String>,
    pub purchased: bool,
}

impl From<CoreGift> for Gift {
    fn from(g: CoreGift) -> Self {
        let display_price = g.display_price();
        Self {
            id: g.id,
            recipient_id: g.recipient_id,
            name: g.name,
            price: g.price,
            display_price,
            url: g.url.filter(|u| is_web_url(u)),
            purchased: g.purchased,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub id: i32,
    pub name: String,
    pub finished: bool,
    pub total_cost: Decimal,
    pub display_total_cost: String,
    pub gifts: Vec<Gift>,
}

impl Recipient {
    pub fn from_core(r: CoreRecipient, tax_rate: Decimal) -> Self {
        let total_cost = r.total_cost(tax_rate);
        let display_total_cost = r.display_total_cost(tax_rate);
        Self {
            id: r.id,
            name: r.name,
            finished: r.finished,
            total_cost,
            display_total_cost,
            gifts: r.gifts.into_iter().map(Gift::from).collect(),
        }
    }

    pub fn from_core_list(recipients: Vec<CoreRecipient>, tax_rate: Decimal) -> Vec<Self> {
        recipients
            .into_iter()
            .map(|r| Self::from_core(r, tax_rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_gift(url: Option<&str>) -> CoreGift {
        CoreGift {
            id: 1,
            recipient_id: 1,
            name: "Bike".to_string(),
            price: 19999,
            url: url.map(str::to_string),
            purchased: false,
        }
    }

    #[test]
    fn stored_script_links_are_not_exposed() {
        assert_eq!(Gift::from(core_gift(Some("javascript:alert(1)"))).url, None);
        assert_eq!(
            Gift::from(core_gift(Some("https://shop.example"))).url.as_deref(),
            Some("https://shop.example")
        );
        assert_eq!(Gift::from(core_gift(None)).url, None);
    }
}
