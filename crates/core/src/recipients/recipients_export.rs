//! Plain-text dump of recipients and their wishlists.

use rust_decimal::Decimal;

use super::recipients_model::{Gift, Recipient};

fn humanize_bool(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

fn render_gift(gift: &Gift) -> String {
    format!(
        "\t{}\n\tprice: {}\n\talready purchased: {}\n\n",
        gift.name,
        gift.display_price(),
        humanize_bool(gift.purchased)
    )
}

/// Renders one recipient block: header lines followed by one block per gift.
pub fn render_recipient(recipient: &Recipient, tax_rate: Decimal) -> String {
    let mut out = format!(
        "{}\nestimated amount to spend: {}\nshopping finished: {}\nwishlist:\n\n",
        recipient.name,
        recipient.display_total_cost(tax_rate),
        humanize_bool(recipient.finished)
    );
    for gift in &recipient.gifts {
        out.push_str(&render_gift(gift));
    }
    out
}

/// Renders every recipient, in order, back to back.
pub fn render_recipients(recipients: &[Recipient], tax_rate: Decimal) -> String {
    recipients
        .iter()
        .map(|r| render_recipient(r, tax_rate))
        .collect()
}
