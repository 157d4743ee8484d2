use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Table holding one row per recipient.
pub const RECIPIENT_TABLE: &str = "tRecipients";

/// Table holding one row per gift.
pub const GIFT_TABLE: &str = "tGifts";

/// Michigan sales tax, applied to a recipient's total only.
pub const DEFAULT_SALES_TAX_RATE: Decimal = dec!(0.06);

/// Decimal places used when displaying money.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Minor units per major currency unit.
pub const CENTS_PER_DOLLAR: i64 = 100;

/// Highest price accepted for a single gift: $1,000,000,000.00.
pub const MAX_GIFT_PRICE_CENTS: i64 = 100_000_000_000;
