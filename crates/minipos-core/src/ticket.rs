//! # Ticket Module
//!
//! Generates the `printdata` payload for the receipt-printer driver.
//!
//! ## Wire Contract
//! The printer helper service consumes a markup string with size/style/
//! alignment tags wrapping each line. This format is a fixed contract with
//! an external driver and is reproduced here tag-for-tag:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <F3232>  32×32 font (headers, grand total)                             │
//! │  <F2424>  24×24 font (items, detail lines)                              │
//! │  <FB>     bold                                                          │
//! │  <CENTER> horizontally centered                                         │
//! │                                                                         │
//! │  Lines are joined with CRLF ("\r\n").                                   │
//! │                                                                         │
//! │  ----------------------------                                           │
//! │         Eldik Kassa                                                     │
//! │      01.05.2024, 14:30:00                                               │
//! │  Cola 0.5l                                                              │
//! │        2 × 55.00 = 110.00                                               │
//! │  ----------------------------                                           │
//! │        Подытог: 110.00                                                  │
//! │        Скидка: 10.00                                                    │
//! │        ИТОГО: 100.00                                                    │
//! │     Тип оплаты: НАЛИЧНЫМИ                                               │
//! │  ----------------------------                                           │
//! │      Спасибо за покупку                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::{PaymentMethod, ReceiptItem};

/// The dashed separator used between ticket sections.
const SEPARATOR: &str = "<CENTER>----------------------------</CENTER>";

/// Timestamp format printed under the header (day-first, 24h clock).
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Renders the payment-method line text.
fn payment_label(payment_type: PaymentMethod) -> &'static str {
    match payment_type {
        PaymentMethod::Cash => "НАЛИЧНЫМИ",
        PaymentMethod::Qr => "QR ОПЛАТА",
    }
}

/// Builds the full `printdata` markup string for one sale.
///
/// The caller passes the already-clamped discount and the final total; the
/// subtotal is recomputed from the items so the printed arithmetic always
/// matches the printed lines.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use minipos_core::money::Money;
/// use minipos_core::ticket::generate_print_data;
/// use minipos_core::types::{PaymentMethod, ReceiptItem};
///
/// let items = vec![ReceiptItem {
///     id: "l1".into(),
///     product_id: "p1".into(),
///     product_name: "Cola".into(),
///     qty: 2,
///     price: Money::from_minor(5500),
/// }];
/// let data = generate_print_data(
///     "Eldik Kassa",
///     &items,
///     Money::from_minor(10000),
///     Money::from_minor(1000),
///     PaymentMethod::Cash,
///     Utc::now(),
/// );
/// assert!(data.contains("ИТОГО: 100.00"));
/// ```
pub fn generate_print_data(
    store_name: &str,
    items: &[ReceiptItem],
    total: Money,
    discount: Money,
    payment_type: PaymentMethod,
    timestamp: DateTime<Utc>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("<F3232>{}</F3232>", SEPARATOR));
    lines.push(format!(
        "<F3232><FB><CENTER>{}\r</CENTER></FB></F3232>",
        store_name
    ));
    lines.push(format!(
        "<F2424><CENTER>{}</CENTER></F2424>",
        timestamp.format(TIMESTAMP_FORMAT)
    ));

    for item in items {
        lines.push(format!("<F2424>{}</F2424>", item.product_name));
        lines.push(format!(
            "<F2424><CENTER>{} × {} = {}</CENTER></F2424>",
            item.qty,
            item.price.decimal_string(),
            item.line_total().decimal_string()
        ));
    }

    lines.push(SEPARATOR.to_string());

    let subtotal: Money = items.iter().map(|i| i.line_total()).sum();

    lines.push(format!(
        "<F2424><CENTER>Подытог: {}</CENTER></F2424>",
        subtotal.decimal_string()
    ));
    lines.push(format!(
        "<F2424><CENTER>Скидка: {}</CENTER></F2424>",
        discount.decimal_string()
    ));
    lines.push(format!(
        "<F3232><CENTER>ИТОГО: {}</CENTER></F3232>",
        total.decimal_string()
    ));
    lines.push(format!(
        "<F2424><CENTER>Тип оплаты: {}</CENTER></F2424>",
        payment_label(payment_type)
    ));
    lines.push(format!("<F3232>{}</F3232>", SEPARATOR));
    lines.push("<CENTER>Спасибо за покупку</CENTER>".to_string());

    lines.join("\r\n")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_items() -> Vec<ReceiptItem> {
        vec![
            ReceiptItem {
                id: "l1".to_string(),
                product_id: "p1".to_string(),
                product_name: "Cola 0.5l".to_string(),
                qty: 2,
                price: Money::from_minor(5500),
            },
            ReceiptItem {
                id: "l2".to_string(),
                product_id: "p2".to_string(),
                product_name: "Bread".to_string(),
                qty: 1,
                price: Money::from_minor(3500),
            },
        ]
    }

    #[test]
    fn test_full_ticket_layout() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
        let data = generate_print_data(
            "Eldik Kassa",
            &sample_items(),
            Money::from_minor(13500), // 145.00 - 10.00
            Money::from_minor(1000),
            PaymentMethod::Cash,
            ts,
        );

        let expected = [
            "<F3232><CENTER>----------------------------</CENTER></F3232>",
            "<F3232><FB><CENTER>Eldik Kassa\r</CENTER></FB></F3232>",
            "<F2424><CENTER>01.05.2024, 14:30:00</CENTER></F2424>",
            "<F2424>Cola 0.5l</F2424>",
            "<F2424><CENTER>2 × 55.00 = 110.00</CENTER></F2424>",
            "<F2424>Bread</F2424>",
            "<F2424><CENTER>1 × 35.00 = 35.00</CENTER></F2424>",
            "<CENTER>----------------------------</CENTER>",
            "<F2424><CENTER>Подытог: 145.00</CENTER></F2424>",
            "<F2424><CENTER>Скидка: 10.00</CENTER></F2424>",
            "<F3232><CENTER>ИТОГО: 135.00</CENTER></F3232>",
            "<F2424><CENTER>Тип оплаты: НАЛИЧНЫМИ</CENTER></F2424>",
            "<F3232><CENTER>----------------------------</CENTER></F3232>",
            "<CENTER>Спасибо за покупку</CENTER>",
        ]
        .join("\r\n");

        assert_eq!(data, expected);
    }

    #[test]
    fn test_qr_payment_label() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
        let data = generate_print_data(
            "Eldik Kassa",
            &sample_items(),
            Money::from_minor(14500),
            Money::zero(),
            PaymentMethod::Qr,
            ts,
        );

        assert!(data.contains("Тип оплаты: QR ОПЛАТА"));
        assert!(!data.contains("НАЛИЧНЫМИ"));
    }

    #[test]
    fn test_lines_joined_with_crlf() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
        let data = generate_print_data(
            "Eldik Kassa",
            &[],
            Money::zero(),
            Money::zero(),
            PaymentMethod::Cash,
            ts,
        );

        assert!(data.contains("\r\n"));
        // No bare LF between lines
        assert!(!data.replace("\r\n", "").contains('\n'));
    }
}
