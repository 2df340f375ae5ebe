//! # Receipt Export
//!
//! Renders a committed receipt as a standalone HTML document for download or
//! printing from the history screen. The ticket markup in
//! `minipos_core::ticket` is for the thermal printer; this is the
//! human-facing copy.

use chrono::Datelike;

use minipos_core::types::{PaymentMethod, Receipt, ReceiptStatus};

/// Minimal HTML escaping for user-entered text (names, cancel reasons).
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders one receipt as a self-contained HTML page.
///
/// ## Layout
/// Header (store name, number, status badge), info rows (date, cashier,
/// optional client, payment), item lines, totals with optional discount row,
/// cancel reason block for cancelled receipts, footer.
pub fn render_receipt_html(receipt: &Receipt, store_name: &str) -> String {
    let status_class = if receipt.is_paid() {
        "status-paid"
    } else {
        "status-cancelled"
    };
    let status_label = if receipt.is_paid() {
        "ОПЛАЧЕНО"
    } else {
        "ОТМЕНЕНО"
    };
    let payment_label = match receipt.payment_type {
        PaymentMethod::Cash => "Наличные",
        PaymentMethod::Qr => "QR-код",
    };

    let client_row = match &receipt.client_name {
        Some(name) => format!(
            "<div class=\"info-row\"><span class=\"label\">Клиент:</span>\
             <span class=\"value\">{}</span></div>",
            escape(name)
        ),
        None => String::new(),
    };

    let items: String = receipt
        .items
        .iter()
        .map(|item| {
            format!(
                "<div class=\"item\"><div class=\"item-name\">{}</div>\
                 <div class=\"item-qty\">×{}</div>\
                 <div class=\"item-price\">{} сом</div></div>",
                escape(&item.product_name),
                item.qty,
                item.line_total().decimal_string()
            )
        })
        .collect();

    let discount_row = if receipt.discount.is_positive() {
        format!(
            "<div class=\"total-row discount\"><span>Скидка:</span>\
             <span>-{} сом</span></div>",
            receipt.discount.decimal_string()
        )
    } else {
        String::new()
    };

    let cancel_block = match (&receipt.status, &receipt.cancel_reason) {
        (ReceiptStatus::Cancelled, Some(reason)) => format!(
            "<div class=\"cancel-reason\"><strong>Причина отмены:</strong><br>{}</div>",
            escape(reason)
        ),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    body {{ font-family: Arial, sans-serif; max-width: 400px; margin: 0 auto; padding: 20px; }}
    .header {{ text-align: center; margin-bottom: 30px; border-bottom: 2px solid #333; padding-bottom: 20px; }}
    .logo {{ font-size: 24px; font-weight: bold; color: #2563eb; margin-bottom: 10px; }}
    .info-row {{ display: flex; justify-content: space-between; padding: 5px 0; font-size: 14px; }}
    .label {{ color: #666; }}
    .value {{ font-weight: bold; }}
    .item {{ display: flex; justify-content: space-between; padding: 10px 0; border-bottom: 1px solid #eee; }}
    .item-name {{ flex: 1; }}
    .item-qty {{ width: 60px; text-align: center; color: #666; }}
    .item-price {{ width: 100px; text-align: right; font-weight: bold; }}
    .totals {{ margin-top: 20px; padding-top: 20px; border-top: 2px solid #333; }}
    .total-row {{ display: flex; justify-content: space-between; padding: 5px 0; font-size: 14px; }}
    .total-final {{ font-size: 20px; font-weight: bold; margin-top: 10px; padding-top: 10px; border-top: 1px solid #333; }}
    .discount {{ color: #dc2626; }}
    .cancel-reason {{ text-align: center; margin: 20px 0; padding: 15px; background: #fee2e2; color: #991b1b; border-radius: 8px; }}
    .footer {{ text-align: center; margin-top: 30px; padding-top: 20px; border-top: 2px solid #333; font-size: 12px; color: #666; }}
    .status {{ display: inline-block; padding: 5px 15px; border-radius: 20px; font-size: 12px; font-weight: bold; margin: 10px 0; }}
    .status-paid {{ background: #dcfce7; color: #166534; }}
    .status-cancelled {{ background: #fee2e2; color: #991b1b; }}
  </style>
</head>
<body>
  <div class="header">
    <div class="logo">{store_name}</div>
    <div style="font-size: 16px; font-weight: bold;">Чек #{number}</div>
    <div class="status {status_class}">{status_label}</div>
  </div>
  <div class="info">
    <div class="info-row"><span class="label">Дата:</span><span class="value">{date}</span></div>
    <div class="info-row"><span class="label">Кассир:</span><span class="value">{cashier}</span></div>
    {client_row}
    <div class="info-row"><span class="label">Оплата:</span><span class="value">{payment_label}</span></div>
  </div>
  <div class="items">
    <h3 style="margin-bottom: 10px;">Товары:</h3>
    {items}
  </div>
  <div class="totals">
    <div class="total-row"><span>Подытог:</span><span>{subtotal} сом</span></div>
    {discount_row}
    <div class="total-row total-final"><span>ИТОГО:</span><span>{total} сом</span></div>
  </div>
  {cancel_block}
  <div class="footer">
    <p>Спасибо за покупку!</p>
    <p>{year} © Все права защищены</p>
  </div>
</body>
</html>
"#,
        store_name = escape(store_name),
        number = escape(&receipt.number),
        status_class = status_class,
        status_label = status_label,
        date = receipt.created_at.format("%d.%m.%Y, %H:%M:%S"),
        cashier = escape(&receipt.cashier_name),
        client_row = client_row,
        payment_label = payment_label,
        items = items,
        subtotal = receipt.subtotal.decimal_string(),
        discount_row = discount_row,
        total = receipt.total.decimal_string(),
        cancel_block = cancel_block,
        year = receipt.created_at.year(),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
