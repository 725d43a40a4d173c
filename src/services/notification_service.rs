//! Notification fan-out over the Telegram channel.
//!
//! Notifications are best-effort: delivery failures are logged and never
//! bubble up into the request that triggered them.

use log::{info, warn};
use std::sync::Arc;

use crate::config::CONFIG;
use crate::models::Order;
use crate::telegram::TelegramClient;
use crate::utils::log_sanitizer::{mask_code, mask_phone};

pub struct NotificationService {
    telegram: Option<Arc<TelegramClient>>,
}

impl NotificationService {
    pub fn new(telegram: Option<TelegramClient>) -> Self {
        if telegram.is_none() {
            info!("Telegram channel disabled, notifications are log-only");
        }
        Self {
            telegram: telegram.map(Arc::new),
        }
    }

    /// Deliver a verification code through the debug chat.
    ///
    /// The code itself never reaches the logs.
    pub fn send_otp_code(&self, phone: &str, code: &str) {
        info!(
            "Verification code {} issued for {}",
            mask_code(code),
            mask_phone(phone)
        );

        let Some(client) = self.telegram.clone() else {
            return;
        };
        let Some(chat_id) = CONFIG.telegram.debug_chat_id else {
            return;
        };

        let text = format!("Verification code for {}: {}", phone, code);
        tokio::spawn(async move {
            if let Err(err) = client.send_message(chat_id, &text).await {
                warn!("Failed to deliver OTP notification: {}", err);
            }
        });
    }

    /// Announce a new order to every admin chat.
    ///
    /// `titles` carries the resolved product titles, aligned with
    /// `order.products`.
    pub fn notify_order_created(&self, order: &Order, titles: &[String]) {
        info!(
            "Order {} created for {}",
            order.id.map(|id| id.to_hex()).unwrap_or_default(),
            mask_phone(&order.phone)
        );

        let Some(client) = self.telegram.clone() else {
            return;
        };

        let text = format_order_message(order, titles);
        for chat_id in CONFIG.telegram.admin_chat_ids.clone() {
            let client = client.clone();
            let text = text.clone();
            tokio::spawn(async move {
                if let Err(err) = client.send_message(chat_id, &text).await {
                    warn!(
                        "Failed to deliver order notification to chat {}: {}",
                        chat_id, err
                    );
                }
            });
        }
    }
}

/// Render an order into a human-readable notification.
fn format_order_message(order: &Order, titles: &[String]) -> String {
    let mut lines = Vec::new();

    if order.is_test_order {
        lines.push("[TEST ORDER]".to_string());
    }
    lines.push(format!(
        "New order #{}",
        order.id.map(|id| id.to_hex()).unwrap_or_default()
    ));
    lines.push(format!("Customer: {} ({})", order.username, order.phone));
    lines.push(format!("Address: {}", order.address));

    for (i, product) in order.products.iter().enumerate() {
        let title = titles
            .get(i)
            .cloned()
            .unwrap_or_else(|| product.product_id.to_hex());
        lines.push(format!(
            "- {} x{} = {}",
            title,
            product.number,
            product.cost * product.number
        ));
    }

    if order.delivery {
        match order.delivery_cost {
            Some(cost) => lines.push(format!("Delivery: {}", cost)),
            None => lines.push("Delivery: to be calculated".to_string()),
        }
    } else {
        lines.push("Pickup".to_string());
    }

    if order.discount.is_some() {
        lines.push("Discount: free delivery".to_string());
    }

    if let Some(info) = &order.additional_information {
        lines.push(format!("Comment: {}", info));
    }

    lines.push(format!("Total: {} ({} g)", order.cost, order.weight));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderCondition, OrderedProduct};
    use mongodb::bson::oid::ObjectId;

    fn sample_order() -> Order {
        Order {
            id: Some(ObjectId::parse_str("507f1f77bcf86cd799439031").unwrap()),
            client: None,
            phone: "+79991234567".to_string(),
            address: "Lenina st. 1".to_string(),
            username: "Ivan".to_string(),
            condition: OrderCondition::New,
            delivery: true,
            delivery_cost: None,
            delivery_calculated_manually: true,
            discount: None,
            additional_information: None,
            cost: 5000,
            weight: 1800,
            products: vec![OrderedProduct {
                product_id: ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap(),
                variant_id: None,
                number: 2,
                cost: 2500,
                weight: 900,
            }],
            is_test_order: false,
            created_at: mongodb::bson::DateTime::now(),
            updated_at: mongodb::bson::DateTime::now(),
        }
    }

    #[test]
    fn message_mentions_totals_and_manual_delivery() {
        let text = format_order_message(&sample_order(), &["Cheesecake".to_string()]);
        assert!(text.contains("New order #507f1f77bcf86cd799439031"));
        assert!(text.contains("- Cheesecake x2 = 5000"));
        assert!(text.contains("Delivery: to be calculated"));
        assert!(text.contains("Total: 5000 (1800 g)"));
        assert!(!text.contains("[TEST ORDER]"));
    }

    #[test]
    fn test_orders_are_marked() {
        let mut order = sample_order();
        order.is_test_order = true;
        order.delivery = false;
        let text = format_order_message(&order, &[]);
        assert!(text.starts_with("[TEST ORDER]"));
        assert!(text.contains("Pickup"));
        assert!(text.contains("- 507f1f77bcf86cd799439011 x2"));
    }
}
