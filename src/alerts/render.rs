//! Bell rendering: fixed group order, expiring → low-stock → system.
//!
//! Groups keep the order their source delivered them in. There is no
//! severity re-sort.

use crate::home::highlight_id;
use crate::models::SystemAlert;

use super::store::AlertFeedState;
use super::types::{
    AcknowledgeAction, Badge, ExpiringEntry, LowStockEntry, NotificationCategory,
    NotificationFeed, NotificationRow,
};

const FALLBACK_BRANCH: &str = "General";
const FALLBACK_ITEM: &str = "Unknown Item";
const SYSTEM_BRANCH: &str = "Admin";
const SYSTEM_DETAIL: &str = "Action required";

pub fn render_feed(state: &AlertFeedState) -> NotificationFeed {
    let rows: Vec<NotificationRow> = state
        .expiring()
        .iter()
        .map(expiring_row)
        .chain(state.low_stock().iter().map(low_stock_row))
        .chain(state.system().iter().map(system_row))
        .collect();

    let badge = Badge::from_count(state.counts().total());

    NotificationFeed {
        all_caught_up: rows.is_empty(),
        rows,
        badge,
    }
}

/// `"3 days left"` or `"Expired 5 days ago"`.
pub fn expiry_detail(days_left: i64) -> String {
    if days_left < 0 {
        format!("Expired {} days ago", days_left.unsigned_abs())
    } else {
        format!("{days_left} days left")
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn row(
    category: NotificationCategory,
    branch_label: String,
    item_label: String,
    detail_text: String,
    acknowledge: AcknowledgeAction,
) -> NotificationRow {
    NotificationRow {
        category,
        category_label: category.label(),
        highlight_id: highlight_id(&item_label, &branch_label),
        branch_label,
        item_label,
        detail_text,
        color_class: category.color_class(),
        acknowledge,
    }
}

fn expiring_row(entry: &ExpiringEntry) -> NotificationRow {
    let category = if entry.is_expired() {
        NotificationCategory::Expired
    } else {
        NotificationCategory::Expiring
    };
    row(
        category,
        or_fallback(&entry.branch, FALLBACK_BRANCH),
        or_fallback(&entry.item_name, FALLBACK_ITEM),
        expiry_detail(entry.days_left),
        AcknowledgeAction::Expiry {
            source_id: entry.source_id.clone(),
        },
    )
}

fn low_stock_row(entry: &LowStockEntry) -> NotificationRow {
    row(
        NotificationCategory::LowStock,
        or_fallback(&entry.branch, FALLBACK_BRANCH),
        or_fallback(&entry.name, FALLBACK_ITEM),
        format!("{} units left", entry.quantity),
        AcknowledgeAction::Stock {
            name: entry.name.clone(),
        },
    )
}

fn system_row(alert: &SystemAlert) -> NotificationRow {
    row(
        NotificationCategory::System,
        SYSTEM_BRANCH.to_string(),
        or_fallback(&alert.title, FALLBACK_ITEM),
        SYSTEM_DETAIL.to_string(),
        AcknowledgeAction::System {
            alert_id: alert.id.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::alerts::types::SourceId;

    fn expiring(item: &str, days_left: i64) -> ExpiringEntry {
        ExpiringEntry {
            item_name: item.into(),
            branch: "Main".into(),
            days_left,
            expires_at: Utc::now(),
            source_id: SourceId::Resolved(format!("{item}-id")),
            id: Some(format!("{item}-id")),
            object_id: None,
            batch_number: None,
        }
    }

    fn low(name: &str, branch: &str, quantity: i64) -> LowStockEntry {
        LowStockEntry {
            name: name.into(),
            branch: branch.into(),
            quantity,
        }
    }

    fn system(id: &str, title: &str) -> SystemAlert {
        SystemAlert {
            id: id.into(),
            title: title.into(),
            alert_type: Some("audit".into()),
        }
    }

    #[test]
    fn empty_state_is_all_caught_up() {
        let feed = render_feed(&AlertFeedState::new());
        assert!(feed.all_caught_up);
        assert!(feed.rows.is_empty());
        assert_eq!(feed.badge.label, "0");
        assert!(!feed.badge.visible);
    }

    #[test]
    fn groups_render_in_fixed_order() {
        let mut state = AlertFeedState::new();
        state.system = vec![system("s1", "Audit due")];
        state.low_stock = vec![low("Widget", "Main", 2), low("Bolt", "North", 0)];
        state.expiring = vec![expiring("Milk", 3), expiring("Yogurt", -1)];

        let feed = render_feed(&state);
        let items: Vec<_> = feed.rows.iter().map(|r| r.item_label.as_str()).collect();
        assert_eq!(items, vec!["Milk", "Yogurt", "Widget", "Bolt", "Audit due"]);
        assert_eq!(feed.badge.count, 5);
        assert_eq!(feed.badge.label, "5");
    }

    #[test]
    fn expired_row_detail_and_color() {
        let mut state = AlertFeedState::new();
        state.expiring = vec![expiring("Yogurt", -5)];
        let row = &render_feed(&state).rows[0];
        assert_eq!(row.category, NotificationCategory::Expired);
        assert_eq!(row.category_label, "Expired");
        assert_eq!(row.detail_text, "Expired 5 days ago");
        assert_eq!(row.color_class, "bg-red-500/20 text-red-400");
    }

    #[test]
    fn expiring_row_detail_and_color() {
        let mut state = AlertFeedState::new();
        state.expiring = vec![expiring("Milk", 10), expiring("Cream", 0)];
        let feed = render_feed(&state);
        assert_eq!(feed.rows[0].detail_text, "10 days left");
        assert_eq!(feed.rows[0].color_class, "bg-orange-500/20 text-orange-400");
        assert_eq!(feed.rows[1].category, NotificationCategory::Expiring);
        assert_eq!(feed.rows[1].detail_text, "0 days left");
    }

    #[test]
    fn low_stock_row_fields() {
        let mut state = AlertFeedState::new();
        state.low_stock = vec![low("Widget", "", 2)];
        let row = &render_feed(&state).rows[0];
        assert_eq!(row.category_label, "Low Stock");
        assert_eq!(row.branch_label, "General");
        assert_eq!(row.detail_text, "2 units left");
        assert_eq!(row.highlight_id, "widgetgeneral");
        assert_eq!(
            row.acknowledge,
            AcknowledgeAction::Stock {
                name: "Widget".into()
            }
        );
    }

    #[test]
    fn system_row_fields() {
        let mut state = AlertFeedState::new();
        state.system = vec![system("42", "")];
        let row = &render_feed(&state).rows[0];
        assert_eq!(row.branch_label, "Admin");
        assert_eq!(row.item_label, "Unknown Item");
        assert_eq!(row.detail_text, "Action required");
        assert_eq!(row.color_class, "bg-indigo-500/20 text-indigo-400");
        assert_eq!(row.acknowledge.identifier(), None);
    }

    #[test]
    fn badge_saturates_but_count_is_exact() {
        let mut state = AlertFeedState::new();
        state.low_stock = (0..12).map(|i| low(&format!("Item{i}"), "Main", 0)).collect();
        let feed = render_feed(&state);
        assert_eq!(feed.badge.count, 12);
        assert_eq!(feed.badge.label, "9+");
        assert_eq!(feed.rows.len(), 12);
    }

    #[test]
    fn ten_is_first_saturated_count() {
        let mut state = AlertFeedState::new();
        state.low_stock = (0..10).map(|i| low(&format!("Item{i}"), "Main", 0)).collect();
        assert_eq!(render_feed(&state).badge.label, "9+");
        state.low_stock.pop();
        assert_eq!(render_feed(&state).badge.label, "9");
    }
}
