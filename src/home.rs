//! Dashboard home: KPI cards, the critical restock table, AI summary text and
//! the inventory card helpers that notification rows navigate into.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::CRITICAL_RESTOCK_LIMIT;
use crate::models::{AiDashboard, InventoryItem};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardKpis {
    pub total_value: f64,
    pub total_value_label: String,
    pub low_stock_count: usize,
    pub expiring_count: usize,
    pub branch_count: usize,
    pub generated_at: DateTime<Utc>,
}

/// Row of the "restock now" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestockCandidate {
    pub name: String,
    pub branch: String,
    pub quantity: i64,
    pub reorder_level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiSummary {
    pub summary_text: String,
    pub risk_text: String,
}

impl AiSummary {
    pub fn from_response(response: Option<&AiDashboard>) -> Self {
        let pick = |value: Option<&String>, fallback: &str| {
            value
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            summary_text: pick(response.and_then(|r| r.summary_text.as_ref()), "No AI data."),
            risk_text: pick(response.and_then(|r| r.risk_text.as_ref()), "No risk data."),
        }
    }
}

/// Everything the home screen renders, fetched in one go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeData {
    pub kpis: DashboardKpis,
    pub critical_restock: Vec<RestockCandidate>,
    pub ai: AiSummary,
}

/// Branch + name filter for the inventory card grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    /// `None`, empty or `All` shows every branch.
    pub branch: Option<String>,
    pub search: String,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

pub fn compute_kpis(
    inventory: &[InventoryItem],
    branch_count: usize,
    expiring_count: usize,
    now: DateTime<Utc>,
) -> DashboardKpis {
    let total_value: f64 = inventory.iter().map(InventoryItem::stock_value).sum();
    DashboardKpis {
        total_value,
        total_value_label: format_peso(total_value),
        low_stock_count: inventory.iter().filter(|i| i.is_low_stock()).count(),
        expiring_count,
        branch_count,
        generated_at: now,
    }
}

/// Low-stock items, most critical first (smallest `quantity - reorder_level`).
/// Ties keep snapshot order.
pub fn critical_restock(inventory: &[InventoryItem], limit: usize) -> Vec<RestockCandidate> {
    let mut low: Vec<&InventoryItem> = inventory.iter().filter(|i| i.is_low_stock()).collect();
    low.sort_by_key(|i| i.stock_margin());
    low.into_iter()
        .take(limit)
        .map(|i| RestockCandidate {
            name: i.name.clone(),
            branch: i.branch.clone(),
            quantity: i.quantity_or_zero(),
            reorder_level: i.reorder_level_or_zero(),
        })
        .collect()
}

pub fn build_home_data(
    inventory: &[InventoryItem],
    branch_count: usize,
    expiring_count: usize,
    ai: Option<&AiDashboard>,
    now: DateTime<Utc>,
) -> HomeData {
    HomeData {
        kpis: compute_kpis(inventory, branch_count, expiring_count, now),
        critical_restock: critical_restock(inventory, CRITICAL_RESTOCK_LIMIT),
        ai: AiSummary::from_response(ai),
    }
}

/// Whole-peso amount with thousands separators, e.g. `₱12,346`.
pub fn format_peso(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-₱{grouped}")
    } else {
        format!("₱{grouped}")
    }
}

/// DOM-safe card id for an inventory line: lowercase ASCII alphanumerics of
/// `"{name}-{branch}"`, with `general` standing in for a missing branch.
pub fn highlight_id(name: &str, branch: &str) -> String {
    let branch = if branch.is_empty() { "general" } else { branch };
    format!("{name}-{branch}")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn filter_inventory<'a>(
    items: &'a [InventoryItem],
    filter: &InventoryFilter,
) -> Vec<&'a InventoryItem> {
    let branch = filter
        .branch
        .as_deref()
        .filter(|b| !b.is_empty() && *b != "All");
    let needle = filter.search.trim().to_lowercase();

    items
        .iter()
        .filter(|item| branch.map_or(true, |b| item.branch == b))
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn item(name: &str, branch: &str, quantity: i64, reorder: i64, price: f64) -> InventoryItem {
        InventoryItem {
            name: name.into(),
            branch: branch.into(),
            quantity: Some(quantity),
            reorder_level: Some(reorder),
            price: Some(price),
            category: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn kpis_sum_value_and_count_low_stock() {
        let inventory = vec![
            item("Widget", "Main", 2, 5, 100.0),
            item("Bolt", "Main", 50, 10, 1.5),
            InventoryItem {
                name: "Ghost".into(),
                ..Default::default()
            },
        ];
        let kpis = compute_kpis(&inventory, 3, 4, now());
        assert_eq!(kpis.total_value, 275.0);
        assert_eq!(kpis.total_value_label, "₱275");
        assert_eq!(kpis.low_stock_count, 2);
        assert_eq!(kpis.expiring_count, 4);
        assert_eq!(kpis.branch_count, 3);
    }

    #[test]
    fn critical_restock_sorts_by_margin_and_caps() {
        let inventory = vec![
            item("A", "Main", 4, 5, 0.0),
            item("B", "Main", 0, 10, 0.0),
            item("C", "Main", 100, 5, 0.0),
            item("D", "Main", 1, 5, 0.0),
            item("E", "Main", 2, 3, 0.0),
            item("F", "Main", 0, 2, 0.0),
            item("G", "Main", 3, 3, 0.0),
        ];
        let names: Vec<_> = critical_restock(&inventory, 5)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["B", "D", "F", "A", "E"]);
    }

    #[test]
    fn critical_restock_tolerates_extreme_quantities() {
        let inventory: Vec<InventoryItem> = serde_json::from_str(
            r#"[
                {"name": "A", "quantity": "-1e30", "reorder_level": 5},
                {"name": "B", "quantity": 1, "reorder_level": 2},
                {"name": "C", "quantity": 0, "reorder_level": "9e30"}
            ]"#,
        )
        .unwrap();
        let names: Vec<_> = critical_restock(&inventory, 5)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn ai_summary_falls_back() {
        let summary = AiSummary::from_response(None);
        assert_eq!(summary.summary_text, "No AI data.");
        assert_eq!(summary.risk_text, "No risk data.");

        let response = AiDashboard {
            summary_text: Some("Stock healthy".into()),
            risk_text: Some("  ".into()),
        };
        let summary = AiSummary::from_response(Some(&response));
        assert_eq!(summary.summary_text, "Stock healthy");
        assert_eq!(summary.risk_text, "No risk data.");
    }

    #[test]
    fn peso_formatting_groups_thousands() {
        assert_eq!(format_peso(0.0), "₱0");
        assert_eq!(format_peso(999.4), "₱999");
        assert_eq!(format_peso(1234.5), "₱1,235");
        assert_eq!(format_peso(1_234_567.0), "₱1,234,567");
        assert_eq!(format_peso(-2500.0), "-₱2,500");
    }

    #[test]
    fn highlight_id_strips_and_lowercases() {
        assert_eq!(highlight_id("Widget X-2", "Main St."), "widgetx2mainst");
        assert_eq!(highlight_id("Widget", ""), "widgetgeneral");
    }

    #[test]
    fn filter_by_branch_and_search() {
        let inventory = vec![
            item("Red Widget", "Main", 1, 0, 0.0),
            item("Blue Widget", "North", 1, 0, 0.0),
            item("Bolt", "Main", 1, 0, 0.0),
        ];

        let all = filter_inventory(&inventory, &InventoryFilter::default());
        assert_eq!(all.len(), 3);

        let all_branch = InventoryFilter {
            branch: Some("All".into()),
            search: String::new(),
        };
        assert_eq!(filter_inventory(&inventory, &all_branch).len(), 3);

        let main_widgets = InventoryFilter {
            branch: Some("Main".into()),
            search: " WIDGET ".into(),
        };
        let names: Vec<_> = filter_inventory(&inventory, &main_widgets)
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Red Widget"]);
    }

    #[test]
    fn home_data_bundles_everything() {
        let inventory = vec![item("Widget", "Main", 2, 5, 10.0)];
        let home = build_home_data(&inventory, 1, 0, None, now());
        assert_eq!(home.kpis.low_stock_count, 1);
        assert_eq!(home.critical_restock.len(), 1);
        assert_eq!(home.ai.summary_text, "No AI data.");
    }
}
