//! Form payload builders for the dashboard's create/adjust dialogs.
//!
//! Validation is limited to trimming and required-field checks, plus parsing
//! the numeric and date inputs into the types the backend expects.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::alerts::detection::parse_expiration;
use crate::models::{
    NewBatch, NewBranch, NewOrder, NewSupplier, OrderStatus, StockAction, StockAdjustment,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid date for {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(trimmed.to_string())
}

fn parse_count(value: &str, field: &'static str) -> Result<i64, FormError> {
    let trimmed = required(value, field)?;
    trimmed
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or(FormError::InvalidNumber {
            field,
            value: trimmed,
        })
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct BranchForm {
    pub name: String,
    pub address: String,
    pub manager: String,
}

impl BranchForm {
    pub fn validate(&self) -> Result<NewBranch, FormError> {
        Ok(NewBranch {
            name: required(&self.name, "name")?,
            address: self.address.trim().to_string(),
            manager: self.manager.trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct BatchForm {
    pub item_name: String,
    pub branch: String,
    pub quantity: String,
    pub exp_date: String,
    pub batch_number: String,
}

impl BatchForm {
    pub fn validate(&self) -> Result<NewBatch, FormError> {
        let item_name = required(&self.item_name, "item_name")?;
        let branch = required(&self.branch, "branch")?;
        let quantity = parse_count(&self.quantity, "quantity")?;
        let exp_date = required(&self.exp_date, "exp_date")?;
        if parse_expiration(&exp_date).is_none() {
            return Err(FormError::InvalidDate {
                field: "exp_date",
                value: exp_date,
            });
        }
        let batch_number = Some(self.batch_number.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(NewBatch {
            item_name,
            branch,
            quantity,
            exp_date,
            batch_number,
        })
    }
}

// ---------------------------------------------------------------------------
// Supplier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SupplierForm {
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub lead_time_days: String,
}

impl SupplierForm {
    pub fn validate(&self) -> Result<NewSupplier, FormError> {
        let name = required(&self.name, "name")?;
        let lead = self.lead_time_days.trim();
        let lead_time_days = if lead.is_empty() {
            None
        } else {
            Some(lead.parse::<u32>().map_err(|_| FormError::InvalidNumber {
                field: "lead_time_days",
                value: lead.to_string(),
            })?)
        };

        Ok(NewSupplier {
            name,
            contact: self.contact.trim().to_string(),
            phone: self.phone.trim().to_string(),
            lead_time_days,
        })
    }
}

// ---------------------------------------------------------------------------
// Restock order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RestockForm {
    pub item: String,
    pub branch: String,
    pub quantity: String,
    pub supplier: String,
    pub priority: String,
    pub notes: String,
}

impl RestockForm {
    /// Build a pending order stamped with `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<NewOrder, FormError> {
        let item = required(&self.item, "item")?;
        let branch = required(&self.branch, "branch")?;
        let raw_quantity = required(&self.quantity, "quantity")?;
        let quantity = raw_quantity
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or(FormError::InvalidNumber {
                field: "quantity",
                value: raw_quantity,
            })?;

        Ok(NewOrder {
            item,
            branch,
            quantity,
            supplier: required(&self.supplier, "supplier")?,
            priority: required(&self.priority, "priority")?,
            notes: self.notes.trim().to_string(),
            status: OrderStatus::Pending,
            created_at: now,
        })
    }
}

// ---------------------------------------------------------------------------
// Stock adjustment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StockAdjustmentForm {
    pub branch: String,
    pub action: StockAction,
    pub quantity: String,
    /// On-hand quantity when the dialog opened.
    pub current: i64,
}

impl StockAdjustmentForm {
    /// `in` adds, `out` subtracts, `set` moves to the entered absolute level.
    pub fn validate(&self) -> Result<StockAdjustment, FormError> {
        let quantity = parse_count(&self.quantity, "quantity")?;
        let delta = match self.action {
            StockAction::In => quantity,
            StockAction::Out => -quantity,
            StockAction::Set => {
                quantity
                    .checked_sub(self.current)
                    .ok_or_else(|| FormError::InvalidNumber {
                        field: "quantity",
                        value: self.quantity.trim().to_string(),
                    })?
            }
        };
        Ok(StockAdjustment {
            branch: self.branch.trim().to_string(),
            delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn branch_name_is_trimmed_and_required() {
        let form = BranchForm {
            name: "  Downtown ".into(),
            address: " 1 Main St ".into(),
            manager: String::new(),
        };
        let branch = form.validate().unwrap();
        assert_eq!(branch.name, "Downtown");
        assert_eq!(branch.address, "1 Main St");

        let blank = BranchForm {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(blank.validate().unwrap_err(), FormError::Required("name"));
    }

    #[test]
    fn batch_requires_parseable_date() {
        let mut form = BatchForm {
            item_name: " Milk ".into(),
            branch: "Main".into(),
            quantity: "24".into(),
            exp_date: "2026-04-01".into(),
            batch_number: "  ".into(),
        };
        let batch = form.validate().unwrap();
        assert_eq!(batch.item_name, "Milk");
        assert_eq!(batch.quantity, 24);
        assert_eq!(batch.batch_number, None);

        form.exp_date = "whenever".into();
        assert!(matches!(
            form.validate().unwrap_err(),
            FormError::InvalidDate { field: "exp_date", .. }
        ));

        form.exp_date = String::new();
        assert_eq!(form.validate().unwrap_err(), FormError::Required("exp_date"));
    }

    #[test]
    fn batch_rejects_negative_quantity() {
        let form = BatchForm {
            item_name: "Milk".into(),
            branch: "Main".into(),
            quantity: "-3".into(),
            exp_date: "2026-04-01".into(),
            batch_number: String::new(),
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            FormError::InvalidNumber { field: "quantity", .. }
        ));
    }

    #[test]
    fn supplier_lead_time_is_optional() {
        let mut form = SupplierForm {
            name: "Acme".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap().lead_time_days, None);

        form.lead_time_days = " 7 ".into();
        assert_eq!(form.validate().unwrap().lead_time_days, Some(7));

        form.lead_time_days = "a week".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn restock_builds_pending_order() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 30, 0).unwrap();
        let form = RestockForm {
            item: "Widget".into(),
            branch: "Main".into(),
            quantity: "12".into(),
            supplier: " Acme ".into(),
            priority: "high".into(),
            notes: " rush ".into(),
        };
        let order = form.validate(now).unwrap();
        assert_eq!(order.quantity, 12);
        assert_eq!(order.supplier, "Acme");
        assert_eq!(order.notes, "rush");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, now);
    }

    #[test]
    fn restock_rejects_zero_quantity_and_missing_supplier() {
        let now = Utc::now();
        let mut form = RestockForm {
            item: "Widget".into(),
            branch: "Main".into(),
            quantity: "0".into(),
            supplier: "Acme".into(),
            priority: "normal".into(),
            notes: String::new(),
        };
        assert!(matches!(
            form.validate(now).unwrap_err(),
            FormError::InvalidNumber { field: "quantity", .. }
        ));

        form.quantity = "3".into();
        form.supplier = String::new();
        assert_eq!(
            form.validate(now).unwrap_err(),
            FormError::Required("supplier")
        );
    }

    #[test]
    fn stock_adjustment_delta_rules() {
        let mut form = StockAdjustmentForm {
            branch: "Main".into(),
            action: StockAction::In,
            quantity: "5".into(),
            current: 8,
        };
        assert_eq!(form.validate().unwrap().delta, 5);

        form.action = StockAction::Out;
        assert_eq!(form.validate().unwrap().delta, -5);

        form.action = StockAction::Set;
        assert_eq!(form.validate().unwrap().delta, -3);

        form.quantity = "20".into();
        assert_eq!(form.validate().unwrap().delta, 12);
    }

    #[test]
    fn set_delta_overflow_is_invalid_number() {
        let form = StockAdjustmentForm {
            branch: "Main".into(),
            action: StockAction::Set,
            quantity: " 5 ".into(),
            current: i64::MIN,
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::InvalidNumber {
                field: "quantity",
                value: "5".into(),
            }
        );
    }
}
