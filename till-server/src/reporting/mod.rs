//! Daily sales aggregation
//!
//! Pure aggregation over the order history the catalog already holds.
//! Refunded orders are excluded entirely; revenue uses the charged
//! total (after discount), cost uses the cost basis frozen into each
//! line's snapshot.

use std::collections::BTreeMap;

use shared::models::{Order, OrderStatus, SalesReport};

/// Aggregate completed orders into one report per calendar day,
/// newest day first.
pub fn daily_reports(orders: &[Order]) -> Vec<SalesReport> {
    let mut days: BTreeMap<String, SalesReport> = BTreeMap::new();

    for order in orders {
        if order.status != OrderStatus::Completed {
            continue;
        }
        // RFC 3339 starts with YYYY-MM-DD
        let Some(date) = order.created_at.get(..10) else {
            continue;
        };
        let cost: f64 = order
            .items
            .iter()
            .map(|l| l.item.cost * l.quantity as f64)
            .sum();

        let report = days.entry(date.to_string()).or_insert_with(|| SalesReport {
            date: date.to_string(),
            revenue: 0.0,
            cost: 0.0,
            profit: 0.0,
            order_count: 0,
        });
        report.revenue += order.total;
        report.cost += cost;
        report.profit = report.revenue - report.cost;
        report.order_count += 1;
    }

    days.into_values().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use shared::models::{CartItem, PaymentMethod};

    fn order(id: &str, created_at: &str, status: OrderStatus) -> Order {
        let menu = seed::initial_menu();
        let mut line = CartItem::new(menu.into_iter().find(|m| m.id == "m1").unwrap());
        line.quantity = 2;
        Order {
            id: id.to_string(),
            items: vec![line],
            subtotal: 18000.0,
            tax: 0.0,
            discount: 0.0,
            total: 18000.0,
            payment_method: PaymentMethod::Cash,
            status,
            created_at: created_at.to_string(),
            cashier_name: "Admin".to_string(),
            location: None,
            location_type: None,
        }
    }

    #[test]
    fn test_groups_by_day_newest_first() {
        let orders = vec![
            order("1", "2026-08-29T10:00:00Z", OrderStatus::Completed),
            order("2", "2026-08-30T09:00:00Z", OrderStatus::Completed),
            order("3", "2026-08-30T12:00:00Z", OrderStatus::Completed),
        ];
        let reports = daily_reports(&orders);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].date, "2026-08-30");
        assert_eq!(reports[0].order_count, 2);
        assert_eq!(reports[0].revenue, 36000.0);
        assert_eq!(reports[1].date, "2026-08-29");
    }

    #[test]
    fn test_profit_uses_line_cost_basis() {
        let reports = daily_reports(&[order("1", "2026-08-30T12:00:00Z", OrderStatus::Completed)]);
        // 2 cheeseburgers at cost 3500 each
        assert_eq!(reports[0].cost, 7000.0);
        assert_eq!(reports[0].profit, 11000.0);
    }

    #[test]
    fn test_refunded_orders_are_excluded() {
        let orders = vec![
            order("1", "2026-08-30T10:00:00Z", OrderStatus::Completed),
            order("2", "2026-08-30T11:00:00Z", OrderStatus::Refunded),
        ];
        let reports = daily_reports(&orders);
        assert_eq!(reports[0].order_count, 1);
        assert_eq!(reports[0].revenue, 18000.0);
    }
}
