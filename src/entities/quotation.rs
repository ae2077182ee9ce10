//! Quotation line - one sphere plus two flanges at a quantity and markup

use serde::{Deserialize, Serialize};

use crate::entities::part::CatalogEntry;

/// Quantity used when none is given
pub const DEFAULT_QUANTITY: i64 = 1;

/// Markup over cost, in percent, used when none is given
pub const DEFAULT_PROFIT_PERCENTAGE: f64 = 30.0;

fn default_quantity() -> i64 {
    DEFAULT_QUANTITY
}

fn default_profit_percentage() -> f64 {
    DEFAULT_PROFIT_PERCENTAGE
}

/// One priced row of a quotation
///
/// The line owns copies of its catalog entries, so later catalog edits never
/// change an existing line's prices. Lines are immutable once built; every
/// monetary figure is derived on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLine {
    #[serde(default)]
    sphere: CatalogEntry,

    #[serde(default)]
    flange1: CatalogEntry,

    #[serde(default)]
    flange2: CatalogEntry,

    #[serde(default = "default_quantity")]
    quantity: i64,

    #[serde(default = "default_profit_percentage")]
    profit_percentage: f64,
}

impl Default for QuotationLine {
    fn default() -> Self {
        Self::new(None, None, None, DEFAULT_QUANTITY, DEFAULT_PROFIT_PERCENTAGE)
    }
}

impl QuotationLine {
    /// Build a line from catalog entries, snapshotting their current prices.
    ///
    /// A missing component becomes a zero-cost placeholder.
    pub fn new(
        sphere: Option<&CatalogEntry>,
        flange1: Option<&CatalogEntry>,
        flange2: Option<&CatalogEntry>,
        quantity: i64,
        profit_percentage: f64,
    ) -> Self {
        Self {
            sphere: sphere.cloned().unwrap_or_else(CatalogEntry::placeholder),
            flange1: flange1.cloned().unwrap_or_else(CatalogEntry::placeholder),
            flange2: flange2.cloned().unwrap_or_else(CatalogEntry::placeholder),
            quantity,
            profit_percentage,
        }
    }

    pub fn sphere(&self) -> &CatalogEntry {
        &self.sphere
    }

    pub fn flange1(&self) -> &CatalogEntry {
        &self.flange1
    }

    pub fn flange2(&self) -> &CatalogEntry {
        &self.flange2
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn profit_percentage(&self) -> f64 {
        self.profit_percentage
    }

    /// Product description, e.g. "DN50 A1 + F1 + F1"
    pub fn description(&self) -> String {
        format!(
            "{} {} + {} + {}",
            self.sphere.type_name, self.sphere.model, self.flange1.type_name, self.flange2.type_name
        )
    }

    /// Cost of one assembled joint
    pub fn unit_cost(&self) -> f64 {
        self.sphere.cost_price + self.flange1.cost_price + self.flange2.cost_price
    }

    pub fn total_cost(&self) -> f64 {
        self.unit_cost() * self.quantity as f64
    }

    /// Sale price of one joint: cost marked up by `profit_percentage`
    pub fn unit_price(&self) -> f64 {
        self.unit_cost() * (1.0 + self.profit_percentage / 100.0)
    }

    pub fn total_price(&self) -> f64 {
        self.unit_price() * self.quantity as f64
    }
}

impl std::fmt::Display for QuotationLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} x {}, unit price: {:.2}, total: {:.2}",
            self.description(),
            self.quantity,
            self.unit_price(),
            self.total_price()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOL: f64 = 1e-9;

    fn scenario_line() -> QuotationLine {
        let sphere = CatalogEntry::new("DN50", "A1", 100.0);
        let flange = CatalogEntry::new("F1", "B1", 20.0);
        QuotationLine::new(Some(&sphere), Some(&flange), Some(&flange), 2, 30.0)
    }

    #[test]
    fn test_scenario_pricing() {
        let line = scenario_line();
        assert!((line.unit_cost() - 140.0).abs() < TOL);
        assert!((line.total_cost() - 280.0).abs() < TOL);
        assert!((line.unit_price() - 182.0).abs() < TOL);
        assert!((line.total_price() - 364.0).abs() < TOL);
        assert_eq!(line.description(), "DN50 A1 + F1 + F1");
    }

    #[test]
    fn test_defaults_use_placeholders() {
        let line = QuotationLine::default();
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.profit_percentage(), 30.0);
        assert_eq!(line.unit_cost(), 0.0);
        assert_eq!(line.total_price(), 0.0);
        assert_eq!(line.description(), "  +  + ");
    }

    #[test]
    fn test_partial_line_prices_present_parts() {
        let sphere = CatalogEntry::new("DN80", "C3", 50.0);
        let line = QuotationLine::new(Some(&sphere), None, None, 3, 0.0);
        assert!((line.unit_cost() - 50.0).abs() < TOL);
        assert!((line.total_price() - 150.0).abs() < TOL);
    }

    #[test]
    fn test_line_is_price_frozen() {
        let mut sphere = CatalogEntry::new("DN50", "A1", 100.0);
        let mut flange = CatalogEntry::new("F1", "B1", 20.0);
        let line = QuotationLine::new(Some(&sphere), Some(&flange), Some(&flange), 2, 30.0);

        sphere.cost_price = 999.0;
        flange.cost_price = 999.0;
        flange.type_name = "F9".to_string();

        assert!((line.unit_cost() - 140.0).abs() < TOL);
        assert_eq!(line.flange1().type_name, "F1");
    }

    #[test]
    fn test_negative_quantity_propagates() {
        let sphere = CatalogEntry::new("DN50", "A1", 10.0);
        let line = QuotationLine::new(Some(&sphere), None, None, -2, 0.0);
        assert!((line.total_cost() + 20.0).abs() < TOL);
    }

    #[test]
    fn test_deserialize_missing_keys_uses_defaults() {
        let line: QuotationLine =
            serde_json::from_str(r#"{"sphere": {"type_name": "DN50", "model": "A1", "cost_price": 5.0}}"#)
                .unwrap();
        assert_eq!(line.quantity(), DEFAULT_QUANTITY);
        assert_eq!(line.profit_percentage(), DEFAULT_PROFIT_PERCENTAGE);
        assert_eq!(line.flange1(), &CatalogEntry::placeholder());
        assert!((line.unit_cost() - 5.0).abs() < TOL);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(scenario_line()).unwrap();
        for key in ["sphere", "flange1", "flange2", "quantity", "profit_percentage"] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["flange2"]["type_name"], "F1");
    }

    proptest! {
        #[test]
        fn prop_pricing_law(
            s in 0.0f64..10_000.0,
            f1 in 0.0f64..10_000.0,
            f2 in 0.0f64..10_000.0,
            qty in -1_000i64..1_000,
            profit in -100.0f64..500.0,
        ) {
            let sphere = CatalogEntry::new("S", "M", s);
            let a = CatalogEntry::new("F", "A", f1);
            let b = CatalogEntry::new("F", "B", f2);
            let line = QuotationLine::new(Some(&sphere), Some(&a), Some(&b), qty, profit);

            let c = s + f1 + f2;
            let q = qty as f64;
            let tol = |x: f64| TOL * x.abs().max(1.0);

            prop_assert!((line.unit_cost() - c).abs() <= tol(c));
            prop_assert!((line.total_cost() - c * q).abs() <= tol(c * q));
            let up = c * (1.0 + profit / 100.0);
            prop_assert!((line.unit_price() - up).abs() <= tol(up));
            prop_assert!((line.total_price() - line.unit_price() * q).abs() <= tol(up * q));
        }
    }
}
