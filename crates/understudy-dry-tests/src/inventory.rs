// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Demo "production" component for integration tests.
//!
//! [`Inventory`] stands in for application code: it talks to a warehouse and
//! a pricing service through seams, and reads its settings through an
//! accessor table. Tests hand it a [`StubContext`] and stub whatever they
//! need.
//!
//! Seams:
//!
//! - `Warehouse.stock/2` `(sku, site) -> integer`; the real one is unreachable
//!   from tests and always fails.
//! - `Warehouse.next_batch/0` `() -> batch id`; the real one returns `1`.
//! - `Pricing.quote/3` `(sku, qty, currency) -> number`; the real one charges
//!   a flat `10` per unit.
//!
//! Settings accessors (owner [`INVENTORY_OWNER`]): `default_site`
//! (`sites.default`), `reorder_threshold` (`policy.reorder_threshold`,
//! default `10`), `currency` (`pricing.currency`, default `"EUR"`).

use serde_json::{json, Value};
use understudy_access::{AccessorTable, Segment};
use understudy_core::{ConfigurationError, Error, Result, Seam, StubContext, StubKey};

/// Owner identity of the settings accessors.
pub const INVENTORY_OWNER: &str = "Inventory";

/// Demo component wired through seams.
#[derive(Clone, Debug)]
pub struct Inventory {
    stock: Seam,
    next_batch: Seam,
    quote: Seam,
    settings: AccessorTable,
}

impl Inventory {
    /// Wire the component's seams and settings accessors.
    pub fn new() -> Result<Self, ConfigurationError> {
        let stock = Seam::new("Warehouse", "stock", 2, |_| {
            Err(Error::Implementation {
                key: StubKey::new("Warehouse", "stock", 2),
                message: "warehouse service is not reachable from tests".into(),
            })
        })?;
        let next_batch = Seam::new("Warehouse", "next_batch", 0, |_| Ok(json!(1)))?;
        let quote = Seam::new("Pricing", "quote", 3, |args| {
            let qty = args.get(1).and_then(Value::as_f64).unwrap_or_default();
            Ok(json!(qty * 10.0))
        })?;
        let settings = AccessorTable::declare(
            INVENTORY_OWNER,
            [
                ("default_site", vec![Segment::key("sites"), Segment::key("default")]),
                (
                    "reorder_threshold",
                    vec![
                        Segment::key("policy"),
                        Segment::with_default("reorder_threshold", json!(10)),
                    ],
                ),
                (
                    "currency",
                    vec![
                        Segment::key("pricing"),
                        Segment::with_default("currency", json!("EUR")),
                    ],
                ),
            ],
        )?;
        Ok(Self {
            stock,
            next_batch,
            quote,
            settings,
        })
    }

    /// `Warehouse.stock/2`.
    pub fn stock_seam(&self) -> &Seam {
        &self.stock
    }

    /// `Warehouse.next_batch/0`.
    pub fn next_batch_seam(&self) -> &Seam {
        &self.next_batch
    }

    /// `Pricing.quote/3`.
    pub fn quote_seam(&self) -> &Seam {
        &self.quote
    }

    /// Settings accessors.
    pub fn settings(&self) -> &AccessorTable {
        &self.settings
    }

    /// Is stock of `sku` at the default site below the reorder threshold?
    pub fn needs_reorder(&self, ctx: &StubContext, settings: &Value, sku: &str) -> Result<bool> {
        let site = self.settings.get(ctx, "default_site", settings)?;
        let on_hand = self.stock.call(ctx, &[json!(sku), site])?;
        let threshold = self.settings.get(ctx, "reorder_threshold", settings)?;
        match (on_hand.as_i64(), threshold.as_i64()) {
            (Some(on_hand), Some(threshold)) => Ok(on_hand < threshold),
            _ => Err(Error::Implementation {
                key: self.stock.key().clone(),
                message: format!("expected integers, got stock {on_hand} and threshold {threshold}"),
            }),
        }
    }

    /// Price `qty` units of `sku` in the configured currency.
    pub fn order_cost(
        &self,
        ctx: &StubContext,
        settings: &Value,
        sku: &str,
        qty: i64,
    ) -> Result<Value> {
        let currency = self.settings.get(ctx, "currency", settings)?;
        self.quote.call(ctx, &[json!(sku), json!(qty), currency])
    }

    /// Take the next inbound batch id.
    pub fn receive(&self, ctx: &StubContext) -> Result<Value> {
        self.next_batch.call(ctx, &[])
    }
}
