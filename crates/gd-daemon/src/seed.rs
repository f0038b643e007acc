//! Boot-time seed data.
//!
//! A seed file is a JSON array of dishes or orders in their wire shape.
//! Only the JSON shape is checked; seeds bypass the request validation chains.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use gd_schemas::{Dish, Order};
use serde::de::DeserializeOwned;

pub fn load_seed<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("seed file is not a JSON array of entities: {}", path.display()))
}

pub fn load_dishes(path: Option<&Path>) -> Result<Vec<Dish>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let dishes: Vec<Dish> = load_seed(path)?;
    ensure_unique_ids(dishes.iter().map(|d| d.id.as_str()), path)?;
    Ok(dishes)
}

pub fn load_orders(path: Option<&Path>) -> Result<Vec<Order>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let orders: Vec<Order> = load_seed(path)?;
    ensure_unique_ids(orders.iter().map(|o| o.id.as_str()), path)?;
    Ok(orders)
}

fn ensure_unique_ids<'a>(ids: impl Iterator<Item = &'a str>, path: &Path) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("SEED_DUPLICATE_ID {id} in {}", path.display());
        }
    }
    Ok(())
}
