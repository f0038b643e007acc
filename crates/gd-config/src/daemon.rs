//! Typed view over the merged config for gd-daemon.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Bind address when neither config, env nor CLI name one.
pub fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5001))
}

pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://127.0.0.1",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub addr: SocketAddr,
    pub cors_allowed_origins: Vec<String>,
    /// JSON file holding an array of dishes to boot with.
    pub seed_dishes_path: Option<PathBuf>,
    /// JSON file holding an array of orders to boot with.
    pub seed_orders_path: Option<PathBuf>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            cors_allowed_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            seed_dishes_path: None,
            seed_orders_path: None,
        }
    }
}

impl DaemonConfig {
    /// Read every pointer listed in the consumed registry. Missing keys fall
    /// back to defaults; present keys with the wrong shape are errors.
    pub fn from_config_json(v: &Value) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(raw) = opt_str(v, "/server/addr")? {
            cfg.addr = raw
                .parse()
                .with_context(|| format!("CONFIG_INVALID /server/addr: {raw:?}"))?;
        }

        if let Some(origins) = v.pointer("/cors/allowed_origins") {
            let Some(arr) = origins.as_array() else {
                bail!("CONFIG_INVALID /cors/allowed_origins: expected a list of strings");
            };
            cfg.cors_allowed_origins = arr
                .iter()
                .map(|o| {
                    o.as_str().map(str::to_string).context(
                        "CONFIG_INVALID /cors/allowed_origins: expected a list of strings",
                    )
                })
                .collect::<Result<_>>()?;
        }

        cfg.seed_dishes_path = opt_str(v, "/seed/dishes_path")?.map(PathBuf::from);
        cfg.seed_orders_path = opt_str(v, "/seed/orders_path")?.map(PathBuf::from);

        Ok(cfg)
    }
}

fn opt_str<'a>(v: &'a Value, ptr: &str) -> Result<Option<&'a str>> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => bail!("CONFIG_INVALID {ptr}: expected a string"),
    }
}
