//! Registry of config pointers the daemon actually reads.
//!
//! Keep this in step with `DaemonConfig::from_config_json`: a pointer listed
//! here but never read hides typos in operator YAML.

/// JSON-pointer prefixes consumed by gd-daemon. A prefix consumes its whole
/// subtree ("/cors" consumes "/cors/allowed_origins/0").
pub fn consumed_pointers() -> &'static [&'static str] {
    DAEMON
}

static DAEMON: &[&str] = &[
    "/server/addr",
    "/cors/allowed_origins",
    "/seed/dishes_path",
    "/seed/orders_path",
];
