//! `get` command implementation

use super::open_store;
use crate::config::ArborSettings;
use crate::domain::StoreError;
use crate::store::TreeStore;
use clap::{Args, ValueEnum};
use std::collections::BTreeMap;

/// Accessor used to read the key
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    Int,
    Float,
    List,
    Map,
}

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted key, e.g. server.port
    pub key: String,

    /// How to read the value
    #[arg(short, long, value_enum, default_value_t = ValueKind::String)]
    pub kind: ValueKind,

    /// Value used when the key is missing
    #[arg(short, long)]
    pub default: Option<String>,
}

impl GetArgs {
    /// Execute the get command
    pub async fn execute(&self, source: &str, settings: &ArborSettings) -> anyhow::Result<i32> {
        tracing::debug!(path = %self.key, kind = ?self.kind, "Reading key");

        let Some(store) = open_store(source, settings).await else {
            return Ok(5);
        };

        match self.render(&store) {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
                Ok(0)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Ok(1)
            }
        }
    }

    /// Read the key and format it as output lines
    pub fn render(&self, store: &TreeStore) -> Result<Vec<String>, StoreError> {
        let key = self.key.as_str();
        let default = self.default.as_deref();

        let lines = match self.kind {
            ValueKind::String => vec![store.get_string(key, default)?],
            ValueKind::Bool => vec![store.get_bool(key, default)?.to_string()],
            ValueKind::Int => vec![store.get_i64(key, default)?.to_string()],
            ValueKind::Float => vec![store.get_f64(key, default)?.to_string()],
            ValueKind::List => store.get_strings(key, default)?,
            ValueKind::Map => store
                .get_map(key, default)?
                .into_iter()
                .collect::<BTreeMap<_, _>>()
                .into_iter()
                .map(|(k, v)| format!("{k} = {v}"))
                .collect(),
        };
        Ok(lines)
    }
}
