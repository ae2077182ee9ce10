//! Company settings shown on exported quotations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::storage::StoreError;

/// Known settings keys with a short description
pub const SETTING_KEYS: &[(&str, &str)] = &[
    ("company_name", "Company name printed on quotations"),
    ("contact_info", "Contact line (phone, email)"),
    ("address", "Company address"),
    (
        "show_cost_price",
        "Show cost and profit columns in exports (true/false)",
    ),
];

fn default_company_name() -> String {
    "Rubber Joint Co., Ltd.".to_string()
}

fn default_contact_info() -> String {
    "Tel: 010-12345678".to_string()
}

fn default_address() -> String {
    "Address: Chaoyang District, Beijing".to_string()
}

/// Display metadata for quotation documents
///
/// Keys this tool does not know about are kept in `extra` and written back
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_company_name")]
    pub company_name: String,

    #[serde(default = "default_contact_info")]
    pub contact_info: String,

    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default)]
    pub show_cost_price: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            contact_info: default_contact_info(),
            address: default_address(),
            show_cost_price: false,
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Look up a setting as display text
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "company_name" => Some(self.company_name.clone()),
            "contact_info" => Some(self.contact_info.clone()),
            "address" => Some(self.address.clone()),
            "show_cost_price" => Some(self.show_cost_price.to_string()),
            other => self.extra.get(other).map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                v => v.to_string(),
            }),
        }
    }

    /// Assign a setting from text; unknown keys are stored verbatim
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match key {
            "company_name" => self.company_name = value.to_string(),
            "contact_info" => self.contact_info = value.to_string(),
            "address" => self.address = value.to_string(),
            "show_cost_price" => self.show_cost_price = parse_bool(key, value)?,
            other => {
                self.extra
                    .insert(other.to_string(), serde_json::Value::String(value.to_string()));
            }
        }
        Ok(())
    }

    /// All settings as (key, value) pairs, known keys first
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = SETTING_KEYS
            .iter()
            .filter_map(|(k, _)| self.get(k).map(|v| (k.to_string(), v)))
            .collect();
        for key in self.extra.keys() {
            if let Some(v) = self.get(key) {
                entries.push((key.clone(), v));
            }
        }
        entries
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, StoreError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(StoreError::InvalidSetting {
            key: key.to_string(),
            message: format!("expected true or false, got '{}'", value),
        }),
    }
}
