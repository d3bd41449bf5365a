//! Typed property bag.
//!
//! Entities and components carry loosely-typed settings (from level files,
//! editor tools or scripts) in a [`PropertyCollection`]. Integers, floats and
//! other values live in separate maps, so `get_int("x")` never sees a float
//! stored under the same name. Booleans are stored as integers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Rgb;

/// Non-numeric property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Text(String),
    Color(Rgb),
    Json(serde_json::Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCollection {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    ints: BTreeMap<String, i32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    floats: BTreeMap<String, f32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    objects: BTreeMap<String, PropertyValue>,
}

impl PropertyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ints.is_empty() && self.floats.is_empty() && self.objects.is_empty()
    }

    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.ints.get(name).copied().unwrap_or(default)
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.ints.insert(name.to_string(), value);
    }

    /// Any positive integer reads as `true`.
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.ints.get(name).map_or(default, |v| *v > 0)
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.set_int(name, i32::from(value));
    }

    pub fn get_float(&self, name: &str, default: f32) -> f32 {
        self.floats.get(name).copied().unwrap_or(default)
    }

    /// Store a float. NaN and infinities have no JSON form, so they are
    /// refused and `false` is returned.
    pub fn set_float(&mut self, name: &str, value: f32) -> bool {
        if !value.is_finite() {
            log::debug!("refusing non-finite float property {name}: {value}");
            return false;
        }
        self.floats.insert(name.to_string(), value);
        true
    }

    pub fn get_object(&self, name: &str) -> Option<&PropertyValue> {
        self.objects.get(name)
    }

    pub fn set_object(&mut self, name: &str, value: PropertyValue) {
        self.objects.insert(name.to_string(), value);
    }

    /// Text stored under `name`; other value kinds yield `default`.
    pub fn get_string<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.objects.get(name) {
            Some(PropertyValue::Text(s)) => s,
            _ => default,
        }
    }

    pub fn set_string(&mut self, name: &str, value: impl Into<String>) {
        self.set_object(name, PropertyValue::Text(value.into()));
    }

    pub fn get_color(&self, name: &str, default: Rgb) -> Rgb {
        match self.objects.get(name) {
            Some(PropertyValue::Color(c)) => *c,
            _ => default,
        }
    }

    pub fn set_color(&mut self, name: &str, value: Rgb) {
        self.set_object(name, PropertyValue::Color(value));
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
