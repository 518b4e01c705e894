/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A loosely typed parameter bag
//!
//! Front ends hand the same bag to whichever filter the user picked,
//! each filter reads the names it knows and ignores the rest.
//! Missing or mistyped entries fall back to the filter's default.
//!
//! Typed options are built from the bag by the `from_params`
//! constructors of each operation.
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};

/// A single parameter value
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// Two integers, e.g a kernel shape of `(rows, cols)`
    Pair(i64, i64)
}

impl ParamValue {
    /// Parse a command line value
    ///
    /// Tried in order: integer, float, a `a,b` integer pair, and finally text
    ///
    /// ```
    /// use lumen_filters::params::ParamValue;
    /// assert_eq!(ParamValue::parse("5"), ParamValue::Int(5));
    /// assert_eq!(ParamValue::parse("2.5"), ParamValue::Float(2.5));
    /// assert_eq!(ParamValue::parse("3,7"), ParamValue::Pair(3, 7));
    /// assert_eq!(ParamValue::parse("y"), ParamValue::Text("y".to_string()));
    /// ```
    pub fn parse(value: &str) -> ParamValue {
        let value = value.trim();

        if let Ok(int) = value.parse::<i64>() {
            return ParamValue::Int(int);
        }
        if let Ok(float) = value.parse::<f64>() {
            return ParamValue::Float(float);
        }
        if let Some((a, b)) = value.split_once(',') {
            if let (Ok(a), Ok(b)) = (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
                return ParamValue::Pair(a, b);
            }
        }
        ParamValue::Text(value.to_string())
    }

    /// The value as an integer, floats are rounded
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(int) => Some(*int),
            ParamValue::Float(float) if float.is_finite() => Some(float.round() as i64),
            _ => None
        }
    }

    /// The value as a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Int(int) => Some(*int as f64),
            ParamValue::Float(float) => Some(*float),
            _ => None
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            _ => None
        }
    }

    /// The value as a pair, a single integer `n` gives `(n, n)`
    pub fn as_pair(&self) -> Option<(i64, i64)> {
        match self {
            ParamValue::Pair(a, b) => Some((*a, *b)),
            ParamValue::Int(_) | ParamValue::Float(_) => self.as_int().map(|x| (x, x)),
            ParamValue::Text(_) => None
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Int(int) => write!(f, "{int}"),
            ParamValue::Float(float) => write!(f, "{float}"),
            ParamValue::Text(text) => write!(f, "{text}"),
            ParamValue::Pair(a, b) => write!(f, "{a},{b}")
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<(i64, i64)> for ParamValue {
    fn from((a, b): (i64, i64)) -> Self {
        ParamValue::Pair(a, b)
    }
}

/// Errors from parsing parameter assignments
pub enum ParamErrors {
    /// The assignment had no `=`
    MissingEquals(String),
    /// The assignment had an empty name
    EmptyName(String)
}

impl Debug for ParamErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEquals(input) => {
                writeln!(f, "Expected a parameter of the form key=value, found {input:?}")
            }
            Self::EmptyName(input) => writeln!(f, "Parameter {input:?} has no name")
        }
    }
}

impl Display for ParamErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ParamErrors {}

/// Named parameters handed to a filter
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FilterParams {
    values: BTreeMap<String, ParamValue>
}

impl FilterParams {
    #[must_use]
    pub fn new() -> FilterParams {
        FilterParams::default()
    }

    /// Set `name` to `value`, replacing any previous value
    pub fn insert<K: Into<String>, V: Into<ParamValue>>(&mut self, name: K, value: V) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with<K: Into<String>, V: Into<ParamValue>>(mut self, name: K, value: V) -> FilterParams {
        self.insert(name, value);
        self
    }

    /// Parse and insert a `key=value` assignment
    ///
    /// # Errors
    /// If there is no `=` or the key is empty
    pub fn parse_assignment(&mut self, assignment: &str) -> Result<(), ParamErrors> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| ParamErrors::MissingEquals(assignment.to_string()))?;

        let name = name.trim();

        if name.is_empty() {
            return Err(ParamErrors::EmptyName(assignment.to_string()));
        }
        self.insert(name, ParamValue::parse(value));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Integer value of `name`, or `default` if missing or not numeric
    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.get(name)
            .and_then(ParamValue::as_int)
            .unwrap_or(default)
    }

    /// Float value of `name`, or `default` if missing or not numeric
    pub fn float_or(&self, name: &str, default: f64) -> f64 {
        self.get(name)
            .and_then(ParamValue::as_float)
            .unwrap_or(default)
    }

    /// Text value of `name`, or `default` if missing or not text
    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name)
            .and_then(ParamValue::as_text)
            .unwrap_or(default)
    }

    /// Pair value of `name` if present and numeric
    pub fn pair(&self, name: &str) -> Option<(i64, i64)> {
        self.get(name).and_then(ParamValue::as_pair)
    }
}

#[cfg(test)]
mod tests {
    use crate::params::{FilterParams, ParamValue};

    #[test]
    fn missing_and_mistyped_fall_back() {
        let params = FilterParams::new()
            .with("kernel_size", "big")
            .with("sigma", 2);

        assert_eq!(params.int_or("kernel_size", 5), 5);
        assert_eq!(params.int_or("threshold_value", 90), 90);
        assert_eq!(params.float_or("sigma", 3.0), 2.0);
        assert_eq!(params.text_or("direction", "x"), "x");
        assert_eq!(params.pair("filter_shape"), None);
    }

    #[test]
    fn floats_round_to_ints() {
        let params = FilterParams::new().with("k", 2.4).with("n", f64::NAN);
        assert_eq!(params.int_or("k", 3), 2);
        assert_eq!(params.int_or("n", 1), 1);
        assert_eq!(params.pair("k"), Some((2, 2)));
    }

    #[test]
    fn assignments() {
        let mut params = FilterParams::new();
        params.parse_assignment("filter_shape=5,7").unwrap();
        params.parse_assignment(" direction = y").unwrap();

        assert_eq!(params.pair("filter_shape"), Some((5, 7)));
        assert_eq!(params.get("direction"), Some(&ParamValue::Text("y".to_string())));
        assert!(params.parse_assignment("sigma").is_err());
        assert!(params.parse_assignment("=3").is_err());
        assert_eq!(params.len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json() {
        let params: FilterParams =
            serde_json::from_str(r#"{"sigma": 1.5, "filter_shape": [3, 5], "direction": "y", "k": 4}"#)
                .unwrap();

        assert_eq!(params.float_or("sigma", 0.0), 1.5);
        assert_eq!(params.pair("filter_shape"), Some((3, 5)));
        assert_eq!(params.text_or("direction", "x"), "y");
        assert_eq!(params.int_or("k", 0), 4);
    }
}
