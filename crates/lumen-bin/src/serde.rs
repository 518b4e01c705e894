/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_filters::filters::{Filter, ParameterSpec};
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

/// A filter as printed by `--list --json`
pub struct FilterListing {
    filter: Filter
}

impl FilterListing {
    pub fn new(filter: Filter) -> FilterListing {
        FilterListing { filter }
    }
}

struct Parameters(&'static [ParameterSpec]);

struct Parameter<'a>(&'a ParameterSpec);

impl Serialize for FilterListing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Filter", 3)?;

        state.serialize_field("name", self.filter.name())?;
        state.serialize_field("label", self.filter.label())?;
        state.serialize_field("parameters", &Parameters(self.filter.parameters()))?;

        state.end()
    }
}

impl Serialize for Parameters {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

        for spec in self.0 {
            seq.serialize_element(&Parameter(spec))?;
        }
        seq.end()
    }
}

impl<'a> Serialize for Parameter<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Parameter", 4)?;

        state.serialize_field("name", self.0.name)?;
        state.serialize_field("min", &self.0.min)?;
        state.serialize_field("max", &self.0.max)?;
        state.serialize_field("default", &self.0.default)?;

        state.end()
    }
}
