//! Endpoint map: operation keys bound to remote paths and field generators.

use crate::synth::GeneratorKind;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Endpoint map keyed by operation key (`products`, `customers`, `reset`).
pub type EndpointMap = HashMap<String, EndpointSpec>;

/// One remote resource and how to synthesize a request body for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub path: String,

    #[serde(default)]
    pub fields: FieldMap,
}

impl EndpointSpec {
    pub fn new(path: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("Endpoint path cannot be empty".to_string());
        }
        for field in self.fields.iter() {
            if field.name.trim().is_empty() {
                return Err("Field names cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

/// A single field and its generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub generator: GeneratorKind,
}

/// Ordered field-name to generator mapping.
///
/// Deserializes from either a table (`name = "catch_phrase"`) or a list of
/// `{ name, generator }` entries; declaration order is kept either way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: Vec<FieldSpec>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, generator: GeneratorKind) {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.generator = generator,
            None => self.fields.push(FieldSpec { name, generator }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&GeneratorKind> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.generator)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>, G: Into<GeneratorKind>> FromIterator<(N, G)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (N, G)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (name, generator) in iter {
            map.insert(name, generator.into());
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, field.generator.tag())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldMapVisitor)
    }
}

struct FieldMapVisitor;

impl<'de> Visitor<'de> for FieldMapVisitor {
    type Value = FieldMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of field = generator, or a list of { name, generator }")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
        let mut map = FieldMap::new();
        while let Some((name, tag)) = access.next_entry::<String, String>()? {
            map.insert(name, GeneratorKind::parse(&tag));
        }
        Ok(map)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
        let mut map = FieldMap::new();
        while let Some(field) = access.next_element::<FieldSpec>()? {
            map.insert(field.name, field.generator);
        }
        Ok(map)
    }
}
