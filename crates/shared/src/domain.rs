use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub String);

impl SequenceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A light sequence as the controller describes it. Read-only once parsed, and
/// re-serializes to the same JSON it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub id: SequenceId,
    /// Outer `None`: absent. `Some(None)`: sent as `null`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub alias: Option<Option<String>>,
    pub pattern: Vec<String>,
    pub color_mode: String,
    pub effects: Vec<Value>,
    /// Raw `groups` value as sent, whatever its shape. Interpreted by the grouping engine.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub groups: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<Option<String>>,
    /// Fields the controller sends that nothing here interprets.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sequence {
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_ref().and_then(Option::as_deref)
    }

    pub fn last_changed(&self) -> Option<&str> {
        self.last_changed.as_ref().and_then(Option::as_deref)
    }

    /// The three fields the controller accepts on its zone sequence endpoint.
    pub fn activation_request(&self) -> SequenceActivationRequest {
        SequenceActivationRequest {
            pattern: self.pattern.clone(),
            color_mode: self.color_mode.clone(),
            effects: self.effects.clone(),
        }
    }
}

/// Marks a field as present even when its value is `null`; absence is left to `default`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceActivationRequest {
    pub pattern: Vec<String>,
    pub color_mode: String,
    pub effects: Vec<Value>,
}

/// The catalog exactly as one source produced it: usually an array, occasionally a
/// bare object. Flattening it into a [`Catalog`] is left to the caller-facing boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogPayload {
    Many(Vec<Sequence>),
    One(Box<Sequence>),
}

impl CatalogPayload {
    pub fn into_catalog(self) -> Catalog {
        match self {
            Self::Many(sequences) => Catalog(sequences),
            Self::One(sequence) => Catalog(vec![*sequence]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(pub Vec<Sequence>);

impl Catalog {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Sequence> {
        self.0.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.0.iter()
    }

    pub fn find(&self, id: &str) -> Option<(usize, &Sequence)> {
        self.0
            .iter()
            .enumerate()
            .find(|(_, sequence)| sequence.id.as_str() == id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
