use serde::{Deserialize, Serialize};

/// A single key/value pair carried in a provider's property bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered list of properties with unique keys.
///
/// This is the backend's representation of provider-specific extension
/// fields. Insertion order is preserved; pushing a key that is already
/// present replaces its value in place. When a list with repeated keys is
/// collected or deserialized, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Property>", into = "Vec<Property>")]
pub struct PropertyBag(Vec<Property>);

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Insert or replace the value for `key`.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|p| p.key == key) {
            Some(existing) => existing.value = value,
            None => self.0.push(Property { key, value }),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }
}

impl FromIterator<Property> for PropertyBag {
    /// Repeated keys after the first are dropped.
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut bag = Self::new();
        for property in iter {
            if bag.get(&property.key).is_none() {
                bag.0.push(property);
            }
        }
        bag
    }
}

impl From<Vec<Property>> for PropertyBag {
    fn from(properties: Vec<Property>) -> Self {
        properties.into_iter().collect()
    }
}

impl From<PropertyBag> for Vec<Property> {
    fn from(bag: PropertyBag) -> Self {
        bag.0
    }
}
