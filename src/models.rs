use serde::{Deserialize, Deserializer, Serialize};

/// A single stored text item. Identity is positional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub body: String,
}

impl Record {
    pub fn new(body: impl Into<String>) -> Self {
        Record { body: body.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub log: Record,
}

/// Wire wrapper around the collection.
///
/// `id` is carried through but never used to select a sub-resource: the
/// service holds exactly one collection.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

// Absent and `null` both mean "empty".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Envelope {
    pub fn new(id: impl Into<String>, records: Vec<Record>) -> Self {
        Envelope {
            id: id.into(),
            items: records.into_iter().map(|log| Item { log }).collect(),
        }
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(String::new(), records)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.items.into_iter().map(|item| item.log).collect()
    }

    pub fn bodies(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.log.body.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
