//! The canonical JSON-shaped tree every engine in this crate operates on.
//!
//! Filters, paths, PATCH operations and attribute projection all read and write a
//! `Document` rather than a typed resource struct — the typed boundary lives only at
//! the transport adapter (`http`), which deserializes request bodies into a `Document`
//! and serializes responses back out of one.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(pub Value);

impl Document {
    pub fn new(value: Value) -> Self {
        Document(value)
    }

    pub fn object() -> Self {
        Document(Value::Object(Map::new()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0.as_object_mut()
    }

    /// Navigates a dotted attribute path (`"name.givenName"`), returning `None` if any
    /// intermediate segment is missing or not an object.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = &self.0;
        for part in path.split('.') {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Like `get_path`, but creates missing intermediate objects so the final segment
    /// can be written through the returned mutable reference.
    pub fn ensure_path_mut(&mut self, path: &str) -> Option<&mut Value> {
        let mut current = &mut self.0;
        for part in path.split('.') {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let obj = current.as_object_mut()?;
            current = obj.entry(part.to_string()).or_insert(Value::Null);
        }
        Some(current)
    }

    pub fn get_path_mut(&mut self, path: &str) -> Option<&mut Value> {
        let mut current = &mut self.0;
        for part in path.split('.') {
            current = current.as_object_mut()?.get_mut(part)?;
        }
        Some(current)
    }

    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        let (parent, last) = split_last_segment(path)?;
        let parent_value = match parent {
            Some(p) => self.get_path_mut(p)?,
            None => &mut self.0,
        };
        parent_value.as_object_mut()?.remove(last)
    }
}

fn split_last_segment(path: &str) -> Option<(Option<&str>, &str)> {
    match path.rfind('.') {
        Some(idx) => Some((Some(&path[..idx]), &path[idx + 1..])),
        None => Some((None, path)),
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Document(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.0
    }
}
