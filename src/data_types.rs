// src/data_types.rs
use serde::Deserialize;
use serde_json::Value;

/// A single spreadsheet cell as delivered by the export endpoint.
///
/// `raw` is whatever the sheet stores (string, number, bool, date literal),
/// `formatted` is the display form the sheet computed for it, when it has one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CellValue {
    #[serde(rename = "v", default)]
    pub raw: Option<Value>,
    #[serde(rename = "f", default)]
    pub formatted: Option<String>,
}

impl CellValue {
    pub fn text(raw: &str) -> Self {
        CellValue {
            raw: Some(Value::String(raw.to_string())),
            formatted: None,
        }
    }

    /// Formatted string if present, else the raw value as text, else empty.
    pub fn display(&self) -> String {
        if let Some(formatted) = &self.formatted {
            return formatted.clone();
        }

        match &self.raw {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match n.as_f64() {
                // Whole numbers print without a fraction or exponent up to 1e21.
                Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f}"),
                _ => n.to_string(),
            },
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Column labels plus raw rows, straight from the sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl Table {
    pub fn empty() -> Self {
        Table {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One normalized row. Keys keep their first-seen position; a repeated key
/// overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `key` when present and not blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn name(&self) -> &str {
        self.get("Name").unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub records: Vec<Record>,
}

impl Section {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Section {
            name: name.into(),
            records,
        }
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lowercases and replaces every run of whitespace with a single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;

    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
                in_space = true;
            }
        } else {
            slug.extend(ch.to_lowercase());
            in_space = false;
        }
    }

    slug
}
