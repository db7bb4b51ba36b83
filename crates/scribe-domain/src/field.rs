//! Section field shapes
//!
//! A summary produced by the parser always carries structured records, but
//! summary records written by other tools (or older versions) may hold a
//! plain list of strings, one block of text, or a title → content mapping
//! in the same field. [`SectionField`] keeps all four shapes explicit so
//! consumers branch exhaustively instead of guessing.

use serde::{Deserialize, Serialize};

/// One section field of a [`crate::SummaryDocument`]
///
/// Deserialization is untagged and tries the variants in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionField<T> {
    /// Structured records (the only shape the parser produces)
    Records(Vec<T>),

    /// A list of free-text entries
    PlainStrings(Vec<String>),

    /// A single block of text
    SingleText(String),

    /// Title → content pairs, in the order they were written
    Mapping(#[serde(with = "ordered_pairs")] Vec<(String, String)>),
}

impl<T> SectionField<T> {
    /// Structured records, or an empty slice for any other shape
    pub fn records(&self) -> &[T] {
        match self {
            SectionField::Records(records) => records,
            _ => &[],
        }
    }

    /// Number of entries held, whatever the shape
    ///
    /// Blank text counts as zero entries.
    pub fn len(&self) -> usize {
        match self {
            SectionField::Records(records) => records.len(),
            SectionField::PlainStrings(items) => items.len(),
            SectionField::SingleText(text) => usize::from(!text.trim().is_empty()),
            SectionField::Mapping(map) => map.len(),
        }
    }

    /// True when the field holds nothing usable
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a structured record
    ///
    /// A field in any other shape is replaced by a fresh record list.
    pub fn push(&mut self, record: T) {
        match self {
            SectionField::Records(records) => records.push(record),
            other => *other = SectionField::Records(vec![record]),
        }
    }
}

impl<T> Default for SectionField<T> {
    fn default() -> Self {
        SectionField::Records(Vec::new())
    }
}

impl<T> From<Vec<T>> for SectionField<T> {
    fn from(records: Vec<T>) -> Self {
        SectionField::Records(records)
    }
}

/// A JSON object read as a list of pairs so key order survives
mod ordered_pairs {
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S>(pairs: &Vec<(String, String)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(pairs.iter().map(|(key, value)| (key, value)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of strings to strings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, String>()? {
                    pairs.push(entry);
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Participant, Scene};

    #[test]
    fn test_default_is_empty_records() {
        let field: SectionField<Participant> = SectionField::default();
        assert!(field.is_empty());
        assert!(field.records().is_empty());
        assert!(matches!(field, SectionField::Records(_)));
    }

    #[test]
    fn test_deserialize_records() {
        let json = r#"[{"name": "Ana", "organization": "Acme", "role": "Lead"}]"#;
        let field: SectionField<Participant> = serde_json::from_str(json).unwrap();
        assert_eq!(field.len(), 1);
        assert_eq!(field.records()[0].name, "Ana");
    }

    #[test]
    fn test_deserialize_plain_strings() {
        let json = r#"["Ana (Acme)", "Ben (Initech)"]"#;
        let field: SectionField<Participant> = serde_json::from_str(json).unwrap();
        assert!(matches!(field, SectionField::PlainStrings(ref v) if v.len() == 2));
        assert!(field.records().is_empty());
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_deserialize_single_text_and_mapping() {
        let text: SectionField<Scene> = serde_json::from_str(r#""It went well.""#).unwrap();
        assert!(matches!(text, SectionField::SingleText(_)));
        assert_eq!(text.len(), 1);

        let blank: SectionField<Scene> = serde_json::from_str(r#""   ""#).unwrap();
        assert!(blank.is_empty());

        let map: SectionField<Scene> =
            serde_json::from_str(r#"{"Opening": "Intros", "Budget": "Numbers"}"#).unwrap();
        match map {
            SectionField::Mapping(m) => {
                assert_eq!(m.len(), 2);
                assert_eq!(m[1], ("Budget".to_string(), "Numbers".to_string()));
            }
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_mapping_keeps_written_order() {
        let json = r#"{"1. Opening": "Intros", "2. Budget": "Numbers", "10. Wrap-up": "Next steps"}"#;
        let field: SectionField<Scene> = serde_json::from_str(json).unwrap();
        let SectionField::Mapping(pairs) = &field else {
            panic!("expected mapping, got {:?}", field);
        };
        let titles: Vec<&str> = pairs.iter().map(|(title, _)| title.as_str()).collect();
        assert_eq!(titles, ["1. Opening", "2. Budget", "10. Wrap-up"]);

        // Written back as an object, same order
        let written = serde_json::to_string(&field).unwrap();
        assert_eq!(
            written,
            r#"{"1. Opening":"Intros","2. Budget":"Numbers","10. Wrap-up":"Next steps"}"#
        );
    }

    #[test]
    fn test_push_converts_shape() {
        let mut field: SectionField<Scene> = SectionField::SingleText("x".to_string());
        field.push(Scene {
            title: "1. Start".to_string(),
            content: "Body".to_string(),
        });
        assert_eq!(field.records().len(), 1);
    }
}
