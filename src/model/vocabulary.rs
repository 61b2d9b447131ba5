use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Uma linha da tabela de vocabulário controlado.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VocabularyRow {
    pub label_en: String,

    #[serde(default)]
    pub wiki_id: String,

    #[serde(default)]
    pub label_pt: String,
}

#[derive(Debug, Clone)]
pub struct VocabularyEntry {
    pub wiki_id: String,
    pub label_pt: String,
}

/// Vocabulário controlado indexado pelo rótulo em inglês.
/// Lookup é exato e case-sensitive; termo ausente não é erro.
#[derive(Debug, Default, Clone)]
pub struct VocabularyMapping {
    terms: HashMap<String, VocabularyEntry>,
}

impl VocabularyMapping {
    pub fn from_rows(rows: Vec<VocabularyRow>) -> Self {
        let mut mapping = Self::default();
        for row in rows {
            mapping.insert(row.label_en, row.wiki_id, row.label_pt);
        }
        mapping
    }

    pub fn insert(
        &mut self,
        label_en: impl Into<String>,
        wiki_id: impl Into<String>,
        label_pt: impl Into<String>,
    ) {
        self.terms.insert(
            label_en.into(),
            VocabularyEntry {
                wiki_id: wiki_id.into(),
                label_pt: label_pt.into(),
            },
        );
    }

    pub fn lookup(&self, label_en: &str) -> Option<&VocabularyEntry> {
        self.terms.get(label_en)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        let mut mapping = VocabularyMapping::default();
        mapping.insert("Photograph", "Q125191", "Fotografia");

        assert!(mapping.lookup("Photograph").is_some());
        assert!(mapping.lookup("photograph").is_none());
    }

    #[test]
    fn from_rows_builds_index() {
        let mapping = VocabularyMapping::from_rows(vec![VocabularyRow {
            label_en: "Albumen print".to_string(),
            wiki_id: "Q580807".to_string(),
            label_pt: "Albumina".to_string(),
        }]);

        let entry = mapping.lookup("Albumen print").unwrap();
        assert_eq!(entry.wiki_id, "Q580807");
        assert_eq!(entry.label_pt, "Albumina");
    }
}
