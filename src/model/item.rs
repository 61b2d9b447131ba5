use serde::{Deserialize, Serialize};

/// Separador das listas vindas da planilha de metadados.
pub const LIST_DELIMITER: &str = "||";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Uma linha da planilha de metadados, já filtrada para itens publicados.
/// Campos vazios viram `None` via `normalize` — nunca string vazia.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ItemRecord {
    pub identifier: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description_en: Option<String>,

    #[serde(default)]
    pub description_pt: Option<String>,

    #[serde(default)]
    pub creator: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub depicts: Option<String>,

    #[serde(default, rename = "type")]
    pub item_type: Option<String>,

    #[serde(default)]
    pub materials: Option<String>,

    #[serde(default)]
    pub fabrication_method: Option<String>,

    #[serde(default)]
    pub width_mm: Option<String>,

    #[serde(default)]
    pub height_mm: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub rights: Option<String>,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub attribution: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub source_url: Option<String>,

    #[serde(default)]
    pub wikidata_id: Option<String>,

    #[serde(default)]
    pub smapshot_id: Option<String>,

    #[serde(default)]
    pub collections: Option<String>,
}

impl ItemRecord {
    /// Converte strings vazias/whitespace em ausência explícita.
    pub fn normalize(&mut self) {
        self.identifier = self.identifier.trim().to_string();
        self.title = self.title.trim().to_string();

        for field in [
            &mut self.description_en,
            &mut self.description_pt,
            &mut self.creator,
            &mut self.date,
            &mut self.depicts,
            &mut self.item_type,
            &mut self.materials,
            &mut self.fabrication_method,
            &mut self.width_mm,
            &mut self.height_mm,
            &mut self.rights,
            &mut self.license,
            &mut self.attribution,
            &mut self.source,
            &mut self.source_url,
            &mut self.wikidata_id,
            &mut self.smapshot_id,
            &mut self.collections,
        ] {
            blank_to_none(field);
        }
    }

    /// Nomes de coleção do item: split em `||`, minúsculas, sem vazios.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections
            .as_deref()
            .unwrap_or("")
            .split(LIST_DELIMITER)
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

fn blank_to_none(value: &mut Option<String>) {
    let kept = value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    *value = kept;
}
