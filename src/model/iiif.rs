use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const PRESENTATION_CONTEXT: &str = "http://iiif.io/api/presentation/3/context.json";

pub const LANG_EN: &str = "en";
pub const LANG_PT: &str = "pt-BR";
pub const LANG_NONE: &str = "none";

/// Mapa IIIF de idioma → valores. BTreeMap mantém a saída estável entre runs.
pub type LanguageMap = BTreeMap<String, Vec<String>>;

pub fn language_map(tag: &str, values: Vec<String>) -> LanguageMap {
    let mut map = LanguageMap::new();
    map.insert(tag.to_string(), values);
    map
}

pub fn bilingual_map(en: Vec<String>, pt: Vec<String>) -> LanguageMap {
    let mut map = LanguageMap::new();
    map.insert(LANG_EN.to_string(), en);
    map.insert(LANG_PT.to_string(), pt);
    map
}

/// Par label/value usado tanto em `metadata` quanto em `requiredStatement`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MetadataEntry {
    pub label: LanguageMap,
    pub value: LanguageMap,
}

/// Recurso de imagem com dimensões: thumbnails e logos.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageResource {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    pub width: u32,
    pub height: u32,
}

/// Referência externa: homepage e seeAlso.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LinkedResource {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub label: LanguageMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Provider {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub label: LanguageMap,

    #[serde(default)]
    pub logo: Vec<ImageResource>,

    #[serde(default)]
    pub homepage: Vec<LinkedResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageService {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub profile: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnnotationBody {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub format: String,
    pub width: u32,
    pub height: u32,

    #[serde(default)]
    pub service: Vec<ImageService>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub motivation: String,
    pub body: AnnotationBody,
    pub target: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnnotationPage {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub items: Vec<Annotation>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Canvas {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub label: LanguageMap,
    pub width: u32,
    pub height: u32,
    pub items: Vec<AnnotationPage>,
}

/// Documento de apresentação de um item digitalizado.
/// Sem estado interno: é reconstruído do zero a cada run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Manifest {
    #[serde(rename = "@context")]
    pub context: String,

    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub label: LanguageMap,

    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<LanguageMap>,

    #[serde(rename = "requiredStatement")]
    pub required_statement: MetadataEntry,

    pub rights: String,

    #[serde(default)]
    pub thumbnail: Vec<ImageResource>,

    #[serde(default)]
    pub homepage: Vec<LinkedResource>,

    #[serde(rename = "seeAlso", default)]
    pub see_also: Vec<LinkedResource>,

    #[serde(default)]
    pub provider: Vec<Provider>,

    pub items: Vec<Canvas>,
}

impl Manifest {
    /// Referência resumida para inserção em coleções.
    pub fn reference(&self) -> ManifestRef {
        ManifestRef {
            id: self.id.clone(),
            kind: "Manifest".to_string(),
            label: self.label.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ManifestRef {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub label: LanguageMap,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnail: Vec<ImageResource>,
}

/// Documento de coleção: agrupa referências de manifests por id único.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Collection {
    #[serde(rename = "@context")]
    pub context: String,

    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub label: LanguageMap,

    #[serde(rename = "requiredStatement")]
    pub required_statement: MetadataEntry,

    pub rights: String,

    #[serde(default)]
    pub thumbnail: Vec<ImageResource>,

    #[serde(default)]
    pub provider: Vec<Provider>,

    #[serde(default)]
    pub items: Vec<ManifestRef>,
}
