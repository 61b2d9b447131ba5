use url::Url;

use crate::model::iiif::{bilingual_map, language_map, MetadataEntry, LANG_NONE};
use crate::model::item::LIST_DELIMITER;
use crate::model::vocabulary::VocabularyMapping;

const WIKIDATA_ENTITY_BASE: &str = "http://wikidata.org/wiki/";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValues {
    /// Valores sem idioma definido (tag "none").
    Single(Vec<String>),
    Bilingual { en: Vec<String>, pt: Vec<String> },
}

/// Um campo de metadado localizado, pronto para virar entrada do manifest.
/// Campo sem valor significativo nunca existe: as funções abaixo devolvem `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedField {
    pub label_en: String,
    pub label_pt: String,
    pub values: FieldValues,
}

impl LocalizedField {
    pub fn to_metadata_entry(&self) -> MetadataEntry {
        let label = bilingual_map(vec![self.label_en.clone()], vec![self.label_pt.clone()]);
        let value = match &self.values {
            FieldValues::Single(values) => language_map(LANG_NONE, values.clone()),
            FieldValues::Bilingual { en, pt } => bilingual_map(en.clone(), pt.clone()),
        };
        MetadataEntry { label, value }
    }
}

/// Campo escalar de idioma único. Vazio ⇒ ausente.
pub fn single(raw: Option<&str>, label_en: &str, label_pt: &str) -> Option<LocalizedField> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;
    Some(LocalizedField {
        label_en: label_en.to_string(),
        label_pt: label_pt.to_string(),
        values: FieldValues::Single(vec![value.to_string()]),
    })
}

/// Descrição bilíngue com fallback: o idioma ausente espelha o presente.
/// Sem nenhum dos dois, o campo inteiro é omitido.
pub fn description(en: Option<&str>, pt: Option<&str>) -> Option<LocalizedField> {
    let en = en.map(str::trim).filter(|v| !v.is_empty());
    let pt = pt.map(str::trim).filter(|v| !v.is_empty());

    let (value_en, value_pt) = match (en, pt) {
        (Some(en), Some(pt)) => (en, pt),
        (Some(en), None) => (en, en),
        (None, Some(pt)) => (pt, pt),
        (None, None) => return None,
    };

    Some(LocalizedField {
        label_en: "Description".to_string(),
        label_pt: "Descrição".to_string(),
        values: FieldValues::Bilingual {
            en: vec![value_en.to_string()],
            pt: vec![value_pt.to_string()],
        },
    })
}

/// Campo de vocabulário controlado: cada termo vira link para a entidade
/// mapeada, com rótulo traduzido no lado pt-BR. Termo fora do vocabulário
/// passa intacto nos dois idiomas — degradação, não erro.
pub fn vocabulary(
    raw: Option<&str>,
    mapping: &VocabularyMapping,
    label_en: &str,
    label_pt: &str,
) -> Option<LocalizedField> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;

    let mut en = Vec::new();
    let mut pt = Vec::new();

    for token in raw.split(LIST_DELIMITER) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        match mapping.lookup(token) {
            Some(entry) => {
                let href = format!("{WIKIDATA_ENTITY_BASE}{}", entry.wiki_id);
                en.push(uri_value_link(&href, token));
                pt.push(uri_value_link(&href, &entry.label_pt));
            }
            None => {
                en.push(token.to_string());
                pt.push(token.to_string());
            }
        }
    }

    if en.is_empty() {
        return None;
    }

    Some(LocalizedField {
        label_en: label_en.to_string(),
        label_pt: label_pt.to_string(),
        values: FieldValues::Bilingual { en, pt },
    })
}

/// Campo Depicts: tokens "URI rótulo" viram links. Qualquer token malformado
/// derruba o campo inteiro (tudo ou nada, nunca parcial).
pub fn depicts(raw: Option<&str>) -> Option<LocalizedField> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;

    let mut values = Vec::new();

    for token in raw.split(LIST_DELIMITER) {
        let (uri, label) = token.trim().split_once(char::is_whitespace)?;
        let label = label.trim();
        if label.is_empty() || !is_absolute_http(uri) {
            return None;
        }
        values.push(uri_value_link(uri, label));
    }

    if values.is_empty() {
        return None;
    }

    Some(LocalizedField {
        label_en: "Depicts".to_string(),
        label_pt: "Retrata".to_string(),
        values: FieldValues::Single(values),
    })
}

pub fn uri_value_link(href: &str, text: &str) -> String {
    format!("<a class=\"uri-value-link\" target=\"_blank\" href=\"{href}\">{text}</a>")
}

pub fn is_absolute_http(value: &str) -> bool {
    normalize_absolute_http(value).is_some()
}

/// Forma normalizada de uma URL http(s) absoluta (espaços no path viram
/// `%20` etc.); `None` quando não é uma.
pub fn normalize_absolute_http(value: &str) -> Option<String> {
    match Url::parse(value) {
        Ok(url) if (url.scheme() == "http" || url.scheme() == "https") && url.has_host() => {
            Some(url.to_string())
        }
        _ => None,
    }
}
