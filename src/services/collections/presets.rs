use crate::model::iiif::{
    bilingual_map, Collection, ImageResource, MetadataEntry, PRESENTATION_CONTEXT,
};
use crate::services::builder::{self, DEFAULT_RIGHTS, HOSTED_BY_EN, HOSTED_BY_PT};

/// Template de bootstrap de uma coleção conhecida. O thumbnail aponta para
/// um item representativo já publicado no endpoint de imagens.
pub struct CollectionPreset {
    pub name: &'static str,
    pub thumbnail_path: &'static str,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
}

/// Registro explícito — nome desconhecido é erro de configuração,
/// nunca um default silencioso.
pub const PRESETS: &[CollectionPreset] = &[
    CollectionPreset {
        name: "all",
        thumbnail_path: "0071824cx001-01/full/295,221/0/default.jpg",
        thumbnail_width: 295,
        thumbnail_height: 221,
    },
    CollectionPreset {
        name: "views",
        thumbnail_path: "0071824cx001-01/full/295,221/0/default.jpg",
        thumbnail_width: 295,
        thumbnail_height: 221,
    },
    CollectionPreset {
        name: "plans",
        thumbnail_path: "10639297/full/259,356/0/default.jpg",
        thumbnail_width: 259,
        thumbnail_height: 356,
    },
    CollectionPreset {
        name: "maps",
        thumbnail_path: "10643717/full/512,259/0/default.jpg",
        thumbnail_width: 512,
        thumbnail_height: 259,
    },
    CollectionPreset {
        name: "aerials",
        thumbnail_path: "24879867/full/394,260/0/default.jpg",
        thumbnail_width: 394,
        thumbnail_height: 260,
    },
    CollectionPreset {
        name: "mare",
        thumbnail_path: "31770323/full/188,125/0/default.jpg",
        thumbnail_width: 188,
        thumbnail_height: 125,
    },
];

pub fn lookup(name: &str) -> Option<&'static CollectionPreset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

/// Cria a coleção default de um nome registrado, com items vazio.
pub fn bootstrap(name: &str, base_url: &str) -> Result<Collection, String> {
    let preset = lookup(name).ok_or_else(|| {
        format!("unknown collection '{name}': no remote document and no registered preset")
    })?;

    let base = base_url.trim_end_matches('/');

    Ok(Collection {
        context: PRESENTATION_CONTEXT.to_string(),
        id: format!("{base}/collection/{name}.json"),
        kind: "Collection".to_string(),
        label: bilingual_map(vec![name.to_string()], vec![name.to_string()]),
        required_statement: MetadataEntry {
            label: bilingual_map(
                vec!["Attribution".to_string()],
                vec!["Attribution".to_string()],
            ),
            value: bilingual_map(vec![HOSTED_BY_EN.to_string()], vec![HOSTED_BY_PT.to_string()]),
        },
        rights: DEFAULT_RIGHTS.to_string(),
        thumbnail: vec![ImageResource {
            id: format!("{base}/{}", preset.thumbnail_path),
            kind: "Image".to_string(),
            format: Some("image/jpeg".to_string()),
            width: preset.thumbnail_width,
            height: preset.thumbnail_height,
        }],
        provider: vec![builder::provider(builder::imaginerio_homepage())],
        items: Vec::new(),
    })
}
