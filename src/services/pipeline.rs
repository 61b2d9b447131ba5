use std::collections::HashMap;

use crate::model::iiif::Collection;
use crate::model::item::ItemRecord;
use crate::model::vocabulary::VocabularyMapping;
use crate::services::builder::{self, BuilderConfig};
use crate::services::collections::merge;
use crate::services::collections::store::{self, CollectionSource};
use crate::services::images::ImageInfoSource;

pub struct PipelineConfig<'a> {
    pub base_url: &'a str,
}

/// Par (caminho, conteúdo) a ser persistido pelo write sink externo.
#[derive(Debug, serde::Serialize)]
pub struct WriteIntent {
    pub path: String,
    pub data: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ItemOutcome {
    pub identifier: String,
    pub ok: bool,
    pub error: Option<String>,
}

/// Resumo de fim de run: itens processados e pulados, com motivo.
#[derive(Debug, serde::Serialize)]
pub struct RunReport {
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<ItemOutcome>,
}

/// Loop por item: resolve dimensões, monta o manifest e funde a referência
/// nas coleções do item. As coleções abertas ficam em cache por nome — um
/// único escritor por coleção dentro do run, sem updates perdidos — e cada
/// uma gera um write intent único depois do loop.
pub fn run(
    items: &[ItemRecord],
    mapping: &VocabularyMapping,
    images: &dyn ImageInfoSource,
    collections: &dyn CollectionSource,
    cfg: PipelineConfig,
) -> Result<(Vec<WriteIntent>, RunReport), String> {
    let mut writes: Vec<WriteIntent> = Vec::new();
    let mut report = RunReport {
        succeeded: 0,
        failed: 0,
        items: Vec::new(),
    };

    let mut open_collections: HashMap<String, Collection> = HashMap::new();
    let mut collection_order: Vec<String> = Vec::new();

    for raw in items {
        let mut item = raw.clone();
        item.normalize();

        let identifier = item.identifier.clone();
        if identifier.is_empty() {
            report.failed += 1;
            report.items.push(ItemOutcome {
                identifier,
                ok: false,
                error: Some("missing identifier".to_string()),
            });
            continue;
        }

        // Dimensões não resolvidas: fatal só para este item.
        let dims = match images.dimensions(&identifier) {
            Ok(dims) => dims,
            Err(err) => {
                eprintln!("[iiif] skipping {identifier}: {err}");
                report.failed += 1;
                report.items.push(ItemOutcome {
                    identifier,
                    ok: false,
                    error: Some(err),
                });
                continue;
            }
        };

        let manifest = builder::build(
            &item,
            mapping,
            dims,
            &BuilderConfig {
                base_url: cfg.base_url,
            },
        );

        let payload = match serde_json::to_string_pretty(&manifest) {
            Ok(payload) => payload,
            Err(err) => {
                report.failed += 1;
                report.items.push(ItemOutcome {
                    identifier,
                    ok: false,
                    error: Some(format!("manifest serialization failed: {err}")),
                });
                continue;
            }
        };

        // O caminho usa o mesmo slug do `id` do manifest; gravar sob o
        // identificador cru deixaria o documento fora da URL que ele declara.
        writes.push(WriteIntent {
            path: format!("{}/manifest.json", builder::slug(&identifier)),
            data: payload,
        });

        let mut membership_errors: Vec<String> = Vec::new();

        for name in item.collection_names() {
            if !open_collections.contains_key(&name) {
                match store::fetch_or_init(collections, &name, cfg.base_url) {
                    Ok(collection) => {
                        open_collections.insert(name.clone(), collection);
                        collection_order.push(name.clone());
                    }
                    Err(err) => {
                        // Só a filiação nesta coleção falha; o run continua.
                        eprintln!("[collection] {identifier}: {err}");
                        membership_errors.push(err);
                        continue;
                    }
                }
            }

            if let Some(collection) = open_collections.get_mut(&name) {
                merge::merge(collection, manifest.reference());
            }
        }

        report.succeeded += 1;
        report.items.push(ItemOutcome {
            identifier,
            ok: true,
            error: if membership_errors.is_empty() {
                None
            } else {
                Some(membership_errors.join("; "))
            },
        });
    }

    for name in &collection_order {
        if let Some(collection) = open_collections.get(name) {
            let data = serde_json::to_string_pretty(collection).map_err(|e| e.to_string())?;
            writes.push(WriteIntent {
                path: format!("collection/{name}.json"),
                data,
            });
        }
    }

    Ok((writes, report))
}
