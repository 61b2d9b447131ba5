use serde_json::{json, Value};

use crate::model::iiif::{Collection, ManifestRef};
use crate::model::item::{ImageDimensions, ItemRecord};
use crate::model::vocabulary::{VocabularyMapping, VocabularyRow};
use crate::services::builder::{self, BuilderConfig};
use crate::services::collections::merge;
use crate::services::collections::store::{self, HttpCollectionSource};
use crate::services::images::HttpImageInfoSource;
use crate::services::pipeline::{self, PipelineConfig};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn parse_items_from_payload(payload: &Value) -> Result<Vec<ItemRecord>, String> {
    let arr = payload
        .get("items")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "payload.items must be an array".to_string())?;

    let mut items: Vec<ItemRecord> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<ItemRecord>(v) {
            Ok(item) => items.push(item),
            Err(e) => return Err(format!("invalid item at index {}: {}", i, e)),
        }
    }

    Ok(items)
}

/// `mapping` é opcional: ausente equivale a vocabulário vazio
/// (todo termo passa intacto).
fn parse_mapping_from_payload(payload: &Value) -> Result<VocabularyMapping, String> {
    let value = match payload.get("mapping") {
        Some(v) => v,
        None => return Ok(VocabularyMapping::default()),
    };

    let arr = value
        .as_array()
        .ok_or_else(|| "payload.mapping must be an array".to_string())?;

    let mut rows: Vec<VocabularyRow> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<VocabularyRow>(v) {
            Ok(row) => rows.push(row),
            Err(e) => return Err(format!("invalid mapping row at index {}: {}", i, e)),
        }
    }

    Ok(VocabularyMapping::from_rows(rows))
}

pub fn handle(input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    let _cmd = Command::from(cmd_str);

    match cmd_str {
        "ping" => ok(id, json!({ "message": "rio-iiif-core alive" })),

        "build_manifest" => {
            let base_url = payload.get("base_url").and_then(|v| v.as_str()).unwrap_or("");
            if base_url.is_empty() {
                return err(id, "payload.base_url is required");
            }

            let item_val = payload.get("item").cloned().unwrap_or(Value::Null);
            if item_val.is_null() {
                return err(id, "payload.item is required");
            }

            let mut item: ItemRecord = match serde_json::from_value(item_val) {
                Ok(v) => v,
                Err(e) => return err(id, format!("invalid payload.item: {e}")),
            };
            item.normalize();
            if item.identifier.is_empty() {
                return err(id, "item.identifier is required");
            }

            let mapping = match parse_mapping_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let dims: ImageDimensions = match payload.get("dims").cloned() {
                Some(v) if !v.is_null() => match serde_json::from_value(v) {
                    Ok(d) => d,
                    Err(e) => return err(id, format!("invalid payload.dims: {e}")),
                },
                _ => return err(id, "payload.dims is required"),
            };

            let manifest = builder::build(&item, &mapping, dims, &BuilderConfig { base_url });
            ok(id, json!({ "manifest": manifest }))
        }

        "merge_collection" => {
            let collection_val = payload.get("collection").cloned().unwrap_or(Value::Null);
            if collection_val.is_null() {
                return err(id, "payload.collection is required");
            }
            let mut collection: Collection = match serde_json::from_value(collection_val) {
                Ok(v) => v,
                Err(e) => return err(id, format!("invalid payload.collection: {e}")),
            };

            let reference_val = payload.get("reference").cloned().unwrap_or(Value::Null);
            if reference_val.is_null() {
                return err(id, "payload.reference is required");
            }
            let reference: ManifestRef = match serde_json::from_value(reference_val) {
                Ok(v) => v,
                Err(e) => return err(id, format!("invalid payload.reference: {e}")),
            };

            merge::merge(&mut collection, reference);
            ok(id, json!({ "collection": collection }))
        }

        "collection.fetch" => {
            let name = payload.get("name").and_then(|v| v.as_str()).unwrap_or("");
            let base_url = payload.get("base_url").and_then(|v| v.as_str()).unwrap_or("");
            if name.is_empty() {
                return err(id, "payload.name is required");
            }
            if base_url.is_empty() {
                return err(id, "payload.base_url is required");
            }

            let source = match HttpCollectionSource::new(base_url) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };

            match store::fetch_or_init(&source, &name.to_lowercase(), base_url) {
                Ok(collection) => ok(id, json!({ "collection": collection })),
                Err(e) => err(id, e),
            }
        }

        "manifest.exists" => {
            let identifier = payload.get("identifier").and_then(|v| v.as_str()).unwrap_or("");
            let base_url = payload.get("base_url").and_then(|v| v.as_str()).unwrap_or("");
            let kind = payload.get("kind").and_then(|v| v.as_str()).unwrap_or("manifest");
            if identifier.is_empty() {
                return err(id, "payload.identifier is required");
            }
            if base_url.is_empty() {
                return err(id, "payload.base_url is required");
            }

            match store::exists(base_url, kind, identifier) {
                Ok(exists) => ok(id, json!({ "exists": exists })),
                Err(e) => err(id, e),
            }
        }

        "process_items" => {
            let base_url = payload.get("base_url").and_then(|v| v.as_str()).unwrap_or("");
            if base_url.is_empty() {
                return err(id, "payload.base_url is required");
            }

            let items = match parse_items_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let mapping = match parse_mapping_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let images = match HttpImageInfoSource::new(base_url) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };

            let collections = match HttpCollectionSource::new(base_url) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };

            match pipeline::run(
                &items,
                &mapping,
                &images,
                &collections,
                PipelineConfig { base_url },
            ) {
                Ok((writes, report)) => ok(id, json!({ "writes": writes, "report": report })),
                Err(e) => err(id, e),
            }
        }

        _ => err(id, "unknown command"),
    }
}
