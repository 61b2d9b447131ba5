use crate::model::iiif::{Collection, ManifestRef};

/// Substituição por identificador: remove qualquer entrada com o mesmo id
/// e acrescenta a referência no final. Filtra primeiro, acrescenta depois —
/// nunca remove iterando. Idempotente por construção.
pub fn merge(collection: &mut Collection, reference: ManifestRef) {
    collection.items.retain(|item| item.id != reference.id);
    collection.items.push(reference);
}
