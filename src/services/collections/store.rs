use reqwest::blocking::Client;

use crate::model::iiif::Collection;
use crate::services::http;

use super::presets;

/// Fonte de coleções remotas. `None` significa documento indisponível
/// (inexistente, inalcançável depois dos retries ou ilegível) e dispara
/// o bootstrap — ausência não é fatal.
pub trait CollectionSource {
    fn fetch(&self, name: &str) -> Option<Collection>;
}

pub struct HttpCollectionSource {
    client: Client,
    base_url: String,
}

impl HttpCollectionSource {
    pub fn new(base_url: &str) -> Result<Self, String> {
        Ok(Self {
            client: http::new_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl CollectionSource for HttpCollectionSource {
    fn fetch(&self, name: &str) -> Option<Collection> {
        let endpoint = format!("{}/collection/{}.json", self.base_url, name);

        let text = match http::get_with_retry(&self.client, &endpoint) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("[collection] fetch failed for '{name}': {err}");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(collection) => Some(collection),
            Err(err) => {
                eprintln!("[collection] invalid document at {endpoint}: {err}");
                None
            }
        }
    }
}

/// Busca a coleção no store; indisponível ⇒ bootstrap pelo registro de
/// presets. Nome sem preset e sem documento remoto é erro para o chamador.
pub fn fetch_or_init(
    source: &dyn CollectionSource,
    name: &str,
    base_url: &str,
) -> Result<Collection, String> {
    if let Some(collection) = source.fetch(name) {
        return Ok(collection);
    }

    eprintln!("[collection] couldn't find collection '{name}', creating from preset");
    presets::bootstrap(name, base_url)
}

/// Sonda a existência de um documento já publicado de um item
/// (ex.: kind = "manifest" ou "info"). Qualquer falha conta como ausente.
pub fn exists(base_url: &str, kind: &str, identifier: &str) -> Result<bool, String> {
    let client = http::new_client()?;
    let base = base_url.trim_end_matches('/');
    let endpoint = format!("{base}/{identifier}/{kind}.json");
    Ok(http::get_with_retry(&client, &endpoint).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::collections::merge;

    const BASE: &str = "https://images.example.org/iiif";

    struct NoRemote;

    impl CollectionSource for NoRemote {
        fn fetch(&self, _name: &str) -> Option<Collection> {
            None
        }
    }

    struct FixedRemote(Collection);

    impl CollectionSource for FixedRemote {
        fn fetch(&self, _name: &str) -> Option<Collection> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn absent_remote_bootstraps_known_preset() {
        let collection = fetch_or_init(&NoRemote, "views", BASE).unwrap();
        assert!(collection.items.is_empty());
        assert!(collection.id.ends_with("/collection/views.json"));
    }

    #[test]
    fn absent_remote_with_unknown_name_is_an_error() {
        let err = fetch_or_init(&NoRemote, "gardens", BASE).unwrap_err();
        assert!(err.contains("gardens"));
    }

    #[test]
    fn existing_remote_wins_over_preset() {
        let mut remote = crate::services::collections::presets::bootstrap("views", BASE).unwrap();
        merge::merge(
            &mut remote,
            crate::model::iiif::ManifestRef {
                id: format!("{BASE}/previous/manifest.json"),
                kind: "Manifest".to_string(),
                label: crate::model::iiif::language_map(
                    crate::model::iiif::LANG_NONE,
                    vec!["Previous".to_string()],
                ),
                thumbnail: Vec::new(),
            },
        );

        let fetched = fetch_or_init(&FixedRemote(remote.clone()), "views", BASE).unwrap();
        assert_eq!(fetched, remote);
        assert_eq!(fetched.items.len(), 1);
    }
}
