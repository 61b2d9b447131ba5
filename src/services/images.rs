use reqwest::blocking::Client;
use serde::Deserialize;

use crate::model::item::ImageDimensions;
use crate::services::http;

/// Resolução externa de dimensões da imagem canônica de um item.
/// Falha aqui é fatal só para o item em questão.
pub trait ImageInfoSource {
    fn dimensions(&self, identifier: &str) -> Result<ImageDimensions, String>;
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    width: u32,
    height: u32,
}

/// Lê o info.json do endpoint de imagens já tilado.
pub struct HttpImageInfoSource {
    client: Client,
    base_url: String,
}

impl HttpImageInfoSource {
    pub fn new(base_url: &str) -> Result<Self, String> {
        Ok(Self {
            client: http::new_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ImageInfoSource for HttpImageInfoSource {
    fn dimensions(&self, identifier: &str) -> Result<ImageDimensions, String> {
        let endpoint = format!("{}/{}/info.json", self.base_url, identifier);

        let text = http::get_with_retry(&self.client, &endpoint)
            .map_err(|err| format!("could not resolve image dimensions for {identifier}: {err}"))?;

        let info: ImageInfo = serde_json::from_str(&text)
            .map_err(|err| format!("invalid info.json for {identifier}: {err}"))?;

        Ok(ImageDimensions {
            width: info.width,
            height: info.height,
        })
    }
}
