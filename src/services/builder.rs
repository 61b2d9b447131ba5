use crate::model::iiif::{
    bilingual_map, language_map, Annotation, AnnotationBody, AnnotationPage, Canvas, ImageResource,
    ImageService, LinkedResource, Manifest, MetadataEntry, Provider, LANG_NONE, LANG_PT,
    PRESENTATION_CONTEXT,
};
use crate::model::item::{ImageDimensions, ItemRecord};
use crate::model::vocabulary::VocabularyMapping;
use crate::services::fields::{self, FieldValues, LocalizedField};

pub const DEFAULT_RIGHTS: &str = "http://rightsstatements.org/vocab/CNE/1.0/";
pub const FALLBACK_HOMEPAGE: &str = "https://imaginerio.org";

pub(crate) const HOSTED_BY_EN: &str = "Hosted by imagineRio";
pub(crate) const HOSTED_BY_PT: &str = "Hospedado por imagineRio";

const PROVIDER_ID: &str = "https://imaginerio.org/";
const PROVIDER_LOGO: &str =
    "https://aws1.discourse-cdn.com/free1/uploads/imaginerio/original/1X/8c4f71106b4c8191ffdcafb4edeedb6f6f58b482.png";
const LOGO_WIDTH: u32 = 708;
const LOGO_HEIGHT: u32 = 164;

const MAP_VIEWER_BASE: &str = "https://www.imaginerio.org/map#";
const WIKIDATA_BASE: &str = "https://www.wikidata.org/wiki/";
const SMAPSHOT_BASE: &str = "https://smapshot.heig-vd.ch/visit/";

/// Redução do thumbnail em relação à imagem completa.
const THUMBNAIL_SCALE: u32 = 16;

/// Configuração explícita do builder — nada de estado global de módulo.
pub struct BuilderConfig<'a> {
    /// Base dos endpoints de apresentação e de imagem (ex.: "<bucket>/iiif").
    pub base_url: &'a str,
}

/// Monta o manifest completo de um item. Transformação pura: mesma entrada,
/// mesma saída; as dimensões já devem ter sido resolvidas pelo chamador.
pub fn build(
    item: &ItemRecord,
    mapping: &VocabularyMapping,
    dims: ImageDimensions,
    cfg: &BuilderConfig,
) -> Manifest {
    let base = cfg.base_url.trim_end_matches('/');
    let slug = slug(&item.identifier);

    let description =
        fields::description(item.description_en.as_deref(), item.description_pt.as_deref());

    let entries: [Option<LocalizedField>; 10] = [
        fields::single(Some(item.title.as_str()), "Title", "Título"),
        description.clone(),
        fields::single(item.creator.as_deref(), "Creator", "Autor"),
        fields::single(item.date.as_deref(), "Date", "Data"),
        fields::depicts(item.depicts.as_deref()),
        fields::vocabulary(item.item_type.as_deref(), mapping, "Type", "Tipo"),
        fields::vocabulary(item.materials.as_deref(), mapping, "Materials", "Materiais"),
        fields::vocabulary(
            item.fabrication_method.as_deref(),
            mapping,
            "Fabrication Method",
            "Método de Fabricação",
        ),
        fields::single(item.width_mm.as_deref(), "Width (mm)", "Largura (mm)"),
        fields::single(item.height_mm.as_deref(), "Height (mm)", "Altura (mm)"),
    ];

    let metadata: Vec<MetadataEntry> = entries
        .into_iter()
        .flatten()
        .map(|field| field.to_metadata_entry())
        .collect();

    // Sem descrição não há summary — mesma regra de ausência do metadado.
    let summary = description.as_ref().map(|field| match &field.values {
        FieldValues::Bilingual { en, pt } => bilingual_map(en.clone(), pt.clone()),
        FieldValues::Single(values) => language_map(LANG_NONE, values.clone()),
    });

    let homepage = homepage_for(item);

    Manifest {
        context: PRESENTATION_CONTEXT.to_string(),
        id: format!("{base}/{slug}/manifest.json"),
        kind: "Manifest".to_string(),
        label: language_map(LANG_PT, vec![item.title.clone()]),
        metadata,
        summary,
        required_statement: required_statement(item.attribution.as_deref()),
        rights: resolve_rights(item),
        thumbnail: vec![thumbnail(base, &slug, dims)],
        homepage: vec![homepage.clone()],
        see_also: see_also_for(item),
        provider: vec![provider(homepage)],
        items: vec![canvas(&item.identifier, &slug, base, dims)],
    }
}

/// Identificadores com espaço viram "_" nas URLs.
pub(crate) fn slug(identifier: &str) -> String {
    identifier.replace(' ', "_")
}

fn required_statement(attribution: Option<&str>) -> MetadataEntry {
    let (value_en, value_pt) = match attribution {
        Some(attribution) => (
            format!("{attribution}\n{HOSTED_BY_EN}"),
            format!("{attribution}\n{HOSTED_BY_PT}"),
        ),
        None => (HOSTED_BY_EN.to_string(), HOSTED_BY_PT.to_string()),
    };

    MetadataEntry {
        label: bilingual_map(
            vec!["Hosting".to_string()],
            vec!["Hospedagem".to_string()],
        ),
        value: bilingual_map(vec![value_en], vec![value_pt]),
    }
}

/// Ordem de precedência: License absoluta, depois Rights absoluta,
/// depois o rights statement padrão. Nenhum outro fallback.
fn resolve_rights(item: &ItemRecord) -> String {
    if let Some(license) = item.license.as_deref() {
        if fields::is_absolute_http(license) {
            return license.to_string();
        }
    }
    if let Some(rights) = item.rights.as_deref() {
        if fields::is_absolute_http(rights) {
            return rights.to_string();
        }
    }
    DEFAULT_RIGHTS.to_string()
}

fn thumbnail(base: &str, slug: &str, dims: ImageDimensions) -> ImageResource {
    let width = dims.width / THUMBNAIL_SCALE;
    let height = dims.height / THUMBNAIL_SCALE;
    ImageResource {
        id: format!("{base}/{slug}/full/{width},{height}/0/default.jpg"),
        kind: "Image".to_string(),
        format: Some("image/jpeg".to_string()),
        width,
        height,
    }
}

fn homepage_for(item: &ItemRecord) -> LinkedResource {
    let id = match item.source_url.as_deref() {
        Some(raw) => homepage_id(raw),
        None => FALLBACK_HOMEPAGE.to_string(),
    };
    let label = item
        .source
        .clone()
        .unwrap_or_else(|| "imagineRio".to_string());

    LinkedResource {
        id,
        kind: "Text".to_string(),
        label: language_map(LANG_NONE, vec![label]),
        format: Some("text/html".to_string()),
    }
}

/// Classifica a Source URL de forma determinística: URL completa bem formada
/// entra na forma normalizada (o parser percent-encoda espaços no path);
/// malformada tenta recuperar só scheme+authority; irrecuperável cai no
/// endereço fixo.
fn homepage_id(raw: &str) -> String {
    if let Some(normalized) = fields::normalize_absolute_http(raw) {
        return normalized;
    }

    if let Some((scheme, rest)) = raw.split_once("://") {
        let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
        let truncated = format!("{scheme}://{authority}");
        if let Some(normalized) = fields::normalize_absolute_http(&truncated) {
            return normalized;
        }
    }

    FALLBACK_HOMEPAGE.to_string()
}

fn see_also_for(item: &ItemRecord) -> Vec<LinkedResource> {
    let mut references = vec![LinkedResource {
        id: format!("{MAP_VIEWER_BASE}{}", item.identifier),
        kind: "Text".to_string(),
        label: language_map(LANG_NONE, vec!["imagineRio".to_string()]),
        format: None,
    }];

    if let Some(wikidata_id) = item.wikidata_id.as_deref() {
        references.push(LinkedResource {
            id: format!("{WIKIDATA_BASE}{wikidata_id}"),
            kind: "Text".to_string(),
            label: language_map(LANG_NONE, vec!["Wikidata".to_string()]),
            format: None,
        });
    }

    if let Some(smapshot_id) = item.smapshot_id.as_deref() {
        references.push(LinkedResource {
            id: format!("{SMAPSHOT_BASE}{smapshot_id}"),
            kind: "Text".to_string(),
            label: language_map(LANG_NONE, vec!["Smapshot".to_string()]),
            format: None,
        });
    }

    references
}

/// Descritor fixo da organização — idêntico em todos os documentos.
pub(crate) fn provider(homepage: LinkedResource) -> Provider {
    Provider {
        id: PROVIDER_ID.to_string(),
        kind: "Agent".to_string(),
        label: bilingual_map(
            vec!["imagineRio".to_string()],
            vec!["imagineRio".to_string()],
        ),
        logo: vec![ImageResource {
            id: PROVIDER_LOGO.to_string(),
            kind: "Image".to_string(),
            format: Some("image/png".to_string()),
            width: LOGO_WIDTH,
            height: LOGO_HEIGHT,
        }],
        homepage: vec![homepage],
    }
}

/// Homepage institucional, usada quando não há Source URL e nas coleções.
pub(crate) fn imaginerio_homepage() -> LinkedResource {
    LinkedResource {
        id: FALLBACK_HOMEPAGE.to_string(),
        kind: "Text".to_string(),
        label: language_map(LANG_NONE, vec!["imagineRio".to_string()]),
        format: Some("text/html".to_string()),
    }
}

fn canvas(identifier: &str, slug: &str, base: &str, dims: ImageDimensions) -> Canvas {
    let canvas_id = format!("{base}/{slug}/canvas/p1");

    let body = AnnotationBody {
        id: format!("{base}/{slug}/full/max/0/default.jpg"),
        kind: "Image".to_string(),
        format: "image/jpeg".to_string(),
        width: dims.width,
        height: dims.height,
        service: vec![ImageService {
            id: format!("{base}/{slug}/"),
            kind: "ImageService3".to_string(),
            profile: "level0".to_string(),
        }],
    };

    let annotation = Annotation {
        id: format!("{base}/{slug}/annotation/p1"),
        kind: "Annotation".to_string(),
        motivation: "painting".to_string(),
        body,
        target: canvas_id.clone(),
    };

    Canvas {
        id: canvas_id.clone(),
        kind: "Canvas".to_string(),
        label: language_map(LANG_NONE, vec![identifier.to_string()]),
        width: dims.width,
        height: dims.height,
        items: vec![AnnotationPage {
            id: format!("{base}/{slug}/annotation-page/p1"),
            kind: "AnnotationPage".to_string(),
            items: vec![annotation],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::iiif::LANG_EN;

    const BASE: &str = "https://images.example.org/iiif";

    fn sample_item() -> ItemRecord {
        let mut item = ItemRecord {
            identifier: "007A5P4F03-006".to_string(),
            title: "View of Rio".to_string(),
            description_en: Some("A view of the bay".to_string()),
            creator: Some("Marc Ferrez".to_string()),
            date: Some("1890".to_string()),
            item_type: Some("Photograph".to_string()),
            attribution: Some("Instituto Moreira Salles".to_string()),
            collections: Some("Views||All".to_string()),
            ..Default::default()
        };
        item.normalize();
        item
    }

    fn sample_mapping() -> VocabularyMapping {
        let mut mapping = VocabularyMapping::default();
        mapping.insert("Photograph", "Q125191", "Fotografia");
        mapping
    }

    fn dims() -> ImageDimensions {
        ImageDimensions {
            width: 4000,
            height: 3000,
        }
    }

    fn cfg() -> BuilderConfig<'static> {
        BuilderConfig { base_url: BASE }
    }

    #[test]
    fn build_is_pure() {
        let item = sample_item();
        let mapping = sample_mapping();

        let first = build(&item, &mapping, dims(), &cfg());
        let second = build(&item, &mapping, dims(), &cfg());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn rights_precedence() {
        let mut item = sample_item();

        item.license = Some("http://a".to_string());
        item.rights = Some("http://b".to_string());
        assert_eq!(build(&item, &sample_mapping(), dims(), &cfg()).rights, "http://a");

        item.license = None;
        assert_eq!(build(&item, &sample_mapping(), dims(), &cfg()).rights, "http://b");

        item.rights = None;
        assert_eq!(
            build(&item, &sample_mapping(), dims(), &cfg()).rights,
            DEFAULT_RIGHTS
        );
    }

    #[test]
    fn thumbnail_is_one_sixteenth() {
        let manifest = build(&sample_item(), &sample_mapping(), dims(), &cfg());
        let thumb = &manifest.thumbnail[0];

        assert_eq!(thumb.width, 250);
        assert_eq!(thumb.height, 187);
        assert!(thumb.id.ends_with("/007A5P4F03-006/full/250,187/0/default.jpg"));
    }

    #[test]
    fn homepage_recovers_from_malformed_source_url() {
        let mut item = sample_item();

        item.source_url = Some("not-a-url".to_string());
        let manifest = build(&item, &sample_mapping(), dims(), &cfg());
        assert_eq!(manifest.homepage[0].id, FALLBACK_HOMEPAGE);

        item.source_url = Some("https://museu.example.org/acervo/123?lang=pt".to_string());
        let manifest = build(&item, &sample_mapping(), dims(), &cfg());
        assert_eq!(
            manifest.homepage[0].id,
            "https://museu.example.org/acervo/123?lang=pt"
        );

        item.source_url = None;
        item.source = None;
        let manifest = build(&item, &sample_mapping(), dims(), &cfg());
        assert_eq!(manifest.homepage[0].id, FALLBACK_HOMEPAGE);
        assert_eq!(
            manifest.homepage[0].label[LANG_NONE],
            vec!["imagineRio".to_string()]
        );
    }

    #[test]
    fn homepage_truncation_drops_path_when_full_url_is_rejected() {
        // scheme não-http com authority válida não passa inteiro nem truncado
        assert_eq!(homepage_id("ftp://archive.example.org/item/9"), FALLBACK_HOMEPAGE);
        assert_eq!(homepage_id("https://exa mple.org/item"), FALLBACK_HOMEPAGE);
        assert_eq!(
            homepage_id("https://museu.example.org/acervo"),
            "https://museu.example.org/acervo"
        );
    }

    #[test]
    fn homepage_is_emitted_in_normalized_form() {
        // espaço no path é aceito pelo parser, mas sai percent-encodado
        assert_eq!(
            homepage_id("http://example.org/a b"),
            "http://example.org/a%20b"
        );
        // espaço na authority não tem recuperação
        assert_eq!(homepage_id("https://exa mple.org"), FALLBACK_HOMEPAGE);
        assert_eq!(
            homepage_id("HTTP://Example.ORG/Acervo"),
            "http://example.org/Acervo"
        );
    }

    #[test]
    fn see_also_grows_with_external_ids() {
        let mut item = sample_item();
        let manifest = build(&item, &sample_mapping(), dims(), &cfg());
        assert_eq!(manifest.see_also.len(), 1);
        assert_eq!(
            manifest.see_also[0].id,
            "https://www.imaginerio.org/map#007A5P4F03-006"
        );

        item.wikidata_id = Some("Q123".to_string());
        item.smapshot_id = Some("456".to_string());
        let manifest = build(&item, &sample_mapping(), dims(), &cfg());
        assert_eq!(manifest.see_also.len(), 3);
        assert_eq!(manifest.see_also[1].id, "https://www.wikidata.org/wiki/Q123");
        assert_eq!(manifest.see_also[2].id, "https://smapshot.heig-vd.ch/visit/456");
    }

    #[test]
    fn summary_follows_description_presence() {
        let with_description = build(&sample_item(), &sample_mapping(), dims(), &cfg());
        let summary = with_description.summary.expect("summary present");
        assert_eq!(summary[LANG_EN], vec!["A view of the bay".to_string()]);

        let mut bare = sample_item();
        bare.description_en = None;
        bare.description_pt = None;
        let manifest = build(&bare, &sample_mapping(), dims(), &cfg());
        assert!(manifest.summary.is_none());
        assert!(!manifest
            .metadata
            .iter()
            .any(|entry| entry.label[LANG_EN] == vec!["Description".to_string()]));
    }

    #[test]
    fn required_statement_with_and_without_attribution() {
        let manifest = build(&sample_item(), &sample_mapping(), dims(), &cfg());
        assert_eq!(
            manifest.required_statement.value[LANG_EN],
            vec!["Instituto Moreira Salles\nHosted by imagineRio".to_string()]
        );

        let mut anonymous = sample_item();
        anonymous.attribution = None;
        let manifest = build(&anonymous, &sample_mapping(), dims(), &cfg());
        assert_eq!(
            manifest.required_statement.value[LANG_EN],
            vec![HOSTED_BY_EN.to_string()]
        );
    }

    #[test]
    fn canvas_carries_resolved_dimensions_and_level0_service() {
        let manifest = build(&sample_item(), &sample_mapping(), dims(), &cfg());

        assert_eq!(manifest.items.len(), 1);
        let canvas = &manifest.items[0];
        assert_eq!(canvas.width, 4000);
        assert_eq!(canvas.height, 3000);

        let annotation = &canvas.items[0].items[0];
        assert_eq!(annotation.motivation, "painting");
        assert_eq!(annotation.target, canvas.id);
        assert!(annotation.body.id.ends_with("/full/max/0/default.jpg"));

        let service = &annotation.body.service[0];
        assert_eq!(service.kind, "ImageService3");
        assert_eq!(service.profile, "level0");
    }

    #[test]
    fn identifier_spaces_become_underscores_in_urls() {
        let mut item = sample_item();
        item.identifier = "A 01".to_string();
        let manifest = build(&item, &sample_mapping(), dims(), &cfg());

        assert!(manifest.id.ends_with("/A_01/manifest.json"));
        // o label do canvas preserva o identificador original
        assert_eq!(manifest.items[0].label[LANG_NONE], vec!["A 01".to_string()]);
    }
}
