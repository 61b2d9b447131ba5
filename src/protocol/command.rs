#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    BuildManifest,
    MergeCollection,
    CollectionFetch,
    ManifestExists,
    ProcessItems,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "build_manifest" => Command::BuildManifest,
            "merge_collection" => Command::MergeCollection,
            "collection.fetch" => Command::CollectionFetch,
            "manifest.exists" => Command::ManifestExists,
            "process_items" => Command::ProcessItems,
            _ => Command::Unknown,
        }
    }
}
