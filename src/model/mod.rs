pub mod iiif;
pub mod item;
pub mod vocabulary;
