mod events;
mod job;
mod report;
mod sources;

pub use events::{EventLog, ExtractEvent, ExtractObserver, IgnoreEvents};
pub use job::ExtractionJob;
pub use report::{ExtractReport, ItemFailure};
pub use sources::{
    Atlas, ExtractPlan, ExtractSettings, PreparedTexture, SpriteSource, TextureArray,
    TextureGroup, TextureSheet, extract_atlases, extract_sprites, extract_texture_arrays,
    extract_textures, file_stem, group_by_texture, prepare_texture,
};
