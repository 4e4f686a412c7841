pub mod compose;
pub mod discover;
pub mod document;
pub mod io;
pub mod layout;
pub mod natural;
mod options;
mod summary;
mod types;

pub use compose::normalize;
pub use discover::find_images;
pub use document::assemble_document;
pub use io::{
    export_slides, generate_pdf, load_image, normalize_all, normalize_all_with_progress,
    read_dimensions, save_pdf,
};
pub use layout::{CanvasSpec, CropWindow, Placement, fit};
pub use natural::{NaturalKey, natural_cmp, sort_natural, sort_paths};
pub use options::*;
pub use summary::{CarouselSummary, plan};
pub use types::*;
