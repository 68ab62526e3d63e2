// Pure transform steps
pub mod band;
pub mod binarize;
pub mod dct;
pub mod distance;
pub mod encode;

// Pipeline and collaborator boundary
pub mod batch_processor;
pub mod intensity;
pub mod perceptual;
pub mod types;

// Reexport core functionality
pub use band::{crop_dct2d, normalize};
pub use batch_processor::{process_image_batch, process_single_image};
pub use binarize::binarize;
pub use dct::{dct1d, dct2d};
pub use distance::{calc_distance, calc_distance_with_group};
pub use encode::encode_bits;
pub use intensity::{preview_image, IntensitySource};
pub use perceptual::{
    compute_fingerprint, phash_from_file, phash_from_img, phash_from_memory, PerceptualHasher,
};
pub use types::{Fingerprint, ImageHashResult};
