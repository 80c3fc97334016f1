pub mod classifier;
pub mod filter;

pub use classifier::{classify_image, classify_text, encode_image_payload, image_signature};
pub use filter::SearchFilter;
