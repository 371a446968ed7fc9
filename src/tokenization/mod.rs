//! Text preparation shared by the feature extractors

pub mod hash;
pub mod normalize;
pub mod script;

pub use hash::{bucket, hash32};
pub use normalize::{
    clean_and_lower_text, truncate_to_valid_byte_length, valid_utf8_length,
    DEFAULT_MAX_INPUT_BYTES,
};
pub use script::{dominant_script, RelevantScript, UlScript};
