pub mod hex;
pub mod image;
pub mod patch;
pub mod pattern;
pub mod wildcard;

pub use image::Image;
pub use patch::{search, search_replace};
pub use pattern::{masked_cmp, Matches, Pattern, MASK_EXACT};

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("Mask length {mask} does not match pattern length {bytes}")]
    MaskLength { bytes: usize, mask: usize },

    #[error("Patch length {patch} does not match needle length {needle}")]
    PatchLength { needle: usize, patch: usize },

    #[error("Access of {len} bytes at offset {offset} is out of bounds")]
    OutOfBounds { offset: usize, len: usize },

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Io error {0}")]
    Io(#[from] std::io::Error),

    #[error("Try from slice failed {0}")]
    TryFromSlice(#[from] std::array::TryFromSliceError),

    #[error("Parse int failed {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
