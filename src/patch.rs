use tracing::trace;

use crate::{pattern::Pattern, PatchError, MASK_EXACT};

/// Returns the offset of the first `needle` match at or after `start`, or
/// `None` when the image holds no further match.
pub fn search(image: &[u8], needle: &Pattern, start: usize, stride: usize) -> Option<usize> {
    needle.matches(image, start, stride).next()
}

/// Rewrites every `needle` match in `image` with `patch`.
///
/// Within each matched window only the positions whose patch mask byte is
/// [`MASK_EXACT`] are overwritten; the rest keep the original content.
/// Returns the total number of bytes written across all matches. The image
/// is mutated in place as matches are found, with no rollback: an abort
/// partway through leaves earlier matches patched and later ones untouched.
pub fn search_replace(
    image: &mut [u8],
    needle: &Pattern,
    patch: &Pattern,
    stride: usize,
) -> Result<usize, PatchError> {
    if needle.len() != patch.len() {
        return Err(PatchError::PatchLength {
            needle: needle.len(),
            patch: patch.len(),
        });
    }

    let mut patched = 0;
    let mut pos = 0;
    while let Some(found) = needle.scan(image, pos, stride) {
        for (j, (&byte, &mask)) in patch.bytes().iter().zip(patch.mask()).enumerate() {
            if mask == MASK_EXACT {
                image[found + j] = byte;
                patched += 1;
            }
        }
        trace!(offset = found, len = needle.len(), "patched match");
        pos = found + needle.len();
    }
    Ok(patched)
}
