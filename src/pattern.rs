use std::cmp::Ordering;

use itertools::izip;

use crate::PatchError;

/// Mask byte meaning "every bit of this position must match". Any other
/// mask value selects the bits compared during a scan; patch application
/// recognizes only this value (see [`crate::search_replace`]).
pub const MASK_EXACT: u8 = 0xff;

/// Compares `needle` against `window` under an optional per-byte mask.
///
/// Returns `Ordering::Equal` when `(window[i] & mask[i]) == (needle[i] &
/// mask[i])` holds at every position (plain byte equality when `mask` is
/// `None`), otherwise the ordering of the first differing masked byte.
/// Callers only rely on equal vs. not-equal. Inputs must be of equal
/// length; comparison never runs past the shortest one.
pub fn masked_cmp(needle: &[u8], window: &[u8], mask: Option<&[u8]>) -> Ordering {
    match mask {
        Some(mask) => izip!(needle, window, mask)
            .map(|(&n, &w, &m)| (n & m).cmp(&(w & m)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal),
        None => needle.cmp(window),
    }
}

/// A fixed-length byte needle paired with an equal-length mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    bytes: Vec<u8>,
    mask: Vec<u8>,
}

impl Pattern {
    pub fn new(bytes: Vec<u8>, mask: Vec<u8>) -> Result<Self, PatchError> {
        if bytes.len() != mask.len() {
            return Err(PatchError::MaskLength {
                bytes: bytes.len(),
                mask: mask.len(),
            });
        }
        Ok(Self { bytes, mask })
    }

    /// A pattern with no don't-care positions.
    pub fn exact(bytes: Vec<u8>) -> Self {
        let mask = vec![MASK_EXACT; bytes.len()];
        Self { bytes, mask }
    }

    /// Parses an IDA-style signature string, e.g. `"DE AD ?? EF"`, where
    /// `??` marks a don't-care byte.
    pub fn from_ida(str: &str) -> Result<Self, PatchError> {
        let (bytes, mask) = str
            .split_whitespace()
            .map(|tok| match tok {
                "??" => Ok((0x00, 0x00)),
                hex => Ok((u8::from_str_radix(hex, 16)?, MASK_EXACT)),
            })
            .collect::<Result<Vec<(u8, u8)>, PatchError>>()?
            .into_iter()
            .unzip();

        Ok(Self { bytes, mask })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    pub fn is_matching(&self, window: &[u8]) -> bool {
        window.len() >= self.len()
            && masked_cmp(&self.bytes, &window[..self.len()], Some(&self.mask)).is_eq()
    }

    /// Scans `image` for the first window matching this pattern, checking
    /// candidate offsets `start, start + stride, ...`.
    ///
    /// A window whose last byte would be the image's final byte is never
    /// examined; the strict `offset + len < image.len()` bound is kept for
    /// compatibility with existing patch tooling. A zero stride or an empty
    /// pattern finds nothing.
    pub fn scan(&self, image: &[u8], start: usize, stride: usize) -> Option<usize> {
        if stride == 0 || self.is_empty() {
            return None;
        }

        let mut offset = start;
        while offset + self.len() < image.len() {
            if self.is_matching(&image[offset..offset + self.len()]) {
                return Some(offset);
            }
            offset += stride;
        }
        None
    }

    /// Iterates all non-overlapping matches in `image` from `start`.
    pub fn matches<'a>(&'a self, image: &'a [u8], start: usize, stride: usize) -> Matches<'a> {
        Matches {
            pattern: self,
            image,
            pos: start,
            stride,
        }
    }
}

pub struct Matches<'a> {
    pattern: &'a Pattern,
    image: &'a [u8],
    pos: usize,
    stride: usize,
}

impl Iterator for Matches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let found = self.pattern.scan(self.image, self.pos, self.stride)?;
        // resume past the matched window so matches never overlap
        self.pos = found + self.pattern.len();
        Some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_cmp() {
        assert_eq!(
            Ordering::Equal,
            masked_cmp(&[0x11, 0x22], &[0x11, 0x22], None)
        );
        assert_ne!(
            Ordering::Equal,
            masked_cmp(&[0x11, 0x22], &[0x11, 0x23], None)
        );
        // masked-out bits are ignored on both sides
        assert_eq!(
            Ordering::Equal,
            masked_cmp(&[0x1f, 0x22], &[0x1a, 0x22], Some(&[0xf0, 0xff]))
        );
        assert_eq!(
            Ordering::Equal,
            masked_cmp(&[0x11, 0x22], &[0x44, 0x55], Some(&[0x00, 0x00]))
        );
        // all-ones mask reduces to byte equality
        assert_eq!(
            masked_cmp(&[0x11, 0x22], &[0x11, 0x23], None),
            masked_cmp(&[0x11, 0x22], &[0x11, 0x23], Some(&[0xff, 0xff]))
        );
        // sign reflects the first differing masked byte
        assert_eq!(
            Ordering::Less,
            masked_cmp(&[0x10, 0x99], &[0x20, 0x00], Some(&[0xff, 0xff]))
        );
        assert_eq!(
            Ordering::Greater,
            masked_cmp(&[0x20, 0x00], &[0x10, 0x99], Some(&[0xff, 0xff]))
        );
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        assert!(matches!(
            Pattern::new(vec![0x11, 0x22], vec![0xff]),
            Err(PatchError::MaskLength { bytes: 2, mask: 1 })
        ));
    }

    #[test]
    fn test_str() {
        assert_eq!(
            Pattern::exact(vec![0x11, 0x22, 0x33]),
            Pattern::from_ida("11 22 33").unwrap()
        );
        assert_eq!(
            Pattern::new(vec![0x11, 0x00, 0x33], vec![0xff, 0x00, 0xff]).unwrap(),
            Pattern::from_ida("11 ?? 33").unwrap()
        );
        assert!(Pattern::from_ida("11 zz 33").is_err());
    }

    #[test]
    fn test_matching() {
        assert_eq!(
            true,
            Pattern::from_ida("11 ?? 22")
                .unwrap()
                .is_matching(&[0x11, 0x44, 0x22])
        );
        assert_eq!(
            false,
            Pattern::from_ida("11 ?? 22")
                .unwrap()
                .is_matching(&[0x11, 0x44, 0x00])
        );
        assert_eq!(
            false,
            Pattern::from_ida("11 ?? 22").unwrap().is_matching(&[0x11])
        );
        // bit-level mask: only the high nibble must agree
        assert_eq!(
            true,
            Pattern::new(vec![0x40], vec![0xf0])
                .unwrap()
                .is_matching(&[0x4c])
        );
    }

    #[test]
    fn test_scan_finds_first_match() {
        let haystack = &[0x00, 0x00, 0x11, 0x22, 0x33, 0x00, 0x00, 0x00];
        let pat = Pattern::from_ida("11 ?? 33").unwrap();
        assert_eq!(Some(2), pat.scan(haystack, 0, 1));
        assert_eq!(Some(2), pat.scan(haystack, 2, 2));
        // odd stride never lands on the even match offset
        assert_eq!(None, pat.scan(haystack, 1, 2));
        assert_eq!(None, pat.scan(haystack, 5, 1));
    }

    #[test]
    fn test_scan_match_at_offset_zero() {
        let haystack = &[0x11, 0x22, 0x33, 0x00];
        let pat = Pattern::from_ida("11 22 33").unwrap();
        assert_eq!(Some(0), pat.scan(haystack, 0, 1));
    }

    #[test]
    fn test_scan_excludes_final_byte_window() {
        // the window ending on the image's last byte is out of range
        let haystack = &[0x00, 0x11, 0x22, 0x33];
        let pat = Pattern::from_ida("11 22 33").unwrap();
        assert_eq!(None, pat.scan(haystack, 0, 1));
        // one trailing byte brings it back in range
        let haystack = &[0x00, 0x11, 0x22, 0x33, 0x00];
        assert_eq!(Some(1), pat.scan(haystack, 0, 1));
    }

    #[test]
    fn test_scan_degenerate_inputs() {
        let haystack = &[0x11, 0x22, 0x33, 0x00];
        let pat = Pattern::from_ida("11 22").unwrap();
        assert_eq!(None, pat.scan(haystack, 0, 0));
        assert_eq!(None, pat.scan(haystack, 100, 1));
        assert_eq!(None, Pattern::exact(vec![]).scan(haystack, 0, 1));
    }

    #[test]
    fn test_find_all() {
        let haystack = &[
            0x11, 0x22, 0x33, 0x00, 0x00, 0x11, 0x22, 0x33, 0x11, 0x00, 0x33,
        ];
        let pat = Pattern::from_ida("11 ?? 33").unwrap();
        // the candidate at 8 ends on the final byte, so only two matches
        assert_eq!(
            vec![0, 5],
            pat.matches(haystack, 0, 1).collect::<Vec<_>>()
        );
        assert_eq!(
            vec![5],
            pat.matches(haystack, 1, 1).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_find_all_non_overlapping() {
        let haystack = &[0x11, 0x11, 0x11, 0x11, 0x11, 0x00];
        let pat = Pattern::from_ida("11 11").unwrap();
        assert_eq!(
            vec![0, 2],
            pat.matches(haystack, 0, 1).collect::<Vec<_>>()
        );
    }
}
