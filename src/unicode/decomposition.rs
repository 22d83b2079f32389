//! Decomposition resolution
//!
//! Maps a composite codepoint to the codepoints it is built from. Overrides
//! from [`custom_decomposition`] win over the Unicode Character Database.
//! Only canonical and `<compat>` mappings are used; every other tagged
//! compatibility mapping (`<font>`, `<circle>`, `<fraction>`, …) describes a
//! presentation form that cannot be rebuilt from plain parts.

use super::tables::custom_decomposition;
use unic_ucd_normal::{canonical_decomposition, compatibility_decomposition, DecompositionType};

const SPACE: u32 = 0x20;

/// Kind of a single-level Unicode decomposition mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionTag {
    Canonical,
    Compat,
    /// Any other compatibility tag
    Other,
}

/// A raw single-level decomposition mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDecomposition {
    pub tag: DecompositionTag,
    pub mapping: Vec<u32>,
}

/// Source of Unicode decomposition mappings
pub trait DecompositionSource {
    fn decomposition(&self, codepoint: u32) -> Option<RawDecomposition>;
}

/// Mappings from the Unicode Character Database
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeData;

impl DecompositionSource for UnicodeData {
    fn decomposition(&self, codepoint: u32) -> Option<RawDecomposition> {
        let ch = char::from_u32(codepoint)?;
        let (tag, mapping) = match DecompositionType::of(ch)? {
            DecompositionType::Canonical => (DecompositionTag::Canonical, canonical_decomposition(ch)?),
            DecompositionType::Compat => (DecompositionTag::Compat, compatibility_decomposition(ch)?),
            _ => (DecompositionTag::Other, compatibility_decomposition(ch).unwrap_or(&[])),
        };
        Some(RawDecomposition {
            tag,
            mapping: mapping.iter().map(|&c| c as u32).collect(),
        })
    }
}

type OverrideTable = fn(u32) -> Option<&'static str>;

/// Resolves composite codepoints into constituent codepoints
///
/// Stateless; every call recomputes from the static tables.
pub struct DecompositionResolver<S = UnicodeData> {
    overrides: OverrideTable,
    source: S,
}

impl Default for DecompositionResolver<UnicodeData> {
    fn default() -> Self {
        Self::new(custom_decomposition, UnicodeData)
    }
}

impl<S: DecompositionSource> DecompositionResolver<S> {
    pub fn new(overrides: OverrideTable, source: S) -> Self {
        Self { overrides, source }
    }

    /// Constituents of `codepoint` in order, or an empty list if the
    /// codepoint is atomic or must not be decomposed
    pub fn resolve(&self, codepoint: u32) -> Vec<u32> {
        let sequence = match (self.overrides)(codepoint) {
            Some(text) => parse_sequence(text),
            None => match self.source.decomposition(codepoint) {
                Some(RawDecomposition {
                    tag: DecompositionTag::Canonical | DecompositionTag::Compat,
                    mapping,
                }) => mapping,
                _ => Vec::new(),
            },
        };

        // Spacing accents are mapped as "SPACE + combining mark"; the space
        // contributes no ink.
        sequence.into_iter().filter(|&c| c != SPACE).collect()
    }
}

/// Parse whitespace-separated hex codepoints, skipping malformed entries
fn parse_sequence(text: &str) -> Vec<u32> {
    text.split_whitespace()
        .filter_map(|token| u32::from_str_radix(token, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeData(HashMap<u32, RawDecomposition>);

    impl DecompositionSource for FakeData {
        fn decomposition(&self, codepoint: u32) -> Option<RawDecomposition> {
            self.0.get(&codepoint).cloned()
        }
    }

    fn fake(entries: &[(u32, DecompositionTag, &[u32])]) -> FakeData {
        FakeData(
            entries
                .iter()
                .map(|&(cp, tag, mapping)| {
                    (cp, RawDecomposition { tag, mapping: mapping.to_vec() })
                })
                .collect(),
        )
    }

    fn overrides(codepoint: u32) -> Option<&'static str> {
        match codepoint {
            0xc1 => Some("0041 0301"),
            0x17f => Some(""),
            _ => None,
        }
    }

    #[test]
    fn override_wins_over_unicode_data() {
        let data = fake(&[(0xc1, DecompositionTag::Canonical, &[0x61, 0x301])]);
        let resolver = DecompositionResolver::new(overrides, data);
        assert_eq!(resolver.resolve(0xc1), vec![0x41, 0x301]);
    }

    #[test]
    fn empty_override_blocks_decomposition() {
        let data = fake(&[(0x17f, DecompositionTag::Compat, &[0x73])]);
        let resolver = DecompositionResolver::new(overrides, data);
        assert!(resolver.resolve(0x17f).is_empty());
    }

    #[test]
    fn compat_is_used_and_other_tags_are_not() {
        let data = fake(&[
            (0xb4, DecompositionTag::Compat, &[0x20, 0x301]),
            (0x2460, DecompositionTag::Other, &[0x31]),
        ]);
        let resolver = DecompositionResolver::new(|_| None, data);
        assert_eq!(resolver.resolve(0xb4), vec![0x301]);
        assert!(resolver.resolve(0x2460).is_empty());
        assert!(resolver.resolve(0x41).is_empty());
    }

    #[test]
    fn unicode_data_mappings() {
        let resolver = DecompositionResolver::default();
        assert_eq!(resolver.resolve(0xc1), vec![0x41, 0x301]);
        assert_eq!(resolver.resolve(0xed), vec![0x131, 0x301]);
        assert_eq!(resolver.resolve(0x1d5), vec![0xdc, 0x304]);
        assert_eq!(resolver.resolve(0xb4), vec![0x301]);
        // <font> and <circle> mappings are presentation forms
        assert!(resolver.resolve(0x2102).is_empty());
        assert!(resolver.resolve(0x2460).is_empty());
        assert!(resolver.resolve(0x41).is_empty());
    }
}
