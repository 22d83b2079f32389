//! Combining mark descriptors
//!
//! Every codepoint listed here is a non-spacing combining mark. Marks that
//! have a spacing modifier equivalent can borrow that glyph's shape when the
//! font has no bitmap of its own for the mark.

use std::fmt;
use std::str::FromStr;

/// Where a mark attaches to its base glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnchorRole {
    Top,
    TopShifted,
    TopRight,
    Bottom,
    BottomShifted,
    Cedilla,
    Ogonek,
    Horn,
    Overlay,
}

impl AnchorRole {
    pub const ALL: [AnchorRole; 9] = [
        AnchorRole::Top,
        AnchorRole::TopShifted,
        AnchorRole::TopRight,
        AnchorRole::Bottom,
        AnchorRole::BottomShifted,
        AnchorRole::Cedilla,
        AnchorRole::Ogonek,
        AnchorRole::Horn,
        AnchorRole::Overlay,
    ];

    /// Anchor name as written to UFO glyphs and feature code
    pub fn as_str(self) -> &'static str {
        match self {
            AnchorRole::Top => "top",
            AnchorRole::TopShifted => "top.shifted",
            AnchorRole::TopRight => "top.right",
            AnchorRole::Bottom => "bottom",
            AnchorRole::BottomShifted => "bottom.shifted",
            AnchorRole::Cedilla => "cedilla",
            AnchorRole::Ogonek => "ogonek",
            AnchorRole::Horn => "horn",
            AnchorRole::Overlay => "overlay",
        }
    }

    /// Marks with these roles hang below the base, so they attach at the
    /// opposite edge of their bitmap
    pub fn attaches_at_far_edge(self) -> bool {
        matches!(
            self,
            AnchorRole::Bottom | AnchorRole::Cedilla | AnchorRole::Ogonek
        )
    }

    /// Member of the `@topmarks` class
    pub fn is_top(self) -> bool {
        matches!(self, AnchorRole::Top | AnchorRole::TopShifted)
    }
}

impl fmt::Display for AnchorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnchorRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown anchor role '{s}'"))
    }
}

/// Static description of one combining mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombiningMark {
    pub codepoint: u32,
    pub display_name: &'static str,
    pub role: AnchorRole,
    /// Freestanding glyph with the same shape
    pub spacing_equivalent: Option<u32>,
}

const fn mark(
    codepoint: u32,
    display_name: &'static str,
    role: AnchorRole,
    spacing_equivalent: Option<u32>,
) -> CombiningMark {
    CombiningMark {
        codepoint,
        display_name,
        role,
        spacing_equivalent,
    }
}

use AnchorRole::*;

/// Sorted by codepoint
pub static COMBINING_MARKS: &[CombiningMark] = &[
    mark(0x300, "grave accent", Top, Some(0x2cb)),
    mark(0x301, "acute accent", TopShifted, Some(0x2ca)),
    mark(0x302, "circumflex accent", Top, Some(0x2c6)),
    mark(0x303, "tilde", TopShifted, Some(0x2dc)),
    mark(0x304, "macron", Top, Some(0x2c9)),
    mark(0x306, "breve", Top, Some(0x2d8)),
    mark(0x307, "dot above", Top, Some(0x2d9)),
    mark(0x308, "diaeresis", Top, Some(0xa8)),
    mark(0x309, "hook above", Top, None),
    mark(0x30a, "ring above", Top, Some(0x2da)),
    mark(0x30b, "double acute accent", TopShifted, Some(0x2dd)),
    mark(0x30c, "caron", Top, Some(0x2c7)),
    mark(0x30d, "vertical line above", Top, Some(0x2c8)),
    mark(0x30f, "double grave accent", Top, Some(0x2f5)),
    mark(0x311, "inverted breve", Top, Some(0x1aff)),
    mark(0x313, "comma above", Top, Some(0x2c)),
    mark(0x314, "reversed comma above", Top, None),
    mark(0x315, "comma above right", TopRight, Some(0x2c)),
    mark(0x31b, "horn", Horn, None),
    mark(0x323, "dot below", Bottom, Some(0x2d9)),
    mark(0x324, "diaeresis below", Bottom, Some(0xa8)),
    mark(0x325, "ring below", Bottom, Some(0x2da)),
    mark(0x326, "comma below", Bottom, Some(0x2c)),
    mark(0x327, "cedilla", Cedilla, Some(0xb8)),
    mark(0x328, "ogonek", Ogonek, Some(0x2db)),
    mark(0x32d, "circumflex accent below", Bottom, Some(0x2c6)),
    mark(0x32e, "breve below", Bottom, Some(0x2d8)),
    mark(0x32f, "inverted breve below", Bottom, Some(0x1aff)),
    mark(0x330, "tilde below", BottomShifted, Some(0x2dc)),
    mark(0x331, "macron below", Bottom, Some(0x2c9)),
    mark(0x332, "low line", Top, Some(0x5f)),
    mark(0x335, "short stroke overlay", Overlay, None),
    mark(0x342, "greek perispomeni", TopShifted, Some(0x2dc)),
    mark(0x343, "greek koronis", Top, Some(0x2c)),
    mark(0x344, "greek dialytika tonos", Top, Some(0xa8)),
    mark(0x345, "greek ypogegrammeni", Bottom, Some(0x37a)),
    mark(0x359, "asterisk below", Bottom, None),
    mark(0x35c, "double breve below", Bottom, None),
    mark(0x35f, "double macron below", Bottom, Some(0x2ed)),
    mark(0x1dc4, "macron acute", Top, None),
    mark(0x1dc5, "grave macron", Top, None),
    mark(0x1dc6, "macron grave", Top, None),
    mark(0x1dc7, "acute macron", Top, None),
    mark(0x1dca, "latin small letter r below", Bottom, None),
];

/// Look up the descriptor of a combining mark
pub fn combining_mark(codepoint: u32) -> Option<&'static CombiningMark> {
    COMBINING_MARKS
        .binary_search_by_key(&codepoint, |mark| mark.codepoint)
        .ok()
        .map(|index| &COMBINING_MARKS[index])
}

pub fn is_combining_mark(codepoint: u32) -> bool {
    combining_mark(codepoint).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        assert!(COMBINING_MARKS
            .windows(2)
            .all(|pair| pair[0].codepoint < pair[1].codepoint));
    }

    #[test]
    fn lookups() {
        let acute = combining_mark(0x301).unwrap();
        assert_eq!(acute.role, AnchorRole::TopShifted);
        assert_eq!(acute.spacing_equivalent, Some(0x2ca));
        assert!(combining_mark(0x41).is_none());
        assert!(is_combining_mark(0x1dca));
    }

    #[test]
    fn role_names_round_trip() {
        for role in AnchorRole::ALL {
            assert_eq!(role.as_str().parse::<AnchorRole>(), Ok(role));
        }
        assert!(AnchorRole::Cedilla.attaches_at_far_edge());
        assert!(!AnchorRole::BottomShifted.attaches_at_far_edge());
    }
}
