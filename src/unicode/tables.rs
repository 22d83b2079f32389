//! Decomposition overrides and anchor exclusions
//!
//! The standard Unicode mappings describe how characters are composed
//! abstractly. Pixel fonts often draw them differently: dotless bases under
//! accents, apostrophe-like carons, or Greek breathing marks fused with
//! accents. These tables record how such glyphs are actually built.

/// Decomposition override for a codepoint.
///
/// `Some("")` marks a codepoint that must never be decomposed.
pub fn custom_decomposition(codepoint: u32) -> Option<&'static str> {
    let sequence = match codepoint {
        0x69 => "0131 0307",
        0x6a => "0237 0307",
        0xec => "0131 0300",
        0xed => "0131 0301",
        0xee => "0131 0302",
        0xef => "0131 0308",
        0x10f => "0064 02bc",
        0x122 => "0047 0326",
        0x123 => "0067 02bb",
        0x129 => "0131 0303",
        0x12b => "0131 0304",
        0x12d => "0131 0306",
        0x135 => "0237 0302",
        0x136 => "004b 0326",
        0x137 => "006b 0326",
        0x13b => "004c 0326",
        0x13c => "006c 0326",
        0x13d => "004c 02bc",
        0x13e => "006c 02bc",
        0x145 => "004e 0326",
        0x146 => "006e 0326",
        0x156 => "0052 0326",
        0x157 => "0072 0326",
        0x165 => "0074 02bc",
        0x17f => "",
        0x1d0 => "0131 030c",
        0x1f0 => "0237 030c",
        0x209 => "0131 030f",
        0x20b => "0131 0311",
        0x385 => "0308 0301",
        0x457 => "0131 0308",
        0x1e06 => "0042 0331",
        0x1e07 => "0062 0331",
        0x1e0e => "0044 0331",
        0x1e0f => "0064 0331",
        0x1e34 => "004b 0331",
        0x1e35 => "006b 0331",
        0x1e3a => "004c 0331",
        0x1e3b => "006c 0331",
        0x1e48 => "004e 0331",
        0x1e49 => "006e 0331",
        0x1e5e => "0052 0331",
        0x1e5f => "0072 0331",
        0x1e6e => "0054 0331",
        0x1e6f => "0074 0331",
        0x1e94 => "005a 0331",
        0x1e95 => "007a 0331",
        0x1ec9 => "0131 0309",
        0x1f02 => "03b1 0313 0300",
        0x1f03 => "03b1 0314 0300",
        0x1f04 => "03b1 0313 0301",
        0x1f05 => "03b1 0314 0301",
        0x1f0a => "0391 0313 0300",
        0x1f0b => "0391 0314 0300",
        0x1f0c => "0391 0313 0301",
        0x1f0d => "0391 0314 0301",
        0x1f12 => "03b5 0313 0300",
        0x1f13 => "03b5 0314 0300",
        0x1f14 => "03b5 0313 0301",
        0x1f15 => "03b5 0314 0301",
        0x1f1a => "0395 0313 0300",
        0x1f1b => "0395 0314 0300",
        0x1f1c => "0395 0313 0301",
        0x1f1d => "0395 0314 0301",
        0x1f22 => "03b7 0313 0300",
        0x1f23 => "03b7 0314 0300",
        0x1f24 => "03b7 0313 0301",
        0x1f25 => "03b7 0314 0301",
        0x1f2a => "0397 0313 0300",
        0x1f2b => "0397 0314 0300",
        0x1f2c => "0397 0313 0301",
        0x1f2d => "0397 0314 0301",
        0x1f32 => "03b9 0313 0300",
        0x1f33 => "03b9 0314 0300",
        0x1f34 => "03b9 0313 0301",
        0x1f35 => "03b9 0314 0301",
        0x1f3a => "0399 0313 0300",
        0x1f3b => "0399 0314 0300",
        0x1f3c => "0399 0313 0301",
        0x1f3d => "0399 0314 0301",
        0x1f42 => "03bf 0313 0300",
        0x1f43 => "03bf 0314 0300",
        0x1f44 => "03bf 0313 0301",
        0x1f45 => "03bf 0314 0301",
        0x1f4a => "039f 0313 0300",
        0x1f4b => "039f 0314 0300",
        0x1f4c => "039f 0313 0301",
        0x1f4d => "039f 0314 0301",
        0x1f52 => "03c5 0313 0300",
        0x1f53 => "03c5 0314 0300",
        0x1f54 => "03c5 0313 0301",
        0x1f55 => "03c5 0314 0301",
        0x1f5b => "03a5 0314 0300",
        0x1f5d => "03a5 0314 0301",
        0x1f62 => "03c9 0313 0300",
        0x1f63 => "03c9 0314 0300",
        0x1f64 => "03c9 0313 0301",
        0x1f65 => "03c9 0314 0301",
        0x1f6a => "03a9 0313 0300",
        0x1f6b => "03a9 0314 0300",
        0x1f6c => "03a9 0313 0301",
        0x1f6d => "03a9 0314 0301",
        0x1fbe => "037a",
        0x1fc1 => "0308 0342",
        0x1fed => "0308 0300",
        0x1fee => "0308 0301",
        0x1ff9 => "039f 0301",
        0x2116 => "004e 00ba",
        _ => return None,
    };
    Some(sequence)
}

/// Composites whose parts are visually fused; they are assembled from
/// components but never contribute anchors.
pub fn is_fused_composite(codepoint: u32) -> bool {
    matches!(
        codepoint,
        0x3b6 | 0x3b8 | 0x3b9 | 0x3ba | 0x3bc | 0x3be | 0x3bf
            | 0x1f02..=0x1f05
            | 0x1f08..=0x1f0d
            | 0x1f12..=0x1f15
            | 0x1f18..=0x1f1d
            | 0x1f22..=0x1f25
            | 0x1f28..=0x1f2d
            | 0x1f32..=0x1f35
            | 0x1f38..=0x1f3d
            | 0x1f42..=0x1f45
            | 0x1f48..=0x1f4d
            | 0x1f52..=0x1f55
            | 0x1f59
            | 0x1f5b
            | 0x1f5c
            | 0x1f62..=0x1f65
            | 0x1f68..=0x1f6d
            | 0x1f82..=0x1f85
            | 0x1f88..=0x1f8d
            | 0x1f92..=0x1f95
            | 0x1f98..=0x1f9d
            | 0x1fa2..=0x1fa5
            | 0x1fa8..=0x1fad
            | 0x1fba
            | 0x1fbb
            | 0x1fc1
            | 0x1fc8..=0x1fcb
            | 0x1fcd..=0x1fcf
            | 0x1fda
            | 0x1fdb
            | 0x1fdd..=0x1fdf
            | 0x1fea..=0x1fee
            | 0x1ff8..=0x1ffb
    )
}
