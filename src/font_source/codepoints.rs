//! Codepoint subset filtering
//!
//! A subset is written as comma-separated singletons or inclusive ranges,
//! e.g. `0x20-0x7e,0xa0-0x17f,0x20ac`. Numbers may be hexadecimal (`0x`)
//! or decimal. An empty specification selects every codepoint.

use crate::core::errors::ConfigError;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodepointSubset {
    ranges: Vec<RangeInclusive<u32>>,
}

impl CodepointSubset {
    /// A subset containing every codepoint
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.is_all() || self.ranges.iter().any(|range| range.contains(&codepoint))
    }
}

impl FromStr for CodepointSubset {
    type Err = ConfigError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for token in spec.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            let malformed = || ConfigError::MalformedCodepoints(token.to_string());
            let range = match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_number(start).ok_or_else(malformed)?;
                    let end = parse_number(end).ok_or_else(malformed)?;
                    if start > end {
                        return Err(malformed());
                    }
                    start..=end
                }
                None => {
                    let value = parse_number(token).ok_or_else(malformed)?;
                    value..=value
                }
            };
            ranges.push(range);
        }
        Ok(Self { ranges })
    }
}

fn parse_number(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}
