use std::collections::BTreeMap;

use foundation::color::Rgb;
use serde::{Deserialize, Serialize};

/// Fill color per ISO code, with a fallback for unmapped codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillPalette {
    pub entries: BTreeMap<String, Rgb>,
    pub fallback: Rgb,
}

impl FillPalette {
    pub fn color_for(&self, code: &str) -> Rgb {
        self.entries.get(code).copied().unwrap_or(self.fallback)
    }
}

impl Default for FillPalette {
    fn default() -> Self {
        let entries = [
            ("AU", 0xFF7F0E),
            ("BR", 0x2CA02C),
            ("CN", 0xD62728),
            ("FR", 0x9467BD),
            ("US", 0x1F77B4),
        ]
        .into_iter()
        .map(|(code, hex)| (code.to_string(), Rgb::from_hex(hex)))
        .collect();
        Self {
            entries,
            fallback: Rgb::from_hex(0x808080),
        }
    }
}
