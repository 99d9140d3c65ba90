//! Supported language variants and their native inference ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language target the synthesis models can be loaded for.
///
/// Each variant maps to a subfolder of the model source tree
/// (`yue/`, `zh/`, `en/`) containing that variant's asset set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageVariant {
    #[serde(rename = "yue")]
    Cantonese,
    #[serde(rename = "zh")]
    Mandarin,
    #[serde(rename = "en")]
    English,
}

/// All variants, in the order the reference deployment presents them.
pub const ALL_VARIANTS: [LanguageVariant; 3] = [
    LanguageVariant::Cantonese,
    LanguageVariant::Mandarin,
    LanguageVariant::English,
];

impl LanguageVariant {
    /// Name of this variant's subfolder under the model source root.
    pub fn dir_name(self) -> &'static str {
        match self {
            LanguageVariant::Cantonese => "yue",
            LanguageVariant::Mandarin => "zh",
            LanguageVariant::English => "en",
        }
    }

    /// The language id passed to the native conditioning and inference calls.
    ///
    /// This is an explicit table, not something derived from the variant:
    /// Cantonese and English intentionally share id 1 while Mandarin uses 0.
    /// The asymmetry matches the deployed native library and must not be
    /// regularized without confirming intent on that side.
    pub fn inference_lang_id(self) -> u64 {
        match self {
            LanguageVariant::Mandarin => 0,
            LanguageVariant::Cantonese => 1,
            LanguageVariant::English => 1,
        }
    }
}

impl fmt::Display for LanguageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandarin_uses_lang_id_zero() {
        assert_eq!(LanguageVariant::Mandarin.inference_lang_id(), 0);
    }

    #[test]
    fn cantonese_and_english_share_lang_id_one() {
        assert_eq!(LanguageVariant::Cantonese.inference_lang_id(), 1);
        assert_eq!(LanguageVariant::English.inference_lang_id(), 1);
    }

    #[test]
    fn dir_names_are_lowercase_codes() {
        assert_eq!(LanguageVariant::Cantonese.dir_name(), "yue");
        assert_eq!(LanguageVariant::Mandarin.dir_name(), "zh");
        assert_eq!(LanguageVariant::English.dir_name(), "en");
    }

    #[test]
    fn serde_uses_dir_names() {
        let json = serde_json::to_string(&LanguageVariant::Cantonese).unwrap();
        assert_eq!(json, "\"yue\"");
        let back: LanguageVariant = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, LanguageVariant::English);
    }
}
