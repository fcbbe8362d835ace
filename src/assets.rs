use crate::controller::SlotVisual;

/// Convention-based image paths for slot visuals.
///
/// The controller never looks at paths; surfaces that render images do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssetScheme {
    /// Directory prefix, without trailing slash.
    pub root: String,

    /// File extension including the dot.
    pub extension: String,

    pub blank_stem: String,
    pub valid_target_stem: String,
}

impl Default for AssetScheme {
    fn default() -> Self {
        Self {
            root: "img/webp".to_owned(),
            extension: ".webp".to_owned(),
            blank_stem: "blank".to_owned(),
            valid_target_stem: "blank_valid".to_owned(),
        }
    }
}

impl AssetScheme {
    /// `Card("7:H")` → `img/webp/7H.webp`, blanks → `img/webp/blank.webp`.
    pub fn path_for(&self, visual: &SlotVisual) -> String {
        let stem = match visual {
            SlotVisual::Card(token) if !token.is_blank() => token.as_str().replace(':', ""),
            SlotVisual::Card(_) | SlotVisual::Blank => self.blank_stem.clone(),
            SlotVisual::ValidTarget => self.valid_target_stem.clone(),
        };
        format!("{}/{stem}{}", self.root, self.extension)
    }
}
