use crate::assets::AssetScheme;

/// Options for [`super::DragController`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerOptions {
    /// If true, replace the platform drag image with a transparent 1×1 placeholder on drag start,
    /// so only our clone follows the pointer.
    pub suppress_native_ghost: bool,

    /// If true, the source slot shows a blank while its card is in flight.
    ///
    /// Every path that does not end in a swap request restores it.
    pub optimistic_source_blank: bool,

    /// If true, clicking one card and then another requests a swap (method `click`).
    pub click_to_swap: bool,

    /// If true, starting a drag drops any click selection and tells the server.
    pub clear_selection_on_drag_start: bool,

    /// Image paths handed to surfaces that render images.
    pub assets: AssetScheme,

    /// If true, record transitions and absorbed failures in a small ring buffer
    /// (see [`super::DragController::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            suppress_native_ghost: true,
            optimistic_source_blank: false,
            click_to_swap: true,
            clear_selection_on_drag_start: true,
            assets: AssetScheme::default(),
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let opt: ControllerOptions =
            serde_json::from_str(r#"{"optimistic_source_blank": true}"#).expect("valid json");
        assert_eq!(
            opt,
            ControllerOptions {
                optimistic_source_blank: true,
                ..Default::default()
            }
        );
    }
}
