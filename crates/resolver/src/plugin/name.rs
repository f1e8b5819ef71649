//! Plugin names known to the player build.
//!
//! The set is closed: a plugin that the player bundle does not ship cannot be
//! requested, so names are an enum rather than free-form strings. The string
//! form is the snake_case name used in settings and URL parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PluginError;

/// A player plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginName {
    AudioSelector,
    BigMuteButton,
    BottomGear,
    Cc,
    ClickToPause,
    Clips,
    ClapprStats,
    ContextMenu,
    DvrControls,
    ErrorScreen,
    ExampleUi,
    Favicon,
    MediaControl,
    NerdStats,
    LevelSelector,
    Multicamera,
    Pip,
    PlaybackRate,
    Poster,
    SeekTime,
    Share,
    Spinner,
    SourceController,
    Thumbnails,
    VolumeFade,
}

impl PluginName {
    /// Every plugin known to this build.
    pub const ALL: &'static [PluginName] = &[
        PluginName::AudioSelector,
        PluginName::BigMuteButton,
        PluginName::BottomGear,
        PluginName::Cc,
        PluginName::ClickToPause,
        PluginName::Clips,
        PluginName::ClapprStats,
        PluginName::ContextMenu,
        PluginName::DvrControls,
        PluginName::ErrorScreen,
        PluginName::ExampleUi,
        PluginName::Favicon,
        PluginName::MediaControl,
        PluginName::NerdStats,
        PluginName::LevelSelector,
        PluginName::Multicamera,
        PluginName::Pip,
        PluginName::PlaybackRate,
        PluginName::Poster,
        PluginName::SeekTime,
        PluginName::Share,
        PluginName::Spinner,
        PluginName::SourceController,
        PluginName::Thumbnails,
        PluginName::VolumeFade,
    ];

    /// The settings/URL form of the name.
    pub fn as_str(self) -> &'static str {
        match self {
            PluginName::AudioSelector => "audio_selector",
            PluginName::BigMuteButton => "big_mute_button",
            PluginName::BottomGear => "bottom_gear",
            PluginName::Cc => "cc",
            PluginName::ClickToPause => "click_to_pause",
            PluginName::Clips => "clips",
            PluginName::ClapprStats => "clappr_stats",
            PluginName::ContextMenu => "context_menu",
            PluginName::DvrControls => "dvr_controls",
            PluginName::ErrorScreen => "error_screen",
            PluginName::ExampleUi => "example_ui",
            PluginName::Favicon => "favicon",
            PluginName::MediaControl => "media_control",
            PluginName::NerdStats => "nerd_stats",
            PluginName::LevelSelector => "level_selector",
            PluginName::Multicamera => "multicamera",
            PluginName::Pip => "pip",
            PluginName::PlaybackRate => "playback_rate",
            PluginName::Poster => "poster",
            PluginName::SeekTime => "seek_time",
            PluginName::Share => "share",
            PluginName::Spinner => "spinner",
            PluginName::SourceController => "source_controller",
            PluginName::Thumbnails => "thumbnails",
            PluginName::VolumeFade => "volume_fade",
        }
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluginName {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PluginName::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PluginError::unknown_plugin(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn every_name_parses_back() {
        for plugin in PluginName::ALL {
            assert_eq!(plugin.as_str().parse::<PluginName>().unwrap(), *plugin);
        }
    }

    #[test]
    fn reject_unknown_name() {
        let err = "logo".parse::<PluginName>().unwrap_err();
        assert_eq!(err, PluginError::unknown_plugin("logo"));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("Media_Control".parse::<PluginName>().is_err());
    }

    #[test]
    fn serde_uses_settings_form() {
        let json = serde_json::to_string(&PluginName::ExampleUi).unwrap();
        assert_eq!(json, "\"example_ui\"");
        let parsed: PluginName = serde_json::from_str("\"nerd_stats\"").unwrap();
        assert_eq!(parsed, PluginName::NerdStats);
    }
}
