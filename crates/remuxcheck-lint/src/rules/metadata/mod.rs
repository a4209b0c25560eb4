//! Metadata rules.
//!
//! Rules over the container as a whole: movie name, external ids, filename,
//! track languages, muxing mode, mkvtoolnix version and default flags.

pub mod filename;
pub mod mkvtoolnix;
pub mod naming;
pub mod tracks;


use crate::rules::CheckRule;

pub use filename::{format_filename_title, FilenameRule, ReleaseName};
pub use mkvtoolnix::{MkvtoolnixVersion, MkvtoolnixVersionRule};
pub use naming::{ExternalIdsRule, MovieNameFormatRule};
pub use tracks::{DefaultFlagRule, MuxingModeRule, TracksHaveLanguageRule, VideoLanguageRule};

/// Returns all metadata rules, in report order.
pub fn all_rules() -> Vec<Box<dyn CheckRule>> {
    vec![
        Box::new(MovieNameFormatRule),
        Box::new(ExternalIdsRule),
        Box::new(FilenameRule),
        Box::new(TracksHaveLanguageRule),
        Box::new(VideoLanguageRule),
        Box::new(MuxingModeRule),
        Box::new(MkvtoolnixVersionRule),
        Box::new(DefaultFlagRule),
    ]
}
