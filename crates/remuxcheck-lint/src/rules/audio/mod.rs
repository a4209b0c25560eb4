//! Audio rules.

pub mod conversions;
pub mod people;
pub mod titles;

#[cfg(test)]
mod tests;

use crate::rules::CheckRule;

pub use conversions::{conversion_target, AudioConversionsRule, COMMENTARY_BIT_RATE};
pub use people::{descriptive_segment, AudioPeopleRule, AudioSpellingRule};
pub use titles::{expected_flac_title, AudioTrackNamesRule, FlacTitlesRule};

/// Returns all audio rules, in report order.
pub fn all_rules() -> Vec<Box<dyn CheckRule>> {
    vec![
        Box::new(AudioTrackNamesRule),
        Box::new(AudioConversionsRule),
        Box::new(FlacTitlesRule),
        Box::new(AudioPeopleRule),
        Box::new(AudioSpellingRule),
    ]
}
