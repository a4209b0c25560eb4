//! Typed MediaInfo section records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalizes a MediaInfo attribute name into a record key.
///
/// Trims, turns spaces into underscores, strips slashes, parentheses,
/// asterisks and commas, then lowercases: `"Channel(s)"` -> `"channels"`,
/// `"Bit rate"` -> `"bit_rate"`.
pub fn format_key(key: &str) -> String {
    key.trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| !matches!(c, '/' | '(' | ')' | '*' | ','))
        .collect::<String>()
        .to_lowercase()
}

/// Access shared by every stream record.
pub trait TrackFields {
    /// Value for a normalized key, typed fields and extras alike.
    fn get(&self, key: &str) -> Option<&str>;

    /// Stores a value under a normalized key.
    fn insert(&mut self, key: String, value: String);

    fn id(&self) -> Option<&str> {
        self.get("id")
    }

    fn title(&self) -> Option<&str> {
        self.get("title")
    }

    fn language(&self) -> Option<&str> {
        self.get("language")
    }

    fn muxing_mode(&self) -> Option<&str> {
        self.get("muxing_mode")
    }

    /// `default=yes`.
    fn is_default(&self) -> bool {
        self.get("default").is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
    }

    /// `forced=yes`.
    fn is_forced(&self) -> bool {
        self.get("forced").is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
    }

    /// `#<id>` when the stream has an ID, else its position in the section.
    fn section_id(&self, index: usize) -> String {
        match self.id() {
            Some(id) => format!("#{}", id.trim()),
            None => index.to_string(),
        }
    }
}

macro_rules! track_record {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )*
            /// Attributes without a typed field, keyed by normalized name.
            #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
            pub extra: BTreeMap<String, String>,
        }

        impl TrackFields for $name {
            fn get(&self, key: &str) -> Option<&str> {
                match key {
                    $(stringify!($field) => self.$field.as_deref(),)*
                    _ => self.extra.get(key).map(String::as_str),
                }
            }

            fn insert(&mut self, key: String, value: String) {
                match key.as_str() {
                    $(stringify!($field) => self.$field = Some(value),)*
                    _ => {
                        self.extra.insert(key, value);
                    }
                }
            }
        }
    };
}

track_record! {
    /// The container-level `General` section.
    GeneralInfo {
        id,
        unique_id,
        complete_name,
        format,
        movie_name,
        imdb,
        tmdb,
        writing_application,
        muxing_mode,
    }
}

track_record! {
    /// A `Video` section.
    VideoTrack {
        id,
        format,
        format_version,
        bit_rate,
        width,
        height,
        scan_type,
        frame_rate,
        display_aspect_ratio,
        title,
        language,
        default,
        forced,
        color_primaries,
        hdr_format,
        standard,
        muxing_mode,
    }
}

track_record! {
    /// An `Audio` section.
    AudioTrack {
        id,
        format,
        channels,
        sampling_rate,
        bit_rate,
        bit_depth,
        title,
        language,
        default,
        forced,
        muxing_mode,
    }
}

track_record! {
    /// A `Text` (subtitle) section.
    TextTrack {
        id,
        format,
        title,
        language,
        default,
        forced,
        muxing_mode,
    }
}

/// One title of a chapter, optionally tagged with a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterTitle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub title: String,
}

/// One chapter of a `Menu` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Timestamp, e.g. `00:05:12.345`.
    pub time: String,
    pub titles: Vec<ChapterTitle>,
    /// Per-title languages, parallel to `titles`.
    pub languages: Vec<Option<String>>,
}

impl Chapter {
    /// Creates a chapter from its titles, filling the parallel language list.
    pub fn new(time: impl Into<String>, titles: Vec<ChapterTitle>) -> Self {
        let languages = titles.iter().map(|t| t.language.clone()).collect();
        Self {
            time: time.into(),
            titles,
            languages,
        }
    }

    /// First title text, if any.
    pub fn first_title(&self) -> Option<&str> {
        self.titles.first().map(|t| t.title.as_str())
    }
}

/// All parsed MediaInfo sections, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfoReport {
    pub general: Vec<GeneralInfo>,
    pub video: Vec<VideoTrack>,
    pub audio: Vec<AudioTrack>,
    pub text: Vec<TextTrack>,
    /// One chapter list per `Menu` section.
    pub menu: Vec<Vec<Chapter>>,
}

impl MediaInfoReport {
    /// The first `General` section.
    pub fn general(&self) -> Option<&GeneralInfo> {
        self.general.first()
    }

    /// Every record with its section name and index, in section order.
    pub fn tracks(&self) -> Vec<(&'static str, usize, &dyn TrackFields)> {
        fn tagged<'a, T: TrackFields>(
            section: &'static str,
            records: &'a [T],
        ) -> impl Iterator<Item = (&'static str, usize, &'a dyn TrackFields)> + 'a {
            records
                .iter()
                .enumerate()
                .map(move |(i, record)| (section, i, record as &dyn TrackFields))
        }

        tagged("general", &self.general)
            .chain(tagged("video", &self.video))
            .chain(tagged("audio", &self.audio))
            .chain(tagged("text", &self.text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_key() {
        assert_eq!(format_key(" Channel(s) "), "channels");
        assert_eq!(format_key("Bit rate"), "bit_rate");
        assert_eq!(format_key("Color primaries"), "color_primaries");
        assert_eq!(format_key("Format/Info"), "formatinfo");
        assert_eq!(format_key("Codec ID/Hint, *raw*"), "codec_idhint_raw");
    }

    #[test]
    fn test_track_fields_typed_and_extra() {
        let mut track = AudioTrack::default();
        track.insert("title".to_string(), "Commentary".to_string());
        track.insert("compression_mode".to_string(), "Lossy".to_string());
        track.insert("default".to_string(), "Yes".to_string());

        assert_eq!(track.title.as_deref(), Some("Commentary"));
        assert_eq!(track.get("compression_mode"), Some("Lossy"));
        assert!(track.is_default());
        assert!(!track.is_forced());
        assert_eq!(track.section_id(3), "3");

        track.insert("id".to_string(), "2".to_string());
        assert_eq!(track.section_id(3), "#2");
    }

    #[test]
    fn test_chapter_languages_parallel_titles() {
        let chapter = Chapter::new(
            "00:00:00.000",
            vec![
                ChapterTitle {
                    language: Some("en".to_string()),
                    title: "Chapter 01".to_string(),
                },
                ChapterTitle {
                    language: None,
                    title: "Intro".to_string(),
                },
            ],
        );
        assert_eq!(chapter.languages, vec![Some("en".to_string()), None]);
        assert_eq!(chapter.first_title(), Some("Chapter 01"));
    }
}
