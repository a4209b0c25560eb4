//! Paste parsing for remux release checks.
//!
//! A paste is one block of text holding a BDInfo disc report, a MediaInfo
//! report of the finished file and, optionally, eac3to extraction logs. This
//! crate turns it into typed records.
//!
//! # Example
//!
//! ```
//! use remuxcheck_paste::{mediainfo, paste};
//!
//! let text = "QUICK SUMMARY:\n\
//!             Video: MPEG-4 AVC Video / 29998 kbps / 1080p / 23.976 fps / 16:9\n\
//!             \n\
//!             General\n\
//!             Movie name : Heat (1995)\n";
//!
//! let parsed = paste::parse(text);
//! assert_eq!(parsed.bdinfo.video.len(), 1);
//!
//! let report = mediainfo::parse(&parsed.mediainfo);
//! assert_eq!(report.general[0].movie_name.as_deref(), Some("Heat (1995)"));
//! ```

pub mod bdinfo;
pub mod codecs;
pub mod eac3to;
pub mod mediainfo;
pub mod normalize;
pub mod paste;
pub mod source;

pub use bdinfo::{BdAudioTrack, BdInfoKind, BdInfoReport};
pub use codecs::CodecTable;
pub use eac3to::{Eac3toLog, Eac3toLogSet};
pub use mediainfo::{
    AudioTrack, Chapter, ChapterTitle, GeneralInfo, MediaInfoReport, TextTrack, TrackFields,
    VideoTrack,
};
pub use normalize::{remove_until_first_codec, CodecSplit};
pub use paste::{IgnoreAfterMethod, ParsedPaste, ParserConfig, PasteParser};
pub use source::SourceKind;
