//! Paste fixtures for integration tests.

use remuxcheck_lint::{CheckConfig, Severity, ValidationReport, Validator};
use remuxcheck_paste::{ParserConfig, PasteParser};

pub const HEAT_VIDEO: &str =
    "MPEG-4 AVC Video / 24000 kbps / 1080p / 23.976 fps / 16:9 / High Profile 4.1";
pub const HEAT_MAIN_AUDIO: &str = "DTS-HD Master Audio / 5.1 / 48 kHz / 3669 kbps / 24-bit";
pub const HEAT_FILENAME: &str = "Heat.1995.1080p.BluRay.REMUX.AVC.DTS-HD.MA.5.1-GRouP.mkv";

/// Builds a paste section by section, in the order the methods are called.
///
/// MediaInfo track ids are assigned in call order starting at 1.
#[derive(Debug, Clone, Default)]
pub struct PasteBuilder {
    text: String,
    next_id: u32,
    audio_count: u32,
    text_count: u32,
}

impl PasteBuilder {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// The Heat (1995) BluRay: one AVC video, a DTS-HD MA 5.1 main track, an
    /// AC-3 commentary, English and French subtitles and 12 padded chapters.
    pub fn heat() -> Self {
        Self::new()
            .quick_summary(
                &[HEAT_VIDEO],
                &[
                    "English / DTS-HD Master Audio / 5.1 / 48 kHz / 3669 kbps / 24-bit (DTS Core: 5.1 / 48 kHz / 1509 kbps / 24-bit)",
                    "English / Dolby Digital Audio / 2.0 / 48 kHz / 224 kbps / DN -4dB",
                ],
                &["English / 33.148 kbps", "French / 29.512 kbps"],
            )
            .general(HEAT_FILENAME, "Heat (1995)")
            .video(HEAT_VIDEO)
            .audio("DTS XLL", HEAT_MAIN_AUDIO, "English", true)
            .audio(
                "AC-3",
                "Commentary by Michael Mann / Dolby Digital Audio / 2.0 / 48 kHz / 224 kbps",
                "English",
                false,
            )
            .text("English", None, false)
            .text("French", None, false)
            .chapters(12, true)
            .eac3to(&[
                "command line: eac3to 00800.mpls 1: chapters.txt 3: audio.dts",
                "1: Chapters, 12 chapters",
                "2: h264/AVC, 1080p24 /1.001 (16:9)",
                "3: DTS Master Audio, English, 5.1 channels, 24 bits, 48kHz",
            ])
    }

    /// Appends raw text followed by a blank line.
    pub fn raw(mut self, text: &str) -> Self {
        self.text.push_str(text);
        if !text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push('\n');
        self
    }

    /// A BDInfo quick summary. Audio and subtitle rows carry their language.
    pub fn quick_summary(self, video: &[&str], audio: &[&str], subtitles: &[&str]) -> Self {
        let mut section = String::from(
            "QUICK SUMMARY:\n\nDisc Title: HEAT\nDisc Size: 46,421,112,832 bytes\nProtection: AACS\n",
        );
        for row in video {
            section.push_str(&format!("Video: {}\n", row));
        }
        for row in audio {
            section.push_str(&format!("Audio: {}\n", row));
        }
        for row in subtitles {
            section.push_str(&format!("Subtitle: {}\n", row));
        }
        self.raw(&section)
    }

    pub fn general(self, complete_name: &str, movie_name: &str) -> Self {
        self.raw(&format!(
            "\
General
Unique ID                                : 212345678901234567890123456789012345678 (0x9FB1A9D2C3E4F5061728394A5B6C7D8E)
Complete name                            : {}
Format                                   : Matroska
Format version                           : Version 4
Movie name                               : {}
Writing application                      : mkvmerge v81.0 ('Milliontown') 64-bit
Writing library                          : libebml v1.4.4 + libmatroska v1.7.1",
            complete_name, movie_name
        ))
    }

    /// A 1080p progressive English video track titled `title`.
    pub fn video(mut self, title: &str) -> Self {
        let id = self.take_id();
        self.raw(&format!(
            "\
Video
ID                                       : {}
Format                                   : AVC
Format profile                           : High@L4.1
Bit rate                                 : 24.0 Mb/s
Width                                    : 1 920 pixels
Height                                   : 1 080 pixels
Display aspect ratio                     : 16:9
Frame rate                               : 23.976 (24000/1001) FPS
Scan type                                : Progressive
Title                                    : {}
Language                                 : English
Default                                  : Yes
Forced                                   : No",
            id, title
        ))
    }

    pub fn audio(mut self, format: &str, title: &str, language: &str, default: bool) -> Self {
        let id = self.take_id();
        self.audio_count += 1;
        let count = self.audio_count;
        self.raw(&format!(
            "\
Audio #{}
ID                                       : {}
Format                                   : {}
Title                                    : {}
Language                                 : {}
Default                                  : {}
Forced                                   : No",
            count,
            id,
            format,
            title,
            language,
            yes_no(default)
        ))
    }

    pub fn text(mut self, language: &str, title: Option<&str>, forced: bool) -> Self {
        let id = self.take_id();
        self.text_count += 1;
        let count = self.text_count;
        let mut section = format!(
            "Text #{}\nID                                       : {}\nFormat                                   : PGS\n",
            count, id
        );
        if let Some(title) = title {
            section.push_str(&format!("Title                                    : {}\n", title));
        }
        section.push_str(&format!(
            "Language                                 : {}\nDefault                                  : No\nForced                                   : {}",
            language,
            yes_no(forced)
        ));
        self.raw(&section)
    }

    /// A menu of `count` English chapters titled `Chapter N`, zero padded
    /// to the width of `count` when `padded`.
    pub fn chapters(self, count: usize, padded: bool) -> Self {
        let width = if padded { count.to_string().len() } else { 1 };
        let mut section = String::from("Menu\n");
        for n in 1..=count {
            section.push_str(&format!(
                "00:{:02}:{:02}.000                             : en:Chapter {:0width$}\n",
                (n * 5) / 60,
                (n * 5) % 60,
                n,
                width = width
            ));
        }
        self.raw(&section)
    }

    /// An eac3to log block around `lines`.
    pub fn eac3to(self, lines: &[&str]) -> Self {
        let mut section = String::from("eac3to v3.36, freeware by madshi.net\n");
        for line in lines {
            section.push_str(line);
            section.push('\n');
        }
        section.push_str("Done.\n");
        self.raw(&section)
    }

    pub fn build(self) -> String {
        self.text
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// The complete Heat (1995) paste.
pub fn heat_paste() -> String {
    PasteBuilder::heat().build()
}

/// Validates `text` with every rule and the default policy.
pub fn validate(text: &str) -> ValidationReport {
    Validator::new().validate_text(&PasteParser::default(), text, None)
}

/// Validates `text` under `config` from `channel`.
pub fn validate_with(text: &str, config: CheckConfig, channel: Option<&str>) -> ValidationReport {
    let parser = PasteParser::new(ParserConfig::default()).with_codecs(config.codecs.clone());
    Validator::new()
        .with_config(config)
        .validate_text(&parser, text, channel)
}

/// `(severity, message)` of every entry `rule_id` produced.
pub fn messages(report: &ValidationReport, rule_id: &str) -> Vec<(Severity, String)> {
    report
        .entries_for(rule_id)
        .map(|e| (e.severity, e.message.clone()))
        .collect()
}
