//! Conversion, ordering and chapter scenarios over complete pastes.

use pretty_assertions::assert_eq;
use remuxcheck_lint::Severity;
use remuxcheck_paste::paste;
use remuxcheck_tests::fixtures::{HEAT_FILENAME, HEAT_MAIN_AUDIO, HEAT_VIDEO};
use remuxcheck_tests::{messages, validate, PasteBuilder};

const DTS_HD_STEREO: &str = "English / DTS-HD Master Audio / 2.0 / 48 kHz / 1500 kbps / 24-bit";

/// Heat with a single stereo DTS-HD MA track remuxed as `flac_title`.
fn stereo_paste(flac_title: &str, eac3to: &[&str]) -> String {
    PasteBuilder::new()
        .quick_summary(&[HEAT_VIDEO], &[DTS_HD_STEREO], &["English / 33.148 kbps"])
        .general(HEAT_FILENAME, "Heat (1995)")
        .video(HEAT_VIDEO)
        .audio("FLAC", flac_title, "English", true)
        .text("English", None, false)
        .eac3to(eac3to)
        .build()
}

#[test]
fn test_dts_hd_stereo_to_flac() {
    let report = validate(&stereo_paste(
        "FLAC Audio / 2.0 / 48 kHz / 1200 kbps / 24-bit",
        &["command line: eac3to 00800.mpls 2: audio.flac"],
    ));
    assert_eq!(
        messages(&report, "audio/conversions"),
        vec![(Severity::Correct, "Audio #2: Track names match".to_string())]
    );
}

#[test]
fn test_mono_without_flag_is_a_channel_error() {
    let report = validate(&stereo_paste(
        "FLAC Audio / 1.0 / 48 kHz / 1200 kbps / 24-bit",
        &["command line: eac3to 00800.mpls 2: audio.flac"],
    ));
    let entries = messages(&report, "audio/conversions");
    assert!(entries.contains(&(
        Severity::Error,
        "Audio #2: Channels should be `2.0` instead of `1.0`".to_string()
    )));
}

#[test]
fn test_mono_flag_accepts_downmix() {
    let report = validate(&stereo_paste(
        "FLAC Audio / 1.0 / 48 kHz / 1200 kbps / 24-bit",
        &["command line: eac3to 00800.mpls 2: audio.flac -mono"],
    ));
    assert_eq!(
        messages(&report, "audio/conversions"),
        vec![(Severity::Correct, "Audio #2: Track names match".to_string())]
    );
}

#[test]
fn test_unconverted_stereo_track() {
    let report = validate(&stereo_paste(
        "DTS-HD Master Audio / 2.0 / 48 kHz / 1500 kbps / 24-bit",
        &["command line: eac3to 00800.mpls"],
    ));
    let entries = messages(&report, "audio/conversions");
    assert_eq!(
        entries[0],
        (Severity::Error, "Audio #2 should be converted to FLAC Audio".to_string())
    );
}

#[test]
fn test_subtitles_with_titled_english_first() {
    let text = PasteBuilder::new()
        .general(HEAT_FILENAME, "Heat (1995)")
        .video(HEAT_VIDEO)
        .audio("DTS XLL", HEAT_MAIN_AUDIO, "English", true)
        .text("English", Some("SDH"), false)
        .text("French", None, false)
        .text("German", None, false)
        .build();

    let report = validate(&text);
    assert_eq!(
        messages(&report, "text/order"),
        vec![(Severity::Correct, "Subtitles are in order".to_string())]
    );
}

#[test]
fn test_subtitles_out_of_language_order() {
    let text = PasteBuilder::new()
        .general(HEAT_FILENAME, "Heat (1995)")
        .video(HEAT_VIDEO)
        .audio("DTS XLL", HEAT_MAIN_AUDIO, "English", true)
        .text("English", None, true)
        .text("English", None, false)
        .text("German", None, false)
        .text("French", None, false)
        .text("English", Some("Commentary by Michael Mann"), false)
        .build();

    let report = validate(&text);
    assert_eq!(
        messages(&report, "text/order"),
        vec![(
            Severity::Error,
            "Text #5 should come after Text #6, language order".to_string()
        )]
    );
}

#[test]
fn test_duplicate_quick_summary_keeps_first() {
    let second = PasteBuilder::new()
        .quick_summary(
            &["MPEG-H HEVC Video / 50000 kbps / 2160p / 23.976 fps / 16:9"],
            &["German / Dolby Digital Audio / 5.1 / 48 kHz / 640 kbps"],
            &["German / 20.000 kbps"],
        )
        .build();
    let text = format!("{}{}", PasteBuilder::heat().build(), second);

    let parsed = paste::parse(&text);
    assert_eq!(parsed.bdinfo.video, vec![HEAT_VIDEO.to_string()]);
    assert_eq!(parsed.bdinfo.audio.len(), 2);
    assert!(parsed
        .bdinfo
        .audio
        .iter()
        .all(|a| a.language.as_deref() == Some("English")));
    assert_eq!(
        parsed.bdinfo.subtitle,
        vec!["English / 33.148 kbps".to_string(), "French / 29.512 kbps".to_string()]
    );
}

fn chapter_paste(count: usize, padded: bool) -> String {
    PasteBuilder::new()
        .general(HEAT_FILENAME, "Heat (1995)")
        .video(HEAT_VIDEO)
        .audio("DTS XLL", HEAT_MAIN_AUDIO, "English", true)
        .chapters(count, padded)
        .build()
}

#[test]
fn test_unpadded_chapters() {
    let report = validate(&chapter_paste(10, false));
    assert_eq!(
        messages(&report, "chapters/padding"),
        vec![(Severity::Error, "Incorrect chapter padding".to_string())]
    );
}

#[test]
fn test_padded_chapters() {
    let report = validate(&chapter_paste(10, true));
    assert_eq!(
        messages(&report, "chapters/padding"),
        vec![(Severity::Correct, "Chapters properly padded".to_string())]
    );

    // Fewer than 10 chapters need no padding.
    let report = validate(&chapter_paste(9, false));
    assert_eq!(messages(&report, "chapters/padding")[0].0, Severity::Correct);
}

#[test]
fn test_missing_chapters_from_eac3to_log() {
    let text = PasteBuilder::new()
        .general(HEAT_FILENAME, "Heat (1995)")
        .video(HEAT_VIDEO)
        .audio("DTS XLL", HEAT_MAIN_AUDIO, "English", true)
        .eac3to(&["1: Chapters, 12 chapters"])
        .build();

    let report = validate(&text);
    assert_eq!(
        messages(&report, "chapters/required"),
        vec![(Severity::Error, "Should have chapters (from eac3to log)".to_string())]
    );
    assert_eq!(
        messages(&report, "chapters/listing"),
        vec![(Severity::Info, "No chapters".to_string())]
    );
}

#[test]
fn test_audio_count_mismatch_keeps_other_checks() {
    let text = PasteBuilder::new()
        .quick_summary(
            &[HEAT_VIDEO],
            &[
                "English / DTS-HD Master Audio / 5.1 / 48 kHz / 3669 kbps / 24-bit",
                "Spanish / Dolby Digital Audio / 5.1 / 48 kHz / 640 kbps",
            ],
            &[],
        )
        .general(HEAT_FILENAME, "Heat (1995)")
        .video(HEAT_VIDEO)
        .audio("DTS XLL", HEAT_MAIN_AUDIO, "English", true)
        .text("English", None, false)
        .chapters(12, true)
        .build();

    let report = validate(&text);
    let report_entries: Vec<_> = report.entries_for("audio/conversions").collect();
    let warning = report_entries
        .iter()
        .find(|e| e.severity == Severity::Warning)
        .unwrap();
    assert_eq!(warning.message, "Checked first `1/2` audio tracks");
    assert!(warning
        .detail
        .as_deref()
        .is_some_and(|d| d.contains("minus (-) sign")));

    assert_eq!(
        messages(&report, "text/order"),
        vec![(Severity::Correct, "Subtitles are in order".to_string())]
    );
    assert_eq!(
        messages(&report, "chapters/padding"),
        vec![(Severity::Correct, "Chapters properly padded".to_string())]
    );
}

#[test]
fn test_dvd_has_no_conversions() {
    let text = PasteBuilder::new()
        .general("Heat.1995.NTSC.DVD.REMUX.MPEG-2.DD.5.1-GRouP.mkv", "Heat (1995)")
        .raw(
            "\
Video
ID                                       : 1
Format                                   : MPEG Video
Format version                           : Version 2
Bit rate                                 : 7 500 kb/s
Height                                   : 480 pixels
Scan type                                : Interlaced
Frame rate                               : 29.970 (30000/1001) FPS
Display aspect ratio                     : 16:9
Standard                                 : NTSC
Title                                    : MPEG-2 Video / 7500 kbps / 480i / 29.97 fps / 16:9
Language                                 : English",
        )
        .build();

    let report = validate(&text);
    assert_eq!(
        messages(&report, "audio/conversions"),
        vec![(
            Severity::Info,
            "No audio track conversions to check for DVDs".to_string()
        )]
    );
    assert_eq!(
        messages(&report, "video/track-name"),
        vec![(
            Severity::Correct,
            "Video track names match: `MPEG-2 Video / 7500 kbps / 480i / 29.97 fps / 16:9`"
                .to_string()
        )]
    );
}
