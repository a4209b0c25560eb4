use super::*;
use crate::config::CheckConfig;
use crate::report::Severity;
use crate::rules::fixture::{summary, Fixture};
use crate::services::testing::{FixedNames, FixedPeople, RecordingSpellChecker};
use crate::services::{PeopleSearch, Services};
use pretty_assertions::assert_eq;
use remuxcheck_paste::SourceKind;

/// One MediaInfo audio section.
fn audio(id: u32, format: &str, title: &str, extra: &[&str]) -> String {
    let mut section = format!("Audio #{}\nID : {}\nFormat : {}\nTitle : {}\n", id, id, format, title);
    for line in extra {
        section.push_str(line);
        section.push('\n');
    }
    section
}

fn fixture(sections: &[String]) -> Fixture {
    Fixture::from_mediainfo(&sections.concat())
}

fn entries_for(rule: &dyn CheckRule, fixture: &Fixture) -> Vec<(Severity, String)> {
    summary(&fixture.run(rule))
}

const DTS_HD_STEREO: &str = "DTS-HD Master Audio / 2.0 / 48 kHz / 1500 kbps / 24-bit";
const FLAC_STEREO: &str = "FLAC Audio / 2.0 / 48 kHz / 1200 kbps / 24-bit";
const COMMENTARY_DD: &str = "Commentary by Michael Mann / Dolby Digital Audio / 2.0 / 48 kHz / 192 kbps";

#[test]
fn test_all_rules_order() {
    let ids: Vec<_> = all_rules().iter().map(|r| r.id()).collect();
    assert_eq!(
        ids,
        vec![
            "audio/track-names",
            "audio/conversions",
            "audio/flac-titles",
            "audio/people",
            "audio/spelling",
        ]
    );
}

#[test]
fn test_track_names_listing_is_unrecorded() {
    let fixture = fixture(&[
        audio(2, "FLAC", FLAC_STEREO, &[]),
        audio(3, "AC-3", COMMENTARY_DD, &[]),
    ]);
    let entries = fixture.run(&AudioTrackNamesRule);
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].recorded);
    assert_eq!(
        entries[0].detail.as_deref(),
        Some(format!("#2: {}\n#3: {}", FLAC_STEREO, COMMENTARY_DD).as_str())
    );
}

#[test]
fn test_no_audio_tracks() {
    assert_eq!(
        entries_for(&AudioTrackNamesRule, &Fixture::new()),
        vec![(Severity::Error, "No audio tracks".to_string())]
    );
}

#[test]
fn test_conversion_target() {
    assert_eq!(conversion_target(DTS_HD_STEREO), Some("FLAC Audio"));
    assert_eq!(
        conversion_target("DTS-HD Master Audio / 5.1 / 48 kHz / 3500 kbps / 24-bit"),
        None
    );
    assert_eq!(
        conversion_target("LPCM Audio / 1.0 / 48 kHz / 1152 kbps / 24-bit"),
        Some("FLAC Audio")
    );
    assert_eq!(
        conversion_target("LPCM Audio / 5.1 / 48 kHz / 6912 kbps / 24-bit"),
        Some("DTS-HD Master Audio")
    );
    assert_eq!(conversion_target("Dolby Digital Audio / 5.1 / 48 kHz / 640 kbps"), None);
}

#[test]
fn test_dts_hd_stereo_to_flac() {
    let fixture = fixture(&[audio(2, "FLAC", FLAC_STEREO, &[])]).with_bdinfo_audio(&[DTS_HD_STEREO]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &fixture),
        vec![(Severity::Correct, "Audio #2: Track names match".to_string())]
    );
}

#[test]
fn test_channel_mismatch_without_mono_flag() {
    let title = "FLAC Audio / 1.0 / 48 kHz / 1200 kbps / 24-bit";
    let fixture = fixture(&[audio(2, "FLAC", title, &[])]).with_bdinfo_audio(&[DTS_HD_STEREO]);
    let entries = fixture.run(&AudioConversionsRule);
    assert_eq!(
        summary(&entries),
        vec![
            (
                Severity::Error,
                "Audio #2: Channels should be `2.0` instead of `1.0`".to_string()
            ),
            (Severity::Error, "Audio #2: Bad conversion".to_string()),
        ]
    );
    assert!(entries[1].detail.as_deref().is_some_and(|d| d.contains("Diff: ")));
}

#[test]
fn test_mono_flag_accepts_single_channel() {
    let title = "FLAC Audio / 1.0 / 48 kHz / 1200 kbps / 24-bit";
    let fixture = fixture(&[audio(2, "FLAC", title, &[])])
        .with_bdinfo_audio(&[DTS_HD_STEREO])
        .with_eac3to(&[
            "eac3to v3.36",
            "command line: eac3to 00001.m2ts 2: audio.flac -mono",
        ]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &fixture),
        vec![(Severity::Correct, "Audio #2: Track names match".to_string())]
    );
}

#[test]
fn test_mediainfo_bitrate_above_bdinfo() {
    let title = "FLAC Audio / 2.0 / 48 kHz / 1600 kbps / 24-bit";
    let fixture = fixture(&[audio(2, "FLAC", title, &[])]).with_bdinfo_audio(&[DTS_HD_STEREO]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &fixture),
        vec![
            (
                Severity::Error,
                "Audio #2: MediaInfo bitrate is greater than BDInfo bitrate: `1600 kbps > 1500 kbps`"
                    .to_string()
            ),
            (Severity::Correct, "Audio #2: Track names match".to_string()),
        ]
    );
}

#[test]
fn test_multichannel_lpcm_must_be_dts_hd() {
    let fixture = fixture(&[audio(
        2,
        "FLAC",
        "FLAC Audio / 5.1 / 48 kHz / 3000 kbps / 24-bit",
        &[],
    )])
    .with_bdinfo_audio(&["LPCM Audio / 5.1 / 48 kHz / 6912 kbps / 24-bit"]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &fixture),
        vec![
            (
                Severity::Error,
                "Audio #2 should be converted to DTS-HD Master Audio".to_string()
            ),
            (Severity::Error, "Audio #2: Bad conversion".to_string()),
        ]
    );
}

#[test]
fn test_untouched_track_uses_mediainfo_bitrate() {
    let bdinfo = "Dolby TrueHD/Atmos Audio / 7.1 / 48 kHz / 4291 kbps / 24-bit";
    let title = "Dolby TrueHD/Atmos Audio / 7.1 / 48 kHz / 4302 kbps / 24-bit";
    let fixture = fixture(&[audio(2, "MLP FBA", title, &[])]).with_bdinfo_audio(&[bdinfo]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &fixture),
        vec![(Severity::Correct, "Audio #2: Track names match".to_string())]
    );
}

#[test]
fn test_missing_track_name() {
    let text = "Audio #1\nID : 2\nFormat : FLAC\n";
    let fixture = Fixture::from_mediainfo(text).with_bdinfo_audio(&[
        "Dolby Digital Audio / 5.1 / 48 kHz / 640 kbps",
    ]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &fixture),
        vec![(Severity::Error, "Audio #2: Missing track name".to_string())]
    );
}

#[test]
fn test_commentary_already_ac3() {
    let fixture = fixture(&[audio(3, "AC-3", COMMENTARY_DD, &[])])
        .with_bdinfo_audio(&["Dolby Digital Audio / 2.0 / 48 kHz / 192 kbps"]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &fixture),
        vec![(Severity::Correct, "Audio #3: Commentary already AC-3".to_string())]
    );
}

#[test]
fn test_commentary_converted_to_ac3() {
    let title = "Commentary / Dolby Digital Audio / 2.0 / 48 kHz / 224 kbps";
    let converted = fixture(&[audio(3, "AC-3", title, &["Bit rate : 224 kb/s"])])
        .with_bdinfo_audio(&[DTS_HD_STEREO]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &converted),
        vec![(
            Severity::Correct,
            "Audio #3: Commentary converted to `AC-3 @ 224 kbps`".to_string()
        )]
    );

    let wrong_rate = fixture(&[audio(3, "AC-3", title, &["Bit rate : 192 kb/s"])])
        .with_bdinfo_audio(&[DTS_HD_STEREO]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &wrong_rate),
        vec![(
            Severity::Error,
            "Audio #3: Commentary AC-3 bitrate should be `224 kbps` instead of `192 kb/s`".to_string()
        )]
    );

    let kept = fixture(&[audio(3, "FLAC", "Commentary / FLAC Audio / 2.0", &[])])
        .with_bdinfo_audio(&[DTS_HD_STEREO]);
    assert_eq!(
        entries_for(&AudioConversionsRule, &kept),
        vec![(Severity::Info, "Audio #3: Commentary may be converted to AC-3".to_string())]
    );
}

#[test]
fn test_track_count_mismatch() {
    let fixture = fixture(&[audio(2, "FLAC", FLAC_STEREO, &[])])
        .with_bdinfo_audio(&[DTS_HD_STEREO, "Dolby Digital Audio / 2.0 / 48 kHz / 192 kbps"]);
    let entries = fixture.run(&AudioConversionsRule);
    assert_eq!(
        summary(&entries),
        vec![
            (Severity::Correct, "Audio #2: Track names match".to_string()),
            (Severity::Warning, "Checked first `1/2` audio tracks".to_string()),
        ]
    );
    assert!(entries[1].detail.as_deref().is_some_and(|d| d.contains("minus (-) sign")));
}

#[test]
fn test_dvd_has_no_conversions() {
    let fixture = Fixture::new().with_source(SourceKind::Dvd);
    assert_eq!(
        entries_for(&AudioConversionsRule, &fixture),
        vec![(
            Severity::Info,
            "No audio track conversions to check for DVDs".to_string()
        )]
    );
}

const FLAC_FIELDS: &[&str] = &[
    "Channel(s) : 2 channels",
    "Sampling rate : 48.0 kHz",
    "Bit rate : 1 509 kb/s",
    "Bit depth : 24 bits",
];

#[test]
fn test_flac_good_title() {
    let title = "FLAC Audio / 2.0 / 48 kHz / 1509 kbps / 24-bit";
    let fixture = fixture(&[audio(2, "FLAC", title, FLAC_FIELDS)]);
    assert_eq!(
        entries_for(&FlacTitlesRule, &fixture),
        vec![(Severity::Correct, "Audio #2: Good track name".to_string())]
    );
}

#[test]
fn test_flac_bad_title() {
    let title = "FLAC Audio / 2.0 / 48 kHz / 1500 kbps / 24-bit";
    let entries = fixture(&[audio(2, "FLAC", title, FLAC_FIELDS)]).run(&FlacTitlesRule);
    assert_eq!(
        summary(&entries),
        vec![(Severity::Error, "Audio #2: Bad track name".to_string())]
    );
    let detail = entries[0].detail.as_deref().unwrap();
    assert!(detail.contains("Expected: FLAC Audio / 2.0 / 48 kHz / 1509 kbps / 24-bit"));
}

#[test]
fn test_flac_six_channels_keeps_raw_count() {
    let fields = &[
        "Channel(s) : 6 channels",
        "Sampling rate : 48.0 kHz",
        "Bit rate : 1 509 kb/s",
        "Bit depth : 24 bits",
    ];
    let good = fixture(&[audio(2, "FLAC", "FLAC Audio / 6.0 / 48 kHz / 1509 kbps / 24-bit", fields)]);
    assert_eq!(
        entries_for(&FlacTitlesRule, &good),
        vec![(Severity::Correct, "Audio #2: Good track name".to_string())]
    );

    let bad = fixture(&[audio(2, "FLAC", "FLAC Audio / 5.1 / 48 kHz / 1509 kbps / 24-bit", fields)]);
    assert_eq!(
        entries_for(&FlacTitlesRule, &bad),
        vec![(Severity::Error, "Audio #2: Bad track name".to_string())]
    );
}

#[test]
fn test_flac_skips_other_tracks() {
    let fixture = fixture(&[
        audio(2, "AC-3", COMMENTARY_DD, &[]),
        audio(3, "FLAC", "Isolated score", FLAC_FIELDS),
    ]);
    assert!(fixture.run(&FlacTitlesRule).is_empty());
}

#[test]
fn test_expected_flac_title_layouts() {
    let mut track = remuxcheck_paste::AudioTrack {
        channels: Some("6 channels".to_string()),
        sampling_rate: Some("96.0 kHz".to_string()),
        bit_rate: Some("4 020 kb/s".to_string()),
        bit_depth: Some("24 bits".to_string()),
        ..Default::default()
    };
    assert_eq!(
        expected_flac_title(&track).as_deref(),
        Some("FLAC Audio / 6.0 / 96 kHz / 4020 kbps / 24-bit")
    );
    track.channels = Some("8 channels".to_string());
    assert_eq!(
        expected_flac_title(&track).as_deref(),
        Some("FLAC Audio / 8.0 / 96 kHz / 4020 kbps / 24-bit")
    );
    track.bit_depth = None;
    assert!(expected_flac_title(&track).is_none());
}

fn people(services: Vec<Box<dyn PeopleSearch>>, names: &[&str]) -> Services {
    Services::offline()
        .with_people(services)
        .with_name_extractor(FixedNames::new(names))
}

#[test]
fn test_people_matched_and_service_failure() {
    let services = people(
        vec![
            Box::new(FixedPeople::new("TMDb", &["Michael Mann"])),
            Box::new(FixedPeople::unavailable("IMDb")),
        ],
        &["Michael Mann"],
    );
    let fixture = fixture(&[audio(3, "AC-3", COMMENTARY_DD, &[])]).with_services(services);
    assert_eq!(
        entries_for(&AudioPeopleRule, &fixture),
        vec![
            (Severity::Info, "Audio #3: Failed to get IMDb people data".to_string()),
            (Severity::Correct, "Audio #3 People Matched: `Michael Mann`".to_string()),
        ]
    );
}

#[test]
fn test_people_unmatched() {
    let services = people(
        vec![Box::new(FixedPeople::new("TMDb", &["Michael Mann"]))],
        &["Michael Man"],
    );
    let title = "Commentary by Michael Man / Dolby Digital Audio / 2.0 / 48 kHz / 192 kbps";
    let fixture = fixture(&[audio(3, "AC-3", title, &[])]).with_services(services);
    assert_eq!(
        entries_for(&AudioPeopleRule, &fixture),
        vec![(Severity::Warning, "Audio #3 People Unmatched: `Michael Man`".to_string())]
    );
}

#[test]
fn test_descriptive_segment() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();
    assert_eq!(descriptive_segment(&ctx, COMMENTARY_DD), "Commentary by Michael Mann");
    assert_eq!(descriptive_segment(&ctx, FLAC_STEREO), "");
    assert_eq!(descriptive_segment(&ctx, "Isolated score"), "Isolated score");
}

#[test]
fn test_spelling() {
    let title = "Commentary by Michael Mann, and the Directr / Dolby Digital Audio / 2.0 / 48 kHz / 192 kbps";
    let services = Services::offline()
        .with_name_extractor(FixedNames::new(&["Michael Mann"]))
        .with_spell_checker(RecordingSpellChecker::new(&["commentary", "by", "and", "the"]));
    let fixture = fixture(&[audio(3, "AC-3", title, &[])]).with_services(services);
    assert_eq!(
        entries_for(&AudioSpellingRule, &fixture),
        vec![(Severity::Error, "Audio #3 Misspelled: `Directr`".to_string())]
    );

    let config = CheckConfig {
        misspelling_ignore: vec!["Directr".to_string()],
        ..CheckConfig::default()
    };
    let ignored = fixture.with_config(config);
    assert!(ignored.run(&AudioSpellingRule).is_empty());
}

#[test]
fn test_spelling_without_checker() {
    let fixture = fixture(&[audio(3, "AC-3", COMMENTARY_DD, &[])]);
    assert!(fixture.run(&AudioSpellingRule).is_empty());
}
