use super::*;
use pretty_assertions::assert_eq;

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

const MEDIAINFO: &str = "\
General
Unique ID                                : 2887934093940384 (0xA4290F1F5A0D0)
Complete name                            : Heat.1995.1080p.BluRay.REMUX.AVC.DTS-HD.MA.5.1-GRouP.mkv
Format                                   : Matroska
Overall bit rate                         : 35.9 Mb/s
Movie name                               : Heat (1995)
Writing application                      : mkvmerge v81.0 ('Milliontown') 64-bit

Video
ID                                       : 1
Format                                   : AVC
Bit rate                                 : 24.0 Mb/s
Width                                    : 1 920 pixels
Height                                   : 1 080 pixels
Frame rate                               : 23.976 (24000/1001) FPS
Scan type                                : Progressive
Title                                    : MPEG-4 AVC Video / 24000 kbps / 1080p / 23.976 fps / 16:9 / High Profile 4.1
Language                                 : English
Default                                  : Yes
Forced                                   : No

Audio #1
ID                                       : 2
Format                                   : DTS XLL
Channel(s)                               : 6 channels
Sampling rate                            : 48.0 kHz
Bit depth                                : 24 bits
Title                                    : DTS-HD Master Audio / 5.1 / 48 kHz / 3669 kbps / 24-bit
Language                                 : English
Default                                  : Yes

Audio #2
ID                                       : 3
Format                                   : AC-3
Title                                    : Commentary by Michael Mann / Dolby Digital Audio / 2.0 / 48 kHz / 224 kbps
Language                                 : English

Text
ID                                       : 4
Format                                   : PGS
Language                                 : English
Default                                  : No
Forced                                   : No

Menu
00:00:00.000                             : en:Chapter 01
00:05:12.345                             : en:Chapter 02
";

#[test]
fn test_sections() {
    let report = parse(&lines(MEDIAINFO));

    assert_eq!(report.general.len(), 1);
    assert_eq!(report.video.len(), 1);
    assert_eq!(report.audio.len(), 2);
    assert_eq!(report.text.len(), 1);
    assert_eq!(report.menu.len(), 1);
    assert_eq!(report.menu[0].len(), 2);
}

#[test]
fn test_typed_fields() {
    let report = parse(&lines(MEDIAINFO));

    let general = report.general().unwrap();
    assert_eq!(general.movie_name.as_deref(), Some("Heat (1995)"));
    assert_eq!(
        general.writing_application.as_deref(),
        Some("mkvmerge v81.0 ('Milliontown') 64-bit")
    );

    let video = &report.video[0];
    assert_eq!(video.height.as_deref(), Some("1 080 pixels"));
    assert_eq!(video.scan_type.as_deref(), Some("Progressive"));
    assert!(video.is_default());

    let audio = &report.audio[0];
    assert_eq!(audio.channels.as_deref(), Some("6 channels"));
    assert_eq!(audio.bit_depth.as_deref(), Some("24 bits"));
    assert_eq!(audio.section_id(0), "#2");

    let text = &report.text[0];
    assert_eq!(text.format.as_deref(), Some("PGS"));
    assert!(!text.is_forced());
}

#[test]
fn test_unknown_keys_go_to_extra() {
    let report = parse(&lines(MEDIAINFO));
    let general = &report.general[0];
    assert_eq!(general.extra.get("overall_bit_rate").map(String::as_str), Some("35.9 Mb/s"));
    assert_eq!(general.get("overall_bit_rate"), Some("35.9 Mb/s"));
    assert!(general.extra.get("unique_id").is_none());
    assert!(general.unique_id.is_some());
}

#[test]
fn test_chapters() {
    let report = parse(&lines(MEDIAINFO));
    let chapters = &report.menu[0];
    assert_eq!(chapters[1].time, "00:05:12.345");
    assert_eq!(chapters[1].first_title(), Some("Chapter 02"));
    assert_eq!(chapters[1].languages, vec![Some("en".to_string())]);
}

#[test]
fn test_empty_sections_are_distinguishable() {
    let report = parse(&lines("General\nMovie name : Heat (1995)\nMenu\n"));
    assert_eq!(report.general.len(), 1);
    assert!(report.audio.is_empty());
    assert_eq!(report.menu, vec![Vec::<Chapter>::new()]);
}

#[test]
fn test_lines_before_first_header_are_dropped() {
    let report = parse(&lines("Format : Matroska\nGeneral\nFormat : Matroska\n"));
    assert_eq!(report.general.len(), 1);
    assert_eq!(report.general[0].format.as_deref(), Some("Matroska"));
}

#[test]
fn test_section_header() {
    assert_eq!(section_header("Audio #2"), Some(SectionKind::Audio));
    assert_eq!(section_header("Text #1"), Some(SectionKind::Text));
    assert_eq!(section_header("Menu"), Some(SectionKind::Menu));
    assert_eq!(section_header("Video delay : 0 ms"), None);
    assert_eq!(section_header("Format : AVC"), None);
}
