//! Movie name rules: name format and the IMDb/TMDb cross-check.

use crate::diff::show_diff;
use crate::report::{ReportEntry, RuleSection};
use crate::rules::helpers::{is_movie, movie_name, movie_name_regex, tv_name_regex};
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use crate::services::{IdSource, MediaKind, ServiceError, TitleRecord};
use regex::Regex;
use remuxcheck_paste::normalize::digits;
use std::sync::OnceLock;
use tracing::warn;

static MOVIE_PARTS_RE: OnceLock<Regex> = OnceLock::new();
static TV_PARTS_RE: OnceLock<Regex> = OnceLock::new();

fn movie_parts_regex() -> &'static Regex {
    MOVIE_PARTS_RE.get_or_init(|| Regex::new(r"^(.+)\((\d{4})\)").expect("invalid regex pattern"))
}

fn tv_parts_regex() -> &'static Regex {
    TV_PARTS_RE
        .get_or_init(|| Regex::new(r"^(.+)\s-\sS\d{2}(E\d{2})+").expect("invalid regex pattern"))
}

fn extra_space_entries(name: &str) -> Vec<ReportEntry> {
    let mut entries = Vec::new();
    if name.starts_with(' ') {
        entries.push(ReportEntry::error("Movie name starts with an extra space!"));
    }
    if name.ends_with(' ') {
        entries.push(ReportEntry::error("Movie name ends with an extra space!"));
    }
    entries
}

/// Rule: metadata/movie-name-format
/// Movie names read `Name (YYYY)`, TV episodes `Name - S01E01`.
pub struct MovieNameFormatRule;

impl CheckRule for MovieNameFormatRule {
    fn id(&self) -> &'static str {
        "metadata/movie-name-format"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Metadata
    }

    fn description(&self) -> &'static str {
        "Movie name follows `Name (Year)` or `Name - S01E01`"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking movie name format"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let Some(name) = movie_name(ctx.mediainfo) else {
            return Ok(vec![ReportEntry::error("Missing movie name")]);
        };

        let mut entries = Vec::new();
        if is_movie(ctx.mediainfo.general()) {
            if movie_name_regex().is_match(name) {
                entries.push(ReportEntry::correct(format!(
                    "Movie name format `Name (Year)`: `{}`",
                    name
                )));
            } else {
                entries.push(ReportEntry::error(format!(
                    "Movie name does not match format `Name (Year)`: `{}`",
                    name
                )));
                entries.extend(extra_space_entries(name));
            }
        } else if tv_name_regex().is_match(name) {
            entries.push(ReportEntry::correct(format!(
                "TV show name format `Name - S01E01`: `{}`",
                name
            )));
        } else {
            entries.push(ReportEntry::error(format!(
                "TV show name does not match format `Name - S01E01`: `{}`",
                name
            )));
            entries.extend(extra_space_entries(name));
        }

        Ok(entries)
    }
}

/// Returns true if `test_year` is within `offset` years of `year`, inclusive.
pub(crate) fn year_in_range(year: i32, test_year: i32, offset: i32) -> bool {
    (year - offset..=year + offset).contains(&test_year)
}

/// Outcome of looking up one database.
struct Lookup {
    source: IdSource,
    record: Option<TitleRecord>,
    title_matched: bool,
    year_matched: bool,
}

/// Rule: metadata/external-ids
/// The movie name and year agree with the IMDb and TMDb records.
pub struct ExternalIdsRule;

impl ExternalIdsRule {
    fn lookup(
        &self,
        ctx: &CheckContext,
        source: IdSource,
        raw_id: &str,
        kind: MediaKind,
        entries: &mut Vec<ReportEntry>,
    ) -> Option<TitleRecord> {
        let id = digits(raw_id);
        match ctx.services.metadata.lookup(source, &id, kind) {
            Ok(record) => Some(record),
            Err(ServiceError::InvalidId(_)) => {
                let label = match source {
                    IdSource::Imdb => "IMDB",
                    IdSource::Tmdb => "TMDb",
                };
                entries.push(ReportEntry::error(format!("Invalid {} id: `{}`", label, raw_id)));
                None
            }
            Err(err) => {
                warn!(source = source.label(), error = %err, "metadata lookup failed");
                let message = match source {
                    IdSource::Imdb => "Failed to get IMDB movie data",
                    IdSource::Tmdb => "Failed to get TMDb data",
                };
                entries.push(ReportEntry::info(message));
                None
            }
        }
    }
}

impl CheckRule for ExternalIdsRule {
    fn id(&self) -> &'static str {
        "metadata/external-ids"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Metadata
    }

    fn description(&self) -> &'static str {
        "Movie name and year match IMDb/TMDb"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking IMDb/TMDb ids"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let mut entries = Vec::new();
        let Some(general) = ctx.mediainfo.general() else {
            return Ok(entries);
        };

        let movie = is_movie(Some(general));
        let kind = if movie { MediaKind::Movie } else { MediaKind::Tv };

        let (name, year) = match general.movie_name.as_deref() {
            Some(full) if movie => match movie_parts_regex().captures(full) {
                Some(caps) => (
                    Some(caps[1].trim().to_string()),
                    caps[2].trim().parse::<i32>().ok(),
                ),
                None => (None, None),
            },
            Some(full) => (
                tv_parts_regex()
                    .captures(full)
                    .map(|caps| caps[1].trim().to_string()),
                None,
            ),
            None => (None, None),
        };

        let ids = [
            (IdSource::Imdb, general.imdb.as_deref()),
            (IdSource::Tmdb, general.tmdb.as_deref()),
        ];
        if ids.iter().all(|(_, id)| id.is_none()) {
            return Ok(entries);
        }

        let mut lookups = Vec::new();
        for (source, raw_id) in ids {
            let Some(raw_id) = raw_id else {
                continue;
            };
            let record = self.lookup(ctx, source, raw_id, kind, &mut entries);
            let title_matched = record
                .as_ref()
                .is_some_and(|r| name.as_deref() == Some(r.title.as_str()));
            let year_matched = movie
                && match (record.as_ref().and_then(|r| r.year), year) {
                    (Some(found), Some(year)) => {
                        year_in_range(found, year, ctx.config.movie_year_offset)
                    }
                    _ => false,
                };
            lookups.push(Lookup {
                source,
                record,
                title_matched,
                year_matched,
            });
        }

        let title_matched = lookups.iter().any(|l| l.title_matched);
        let year_matched = lookups.iter().any(|l| l.year_matched);
        let what = if movie { "movie" } else { "tv show" };

        if movie && title_matched && year_matched {
            entries.push(ReportEntry::correct("Matched movie name and year with IMDb/TMDb"));
            return Ok(entries);
        }

        if title_matched {
            entries.push(ReportEntry::correct(format!(
                "Matched {} name with IMDb/TMDb",
                what
            )));
        } else {
            let mut replied = false;
            for lookup in &lookups {
                let Some(record) = lookup.record.as_ref().filter(|r| !r.title.is_empty()) else {
                    continue;
                };
                let mut entry = ReportEntry::error(format!(
                    "{}: Name: `{}`",
                    lookup.source.label(),
                    record.title
                ));
                if let Some(name) = name.as_deref() {
                    entry = entry.with_detail(show_diff(name, &record.title));
                }
                entries.push(entry);
                replied = true;
            }
            if !replied {
                entries.push(ReportEntry::error(format!(
                    "Failed to match {} name with IMDb/TMDb",
                    what
                )));
            }
        }

        if !movie {
            return Ok(entries);
        }

        if year_matched {
            entries.push(ReportEntry::correct("Matched movie year with IMDb/TMDb"));
        } else {
            let mut replied = false;
            for lookup in &lookups {
                if let Some(found) = lookup.record.as_ref().and_then(|r| r.year) {
                    entries.push(ReportEntry::error(format!(
                        "{}: Year: `{}`",
                        lookup.source.label(),
                        found
                    )));
                    replied = true;
                }
            }
            if !replied {
                entries.push(ReportEntry::error("Failed to match movie year with IMDb/TMDb"));
            }
        }

        Ok(entries)
    }
}
