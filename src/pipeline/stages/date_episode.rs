//! Date-based episode numbering fallback
//!
//! Programmes that still have no populated `xmltv_ns` value get a pseudo
//! numbering derived from their broadcast date: season is the zero-based year,
//! episode the zero-based day of the year. Programmes sharing a date get the
//! same value.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, trace};

use crate::pipeline::traits::{PipelineStage, StageKind};
use crate::xmltv::Document;
use crate::xmltv::tags::{
    EPISODE_NUM, PROGRAMME, find_xmltv_ns_episode, new_xmltv_ns_episode, tag_qualifier,
};

#[derive(Debug, Default)]
pub struct DateEpisodeStage;

impl DateEpisodeStage {
    pub fn new() -> Self {
        Self
    }
}

/// Calendar date from the leading `YYYYMMDD` of an XMLTV timestamp
///
/// Returns `None` for short values, non-digit characters or impossible dates.
pub fn parse_broadcast_date(start: &str) -> Option<NaiveDate> {
    let start = start.trim();
    let date_part: String = start.chars().take(8).collect();
    if date_part.len() != 8 || !date_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `"{year-1}.{day_of_year-1}."` for the given date
pub fn xmltv_ns_for_date(date: NaiveDate) -> String {
    format!("{}.{}.", date.year() - 1, date.ordinal0())
}

impl PipelineStage for DateEpisodeStage {
    fn kind(&self) -> StageKind {
        StageKind::DateEpisode
    }

    fn stage_name(&self) -> &'static str {
        "Date Episode Fallback"
    }

    fn execute(&mut self, document: &mut Document) -> usize {
        let (programme_tag, episode_num_tag) = {
            let qualify = tag_qualifier(&document.root.name);
            (qualify(PROGRAMME), qualify(EPISODE_NUM))
        };

        let mut applied = 0;
        document
            .root
            .visit_descendants_mut(&programme_tag, &mut |programme| {
                let start = programme.attribute("start").unwrap_or_default().trim();
                if start.chars().count() < 8 {
                    return;
                }

                let existing = find_xmltv_ns_episode(programme, &episode_num_tag);
                if let Some(index) = existing
                    && !programme.children[index].text().trim().is_empty()
                {
                    return;
                }

                let Some(date) = parse_broadcast_date(start) else {
                    trace!("Unparsable start date {:?}, leaving programme alone", start);
                    return;
                };
                let value = xmltv_ns_for_date(date);

                match existing {
                    None => {
                        programme.append(new_xmltv_ns_episode(&episode_num_tag, &value));
                    }
                    Some(index) => programme.children[index].set_text(value.as_str()),
                }
                debug!("Applied date-based xmltv_ns {} for {}", value, date);
                applied += 1;
            });
        applied
    }
}
