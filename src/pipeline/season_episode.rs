//! Season/episode inference from free-text descriptions
//!
//! Descriptions in UK and US feeds spell episode information in a handful of
//! ways ("S5 Ep2", "Season 5, Episode 2", "Series 5 ... Ep 12", "S05E02").
//! Each spelling has its own matcher and the matchers run in a fixed order;
//! the first matcher that finds a usable pair wins.
//!
//! A matcher only looks at its first match in the text. When that match holds
//! a zero the matcher gives up and the next matcher is tried. Digits are any
//! Unicode decimal digits, so "S٥E٢" reads as season 5, episode 2.

use std::sync::OnceLock;

use regex::Regex;

/// One-based season and episode numbers as written by humans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonEpisode {
    season: u32,
    episode: u32,
}

impl SeasonEpisode {
    /// Both numbers must be positive
    pub fn new(season: u32, episode: u32) -> Option<Self> {
        (season > 0 && episode > 0).then_some(Self { season, episode })
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Zero-based `season.episode.` value with an empty part segment
    pub fn to_xmltv_ns(self) -> String {
        format!("{}.{}.", self.season - 1, self.episode - 1)
    }
}

pub type Matcher = fn(&str) -> Option<SeasonEpisode>;

/// Matchers in precedence order
pub const MATCHERS: [(&str, Matcher); 3] = [
    ("season_episode_marker", match_season_episode_marker),
    ("series_number", match_series_number),
    ("compact_code", match_compact_code),
];

/// Infer a season/episode pair from description text
pub fn parse_season_episode(text: &str) -> Option<SeasonEpisode> {
    if text.is_empty() {
        return None;
    }
    MATCHERS.iter().find_map(|(_, matcher)| matcher(text))
}

/// "S5 Ep2", "S05E02", "Season 5, Episode 2", "s5 / e2"
pub fn match_season_episode_marker(text: &str) -> Option<SeasonEpisode> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let regex = PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)s(?:eason)?\s*(?P<s>\d{1,3})\s*[,/ ]*\s*e(?:p(?:isode)?)?\s*(?P<e>\d{1,3})",
        )
        .expect("valid season/episode regex")
    });
    first_match(regex, text)
}

/// "Series 5 Ep 2", "Series 5 ... 12", up to ten non-digits between the numbers
pub fn match_series_number(text: &str) -> Option<SeasonEpisode> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let regex = PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)series\s*(?P<s>\d{1,3})[^\d]{0,10}(?:e(?:p(?:isode)?)?\s*)?(?P<e>\d{1,3})",
        )
        .expect("valid series regex")
    });
    first_match(regex, text)
}

/// Whole-word "S05E02" with optional spaces
pub fn match_compact_code(text: &str) -> Option<SeasonEpisode> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let regex = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bs\s*(?P<s>\d{1,3})\s*e\s*(?P<e>\d{1,3})\b")
            .expect("valid compact code regex")
    });
    first_match(regex, text)
}

fn first_match(regex: &Regex, text: &str) -> Option<SeasonEpisode> {
    let captures = regex.captures(text)?;
    let season = decimal_number(captures.name("s")?.as_str())?;
    let episode = decimal_number(captures.name("e")?.as_str())?;
    SeasonEpisode::new(season, episode)
}

fn decimal_number(digits: &str) -> Option<u32> {
    digits
        .chars()
        .try_fold(0u32, |value, c| Some(value * 10 + decimal_digit_value(c)?))
}

/// Value of a Unicode decimal digit
///
/// Decimal digits are encoded in contiguous zero-to-nine runs, so the value is
/// the distance from the start of the run, modulo ten.
fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut offset = 0;
    let mut code = c as u32;
    while let Some(previous) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(previous) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    Some(offset % 10)
}

fn is_decimal_digit(c: char) -> bool {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    let regex = DIGIT.get_or_init(|| Regex::new(r"^\d$").expect("valid digit regex"));
    let mut buffer = [0u8; 4];
    regex.is_match(c.encode_utf8(&mut buffer))
}
