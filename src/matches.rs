//! Tennis result extraction from text copied out of the data hub.
//!
//! A result block looks like this once pasted:
//!
//! ```text
//! 10h23
//! Horizontal fading line
//! Result
//! WTA Auckland, Svitolina E. / Jovic I. : 7/6 6/2. Cotes de début de match : 1.382 / 3.33.
//! ```
//!
//! [`parse_match_text`] finds every such block in a blob, in text order, and
//! derives the winner from the score.

use crate::models::MatchRecord;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::cmp::Ordering;
use tracing::{debug, info, instrument};

/// Odds token the data hub prints when no price was recorded.
pub const NO_ODDS: &str = "None";

const TIME: &str = r"(?P<time>\d{2}h\d{2})";
const RESULT_MARKER: &str = r"\s*\n.*?Result\s*\n";
const TOURNAMENT: &str = r"(?P<tournament>[^,]+),\s*";
const PLAYERS: &str = r"(?P<player1>[^/]+)\s*/\s*(?P<player2>[^:]+)\s*:\s*";
const SCORE: &str = r"(?P<score>[^.]+)\.\s*";
const ODDS_MARKER: &str = r"Cotes de début de match\s*:\s*";
const ODDS: &str = r"(?P<odds1>\d+\.?\d*|None)\s*/\s*(?P<odds2>\d+\.?\d*|None)";

static MATCH_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = ["(?s)", TIME, RESULT_MARKER, TOURNAMENT, PLAYERS, SCORE, ODDS_MARKER, ODDS].concat();
    Regex::new(&pattern).expect("match pattern is valid")
});

/// Text pasted from the data hub on 2026-01-10, used by demonstration runs.
pub const SAMPLE_TEXT: &str = "
10h23
Horizontal fading line
Result
WTA Auckland, Svitolina E. / Jovic I. : 7/6 6/2. Cotes de début de match : 1.382 / 3.33.

10h03
Horizontal fading line
Result
ATP United Cup, Hurkacz H. / Fritz T. : 7/6 7/6. Cotes de début de match : 2.04 / 1.87.

07h33
Horizontal fading line
Result
Challenger Men - Singles Canberra, Blockx A. / Jodar R. : 6/4 6/4. Cotes de début de match : 2.79 / 1.49.

06h23
Horizontal fading line
Result
Challenger Men - Singles Nonthaburi, Noguchi R. / Gengel M. : 6/3 6/4. Cotes de début de match : 1.613 / 2.45.
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Player1,
    Player2,
}

/// Parse an odds token; the `None` sentinel and unparseable tokens give `None`.
pub fn parse_odds(token: &str) -> Option<f64> {
    let token = token.trim();
    if token == NO_ODDS {
        return None;
    }
    token.parse::<f64>().ok()
}

/// Leading ASCII digits of `s` without leading zeros, or `None` when `s`
/// does not start with a digit. `"007(5)"` gives `"7"`, `"0"` gives `""`.
fn leading_digits(s: &str) -> Option<&str> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    Some(s[..end].trim_start_matches('0'))
}

/// Compare two digit runs as unbounded non-negative integers.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Which side took a set token such as `"7/6"` or `"6/7(4)"`.
///
/// Tokens without `/` are not sets. Anything that is not a strict win for
/// the left number, including equal or unreadable halves, counts for player2.
/// Games are compared without a width limit, so long digit runs still count.
fn set_winner(token: &str) -> Option<Side> {
    let (left, right) = token.split_once('/')?;
    match (leading_digits(left), leading_digits(right)) {
        (Some(l), Some(r)) if cmp_digits(l, r) == Ordering::Greater => Some(Side::Player1),
        (Some(_), Some(_)) => Some(Side::Player2),
        _ => {
            debug!(%token, "Unreadable set token counted for player2");
            Some(Side::Player2)
        }
    }
}

/// Count sets won by each player across `sets`.
pub fn count_sets<S: AsRef<str>>(sets: &[S]) -> (usize, usize) {
    sets.iter()
        .filter_map(|s| set_winner(s.as_ref()))
        .fold((0, 0), |(p1, p2), side| match side {
            Side::Player1 => (p1 + 1, p2),
            Side::Player2 => (p1, p2 + 1),
        })
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str().trim())
}

fn record_from(caps: &Captures<'_>, date: Option<&str>) -> MatchRecord {
    let player1 = group(caps, "player1").to_string();
    let player2 = group(caps, "player2").to_string();
    let score = group(caps, "score").to_string();
    let odds_player1 = parse_odds(group(caps, "odds1"));
    let odds_player2 = parse_odds(group(caps, "odds2"));

    let sets: Vec<String> = score.split_whitespace().map(str::to_string).collect();
    let (p1_sets, p2_sets) = count_sets(sets.as_slice());

    // Equal counts fall through to player2.
    let side = if p1_sets > p2_sets { Side::Player1 } else { Side::Player2 };
    let (winner, winner_odds, loser_odds) = match side {
        Side::Player1 => (player1.clone(), odds_player1, odds_player2),
        Side::Player2 => (player2.clone(), odds_player2, odds_player1),
    };

    MatchRecord {
        date: date.map(str::to_string),
        time: group(caps, "time").to_string(),
        tournament: group(caps, "tournament").to_string(),
        player1,
        player2,
        score,
        sets,
        winner,
        odds_player1,
        odds_player2,
        winner_odds,
        loser_odds,
    }
}

/// Extract every match result from `text`, in the order they appear.
///
/// `date` is copied verbatim into each record. Text that does not fit the
/// result layout is ignored; an empty vector is a normal outcome.
#[instrument(level = "info", skip(text), fields(bytes = text.len()))]
pub fn parse_match_text(text: &str, date: Option<&str>) -> Vec<MatchRecord> {
    let matches: Vec<MatchRecord> = MATCH_RE
        .captures_iter(text)
        .map(|caps| record_from(&caps, date))
        .collect();
    info!(count = matches.len(), "Parsed match results");
    matches
}
