//! Versioned text encoding of the ledger.
//!
//! ```text
//! minegate-time-cache v1
//! mc 12000 1700000000
//! mcd 0 -
//! ```
//!
//! Each line holds the game id, accumulated seconds and the last-played
//! timestamp (`-` when never played). The text is hex-encoded as a whole.

use std::collections::BTreeMap;

use minegate_protocol::GameId;

use crate::TrackerError;
use crate::ledger::Record;

const HEADER: &str = "minegate-time-cache v1";
const NEVER: &str = "-";

/// Encodes ledger records into their hex snapshot.
pub fn encode(records: &BTreeMap<GameId, Record>) -> String {
    let mut text = String::from(HEADER);
    for (game, record) in records {
        let last = record
            .last_played
            .map_or_else(|| NEVER.to_string(), |t| t.to_string());
        text.push('\n');
        text.push_str(&format!("{game} {} {last}", record.seconds));
    }
    hex::encode(text)
}

/// Decodes a hex snapshot produced by [`encode`].
pub fn decode(snapshot: &str) -> Result<BTreeMap<GameId, Record>, TrackerError> {
    let bytes = hex::decode(snapshot.trim()).map_err(|e| TrackerError::Decode(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| TrackerError::Decode(e.to_string()))?;

    let mut lines = text.lines();
    match lines.next() {
        Some(HEADER) => {}
        Some(other) => return Err(TrackerError::Decode(format!("unsupported header: {other}"))),
        None => return Err(TrackerError::Decode("empty snapshot".into())),
    }

    let mut records = BTreeMap::new();
    for line in lines.filter(|l| !l.trim().is_empty()) {
        let (game, record) = parse_line(line)?;
        if records.insert(game, record).is_some() {
            return Err(TrackerError::Decode(format!("duplicate game: {game}")));
        }
    }
    Ok(records)
}

fn parse_line(line: &str) -> Result<(GameId, Record), TrackerError> {
    let malformed = || TrackerError::Decode(format!("malformed line: {line}"));

    let mut fields = line.split_whitespace();
    let (Some(id), Some(seconds), Some(last), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let game = id
        .parse::<GameId>()
        .map_err(|e| TrackerError::Decode(e.to_string()))?;
    let seconds = seconds.parse::<u64>().map_err(|_| malformed())?;
    let last_played = match last {
        NEVER => None,
        ts => Some(ts.parse::<i64>().map_err(|_| malformed())?),
    };

    Ok((game, Record { seconds, last_played }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BTreeMap<GameId, Record> {
        BTreeMap::from([
            (
                GameId::Minecraft,
                Record {
                    seconds: 12_000,
                    last_played: Some(1_700_000_000),
                },
            ),
            (
                GameId::MinecraftDungeons,
                Record {
                    seconds: 0,
                    last_played: None,
                },
            ),
        ])
    }

    #[test]
    fn encoded_text_layout() {
        let encoded = encode(&sample());
        let text = String::from_utf8(hex::decode(encoded).unwrap()).unwrap();
        assert_eq!(
            text,
            "minegate-time-cache v1\nmc 12000 1700000000\nmcd 0 -"
        );
    }

    #[test]
    fn decode_restores_records() {
        assert_eq!(decode(&encode(&sample())).unwrap(), sample());
    }

    #[test]
    fn empty_ledger_is_just_header() {
        let encoded = encode(&BTreeMap::new());
        assert!(decode(&encoded).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(matches!(decode("zz not hex"), Err(TrackerError::Decode(_))));
    }

    #[test]
    fn rejects_unknown_version() {
        let snapshot = hex::encode("minegate-time-cache v9\nmc 1 -");
        assert!(matches!(decode(&snapshot), Err(TrackerError::Decode(_))));
    }

    #[test]
    fn rejects_unknown_game() {
        let snapshot = hex::encode("minegate-time-cache v1\nmcedu 60 -");
        assert!(matches!(decode(&snapshot), Err(TrackerError::Decode(_))));
    }

    #[test]
    fn rejects_duplicate_game() {
        let snapshot = hex::encode("minegate-time-cache v1\nmc 60 -\nmc 120 1700000000");
        assert!(matches!(decode(&snapshot), Err(TrackerError::Decode(_))));
    }

    #[test]
    fn rejects_malformed_line() {
        for body in ["mc 60", "mc sixty -", "mc 60 yesterday", "mc 60 - extra"] {
            let snapshot = hex::encode(format!("minegate-time-cache v1\n{body}"));
            assert!(
                matches!(decode(&snapshot), Err(TrackerError::Decode(_))),
                "accepted {body:?}"
            );
        }
    }
}
