//! Session dump parser
//!
//! `show sess` prints one session per line:
//!
//! ```text
//! 0x55d3e1: proto=tcpv4 src=10.0.0.1:51234 fe=http be=web srv=srv1 age=5s calls=2 cpu=0 lat=0 exp=30s
//! ```

use serde::Serialize;

/// One session of a `show sess` dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub id: String,
    pub proto: String,
    pub source: String,
    pub cpu: String,
    pub latency: String,
    pub age: String,
    pub calls: String,
    pub expire: String,

    /// The line as received
    pub raw: String,
}

impl SessionRecord {
    /// Parse a single session line
    pub fn parse(line: &str) -> Self {
        let mut record = SessionRecord {
            raw: line.to_string(),
            ..Default::default()
        };

        for (i, token) in line.split(' ').enumerate() {
            if i == 0 && !token.is_empty() {
                record.id = token.strip_suffix(':').unwrap_or(token).to_string();
                continue;
            }

            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            let field = match key {
                "proto" => &mut record.proto,
                "src" => &mut record.source,
                "age" => &mut record.age,
                "calls" => &mut record.calls,
                "cpu" => &mut record.cpu,
                "lat" => &mut record.latency,
                "exp" => &mut record.expire,
                _ => continue,
            };
            *field = value.to_string();
        }

        record
    }
}

/// Parse a `show sess` dump, one record per line
pub fn parse_sessions(text: &str) -> Vec<SessionRecord> {
    text.trim().lines().map(SessionRecord::parse).collect()
}
