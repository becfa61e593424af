use crate::errors::QueryParseError;
use crate::query_status::{ReplyType, StatusType};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Number of space separated fields FTL writes per query line.
pub const QUERY_LINE_FIELDS: usize = 12;

/// One DNS query event as reported by `>getallqueries-time`.
///
/// Example wire line:
/// `1734952435 AAAA cc-api-data.adobe.io 192.168.1.14 1 0 4 0 N/A -1 N/A#0 ""`
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub timestamp: DateTime<Utc>,
    pub query_type: String,
    pub domain: String,
    pub client_ip: String,
    pub status: StatusType,
    pub dnssec: i64,
    pub reply_type: ReplyType,
    /// Wire value is in tenths of a millisecond.
    pub delay_ms: f64,
    /// `N/A` unless the query went through CNAME inspection.
    pub cname_domain: String,
    /// `-1` when no regex or list entry matched.
    pub regex_match_id: i64,
    /// `host#port`, or `N/A#0` when nothing was forwarded.
    pub upstream: String,
    /// The 12th wire field is counted but not decoded yet.
    pub query_ede: String,
}

impl Query {
    /// Decode one line. Either every field decodes or the whole line is rejected.
    pub fn parse_line(line: &str) -> Result<Self, QueryParseError> {
        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() != QUERY_LINE_FIELDS {
            return Err(QueryParseError::FieldCount {
                found: fields.len(),
            });
        }

        let unix_seconds = parse_int("timestamp", fields[0])?;
        let timestamp = DateTime::from_timestamp(unix_seconds, 0)
            .ok_or(QueryParseError::TimestampOutOfRange(unix_seconds))?;
        let status = parse_int("status", fields[4])?;
        let dnssec = parse_int("dnssec", fields[5])?;
        let reply = parse_int("reply", fields[6])?;
        let delay_tenths = parse_int("delay", fields[7])?;
        let regex_match_id = parse_int("regex_match_id", fields[9])?;

        Ok(Self {
            timestamp,
            query_type: fields[1].to_string(),
            domain: fields[2].to_string(),
            client_ip: fields[3].to_string(),
            status: StatusType::from_code(status),
            dnssec,
            reply_type: ReplyType::from_code(reply),
            delay_ms: delay_tenths as f64 / 10.0,
            cname_domain: fields[8].to_string(),
            regex_match_id,
            upstream: fields[10].to_string(),
            query_ede: String::new(),
        })
    }

    pub fn is_blocked(&self) -> bool {
        self.status.is_blocked()
    }
}

impl FromStr for Query {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, QueryParseError> {
    raw.parse::<i64>()
        .map_err(|_| QueryParseError::InvalidInteger {
            field,
            value: raw.to_string(),
        })
}
