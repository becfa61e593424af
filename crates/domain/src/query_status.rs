use std::fmt;

/// How FTL disposed of a query, as reported in field 4 of a query line.
///
/// Codes outside the known table are kept verbatim in [`StatusType::Other`];
/// only the label projection is lossy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusType {
    Unknown,
    BlockedGravity,
    AllowedForwarded,
    AllowedCache,
    BlockedRegex,
    BlockedBlacklist,
    BlockedUpstream,
    BlockedUpstreamZeroReply,
    BlockedUpstreamNxDomain,
    BlockedGravityCnameInspection,
    BlockedRegexCnameInspection,
    BlockedBlacklistCnameInspection,
    Retried,
    /// Seen while DNSSEC validation is still in progress.
    RetriedIgnored,
    AlreadyForwarded,
    BlockedDbBusy,
    /// Mozilla canary, Apple private relay and similar.
    BlockedSpecialDomain,
    RepliedStaleCache,
    Other(i64),
}

impl StatusType {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => StatusType::Unknown,
            1 => StatusType::BlockedGravity,
            2 => StatusType::AllowedForwarded,
            3 => StatusType::AllowedCache,
            4 => StatusType::BlockedRegex,
            5 => StatusType::BlockedBlacklist,
            6 => StatusType::BlockedUpstream,
            7 => StatusType::BlockedUpstreamZeroReply,
            8 => StatusType::BlockedUpstreamNxDomain,
            9 => StatusType::BlockedGravityCnameInspection,
            10 => StatusType::BlockedRegexCnameInspection,
            11 => StatusType::BlockedBlacklistCnameInspection,
            12 => StatusType::Retried,
            13 => StatusType::RetriedIgnored,
            14 => StatusType::AlreadyForwarded,
            15 => StatusType::BlockedDbBusy,
            16 => StatusType::BlockedSpecialDomain,
            17 => StatusType::RepliedStaleCache,
            other => StatusType::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            StatusType::Unknown => 0,
            StatusType::BlockedGravity => 1,
            StatusType::AllowedForwarded => 2,
            StatusType::AllowedCache => 3,
            StatusType::BlockedRegex => 4,
            StatusType::BlockedBlacklist => 5,
            StatusType::BlockedUpstream => 6,
            StatusType::BlockedUpstreamZeroReply => 7,
            StatusType::BlockedUpstreamNxDomain => 8,
            StatusType::BlockedGravityCnameInspection => 9,
            StatusType::BlockedRegexCnameInspection => 10,
            StatusType::BlockedBlacklistCnameInspection => 11,
            StatusType::Retried => 12,
            StatusType::RetriedIgnored => 13,
            StatusType::AlreadyForwarded => 14,
            StatusType::BlockedDbBusy => 15,
            StatusType::BlockedSpecialDomain => 16,
            StatusType::RepliedStaleCache => 17,
            StatusType::Other(code) => *code,
        }
    }

    /// Coarse class used as the `status` metric label.
    pub fn as_label(&self) -> &'static str {
        match self {
            StatusType::Unknown => "unknown",
            StatusType::AllowedForwarded | StatusType::AllowedCache => "allowed",
            _ => "blocked",
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.as_label() == "allowed"
    }

    pub fn is_blocked(&self) -> bool {
        self.as_label() == "blocked"
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Reply classification reported in field 6 of a query line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyType {
    Waiting,
    NoData,
    NxDomain,
    Cname,
    Ip,
    Domain,
    RrName,
    ServFail,
    Refused,
    NotImp,
    Other,
    Dnssec,
    /// Query was dropped intentionally.
    None,
    Blob,
    Unrecognized(i64),
}

impl ReplyType {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => ReplyType::Waiting,
            1 => ReplyType::NoData,
            2 => ReplyType::NxDomain,
            3 => ReplyType::Cname,
            4 => ReplyType::Ip,
            5 => ReplyType::Domain,
            6 => ReplyType::RrName,
            7 => ReplyType::ServFail,
            8 => ReplyType::Refused,
            9 => ReplyType::NotImp,
            10 => ReplyType::Other,
            11 => ReplyType::Dnssec,
            12 => ReplyType::None,
            13 => ReplyType::Blob,
            other => ReplyType::Unrecognized(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ReplyType::Waiting => 0,
            ReplyType::NoData => 1,
            ReplyType::NxDomain => 2,
            ReplyType::Cname => 3,
            ReplyType::Ip => 4,
            ReplyType::Domain => 5,
            ReplyType::RrName => 6,
            ReplyType::ServFail => 7,
            ReplyType::Refused => 8,
            ReplyType::NotImp => 9,
            ReplyType::Other => 10,
            ReplyType::Dnssec => 11,
            ReplyType::None => 12,
            ReplyType::Blob => 13,
            ReplyType::Unrecognized(code) => *code,
        }
    }

    /// Value of the `reply` metric label. Only the common replies get their
    /// own label; everything else collapses to `unknown`.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReplyType::Waiting => "waiting",
            ReplyType::NoData => "NODATA",
            ReplyType::NxDomain => "NXDOMAIN",
            ReplyType::Ip => "IP",
            ReplyType::Cname => "CNAME",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ReplyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
