use pihole_collector_domain::Query;

/// Label names of `pihole_query_duration_ms_buckets`, in the order
/// [`HistogramLabels::values`] returns them.
pub const HISTOGRAM_LABEL_NAMES: [&str; 4] = ["type", "reply", "status", "upstream"];

/// Label names of `pihole_query_duration_ms`, in the order
/// [`GaugeLabels::values`] returns them.
pub const GAUGE_LABEL_NAMES: [&str; 6] = ["type", "reply", "status", "upstream", "client", "domain"];

/// Histogram series key. Leaves out client and domain so one series
/// aggregates many queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistogramLabels {
    pub query_type: String,
    pub status: &'static str,
    pub reply: &'static str,
    pub upstream: String,
}

impl HistogramLabels {
    pub fn from_query(query: &Query) -> Self {
        Self {
            query_type: query.query_type.clone(),
            status: query.status.as_label(),
            reply: query.reply_type.as_label(),
            upstream: query.upstream.clone(),
        }
    }

    pub fn values(&self) -> [&str; 4] {
        [
            self.query_type.as_str(),
            self.reply,
            self.status,
            self.upstream.as_str(),
        ]
    }
}

/// Gauge series key, specific enough to point at a single client/domain pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GaugeLabels {
    pub query_type: String,
    pub status: &'static str,
    pub reply: &'static str,
    pub client: String,
    pub upstream: String,
    pub domain: String,
}

impl GaugeLabels {
    pub fn from_query(query: &Query) -> Self {
        Self {
            query_type: query.query_type.clone(),
            status: query.status.as_label(),
            reply: query.reply_type.as_label(),
            client: query.client_ip.clone(),
            upstream: query.upstream.clone(),
            domain: query.domain.clone(),
        }
    }

    pub fn values(&self) -> [&str; 6] {
        [
            self.query_type.as_str(),
            self.reply,
            self.status,
            self.upstream.as_str(),
            self.client.as_str(),
            self.domain.as_str(),
        ]
    }
}
