use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::{
    ConsumerMetricsSnapshot, LruMetricsSnapshot, ProducerMetricsSnapshot,
};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for container metrics snapshots.
///
/// Writes the Prometheus text exposition format, so the output can be served
/// from a scrape endpoint or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Export is best effort; a failing sink must not take the caller down.
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, s: &LruMetricsSnapshot) {
        self.counter("get_calls_total", s.get_calls);
        self.counter("get_hits_total", s.get_hits);
        self.counter("get_misses_total", s.get_misses);
        self.counter("insert_calls_total", s.insert_calls);
        self.counter("insert_updates_total", s.insert_updates);
        self.counter("insert_new_total", s.insert_new);
        self.counter("evict_calls_total", s.evict_calls);
        self.counter("evicted_entries_total", s.evicted_entries);
        self.counter("pop_lru_calls_total", s.pop_lru_calls);
        self.counter("pop_lru_found_total", s.pop_lru_found);
        self.counter("peek_calls_total", s.peek_calls);
        self.counter("peek_found_total", s.peek_found);
        self.counter("peek_lru_calls_total", s.peek_lru_calls);
        self.counter("peek_lru_found_total", s.peek_lru_found);
        self.counter("touch_calls_total", s.touch_calls);
        self.counter("touch_found_total", s.touch_found);
        self.counter("remove_calls_total", s.remove_calls);
        self.counter("remove_found_total", s.remove_found);
        self.counter("clear_calls_total", s.clear_calls);
        self.gauge("cache_len", s.cache_len);
        self.gauge("capacity", s.capacity);
    }
}

impl<W: Write + Send> MetricsExporter<ProducerMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, s: &ProducerMetricsSnapshot) {
        self.counter("push_calls_total", s.push_calls);
        self.counter("push_ok_total", s.push_ok);
        self.counter("push_full_total", s.push_full);
        self.counter("read_cursor_refreshes_total", s.read_cursor_refreshes);
        self.gauge("queue_len", s.queue_len);
        self.gauge("capacity", s.capacity);
    }
}

impl<W: Write + Send> MetricsExporter<ConsumerMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, s: &ConsumerMetricsSnapshot) {
        self.counter("pop_calls_total", s.pop_calls);
        self.counter("pop_ok_total", s.pop_ok);
        self.counter("pop_empty_total", s.pop_empty);
        self.counter("write_cursor_refreshes_total", s.write_cursor_refreshes);
        self.gauge("queue_len", s.queue_len);
        self.gauge("capacity", s.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_snapshot_is_prefixed_and_typed() {
        let exporter = PrometheusTextExporter::new("boundkit_lru", Vec::new());
        let snapshot = LruMetricsSnapshot {
            get_calls: 5,
            get_hits: 3,
            cache_len: 2,
            capacity: 8,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE boundkit_lru_get_calls_total counter\n"));
        assert!(text.contains("boundkit_lru_get_hits_total 3\n"));
        assert!(text.contains("# TYPE boundkit_lru_cache_len gauge\n"));
        assert!(text.contains("boundkit_lru_capacity 8\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&ProducerMetricsSnapshot {
            push_full: 2,
            ..Default::default()
        });
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\npush_full_total 2\n"));
    }
}
