use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    ConsumerMetricsRecorder, CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder,
    ProducerMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub clear_calls: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
}

impl LruMetricsReadRecorder for LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProducerMetrics {
    pub push_calls: u64,
    pub push_ok: u64,
    pub push_full: u64,
    pub read_cursor_refreshes: u64,
}

impl ProducerMetricsRecorder for ProducerMetrics {
    fn record_push_ok(&mut self) {
        self.push_calls += 1;
        self.push_ok += 1;
    }

    fn record_push_full(&mut self) {
        self.push_calls += 1;
        self.push_full += 1;
    }

    fn record_read_cursor_refresh(&mut self) {
        self.read_cursor_refreshes += 1;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsumerMetrics {
    pub pop_calls: u64,
    pub pop_ok: u64,
    pub pop_empty: u64,
    pub write_cursor_refreshes: u64,
}

impl ConsumerMetricsRecorder for ConsumerMetrics {
    fn record_pop_ok(&mut self) {
        self.pop_calls += 1;
        self.pop_ok += 1;
    }

    fn record_pop_empty(&mut self) {
        self.pop_calls += 1;
        self.pop_empty += 1;
    }

    fn record_write_cursor_refresh(&mut self) {
        self.write_cursor_refreshes += 1;
    }
}
