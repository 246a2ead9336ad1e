//! HTTP Metrics - 请求指标采集
//!
//! 不引入外部指标库：基于 `DashMap` + 原子计数器实现带动态标签的
//! counter/histogram，按 Prometheus 文本格式导出。标签展开为有序键值
//! 向量以保证渲染顺序确定。直方图内部以微秒整数计数避免浮点累加，
//! 桶边界与慢请求阈值来自配置。

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::config::MetricsConfig;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn render_labels(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// 读取单个序列的当前值（测试用）
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, render_labels(r.key()), val);
        }
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn with_buckets(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

pub struct HistogramVec {
    map: DashMap<Vec<(String, String)>, AtomicHistogram>,
    /// 桶边界（微秒，严格递增）
    bounds_micros: Vec<u64>,
    /// 渲染用的秒级 le 标签（如 "0.1"、"5"）
    bound_labels: Vec<String>,
}

impl HistogramVec {
    fn new(bounds_secs: &[f64]) -> Self {
        Self {
            bounds_micros: bounds_secs
                .iter()
                .map(|b| (b * 1_000_000.0).round() as u64)
                .collect(),
            bound_labels: bounds_secs.iter().map(|b| format!("{}", b)).collect(),
            map: DashMap::new(),
        }
    }

    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicHistogram::with_buckets(self.bounds_micros.len()));
        let micros = duration.as_micros() as u64;

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);

        // 累积桶：所有不小于观测值的桶都加 1
        for (i, &bound) in self.bounds_micros.iter().enumerate() {
            if micros <= bound {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let hist = r.value();
            let label_str = render_labels(r.key());
            let prefix = if label_str.is_empty() {
                String::new()
            } else {
                format!("{},", label_str)
            };

            for (i, le) in self.bound_labels.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum_secs = hist.sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, label_str, sum_secs);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, label_str, count);
        }
    }
}

/// 进程级 HTTP 请求指标
///
/// 所有路由共享一个实例（经由 AppState），每个请求恰好产生一次观测。
pub struct HttpMetrics {
    requests: CounterVec,
    slow_requests: CounterVec,
    duration: HistogramVec,
    slow_threshold: Duration,
}

impl HttpMetrics {
    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            requests: CounterVec::default(),
            slow_requests: CounterVec::default(),
            duration: HistogramVec::new(&config.duration_buckets),
            slow_threshold: Duration::from_secs_f64(config.slow_threshold_secs),
        }
    }

    /// 记录一次请求观测
    pub fn observe(&self, method: &str, path: &str, status: u16, duration: Duration) {
        let status = status.to_string();
        self.requests
            .inc(&[("method", method), ("path", path), ("status", &status)]);
        self.duration
            .observe(&[("method", method), ("path", path)], duration);

        if duration > self.slow_threshold {
            self.slow_requests
                .inc(&[("method", method), ("path", path)]);
        }
    }

    /// 某一请求序列的累计次数（测试用）
    pub fn request_count(&self, method: &str, path: &str, status: u16) -> u64 {
        let status = status.to_string();
        self.requests
            .get(&[("method", method), ("path", path), ("status", &status)])
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.requests.render("rostra_http_requests_total", &mut out);
        self.slow_requests
            .render("rostra_http_slow_requests_total", &mut out);
        self.duration
            .render("rostra_http_request_duration_seconds", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricsConfig;

    fn metrics() -> HttpMetrics {
        HttpMetrics::new(&MetricsConfig::default())
    }

    #[test]
    fn test_counter_increments_per_label_set() {
        let m = metrics();
        m.observe("GET", "/api/v1/employee", 200, Duration::from_millis(5));
        m.observe("GET", "/api/v1/employee", 200, Duration::from_millis(5));
        m.observe("GET", "/api/v1/employee", 404, Duration::from_millis(5));

        assert_eq!(m.request_count("GET", "/api/v1/employee", 200), 2);
        assert_eq!(m.request_count("GET", "/api/v1/employee", 404), 1);
        assert_eq!(m.request_count("POST", "/api/v1/employee", 200), 0);
    }

    #[test]
    fn test_render_exposes_configured_bucket_bounds() {
        let m = metrics();
        m.observe("GET", "/api/v1/employee", 200, Duration::from_millis(50));

        let text = m.render();
        for le in ["0.1", "0.3", "1.2", "5", "10", "+Inf"] {
            assert!(
                text.contains(&format!("le=\"{}\"", le)),
                "missing bucket {} in:\n{}",
                le,
                text
            );
        }
        assert!(text.contains("# TYPE rostra_http_request_duration_seconds histogram"));
        assert!(text.contains("# TYPE rostra_http_requests_total counter"));
    }

    #[test]
    fn test_buckets_are_cumulative() {
        let m = metrics();
        // 200ms 落在 0.3 及更大的桶，不在 0.1 桶
        m.observe("GET", "/ping", 200, Duration::from_millis(200));

        let text = m.render();
        assert!(text.contains("le=\"0.1\"} 0"));
        assert!(text.contains("le=\"0.3\"} 1"));
        assert!(text.contains("le=\"10\"} 1"));
        assert!(text.contains("le=\"+Inf\"} 1"));
    }

    #[test]
    fn test_slow_request_threshold() {
        let m = metrics();
        m.observe("GET", "/slow", 200, Duration::from_millis(1500));
        m.observe("GET", "/fast", 200, Duration::from_millis(500));

        let text = m.render();
        assert!(text.contains("rostra_http_slow_requests_total{method=\"GET\",path=\"/slow\"} 1"));
        // 未超阈值的请求不应计入慢请求序列
        assert!(!text
            .lines()
            .any(|l| l.starts_with("rostra_http_slow_requests_total") && l.contains("/fast")));
    }

    #[test]
    fn test_label_escaping() {
        let v = escape_label("a\"b\\c\nd");
        assert_eq!(v, "a\\\"b\\\\c\\nd");
    }
}
