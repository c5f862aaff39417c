//! Logging subsystem
//!
//! Engine code logs with a leading subsystem tag, e.g.
//! `"[ledger] points incremented"`. The file layer writes one JSON record per
//! event and lifts that tag, and a `user_id` field when present, to the top
//! level so a single user's streak, task and ledger history can be grepped out
//! of the rotated files. Debug builds also log to stdout with the stock
//! formatter. `log` records from the domain crate are bridged into `tracing`.

use log::LevelFilter;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "mindhaven.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Initialize logging. Safe to call more than once; later calls are no-ops.
///
/// `default_level` (e.g. `"info"`) applies to the engine's own targets when
/// `RUST_LOG` is not set.
pub fn init_logger(log_dir: PathBuf, default_level: &str) -> anyhow::Result<()> {
    if FILE_GUARD.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(&log_dir)?;

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::daily(&log_dir, LOG_FILE_PREFIX));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .event_format(EngineJsonFormatter)
        .with_filter(env_filter_or(&filter_directives(default_level)));

    let stdout_layer = cfg!(debug_assertions).then(|| {
        fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_timer(fmt::time::ChronoLocal::new("%H:%M:%S%.3f".to_string()))
            .with_filter(env_filter_or("debug,mindhaven=trace"))
    });

    tracing::subscriber::set_global_default(
        Registry::default().with(file_layer).with(stdout_layer),
    )
    .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = FILE_GUARD.set(guard);

    tracing::info!(
        target: "mindhaven::logging",
        log_dir = %log_dir.display(),
        level = default_level,
        "Logger initialized"
    );

    Ok(())
}

/// Directives for the file layer; `RUST_LOG` wins when set.
fn filter_directives(default_level: &str) -> String {
    if cfg!(debug_assertions) {
        "debug,mindhaven=trace".to_string()
    } else {
        format!("warn,mindhaven={}", default_level)
    }
}

fn env_filter_or(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Split `"[streak] restored"` into `("streak", "restored")`.
fn split_subsystem(message: &str) -> (Option<&str>, &str) {
    let Some(rest) = message.strip_prefix('[') else {
        return (None, message);
    };
    match rest.split_once(']') {
        Some((tag, body))
            if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_lowercase() || c == '_') =>
        {
            (Some(tag), body.trim_start())
        }
        _ => (None, message),
    }
}

/// Build one file record from an event's metadata and recorded fields.
fn engine_record(
    timestamp: String,
    level: &str,
    target: &str,
    location: Option<(&str, u32)>,
    mut fields: Map<String, Value>,
) -> Value {
    fields.retain(|key, _| !key.starts_with("log."));

    let raw_message = match fields.remove("message") {
        Some(Value::String(message)) => message,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let (subsystem, message) = split_subsystem(&raw_message);

    let mut record = json!({
        "timestamp": timestamp,
        "level": level,
        "target": target,
        "message": message,
    });

    if let Some(subsystem) = subsystem {
        record["subsystem"] = json!(subsystem);
    }
    if let Some(user_id) = fields.remove("user_id") {
        record["user_id"] = user_id;
    }
    if let Some((file, line)) = location {
        record["file"] = json!(file);
        record["line"] = json!(line);
    }
    if !fields.is_empty() {
        record["fields"] = Value::Object(fields);
    }

    record
}

struct EngineJsonFormatter;

impl<S, N> FormatEvent<S, N> for EngineJsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut fields = FieldMap::default();
        event.record(&mut fields);

        let record = engine_record(
            chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            metadata.level().as_str(),
            metadata.target(),
            metadata.file().zip(metadata.line()),
            fields.0,
        );

        writeln!(writer, "{}", record)
    }
}

#[derive(Default)]
struct FieldMap(Map<String, Value>);

impl Visit for FieldMap {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), json!(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), json!(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), json!(format!("{:?}", value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_release_directives_scope_level_to_engine_targets() {
        let directives = filter_directives("warn");
        if cfg!(debug_assertions) {
            assert_eq!(directives, "debug,mindhaven=trace");
        } else {
            assert_eq!(directives, "warn,mindhaven=warn");
        }
    }

    #[test]
    fn test_split_subsystem_tag() {
        assert_eq!(
            split_subsystem("[check_in] dropped malformed row"),
            (Some("check_in"), "dropped malformed row")
        );
        assert_eq!(split_subsystem("Logger initialized"), (None, "Logger initialized"));
        assert_eq!(split_subsystem("[] empty"), (None, "[] empty"));
        assert_eq!(split_subsystem("[Not A Tag] x"), (None, "[Not A Tag] x"));
    }

    #[test]
    fn test_record_lifts_subsystem_and_user() {
        let record = engine_record(
            "2024-03-20T12:00:00.000+00:00".to_string(),
            "DEBUG",
            "mindhaven_infrastructure::persistence",
            Some(("ledger_repo.rs", 42)),
            fields(&[
                ("message", json!("[ledger] points incremented")),
                ("user_id", json!("alice")),
                ("delta", json!(100)),
                ("log.target", json!("ignored")),
            ]),
        );

        assert_eq!(record["subsystem"], "ledger");
        assert_eq!(record["message"], "points incremented");
        assert_eq!(record["user_id"], "alice");
        assert_eq!(record["line"], 42);
        assert_eq!(record["fields"], json!({ "delta": 100 }));
    }

    #[test]
    fn test_record_without_tag_or_extra_fields() {
        let record = engine_record(
            "ts".to_string(),
            "INFO",
            "mindhaven::logging",
            None,
            fields(&[("message", json!("Logger initialized"))]),
        );

        assert_eq!(record["message"], "Logger initialized");
        assert!(record.get("subsystem").is_none());
        assert!(record.get("fields").is_none());
        assert!(record.get("file").is_none());
    }

    #[test]
    fn test_init_logger_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_dir = dir.path().join("logs");
        init_logger(log_dir.clone(), "info").expect("first init");
        init_logger(log_dir.clone(), "debug").expect("second init");
        assert!(log_dir.is_dir());
    }
}
