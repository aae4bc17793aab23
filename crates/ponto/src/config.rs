use std::{env, path::PathBuf, time::Duration};

use ponto_core::{checkin::DEFAULT_MAX_PHOTO_BYTES, ratelimit::RateLimitPolicy};

/// Application configuration loaded from environment variables.
///
/// Built once in `main` and shared through `AppState`; nothing below the
/// entry point reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "./database/pontos.db")
    pub db_path: PathBuf,
    /// Root directory for stored photos, served under `/uploads` (default: "./uploads")
    pub upload_dir: PathBuf,
    /// Host advertised in startup logs (default: "localhost")
    pub server_ip: String,
    /// Maximum accepted photo size in bytes (default: 5 MiB)
    pub max_photo_bytes: usize,
    /// Rate limit window in milliseconds (default: 60,000)
    pub rate_limit_window_ms: u64,
    /// Requests allowed per client per window (default: 10)
    pub rate_limit_max: u32,
}

/// Subdirectory of `upload_dir` that holds check-in photos.
pub const PHOTO_SUBDIR: &str = "fotos";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DB_PATH` - SQLite database path (default: "./database/pontos.db")
    /// - `UPLOAD_DIR` - Upload root directory (default: "./uploads")
    /// - `SERVER_IP` - Advertised host (default: "localhost")
    /// - `MAX_PHOTO_BYTES` - Photo size limit (default: 5,242,880)
    /// - `RATE_LIMIT_WINDOW_MS` - Rate limit window, must be positive (default: 60,000)
    /// - `RATE_LIMIT_MAX` - Requests per window (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            db_path: lookup("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./database/pontos.db")),
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            server_ip: lookup("SERVER_IP").unwrap_or_else(|| "localhost".to_string()),
            max_photo_bytes: lookup("MAX_PHOTO_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_PHOTO_BYTES),
            // A zero window would reset the counter on every hit.
            rate_limit_window_ms: lookup("RATE_LIMIT_WINDOW_MS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(60_000),
            rate_limit_max: lookup("RATE_LIMIT_MAX")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Directory where new photos are written.
    pub fn photo_dir(&self) -> PathBuf {
        self.upload_dir.join(PHOTO_SUBDIR)
    }

    /// Rate limit policy for the ingest route.
    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max_requests: self.rate_limit_max,
            window: Duration::from_millis(self.rate_limit_window_ms),
        }
    }

    /// Request body limit for the ingest route: the photo plus room for the
    /// multipart framing and the name field.
    pub fn max_body_bytes(&self) -> usize {
        self.max_photo_bytes.saturating_add(64 * 1024)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    fn config() -> Config {
        Config {
            db_path: PathBuf::from("test.db"),
            upload_dir: PathBuf::from("/srv/uploads"),
            server_ip: "10.0.0.5".to_string(),
            max_photo_bytes: 1024,
            rate_limit_window_ms: 30_000,
            rate_limit_max: 4,
        }
    }

    #[test]
    fn test_photo_dir_is_under_upload_dir() {
        assert_eq!(config().photo_dir(), PathBuf::from("/srv/uploads/fotos"));
    }

    #[test]
    fn test_rate_limit_policy_conversion() {
        let policy = config().rate_limit_policy();

        assert_eq!(policy.max_requests, 4);
        assert_eq!(policy.window, Duration::from_secs(30));
    }

    #[test]
    fn test_body_limit_leaves_room_for_form_fields() {
        assert_eq!(config().max_body_bytes(), 1024 + 64 * 1024);
    }

    #[test]
    fn test_default_values() {
        let config = from_pairs(&[]);

        assert_eq!(config.db_path, PathBuf::from("./database/pontos.db"));
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.server_ip, "localhost");
        assert_eq!(config.max_photo_bytes, 5 * 1024 * 1024);
        assert_eq!(config.rate_limit_window_ms, 60_000);
        assert_eq!(config.rate_limit_max, 10);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = from_pairs(&[
            ("DB_PATH", "/data/kiosk.db"),
            ("UPLOAD_DIR", "/data/uploads"),
            ("SERVER_IP", "192.168.0.10"),
            ("MAX_PHOTO_BYTES", "2048"),
            ("RATE_LIMIT_WINDOW_MS", "1000"),
            ("RATE_LIMIT_MAX", "3"),
        ]);

        assert_eq!(config.db_path, PathBuf::from("/data/kiosk.db"));
        assert_eq!(config.upload_dir, PathBuf::from("/data/uploads"));
        assert_eq!(config.server_ip, "192.168.0.10");
        assert_eq!(config.max_photo_bytes, 2048);
        assert_eq!(config.rate_limit_window_ms, 1000);
        assert_eq!(config.rate_limit_max, 3);
    }

    #[test]
    fn test_unparseable_values_fall_back_to_defaults() {
        let config = from_pairs(&[
            ("MAX_PHOTO_BYTES", "five megs"),
            ("RATE_LIMIT_WINDOW_MS", "-1"),
            ("RATE_LIMIT_MAX", "ten"),
        ]);

        assert_eq!(config.max_photo_bytes, DEFAULT_MAX_PHOTO_BYTES);
        assert_eq!(config.rate_limit_window_ms, 60_000);
        assert_eq!(config.rate_limit_max, 10);
    }

    #[test]
    fn test_zero_window_falls_back_to_default() {
        let config = from_pairs(&[("RATE_LIMIT_WINDOW_MS", "0"), ("RATE_LIMIT_MAX", "1")]);

        assert_eq!(config.rate_limit_window_ms, 60_000);
        assert_eq!(config.rate_limit_policy().window, Duration::from_secs(60));
    }

    #[test]
    fn test_dotenv_file_feeds_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# kiosk settings").unwrap();
        writeln!(file, "DB_PATH=/var/lib/ponto/pontos.db").unwrap();
        writeln!(file, "UPLOAD_DIR=\"/var/lib/ponto/uploads\"").unwrap();
        writeln!(file, "RATE_LIMIT_MAX=25").unwrap();
        drop(file);

        let vars: HashMap<String, String> = dotenvy::from_path_iter(&path)
            .unwrap()
            .map(|item| item.unwrap())
            .collect();
        let config = Config::from_lookup(|key| vars.get(key).cloned());

        assert_eq!(config.db_path, PathBuf::from("/var/lib/ponto/pontos.db"));
        assert_eq!(config.upload_dir, PathBuf::from("/var/lib/ponto/uploads"));
        assert_eq!(config.rate_limit_max, 25);
        assert_eq!(config.server_ip, "localhost");
    }
}
