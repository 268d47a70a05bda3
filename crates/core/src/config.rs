use std::env;

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Lifetime of every pre-signed result URL, in seconds.
pub const PRESIGN_EXPIRES_SECS: u64 = 120;

const DEFAULT_REGION: &str = "us-east-1";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

// ── RelayConfig ───────────────────────────────────────────────

/// Settings shared by the dispatcher and responder functions.
///
/// Read once per cold start. When `RELAY_PROFILE=PROD`, every key is first
/// looked up as `PROD_{KEY}`, falling back to `{KEY}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    /// AWS region for every service client.
    pub region: String,
    /// Bucket Athena writes results into; pre-signed URLs only target it.
    pub bucket_name: String,
    /// Key prefix (inside `bucket_name`) for query results.
    pub output_dir: String,
    /// Athena database queries run against.
    pub database: String,
    /// Athena workgroup.
    pub workgroup: String,
    /// State machine that tracks long-running queries.
    pub state_machine_arn: String,
    /// DynamoDB table holding WebSocket session records, keyed by `connectionId`.
    pub session_table: String,
    /// When set, the dispatcher only serves requests from this API id.
    pub api_id: Option<String>,
}

impl RelayConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        let profile = env_opt("RELAY_PROFILE")
            .map(|s| s.to_uppercase())
            .unwrap_or_default();
        Self::from_env_profiled(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn from_env_profiled(profile: &str) -> Self {
        let region = profiled_env_opt(profile, "RELAY_REGION")
            .or_else(|| profiled_env_opt(profile, "AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            profile: profile.to_string(),
            region,
            bucket_name: profiled_env_or(profile, "RELAY_BUCKET_NAME", ""),
            output_dir: profiled_env_or(profile, "RELAY_OUTPUT_DIR", "results")
                .trim_matches('/')
                .to_string(),
            database: profiled_env_or(profile, "RELAY_DATABASE", "default"),
            workgroup: profiled_env_or(profile, "RELAY_WORKGROUP", "primary"),
            state_machine_arn: profiled_env_or(profile, "RELAY_STATE_MACHINE_ARN", ""),
            session_table: profiled_env_or(profile, "RELAY_SESSION_TABLE", ""),
            api_id: profiled_env_opt(profile, "RELAY_API_ID"),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// S3 prefix handed to Athena as the result location: `s3://{bucket}/{output_dir}/`.
    pub fn output_location(&self) -> String {
        if self.output_dir.is_empty() {
            format!("s3://{}/", self.bucket_name)
        } else {
            format!("s3://{}/{}/", self.bucket_name, self.output_dir)
        }
    }

    /// Object key Athena writes the CSV result of `query_id` to.
    pub fn result_key(&self, query_id: &str) -> String {
        if self.output_dir.is_empty() {
            format!("{}.csv", query_id)
        } else {
            format!("{}/{}.csv", self.output_dir, query_id)
        }
    }

    /// Check the keys the dispatcher cannot run without.
    pub fn validate_dispatcher(&self) -> Result<(), RelayError> {
        if self.bucket_name.is_empty() {
            return Err(RelayError::MissingConfig("RELAY_BUCKET_NAME"));
        }
        if self.state_machine_arn.is_empty() {
            return Err(RelayError::MissingConfig("RELAY_STATE_MACHINE_ARN"));
        }
        Ok(())
    }

    /// Check the keys the responder cannot run without.
    pub fn validate_responder(&self) -> Result<(), RelayError> {
        if self.session_table.is_empty() {
            return Err(RelayError::MissingConfig("RELAY_SESSION_TABLE"));
        }
        Ok(())
    }

    /// Print a summary for cold-start logs.
    pub fn log_summary(&self) {
        tracing::info!(
            profile = %self.profile_label(),
            region = %self.region,
            bucket = %self.bucket_name,
            output_dir = %self.output_dir,
            database = %self.database,
            workgroup = %self.workgroup,
            "Relay config loaded"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────
