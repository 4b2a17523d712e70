//! Proof-of-work configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use boulder_types::PrivateKey;

use crate::CacheError;

/// Configuration consumed by the proof-of-work core.
///
/// Can be loaded from a TOML file via [`PowConfig::from_toml_file`] or built
/// programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PowConfig {
    /// Whether this node computes BoulderHash itself.
    #[serde(default = "default_true")]
    pub enable_boulderhash: bool,

    /// Whether to ignore the signed hash cache and always recompute.
    #[serde(default)]
    pub disable_signed_hashes: bool,

    /// Hex-encoded private key for minting signed entries (trusted nodes only).
    #[serde(default)]
    pub hash_signing_key: Option<String>,

    /// Whether this node mines new blocks.
    #[serde(default)]
    pub enable_mining: bool,

    /// Worker threads for parallel state filling (0 = hardware concurrency).
    #[serde(default)]
    pub worker_threads: usize,

    /// Contiguous states filled per worker task.
    #[serde(default = "default_states_per_thread")]
    pub states_per_thread: usize,

    /// Data directory holding the persisted hash cache.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_states_per_thread() -> usize {
    1
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./boulder_data")
}

// ── Impl ───────────────────────────────────────────────────────────────

impl PowConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, CacheError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CacheError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CacheError> {
        toml::from_str(s).map_err(|e| CacheError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("PowConfig is always serializable to TOML")
    }

    /// Startup validation.
    ///
    /// A node needs at least one way to obtain work hashes, and a miner must
    /// be able to produce them, not merely trust signed ones.
    pub fn validate(&self) -> Result<(), CacheError> {
        if !self.enable_boulderhash && self.disable_signed_hashes {
            return Err(CacheError::Config(
                "both boulderhash and signed hashes are disabled; cannot verify blocks".into(),
            ));
        }
        if self.enable_mining && !self.enable_boulderhash {
            return Err(CacheError::Config(
                "mining requires boulderhash to be enabled".into(),
            ));
        }
        Ok(())
    }

    /// Decode the configured hash-signing key, if any.
    pub fn signing_key(&self) -> Result<Option<PrivateKey>, CacheError> {
        let Some(hex_key) = &self.hash_signing_key else {
            return Ok(None);
        };
        let bytes = hex::decode(hex_key)
            .map_err(|e| CacheError::Config(format!("invalid hash_signing_key: {e}")))?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            CacheError::Config("hash_signing_key must be 32 hex-encoded bytes".into())
        })?;
        Ok(Some(PrivateKey(arr)))
    }
}

impl Default for PowConfig {
    fn default() -> Self {
        Self {
            enable_boulderhash: default_true(),
            disable_signed_hashes: false,
            hash_signing_key: None,
            enable_mining: false,
            worker_threads: 0,
            states_per_thread: default_states_per_thread(),
            data_dir: default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = PowConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = PowConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.enable_boulderhash, config.enable_boulderhash);
        assert_eq!(parsed.states_per_thread, config.states_per_thread);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = PowConfig::from_toml_str("").expect("empty toml should use defaults");
        assert!(config.enable_boulderhash);
        assert!(!config.disable_signed_hashes);
        assert_eq!(config.states_per_thread, 1);
        assert_eq!(config.worker_threads, 0);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            worker_threads = 8
            states_per_thread = 2
        "#;
        let config = PowConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.worker_threads, 8);
        assert_eq!(config.states_per_thread, 2);
        assert!(config.enable_boulderhash); // default
    }

    #[test]
    fn default_config_validates() {
        PowConfig::default().validate().unwrap();
    }

    #[test]
    fn both_sources_disabled_is_invalid() {
        let config = PowConfig {
            enable_boulderhash: false,
            disable_signed_hashes: true,
            ..PowConfig::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::Config(_))));
    }

    #[test]
    fn signed_only_node_validates() {
        let config = PowConfig {
            enable_boulderhash: false,
            disable_signed_hashes: false,
            ..PowConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn mining_without_boulderhash_is_invalid() {
        let config = PowConfig {
            enable_boulderhash: false,
            enable_mining: true,
            ..PowConfig::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::Config(_))));
    }

    #[test]
    fn signing_key_decodes() {
        let config = PowConfig {
            hash_signing_key: Some("11".repeat(32)),
            ..PowConfig::default()
        };
        let key = config.signing_key().unwrap().unwrap();
        assert_eq!(key.0, [0x11; 32]);
    }

    #[test]
    fn signing_key_wrong_length_rejected() {
        let config = PowConfig {
            hash_signing_key: Some("1234".into()),
            ..PowConfig::default()
        };
        assert!(matches!(
            config.signing_key(),
            Err(CacheError::Config(_))
        ));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = PowConfig::from_toml_file("/nonexistent/boulder.toml");
        assert!(matches!(result, Err(CacheError::Config(_))));
    }
}
