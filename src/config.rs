//! Engine configuration
//!
//! This module provides the JSON configuration that selects group parameters,
//! the nonce source, the challenge function and the broker layout. Every
//! section is optional and falls back to the legacy protocol.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::config::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{
//!     "group": { "prime": 23, "generator": 5 },
//!     "challenge": "additive",
//!     "nonce": { "kind": "id_derived" },
//!     "broker": { "num_partitions": 4, "capacity_per_partition": 1024 }
//! }"#)?;
//! config.validate()?;
//!
//! let prover = config.build_prover();
//! assert_eq!(prover.derive_public_key(7), 17);
//! # Ok::<(), compliance_fort::Error>(())
//! ```

use crate::broker::{check_layout, Broker, PartitionManager};
use crate::crypto::{ChallengeKind, NonceKind, NonceSource};
use crate::error::Result;
use crate::params::GroupParams;
use crate::proof::{Prover, Verifier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Prover built from configuration
pub type ConfiguredProver = Prover<Box<dyn NonceSource>, ChallengeKind>;

/// Verifier built from configuration
pub type ConfiguredVerifier = Verifier<ChallengeKind>;

/// Broker layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub num_partitions: usize,
    pub capacity_per_partition: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            num_partitions: 4,
            capacity_per_partition: 1024,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub group: GroupParams,
    pub challenge: ChallengeKind,
    pub nonce: NonceKind,
    pub broker: BrokerConfig,
}

impl EngineConfig {
    /// Load and validate a configuration file
    ///
    /// # Arguments
    /// * `path` - Path to a JSON file
    ///
    /// # Returns
    /// `Ok(EngineConfig)` if the file parses and validates, `Err` otherwise
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        log::debug!("loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check group parameters and broker layout
    pub fn validate(&self) -> Result<()> {
        self.group.validate()?;
        check_layout(
            self.broker.num_partitions,
            self.broker.capacity_per_partition,
        )
    }

    /// True when proofs stay compatible with legacy verifiers
    pub fn is_legacy(&self) -> bool {
        self.group == GroupParams::default()
            && self.challenge == ChallengeKind::Additive
            && self.nonce == NonceKind::IdDerived
    }

    pub fn build_prover(&self) -> ConfiguredProver {
        Prover::with_capabilities(self.group, self.nonce.build(), self.challenge)
    }

    pub fn build_verifier(&self) -> ConfiguredVerifier {
        Verifier::with_challenge(self.group, self.challenge)
    }

    pub fn build_broker(&self) -> Result<Broker<ChallengeKind>> {
        let manager = PartitionManager::new(
            self.broker.num_partitions,
            self.broker.capacity_per_partition,
        )?;
        Ok(Broker::new(manager, self.build_verifier()))
    }
}
