/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */

// src/config.rs
// Broker connection settings for the bridge.

use std::time::Duration;

use tracing::warn;

// DEFAULT_RECONNECT_BACKOFF is the fixed delay between reconnect
// attempts after the link has been up at least once.
pub const DEFAULT_RECONNECT_BACKOFF: Duration = Duration::from_secs(5);

// DEFAULT_KEEP_ALIVE is the MQTT keep-alive interval sent to the
// broker on connect.
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(30);

// BrokerCredentials is an optional username/password pair for brokers
// that require authentication.
#[derive(Clone, Debug)]
pub struct BrokerCredentials {
    pub username: String,
    pub password: String,
}

// BridgeConfig holds everything needed to reach the broker and pick
// the telemetry topics to watch.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    pub broker_host: String,
    pub broker_port: u16,
    pub credentials: Option<BrokerCredentials>,
    // base_topic is the prefix the vehicle topics hang off of, e.g.
    // "car_telemetry". Vehicle topics are <base_topic>/<make>-<model>.
    pub base_topic: String,
    pub reconnect_backoff: Duration,
    pub keep_alive: Duration,
}

impl BridgeConfig {
    pub fn new(broker_host: impl Into<String>, broker_port: u16, base_topic: impl Into<String>) -> Self {
        Self {
            broker_host: broker_host.into(),
            broker_port,
            credentials: None,
            base_topic: base_topic.into(),
            reconnect_backoff: DEFAULT_RECONNECT_BACKOFF,
            keep_alive: DEFAULT_KEEP_ALIVE,
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(BrokerCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    // with_optional_credentials applies whatever credential halves are
    // present. A username alone authenticates with an empty password;
    // a password without a username is unusable, so the bridge warns
    // and connects anonymously.
    pub fn with_optional_credentials(
        mut self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Self {
        match (username, password) {
            (Some(username), password) => {
                self.credentials = Some(BrokerCredentials {
                    username: username.to_string(),
                    password: password.unwrap_or_default().to_string(),
                });
            }
            (None, Some(_)) => {
                warn!("MQTT password set without a username, connecting anonymously");
            }
            (None, None) => {}
        }
        self
    }

    pub fn with_reconnect_backoff(mut self, backoff: Duration) -> Self {
        self.reconnect_backoff = backoff;
        self
    }

    // subscribe_topic is the filter passed to the broker. The base
    // topic gets a multi-level wildcard appended so every vehicle
    // under it is covered; a base that already carries a wildcard is
    // used as-is.
    pub fn subscribe_topic(&self) -> String {
        let base = self.base_topic.trim_end_matches('/');
        if base.contains('#') || base.contains('+') {
            return base.to_string();
        }
        format!("{base}/#")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_topic_appends_wildcard() {
        let config = BridgeConfig::new("localhost", 1883, "car_telemetry");
        assert_eq!(config.subscribe_topic(), "car_telemetry/#");
    }

    #[test]
    fn subscribe_topic_trims_trailing_slash() {
        let config = BridgeConfig::new("localhost", 1883, "car_telemetry/");
        assert_eq!(config.subscribe_topic(), "car_telemetry/#");
    }

    #[test]
    fn subscribe_topic_keeps_explicit_wildcard() {
        let config = BridgeConfig::new("localhost", 1883, "car_telemetry/#");
        assert_eq!(config.subscribe_topic(), "car_telemetry/#");
    }

    #[test]
    fn defaults_match_expected_timings() {
        let config = BridgeConfig::new("localhost", 1883, "t");
        assert_eq!(config.reconnect_backoff, Duration::from_secs(5));
        assert_eq!(config.keep_alive, Duration::from_secs(30));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn with_credentials_sets_both_fields() {
        let config =
            BridgeConfig::new("localhost", 1883, "t").with_credentials("garage", "hunter2");
        let creds = config.credentials.expect("credentials should be set");
        assert_eq!(creds.username, "garage");
        assert_eq!(creds.password, "hunter2");
    }

    #[test]
    fn optional_credentials_with_both_halves() {
        let config = BridgeConfig::new("localhost", 1883, "t")
            .with_optional_credentials(Some("garage"), Some("hunter2"));
        let creds = config.credentials.expect("credentials should be set");
        assert_eq!(creds.username, "garage");
        assert_eq!(creds.password, "hunter2");
    }

    #[test]
    fn username_alone_gets_an_empty_password() {
        let config = BridgeConfig::new("localhost", 1883, "t")
            .with_optional_credentials(Some("garage"), None);
        let creds = config.credentials.expect("credentials should be set");
        assert_eq!(creds.username, "garage");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn password_alone_connects_anonymously() {
        let config = BridgeConfig::new("localhost", 1883, "t")
            .with_optional_credentials(None, Some("hunter2"));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn no_credential_halves_stays_anonymous() {
        let config =
            BridgeConfig::new("localhost", 1883, "t").with_optional_credentials(None, None);
        assert!(config.credentials.is_none());
    }
}
