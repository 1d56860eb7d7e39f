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

// src/errors.rs
// Error taxonomy for the bridge.
//
// The split that matters operationally: connection failures before the
// first successful handshake are fatal for the process, everything else
// is contained to the message that caused it (logged, dropped, loop
// continues).

use rumqttc::ConnectReturnCode;

// BridgeError covers everything that can go wrong between a telemetry
// message arriving and an odometer record landing in LubeLogger.
#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    // ConnectFailure wraps transport-level MQTT failures. Fatal only
    // when it happens before the first successful handshake; the
    // reconnect loop absorbs it afterwards.
    #[error("MQTT connection failure: {0}")]
    ConnectFailure(#[from] rumqttc::ConnectionError),

    // HandshakeRejected is a broker that answered but said no
    // (bad credentials, bad client id, ...).
    #[error("Broker rejected the session: {code:?}")]
    HandshakeRejected { code: ConnectReturnCode },

    // Mqtt covers request-side client failures (e.g. subscribe on a
    // closed client).
    #[error("MQTT client error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    // MalformedMessage is a payload that is not UTF-8, not JSON, or
    // is missing a usable odometer value. Dropped, never fatal.
    #[error("Malformed message on topic '{topic}': {detail}")]
    MalformedMessage { topic: String, detail: String },

    // MalformedTopic is a topic that does not look like
    // <base>/<make>-<model>.
    #[error("Topic '{topic}' is not of the form <base>/<make>-<model>")]
    MalformedTopic { topic: String },

    // VehicleNotFound means the roster has no case-insensitive
    // make/model match for the topic. This is a checked outcome, not
    // an undefined identifier leaking downstream.
    #[error("No vehicle in the roster matches make '{make}' model '{model}'")]
    VehicleNotFound { make: String, model: String },

    // UnusableRecord is a latest-odometer response that parsed as JSON
    // but holds a value the guard cannot compare against.
    #[error("Unusable latest odometer record for vehicle {vehicle_id}: {detail}")]
    UnusableRecord { vehicle_id: i64, detail: String },

    // Upstream is any tracking-service failure: non-2xx, transport
    // error, or an unparsable response. Never retried here.
    #[error("Tracking service error: {0}")]
    Upstream(#[from] liblube::LubeApiError),
}

impl BridgeError {
    // malformed_message creates a MalformedMessage for a given topic.
    pub fn malformed_message(topic: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedMessage {
            topic: topic.into(),
            detail: detail.into(),
        }
    }

    // malformed_topic creates a MalformedTopic error.
    pub fn malformed_topic(topic: impl Into<String>) -> Self {
        Self::MalformedTopic {
            topic: topic.into(),
        }
    }

    // vehicle_not_found creates a VehicleNotFound error.
    pub fn vehicle_not_found(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self::VehicleNotFound {
            make: make.into(),
            model: model.into(),
        }
    }

    // unusable_record creates an UnusableRecord error.
    pub fn unusable_record(vehicle_id: i64, detail: impl Into<String>) -> Self {
        Self::UnusableRecord {
            vehicle_id,
            detail: detail.into(),
        }
    }

    // is_recoverable is true for per-message errors that the
    // connection loop contains by logging and dropping the message.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::ConnectFailure(_) | Self::HandshakeRejected { .. } | Self::Mqtt(_)
        )
    }

    // is_malformed is true for errors caused by the inbound message
    // itself (payload or topic shape).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedMessage { .. } | Self::MalformedTopic { .. }
        )
    }

    // is_upstream is true for errors caused by the tracking service.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::UnusableRecord { .. })
    }

    // is_connection_error is true for MQTT transport and session
    // failures.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::ConnectFailure(_) | Self::HandshakeRejected { .. } | Self::Mqtt(_)
        )
    }
}
