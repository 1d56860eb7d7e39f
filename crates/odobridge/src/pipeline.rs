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

// src/pipeline.rs
// Per-message processing: parse, resolve, compare, write.

use std::sync::Arc;

use liblube::lube_model::{Mileage, OdometerRecord};
use liblube::OdometerApi;
use serde::Deserialize;
use tracing::debug;

use crate::errors::BridgeError;
use crate::guard;
use crate::resolver::{self, TopicAddress};
use crate::stats::{BridgeStats, BridgeStatsTracker};

// TelemetryReading is the only part of a vehicle telemetry payload the
// bridge cares about. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct TelemetryReading {
    odometer: Mileage,
}

// Delivery is the outcome of a successfully processed message.
#[derive(Clone, Debug, PartialEq)]
pub enum Delivery {
    // Recorded carries the confirmation the tracking service returned
    // for the new odometer record.
    Recorded(OdometerRecord),
    // Unchanged means the reading did not advance past the stored
    // odometer, so nothing was written.
    Unchanged,
}

// MessagePipeline turns one MQTT publish into at most one odometer
// write. Every step can fail per-message; the caller decides whether
// to log or propagate.
#[derive(Clone)]
pub struct MessagePipeline {
    api: Arc<dyn OdometerApi>,
    stats: BridgeStatsTracker,
}

impl MessagePipeline {
    pub fn new(api: Arc<dyn OdometerApi>) -> Self {
        Self {
            api,
            stats: BridgeStatsTracker::new(),
        }
    }

    // stats snapshots the pipeline counters.
    pub fn stats(&self) -> BridgeStats {
        self.stats.to_stats()
    }

    // on_message processes one publish and keeps the counters honest.
    // Any error it returns is a per-message error; the connection loop
    // logs it and moves on.
    pub async fn on_message(&self, topic: &str, payload: &[u8]) -> Result<Delivery, BridgeError> {
        self.stats.increment_received();

        match self.process(topic, payload).await {
            Ok(Delivery::Recorded(record)) => {
                self.stats.increment_recorded();
                Ok(Delivery::Recorded(record))
            }
            Ok(Delivery::Unchanged) => Ok(Delivery::Unchanged),
            Err(err) => {
                if err.is_upstream() {
                    self.stats.increment_upstream_failures();
                } else {
                    self.stats.increment_dropped();
                }
                Err(err)
            }
        }
    }

    async fn process(&self, topic: &str, payload: &[u8]) -> Result<Delivery, BridgeError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| BridgeError::malformed_message(topic, format!("payload is not UTF-8: {e}")))?;
        let reading: TelemetryReading = serde_json::from_str(text)
            .map_err(|e| BridgeError::malformed_message(topic, format!("payload is not valid JSON: {e}")))?;
        let miles = reading.odometer.miles().ok_or_else(|| {
            BridgeError::malformed_message(topic, "odometer value is not numeric")
        })?;

        let address = TopicAddress::parse(topic)?;
        debug!(
            "Reading of {miles} miles for {}-{}",
            address.make, address.model
        );

        // The roster is fetched per message so vehicles added to the
        // tracking service are picked up without a restart.
        let roster = self.api.list_vehicles().await?;
        let vehicle_id = resolver::resolve(&address, &roster)?;

        let latest = self.api.latest_odometer(vehicle_id).await?;
        let last_miles = latest.odometer.miles().ok_or_else(|| {
            BridgeError::unusable_record(vehicle_id, "stored odometer value is not numeric")
        })?;

        if !guard::should_update(last_miles, miles) {
            return Ok(Delivery::Unchanged);
        }

        let record = guard::record_update(self.api.as_ref(), vehicle_id, miles).await?;
        Ok(Delivery::Recorded(record))
    }
}
