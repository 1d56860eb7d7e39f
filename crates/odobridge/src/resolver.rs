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

// src/resolver.rs
// Maps a telemetry topic to a vehicle id in the roster.

use liblube::lube_model::Vehicle;
use tracing::debug;

use crate::errors::BridgeError;

// TopicAddress is the make/model pair carried in a vehicle topic of
// the form <base>/<make>-<model>.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicAddress {
    pub make: String,
    pub model: String,
}

impl TopicAddress {
    // parse extracts the make and model from the segment after the
    // base topic. Only the first '-' splits; a model containing
    // further dashes keeps them.
    pub fn parse(topic: &str) -> Result<Self, BridgeError> {
        let mut segments = topic.split('/');
        let _base = segments.next();
        let vehicle = segments
            .next()
            .ok_or_else(|| BridgeError::malformed_topic(topic))?;

        let (make, model) = vehicle
            .split_once('-')
            .ok_or_else(|| BridgeError::malformed_topic(topic))?;
        if make.is_empty() || model.is_empty() {
            return Err(BridgeError::malformed_topic(topic));
        }

        Ok(Self {
            make: make.to_string(),
            model: model.to_string(),
        })
    }
}

// resolve finds the roster vehicle whose make and model both match the
// topic address, ignoring case. The first match wins; duplicate
// make/model entries in the roster are resolved by roster order.
pub fn resolve(address: &TopicAddress, roster: &[Vehicle]) -> Result<i64, BridgeError> {
    let wanted_make = address.make.to_lowercase();
    let wanted_model = address.model.to_lowercase();

    for vehicle in roster {
        if vehicle.make.to_lowercase() == wanted_make
            && vehicle.model.to_lowercase() == wanted_model
        {
            debug!(
                "Resolved {}-{} to vehicle id {}",
                address.make, address.model, vehicle.id
            );
            return Ok(vehicle.id);
        }
    }

    Err(BridgeError::vehicle_not_found(&address.make, &address.model))
}
