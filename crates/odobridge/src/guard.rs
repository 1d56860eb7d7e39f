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

// src/guard.rs
// Monotonicity guard for odometer writes.

use liblube::lube_model::OdometerRecord;
use liblube::OdometerApi;
use tracing::debug;

use crate::errors::BridgeError;

// should_update decides whether a reported odometer value gets written.
// Only a strictly greater value passes; equal readings are treated as
// duplicates and stale or rewound readings never reach the tracking
// service. Both values are whole miles, truncated upstream.
pub fn should_update(last_odometer: i64, new_odometer: i64) -> bool {
    if new_odometer > last_odometer {
        debug!(
            "Odometer advanced by {} miles ({last_odometer} -> {new_odometer})",
            new_odometer - last_odometer
        );
        true
    } else {
        debug!("Odometer reading {new_odometer} does not advance past {last_odometer}, skipping");
        false
    }
}

// record_update writes a new odometer record stamped with today's
// local date.
pub async fn record_update(
    api: &dyn OdometerApi,
    vehicle_id: i64,
    miles: i64,
) -> Result<OdometerRecord, BridgeError> {
    let today = chrono::Local::now().date_naive();
    let record = api.add_odometer_record(vehicle_id, today, miles).await?;
    Ok(record)
}
