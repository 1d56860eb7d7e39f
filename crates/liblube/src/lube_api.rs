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

// src/lube_api.rs
// Typed operations against the LubeLogger vehicle/odometer endpoints.

use chrono::NaiveDate;
use tracing::debug;

use crate::lube_model::{NewOdometerRecord, OdometerRecord, Vehicle};
use crate::{LubeApiClient, LubeApiError};

// OdometerApi is the seam between the bridge and the tracking service.
// The bridge only ever needs these three operations; keeping them behind
// a trait lets tests substitute a canned implementation.
#[async_trait::async_trait]
pub trait OdometerApi: Send + Sync + 'static {
    // list_vehicles fetches the full roster. Never cached by this layer.
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, LubeApiError>;

    // latest_odometer fetches the most recent stored record for a vehicle.
    async fn latest_odometer(&self, vehicle_id: i64) -> Result<OdometerRecord, LubeApiError>;

    // add_odometer_record writes a new record and returns the service's
    // confirmation of what was stored.
    async fn add_odometer_record(
        &self,
        vehicle_id: i64,
        date: NaiveDate,
        odometer: i64,
    ) -> Result<OdometerRecord, LubeApiError>;
}

#[async_trait::async_trait]
impl OdometerApi for LubeApiClient {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, LubeApiError> {
        self.get("api/vehicles", &[]).await
    }

    async fn latest_odometer(&self, vehicle_id: i64) -> Result<OdometerRecord, LubeApiError> {
        self.get(
            "api/vehicle/odometerrecords/latest",
            &[("vehicleId", vehicle_id.to_string())],
        )
        .await
    }

    async fn add_odometer_record(
        &self,
        vehicle_id: i64,
        date: NaiveDate,
        odometer: i64,
    ) -> Result<OdometerRecord, LubeApiError> {
        let record = NewOdometerRecord {
            date: date.format("%Y-%m-%d").to_string(),
            odometer,
        };
        debug!("Adding odometer record for vehicle {vehicle_id}: {record:?}");
        self.post(
            "api/vehicle/odometerrecords/add",
            &[("vehicleId", vehicle_id.to_string())],
            record,
        )
        .await
    }
}
