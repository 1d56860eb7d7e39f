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

// src/lube_model.rs
// Wire model for the LubeLogger REST API.
//
// Only the fields the bridge needs are modeled; everything else in the
// server's JSON is ignored by serde.

use serde::{Deserialize, Serialize};

// Vehicle is one entry from the roster endpoint (/api/vehicles).
// The id is assigned by the service; make and model are whatever
// the user typed into LubeLogger, so matching against them must
// be case-insensitive.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
}

// Mileage is an odometer value as it appears on the wire. LubeLogger
// (and the telemetry publishers feeding this bridge) are loose about
// the type: the same field shows up as an integer, a decimal, or a
// numeric string depending on the producer.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Mileage {
    Number(f64),
    Text(String),
}

impl Mileage {
    // miles normalizes the value to integer miles, truncating any
    // decimal fraction toward zero. Returns None for non-numeric
    // text or non-finite numbers.
    pub fn miles(&self) -> Option<i64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then(|| value as i64)
    }
}

// OdometerRecord is a stored mileage entry as returned by the
// odometerrecords endpoints. The date format on reads is controlled
// by the server, so it stays an opaque string here; writes always go
// out as YYYY-MM-DD (see NewOdometerRecord).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct OdometerRecord {
    #[serde(default)]
    pub date: String,
    pub odometer: Mileage,
}

// NewOdometerRecord is the POST body for adding a record.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewOdometerRecord {
    pub date: String,
    pub odometer: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mileage_integer_number() {
        let m: Mileage = serde_json::from_str("12345").unwrap();
        assert_eq!(m.miles(), Some(12345));
    }

    #[test]
    fn mileage_decimal_truncates_not_rounds() {
        let m: Mileage = serde_json::from_str("120.9").unwrap();
        assert_eq!(m.miles(), Some(120));
    }

    #[test]
    fn mileage_numeric_string() {
        let m: Mileage = serde_json::from_str("\"12345.0\"").unwrap();
        assert_eq!(m.miles(), Some(12345));
    }

    #[test]
    fn mileage_garbage_string_is_none() {
        let m = Mileage::Text("not-a-number".to_string());
        assert_eq!(m.miles(), None);
    }

    #[test]
    fn mileage_whitespace_string_parses() {
        let m = Mileage::Text(" 42 ".to_string());
        assert_eq!(m.miles(), Some(42));
    }

    #[test]
    fn record_tolerates_extra_fields_and_missing_date() {
        let rec: OdometerRecord =
            serde_json::from_str(r#"{"odometer": "12000", "notes": "ignored"}"#).unwrap();
        assert_eq!(rec.date, "");
        assert_eq!(rec.odometer.miles(), Some(12000));
    }

    #[test]
    fn vehicle_ignores_extra_fields() {
        let v: Vehicle = serde_json::from_str(
            r#"{"id": 7, "make": "toyota", "model": "camry", "year": 2019}"#,
        )
        .unwrap();
        assert_eq!(v.id, 7);
        assert_eq!(v.make, "toyota");
    }
}
