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


use chrono::NaiveDate;
use liblube::{LubeApiClient, LubeApiError, LubeEndpoint, OdometerApi};
use mock_server as ms;

const GOOD_ROSTER: &str = r#"[
    {"id": 7, "make": "toyota", "model": "camry", "year": 2019},
    {"id": 9, "make": "Honda", "model": "Civic"}
]"#;

fn client_for(url: &str) -> LubeApiClient {
    let endpoint = LubeEndpoint {
        address: url.to_string(),
        port: None,
    };
    LubeApiClient::builder(endpoint)
        .build()
        .expect("client should build")
}

// --> list_vehicles <--
#[tokio::test]
async fn list_vehicles_parses_roster() {
    // set up - create mockito http server
    let mut server = ms::create_mock_http_server().await;
    ms::add_mock(
        &mut server,
        "/api/vehicles",
        GOOD_ROSTER,
        &ms::Method::Get,
        200,
    );

    // execute
    let client = client_for(&server.url());
    let roster = client
        .list_vehicles()
        .await
        .expect("roster should deserialize");

    // verify
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].id, 7);
    assert_eq!(roster[1].make, "Honda");
}

#[tokio::test]
async fn list_vehicles_non_2xx_returns_http_status() {
    let mut server = ms::create_mock_http_server().await;
    ms::add_mock(&mut server, "/api/vehicles", "", &ms::Method::Get, 503);

    let client = client_for(&server.url());
    let actual_err = client
        .list_vehicles()
        .await
        .expect_err("Expected LubeApiError to be returned");

    assert!(matches!(actual_err, LubeApiError::HttpStatus { .. }));
}

#[tokio::test]
async fn list_vehicles_malformed_json_returns_deserialize_error() {
    let mut server = ms::create_mock_http_server().await;
    ms::add_mock(
        &mut server,
        "/api/vehicles",
        "this is not json",
        &ms::Method::Get,
        200,
    );

    let client = client_for(&server.url());
    let actual_err = client
        .list_vehicles()
        .await
        .expect_err("Expected LubeApiError to be returned");

    assert!(matches!(actual_err, LubeApiError::JsonDeserialize { .. }));
}

#[tokio::test]
async fn unreachable_server_returns_network_error() {
    // nothing listens on port 1
    let client = client_for("http://127.0.0.1:1");
    let actual_err = client
        .list_vehicles()
        .await
        .expect_err("Expected LubeApiError to be returned");

    assert!(matches!(actual_err, LubeApiError::Network { .. }));
}

#[tokio::test]
async fn list_vehicles_large_multibyte_roster_survives_debug_logging() {
    // set up - a roster body longer than the debug-log truncation
    // window, with a two-byte character straddling the cut point
    let head = r#"[{"id": 7, "make": ""#;
    let padding = "a".repeat(1499 - head.len());
    let body = format!(r#"{head}{padding}é", "model": "camry"}}]"#);
    assert_eq!(&body.as_bytes()[1499..1501], "é".as_bytes());

    let mut server = ms::create_mock_http_server().await;
    ms::add_mock(&mut server, "/api/vehicles", &body, &ms::Method::Get, 200);

    // execute - with debug logging live so the response body is
    // actually formatted
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = client_for(&server.url());
    let roster = client
        .list_vehicles()
        .await
        .expect("roster should deserialize");

    // verify
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, 7);
    assert!(roster[0].make.ends_with('é'));
}

// --> latest_odometer <--
#[tokio::test]
async fn latest_odometer_parses_string_mileage() {
    let mut server = ms::create_mock_http_server().await;
    ms::add_mock_with_query(
        &mut server,
        "/api/vehicle/odometerrecords/latest",
        "7",
        r#"{"date": "08/01/2026", "odometer": "12000.0"}"#,
        &ms::Method::Get,
        200,
    );

    let client = client_for(&server.url());
    let record = client
        .latest_odometer(7)
        .await
        .expect("record should deserialize");

    assert_eq!(record.odometer.miles(), Some(12000));
    assert_eq!(record.date, "08/01/2026");
}

#[tokio::test]
async fn latest_odometer_empty_body_returns_no_content() {
    let mut server = ms::create_mock_http_server().await;
    ms::add_mock_with_query(
        &mut server,
        "/api/vehicle/odometerrecords/latest",
        "7",
        "",
        &ms::Method::Get,
        200,
    );

    let client = client_for(&server.url());
    let actual_err = client
        .latest_odometer(7)
        .await
        .expect_err("Expected LubeApiError to be returned");

    assert!(matches!(actual_err, LubeApiError::NoContent { .. }));
}

// --> add_odometer_record <--
#[tokio::test]
async fn add_odometer_record_posts_iso_date_and_integer_miles() {
    let mut server = ms::create_mock_http_server().await;
    server
        .mock("POST", "/api/vehicle/odometerrecords/add")
        .match_query(mockito::Matcher::UrlEncoded(
            "vehicleId".to_string(),
            "7".to_string(),
        ))
        .match_body(mockito::Matcher::JsonString(
            r#"{"date": "2026-08-29", "odometer": 12345}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"date": "2026-08-29", "odometer": 12345}"#)
        .create();

    let client = client_for(&server.url());
    let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
    let confirmation = client
        .add_odometer_record(7, date, 12345)
        .await
        .expect("write should be confirmed");

    assert_eq!(confirmation.odometer.miles(), Some(12345));
    assert_eq!(confirmation.date, "2026-08-29");
}

#[tokio::test]
async fn add_odometer_record_non_2xx_returns_http_status() {
    let mut server = ms::create_mock_http_server().await;
    ms::add_mock_with_query(
        &mut server,
        "/api/vehicle/odometerrecords/add",
        "7",
        "",
        &ms::Method::Post,
        400,
    );

    let client = client_for(&server.url());
    let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
    let actual_err = client
        .add_odometer_record(7, date, 12345)
        .await
        .expect_err("Expected LubeApiError to be returned");

    assert!(matches!(actual_err, LubeApiError::HttpStatus { .. }));
}
