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

// src/lib.rs
// Main exports for the odobridge MQTT-to-LubeLogger bridge.

pub mod config;
pub mod connection;
pub mod errors;
pub mod guard;
pub mod pipeline;
pub mod resolver;
pub mod stats;

// Export some things for convenience.
pub use config::{BridgeConfig, BrokerCredentials};
pub use connection::{BridgeLink, LinkEvent, LinkState};
pub use errors::BridgeError;
pub use pipeline::{Delivery, MessagePipeline};
pub use resolver::TopicAddress;
pub use stats::{BridgeStats, BridgeStatsTracker};
