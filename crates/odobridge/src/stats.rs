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

// src/stats.rs
// Counters for message handling outcomes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// BridgeStats is a point-in-time snapshot of the pipeline counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub received: usize,
    pub dropped: usize,
    pub recorded: usize,
    pub upstream_failures: usize,
}

// BridgeStatsTracker is the live, shareable counter set. Cloning it
// shares the underlying counters.
#[derive(Clone, Debug, Default)]
pub struct BridgeStatsTracker {
    received: Arc<AtomicUsize>,
    dropped: Arc<AtomicUsize>,
    recorded: Arc<AtomicUsize>,
    upstream_failures: Arc<AtomicUsize>,
}

impl BridgeStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_recorded(&self) {
        self.recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_upstream_failures(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    // to_stats snapshots the counters. Counters keep moving while the
    // snapshot is taken, so the fields are individually consistent
    // rather than a single atomic cut.
    pub fn to_stats(&self) -> BridgeStats {
        BridgeStats {
            received: self.received.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            recorded: self.recorded.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
        }
    }
}
