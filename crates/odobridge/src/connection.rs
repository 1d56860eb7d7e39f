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

// src/connection.rs
// MQTT link lifecycle: connect, subscribe, dispatch, reconnect.

use rumqttc::{AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Packet, QoS};
use tracing::{debug, error, info, warn};

use crate::config::BridgeConfig;
use crate::errors::BridgeError;
use crate::pipeline::{Delivery, MessagePipeline};

// LinkState is where the broker link currently stands. Connecting is
// only ever the state before the first successful handshake; after
// that, loss of the link moves through Reconnecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
}

// LinkEvent is what the event loop observed about the link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    HandshakeAccepted,
    HandshakeRejected,
    ConnectionLost,
    RetryFailed,
}

impl LinkState {
    // apply advances the state machine. Events that make no sense in
    // the current state leave it unchanged.
    pub fn apply(self, event: LinkEvent) -> LinkState {
        match (self, event) {
            (LinkState::Connecting, LinkEvent::HandshakeAccepted) => LinkState::Connected,
            (LinkState::Connecting, LinkEvent::HandshakeRejected) => LinkState::Disconnected,
            (LinkState::Connecting, LinkEvent::ConnectionLost) => LinkState::Disconnected,
            (LinkState::Connected, LinkEvent::ConnectionLost) => LinkState::Reconnecting,
            (LinkState::Reconnecting, LinkEvent::HandshakeAccepted) => LinkState::Connected,
            (LinkState::Reconnecting, LinkEvent::RetryFailed) => LinkState::Reconnecting,
            (LinkState::Reconnecting, LinkEvent::ConnectionLost) => LinkState::Reconnecting,
            (state, _) => state,
        }
    }

    // dispatches_messages is true when inbound publishes should reach
    // the pipeline.
    pub fn dispatches_messages(&self) -> bool {
        *self == LinkState::Connected
    }
}

// BridgeLink owns the MQTT session and drives the pipeline from it.
pub struct BridgeLink {
    client: AsyncClient,
    event_loop: EventLoop,
    state: LinkState,
    subscribe_topic: String,
    backoff: std::time::Duration,
    pipeline: MessagePipeline,
}

impl BridgeLink {
    // connect builds the MQTT session. No network traffic happens
    // until run() starts polling the event loop.
    pub fn connect(config: &BridgeConfig, pipeline: MessagePipeline) -> Self {
        let client_id = format!("odobridge-{:08x}", rand::random::<u32>());
        let mut options = MqttOptions::new(client_id, &config.broker_host, config.broker_port);
        options.set_keep_alive(config.keep_alive);
        if let Some(credentials) = &config.credentials {
            options.set_credentials(&credentials.username, &credentials.password);
        }

        let (client, event_loop) = AsyncClient::new(options, 16);

        Self {
            client,
            event_loop,
            state: LinkState::Connecting,
            subscribe_topic: config.subscribe_topic(),
            backoff: config.reconnect_backoff,
            pipeline,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    // run polls the event loop until a fatal error. A broker that
    // cannot be reached or rejects the handshake before the first
    // successful connect ends the process; after the link has been up
    // once, every failure is absorbed by a fixed-delay retry.
    pub async fn run(&mut self) -> Result<(), BridgeError> {
        loop {
            match self.event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    if ack.code == ConnectReturnCode::Success {
                        info!("Connected to broker, subscribing to {}", self.subscribe_topic);
                        // Subscribe on every transition into Connected:
                        // a broker without session state forgets our
                        // filters across reconnects, and repeating the
                        // subscribe is idempotent when it remembers.
                        self.client
                            .subscribe(&self.subscribe_topic, QoS::AtMostOnce)
                            .await?;
                        self.transition(LinkEvent::HandshakeAccepted);
                    } else if self.state == LinkState::Connecting {
                        error!("Broker rejected the session: {:?}", ack.code);
                        return Err(BridgeError::HandshakeRejected { code: ack.code });
                    } else {
                        warn!(
                            "Broker rejected the session ({:?}), retrying in {:?}",
                            ack.code, self.backoff
                        );
                        self.transition(LinkEvent::RetryFailed);
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    if self.state.dispatches_messages() {
                        self.dispatch(&publish.topic, &publish.payload).await;
                    } else {
                        debug!(
                            "Ignoring publish on {} while {:?}",
                            publish.topic, self.state
                        );
                    }
                }
                Ok(_) => {}
                Err(err) => match self.state {
                    LinkState::Connecting => {
                        error!("Could not establish initial broker connection: {err}");
                        return Err(BridgeError::ConnectFailure(err));
                    }
                    _ => {
                        warn!("Broker connection lost ({err}), retrying in {:?}", self.backoff);
                        self.transition(LinkEvent::ConnectionLost);
                        tokio::time::sleep(self.backoff).await;
                    }
                },
            }
        }
    }

    // dispatch hands one publish to the pipeline. Per-message failures
    // are logged and swallowed so one bad message never takes the link
    // down.
    async fn dispatch(&self, topic: &str, payload: &[u8]) {
        match self.pipeline.on_message(topic, payload).await {
            Ok(Delivery::Recorded(record)) => {
                info!("Recorded odometer update from {topic}: {:?}", record.odometer);
            }
            Ok(Delivery::Unchanged) => {
                debug!("No odometer change from {topic}");
            }
            Err(err) => {
                warn!("Dropping message on {topic}: {err}");
            }
        }
    }

    fn transition(&mut self, event: LinkEvent) {
        let next = self.state.apply(event);
        if next != self.state {
            debug!("Link state {:?} -> {:?}", self.state, next);
            if self.state == LinkState::Connected {
                info!("Pipeline stats at disconnect: {:?}", self.pipeline.stats());
            }
            self.state = next;
        }
    }
}
