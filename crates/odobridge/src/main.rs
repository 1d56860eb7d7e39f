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
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use liblube::{LubeApiClient, LubeEndpoint};
use odobridge::{BridgeConfig, BridgeLink, MessagePipeline};
use tracing::metadata::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[clap(about = "Bridge vehicle odometer telemetry from MQTT into LubeLogger")]
pub struct Options {
    #[clap(long, env = "MQTT_SERV", help = "MQTT broker hostname or address")]
    pub mqtt_host: String,

    #[clap(long, env = "MQTT_PORT", help = "MQTT broker port")]
    pub mqtt_port: u16,

    #[clap(long, env = "MQTT_USER", help = "MQTT username")]
    pub mqtt_username: Option<String>,

    #[clap(
        long,
        env = "MQTT_PASS",
        hide_env_values = true,
        help = "MQTT password"
    )]
    pub mqtt_password: Option<String>,

    #[clap(
        long,
        env = "MQTT_BASE",
        help = "Base topic the vehicle telemetry topics hang off of"
    )]
    pub base_topic: String,

    #[clap(
        long,
        env = "LUBELOGGER_ADDRESS",
        help = "LubeLogger address, with or without scheme"
    )]
    pub lubelogger_address: String,

    #[clap(
        long,
        env = "LUBELOGGER_PORT",
        help = "LubeLogger port; omit when the address already carries one"
    )]
    pub lubelogger_port: Option<u16>,

    #[clap(long, env = "ODOBRIDGE_LOG_FILE", help = "Also write logs to this file")]
    pub log_file: Option<PathBuf>,
}

// init_logging wires up the subscriber. The returned guard keeps the
// non-blocking file writer flushing; it must live as long as main.
fn init_logging(log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>, eyre::Report> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
        .add_directive("rumqttc=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    match log_file {
        Some(path) => {
            let directory = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path.file_name().unwrap_or_else(|| "odobridge.log".as_ref());
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(env_filter)
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(env_filter)
                .try_init()?;
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
    let options = Options::parse();
    let _log_guard = init_logging(options.log_file.as_ref())?;

    let endpoint = LubeEndpoint {
        address: options.lubelogger_address.clone(),
        port: options.lubelogger_port,
    };
    let api = LubeApiClient::builder(endpoint).build()?;
    tracing::info!("Using LubeLogger at {}", api.base_url());

    let config = BridgeConfig::new(&options.mqtt_host, options.mqtt_port, &options.base_topic)
        .with_optional_credentials(
            options.mqtt_username.as_deref(),
            options.mqtt_password.as_deref(),
        );
    tracing::info!(
        "Watching {} on {}:{}",
        config.subscribe_topic(),
        config.broker_host,
        config.broker_port
    );

    let pipeline = MessagePipeline::new(Arc::new(api));
    let mut link = BridgeLink::connect(&config, pipeline);
    link.run().await?;

    Ok(())
}
