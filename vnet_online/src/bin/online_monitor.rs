/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::time::Duration;
use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use vnet_common::{define_cli, geo::GeoRect};
use vnet_online::{
    load_config_path, spawn_online_actor, DetailLevel, HttpTransport, MemoryStore, Notification,
    OnlineConfig, OnlineDataController, SimulatorSnapshot, WhazzupParser
};

define_cli! { ARGS [about="online network traffic monitor"] =
    rect: Option<String> [short, long, help="query rectangle as 'west,south,east,north' degrees (overrides config)"],
    interval: u64 [short, long, default_value="30", help="query interval in seconds"],
    config: String [help="path of the RON OnlineConfig file"]
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();

    let config: OnlineConfig = load_config_path( &ARGS.config)?;
    let query_rect = match &ARGS.rect {
        Some(s) => Some( GeoRect::parse_wsen(s).ok_or_else( || anyhow!("invalid rectangle: {s}"))?),
        None => config.query_rect
    };

    let transport = HttpTransport::new( config.timeout)?;
    let controller = OnlineDataController::new( config.network.clone(), config.cache.clone(), MemoryStore::new(), WhazzupParser);
    let (tx_notify, mut rx_notify) = mpsc::unbounded_channel();

    let hactor = spawn_online_actor( controller, transport, tx_notify);
    hactor.start()?;
    println!("monitoring {} (terminate with ctrl-c)", config.network.network.name());

    let mut query_interval = tokio::time::interval( Duration::from_secs( ARGS.interval.max(1)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,

            Some(notification) = rx_notify.recv() => match notification {
                Notification::Message(msg) => println!("status message:\n{msg}"),
                Notification::Error(msg) => eprintln!("ERROR: {msg}"),
                other => {
                    let status = hactor.status().await?;
                    println!("{other:?}: {} clients, {}", status.num_clients, status.timestamps);
                }
            },

            _ = query_interval.tick() => {
                if let Some(rect) = &query_rect {
                    let aircraft = hactor.get_aircraft( *rect, DetailLevel::Normal, false, SimulatorSnapshot::default()).await?;
                    println!("{} aircraft in {}", aircraft.len(), rect);
                    for ac in aircraft.iter().take(5) {
                        println!("  {ac}");
                    }
                }
            }
        }
    }

    hactor.terminate().await?;
    Ok(())
}
