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
use chrono::{DateTime,Utc};
use vnet_common::datetime::{is_older_than, minutes, secs};
use vnet_common::geo::GeoRect;
use vnet_common::{debug,info,warn};

use crate::{
    cache::{DetailLevel, OnlineAircraftCache, SimulatorSnapshot},
    codec::{decode_text, gz_decompress_vec},
    config::{CacheConfig, NetworkConfig, OnlineNetwork, ReloadInterval, MIN_RELOAD_SECS},
    parser::FeedParser,
    records::AircraftRecord,
    state::{CycleTimestamps, DownloadState},
    store::OnlineStore,
    transport::DownloadRequest,
};

/// minimum time between two downloads of the auxiliary server feed
pub const MIN_SERVER_DOWNLOAD_INTERVAL: Duration = Duration::from_secs( 15 * 60);

/// what gets reported to the map, search and info views (and the operator)
#[derive(Debug,Clone,PartialEq)]
pub enum Notification {
    ClientAndAtcUpdated { reload_all: bool, keep_selection: bool },
    ServersUpdated { reload_all: bool, keep_selection: bool },
    NetworkChanged,
    /// informational operator message (from the status document)
    Message(String),
    /// download failure, the cycle has already been restarted
    Error(String),
}

/// side effects the controller requests from its driver (the control loop)
#[derive(Debug,Clone,PartialEq)]
pub enum Effect {
    /// start the request on the next loop iteration
    StartDownload(DownloadRequest),
    CancelDownload,
    /// single shot, fires the next cycle
    StartTimer(Duration),
    StopTimer,
    /// operator message, shown on the next loop iteration
    ShowMessage(String),
    Notify(Notification),
}

/// the reload interval policy: custom networks use what is configured, known networks either use the
/// advertised reload time of the last feed or a fixed override, both floored at one minute
pub fn reload_interval (config: &NetworkConfig, reload_minutes: Option<u32>)->Duration {
    if config.network.is_custom() {
        secs( config.custom_reload_secs)
    } else {
        match config.reload_override {
            ReloadInterval::Auto => minutes( reload_minutes.unwrap_or(0) as u64).max( secs(MIN_RELOAD_SECS)),
            ReloadInterval::Fixed(s) => secs( s.max(MIN_RELOAD_SECS))
        }
    }
}

/// the download orchestrator for online network data.
/// This is a synchronous state machine that is driven by the control loop. Each input takes an explicit `now`
/// and results in a list of [`Effect`]s that are retrieved with `take_effects()`
pub struct OnlineDataController<S: OnlineStore, P: FeedParser> {
    config: NetworkConfig,
    store: S,
    parser: P,
    cache: OnlineAircraftCache,

    state: DownloadState,
    timestamps: CycleTimestamps,
    timer_armed: bool,
    next_request_id: u64,

    // what we derived from the last status document
    whazzup_from_status: Option<(String,bool)>, // (url, gzipped)
    servers_url: Option<String>,
    status_message: Option<String>,

    // what we know from the last fresh feed
    last_feed_update: Option<DateTime<Utc>>,
    reload_minutes: Option<u32>,

    effects: Vec<Effect>,
}

impl<S: OnlineStore, P: FeedParser> OnlineDataController<S,P> {

    pub fn new (config: NetworkConfig, cache_config: CacheConfig, mut store: S, parser: P)->Self {
        store.set_atc_radii( config.atc_radii.clone());
        store.clear_all(); // no leftovers from a previous session

        OnlineDataController {
            config, store, parser,
            cache: OnlineAircraftCache::new( cache_config),
            state: DownloadState::None,
            timestamps: CycleTimestamps::default(),
            timer_armed: false,
            next_request_id: 1,
            whazzup_from_status: None,
            servers_url: None,
            status_message: None,
            last_feed_update: None,
            reload_minutes: None,
            effects: Vec::new()
        }
    }

    /* #region inputs *****************************************************************************************/

    pub fn start_processing (&mut self) {
        self.start_download_internal()
    }

    /// the reload timer expired
    pub fn timer_fired (&mut self) {
        self.timer_armed = false;
        self.start_download_internal()
    }

    pub fn download_finished (&mut self, id: u64, data: &[u8], now: DateTime<Utc>) {
        if !self.state.is_current( id) {
            debug!("ignoring stale download result {} in state {}", id, self.state);
            return
        }

        match self.state.clone() {
            DownloadState::DownloadingStatus{..} => self.status_downloaded( data, now),
            DownloadState::DownloadingWhazzup{gzipped,..} => self.whazzup_downloaded( data, gzipped, now),
            DownloadState::DownloadingWhazzupServers{..} => self.servers_downloaded( data, now),
            DownloadState::None => {} // can't happen, no request
        }
    }

    pub fn download_failed (&mut self, id: u64, url: &str, error: &str) {
        if !self.state.is_current( id) {
            debug!("ignoring stale download failure {} in state {}", id, self.state);
            return
        }

        warn!("download from {} failed: {}", url, error);
        self.stop_all_processes();
        self.effects.push( Effect::Notify( Notification::Error(
            format!("Download from \"{url}\" failed. Reason: {error}. Retrying.")
        )));
        self.start_processing();
    }

    /// cancel the in-flight request and the timer. Idempotent
    pub fn stop_all_processes (&mut self) {
        self.effects.push( Effect::CancelDownload);
        self.effects.push( Effect::StopTimer);
        self.timer_armed = false;
        self.state = DownloadState::None;
        self.cache.clear_registrations();
    }

    /// adopt a new network configuration. This resets everything we know and restarts downloading
    pub fn options_changed (&mut self, config: NetworkConfig) {
        self.whazzup_from_status = None;
        self.servers_url = None;
        self.status_message = None;
        self.stop_all_processes();

        self.store.clear_all();
        self.cache.clear();

        self.effects.push( Effect::Notify( Notification::ClientAndAtcUpdated { reload_all: true, keep_selection: true }));
        self.effects.push( Effect::Notify( Notification::ServersUpdated { reload_all: true, keep_selection: true }));
        self.effects.push( Effect::Notify( Notification::NetworkChanged));

        self.timestamps.reset();
        self.last_feed_update = None;
        self.reload_minutes = None;

        self.store.set_atc_radii( config.atc_radii.clone());
        self.config = config;

        self.start_download_internal();
    }

    /// clear all online data, used when the control loop terminates
    pub fn clear_store (&mut self) {
        self.store.clear_all();
        self.cache.clear();
    }

    /// the aircraft of the online network within `rect`, without the ones that are also simulator aircraft
    pub fn get_aircraft (&mut self, rect: &GeoRect, detail: DetailLevel, lazy: bool, simulator: &SimulatorSnapshot)->&[AircraftRecord] {
        self.cache.get_aircraft( &self.store, rect, detail, lazy, simulator)
    }

    pub fn take_effects (&mut self)->Vec<Effect> {
        std::mem::take( &mut self.effects)
    }

    /* #endregion inputs */

    /* #region accessors **************************************************************************************/

    pub fn state (&self)->&DownloadState { &self.state }
    pub fn timestamps (&self)->&CycleTimestamps { &self.timestamps }
    pub fn is_timer_armed (&self)->bool { self.timer_armed }
    pub fn config (&self)->&NetworkConfig { &self.config }
    pub fn store (&self)->&S { &self.store }

    pub fn has_data (&self)->bool { self.store.has_data() }
    pub fn num_clients (&self)->usize { self.store.num_clients() }
    pub fn network_name (&self)->&'static str { self.config.network.name() }
    pub fn is_network_active (&self)->bool { self.config.network != OnlineNetwork::None }

    pub fn client_by_id (&self, id: u64)->Option<AircraftRecord> { self.store.aircraft_by_id( id) }

    /// the last query result, without querying
    pub fn aircraft_from_cache (&self)->&[AircraftRecord] { self.cache.aircraft() }

    pub fn status_message (&self)->Option<&str> { self.status_message.as_deref() }

    pub fn cache (&self)->&OnlineAircraftCache { &self.cache }

    /// the interval the reload timer is armed with at the end of a cycle
    pub fn current_reload_interval (&self)->Duration { reload_interval( &self.config, self.reload_minutes) }

    /* #endregion accessors */

    /* #region state transitions ******************************************************************************/

    fn start_download_internal (&mut self) {
        self.stop_all_processes();

        if self.config.network == OnlineNetwork::None { return } // online functions disabled

        if self.state.is_none() {
            // only go through the status document if we don't have a feed URL from it yet
            let status_url = if self.whazzup_from_status.is_none() {
                self.config.status_url().map( |url| url.to_string())
            } else {
                None
            };

            if let Some(url) = status_url {
                let request = self.new_request( url);
                self.state = DownloadState::DownloadingStatus { request: request.clone() };
                self.effects.push( Effect::StartDownload(request));

            } else if let Some((url,gzipped)) = self.whazzup_url() {
                let request = self.new_request( url);
                self.state = DownloadState::DownloadingWhazzup { request: request.clone(), gzipped };
                self.effects.push( Effect::StartDownload(request));

            } else {
                debug!("no online URLs configured for {}", self.config.network.name())
            }
        }
    }

    /// the feed URL derived from status takes precedence over configured ones, which are never gzipped
    fn whazzup_url (&self)->Option<(String,bool)> {
        self.whazzup_from_status.clone().or_else( || self.config.whazzup_url().map( |url| (url.to_string(), false)))
    }

    fn new_request (&mut self, url: String)->DownloadRequest {
        let id = self.next_request_id;
        self.next_request_id += 1;
        DownloadRequest { id, url, user_agent: self.config.user_agent() }
    }

    fn status_downloaded (&mut self, data: &[u8], now: DateTime<Utc>) {
        match self.parser.parse_status( &decode_text(data)) {
            Ok(status) => {
                self.store.write_status_feed( &status);
                self.whazzup_from_status = status.whazzup_url();
                self.servers_url = status.servers_url();

                if let Some(msg) = status.message() {
                    self.status_message = Some( msg.to_string());
                    self.effects.push( Effect::ShowMessage( msg.to_string()));
                }
            }
            Err(e) => warn!("failed to parse status: {e}")
        }

        if let Some((url,gzipped)) = self.whazzup_from_status.clone() {
            let request = self.new_request( url);
            self.state = DownloadState::DownloadingWhazzup { request: request.clone(), gzipped };
            self.effects.push( Effect::StartDownload(request));
        } else {
            self.end_cycle( now);
        }
    }

    fn whazzup_downloaded (&mut self, data: &[u8], gzipped: bool, now: DateTime<Utc>) {
        let data = if gzipped {
            gz_decompress_vec( data).unwrap_or_else( |e| {
                warn!("error unzipping whazzup data: {e}");
                Vec::new()
            })
        } else {
            data.to_vec()
        };

        let is_fresh = match self.parser.parse_whazzup( &decode_text(&data), self.config.format) {
            Ok(feed) => {
                if feed.is_newer_than( &self.last_feed_update) {
                    self.last_feed_update = feed.update;
                    self.reload_minutes = feed.reload_minutes;
                    self.store.write_data_feed( &feed);
                    true
                } else {
                    false
                }
            }
            Err(e) => {
                warn!("failed to parse whazzup: {e}");
                false
            }
        };

        if is_fresh {
            let servers_url = self.servers_url.clone();
            match servers_url {
                Some(url) if is_older_than( &self.timestamps.last_server_download, &now, MIN_SERVER_DOWNLOAD_INTERVAL) => {
                    let request = self.new_request( url);
                    self.state = DownloadState::DownloadingWhazzupServers { request: request.clone() };
                    self.effects.push( Effect::StartDownload(request));
                }
                _ => {
                    self.end_cycle( now);
                    self.cache.clear();
                    self.effects.push( Effect::Notify( Notification::ClientAndAtcUpdated { reload_all: true, keep_selection: true }));
                }
            }
        } else {
            info!("whazzup is not recent");
            self.end_cycle( now);
        }
    }

    fn servers_downloaded (&mut self, data: &[u8], now: DateTime<Utc>) {
        match self.parser.parse_servers( &decode_text(data), self.config.format) {
            Ok(servers) => self.store.write_server_feed( servers),
            Err(e) => warn!("failed to parse servers: {e}")
        }
        self.timestamps.last_server_download = now;

        self.end_cycle( now);
        self.cache.clear();
        self.effects.push( Effect::Notify( Notification::ClientAndAtcUpdated { reload_all: true, keep_selection: true }));
        self.effects.push( Effect::Notify( Notification::ServersUpdated { reload_all: true, keep_selection: true }));
    }

    fn end_cycle (&mut self, now: DateTime<Utc>) {
        let interval = self.current_reload_interval();
        debug!("cycle done, next in {:?}", interval);

        self.effects.push( Effect::StartTimer( interval));
        self.timer_armed = true;
        self.state = DownloadState::None;
        self.timestamps.last_update = now;
    }

    /* #endregion state transitions */
}
