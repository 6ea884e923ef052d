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
use tokio::{
    sync::{mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender}, oneshot},
    task::{AbortHandle, JoinHandle}
};
use vnet_common::datetime::utc_now;
use vnet_common::geo::GeoRect;
use vnet_common::{debug,info};

use crate::{
    cache::{DetailLevel, SimulatorSnapshot},
    config::NetworkConfig,
    controller::{Effect, Notification, OnlineDataController},
    errors::{op_failed, Result},
    parser::FeedParser,
    records::AircraftRecord,
    state::CycleTimestamps,
    store::OnlineStore,
    transport::{DownloadRequest, Transport, TransportEvent, TransportReporter},
};

/// the messages processed by the control loop
#[derive(Debug)]
pub enum OnlineMsg {
    //--- from the handle
    Start,
    Stop,
    OptionsChanged(NetworkConfig),
    QueryAircraft { rect: GeoRect, detail: DetailLevel, lazy: bool, simulator: SimulatorSnapshot, reply: oneshot::Sender<Vec<AircraftRecord>> },
    QueryClient { id: u64, reply: oneshot::Sender<Option<AircraftRecord>> },
    QueryStatus { reply: oneshot::Sender<OnlineStatus> },
    Terminate,

    //--- from the transport
    Transport(TransportEvent),

    //--- sent to ourselves
    Dispatch(DownloadRequest),
    DeferredMessage(String),
    Timer(u64),
}

/// a snapshot of the controller state for status displays
#[derive(Debug,Clone)]
pub struct OnlineStatus {
    pub state: &'static str,
    pub timestamps: CycleTimestamps,
    pub network_name: &'static str,
    pub is_network_active: bool,
    pub has_data: bool,
    pub num_clients: usize,
    pub status_message: Option<String>,
}

/// the control loop task that owns the download controller and the transport. All state changes happen here
pub struct OnlineActor<S: OnlineStore, P: FeedParser, T: Transport> {
    controller: OnlineDataController<S,P>,
    transport: T,
    notifier: UnboundedSender<Notification>,

    hself: WeakUnboundedSender<OnlineMsg>, // weak so that dropping all handles ends the loop
    timer: Option<AbortHandle>,
    timer_generation: u64,
}

impl<S: OnlineStore, P: FeedParser, T: Transport> OnlineActor<S,P,T> {

    pub fn new (controller: OnlineDataController<S,P>, transport: T, notifier: UnboundedSender<Notification>,
                hself: WeakUnboundedSender<OnlineMsg>)->Self {
        OnlineActor { controller, transport, notifier, hself, timer: None, timer_generation: 0 }
    }

    pub async fn run (mut self, mut rx: UnboundedReceiver<OnlineMsg>) {
        while let Some(msg) = rx.recv().await {
            if !self.handle_msg( msg, utc_now()) { break }
            self.process_effects();
        }

        // all handles dropped or explicitly terminated
        self.controller.stop_all_processes();
        self.controller.clear_store();
        self.process_effects();
        info!("online control loop terminated");
    }

    /// returns false if the loop should end
    fn handle_msg (&mut self, msg: OnlineMsg, now: DateTime<Utc>)->bool {
        match msg {
            OnlineMsg::Start => self.controller.start_processing(),
            OnlineMsg::Stop => self.controller.stop_all_processes(),
            OnlineMsg::OptionsChanged(config) => self.controller.options_changed( config),

            OnlineMsg::QueryAircraft { rect, detail, lazy, simulator, reply } => {
                let list = self.controller.get_aircraft( &rect, detail, lazy, &simulator).to_vec();
                let _ = reply.send( list);
            }
            OnlineMsg::QueryClient { id, reply } => {
                let _ = reply.send( self.controller.client_by_id( id));
            }
            OnlineMsg::QueryStatus { reply } => {
                let _ = reply.send( self.status());
            }
            OnlineMsg::Terminate => return false,

            OnlineMsg::Transport(event) => match event {
                TransportEvent::Finished { id, url, data } => {
                    debug!("downloaded {} bytes from {}", data.len(), url);
                    self.controller.download_finished( id, &data, now)
                }
                TransportEvent::Failed { id, url, error } => {
                    self.controller.download_failed( id, &url, &error)
                }
            }

            OnlineMsg::Dispatch(request) => {
                // the request might have been superseded since it was scheduled
                if self.controller.state().is_current( request.id) {
                    if let Some(tx) = self.hself.upgrade() {
                        self.transport.start_download( request, TransportReporter::new( tx));
                    }
                } else {
                    debug!("dropping superseded request {}", request.url);
                }
            }
            OnlineMsg::DeferredMessage(text) => {
                self.notify( Notification::Message(text));
            }
            OnlineMsg::Timer(generation) => {
                if generation == self.timer_generation {
                    self.timer = None;
                    self.controller.timer_fired();
                }
            }
        }
        true
    }

    fn process_effects (&mut self) {
        for effect in self.controller.take_effects() {
            match effect {
                Effect::StartDownload(request) => self.send_self( OnlineMsg::Dispatch(request)),
                Effect::CancelDownload => self.transport.cancel_download(),
                Effect::StartTimer(interval) => self.start_timer( interval),
                Effect::StopTimer => self.stop_timer(),
                Effect::ShowMessage(text) => self.send_self( OnlineMsg::DeferredMessage(text)),
                Effect::Notify(notification) => self.notify( notification),
            }
        }
    }

    fn send_self (&self, msg: OnlineMsg) {
        if let Some(tx) = self.hself.upgrade() {
            let _ = tx.send( msg);
        }
    }

    fn notify (&self, notification: Notification) {
        if self.notifier.send( notification).is_err() {
            debug!("notification receiver closed");
        }
    }

    fn start_timer (&mut self, interval: Duration) {
        self.stop_timer();

        if let Some(tx) = self.hself.upgrade() {
            let generation = self.timer_generation;
            let jh = tokio::spawn( async move {
                tokio::time::sleep( interval).await;
                let _ = tx.send( OnlineMsg::Timer(generation));
            });
            self.timer = Some( jh.abort_handle());
        }
    }

    fn stop_timer (&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.timer_generation += 1; // invalidates Timer messages that are already queued
    }

    fn status (&self)->OnlineStatus {
        let c = &self.controller;
        OnlineStatus {
            state: c.state().name(),
            timestamps: *c.timestamps(),
            network_name: c.network_name(),
            is_network_active: c.is_network_active(),
            has_data: c.has_data(),
            num_clients: c.num_clients(),
            status_message: c.status_message().map( |s| s.to_string()),
        }
    }
}

/// spawn the control loop as a tokio task. Notifications are sent to `notifier`.
/// This has to be called from within a tokio runtime
pub fn spawn_online_actor<S,P,T> (controller: OnlineDataController<S,P>, transport: T, notifier: UnboundedSender<Notification>)->OnlineHandle
    where S: OnlineStore, P: FeedParser, T: Transport
{
    let (tx, rx) = mpsc::unbounded_channel();
    let actor = OnlineActor::new( controller, transport, notifier, tx.downgrade());
    let task = tokio::spawn( actor.run( rx));
    OnlineHandle { tx, task: Some(task) }
}

/// the client side of the control loop
pub struct OnlineHandle {
    tx: UnboundedSender<OnlineMsg>,
    task: Option<JoinHandle<()>>,
}

impl OnlineHandle {
    fn send (&self, msg: OnlineMsg)->Result<()> {
        self.tx.send( msg).map_err( |_| op_failed!("online control loop not running"))
    }

    pub fn start (&self)->Result<()> { self.send( OnlineMsg::Start) }

    pub fn stop (&self)->Result<()> { self.send( OnlineMsg::Stop) }

    pub fn options_changed (&self, config: NetworkConfig)->Result<()> { self.send( OnlineMsg::OptionsChanged(config)) }

    pub async fn get_aircraft (&self, rect: GeoRect, detail: DetailLevel, lazy: bool, simulator: SimulatorSnapshot)->Result<Vec<AircraftRecord>> {
        let (reply, rx) = oneshot::channel();
        self.send( OnlineMsg::QueryAircraft { rect, detail, lazy, simulator, reply })?;
        rx.await.map_err( |_| op_failed!("no aircraft query response"))
    }

    pub async fn client_by_id (&self, id: u64)->Result<Option<AircraftRecord>> {
        let (reply, rx) = oneshot::channel();
        self.send( OnlineMsg::QueryClient { id, reply })?;
        rx.await.map_err( |_| op_failed!("no client query response"))
    }

    pub async fn status (&self)->Result<OnlineStatus> {
        let (reply, rx) = oneshot::channel();
        self.send( OnlineMsg::QueryStatus { reply })?;
        rx.await.map_err( |_| op_failed!("no status response"))
    }

    /// stop all downloads, clear the store and wait for the control loop to end
    pub async fn terminate (mut self)->Result<()> {
        self.send( OnlineMsg::Terminate)?;
        if let Some(task) = self.task.take() {
            task.await.map_err( |e| op_failed!("control loop task failed: {e}"))?;
        }
        Ok(())
    }
}
