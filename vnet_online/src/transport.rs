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
use bytes::Bytes;
use reqwest::Client;
use tokio::{sync::mpsc::UnboundedSender, task::AbortHandle};
use vnet_common::net::{get_bytes, user_agent_headermap};
use vnet_common::{debug,warn};

use crate::{actor::OnlineMsg, errors::Result};

/// a single GET request. Ids are unique per controller so that late results can be recognized
#[derive(Debug,Clone,PartialEq)]
pub struct DownloadRequest {
    pub id: u64,
    pub url: String,
    pub user_agent: Option<String>,
}

/// what a Transport reports back, exactly once per started request (unless cancelled)
#[derive(Debug)]
pub enum TransportEvent {
    Finished { id: u64, url: String, data: Bytes },
    Failed { id: u64, url: String, error: String },
}

/// the channel end through which transports report results to the control loop
#[derive(Debug,Clone)]
pub struct TransportReporter {
    tx: UnboundedSender<OnlineMsg>
}

impl TransportReporter {
    pub(crate) fn new (tx: UnboundedSender<OnlineMsg>)->Self {
        TransportReporter { tx }
    }

    pub fn report (&self, event: TransportEvent) {
        if self.tx.send( OnlineMsg::Transport(event)).is_err() {
            debug!("transport result dropped, control loop already terminated")
        }
    }

    pub fn finished (&self, request: &DownloadRequest, data: Bytes) {
        self.report( TransportEvent::Finished { id: request.id, url: request.url.clone(), data })
    }

    pub fn failed (&self, request: &DownloadRequest, error: impl ToString) {
        self.report( TransportEvent::Failed { id: request.id, url: request.url.clone(), error: error.to_string() })
    }
}

/// asynchronous downloader abstraction. Implementations must not call back synchronously from `start_download`
pub trait Transport: Send + 'static {
    fn start_download (&mut self, request: DownloadRequest, reporter: TransportReporter);

    /// idempotent, a cancelled request does not report
    fn cancel_download (&mut self);
}

/// a reqwest based transport that runs each request as its own tokio task
pub struct HttpTransport {
    client: Client,
    task: Option<AbortHandle>
}

impl HttpTransport {
    pub fn new (timeout: Duration)->Result<Self> {
        let client = Client::builder().timeout( timeout).build()?;
        Ok( HttpTransport { client, task: None } )
    }
}

impl Transport for HttpTransport {

    fn start_download (&mut self, request: DownloadRequest, reporter: TransportReporter) {
        self.cancel_download();

        let client = self.client.clone();
        let jh = tokio::spawn( async move {
            let headers = match &request.user_agent {
                Some(ua) => match user_agent_headermap( ua) {
                    Ok(hm) => Some(hm),
                    Err(e) => { warn!("ignoring invalid user agent: {e}"); None }
                }
                None => None
            };

            debug!("downloading {}", request.url);
            match get_bytes( &client, &request.url, &headers).await {
                Ok(data) => reporter.finished( &request, data),
                Err(e) => reporter.failed( &request, e)
            }
        });
        self.task = Some( jh.abort_handle());
    }

    fn cancel_download (&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
