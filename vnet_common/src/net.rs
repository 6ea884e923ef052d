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

//! common utility functions for network operations

use bytes::Bytes;
use reqwest::{header::{HeaderMap,HeaderValue,USER_AGENT}, Client, StatusCode};
use thiserror::Error;

#[derive(Error,Debug)]
pub enum NetError {
    #[error("not found {0}")]
    NotFoundError(String),

    #[error("http error: {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("operation failed: {0}")]
    OpFailed(String),
}

pub type Result<T> = std::result::Result<T, NetError>;

/// a HeaderMap that only contains the given user agent
pub fn user_agent_headermap (user_agent: &str) -> Result<HeaderMap> {
    let mut hm = HeaderMap::new();
    hm.insert( USER_AGENT, HeaderValue::from_str(user_agent).map_err(|e| NetError::OpFailed(e.to_string()))?);
    Ok(hm)
}

/// retrieve the complete body of a HTTP GET response as bytes.
/// Any status other than 200 is reported as an error that names the URL
pub async fn get_bytes (client: &Client, url: &str, opt_headers: &Option<HeaderMap>) -> Result<Bytes> {
    let mut req = client.get(url);
    if let Some(headermap) = opt_headers {
        req = req.headers(headermap.clone())
    }

    let response = req.send().await?;

    match response.status() {
        StatusCode::OK => {
            Ok( response.bytes().await? )
        }
        StatusCode::NOT_FOUND => {
            Err( NetError::NotFoundError(format!("{url}")))
        }
        other => {
            Err( NetError::OpFailed(format!("response status {other:?} for {url}")))
        }
    }
}
