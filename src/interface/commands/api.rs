//! # API Check
//!
//! `can you see the api?` pings the resource API and reports what came back.

use anyhow::Result;

use crate::application::router::Request;
use crate::strings::messages;

pub async fn check_api(request: Request) -> Result<()> {
    let response = request.services.api.check_api().await?;
    let reply = if response.ok {
        messages::API_VISIBLE.to_string()
    } else {
        messages::api_problem(response.status_code)
    };
    request.reply(&reply).await
}
