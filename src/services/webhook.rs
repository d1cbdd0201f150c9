use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument};

/// Registers `url` as the bot's webhook target and returns the Bot API response as is.
#[instrument(skip_all, fields(%url))]
pub async fn set_webhook(client: &Client, api_url: &str, token: &str, url: &str, timeout: f32) -> Result<Value, reqwest::Error> {
    let response = client
        .post(format!("{api_url}/bot{token}/setWebhook", api_url = api_url.trim_end_matches('/')))
        .query(&[("url", url)])
        .timeout(Duration::from_secs_f32(timeout))
        .send()
        .await
        .map_err(reqwest::Error::without_url)?;

    let body = response.json().await.map_err(reqwest::Error::without_url)?;
    info!("Webhook registration answered");
    Ok(body)
}
