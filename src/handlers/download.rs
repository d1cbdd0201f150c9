use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{error, info, instrument};

use crate::{
    entities::{DownloadRecord, DownloadStats},
    errors::ApiError,
    interactors::{GetDownloadsOverview, GetDownloadsOverviewInput, GetMedia, GetMediaErrorKind, GetMediaInput, Interactor as _, MediaOutcome},
    services::ProbeFetcher,
    utils::{format_date, format_error_report, format_file_size, format_optional_file_size, is_telegram_link},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub cached: bool,
    pub file_url: String,
    pub thumbnail: Option<String>,
    pub size: Option<i64>,
    #[serde(rename = "type")]
    pub media_type: &'static str,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_id: Option<i64>,
}

impl From<MediaOutcome> for DownloadResponse {
    fn from(
        MediaOutcome {
            descriptor,
            cached,
            download_id,
        }: MediaOutcome,
    ) -> Self {
        Self {
            cached,
            file_url: descriptor.file_reference,
            thumbnail: descriptor.thumbnail,
            size: descriptor.file_size,
            media_type: descriptor.media_type.as_str(),
            title: descriptor.title,
            download_id,
        }
    }
}

#[instrument(skip_all)]
pub async fn download(State(state): State<AppState>, body: Bytes) -> Result<Json<DownloadResponse>, ApiError> {
    let request: DownloadRequest = if body.iter().all(u8::is_ascii_whitespace) {
        DownloadRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidJson)?
    };

    let url = request.url.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(ApiError::MissingUrl);
    }
    if !is_telegram_link(url) {
        return Err(ApiError::InvalidLink);
    }
    let Some(token) = state.config.bot.token.as_deref() else {
        error!("Bot token is not configured");
        return Err(ApiError::MissingToken);
    };

    let fetcher = ProbeFetcher::new(
        state.client.clone(),
        &state.config.telegram_bot_api.url,
        token,
        state.config.timeouts.text,
    );
    let mut tx_manager = state.tx_manager();

    match GetMedia::new()
        .execute(GetMediaInput::new(url, None, &mut tx_manager, &fetcher))
        .await
    {
        Ok(outcome) => {
            info!(cached = outcome.cached, "Media resolved");
            Ok(Json(outcome.into()))
        }
        Err(err) => {
            match &err {
                GetMediaErrorKind::Database(_) => error!(err = format_error_report(&err), "Get media error"),
                _ => info!(err = format_error_report(&err), "Media not resolved"),
            }
            Err(err.into())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: &'static str,
    pub title: String,
    pub file_path: String,
    pub size: String,
    pub thumbnail: Option<String>,
    pub cached: bool,
    pub download_count: i64,
    pub date: String,
}

impl HistoryEntry {
    fn new(record: DownloadRecord, now: OffsetDateTime) -> Self {
        Self {
            id: record.id.to_string(),
            media_type: record.media_type.as_str(),
            size: format_optional_file_size(record.file_size),
            date: format_date(record.created_at, now),
            url: record.url,
            title: record.title,
            file_path: record.file_reference,
            thumbnail: record.thumbnail_reference,
            cached: record.cached,
            download_count: record.download_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_downloads: i64,
    pub cached_files: i64,
    pub saved_space: String,
    pub active_users: u64,
}

impl StatsResponse {
    pub fn new(stats: DownloadStats, active_users: u64) -> Self {
        Self {
            total_downloads: stats.total_download_count,
            cached_files: stats.cached,
            saved_space: format_file_size(stats.total_size),
            active_users,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
    pub stats: StatsResponse,
}

#[instrument(skip_all)]
pub async fn history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query.map_err(|err| {
        info!(%err, "Invalid history query");
        ApiError::from(err)
    })?;
    let history_cfg = &state.config.history;
    let limit = query.limit.unwrap_or(history_cfg.limit).clamp(1, history_cfg.max_limit.max(1));

    let mut tx_manager = state.tx_manager();
    let overview = GetDownloadsOverview::new()
        .execute(GetDownloadsOverviewInput::new(limit, &mut tx_manager))
        .await
        .map_err(|err| {
            error!(err = format_error_report(&err), "Get history error");
            ApiError::from(err)
        })?;

    let now = OffsetDateTime::now_utc();
    Ok(Json(HistoryResponse {
        history: overview.history.into_iter().map(|record| HistoryEntry::new(record, now)).collect(),
        stats: StatsResponse::new(overview.stats, overview.active_users),
    }))
}
