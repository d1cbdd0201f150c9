use std::convert::Infallible;
use tracing::{info, instrument};

use super::Interactor;
use crate::{
    database::MediaStore,
    entities::MediaDescriptor,
    errors::ErrorKind,
    services::{FetchErrorKind, FetchMedia},
    utils::{is_telegram_link, parse_link, ParseLinkErrorKind},
};

#[derive(Debug, thiserror::Error)]
pub enum GetMediaErrorKind {
    #[error("Not a Telegram post link")]
    InvalidLink,
    #[error(transparent)]
    UnresolvableLink(#[from] ParseLinkErrorKind),
    #[error(transparent)]
    Fetch(#[from] FetchErrorKind),
    #[error(transparent)]
    Database(#[from] ErrorKind<Infallible>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaOutcome {
    pub descriptor: MediaDescriptor,
    pub cached: bool,
    /// Id of the row created on a cache miss
    pub download_id: Option<i64>,
}

/// Cache lookup, then fetch and persist on a miss.
///
/// Lookup and insert run in separate transactions, so two concurrent requests
/// for the same unseen link may both fetch and both insert a row.
pub struct GetMedia {}

impl GetMedia {
    pub const fn new() -> Self {
        Self {}
    }
}

pub struct GetMediaInput<'a, S, F> {
    pub url: &'a str,
    /// Requesting chat user, if any; their download history is updated
    pub telegram_id: Option<i64>,
    pub store: &'a mut S,
    pub fetcher: &'a F,
}

impl<'a, S, F> GetMediaInput<'a, S, F> {
    pub const fn new(url: &'a str, telegram_id: Option<i64>, store: &'a mut S, fetcher: &'a F) -> Self {
        Self {
            url,
            telegram_id,
            store,
            fetcher,
        }
    }
}

impl<S, F> Interactor<GetMediaInput<'_, S, F>> for &GetMedia
where
    S: MediaStore + Send,
    F: FetchMedia + Sync,
{
    type Output = MediaOutcome;
    type Err = GetMediaErrorKind;

    #[instrument(skip_all, fields(url = %url.trim()))]
    async fn execute(
        self,
        GetMediaInput {
            url,
            telegram_id,
            store,
            fetcher,
        }: GetMediaInput<'_, S, F>,
    ) -> Result<Self::Output, Self::Err> {
        let url = url.trim();
        if !is_telegram_link(url) {
            return Err(GetMediaErrorKind::InvalidLink);
        }

        if let Some(record) = store.find_cached(url).await? {
            store.register_hit(record.id).await?;
            if let Some(telegram_id) = telegram_id {
                store.record_user_download(telegram_id, record.id).await?;
            }
            info!(download_id = record.id, "Got cached media");

            return Ok(MediaOutcome {
                descriptor: record.descriptor(),
                cached: true,
                download_id: None,
            });
        }

        let link = parse_link(url)?;
        let descriptor = fetcher.fetch(&link).await?;

        let download_id = store.insert_download(url, &descriptor).await?;
        if let Some(telegram_id) = telegram_id {
            store.record_user_download(telegram_id, download_id).await?;
        }
        info!(download_id, media_type = %descriptor.media_type, "Media fetched and saved");

        Ok(MediaOutcome {
            descriptor,
            cached: false,
            download_id: Some(download_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        collections::HashMap,
        future::Future,
        sync::atomic::{AtomicUsize, Ordering},
    };
    use time::OffsetDateTime;

    use crate::{
        entities::{DownloadRecord, ParsedLink},
        services::placeholder_descriptor,
        value_objects::MediaType,
    };

    #[derive(Default)]
    struct MemoryStore {
        records: Vec<DownloadRecord>,
        users: HashMap<i64, i64>,
        user_downloads: Vec<(i64, i64)>,
        fail: bool,
    }

    impl MemoryStore {
        fn check(&self) -> Result<(), ErrorKind<Infallible>> {
            if self.fail {
                Err(ErrorKind::Unexpected(anyhow::anyhow!("connection refused")))
            } else {
                Ok(())
            }
        }
    }

    impl MediaStore for MemoryStore {
        fn find_cached(&mut self, url: &str) -> impl Future<Output = Result<Option<DownloadRecord>, ErrorKind<Infallible>>> + Send {
            let res = self
                .check()
                .map(|()| self.records.iter().find(|record| record.url == url && record.cached).cloned());
            async move { res }
        }

        fn register_hit(&mut self, download_id: i64) -> impl Future<Output = Result<(), ErrorKind<Infallible>>> + Send {
            let res = self.check().map(|()| {
                if let Some(record) = self.records.iter_mut().find(|record| record.id == download_id) {
                    record.download_count += 1;
                    record.updated_at = OffsetDateTime::now_utc();
                }
            });
            async move { res }
        }

        fn insert_download(
            &mut self,
            url: &str,
            descriptor: &MediaDescriptor,
        ) -> impl Future<Output = Result<i64, ErrorKind<Infallible>>> + Send {
            let res = self.check().map(|()| {
                let id = i64::try_from(self.records.len()).unwrap() + 1;
                let now = OffsetDateTime::now_utc();
                self.records.push(DownloadRecord {
                    id,
                    url: url.to_owned(),
                    media_type: descriptor.media_type,
                    title: descriptor.title.clone(),
                    file_reference: descriptor.file_reference.clone(),
                    file_size: descriptor.file_size,
                    thumbnail_reference: descriptor.thumbnail.clone(),
                    cached: true,
                    download_count: 1,
                    created_at: now,
                    updated_at: now,
                });
                id
            });
            async move { res }
        }

        fn record_user_download(
            &mut self,
            telegram_id: i64,
            download_id: i64,
        ) -> impl Future<Output = Result<(), ErrorKind<Infallible>>> + Send {
            let res = self.check().map(|()| {
                if let Some(count) = self.users.get_mut(&telegram_id) {
                    *count += 1;
                    self.user_downloads.push((telegram_id, download_id));
                }
            });
            async move { res }
        }
    }

    enum Script {
        Returns(MediaDescriptor),
        NoMedia,
    }

    struct ScriptedFetcher {
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl FetchMedia for ScriptedFetcher {
        async fn fetch(&self, _link: &ParsedLink) -> Result<MediaDescriptor, FetchErrorKind> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Returns(descriptor) => Ok(descriptor.clone()),
                Script::NoMedia => Err(FetchErrorKind::NoMedia),
            }
        }
    }

    fn document() -> MediaDescriptor {
        MediaDescriptor {
            media_type: MediaType::Document,
            title: "report.pdf".to_owned(),
            file_reference: "BQACAgIAAx".to_owned(),
            file_size: Some(4096),
            thumbnail: None,
            duration: None,
        }
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let mut store = MemoryStore::default();
        let fetcher = ScriptedFetcher::new(Script::Returns(document()));
        let get_media = GetMedia::new();
        let url = "https://t.me/examplechan/42";

        let first = get_media
            .execute(GetMediaInput::new(url, None, &mut store, &fetcher))
            .await
            .unwrap();
        let second = get_media
            .execute(GetMediaInput::new(url, None, &mut store, &fetcher))
            .await
            .unwrap();

        assert!(!first.cached);
        assert_eq!(first.download_id, Some(1));
        assert!(second.cached);
        assert_eq!(second.download_id, None);
        assert_eq!(second.descriptor, first.descriptor);

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(store.records.len(), 1);
        assert_eq!(store.records[0].download_count, 2);
    }

    #[tokio::test]
    async fn test_cache_hit_touches_updated_at() {
        let mut store = MemoryStore::default();
        let fetcher = ScriptedFetcher::new(Script::Returns(document()));
        let get_media = GetMedia::new();
        let url = "https://t.me/examplechan/42";

        get_media
            .execute(GetMediaInput::new(url, None, &mut store, &fetcher))
            .await
            .unwrap();
        let stale = OffsetDateTime::UNIX_EPOCH;
        store.records[0].updated_at = stale;

        get_media
            .execute(GetMediaInput::new(url, None, &mut store, &fetcher))
            .await
            .unwrap();

        assert_eq!(store.records[0].download_count, 2);
        assert!(store.records[0].updated_at > stale);
    }

    #[tokio::test]
    async fn test_miss_persists_document() {
        let mut store = MemoryStore::default();
        let fetcher = ScriptedFetcher::new(Script::Returns(document()));

        let outcome = GetMedia::new()
            .execute(GetMediaInput::new("https://t.me/examplechan/7", None, &mut store, &fetcher))
            .await
            .unwrap();

        assert_eq!(store.records.len(), 1);
        assert_eq!(store.records[0].media_type, MediaType::Document);
        assert_eq!(store.records[0].url, "https://t.me/examplechan/7");
        assert_eq!(outcome.download_id, Some(store.records[0].id));
    }

    #[tokio::test]
    async fn test_no_media_leaves_store_untouched() {
        let mut store = MemoryStore::default();
        let fetcher = ScriptedFetcher::new(Script::NoMedia);

        let err = GetMedia::new()
            .execute(GetMediaInput::new("https://t.me/examplechan/42", Some(1), &mut store, &fetcher))
            .await
            .unwrap_err();

        assert!(matches!(err, GetMediaErrorKind::Fetch(FetchErrorKind::NoMedia)));
        assert!(store.records.is_empty());
        assert!(store.user_downloads.is_empty());
    }

    #[tokio::test]
    async fn test_placeholder_scenario() {
        let mut store = MemoryStore::default();
        let url = "https://t.me/examplechan/42";
        let link = parse_link(url).unwrap();
        let fetcher = ScriptedFetcher::new(Script::Returns(placeholder_descriptor(&link)));
        let get_media = GetMedia::new();

        let first = get_media
            .execute(GetMediaInput::new(url, None, &mut store, &fetcher))
            .await
            .unwrap();
        assert!(!first.cached);
        assert_eq!(first.descriptor.media_type, MediaType::Video);
        assert_eq!(first.descriptor.title, "Медиа из examplechan");
        assert_eq!(first.descriptor.file_size, Some(1_024_000));
        assert!(first.download_id.is_some());

        let second = get_media
            .execute(GetMediaInput::new(url, None, &mut store, &fetcher))
            .await
            .unwrap();
        assert!(second.cached);
        assert_eq!(second.descriptor.title, "Медиа из examplechan");
        assert_eq!(second.descriptor.file_size, Some(1_024_000));
        assert_eq!(second.download_id, None);
    }

    #[tokio::test]
    async fn test_invalid_link_skips_store() {
        let mut store = MemoryStore {
            fail: true,
            ..Default::default()
        };
        let fetcher = ScriptedFetcher::new(Script::Returns(document()));

        let err = GetMedia::new()
            .execute(GetMediaInput::new("https://example.com/chan/1", None, &mut store, &fetcher))
            .await
            .unwrap_err();

        assert!(matches!(err, GetMediaErrorKind::InvalidLink));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_link() {
        let mut store = MemoryStore::default();
        let fetcher = ScriptedFetcher::new(Script::Returns(document()));

        let err = GetMedia::new()
            .execute(GetMediaInput::new("https://t.me/examplechan", None, &mut store, &fetcher))
            .await
            .unwrap_err();

        assert!(matches!(err, GetMediaErrorKind::UnresolvableLink(ParseLinkErrorKind::NoMessageIdFound(_))));
        assert_eq!(fetcher.calls(), 0);
        assert!(store.records.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_typed() {
        let mut store = MemoryStore {
            fail: true,
            ..Default::default()
        };
        let fetcher = ScriptedFetcher::new(Script::Returns(document()));

        let err = GetMedia::new()
            .execute(GetMediaInput::new("https://t.me/examplechan/42", None, &mut store, &fetcher))
            .await
            .unwrap_err();

        assert!(matches!(err, GetMediaErrorKind::Database(_)));
    }

    #[tokio::test]
    async fn test_user_downloads_are_recorded() {
        let mut store = MemoryStore::default();
        store.users.insert(777, 0);
        let fetcher = ScriptedFetcher::new(Script::Returns(document()));
        let get_media = GetMedia::new();
        let url = "https://t.me/examplechan/42";

        get_media
            .execute(GetMediaInput::new(url, Some(777), &mut store, &fetcher))
            .await
            .unwrap();
        get_media
            .execute(GetMediaInput::new(url, Some(777), &mut store, &fetcher))
            .await
            .unwrap();
        get_media
            .execute(GetMediaInput::new(url, Some(999), &mut store, &fetcher))
            .await
            .unwrap();

        assert_eq!(store.users[&777], 2);
        assert_eq!(store.user_downloads, vec![(777, 1), (777, 1)]);
        assert_eq!(store.records[0].download_count, 3);
    }

    #[tokio::test]
    async fn test_url_is_trimmed() {
        let mut store = MemoryStore::default();
        let fetcher = ScriptedFetcher::new(Script::Returns(document()));

        GetMedia::new()
            .execute(GetMediaInput::new("  https://t.me/examplechan/42\n", None, &mut store, &fetcher))
            .await
            .unwrap();

        assert_eq!(store.records[0].url, "https://t.me/examplechan/42");
    }
}
