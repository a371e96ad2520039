use crate::common::cache::TtlCache;
use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::DbPool;
use crate::infrastructure::redis::client::RedisService;
use crate::infrastructure::storage::s3::StorageService;
use crate::modules::news::dto::NewsDigest;
use crate::modules::videos::dto::AvatarCatalog;
use crate::modules::videos::poller::JobTracker;
use crate::providers::heygen::HeygenClient;
use crate::providers::llm::LlmClient;
use crate::providers::n8n::N8nClient;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub redis: RedisService,
    pub storage: StorageService,
    /// Shared client for one-off outbound calls (OAuth, YouTube).
    pub http: reqwest::Client,
    pub llm: LlmClient,
    pub heygen: HeygenClient,
    pub n8n: Option<N8nClient>,
    /// One in-flight render per script.
    pub jobs: JobTracker,
    pub catalog_cache: TtlCache<AvatarCatalog>,
    pub news_cache: TtlCache<NewsDigest>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DbPool,
        redis: RedisService,
        storage: StorageService,
    ) -> Self {
        let http = reqwest::Client::new();
        let llm = LlmClient::new(
            http.clone(),
            config.llm_base_url.clone(),
            config.llm_api_key.clone(),
            config.llm_model.clone(),
        );
        let heygen = HeygenClient::new(
            http.clone(),
            config.heygen_base_url.clone(),
            config.heygen_api_key.clone(),
        );
        let n8n = config
            .n8n_webhook_url
            .clone()
            .map(|url| N8nClient::new(http.clone(), url));

        Self {
            config,
            db,
            redis,
            storage,
            http,
            llm,
            heygen,
            n8n,
            jobs: JobTracker::new(),
            catalog_cache: TtlCache::new(),
            news_cache: TtlCache::new(),
        }
    }
}
