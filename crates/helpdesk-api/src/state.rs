//! Application state shared by the CLI and the HTTP handlers.
//!
//! The store and the completion provider are built here and injected into
//! the chat service; nothing else holds a client.

use std::sync::Arc;

use helpdesk_core::chat::reply::ReplyGenerator;
use helpdesk_core::chat::service::ChatService;
use helpdesk_core::llm::box_provider::BoxLlmProvider;
use helpdesk_infra::config::load_config;
use helpdesk_infra::llm::create_provider;
use helpdesk_infra::sqlite::chat::SqliteChatRepository;
use helpdesk_infra::sqlite::pool::DatabasePool;
use helpdesk_types::config::ReplySettings;

use crate::cli::RuntimeConfig;

pub type ConcreteChatService = ChatService<SqliteChatRepository>;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Open the database, build the provider, wire the service.
    pub async fn init(config: RuntimeConfig) -> anyhow::Result<Self> {
        let file_config = load_config(config.config_path.as_deref()).await;

        let db_pool = DatabasePool::new(&config.database_url).await?;
        tracing::info!(database_url = %config.database_url, "database ready");

        let provider = create_provider(config.api_key, &config.llm_base_url);
        Ok(Self::from_parts(db_pool, provider, file_config.reply))
    }

    pub fn from_parts(
        db_pool: DatabasePool,
        provider: BoxLlmProvider,
        settings: ReplySettings,
    ) -> Self {
        let repo = SqliteChatRepository::new(db_pool.clone());
        let replies = ReplyGenerator::new(provider, settings);

        Self {
            chat_service: Arc::new(ChatService::new(repo, replies)),
            db_pool,
        }
    }
}
