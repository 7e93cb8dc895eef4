//! Application context - dependency injection container

use std::sync::Arc;

use chrono::NaiveDate;
use opsboard_core::{
    AuthContext, Clock, CycleDashboard, Domain, RecordStore, ReportResource, SpreadsheetCodec,
    SystemClock,
};
use opsboard_domain::{Actor, Config, OpsBoardError, Result};
use opsboard_infra::{
    AccessTokenProvider, FileSessionStore, GoTrueAuth, HttpClient, RestRecordStore, XlsxCodec,
};
use tracing::{debug, warn};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub auth: Arc<AuthContext>,
    store: Arc<dyn RecordStore>,
    codec: Arc<dyn SpreadsheetCodec>,
    clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Wire the HTTP adapters, session file, codec and clock from `config`.
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::from_config(&config.backend)?;
        let auth = Arc::new(AuthContext::new(
            Arc::new(GoTrueAuth::new(http.clone(), &config.backend.url)),
            Arc::new(FileSessionStore::new(&config.session.path)),
        ));
        let tokens: Arc<dyn AccessTokenProvider> = auth.clone();
        let store = Arc::new(RestRecordStore::new(
            http,
            &config.backend.url,
            config.backend.anon_key.clone(),
            tokens,
        ));
        let clock = Arc::new(SystemClock::from_name(&config.report.timezone)?);

        debug!(backend = %config.backend.url, "Application context ready");
        Ok(Self { config, auth, store, codec: Arc::new(XlsxCodec::new()), clock })
    }

    /// Swap the clock, e.g. to pin "today" in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn resource(&self, domain: Domain) -> ReportResource {
        ReportResource::new(
            domain.schema(),
            Arc::clone(&self.store),
            Arc::clone(&self.codec),
            Arc::clone(&self.clock),
        )
    }

    /// Monthly cycle dashboard over the same store.
    pub fn dashboard(&self) -> CycleDashboard {
        CycleDashboard::new(Arc::clone(&self.store))
    }

    /// Today in the configured report timezone.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The signed-in user, resuming the persisted session on first use.
    ///
    /// Reads work signed out (the anon key is used), so a failed restore is
    /// logged and reported as `None`.
    pub async fn session(&self) -> Option<Actor> {
        if let Ok(actor) = self.auth.actor() {
            return Some(actor);
        }
        match self.auth.restore().await {
            Ok(actor) => actor,
            Err(err) => {
                warn!(error = %err, "Could not restore session");
                None
            }
        }
    }

    /// Like [`session`](Self::session) but signed-out is an `Auth` error.
    pub async fn require_actor(&self) -> Result<Actor> {
        self.session().await.ok_or_else(|| OpsBoardError::Auth("not signed in".into()))
    }
}
