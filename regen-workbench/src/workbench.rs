//! Workbench implementation - drives a session against a code service

use crate::session::{Completion, Phase, Session};
use regen_client::normalize::{self, ExecutionOutcome};
use regen_client::{
    Bounds, CodeService, HttpCodeService, Language, LayoutConfig, PanelGeometry, Result,
};
use tracing::{debug, info};

/// Configuration for the workbench
#[derive(Debug, Clone)]
pub struct WorkbenchConfig {
    /// Language selected when the workbench opens
    pub language: Language,
    pub layout: LayoutConfig,
    /// Initial bounds of the panel container
    pub container: Bounds,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            layout: LayoutConfig::default(),
            container: Bounds::new(0.0, 800.0),
        }
    }
}

/// One open workbench: session, panel layout and the service behind them
pub struct Workbench<S: CodeService> {
    service: S,
    session: Session,
    geometry: PanelGeometry,
}

impl Workbench<HttpCodeService> {
    /// Workbench against the backend on localhost
    pub fn local() -> Result<Self> {
        Ok(Self::new(HttpCodeService::local()?))
    }
}

impl<S: CodeService> Workbench<S> {
    /// Create a workbench with default configuration
    pub fn new(service: S) -> Self {
        Self::with_config(service, WorkbenchConfig::default())
    }

    pub fn with_config(service: S, config: WorkbenchConfig) -> Self {
        Self {
            service,
            session: Session::new(config.language),
            geometry: PanelGeometry::new(config.layout, config.container),
        }
    }

    /// Resume an existing session
    pub fn with_session(service: S, session: Session, config: WorkbenchConfig) -> Self {
        Self {
            service,
            session,
            geometry: PanelGeometry::new(config.layout, config.container),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut PanelGeometry {
        &mut self.geometry
    }

    /// Ask the generation service for code and show it in the output panel.
    ///
    /// Validation failures return before any network call is made.
    pub async fn submit_generation(&mut self, prompt: &str, language: Language) -> Result<&str> {
        let (ticket, request) = self.session.begin_generation(prompt, language)?;
        info!(service = self.service.name(), %language, "submitting generation");

        let reply = self.service.generate(&request).await;
        if self.session.complete_generation(ticket, reply)? == Completion::Discarded {
            debug!("generation reply arrived after a newer request");
        }
        Ok(self.session.generated_text())
    }

    /// Move the sanitized generated code into the editor
    pub fn transfer_to_editor(&mut self) -> Result<&str> {
        self.session.transfer_to_editor()
    }

    /// Run the editor buffer with `stdin` and show the result in the terminal
    pub async fn submit_execution(&mut self, stdin: &str) -> Result<&str> {
        let (ticket, request) = self.session.begin_execution(stdin)?;
        info!(
            service = self.service.name(),
            language = %request.language,
            bytes = request.code.len(),
            "submitting execution"
        );

        let reply = self.service.execute(&request).await;
        if self.session.complete_execution(ticket, reply)? == Completion::Discarded {
            debug!("execution reply arrived after a newer request");
        }
        Ok(self.session.output_text())
    }

    pub fn last_outcome(&self) -> Option<&ExecutionOutcome> {
        self.session.last_outcome()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.session.clear()
    }

    pub fn dismiss_error(&mut self) -> Phase {
        self.session.dismiss_error()
    }

    pub fn hide_generated(&mut self) {
        self.session.hide_generated();
    }

    pub fn close_terminal(&mut self) -> Result<()> {
        self.session.close_terminal()
    }

    pub fn set_editor_buffer(&mut self, code: impl Into<String>) -> Result<()> {
        self.session.set_editor_buffer(code)
    }

    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.session.set_stdin(stdin);
    }

    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.session.set_language(language)
    }

    /// Languages the backend advertises
    pub async fn languages(&self) -> Result<Vec<Language>> {
        let payload = self
            .service
            .languages()
            .await
            .map_err(normalize::classify)?;
        normalize::language_list(&payload)
    }

    /// Whether the backend answers its health check
    pub async fn health(&self) -> Result<bool> {
        self.service.health().await.map_err(normalize::classify)
    }
}
