use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionList, CompletionOptions, CompletionParams, CompletionResponse,
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, ExecuteCommandOptions, ExecuteCommandParams, Hover, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams, MessageType,
    ServerCapabilities, ServerInfo, ShowDocumentParams, TextDocumentPositionParams,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cmake_help_lsp::completion::{completions, resolve_completion_item};
use cmake_help_lsp::config::Settings;
use cmake_help_lsp::document::DocumentStore;
use cmake_help_lsp::error::{HelpError, HelpResult};
use cmake_help_lsp::hover::hover;
use cmake_help_lsp::online_help::online_help_url;

const ONLINE_HELP_COMMAND: &str = "cmake.onlineHelp";

#[derive(Parser)]
#[command(name = "cmake-help-lsp", version, about = "CMake language server backed by the cmake help tool")]
struct Cli {
    /// Command line used to run cmake, overriding the settings files
    #[arg(long)]
    cmake_path: Option<String>,
}

struct Backend {
    client: Client,
    settings: Arc<RwLock<Settings>>,
    documents: Arc<RwLock<DocumentStore>>,
    cmake_path_override: Option<String>,
}

impl Backend {
    fn new(client: Client, cmake_path_override: Option<String>) -> Self {
        let settings = Settings {
            cmake_path: cmake_path_override
                .clone()
                .unwrap_or_else(|| Settings::default().cmake_path),
            ..Settings::default()
        };

        Self {
            client,
            settings: Arc::new(RwLock::new(settings)),
            documents: Arc::new(RwLock::new(DocumentStore::new())),
            cmake_path_override,
        }
    }

    /// Unwrap a help result for an editor request.
    ///
    /// A missing executable is shown to the user once per request; every
    /// other failure is logged and answered with an empty result.
    async fn settle<T: Default>(&self, result: HelpResult<T>) -> T {
        match result {
            Ok(value) => value,
            Err(HelpError::ToolNotFound { program }) => {
                self.client
                    .show_message(
                        MessageType::INFO,
                        format!(
                            "The \"{program}\" command is not found in PATH. Install it or set \
                             `cmake.cmakePath` in the workspace settings to the CMake executable."
                        ),
                    )
                    .await;
                T::default()
            }
            Err(err) => {
                warn!(%err, "cmake help request failed");
                T::default()
            }
        }
    }

    /// The search term of an online help request: either a plain string or
    /// the word at a document position.
    async fn search_term(&self, arguments: &[Value]) -> Option<String> {
        let argument = arguments.first()?;
        if let Some(term) = argument.as_str() {
            return Some(term.to_string());
        }

        let position: TextDocumentPositionParams = serde_json::from_value(argument.clone()).ok()?;
        self.documents
            .read()
            .await
            .word_at(&position.text_document.uri, position.position)
    }

    async fn open_online_help(&self, term: &str) {
        let tool = self.settings.read().await.tool();
        let url = self.settle(online_help_url(&tool, term).await.map(Some)).await;
        let Some(url) = url else {
            return;
        };

        let uri = match Url::parse(&url) {
            Ok(uri) => uri,
            Err(err) => {
                warn!(%url, %err, "invalid documentation url");
                return;
            }
        };

        let shown = self
            .client
            .show_document(ShowDocumentParams {
                uri,
                external: Some(true),
                take_focus: None,
                selection: None,
            })
            .await;
        if let Err(err) = shown {
            warn!(%url, %err, "client could not open documentation");
        }
    }
}

#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| folder.uri.clone())
        .or_else(|| params.root_uri.clone())
        .and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root_dir = workspace_root(&params);

        {
            let mut settings = self.settings.write().await;
            match Settings::new(root_dir.as_deref(), self.cmake_path_override.as_deref()) {
                Ok(loaded) => *settings = loaded,
                Err(err) => warn!(%err, "failed to load settings, using defaults"),
            }
            if let Some(options) = params.initialization_options.as_ref() {
                settings.apply_client_settings(options);
            }
            info!(cmake_path = %settings.cmake_path, "initialized settings");
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(true),
                    ..CompletionOptions::default()
                }),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![ONLINE_HELP_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: "cmake-help-lsp".into(),
                version: Some(env!("CARGO_PKG_VERSION").into()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("cmake-help-lsp initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        self.documents
            .write()
            .await
            .open(document.uri, &document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.last() {
            self.documents
                .write()
                .await
                .open(params.text_document.uri, &change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents
            .write()
            .await
            .close(&params.text_document.uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let mut settings = self.settings.write().await;
        if settings.apply_client_settings(&params.settings) {
            info!(cmake_path = %settings.cmake_path, "settings changed");
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let (tool, enabled) = {
            let settings = self.settings.read().await;
            (settings.tool(), settings.hover)
        };
        if !enabled {
            return Ok(None);
        }

        let position = params.text_document_position_params;
        let Some(word) = self
            .documents
            .read()
            .await
            .word_at(&position.text_document.uri, position.position)
        else {
            return Ok(None);
        };

        debug!(%word, "hover");
        Ok(self.settle(hover(&tool, &word).await).await)
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let (tool, enabled) = {
            let settings = self.settings.read().await;
            (settings.tool(), settings.completion)
        };
        if !enabled {
            return Ok(None);
        }

        let position = params.text_document_position;
        let Some(partial) = self
            .documents
            .read()
            .await
            .word_before(&position.text_document.uri, position.position)
        else {
            return Ok(None);
        };

        let suggestions = self.settle(completions(&tool, &partial).await).await;
        let items = suggestions
            .iter()
            .map(|suggestion| suggestion.completion_item())
            .collect::<Vec<CompletionItem>>();

        Ok(Some(CompletionResponse::List(CompletionList {
            is_incomplete: true,
            items,
        })))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        let tool = self.settings.read().await.tool();
        match resolve_completion_item(&tool, item.clone()).await {
            Ok(resolved) => Ok(resolved),
            Err(err) => {
                debug!(%err, label = %item.label, "completion item left unresolved");
                Ok(item)
            }
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != ONLINE_HELP_COMMAND {
            return Err(Error::invalid_params(format!(
                "unknown command `{}`",
                params.command
            )));
        }

        match self.search_term(&params.arguments).await {
            Some(term) => self.open_online_help(&term).await,
            None => debug!("online help requested without a search term"),
        }

        Ok(None)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_env("CMAKE_HELP_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| Backend::new(client, cli.cmake_path));
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
