//! Line-oriented driver for one session
//!
//! Reads one statement per line, executes it and writes the rendered
//! response back. Works over any tokio reader and writer, so the same loop
//! serves stdin/stdout and in-memory buffers in tests.

use std::io;

use serde_json::json;
use tessera_command::parse_statement;
use tessera_datamodel::NamespaceStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::executor::Executor;
use crate::response::Response;
use crate::session::Session;

/// How responses are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `STATUS` or `STATUS: message`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

pub struct SessionLoop<S> {
    executor: Executor<S>,
    prompt: String,
    show_prompt: bool,
    format: OutputFormat,
}

impl<S: NamespaceStore> SessionLoop<S> {
    pub fn new<P: Into<String>>(executor: Executor<S>, prompt: P) -> Self {
        Self {
            executor,
            prompt: prompt.into(),
            show_prompt: true,
            format: OutputFormat::Text,
        }
    }

    /// Disable the prompt for scripted input
    pub fn with_prompt_shown(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Prompt for the session's current state
    pub fn prompt_for(&self, session: &Session) -> String {
        match session.namespace() {
            Some(namespace) => format!("{}: {}> ", self.prompt, namespace),
            None => format!("{}> ", self.prompt),
        }
    }

    /// Run until `exit`, `quit` or end of input
    pub async fn run<R, W>(&self, session: &mut Session, input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        loop {
            if self.show_prompt {
                output.write_all(self.prompt_for(session).as_bytes()).await?;
                output.flush().await?;
            }

            let line = match lines.next_line().await? {
                Some(line) => line,
                None => break,
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line == "exit" || line == "quit" {
                info!(user = session.user().username(), "Closing session");
                break;
            }

            if line.starts_with("//") || line.starts_with("--") {
                if self.format == OutputFormat::Text {
                    self.write_line(output, line).await?;
                }
                continue;
            }

            let statement = match parse_statement(line) {
                Ok(statement) => statement,
                Err(e) => {
                    warn!(statement = line, error = %e, "Bad statement");
                    let rendered = match self.format {
                        OutputFormat::Text => e.to_string(),
                        OutputFormat::Json => json!({ "error": e.to_string() }).to_string(),
                    };
                    self.write_line(output, &rendered).await?;
                    continue;
                }
            };

            let mut responses: Vec<Response> = Vec::with_capacity(1);
            self.executor.execute(&mut responses, session, statement);

            for response in &responses {
                let rendered = match self.format {
                    OutputFormat::Text => response.to_string(),
                    OutputFormat::Json => serde_json::to_string(response)?,
                };
                self.write_line(output, &rendered).await?;
            }
        }

        debug!("Session loop finished");
        output.flush().await
    }

    async fn write_line<W>(&self, output: &mut W, line: &str) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await
    }
}
