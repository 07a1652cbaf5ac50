//! Command-backed generators
//!
//! Each generator is an external program configured under `[generators]`.
//! The merged schema is written to the program's stdin and typed options are
//! passed as JSON arguments:
//!
//! - backend: `<program> <args..> --database <kind> --options <json>`, prints a
//!   JSON [`BackendBundle`] on stdout
//! - client: `<program> <args..> --options <json>`, prints a JSON [`ClientBundle`]
//! - migrator: `<program> <args..> --database <kind> --connection <json>
//!   --migrations-dir <dir>`, exit status only
//!
//! A non-zero exit status becomes [`AdapterError::Command`] carrying stderr.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use config::{BackendOptions, ClientOptions, CommandSpec, DatabaseConfig, GeneratorsConfig};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use types::{BackendBundle, ClientBundle, DatabaseKind};

use crate::{
    AdapterError, AdapterResult, BackendGenerator, ClientGenerator, GeneratorFactory,
    MigrationEngine,
};

/// Factory that runs the commands configured under `[generators]`
#[derive(Debug, Clone)]
pub struct CommandToolchain {
    generators: GeneratorsConfig,
    working_dir: PathBuf,
}

impl CommandToolchain {
    /// Create a toolchain whose commands run inside `working_dir`
    pub fn new(generators: GeneratorsConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self { generators, working_dir: working_dir.into() }
    }
}

impl GeneratorFactory for CommandToolchain {
    fn backend_generator(
        &self,
        schema: Arc<str>,
        options: &BackendOptions,
    ) -> AdapterResult<Arc<dyn BackendGenerator>> {
        let command =
            self.generators.backend.clone().ok_or(AdapterError::NotConfigured("backend"))?;
        Ok(Arc::new(CommandBackendGenerator {
            command,
            schema,
            options: serde_json::to_string(options)?,
            working_dir: self.working_dir.clone(),
        }))
    }

    fn client_generator(
        &self,
        schema: Arc<str>,
        options: &ClientOptions,
    ) -> AdapterResult<Arc<dyn ClientGenerator>> {
        let command =
            self.generators.client.clone().ok_or(AdapterError::NotConfigured("client"))?;
        Ok(Arc::new(CommandClientGenerator {
            command,
            schema,
            options: serde_json::to_string(options)?,
            working_dir: self.working_dir.clone(),
        }))
    }

    fn migration_engine(
        &self,
        database: &DatabaseConfig,
    ) -> AdapterResult<Arc<dyn MigrationEngine>> {
        let command =
            self.generators.migrator.clone().ok_or(AdapterError::NotConfigured("migration"))?;
        let connection = match &database.with_defaults() {
            DatabaseConfig::Postgres(connection) => serde_json::to_string(connection)?,
            DatabaseConfig::Sqlite(connection) => serde_json::to_string(connection)?,
        };
        Ok(Arc::new(CommandMigrationEngine {
            command,
            kind: database.kind(),
            connection,
            working_dir: self.working_dir.clone(),
        }))
    }
}

/// Backend generator backed by an external command
pub struct CommandBackendGenerator {
    command: CommandSpec,
    schema: Arc<str>,
    options: String,
    working_dir: PathBuf,
}

#[async_trait::async_trait]
impl BackendGenerator for CommandBackendGenerator {
    async fn create_backend(&self, database: DatabaseKind) -> AdapterResult<BackendBundle> {
        let args = [
            "--database".to_string(),
            database.to_string(),
            "--options".to_string(),
            self.options.clone(),
        ];
        let stdout = run_command(&self.command, &args, &self.schema, &self.working_dir).await?;
        Ok(serde_json::from_str(&stdout)?)
    }
}

/// Client generator backed by an external command
pub struct CommandClientGenerator {
    command: CommandSpec,
    schema: Arc<str>,
    options: String,
    working_dir: PathBuf,
}

#[async_trait::async_trait]
impl ClientGenerator for CommandClientGenerator {
    async fn create_client(&self) -> AdapterResult<ClientBundle> {
        let args = ["--options".to_string(), self.options.clone()];
        let stdout = run_command(&self.command, &args, &self.schema, &self.working_dir).await?;
        Ok(serde_json::from_str(&stdout)?)
    }
}

/// Migration engine backed by an external command
pub struct CommandMigrationEngine {
    command: CommandSpec,
    kind: DatabaseKind,
    connection: String,
    working_dir: PathBuf,
}

#[async_trait::async_trait]
impl MigrationEngine for CommandMigrationEngine {
    async fn diff_and_apply(&self, schema: &str, migrations_dir: &Path) -> AdapterResult<()> {
        let args = [
            "--database".to_string(),
            self.kind.to_string(),
            "--connection".to_string(),
            self.connection.clone(),
            "--migrations-dir".to_string(),
            migrations_dir.display().to_string(),
        ];
        let stdout = run_command(&self.command, &args, schema, &self.working_dir).await?;
        if !stdout.trim().is_empty() {
            tracing::debug!(output = %stdout.trim(), "migration engine output");
        }
        Ok(())
    }
}

/// Run `spec` with `extra_args`, feeding `input` on stdin, and return stdout.
async fn run_command(
    spec: &CommandSpec,
    extra_args: &[String],
    input: &str,
    working_dir: &Path,
) -> AdapterResult<String> {
    tracing::debug!(program = %spec.program, "running generator command");
    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .args(extra_args)
        .current_dir(working_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| AdapterError::Message(format!("no stdin for `{}`", spec.program)))?;
    let feed = async move {
        let written = stdin.write_all(input.as_bytes()).await;
        drop(stdin);
        written
    };

    // Feed stdin while draining stdout/stderr so neither side blocks on a full pipe.
    let (written, output) = tokio::join!(feed, child.wait_with_output());
    let output = output?;

    if !output.status.success() {
        return Err(AdapterError::Command {
            program: spec.program.clone(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    // Programs that ignore their input close the pipe early.
    if let Err(e) = written {
        if e.kind() != ErrorKind::BrokenPipe {
            return Err(e.into());
        }
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
