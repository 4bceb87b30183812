//! Command line front end for saved projects.

use crate::session::SessionError;
use pagecraft_core::ConfigError;
use pagecraft_core::storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: pagecraft <command> [options]

Commands:
  list                      List saved projects
  new <name>                Create and save an empty project
  export <project-id>       Write a project's current page as HTML

Options:
  --storage <dir>           Project directory (default: platform data dir)
  --config <file>           Editor config JSON
  --out <file>              Output file for export (default: <project-slug>.html)";

/// Command line errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    List,
    New { name: String },
    Export { project_id: String, out: Option<PathBuf> },
    Help,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub command: CliCommand,
    pub storage_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

impl CliOptions {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut storage_dir = None;
        let mut config_path = None;
        let mut out = None;
        let mut help = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--storage" | "--config" | "--out" => {
                    let value = args.next().ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                    let slot = match arg.as_str() {
                        "--storage" => &mut storage_dir,
                        "--config" => &mut config_path,
                        _ => &mut out,
                    };
                    *slot = Some(PathBuf::from(value));
                }
                "-h" | "--help" => help = true,
                flag if flag.starts_with("--") => {
                    return Err(CliError::UnexpectedArgument(arg));
                }
                _ => positional.push(arg),
            }
        }

        if help {
            return Ok(Self {
                command: CliCommand::Help,
                storage_dir,
                config_path,
            });
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("help") => CliCommand::Help,
            Some("list") => CliCommand::List,
            Some("new") => CliCommand::New {
                name: positional.next().ok_or(CliError::MissingArgument("name"))?,
            },
            Some("export") => CliCommand::Export {
                project_id: positional
                    .next()
                    .ok_or(CliError::MissingArgument("project-id"))?,
                out: out.take(),
            },
            Some(other) => return Err(CliError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = positional.next() {
            return Err(CliError::UnexpectedArgument(extra));
        }
        if out.is_some() {
            return Err(CliError::UnexpectedArgument("--out".to_string()));
        }

        Ok(Self {
            command,
            storage_dir,
            config_path,
        })
    }
}

/// Execute a parsed command against file storage.
#[cfg(not(target_arch = "wasm32"))]
pub async fn run(options: CliOptions) -> Result<(), CliError> {
    use crate::session::EditorSession;
    use pagecraft_core::EditorConfig;
    use pagecraft_core::storage::FileStorage;
    use pagecraft_render::MemoryPublisher;
    use std::sync::Arc;

    if options.command == CliCommand::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = match &options.config_path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let storage = match options.storage_dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Using project directory {}", storage.base_path().display());

    let mut session = EditorSession::new(Arc::new(storage), Arc::new(MemoryPublisher::new()), config);

    match options.command {
        CliCommand::Help => {}
        CliCommand::List => {
            for id in session.list_projects().await? {
                println!("{}", id);
            }
        }
        CliCommand::New { name } => {
            session.new_project(name);
            session.save_now().await?;
            println!("{}", session.project().id);
        }
        CliCommand::Export { project_id, out } => {
            session.open(&project_id).await?;
            let html = session.export_html()?;
            let path = out.unwrap_or_else(|| PathBuf::from(session.download_file_name()));
            std::fs::write(&path, html).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            log::info!("Exported {} to {}", project_id, path.display());
            println!("{}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, CliError> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_empty_is_help() {
        assert_eq!(parse(&[]).unwrap().command, CliCommand::Help);
        assert_eq!(parse(&["list", "--help"]).unwrap().command, CliCommand::Help);
    }

    #[test]
    fn test_parse_export_with_options() {
        let options = parse(&[
            "export",
            "landing",
            "--out",
            "site.html",
            "--storage",
            "/tmp/projects",
        ])
        .unwrap();

        assert_eq!(
            options.command,
            CliCommand::Export {
                project_id: "landing".to_string(),
                out: Some(PathBuf::from("site.html")),
            }
        );
        assert_eq!(options.storage_dir, Some(PathBuf::from("/tmp/projects")));
        assert_eq!(options.config_path, None);
    }

    #[test]
    fn test_parse_new() {
        let options = parse(&["new", "Spring Sale", "--config", "editor.json"]).unwrap();
        assert_eq!(
            options.command,
            CliCommand::New {
                name: "Spring Sale".to_string()
            }
        );
        assert_eq!(options.config_path, Some(PathBuf::from("editor.json")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse(&["deploy"]), Err(CliError::UnknownCommand(_))));
        assert!(matches!(parse(&["export"]), Err(CliError::MissingArgument("project-id"))));
        assert!(matches!(parse(&["list", "--storage"]), Err(CliError::MissingValue(_))));
        assert!(matches!(parse(&["list", "--verbose"]), Err(CliError::UnexpectedArgument(_))));
        assert!(matches!(parse(&["list", "extra"]), Err(CliError::UnexpectedArgument(_))));
        assert!(matches!(parse(&["list", "--out", "x.html"]), Err(CliError::UnexpectedArgument(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_run_new_then_export() {
        use pagecraft_core::storage::{FileStorage, Storage};
        use pollster::block_on;
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let dir = temp.path().join("projects");
        let out = temp.path().join("out.html");

        let options = CliOptions {
            command: CliCommand::New {
                name: "Launch".to_string(),
            },
            storage_dir: Some(dir.clone()),
            config_path: None,
        };
        block_on(run(options)).unwrap();

        let storage = FileStorage::new(dir.clone()).unwrap();
        let ids = block_on(storage.list()).unwrap();
        let project_id = ids
            .into_iter()
            .find(|id| id != pagecraft_core::storage::LAST_PROJECT_KEY)
            .unwrap();

        let options = CliOptions {
            command: CliCommand::Export {
                project_id,
                out: Some(out.clone()),
            },
            storage_dir: Some(dir.clone()),
            config_path: None,
        };
        block_on(run(options)).unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<title>Launch</title>"));
    }
}
