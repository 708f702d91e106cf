mod app;
mod cli;

use std::io::{self, Write};
use std::process;

use app::{wire_app, App};
use cli::{config_to_command, parse_args, CliCommand};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use vaul::{Category, CategoryCount, Command, VaultPaths};

/// CliCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn run(&self, command: CliCommand, out: &mut dyn Write) -> Result<i32, Error> {
        match command {
            CliCommand::Help => {
                print_help(out)?;
                Ok(0)
            }
            CliCommand::Paths => {
                print_paths(out, &self.app.paths)?;
                Ok(0)
            }
            CliCommand::Add { content, category } => {
                let cmd = self
                    .app
                    .store()?
                    .add_command_with_category(&content, category.as_deref().unwrap_or(""))?;
                writeln!(out, "{}", cmd.id).map_err(write_err)?;
                Ok(0)
            }
            CliCommand::List { category } => {
                let commands: Vec<Command> = self
                    .app
                    .store()?
                    .get_commands()
                    .into_iter()
                    .filter(|c| category.as_deref().map_or(true, |id| c.category == id))
                    .collect();
                print_command_list(out, &commands)?;
                Ok(0)
            }
            CliCommand::Delete { id } => {
                self.app.store()?.delete_command(&id)?;
                Ok(0)
            }
            CliCommand::CategoryCreate { name, color } => {
                let cat = self.app.store()?.create_category(&name, &color)?;
                writeln!(out, "{}", cat.id).map_err(write_err)?;
                Ok(0)
            }
            CliCommand::CategoryList => {
                let store = self.app.store()?;
                print_category_list(out, &store.get_categories(), &store.category_counts())?;
                Ok(0)
            }
            CliCommand::CategoryUpdate { id, name, color } => {
                let store = self.app.store()?;
                let color = match color {
                    Some(c) => c,
                    None => store
                        .get_categories()
                        .into_iter()
                        .find(|c| c.id == id)
                        .map(|c| c.color)
                        .ok_or_else(|| Error::not_found(format!("category {}", id)))?,
                };
                store.update_category(&id, &name, &color)?;
                Ok(0)
            }
            CliCommand::CategoryDelete { id, reassign_to } => {
                self.app.store()?.delete_category(&id, &reassign_to)?;
                Ok(0)
            }
            CliCommand::CategoryMerge { source, target } => {
                self.app.store()?.merge_categories(&source, &target)?;
                Ok(0)
            }
            CliCommand::Assign {
                command_id,
                category_id,
            } => {
                self.app
                    .store()?
                    .set_command_category(&command_id, &category_id)?;
                Ok(0)
            }
        }
    }
}

fn write_err(e: io::Error) -> Error {
    Error::io_msg(e.to_string())
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("vaul: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: vaul [-h] [-d|--home-dir directory] <command> [args...]");
}

fn print_help(out: &mut dyn Write) -> Result<(), Error> {
    let text = "\
Usage: vaul [-h] [-d|--home-dir directory] <command> [args...]
  -h, --help            Display this help message.
  -d, --home-dir        Directory holding commands.json and categories.json.

Environment:
  VAUL_HOME   Storage directory. Default: $XDG_CONFIG_HOME/vaul or ~/.config/vaul
              (~/Library/Application Support/vaul on macOS, %APPDATA%\\vaul on Windows).

Commands:
  add <content...> [-c id]                Add a command (printed id).
  list [-c id]                            List commands, newest first (id, created, category, content).
  delete <id>                             Delete a command.
  assign <command-id> [category-id]       Set a command's category (omit to uncategorize).
  paths                                   Print resolved storage paths.

  category create <name> [--color c]      Create a category (returns the existing one for a taken name).
  category list                           List categories (id, name, color, commands).
  category update <id> <name> [--color c] Rename / recolor a category.
  category delete <id> [--reassign id]    Delete a category; its commands become uncategorized.
  category merge <source> <target>        Move source's commands to target and delete source.
";
    out.write_all(text.as_bytes()).map_err(write_err)
}

fn print_paths(out: &mut dyn Write, paths: &VaultPaths) -> Result<(), Error> {
    let dir = paths
        .dir
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    writeln!(out, "dir\t{}", dir).map_err(write_err)?;
    writeln!(out, "commands\t{}", paths.commands.display()).map_err(write_err)?;
    writeln!(out, "categories\t{}", paths.categories.display()).map_err(write_err)?;
    if let Some(ref fallback) = paths.fallback {
        writeln!(out, "fallback\t{}", fallback).map_err(write_err)?;
    }
    Ok(())
}

fn print_command_list(out: &mut dyn Write, commands: &[Command]) -> Result<(), Error> {
    for c in commands {
        let category = if c.is_uncategorized() { "-" } else { c.category.as_str() };
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            c.id,
            c.created_at.to_rfc3339(),
            category,
            c.content
        )
        .map_err(write_err)?;
    }
    Ok(())
}

fn print_category_list(
    out: &mut dyn Write,
    categories: &[Category],
    counts: &[CategoryCount],
) -> Result<(), Error> {
    let count_of = |id: &str| {
        counts
            .iter()
            .find(|c| c.category_id == id)
            .map_or(0, |c| c.count)
    };
    for cat in categories {
        writeln!(out, "{}\t{}\t{}\t{}", cat.id, cat.name, cat.color, count_of(&cat.id))
            .map_err(write_err)?;
    }
    writeln!(out, "-\t(uncategorized)\t-\t{}", count_of("")).map_err(write_err)?;
    Ok(())
}

pub fn run() -> Result<i32, Error> {
    let config = parse_args()?;
    let command = config_to_command(&config);
    let app = wire_app(config.home_dir.clone(), command.needs_store());
    let logger = std::sync::Arc::clone(&app.logger);
    let name = command.name();
    let _ = logger.log(
        &LogRecord::now(LogLevel::Debug, "command start")
            .layer("cli")
            .kind("lifecycle")
            .field("command", name),
    );

    let runner = Runner { app };
    let stdout = io::stdout();
    let result = runner.run(command, &mut stdout.lock());
    if let Err(ref e) = result {
        let _ = logger.log(
            &LogRecord::now(LogLevel::Error, "command failed")
                .layer("cli")
                .kind("lifecycle")
                .field("command", name)
                .field("error", e.to_string())
                .field("exit_code", e.exit_code()),
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::parse_from;

    struct Harness {
        tmp: tempfile::TempDir,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                tmp: tempfile::tempdir().unwrap(),
            }
        }

        /// -d で一時ディレクトリを指定して 1 コマンド実行し、(結果, 標準出力) を返す
        fn run(&self, args: &[&str]) -> (Result<i32, Error>, String) {
            let home = self.tmp.path().to_string_lossy().to_string();
            let mut argv = vec!["vaul", "-d", home.as_str()];
            argv.extend_from_slice(args);
            let config = parse_from(argv).unwrap();
            let command = config_to_command(&config);
            let runner = Runner {
                app: wire_app(config.home_dir.clone(), command.needs_store()),
            };
            let mut out = Vec::new();
            let result = runner.run(command, &mut out);
            (result, String::from_utf8(out).unwrap())
        }

        fn ok(&self, args: &[&str]) -> String {
            let (result, out) = self.run(args);
            assert_eq!(result.unwrap(), 0, "{:?}", args);
            out
        }
    }

    fn column(out: &str, line: usize, col: usize) -> String {
        out.lines().nth(line).unwrap().split('\t').nth(col).unwrap().to_string()
    }

    #[test]
    fn test_help() {
        let h = Harness::new();
        assert!(h.ok(&[]).starts_with("Usage: vaul"));
    }

    #[test]
    fn test_add_list_delete() {
        let h = Harness::new();
        let first = h.ok(&["add", "git", "status"]).trim().to_string();
        h.ok(&["add", "docker ps"]);

        let out = h.ok(&["list"]);
        assert_eq!(out.lines().count(), 2);
        assert_eq!(column(&out, 0, 3), "docker ps");
        assert_eq!(column(&out, 1, 0), first);
        assert_eq!(column(&out, 1, 2), "-");

        h.ok(&["delete", first.as_str()]);
        assert_eq!(h.ok(&["list"]).lines().count(), 1);
    }

    #[test]
    fn test_categories_flow() {
        let h = Harness::new();
        let git = h.ok(&["category", "create", "Git"]).trim().to_string();
        assert_eq!(h.ok(&["category", "create", "Git", "--color", "#fff"]).trim(), git);
        let cmd = h.ok(&["add", "-c", git.as_str(), "git log"]).trim().to_string();
        h.ok(&["add", "ls"]);

        let out = h.ok(&["category", "list"]);
        assert_eq!(
            out,
            format!("{}\tGit\t#78b4ff\t1\n-\t(uncategorized)\t-\t1\n", git)
        );

        let filtered = h.ok(&["list", "-c", git.as_str()]);
        assert_eq!(filtered.lines().count(), 1);
        assert_eq!(column(&filtered, 0, 0), cmd);

        h.ok(&["category", "update", git.as_str(), "VCS"]);
        assert!(h.ok(&["category", "list"]).contains("\tVCS\t#78b4ff\t1"));

        h.ok(&["assign", cmd.as_str()]);
        assert_eq!(h.ok(&["list", "-c", git.as_str()]), "");

        h.ok(&["category", "delete", git.as_str()]);
        assert_eq!(h.ok(&["category", "list"]), "-\t(uncategorized)\t-\t2\n");
    }

    #[test]
    fn test_merge() {
        let h = Harness::new();
        let old = h.ok(&["category", "create", "git-old"]).trim().to_string();
        let new = h.ok(&["category", "create", "Git"]).trim().to_string();
        h.ok(&["add", "-c", old.as_str(), "git fetch"]);

        h.ok(&["category", "merge", old.as_str(), new.as_str()]);

        let out = h.ok(&["category", "list"]);
        assert!(!out.contains("git-old"));
        assert!(out.contains(&format!("{}\tGit\t#78b4ff\t1", new)));
    }

    #[test]
    fn test_not_found_exit_code() {
        let h = Harness::new();
        let (result, _) = h.run(&["assign", "missing"]);
        assert_eq!(result.unwrap_err().exit_code(), 66);

        let (result, _) = h.run(&["category", "update", "missing", "x"]);
        assert_eq!(result.unwrap_err().exit_code(), 66);
    }

    #[test]
    fn test_paths() {
        let h = Harness::new();
        let out = h.ok(&["paths"]);
        assert_eq!(column(&out, 0, 1), h.tmp.path().display().to_string());
        assert_eq!(
            column(&out, 1, 1),
            h.tmp.path().join("commands.json").display().to_string()
        );
        assert!(!out.contains("fallback"));
    }
}
