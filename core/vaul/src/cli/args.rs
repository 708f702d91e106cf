use super::command::{CliCommand, DEFAULT_CATEGORY_COLOR};
use clap::builder::ArgAction;
use common::error::Error;
use std::ffi::OsString;

/// CLI から受け取った設定
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    pub home_dir: Option<String>,
    /// サブコマンド（None の場合は Help）
    pub command: Option<CliCommand>,
}

fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .disable_help_subcommand(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("home-dir")
                .short('d')
                .long("home-dir")
                .value_name("directory")
                .help("Store commands.json / categories.json in this directory")
                .num_args(1),
        )
}

fn category_filter_arg() -> clap::Arg {
    clap::Arg::new("category")
        .short('c')
        .long("category")
        .value_name("id")
        .num_args(1)
}

fn build_category_subcommand() -> clap::Command {
    clap::Command::new("category")
        .about("Create / list / update / delete / merge categories")
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("create")
                .about("Create a category (returns the existing one if the name is taken)")
                .arg(clap::Arg::new("name").required(true))
                .arg(
                    clap::Arg::new("color")
                        .long("color")
                        .value_name("color")
                        .num_args(1),
                ),
        )
        .subcommand(clap::Command::new("list").about("List categories with command counts"))
        .subcommand(
            clap::Command::new("update")
                .about("Rename / recolor a category")
                .arg(clap::Arg::new("id").required(true))
                .arg(clap::Arg::new("name").required(true))
                .arg(
                    clap::Arg::new("color")
                        .long("color")
                        .value_name("color")
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete a category; its commands become uncategorized or move to --reassign")
                .arg(clap::Arg::new("id").required(true))
                .arg(
                    clap::Arg::new("reassign")
                        .long("reassign")
                        .value_name("id")
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("merge")
                .about("Move all commands of <source> to <target> and delete <source>")
                .arg(clap::Arg::new("source").required(true))
                .arg(clap::Arg::new("target").required(true)),
        )
}

fn build_clap_command() -> clap::Command {
    global_args(
        clap::Command::new("vaul")
            .about("Terminal command vault")
            .subcommand_required(false)
            .subcommand(clap::Command::new("help").about("Display this help message"))
            .subcommand(
                clap::Command::new("add")
                    .about("Add a command (newest first)")
                    .arg(category_filter_arg())
                    .arg(
                        clap::Arg::new("content")
                            .required(true)
                            .num_args(1..)
                            .trailing_var_arg(true)
                            .allow_hyphen_values(true),
                    ),
            )
            .subcommand(
                clap::Command::new("list")
                    .about("List commands (newest first)")
                    .arg(category_filter_arg()),
            )
            .subcommand(
                clap::Command::new("delete")
                    .about("Delete a command by id")
                    .arg(clap::Arg::new("id").required(true)),
            )
            .subcommand(build_category_subcommand())
            .subcommand(
                clap::Command::new("assign")
                    .about("Set a command's category (omit category to uncategorize)")
                    .arg(clap::Arg::new("command-id").required(true))
                    .arg(clap::Arg::new("category-id")),
            )
            .subcommand(clap::Command::new("paths").about("Print resolved storage paths")),
    )
}

fn string_arg(m: &clap::ArgMatches, id: &str) -> String {
    m.get_one::<String>(id).cloned().unwrap_or_default()
}

fn category_to_command(m: &clap::ArgMatches) -> Option<CliCommand> {
    let command = match m.subcommand()? {
        ("create", m) => CliCommand::CategoryCreate {
            name: string_arg(m, "name"),
            color: m
                .get_one::<String>("color")
                .cloned()
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
        },
        ("list", _) => CliCommand::CategoryList,
        ("update", m) => CliCommand::CategoryUpdate {
            id: string_arg(m, "id"),
            name: string_arg(m, "name"),
            color: m.get_one::<String>("color").cloned(),
        },
        ("delete", m) => CliCommand::CategoryDelete {
            id: string_arg(m, "id"),
            reassign_to: string_arg(m, "reassign"),
        },
        ("merge", m) => CliCommand::CategoryMerge {
            source: string_arg(m, "source"),
            target: string_arg(m, "target"),
        },
        _ => return None,
    };
    Some(command)
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help");
    let home_dir = matches.get_one::<String>("home-dir").cloned();

    let command = match matches.subcommand() {
        None | Some(("help", _)) => None,
        Some(("add", m)) => Some(CliCommand::Add {
            content: m
                .get_many::<String>("content")
                .map(|parts| parts.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default(),
            category: m.get_one::<String>("category").cloned(),
        }),
        Some(("list", m)) => Some(CliCommand::List {
            category: m.get_one::<String>("category").cloned(),
        }),
        Some(("delete", m)) => Some(CliCommand::Delete {
            id: string_arg(m, "id"),
        }),
        Some(("category", m)) => category_to_command(m),
        Some(("assign", m)) => Some(CliCommand::Assign {
            command_id: string_arg(m, "command-id"),
            category_id: string_arg(m, "category-id"),
        }),
        Some(("paths", _)) => Some(CliCommand::Paths),
        Some(_) => None,
    };

    Config {
        help,
        home_dir,
        command,
    }
}

/// 引数列を解析する（先頭はプログラム名）
pub fn parse_from<I, T>(args: I) -> Result<Config, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// プロセスのコマンドラインを解析する
pub fn parse_args() -> Result<Config, Error> {
    parse_from(std::env::args_os())
}

/// Config を実行する CliCommand に変換する
pub fn config_to_command(config: &Config) -> CliCommand {
    if config.help {
        return CliCommand::Help;
    }
    config.command.clone().unwrap_or(CliCommand::Help)
}
