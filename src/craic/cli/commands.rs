use super::logging::{init_logging, LogConfig};
use super::print::{
    print_messages, render_config, render_documents, render_sets, render_view,
};
use super::setup::{
    get_grouped_help, print_grouped_help, print_help_for_command, Cli, Commands,
    DocumentCommands, MiscCommands, SetCommands,
};
use clap::{CommandFactory, FromArgMatches};
use craic::api::{CmdResult, ConfigAction, CraicApi};
use craic::error::{CraicError, Result};
use craic::ids::UuidIds;
use craic::init::initialize;
use craic::store::fs::FileStore;
use std::path::{Path, PathBuf};

struct AppContext {
    api: CraicApi<FileStore, UuidIds>,
}

pub fn run() -> Result<()> {
    // Top-level -h shows the grouped help; subcommands keep clap's own.
    let matches = Cli::command()
        .override_help(get_grouped_help())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    colored::control::set_override(console::colors_enabled());
    init_logging(
        &LogConfig::from_verbosity(cli.verbose).with_ansi(console::colors_enabled_stderr()),
    );

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.as_deref());
    }

    let mut ctx = init_context(&cli)?;
    ctx.api.restore_session()?;

    let outcome = dispatch(&mut ctx, cli.command);

    // Selection survives even when the command itself failed.
    ctx.api.save_session()?;
    outcome
}

fn dispatch(ctx: &mut AppContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Documents(cmd)) => match cmd {
            DocumentCommands::Upload { path, name, mime } => {
                handle_upload(ctx, &path, name, mime)
            }
            DocumentCommands::List => handle_list(ctx),
            DocumentCommands::Select { reference } => {
                print_result(ctx.api.select_document(Some(&reference))?)
            }
            DocumentCommands::Deselect => print_result(ctx.api.select_document(None)?),
            DocumentCommands::Remove { reference } => {
                print_result(ctx.api.remove_document(&reference)?)
            }
            DocumentCommands::View => handle_view(ctx),
        },
        Some(Commands::Sets(cmd)) => match cmd {
            SetCommands::Sets => handle_sets(ctx),
            SetCommands::AddSet { name } => {
                let name = if name.is_empty() {
                    None
                } else {
                    Some(name.join(" "))
                };
                print_result(ctx.api.add_annotation_set(name)?)
            }
            SetCommands::SelectSet { reference } => {
                print_result(ctx.api.select_annotation_set(Some(&reference))?)
            }
            SetCommands::DeselectSet => print_result(ctx.api.select_annotation_set(None)?),
            SetCommands::RemoveSet { reference } => {
                print_result(ctx.api.remove_annotation_set(reference.as_deref())?)
            }
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Doctor { prune } => print_result(ctx.api.doctor(prune)?),
            MiscCommands::Config { key, value } => handle_config(ctx, key, value),
            MiscCommands::Init => print_result(ctx.api.init()?),
            MiscCommands::Help { command } => handle_help(command.as_deref()),
        },
        None => handle_list(ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.global)?;
    Ok(AppContext { api: ctx.api })
}

fn print_result(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_upload(
    ctx: &mut AppContext,
    path: &str,
    name: Option<String>,
    mime: Option<String>,
) -> Result<()> {
    let result = if path == "-" {
        let name = name.ok_or_else(|| {
            CraicError::Api("--name is required when uploading from stdin".to_string())
        })?;
        ctx.api
            .upload_reader(std::io::stdin().lock(), &name, mime.as_deref())?
    } else {
        ctx.api
            .upload_file(Path::new(path), name.as_deref(), mime.as_deref())?
    };
    print_result(result)
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_documents()?;
    print!("{}", render_documents(&result.listed_documents));
    print_messages(&result.messages);
    Ok(())
}

fn handle_sets(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_sets()?;
    if let Some(doc) = ctx.api.current_document() {
        println!("Sets for {}:", doc.name);
    }
    print!("{}", render_sets(&result.listed_sets));
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.view()?;
    if let Some(view) = &result.view {
        print!("{}", render_view(view));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<&str>) -> Result<()> {
    match command {
        Some(cmd) => print_help_for_command(cmd),
        None => print_grouped_help(),
    }
    Ok(())
}
