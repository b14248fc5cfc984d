//! Command dispatch

use std::path::{Path, PathBuf};

use clap::CommandFactory;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{parse_index, slugify, NavEvent, NavigationState, TopicIndex};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::SelectionItem;
use crate::infrastructure::InfraError;

pub async fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { search, all }) => {
            cmd_tree(&container(cli)?, search.as_deref(), *all).await
        }
        Some(Commands::Show { target }) => cmd_show(&container(cli)?, target.as_deref()).await,
        Some(Commands::Select) => cmd_select(&container(cli)?).await,
        Some(Commands::Parse { file, json }) => cmd_parse(file, *json),
        Some(Commands::Slug { titles }) => cmd_slug(titles),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("get current directory", e).into()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let settings = Settings::load(Some(&dir))?.with_base_url(cli.base_url.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

/// Build the display tree: open categories list their topics, closed ones
/// show only a topic count.
pub fn topic_tree(root: &str, index: &TopicIndex, nav: &NavigationState) -> Tree<String> {
    let mut tree = Tree::new(root.to_string());
    for category in index {
        if nav.is_expanded(&category.title) {
            let leaves = category
                .topics
                .iter()
                .map(|t| Tree::new(format!("{} ({})", t.title, t.file_name)));
            tree.push(Tree::new(category.title.clone()).with_leaves(leaves));
        } else {
            tree.push(Tree::new(format!(
                "{} [+{}]",
                category.title,
                category.topics.len()
            )));
        }
    }
    tree
}

#[instrument(skip(container))]
async fn cmd_tree(container: &ServiceContainer, search: Option<&str>, all: bool) -> CliResult<()> {
    let mut browser = container.browser();
    browser.mount().await;

    if browser.index().is_empty() {
        output::warning(&format!(
            "no topics available from {}",
            container.loader().index_url()
        ));
        return Ok(());
    }

    if let Some(term) = search {
        browser.handle(NavEvent::SearchChanged(term.to_string()));
    }
    // Search hits are hidden inside collapsed categories otherwise.
    if all || search.is_some() {
        browser.expand_all();
    }

    let visible = browser.visible_index();
    if visible.is_empty() {
        output::warning(&format!(
            "no topics match {:?}",
            browser.nav().search_term()
        ));
        return Ok(());
    }
    output::info(&topic_tree(
        &container.settings.base_url,
        &visible,
        browser.nav(),
    ));
    Ok(())
}

#[instrument(skip(container))]
async fn cmd_show(container: &ServiceContainer, target: Option<&str>) -> CliResult<()> {
    let mut browser = container.browser();
    if let Some(target) = target {
        browser.mount().await;
        let file_name = browser.resolve(target)?;
        browser.handle(NavEvent::TopicSelected(file_name));
    }
    debug!("showing {}", browser.nav().selected_file());
    let content = browser.selected_content().await?;
    output::document(&content);
    Ok(())
}

/// Outcome of one interactive topic pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicChoice {
    /// The index had no topics to offer
    NoTopics,
    /// The picker was closed without a choice; the fallback stays selected
    Cancelled,
    /// A topic was picked and its document fetched
    Shown { file_name: String, content: String },
}

/// Mount a browser, let the container's selector pick a topic, and fetch the
/// picked document.
#[instrument(skip(container))]
pub async fn select_topic(container: &ServiceContainer) -> CliResult<TopicChoice> {
    let mut browser = container.browser();
    browser.mount().await;

    let items: Vec<SelectionItem> = browser
        .index()
        .topics()
        .map(|(category, topic)| SelectionItem {
            display: format!("{} / {}", category.title, topic.title),
            value: topic.file_name.clone(),
        })
        .collect();
    if items.is_empty() {
        return Ok(TopicChoice::NoTopics);
    }

    let selected = container
        .selector
        .select_one(&items, "topic> ")
        .map_err(|message| InfraError::Selector { message })?;
    let Some(item) = selected else {
        debug!("selection cancelled, keeping {}", browser.nav().selected_file());
        return Ok(TopicChoice::Cancelled);
    };

    browser.handle(NavEvent::TopicSelected(item.value));
    let content = browser.selected_content().await?;
    Ok(TopicChoice::Shown {
        file_name: browser.nav().selected_file().to_string(),
        content,
    })
}

async fn cmd_select(container: &ServiceContainer) -> CliResult<()> {
    match select_topic(container).await? {
        TopicChoice::NoTopics => output::warning("no topics available"),
        TopicChoice::Cancelled => output::warning("no topic selected"),
        TopicChoice::Shown { content, .. } => output::document(&content),
    }
    Ok(())
}

#[instrument]
fn cmd_parse(file: &Path, json: bool) -> CliResult<()> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| InfraError::io(format!("read {}", file.display()), e))?;
    let index = parse_index(&text);

    if json {
        let rendered =
            serde_json::to_string_pretty(&index).map_err(|e| ApplicationError::Parse {
                message: e.to_string(),
            })?;
        output::info(&rendered);
        return Ok(());
    }

    let mut nav = NavigationState::new("");
    nav.expand_all(&index);
    output::info(&topic_tree(&file.display().to_string(), &index, &nav));
    Ok(())
}

fn cmd_slug(titles: &[String]) -> CliResult<()> {
    for title in titles {
        output::info(&slugify(title));
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".into())
                })?
            } else {
                local_config_path(&project_dir(cli)?)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "<unavailable>"),
            }
            output::action("local", &local_config_path(&project_dir(cli)?).display());
        }
    }
    Ok(())
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
