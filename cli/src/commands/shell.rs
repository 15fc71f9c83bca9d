//! Interactive shell command
//!
//! Reads commands line by line and drives the navigator through the same
//! document events a browser would produce: link clicks, navigation requests,
//! back/forward and manual fragment edits. Commands that change stored data
//! render the current page again.

use crate::app::library::GameLibrary;
use crate::app::settings::{AppSettings, COUNTRIES, THEMES};
use crate::app::{view, App};
use crate::config::CliConfigLoader;
use anyhow::Result;
use colored::Colorize;
use pagenav_core::{ClickEvent, Element, NavigationOutcome, NavigationRequest};
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  go <page> [id]              request navigation to a page
  click <n|label>             click a navigation link
  link <target> [id]          click a link with the given target
  back                        go back in history
  forward                     go forward in history
  hash <fragment>             edit the URL fragment by hand
  show                        print the current page
  links                       list navigation links
  history                     list session history
  set <setting> <value>       change name, theme, country or currency
  edit <id> <field> <value>   change one field of a game
  delete <id>                 delete a game
  delete-all                  delete every game
  help                        show this help
  quit                        leave the shell";

const SET_USAGE: &str = "set <name|theme|country|currency> <value>";

/// A user preference the shell can change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Name,
    Theme,
    Country,
    Currency,
}

impl Setting {
    fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "name" | "first-name" => Some(Self::Name),
            "theme" => Some(Self::Theme),
            "country" => Some(Self::Country),
            "currency" => Some(Self::Currency),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Theme => "Theme",
            Self::Country => "Country",
            Self::Currency => "Currency",
        }
    }
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Go {
        page: String,
        record_id: Option<String>,
    },
    Click(String),
    Link {
        target: String,
        record_id: Option<String>,
    },
    Back,
    Forward,
    Hash(String),
    Show,
    Links,
    History,
    Set {
        setting: Setting,
        value: String,
    },
    Edit {
        id: String,
        field: String,
        value: String,
    },
    Delete(String),
    DeleteAll,
    Help,
    Quit,
}

/// Shell input errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("No navigation link matches '{0}'")]
    NoSuchLink(String),

    #[error("'{value}' is not a valid {setting}, expected one of: {expected}")]
    InvalidSetting {
        setting: &'static str,
        value: String,
        expected: String,
    },

    #[error("No game with id '{0}'")]
    NoSuchGame(String),
}

impl ShellCommand {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_lowercase().as_str(), args.as_slice()) {
            ("go", [page]) => Self::Go {
                page: page.to_string(),
                record_id: None,
            },
            ("go", [page, id]) => Self::Go {
                page: page.to_string(),
                record_id: Some(id.to_string()),
            },
            ("go", _) => return Err(ShellError::Usage("go <page> [id]")),
            ("click", [_, ..]) => Self::Click(args.join(" ")),
            ("click", []) => return Err(ShellError::Usage("click <n|label>")),
            ("link", [target]) => Self::Link {
                target: target.to_string(),
                record_id: None,
            },
            ("link", [target, id]) => Self::Link {
                target: target.to_string(),
                record_id: Some(id.to_string()),
            },
            ("link", _) => return Err(ShellError::Usage("link <target> [id]")),
            ("back", []) => Self::Back,
            ("forward", []) => Self::Forward,
            ("hash", [fragment]) => Self::Hash(fragment.to_string()),
            ("hash", []) => Self::Hash(String::new()),
            ("hash", _) => return Err(ShellError::Usage("hash <fragment>")),
            ("show", []) => Self::Show,
            ("links", []) => Self::Links,
            ("history", []) => Self::History,
            ("set", [name, rest @ ..]) if !rest.is_empty() => match Setting::parse(name) {
                Some(setting) => Self::Set {
                    setting,
                    value: rest.join(" "),
                },
                None => return Err(ShellError::Usage(SET_USAGE)),
            },
            ("set", _) => return Err(ShellError::Usage(SET_USAGE)),
            ("edit", [id, field, rest @ ..]) if !rest.is_empty() => Self::Edit {
                id: id.to_string(),
                field: field.to_string(),
                value: rest.join(" "),
            },
            ("edit", _) => return Err(ShellError::Usage("edit <id> <field> <value>")),
            ("delete", [id]) => Self::Delete(id.to_string()),
            ("delete", _) => return Err(ShellError::Usage("delete <id>")),
            ("delete-all", []) => Self::DeleteAll,
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit" | "q", _) => Self::Quit,
            _ => return Err(ShellError::UnknownCommand(line.trim().to_string())),
        };
        Ok(Some(command))
    }
}

/// What the shell prints, or whether it stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// Navigator driven by shell commands
pub struct Shell {
    app: App,
}

impl Shell {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Initialize the navigator and render the first page
    pub async fn start(&self) -> Result<String> {
        let outcome = self.app.navigator.initialize().await?;
        Ok(self.describe(&[outcome]))
    }

    /// Run one command
    pub async fn execute(&self, command: ShellCommand) -> Result<Reply> {
        debug!("Shell command: {:?}", command);
        let navigator = &self.app.navigator;
        let document = navigator.document();
        let config = navigator.config();

        match command {
            ShellCommand::Go { page, record_id } => {
                let mut request = NavigationRequest::new(page);
                request.record_id = record_id;
                document.request_navigation(request);
            }
            ShellCommand::Click(query) => {
                let link = self.find_link(&query)?;
                if !document.click(&ClickEvent::on(link)) {
                    return Ok(Reply::Output("Link left to the browser".dimmed().to_string()));
                }
            }
            ShellCommand::Link { target, record_id } => {
                let mut link = Element::new("a").with_attr(config.link_attribute.as_str(), target);
                if let Some(id) = record_id {
                    link = link.with_attr(config.record_id_attribute.as_str(), id);
                }
                if !document.click(&ClickEvent::on(link)) {
                    return Ok(Reply::Output("Link left to the browser".dimmed().to_string()));
                }
            }
            ShellCommand::Back => {
                if !document.back() {
                    return Ok(Reply::Output("Already at the oldest entry".dimmed().to_string()));
                }
            }
            ShellCommand::Forward => {
                if !document.forward() {
                    return Ok(Reply::Output("Already at the newest entry".dimmed().to_string()));
                }
            }
            ShellCommand::Hash(fragment) => {
                if !document.edit_location_fragment(&fragment) {
                    return Ok(Reply::Output(String::new()));
                }
            }
            ShellCommand::Show => return Ok(Reply::Output(view::render_page(navigator))),
            ShellCommand::Links => return Ok(Reply::Output(view::render_link_table(navigator))),
            ShellCommand::History => return Ok(Reply::Output(view::render_history(navigator))),
            ShellCommand::Set { setting, value } => {
                let notice = self.change_setting(setting, &value)?;
                return self.refreshed(notice).await;
            }
            ShellCommand::Edit { id, field, value } => {
                if !GameLibrary::new(self.app.store.clone()).edit(&id, &field, &value)? {
                    return Err(ShellError::NoSuchGame(id).into());
                }
                return self
                    .refreshed(format!("Game {} {} set to {}", id, field, value))
                    .await;
            }
            ShellCommand::Delete(id) => {
                if !GameLibrary::new(self.app.store.clone()).delete(&id)? {
                    return Err(ShellError::NoSuchGame(id).into());
                }
                return self.refreshed(format!("Game {} deleted", id)).await;
            }
            ShellCommand::DeleteAll => {
                let removed = GameLibrary::new(self.app.store.clone()).delete_all()?;
                return self.refreshed(format!("Deleted {} game(s)", removed)).await;
            }
            ShellCommand::Help => return Ok(Reply::Output(HELP.to_string())),
            ShellCommand::Quit => return Ok(Reply::Quit),
        }

        let outcomes = navigator.process_pending().await?;
        Ok(Reply::Output(self.describe(&outcomes)))
    }

    fn change_setting(&self, setting: Setting, value: &str) -> Result<String> {
        let settings = AppSettings::new(self.app.store.clone());
        let accepted = match setting {
            Setting::Name => {
                settings.set_first_name(value)?;
                true
            }
            Setting::Currency => {
                settings.set_currency(value)?;
                true
            }
            Setting::Theme => settings.set_theme(value)?,
            Setting::Country => settings.set_country_code(&value.to_uppercase())?,
        };

        if !accepted {
            let expected = match setting {
                Setting::Theme => THEMES.join(", "),
                _ => COUNTRIES
                    .iter()
                    .map(|country| country.code)
                    .collect::<Vec<_>>()
                    .join(", "),
            };
            return Err(ShellError::InvalidSetting {
                setting: setting.label(),
                value: value.to_string(),
                expected,
            }
            .into());
        }
        Ok(format!("{} set to {}", setting.label(), value))
    }

    /// Confirm a data change and show the current page rendered again
    async fn refreshed(&self, notice: String) -> Result<Reply> {
        let mut lines = vec![notice.green().to_string()];
        if let Some(outcome) = self.app.refresh().await? {
            lines.push(self.describe(&[outcome]));
        }
        Ok(Reply::Output(lines.join("\n")))
    }

    fn find_link(&self, query: &str) -> Result<Element, ShellError> {
        let elements = self.app.navigator.document().elements();
        let by_index = query
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| elements.get(index));

        by_index
            .or_else(|| {
                elements
                    .iter()
                    .find(|element| element.text.eq_ignore_ascii_case(query))
            })
            .cloned()
            .ok_or_else(|| ShellError::NoSuchLink(query.to_string()))
    }

    fn describe(&self, outcomes: &[NavigationOutcome]) -> String {
        let mut lines = Vec::new();
        let mut rendered = false;
        for outcome in outcomes {
            match outcome {
                NavigationOutcome::Rendered { .. } => rendered = true,
                NavigationOutcome::UnknownRoute(key) => {
                    lines.push(format!("No page registered for '{}'", key).yellow().to_string())
                }
                NavigationOutcome::Superseded => {}
            }
        }
        if rendered {
            lines.push(view::render_page(&self.app.navigator));
        }
        lines.join("\n")
    }
}

/// Start the interactive shell
pub async fn shell_command(config_loader: CliConfigLoader, fragment: Option<String>) -> Result<()> {
    let config = config_loader.load().await?;
    let app = App::build(&config, fragment.as_deref().unwrap_or_default())?;
    let shell = Shell::new(app);

    println!("{}", shell.start().await?);
    println!("{}", "Type 'help' for commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "pagenav>".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{} {}", "error:".red().bold(), e);
                continue;
            }
        };

        match shell.execute(command).await {
            Ok(Reply::Quit) => break,
            Ok(Reply::Output(output)) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Err(e) => println!("{} {:#}", "error:".red().bold(), e),
        }
    }

    Ok(())
}
