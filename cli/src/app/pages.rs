//! Pages of the game collection shell
//!
//! Each page's markup is a handlebars template. The navigator injects it
//! as-is and the page's setup renders it in place with data from the record
//! store.

use super::settings::{AppSettings, COUNTRIES, GAMES_KEY};
use super::stats::{format_money, price_of, LibraryStats};
use anyhow::{Context, Result};
use async_trait::async_trait;
use handlebars::Handlebars;
use pagenav_core::error::SetupError;
use pagenav_core::{
    NavigatorConfig, PageDefinition, PageRegistry, PageSetup, Record, RecordStore, SetupContext,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub const DASHBOARD_PAGE: &str = "dashboard-page";
pub const LIBRARY_PAGE: &str = "games-list-page";
pub const DETAILS_PAGE: &str = "game-details-page";
pub const SETTINGS_PAGE: &str = "settings-page";

/// External template of the settings page, relative to the template base path
pub const SETTINGS_TEMPLATE: &str = "settings.html";

const DASHBOARD_TEMPLATE: &str = r#"<section class="dashboard">
  <h2 id="greeting">Hello, {{first_name}}!</h2>
  <p class="lead">Welcome to your Game Collection App!</p>
  <ul class="stats">
    <li>Total Games: <span id="total-games">{{stats.total}}</span></li>
    <li>Games Completed: <span id="completed-games">{{stats.completed}}</span></li>
    <li>Currently Playing: <span id="playing-games">{{stats.playing}}</span></li>
    <li>Backlog: <span id="backlog-games">{{stats.backlog}}</span></li>
    <li>Total Spent: <span id="total-spent">{{total_spent}}</span></li>
    <li>Platforms: <span id="total-platforms">{{stats.platforms}}</span></li>
  </ul>
  <a {{link_attr}}="{{library_page}}">Open library</a>
</section>"#;

const LIBRARY_TEMPLATE: &str = r#"<section class="games-list">
  <h2>Game Library</h2>
  {{#if games}}
  <table>
    <thead><tr><th>Title</th><th>Platform</th><th>Year</th><th>Status</th><th>Price</th></tr></thead>
    <tbody>
    {{#each games}}
      <tr {{../link_attr}}="{{../details_page}}" {{../record_attr}}="{{id}}"><td>{{title}}</td><td>{{platform}}</td><td>{{year}}</td><td>{{status}}</td><td>{{price_display}}</td></tr>
    {{/each}}
    </tbody>
  </table>
  {{else}}
  <p class="empty">No games in your library yet</p>
  {{/if}}
</section>"#;

const DETAILS_TEMPLATE: &str = r#"<section class="game-details">
  <h2>Game Details</h2>
  {{#if game}}
  <dl>
    <dt>Title</dt><dd>{{game.title}}</dd>
    <dt>Platform</dt><dd>{{game.platform}}</dd>
    <dt>Year</dt><dd>{{game.year}}</dd>
    <dt>Region</dt><dd>{{game.region}}</dd>
    <dt>Condition</dt><dd>{{game.condition}}</dd>
    <dt>Status</dt><dd>{{game.status}}</dd>
    <dt>Price</dt><dd>{{game.price_display}}</dd>
    <dt>Purchased</dt><dd>{{game.purchaseDate}}</dd>
    <dt>Ownership</dt><dd>{{game.ownership}}</dd>
    <dt>Note</dt><dd>{{game.note}}</dd>
  </dl>
  {{else}}
  <p class="not-found">No game found with id '{{record_id}}'</p>
  {{/if}}
  <a {{link_attr}}="{{library_page}}">Back to library</a>
</section>"#;

/// Which page a setup renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellPage {
    Dashboard,
    Library,
    Details,
    Settings,
}

/// Setup procedure shared by the shell pages
pub struct PageRenderer {
    page: ShellPage,
    store: RecordStore,
    settings: AppSettings,
    link_attribute: String,
    record_id_attribute: String,
    handlebars: Arc<Handlebars<'static>>,
}

impl PageRenderer {
    /// A game with its price formatted for display
    fn with_price(currency: &str, mut game: Record) -> Value {
        let price = format_money(currency, price_of(&game));
        game.insert("price_display".to_string(), Value::String(price));
        Value::Object(game)
    }

    fn games(&self) -> Result<Vec<Value>> {
        let currency = self.settings.currency()?;
        let games = self
            .store
            .load(GAMES_KEY)
            .context("Failed to load game library")?;

        Ok(games
            .into_iter()
            .map(|game| Self::with_price(&currency, game))
            .collect())
    }

    /// Template data for the page
    fn data(&self, ctx: &SetupContext) -> Result<Value> {
        let mut data = match self.page {
            ShellPage::Dashboard => {
                let games = self.store.load(GAMES_KEY)?;
                let stats = LibraryStats::from_games(&games);
                json!({
                    "first_name": self.settings.first_name()?,
                    "total_spent": format_money(&self.settings.currency()?, stats.total_spent),
                    "stats": stats,
                })
            }
            ShellPage::Library => json!({ "games": self.games()? }),
            ShellPage::Details => {
                let game = match ctx.record_id() {
                    Some(id) => self.store.get(GAMES_KEY, id)?,
                    None => None,
                };
                let currency = self.settings.currency()?;
                json!({
                    "game": game.map(|game| Self::with_price(&currency, game)),
                    "record_id": ctx.record_id().unwrap_or_default(),
                })
            }
            ShellPage::Settings => json!({
                "first_name": self.settings.first_name()?,
                "currency": self.settings.currency()?,
                "theme": self.settings.theme()?,
                "country": self.settings.country()?,
                "countries": COUNTRIES,
            }),
        };

        if let Value::Object(map) = &mut data {
            map.insert("link_attr".to_string(), json!(self.link_attribute));
            map.insert("record_attr".to_string(), json!(self.record_id_attribute));
            map.insert("library_page".to_string(), json!(LIBRARY_PAGE));
            map.insert("details_page".to_string(), json!(DETAILS_PAGE));
        }
        Ok(data)
    }

    fn render(&self, ctx: &SetupContext) -> Result<()> {
        let data = self.data(ctx)?;
        let markup = self
            .handlebars
            .render_template(&ctx.host.contents(), &data)
            .with_context(|| format!("Failed to render page '{}'", ctx.page_key))?;

        debug!("Rendered '{}' ({} bytes)", ctx.page_key, markup.len());
        ctx.host.replace_contents(markup);
        Ok(())
    }
}

#[async_trait]
impl PageSetup for PageRenderer {
    async fn setup(&self, ctx: SetupContext) -> Result<(), SetupError> {
        self.render(&ctx).map_err(Into::into)
    }
}

/// Register the shell's pages
pub fn shell_pages(store: RecordStore, config: &NavigatorConfig) -> PageRegistry {
    let handlebars = Arc::new(Handlebars::new());
    let settings = AppSettings::new(store.clone());
    let renderer = |page: ShellPage| -> Arc<dyn PageSetup> {
        Arc::new(PageRenderer {
            page,
            store: store.clone(),
            settings: settings.clone(),
            link_attribute: config.link_attribute.clone(),
            record_id_attribute: config.record_id_attribute.clone(),
            handlebars: Arc::clone(&handlebars),
        })
    };

    PageRegistry::new()
        .add_page(
            DASHBOARD_PAGE,
            PageDefinition::inline("Dashboard", DASHBOARD_TEMPLATE)
                .with_setup(renderer(ShellPage::Dashboard)),
        )
        .add_page(
            LIBRARY_PAGE,
            PageDefinition::inline("Game Library", LIBRARY_TEMPLATE)
                .with_setup(renderer(ShellPage::Library)),
        )
        .add_page(
            DETAILS_PAGE,
            PageDefinition::inline("Game Details", DETAILS_TEMPLATE)
                .with_setup(renderer(ShellPage::Details)),
        )
        .add_page(
            SETTINGS_PAGE,
            PageDefinition::external("Settings", SETTINGS_TEMPLATE)
                .with_setup(renderer(ShellPage::Settings)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::chrome::chrome_document;
    use crate::config::loader::shell_navigator_config;
    use pagenav_core::{HistoryMode, MemoryTemplateLoader, NavigationParams, Navigator};

    const SETTINGS_MARKUP: &str =
        "<section>{{first_name}} {{currency}} {{country.label}}{{#each countries}} {{code}}{{/each}}</section>";

    fn record(value: Value) -> Record {
        match value {
            Value::Object(record) => record,
            other => panic!("not an object: {}", other),
        }
    }

    fn seeded_store() -> RecordStore {
        let store = RecordStore::in_memory();
        store
            .save(
                GAMES_KEY,
                &[
                    record(json!({
                        "id": 1, "title": "Pokemon Red", "platform": "GB",
                        "status": "Completed", "price": 12.5
                    })),
                    record(json!({
                        "id": 2, "title": "<Zelda>", "platform": "NS",
                        "status": "Playing", "price": "40"
                    })),
                ],
            )
            .unwrap();
        store
    }

    async fn navigator(store: RecordStore, location: &str) -> Navigator {
        let config = shell_navigator_config();
        let loader = MemoryTemplateLoader::new()
            .with_template(config.template_path(SETTINGS_TEMPLATE), SETTINGS_MARKUP);
        let navigator = Navigator::builder()
            .config(config.clone())
            .registry(shell_pages(store, &config))
            .document(chrome_document(&config, location))
            .loader(Arc::new(loader))
            .build()
            .unwrap();
        navigator.initialize().await.unwrap();
        navigator
    }

    fn content(navigator: &Navigator) -> String {
        navigator
            .document()
            .region_markup(&navigator.config().content_area)
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_dashboard_shows_stats() {
        let navigator = navigator(seeded_store(), "").await;
        let markup = content(&navigator);

        assert_eq!(navigator.document().title(), "Dashboard");
        assert!(markup.contains("Hello, You!"));
        assert!(markup.contains(r#"<span id="total-games">2</span>"#));
        assert!(markup.contains(r#"<span id="total-spent">£52.50</span>"#));
        assert!(markup.contains(r#"<span id="total-platforms">2</span>"#));
    }

    #[tokio::test]
    async fn test_library_rows_link_to_details() {
        let navigator = navigator(seeded_store(), "#games-list-page").await;
        let markup = content(&navigator);

        assert!(markup.contains(
            r#"<tr data-page-target="game-details-page" data-page-target-id="1">"#
        ));
        assert!(markup.contains("&lt;Zelda&gt;"));
        assert!(markup.contains("£40.00"));
    }

    #[tokio::test]
    async fn test_empty_library() {
        let navigator = navigator(RecordStore::in_memory(), "#games-list-page").await;
        assert!(content(&navigator).contains("No games in your library yet"));
    }

    #[tokio::test]
    async fn test_details_page_uses_record_id() {
        let navigator = navigator(seeded_store(), "").await;
        navigator
            .navigate_to(
                DETAILS_PAGE.into(),
                NavigationParams::with_record("1"),
                HistoryMode::Push,
            )
            .await
            .unwrap();

        let markup = content(&navigator);
        assert!(markup.contains("<dd>Pokemon Red</dd>"));
        assert!(markup.contains("<dd>£12.50</dd>"));
        assert_eq!(
            navigator.document().location_fragment(),
            "#game-details-page?id=1"
        );
    }

    #[tokio::test]
    async fn test_details_page_without_match() {
        let navigator = navigator(seeded_store(), "#game-details-page?id=99").await;
        let markup = content(&navigator);
        assert!(markup.contains("No game found with id"));
        assert!(markup.contains("99"));
        assert!(!markup.contains("<dl>"));
    }

    #[tokio::test]
    async fn test_settings_page_renders_external_template() {
        let store = RecordStore::in_memory();
        AppSettings::new(store.clone()).set_first_name("Ada").unwrap();

        let navigator = navigator(store, "#settings-page").await;
        assert_eq!(navigator.document().title(), "Settings");
        assert_eq!(
            content(&navigator),
            "<section>Ada £ United Kingdom UK US FR DE BR</section>"
        );
    }
}
