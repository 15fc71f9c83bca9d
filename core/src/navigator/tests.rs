use super::*;
use crate::document::{ClickEvent, Element};
use crate::error::{Error, SetupError, TemplateError};
use crate::events::NavigationRequest;
use crate::template::MemoryTemplateLoader;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Notify;

const CONTENT: &str = "#page-content";
const LINK: &str = "data-page-target";
const GROUP: &str = "data-active-group";
const RECORD: &str = "data-page-target-id";

fn chrome(location: &str) -> Document {
    Document::new(location)
        .with_region(CONTENT)
        .with_element(Element::new("a").with_text("Home").with_attr(LINK, "home"))
        .with_element(
            Element::new("a")
                .with_text("Games")
                .with_attr(LINK, "games")
                .with_attr(GROUP, "library"),
        )
        .with_element(
            Element::new("a")
                .with_text("Game")
                .with_attr(LINK, "game")
                .with_attr(GROUP, "library"),
        )
}

fn registry() -> PageRegistry {
    PageRegistry::new()
        .add_page("home", PageDefinition::inline("Home", "<p>Home</p>"))
        .add_page("games", PageDefinition::inline("Games", "<table></table>"))
        .add_page(
            "game",
            PageDefinition::inline("Game", "<section>{{id}}</section>").with_setup_fn(
                |ctx: SetupContext| async move {
                    let id = ctx.record_id().unwrap_or("none").to_string();
                    let markup = ctx.host.contents().replace("{{id}}", &id);
                    ctx.host.replace_contents(markup);
                    Ok::<(), SetupError>(())
                },
            ),
        )
        .add_page("settings", PageDefinition::external("Settings", "settings.html"))
        .add_page("broken", PageDefinition::external("Broken", "missing.html"))
        .add_page(
            "failing",
            PageDefinition::inline("Failing", "<p>half wired</p>")
                .with_setup_fn(|_ctx: SetupContext| async {
                    Err::<(), SetupError>("store offline".into())
                }),
        )
}

fn loader() -> Arc<dyn TemplateLoader> {
    Arc::new(MemoryTemplateLoader::new().with_template("assets/html/settings.html", "<form></form>"))
}

fn navigator_at(location: &str) -> Navigator {
    Navigator::builder()
        .registry(registry())
        .landing_page("home")
        .document(chrome(location))
        .loader(loader())
        .build()
        .expect("Failed to build navigator")
}

fn content(navigator: &Navigator) -> String {
    navigator
        .document()
        .region_markup(CONTENT)
        .unwrap_or_default()
}

fn active_links(navigator: &Navigator) -> Vec<String> {
    navigator
        .document()
        .elements_with_class(ACTIVE_CLASS)
        .iter()
        .filter_map(|element| element.attr(LINK).map(str::to_string))
        .collect()
}

fn rendered(key: &str) -> NavigationOutcome {
    NavigationOutcome::Rendered {
        page_key: key.into(),
        degraded: false,
    }
}

#[tokio::test]
async fn test_concrete_scenario() {
    let navigator = Navigator::builder()
        .page("home", PageDefinition::inline("Home", "<p>Home</p>"))
        .page("games", PageDefinition::inline("Games", "<table></table>"))
        .landing_page("home")
        .build()
        .expect("Failed to build navigator");
    let document = navigator.document().clone();

    navigator.initialize().await.unwrap();
    assert_eq!(document.title(), "Home");
    assert_eq!(document.history_len(), 1);
    let state = HistoryState::from_value(&document.history_state().unwrap()).unwrap();
    assert_eq!(state.page_key, PageKey::from("home"));

    document.request_navigation(NavigationRequest::new("games").with_record("42"));
    navigator.process_pending().await.unwrap();
    assert_eq!(document.location_fragment(), "#games?id=42");
    assert_eq!(document.title(), "Games");
    assert_eq!(document.history_len(), 2);

    assert!(document.back());
    navigator.process_pending().await.unwrap();
    assert_eq!(document.title(), "Home");
    assert_eq!(document.location_fragment(), "#home");
    assert_eq!(document.history_len(), 2);
    assert_eq!(content(&navigator), "<p>Home</p>");
}

#[tokio::test]
async fn test_initialize_twice_is_an_error() {
    let navigator = navigator_at("");
    assert_eq!(navigator.lifecycle(), Lifecycle::Idle);

    navigator.initialize().await.unwrap();
    assert_eq!(navigator.lifecycle(), Lifecycle::Ready);

    let err = navigator.initialize().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Navigator(NavigatorError::AlreadyInitialized)
    ));
}

#[tokio::test]
async fn test_resume_matches_manual_replace() {
    let resumed = navigator_at("#game?id=042");
    resumed.initialize().await.unwrap();

    let manual = navigator_at("");
    manual.initialize().await.unwrap();
    manual
        .navigate_to(
            "game".into(),
            NavigationParams::with_record("042"),
            HistoryMode::from_record(false),
        )
        .await
        .unwrap();

    assert_eq!(resumed.current(), manual.current());
    assert_eq!(resumed.document().title(), manual.document().title());
    assert_eq!(active_links(&resumed), active_links(&manual));
    assert_eq!(content(&resumed), "<section>042</section>");
    assert_eq!(content(&resumed), content(&manual));
    assert_eq!(resumed.document().history_len(), 1);
    assert_eq!(manual.document().history_len(), 1);
}

#[tokio::test]
async fn test_title_and_links_follow_current_page() {
    let navigator = navigator_at("");
    navigator.initialize().await.unwrap();
    assert_eq!(active_links(&navigator), vec!["home"]);

    for (key, title, active) in [
        ("games", "Games", vec!["games", "game"]),
        ("game", "Game", vec!["games", "game"]),
        ("home", "Home", vec!["home"]),
    ] {
        navigator
            .navigate_to(key.into(), NavigationParams::none(), HistoryMode::Push)
            .await
            .unwrap();
        assert_eq!(navigator.document().title(), title);
        assert_eq!(active_links(&navigator), active);
        assert_eq!(navigator.current_page_key(), Some(PageKey::from(key)));
        assert_eq!(navigator.document().location_fragment(), format!("#{}", key));
    }
}

#[tokio::test]
async fn test_unknown_route_changes_nothing() {
    let navigator = navigator_at("");
    navigator.initialize().await.unwrap();
    let document = navigator.document();

    let before = (
        navigator.current(),
        content(&navigator),
        document.title(),
        document.history_len(),
        document.location_fragment(),
    );

    let outcome = navigator
        .navigate_to("nope".into(), NavigationParams::none(), HistoryMode::Push)
        .await
        .unwrap();
    assert_eq!(outcome, NavigationOutcome::UnknownRoute("nope".into()));

    let after = (
        navigator.current(),
        content(&navigator),
        document.title(),
        document.history_len(),
        document.location_fragment(),
    );
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_unknown_fragment_on_initialize_leaves_no_page() {
    let navigator = navigator_at("#nope");
    let outcome = navigator.initialize().await.unwrap();

    assert_eq!(outcome, NavigationOutcome::UnknownRoute("nope".into()));
    assert_eq!(navigator.lifecycle(), Lifecycle::Ready);
    assert!(navigator.current().is_none());
    assert_eq!(navigator.document().title(), "");
}

#[tokio::test]
async fn test_fragment_without_key_uses_landing_page() {
    let navigator = navigator_at("#?id=3");
    navigator.initialize().await.unwrap();

    let current = navigator.current().unwrap();
    assert_eq!(current.page_key, PageKey::from("home"));
    assert_eq!(current.params.record_id(), Some("3"));
    assert_eq!(navigator.document().location_fragment(), "#home?id=3");
}

#[tokio::test]
async fn test_external_template_is_loaded_with_base_path() {
    let navigator = navigator_at("#settings");
    let outcome = navigator.initialize().await.unwrap();

    assert_eq!(outcome, rendered("settings"));
    assert_eq!(content(&navigator), "<form></form>");
}

#[tokio::test]
async fn test_fetch_failure_renders_inline_error() {
    let navigator = navigator_at("");
    navigator.initialize().await.unwrap();

    let outcome = navigator
        .navigate_to("broken".into(), NavigationParams::none(), HistoryMode::Push)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::Rendered {
            page_key: "broken".into(),
            degraded: true,
        }
    );
    let markup = content(&navigator);
    assert!(markup.contains("page-error"));
    assert!(markup.contains("assets/html/missing.html"));
    assert_eq!(navigator.document().title(), "Broken");
    assert_eq!(navigator.document().location_fragment(), "#broken");
    assert_eq!(navigator.current_page_key(), Some(PageKey::from("broken")));
    assert_eq!(navigator.document().history_len(), 2);
}

#[tokio::test]
async fn test_setup_failure_propagates_after_render() {
    let navigator = navigator_at("");
    navigator.initialize().await.unwrap();

    let err = navigator
        .navigate_to("failing".into(), NavigationParams::none(), HistoryMode::Push)
        .await
        .unwrap_err();

    match err {
        Error::Navigator(NavigatorError::Setup { page, source }) => {
            assert_eq!(page, "failing");
            assert_eq!(source.to_string(), "store offline");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    assert_eq!(content(&navigator), "<p>half wired</p>");
    assert_eq!(navigator.document().title(), "Home");
    assert_eq!(navigator.document().history_len(), 1);
    assert_eq!(navigator.current_page_key(), Some(PageKey::from("home")));
}

#[tokio::test]
async fn test_process_pending_stops_at_setup_failure() {
    let navigator = navigator_at("");
    navigator.initialize().await.unwrap();
    let document = navigator.document();

    document.request_navigation(NavigationRequest::new("failing"));
    document.request_navigation(NavigationRequest::new("games"));

    assert!(navigator.process_pending().await.is_err());
    assert_eq!(navigator.current_page_key(), Some(PageKey::from("home")));

    let outcomes = navigator.process_pending().await.unwrap();
    assert_eq!(outcomes, vec![rendered("games")]);
}

#[tokio::test]
async fn test_popstate_without_state_reads_the_url() {
    let navigator = navigator_at("");
    navigator.initialize().await.unwrap();
    let document = navigator.document();

    assert!(document.edit_location_fragment("#game?id=9"));
    let outcomes = navigator.process_pending().await.unwrap();

    assert_eq!(outcomes, vec![rendered("game")]);
    assert_eq!(content(&navigator), "<section>9</section>");
    assert_eq!(document.history_len(), 2);

    let state = HistoryState::from_value(&document.history_state().unwrap()).unwrap();
    assert_eq!(state.page_key, PageKey::from("game"));
    assert_eq!(state.params.record_id(), Some("9"));
}

#[tokio::test]
async fn test_back_and_forward_replay_stored_state() {
    let navigator = navigator_at("");
    navigator.initialize().await.unwrap();
    let document = navigator.document();

    document.request_navigation(NavigationRequest::new("games"));
    document.request_navigation(NavigationRequest::new("game").with_record("5"));
    navigator.process_pending().await.unwrap();
    assert_eq!(document.history_len(), 3);

    assert!(document.back());
    assert!(document.back());
    assert!(!document.back());
    navigator.process_pending().await.unwrap();
    assert_eq!(document.title(), "Home");

    assert!(document.go(2));
    navigator.process_pending().await.unwrap();
    assert_eq!(document.title(), "Game");
    assert_eq!(content(&navigator), "<section>5</section>");
    assert_eq!(document.location_fragment(), "#game?id=5");
    assert_eq!(document.history_len(), 3);
}

#[tokio::test]
async fn test_clicks_route_through_the_bus() {
    let navigator = navigator_at("");
    let document = navigator.document().clone();

    let early = ClickEvent::on(Element::new("a").with_attr(LINK, "games"));
    assert!(!document.click(&early));

    navigator.initialize().await.unwrap();

    let row_click = ClickEvent {
        path: vec![
            Element::new("td").with_text("Zelda"),
            Element::new("tr")
                .with_attr(LINK, "game")
                .with_attr(RECORD, "12"),
        ],
    };
    assert!(document.click(&row_click));
    assert_eq!(document.title(), "Home");

    navigator.process_pending().await.unwrap();
    assert_eq!(document.title(), "Game");
    assert_eq!(document.location_fragment(), "#game?id=12");

    let external = ClickEvent::on(Element::new("a").with_attr(LINK, "https://example.com"));
    assert!(!document.click(&external));
    assert!(navigator.process_pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_events_before_initialize_are_not_seen() {
    let navigator = navigator_at("");
    let document = navigator.document();

    assert!(matches!(
        navigator.process_pending().await,
        Err(Error::Navigator(NavigatorError::NotInitialized))
    ));

    document.request_navigation(NavigationRequest::new("games"));
    navigator.initialize().await.unwrap();

    assert!(navigator.process_pending().await.unwrap().is_empty());
    assert_eq!(document.title(), "Home");
}

struct GatedLoader {
    gate: Arc<Notify>,
}

#[async_trait]
impl TemplateLoader for GatedLoader {
    async fn load(&self, _path: &str) -> std::result::Result<String, TemplateError> {
        self.gate.notified().await;
        Ok("<form>late</form>".to_string())
    }
}

#[tokio::test]
async fn test_latest_navigation_wins() {
    let gate = Arc::new(Notify::new());
    let navigator = Navigator::builder()
        .registry(registry())
        .document(chrome(""))
        .loader(Arc::new(GatedLoader { gate: gate.clone() }))
        .build()
        .unwrap();
    navigator.initialize().await.unwrap();

    let slow = navigator.navigate_to("settings".into(), NavigationParams::none(), HistoryMode::Push);
    let fast = async {
        let outcome = navigator
            .navigate_to("games".into(), NavigationParams::none(), HistoryMode::Push)
            .await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow.unwrap(), NavigationOutcome::Superseded);
    assert_eq!(fast.unwrap(), rendered("games"));
    assert_eq!(content(&navigator), "<table></table>");
    assert_eq!(navigator.document().title(), "Games");
    assert_eq!(navigator.document().history_len(), 2);
    assert_eq!(navigator.current_page_key(), Some(PageKey::from("games")));
}

#[tokio::test]
async fn test_spawned_loop_handles_requests() {
    let navigator = Arc::new(navigator_at(""));
    navigator.initialize().await.unwrap();
    let handle = navigator.spawn();

    let document = navigator.document().clone();
    tokio::task::yield_now().await;
    document.request_navigation(NavigationRequest::new("games"));

    tokio::time::timeout(Duration::from_secs(2), async {
        while document.title() != "Games" {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("navigation was not handled");

    handle.abort();
}

#[tokio::test]
async fn test_burst_of_requests_is_fully_handled() {
    let navigator = navigator_at("");
    navigator.initialize().await.unwrap();

    let document = navigator.document();
    for n in 0..100 {
        let request = if n % 2 == 0 {
            NavigationRequest::new("games")
        } else {
            NavigationRequest::new("game").with_record(n.to_string())
        };
        assert_eq!(document.request_navigation(request), 1);
    }

    let outcomes = navigator.process_pending().await.unwrap();
    assert_eq!(outcomes.len(), 100);
    assert!(outcomes
        .iter()
        .all(|outcome| matches!(outcome, NavigationOutcome::Rendered { .. })));
    assert_eq!(document.history_len(), 101);
    assert_eq!(document.location_fragment(), "#game?id=99");
    assert_eq!(content(&navigator), "<section>99</section>");
    assert!(navigator.process_pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_running_loop_owns_the_queue() {
    let navigator = Arc::new(navigator_at(""));
    navigator.initialize().await.unwrap();
    let handle = navigator.spawn();

    let document = navigator.document().clone();
    document.request_navigation(NavigationRequest::new("games"));
    tokio::time::timeout(Duration::from_secs(2), async {
        while document.title() != "Games" {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("navigation was not handled");

    assert!(matches!(
        navigator.process_pending().await,
        Err(Error::Navigator(NavigatorError::EventLoopBusy))
    ));
    assert!(matches!(
        navigator.run().await,
        Err(Error::Navigator(NavigatorError::EventLoopBusy))
    ));

    handle.abort();
}

#[test]
fn test_construction_is_validated() {
    let empty = Navigator::builder().build();
    assert!(matches!(empty, Err(Error::Navigator(NavigatorError::NoPages))));

    let missing_landing = Navigator::builder()
        .page("games", PageDefinition::inline("Games", ""))
        .landing_page("home")
        .build();
    assert!(matches!(
        missing_landing,
        Err(Error::Navigator(NavigatorError::LandingPageMissing(key))) if key == "home"
    ));

    let missing_area = Navigator::builder()
        .page("home", PageDefinition::inline("Home", ""))
        .document(Document::default().with_region("#elsewhere"))
        .build();
    assert!(matches!(
        missing_area,
        Err(Error::Navigator(NavigatorError::ContentAreaMissing(_)))
    ));
}

#[test]
fn test_load_error_fragment_escapes_message() {
    let fragment = load_error_fragment("Failed to load <b>x</b> & more");
    assert!(fragment.starts_with(r#"<p class="page-error""#));
    assert!(fragment.contains("&lt;b&gt;x&lt;/b&gt; &amp; more"));
}
