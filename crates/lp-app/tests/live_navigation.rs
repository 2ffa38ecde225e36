//! End-to-end behaviour of the projection runtime with plan navigation.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use mockall::mock;

use lp_app::{App, AppDeps, ProjectionEvent, WindowRole};
use lp_core::bible::BibleVerse;
use lp_core::ports::{BibleTextPort, ClockPort, LibraryPort, SurfaceWindowPort};
use lp_core::{
    MirrorMode, Plan, PlanId, PlanItem, PlanItemId, PlanItemKind, ProjectionContent,
    ProjectionMode, ProjectionState, RefusalReason, Song, SongBlock, SongId, SurfaceKey,
};

mock! {
    pub Library {}

    #[async_trait]
    impl LibraryPort for Library {
        async fn get_plan(&self, plan_id: &PlanId) -> Result<Option<Plan>>;
        async fn get_song(&self, song_id: &SongId) -> Result<Option<Song>>;
    }
}

struct TickClock(AtomicI64);

impl ClockPort for TickClock {
    fn now_ms(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

#[derive(Default)]
struct RecordingWindows {
    open: Mutex<Vec<SurfaceKey>>,
    open_calls: Mutex<Vec<SurfaceKey>>,
}

#[async_trait]
impl SurfaceWindowPort for RecordingWindows {
    async fn open_surface(&self, surface: SurfaceKey) -> Result<()> {
        self.open_calls.lock().unwrap().push(surface);
        self.open.lock().unwrap().push(surface);
        Ok(())
    }

    async fn close_surface(&self, surface: SurfaceKey) -> Result<()> {
        self.open.lock().unwrap().retain(|s| *s != surface);
        Ok(())
    }

    fn is_surface_open(&self, surface: SurfaceKey) -> bool {
        self.open.lock().unwrap().contains(&surface)
    }
}

struct NoBible;

#[async_trait]
impl BibleTextPort for NoBible {
    async fn lookup(&self, _reference: &str) -> Result<Option<Vec<BibleVerse>>> {
        Ok(None)
    }
}

fn item(id: &str, order: i64, kind: &str) -> PlanItem {
    PlanItem {
        id: PlanItemId::from(id),
        order,
        kind: PlanItemKind::from(kind),
        title: None,
        content: None,
        ref_id: None,
        ref_sub_id: None,
        media_path: None,
    }
}

fn sunday_plan() -> Plan {
    Plan {
        id: PlanId::from("sunday"),
        title: "Sunday Service".into(),
        items: vec![
            PlanItem {
                title: Some("Welcome".into()),
                content: Some("Good morning".into()),
                ..item("welcome", 1, "ANNOUNCEMENT_TEXT")
            },
            PlanItem {
                ref_id: Some("grace".into()),
                ref_sub_id: Some("v1".into()),
                ..item("grace-v1", 2, "SONG_BLOCK")
            },
            PlanItem {
                title: Some("Bulletin".into()),
                media_path: Some("/media/bulletin.pdf".into()),
                ..item("bulletin", 3, "ANNOUNCEMENT_PDF")
            },
        ],
    }
}

fn grace() -> Song {
    Song {
        id: SongId::from("grace"),
        title: "Amazing Grace".into(),
        blocks: vec![SongBlock {
            id: "v1".into(),
            order: 1,
            title: "Verse 1".into(),
            content: "Amazing grace, how sweet the sound".into(),
        }],
    }
}

fn library_with(plan: Option<Plan>) -> MockLibrary {
    let mut library = MockLibrary::new();
    library
        .expect_get_plan()
        .returning(move |_| Ok(plan.clone()));
    library
        .expect_get_song()
        .returning(|song_id| Ok((song_id.as_str() == "grace").then(grace)));
    library
}

fn app_with(library: MockLibrary) -> (App, Arc<RecordingWindows>) {
    let windows = Arc::new(RecordingWindows::default());
    let app = App::new(
        AppDeps {
            library: Arc::new(library),
            bible: Arc::new(NoBible),
            windows: windows.clone(),
            clock: Arc::new(TickClock(AtomicI64::new(10_000))),
        },
        ProjectionState::default(),
    );
    (app, windows)
}

fn body_of(state: &ProjectionState) -> Option<&str> {
    match &state.current {
        ProjectionContent::Text { body, .. } => Some(body.as_str()),
        _ => None,
    }
}

#[tokio::test]
async fn go_live_projects_first_item_on_main_surface() {
    let (app, windows) = app_with(library_with(Some(sunday_plan())));

    let outcome = app
        .navigation
        .go_live(PlanId::from("sunday"), None)
        .await
        .unwrap();

    assert!(outcome.live.enabled);
    assert_eq!(outcome.live.cursor, 0);
    assert!(outcome.projection.unwrap().ok);
    let a = app.runtime.get_state(SurfaceKey::A);
    assert_eq!(body_of(&a), Some("Good morning"));
    assert_eq!(*windows.open_calls.lock().unwrap(), vec![SurfaceKey::A]);
}

#[tokio::test]
async fn next_walks_the_plan_and_resolves_song_blocks() {
    let (app, _) = app_with(library_with(Some(sunday_plan())));
    app.navigation
        .go_live(PlanId::from("sunday"), None)
        .await
        .unwrap();

    let outcome = app.navigation.next().await.unwrap();

    assert_eq!(outcome.live.cursor, 1);
    match app.runtime.get_state(SurfaceKey::A).current {
        ProjectionContent::Text {
            title, meta_song, ..
        } => {
            assert_eq!(title.as_deref(), Some("Amazing Grace — Verse 1"));
            assert_eq!(meta_song.unwrap().song_id, SongId::from("grace"));
        }
        other => panic!("expected song text, got {other:?}"),
    }
}

#[tokio::test]
async fn cursor_never_passes_the_last_item() {
    let (app, _) = app_with(library_with(Some(sunday_plan())));
    app.navigation
        .go_live(PlanId::from("sunday"), Some(2))
        .await
        .unwrap();

    let outcome = app.navigation.next().await.unwrap();

    assert_eq!(outcome.live.cursor, 2);
    assert_eq!(app.runtime.get_live().cursor, 2);
    assert!(matches!(
        app.runtime.get_state(SurfaceKey::A).current,
        ProjectionContent::Media { .. }
    ));
}

#[tokio::test]
async fn prev_at_start_stays_at_zero() {
    let (app, _) = app_with(library_with(Some(sunday_plan())));
    app.navigation
        .go_live(PlanId::from("sunday"), None)
        .await
        .unwrap();

    let outcome = app.navigation.prev().await.unwrap();

    assert_eq!(outcome.live.cursor, 0);
}

#[tokio::test]
async fn locked_live_target_is_left_alone() {
    let (app, _) = app_with(library_with(Some(sunday_plan())));
    app.runtime.set_locked(SurfaceKey::A, true);
    let before = app.runtime.get_state(SurfaceKey::A);

    let outcome = app
        .navigation
        .go_live(PlanId::from("sunday"), None)
        .await
        .unwrap();

    assert!(outcome
        .projection
        .unwrap()
        .is_refused_with(RefusalReason::Locked));
    assert_eq!(app.runtime.get_state(SurfaceKey::A), before);
}

#[tokio::test]
async fn live_on_mirrored_target_lands_on_source_and_mirror_follows() {
    let (app, _) = app_with(library_with(Some(sunday_plan())));
    app.runtime
        .set_mirror(SurfaceKey::B, MirrorMode::Mirror { from: SurfaceKey::A })
        .unwrap();
    app.runtime.set_target(SurfaceKey::B);
    let mut display_b = app.runtime.subscribe(WindowRole::Display(SurfaceKey::B));

    let outcome = app
        .navigation
        .go_live(PlanId::from("sunday"), None)
        .await
        .unwrap();

    assert_eq!(outcome.projection.unwrap().surface, Some(SurfaceKey::A));
    let a = app.runtime.get_state(SurfaceKey::A);
    let b = app.runtime.get_state(SurfaceKey::B);
    assert!(b.same_display(&a));
    assert!(b.updated_at >= a.updated_at);
    assert!(display_b.drain().iter().any(|event| matches!(
        event,
        ProjectionEvent::SurfaceStateChanged { surface: SurfaceKey::B, state }
            if body_of(state) == Some("Good morning")
    )));
}

#[tokio::test]
async fn missing_plan_skips_projection() {
    let (app, _) = app_with(library_with(None));
    let before = app.runtime.get_state(SurfaceKey::A);

    let outcome = app
        .navigation
        .go_live(PlanId::from("deleted"), None)
        .await
        .unwrap();

    assert!(outcome.live.enabled);
    assert!(outcome.projection.is_none());
    assert_eq!(app.runtime.get_state(SurfaceKey::A), before);
}

#[tokio::test]
async fn empty_plan_skips_projection() {
    let empty = Plan {
        items: Vec::new(),
        ..sunday_plan()
    };
    let (app, _) = app_with(library_with(Some(empty)));

    let outcome = app
        .navigation
        .go_live(PlanId::from("sunday"), None)
        .await
        .unwrap();

    assert!(outcome.projection.is_none());
}

#[tokio::test]
async fn library_failure_is_an_error() {
    let mut library = MockLibrary::new();
    library
        .expect_get_plan()
        .returning(|_| Err(anyhow::anyhow!("library offline")));
    let (app, _) = app_with(library);

    let result = app.navigation.go_live(PlanId::from("sunday"), None).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn disabled_live_moves_cursor_without_projecting() {
    let mut library = MockLibrary::new();
    library.expect_get_plan().never();
    let (app, _) = app_with(library);

    let outcome = app.navigation.set_cursor(4).await.unwrap();

    assert!(!outcome.live.enabled);
    assert_eq!(outcome.live.cursor, 4);
    assert!(outcome.projection.is_none());
}

#[tokio::test]
async fn blanking_live_target_keeps_content() {
    let (app, _) = app_with(library_with(Some(sunday_plan())));
    app.navigation
        .go_live(PlanId::from("sunday"), None)
        .await
        .unwrap();

    app.runtime.toggle_black();
    let black = app.runtime.get_state(SurfaceKey::A);
    assert_eq!(black.mode, ProjectionMode::Black);
    assert_eq!(body_of(&black), Some("Good morning"));

    app.runtime.toggle_white();
    let live = app.runtime.get_live();
    assert!(live.white && !live.black);
    assert_eq!(
        app.runtime.get_state(SurfaceKey::A).mode,
        ProjectionMode::White
    );

    app.runtime.resume();
    assert_eq!(
        app.runtime.get_state(SurfaceKey::A).mode,
        ProjectionMode::Normal
    );
}

#[tokio::test]
async fn project_item_refused_only_by_lock() {
    let (app, _) = app_with(library_with(Some(sunday_plan())));
    app.runtime.set_locked(SurfaceKey::C, true);
    let welcome = &sunday_plan().items[0];

    let locked = app.navigation.project_item(SurfaceKey::C, welcome).await;
    let free = app.navigation.project_item(SurfaceKey::B, welcome).await;

    assert!(locked.is_refused_with(RefusalReason::Locked));
    assert!(free.ok);
    assert_eq!(
        body_of(&app.runtime.get_state(SurfaceKey::B)),
        Some("Good morning")
    );
}

#[tokio::test]
async fn repeated_text_replace_is_idempotent_apart_from_timestamp() {
    let (app, _) = app_with(library_with(None));
    let payload = lp_core::TextPayload::new(Some("Hello".into()), "World");

    let first = app.runtime.set_content_text(SurfaceKey::A, payload.clone());
    let second = app.runtime.set_content_text(SurfaceKey::A, payload);

    let (first, second) = (first.state.unwrap(), second.state.unwrap());
    assert!(first.same_display(&second));
    assert!(second.updated_at > first.updated_at);
}
