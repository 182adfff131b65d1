//! Dashboard application entry point

use crossbeam_channel::Receiver;
use eframe::egui;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use crate::dashboard::components::{render_modals, render_notice};
use crate::dashboard::controller::{DashboardController, UiAction};
use crate::dashboard::theme;
use crate::dashboard::views::{render_header, render_library_view};
use crate::shared::{SharedAppState, WorkerEvent};
use crate::worker::Dispatcher;

/// The main dashboard application
pub struct DashboardApp {
    /// Shared application state
    shared_state: Arc<RwLock<SharedAppState>>,
    /// Dashboard state and its update rules
    controller: DashboardController,
    /// Sends user actions to the server
    dispatcher: Dispatcher,
    /// Results coming back from the worker
    events: Receiver<WorkerEvent>,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl DashboardApp {
    /// Create a new dashboard application
    pub fn new(
        shared_state: Arc<RwLock<SharedAppState>>,
        controller: DashboardController,
        dispatcher: Dispatcher,
        events: Receiver<WorkerEvent>,
    ) -> Self {
        Self {
            shared_state,
            controller,
            dispatcher,
            events,
            theme_applied: false,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    /// Apply every worker result received so far
    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.controller.apply(event);
            applied += 1;
        }
        applied
    }

    /// Apply queued UI actions, sending requests where needed
    pub fn process_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            if let Some(command) = self.controller.handle(action) {
                self.dispatcher.dispatch(command);
            }
        }
    }

    /// Create eframe options for the dashboard window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 720.0])
                .with_min_inner_size([720.0, 480.0])
                .with_title("GOG Library Dashboard"),
            ..Default::default()
        }
    }

    /// Draw one frame and collect the user's actions
    ///
    /// While a modal is open the panels behind it take no input, so the
    /// only possible action is dismissing the modal.
    pub fn draw(&self, ctx: &egui::Context) -> Vec<UiAction> {
        let server_url = self.shared_state.read().config.server.base_url.clone();
        let state = self.controller.state();
        let blocked = state.modals.any_open();
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(theme::ThemeColors::BG_DARK).inner_margin(16.0))
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    render_header(ui, state, &mut actions);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                egui::Frame::none()
                    .inner_margin(egui::vec2(16.0, 8.0))
                    .show(ui, |ui| {
                        if let Some(notice) = &state.notice {
                            if render_notice(ui, notice) {
                                actions.push(UiAction::DismissNotice);
                            }
                            ui.add_space(8.0);
                        }
                        render_library_view(ui, state, &mut actions);
                    });
            });
        });

        if blocked {
            actions.clear();
        }

        if render_modals(ctx, &state.modals, &server_url) {
            actions.push(UiAction::DismissModals);
        }

        actions
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.pump_events();

        let actions = self.draw(ctx);
        self.process_actions(actions);

        // Worker results arrive between frames
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

/// Run the dashboard application
pub fn run_dashboard(app: DashboardApp) -> Result<(), eframe::Error> {
    eframe::run_native(
        "GOG Library Dashboard",
        DashboardApp::options(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::dashboard::state::{GameRow, LibraryState};
    use crate::shared::DashboardCommand;

    fn app(api: Arc<FakeApi>) -> DashboardApp {
        let shared = Arc::new(RwLock::new(SharedAppState::default()));
        let (tx, rx) = crossbeam_channel::unbounded();
        let dispatcher = Dispatcher::new(tokio::runtime::Handle::current(), api, tx);
        let library = LibraryState::from_rows(vec![GameRow::placeholder("g1")]);
        let controller = DashboardController::new(shared.clone(), library);
        DashboardApp::new(shared, controller, dispatcher, rx)
    }

    async fn pump_until(app: &mut DashboardApp, done: impl Fn(&DashboardController) -> bool) {
        for _ in 0..200 {
            app.pump_events();
            if done(app.controller()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("worker result never arrived");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_start_download_round_trip() {
        let api = Arc::new(FakeApi::new());
        let mut app = app(api.clone());

        app.process_actions(vec![UiAction::Command(DashboardCommand::StartDownload {
            game: "g1".to_string(),
        })]);
        pump_until(&mut app, |c| c.is_downloading("g1")).await;

        assert_eq!(api.calls(), vec!["GET /download/g1"]);
        assert!(app.controller().state().library.get("g1").unwrap().spinner_visible);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_failed_action_shows_notice() {
        let api = Arc::new(FakeApi::new());
        *api.fail_with.lock() = Some(500);
        let mut app = app(api);

        app.process_actions(vec![UiAction::Command(DashboardCommand::StopDownload {
            game: "g1".to_string(),
        })]);
        pump_until(&mut app, |c| c.state().notice.is_some()).await;

        assert!(app.controller().active_downloads().is_empty());
        assert!(!app.controller().state().library.get("g1").unwrap().repo_visible);
    }

    fn frame_input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1000.0, 720.0))),
            events,
            ..Default::default()
        }
    }

    fn pointer_button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    /// Press and release at `pos`, returning every action drawn meanwhile
    fn click(app: &DashboardApp, ctx: &egui::Context, pos: egui::Pos2) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let frames = [
            vec![egui::Event::PointerMoved(pos)],
            vec![pointer_button(pos, true)],
            vec![pointer_button(pos, false)],
            vec![egui::Event::PointerGone],
        ];
        for events in frames {
            let _ = ctx.run(frame_input(events), |ctx| actions.extend(app.draw(ctx)));
        }
        actions
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_click_with_modal_open_only_dismisses() {
        let api = Arc::new(FakeApi::new());
        let mut app = app(api);
        app.controller.apply(WorkerEvent::Bootstrapped { active: Vec::new() });
        app.controller.apply(WorkerEvent::UserStatusPolled {
            seq: 1,
            status: crate::shared::UserStatus::Unauthenticated,
        });
        assert!(app.controller().state().modals.login);

        let ctx = egui::Context::default();
        let _ = ctx.run(frame_input(Vec::new()), |ctx| {
            app.draw(ctx);
        });

        let mut dismissed = 0;
        for x in (8..1000).step_by(24) {
            for y in (8..720).step_by(24) {
                let pos = egui::pos2(x as f32, y as f32);
                for action in click(&app, &ctx, pos) {
                    assert_eq!(action, UiAction::DismissModals, "click at {:?}", pos);
                    dismissed += 1;
                }
            }
        }
        assert!(dismissed > 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_rows_take_clicks_without_modal() {
        let api = Arc::new(FakeApi::new());
        let app = app(api);

        let ctx = egui::Context::default();
        let _ = ctx.run(frame_input(Vec::new()), |ctx| {
            app.draw(ctx);
        });

        let mut commands = 0;
        for x in (8..1000).step_by(16) {
            for y in (4..240).step_by(8) {
                let actions = click(&app, &ctx, egui::pos2(x as f32, y as f32));
                commands += actions
                    .iter()
                    .filter(|a| matches!(a, UiAction::Command(_)))
                    .count();
            }
        }
        assert!(commands > 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_local_actions_send_nothing() {
        let api = Arc::new(FakeApi::new());
        let mut app = app(api.clone());

        app.process_actions(vec![
            UiAction::SetQuery("g1".to_string()),
            UiAction::ToggleDownloadsOnly,
            UiAction::DismissModals,
        ]);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(app.pump_events(), 0);
        assert!(api.calls().is_empty());
        assert!(app.controller().state().filter.downloads_only);
    }
}
