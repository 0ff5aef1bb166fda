use super::app::SolveOutcome;
use super::*;
use crate::config::AppConfig;
use crate::gateway::{SolveError, SolveGateway};
use crate::geometry::client_to_logical;
use crate::render::PixmapCanvas;
use crate::types::{Edge, Point, Solution};
use eframe::egui;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Gateway answering every call with a fixed outcome, or never answering.
struct FixedGateway {
    outcome: Option<Result<Solution, SolveError>>,
}

impl SolveGateway for FixedGateway {
    fn solve(&self, _terminals: Vec<Point>) -> BoxFuture<'static, Result<Solution, SolveError>> {
        match self.outcome.clone() {
            Some(outcome) => futures::future::ready(outcome).boxed(),
            None => futures::future::pending().boxed(),
        }
    }
}

fn segment_solution() -> Solution {
    let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    Solution {
        edges: vec![Edge::new(a, b)],
        steiner_points: Vec::new(),
        total_length: 100.0,
    }
}

fn test_app(outcome: Option<Result<Solution, SolveError>>, runtime: &tokio::runtime::Runtime) -> SteinerApp {
    let config = AppConfig::default();
    let canvas = PixmapCanvas::with_fonts(config.logical_size(), Arc::new(fontdb::Database::new()))
        .expect("surface should be available");
    SteinerApp::new(
        config,
        Arc::new(FixedGateway { outcome }),
        canvas,
        runtime.handle().clone(),
    )
}

fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw
}

/// Run one frame with the canvas in the central panel.
fn canvas_frame(ctx: &egui::Context, app: &mut SteinerApp, events: Vec<egui::Event>) {
    let _ = ctx.run(raw_input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| app.draw_canvas(ui));
    });
}

/// Move, press and release the primary button at `pos` over three frames.
fn click_canvas(ctx: &egui::Context, app: &mut SteinerApp, pos: egui::Pos2) {
    canvas_frame(ctx, app, vec![egui::Event::PointerMoved(pos)]);
    canvas_frame(
        ctx,
        app,
        vec![egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        }],
    );
    canvas_frame(
        ctx,
        app,
        vec![egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        }],
    );
}

/// Poll the outcome channel until one outcome is applied.
fn wait_for_outcome(app: &mut SteinerApp) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.handle_solve_outcomes() == 0 {
        assert!(Instant::now() < deadline, "solve outcome never arrived");
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn clicking_canvas_adds_terminal_at_logical_position() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);
    let ctx = egui::Context::default();

    // First frame lays out the canvas so its rect is known.
    canvas_frame(&ctx, &mut app, vec![]);
    let rect = app.last_canvas_rect.expect("canvas should have been laid out");
    let pos = rect.min + egui::vec2(rect.width() * 0.25, rect.height() * 0.5);

    click_canvas(&ctx, &mut app, pos);

    let expected = client_to_logical(pos.x, pos.y, rect.into(), app.canvas.size());
    assert_eq!(app.state.terminals(), &[expected]);
    assert_eq!(expected, Point::new(200.0, 300.0));
}

#[test]
fn locked_canvas_ignores_clicks() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);
    app.freeze_canvas = true;
    let ctx = egui::Context::default();

    canvas_frame(&ctx, &mut app, vec![]);
    let rect = app.last_canvas_rect.expect("canvas should have been laid out");
    click_canvas(&ctx, &mut app, rect.center());

    assert!(app.state.terminals().is_empty());
    assert_eq!(app.interaction().cursor(), egui::CursorIcon::Default);
}

#[test]
fn clicks_while_loading_add_nothing() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);
    app.state.add_point(Point::new(10.0, 10.0));
    app.state.add_point(Point::new(50.0, 10.0));
    app.start_solve(&egui::Context::default());
    assert!(app.state.is_loading());

    let controller = app.interaction();
    assert!(!controller.is_enabled());
    let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
    app.handle_canvas_click(controller, egui::pos2(100.0, 100.0), rect);

    assert_eq!(app.state.terminals().len(), 2);
    assert!(app.state.is_loading());
}

#[test]
fn enabled_controller_maps_clicks_and_shows_crosshair() {
    let controller = InteractionController::new(true);
    let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(400.0, 300.0));
    let point = controller.point_for_click(
        egui::pos2(300.0, 200.0),
        rect,
        crate::geometry::LogicalSize::new(800, 600),
    );
    assert_eq!(point, Some(Point::new(400.0, 300.0)));
    assert_eq!(controller.cursor(), egui::CursorIcon::Crosshair);
    assert_eq!(
        InteractionController::new(false).point_for_click(
            egui::pos2(300.0, 200.0),
            rect,
            crate::geometry::LogicalSize::new(800, 600)
        ),
        None
    );
}

#[test]
fn solve_runs_on_the_runtime_and_installs_the_solution() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(Some(Ok(segment_solution())), &runtime);
    app.state.add_point(Point::new(0.0, 0.0));
    app.state.add_point(Point::new(100.0, 0.0));
    assert_eq!(app.solve_button_text(), "Solve Steiner Tree");

    app.start_solve(&egui::Context::default());
    assert_eq!(app.solve_button_text(), "Computing...");

    wait_for_outcome(&mut app);
    assert_eq!(app.state.solution(), Some(&segment_solution()));
    assert!(!app.state.is_loading());
    assert_eq!(app.solve_button_text(), "Solve Again");
}

#[test]
fn solve_failure_is_reported_as_error() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(Some(Err(SolveError::ServerComputationFailed)), &runtime);
    app.state.add_point(Point::new(0.0, 0.0));
    app.state.add_point(Point::new(100.0, 0.0));

    app.start_solve(&egui::Context::default());
    wait_for_outcome(&mut app);

    assert_eq!(app.state.error(), Some(&SolveError::ServerComputationFailed));
    assert!(app.state.solution().is_none());
}

#[test]
fn solve_with_one_terminal_fails_without_dispatch() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(Some(Ok(segment_solution())), &runtime);
    app.state.add_point(Point::new(0.0, 0.0));

    app.start_solve(&egui::Context::default());

    assert_eq!(app.state.error(), Some(&SolveError::Validation));
    assert!(!app.state.is_loading());
    assert_eq!(app.handle_solve_outcomes(), 0);
}

#[test]
fn outcome_for_discarded_request_is_dropped() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);
    let gateway = FixedGateway {
        outcome: Some(Ok(segment_solution())),
    };
    app.state.add_point(Point::new(0.0, 0.0));
    app.state.add_point(Point::new(100.0, 0.0));
    let pending = app.state.request_solve(&gateway).expect("request should dispatch");

    app.state.clear_all();
    assert!(app.state.is_loading());
    app.solve_sender
        .send(SolveOutcome {
            request: pending.request,
            outcome: Ok(segment_solution()),
        })
        .unwrap();

    assert_eq!(app.handle_solve_outcomes(), 0);
    assert!(app.state.solution().is_none());
    assert!(app.state.terminals().is_empty());
    assert!(!app.state.is_loading());
}

#[test]
fn clear_all_while_loading_blocks_a_second_solve() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);
    let ctx = egui::Context::default();
    app.state.add_point(Point::new(0.0, 0.0));
    app.state.add_point(Point::new(100.0, 0.0));
    app.start_solve(&ctx);

    app.state.clear_all();
    app.state.add_point(Point::new(10.0, 10.0));
    app.state.add_point(Point::new(20.0, 20.0));
    app.start_solve(&ctx);

    assert!(app.state.is_loading());
    assert!(!app.state.can_solve());
    assert_eq!(app.solve_button_text(), "Computing...");
    assert!(!app.interaction().is_enabled());
}

#[test]
fn empty_tree_does_not_offer_solve_again() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let empty = Solution {
        edges: Vec::new(),
        steiner_points: Vec::new(),
        total_length: 0.0,
    };
    let mut app = test_app(Some(Ok(empty)), &runtime);
    app.state.add_point(Point::new(5.0, 5.0));
    app.state.add_point(Point::new(5.0, 5.0));

    app.start_solve(&egui::Context::default());
    wait_for_outcome(&mut app);

    assert!(app.state.solution().is_some());
    assert!(!app.has_drawn_solution());
    assert_eq!(app.solve_button_text(), "Solve Steiner Tree");
}

#[test]
fn successful_paint_clears_repaint_flag() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);
    let ctx = egui::Context::default();
    app.state.add_point(Point::new(40.0, 40.0));
    assert!(app.state.needs_repaint());

    canvas_frame(&ctx, &mut app, vec![]);
    assert!(!app.state.needs_repaint());

    app.state.add_point(Point::new(80.0, 40.0));
    assert!(app.state.needs_repaint());
    canvas_frame(&ctx, &mut app, vec![]);
    assert!(!app.state.needs_repaint());
}

#[test]
fn first_frame_uploads_scene_texture() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);
    let ctx = egui::Context::default();
    assert!(app.texture.is_none());

    canvas_frame(&ctx, &mut app, vec![]);

    let texture = app.texture.as_ref().expect("texture should be uploaded");
    assert_eq!(texture.size(), [800, 600]);
}

#[test]
fn panels_render_with_solution_and_error() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(Some(Ok(segment_solution())), &runtime);
    app.state.add_point(Point::new(0.0, 0.0));
    app.state.add_point(Point::new(100.0, 0.0));
    app.start_solve(&egui::Context::default());
    wait_for_outcome(&mut app);

    let ctx = egui::Context::default();
    let output = ctx.run(raw_input(vec![]), |ctx| {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| app.draw_controls(ui));
        egui::SidePanel::right("info_panel").show(ctx, |ui| app.draw_info_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| app.draw_canvas(ui));
    });
    assert!(!output.shapes.is_empty());
}

#[test]
fn total_length_formatting() {
    assert_eq!(format_total_length(Some(282.842_712)), "282.84");
    assert_eq!(format_total_length(Some(100.0)), "100.00");
    assert_eq!(format_total_length(None), "-");
}

#[test]
fn scene_svg_reflects_state() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);
    app.state.add_point(Point::new(120.0, 80.0));

    let svg = app.scene_svg();
    assert!(svg.contains(">P1<"));
    assert!(svg.contains(">(120, 80)<"));
    assert!(!svg.contains(">S1<"));
}

#[test]
fn applying_solver_url_rebuilds_gateway_endpoint() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut app = test_app(None, &runtime);

    app.apply_solver_url("  http://solver.example:9000/api/ ");

    assert_eq!(app.config.solver_url, "http://solver.example:9000/api");
    assert_eq!(app.solver_url_edit, "http://solver.example:9000/api");
    assert_eq!(app.config.solve_endpoint(), "http://solver.example:9000/api/solve");
}
