use std::sync::Arc;

use protocol::AnalysisResult;
use smartlex_core::{AppContext, Origin, View, ViewController};

fn result(term: &str) -> Arc<AnalysisResult> {
    Arc::new(AnalysisResult::new(term, "ctx", "summary", "detail"))
}

#[test]
fn navigate_records_previous_view() {
    let context = AppContext::new();
    let views = ViewController::new(context.clone());

    views.navigate(View::Library);
    let state = context.snapshot();
    assert_eq!(state.view, View::Library);
    assert_eq!(state.previous_view, View::Home);
}

#[test]
fn repeated_navigate_is_idempotent() {
    let context = AppContext::new();
    let views = ViewController::new(context.clone());

    views.navigate(View::History);
    views.navigate(View::Home);
    let once = context.snapshot();

    views.navigate(View::Home);
    let twice = context.snapshot();

    assert_eq!(twice.view, once.view);
    assert_eq!(twice.previous_view, once.previous_view);
    assert_eq!(twice.breadcrumb, once.breadcrumb);
}

#[test]
fn all_views_reachable_from_any_other() {
    let context = AppContext::new();
    let views = ViewController::new(context.clone());
    let all = [
        View::Home,
        View::History,
        View::Library,
        View::Settings,
        View::AnalysisResult,
    ];

    for &from in &all {
        for &to in &all {
            views.navigate(from);
            views.navigate(to);
            assert_eq!(context.snapshot().view, to);
        }
    }
}

#[test]
fn library_selection_sets_breadcrumb_and_returns() {
    let context = AppContext::new();
    let views = ViewController::new(context.clone());

    views.navigate(View::Library);
    views.navigate_to_analysis(result("term"), Origin::Library);

    let state = context.snapshot();
    assert_eq!(state.view, View::AnalysisResult);
    assert_eq!(state.breadcrumb.origin, Origin::Library);
    assert_eq!(state.breadcrumb.label, "Library");
    assert_eq!(state.current_analysis.unwrap().term, "term");

    views.return_to_breadcrumb_origin();
    assert_eq!(context.snapshot().view, View::Library);
}

#[test]
fn breadcrumb_is_written_before_the_view_changes() {
    let context = AppContext::new();
    let views = ViewController::new(context.clone());

    views.navigate(View::History);
    views.navigate_to_analysis(result("term"), Origin::History);

    // A single snapshot is atomic: if the view is AnalysisResult, the
    // breadcrumb must already be the one for this selection.
    let state = context.snapshot();
    assert_eq!(state.view, View::AnalysisResult);
    assert_eq!(state.breadcrumb.origin, Origin::History);
}

#[test]
fn origin_labels() {
    assert_eq!(Origin::Home.label(), "Home");
    assert_eq!(Origin::Library.label(), "Library");
    assert_eq!(Origin::History.label(), "History");
}

#[test]
fn close_returns_to_the_previous_view() {
    let context = AppContext::new();
    let views = ViewController::new(context.clone());

    views.navigate(View::Library);
    views.navigate(View::History);
    views.close(View::Home);
    assert_eq!(context.snapshot().view, View::Library);
}

#[test]
fn close_uses_fallback_when_previous_is_the_overlay_itself() {
    let context = AppContext::new();
    let views = ViewController::new(context.clone());

    // Fresh state: previous == current == Home.
    views.close(View::Library);
    assert_eq!(context.snapshot().view, View::Library);
}
