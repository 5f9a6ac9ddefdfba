// Tests for editor preference resolution from the environment

use chorus::session::{editor_from_env, SessionOrchestrator, TmuxClient, DEFAULT_EDITOR};
use serial_test::serial;

#[test]
#[serial]
fn test_editor_defaults_to_vim() {
    std::env::remove_var("EDITOR");
    assert_eq!(editor_from_env(), DEFAULT_EDITOR);
}

#[test]
#[serial]
fn test_editor_from_env() {
    std::env::set_var("EDITOR", "hx");
    let editor = editor_from_env();
    let orchestrator = SessionOrchestrator::new(TmuxClient::new("tmux"));
    std::env::remove_var("EDITOR");

    assert_eq!(editor, "hx");
    assert_eq!(orchestrator.editor(), "hx");
    assert_eq!(orchestrator.session_name(), "chorus");
}
