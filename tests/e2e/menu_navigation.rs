use crate::common::harness::MenuTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};

/// Test that Tab hands focus to the menu bar and opens the first menu
#[test]
fn test_tab_focuses_menu_bar() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    // Menu dropdown should not be visible initially
    harness.assert_screen_not_contains("Open Recent");

    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness.render().unwrap();

    assert!(harness.app().menu().has_focus());
    assert_eq!(harness.menu_path(), vec![0]);
    harness.assert_screen_contains("Open Recent");
    harness.assert_screen_contains("Quit");
}

/// Test that arrow keys do nothing while the body has focus
#[test]
fn test_arrows_ignored_without_focus() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness
        .press(&[KeyCode::Right, KeyCode::Down, KeyCode::Enter])
        .unwrap();
    assert_eq!(harness.menu_path(), vec![0]);
    assert!(!harness.should_quit());
}

/// Test left/right on the bar clamp at both ends
#[test]
fn test_bar_navigation_clamps() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness.press(&[KeyCode::Tab, KeyCode::Left]).unwrap();
    assert_eq!(harness.menu_path(), vec![0]);

    harness
        .send_key_repeat(KeyCode::Right, KeyModifiers::NONE, 10)
        .unwrap();
    assert_eq!(harness.menu_path(), vec![3]);

    harness.render().unwrap();
    harness.assert_screen_contains("About");
}

/// Test that Right on a leaf of the first popup sweeps to the next menu
#[test]
fn test_right_sweeps_across_menus() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness
        .press(&[KeyCode::Tab, KeyCode::Down, KeyCode::Right])
        .unwrap();
    assert_eq!(harness.menu_path(), vec![1, 0]);

    harness.render().unwrap();
    harness.assert_screen_contains("Undo");
    harness.assert_screen_not_contains("Open Recent");

    harness.press(&[KeyCode::Right, KeyCode::Right]).unwrap();
    assert_eq!(harness.menu_path(), vec![3, 0]);

    // Help is the last menu: nowhere further to sweep
    harness.press(&[KeyCode::Right]).unwrap();
    assert_eq!(harness.menu_path(), vec![3, 0]);
}

/// Test walking three popup levels deep and activating a leaf
#[test]
fn test_three_levels_deep() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness.press(&[KeyCode::Tab, KeyCode::Right]).unwrap();

    // Edit > Find (fourth item, past Undo, Redo and the separator)
    harness
        .send_key_repeat(KeyCode::Down, KeyModifiers::NONE, 6)
        .unwrap();
    assert_eq!(harness.menu_path(), vec![1, 3]);

    harness
        .press(&[KeyCode::Right, KeyCode::Down, KeyCode::Down, KeyCode::Right])
        .unwrap();
    assert_eq!(harness.menu_path(), vec![1, 3, 2, 0]);

    harness.render().unwrap();
    harness.assert_screen_contains("Replace...");
    harness.assert_screen_contains("Match Case");
    harness.assert_screen_contains("Whole Word");

    // Deepest level: Right has nowhere to go
    harness.press(&[KeyCode::Right]).unwrap();
    assert_eq!(harness.menu_path(), vec![1, 3, 2, 0]);

    harness.press(&[KeyCode::Enter]).unwrap();
    assert_eq!(harness.app().status_message(), Some("Action: find_match_case"));
    assert!(!harness.app().menu().has_focus());
    assert_eq!(harness.menu_path(), vec![1]);
}

/// Test that Left closes one level at a time
#[test]
fn test_left_closes_levels() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness
        .press(&[
            KeyCode::Tab,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Right,
        ])
        .unwrap();
    assert_eq!(harness.menu_path(), vec![0, 2, 0]);

    harness.press(&[KeyCode::Left]).unwrap();
    assert_eq!(harness.menu_path(), vec![0, 2]);
    harness.press(&[KeyCode::Left]).unwrap();
    assert_eq!(harness.menu_path(), vec![0]);
    assert!(harness.app().menu().has_focus());
}

/// Test Up from the first row returns focus to the bar
#[test]
fn test_up_returns_to_bar() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness
        .press(&[KeyCode::Tab, KeyCode::Down, KeyCode::Down, KeyCode::Up])
        .unwrap();
    assert_eq!(harness.menu_path(), vec![0, 0]);
    harness.press(&[KeyCode::Up]).unwrap();
    assert_eq!(harness.menu_path(), vec![0]);

    // Up on the bar is not bound
    harness.press(&[KeyCode::Up]).unwrap();
    assert_eq!(harness.menu_path(), vec![0]);
}

/// Test File > Quit through the menu
#[test]
fn test_quit_via_menu() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness.press(&[KeyCode::Tab]).unwrap();
    harness
        .send_key_repeat(KeyCode::Down, KeyModifiers::NONE, 5)
        .unwrap();
    assert_eq!(harness.menu_path(), vec![0, 4]);

    harness.render().unwrap();
    // Shortcut hint of the focused entry shows in the status line
    assert!(harness.get_row_text(23).starts_with("Quit (Esc)"));

    harness.press(&[KeyCode::Enter]).unwrap();
    assert!(harness.should_quit());
}

/// Test that Enter on a submenu entry without a handler does nothing
#[test]
fn test_enter_on_submenu_entry() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness
        .press(&[KeyCode::Tab, KeyCode::Down, KeyCode::Down, KeyCode::Down])
        .unwrap();
    assert_eq!(harness.menu_path(), vec![0, 2]);

    harness.press(&[KeyCode::Enter]).unwrap();
    assert_eq!(harness.menu_path(), vec![0, 2]);
    assert!(harness.app().menu().has_focus());
    assert_eq!(harness.app().status_message(), None);
}

/// Test Escape closes popups before leaving the menu
#[test]
fn test_escape_closes_menu() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness
        .press(&[KeyCode::Tab, KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Right])
        .unwrap();
    harness.render().unwrap();
    harness.assert_screen_contains("notes.md");

    harness.press(&[KeyCode::Esc]).unwrap();
    assert_eq!(harness.menu_path(), vec![0]);
    assert!(harness.app().menu().has_focus());

    harness.press(&[KeyCode::Esc]).unwrap();
    assert!(!harness.app().menu().has_focus());
    assert!(!harness.should_quit());

    harness.render().unwrap();
    harness.assert_screen_not_contains("Open Recent");
}

/// Test that modified arrows are not menu keys
#[test]
fn test_modified_arrows_pass_through() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness.press(&[KeyCode::Tab]).unwrap();
    harness.send_key(KeyCode::Down, KeyModifiers::SHIFT).unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::CONTROL).unwrap();
    assert_eq!(harness.menu_path(), vec![0]);
}

/// Test F10 focuses the menu from the body
#[test]
fn test_f10_focuses_menu() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    harness.send_key(KeyCode::F(10), KeyModifiers::NONE).unwrap();
    assert!(harness.app().menu().has_focus());
}

/// Test View > Toggle Mouse and Help > About
#[test]
fn test_builtin_actions() {
    let mut harness = MenuTestHarness::new(80, 24).unwrap();
    assert!(harness.app().mouse_enabled());

    harness
        .press(&[KeyCode::Tab, KeyCode::Right, KeyCode::Right, KeyCode::Down, KeyCode::Enter])
        .unwrap();
    assert!(!harness.app().mouse_enabled());
    harness.render().unwrap();
    harness.assert_screen_contains("Mouse support disabled");

    harness
        .press(&[
            KeyCode::Tab,
            KeyCode::Right,
            KeyCode::Right,
            KeyCode::Right,
            KeyCode::Down,
            KeyCode::Enter,
        ])
        .unwrap();
    // Tab reopened the bar on View, where the last action left it
    assert!(harness.app().about_visible());
    harness.render().unwrap();
    harness.assert_screen_contains("About");
    harness.assert_screen_contains("Arrows navigate");

    // Any key dismisses the box
    harness.press(&[KeyCode::Char('x')]).unwrap();
    assert!(!harness.app().about_visible());
}

/// Test a menu bar built from a JSON configuration
#[test]
fn test_custom_menu_from_json() {
    let json = r#"{
        "theme": "dark",
        "menu": {
            "menus": [
                { "label": "Game", "items": [
                    { "label": "Start", "action": "start" },
                    { "separator": true },
                    { "label": "Levels", "items": [
                        { "label": "Easy", "action": "easy" },
                        { "label": "Hard", "action": "hard", "disabled": true }
                    ]}
                ]},
                { "label": "Info", "items": [] }
            ]
        }
    }"#;
    let mut harness = MenuTestHarness::with_config_json(60, 16, json).unwrap();
    harness.render().unwrap();
    assert!(harness.get_row_text(0).starts_with(" Game Info"));

    // Separators are selectable rows
    harness
        .press(&[KeyCode::Tab, KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Right])
        .unwrap();
    assert_eq!(harness.menu_path(), vec![0, 2, 0]);

    // Disabled entries still run: the flag only affects drawing
    harness.press(&[KeyCode::Down, KeyCode::Enter]).unwrap();
    assert_eq!(harness.app().status_message(), Some("Action: hard"));

    // "Info" has no items: Down opens an empty level, Up closes it
    harness.press(&[KeyCode::Tab, KeyCode::Right, KeyCode::Down]).unwrap();
    assert_eq!(harness.menu_path(), vec![1, 0]);
    harness.press(&[KeyCode::Right]).unwrap();
    assert_eq!(harness.menu_path(), vec![1, 0]);
    harness.press(&[KeyCode::Up]).unwrap();
    assert_eq!(harness.menu_path(), vec![1]);
}

/// Test Right from an opened childless menu moves on to the next menu
#[test]
fn test_right_from_childless_menu_sweeps() {
    let json = r#"{
        "menu": {
            "menus": [
                { "label": "Go", "items": [] },
                { "label": "Run", "items": [ { "label": "Now", "action": "now" } ] },
                { "label": "Bare", "items": [] },
                { "label": "Last", "items": [] }
            ]
        }
    }"#;
    let mut harness = MenuTestHarness::with_config_json(60, 16, json).unwrap();

    harness.press(&[KeyCode::Tab, KeyCode::Down]).unwrap();
    assert_eq!(harness.menu_path(), vec![0, 0]);
    harness.render().unwrap();
    harness.assert_screen_not_contains("┌");

    // Next menu has items: its popup opens
    harness.press(&[KeyCode::Right]).unwrap();
    assert_eq!(harness.menu_path(), vec![1, 0]);
    harness.render().unwrap();
    harness.assert_screen_contains("Now");

    // Next menu is empty too: focus stays on the bar
    harness.press(&[KeyCode::Right, KeyCode::Down, KeyCode::Right]).unwrap();
    assert_eq!(harness.menu_path(), vec![3]);
}
