use labo::error::InterpretError;
use labo::planner::{interpret, Action};

#[test]
fn test_single_mouse_move() {
    let plan = interpret(r#"[{"action":"mouse_move","x":500,"y":300}]"#).unwrap();
    assert_eq!(plan.actions, vec![Action::MouseMove { x: 500, y: 300 }]);
}

#[test]
fn test_no_brackets_is_no_plan() {
    let err = interpret("no brackets here").unwrap_err();
    assert!(matches!(err, InterpretError::NoPlanFound));
}

#[test]
fn test_reversed_brackets_is_no_plan() {
    assert!(matches!(interpret("] then [").unwrap_err(), InterpretError::NoPlanFound));
}

#[test]
fn test_prose_around_multiline_plan_is_ignored() {
    let raw = "Sure! Here is what I would do:\n[\n  {\"action\": \"mouse_move\", \"x\": 10, \"y\": 20},\n  {\"action\": \"mouse_click\"},\n  {\"action\": \"keyboard_type\", \"text\": \"hello\"},\n  {\"action\": \"keyboard_shortcut\", \"keys\": [\"ctrl\", \"s\"]},\n  {\"action\": \"wait\", \"duration_ms\": 250}\n]\nLet me know if that worked.";
    let plan = interpret(raw).unwrap();

    assert_eq!(
        plan.actions,
        vec![
            Action::MouseMove { x: 10, y: 20 },
            Action::MouseClick {},
            Action::KeyboardType { text: "hello".into() },
            Action::KeyboardShortcut { keys: vec!["ctrl".into(), "s".into()] },
            Action::Wait { duration_ms: 250 },
        ]
    );
}

#[test]
fn test_malformed_plan_reports_fragment() {
    let err = interpret("plan: [{\"action\": \"mouse_move\", \"x\": }] done").unwrap_err();
    match err {
        InterpretError::MalformedPlan { fragment, .. } => {
            assert_eq!(fragment, "[{\"action\": \"mouse_move\", \"x\": }]");
        }
        other => panic!("expected MalformedPlan, got {:?}", other),
    }
}

#[test]
fn test_unknown_action_kind_decodes_to_unknown() {
    let plan = interpret(r#"[{"action":"scroll","amount":3},{"action":"mouse_click"}]"#).unwrap();
    assert_eq!(plan.actions, vec![Action::Unknown, Action::MouseClick {}]);
}

#[test]
fn test_wait_accepts_legacy_time_field() {
    let plan = interpret(r#"[{"action":"wait","time":1500}]"#).unwrap();
    assert_eq!(plan.actions, vec![Action::Wait { duration_ms: 1500 }]);
}

#[test]
fn test_negative_wait_is_accepted_verbatim() {
    // Range checks belong to the dispatcher.
    let plan = interpret(r#"[{"action":"wait","duration_ms":-40}]"#).unwrap();
    assert_eq!(plan.actions, vec![Action::Wait { duration_ms: -40 }]);
}

#[test]
fn test_empty_array_is_empty_plan() {
    let plan = interpret("nothing to do: []").unwrap();
    assert!(plan.is_empty());
}
