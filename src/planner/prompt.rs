/// Fixed instruction preamble sent ahead of every goal.
pub const INSTRUCTION_PREAMBLE: &str = r#"Provide an ordered array of immediate steps that control the mouse or keyboard of this computer to complete the goal. Respond with JSON only.
Include the clicks, typing and waits needed, with enough wait time for each step to take effect.
Each step is an object whose "action" is one of "mouse_move", "mouse_click", "keyboard_type", "keyboard_shortcut" or "wait".
Fields: mouse_move takes integer "x" and "y" screen coordinates, keyboard_type takes "text", keyboard_shortcut takes "keys" (an ordered list of key names such as "ctrl", "shift", "t"), wait takes "duration_ms".
Example:
[
  {"action": "mouse_move", "x": 500, "y": 300},
  {"action": "mouse_click"},
  {"action": "keyboard_type", "text": "Hello world"},
  {"action": "wait", "duration_ms": 1000}
]
If the screen should be captured again, reply with capture_desktop. To notify the server, reply with send_message: <text>."#;
