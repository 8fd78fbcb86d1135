use std::io::Cursor;

use fixturekit::{
    Command, Config, ConsoleSession, Flow, Key, MeasurementSystem, Position3D, ValidationMode,
};

fn run(config: &Config, script: &str) -> (ConsoleSession, String) {
    let mut session = ConsoleSession::from_config(config).unwrap();
    let mut out = Vec::new();
    session.run(Cursor::new(script.as_bytes()), &mut out).unwrap();
    (session, String::from_utf8(out).unwrap())
}

#[test]
fn parses_commands() {
    assert_eq!(
        "nudge 10 -5".parse::<Command>().unwrap(),
        Command::Nudge { dx: 10.0, dz: -5.0 }
    );
    assert_eq!(
        "mode clamp".parse::<Command>().unwrap(),
        Command::Mode(ValidationMode::Clamp)
    );
    assert_eq!("mode".parse::<Command>().unwrap(), Command::ToggleMode);
    assert_eq!("KEY up".parse::<Command>().unwrap(), Command::Key(Key::ArrowUp));
    assert_eq!("key R".parse::<Command>().unwrap(), Command::Key(Key::Char('R')));
    assert_eq!(
        "preset cylinder".parse::<Command>().unwrap(),
        Command::Preset("cylinder".to_string())
    );

    assert!("nudge 10".parse::<Command>().is_err());
    assert!("nudge ten 0".parse::<Command>().is_err());
    assert!("nudge inf 0".parse::<Command>().is_err());
    assert!("rotate twice".parse::<Command>().is_err());
    assert!("mode sideways".parse::<Command>().is_err());
    assert!("jump".parse::<Command>().is_err());
}

#[test]
fn nudge_past_edge_reports_invalid_once() {
    let script = "nudge 520 0\nnudge 20 0\ntick\nnudge 10 0\ntick\n";
    let (session, out) = run(&Config::default(), script);

    assert_eq!(out.matches("event: Placement invalid").count(), 1);
    assert!(out.contains("X 1150.0 Z 300.0 | 0° | Invalid"));
    assert_eq!(
        session.controller().position(),
        Position3D::new(1150.0, 20.0, 300.0)
    );
}

#[test]
fn keys_follow_focus() {
    let script = "key right\nfocus text\nkey right\nfocus canvas\nkey up\nkey r\n";
    let (session, out) = run(&Config::default(), script);

    assert!(out.contains("key ignored"));
    assert_eq!(
        session.controller().position(),
        Position3D::new(610.0, 20.0, 290.0)
    );
    assert_eq!(session.controller().quarter_turns(), 1);
}

#[test]
fn drag_through_the_viewport() {
    let script = "drag 400 300\norbit 0.5 0\nmove 450 320\nrelease\nrelease\n";
    let (session, out) = run(&Config::default(), script);

    assert!(out.contains("event: Drag started"));
    assert!(out.contains("orbit disabled while dragging"));
    assert!(out.contains("event: Drag ended"));
    assert!(out.contains("not dragging"));
    assert!(!session.controller().is_dragging());
    assert_ne!(
        session.controller().position(),
        Position3D::new(600.0, 20.0, 300.0)
    );
}

#[test]
fn press_beside_the_tool_is_ignored() {
    let (session, out) = run(&Config::default(), "drag 5 5\nmove 100 100\n");
    assert!(out.contains("no tool under pointer"));
    assert!(out.contains("move ignored"));
    assert!(!session.controller().is_dragging());
}

#[test]
fn preset_switch_and_listing() {
    let (session, out) = run(&Config::default(), "presets\npreset drill-press\npreset nope\n");

    assert!(out.contains("* box-default"));
    assert!(out.contains("drill-press"));
    assert!(out.contains("event: Preset drill-press"));
    assert!(out.contains("error: Unknown preset 'nope'"));
    assert_eq!(session.controller().active_preset().id.as_str(), "drill-press");
    assert_eq!(session.controller().position().y, 82.5);
}

#[test]
fn clamp_mode_from_config() {
    let mut config = Config::default();
    config.placement.validation_mode = ValidationMode::Clamp;
    config.placement.nudge_step = 1000.0;
    config.measurement_system = MeasurementSystem::Imperial;

    let (session, out) = run(&config, "key right\nstatus\n");
    assert_eq!(session.controller().position().x, 1130.0);
    assert!(session.controller().is_valid());
    assert!(out.contains("X 44.488 Z 11.811 | 0° | Valid"));
}

#[test]
fn bad_lines_do_not_stop_the_session() {
    let script = "# comment\n\nbogus\nrotate\nquit\nrotate\n";
    let (session, out) = run(&Config::default(), script);

    assert!(out.contains("error: unknown command 'bogus'"));
    assert_eq!(session.controller().quarter_turns(), 1);
}

#[test]
fn execute_reports_quit() {
    let mut session = ConsoleSession::from_config(&Config::default()).unwrap();
    let mut out = Vec::new();
    assert_eq!(
        session.execute(Command::Status, &mut out).unwrap(),
        Flow::Continue
    );
    assert_eq!(session.execute(Command::Quit, &mut out).unwrap(), Flow::Quit);
}

#[test]
fn invalid_config_fails_fast() {
    let mut config = Config::default();
    config.workspace.safe_zone_margin = 400.0;
    assert!(ConsoleSession::from_config(&config).is_err());
}

#[test]
fn events_echo_in_publish_order_once() {
    let (_, out) = run(&Config::default(), "drag 400 300\npreset cylinder\nstatus\n");

    let expected = "event: Drag ended\n\
                    event: Preset cylinder\n\
                    event: Position (600.000, 22.500, 300.000)\n";
    assert!(out.contains(expected), "{}", out);
    assert_eq!(out.matches("event: Preset cylinder").count(), 1);
    assert_eq!(out.matches("event: Drag started").count(), 1);
}
