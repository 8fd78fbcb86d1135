//! Headless console host.
//!
//! Drives one placement session from line commands, standing in for the
//! interactive front end. Pointer commands address a fixed viewport seen
//! through the default orbit camera.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context};
use tracing::{debug, info};

use fixturekit_core::{format_length, EventBus, MeasurementSystem, PresetCatalog, ValidationMode};
use fixturekit_placement::{
    FocusTarget, Key, KeyBindings, OrbitCamera, PlacementController, PointerId,
};
use fixturekit_settings::Config;

/// Viewport the pointer commands are expressed in
pub const VIEWPORT_WIDTH: f64 = 800.0;
pub const VIEWPORT_HEIGHT: f64 = 600.0;

const MOUSE: PointerId = PointerId(1);

/// Events kept between two console commands
const EVENT_LOG_CAPACITY: usize = 64;

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Nudge { dx: f64, dz: f64 },
    Rotate,
    Reset,
    Preset(String),
    Mode(ValidationMode),
    ToggleMode,
    Presets,
    Status,
    Key(Key),
    Focus(FocusTarget),
    Drag { px: f64, py: f64 },
    Move { px: f64, py: f64 },
    Release,
    Cancel,
    Tick,
    Orbit { d_azimuth: f64, d_polar: f64 },
    Help,
    Quit,
}

fn number(arg: Option<&str>, name: &str) -> anyhow::Result<f64> {
    let raw = arg.with_context(|| format!("missing <{}>", name))?;
    let value: f64 = raw
        .parse()
        .with_context(|| format!("<{}> must be a number, got '{}'", name, raw))?;
    if !value.is_finite() {
        bail!("<{}> must be finite", name);
    }
    Ok(value)
}

fn key_named(name: &str) -> Key {
    match name.to_lowercase().as_str() {
        "up" => Key::ArrowUp,
        "down" => Key::ArrowDown,
        "left" => Key::ArrowLeft,
        "right" => Key::ArrowRight,
        "home" => Key::Home,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => Key::Other,
            }
        }
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb.to_lowercase().as_str() {
            "nudge" => Command::Nudge {
                dx: number(words.next(), "dx")?,
                dz: number(words.next(), "dz")?,
            },
            "rotate" => Command::Rotate,
            "reset" => Command::Reset,
            "preset" => Command::Preset(
                words
                    .next()
                    .context("missing <id>")?
                    .to_string(),
            ),
            "mode" => match words.next() {
                None | Some("toggle") => Command::ToggleMode,
                Some(mode) => Command::Mode(mode.parse().map_err(anyhow::Error::msg)?),
            },
            "presets" => Command::Presets,
            "status" => Command::Status,
            "key" => Command::Key(key_named(words.next().context("missing <key>")?)),
            "focus" => match words.next() {
                Some("canvas") => Command::Focus(FocusTarget::Canvas),
                Some("text") => Command::Focus(FocusTarget::TextEntry),
                _ => bail!("focus takes 'canvas' or 'text'"),
            },
            "drag" => Command::Drag {
                px: number(words.next(), "px")?,
                py: number(words.next(), "py")?,
            },
            "move" => Command::Move {
                px: number(words.next(), "px")?,
                py: number(words.next(), "py")?,
            },
            "release" => Command::Release,
            "cancel" => Command::Cancel,
            "tick" => Command::Tick,
            "orbit" => Command::Orbit {
                d_azimuth: number(words.next(), "d_azimuth")?,
                d_polar: number(words.next(), "d_polar")?,
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{}'", other),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument '{}'", extra);
        }
        Ok(command)
    }
}

/// Whether the read loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
commands:
  nudge <dx> <dz>      move by a delta in mm
  rotate               quarter turn about Y
  reset                back to the workspace center
  preset <id>          switch tool
  presets              list tools
  mode [clamp|reject]  set or toggle the validation mode
  key <up|down|left|right|home|r|c>
  focus <canvas|text>  where key presses land
  drag <px> <py>       press on the tool at a viewport pixel
  move <px> <py>       drag to a viewport pixel
  release              end the drag
  cancel               lose pointer capture
  orbit <da> <dp>      orbit the camera (radians)
  tick                 run one frame
  status               print the placement read-out
  quit";

/// A placement session driven by console commands
pub struct ConsoleSession {
    controller: PlacementController,
    catalog: PresetCatalog,
    camera: OrbitCamera,
    keys: KeyBindings,
    focus: FocusTarget,
    measurement: MeasurementSystem,
}

impl ConsoleSession {
    /// Build a session from validated configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let workspace = config
            .workspace_geometry()
            .context("invalid workspace configuration")?;
        let catalog = config.preset_catalog().context("invalid preset list")?;
        let preset = catalog
            .require(&config.placement.initial_preset)
            .context("invalid initial preset")?
            .clone();

        let events = EventBus::with_history(EVENT_LOG_CAPACITY);
        let controller = PlacementController::with_event_bus(workspace, preset, events)?
            .with_mode(config.placement.validation_mode);

        let mut camera = OrbitCamera::for_workspace(&workspace);
        camera.update_aspect_ratio(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

        info!(
            "Console session on {} x {} mm workspace, preset {}",
            workspace.width(),
            workspace.depth(),
            controller.active_preset().id
        );

        Ok(Self {
            controller,
            catalog,
            camera,
            keys: KeyBindings::new(config.placement.nudge_step),
            focus: FocusTarget::Canvas,
            measurement: config.measurement_system,
        })
    }

    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Run one command, writing its output and any observed events
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<Flow> {
        debug!("Executing {:?}", command);
        let show_status = !matches!(command, Command::Help | Command::Presets);
        match command {
            Command::Nudge { dx, dz } => self.controller.nudge(dx, dz),
            Command::Rotate => self.controller.rotate_quarter_turn(),
            Command::Reset => self.controller.reset_to_initial_center(),
            Command::Preset(id) => {
                let preset = self.catalog.require(&id)?.clone();
                self.controller.switch_preset(preset)?;
            }
            Command::Mode(mode) => {
                self.controller.set_validation_mode(mode);
            }
            Command::ToggleMode => {
                self.controller.toggle_validation_mode();
            }
            Command::Presets => self.write_presets(out)?,
            Command::Status => {}
            Command::Key(key) => match self.keys.map(key, self.focus) {
                Some(cmd) => self.controller.apply_command(cmd),
                None => writeln!(out, "key ignored")?,
            },
            Command::Focus(focus) => self.focus = focus,
            Command::Drag { px, py } => {
                let ray = self
                    .camera
                    .ray_from_pixel(px, py, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
                if !self.controller.pointer_down(MOUSE, &ray) {
                    writeln!(out, "no tool under pointer")?;
                }
            }
            Command::Move { px, py } => {
                let ray = self
                    .camera
                    .ray_from_pixel(px, py, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
                if !self.controller.pointer_move(MOUSE, &ray) {
                    writeln!(out, "move ignored")?;
                }
            }
            Command::Release => {
                if !self.controller.pointer_up(MOUSE) {
                    writeln!(out, "not dragging")?;
                }
            }
            Command::Cancel => {
                if !self.controller.pointer_capture_lost() {
                    writeln!(out, "not dragging")?;
                }
            }
            Command::Tick => self.tick(),
            Command::Orbit { d_azimuth, d_polar } => {
                if self.controller.orbit_enabled() {
                    self.camera.orbit(d_azimuth, d_polar);
                    self.controller.observe_camera(&self.camera);
                } else {
                    writeln!(out, "orbit disabled while dragging")?;
                }
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        self.flush_events(out)?;
        if show_status {
            writeln!(out, "{}", self.controller.status().format(self.measurement))?;
        }
        Ok(Flow::Continue)
    }

    /// One rendered frame: watcher recompute and camera heading report
    pub fn tick(&mut self) {
        self.controller.frame_tick();
        self.controller.observe_camera(&self.camera);
    }

    /// Read commands until `quit` or end of input
    ///
    /// Bad commands are reported and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> anyhow::Result<()> {
        self.tick();
        self.flush_events(&mut out)?;
        writeln!(out, "{}", self.controller.status().format(self.measurement))?;

        for line in input.lines() {
            let line = line.context("reading command")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "error: {:#}", e)?;
                    continue;
                }
            };
            match self.execute(command, &mut out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "error: {:#}", e)?,
            }
        }
        out.flush()?;
        Ok(())
    }

    fn write_presets<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let active = self.controller.active_preset().id.as_str();
        for preset in self.catalog.iter() {
            let size = preset.size;
            writeln!(
                out,
                "{} {:<16} {:<18} {} x {} x {} {} ({})",
                if preset.id.as_str() == active { '*' } else { ' ' },
                preset.id.as_str(),
                preset.label,
                format_length(size.w, self.measurement),
                format_length(size.d, self.measurement),
                format_length(size.h, self.measurement),
                self.measurement.unit_label(),
                preset.shape
            )?;
        }
        Ok(())
    }

    fn flush_events<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        for event in self.controller.events().take_history() {
            writeln!(out, "event: {}", event.description())?;
        }
        Ok(())
    }
}
