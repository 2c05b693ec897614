//! Line interpreter
//!
//! Replays one program line at a time against a [`MachineState`],
//! recording the extent of extruding moves and the estimated time.

use gcodescan_core::{Axis, MinMax3D, Vector3D};
use gcodescan_settings::{Config, ExtruderSettings};
use tracing::{debug, trace, warn};

use super::arc::{ArcPath, ArcSettings};
use super::state::MachineState;
use crate::gcode::{code_float, metadata, split_comment, AxisWords, Command};
use crate::result::AnalysisResult;

/// Replays program lines against a simulated machine
#[derive(Debug, Clone)]
pub struct Interpreter {
    state: MachineState,
    bounds: MinMax3D,
    filament_diameter: f64,
    extruder: ExtruderSettings,
    max_extruders: u32,
    arc: ArcSettings,
}

impl Interpreter {
    /// Create an interpreter for the printer described by `config`
    pub fn new(config: &Config) -> Self {
        Self {
            state: MachineState::new(config.profile.default_feedrate()),
            bounds: MinMax3D::new(),
            filament_diameter: 0.0,
            extruder: config.profile.extruder.clone(),
            max_extruders: config.analysis.max_extruders,
            arc: ArcSettings {
                mm_per_arc_segment: config.analysis.mm_per_arc_segment,
                correction_interval: config.analysis.arc_correction_interval,
            },
        }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Extent of all extruding moves so far
    pub fn bounds(&self) -> &MinMax3D {
        &self.bounds
    }

    pub fn filament_diameter(&self) -> f64 {
        self.filament_diameter
    }

    /// Interpret one line, terminator already stripped
    pub fn process_line(&mut self, line: &str) {
        let (code, comment) = split_comment(line);
        if let Some(diameter) = comment.and_then(metadata::filament_diameter) {
            debug!(diameter, "Filament diameter declared");
            self.filament_diameter = diameter;
        }

        let Some(command) = Command::parse(code) else {
            return;
        };

        match command {
            Command::LinearMove => self.linear_move(code),
            Command::ArcMove { clockwise } => self.arc_move(code, clockwise),
            Command::Dwell => self.dwell(code),
            Command::FirmwareRetract => {
                let minutes = self.state.retract.retract_time;
                self.state.spend(minutes);
            }
            Command::FirmwareRecover => {
                let minutes = self.state.retract.recover_time;
                self.state.spend(minutes);
            }
            Command::SetUnits(unit) => self.state.unit = unit,
            Command::Home => self.home(code),
            Command::AbsolutePositioning => self.state.absolute_positioning = true,
            Command::RelativePositioning => self.state.absolute_positioning = false,
            Command::SetPosition => self.set_position(code),
            Command::AbsoluteExtrusion => self.state.absolute_extrusion = true,
            Command::RelativeExtrusion => self.state.absolute_extrusion = false,
            Command::RetractSettings => self.retract_settings(code),
            Command::RecoverSettings => self.recover_settings(code),
            Command::FeedrateOverride => {
                if let Some(multiplier) = override_multiplier(code) {
                    self.state.feedrate_multiplier = multiplier;
                }
            }
            Command::FlowrateOverride => {
                if let Some(multiplier) = override_multiplier(code) {
                    self.state.flowrate_multiplier = multiplier;
                }
            }
            Command::SelectTool(tool) => self.select_tool(tool),
            Command::Ignored(family) => trace!(command = %family, "Command not simulated"),
        }
    }

    /// Aggregate the replayed program into its summary
    pub fn finish(self) -> AnalysisResult {
        debug!(
            tools = self.state.tools.len(),
            total_time = self.state.total_time,
            "Interpretation finished"
        );
        AnalysisResult::from_scan(
            &self.bounds,
            &self.state.tools,
            self.state.total_time,
            self.filament_diameter,
        )
    }

    fn update_feedrate(&mut self, line: &str) {
        if let Some(feedrate) = code_float(line, 'F').filter(|f| *f != 0.0) {
            self.state.feedrate = feedrate * self.state.feedrate_multiplier;
        }
    }

    fn linear_move(&mut self, line: &str) {
        let words = AxisWords::parse(line);
        let target = self.state.resolve_target([words.x, words.y, words.z]);
        self.update_feedrate(line);
        let delta = code_float(line, 'E').map(|e| self.state.extrusion_delta(e));
        self.move_to(target, delta);
    }

    fn arc_move(&mut self, line: &str, clockwise: bool) {
        let words = AxisWords::parse(line);
        let target = self.state.resolve_target([words.x, words.y, words.z]);
        let scale = self.state.scale();
        let center_offset = (
            code_float(line, 'I').unwrap_or(0.0) * scale,
            code_float(line, 'J').unwrap_or(0.0) * scale,
        );
        self.update_feedrate(line);
        let delta = code_float(line, 'E').map(|e| self.state.extrusion_delta(e));

        let Some(path) =
            ArcPath::plan(self.state.position, target, center_offset, clockwise, self.arc)
        else {
            // E still moves, so later absolute E words stay relative to it
            if let Some(delta) = delta.filter(|d| *d > 0.0) {
                self.state.active_mut().current += delta;
            }
            return;
        };

        let segment_delta = delta.map(|d| d / f64::from(path.segments()));
        for point in path {
            self.move_to(point, segment_delta);
        }
    }

    /// Move to `target` (machine coordinates), pushing `delta` mm of filament
    fn move_to(&mut self, target: Vector3D, delta: Option<f64>) {
        let distance = (target - self.state.position).length();
        self.state.position = target;

        let extruded = match delta {
            Some(delta) => {
                let flow = self.state.flowrate_multiplier;
                let extruded = self.state.active_mut().extrude(delta, flow);
                if extruded > 0.0 {
                    self.bounds.record(target);
                }
                extruded
            }
            None => 0.0,
        };

        let feedrate = self.state.feedrate;
        if feedrate != 0.0 {
            self.state.spend((distance.max(extruded.abs()) / feedrate).abs());
        }
    }

    fn dwell(&mut self, line: &str) {
        if let Some(seconds) = code_float(line, 'S') {
            self.state.spend(seconds / 60.0);
        }
        if let Some(millis) = code_float(line, 'P') {
            self.state.spend(millis / 60.0 / 1000.0);
        }
    }

    fn home(&mut self, line: &str) {
        let words = AxisWords::parse(line);
        self.state.position = if words.is_empty() {
            Vector3D::ZERO
        } else {
            AxisWords {
                x: words.x.map(|_| 0.0),
                y: words.y.map(|_| 0.0),
                z: words.z.map(|_| 0.0),
            }
            .or(self.state.position)
        };
    }

    fn set_position(&mut self, line: &str) {
        let words = AxisWords::parse(line);
        let scale = self.state.scale();
        for axis in Axis::ALL {
            if let Some(value) = words.get(axis) {
                let offset = self.state.position.get(axis) - value * scale;
                self.state.offset = self.state.offset.with(axis, offset);
            }
        }

        if let Some(e) = code_float(line, 'E') {
            self.state.active_mut().current = e;
        }
    }

    fn retract_settings(&mut self, line: &str) {
        if let Some((distance, feedrate)) = retract_words(line) {
            self.state.retract.retract_time = distance / feedrate;
            self.state.retract.distance = distance;
        }
    }

    fn recover_settings(&mut self, line: &str) {
        if let Some((extra, feedrate)) = retract_words(line) {
            self.state.retract.recover_time = (self.state.retract.distance + extra) / feedrate;
        }
    }

    fn select_tool(&mut self, tool: i64) {
        let index = match usize::try_from(tool) {
            Ok(index) if tool <= i64::from(self.max_extruders) => index,
            _ => {
                warn!(
                    tool,
                    max_extruders = self.max_extruders,
                    "Program selects an implausible tool, ignoring it"
                );
                return;
            }
        };

        let (old_x, old_y) = self.extruder.offset(self.state.active_tool);
        let (new_x, new_y) = self.extruder.offset(index);
        self.state.offset = self.state.offset - Vector3D::new(old_x, old_y, 0.0)
            + Vector3D::new(new_x, new_y, 0.0);
        self.state.active_tool = index;
        self.state.tools.ensure_tool(index);
    }
}

/// S and F words of M207/M208, when both are present and F is usable
fn retract_words(line: &str) -> Option<(f64, f64)> {
    let distance = code_float(line, 'S')?;
    let feedrate = code_float(line, 'F').filter(|f| *f != 0.0)?;
    Some((distance, feedrate))
}

/// S word of M220/M221 as a multiplier
fn override_multiplier(line: &str) -> Option<f64> {
    code_float(line, 'S')
        .filter(|percent| *percent > 0.0)
        .map(|percent| percent / 100.0)
}
