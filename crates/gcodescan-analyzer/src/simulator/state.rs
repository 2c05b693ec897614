//! Machine state replayed by the interpreter

use gcodescan_core::{Axis, LengthUnit, Vector3D};

/// Extrusion bookkeeping of one tool
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToolExtrusion {
    /// Last commanded E position, before flow scaling
    pub current: f64,
    /// Cumulative extrusion after flow scaling, retractions excluded
    pub total: f64,
    /// Highest value `total` has reached
    pub max: f64,
}

impl ToolExtrusion {
    /// Account for a filament movement of `delta` mm
    ///
    /// Only forward movement counts: `current` advances by the raw delta,
    /// `total` and `max` by the delta scaled by `flow`. A retraction leaves
    /// the record untouched. Returns the scaled delta either way.
    pub fn extrude(&mut self, delta: f64, flow: f64) -> f64 {
        let effective = delta * flow;
        if effective > 0.0 {
            self.current += delta;
            self.total += effective;
            self.max = self.max.max(self.total);
        }
        effective
    }
}

/// Per-tool extrusion records, indexed by tool number
///
/// Starts with tool 0 and only ever grows.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolTable {
    tools: Vec<ToolExtrusion>,
}

impl Default for ToolTable {
    fn default() -> Self {
        Self {
            tools: vec![ToolExtrusion::default()],
        }
    }
}

impl ToolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a record exists for `tool` and every tool below it
    pub fn ensure_tool(&mut self, tool: usize) -> &mut ToolExtrusion {
        if self.tools.len() <= tool {
            self.tools.resize(tool + 1, ToolExtrusion::default());
        }
        &mut self.tools[tool]
    }

    pub fn get(&self, tool: usize) -> Option<&ToolExtrusion> {
        self.tools.get(tool)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolExtrusion> {
        self.tools.iter()
    }
}

/// Firmware retraction timing, set by M207/M208 and spent by G10/G11
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FirmwareRetract {
    /// Minutes spent by one G10
    pub retract_time: f64,
    /// Retract length, in mm
    pub distance: f64,
    /// Minutes spent by one G11
    pub recover_time: f64,
}

/// Everything the interpreter tracks between lines
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    /// Machine position, offsets and unit scale applied
    pub position: Vector3D,
    /// Offset between program and machine coordinates
    pub offset: Vector3D,
    pub tools: ToolTable,
    pub active_tool: usize,
    pub absolute_positioning: bool,
    pub absolute_extrusion: bool,
    pub unit: LengthUnit,
    /// Feedrate in mm/min, scaled by the override in force when it was set
    pub feedrate: f64,
    pub feedrate_multiplier: f64,
    pub flowrate_multiplier: f64,
    pub retract: FirmwareRetract,
    /// Estimated time so far, in minutes
    pub total_time: f64,
}

impl MachineState {
    /// Fresh state: at the origin, tool 0, absolute modes, millimeters
    pub fn new(feedrate: f64) -> Self {
        Self {
            position: Vector3D::ZERO,
            offset: Vector3D::ZERO,
            tools: ToolTable::new(),
            active_tool: 0,
            absolute_positioning: true,
            absolute_extrusion: true,
            unit: LengthUnit::Millimeters,
            feedrate,
            feedrate_multiplier: 1.0,
            flowrate_multiplier: 1.0,
            retract: FirmwareRetract::default(),
            total_time: 0.0,
        }
    }

    /// Unit scale factor to millimeters
    pub fn scale(&self) -> f64 {
        self.unit.scale()
    }

    /// Machine position a move to the given program coordinates ends at
    ///
    /// Absolute mode maps every given axis through scale and offset and
    /// leaves the others where they are. Relative mode adds the scaled
    /// values, missing axes moving by zero.
    pub fn resolve_target(&self, words: [Option<f64>; 3]) -> Vector3D {
        let scale = self.scale();
        Axis::ALL
            .into_iter()
            .zip(words)
            .fold(self.position, |target, (axis, value)| match value {
                Some(v) if self.absolute_positioning => {
                    target.with(axis, v * scale + self.offset.get(axis))
                }
                Some(v) => target.with(axis, self.position.get(axis) + v * scale),
                None => target,
            })
    }

    /// Raw filament movement commanded by an E word
    pub fn extrusion_delta(&self, e: f64) -> f64 {
        if self.absolute_extrusion {
            e - self.active().current
        } else {
            e
        }
    }

    /// Extrusion record of the active tool
    pub fn active(&self) -> ToolExtrusion {
        self.tools.get(self.active_tool).copied().unwrap_or_default()
    }

    pub fn active_mut(&mut self) -> &mut ToolExtrusion {
        self.tools.ensure_tool(self.active_tool)
    }

    /// Add `minutes` to the time estimate
    pub fn spend(&mut self, minutes: f64) {
        self.total_time += minutes;
    }
}
