//! Summary of a completed scan

use gcodescan_core::units::{filament_cross_section, MM3_PER_CM3};
use gcodescan_core::{format_minutes, MinMax3D};
use serde::{Deserialize, Serialize};

use crate::simulator::ToolTable;

/// Extent of the extruded part, in mm
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

/// Corners of the extruded part, unset when nothing was extruded
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintingArea {
    pub min_x: Option<f64>,
    pub min_y: Option<f64>,
    pub min_z: Option<f64>,
    pub max_x: Option<f64>,
    pub max_y: Option<f64>,
    pub max_z: Option<f64>,
}

impl PrintingArea {
    /// Whether any extruding move was seen
    pub fn is_set(&self) -> bool {
        self.min_x.is_some()
    }
}

impl From<&MinMax3D> for PrintingArea {
    fn from(bounds: &MinMax3D) -> Self {
        let min = bounds.min();
        let max = bounds.max();
        Self {
            min_x: min.map(|v| v.x),
            min_y: min.map(|v| v.y),
            min_z: min.map(|v| v.z),
            max_x: max.map(|v| v.x),
            max_y: max.map(|v| v.y),
            max_z: max.map(|v| v.z),
        }
    }
}

/// Metrics of an analyzed program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub dimensions: Dimensions,
    pub printing_area: PrintingArea,
    /// Filament length per tool, in mm
    pub extrusion_length: Vec<f64>,
    /// Filament volume per tool, in cm³
    pub extrusion_volume: Vec<f64>,
    /// Estimated print time, in minutes
    pub total_time: f64,
    /// Filament diameter declared by the program, in mm (0 if none)
    pub filament_diameter: f64,
}

impl AnalysisResult {
    /// Aggregate the final machine state
    ///
    /// Each tool's length is the highest cumulative extrusion it reached;
    /// retractions never lower it.
    pub fn from_scan(
        bounds: &MinMax3D,
        tools: &ToolTable,
        total_time: f64,
        filament_diameter: f64,
    ) -> Self {
        let size = bounds.size();
        let extrusion_length: Vec<f64> = tools.iter().map(|tool| tool.max).collect();
        let cross_section = filament_cross_section(filament_diameter);
        let extrusion_volume = extrusion_length
            .iter()
            .map(|length| length * cross_section / MM3_PER_CM3)
            .collect();

        Self {
            dimensions: Dimensions {
                width: size.x,
                depth: size.y,
                height: size.z,
            },
            printing_area: PrintingArea::from(bounds),
            extrusion_length,
            extrusion_volume,
            total_time,
            filament_diameter,
        }
    }

    /// Filament length summed over all tools, in mm
    pub fn total_extrusion_length(&self) -> f64 {
        self.extrusion_length.iter().sum()
    }

    /// Filament volume summed over all tools, in cm³
    pub fn total_extrusion_volume(&self) -> f64 {
        self.extrusion_volume.iter().sum()
    }

    /// Estimated print time as `HH:MM:SS`
    pub fn formatted_time(&self) -> String {
        format_minutes(self.total_time)
    }
}
