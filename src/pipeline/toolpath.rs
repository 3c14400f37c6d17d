use urbinder_camtools::{
    Polyline, Segment, SegmentStitcher, Toolpath, ToolpathBuilder, WaypointKind,
};
use urbinder_core::{ExportListener, Point3, Result};
use urbinder_script::{MotionProgram, MotionProgramBuilder, MoveParameters, Pose};
use urbinder_settings::Config;

/// Result of a toolpath export
#[derive(Debug, Clone)]
pub struct ToolpathExport {
    pub polylines: Vec<Polyline>,
    pub toolpath: Toolpath,
    pub program: MotionProgram,
}

/// Mesh edges to a linear-move drawing program.
///
/// The tool output is switched on once the tool reaches the first point of
/// a polyline and off before it lifts away from the last one.
pub struct ToolpathPipeline<'a> {
    config: &'a Config,
    stitcher: SegmentStitcher,
    builder: ToolpathBuilder,
    listener: &'a dyn ExportListener,
}

impl<'a> ToolpathPipeline<'a> {
    pub fn new(config: &'a Config, listener: &'a dyn ExportListener) -> Self {
        let toolpath = &config.toolpath;
        Self {
            config,
            stitcher: SegmentStitcher::new(toolpath.tolerance),
            builder: ToolpathBuilder::new(Point3::from(toolpath.lift_clearance)),
            listener,
        }
    }

    /// Stitch segments and wrap each polyline in lift moves
    pub fn plan(&self, segments: &[Segment]) -> (Vec<Polyline>, Toolpath) {
        let polylines = self.stitcher.stitch(segments);
        let toolpath = self.builder.build(&polylines);
        tracing::info!(
            "Planned {} polylines ({} waypoints) from {} segments",
            polylines.len(),
            toolpath.len(),
            segments.len()
        );
        (polylines, toolpath)
    }

    pub fn build_program(&self, toolpath: &Toolpath) -> Result<MotionProgram> {
        let settings = &self.config.toolpath;
        let params = MoveParameters::linear().with_speed(settings.acceleration, settings.velocity);

        let mut builder = MotionProgramBuilder::new();
        builder.open_function(&settings.function_name, &[]);
        builder.emit_digital_out(settings.tool_output, false);

        let mut tool_on = false;
        for waypoint in toolpath.waypoints() {
            let pose = Pose::new(waypoint.position, settings.tool_orientation);
            match waypoint.kind {
                WaypointKind::Lift => {
                    if tool_on {
                        builder.emit_digital_out(settings.tool_output, false);
                        tool_on = false;
                    }
                    builder.emit_linear_move(&pose, &params);
                }
                WaypointKind::Contact => {
                    builder.emit_linear_move(&pose, &params);
                    if !tool_on {
                        builder.emit_digital_out(settings.tool_output, true);
                        tool_on = true;
                    }
                }
            }
        }

        builder.close_block()?;

        let program = builder.finalize()?;
        self.listener.on_program_built(program.line_count());
        Ok(program)
    }

    pub fn run(&self, segments: &[Segment]) -> Result<ToolpathExport> {
        let (polylines, toolpath) = self.plan(segments);
        let program = self.build_program(&toolpath)?;
        Ok(ToolpathExport {
            polylines,
            toolpath,
            program,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urbinder_core::NoOpListener;

    #[test]
    fn test_tool_switching_around_polyline() {
        let config = Config::default();
        let segments = [Segment::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        )];

        let export = ToolpathPipeline::new(&config, &NoOpListener)
            .run(&segments)
            .unwrap();
        let lines: Vec<&str> = export.program.lines().collect();

        assert_eq!(
            lines,
            vec![
                "def draw_toolpath():",
                "\tset_tool_digital_out(0, False)",
                "\tmovel(p[0.00000,0.00000,0.50000,0.00000,3.14159,0.00000], 1.20000, 0.25000, 0.00000, 0.00000)",
                "\tmovel(p[0.00000,0.00000,0.00000,0.00000,3.14159,0.00000], 1.20000, 0.25000, 0.00000, 0.00000)",
                "\tset_tool_digital_out(0, True)",
                "\tmovel(p[1.00000,0.00000,0.00000,0.00000,3.14159,0.00000], 1.20000, 0.25000, 0.00000, 0.00000)",
                "\tset_tool_digital_out(0, False)",
                "\tmovel(p[1.00000,0.00000,0.50000,0.00000,3.14159,0.00000], 1.20000, 0.25000, 0.00000, 0.00000)",
                "end",
            ]
        );
    }

    #[test]
    fn test_empty_drawing_keeps_tool_off() {
        let config = Config::default();
        let export = ToolpathPipeline::new(&config, &NoOpListener)
            .run(&[])
            .unwrap();

        assert_eq!(
            export.program.as_str(),
            "def draw_toolpath():\n\tset_tool_digital_out(0, False)\nend\n"
        );
    }
}
