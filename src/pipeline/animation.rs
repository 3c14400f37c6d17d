use std::ops::Range;
use urbinder_core::{ExportListener, MotionError, Result};
use urbinder_motion::{AngleTrace, AnimationSource, JointAngleConverter, OverrotationCorrector};
use urbinder_script::{MotionProgram, MotionProgramBuilder, MoveParameters, ServoParameters};
use urbinder_settings::Config;

/// Result of an animation export
#[derive(Debug, Clone)]
pub struct AnimationExport {
    /// Corrected joint angles, one entry per frame
    pub trace: AngleTrace,
    pub program: MotionProgram,
}

/// Armature animation to a streamed joint program.
///
/// The program moves to the first frame with a joint move, then servos
/// through every frame at the scene frame rate, optionally forever.
pub struct AnimationPipeline<'a> {
    config: &'a Config,
    converter: JointAngleConverter,
    corrector: OverrotationCorrector,
    listener: &'a dyn ExportListener,
}

impl<'a> AnimationPipeline<'a> {
    pub fn new(config: &'a Config, listener: &'a dyn ExportListener) -> Self {
        let motion = &config.motion;
        let corrector =
            OverrotationCorrector::new(motion.speed_limit_rad_per_sec(), motion.safety_margin)
                .with_residual_check(motion.reject_residual_overspeed);

        Self {
            config,
            converter: JointAngleConverter::default(),
            corrector,
            listener,
        }
    }

    /// Use a different bone-to-joint mapping
    pub fn with_converter(mut self, converter: JointAngleConverter) -> Self {
        self.converter = converter;
        self
    }

    pub fn frame_range(&self) -> Range<i64> {
        self.config.animation.frame_range()
    }

    /// Sample the render range and correct angle wraps
    pub fn sample(&self, source: &dyn AnimationSource) -> Result<AngleTrace> {
        let fps = self.fps()?;
        let raw = self.converter.convert_frames(source, self.frame_range())?;

        let trace = self.corrector.correct_trace(
            &raw,
            &self.config.motion.corrected_joints,
            fps,
            self.listener,
        )?;

        tracing::debug!(
            "Sampled {} frames starting at {}",
            trace.len(),
            trace.frame_start()
        );
        Ok(trace)
    }

    /// Turn a corrected trace into program text
    pub fn build_program(&self, trace: &AngleTrace) -> Result<MotionProgram> {
        let fps = self.fps()?;
        let animation = &self.config.animation;
        let motion = &self.config.motion;

        let first = trace.first().ok_or(MotionError::EmptyTrace {
            frame_start: animation.frame_start,
            frame_end: animation.frame_end,
        })?;

        let approach = MoveParameters::joint().with_speed(motion.acceleration, motion.velocity);
        let servo = ServoParameters::for_frame_rate(fps, animation.lookahead_time, animation.gain);

        let mut builder = MotionProgramBuilder::new();
        builder.open_function(&animation.function_name, &[]);
        builder.emit_move(first.as_slice(), &approach)?;

        if animation.loop_animation {
            builder.open_while("True");
        }

        for angles in trace.frames() {
            builder.emit_servo(angles.as_slice(), &servo)?;
        }

        if animation.loop_animation {
            builder.close_block()?;
        }
        builder.close_block()?;

        let program = builder.finalize()?;
        self.listener.on_program_built(program.line_count());
        Ok(program)
    }

    /// Sample, correct and build in one go. Nothing is built if any frame
    /// fails.
    pub fn run(&self, source: &dyn AnimationSource) -> Result<AnimationExport> {
        let trace = self.sample(source)?;
        let program = self.build_program(&trace)?;
        Ok(AnimationExport { trace, program })
    }

    fn fps(&self) -> std::result::Result<f64, MotionError> {
        let fps = self.config.animation.fps;
        if fps.is_finite() && fps > 0.0 {
            Ok(fps)
        } else {
            Err(MotionError::InvalidFrameRate { fps })
        }
    }
}
