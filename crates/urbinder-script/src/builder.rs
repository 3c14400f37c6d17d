//! Motion program builder.
//!
//! Programs are assembled as a flat list of lines. The builder tracks how
//! many `def`/`while` blocks are open and indents each line by that depth;
//! indentation is only ever derived from the counter, never read back.
//!
//! ```text
//! def blender_move():
//! 	movej([0.00000,...], 1.40000, 1.05000, 0.00000, 0.00000)
//! 	while True:
//! 		servoj([0.00000,...], 0.00000, 0.00000, 0.04167, 0.10000, 300.00000)
//! 	end
//! end
//! ```

use crate::formatter::{format_array, format_number};
use crate::params::{MoveParameters, Pose, ServoParameters};
use std::fmt;
use urbinder_core::{ProgramError, JOINT_COUNT};

const INDENT: char = '\t';

/// Push-only builder for a motion program
#[derive(Debug, Default, Clone)]
pub struct MotionProgramBuilder {
    lines: Vec<String>,
    depth: usize,
}

impl MotionProgramBuilder {
    /// Creates an empty program at depth 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Current block depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of lines emitted so far
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Opens a function block: `def name(arg, ...):`
    pub fn open_function(&mut self, name: &str, args: &[&str]) {
        self.add_line(&format!("def {}({}):", name, args.join(", ")));
        self.depth += 1;
    }

    /// Opens a loop block: `while condition:`
    pub fn open_while(&mut self, condition: &str) {
        self.add_line(&format!("while {}:", condition));
        self.depth += 1;
    }

    /// Closes the innermost open block with an `end` line aligned to its header
    pub fn close_block(&mut self) -> Result<(), ProgramError> {
        if self.depth == 0 {
            return Err(ProgramError::BlockMismatch);
        }

        self.depth -= 1;
        self.add_line("end");
        Ok(())
    }

    /// Emits a point-to-point joint move
    pub fn emit_move(
        &mut self,
        angles: &[f64],
        params: &MoveParameters,
    ) -> Result<(), ProgramError> {
        check_arity(angles)?;

        self.add_line(&format!(
            "movej({}, {}, {}, {}, {})",
            format_array(angles),
            format_number(params.acceleration),
            format_number(params.velocity),
            format_number(params.blend_time),
            format_number(params.blend_radius)
        ));
        Ok(())
    }

    /// Emits a streamed servo joint move.
    ///
    /// Acceleration and velocity are written as zero placeholders; the
    /// controller ignores both in servo mode.
    pub fn emit_servo(
        &mut self,
        angles: &[f64],
        params: &ServoParameters,
    ) -> Result<(), ProgramError> {
        check_arity(angles)?;

        let acceleration = 0.0;
        let velocity = 0.0;

        self.add_line(&format!(
            "servoj({}, {}, {}, {}, {}, {})",
            format_array(angles),
            format_number(acceleration),
            format_number(velocity),
            format_number(params.time_step),
            format_number(params.lookahead_time),
            format_number(params.gain)
        ));
        Ok(())
    }

    /// Emits a linear move of the tool to `pose`
    pub fn emit_linear_move(&mut self, pose: &Pose, params: &MoveParameters) {
        let components = pose.components();
        let items: Vec<String> = components.iter().map(|v| format_number(*v)).collect();

        self.add_line(&format!(
            "movel(p[{}], {}, {}, {}, {})",
            items.join(","),
            format_number(params.acceleration),
            format_number(params.velocity),
            format_number(params.blend_time),
            format_number(params.blend_radius)
        ));
    }

    /// Emits a tool digital output change
    pub fn emit_digital_out(&mut self, index: u32, state: bool) {
        let state = if state { "True" } else { "False" };
        self.add_line(&format!("set_tool_digital_out({}, {})", index, state));
    }

    /// Finishes the program. Fails if any block is still open.
    pub fn finalize(self) -> Result<MotionProgram, ProgramError> {
        if self.depth != 0 {
            return Err(ProgramError::UnbalancedBlock { depth: self.depth });
        }

        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }

        tracing::debug!("Finalized motion program: {} lines", self.lines.len());

        Ok(MotionProgram {
            text,
            line_count: self.lines.len(),
        })
    }

    fn add_line(&mut self, statement: &str) {
        let mut line = String::with_capacity(self.depth + statement.len());
        line.extend(std::iter::repeat(INDENT).take(self.depth));
        line.push_str(statement.trim());
        self.lines.push(line);
    }
}

fn check_arity(angles: &[f64]) -> Result<(), ProgramError> {
    if angles.len() != JOINT_COUNT {
        return Err(ProgramError::arity(angles.len()));
    }
    Ok(())
}

/// A finished, block-balanced motion program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionProgram {
    text: String,
    line_count: usize,
}

impl MotionProgram {
    /// Program text, newline terminated
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Program lines without terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Size of the program text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for MotionProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for MotionProgram {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
