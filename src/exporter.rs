//! Export delivery.
//!
//! Everything that can fail locally happens before the controller is
//! contacted: the trace and the program text are written first, and a
//! failed write stops the export with nothing sent.

use std::path::Path;
use urbinder_communication::{Connector, RobotConnection};
use urbinder_core::{ExportListener, Result};
use urbinder_motion::AngleTrace;
use urbinder_script::MotionProgram;
use urbinder_settings::ExportSettings;

pub struct Exporter<'a> {
    settings: &'a ExportSettings,
    listener: &'a dyn ExportListener,
}

impl<'a> Exporter<'a> {
    pub fn new(settings: &'a ExportSettings, listener: &'a dyn ExportListener) -> Self {
        Self { settings, listener }
    }

    /// Write the configured copies of the program and trace
    pub fn persist(&self, program: &MotionProgram, trace: Option<&AngleTrace>) -> Result<()> {
        if let (Some(path), Some(trace)) = (&self.settings.trace_json, trace) {
            create_parent(path)?;
            trace.write_json(path)?;
        }

        if let Some(path) = &self.settings.script_log {
            create_parent(path)?;
            std::fs::write(path, program.as_str())?;
            self.listener.on_script_persisted(path);
        }

        Ok(())
    }

    /// Hand the program to the controller. Returns the bytes written.
    pub fn send<C: Connector>(
        &self,
        program: &MotionProgram,
        connection: &mut RobotConnection<C>,
    ) -> Result<usize> {
        let bytes = connection.send_script(program.as_str())?;
        self.listener.on_script_sent(bytes);
        Ok(bytes)
    }

    /// [`Self::persist`] then [`Self::send`]
    pub fn export<C: Connector>(
        &self,
        program: &MotionProgram,
        trace: Option<&AngleTrace>,
        connection: &mut RobotConnection<C>,
    ) -> Result<usize> {
        self.persist(program, trace)?;
        self.send(program, connection)
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
