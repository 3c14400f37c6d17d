use std::cell::RefCell;
use std::f64::consts::TAU;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;
use urbinder::{
    AnimationPipeline, Config, Exporter, JsonAnimationSource, NoOpListener, ToolpathPipeline,
};
use urbinder_camtools::Segment;
use urbinder_communication::{Connector, RobotConnection, ScriptSink};
use urbinder_core::{Error, ExportListener, Joint, MotionError, OverspeedEvent, TransportError};

#[derive(Default)]
struct Wire {
    connects: usize,
    bytes: Vec<u8>,
}

struct FakeSink(Rc<RefCell<Wire>>);

impl ScriptSink for FakeSink {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.0.borrow_mut().bytes.extend_from_slice(data);
        Ok(())
    }
}

struct FakeConnector(Rc<RefCell<Wire>>);

impl Connector for FakeConnector {
    type Sink = FakeSink;

    fn connect(&self, _host: &str, _port: u16) -> Result<FakeSink, TransportError> {
        self.0.borrow_mut().connects += 1;
        Ok(FakeSink(Rc::clone(&self.0)))
    }
}

fn fake_connection() -> (RobotConnection<FakeConnector>, Rc<RefCell<Wire>>) {
    let wire = Rc::new(RefCell::new(Wire::default()));
    let connection = RobotConnection::new(
        FakeConnector(Rc::clone(&wire)),
        Some("robot".to_string()),
        30002,
    );
    (connection, wire)
}

#[derive(Default)]
struct CountingListener {
    overspeeds: RefCell<usize>,
    programs: RefCell<Vec<usize>>,
    persisted: RefCell<usize>,
    sent: RefCell<Vec<usize>>,
}

impl ExportListener for CountingListener {
    fn on_overspeed(&self, _event: &OverspeedEvent) {
        *self.overspeeds.borrow_mut() += 1;
    }

    fn on_program_built(&self, line_count: usize) {
        self.programs.borrow_mut().push(line_count);
    }

    fn on_script_persisted(&self, _path: &Path) {
        *self.persisted.borrow_mut() += 1;
    }

    fn on_script_sent(&self, bytes: usize) {
        self.sent.borrow_mut().push(bytes);
    }
}

/// Base turns from 3.0 to -3.0 rad about Z; every other bone rests
fn wrapping_dump() -> JsonAnimationSource {
    let frame = |base: f64| {
        format!(
            r#"{{"Base": [0, 0, {}], "Shoulder": [0, 0, 0], "Elbow": [0, 0, 0],
                "Wrist1": [0, 0, 0], "Wrist2": [0, 0, 0], "Wrist3": [0, 0, 0]}}"#,
            base
        )
    };
    let json = format!(
        r#"{{"frame_start": 1, "frames": [{}, {}]}}"#,
        frame(3.0),
        frame(-3.0)
    );
    JsonAnimationSource::from_json_str(&json).unwrap()
}

fn animation_config() -> Config {
    let mut config = Config::default();
    config.animation.frame_start = 1;
    config.animation.frame_end = 3;
    config.animation.fps = 30.0;
    config
}

#[test]
fn test_animation_export_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut config = animation_config();
    config.export.script_log = Some(dir.path().join("logs").join("export.urscript"));
    config.export.trace_json = Some(dir.path().join("export.json"));

    let listener = CountingListener::default();
    let export = AnimationPipeline::new(&config, &listener)
        .run(&wrapping_dump())
        .unwrap();

    let base = export.trace.joint_series(Joint::Base);
    assert!((base[1] - (-3.0 + TAU)).abs() < 1e-12);
    assert_eq!(*listener.overspeeds.borrow(), 1);

    let (mut connection, wire) = fake_connection();
    let sent = Exporter::new(&config.export, &listener)
        .export(&export.program, Some(&export.trace), &mut connection)
        .unwrap();

    let text = String::from_utf8(wire.borrow().bytes.clone()).unwrap();
    assert_eq!(text, export.program.as_str());
    assert_eq!(sent, text.len());
    assert!(text.contains("3.28319,"));

    let logged = std::fs::read_to_string(dir.path().join("logs").join("export.urscript")).unwrap();
    assert_eq!(logged, text);

    let trace: Vec<Vec<f64>> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("export.json")).unwrap())
            .unwrap();
    assert_eq!(trace.len(), 2);
    assert_eq!(trace[0].len(), 6);

    assert_eq!(listener.programs.borrow().as_slice(), &[5]);
    assert_eq!(*listener.persisted.borrow(), 1);
    assert_eq!(listener.sent.borrow().as_slice(), &[sent]);
}

#[test]
fn test_overspeed_sends_nothing() {
    let mut config = animation_config();
    // A limit this low turns every step into an overspeed
    config.motion.speed_limit_deg_per_sec = 0.001;
    config.motion.corrected_joints = Joint::ALL.to_vec();

    // Shoulder moves without changing sign
    let json = r#"{"frame_start": 1, "frames": [
        {"Base": [0,0,0], "Shoulder": [0,0.1,0], "Elbow": [0,0,0], "Wrist1": [0,0,0], "Wrist2": [0,0,0], "Wrist3": [0,0,0]},
        {"Base": [0,0,0], "Shoulder": [0,0.2,0], "Elbow": [0,0,0], "Wrist1": [0,0,0], "Wrist2": [0,0,0], "Wrist3": [0,0,0]}
    ]}"#;
    let source = JsonAnimationSource::from_json_str(json).unwrap();

    let err = AnimationPipeline::new(&config, &NoOpListener)
        .run(&source)
        .unwrap_err();
    assert!(err.is_overspeed());
    match err {
        Error::Motion(MotionError::Overspeed(overspeed)) => {
            assert_eq!(overspeed.joint, Joint::Shoulder);
            assert_eq!(overspeed.frame, 2);
        }
        other => panic!("expected overspeed, got {:?}", other),
    }
}

#[test]
fn test_missing_joint_aborts_export() {
    let config = animation_config();
    let json = r#"{"frame_start": 1, "frames": [
        {"Base": [0,0,0], "Shoulder": [0,0,0], "Elbow": [0,0,0], "Wrist1": [0,0,0], "Wrist2": [0,0,0], "Wrist3": [0,0,0]},
        {"Base": [0,0,0], "Shoulder": [0,0,0], "Elbow": [0,0,0], "Wrist1": [0,0,0], "Wrist2": [0,0,0]}
    ]}"#;
    let source = JsonAnimationSource::from_json_str(json).unwrap();

    let err = AnimationPipeline::new(&config, &NoOpListener)
        .run(&source)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Motion(MotionError::MissingJoint { ref joint, frame: 2 }) if joint == "Wrist3"
    ));
}

#[test]
fn test_failed_log_write_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let mut config = Config::default();
    config.export.script_log = Some(blocker.join("export.urscript"));

    let segments = [Segment::new([0.0, 0.0, 0.0].into(), [1.0, 0.0, 0.0].into())];
    let export = ToolpathPipeline::new(&config, &NoOpListener)
        .run(&segments)
        .unwrap();

    let (mut connection, wire) = fake_connection();
    let result = Exporter::new(&config.export, &NoOpListener).export(
        &export.program,
        None,
        &mut connection,
    );

    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(wire.borrow().connects, 0);
    assert!(wire.borrow().bytes.is_empty());
}

#[test]
fn test_toolpath_export_sends_cleaned_program() {
    let config = Config::default();
    let segments: Vec<Segment> = serde_json::from_str(
        "[[[0,0,0],[0.1,0,0]], [[0.5,0.5,0],[0.6,0.5,0]], [[0.1,0,0],[0.1,0.1,0]]]",
    )
    .unwrap();

    let export = ToolpathPipeline::new(&config, &NoOpListener)
        .run(&segments)
        .unwrap();
    assert_eq!(export.polylines.len(), 2);
    assert_eq!(export.toolpath.len(), 3 + 2 + 2 * 2);

    let (mut connection, wire) = fake_connection();
    Exporter::new(&config.export, &NoOpListener)
        .send(&export.program, &mut connection)
        .unwrap();

    let text = String::from_utf8(wire.borrow().bytes.clone()).unwrap();
    assert!(text.starts_with("def draw_toolpath():\n"));
    assert!(text.ends_with("end\n"));
    assert_eq!(text.matches("set_tool_digital_out(0, True)").count(), 2);
    assert_eq!(text.matches("set_tool_digital_out(0, False)").count(), 3);
}

#[test]
fn test_unconfigured_host_is_reported() {
    let config = Config::default();
    let export = ToolpathPipeline::new(&config, &NoOpListener)
        .run(&[])
        .unwrap();

    let wire = Rc::new(RefCell::new(Wire::default()));
    let mut connection = RobotConnection::new(FakeConnector(Rc::clone(&wire)), None, 30002);

    let err = Exporter::new(&config.export, &NoOpListener)
        .send(&export.program, &mut connection)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::HostNotConfigured)
    ));
}
