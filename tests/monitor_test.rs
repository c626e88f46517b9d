use std::thread;

use doorcount_rs::integration::{DetectionSource, DoorPipeline};
use doorcount_rs::{
    Detection, DoorConfig, DoorTracker, MonitorConfig, NullSink, OccupancyMonitor,
    OccupancySummary, TrackerError,
};

fn monitor() -> OccupancyMonitor {
    let doors = ["Door 1", "Door 2", "Door 3"]
        .into_iter()
        .map(|name| {
            DoorTracker::new(DoorConfig {
                frame_size: Some((640, 480)),
                ..DoorConfig::new(name, 240.0)
            })
            .map(|t| t.with_sink(NullSink))
        })
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    OccupancyMonitor::from_trackers(doors).unwrap()
}

/// y positions of one person walking in through a door.
const WALK_IN: [f32; 3] = [200.0, 240.0, 280.0];
/// y positions of one person walking out.
const WALK_OUT: [f32; 3] = [280.0, 240.0, 200.0];

#[test]
fn test_summary_sums_doors() {
    let mut monitor = monitor();

    for step in 0..3 {
        monitor.process("Door 1", &[Detection::new(100.0, WALK_IN[step])]);
        monitor.process("Door 2", &[Detection::new(100.0, WALK_IN[step])]);
        monitor.process("Door 3", &[Detection::new(100.0, WALK_OUT[step])]);
    }

    let summary = monitor.summary();
    assert_eq!(summary.total_entries, 2);
    assert_eq!(summary.total_exits, 1);
    assert_eq!(summary.total_occupancy(), 1);

    let per_door = monitor.door_counters();
    assert_eq!(per_door[2].0, "Door 3");
    assert_eq!(per_door[2].1.occupancy(), -1);
}

#[test]
fn test_failing_door_does_not_affect_others() {
    let mut monitor = monitor();

    let results = monitor.process_all(|door| match door {
        "Door 2" => vec![Detection::new(9999.0, 10.0)],
        _ => vec![Detection::new(100.0, 200.0)],
    });
    assert!(results[0].1.is_ok());
    assert!(matches!(
        results[1].1,
        Err(TrackerError::InvalidDetection { .. })
    ));
    assert!(results[2].1.is_ok());

    assert_eq!(monitor.door("Door 1").unwrap().registry().len(), 1);
    assert!(monitor.door("Door 2").unwrap().registry().is_empty());
    assert_eq!(monitor.door("Door 2").unwrap().ticks(), 0);
    assert_eq!(monitor.door("Door 3").unwrap().registry().len(), 1);
}

#[test]
fn test_unknown_door() {
    let mut monitor = monitor();
    assert!(monitor.process("Back door", &[]).is_none());
    assert!(!monitor.reset("Back door"));
}

#[test]
fn test_reset_all_and_single_door() {
    let mut monitor = monitor();
    for y in WALK_IN {
        monitor.process_all(|_| vec![Detection::new(100.0, y)]);
    }
    assert_eq!(monitor.summary().total_entries, 3);

    assert!(monitor.reset("Door 1"));
    assert_eq!(monitor.summary().total_entries, 2);

    monitor.reset_all();
    assert_eq!(monitor.summary(), OccupancySummary::default());
    assert!(monitor.doors().all(|d| d.registry().is_empty()));
}

#[test]
fn test_doors_run_on_separate_threads() {
    let mut monitor = monitor();

    thread::scope(|s| {
        for (i, door) in monitor.doors_mut().iter_mut().enumerate() {
            s.spawn(move || {
                let path = if i == 1 { WALK_OUT } else { WALK_IN };
                for y in path {
                    door.update(&[Detection::new(100.0, y)]).unwrap();
                }
            });
        }
    });

    let summary = monitor.summary();
    assert_eq!(summary.total_entries, 2);
    assert_eq!(summary.total_exits, 1);
    assert_eq!(summary.total_occupancy(), 1);
}

#[test]
fn test_monitor_from_json_config() {
    let config = MonitorConfig::from_json_str(
        r#"{ "doors": [ { "name": "Lecture Hall", "line_position": 240 } ], "status_interval_ticks": 0 }"#,
    )
    .unwrap();
    let mut monitor = OccupancyMonitor::new(config).unwrap();
    for y in WALK_IN {
        monitor.process_all(|_| vec![Detection::new(320.0, y)]);
    }
    assert_eq!(monitor.door("Lecture Hall").unwrap().counter().entries, 1);
}

struct Replay(Vec<Vec<Detection>>);

impl DetectionSource for Replay {
    type Error = std::convert::Infallible;

    fn detect(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<Detection>, Self::Error> {
        Ok(if self.0.is_empty() {
            vec![]
        } else {
            self.0.remove(0)
        })
    }
}

#[test]
fn test_pipeline_counts_with_frame_stride() {
    let frames = WALK_IN
        .iter()
        .map(|&y| vec![Detection::new(100.0, y)])
        .collect();
    let tracker = DoorTracker::new(DoorConfig::default())
        .unwrap()
        .with_sink(NullSink);
    let mut pipeline = DoorPipeline::new(Replay(frames), tracker).with_frame_stride(2);

    for _ in 0..6 {
        pipeline.process_frame(&[], 640, 480).unwrap();
    }
    assert_eq!(pipeline.tracker().ticks(), 3);
    assert_eq!(pipeline.tracker().counter().entries, 1);
}
