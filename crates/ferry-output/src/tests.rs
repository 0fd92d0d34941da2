//! Integration tests for ferry-output.

use ferry_core::{Event, Port, Vehicle, VehicleClass, VehicleId};

/// Prefix each message with its 1-based line number.
fn numbered(messages: &[&str]) -> Vec<String> {
    messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}: {m}", i + 1))
        .collect()
}

/// N=1, O=1: the car crosses 0 -> 1, the truck crosses 1 -> 0.
const BASE_LOG: [&str; 16] = [
    "P: started",
    "O 1: started",
    "N 1: started",
    "O 1: arrived to 0",
    "N 1: arrived to 1",
    "P: arrived to 0",
    "O 1: boarding",
    "P: leaving 0",
    "P: arrived to 1",
    "O 1: leaving in 1",
    "N 1: boarding",
    "P: leaving 1",
    "P: arrived to 0",
    "N 1: leaving in 0",
    "P: leaving 0",
    "P: finish",
];

/// `cars` cars all waiting at port 0, carried across one at a time.
fn shuttle_log(cars: u32) -> Vec<String> {
    let mut messages = vec!["P: started".to_string()];
    for i in 1..=cars {
        messages.push(format!("O {i}: started"));
        messages.push(format!("O {i}: arrived to 0"));
    }
    for i in 1..=cars {
        messages.push("P: arrived to 0".into());
        messages.push(format!("O {i}: boarding"));
        messages.push("P: leaving 0".into());
        messages.push("P: arrived to 1".into());
        messages.push(format!("O {i}: leaving in 1"));
        messages.push("P: leaving 1".into());
    }
    messages.push("P: finish".into());
    let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
    numbered(&refs)
}

fn car(id: u32) -> Vehicle {
    Vehicle::new(VehicleId(id), VehicleClass::Standard, Port::FIRST)
}

// ── TextWriter ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod text_tests {
    use super::*;
    use crate::text::TextWriter;
    use crate::writer::OutputWriter;

    #[test]
    fn writes_numbered_lines() {
        let mut w = TextWriter::from_writer(Vec::new());
        w.write_event(1, &Event::FerryStarted).unwrap();
        w.write_event(2, &Event::started(&car(3))).unwrap();
        w.write_event(3, &Event::FerryLeaving(Port::SECOND)).unwrap();
        w.finish().unwrap();

        let text = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(text, "1: P: started\n2: O 3: started\n3: P: leaving 1\n");
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferry.out");
        std::fs::write(&path, "stale contents\n").unwrap();

        let mut w = TextWriter::create(&path).unwrap();
        w.write_event(1, &Event::FerryFinished).unwrap();
        w.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1: P: finish\n");
    }

    #[test]
    fn lines_visible_before_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferry.out");
        let mut w = TextWriter::create(&path).unwrap();
        w.write_event(1, &Event::FerryStarted).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1: P: started\n");
    }

    #[test]
    fn finish_is_idempotent() {
        let mut w = TextWriter::from_writer(Vec::new());
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── CsvWriter ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::csv::CsvWriter;
    use crate::row::TraceRow;
    use crate::writer::OutputWriter;

    #[test]
    fn headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        let mut w = CsvWriter::new(&path).unwrap();
        let heavy = Vehicle::new(VehicleId(2), VehicleClass::Heavy, Port::SECOND);
        w.write_event(1, &Event::FerryStarted).unwrap();
        w.write_event(2, &Event::arrived(&heavy)).unwrap();
        w.write_event(3, &Event::left(&heavy)).unwrap();
        w.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, [
            "seq,actor,id,action,port",
            "1,P,,started,",
            "2,N,2,arrived,1",
            "3,N,2,leaving,0",
        ]);
    }

    #[test]
    fn rows_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        let events = [
            Event::FerryArrived(Port::FIRST),
            Event::boarding(&car(7)),
            Event::FerryFinished,
        ];
        let mut w = CsvWriter::new(&path).unwrap();
        for (i, e) in events.iter().enumerate() {
            w.write_event(i as u64 + 1, e).unwrap();
        }
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<TraceRow> = rdr.deserialize().map(|r| r.unwrap()).collect();
        let expected: Vec<TraceRow> = events
            .iter()
            .enumerate()
            .map(|(i, e)| TraceRow::new(i as u64 + 1, e))
            .collect();
        assert_eq!(rows, expected);
        assert_eq!(rows[1].id, Some(VehicleId(7)));
        assert_eq!(rows[1].port, None);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(&dir.path().join("trace.csv")).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod log_tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use ferry_sim::EventSink;

    use super::*;
    use crate::writer::OutputWriter;
    use crate::{EventLog, OutputError, OutputResult};

    /// Shares its lines with the test after the log takes ownership.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(u64, Event)>>>);

    impl OutputWriter for Capture {
        fn write_event(&mut self, seq: u64, event: &Event) -> OutputResult<()> {
            self.0.lock().unwrap().push((seq, *event));
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    /// Fails every write after the first `ok` ones.
    struct Flaky {
        ok:       u64,
        finishes: Arc<Mutex<u32>>,
    }

    impl OutputWriter for Flaky {
        fn write_event(&mut self, seq: u64, _event: &Event) -> OutputResult<()> {
            if seq > self.ok {
                return Err(OutputError::Io(std::io::Error::other(format!("disk full at {seq}"))));
            }
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            *self.finishes.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn numbers_from_one() {
        let cap = Capture::default();
        let log = EventLog::new().with_writer(cap.clone());
        assert_eq!(log.append(&Event::FerryStarted).unwrap(), 1);
        assert_eq!(log.append(&Event::FerryArrived(Port::FIRST)).unwrap(), 2);
        assert_eq!(log.lines_written(), 2);

        let seen = cap.0.lock().unwrap();
        assert_eq!(*seen, vec![
            (1, Event::FerryStarted),
            (2, Event::FerryArrived(Port::FIRST)),
        ]);
    }

    #[test]
    fn every_writer_sees_every_event() {
        let a = Capture::default();
        let b = Capture::default();
        let log = EventLog::new().with_writer(a.clone()).with_writer(b.clone());
        log.record(Event::FerryStarted);
        log.record(Event::FerryFinished);

        assert_eq!(*a.0.lock().unwrap(), *b.0.lock().unwrap());
        assert_eq!(a.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn concurrent_records_have_no_gaps() {
        let cap = Capture::default();
        let log = Arc::new(EventLog::new().with_writer(cap.clone()));

        let handles: Vec<_> = (1..=8)
            .map(|id| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for _ in 0..50 {
                        log.record(Event::started(&car(id)));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let seqs: Vec<u64> = cap.0.lock().unwrap().iter().map(|(s, _)| *s).collect();
        assert_eq!(seqs, (1..=400).collect::<Vec<u64>>());
    }

    #[test]
    fn record_keeps_first_error_and_keeps_counting() {
        let finishes = Arc::new(Mutex::new(0));
        let log = EventLog::new().with_writer(Flaky { ok: 1, finishes: Arc::clone(&finishes) });
        log.record(Event::FerryStarted);
        log.record(Event::FerryArrived(Port::FIRST));
        log.record(Event::FerryLeaving(Port::FIRST));
        assert_eq!(log.lines_written(), 3);

        let err = log.take_error().expect("stored error");
        assert!(err.to_string().contains("disk full at 2"), "{err}");
        assert!(log.take_error().is_none(), "error is taken once");
    }

    #[test]
    fn finish_is_idempotent() {
        let finishes = Arc::new(Mutex::new(0));
        let log = EventLog::new().with_writer(Flaky { ok: 0, finishes: Arc::clone(&finishes) });
        log.finish().unwrap();
        log.finish().unwrap();
        assert_eq!(*finishes.lock().unwrap(), 1);
    }

    #[test]
    fn no_writers_still_numbers() {
        let log = EventLog::default();
        log.record(Event::FerryStarted);
        assert_eq!(log.lines_written(), 1);
        assert!(log.take_error().is_none());
    }
}

// ── Audit ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod audit_tests {
    use super::*;
    use crate::{Expect, check};

    fn expect(heavy: u32, standard: u32, capacity: u32) -> Expect {
        Expect {
            heavy:    Some(heavy),
            standard: Some(standard),
            capacity: Some(capacity),
        }
    }

    /// `BASE_LOG` with line `n` (1-based) replaced.
    fn base_with(n: usize, message: &str) -> Vec<String> {
        let mut messages = BASE_LOG.to_vec();
        messages[n - 1] = message;
        numbered(&messages)
    }

    fn violation_line(lines: &[String], expect: Expect) -> (u64, String) {
        let v = check(lines, expect).expect_err("log should be rejected");
        (v.line, v.message)
    }

    #[test]
    fn clean_log_reports_measurements() {
        let report = check(numbered(&BASE_LOG), expect(1, 1, 4)).unwrap();
        assert_eq!(report.lines, 16);
        assert_eq!(report.trips, 3);
        assert_eq!(report.peak_units, 3);
        assert_eq!((report.heavy, report.standard), (1, 1));
        assert!(!report.underused);
    }

    #[test]
    fn parameters_are_optional() {
        let report = check(numbered(&BASE_LOG), Expect::default()).unwrap();
        assert_eq!(report.heavy, 1);
    }

    #[test]
    fn accepts_trailing_newlines() {
        let text: String = numbered(&BASE_LOG).iter().map(|l| format!("{l}\n")).collect();
        assert!(check(text.lines(), expect(1, 1, 4)).is_ok());
    }

    #[test]
    fn flags_underused_ferry() {
        let report = check(shuttle_log(4), expect(0, 4, 3)).unwrap();
        assert_eq!(report.peak_units, 1);
        assert_eq!(report.trips, 8);
        assert!(report.underused);
    }

    #[test]
    fn sequence_gap() {
        let mut lines = numbered(&BASE_LOG);
        lines[4] = "6: N 1: arrived to 1".into();
        let (line, message) = violation_line(&lines, Expect::default());
        assert_eq!(line, 5);
        assert!(message.contains("expected 5"), "{message}");
    }

    #[test]
    fn unparsable_line() {
        let (line, _) = violation_line(&base_with(7, "X 1: flying"), Expect::default());
        assert_eq!(line, 7);
    }

    #[test]
    fn first_arrival_must_be_port_zero() {
        let (line, message) = violation_line(&base_with(6, "P: arrived to 1"), Expect::default());
        assert_eq!(line, 6);
        assert!(message.contains("port 0"), "{message}");
    }

    #[test]
    fn boarding_before_ferry_arrives() {
        let mut messages = BASE_LOG.to_vec();
        messages.swap(5, 6);
        let (line, message) = violation_line(&numbered(&messages), Expect::default());
        assert_eq!(line, 6);
        assert!(message.contains("not at a port"), "{message}");
    }

    #[test]
    fn boarding_before_unloading_finished() {
        let mut messages = BASE_LOG.to_vec();
        messages.swap(9, 10);
        let (line, message) = violation_line(&numbered(&messages), Expect::default());
        assert_eq!(line, 10);
        assert!(message.contains("still to unload"), "{message}");
    }

    #[test]
    fn leaving_at_origin_port() {
        let lines = base_with(10, "O 1: leaving in 0");
        let (line, _) = violation_line(&lines, Expect::default());
        assert_eq!(line, 10);
    }

    #[test]
    fn leaving_while_ferry_en_route() {
        let mut messages = BASE_LOG.to_vec();
        // Car leaves before the ferry reaches port 1.
        messages.swap(8, 9);
        let (line, message) = violation_line(&numbered(&messages), Expect::default());
        assert_eq!(line, 9);
        assert!(message.contains("not at a port"), "{message}");
    }

    #[test]
    fn capacity_exceeded() {
        let (line, message) = violation_line(&numbered(&BASE_LOG), expect(1, 1, 2));
        assert_eq!(line, 11);
        assert!(message.contains("capacity"), "{message}");
    }

    #[test]
    fn ferry_leaves_wrong_port() {
        let (line, _) = violation_line(&base_with(8, "P: leaving 1"), Expect::default());
        assert_eq!(line, 8);
    }

    #[test]
    fn missing_finish() {
        let lines = numbered(&BASE_LOG[..15]);
        let (line, message) = violation_line(&lines, Expect::default());
        assert_eq!(line, 15);
        assert!(message.contains("finish"), "{message}");
    }

    #[test]
    fn events_after_finish() {
        let mut messages = BASE_LOG.to_vec();
        messages.push("P: arrived to 1");
        let (line, _) = violation_line(&numbered(&messages), Expect::default());
        assert_eq!(line, 17);
    }

    #[test]
    fn wrong_vehicle_counts() {
        let (_, message) = violation_line(&numbered(&BASE_LOG), expect(2, 1, 4));
        assert!(message.contains("too few 'N'"), "{message}");

        let (line, message) = violation_line(&numbered(&BASE_LOG), expect(1, 0, 4));
        assert_eq!(line, 2);
        assert!(message.contains("too many 'O'"), "{message}");
    }

    #[test]
    fn id_gap() {
        let messages: Vec<String> = BASE_LOG.iter().map(|m| m.replace("O 1", "O 2")).collect();
        let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
        let (line, message) = violation_line(&numbered(&refs), Expect::default());
        assert_eq!(line, 16);
        assert!(message.contains("gap"), "{message}");
    }

    #[test]
    fn empty_log() {
        let lines: Vec<String> = Vec::new();
        let (line, _) = violation_line(&lines, Expect::default());
        assert_eq!(line, 1);
    }
}

// ── Whole pipeline: simulate, log, audit ──────────────────────────────────────

#[cfg(test)]
mod pipeline_tests {
    use std::sync::Arc;

    use ferry_core::FerryConfig;
    use ferry_sim::SimBuilder;

    use crate::{CsvWriter, EventLog, Expect, TextWriter, check};

    fn config(heavy: u32, standard: u32, capacity: u32, seed: u64) -> FerryConfig {
        FerryConfig {
            heavy,
            standard,
            capacity,
            max_arrival_us: 300,
            max_travel_us:  80,
            seed,
        }
    }

    fn simulate_and_audit(config: FerryConfig) {
        let dir = tempfile::tempdir().unwrap();
        let text_path = dir.path().join("ferry.out");
        let csv_path = dir.path().join("trace.csv");

        let log = Arc::new(
            EventLog::new()
                .with_writer(TextWriter::create(&text_path).unwrap())
                .with_writer(CsvWriter::new(&csv_path).unwrap()),
        );
        let summary = SimBuilder::new(config.clone(), Arc::clone(&log))
            .build()
            .unwrap()
            .run()
            .unwrap();
        log.finish().unwrap();
        assert!(log.take_error().is_none());

        let text = std::fs::read_to_string(&text_path).unwrap();
        let expect = Expect {
            heavy:    Some(config.heavy),
            standard: Some(config.standard),
            capacity: Some(config.capacity),
        };
        let report = check(text.lines(), expect).unwrap_or_else(|v| panic!("{v}\n{text}"));

        assert_eq!(report.lines, log.lines_written());
        assert_eq!(report.trips, summary.trips);
        assert_eq!(report.peak_units, summary.peak_units);

        let rows = csv::Reader::from_path(&csv_path).unwrap().records().count();
        assert_eq!(rows as u64, report.lines);
    }

    #[test]
    fn mixed_run_passes_audit() {
        simulate_and_audit(config(5, 12, 6, 7));
    }

    #[test]
    fn empty_run_passes_audit() {
        simulate_and_audit(config(0, 0, 3, 1));
    }

    #[test]
    fn many_seeds_pass_audit() {
        for seed in 0..10 {
            simulate_and_audit(config(3, 7, 4, seed));
        }
    }
}
