//! Log audit: replay a finished event log and find the first line that breaks
//! the ferry protocol.
//!
//! The audit only sees the text, so it works on logs from any build of the
//! simulator.  It tracks one state machine for the ferry and one per
//! vehicle, plus the load on deck:
//!
//! | Ferry state | Entered by               | Allows                          |
//! |-------------|--------------------------|---------------------------------|
//! | `Unknown`   | start of log             | `started`                       |
//! | `Started`   | `P: started`             | `arrived to 0`                  |
//! | `Unloading` | `P: arrived to p`        | `leaving in p`, `boarding`, `leaving p` |
//! | `Boarding`  | first `boarding` at a stop | `boarding`, `leaving p`       |
//! | `EnRoute`   | `P: leaving p`           | `arrived to 1-p`, `finish`      |
//! | `Finished`  | `P: finish`              | nothing                         |

use std::collections::BTreeMap;

use ferry_core::{Event, Port, VehicleClass, VehicleId};
use thiserror::Error;

/// Optional run parameters to check the log against.  `None` skips the
/// corresponding count or capacity check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Expect {
    /// `N`
    pub heavy:    Option<u32>,
    /// `O`
    pub standard: Option<u32>,
    /// `K`
    pub capacity: Option<u32>,
}

/// What a clean log measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub lines:      u64,
    pub trips:      usize,
    /// Most capacity units on deck at any point.
    pub peak_units: usize,
    pub heavy:      usize,
    pub standard:   usize,
    /// The vehicles could have filled the ferry but never did.  A warning,
    /// not a violation.
    pub underused:  bool,
}

/// The first protocol violation found, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct Violation {
    pub line:    u64,
    pub message: String,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum FerryState {
    Unknown,
    Started,
    Unloading,
    Boarding,
    EnRoute,
    Finished,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum VehicleState {
    Started,
    Waiting,
    Boarded,
    Left,
}

#[derive(Copy, Clone, Debug)]
struct Track {
    state:  VehicleState,
    origin: Option<Port>,
}

struct Replay {
    expect:     Expect,
    ferry:      FerryState,
    /// Last port the ferry arrived at; `None` while still at the dock.
    ferry_port: Option<Port>,
    /// Vehicles on deck, by [`VehicleClass::index`].
    loaded:     [usize; 2],
    peak_units: usize,
    trips:      usize,
    vehicles:   [BTreeMap<VehicleId, Track>; 2],
}

/// Check a complete log.
///
/// `lines` are raw log lines (`"<seq>: <message>"`), trailing newlines
/// allowed.  Returns the first violation, or a report if the whole log
/// replays cleanly.
pub fn check<I, L>(lines: I, expect: Expect) -> Result<AuditReport, Violation>
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let mut replay = Replay::new(expect);
    let mut count = 0u64;

    for line in lines {
        count += 1;
        let event = parse_line(line.as_ref(), count).map_err(|m| violation(count, m))?;
        replay.apply(&event).map_err(|m| violation(count, m))?;
    }

    // End-of-log problems are blamed on the last line.
    replay.finish(count).map_err(|m| violation(count.max(1), m))
}

fn violation(line: u64, message: String) -> Violation {
    Violation { line, message }
}

fn parse_line(line: &str, expected: u64) -> Result<Event, String> {
    let (seq, message) = line
        .split_once(':')
        .ok_or_else(|| format!("expected '<seq>: <message>', got {:?}", line.trim_end()))?;
    let seq = seq.trim();
    let seq: u64 = seq
        .parse()
        .map_err(|_| format!("line index is {seq:?}, expected a number"))?;
    if seq != expected {
        return Err(format!("line index is {seq}, expected {expected}"));
    }
    message.parse::<Event>().map_err(|e| e.to_string())
}

fn name(class: VehicleClass, id: VehicleId) -> String {
    format!("{} {}", class.tag(), id.0)
}

impl Replay {
    fn new(expect: Expect) -> Self {
        Self {
            expect,
            ferry:      FerryState::Unknown,
            ferry_port: None,
            loaded:     [0; 2],
            peak_units: 0,
            trips:      0,
            vehicles:   [BTreeMap::new(), BTreeMap::new()],
        }
    }

    fn units_on_deck(&self) -> usize {
        VehicleClass::ALL
            .iter()
            .map(|c| self.loaded[c.index()] * c.units())
            .sum()
    }

    fn deck_desc(&self) -> String {
        format!(
            "{} heavy and {} standard vehicles",
            self.loaded[VehicleClass::Heavy.index()],
            self.loaded[VehicleClass::Standard.index()],
        )
    }

    fn at_port(&self) -> bool {
        matches!(self.ferry, FerryState::Unloading | FerryState::Boarding)
    }

    fn apply(&mut self, event: &Event) -> Result<(), String> {
        if self.ferry == FerryState::Finished {
            return Err(format!("'{event}' after the ferry finished"));
        }
        match *event {
            Event::FerryStarted     => self.ferry_started(),
            Event::FerryArrived(p)  => self.ferry_arrived(p),
            Event::FerryLeaving(p)  => self.ferry_leaving(p),
            Event::FerryFinished    => self.ferry_finished(),
            Event::VehicleStarted { class, id } => self.vehicle_started(class, id),
            Event::VehicleArrived { class, id, port } => self.vehicle_arrived(class, id, port),
            Event::VehicleBoarding { class, id } => self.vehicle_boarding(class, id),
            Event::VehicleLeft { class, id, port } => self.vehicle_left(class, id, port),
        }
    }

    // ── Ferry ─────────────────────────────────────────────────────────────────

    fn ferry_started(&mut self) -> Result<(), String> {
        if self.ferry != FerryState::Unknown {
            return Err("ferry started twice".into());
        }
        self.ferry = FerryState::Started;
        Ok(())
    }

    fn ferry_arrived(&mut self, port: Port) -> Result<(), String> {
        match self.ferry_port {
            None if port != Port::FIRST => {
                return Err(format!("ferry must arrive at port 0 first, not port {port}"));
            }
            Some(last) if last == port => {
                return Err(format!("ferry arrived at port {port}, the port it departed from"));
            }
            _ => {}
        }
        if !matches!(self.ferry, FerryState::Started | FerryState::EnRoute) {
            return Err(format!("ferry arrived at port {port} without leaving a port"));
        }
        self.ferry_port = Some(port);
        self.ferry = FerryState::Unloading;
        Ok(())
    }

    fn ferry_leaving(&mut self, port: Port) -> Result<(), String> {
        if self.ferry == FerryState::EnRoute && self.ferry_port == Some(port) {
            return Err(format!("ferry left port {port} twice"));
        }
        if !self.at_port() {
            return Err(format!("ferry left port {port} without arriving there"));
        }
        if self.ferry_port != Some(port) {
            return Err(format!("ferry left port {port} but is at port {}", self.port_desc()));
        }
        if self.ferry == FerryState::Unloading && self.units_on_deck() > 0 {
            return Err(format!("ferry left while {} were still to unload", self.deck_desc()));
        }
        self.ferry = FerryState::EnRoute;
        self.trips += 1;
        Ok(())
    }

    fn ferry_finished(&mut self) -> Result<(), String> {
        match self.ferry {
            FerryState::Unknown | FerryState::Started => {
                Err("ferry finished without arriving at a port".into())
            }
            FerryState::EnRoute => {
                self.ferry = FerryState::Finished;
                Ok(())
            }
            _ => Err(format!("ferry finished without leaving port {}", self.port_desc())),
        }
    }

    fn port_desc(&self) -> String {
        self.ferry_port.map_or_else(|| "none".to_string(), |p| p.to_string())
    }

    // ── Vehicles ──────────────────────────────────────────────────────────────

    fn track(&mut self, class: VehicleClass, id: VehicleId) -> Result<&mut Track, String> {
        self.vehicles[class.index()]
            .get_mut(&id)
            .ok_or_else(|| format!("{} acted before starting", name(class, id)))
    }

    fn vehicle_started(&mut self, class: VehicleClass, id: VehicleId) -> Result<(), String> {
        let tracks = &mut self.vehicles[class.index()];
        if tracks.contains_key(&id) {
            return Err(format!("{} started twice", name(class, id)));
        }
        tracks.insert(id, Track { state: VehicleState::Started, origin: None });

        let expected = match class {
            VehicleClass::Heavy => self.expect.heavy,
            VehicleClass::Standard => self.expect.standard,
        };
        if let Some(expected) = expected {
            if tracks.len() > expected as usize {
                return Err(format!(
                    "too many '{}' vehicles started (expected {expected})",
                    class.tag()
                ));
            }
        }
        Ok(())
    }

    fn vehicle_arrived(&mut self, class: VehicleClass, id: VehicleId, port: Port) -> Result<(), String> {
        let track = self.track(class, id)?;
        if track.state != VehicleState::Started {
            return Err(format!("{} arrived twice", name(class, id)));
        }
        track.state = VehicleState::Waiting;
        track.origin = Some(port);
        Ok(())
    }

    fn vehicle_boarding(&mut self, class: VehicleClass, id: VehicleId) -> Result<(), String> {
        let ferry = self.ferry;
        let ferry_port = self.ferry_port;
        let port_desc = self.port_desc();
        let at_port = self.at_port();
        let unloaded = self.units_on_deck() == 0;
        let deck = self.deck_desc();

        let track = self.track(class, id)?;
        let who = name(class, id);
        if track.state != VehicleState::Waiting {
            return Err(format!("{who} boarded while not waiting to board"));
        }
        if !at_port {
            return Err(format!("{who} boarded while the ferry is not at a port"));
        }
        if track.origin != ferry_port {
            return Err(format!(
                "{who} boarded at port {} while the ferry is at port {}",
                track.origin.map_or_else(|| "none".to_string(), |p| p.to_string()),
                port_desc,
            ));
        }
        if ferry == FerryState::Unloading && !unloaded {
            return Err(format!("{who} boarded while {deck} were still to unload"));
        }
        track.state = VehicleState::Boarded;

        self.ferry = FerryState::Boarding;
        self.loaded[class.index()] += 1;
        let units = self.units_on_deck();
        self.peak_units = self.peak_units.max(units);
        if let Some(k) = self.expect.capacity {
            if units > k as usize {
                return Err(format!("ferry capacity exceeded (expected {k}, measured {units})"));
            }
        }
        Ok(())
    }

    fn vehicle_left(&mut self, class: VehicleClass, id: VehicleId, port: Port) -> Result<(), String> {
        let ferry = self.ferry;
        let ferry_port = self.ferry_port;
        let port_desc = self.port_desc();

        let track = self.track(class, id)?;
        let who = name(class, id);
        if track.state != VehicleState::Boarded {
            return Err(format!("{who} left while not on board"));
        }
        match ferry {
            FerryState::Boarding => {
                return Err(format!("{who} left after another vehicle boarded at this stop"));
            }
            FerryState::Unloading => {}
            _ => return Err(format!("{who} left while the ferry is not at a port")),
        }
        if track.origin == Some(port) {
            return Err(format!("{who} left at port {port}, the port it started from"));
        }
        if ferry_port != Some(port) {
            return Err(format!("{who} left at port {port} while the ferry is at port {port_desc}"));
        }
        track.state = VehicleState::Left;

        let on_deck = &mut self.loaded[class.index()];
        *on_deck = on_deck
            .checked_sub(1)
            .ok_or_else(|| "ferry unloaded more vehicles than it loaded".to_string())?;
        Ok(())
    }

    // ── End of log ────────────────────────────────────────────────────────────

    fn finish(self, lines: u64) -> Result<AuditReport, String> {
        let heavy = self.vehicles[VehicleClass::Heavy.index()].len();
        let standard = self.vehicles[VehicleClass::Standard.index()].len();

        for (class, found, expected) in [
            (VehicleClass::Heavy, heavy, self.expect.heavy),
            (VehicleClass::Standard, standard, self.expect.standard),
        ] {
            if let Some(expected) = expected {
                if found != expected as usize {
                    return Err(format!(
                        "too few '{}' vehicles started (expected {expected}, found {found})",
                        class.tag()
                    ));
                }
            }
        }

        if self.ferry != FerryState::Finished {
            return Err("ferry did not finish on the last line".into());
        }

        for class in [VehicleClass::Heavy, VehicleClass::Standard] {
            let tracks = &self.vehicles[class.index()];
            if let Some((id, _)) = tracks.iter().find(|(_, t)| t.state != VehicleState::Left) {
                return Err(format!("{} did not reach its destination", name(class, *id)));
            }
            if let Some((&max, _)) = tracks.last_key_value() {
                if max.0 as usize != tracks.len() {
                    return Err(format!(
                        "'{}' ids have a gap ({} vehicles, highest id {})",
                        class.tag(),
                        tracks.len(),
                        max.0,
                    ));
                }
            }
        }

        let underused = match (self.expect.heavy, self.expect.standard, self.expect.capacity) {
            (Some(n), Some(o), Some(k)) => {
                let demand = n as usize * VehicleClass::Heavy.units() + o as usize;
                demand > k as usize && self.peak_units < k as usize
            }
            _ => false,
        };

        Ok(AuditReport {
            lines,
            trips: self.trips,
            peak_units: self.peak_units,
            heavy,
            standard,
            underused,
        })
    }
}
