#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use log::{LevelFilter, Log, Metadata, Record};
use sh1106_testbench::{Clock, Millis, Sh1106, Sh1106Backend};

/// One transfer as the panel would see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Command(Vec<u8>),
    Data(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub transfers: Vec<Transfer>,
}

impl RecordingBackend {
    pub fn commands(&self) -> Vec<u8> {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Command(bytes) => Some(bytes.clone()),
                Transfer::Data(_) => None,
            })
            .flatten()
            .collect()
    }

    pub fn data_transfers(&self) -> Vec<&Vec<u8>> {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Data(bytes) => Some(bytes),
                Transfer::Command(_) => None,
            })
            .collect()
    }
}

impl Sh1106Backend for RecordingBackend {
    type Error = Infallible;

    fn write(&mut self, data: bool, bytes: &[u8]) -> Result<(), Infallible> {
        let bytes = bytes.to_vec();
        self.transfers.push(if data {
            Transfer::Data(bytes)
        } else {
            Transfer::Command(bytes)
        });
        Ok(())
    }
}

/// Pin level changes, in order, across all pins sharing one log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub pin: &'static str,
    pub high: bool,
}

pub type PinLog = Rc<RefCell<Vec<Edge>>>;

pub struct RecordingPin {
    name: &'static str,
    log: PinLog,
}

impl RecordingPin {
    pub fn new(name: &'static str, log: &PinLog) -> RecordingPin {
        RecordingPin {
            name,
            log: log.clone(),
        }
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Edge { pin: self.name, high: false });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Edge { pin: self.name, high: true });
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Like `RecordingPin`, but a broken one refuses every level change
pub struct FaultyPin {
    name: &'static str,
    log: PinLog,
    broken: bool,
}

impl FaultyPin {
    pub fn working(name: &'static str, log: &PinLog) -> FaultyPin {
        FaultyPin {
            name,
            log: log.clone(),
            broken: false,
        }
    }

    pub fn broken(name: &'static str, log: &PinLog) -> FaultyPin {
        FaultyPin {
            name,
            log: log.clone(),
            broken: true,
        }
    }

    fn set(&mut self, high: bool) -> Result<(), PinFault> {
        if self.broken {
            return Err(PinFault);
        }
        self.log.borrow_mut().push(Edge { pin: self.name, high });
        Ok(())
    }
}

impl ErrorType for FaultyPin {
    type Error = PinFault;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.set(true)
    }
}

/// Simulated time: sleeping on the delay moves the clock forward
#[derive(Clone, Default)]
pub struct SimTime {
    now_ms: Rc<Cell<u32>>,
    total_ns: Rc<Cell<u64>>,
}

impl SimTime {
    pub fn now_ms(&self) -> u32 {
        self.now_ms.get()
    }

    pub fn advance_ms(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get().wrapping_add(ms));
    }
}

impl Clock for SimTime {
    fn now(&mut self) -> Millis {
        Millis(self.now_ms.get())
    }
}

impl DelayNs for SimTime {
    fn delay_ns(&mut self, ns: u32) {
        let total = self.total_ns.get() + ns as u64;
        self.total_ns.set(total % 1_000_000);
        self.advance_ms((total / 1_000_000) as u32);
    }
}

pub type TestDisplay = Sh1106<RecordingBackend, RecordingPin>;

pub fn display() -> (TestDisplay, PinLog) {
    let log = PinLog::default();
    let rst = RecordingPin::new("rst", &log);
    (Sh1106::new(RecordingBackend::default(), rst), log)
}

thread_local! {
    static CONSOLE: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

/// Stands in for the serial console. Lines are kept per test thread, so tests running in
/// parallel don't see each other's output.
struct ConsoleCapture;

impl Log for ConsoleCapture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            CONSOLE.with(|lines| lines.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CONSOLE_CAPTURE: ConsoleCapture = ConsoleCapture;

/// Start capturing log output of this thread, filtered at `Info` like the board's logger.
pub fn capture_console() {
    // only the first test in a binary gets to install it, the others reuse it
    log::set_logger(&CONSOLE_CAPTURE).ok();
    log::set_max_level(LevelFilter::Info);
    CONSOLE.with(|lines| lines.borrow_mut().clear());
}

/// Everything logged on this thread since `capture_console`
pub fn console_lines() -> Vec<String> {
    CONSOLE.with(|lines| lines.borrow().clone())
}
