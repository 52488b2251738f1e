//! Errors of the SH1106 driver.

/// Either the bus backend or the reset pin failed.
///
/// With most HALs both are `Infallible`, so in practice this never happens on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<BusErr, PinErr> {
    /// writing to the bus failed
    Bus(BusErr),
    /// toggling the reset pin failed
    Pin(PinErr),
}

impl<BusErr, PinErr> Error<BusErr, PinErr> {
    pub(crate) fn bus<T>(result: Result<T, BusErr>) -> Result<T, Self> {
        result.map_err(Error::Bus)
    }

    pub(crate) fn pin<T>(result: Result<T, PinErr>) -> Result<T, Self> {
        result.map_err(Error::Pin)
    }
}
