//! Serial port adapter on top of the `serialport` crate.

use super::{DeviceReader, DeviceWriter};
use crate::model::{DataBits, DeviceError, Parity, PortSettings, StopBits};
use serialport::{FlowControl, SerialPort};
use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound on a blocking write.
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(100);

/// How long a break condition is held.
pub const BREAK_DURATION: Duration = Duration::from_millis(5);

impl From<DataBits> for serialport::DataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Five => serialport::DataBits::Five,
            DataBits::Six => serialport::DataBits::Six,
            DataBits::Seven => serialport::DataBits::Seven,
            DataBits::Eight => serialport::DataBits::Eight,
        }
    }
}

impl From<StopBits> for serialport::StopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => serialport::StopBits::One,
            StopBits::Two => serialport::StopBits::Two,
        }
    }
}

impl From<Parity> for serialport::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
            Parity::Even => serialport::Parity::Even,
        }
    }
}

/// One handle onto an open port. Reader and writer are separate clones.
pub struct SerialDevice {
    port: Box<dyn SerialPort>,
}

impl std::fmt::Debug for SerialDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialDevice")
            .field("name", &self.port.name())
            .finish()
    }
}

/// Open `settings.path` and return a (reader, writer) pair.
///
/// # Errors
///
/// Returns [`DeviceError::Open`] when the port cannot be opened, configured
/// or cloned.
pub fn open(settings: &PortSettings) -> Result<(SerialDevice, SerialDevice), DeviceError> {
    let open_error = |err: serialport::Error| DeviceError::Open {
        port: settings.path.clone(),
        reason: err.to_string(),
    };

    let port = serialport::new(settings.path.as_str(), settings.baud_rate)
        .data_bits(settings.data_bits.into())
        .stop_bits(settings.stop_bits.into())
        .parity(settings.parity.into())
        .flow_control(FlowControl::None)
        .timeout(WRITE_TIMEOUT)
        .open()
        .map_err(open_error)?;
    let reader = port.try_clone().map_err(open_error)?;

    info!(port = %settings, "opened serial port");
    Ok((SerialDevice { port: reader }, SerialDevice { port }))
}

/// Names of the serial ports the OS reports.
///
/// # Errors
///
/// Returns [`DeviceError::Enumerate`] when the OS query fails.
pub fn list_ports() -> Result<Vec<String>, DeviceError> {
    let ports = serialport::available_ports().map_err(|e| DeviceError::Enumerate(e.to_string()))?;
    debug!(count = ports.len(), "enumerated ports");
    Ok(ports.into_iter().map(|info| info.port_name).collect())
}

impl DeviceReader for SerialDevice {
    fn read_available(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let available = self.port.bytes_to_read().map_err(io::Error::from)? as usize;
        if available == 0 {
            return Ok(0);
        }

        let start = buf.len();
        buf.resize(start + available, 0);
        let read = match self.port.read(&mut buf[start..]) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => 0,
            Err(e) => {
                buf.truncate(start);
                return Err(e);
            }
        };
        buf.truncate(start + read);
        Ok(read)
    }
}

impl DeviceWriter for SerialDevice {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()
    }

    fn send_break(&mut self) -> io::Result<()> {
        self.port.set_break().map_err(io::Error::from)?;
        thread::sleep(BREAK_DURATION);
        self.port.clear_break().map_err(io::Error::from)
    }
}
