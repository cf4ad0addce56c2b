//! # Memory-mapped ports
//!
//! Some machines put the VDP on the memory bus instead of the I/O space.
//! The usual arrangement is two three-byte windows, one for reads and one
//! for writes:
//!
//! | Offset | Read window | Write window |
//! |--------|-------------|--------------|
//! | `+0`   | data        | data         |
//! | `+2`   | status      | control      |

use volatile_register::{RO, WO};

use crate::bus::VdpPorts;

/// Read window base on the TI-99/4A.
pub const TI99_READ_BASE: usize = 0x8800;
/// Write window base on the TI-99/4A.
pub const TI99_WRITE_BASE: usize = 0x8C00;

#[repr(C, packed)]
pub struct ReadWindow {
    pub data: RO<u8>,
    _unused: u8,
    pub status: RO<u8>,
}

#[repr(C, packed)]
pub struct WriteWindow {
    pub data: WO<u8>,
    _unused: u8,
    pub control: WO<u8>,
}

/// [`VdpPorts`] over a pair of memory-mapped register windows.
pub struct MmioPorts<'a> {
    read: &'a ReadWindow,
    write: &'a mut WriteWindow,
}

impl<'a> MmioPorts<'a> {
    /// # Safety
    /// `read` and `write` must point at the device's register windows (or
    /// at least three bytes of memory each) for the whole of `'a`, and
    /// nothing else may access them in that time.
    #[inline(always)]
    pub unsafe fn at(read: *const u8, write: *mut u8) -> Self {
        unsafe {
            Self {
                read: &*(read as *const ReadWindow),
                write: &mut *(write as *mut WriteWindow),
            }
        }
    }
}

impl MmioPorts<'static> {
    /// # Safety
    /// Only sound on a TI-99/4A, and only once.
    #[inline(always)]
    pub unsafe fn ti99() -> Self {
        unsafe { Self::at(TI99_READ_BASE as *const u8, TI99_WRITE_BASE as *mut u8) }
    }
}

impl VdpPorts for MmioPorts<'_> {
    #[inline(always)]
    fn write_control(&mut self, value: u8) {
        unsafe { self.write.control.write(value) }
    }

    #[inline(always)]
    fn write_data(&mut self, value: u8) {
        unsafe { self.write.data.write(value) }
    }

    #[inline(always)]
    fn read_data(&mut self) -> u8 {
        self.read.data.read()
    }

    #[inline(always)]
    fn read_status(&mut self) -> u8 {
        self.read.status.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_map_to_expected_offsets() {
        let read = [0x5A, 0x00, 0x9F];
        let mut write = [0u8; 3];
        let mut ports = unsafe { MmioPorts::at(read.as_ptr(), write.as_mut_ptr()) };

        assert_eq!(ports.read_data(), 0x5A);
        assert_eq!(ports.read_status(), 0x9F);
        ports.write_data(0x11);
        ports.write_control(0x42);
        drop(ports);

        assert_eq!(write, [0x11, 0x00, 0x42]);
    }
}
