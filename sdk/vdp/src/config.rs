/// How long interrupts stay masked during a fast name table refresh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MaskWindow {
    /// Mask only the two latch bytes. A handler may run mid-transfer, which
    /// is fine as long as it does not move the cursor.
    #[default]
    Latch,
    /// Mask the latch and the whole 768 byte transfer. Delays the frame
    /// interrupt by the length of the burst.
    Transfer,
}

/// Driver policy knobs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VdpConfig {
    /// Read the status port once before each bulk latch so a stray
    /// half-written latch from elsewhere cannot pair with our first byte.
    pub resync_before_latch: bool,
    pub name_table_mask: MaskWindow,
}

impl Default for VdpConfig {
    fn default() -> Self {
        Self {
            resync_before_latch: true,
            name_table_mask: MaskWindow::Latch,
        }
    }
}
