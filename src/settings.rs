//! Persistent user settings.
//!
//! The configuration is a fixed-size byte image behind a 3-byte version
//! sentinel. Loading copies the whole image out of storage when the
//! sentinel matches; saving rewrites every byte unconditionally.
//!
//! Image layout (little-endian):
//! ```text
//! [0..3]   version sentinel
//! [3]      display contrast
//! [4]      display brightness
//! [5]      operating mode
//! [6]      LED max brightness
//! [7]      LED min brightness
//! [8..12]  light threshold (f32, percent)
//! [12..14] fade step interval (u16, ms)
//! ```
//!
//! The sentinel is the only compatibility check. Changing this layout
//! without bumping [`CONFIG_VERSION`] makes an old image load as valid
//! with shifted fields.

use crate::config::{CONFIG_IMAGE_SIZE, CONFIG_VERSION};
use crate::led::OperatingMode;

/// Byte-addressable persistent storage (EEPROM-style).
pub trait ByteStore {
    fn read(&self, addr: usize) -> u8;
    fn write(&mut self, addr: usize, byte: u8);
    /// Capacity in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ByteStore + ?Sized> ByteStore for &mut T {
    fn read(&self, addr: usize) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: usize, byte: u8) {
        (**self).write(addr, byte)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// RAM-backed byte image with a dirty flag.
///
/// On target this is the EEPROM emulation that gets mirrored to flash
/// whenever it has been written; in tests it is the whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStore<const N: usize> {
    bytes: [u8; N],
    dirty: bool,
}

impl<const N: usize> ImageStore<N> {
    /// Zeroed (blank) image.
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            dirty: false,
        }
    }

    /// Image restored from a previously persisted copy.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut image = Self::new();
        let len = data.len().min(N);
        image.bytes[..len].copy_from_slice(&data[..len]);
        image
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the image as persisted.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl<const N: usize> Default for ImageStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteStore for ImageStore<N> {
    fn read(&self, addr: usize) -> u8 {
        self.bytes.get(addr).copied().unwrap_or(0)
    }

    fn write(&mut self, addr: usize, byte: u8) {
        if let Some(slot) = self.bytes.get_mut(addr) {
            *slot = byte;
            self.dirty = true;
        }
    }

    fn len(&self) -> usize {
        N
    }
}

/// User-editable configuration record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub version: [u8; 3],
    pub display_contrast: u8,
    pub display_brightness: u8,
    pub operating_mode: OperatingMode,
    pub led_max_brightness: u8,
    /// Expected to stay below `led_max_brightness`; not enforced.
    pub led_min_brightness: u8,
    /// Ambient light percentage below which the auto modes light up.
    pub light_threshold: f32,
    pub fade_step_ms: u16,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display_contrast: 125,
            display_brightness: 255,
            operating_mode: OperatingMode::AutoFadeInOut,
            led_max_brightness: 255,
            led_min_brightness: 15,
            light_threshold: 25.0,
            fade_step_ms: 25,
        }
    }
}

impl Configuration {
    /// Serialise into the fixed storage image.
    pub fn to_bytes(&self) -> [u8; CONFIG_IMAGE_SIZE] {
        let mut buf = [0u8; CONFIG_IMAGE_SIZE];
        buf[0..3].copy_from_slice(&self.version);
        buf[3] = self.display_contrast;
        buf[4] = self.display_brightness;
        buf[5] = self.operating_mode as u8;
        buf[6] = self.led_max_brightness;
        buf[7] = self.led_min_brightness;
        buf[8..12].copy_from_slice(&self.light_threshold.to_le_bytes());
        buf[12..14].copy_from_slice(&self.fade_step_ms.to_le_bytes());
        buf
    }

    /// Rebuild from a storage image. Performs no validation beyond mapping
    /// an unknown mode byte to [`OperatingMode::Init`].
    pub fn from_bytes(buf: &[u8; CONFIG_IMAGE_SIZE]) -> Self {
        Self {
            version: [buf[0], buf[1], buf[2]],
            display_contrast: buf[3],
            display_brightness: buf[4],
            operating_mode: OperatingMode::from_u8(buf[5]).unwrap_or(OperatingMode::Init),
            led_max_brightness: buf[6],
            led_min_brightness: buf[7],
            light_threshold: f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            fade_step_ms: u16::from_le_bytes([buf[12], buf[13]]),
        }
    }
}

/// The in-memory configuration together with the storage it persists to.
pub struct ConfigStore<S: ByteStore> {
    storage: S,
    config: Configuration,
}

impl<S: ByteStore> ConfigStore<S> {
    /// Wrap `storage` with the compiled-in defaults in memory.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: Configuration::default(),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Configuration {
        &mut self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Overwrite the in-memory record from storage if its version sentinel
    /// matches. Returns `false` and leaves everything untouched otherwise.
    pub fn load(&mut self) -> bool {
        if self.storage.len() < CONFIG_IMAGE_SIZE {
            warn!("Config: storage too small ({} bytes)", self.storage.len());
            return false;
        }

        let matches = CONFIG_VERSION
            .iter()
            .enumerate()
            .all(|(addr, &tag)| self.storage.read(addr) == tag);
        if !matches {
            info!("Config: no stored image with matching version");
            return false;
        }

        let mut image = [0u8; CONFIG_IMAGE_SIZE];
        for (addr, byte) in image.iter_mut().enumerate() {
            *byte = self.storage.read(addr);
        }
        self.config = Configuration::from_bytes(&image);
        info!("Config: loaded, mode {:?}", self.config.operating_mode);
        true
    }

    /// Write the whole in-memory record back to storage.
    pub fn save(&mut self) {
        if self.storage.len() < CONFIG_IMAGE_SIZE {
            warn!("Config: storage too small ({} bytes)", self.storage.len());
            return;
        }

        for (addr, byte) in self.config.to_bytes().iter().enumerate() {
            self.storage.write(addr, *byte);
        }
        debug!("Config: saved");
    }
}
