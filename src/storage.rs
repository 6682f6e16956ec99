//! Flash persistence for the configuration image.
//!
//! The control core writes settings into a RAM [`ConfigImage`] through the
//! byte-addressable [`lightctl::ByteStore`] interface. This module mirrors
//! that image to the nRF52840's internal flash via `sequential-storage`,
//! which handles wear levelling and page GC.
//!
//! Storage layout:
//!   - One map item under [`KEY_CONFIG_IMAGE`] holding the raw image bytes.
//!   - A missing item leaves the image blank, which the configuration
//!     loader treats as "no prior config".

use defmt::{debug, error, info};
use embedded_storage_async::nor_flash::NorFlash;
use lightctl::config::{CONFIG_IMAGE_SIZE, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use lightctl::{Error, ImageStore};

/// RAM image of the persisted configuration.
pub type ConfigImage = ImageStore<CONFIG_IMAGE_SIZE>;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Key for the configuration image in the map storage.
const KEY_CONFIG_IMAGE: u8 = 0x01;

/// Scratch buffer size for sequential-storage item headers + payload.
const SCRATCH_SIZE: usize = 64;

/// Read the configuration image from flash.
///
/// Read failures degrade to a blank image so boot falls back to defaults.
pub async fn load_from_flash(flash: &mut impl NorFlash) -> ConfigImage {
    let mut buf = [0u8; SCRATCH_SIZE];

    match sequential_storage::map::fetch_item::<u8, &[u8], _>(
        flash,
        STORAGE_START..STORAGE_END,
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &KEY_CONFIG_IMAGE,
    )
    .await
    {
        Ok(Some(data)) => {
            info!("Loaded {} byte config image from flash", data.len());
            ConfigImage::from_bytes(data)
        }
        Ok(None) => {
            info!("No config image in flash");
            ConfigImage::new()
        }
        Err(e) => {
            error!("Flash read error: {:?}", defmt::Debug2Format(&e));
            ConfigImage::new()
        }
    }
}

/// Persist the image to flash if it changed since the last sync.
pub async fn save_to_flash(flash: &mut impl NorFlash, image: &mut ConfigImage) -> Result<(), Error> {
    if !image.is_dirty() {
        debug!("ConfigImage: no changes to save");
        return Ok(());
    }

    let mut buf = [0u8; SCRATCH_SIZE];
    let item: &[u8] = image.as_bytes();

    sequential_storage::map::store_item::<u8, &[u8], _>(
        flash,
        STORAGE_START..STORAGE_END,
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &KEY_CONFIG_IMAGE,
        &item,
    )
    .await
    .map_err(|e| {
        error!("Flash write error: {:?}", defmt::Debug2Format(&e));
        Error::Storage
    })?;

    image.clear_dirty();
    info!("Saved config image to flash");
    Ok(())
}
