//! List playback, recording, WASAPI and CD devices.
//!
//! Usage: cargo run --example list_devices -- [bass library folder]

use bass_bindings::{Addon, Bass, BassError, LoadOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut options = LoadOptions::new().addon(Addon::Wasapi).addon(Addon::Cd);
    if let Some(folder) = std::env::args().nth(1) {
        options = options.folder(folder);
    }
    let bass = Bass::load(&options)?;

    println!("Playback devices:");
    for device in bass.playback().enumerate()? {
        let info = device.info()?;
        println!(
            "  {:2}: {}{} ({:?})",
            device.index(),
            info.name,
            if info.is_default() { " [default]" } else { "" },
            info.device_type()
        );
    }

    println!("Recording devices:");
    for device in bass.record().enumerate()? {
        let info = device.info()?;
        println!("  {:2}: {}", device.index(), info.name);
    }

    println!("WASAPI endpoints:");
    match bass.wasapi().enumerate() {
        Ok(devices) => {
            for device in devices {
                let info = device.info()?;
                println!(
                    "  {:2}: {} {} ({} Hz, {} ch)",
                    device.index(),
                    if info.is_input() { "in " } else { "out" },
                    info.name,
                    info.mix_freq,
                    info.mix_chans
                );
            }
        }
        Err(BassError::AddonUnavailable(_)) => println!("  (basswasapi not available)"),
        Err(e) => return Err(e.into()),
    }

    println!("CD drives:");
    match bass.cd_drives().enumerate() {
        Ok(drives) => {
            for drive in drives {
                let info = drive.info()?;
                let ready = drive.is_ready()?;
                println!(
                    "  {:2}: {} {} {}",
                    drive.index(),
                    info.vendor,
                    info.product,
                    if ready { format!("({} tracks)", drive.tracks()?) } else { "(no disc)".into() }
                );
            }
        }
        Err(BassError::AddonUnavailable(_)) => println!("  (basscd not available)"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
