//! Play an audio file on the default output device.
//!
//! Usage: cargo run --example play_file -- <file> [bass library folder]
//!
//! End-of-media and disposal events are queued and dispatched on the main
//! thread while it polls the playback position.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bass_bindings::{Bass, Channel, ConfigOption, LoadOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(file) = args.next() else {
        eprintln!("Usage: play_file <file> [bass library folder]");
        std::process::exit(1);
    };

    let mut options = LoadOptions::new()
        .event_queue(64)
        .config(ConfigOption::UpdatePeriod, 10);
    if let Some(folder) = args.next() {
        options = options.folder(folder);
    }

    let bass = Bass::load(&options)?;
    println!("BASS version: {:#010x}", bass.version());
    let pump = bass.take_event_pump().ok_or("event queue not configured")?;

    let device = bass.playback().get_by_index(1)?;
    println!("Output: {}", device.info()?.name);
    device.init(48000, 0)?;

    let channel = Channel::from_file(&bass, &file, 0)?;
    let info = channel.info()?;
    println!(
        "{}: {} Hz, {} ch, {:.1} s",
        file,
        info.freq,
        info.chans,
        channel.duration()?.as_secs_f64()
    );

    let ended = Arc::new(AtomicBool::new(false));
    let flag = ended.clone();
    channel.on_media_ended(move || flag.store(true, Ordering::SeqCst));

    channel.play(false)?;
    while !ended.load(Ordering::SeqCst) {
        pump.dispatch_timeout(Duration::from_millis(500));
        if let Ok(pos) = channel.position_seconds() {
            let (left, right) = channel.level().unwrap_or((0, 0));
            print!("\r{:7.2} s  L {:5}  R {:5}", pos, left, right);
            std::io::stdout().flush()?;
        }
    }
    println!("\nDone. Events dropped: {}", pump.dropped());

    drop(channel);
    pump.dispatch_pending();
    device.free()?;
    Ok(())
}
