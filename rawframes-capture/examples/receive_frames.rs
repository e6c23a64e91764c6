//! Example: Receive frames into a FrameCore and walk their bytes
//!
//! Note: Requires root/administrator privileges to run.
//!
//! Run with:
//!   sudo cargo run --example receive_frames -- <interface> [count] [filter]
//!
//! Without a filter, ARP and PAUSE frames are captured.

use rawframes_capture::{filters, CaptureConfig, Nic, PcapDriver};
use rawframes_core::Error;
use rawframes_packet::FrameCore;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <interface> [count] [filter]", args[0]);
        std::process::exit(1);
    }

    let interface = &args[1];
    let count: usize = match args.get(2) {
        Some(count) => count.parse()?,
        None => 10,
    };
    let filter = args.get(3).cloned().unwrap_or_else(|| {
        filters::combine_filters_or(&[&filters::arp_filter(), &filters::pause_filter()])
    });

    let config = CaptureConfig::default().with_timeout_ms(1000);
    let mut nic = Nic::new(PcapDriver::with_config(config));
    nic.open(interface)?;
    nic.set_filter(&filter)?;
    println!("Capturing {} frames on {} matching '{}'", count, interface, filter);

    let mut frame = FrameCore::new();
    let mut received = 0;
    while received < count {
        match nic.rx_frame(&mut frame) {
            Ok(()) => {
                received += 1;
                let preview = frame
                    .bytes()
                    .take(32)
                    .map(|b| format!("{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("[{}] {}", received, preview);
            }
            Err(Error::Timeout) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    nic.close();
    println!("\n{}", nic.stats().format());
    Ok(())
}
