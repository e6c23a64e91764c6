//! Example: Build an Ethernet frame and transmit it
//!
//! Note: Requires root/administrator privileges to run.
//!
//! Run with:
//!   sudo cargo run --example send_frame -- <interface> <dmac> [smac]
//!
//! The source MAC defaults to the interface's own address. Set
//! `RUST_LOG=debug` to see each encapsulation step.

use rawframes_capture::{get_interface, Nic, PcapDriver};
use rawframes_core::{EtherType, MacAddress};
use rawframes_packet::{EthernetLayer, Layer};
use tracing_subscriber::EnvFilter;

const PAYLOAD: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0xf9, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <interface> <dmac> [smac]", args[0]);
        std::process::exit(1);
    }

    let interface = &args[1];
    let dmac: MacAddress = args[2].parse()?;
    let smac: MacAddress = match args.get(3) {
        Some(smac) => smac.parse()?,
        None => get_interface(interface)?
            .mac
            .ok_or("interface has no MAC address; pass one explicitly")?,
    };

    let mut frame = EthernetLayer::new();
    frame.set_dmac(dmac)?;
    frame.set_smac(smac)?;
    frame.set_ethertype(EtherType::Reserved);
    frame.set_payload(PAYLOAD);

    println!("Before: {}", frame.describe());
    frame.encapsulate()?;
    println!("After:  {}", frame.describe());

    let mut nic = Nic::new(PcapDriver::new());
    nic.open(interface)?;
    nic.tx_frame(frame.core_mut())?;
    nic.close();

    println!("{}", nic.stats().format());
    Ok(())
}
