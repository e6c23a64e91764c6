//! Example: Building ARP, IPv4, PAUSE and Q-in-Q frames
//!
//! Prints each layer's field dump and the resulting wire bytes. Nothing is
//! transmitted.
//!
//! Run with: cargo run --example build_frames

use rawframes_core::{ArpOp, Ipv4Proto, MacAddress, Result};
use rawframes_packet::{insert_qinq, ArpLayer, Ipv4Layer, Layer, PauseLayer};
use std::net::Ipv4Addr;

fn print_wire(name: &str, layer: &mut dyn Layer) {
    println!("{}", name);
    println!("  dump: {}", layer.describe());

    let hex = layer
        .core_mut()
        .bytes()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  wire: {}", hex);
    println!();
}

fn main() -> Result<()> {
    let host_a = MacAddress::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x0a]);
    let host_b = MacAddress::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x0b]);
    let ip_a = Ipv4Addr::new(192, 168, 1, 10);
    let ip_b = Ipv4Addr::new(192, 168, 1, 11);

    // ARP request: who has ip_b, tell ip_a
    let mut arp = ArpLayer::new();
    arp.set_op(ArpOp::Request);
    arp.set_qmac(host_a)?;
    arp.set_qip(ip_a.octets())?;
    arp.set_tip(ip_b.octets())?;
    arp.encapsulate()?;
    print_wire("ARP request", &mut arp);

    // UDP-numbered IPv4 packet with an opaque payload, Q-in-Q tagged
    let mut ip = Ipv4Layer::new();
    ip.set_proto(Ipv4Proto::Udp);
    ip.set_sip(ip_a.octets())?;
    ip.set_dip(ip_b.octets())?;
    ip.set_payload(b"rawframes");
    ip.ethernet_mut().set_dmac(host_b)?;
    ip.ethernet_mut().set_smac(host_a)?;
    insert_qinq(&mut ip, 100)?;
    ip.encapsulate()?;
    println!("IPv4 header checksum: 0x{:04x}", ip.checksum());
    print_wire("IPv4 in Q-in-Q", &mut ip);

    // PAUSE for the maximum time
    let mut pause = PauseLayer::new();
    pause.set_quanta(0xffff);
    pause.ethernet_mut().set_smac(host_a)?;
    pause.encapsulate()?;
    print_wire("PAUSE", &mut pause);

    Ok(())
}
